//! `raya-clinfo features`: what the bindings were compiled with.

use termcolor::WriteColor;

use crate::output::StyledOutput;
use crate::session::Session;

pub fn execute<W: WriteColor>(session: &Session, out: &mut StyledOutput<W>, json: bool) -> anyhow::Result<()> {
    let features = session.call("cl.features", &[])?;
    if json {
        return out.json(&features);
    }
    if let Some(fields) = features.as_object() {
        for (key, value) in fields {
            out.field(0, key, value)?;
        }
    }
    Ok(())
}
