//! `raya-clinfo complete LINE START END`: console completion candidates.

use raya_sdk::NativeValue;
use termcolor::WriteColor;

use crate::output::StyledOutput;
use crate::session::Session;

pub fn execute<W: WriteColor>(
    session: &Session,
    out: &mut StyledOutput<W>,
    line: &str,
    start: usize,
    end: usize,
    json: bool,
) -> anyhow::Result<()> {
    let candidates = raya_stdlib_opencl::complete(&session.registry, line, start, end);
    if json {
        let list = candidates.into_iter().map(NativeValue::string).collect();
        return out.json(&NativeValue::Array(list));
    }
    for candidate in candidates {
        out.plain(&candidate)?;
        out.newline()?;
    }
    Ok(())
}
