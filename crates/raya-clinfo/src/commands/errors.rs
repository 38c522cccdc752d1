//! `raya-clinfo errors`: status codes and their messages.

use std::collections::BTreeMap;

use raya_sdk::NativeValue;
use raya_stdlib_opencl::catalog::errors;
use termcolor::WriteColor;

use crate::output::StyledOutput;
use crate::session::Session;

pub fn execute<W: WriteColor>(
    session: &Session,
    out: &mut StyledOutput<W>,
    code: Option<i64>,
    json: bool,
) -> anyhow::Result<()> {
    if let Some(code) = code {
        let message = session.call("cl.errorString", &[NativeValue::int(code)])?;
        if json {
            return out.json(&message);
        }
        out.plain(&format!("{}: ", code))?;
        out.info(message.as_str().unwrap_or_default())?;
        return out.newline().map_err(Into::into);
    }

    if json {
        let table: BTreeMap<String, NativeValue> = errors::entries()
            .iter()
            .map(|row| (row.code.to_string(), NativeValue::string(row.message)))
            .collect();
        return out.json(&NativeValue::Object(table));
    }
    for row in errors::entries() {
        out.plain(&format!("{:>5}  ", row.code))?;
        out.info(row.message)?;
        out.newline()?;
    }
    Ok(())
}
