//! Subcommand implementations. Each builds a host value and renders it as
//! text or JSON.

pub mod complete;
pub mod enums;
pub mod errors;
pub mod features;
pub mod platforms;

use raya_sdk::{CallStyle, NativeValue};

/// Call a wrapper method the way a script would (`obj:name(args)`).
pub(crate) fn method(value: &NativeValue, name: &str, args: &[NativeValue]) -> anyhow::Result<NativeValue> {
    let cell = value
        .as_userdata()
        .ok_or_else(|| anyhow::anyhow!("expected an OpenCL object, got {}", value.type_name()))?;
    Ok(cell.call(name, args, CallStyle::Method)?)
}
