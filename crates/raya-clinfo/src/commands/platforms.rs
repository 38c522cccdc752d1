//! `raya-clinfo platforms`: every platform and its devices with all info.

use std::collections::BTreeMap;

use log::debug;
use raya_sdk::NativeValue;
use termcolor::WriteColor;

use super::method;
use crate::output::StyledOutput;
use crate::session::Session;

/// Platforms and devices as one host value:
/// `[{ info = {...}, devices = [{...}, ...] }, ...]`
pub fn collect(session: &Session, device_type: &str) -> anyhow::Result<NativeValue> {
    let platforms = session.call("cl.platforms", &[])?;
    let mut report = Vec::new();
    for (i, platform) in platforms.as_array().unwrap_or_default().iter().enumerate() {
        let devices = method(platform, "devices", &[NativeValue::string(device_type)])?;
        let devices = devices
            .as_array()
            .unwrap_or_default()
            .iter()
            .map(|d| method(d, "info", &[]))
            .collect::<anyhow::Result<Vec<_>>>()?;
        debug!("platform #{}: {} device(s)", i, devices.len());

        let mut entry = BTreeMap::new();
        entry.insert("info".to_string(), method(platform, "info", &[])?);
        entry.insert("devices".to_string(), NativeValue::Array(devices));
        report.push(NativeValue::Object(entry));
    }
    Ok(NativeValue::Array(report))
}

pub fn execute<W: WriteColor>(
    session: &Session,
    out: &mut StyledOutput<W>,
    device_type: &str,
    json: bool,
) -> anyhow::Result<()> {
    let report = collect(session, device_type)?;
    if json {
        return out.json(&report);
    }

    let platforms = report.as_array().unwrap_or_default();
    if platforms.is_empty() {
        out.warning("No OpenCL platforms found")?;
        out.newline()?;
        return Ok(());
    }
    for (i, platform) in platforms.iter().enumerate() {
        let info = platform.get("info").cloned().unwrap_or_default();
        out.heading(&format!("Platform #{}: {}", i, name_of(&info)))?;
        if let Some(fields) = info.as_object() {
            for (key, value) in fields {
                out.field(1, key, value)?;
            }
        }
        let devices = platform.get("devices").and_then(NativeValue::as_array).unwrap_or_default();
        for (j, device) in devices.iter().enumerate() {
            out.newline()?;
            out.heading(&format!("  Device #{}: {}", j, name_of(device)))?;
            if let Some(fields) = device.as_object() {
                for (key, value) in fields {
                    out.field(2, key, value)?;
                }
            }
        }
        out.newline()?;
    }
    Ok(())
}

fn name_of(info: &NativeValue) -> &str {
    info.get("name").and_then(NativeValue::as_str).unwrap_or("?")
}
