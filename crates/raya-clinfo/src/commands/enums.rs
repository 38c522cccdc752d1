//! `raya-clinfo enums [TYPE]`: the enumeration catalog of this build.

use std::collections::BTreeMap;

use raya_sdk::NativeValue;
use raya_stdlib_opencl::catalog::{Catalog, EnumType};
use termcolor::WriteColor;

use crate::output::StyledOutput;

/// `{ type_name = { name = value, ... }, ... }` for the selected types
pub fn collect(types: &[EnumType]) -> NativeValue {
    let catalog = Catalog::get();
    let mut report = BTreeMap::new();
    for ty in types {
        let rows = catalog
            .entries(*ty)
            .iter()
            .map(|row| (row.name.to_string(), NativeValue::int(row.value)))
            .collect();
        report.insert(ty.name().to_string(), NativeValue::Object(rows));
    }
    NativeValue::Object(report)
}

/// Resolve a type filter; `None` selects every type.
pub fn select(name: Option<&str>) -> anyhow::Result<Vec<EnumType>> {
    match name {
        None => Ok(EnumType::ALL.to_vec()),
        Some(name) => match EnumType::from_name(name) {
            Some(ty) => Ok(vec![ty]),
            None => {
                let known: Vec<&str> = EnumType::ALL.iter().map(|t| t.name()).collect();
                anyhow::bail!("unknown enumeration type '{}' (known: {})", name, known.join(", "))
            }
        },
    }
}

pub fn execute<W: WriteColor>(out: &mut StyledOutput<W>, name: Option<&str>, json: bool) -> anyhow::Result<()> {
    let types = select(name)?;
    if json {
        return out.json(&collect(&types));
    }

    let catalog = Catalog::get();
    for ty in types {
        let rows = catalog.entries(ty);
        out.heading(ty.name())?;
        if rows.is_empty() {
            out.warning("  (none in this build)")?;
            out.newline()?;
        }
        for row in rows {
            out.plain(&format!("  {:#010x}  ", row.value))?;
            out.info(row.name)?;
            out.plain(&format!("  (since {})", row.since.as_str()))?;
            out.newline()?;
        }
    }
    Ok(())
}
