//! Info query engine
//!
//! For every row of the requested tables: probe the byte size, allocate a
//! buffer of exactly that size, fill it, decode it and insert it under the
//! row's friendly name. Any failure drops the partially built map.
//!
//! Program binaries are the exception: they are copied into buffers sized
//! from the `binary_sizes` row through a dedicated driver call.

use std::collections::BTreeMap;

use log::trace;
use raya_sdk::NativeValue;

use crate::decode::{self, Rewrap};
use crate::driver::Status;
use crate::error::{ClError, ClResult};
use crate::schema::{InfoRow, InfoTable, Schema, Shape};

/// One `clGet*Info` call for a fixed handle and key: `(table, param, out)`
pub type Fetch<'a> = dyn FnMut(InfoTable, u32, Option<&mut [u8]>) -> Result<usize, Status> + 'a;

/// Copy the program binaries into one destination per device
pub type FetchBinaries<'a> = dyn FnMut(&mut [&mut [u8]]) -> Result<(), Status> + 'a;

/// Query every compiled row of `tables` into one property map.
pub fn collect_info(
    tables: &[InfoTable],
    fetch: &mut Fetch<'_>,
    fetch_binaries: &mut FetchBinaries<'_>,
    rewrap: &mut Rewrap<'_>,
) -> ClResult<NativeValue> {
    let schema = Schema::get();
    let mut map = BTreeMap::new();
    for &table in tables {
        for row in schema.entries(table) {
            let value = match row.shape {
                Shape::Binaries { sizes } => binaries(row, sizes, &map, fetch_binaries)?,
                _ => {
                    let raw = fetch_raw(row, fetch)?;
                    decode::decode(&row.shape, &raw, rewrap)?
                }
            };
            map.insert(row.name.to_string(), value);
        }
    }
    Ok(NativeValue::Object(map))
}

fn probe(row: &InfoRow, fetch: &mut Fetch<'_>) -> ClResult<usize> {
    let size = fetch(row.table, row.id, None).map_err(ClError::native)?;
    trace!("probe {}.{} -> {} bytes", row.table, row.name, size);
    Ok(size)
}

fn fill(row: &InfoRow, fetch: &mut Fetch<'_>, buf: &mut [u8]) -> ClResult<()> {
    let expected = buf.len();
    let filled = fetch(row.table, row.id, Some(buf)).map_err(ClError::native)?;
    trace!("fill {}.{} <- {} bytes", row.table, row.name, filled);
    if filled != expected {
        return Err(ClError::SchemaInvariant(format!(
            "{}.{} probed {} bytes but filled {}",
            row.table, row.name, expected, filled
        )));
    }
    Ok(())
}

fn fetch_raw(row: &InfoRow, fetch: &mut Fetch<'_>) -> ClResult<Vec<u8>> {
    let size = probe(row, fetch)?;
    let mut buf = vec![0u8; size];
    fill(row, fetch, &mut buf)?;
    Ok(buf)
}

/// Destinations are sized by the sibling property already in `map`.
fn binaries(
    row: &InfoRow,
    sizes: &str,
    map: &BTreeMap<String, NativeValue>,
    fetch_binaries: &mut FetchBinaries<'_>,
) -> ClResult<NativeValue> {
    let lengths = map
        .get(sizes)
        .and_then(NativeValue::as_array)
        .ok_or_else(|| {
            ClError::SchemaInvariant(format!("{} queried before '{}'", row.name, sizes))
        })?
        .iter()
        .map(|v| {
            v.as_i64()
                .and_then(|n| usize::try_from(n).ok())
                .ok_or_else(|| ClError::SchemaInvariant(format!("bad entry in '{}'", sizes)))
        })
        .collect::<ClResult<Vec<usize>>>()?;

    let mut blobs: Vec<Vec<u8>> = lengths.iter().map(|&n| vec![0u8; n]).collect();
    let mut out: Vec<&mut [u8]> = blobs.iter_mut().map(Vec::as_mut_slice).collect();
    fetch_binaries(&mut out).map_err(ClError::native)?;
    trace!("fill {}.{} <- {:?} bytes", row.table, row.name, lengths);
    Ok(decode::binaries(blobs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::consts::*;
    use crate::driver::RawHandle;
    use crate::object::Category;

    fn string_prop(text: &str, out: Option<&mut [u8]>) -> Result<usize, Status> {
        let mut bytes = text.as_bytes().to_vec();
        bytes.push(0);
        if let Some(out) = out {
            out[..bytes.len()].copy_from_slice(&bytes);
        }
        Ok(bytes.len())
    }

    fn no_rewrap(_: Category, _: RawHandle) -> ClResult<NativeValue> {
        Ok(NativeValue::null())
    }

    fn no_binaries(_: &mut [&mut [u8]]) -> Result<(), Status> {
        Err(CL_INVALID_PROGRAM)
    }

    #[test]
    fn test_platform_map_has_every_row() {
        let mut fetch = |_: InfoTable, param: u32, out: Option<&mut [u8]>| {
            string_prop(&format!("p{:x}", param), out)
        };
        let map = collect_info(&[InfoTable::Platform], &mut fetch, &mut no_binaries, &mut no_rewrap).unwrap();
        let keys: Vec<_> = map.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["extensions", "name", "profile", "vendor", "version"]);
        assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("p902"));
    }

    #[test]
    fn test_failure_aborts_query() {
        let mut fetch = |_: InfoTable, param: u32, out: Option<&mut [u8]>| {
            if param == CL_PLATFORM_VENDOR {
                Err(CL_INVALID_PLATFORM)
            } else {
                string_prop("x", out)
            }
        };
        let err = collect_info(&[InfoTable::Platform], &mut fetch, &mut no_binaries, &mut no_rewrap).unwrap_err();
        assert_eq!(err.status(), Some(CL_INVALID_PLATFORM));
        assert_eq!(err.to_string(), "OpenCL: invalid platform");
    }

    #[test]
    fn test_short_fill_is_invariant_violation() {
        let mut fetch = |_: InfoTable, _: u32, out: Option<&mut [u8]>| match out {
            None => Ok(8),
            Some(_) => Ok(4),
        };
        let err = collect_info(&[InfoTable::Platform], &mut fetch, &mut no_binaries, &mut no_rewrap).unwrap_err();
        assert!(matches!(err, ClError::SchemaInvariant(_)));
    }
}
