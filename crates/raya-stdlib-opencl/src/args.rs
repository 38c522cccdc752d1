//! Argument extraction for host calls
//!
//! Positions are 0-based here and reported 1-based, the way the host
//! numbers arguments.

use raya_sdk::NativeValue;

use crate::error::{ClError, ClResult};

fn mismatch(index: usize, expected: &str, got: Option<&NativeValue>) -> ClError {
    ClError::Argument(format!(
        "expected type {} for argument {}, got {}",
        expected,
        index + 1,
        got.map_or("nil", NativeValue::type_name)
    ))
}

fn present(args: &[NativeValue], index: usize) -> Option<&NativeValue> {
    args.get(index).filter(|v| !v.is_null())
}

/// Required string
pub fn string(args: &[NativeValue], index: usize) -> ClResult<&str> {
    let value = args.get(index);
    value.and_then(NativeValue::as_str).ok_or_else(|| mismatch(index, "string", value))
}

/// Optional string with a default
pub fn opt_string<'a>(args: &'a [NativeValue], index: usize, default: &'a str) -> ClResult<&'a str> {
    match present(args, index) {
        None => Ok(default),
        Some(value) => value.as_str().ok_or_else(|| mismatch(index, "string", Some(value))),
    }
}

/// Required integer
pub fn integer(args: &[NativeValue], index: usize) -> ClResult<i64> {
    let value = args.get(index);
    value.and_then(NativeValue::as_i64).ok_or_else(|| mismatch(index, "number", value))
}

/// Required non-negative integer
pub fn size(args: &[NativeValue], index: usize) -> ClResult<usize> {
    let n = integer(args, index)?;
    usize::try_from(n).map_err(|_| {
        ClError::Argument(format!("argument {} must not be negative, got {}", index + 1, n))
    })
}

/// Required boolean
pub fn boolean(args: &[NativeValue], index: usize) -> ClResult<bool> {
    let value = args.get(index);
    value.and_then(NativeValue::as_bool).ok_or_else(|| mismatch(index, "boolean", value))
}

/// Required table with string keys
pub fn table(args: &[NativeValue], index: usize) -> ClResult<&NativeValue> {
    match args.get(index) {
        Some(value @ NativeValue::Object(_)) => Ok(value),
        other => Err(mismatch(index, "table", other)),
    }
}

/// Optional sequence; null and absent read as empty
pub fn opt_array(args: &[NativeValue], index: usize) -> ClResult<&[NativeValue]> {
    match present(args, index) {
        None => Ok(&[]),
        Some(value) => value.as_array().ok_or_else(|| mismatch(index, "table", Some(value))),
    }
}
