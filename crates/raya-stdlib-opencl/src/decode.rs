//! Value decoders: raw info bytes → host values
//!
//! Every decoder checks the buffer length against its element width. A
//! mismatch means the schema and the native API disagree and is reported as
//! `ClError::SchemaInvariant`; nothing is truncated.

use std::collections::BTreeMap;
use std::mem::size_of;

use raya_sdk::NativeValue;

use crate::catalog::{decode_bitfield, decode_enum, errors, EnumType};
use crate::driver::RawHandle;
use crate::error::{ClError, ClResult};
use crate::object::Category;
use crate::schema::{Prim, Shape};

/// Turns a handle found in a property into a host value
pub type Rewrap<'a> = dyn FnMut(Category, RawHandle) -> ClResult<NativeValue> + 'a;

const PTR: usize = size_of::<usize>();

/// Decode `raw` according to `shape`.
///
/// `Shape::Binaries` is not handled here: its blobs are allocated by the
/// query engine from the sibling size array, see [`binaries`].
pub fn decode(shape: &Shape, raw: &[u8], rewrap: &mut Rewrap<'_>) -> ClResult<NativeValue> {
    match *shape {
        Shape::Scalar(p) => scalar(p, exact(raw, p.width(), "scalar")?),
        Shape::Bool => Ok(NativeValue::bool(read_u32(exact(raw, 4, "cl_bool")?) != 0)),
        Shape::Pointer => Ok(NativeValue::pointer(read_usize(exact(raw, PTR, "pointer")?))),
        Shape::Handle(category) => handle(category, exact(raw, PTR, "handle")?, rewrap),
        Shape::HandleArray(category) => elements(raw, PTR, "handle")?
            .map(|chunk| handle(category, chunk, rewrap))
            .collect::<ClResult<Vec<_>>>()
            .map(NativeValue::Array),
        Shape::Str => Ok(NativeValue::String(string(raw))),
        Shape::Array(p) => elements(raw, p.width(), "array")?
            .map(|chunk| scalar(p, chunk))
            .collect::<ClResult<Vec<_>>>()
            .map(NativeValue::Array),
        Shape::Enum(ty, p) => enum_value(ty, p, exact(raw, p.width(), "enum")?),
        Shape::EnumArray(ty, p) => elements(raw, p.width(), "enum array")?
            .map(|chunk| enum_value(ty, p, chunk))
            .collect::<ClResult<Vec<_>>>()
            .map(NativeValue::Array),
        Shape::Bitfield(ty) => {
            let bits = read_u64(exact(raw, 8, "cl_bitfield")?);
            Ok(NativeValue::String(decode_bitfield(bits, ty)))
        }
        Shape::ImageFormat => image_format(exact(raw, 8, "cl_image_format")?),
        Shape::ContextProperties => context_properties(raw, rewrap),
        Shape::ExecutionStatus => {
            let status = read_i32(exact(raw, 4, "execution status")?);
            if status < 0 {
                Ok(NativeValue::string(errors::translate(status)))
            } else {
                decode_enum(status as i64, EnumType::CommandExecutionStatus).map(NativeValue::string)
            }
        }
        Shape::Binaries { sizes } => Err(ClError::SchemaInvariant(format!(
            "binaries need the '{}' sibling and must go through the query engine",
            sizes
        ))),
    }
}

/// One byte buffer per program device, in device order.
pub fn binaries(blobs: Vec<Vec<u8>>) -> NativeValue {
    NativeValue::Array(blobs.into_iter().map(NativeValue::Buffer).collect())
}

/// NUL-terminated string; bytes after the first NUL are ignored
pub fn string(raw: &[u8]) -> String {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    String::from_utf8_lossy(&raw[..end]).into_owned()
}

fn exact<'a>(raw: &'a [u8], width: usize, what: &str) -> ClResult<&'a [u8]> {
    if raw.len() != width {
        return Err(ClError::SchemaInvariant(format!(
            "{} expects {} bytes, native returned {}",
            what,
            width,
            raw.len()
        )));
    }
    Ok(raw)
}

fn elements<'a>(raw: &'a [u8], width: usize, what: &str) -> ClResult<std::slice::ChunksExact<'a, u8>> {
    if raw.len() % width != 0 {
        return Err(ClError::SchemaInvariant(format!(
            "{} bytes is not a whole number of {}-byte {} elements",
            raw.len(),
            width,
            what
        )));
    }
    Ok(raw.chunks_exact(width))
}

fn scalar(p: Prim, raw: &[u8]) -> ClResult<NativeValue> {
    Ok(match p {
        Prim::U32 => NativeValue::int(read_u32(raw) as i64),
        Prim::I32 => NativeValue::int(read_i32(raw) as i64),
        Prim::U64 => NativeValue::uint(read_u64(raw)),
        Prim::Usize => NativeValue::uint(read_usize(raw) as u64),
        Prim::Isize => NativeValue::int(read_isize(raw) as i64),
    })
}

fn integer(p: Prim, raw: &[u8]) -> i64 {
    match p {
        Prim::U32 => read_u32(raw) as i64,
        Prim::I32 => read_i32(raw) as i64,
        Prim::U64 => read_u64(raw) as i64,
        Prim::Usize => read_usize(raw) as i64,
        Prim::Isize => read_isize(raw) as i64,
    }
}

fn enum_value(ty: EnumType, p: Prim, raw: &[u8]) -> ClResult<NativeValue> {
    decode_enum(integer(p, raw), ty).map(NativeValue::string)
}

fn handle(category: Category, raw: &[u8], rewrap: &mut Rewrap<'_>) -> ClResult<NativeValue> {
    let h = RawHandle(read_usize(raw));
    if h.is_null() {
        Ok(NativeValue::null())
    } else {
        rewrap(category, h)
    }
}

fn image_format(raw: &[u8]) -> ClResult<NativeValue> {
    let order = read_u32(&raw[..4]) as i64;
    let data_type = read_u32(&raw[4..]) as i64;
    let mut map = BTreeMap::new();
    map.insert("order".to_string(), NativeValue::string(decode_enum(order, EnumType::ChannelOrder)?));
    map.insert(
        "data_type".to_string(),
        NativeValue::string(decode_enum(data_type, EnumType::ChannelType)?),
    );
    Ok(NativeValue::Object(map))
}

fn context_properties(raw: &[u8], rewrap: &mut Rewrap<'_>) -> ClResult<NativeValue> {
    let words: Vec<isize> = elements(raw, size_of::<isize>(), "context property")?
        .map(read_isize)
        .collect();
    let mut map = BTreeMap::new();
    let mut it = words.chunks(2);
    for pair in &mut it {
        let key = pair[0];
        if key == 0 {
            break;
        }
        let value = *pair.get(1).ok_or_else(|| {
            ClError::SchemaInvariant(format!("context property {:#x} has no value", key))
        })?;
        let name = decode_enum(key as i64, EnumType::ContextProperties)?;
        let decoded = match name {
            "platform" => handle(Category::Platform, &(value as usize).to_ne_bytes(), rewrap)?,
            "interop_user_sync" => NativeValue::bool(value != 0),
            _ => NativeValue::int(value as i64),
        };
        map.insert(name.to_string(), decoded);
    }
    Ok(NativeValue::Object(map))
}

fn read_u32(raw: &[u8]) -> u32 {
    let mut b = [0u8; 4];
    b.copy_from_slice(&raw[..4]);
    u32::from_ne_bytes(b)
}

fn read_i32(raw: &[u8]) -> i32 {
    read_u32(raw) as i32
}

fn read_u64(raw: &[u8]) -> u64 {
    let mut b = [0u8; 8];
    b.copy_from_slice(&raw[..8]);
    u64::from_ne_bytes(b)
}

fn read_usize(raw: &[u8]) -> usize {
    let mut b = [0u8; PTR];
    b.copy_from_slice(&raw[..PTR]);
    usize::from_ne_bytes(b)
}

fn read_isize(raw: &[u8]) -> isize {
    read_usize(raw) as isize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::consts::*;

    fn no_rewrap(_: Category, _: RawHandle) -> ClResult<NativeValue> {
        panic!("no handles expected")
    }

    fn run(shape: Shape, raw: &[u8]) -> ClResult<NativeValue> {
        decode(&shape, raw, &mut no_rewrap)
    }

    #[test]
    fn test_scalars() {
        let v = run(Shape::Scalar(Prim::U32), &7u32.to_ne_bytes()).unwrap();
        assert_eq!(v.as_i64(), Some(7));
        let v = run(Shape::Scalar(Prim::U64), &(1u64 << 40).to_ne_bytes()).unwrap();
        assert_eq!(v.as_i64(), Some(1 << 40));
        let v = run(Shape::Scalar(Prim::I32), &(-3i32).to_ne_bytes()).unwrap();
        assert_eq!(v.as_i64(), Some(-3));
    }

    #[test]
    fn test_scalar_size_mismatch_is_invariant_violation() {
        let err = run(Shape::Scalar(Prim::U32), &[0u8; 8]).unwrap_err();
        assert!(matches!(err, ClError::SchemaInvariant(_)));
        let err = run(Shape::Array(Prim::U64), &[0u8; 12]).unwrap_err();
        assert!(matches!(err, ClError::SchemaInvariant(_)));
        let err = run(Shape::Bool, &[1u8]).unwrap_err();
        assert!(matches!(err, ClError::SchemaInvariant(_)));
    }

    #[test]
    fn test_bool_and_string() {
        assert_eq!(run(Shape::Bool, &1u32.to_ne_bytes()).unwrap().as_bool(), Some(true));
        assert_eq!(run(Shape::Bool, &0u32.to_ne_bytes()).unwrap().as_bool(), Some(false));
        assert_eq!(run(Shape::Str, b"FULL_PROFILE\0").unwrap().as_str(), Some("FULL_PROFILE"));
        assert_eq!(run(Shape::Str, b"").unwrap().as_str(), Some(""));
        assert_eq!(run(Shape::Str, b"ab\0cd\0").unwrap().as_str(), Some("ab"));
    }

    #[test]
    fn test_array() {
        let mut raw = Vec::new();
        for n in [64usize, 32, 1] {
            raw.extend_from_slice(&n.to_ne_bytes());
        }
        let v = run(Shape::Array(Prim::Usize), &raw).unwrap();
        let items: Vec<_> = v.as_array().unwrap().iter().filter_map(|x| x.as_i64()).collect();
        assert_eq!(items, vec![64, 32, 1]);
        let empty = run(Shape::Array(Prim::Usize), &[]).unwrap();
        assert_eq!(empty.as_array().map(|a| a.len()), Some(0));
    }

    #[test]
    fn test_enum_and_bitfield() {
        let v = run(Shape::Enum(EnumType::FilterMode, Prim::U32), &CL_FILTER_LINEAR.to_ne_bytes()).unwrap();
        assert_eq!(v.as_str(), Some("linear"));
        let err = run(Shape::Enum(EnumType::FilterMode, Prim::U32), &9u32.to_ne_bytes()).unwrap_err();
        assert!(matches!(err, ClError::UnknownEnumValue { .. }));
        let bits = CL_DEVICE_TYPE_CPU | CL_DEVICE_TYPE_GPU;
        let v = run(Shape::Bitfield(EnumType::DeviceType), &bits.to_ne_bytes()).unwrap();
        assert_eq!(v.as_str(), Some("cpu, gpu"));
    }

    #[test]
    fn test_image_format_uses_channel_type_for_data_type() {
        let raw = crate::driver::ImageFormat {
            order: CL_RGBA,
            data_type: CL_FLOAT,
        }
        .to_ne_bytes();
        let v = run(Shape::ImageFormat, &raw).unwrap();
        assert_eq!(v.get("order").and_then(|o| o.as_str()), Some("rgba"));
        assert_eq!(v.get("data_type").and_then(|o| o.as_str()), Some("float"));
    }

    #[test]
    fn test_execution_status() {
        let v = run(Shape::ExecutionStatus, &CL_QUEUED.to_ne_bytes()).unwrap();
        assert_eq!(v.as_str(), Some("queued"));
        let v = run(Shape::ExecutionStatus, &CL_OUT_OF_RESOURCES.to_ne_bytes()).unwrap();
        assert_eq!(v.as_str(), Some("out of resources"));
    }

    #[test]
    fn test_handles_go_through_rewrap() {
        let mut seen = Vec::new();
        let mut rewrap = |c: Category, h: RawHandle| {
            seen.push((c, h));
            Ok(NativeValue::int(h.addr() as i64))
        };
        let mut raw = Vec::new();
        raw.extend_from_slice(&0x10usize.to_ne_bytes());
        raw.extend_from_slice(&0usize.to_ne_bytes());
        let v = decode(&Shape::HandleArray(Category::Device), &raw, &mut rewrap).unwrap();
        let items = v.as_array().unwrap();
        assert_eq!(items[0].as_i64(), Some(0x10));
        assert!(items[1].is_null());
        assert_eq!(seen, vec![(Category::Device, RawHandle(0x10))]);
    }

    #[test]
    fn test_context_properties() {
        let mut raw = Vec::new();
        for w in [CL_CONTEXT_PLATFORM, 0x40, 0] {
            raw.extend_from_slice(&w.to_ne_bytes());
        }
        let mut rewrap = |_: Category, h: RawHandle| Ok(NativeValue::pointer(h.addr()));
        let v = decode(&Shape::ContextProperties, &raw, &mut rewrap).unwrap();
        assert!(matches!(v.get("platform"), Some(NativeValue::Pointer(0x40))));
        let empty = run(Shape::ContextProperties, &[]).unwrap();
        assert_eq!(empty.as_object().map(|m| m.len()), Some(0));
    }

    #[test]
    fn test_binaries_keep_device_order() {
        let v = binaries(vec![b"ab".to_vec(), Vec::new(), b"c".to_vec()]);
        let items = v.as_array().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].as_bytes(), Some(&b"ab"[..]));
        assert_eq!(items[1].as_bytes(), Some(&b""[..]));
        assert_eq!(items[2].as_bytes(), Some(&b"c"[..]));
    }

    #[test]
    fn test_null_pointer_is_an_opaque_pointer() {
        let null = run(Shape::Pointer, &0usize.to_ne_bytes()).unwrap();
        assert!(matches!(null, NativeValue::Pointer(0)));
        let some = run(Shape::Pointer, &0x1000usize.to_ne_bytes()).unwrap();
        assert!(matches!(some, NativeValue::Pointer(0x1000)));
    }
}
