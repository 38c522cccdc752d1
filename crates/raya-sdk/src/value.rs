//! NativeValue: the host value model seen by native modules
//!
//! Native modules hand values to the host and receive arguments from it as
//! `NativeValue`s. Scalars and strings are owned inline; foreign objects are
//! shared `Userdata` cells that carry their own capability table.
//!
//! # Variants
//!
//! ```text
//! Null                      host nil
//! Bool / Int / Float        scalars (Int is i64, Float is f64)
//! String / Buffer           owned text and raw bytes
//! Array                     1-based sequence on the host side
//! Object                    key → value mapping (order irrelevant)
//! Pointer                   opaque address, never dereferenced by the host
//! Userdata                  foreign object with a metatable
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::userdata::Userdata;

/// A dynamically typed host value.
#[derive(Clone, Default)]
pub enum NativeValue {
    /// Host nil
    #[default]
    Null,
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i64),
    /// Floating point number
    Float(f64),
    /// UTF-8 string
    String(String),
    /// Raw byte string
    Buffer(Vec<u8>),
    /// Sequence
    Array(Vec<NativeValue>),
    /// Key → value mapping
    Object(BTreeMap<String, NativeValue>),
    /// Opaque address (light userdata)
    Pointer(usize),
    /// Foreign object
    Userdata(Rc<Userdata>),
}

impl NativeValue {
    /// Create a null value
    #[inline]
    pub const fn null() -> Self {
        Self::Null
    }

    /// Create a boolean value
    #[inline]
    pub const fn bool(b: bool) -> Self {
        Self::Bool(b)
    }

    /// Create an integer value
    #[inline]
    pub const fn int(i: i64) -> Self {
        Self::Int(i)
    }

    /// Create an unsigned integer value.
    ///
    /// Values above `i64::MAX` become a `Float`, which is lossy: integers
    /// past 2^53 lose their low bits.
    pub fn uint(u: u64) -> Self {
        match i64::try_from(u) {
            Ok(i) => Self::Int(i),
            Err(_) => Self::Float(u as f64),
        }
    }

    /// Create a float value
    #[inline]
    pub const fn float(f: f64) -> Self {
        Self::Float(f)
    }

    /// Create a string value
    pub fn string(s: impl Into<String>) -> Self {
        Self::String(s.into())
    }

    /// Create an opaque pointer value; a zero address stays a pointer
    #[inline]
    pub const fn pointer(addr: usize) -> Self {
        Self::Pointer(addr)
    }

    /// Check if value is null
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Extract boolean value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extract an integer. Floats with no fractional part are accepted.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(*f as i64),
            _ => None,
        }
    }

    /// Extract a number as f64
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Borrow string contents
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow buffer contents
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Buffer(b) => Some(b),
            Self::String(s) => Some(s.as_bytes()),
            _ => None,
        }
    }

    /// Borrow array elements
    pub fn as_array(&self) -> Option<&[NativeValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow object fields
    pub fn as_object(&self) -> Option<&BTreeMap<String, NativeValue>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Borrow the userdata cell
    pub fn as_userdata(&self) -> Option<&Rc<Userdata>> {
        match self {
            Self::Userdata(ud) => Some(ud),
            _ => None,
        }
    }

    /// Look up a field of an object value
    pub fn get(&self, key: &str) -> Option<&NativeValue> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Identity comparison: two userdata values are the same object only if
    /// they share the same cell. Non-userdata values are never identical.
    pub fn same_object(&self, other: &NativeValue) -> bool {
        match (self, other) {
            (Self::Userdata(a), Self::Userdata(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Host type name, used in argument error messages
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "nil",
            Self::Bool(_) => "boolean",
            Self::Int(_) | Self::Float(_) => "number",
            Self::String(_) => "string",
            Self::Buffer(_) => "buffer",
            Self::Array(_) | Self::Object(_) => "table",
            Self::Pointer(_) => "lightuserdata",
            Self::Userdata(_) => "userdata",
        }
    }
}

impl fmt::Debug for NativeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NativeValue::Null"),
            Self::Bool(b) => write!(f, "NativeValue::Bool({})", b),
            Self::Int(i) => write!(f, "NativeValue::Int({})", i),
            Self::Float(x) => write!(f, "NativeValue::Float({})", x),
            Self::String(s) => write!(f, "NativeValue::String({:?})", s),
            Self::Buffer(b) => write!(f, "NativeValue::Buffer({} bytes)", b.len()),
            Self::Array(items) => f.debug_list().entries(items).finish(),
            Self::Object(map) => f.debug_map().entries(map).finish(),
            Self::Pointer(p) => write!(f, "NativeValue::Pointer({:#x})", p),
            Self::Userdata(ud) => write!(f, "NativeValue::Userdata({})", ud.describe()),
        }
    }
}

impl From<bool> for NativeValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for NativeValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<&str> for NativeValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for NativeValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<NativeValue>> for NativeValue {
    fn from(items: Vec<NativeValue>) -> Self {
        Self::Array(items)
    }
}

impl From<BTreeMap<String, NativeValue>> for NativeValue {
    fn from(map: BTreeMap<String, NativeValue>) -> Self {
        Self::Object(map)
    }
}

impl Serialize for NativeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(x) => serializer.serialize_f64(*x),
            Self::String(s) => serializer.serialize_str(s),
            Self::Buffer(bytes) => {
                let mut seq = serializer.serialize_seq(Some(bytes.len()))?;
                for b in bytes {
                    seq.serialize_element(b)?;
                }
                seq.end()
            }
            Self::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Object(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (k, v) in fields {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            Self::Pointer(p) => serializer.serialize_str(&format!("{:#x}", p)),
            Self::Userdata(ud) => serializer.serialize_str(&ud.describe()),
        }
    }
}
