//! Static classification tables
//!
//! - `enums`: native enum/bitfield values ↔ canonical names
//! - `errors`: native status codes → messages

pub mod enums;
pub mod errors;

pub use enums::{
    decode_bitfield, decode_enum, encode_bitfield, encode_enum, Catalog, EnumRow, EnumType,
};
pub use errors::{check, translate, ErrorRow};
