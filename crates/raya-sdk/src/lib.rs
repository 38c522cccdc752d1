//! Raya SDK - Lightweight SDK for writing native modules
//!
//! This crate provides the minimal types needed to write Raya native modules
//! that expose foreign objects to the host: the dynamic value model, userdata
//! cells with bound method tables, and the symbolic function registry.
//!
//! # Example
//!
//! ```ignore
//! use raya_sdk::{NativeFunctionRegistry, NativeValue};
//!
//! let mut registry = NativeFunctionRegistry::new();
//! registry.register("math.double", |args| {
//!     let n = args.first().and_then(|v| v.as_i64()).unwrap_or(0);
//!     Ok(NativeValue::int(n * 2))
//! });
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod handler;
pub mod userdata;
pub mod value;

pub use error::{AbiResult, NativeError};
pub use handler::{NativeFunctionRegistry, NativeHandlerFn};
pub use userdata::{
    strip_receiver, CallStyle, ForeignObject, Metatable, NativeMethod, Userdata, GC_METHOD,
    TOSTRING_METHOD,
};
pub use value::NativeValue;
