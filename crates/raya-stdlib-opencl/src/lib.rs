//! Raya OpenCL Standard Library
//!
//! Exposes OpenCL platforms, devices, contexts, queues, memory objects,
//! samplers, programs, kernels and events to Raya scripts as userdata
//! wrappers. Every wrapper answers `info()` by walking a declarative schema
//! of the native info tables, decoding enums and bitfields to names through
//! the catalogs.
//!
//! The native API sits behind the [`Driver`] trait. [`FakeDriver`] is a
//! deterministic in-memory implementation; the system ICD loader is
//! `NativeDriver` behind the `native` feature.
//!
//! The API revision is chosen at build time: `cl-1-2` (default) or `cl-1-1`.

#![warn(missing_docs)]

pub mod args;
pub mod catalog;
pub mod classes;
pub mod completion;
pub mod decode;
pub mod driver;
pub mod error;
pub mod guard;
pub mod library;
pub mod object;
pub mod query;
pub mod registry;
pub mod schema;
pub mod version;

pub use completion::complete;
pub use driver::{Driver, FakeDriver, RawHandle};
#[cfg(feature = "native")]
pub use driver::NativeDriver;
pub use error::{ClError, ClResult};
pub use library::OpenCl;
pub use object::Category;
pub use registry::register_opencl;
pub use version::{ApiVersion, COMPILED};

/// Check the catalogs and the schema against their structural invariants
/// (ordering, sentinel rows, unique names). Hosts call this once at load.
pub fn self_check() -> ClResult<()> {
    catalog::Catalog::get().validate()?;
    schema::Schema::get().validate()
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_tables_are_well_formed() {
        super::self_check().unwrap();
    }
}
