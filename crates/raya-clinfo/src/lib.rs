//! Report tool over the Raya OpenCL bindings
//!
//! Everything here goes through the same `cl.*` functions and wrapper
//! methods a script sees, so the reports double as a smoke test of the
//! bindings against a real or in-memory driver.

pub mod commands;
pub mod output;
pub mod session;

pub use session::{Backend, Session};
