//! Error type for the OpenCL binding
//!
//! Every variant aborts the current host call. Native status codes are
//! translated through the error catalog before they reach the host.

use raya_sdk::NativeError;

use crate::catalog::errors;
use crate::driver::Status;

/// Result alias used throughout the binding
pub type ClResult<T> = Result<T, ClError>;

/// Failures raised by the binding
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClError {
    /// Non-success status returned by the native API
    #[error("OpenCL: {message}")]
    Native {
        /// Raw status code
        status: Status,
        /// Catalog message for `status`
        message: &'static str,
    },

    /// A host value is not a wrapper of the expected category
    #[error("expected OpenCL {expected} object, found {found}")]
    TypeMismatch {
        /// Expected category name
        expected: &'static str,
        /// What was found instead (`device object`, `unknown userdata`, a host type)
        found: String,
    },

    /// A native value has no name in its enumeration type
    #[error("unknown enum value = {value} for {enum_type}")]
    UnknownEnumValue {
        /// Enumeration type name
        enum_type: &'static str,
        /// Raw native value
        value: i64,
    },

    /// A name is not part of the enumeration type
    #[error("enumeration value '{name}' not found in {enum_type}")]
    UnknownEnumName {
        /// Enumeration type name
        enum_type: &'static str,
        /// Name that was looked up
        name: String,
    },

    /// Decoder and native buffer disagree; a defect, not a runtime condition
    #[error("info schema invariant violated: {0}")]
    SchemaInvariant(String),

    /// The wrapper was closed explicitly
    #[error("OpenCL {0} object is closed")]
    Closed(&'static str),

    /// Invalid host argument
    #[error("{0}")]
    Argument(String),

    /// Feature not compiled into this build
    #[error("{0} is not supported by this build")]
    Unsupported(&'static str),
}

impl ClError {
    /// Translate a native status code
    pub fn native(status: Status) -> Self {
        ClError::Native {
            status,
            message: errors::translate(status),
        }
    }

    /// Native status code, if this is a native failure
    pub fn status(&self) -> Option<Status> {
        match self {
            ClError::Native { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<ClError> for NativeError {
    fn from(e: ClError) -> Self {
        match e {
            ClError::TypeMismatch { expected, found } => NativeError::TypeMismatch {
                expected: format!("OpenCL {} object", expected),
                got: found,
            },
            ClError::Argument(msg) => NativeError::ArgumentError(msg),
            other => NativeError::AbiError(other.to_string()),
        }
    }
}
