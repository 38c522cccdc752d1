//! Error types for the Raya SDK ABI

/// Result type for ABI calls
pub type AbiResult<T> = Result<T, NativeError>;

/// Native module error types
///
/// Every variant aborts the current host call; the host raises the
/// `Display` text as its error message.
#[derive(Debug, Clone, thiserror::Error)]
pub enum NativeError {
    /// Type mismatch during conversion or a foreign-object check
    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        /// Expected type name
        expected: String,
        /// Actual type name
        got: String,
    },

    /// Invalid argument
    #[error("Argument error: {0}")]
    ArgumentError(String),

    /// Unknown function or method
    #[error("Module error: {0}")]
    ModuleError(String),

    /// Failure raised by a native module
    #[error("{0}")]
    AbiError(String),
}
