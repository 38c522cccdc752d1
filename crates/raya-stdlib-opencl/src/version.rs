//! API revision gating
//!
//! Catalog, schema and error rows each name the revision that introduced
//! them. `COMPILED` is fixed by cargo features; rows newer than it are
//! filtered out when the lookup tables are built.

use std::fmt;

/// OpenCL API revision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ApiVersion {
    /// OpenCL 1.0
    V1_0,
    /// OpenCL 1.1
    V1_1,
    /// OpenCL 1.2
    V1_2,
}

/// Revision this build targets
pub const COMPILED: ApiVersion = if cfg!(feature = "cl-1-2") {
    ApiVersion::V1_2
} else if cfg!(feature = "cl-1-1") {
    ApiVersion::V1_1
} else {
    ApiVersion::V1_0
};

impl ApiVersion {
    /// Whether a row introduced in `self` is compiled into this build
    #[inline]
    pub fn is_available(self) -> bool {
        self <= COMPILED
    }

    /// Dotted version string
    pub const fn as_str(self) -> &'static str {
        match self {
            ApiVersion::V1_0 => "1.0",
            ApiVersion::V1_1 => "1.1",
            ApiVersion::V1_2 => "1.2",
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(ApiVersion::V1_0 < ApiVersion::V1_1);
        assert!(ApiVersion::V1_1 < ApiVersion::V1_2);
        assert!(ApiVersion::V1_0.is_available());
    }

    #[test]
    fn test_compiled_matches_features() {
        if cfg!(feature = "cl-1-2") {
            assert_eq!(COMPILED, ApiVersion::V1_2);
        }
        assert_eq!(COMPILED.to_string(), COMPILED.as_str());
    }
}
