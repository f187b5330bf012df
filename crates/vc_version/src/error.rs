use alloc::string::String;

use thiserror::Error;

// -----------------------------------------------------------------------------
// Error

/// Errors produced while comparing two versions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum VersionError {
    /// A component of the version could not be parsed by the comparator.
    #[error("malformed version `{version}`: invalid component `{component}`")]
    Malformed { version: String, component: String },

    /// The comparator does not understand this version scheme at all.
    #[error("unsupported version format `{version}`")]
    Unsupported { version: String },
}

impl VersionError {
    /// Returns `true` if another comparator may still understand the input.
    ///
    /// [`DelegatingComparator`](crate::DelegatingComparator) only falls back
    /// on recoverable errors.
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Malformed { .. } | Self::Unsupported { .. })
    }
}
