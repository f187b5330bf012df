use core::fmt;

use thiserror::Error;

use crate::SettingKind;

// -----------------------------------------------------------------------------
// Error

/// The chain access that was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainOperation {
    Read,
    Register,
}

impl fmt::Display for ChainOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Read => "read",
            Self::Register => "registration",
        })
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingError {
    /// A reader tried to use the chain that is currently invoking it on the
    /// same thread.
    #[error("reentrant {operation} on the `{kind}` setting reader chain")]
    Reentrant {
        kind: SettingKind,
        operation: ChainOperation,
    },
}
