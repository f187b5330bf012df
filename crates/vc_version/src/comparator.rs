use core::cmp::Ordering;
use core::fmt;

use crate::VersionError;

// -----------------------------------------------------------------------------
// CompareResult

/// Position of a base version relative to another version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareResult {
    /// The base version is older.
    Before,
    /// Both versions denote the same release.
    Equals,
    /// The base version is newer.
    After,
}

impl CompareResult {
    /// Returns the result seen from the other version.
    #[inline]
    pub const fn reverse(self) -> Self {
        match self {
            Self::Before => Self::After,
            Self::Equals => Self::Equals,
            Self::After => Self::Before,
        }
    }
}

impl From<Ordering> for CompareResult {
    #[inline]
    fn from(value: Ordering) -> Self {
        match value {
            Ordering::Less => Self::Before,
            Ordering::Equal => Self::Equals,
            Ordering::Greater => Self::After,
        }
    }
}

impl From<CompareResult> for Ordering {
    #[inline]
    fn from(value: CompareResult) -> Self {
        match value {
            CompareResult::Before => Ordering::Less,
            CompareResult::Equals => Ordering::Equal,
            CompareResult::After => Ordering::Greater,
        }
    }
}

impl fmt::Display for CompareResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Before => "before",
            Self::Equals => "equals",
            Self::After => "after",
        })
    }
}

// -----------------------------------------------------------------------------
// VersionComparator

/// A strategy that orders two version strings.
///
/// `compare(base, other)` tells where `base` stands relative to `other`,
/// the same direction as [`Ord::cmp`].
///
/// The three `is_*` helpers are derived from [`compare`](Self::compare)
/// and should not be overridden with different semantics.
///
/// # Examples
///
/// ```
/// use vc_version::{CompareResult, SIMPLE_NUMERIC, VersionComparator};
///
/// assert_eq!(SIMPLE_NUMERIC.compare("2.0", "1.9").unwrap(), CompareResult::After);
/// assert!(SIMPLE_NUMERIC.is_before("1.9", "2.0").unwrap());
/// ```
pub trait VersionComparator: Send + Sync {
    /// Compares `base` with `other`.
    fn compare(&self, base: &str, other: &str) -> Result<CompareResult, VersionError>;

    /// Returns `true` if `base` is newer than `other`.
    #[inline]
    fn is_after(&self, base: &str, other: &str) -> Result<bool, VersionError> {
        Ok(self.compare(base, other)? == CompareResult::After)
    }

    /// Returns `true` if `base` is older than `other`.
    #[inline]
    fn is_before(&self, base: &str, other: &str) -> Result<bool, VersionError> {
        Ok(self.compare(base, other)? == CompareResult::Before)
    }

    /// Returns `true` if `base` and `other` denote the same release.
    #[inline]
    fn is_equals(&self, base: &str, other: &str) -> Result<bool, VersionError> {
        Ok(self.compare(base, other)? == CompareResult::Equals)
    }
}

impl<F> VersionComparator for F
where
    F: Fn(&str, &str) -> Result<CompareResult, VersionError> + Send + Sync,
{
    #[inline]
    fn compare(&self, base: &str, other: &str) -> Result<CompareResult, VersionError> {
        self(base, other)
    }
}

// -----------------------------------------------------------------------------
// Tests
