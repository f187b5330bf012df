use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::{CompareResult, SimpleNumericComparator, VersionComparator, VersionError};

// -----------------------------------------------------------------------------
// DelegatingComparator

/// A comparator that tries a primary strategy and then ordered fallbacks.
///
/// A fallback is only consulted when the previous attempt failed with a
/// [recoverable](VersionError::is_recoverable) error. The first successful
/// comparison wins; if every strategy fails, the primary's error is returned.
///
/// [`Default`] uses [`SimpleNumericComparator`] as primary with no fallbacks,
/// new version schemes are added with [`with_fallback`](Self::with_fallback).
///
/// # Examples
///
/// ```
/// use vc_version::{CompareResult, DelegatingComparator, VersionComparator, VersionError};
///
/// // Non-numeric versions are ordered by length.
/// let cmp = DelegatingComparator::default().with_fallback(
///     |base: &str, other: &str| -> Result<CompareResult, VersionError> {
///         Ok(base.len().cmp(&other.len()).into())
///     },
/// );
///
/// assert_eq!(cmp.compare("1.2", "1.10").unwrap(), CompareResult::Before);
/// assert_eq!(cmp.compare("beta", "alpha2").unwrap(), CompareResult::Before);
/// ```
pub struct DelegatingComparator {
    primary: Box<dyn VersionComparator>,
    fallbacks: Vec<Box<dyn VersionComparator>>,
}

impl DelegatingComparator {
    /// Creates a comparator with the given primary strategy and no fallbacks.
    #[inline]
    pub fn new(primary: impl VersionComparator + 'static) -> Self {
        Self {
            primary: Box::new(primary),
            fallbacks: Vec::new(),
        }
    }

    /// Appends a fallback strategy, consulted after the existing ones.
    #[inline]
    pub fn with_fallback(mut self, fallback: impl VersionComparator + 'static) -> Self {
        self.fallbacks.push(Box::new(fallback));
        self
    }

    /// Returns the number of fallback strategies.
    #[inline]
    pub fn fallback_count(&self) -> usize {
        self.fallbacks.len()
    }
}

impl Default for DelegatingComparator {
    #[inline]
    fn default() -> Self {
        Self::new(SimpleNumericComparator)
    }
}

impl VersionComparator for DelegatingComparator {
    fn compare(&self, base: &str, other: &str) -> Result<CompareResult, VersionError> {
        let primary_err = match self.primary.compare(base, other) {
            Ok(result) => return Ok(result),
            Err(err) if err.is_recoverable() => err,
            Err(err) => return Err(err),
        };

        for (index, fallback) in self.fallbacks.iter().enumerate() {
            log::trace!("version comparison `{base}` / `{other}` falls back to #{index}: {primary_err}");
            match fallback.compare(base, other) {
                Ok(result) => return Ok(result),
                Err(err) if err.is_recoverable() => continue,
                Err(err) => return Err(err),
            }
        }

        Err(primary_err)
    }
}

impl fmt::Debug for DelegatingComparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelegatingComparator")
            .field("fallbacks", &self.fallbacks.len())
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};
    use alloc::sync::Arc;
    use core::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn unsupported(base: &str, _: &str) -> Result<CompareResult, VersionError> {
        Err(VersionError::Unsupported {
            version: base.to_string(),
        })
    }

    #[test]
    fn default_is_numeric() {
        let cmp = DelegatingComparator::default();
        assert_eq!(cmp.fallback_count(), 0);
        assert_eq!(cmp.compare("1.10.4", "1.2.0").unwrap(), CompareResult::After);
        assert_eq!(cmp.compare("1.0", "1.0.0").unwrap(), CompareResult::Equals);
    }

    #[test]
    fn primary_error_without_fallbacks() {
        let err = DelegatingComparator::default()
            .compare("1.a", "1.0")
            .unwrap_err();
        assert!(matches!(err, VersionError::Malformed { .. }));
    }

    #[test]
    fn fallbacks_are_tried_in_order() {
        let calls = Arc::new(AtomicUsize::new(0));
        let second_calls = calls.clone();

        let cmp = DelegatingComparator::default()
            .with_fallback(unsupported)
            .with_fallback(
                move |_: &str, _: &str| -> Result<CompareResult, VersionError> {
                    second_calls.fetch_add(1, Ordering::SeqCst);
                    Ok(CompareResult::Equals)
                },
            )
            .with_fallback(|_: &str, _: &str| -> Result<CompareResult, VersionError> {
                unreachable!("earlier fallback already answered")
            });

        assert_eq!(cmp.compare("r1", "r2").unwrap(), CompareResult::Equals);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // The primary answers, no fallback is consulted.
        assert_eq!(cmp.compare("2", "1").unwrap(), CompareResult::After);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn all_failing_returns_primary_error() {
        let cmp = DelegatingComparator::default().with_fallback(unsupported);
        let err = cmp.compare("x", "1").unwrap_err();
        assert_eq!(
            err,
            VersionError::Malformed {
                version: String::from("x"),
                component: String::from("x"),
            }
        );
    }

    #[test]
    fn custom_primary() {
        let cmp = DelegatingComparator::new(unsupported).with_fallback(SimpleNumericComparator);
        assert!(cmp.is_before("1.2", "1.10").unwrap());
    }
}
