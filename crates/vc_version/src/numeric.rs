use alloc::string::ToString;
use core::str::Split;

use crate::{CompareResult, VersionComparator, VersionError};

// -----------------------------------------------------------------------------
// SimpleNumericComparator

/// The shared [`SimpleNumericComparator`] instance.
pub const SIMPLE_NUMERIC: SimpleNumericComparator = SimpleNumericComparator;

/// Compares dotted numeric versions such as `"1.10.4"`.
///
/// - Components are compared as integers, so `1.10` is after `1.2`.
/// - Missing trailing components count as `0`, so `1.0` equals `1.0.0`.
/// - Every component must be a non-empty run of ASCII digits fitting `u64`,
///   anything else is [`VersionError::Malformed`].
///
/// # Examples
///
/// ```
/// use vc_version::{CompareResult, SimpleNumericComparator, VersionComparator};
///
/// let cmp = SimpleNumericComparator;
/// assert_eq!(cmp.compare("1.10.4", "1.2.0").unwrap(), CompareResult::After);
/// assert_eq!(cmp.compare("1.0", "1.0.0").unwrap(), CompareResult::Equals);
/// assert!(cmp.compare("1.x", "1.0").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimpleNumericComparator;

impl SimpleNumericComparator {
    /// The component delimiter.
    pub const DELIMITER: char = '.';

    fn parse_component(version: &str, component: &str) -> Result<u64, VersionError> {
        let malformed = || VersionError::Malformed {
            version: version.to_string(),
            component: component.to_string(),
        };

        if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        component.parse::<u64>().map_err(|_| malformed())
    }

    // `None` once the components are exhausted.
    fn next_component(
        version: &str,
        iter: &mut Split<'_, char>,
    ) -> Result<Option<u64>, VersionError> {
        match iter.next() {
            Some(component) => Self::parse_component(version, component).map(Some),
            None => Ok(None),
        }
    }
}

impl VersionComparator for SimpleNumericComparator {
    fn compare(&self, base: &str, other: &str) -> Result<CompareResult, VersionError> {
        let mut lhs = base.split(Self::DELIMITER);
        let mut rhs = other.split(Self::DELIMITER);

        // Every component is parsed, even after the order is decided.
        let mut result = CompareResult::Equals;
        loop {
            let a = Self::next_component(base, &mut lhs)?;
            let b = Self::next_component(other, &mut rhs)?;
            if a.is_none() && b.is_none() {
                return Ok(result);
            }
            if result == CompareResult::Equals {
                result = a.unwrap_or(0).cmp(&b.unwrap_or(0)).into();
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_not_lexicographic() {
        assert_eq!(
            SIMPLE_NUMERIC.compare("1.10.4", "1.2.0").unwrap(),
            CompareResult::After
        );
        assert_eq!(
            SIMPLE_NUMERIC.compare("1.2.0", "1.10.4").unwrap(),
            CompareResult::Before
        );
        assert_eq!(
            SIMPLE_NUMERIC.compare("10", "9").unwrap(),
            CompareResult::After
        );
    }

    #[test]
    fn zero_padding() {
        assert_eq!(
            SIMPLE_NUMERIC.compare("1.0", "1.0.0").unwrap(),
            CompareResult::Equals
        );
        assert_eq!(
            SIMPLE_NUMERIC.compare("1.0.0.0", "1").unwrap(),
            CompareResult::Equals
        );
        assert_eq!(
            SIMPLE_NUMERIC.compare("1.0.1", "1.0").unwrap(),
            CompareResult::After
        );
        assert_eq!(
            SIMPLE_NUMERIC.compare("1", "1.0.1").unwrap(),
            CompareResult::Before
        );
    }

    #[test]
    fn first_difference_decides() {
        assert_eq!(
            SIMPLE_NUMERIC.compare("2.0.0", "1.99.99").unwrap(),
            CompareResult::After
        );
        assert_eq!(
            SIMPLE_NUMERIC.compare("1.5", "1.5.0.1").unwrap(),
            CompareResult::Before
        );
    }

    #[test]
    fn leading_zeros() {
        assert!(SIMPLE_NUMERIC.is_equals("1.01", "1.1").unwrap());
    }

    #[test]
    fn malformed() {
        let err = SIMPLE_NUMERIC.compare("1.x.0", "1.0").unwrap_err();
        assert_eq!(
            err,
            VersionError::Malformed {
                version: "1.x.0".to_string(),
                component: "x".to_string(),
            }
        );

        assert!(SIMPLE_NUMERIC.compare("", "1").is_err());
        assert!(SIMPLE_NUMERIC.compare("1..2", "1").is_err());
        assert!(SIMPLE_NUMERIC.compare("1.0", "+1.0").is_err());
        assert!(SIMPLE_NUMERIC.compare("1.-1", "1").is_err());
        assert!(SIMPLE_NUMERIC.compare("99999999999999999999999", "1").is_err());
        assert!(SIMPLE_NUMERIC.compare("1.0", "1.0-SNAPSHOT").is_err());
    }

    #[test]
    fn malformed_after_decision() {
        // The first component already differs, the tail is still validated.
        assert!(SIMPLE_NUMERIC.compare("2.bad", "1.0").is_err());
        assert!(SIMPLE_NUMERIC.compare("2", "1.0.bad").is_err());
    }
}
