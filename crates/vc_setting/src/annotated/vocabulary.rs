//! The conventional annotation vocabulary.
//!
//! - [`Expose`]: whether a property takes part in serialization and deserialization.
//! - [`Since`]: the first version a property is present in.
//! - [`Until`]: the version a property was removed in.
//! - [`SerializedName`]: an explicit serialized name plus accepted alternates.
//!
//! Version bounds are kept as strings. Numeric bounds are converted once, by
//! [`Since::numeric`] and [`Until::numeric`].

use alloc::borrow::Cow;
use alloc::format;
use alloc::vec::Vec;

use super::Annotation;

// -----------------------------------------------------------------------------
// Expose

/// Marks a property as exposed for serialization and/or deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expose {
    serialize: bool,
    deserialize: bool,
}

impl Expose {
    #[inline]
    pub const fn new(serialize: bool, deserialize: bool) -> Self {
        Self {
            serialize,
            deserialize,
        }
    }

    #[inline]
    pub const fn serialize(&self) -> bool {
        self.serialize
    }

    #[inline]
    pub const fn deserialize(&self) -> bool {
        self.deserialize
    }
}

impl Default for Expose {
    /// Exposed both ways.
    #[inline]
    fn default() -> Self {
        Self::new(true, true)
    }
}

impl Annotation for Expose {}

// -----------------------------------------------------------------------------
// Since / Until

macro_rules! version_annotation {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            version: Cow<'static, str>,
        }

        impl $name {
            /// Creates the annotation from a version string.
            #[inline]
            pub fn new(version: impl Into<Cow<'static, str>>) -> Self {
                Self {
                    version: version.into(),
                }
            }

            /// Creates the annotation from a numeric version such as `1.1`.
            ///
            /// The number is rendered once into its canonical string form, in
            /// fixed-point notation. Whole numbers keep one fractional digit
            /// (`2.0`), tiny and huge values are never written with an
            /// exponent (`1e-7` becomes `0.0000001`). Only finite,
            /// non-negative values produce versions numeric comparators accept.
            pub fn numeric(version: f64) -> Self {
                let mut text = format!("{version}");
                if version.is_finite() && !text.contains('.') {
                    text.push_str(".0");
                }
                Self::new(text)
            }

            #[inline]
            pub fn version(&self) -> &str {
                &self.version
            }
        }

        impl Annotation for $name {}
    };
}

version_annotation! {
    /// The first version a property is present in.
    Since
}

version_annotation! {
    /// The version a property stopped being present in.
    Until
}

// -----------------------------------------------------------------------------
// SerializedName

/// An explicit serialized name, with alternates accepted on deserialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedName {
    value: Cow<'static, str>,
    alternate: Vec<Cow<'static, str>>,
}

impl SerializedName {
    #[inline]
    pub fn new(value: impl Into<Cow<'static, str>>) -> Self {
        Self {
            value: value.into(),
            alternate: Vec::new(),
        }
    }

    /// Adds an alternate name.
    #[inline]
    pub fn with_alternate(mut self, alternate: impl Into<Cow<'static, str>>) -> Self {
        self.alternate.push(alternate.into());
        self
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[inline]
    pub fn alternate(&self) -> impl ExactSizeIterator<Item = &str> {
        self.alternate.iter().map(|name| &**name)
    }
}

impl Annotation for SerializedName {}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_versions_are_canonical() {
        assert_eq!(Since::numeric(1.1).version(), "1.1");
        assert_eq!(Since::numeric(2.0).version(), "2.0");
        assert_eq!(Until::numeric(0.5).version(), "0.5");
        assert_eq!(Until::new("1.10.4").version(), "1.10.4");
    }

    #[test]
    fn numeric_versions_never_use_exponents() {
        use vc_version::{CompareResult, SIMPLE_NUMERIC, VersionComparator};

        let tiny = Since::numeric(1e-7);
        assert_eq!(tiny.version(), "0.0000001");
        assert_eq!(
            SIMPLE_NUMERIC.compare(tiny.version(), "0.0000002"),
            Ok(CompareResult::Before)
        );

        let huge = Until::numeric(1e18);
        assert_eq!(huge.version(), "1000000000000000000.0");
        assert!(SIMPLE_NUMERIC.compare(huge.version(), "1.0").is_ok());
    }

    #[test]
    fn serialized_name_alternates() {
        let name = SerializedName::new("id")
            .with_alternate("ID")
            .with_alternate("identifier");

        assert_eq!(name.value(), "id");
        assert_eq!(name.alternate().collect::<Vec<_>>(), ["ID", "identifier"]);
    }

    #[test]
    fn expose_defaults_both_ways() {
        let expose = Expose::default();
        assert!(expose.serialize() && expose.deserialize());
    }
}
