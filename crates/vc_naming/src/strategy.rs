use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use vc_setting::property::Property;

use crate::{CaseStyle, ParseStrategyError, transform};

// -----------------------------------------------------------------------------
// PropertyNamingStrategy

/// Translates a property into the name it carries in serialized form.
///
/// Closures taking `&dyn Property` implement this trait.
///
/// # Examples
///
/// ```
/// use vc_naming::{NamingStrategy, PropertyNamingStrategy};
/// use vc_setting::property::{Property, PropertyDescriptor, PropertySettings, TypeDesc};
///
/// struct User;
/// let prop = PropertyDescriptor::new("userName", TypeDesc::of::<User>(), PropertySettings::of::<String>());
///
/// assert_eq!(NamingStrategy::LowerCaseWithHyphen.translate_name(&prop), "user-name");
///
/// let prefixed = |property: &dyn Property| format!("x_{}", property.raw_name());
/// assert_eq!(prefixed.translate_name(&prop), "x_userName");
/// ```
pub trait PropertyNamingStrategy: Send + Sync {
    fn translate_name(&self, property: &dyn Property) -> String;
}

impl<F> PropertyNamingStrategy for F
where
    F: Fn(&dyn Property) -> String + Send + Sync,
{
    #[inline]
    fn translate_name(&self, property: &dyn Property) -> String {
        self(property)
    }
}

// -----------------------------------------------------------------------------
// NamingStrategy

/// The standard naming presets.
///
/// Presets are selected in configuration by their constant name, e.g.
/// `"LOWER_CASE_WITH_UNDERSCORES"`, both through serde and [`FromStr`].
///
/// | preset                          | `someFieldName`   |
/// |---------------------------------|-------------------|
/// | `Identity`                      | `someFieldName`   |
/// | `LowerCase`                     | `somefieldname`   |
/// | `UpperCase`                     | `SOMEFIELDNAME`   |
/// | `UpperCamelCase`                | `SomeFieldName`   |
/// | `CamelCase`                     | `someFieldName`   |
/// | `UpperCamelCaseWithSpaces`      | `Some Field Name` |
/// | `CamelCaseWithSpaces`           | `some Field Name` |
/// | `LowerCaseWithSpaces`           | `some field name` |
/// | `UpperCamelCaseWithUnderscores` | `Some_Field_Name` |
/// | `CamelCaseWithUnderscores`      | `some_Field_Name` |
/// | `LowerCaseWithUnderscores`      | `some_field_name` |
/// | `UpperCamelCaseWithHyphen`      | `Some-Field-Name` |
/// | `CamelCaseWithHyphen`           | `some-Field-Name` |
/// | `LowerCaseWithHyphen`           | `some-field-name` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NamingStrategy {
    /// The raw name unchanged.
    Identity,
    /// The whole raw name lower-cased, no word splitting.
    LowerCase,
    /// The whole raw name upper-cased, no word splitting.
    UpperCase,
    UpperCamelCase,
    CamelCase,
    UpperCamelCaseWithSpaces,
    CamelCaseWithSpaces,
    LowerCaseWithSpaces,
    UpperCamelCaseWithUnderscores,
    CamelCaseWithUnderscores,
    LowerCaseWithUnderscores,
    UpperCamelCaseWithHyphen,
    CamelCaseWithHyphen,
    LowerCaseWithHyphen,
}

impl NamingStrategy {
    /// All presets, in declaration order.
    pub const ALL: [Self; 14] = [
        Self::Identity,
        Self::LowerCase,
        Self::UpperCase,
        Self::UpperCamelCase,
        Self::CamelCase,
        Self::UpperCamelCaseWithSpaces,
        Self::CamelCaseWithSpaces,
        Self::LowerCaseWithSpaces,
        Self::UpperCamelCaseWithUnderscores,
        Self::CamelCaseWithUnderscores,
        Self::LowerCaseWithUnderscores,
        Self::UpperCamelCaseWithHyphen,
        Self::CamelCaseWithHyphen,
        Self::LowerCaseWithHyphen,
    ];

    /// Returns the word style, or `None` for presets that do not split words.
    pub const fn style(self) -> Option<CaseStyle> {
        const fn split(separator: Option<char>, first: bool, rest: bool) -> Option<CaseStyle> {
            Some(CaseStyle::new(separator, first, rest))
        }

        match self {
            Self::Identity | Self::LowerCase | Self::UpperCase => None,
            Self::UpperCamelCase => split(None, true, true),
            Self::CamelCase => split(None, false, true),
            Self::UpperCamelCaseWithSpaces => split(Some(' '), true, true),
            Self::CamelCaseWithSpaces => split(Some(' '), false, true),
            Self::LowerCaseWithSpaces => split(Some(' '), false, false),
            Self::UpperCamelCaseWithUnderscores => split(Some('_'), true, true),
            Self::CamelCaseWithUnderscores => split(Some('_'), false, true),
            Self::LowerCaseWithUnderscores => split(Some('_'), false, false),
            Self::UpperCamelCaseWithHyphen => split(Some('-'), true, true),
            Self::CamelCaseWithHyphen => split(Some('-'), false, true),
            Self::LowerCaseWithHyphen => split(Some('-'), false, false),
        }
    }

    /// Returns the constant name used in configuration.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Identity => "IDENTITY",
            Self::LowerCase => "LOWER_CASE",
            Self::UpperCase => "UPPER_CASE",
            Self::UpperCamelCase => "UPPER_CAMEL_CASE",
            Self::CamelCase => "CAMEL_CASE",
            Self::UpperCamelCaseWithSpaces => "UPPER_CAMEL_CASE_WITH_SPACES",
            Self::CamelCaseWithSpaces => "CAMEL_CASE_WITH_SPACES",
            Self::LowerCaseWithSpaces => "LOWER_CASE_WITH_SPACES",
            Self::UpperCamelCaseWithUnderscores => "UPPER_CAMEL_CASE_WITH_UNDERSCORES",
            Self::CamelCaseWithUnderscores => "CAMEL_CASE_WITH_UNDERSCORES",
            Self::LowerCaseWithUnderscores => "LOWER_CASE_WITH_UNDERSCORES",
            Self::UpperCamelCaseWithHyphen => "UPPER_CAMEL_CASE_WITH_HYPHEN",
            Self::CamelCaseWithHyphen => "CAMEL_CASE_WITH_HYPHEN",
            Self::LowerCaseWithHyphen => "LOWER_CASE_WITH_HYPHEN",
        }
    }

    /// Translates a raw name.
    pub fn apply(self, raw: &str) -> String {
        match self {
            Self::Identity => raw.to_string(),
            Self::LowerCase => raw.to_lowercase(),
            Self::UpperCase => raw.to_uppercase(),
            _ => match self.style() {
                Some(style) => transform(raw, style),
                None => raw.to_string(),
            },
        }
    }
}

impl PropertyNamingStrategy for NamingStrategy {
    #[inline]
    fn translate_name(&self, property: &dyn Property) -> String {
        self.apply(property.raw_name())
    }
}

impl fmt::Display for NamingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NamingStrategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name() == s)
            .ok_or_else(|| ParseStrategyError { name: s.to_string() })
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    const SAMPLES: [&str; 8] = [
        "someFieldName",
        "_private",
        "__dunder__",
        "trailing_",
        "parseHTTPResponse",
        "X_Y_Z",
        "snake_case_name",
        "",
    ];

    fn padding(name: &str) -> (usize, usize) {
        let leading = name.bytes().take_while(|b| *b == b'_').count();
        let trailing = name[leading..].bytes().rev().take_while(|b| *b == b'_').count();
        (leading, trailing)
    }

    #[test]
    fn documented_outcomes() {
        let expected = [
            "someFieldName",
            "somefieldname",
            "SOMEFIELDNAME",
            "SomeFieldName",
            "someFieldName",
            "Some Field Name",
            "some Field Name",
            "some field name",
            "Some_Field_Name",
            "some_Field_Name",
            "some_field_name",
            "Some-Field-Name",
            "some-Field-Name",
            "some-field-name",
        ];
        for (preset, expected) in NamingStrategy::ALL.into_iter().zip(expected) {
            assert_eq!(preset.apply("someFieldName"), expected, "{preset}");
        }
    }

    #[test]
    fn identity_is_identity() {
        for raw in SAMPLES.into_iter().chain(["A-b c", "ßtraße", "x.y"]) {
            assert_eq!(NamingStrategy::Identity.apply(raw), raw);
        }
    }

    #[test]
    fn underscore_padding_preserved() {
        for preset in NamingStrategy::ALL {
            for raw in SAMPLES {
                assert_eq!(
                    padding(&preset.apply(raw)),
                    padding(raw),
                    "{preset} on {raw:?}"
                );
            }
        }
    }

    #[test]
    fn literal_outcomes() {
        assert_eq!(NamingStrategy::UpperCamelCase.apply("some_Field_Name"), "SomeFieldName");
        assert_eq!(NamingStrategy::CamelCaseWithHyphen.apply("SomeFieldName"), "some-Field-Name");
        assert_eq!(NamingStrategy::LowerCaseWithUnderscores.apply("ABCWord"), "abc_word");
        assert_eq!(NamingStrategy::UpperCase.apply("some_name"), "SOME_NAME");
        assert_eq!(NamingStrategy::LowerCase.apply("Some-Name"), "some-name");
    }

    #[test]
    fn style_presence() {
        for preset in NamingStrategy::ALL {
            let splits = !matches!(
                preset,
                NamingStrategy::Identity | NamingStrategy::LowerCase | NamingStrategy::UpperCase
            );
            assert_eq!(preset.style().is_some(), splits, "{preset}");
        }
    }

    #[test]
    fn config_names() {
        for preset in NamingStrategy::ALL {
            let json = serde_json::to_string(&preset).unwrap();
            assert_eq!(json, format!("\"{}\"", preset.name()));
            assert_eq!(serde_json::from_str::<NamingStrategy>(&json).unwrap(), preset);
            assert_eq!(preset.name().parse::<NamingStrategy>(), Ok(preset));
        }

        let error = "camelCase".parse::<NamingStrategy>().unwrap_err();
        assert_eq!(error.name(), "camelCase");
        assert!(serde_json::from_str::<NamingStrategy>("\"camelCase\"").is_err());
    }

    #[test]
    fn closures_are_strategies() {
        use vc_setting::property::{PropertyDescriptor, PropertySettings, TypeDesc};

        let prop = PropertyDescriptor::new("raw", TypeDesc::of::<()>(), PropertySettings::of::<u8>());
        let strategy: &dyn PropertyNamingStrategy =
            &|property: &dyn Property| property.raw_name().to_uppercase();
        assert_eq!(strategy.translate_name(&prop), "RAW");
    }
}
