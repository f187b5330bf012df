//! Built-in setting kinds.
//!
//! | setting                   | read from                            |
//! |---------------------------|--------------------------------------|
//! | [`ExposeSetting`]         | [`Expose`](vocabulary::Expose)       |
//! | [`SinceSetting`]          | [`Since`](vocabulary::Since)         |
//! | [`UntilSetting`]          | [`Until`](vocabulary::Until)         |
//! | [`SerializedNameSetting`] | [`SerializedName`](vocabulary::SerializedName) |
//!
//! All of them are registered by [`SettingsRegistry::new`].

use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::Setting;
use crate::annotated::{AnnotatedElement, vocabulary};
use crate::registry::SettingsRegistry;

// -----------------------------------------------------------------------------
// ExposeSetting

/// Whether a property is written on serialization and read on deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExposeSetting {
    serialize: bool,
    deserialize: bool,
}

impl ExposeSetting {
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

impl Setting for ExposeSetting {}

// -----------------------------------------------------------------------------
// SinceSetting / UntilSetting

/// The first version a property is present in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinceSetting {
    version: String,
}

impl SinceSetting {
    #[inline]
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }

    #[inline]
    pub fn version(&self) -> &str {
        &self.version
    }
}

impl Setting for SinceSetting {}

/// The version a property stopped being present in (exclusive).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UntilSetting {
    version: String,
}

impl UntilSetting {
    #[inline]
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }

    #[inline]
    pub fn version(&self) -> &str {
        &self.version
    }
}

impl Setting for UntilSetting {}

// -----------------------------------------------------------------------------
// SerializedNameSetting

/// An explicit serialized name and the alternates accepted on deserialization.
///
/// # Examples
///
/// ```
/// use vc_setting::settings::SerializedNameSetting;
///
/// let setting = SerializedNameSetting::new("id", ["ID", "uid"]);
/// assert!(setting.accepts("id"));
/// assert!(setting.accepts("uid"));
/// assert!(!setting.accepts("Id"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedNameSetting {
    name: String,
    #[serde(default)]
    alternates: Vec<String>,
}

impl SerializedNameSetting {
    pub fn new<I>(name: impl Into<String>, alternates: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            name: name.into(),
            alternates: alternates.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the name written on serialization.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the alternate names accepted on deserialization.
    #[inline]
    pub fn alternates(&self) -> &[String] {
        &self.alternates
    }

    /// Returns `true` if `name` is the serialized name or one of the alternates.
    pub fn accepts(&self, name: &str) -> bool {
        self.name == name || self.alternates.iter().any(|alt| alt == name)
    }
}

impl Setting for SerializedNameSetting {}

// -----------------------------------------------------------------------------
// Default readers

/// Registers the readers for the conventional vocabulary.
///
/// This is the only registration path for the built-in kinds, version bounds
/// are always stored as the annotation's version string.
pub(crate) fn register_defaults(registry: &SettingsRegistry) {
    registry.register_fresh::<ExposeSetting>(|element: &dyn AnnotatedElement| {
        element
            .get_annotation::<vocabulary::Expose>()
            .map(|expose| ExposeSetting::new(expose.serialize(), expose.deserialize()))
    });
    registry.register_fresh::<UntilSetting>(|element: &dyn AnnotatedElement| {
        element
            .get_annotation::<vocabulary::Until>()
            .map(|until| UntilSetting::new(until.version()))
    });
    registry.register_fresh::<SinceSetting>(|element: &dyn AnnotatedElement| {
        element
            .get_annotation::<vocabulary::Since>()
            .map(|since| SinceSetting::new(since.version()))
    });
    registry.register_fresh::<SerializedNameSetting>(|element: &dyn AnnotatedElement| {
        element
            .get_annotation::<vocabulary::SerializedName>()
            .map(|name| SerializedNameSetting::new(name.value(), name.alternate()))
    });
}

// -----------------------------------------------------------------------------
// Tests
