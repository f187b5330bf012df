use alloc::boxed::Box;
use alloc::vec::Vec;

use vc_version::{CompareResult, VersionComparator, VersionError};

use crate::annotated::AnnotatedElement;
use crate::property::TypeDesc;
use crate::registry::ReadSettings;
use crate::settings::{ExposeSetting, SinceSetting, UntilSetting};
use crate::{Setting, SettingError, SettingMap};

// -----------------------------------------------------------------------------
// PropertySettings

/// Structural metadata for one property.
///
/// - `real_type`: the declared type of the property.
/// - `serializer_type`: the type used to pick a serializer, may differ.
/// - parameters: nested settings for generic parameters, fixed at construction.
///   For `HashMap<String, Vec<u8>>` index `0` describes the key and index `1`
///   the value.
/// - settings: at most one [`Setting`] per kind. Entries may be added later
///   but are never removed.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use vc_setting::property::{PropertySettings, TypeDesc};
///
/// let settings = PropertySettings::new(
///     TypeDesc::of::<HashMap<String, Vec<u8>>>(),
///     TypeDesc::of::<HashMap<String, Vec<u8>>>(),
///     [
///         PropertySettings::of::<String>(),
///         PropertySettings::new(
///             TypeDesc::of::<Vec<u8>>(),
///             TypeDesc::of::<Vec<u8>>(),
///             [PropertySettings::of::<u8>()],
///         ),
///     ],
/// );
///
/// assert_eq!(settings.parameter_count(), 2);
/// assert!(settings.generic_parameter_type(0).unwrap().is::<String>());
///
/// let value = settings.parameter(1).unwrap();
/// assert!(value.generic_parameter_type(0).unwrap().is::<u8>());
/// assert!(settings.parameter(2).is_none());
/// ```
#[derive(Debug)]
pub struct PropertySettings {
    real_type: TypeDesc,
    serializer_type: TypeDesc,
    parameters: Box<[PropertySettings]>,
    settings: SettingMap,
}

impl PropertySettings {
    /// Creates settings without any [`Setting`] attached.
    pub fn new(
        real_type: TypeDesc,
        serializer_type: TypeDesc,
        parameters: impl IntoIterator<Item = PropertySettings>,
    ) -> Self {
        Self {
            real_type,
            serializer_type,
            parameters: parameters.into_iter().collect::<Vec<_>>().into_boxed_slice(),
            settings: SettingMap::new(),
        }
    }

    /// Creates settings for a non-generic type `T`.
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::new(TypeDesc::of::<T>(), TypeDesc::of::<T>(), [])
    }

    /// Creates settings and reads every registered setting kind from `element`.
    pub fn from_annotated(
        source: &dyn ReadSettings,
        element: &dyn AnnotatedElement,
        real_type: TypeDesc,
        serializer_type: TypeDesc,
        parameters: impl IntoIterator<Item = PropertySettings>,
    ) -> Result<Self, SettingError> {
        let mut this = Self::new(real_type, serializer_type, parameters);
        this.settings = source.read_settings(element)?;
        Ok(this)
    }

    /// Returns the declared type.
    #[inline]
    pub const fn real_type(&self) -> TypeDesc {
        self.real_type
    }

    /// Returns the type used to select a serializer.
    #[inline]
    pub const fn serializer_type(&self) -> TypeDesc {
        self.serializer_type
    }

    #[inline]
    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    #[inline]
    pub fn parameters(&self) -> &[PropertySettings] {
        &self.parameters
    }

    /// Returns the settings of the generic parameter at `index`.
    #[inline]
    pub fn parameter(&self, index: usize) -> Option<&PropertySettings> {
        self.parameters.get(index)
    }

    /// Returns the serializer type of the generic parameter at `index`.
    #[inline]
    pub fn generic_parameter_type(&self, index: usize) -> Option<TypeDesc> {
        self.parameter(index).map(Self::serializer_type)
    }

    #[inline]
    pub fn settings(&self) -> &SettingMap {
        &self.settings
    }

    /// Returns the setting of type `T`, if present.
    #[inline]
    pub fn get_setting<T: Setting>(&self) -> Option<&T> {
        self.settings.get::<T>()
    }

    /// Sets the setting of type `T`, replacing a previous value of that kind.
    #[inline]
    pub fn insert_setting<T: Setting>(&mut self, setting: T) {
        self.settings.insert(setting);
    }

    /// Sets the setting of type `T` unless one is already present.
    ///
    /// Returns `true` if the setting was inserted.
    #[inline]
    pub fn try_insert_setting<T: Setting>(&mut self, setting: T) -> bool {
        self.settings.try_insert(setting)
    }

    /// Returns `false` if an [`ExposeSetting`] excludes the property from serialization.
    #[inline]
    pub fn is_serialized(&self) -> bool {
        self.get_setting::<ExposeSetting>()
            .is_none_or(ExposeSetting::serialize)
    }

    /// Returns `false` if an [`ExposeSetting`] excludes the property from deserialization.
    #[inline]
    pub fn is_deserialized(&self) -> bool {
        self.get_setting::<ExposeSetting>()
            .is_none_or(ExposeSetting::deserialize)
    }

    /// Returns `true` if the property is present at `version`.
    ///
    /// A [`SinceSetting`] bound is inclusive, an [`UntilSetting`] bound is exclusive.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_setting::property::PropertySettings;
    /// use vc_setting::settings::{SinceSetting, UntilSetting};
    /// use vc_version::DelegatingComparator;
    ///
    /// let cmp = DelegatingComparator::default();
    /// let mut settings = PropertySettings::of::<u32>();
    /// settings.insert_setting(SinceSetting::new("1.2"));
    /// settings.insert_setting(UntilSetting::new("2.0"));
    ///
    /// assert!(!settings.is_active_at("1.1", &cmp).unwrap());
    /// assert!(settings.is_active_at("1.2.0", &cmp).unwrap());
    /// assert!(settings.is_active_at("1.10", &cmp).unwrap());
    /// assert!(!settings.is_active_at("2", &cmp).unwrap());
    /// ```
    pub fn is_active_at(
        &self,
        version: &str,
        comparator: &dyn VersionComparator,
    ) -> Result<bool, VersionError> {
        if let Some(since) = self.get_setting::<SinceSetting>()
            && comparator.compare(version, since.version())? == CompareResult::Before
        {
            return Ok(false);
        }
        if let Some(until) = self.get_setting::<UntilSetting>()
            && comparator.compare(version, until.version())? != CompareResult::Before
        {
            return Ok(false);
        }
        Ok(true)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotated::Annotations;
    use crate::annotated::vocabulary::{Expose, Since};
    use crate::registry::SettingsRegistry;
    use vc_version::{DelegatingComparator, SIMPLE_NUMERIC};

    #[test]
    fn from_annotated_reads_registered_kinds() {
        let registry = SettingsRegistry::new();
        let field = Annotations::new()
            .with(Expose::new(true, false))
            .with(Since::new("1.3"));

        let settings = PropertySettings::from_annotated(
            &registry,
            &field,
            TypeDesc::of::<Option<u32>>(),
            TypeDesc::of::<u32>(),
            [PropertySettings::of::<u32>()],
        )
        .unwrap();

        assert!(settings.real_type().is::<Option<u32>>());
        assert!(settings.serializer_type().is::<u32>());
        assert_eq!(settings.settings().len(), 2);
        assert!(settings.is_serialized());
        assert!(!settings.is_deserialized());
        assert_eq!(settings.get_setting::<SinceSetting>().unwrap().version(), "1.3");
    }

    #[test]
    fn settings_are_never_removed() {
        let mut settings = PropertySettings::of::<u8>();
        assert!(settings.try_insert_setting(SinceSetting::new("1")));
        assert!(!settings.try_insert_setting(SinceSetting::new("2")));
        assert_eq!(settings.get_setting::<SinceSetting>().unwrap().version(), "1");

        settings.insert_setting(SinceSetting::new("3"));
        assert_eq!(settings.get_setting::<SinceSetting>().unwrap().version(), "3");
        assert_eq!(settings.settings().len(), 1);
    }

    #[test]
    fn exposed_without_setting() {
        let settings = PropertySettings::of::<bool>();
        assert!(settings.is_serialized());
        assert!(settings.is_deserialized());
    }

    #[test]
    fn version_gate() {
        let mut settings = PropertySettings::of::<bool>();
        assert!(settings.is_active_at("0.0.1", &SIMPLE_NUMERIC).unwrap());

        settings.insert_setting(UntilSetting::new("1.5"));
        assert!(settings.is_active_at("1.4.99", &SIMPLE_NUMERIC).unwrap());
        assert!(!settings.is_active_at("1.5.0", &SIMPLE_NUMERIC).unwrap());
    }

    #[test]
    fn version_gate_propagates_errors() {
        let mut settings = PropertySettings::of::<bool>();
        settings.insert_setting(SinceSetting::new("1.0"));

        let cmp = DelegatingComparator::default();
        assert!(matches!(
            settings.is_active_at("one", &cmp),
            Err(VersionError::Malformed { .. })
        ));
    }
}
