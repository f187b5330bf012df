use alloc::string::String;

use super::{Accessor, Modifiers, Property, PropertySettings, TypeDesc};

// -----------------------------------------------------------------------------
// PropertyDescriptor

/// A plain [`Property`] built from already known metadata.
///
/// Serializers that derive their property lists at compile time can use this
/// type directly instead of implementing [`Property`] themselves.
///
/// # Examples
///
/// ```
/// use vc_setting::property::{
///     Accessor, Modifiers, Property, PropertyDescriptor, PropertySettings, TypeDesc,
///     Visibility,
/// };
///
/// struct User;
///
/// let id = PropertyDescriptor::new("user_id", TypeDesc::of::<User>(), PropertySettings::of::<u64>())
///     .with_modifiers(Accessor::Getter, Modifiers::PUBLIC)
///     .with_modifiers(Accessor::Setter, Modifiers::PRIVATE | Modifiers::FINAL);
///
/// assert_eq!(id.raw_name(), "user_id");
/// assert!(id.is_final());
/// assert_eq!(id.visibility(Accessor::Getter), Visibility::Public);
/// assert!(id.real_type().is::<u64>());
/// ```
#[derive(Debug)]
pub struct PropertyDescriptor {
    raw_name: String,
    declaring_type: TypeDesc,
    getter: Modifiers,
    setter: Modifiers,
    settings: PropertySettings,
}

impl PropertyDescriptor {
    /// Creates a descriptor with no modifiers on either accessor.
    pub fn new(
        raw_name: impl Into<String>,
        declaring_type: TypeDesc,
        settings: PropertySettings,
    ) -> Self {
        Self {
            raw_name: raw_name.into(),
            declaring_type,
            getter: Modifiers::empty(),
            setter: Modifiers::empty(),
            settings,
        }
    }

    /// Sets the modifiers of one accessor.
    #[must_use]
    pub fn with_modifiers(mut self, accessor: Accessor, modifiers: Modifiers) -> Self {
        match accessor {
            Accessor::Getter => self.getter = modifiers,
            Accessor::Setter => self.setter = modifiers,
        }
        self
    }

    /// Returns the settings for adding late settings.
    ///
    /// Settings can only be added, see [`PropertySettings::insert_setting`].
    #[inline]
    pub fn settings_mut(&mut self) -> &mut PropertySettings {
        &mut self.settings
    }
}

impl Property for PropertyDescriptor {
    #[inline]
    fn raw_name(&self) -> &str {
        &self.raw_name
    }

    #[inline]
    fn declaring_type(&self) -> TypeDesc {
        self.declaring_type
    }

    #[inline]
    fn modifiers(&self, accessor: Accessor) -> Modifiers {
        match accessor {
            Accessor::Getter => self.getter,
            Accessor::Setter => self.setter,
        }
    }

    /// A property is read-only when its setter is final.
    #[inline]
    fn is_final(&self) -> bool {
        self.setter.contains(Modifiers::FINAL)
    }

    #[inline]
    fn settings(&self) -> &PropertySettings {
        &self.settings
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::Visibility;
    use crate::settings::SerializedNameSetting;

    struct Owner;

    fn descriptor() -> PropertyDescriptor {
        PropertyDescriptor::new("count", TypeDesc::of::<Owner>(), PropertySettings::of::<u32>())
    }

    #[test]
    fn accessor_modifiers_are_separate() {
        let prop = descriptor()
            .with_modifiers(Accessor::Getter, Modifiers::PUBLIC | Modifiers::STATIC)
            .with_modifiers(Accessor::Setter, Modifiers::TRANSIENT);

        assert!(prop.is_static(Accessor::Getter));
        assert!(!prop.is_static(Accessor::Setter));
        assert!(prop.is_transient(Accessor::Setter));
        assert!(!prop.is_synthetic(Accessor::Getter));
        assert_eq!(prop.visibility(Accessor::Getter), Visibility::Public);
        assert_eq!(prop.visibility(Accessor::Setter), Visibility::Default);
        assert!(!prop.is_final());
    }

    #[test]
    fn declaring_and_real_type() {
        let prop = descriptor();
        assert!(prop.declaring_type().is::<Owner>());
        assert!(prop.real_type().is::<u32>());
    }

    #[test]
    fn settings_through_dyn_property() {
        let mut prop = descriptor();
        prop.settings_mut()
            .insert_setting(SerializedNameSetting::new("n", ["num"]));

        let prop: &dyn Property = &prop;
        assert_eq!(prop.get_setting::<SerializedNameSetting>().unwrap().name(), "n");
    }
}
