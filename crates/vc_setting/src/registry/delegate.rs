use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use std::sync::{PoisonError, RwLock};

use crate::annotated::AnnotatedElement;
use crate::reader::{MultiSettingReader, SettingReader};
use crate::registry::{ReadSettings, SettingsRegistry};
use crate::{Setting, SettingError, SettingKind, SettingMap};

// -----------------------------------------------------------------------------
// SettingsRegistryDelegate

/// A stable handle that forwards every operation to a replaceable registry.
///
/// Components keep a reference to the delegate while the registry behind it
/// can be swapped with [`set_delegate`](Self::set_delegate). Each call uses
/// the registry current at the time it starts; a call already running keeps
/// using the registry it started with.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use vc_setting::annotated::{AnnotatedElement, Annotations};
/// use vc_setting::registry::{SettingsRegistry, SettingsRegistryDelegate};
/// use vc_setting::settings::SinceSetting;
///
/// let delegate = SettingsRegistryDelegate::default();
/// let field = Annotations::new();
/// assert!(delegate.read_setting::<SinceSetting>(&field).unwrap().is_none());
///
/// let replacement = Arc::new(SettingsRegistry::empty());
/// replacement
///     .register::<SinceSetting>(|_: &dyn AnnotatedElement| Some(SinceSetting::new("0")))
///     .unwrap();
///
/// let previous = delegate.set_delegate(replacement);
/// assert_eq!(previous.len(), 4);
/// assert_eq!(delegate.read_setting::<SinceSetting>(&field).unwrap().unwrap().version(), "0");
/// ```
pub struct SettingsRegistryDelegate {
    delegate: RwLock<Arc<SettingsRegistry>>,
}

impl SettingsRegistryDelegate {
    /// Creates a delegate forwarding to `delegate`.
    #[inline]
    pub const fn new(delegate: Arc<SettingsRegistry>) -> Self {
        Self {
            delegate: RwLock::new(delegate),
        }
    }

    /// Returns the registry currently delegated to.
    pub fn delegate(&self) -> Arc<SettingsRegistry> {
        self.delegate
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the registry delegated to, returning the previous one.
    pub fn set_delegate(&self, delegate: Arc<SettingsRegistry>) -> Arc<SettingsRegistry> {
        let mut current = self
            .delegate
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        log::debug!(
            "swapping settings registry delegate ({} kinds -> {} kinds)",
            current.len(),
            delegate.len(),
        );
        core::mem::replace(&mut *current, delegate)
    }

    /// See [`SettingsRegistry::register`].
    #[inline]
    pub fn register<T: Setting>(
        &self,
        reader: impl SettingReader<T> + 'static,
    ) -> Result<(), SettingError> {
        self.delegate().register(reader)
    }

    /// See [`SettingsRegistry::get_reader`].
    #[inline]
    pub fn get_reader<T: Setting>(&self) -> Option<Arc<MultiSettingReader<T>>> {
        self.delegate().get_reader::<T>()
    }

    /// See [`SettingsRegistry::read_setting`].
    #[inline]
    pub fn read_setting<T: Setting>(
        &self,
        element: &dyn AnnotatedElement,
    ) -> Result<Option<T>, SettingError> {
        self.delegate().read_setting::<T>(element)
    }

    /// See [`SettingsRegistry::read_settings`].
    #[inline]
    pub fn read_settings(&self, element: &dyn AnnotatedElement) -> Result<SettingMap, SettingError> {
        self.delegate().read_settings(element)
    }

    /// See [`SettingsRegistry::kinds`].
    #[inline]
    pub fn kinds(&self) -> Vec<SettingKind> {
        self.delegate().kinds()
    }

    /// See [`SettingsRegistry::contains`].
    #[inline]
    pub fn contains<T: Setting>(&self) -> bool {
        self.delegate().contains::<T>()
    }

    /// See [`SettingsRegistry::auto_register`].
    #[inline]
    pub fn auto_register(&self) -> Result<bool, SettingError> {
        self.delegate().auto_register()
    }
}

impl Default for SettingsRegistryDelegate {
    /// Delegates to a [`SettingsRegistry::new`].
    fn default() -> Self {
        Self::new(Arc::new(SettingsRegistry::new()))
    }
}

impl ReadSettings for SettingsRegistryDelegate {
    #[inline]
    fn read_settings(&self, element: &dyn AnnotatedElement) -> Result<SettingMap, SettingError> {
        Self::read_settings(self, element)
    }

    #[inline]
    fn read_setting_by_kind(
        &self,
        element: &dyn AnnotatedElement,
        kind: SettingKind,
    ) -> Result<Option<Box<dyn Setting>>, SettingError> {
        self.delegate().read_setting_by_kind(element, kind)
    }
}

impl fmt::Debug for SettingsRegistryDelegate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SettingsRegistryDelegate")
            .field(&self.delegate())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotated::Annotations;
    use crate::annotated::vocabulary::Since;
    use crate::property::{PropertySettings, TypeDesc};
    use crate::settings::SinceSetting;

    #[test]
    fn forwards_to_current_registry() {
        let first = Arc::new(SettingsRegistry::empty());
        let delegate = SettingsRegistryDelegate::new(first.clone());

        delegate
            .register::<SinceSetting>(|_: &dyn AnnotatedElement| Some(SinceSetting::new("1")))
            .unwrap();
        assert!(first.contains::<SinceSetting>());
        assert!(delegate.contains::<SinceSetting>());

        let second = Arc::new(SettingsRegistry::empty());
        let previous = delegate.set_delegate(second.clone());
        assert!(Arc::ptr_eq(&previous, &first));
        assert!(Arc::ptr_eq(&delegate.delegate(), &second));

        assert!(!delegate.contains::<SinceSetting>());
        assert!(delegate.kinds().is_empty());
        assert!(delegate.get_reader::<SinceSetting>().is_none());
        assert!(delegate.read_settings(&Annotations::new()).unwrap().is_empty());
    }

    #[test]
    fn usable_as_read_settings() {
        let delegate = SettingsRegistryDelegate::default();
        let field = Annotations::new().with(Since::new("4.2"));

        let settings = PropertySettings::from_annotated(
            &delegate,
            &field,
            TypeDesc::of::<u8>(),
            TypeDesc::of::<u8>(),
            [],
        )
        .unwrap();
        assert_eq!(settings.get_setting::<SinceSetting>().unwrap().version(), "4.2");

        let source: &dyn ReadSettings = &delegate;
        let since = source
            .read_setting_by_kind(&field, SettingKind::of::<SinceSetting>())
            .unwrap()
            .unwrap();
        assert!(since.is::<SinceSetting>());
    }

    #[test]
    fn swap_from_inside_a_reader() {
        let delegate = Arc::new(SettingsRegistryDelegate::new(Arc::new(
            SettingsRegistry::empty(),
        )));

        let weak = Arc::downgrade(&delegate);
        delegate
            .register::<SinceSetting>(move |_: &dyn AnnotatedElement| {
                let delegate = weak.upgrade()?;
                delegate.set_delegate(Arc::new(SettingsRegistry::new()));
                Some(SinceSetting::new("old"))
            })
            .unwrap();

        let field = Annotations::new().with(Since::new("new"));
        let first = delegate.read_setting::<SinceSetting>(&field).unwrap();
        assert_eq!(first.unwrap().version(), "old");

        let second = delegate.read_setting::<SinceSetting>(&field).unwrap();
        assert_eq!(second.unwrap().version(), "new");
    }
}
