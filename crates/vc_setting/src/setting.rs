use alloc::boxed::Box;
use core::any::Any;
use core::fmt::Debug;

use hashbrown::hash_map::Entry;

use crate::SettingKind;
use crate::hash::{self, HashMap};

// -----------------------------------------------------------------------------
// Setting

/// A single piece of per-property structural metadata.
///
/// Settings are immutable data created by a
/// [`SettingReader`](crate::reader::SettingReader) and attached to exactly
/// one [`PropertySettings`](crate::property::PropertySettings).
///
/// # Examples
///
/// ```
/// use vc_setting::Setting;
///
/// #[derive(Debug)]
/// struct Inline(bool);
///
/// impl Setting for Inline {}
///
/// let boxed: Box<dyn Setting> = Box::new(Inline(true));
/// assert!(boxed.is::<Inline>());
/// assert!(boxed.downcast_ref::<Inline>().unwrap().0);
/// ```
pub trait Setting: Any + Send + Sync + Debug {}

impl dyn Setting {
    /// Returns `true` if the setting is of type `T`.
    #[inline]
    pub fn is<T: Setting>(&self) -> bool {
        (self as &dyn Any).is::<T>()
    }

    /// Returns a reference to the setting as `T`, if it is one.
    #[inline]
    pub fn downcast_ref<T: Setting>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }

    /// Attempts to take the boxed setting as `T`.
    pub fn downcast<T: Setting>(self: Box<Self>) -> Result<Box<T>, Box<Self>> {
        if self.is::<T>() {
            let any: Box<dyn Any + Send + Sync> = self;
            match any.downcast::<T>() {
                Ok(setting) => Ok(setting),
                Err(_) => unreachable!("type checked by `is` above"),
            }
        } else {
            Err(self)
        }
    }
}

// -----------------------------------------------------------------------------
// SettingMap

/// A collection of settings keyed by their [`SettingKind`].
///
/// There can only be one setting per kind.
///
/// # Examples
///
/// ```
/// use vc_setting::SettingMap;
/// use vc_setting::settings::{ExposeSetting, SinceSetting};
///
/// let mut map = SettingMap::new();
/// map.insert(ExposeSetting::new(true, false));
///
/// assert!(map.contains::<ExposeSetting>());
/// assert!(!map.contains::<SinceSetting>());
/// assert!(!map.get::<ExposeSetting>().unwrap().deserialize());
/// ```
pub struct SettingMap {
    settings: HashMap<SettingKind, Box<dyn Setting>>,
}

impl SettingMap {
    /// Creates an empty [`SettingMap`].
    #[inline]
    pub const fn new() -> Self {
        Self {
            settings: hash::new_map(),
        }
    }

    /// Creates an empty [`SettingMap`] with specific capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            settings: hash::map_with_capacity(capacity),
        }
    }

    /// Inserts a setting, returning the one it replaced.
    pub fn insert<T: Setting>(&mut self, setting: T) -> Option<Box<dyn Setting>> {
        self.settings
            .insert(SettingKind::of::<T>(), Box::new(setting))
    }

    /// Inserts a setting only if none of its kind is present.
    ///
    /// Returns `true` if the setting was inserted.
    pub fn try_insert<T: Setting>(&mut self, setting: T) -> bool {
        match self.settings.entry(SettingKind::of::<T>()) {
            Entry::Vacant(entry) => {
                entry.insert(Box::new(setting));
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    // # Validity
    // `setting` must be of type `kind`.
    pub(crate) fn insert_boxed(&mut self, kind: SettingKind, setting: Box<dyn Setting>) {
        self.settings.insert(kind, setting);
    }

    /// Returns the setting of type `T`, if present.
    #[inline]
    pub fn get<T: Setting>(&self) -> Option<&T> {
        self.get_by_kind(SettingKind::of::<T>())
            .and_then(<dyn Setting>::downcast_ref)
    }

    /// Returns the setting of the given kind, if present.
    #[inline]
    pub fn get_by_kind(&self, kind: SettingKind) -> Option<&dyn Setting> {
        self.settings.get(&kind).map(|setting| &**setting)
    }

    /// Returns `true` if a setting of type `T` is present.
    #[inline]
    pub fn contains<T: Setting>(&self) -> bool {
        self.contains_kind(SettingKind::of::<T>())
    }

    /// Returns `true` if a setting of the given kind is present.
    #[inline]
    pub fn contains_kind(&self, kind: SettingKind) -> bool {
        self.settings.contains_key(&kind)
    }

    /// Returns an iterator over the stored settings.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (SettingKind, &dyn Setting)> {
        self.settings.iter().map(|(kind, setting)| (*kind, &**setting))
    }

    /// Returns an iterator over the stored kinds.
    #[inline]
    pub fn kinds(&self) -> impl ExactSizeIterator<Item = SettingKind> + '_ {
        self.settings.keys().copied()
    }

    /// Returns the number of stored settings.
    #[inline]
    pub fn len(&self) -> usize {
        self.settings.len()
    }

    /// Returns `true` if no settings are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }
}

impl Default for SettingMap {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for SettingMap {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.settings.values()).finish()
    }
}

impl<T: Setting> Extend<T> for SettingMap {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for setting in iter {
            self.insert(setting);
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{ExposeSetting, SinceSetting};

    #[derive(Debug, PartialEq)]
    struct Flag(u8);

    impl Setting for Flag {}

    #[test]
    fn downcast_boxed() {
        let boxed: Box<dyn Setting> = Box::new(Flag(3));
        let boxed = boxed.downcast::<ExposeSetting>().unwrap_err();
        assert_eq!(*boxed.downcast::<Flag>().unwrap(), Flag(3));
    }

    #[test]
    fn insert_replaces_try_insert_keeps() {
        let mut map = SettingMap::new();
        assert!(map.insert(Flag(1)).is_none());
        assert!(map.insert(Flag(2)).is_some());
        assert_eq!(map.get::<Flag>(), Some(&Flag(2)));

        assert!(!map.try_insert(Flag(3)));
        assert_eq!(map.get::<Flag>(), Some(&Flag(2)));

        assert!(map.try_insert(SinceSetting::new("1.0")));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn lookup_by_kind() {
        let mut map = SettingMap::with_capacity(2);
        map.insert(Flag(7));

        let kind = SettingKind::of::<Flag>();
        assert!(map.contains_kind(kind));
        assert!(map.get_by_kind(kind).unwrap().is::<Flag>());
        assert_eq!(map.kinds().collect::<alloc::vec::Vec<_>>(), [kind]);
        assert!(map.get::<ExposeSetting>().is_none());
    }
}
