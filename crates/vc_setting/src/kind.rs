use core::any::TypeId;
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::Setting;

// -----------------------------------------------------------------------------
// SettingKind

/// The identity of a [`Setting`] type, used as registry key.
///
/// Equality and hashing only consider the [`TypeId`], the type name is kept
/// for diagnostics.
///
/// # Examples
///
/// ```
/// use vc_setting::SettingKind;
/// use vc_setting::settings::{SinceSetting, UntilSetting};
///
/// let kind = SettingKind::of::<SinceSetting>();
/// assert!(kind.is::<SinceSetting>());
/// assert_ne!(kind, SettingKind::of::<UntilSetting>());
/// assert_eq!(kind.short_name(), "SinceSetting");
/// ```
#[derive(Clone, Copy)]
pub struct SettingKind {
    id: TypeId,
    name: &'static str,
}

impl SettingKind {
    /// Returns the kind of setting type `T`.
    #[inline]
    pub fn of<T: Setting>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: core::any::type_name::<T>(),
        }
    }

    /// Returns the `TypeId` of the setting type.
    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.id
    }

    /// Returns the full type name of the setting type.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the type name without its module path.
    pub fn short_name(&self) -> &'static str {
        // Generic arguments may contain `::`, only look before them.
        let end = self.name.find('<').unwrap_or(self.name.len());
        match self.name[..end].rfind("::") {
            Some(index) => &self.name[index + 2..],
            None => self.name,
        }
    }

    /// Check if this is the kind of `T`.
    #[inline]
    pub fn is<T: Setting>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for SettingKind {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for SettingKind {}

impl Hash for SettingKind {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for SettingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for SettingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}
