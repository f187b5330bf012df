//! Kind-keyed registries of setting reader chains.
//!
//! ## Menu
//!
//! - [`SettingsRegistry`]: one [`MultiSettingReader`] per [`SettingKind`].
//! - [`SettingsRegistryDelegate`]: a stable handle forwarding to a swappable registry.
//! - [`ReadSettings`]: the object-safe read side shared by both.
//!
//! ## auto_register
//!
//! See [`SettingsRegistry::auto_register`].
//!
//! Readers declared with [`auto_register_reader!`](crate::auto_register_reader)
//! are collected with the [`inventory`] crate, which not all platforms support.
//! On unsupported platforms nothing is collected and no error is raised.
//!
//! [`MultiSettingReader`]: crate::reader::MultiSettingReader
//! [`SettingKind`]: crate::SettingKind
//! [`inventory`]: https://docs.rs/inventory

// -----------------------------------------------------------------------------
// Modules

mod delegate;
mod settings_registry;

// -----------------------------------------------------------------------------
// Exports

pub use delegate::SettingsRegistryDelegate;
pub use settings_registry::SettingsRegistry;

// -----------------------------------------------------------------------------
// ReadSettings

use alloc::boxed::Box;

use crate::annotated::AnnotatedElement;
use crate::{Setting, SettingError, SettingKind, SettingMap};

/// Reads settings from annotated declarations.
pub trait ReadSettings: Send + Sync {
    /// Reads one setting of every registered kind that applies to `element`.
    fn read_settings(&self, element: &dyn AnnotatedElement) -> Result<SettingMap, SettingError>;

    /// Reads the setting of `kind`, if that kind is registered and applies.
    fn read_setting_by_kind(
        &self,
        element: &dyn AnnotatedElement,
        kind: SettingKind,
    ) -> Result<Option<Box<dyn Setting>>, SettingError>;
}
