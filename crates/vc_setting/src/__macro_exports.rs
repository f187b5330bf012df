//! Items used by the exported macros. Not public API.

#[cfg(feature = "auto_register")]
pub mod auto_register {
    pub use inventory;

    use crate::registry::SettingsRegistry;
    use crate::{SettingError, SettingKind};

    /// A reader registration collected at link time.
    pub struct AutoRegisterReader {
        kind: Option<fn() -> SettingKind>,
        register: fn(&SettingsRegistry) -> Result<(), SettingError>,
    }

    impl AutoRegisterReader {
        #[inline]
        pub const fn new(
            kind: fn() -> SettingKind,
            register: fn(&SettingsRegistry) -> Result<(), SettingError>,
        ) -> Self {
            Self {
                kind: Some(kind),
                register,
            }
        }
    }

    inventory::collect!(AutoRegisterReader);

    fn mark_available(_: &SettingsRegistry) -> Result<(), SettingError> {
        Ok(())
    }

    // Always submitted, seeing it proves collection works on this platform.
    inventory::submit! {
        AutoRegisterReader {
            kind: None,
            register: mark_available,
        }
    }

    /// Runs every collected registration, returns `true` if any was found.
    ///
    /// Either all collected readers are registered or, on error, none is.
    pub(crate) fn register_readers(registry: &SettingsRegistry) -> Result<bool, SettingError> {
        for entry in inventory::iter::<AutoRegisterReader> {
            if let Some(kind) = entry.kind {
                registry.check_registration(kind())?;
            }
        }

        let mut available = false;
        for entry in inventory::iter::<AutoRegisterReader> {
            (entry.register)(registry)?;
            available = true;
        }
        Ok(available)
    }
}

/// Declares a reader that [`SettingsRegistry::auto_register`] registers.
///
/// Accepts `SettingType => reader`, where the reader is a non-capturing
/// closure or a function taking `&dyn AnnotatedElement`.
///
/// Without the `auto_register` feature the declaration is discarded.
///
/// [`SettingsRegistry::auto_register`]: crate::registry::SettingsRegistry::auto_register
#[cfg(feature = "auto_register")]
#[macro_export]
macro_rules! auto_register_reader {
    ($setting:ty => $reader:expr $(,)?) => {
        const _: () = {
            fn register(
                registry: &$crate::registry::SettingsRegistry,
            ) -> ::core::result::Result<(), $crate::SettingError> {
                registry.register::<$setting>($reader)
            }

            $crate::__macro_exports::auto_register::inventory::submit! {
                $crate::__macro_exports::auto_register::AutoRegisterReader::new(
                    $crate::SettingKind::of::<$setting>,
                    register,
                )
            }
        };
    };
}

/// Declares a reader that [`SettingsRegistry::auto_register`] registers.
///
/// Without the `auto_register` feature the declaration is discarded.
///
/// [`SettingsRegistry::auto_register`]: crate::registry::SettingsRegistry::auto_register
#[cfg(not(feature = "auto_register"))]
#[macro_export]
macro_rules! auto_register_reader {
    ($setting:ty => $reader:expr $(,)?) => {};
}

// -----------------------------------------------------------------------------
// Tests
