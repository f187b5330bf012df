//! The property model consumed by naming and resolution.
//!
//! ## Menu
//!
//! - [`Property`]: one serializable member of a declaring type.
//! - [`PropertyDescriptor`]: a plain immutable [`Property`] implementation.
//! - [`PropertySettings`]: structural metadata of a property and its generic parameters.
//! - [`Modifiers`], [`Visibility`], [`Accessor`]: accessor flags.
//! - [`TypeDesc`]: a lightweight type handle.
//!
//! Discovering properties of a type and reading or writing their values is
//! left to the serializer.

// -----------------------------------------------------------------------------
// Modules

mod descriptor;
mod modifiers;
mod settings;
mod type_desc;

// -----------------------------------------------------------------------------
// Exports

pub use descriptor::PropertyDescriptor;
pub use modifiers::{Accessor, Modifiers, Visibility};
pub use settings::PropertySettings;
pub use type_desc::TypeDesc;

// -----------------------------------------------------------------------------
// Property

use crate::Setting;

/// One serializable member of a declaring type.
///
/// The raw name is the name as declared, unaffected by any naming policy.
/// Accessor flags are fixed once the property is constructed.
pub trait Property {
    /// Returns the raw name of the property.
    fn raw_name(&self) -> &str;

    /// Returns the type that declares this property.
    fn declaring_type(&self) -> TypeDesc;

    /// Returns the modifiers of the given accessor.
    fn modifiers(&self, accessor: Accessor) -> Modifiers;

    /// Returns `true` if the property is read-only.
    ///
    /// A read-only property may still be deserialized through a constructor.
    fn is_final(&self) -> bool;

    /// Returns the settings of this property.
    fn settings(&self) -> &PropertySettings;

    #[inline]
    fn is_static(&self, accessor: Accessor) -> bool {
        self.modifiers(accessor).contains(Modifiers::STATIC)
    }

    #[inline]
    fn is_transient(&self, accessor: Accessor) -> bool {
        self.modifiers(accessor).contains(Modifiers::TRANSIENT)
    }

    #[inline]
    fn is_synthetic(&self, accessor: Accessor) -> bool {
        self.modifiers(accessor).contains(Modifiers::SYNTHETIC)
    }

    #[inline]
    fn is_volatile(&self, accessor: Accessor) -> bool {
        self.modifiers(accessor).contains(Modifiers::VOLATILE)
    }

    #[inline]
    fn is_native(&self, accessor: Accessor) -> bool {
        self.modifiers(accessor).contains(Modifiers::NATIVE)
    }

    /// Returns the visibility of the given accessor.
    #[inline]
    fn visibility(&self, accessor: Accessor) -> Visibility {
        Visibility::of(self.modifiers(accessor))
    }

    /// Returns the real type of this property.
    #[inline]
    fn real_type(&self) -> TypeDesc {
        self.settings().real_type()
    }
}

impl dyn Property + '_ {
    /// Returns the setting of type `S`, if present.
    #[inline]
    pub fn get_setting<S: Setting>(&self) -> Option<&S> {
        self.settings().get_setting::<S>()
    }
}
