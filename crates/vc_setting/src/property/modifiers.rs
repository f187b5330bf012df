use bitflags::bitflags;

// -----------------------------------------------------------------------------
// Modifiers

bitflags! {
    /// Declaration modifiers of a property accessor.
    ///
    /// Bit values follow the conventional class-file layout so masks coming
    /// from reflection data can be used unchanged.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u16 {
        const PUBLIC    = 0x0001;
        const PRIVATE   = 0x0002;
        const PROTECTED = 0x0004;
        const STATIC    = 0x0008;
        const FINAL     = 0x0010;
        const VOLATILE  = 0x0040;
        const TRANSIENT = 0x0080;
        const NATIVE    = 0x0100;
        const SYNTHETIC = 0x1000;

        /// All visibility bits.
        const VISIBILITY = Self::PUBLIC.bits() | Self::PRIVATE.bits() | Self::PROTECTED.bits();
    }
}

// -----------------------------------------------------------------------------
// Visibility

/// Visibility of a property accessor.
///
/// # Examples
///
/// ```
/// use vc_setting::property::{Modifiers, Visibility};
///
/// let flags = Modifiers::PROTECTED | Modifiers::STATIC;
/// assert_eq!(Visibility::of(flags), Visibility::Protected);
/// assert!(Visibility::Default.is(Modifiers::FINAL));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Private,
    Protected,
    Public,
    /// None of the visibility bits is set.
    Default,
}

impl Visibility {
    /// Returns `true` if `modifiers` has this visibility.
    pub const fn is(self, modifiers: Modifiers) -> bool {
        match self {
            Self::Private => modifiers.contains(Modifiers::PRIVATE),
            Self::Protected => modifiers.contains(Modifiers::PROTECTED),
            Self::Public => modifiers.contains(Modifiers::PUBLIC),
            Self::Default => !modifiers.intersects(Modifiers::VISIBILITY),
        }
    }

    /// Classifies `modifiers`.
    ///
    /// Malformed masks with several visibility bits resolve in the order
    /// private, protected, public.
    pub const fn of(modifiers: Modifiers) -> Self {
        if Self::Private.is(modifiers) {
            Self::Private
        } else if Self::Protected.is(modifiers) {
            Self::Protected
        } else if Self::Public.is(modifiers) {
            Self::Public
        } else {
            Self::Default
        }
    }
}

// -----------------------------------------------------------------------------
// Accessor

/// The accessor of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accessor {
    Getter,
    Setter,
}

// -----------------------------------------------------------------------------
// Tests
