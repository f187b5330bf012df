use core::any::TypeId;
use core::fmt;
use core::hash::{Hash, Hasher};

/// A handle describing a Rust type.
///
/// Generic parameters are described separately through the nested
/// [`PropertySettings`](super::PropertySettings) of a property.
///
/// # Examples
///
/// ```
/// use vc_setting::property::TypeDesc;
///
/// let desc = TypeDesc::of::<Vec<u8>>();
/// assert!(desc.is::<Vec<u8>>());
/// assert!(!desc.is::<Vec<i8>>());
/// ```
#[derive(Clone, Copy)]
pub struct TypeDesc {
    id: TypeId,
    name: &'static str,
}

impl TypeDesc {
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: core::any::type_name::<T>(),
        }
    }

    #[inline]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the full type name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Check if the described type is `T`.
    #[inline]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for TypeDesc {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeDesc {}

impl Hash for TypeDesc {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
