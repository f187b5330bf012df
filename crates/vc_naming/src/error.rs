use alloc::string::String;

use thiserror::Error;

// -----------------------------------------------------------------------------
// ResolveError

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ResolveError {
    /// A resolution strategy returned a property that was not pending.
    ///
    /// The returned property must be one of the values of the map passed to
    /// [`resolve_property`](crate::PropertyResolutionStrategy::resolve_property).
    #[error("`{name}` resolved to property `{property}`, which is not pending resolution")]
    ForeignProperty { name: String, property: String },
}

// -----------------------------------------------------------------------------
// ParseStrategyError

/// A string did not name a [`NamingStrategy`](crate::NamingStrategy) preset.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown naming strategy `{name}`")]
pub struct ParseStrategyError {
    pub(crate) name: String,
}

impl ParseStrategyError {
    /// Returns the rejected name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}
