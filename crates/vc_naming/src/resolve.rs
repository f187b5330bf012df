//! Resolution of serialized names back to properties.
//!
//! ## Menu
//!
//! - [`PropertyResolutionStrategy`]: resolves one name against the pending properties.
//! - [`NamingResolution`]: resolves through a [`PropertyNamingStrategy`].
//! - [`PropertyNameStrategy`]: a naming and a resolution strategy used together.
//! - [`resolve_batch`]: resolves all names of an input, retrying deferred ones.
//! - [`serialization_name`] and [`is_deserialization_name`]: names of one property,
//!   honouring [`SerializedNameSetting`].

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use foldhash::fast::FixedState;
use vc_setting::property::Property;
use vc_setting::settings::SerializedNameSetting;

use crate::{NamingStrategy, PropertyNamingStrategy, ResolveError};

// -----------------------------------------------------------------------------
// Names of a property

/// Pending properties keyed by their raw name.
pub type PropertyMap<'p> = hashbrown::HashMap<String, &'p dyn Property, FixedState>;

/// Returns the name `property` is written under.
///
/// A [`SerializedNameSetting`] takes precedence over the naming strategy.
///
/// # Examples
///
/// ```
/// use vc_naming::NamingStrategy;
/// use vc_naming::resolve::serialization_name;
/// use vc_setting::property::{PropertyDescriptor, PropertySettings, TypeDesc};
/// use vc_setting::settings::SerializedNameSetting;
///
/// let mut prop = PropertyDescriptor::new("userId", TypeDesc::of::<()>(), PropertySettings::of::<u64>());
/// assert_eq!(serialization_name(&NamingStrategy::LowerCaseWithUnderscores, &prop), "user_id");
///
/// prop.settings_mut().insert_setting(SerializedNameSetting::new("uid", ["id"]));
/// assert_eq!(serialization_name(&NamingStrategy::LowerCaseWithUnderscores, &prop), "uid");
/// ```
pub fn serialization_name<N>(naming: &N, property: &dyn Property) -> String
where
    N: PropertyNamingStrategy + ?Sized,
{
    match property.get_setting::<SerializedNameSetting>() {
        Some(setting) => setting.name().to_string(),
        None => naming.translate_name(property),
    }
}

/// Returns `true` if `name` is accepted for `property` on deserialization.
///
/// That is the serialization name, or one of the alternates of a
/// [`SerializedNameSetting`].
pub fn is_deserialization_name<N>(naming: &N, property: &dyn Property, name: &str) -> bool
where
    N: PropertyNamingStrategy + ?Sized,
{
    match property.get_setting::<SerializedNameSetting>() {
        Some(setting) => setting.accepts(name),
        None => naming.translate_name(property) == name,
    }
}

// -----------------------------------------------------------------------------
// PropertyResolutionStrategy

/// Resolves a serialized name to one of the pending properties.
pub trait PropertyResolutionStrategy: Send + Sync {
    /// Returns the property named `name`, taken from `properties`.
    ///
    /// `properties` only holds properties that are not resolved yet. Returning
    /// `None` defers the name until the other names of the input are resolved.
    /// Returning a property that is not in `properties` is an error, see
    /// [`ResolveError::ForeignProperty`].
    fn resolve_property<'p>(
        &self,
        name: &str,
        properties: &PropertyMap<'p>,
    ) -> Option<&'p dyn Property>;
}

// -----------------------------------------------------------------------------
// NamingResolution

/// Resolves names by matching them against the names a naming strategy gives.
///
/// A name is resolved when exactly one pending property accepts it (see
/// [`is_deserialization_name`]). Ambiguous names are deferred, resolving the
/// other names may remove the competing properties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NamingResolution<N> {
    naming: N,
}

impl<N: PropertyNamingStrategy> NamingResolution<N> {
    #[inline]
    pub const fn new(naming: N) -> Self {
        Self { naming }
    }

    /// Returns the naming strategy names are matched with.
    #[inline]
    pub const fn naming(&self) -> &N {
        &self.naming
    }
}

/// The unique property accepting `name`, if any.
fn unique_match<'p, N>(naming: &N, name: &str, properties: &PropertyMap<'p>) -> Option<&'p dyn Property>
where
    N: PropertyNamingStrategy + ?Sized,
{
    let mut matches = properties
        .values()
        .copied()
        .filter(|property| is_deserialization_name(naming, *property, name));
    let found = matches.next()?;
    match matches.next() {
        Some(_) => None,
        None => Some(found),
    }
}

impl<N: PropertyNamingStrategy> PropertyResolutionStrategy for NamingResolution<N> {
    #[inline]
    fn resolve_property<'p>(
        &self,
        name: &str,
        properties: &PropertyMap<'p>,
    ) -> Option<&'p dyn Property> {
        unique_match(&self.naming, name, properties)
    }
}

impl PropertyResolutionStrategy for NamingStrategy {
    #[inline]
    fn resolve_property<'p>(
        &self,
        name: &str,
        properties: &PropertyMap<'p>,
    ) -> Option<&'p dyn Property> {
        unique_match(self, name, properties)
    }
}

// -----------------------------------------------------------------------------
// PropertyNameStrategy

/// A naming strategy and the resolution strategy that reverses it.
pub trait PropertyNameStrategy: Send + Sync {
    fn naming_strategy(&self) -> &dyn PropertyNamingStrategy;

    fn resolution_strategy(&self) -> &dyn PropertyResolutionStrategy;
}

impl PropertyNameStrategy for NamingStrategy {
    #[inline]
    fn naming_strategy(&self) -> &dyn PropertyNamingStrategy {
        self
    }

    #[inline]
    fn resolution_strategy(&self) -> &dyn PropertyResolutionStrategy {
        self
    }
}

impl<N: PropertyNamingStrategy> PropertyNameStrategy for NamingResolution<N> {
    #[inline]
    fn naming_strategy(&self) -> &dyn PropertyNamingStrategy {
        &self.naming
    }

    #[inline]
    fn resolution_strategy(&self) -> &dyn PropertyResolutionStrategy {
        self
    }
}

// -----------------------------------------------------------------------------
// Batch resolution

/// The outcome of [`resolve_batch`].
pub struct Resolution<'p> {
    /// Resolved names with their property, in resolution order.
    pub resolved: Vec<(String, &'p dyn Property)>,
    /// Names that stayed deferred, in input order.
    pub unresolved: Vec<String>,
    /// Properties no name resolved to.
    pub remaining: PropertyMap<'p>,
}

impl Resolution<'_> {
    /// Returns `true` if every name was resolved.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

impl fmt::Debug for Resolution<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let resolved: Vec<_> = self
            .resolved
            .iter()
            .map(|(name, property)| (name.as_str(), property.raw_name()))
            .collect();
        let remaining: Vec<_> = self.remaining.keys().collect();

        f.debug_struct("Resolution")
            .field("resolved", &resolved)
            .field("unresolved", &self.unresolved)
            .field("remaining", &remaining)
            .finish()
    }
}

/// Resolves every name of `names` against `properties`.
///
/// Names are tried in order. A resolved property is removed from the map
/// before the next name is tried. Deferred names are retried, in order, after
/// the rest of the pass. Passes repeat until no name is pending or a whole
/// pass resolves nothing; names left then are reported in
/// [`Resolution::unresolved`].
///
/// # Errors
///
/// Returns [`ResolveError::ForeignProperty`] if the strategy returns a
/// property that is not pending.
///
/// # Examples
///
/// ```
/// use vc_naming::{NamingStrategy, PropertyMap, resolve_batch};
/// use vc_setting::property::{Property, PropertyDescriptor, PropertySettings, TypeDesc};
///
/// let id = PropertyDescriptor::new("userId", TypeDesc::of::<()>(), PropertySettings::of::<u64>());
/// let name = PropertyDescriptor::new("userName", TypeDesc::of::<()>(), PropertySettings::of::<String>());
///
/// let properties: PropertyMap<'_> = [&id as &dyn Property, &name]
///     .into_iter()
///     .map(|p| (p.raw_name().to_string(), p))
///     .collect();
///
/// let resolution = resolve_batch(
///     &NamingStrategy::LowerCaseWithHyphen,
///     ["user-name", "user-id", "unknown"],
///     properties,
/// )
/// .unwrap();
///
/// assert_eq!(resolution.resolved.len(), 2);
/// assert_eq!(resolution.resolved[0].1.raw_name(), "userName");
/// assert_eq!(resolution.unresolved, ["unknown"]);
/// assert!(resolution.remaining.is_empty());
/// ```
pub fn resolve_batch<'p, S, I>(
    strategy: &S,
    names: I,
    properties: PropertyMap<'p>,
) -> Result<Resolution<'p>, ResolveError>
where
    S: PropertyResolutionStrategy + ?Sized,
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut remaining = properties;
    let mut pending: Vec<String> = names.into_iter().map(Into::into).collect();
    let mut resolved = Vec::with_capacity(pending.len());

    while !pending.is_empty() {
        let before = pending.len();
        let mut deferred = Vec::new();

        for name in pending {
            let Some(property) = strategy.resolve_property(&name, &remaining) else {
                log::trace!("deferring resolution of `{name}`");
                deferred.push(name);
                continue;
            };

            let key = remaining
                .iter()
                .find(|(_, candidate)| {
                    core::ptr::addr_eq(core::ptr::from_ref(**candidate), core::ptr::from_ref(property))
                })
                .map(|(key, _)| key.clone());

            match key {
                Some(key) => {
                    remaining.remove(&key);
                    resolved.push((name, property));
                }
                None => {
                    return Err(ResolveError::ForeignProperty {
                        name,
                        property: property.raw_name().to_string(),
                    });
                }
            }
        }

        pending = deferred;
        if pending.len() == before {
            log::warn!(
                "{} serialized names left unresolved: {pending:?}",
                pending.len()
            );
            break;
        }
    }

    Ok(Resolution {
        resolved,
        unresolved: pending,
        remaining,
    })
}

// -----------------------------------------------------------------------------
// Tests
