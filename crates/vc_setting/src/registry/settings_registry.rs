use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;
#[cfg(feature = "auto_register")]
use std::sync::Mutex;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use hashbrown::hash_map::Entry;

use crate::annotated::AnnotatedElement;
use crate::hash::{self, HashMap};
use crate::reader::{ErasedChain, MultiSettingReader, SettingReader};
use crate::registry::ReadSettings;
use crate::{Setting, SettingError, SettingKind, SettingMap};

type ChainTable = HashMap<SettingKind, Arc<dyn ErasedChain>>;

#[inline]
fn downcast_chain<T: Setting>(chain: Arc<dyn ErasedChain>) -> Option<Arc<MultiSettingReader<T>>> {
    let any: Arc<dyn Any + Send + Sync> = chain;
    any.downcast::<MultiSettingReader<T>>().ok()
}

// -----------------------------------------------------------------------------
// SettingsRegistry

/// A registry holding one reader chain per setting kind.
///
/// Chains are created on first registration of their kind and never removed.
/// All methods take `&self`, the registry can be shared between threads.
///
/// The table lock is only held to look chains up, and no lock at all is held
/// while readers run. A reader may register readers of other kinds, or read
/// them, on the same registry, from any number of threads.
///
/// # Examples
///
/// ```
/// use vc_setting::annotated::{AnnotatedElement, Annotations, vocabulary::Expose};
/// use vc_setting::registry::SettingsRegistry;
/// use vc_setting::settings::ExposeSetting;
///
/// let registry = SettingsRegistry::empty();
/// assert!(registry.is_empty());
///
/// registry
///     .register::<ExposeSetting>(|element: &dyn AnnotatedElement| {
///         element
///             .get_annotation::<Expose>()
///             .map(|e| ExposeSetting::new(e.serialize(), e.deserialize()))
///     })
///     .unwrap();
///
/// let field = Annotations::new().with(Expose::new(true, false));
/// let settings = registry.read_settings(&field).unwrap();
/// assert!(!settings.get::<ExposeSetting>().unwrap().deserialize());
/// ```
pub struct SettingsRegistry {
    chains: RwLock<ChainTable>,
    // `Some(available)` once auto registration succeeded.
    #[cfg(feature = "auto_register")]
    auto_registered: Mutex<Option<bool>>,
}

impl SettingsRegistry {
    /// Creates a registry without any chain.
    pub const fn empty() -> Self {
        Self {
            chains: RwLock::new(hash::new_map()),
            #[cfg(feature = "auto_register")]
            auto_registered: Mutex::new(None),
        }
    }

    /// Creates a registry with the readers of the built-in setting kinds.
    ///
    /// See [`settings`](crate::settings) for the list.
    pub fn new() -> Self {
        let registry = Self::empty();
        crate::settings::register_defaults(&registry);
        registry
    }

    #[inline]
    fn read_table(&self) -> RwLockReadGuard<'_, ChainTable> {
        self.chains.read().unwrap_or_else(PoisonError::into_inner)
    }

    #[inline]
    fn write_table(&self) -> RwLockWriteGuard<'_, ChainTable> {
        self.chains.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the chain of `T`, creating it if absent.
    fn chain<T: Setting>(&self) -> Arc<MultiSettingReader<T>> {
        if let Some(chain) = self.get_reader::<T>() {
            return chain;
        }

        let kind = SettingKind::of::<T>();
        let mut chains = self.write_table();
        // Another thread may have created it in between.
        let erased = match chains.entry(kind) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => {
                log::debug!("creating the `{kind}` setting reader chain");
                let chain: Arc<dyn ErasedChain> = Arc::new(MultiSettingReader::<T>::empty());
                entry.insert(chain).clone()
            }
        };
        match downcast_chain::<T>(erased) {
            Some(chain) => chain,
            None => unreachable!("chains are keyed by their setting kind"),
        }
    }

    /// Fails if registering into the chain of `kind` would be reentrant.
    #[cfg(feature = "auto_register")]
    pub(crate) fn check_registration(&self, kind: SettingKind) -> Result<(), SettingError> {
        let chain = self.read_table().get(&kind).cloned();
        match chain {
            Some(chain) if chain.is_active() => {
                let error = SettingError::Reentrant {
                    kind,
                    operation: crate::ChainOperation::Register,
                };
                log::error!("{error}");
                Err(error)
            }
            _ => Ok(()),
        }
    }

    // Used by `new` only, where no reader of this registry can run yet.
    pub(crate) fn register_fresh<T: Setting>(&self, reader: impl SettingReader<T> + 'static) {
        self.chain::<T>().push(Box::new(reader));
    }

    /// Appends a reader to the chain of `T`, creating the chain if absent.
    ///
    /// Registration order is the order readers are tried in. Registering the
    /// same reader twice makes it run twice.
    ///
    /// # Errors
    ///
    /// Returns [`SettingError::Reentrant`] if called from a reader of the
    /// chain of `T`.
    pub fn register<T: Setting>(
        &self,
        reader: impl SettingReader<T> + 'static,
    ) -> Result<(), SettingError> {
        self.chain::<T>().add_reader(reader)
    }

    /// Returns the chain of `T`, if any reader of that kind was registered.
    pub fn get_reader<T: Setting>(&self) -> Option<Arc<MultiSettingReader<T>>> {
        let chain = self.read_table().get(&SettingKind::of::<T>())?.clone();
        downcast_chain::<T>(chain)
    }

    /// Reads the setting of type `T` from `element`.
    ///
    /// Returns `Ok(None)` if no chain of `T` exists or no reader applies.
    pub fn read_setting<T: Setting>(
        &self,
        element: &dyn AnnotatedElement,
    ) -> Result<Option<T>, SettingError> {
        match self.get_reader::<T>() {
            Some(chain) => chain.read(element),
            None => Ok(None),
        }
    }

    /// Reads the setting of `kind` from `element`.
    pub fn read_setting_by_kind(
        &self,
        element: &dyn AnnotatedElement,
        kind: SettingKind,
    ) -> Result<Option<Box<dyn Setting>>, SettingError> {
        let chain = self.read_table().get(&kind).cloned();
        match chain {
            Some(chain) => chain.read_erased(element),
            None => Ok(None),
        }
    }

    /// Reads one setting of every registered kind that applies to `element`.
    ///
    /// The chains are collected first and read without the table lock. A
    /// chain created by another thread during the call may be missed.
    pub fn read_settings(&self, element: &dyn AnnotatedElement) -> Result<SettingMap, SettingError> {
        let chains: Vec<_> = self.read_table().values().cloned().collect();

        let mut settings = SettingMap::with_capacity(chains.len());
        for chain in chains {
            if let Some(setting) = chain.read_erased(element)? {
                settings.insert_boxed(chain.kind(), setting);
            }
        }
        Ok(settings)
    }

    /// Returns the kinds that have a chain.
    pub fn kinds(&self) -> Vec<SettingKind> {
        self.read_table().keys().copied().collect()
    }

    /// Returns `true` if a chain of `T` exists.
    #[inline]
    pub fn contains<T: Setting>(&self) -> bool {
        self.contains_kind(SettingKind::of::<T>())
    }

    #[inline]
    pub fn contains_kind(&self, kind: SettingKind) -> bool {
        self.read_table().contains_key(&kind)
    }

    /// Returns the number of chains.
    #[inline]
    pub fn len(&self) -> usize {
        self.read_table().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.read_table().is_empty()
    }

    /// Registers all readers declared with
    /// [`auto_register_reader!`](crate::auto_register_reader).
    ///
    /// Repeated calls do not register readers twice. A call made while another
    /// thread is registering waits until that registration is complete.
    ///
    /// ## Return Value
    ///
    /// Returns `Ok(true)` if automatic registration is supported on the current
    /// platform. Without the `auto_register` feature this always returns
    /// `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingError::Reentrant`] if called from a reader of a chain
    /// that has auto-registered readers. No reader is registered and nothing
    /// is marked as done in that case, a later call registers all of them.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use vc_setting::annotated::AnnotatedElement;
    /// use vc_setting::registry::SettingsRegistry;
    /// use vc_setting::settings::SinceSetting;
    ///
    /// vc_setting::auto_register_reader!(SinceSetting => |_: &dyn AnnotatedElement| {
    ///     Some(SinceSetting::new("0.1"))
    /// });
    ///
    /// fn main() {
    ///     let registry = SettingsRegistry::empty();
    ///     assert!(registry.auto_register().unwrap());
    ///     assert!(registry.contains::<SinceSetting>());
    /// }
    /// ```
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&self) -> Result<bool, SettingError> {
        #[cfg(feature = "auto_register")]
        {
            use crate::__macro_exports::auto_register;

            // Held during registration, which never runs readers.
            let mut done = self
                .auto_registered
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if let Some(available) = *done {
                return Ok(available);
            }
            let available = auto_register::register_readers(self)?;
            *done = Some(available);
            Ok(available)
        }
        #[cfg(not(feature = "auto_register"))]
        {
            Ok(false)
        }
    }
}

impl Default for SettingsRegistry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl ReadSettings for SettingsRegistry {
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
        Self::read_setting_by_kind(self, element, kind)
    }
}

impl fmt::Debug for SettingsRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.read_table().keys()).finish()
    }
}

// -----------------------------------------------------------------------------
// Tests
