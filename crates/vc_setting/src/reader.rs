//! Setting readers and first-match reader chains.
//!
//! A [`SettingReader`] turns an annotated declaration into one setting, or
//! nothing. A [`MultiSettingReader`] tries its readers in registration order
//! and stops at the first one that produces a value.

use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::Any;
use core::cell::RefCell;
use core::fmt;
use core::marker::PhantomData;
use core::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::annotated::AnnotatedElement;
use crate::{ChainOperation, Setting, SettingError, SettingKind};

// -----------------------------------------------------------------------------
// SettingReader

/// Produces a setting of type `T` from an annotated declaration.
///
/// Returning `None` lets the next reader of the chain try.
///
/// Closures taking `&dyn AnnotatedElement` implement this trait.
pub trait SettingReader<T: Setting>: Send + Sync {
    fn read(&self, element: &dyn AnnotatedElement) -> Option<T>;
}

impl<T, F> SettingReader<T> for F
where
    T: Setting,
    F: Fn(&dyn AnnotatedElement) -> Option<T> + Send + Sync,
{
    #[inline]
    fn read(&self, element: &dyn AnnotatedElement) -> Option<T> {
        self(element)
    }
}

// -----------------------------------------------------------------------------
// Active chains

std::thread_local! {
    /// Addresses of the chains currently iterating on this thread.
    static ACTIVE_CHAINS: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

/// Marks a chain as iterating until dropped.
struct ActiveChain(usize);

impl ActiveChain {
    fn enter(addr: usize) -> Option<Self> {
        ACTIVE_CHAINS.with_borrow_mut(|active| {
            if active.contains(&addr) {
                None
            } else {
                active.push(addr);
                Some(Self(addr))
            }
        })
    }

    fn is_active(addr: usize) -> bool {
        ACTIVE_CHAINS.with_borrow(|active| active.contains(&addr))
    }
}

impl Drop for ActiveChain {
    fn drop(&mut self) {
        ACTIVE_CHAINS.with_borrow_mut(|active| {
            if let Some(index) = active.iter().rposition(|addr| *addr == self.0) {
                active.swap_remove(index);
            }
        });
    }
}

// -----------------------------------------------------------------------------
// MultiSettingReader

/// An ordered chain of readers for one setting kind.
///
/// [`read`](Self::read) returns the result of the first reader that produces a
/// value; later readers are not invoked. Readers can be appended at any time,
/// a reader added while a read is running becomes visible to the next read.
///
/// A read runs on a snapshot of the readers taken when it starts, the chain
/// lock is not held while readers run. Readers may therefore read other
/// chains, also when another thread reads those chains the other way round.
///
/// A reader that reads from, or registers into, the chain that is invoking it
/// on the same thread gets a [`SettingError::Reentrant`].
///
/// # Examples
///
/// ```
/// use vc_setting::annotated::{AnnotatedElement, Annotations, vocabulary::Until};
/// use vc_setting::reader::MultiSettingReader;
/// use vc_setting::settings::UntilSetting;
///
/// let chain = MultiSettingReader::<UntilSetting>::empty();
/// chain
///     .add_reader(|element: &dyn AnnotatedElement| {
///         element.get_annotation::<Until>().map(|until| UntilSetting::new(until.version()))
///     })
///     .unwrap();
/// chain
///     .add_reader(|_: &dyn AnnotatedElement| Some(UntilSetting::new("9.9")))
///     .unwrap();
///
/// let annotated = Annotations::new().with(Until::new("2.1"));
/// assert_eq!(chain.read(&annotated).unwrap().unwrap().version(), "2.1");
/// assert_eq!(chain.read(&Annotations::new()).unwrap().unwrap().version(), "9.9");
/// ```
pub struct MultiSettingReader<T: Setting> {
    // Copy-on-write: a running read keeps its own `Arc` of the list.
    readers: Mutex<Arc<Vec<Arc<dyn SettingReader<T>>>>>,
    // Kept outside the lock so it can be queried from inside a reader.
    len: AtomicUsize,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Setting> MultiSettingReader<T> {
    /// Creates a chain from boxed readers, in order.
    pub fn new(readers: impl IntoIterator<Item = Box<dyn SettingReader<T>>>) -> Self {
        let readers: Vec<Arc<dyn SettingReader<T>>> =
            readers.into_iter().map(Arc::from).collect();
        Self {
            len: AtomicUsize::new(readers.len()),
            readers: Mutex::new(Arc::new(readers)),
            _marker: PhantomData,
        }
    }

    /// Creates a chain with a single reader.
    pub fn of(reader: impl SettingReader<T> + 'static) -> Self {
        Self::new([Box::new(reader) as Box<dyn SettingReader<T>>])
    }

    /// Creates a chain without readers.
    #[inline]
    pub fn empty() -> Self {
        Self::new([])
    }

    /// Returns the kind of setting this chain produces.
    #[inline]
    pub fn kind(&self) -> SettingKind {
        SettingKind::of::<T>()
    }

    /// Returns the number of registered readers.
    #[inline]
    pub fn len(&self) -> usize {
        self.len.load(Ordering::Acquire)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a reader to the end of the chain.
    ///
    /// Registering the same reader twice makes it run twice.
    ///
    /// # Errors
    ///
    /// Returns [`SettingError::Reentrant`] if called from a reader of this chain.
    pub fn add_reader(&self, reader: impl SettingReader<T> + 'static) -> Result<(), SettingError> {
        self.add_boxed(Box::new(reader))
    }

    /// Appends a boxed reader to the end of the chain.
    ///
    /// # Errors
    ///
    /// Returns [`SettingError::Reentrant`] if called from a reader of this chain.
    pub fn add_boxed(&self, reader: Box<dyn SettingReader<T>>) -> Result<(), SettingError> {
        if self.is_active() {
            return Err(self.reentrant(ChainOperation::Register));
        }
        self.push(reader);
        Ok(())
    }

    // Only for chains no reader can observe yet.
    pub(crate) fn push(&self, reader: Box<dyn SettingReader<T>>) {
        let mut readers = self.lock();
        Arc::make_mut(&mut *readers).push(Arc::from(reader));
        self.len.store(readers.len(), Ordering::Release);
    }

    /// Returns the first setting produced by the readers, in registration order.
    ///
    /// # Errors
    ///
    /// Returns [`SettingError::Reentrant`] if called from a reader of this chain.
    pub fn read(&self, element: &dyn AnnotatedElement) -> Result<Option<T>, SettingError> {
        let Some(_active) = ActiveChain::enter(self.addr()) else {
            return Err(self.reentrant(ChainOperation::Read));
        };
        let readers = Arc::clone(&*self.lock());
        Ok(readers.iter().find_map(|reader| reader.read(element)))
    }

    #[inline]
    fn lock(&self) -> MutexGuard<'_, Arc<Vec<Arc<dyn SettingReader<T>>>>> {
        self.readers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns `true` if a read of this chain is running on the current thread.
    #[inline]
    pub(crate) fn is_active(&self) -> bool {
        ActiveChain::is_active(self.addr())
    }

    #[inline]
    fn addr(&self) -> usize {
        core::ptr::from_ref(self).cast::<()>().addr()
    }

    #[cold]
    fn reentrant(&self, operation: ChainOperation) -> SettingError {
        let error = SettingError::Reentrant {
            kind: self.kind(),
            operation,
        };
        log::error!("{error}");
        error
    }
}

impl<T: Setting> Default for MultiSettingReader<T> {
    #[inline]
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Setting> fmt::Debug for MultiSettingReader<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiSettingReader")
            .field("kind", &self.kind())
            .field("len", &self.len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// ErasedChain

/// A reader chain with its setting type erased, as stored by the registry.
pub(crate) trait ErasedChain: Any + Send + Sync {
    fn kind(&self) -> SettingKind;

    #[cfg(feature = "auto_register")]
    fn is_active(&self) -> bool;

    fn read_erased(
        &self,
        element: &dyn AnnotatedElement,
    ) -> Result<Option<Box<dyn Setting>>, SettingError>;
}

impl<T: Setting> ErasedChain for MultiSettingReader<T> {
    #[inline]
    fn kind(&self) -> SettingKind {
        SettingKind::of::<T>()
    }

    #[cfg(feature = "auto_register")]
    #[inline]
    fn is_active(&self) -> bool {
        Self::is_active(self)
    }

    fn read_erased(
        &self,
        element: &dyn AnnotatedElement,
    ) -> Result<Option<Box<dyn Setting>>, SettingError> {
        Ok(self
            .read(element)?
            .map(|setting| Box::new(setting) as Box<dyn Setting>))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotated::Annotations;

    #[derive(Debug, PartialEq)]
    struct Tag(&'static str);

    impl Setting for Tag {}

    #[test]
    fn first_match_short_circuits() {
        let calls = Arc::new(AtomicUsize::new(0));
        let chain = MultiSettingReader::<Tag>::empty();

        let counter = calls.clone();
        chain
            .add_reader(move |_: &dyn AnnotatedElement| {
                counter.fetch_add(1, Ordering::Relaxed);
                None
            })
            .unwrap();
        chain
            .add_reader(|_: &dyn AnnotatedElement| Some(Tag("second")))
            .unwrap();
        let counter = calls.clone();
        chain
            .add_reader(move |_: &dyn AnnotatedElement| {
                counter.fetch_add(100, Ordering::Relaxed);
                Some(Tag("third"))
            })
            .unwrap();

        assert_eq!(chain.len(), 3);
        assert_eq!(chain.read(&Annotations::new()).unwrap(), Some(Tag("second")));
        assert_eq!(calls.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn empty_chain_reads_nothing() {
        let chain = MultiSettingReader::<Tag>::default();
        assert!(chain.is_empty());
        assert_eq!(chain.read(&Annotations::new()).unwrap(), None);
    }

    #[test]
    fn duplicate_reader_runs_twice() {
        fn never(_: &dyn AnnotatedElement) -> Option<Tag> {
            COUNT.fetch_add(1, Ordering::Relaxed);
            None
        }
        static COUNT: AtomicUsize = AtomicUsize::new(0);

        let chain = MultiSettingReader::<Tag>::of(never);
        chain.add_reader(never).unwrap();
        assert_eq!(chain.read(&Annotations::new()).unwrap(), None);
        assert_eq!(COUNT.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn reentrant_read_is_rejected() {
        let chain = Arc::new(MultiSettingReader::<Tag>::empty());
        let seen = Arc::new(Mutex::new(None));

        let weak = Arc::downgrade(&chain);
        let slot = seen.clone();
        chain
            .add_reader(move |element: &dyn AnnotatedElement| {
                let chain = weak.upgrade()?;
                *slot.lock().unwrap() = chain.read(element).err();
                Some(Tag("outer"))
            })
            .unwrap();

        assert_eq!(chain.read(&Annotations::new()).unwrap(), Some(Tag("outer")));
        assert_eq!(
            seen.lock().unwrap().take(),
            Some(SettingError::Reentrant {
                kind: SettingKind::of::<Tag>(),
                operation: ChainOperation::Read,
            })
        );

        // The guard is released once the outer read returns.
        assert!(chain.read(&Annotations::new()).is_ok());
    }

    #[test]
    fn reentrant_registration_is_rejected() {
        let chain = Arc::new(MultiSettingReader::<Tag>::empty());
        let seen = Arc::new(Mutex::new(None));

        let weak = Arc::downgrade(&chain);
        let slot = seen.clone();
        chain
            .add_reader(move |_: &dyn AnnotatedElement| {
                let chain = weak.upgrade()?;
                *slot.lock().unwrap() = chain
                    .add_reader(|_: &dyn AnnotatedElement| Some(Tag("late")))
                    .err();
                None
            })
            .unwrap();

        assert_eq!(chain.read(&Annotations::new()).unwrap(), None);
        assert!(matches!(
            seen.lock().unwrap().take(),
            Some(SettingError::Reentrant {
                operation: ChainOperation::Register,
                ..
            })
        ));
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn erased_read() {
        let chain = MultiSettingReader::<Tag>::of(|_: &dyn AnnotatedElement| Some(Tag("x")));
        let erased: &dyn ErasedChain = &chain;

        assert!(erased.kind().is::<Tag>());
        let setting = erased.read_erased(&Annotations::new()).unwrap().unwrap();
        assert_eq!(setting.downcast_ref::<Tag>(), Some(&Tag("x")));
    }
}
