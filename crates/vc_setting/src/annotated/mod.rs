//! Annotated declarations that setting readers inspect.
//!
//! A declaration (field, accessor or type) exposes its annotations through
//! [`AnnotatedElement`]. Annotations are stored by their [`TypeId`], so there
//! can only be one annotation per type.
//!
//! The [`vocabulary`] module holds the conventional annotations understood by
//! the default [`SettingsRegistry`](crate::registry::SettingsRegistry).

// -----------------------------------------------------------------------------
// Modules

pub mod vocabulary;

// -----------------------------------------------------------------------------
// Annotations

use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt::Debug;

use crate::hash::{self, HashMap};

/// A value that can be attached to a declaration.
pub trait Annotation: Any + Send + Sync + Debug {}

/// A declaration that carries annotations.
pub trait AnnotatedElement {
    /// Returns the annotations of this declaration.
    fn annotations(&self) -> &Annotations;
}

impl dyn AnnotatedElement + '_ {
    /// Returns the annotation of type `A`, if present.
    #[inline]
    pub fn get_annotation<A: Annotation>(&self) -> Option<&A> {
        self.annotations().get::<A>()
    }

    /// Returns `true` if it contains the given annotation type.
    #[inline]
    pub fn has_annotation<A: Annotation>(&self) -> bool {
        self.annotations().contains::<A>()
    }
}

/// A collection of annotations keyed by their type.
///
/// # Examples
///
/// ```
/// use vc_setting::annotated::Annotations;
/// use vc_setting::annotated::vocabulary::{Expose, Since, Until};
///
/// let annotations = Annotations::new()
///     .with(Expose::new(true, false))
///     .with(Since::new("1.1"));
///
/// assert!(annotations.contains::<Since>());
/// assert!(!annotations.contains::<Until>());
/// assert!(!annotations.get::<Expose>().unwrap().deserialize());
/// ```
pub struct Annotations {
    annotations: HashMap<TypeId, Box<dyn Annotation>>,
}

impl Annotations {
    /// Creates an empty [`Annotations`].
    #[inline]
    pub const fn new() -> Self {
        Self {
            annotations: hash::new_map(),
        }
    }

    /// Adds an annotation.
    ///
    /// Later insertions for the same type overwrite earlier values.
    #[inline]
    pub fn with<A: Annotation>(mut self, annotation: A) -> Self {
        self.insert(annotation);
        self
    }

    /// Inserts an annotation, returning `true` if it replaced another.
    pub fn insert<A: Annotation>(&mut self, annotation: A) -> bool {
        self.annotations
            .insert(TypeId::of::<A>(), Box::new(annotation))
            .is_some()
    }

    /// Returns the annotation of type `A`, if present.
    #[inline]
    pub fn get<A: Annotation>(&self) -> Option<&A> {
        self.annotations
            .get(&TypeId::of::<A>())
            .and_then(|annotation| (&**annotation as &dyn Any).downcast_ref::<A>())
    }

    /// Returns `true` if an annotation of type `A` is present.
    #[inline]
    pub fn contains<A: Annotation>(&self) -> bool {
        self.annotations.contains_key(&TypeId::of::<A>())
    }

    /// Returns an iterator over the stored annotations.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &dyn Annotation> {
        self.annotations.values().map(|annotation| &**annotation)
    }

    /// Returns the number of stored annotations.
    #[inline]
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    /// Returns `true` if no annotations are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }
}

impl Default for Annotations {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Annotations {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.annotations.values()).finish()
    }
}

impl AnnotatedElement for Annotations {
    #[inline]
    fn annotations(&self) -> &Annotations {
        self
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::vocabulary::{SerializedName, Since};
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Marker(&'static str);

    impl Annotation for Marker {}

    #[test]
    fn one_annotation_per_type() {
        let mut annotations = Annotations::new().with(Marker("a"));
        assert!(annotations.insert(Marker("b")));
        assert!(!annotations.insert(Since::new("1")));

        assert_eq!(annotations.len(), 2);
        assert_eq!(annotations.get::<Marker>(), Some(&Marker("b")));
    }

    #[test]
    fn element_access() {
        let annotations = Annotations::new().with(SerializedName::new("id"));
        let element: &dyn AnnotatedElement = &annotations;

        assert!(element.has_annotation::<SerializedName>());
        assert!(!element.has_annotation::<Marker>());
        assert_eq!(element.get_annotation::<SerializedName>().unwrap().value(), "id");
        assert!(Annotations::default().is_empty());
    }
}
