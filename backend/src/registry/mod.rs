//! Registry - a priority-ordered collection of (element, priority) bindings
//!
//! Bindings live in a [`Chain`] kept sorted by the registry's
//! [`PriorityOrder`]. Every operation is a linear scan from the head, which
//! keeps the structure simple and is only meant for small registries.
//!
//! # Critical Invariants
//!
//! 1. **Order**: after any mutating call returns, no binding precedes a
//!    binding of strictly higher priority
//! 2. **Ties are FIFO**: equal priorities keep their insertion order
//! 3. **No uniqueness**: the registry never rejects a duplicate element;
//!    callers check before inserting
//! 4. **No stored cursor**: traversal borrows the registry, so a mutation can
//!    never happen in the middle of an iteration

pub mod order;

pub use order::{HighestFirst, LowestFirst, PriorityOrder};

use crate::collections::{Chain, Pair};
use std::cmp::Ordering;
use thiserror::Error;

/// Errors that can occur during registry operations
#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("Element not found in registry")]
    ElementNotFound,
}

/// Priority-ordered bindings of elements to priorities
///
/// # Example
/// ```
/// use event_manager_core::registry::{LowestFirst, Registry};
///
/// let mut deadlines = Registry::new(LowestFirst);
/// deadlines.insert("report", 20);
/// deadlines.insert("review", 5);
/// deadlines.insert("retro", 20);
///
/// let order: Vec<_> = deadlines.iter().copied().collect();
/// assert_eq!(order, vec!["review", "report", "retro"]);
///
/// deadlines.change_priority(&"retro", &20, 1).unwrap();
/// assert_eq!(deadlines.first(), Some(&"retro"));
/// ```
#[derive(Debug, Clone)]
pub struct Registry<E, P, O = HighestFirst> {
    bindings: Chain<Pair<E, P>>,
    order: O,
}

impl<E, P, O: PriorityOrder<P>> Registry<E, P, O> {
    /// Create an empty registry ordered by `order`
    pub fn new(order: O) -> Self {
        Self {
            bindings: Chain::new(),
            order,
        }
    }

    pub fn order(&self) -> &O {
        &self.order
    }

    /// Bind `element` to `priority`
    ///
    /// The binding goes immediately before the first existing binding whose
    /// priority is strictly lower, which puts it behind every binding of
    /// equal priority.
    pub fn insert(&mut self, element: E, priority: P) {
        let order = &self.order;
        self.bindings
            .insert_before(Pair::new(element, priority), |existing, new| {
                ranks_below(order, existing, new)
            });
    }

    /// Move the `(element, old)` binding to priority `new`
    ///
    /// The binding is unlinked, re-keyed, and relinked as one step. The
    /// detached node is reused, so the element can never drop out of the
    /// registry half way through.
    ///
    /// # Errors
    /// Returns [`RegistryError::ElementNotFound`] when no binding matches both
    /// `element` and `old`; the registry is left untouched.
    pub fn change_priority(&mut self, element: &E, old: &P, new: P) -> Result<(), RegistryError>
    where
        E: PartialEq,
    {
        let order = &self.order;
        let mut detached = self
            .bindings
            .detach_where(|binding| {
                binding.first() == element
                    && order.compare(binding.second(), old) == Ordering::Equal
            })
            .ok_or(RegistryError::ElementNotFound)?;

        detached.value_mut().replace_second(new);
        self.bindings.attach_before(detached, |existing, moved| {
            ranks_below(order, existing, moved)
        });
        Ok(())
    }

    /// Remove the first binding whose element equals `element`, whatever its
    /// priority
    ///
    /// # Errors
    /// Returns [`RegistryError::ElementNotFound`] when no element matches.
    pub fn remove_element(&mut self, element: &E) -> Result<(E, P), RegistryError>
    where
        E: PartialEq,
    {
        self.bindings
            .remove_where(|binding| binding.first() == element)
            .map(Pair::into_parts)
            .ok_or(RegistryError::ElementNotFound)
    }

    /// Remove the highest-priority binding; `None` on an empty registry
    pub fn remove_first(&mut self) -> Option<(E, P)> {
        self.bindings.pop_front().map(Pair::into_parts)
    }

    /// Highest-priority element
    pub fn first(&self) -> Option<&E> {
        self.bindings.first().map(Pair::first)
    }

    /// Highest-priority binding
    pub fn first_entry(&self) -> Option<(&E, &P)> {
        self.bindings
            .first()
            .map(|binding| (binding.first(), binding.second()))
    }

    /// Elements in priority order
    pub fn iter(&self) -> Iter<'_, E, P> {
        Iter {
            inner: self.bindings.iter(),
        }
    }

    /// Bindings in priority order
    pub fn entries(&self) -> impl Iterator<Item = (&E, &P)> + '_ {
        self.bindings
            .iter()
            .map(|binding| (binding.first(), binding.second()))
    }

    /// First element matching `pred`, in priority order
    pub fn find<F>(&self, mut pred: F) -> Option<&E>
    where
        F: FnMut(&E) -> bool,
    {
        self.bindings
            .find(|binding| pred(binding.first()))
            .map(Pair::first)
    }

    /// Mutable access to the first element matching `pred`
    ///
    /// The caller must not change anything the element's priority is derived
    /// from; use [`Registry::change_priority`] for that.
    pub fn find_mut<F>(&mut self, mut pred: F) -> Option<&mut E>
    where
        F: FnMut(&E) -> bool,
    {
        self.bindings
            .find_mut(|binding| pred(binding.first()))
            .map(Pair::first_mut)
    }

    /// Priority currently bound to `element`
    pub fn priority_of(&self, element: &E) -> Option<&P>
    where
        E: PartialEq,
    {
        self.bindings
            .find(|binding| binding.first() == element)
            .map(Pair::second)
    }

    /// Number of bindings; walks the whole registry
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Whether any binding holds `element`, ignoring priorities
    pub fn contains(&self, element: &E) -> bool
    where
        E: PartialEq,
    {
        self.bindings.iter().any(|binding| binding.first() == element)
    }

    /// Release every binding
    pub fn clear(&mut self) {
        self.bindings.clear();
    }
}

impl<E, P, O: PriorityOrder<P> + Default> Default for Registry<E, P, O> {
    fn default() -> Self {
        Self::new(O::default())
    }
}

fn ranks_below<E, P, O: PriorityOrder<P>>(
    order: &O,
    existing: &Pair<E, P>,
    new: &Pair<E, P>,
) -> bool {
    order.compare(existing.second(), new.second()) == Ordering::Less
}

/// Elements of a [`Registry`] in priority order
pub struct Iter<'a, E, P> {
    inner: crate::collections::chain::Iter<'a, Pair<E, P>>,
}

impl<'a, E, P> Iterator for Iter<'a, E, P> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Pair::first)
    }
}

impl<'a, E, P, O: PriorityOrder<P>> IntoIterator for &'a Registry<E, P, O> {
    type Item = &'a E;
    type IntoIter = Iter<'a, E, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
