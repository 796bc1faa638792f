//! Chain - an owned, singly-linked sequence
//!
//! Every node owns its value and its successor, so a chain is a plain tree of
//! boxes with a single owner and no cycles. Copying and releasing values is
//! driven by the element type itself (`Clone` and `Drop`), which pins one
//! coherent copy/free pair to every chain at compile time.
//!
//! # Critical Invariants
//!
//! 1. **Single owner**: no node is ever reachable from two links
//! 2. **No partial copies**: a failed [`Chain::try_map`] releases every node it
//!    already built before reporting the error
//! 3. **Bounded stack**: dropping, clearing and cloning walk the chain
//!    iteratively, whatever its length

use std::convert::Infallible;
use std::fmt;

type Link<T> = Option<Box<Node<T>>>;

struct Node<T> {
    value: T,
    next: Link<T>,
}

/// An owned, singly-linked sequence of values
///
/// # Example
/// ```
/// use event_manager_core::collections::Chain;
///
/// let mut ids: Chain<u32> = Chain::new();
/// for id in [7, 3, 5] {
///     ids.insert_before(id, |existing, new| existing > new);
/// }
///
/// assert_eq!(ids.iter().copied().collect::<Vec<_>>(), vec![3, 5, 7]);
/// assert_eq!(ids.remove_where(|id| *id == 5), Some(5));
/// assert_eq!(ids.len(), 2);
/// ```
pub struct Chain<T> {
    head: Link<T>,
}

/// A node unlinked from a chain but not yet released
///
/// Holding a detached node keeps its allocation alive, so it can be relinked
/// with [`Chain::attach_before`] without allocating again.
pub struct Detached<T> {
    node: Box<Node<T>>,
}

impl<T> Detached<T> {
    pub fn value(&self) -> &T {
        &self.node.value
    }

    pub fn value_mut(&mut self) -> &mut T {
        &mut self.node.value
    }

    /// Release the node, handing back its value
    pub fn into_value(self) -> T {
        self.node.value
    }
}

impl<T> Chain<T> {
    /// Create an empty chain
    pub const fn new() -> Self {
        Self { head: None }
    }

    /// Create a chain holding exactly one value
    pub fn from_value(value: T) -> Self {
        let mut chain = Self::new();
        chain.push_front(value);
        chain
    }

    pub fn push_front(&mut self, value: T) {
        let next = self.head.take();
        self.head = Some(Box::new(Node { value, next }));
    }

    /// Unlink the head node and return its value
    pub fn pop_front(&mut self) -> Option<T> {
        self.head.take().map(|node| {
            let Node { value, next } = *node;
            self.head = next;
            value
        })
    }

    pub fn first(&self) -> Option<&T> {
        self.head.as_deref().map(|node| &node.value)
    }

    /// Number of values; walks the whole chain
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            next: self.head.as_deref_mut(),
        }
    }

    pub fn find<P>(&self, mut pred: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().find(|value| pred(value))
    }

    pub fn find_mut<P>(&mut self, mut pred: P) -> Option<&mut T>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter_mut().find(|value| pred(value))
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|existing| existing == value)
    }

    /// Insert `value` before the first element for which
    /// `stop(existing, &value)` returns true, or at the tail when none does
    pub fn insert_before<P>(&mut self, value: T, stop: P)
    where
        P: FnMut(&T, &T) -> bool,
    {
        let node = Box::new(Node { value, next: None });
        self.attach_before(Detached { node }, stop);
    }

    /// Remove the first element matching `pred`, releasing its node
    pub fn remove_where<P>(&mut self, pred: P) -> Option<T>
    where
        P: FnMut(&T) -> bool,
    {
        self.detach_where(pred).map(Detached::into_value)
    }

    /// Unlink the first element matching `pred` without releasing its node
    pub fn detach_where<P>(&mut self, pred: P) -> Option<Detached<T>>
    where
        P: FnMut(&T) -> bool,
    {
        let link = self.seek(pred);
        let mut node = link.take()?;
        *link = node.next.take();
        Some(Detached { node })
    }

    /// Relink a detached node before the first element for which
    /// `stop(existing, detached)` returns true, or at the tail; never allocates
    pub fn attach_before<P>(&mut self, detached: Detached<T>, mut stop: P)
    where
        P: FnMut(&T, &T) -> bool,
    {
        let mut node = detached.node;
        let link = self.seek(|existing| stop(existing, &node.value));
        node.next = link.take();
        *link = Some(node);
    }

    /// Release every node
    pub fn clear(&mut self) {
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
    }

    /// Copy the chain through a fallible per-element copy
    ///
    /// Nodes are copied head to tail. If `copy` fails part way, every node
    /// copied so far is released and the error is returned; a partially
    /// copied chain is never handed out.
    ///
    /// # Example
    /// ```
    /// use event_manager_core::collections::Chain;
    ///
    /// let names: Chain<&str> = ["ann", "bob"].into_iter().collect();
    /// let upper = names.try_map(|name| Ok::<_, ()>(name.to_uppercase())).unwrap();
    /// assert_eq!(upper.first().map(String::as_str), Some("ANN"));
    ///
    /// let failed = names.try_map(|name| if *name == "bob" { Err("no bob") } else { Ok(*name) });
    /// assert_eq!(failed.err(), Some("no bob"));
    /// ```
    pub fn try_map<U, E, F>(&self, mut copy: F) -> Result<Chain<U>, E>
    where
        F: FnMut(&T) -> Result<U, E>,
    {
        let mut out = Chain::new();
        let mut tail = &mut out.head;
        for value in self.iter() {
            let node = Box::new(Node {
                value: copy(value)?,
                next: None,
            });
            tail = &mut tail.insert(node).next;
        }
        Ok(out)
    }

    /// Link slot in front of the first element for which `stop` returns true,
    /// or the empty tail slot
    fn seek<P>(&mut self, mut stop: P) -> &mut Link<T>
    where
        P: FnMut(&T) -> bool,
    {
        let mut link = &mut self.head;
        while link.as_ref().is_some_and(|node| !stop(&node.value)) {
            if let Some(node) = link {
                link = &mut node.next;
            }
        }
        link
    }
}

impl<T> Default for Chain<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Chain<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Clone> Clone for Chain<T> {
    fn clone(&self) -> Self {
        match self.try_map(|value| Ok::<_, Infallible>(value.clone())) {
            Ok(chain) => chain,
            Err(never) => match never {},
        }
    }
}

impl<T: PartialEq> PartialEq for Chain<T> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Chain<T> {}

impl<T: fmt::Debug> fmt::Debug for Chain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for Chain<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut chain = Chain::new();
        let mut tail = &mut chain.head;
        for value in iter {
            tail = &mut tail.insert(Box::new(Node { value, next: None })).next;
        }
        chain
    }
}

impl<'a, T> IntoIterator for &'a Chain<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for Chain<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { chain: self }
    }
}

/// Borrowing iterator over a [`Chain`]
pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            &node.value
        })
    }
}

/// Mutably borrowing iterator over a [`Chain`]
pub struct IterMut<'a, T> {
    next: Option<&'a mut Node<T>>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.take().map(|node| {
            self.next = node.next.as_deref_mut();
            &mut node.value
        })
    }
}

/// Owning iterator over a [`Chain`]
pub struct IntoIter<T> {
    chain: Chain<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.chain.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Counts live copies through a shared counter
    struct Tracked {
        live: Rc<Cell<usize>>,
        value: u32,
    }

    impl Tracked {
        fn new(live: &Rc<Cell<usize>>, value: u32) -> Self {
            live.set(live.get() + 1);
            Self {
                live: Rc::clone(live),
                value,
            }
        }
    }

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.live.set(self.live.get() - 1);
        }
    }

    #[test]
    fn test_new_chain_is_empty() {
        let chain: Chain<u32> = Chain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.len(), 0);
        assert_eq!(chain.first(), None);
    }

    #[test]
    fn test_push_and_pop_front() {
        let mut chain = Chain::from_value(1);
        chain.push_front(2);
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.pop_front(), Some(2));
        assert_eq!(chain.pop_front(), Some(1));
        assert_eq!(chain.pop_front(), None);
    }

    #[test]
    fn test_insert_before_falls_back_to_tail() {
        let mut chain: Chain<u32> = [1, 2].into_iter().collect();
        chain.insert_before(9, |_, _| false);
        assert_eq!(chain.iter().copied().collect::<Vec<_>>(), vec![1, 2, 9]);

        chain.insert_before(0, |_, _| true);
        assert_eq!(chain.first(), Some(&0));
    }

    #[test]
    fn test_remove_where_only_first_match() {
        let mut chain: Chain<u32> = [4, 8, 4].into_iter().collect();
        assert_eq!(chain.remove_where(|v| *v == 4), Some(4));
        assert_eq!(chain.iter().copied().collect::<Vec<_>>(), vec![8, 4]);
        assert_eq!(chain.remove_where(|v| *v == 5), None);
    }

    #[test]
    fn test_detach_and_attach_reuses_node() {
        let mut chain: Chain<u32> = [1, 2, 3].into_iter().collect();
        let mut detached = chain.detach_where(|v| *v == 1).unwrap();
        *detached.value_mut() = 10;
        chain.attach_before(detached, |existing, moved| existing > moved);
        assert_eq!(chain.iter().copied().collect::<Vec<_>>(), vec![2, 3, 10]);
    }

    #[test]
    fn test_clone_is_independent() {
        let original: Chain<String> = ["a", "b"].into_iter().map(String::from).collect();
        let mut copy = original.clone();
        copy.iter_mut().for_each(|s| s.push('!'));

        assert_eq!(original.iter().cloned().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(copy.iter().cloned().collect::<Vec<_>>(), vec!["a!", "b!"]);
    }

    #[test]
    fn test_failed_copy_releases_partial_chain() {
        let live = Rc::new(Cell::new(0));
        let source: Chain<Tracked> = (0..5).map(|v| Tracked::new(&live, v)).collect();
        assert_eq!(live.get(), 5);

        let result = source.try_map(|item| {
            if item.value == 3 {
                Err("copy failed")
            } else {
                Ok(Tracked::new(&live, item.value))
            }
        });

        assert_eq!(result.err(), Some("copy failed"));
        assert_eq!(live.get(), 5);

        drop(source);
        assert_eq!(live.get(), 0);
    }

    #[test]
    fn test_clear_releases_every_node() {
        let live = Rc::new(Cell::new(0));
        let mut chain: Chain<Tracked> = (0..3).map(|v| Tracked::new(&live, v)).collect();
        chain.clear();
        assert!(chain.is_empty());
        assert_eq!(live.get(), 0);
    }

    #[test]
    fn test_long_chain_drops_without_recursion() {
        let chain: Chain<u32> = (0..200_000).collect();
        assert_eq!(chain.len(), 200_000);
        let copy = chain.clone();
        drop(chain);
        drop(copy);
    }

    #[test]
    fn test_owning_iterator_yields_in_order() {
        let chain: Chain<u32> = [3, 1, 2].into_iter().collect();
        assert_eq!(chain.into_iter().collect::<Vec<_>>(), vec![3, 1, 2]);
    }
}
