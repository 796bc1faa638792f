//! Priority orders
//!
//! A registry is parameterized by an order type rather than a function
//! pointer, so every registry instance carries exactly one comparator for its
//! priority type.

use std::cmp::Ordering;

/// Three-way priority comparison
///
/// `compare(a, b)` returns `Greater` when `a` outranks `b`, `Less` when `b`
/// outranks `a`, and `Equal` when neither does.
pub trait PriorityOrder<P> {
    fn compare(&self, a: &P, b: &P) -> Ordering;
}

/// Greater values first
///
/// # Example
/// ```
/// use event_manager_core::registry::{HighestFirst, PriorityOrder};
/// use std::cmp::Ordering;
///
/// assert_eq!(HighestFirst.compare(&9, &2), Ordering::Greater);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighestFirst;

impl<P: Ord> PriorityOrder<P> for HighestFirst {
    fn compare(&self, a: &P, b: &P) -> Ordering {
        a.cmp(b)
    }
}

/// Smaller values first (earliest date, lowest number)
///
/// # Example
/// ```
/// use event_manager_core::registry::{LowestFirst, PriorityOrder};
/// use std::cmp::Ordering;
///
/// assert_eq!(LowestFirst.compare(&2, &9), Ordering::Greater);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LowestFirst;

impl<P: Ord> PriorityOrder<P> for LowestFirst {
    fn compare(&self, a: &P, b: &P) -> Ordering {
        b.cmp(a)
    }
}
