//! Pair - two independently typed owned values
//!
//! The registry binds every element to its priority through a `Pair`. Both
//! slots are filled when the pair is built, so a half-built pair is never
//! observable.

use serde::{Deserialize, Serialize};

/// Two owned values of independent types
///
/// # Example
/// ```
/// use event_manager_core::collections::Pair;
///
/// let pair = Pair::new("launch".to_string(), 3u32);
/// assert_eq!(pair.first(), "launch");
/// assert_eq!(*pair.second(), 3);
///
/// let copy: String = pair.first_cloned();
/// assert_eq!(copy, "launch");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair<A, B> {
    first: A,
    second: B,
}

impl<A, B> Pair<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    /// Build both slots through fallible constructors
    ///
    /// `make_second` only runs once `make_first` succeeded. When it fails, the
    /// first value is released before the error is returned.
    pub fn try_new<E, F, G>(make_first: F, make_second: G) -> Result<Self, E>
    where
        F: FnOnce() -> Result<A, E>,
        G: FnOnce() -> Result<B, E>,
    {
        let first = make_first()?;
        let second = make_second()?;
        Ok(Self { first, second })
    }

    /// Borrow the first value for the lifetime of the pair
    pub fn first(&self) -> &A {
        &self.first
    }

    /// Borrow the second value for the lifetime of the pair
    pub fn second(&self) -> &B {
        &self.second
    }

    /// Independent copy of the first value, owned by the caller
    pub fn first_cloned(&self) -> A
    where
        A: Clone,
    {
        self.first.clone()
    }

    /// Independent copy of the second value, owned by the caller
    pub fn second_cloned(&self) -> B
    where
        B: Clone,
    {
        self.second.clone()
    }

    pub(crate) fn first_mut(&mut self) -> &mut A {
        &mut self.first
    }

    /// Swap in a new second value, returning the old one
    pub fn replace_second(&mut self, second: B) -> B {
        std::mem::replace(&mut self.second, second)
    }

    pub fn into_parts(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A, B> From<(A, B)> for Pair<A, B> {
    fn from((first, second): (A, B)) -> Self {
        Self::new(first, second)
    }
}
