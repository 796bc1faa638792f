//! Owned building blocks for the registries
//!
//! - **chain**: singly-linked sequence of owned values
//! - **pair**: two independently typed owned values

pub mod chain;
pub mod pair;

pub use chain::{Chain, Detached};
pub use pair::Pair;
