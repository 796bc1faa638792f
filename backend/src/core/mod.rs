//! Core primitives shared by every layer

pub mod time;

pub use time::{Date, DateError};
