//! Domain models for the event manager

pub mod event;
pub mod log;
pub mod member;

/// Caller-chosen event identifier; negative values are rejected
pub type EventId = i32;

/// Caller-chosen member identifier; negative values are rejected
pub type MemberId = i32;

// Re-exports
pub use event::{Event, EventError};
pub use log::{Activity, ActivityLog, RemovalReason};
pub use member::{Member, MemberRank};
