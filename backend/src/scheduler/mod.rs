//! Scheduler - keeps the event and member registries consistent
//!
//! See `engine.rs` for the scheduler itself.

pub mod engine;
pub mod report;
pub mod snapshot;


// Re-export main types for convenience
pub use engine::{AdvanceResult, EventScheduler, SchedulerConfig, SchedulerError};
pub use report::{write_contributors_report, write_events_report};
pub use snapshot::{EventSnapshot, MemberSnapshot, SchedulerSnapshot};
