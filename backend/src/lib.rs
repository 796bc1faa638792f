//! Event Manager Core - Rust Engine
//!
//! Schedules events on a 30-day-month calendar and tracks which members take
//! part in them, keeping two priority-ordered registries consistent as time
//! moves forward.
//!
//! # Architecture
//!
//! - **core**: Calendar dates
//! - **collections**: Owned singly linked chain and the pair container
//! - **registry**: Priority-ordered bindings built on the chain
//! - **models**: Domain types (Event, Member, MemberRank, ActivityLog)
//! - **scheduler**: Cross-registry orchestration, reports and snapshots
//!
//! # Critical Invariants
//!
//! 1. The current date only moves forward
//! 2. Event IDs and member IDs are unique and never negative
//! 3. A member's participation count equals the number of events linked to it
//! 4. A failed operation changes nothing

// Module declarations
pub mod collections;
pub mod core;
pub mod models;
pub mod registry;
pub mod scheduler;

// Re-exports for convenience
pub use crate::core::time::{Date, DateError};
pub use models::{
    event::{Event, EventError},
    log::{Activity, ActivityLog, RemovalReason},
    member::{Member, MemberRank},
    EventId, MemberId,
};
pub use registry::{HighestFirst, LowestFirst, PriorityOrder, Registry, RegistryError};
pub use scheduler::{
    write_contributors_report, write_events_report, AdvanceResult, EventScheduler,
    SchedulerConfig, SchedulerError, SchedulerSnapshot,
};
