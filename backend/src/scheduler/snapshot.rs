//! Snapshot - read-only export of scheduler state
//!
//! Captures the current date, both registries in registry order, and the
//! links between them as plain serde structures.
//!
//! # Critical Invariants
//!
//! - **Registry order**: `events` and `members` appear exactly in the order
//!   the scheduler's registries hold them
//! - **Count consistency**: each member's `event_count` equals the number of
//!   events whose `member_ids` contain that member

use crate::core::time::Date;
use crate::models::{Event, EventId, Member, MemberId, MemberRank};
use crate::scheduler::engine::EventScheduler;
use serde::{Deserialize, Serialize};

/// Complete scheduler state at one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerSnapshot {
    pub current_date: Date,

    /// Events, earliest first
    pub events: Vec<EventSnapshot>,

    /// Members, busiest first
    pub members: Vec<MemberSnapshot>,
}

/// Event state snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSnapshot {
    pub id: EventId,
    pub name: String,
    pub date: Date,
    pub member_ids: Vec<MemberId>,
}

impl From<&Event> for EventSnapshot {
    fn from(event: &Event) -> Self {
        EventSnapshot {
            id: event.id(),
            name: event.name().to_string(),
            date: event.date(),
            member_ids: event.member_ids().collect(),
        }
    }
}

/// Member state snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberSnapshot {
    pub id: MemberId,
    pub name: String,
    pub event_count: u32,
}

impl From<(&Member, &MemberRank)> for MemberSnapshot {
    fn from((member, rank): (&Member, &MemberRank)) -> Self {
        MemberSnapshot {
            id: member.id(),
            name: member.name().to_string(),
            event_count: rank.event_count(),
        }
    }
}

impl SchedulerSnapshot {
    /// Render as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl EventScheduler {
    /// Capture the current state
    pub fn snapshot(&self) -> SchedulerSnapshot {
        SchedulerSnapshot {
            current_date: self.current_date(),
            events: self.events().map(EventSnapshot::from).collect(),
            members: self.members().map(MemberSnapshot::from).collect(),
        }
    }
}
