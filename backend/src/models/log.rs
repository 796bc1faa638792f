//! Activity logging for auditing scheduler state changes.
//!
//! Every successful mutation of the scheduler appends one [`Activity`] record,
//! stamped with the scheduler's current date at the time it happened. The log
//! makes it possible to:
//! - Audit which events expired and which members they released
//! - Debug the order in which links and reschedules were applied
//! - Export the history as JSON (all records are serde-serializable)
//!
//! # Example
//!
//! ```rust
//! use event_manager_core::models::{Activity, ActivityLog};
//! use event_manager_core::Date;
//!
//! let today = Date::new(1, 1, 2024).unwrap();
//! let mut log = ActivityLog::new();
//! log.log(Activity::MemberEnrolled {
//!     date: today,
//!     member_id: 7,
//!     name: "Ann".to_string(),
//! });
//!
//! assert_eq!(log.for_member(7).len(), 1);
//! ```

use crate::core::time::Date;
use crate::models::{EventId, MemberId};
use serde::{Deserialize, Serialize};

/// Why an event left the schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemovalReason {
    /// Removed on request
    Cancelled,
    /// Evicted because its date passed
    Expired,
}

/// Scheduler activity capturing a state change.
///
/// `date` is always the scheduler's current date when the change happened,
/// not the date of the event it concerns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Activity {
    /// A new event entered the schedule
    EventScheduled {
        date: Date,
        event_id: EventId,
        name: String,
        event_date: Date,
    },

    /// An event moved to a new date
    EventRescheduled {
        date: Date,
        event_id: EventId,
        old_date: Date,
        new_date: Date,
    },

    /// An event left the schedule and released its members
    EventRemoved {
        date: Date,
        event_id: EventId,
        name: String,
        reason: RemovalReason,
        released_members: Vec<MemberId>,
    },

    /// A new member enrolled
    MemberEnrolled {
        date: Date,
        member_id: MemberId,
        name: String,
    },

    /// A member was linked to an event
    MemberLinked {
        date: Date,
        member_id: MemberId,
        event_id: EventId,
        event_count: u32,
    },

    /// A member was unlinked from an event
    MemberUnlinked {
        date: Date,
        member_id: MemberId,
        event_id: EventId,
        event_count: u32,
    },

    /// The current date moved forward
    TimeAdvanced { date: Date, from: Date, days: u32 },
}

impl Activity {
    /// Scheduler date at which the activity happened
    pub fn date(&self) -> Date {
        match self {
            Activity::EventScheduled { date, .. }
            | Activity::EventRescheduled { date, .. }
            | Activity::EventRemoved { date, .. }
            | Activity::MemberEnrolled { date, .. }
            | Activity::MemberLinked { date, .. }
            | Activity::MemberUnlinked { date, .. }
            | Activity::TimeAdvanced { date, .. } => *date,
        }
    }

    /// Activity type name (for filtering)
    pub fn activity_type(&self) -> &'static str {
        match self {
            Activity::EventScheduled { .. } => "EventScheduled",
            Activity::EventRescheduled { .. } => "EventRescheduled",
            Activity::EventRemoved { .. } => "EventRemoved",
            Activity::MemberEnrolled { .. } => "MemberEnrolled",
            Activity::MemberLinked { .. } => "MemberLinked",
            Activity::MemberUnlinked { .. } => "MemberUnlinked",
            Activity::TimeAdvanced { .. } => "TimeAdvanced",
        }
    }

    /// Event ID if the activity relates to a specific event
    pub fn event_id(&self) -> Option<EventId> {
        match self {
            Activity::EventScheduled { event_id, .. }
            | Activity::EventRescheduled { event_id, .. }
            | Activity::EventRemoved { event_id, .. }
            | Activity::MemberLinked { event_id, .. }
            | Activity::MemberUnlinked { event_id, .. } => Some(*event_id),
            _ => None,
        }
    }

    /// Whether the activity touched the given member
    pub fn involves_member(&self, member_id: MemberId) -> bool {
        match self {
            Activity::MemberEnrolled { member_id: id, .. }
            | Activity::MemberLinked { member_id: id, .. }
            | Activity::MemberUnlinked { member_id: id, .. } => *id == member_id,
            Activity::EventRemoved {
                released_members, ..
            } => released_members.contains(&member_id),
            _ => false,
        }
    }
}

/// Log of scheduler activities in the order they happened.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityLog {
    activities: Vec<Activity>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self {
            activities: Vec::new(),
        }
    }

    /// Append an activity
    pub fn log(&mut self, activity: Activity) {
        self.activities.push(activity);
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// Activities recorded while the scheduler stood on `date`
    pub fn on_date(&self, date: Date) -> Vec<&Activity> {
        self.activities.iter().filter(|a| a.date() == date).collect()
    }

    /// Activities of a specific type
    pub fn of_type(&self, activity_type: &str) -> Vec<&Activity> {
        self.activities
            .iter()
            .filter(|a| a.activity_type() == activity_type)
            .collect()
    }

    /// Activities for a specific event
    pub fn for_event(&self, event_id: EventId) -> Vec<&Activity> {
        self.activities
            .iter()
            .filter(|a| a.event_id() == Some(event_id))
            .collect()
    }

    /// Activities that touched a specific member
    pub fn for_member(&self, member_id: MemberId) -> Vec<&Activity> {
        self.activities
            .iter()
            .filter(|a| a.involves_member(member_id))
            .collect()
    }

    pub fn clear(&mut self) {
        self.activities.clear();
    }
}
