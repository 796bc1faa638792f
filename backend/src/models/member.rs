//! Member model
//!
//! A member is identified by a caller-chosen numeric ID and a name. How many
//! events a member takes part in is not stored on the member itself: it lives
//! in the member's [`MemberRank`], the priority the member registry sorts by.

use crate::models::MemberId;
use serde::{Deserialize, Serialize};

/// An enrolled member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    id: MemberId,
    name: String,
}

impl Member {
    pub fn new(id: MemberId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn id(&self) -> MemberId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Registry priority of a member
///
/// Ranks compare by participation count first; among equal counts the
/// higher member ID ranks higher.
///
/// # Example
/// ```
/// use event_manager_core::MemberRank;
///
/// let busy = MemberRank::new(3, 1);
/// let idle_high_id = MemberRank::new(0, 9);
/// let idle_low_id = MemberRank::new(0, 2);
///
/// assert!(busy > idle_high_id);
/// assert!(idle_high_id > idle_low_id);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MemberRank {
    event_count: u32,
    member_id: MemberId,
}

impl MemberRank {
    pub fn new(event_count: u32, member_id: MemberId) -> Self {
        Self {
            event_count,
            member_id,
        }
    }

    /// Rank of a member who takes part in nothing yet
    pub fn unlinked(member_id: MemberId) -> Self {
        Self::new(0, member_id)
    }

    pub fn event_count(&self) -> u32 {
        self.event_count
    }

    pub fn member_id(&self) -> MemberId {
        self.member_id
    }

    /// Rank after joining one more event
    pub fn incremented(&self) -> Self {
        Self::new(self.event_count.saturating_add(1), self.member_id)
    }

    /// Rank after leaving one event; never drops below zero
    pub fn decremented(&self) -> Self {
        Self::new(self.event_count.saturating_sub(1), self.member_id)
    }
}
