//! Scheduler Engine
//!
//! Owns the current date and the two registries, and keeps them consistent:
//! - **Events**: ordered by date, earliest first, FIFO among equal dates
//! - **Members**: ordered by [`MemberRank`] (participation count, then ID)
//!
//! # Architecture
//!
//! Every public operation validates all of its inputs against the current
//! state before it touches either registry, so a rejected call leaves the
//! scheduler exactly as it was. Cross-registry effects are applied in a fixed
//! order:
//!
//! ```text
//! link / unlink:  event's member list -> member's rank (re-sort Members)
//! remove / evict: every linked member's rank (re-sort Members) -> drop event
//! advance_time:   tick N days -> evict expired events from the head, one at
//!                 a time, restarting the scan after each eviction
//! ```
//!
//! # Example
//!
//! ```rust
//! use event_manager_core::{Date, EventScheduler};
//!
//! let mut scheduler = EventScheduler::starting_at(Date::new(1, 1, 2024).unwrap());
//! scheduler.add_event_by_date("Talk", Date::new(5, 1, 2024).unwrap(), 1).unwrap();
//! scheduler.add_member("Ann", 7).unwrap();
//! scheduler.link_member_to_event(7, 1).unwrap();
//! assert_eq!(scheduler.participation(7), Some(1));
//!
//! let result = scheduler.advance_time(10).unwrap();
//! assert_eq!(result.expired, vec![1]);
//! assert_eq!(scheduler.participation(7), Some(0));
//! ```

use crate::core::time::{Date, DateError};
use crate::models::{
    Activity, ActivityLog, Event, EventId, Member, MemberId, MemberRank, RemovalReason,
};
use crate::registry::{HighestFirst, LowestFirst, Registry, RegistryError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Configuration Types
// ============================================================================

/// Scheduler configuration
///
/// # Example
///
/// ```rust
/// use event_manager_core::SchedulerConfig;
///
/// let config = SchedulerConfig::from_json(
///     r#"{ "start_date": { "day": 1, "month": 1, "year": 2024 } }"#,
/// ).unwrap();
/// assert!(config.record_activity);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Date the scheduler starts on
    pub start_date: Date,

    /// Whether state changes are recorded in the activity log
    #[serde(default = "default_record_activity")]
    pub record_activity: bool,
}

fn default_record_activity() -> bool {
    true
}

impl SchedulerConfig {
    pub fn new(start_date: Date) -> Self {
        Self {
            start_date,
            record_activity: default_record_activity(),
        }
    }

    /// Parse a configuration from JSON
    ///
    /// # Errors
    /// Returns [`SchedulerError::InvalidConfig`] for malformed JSON, missing
    /// fields, or an out-of-range start date.
    pub fn from_json(json: &str) -> Result<Self, SchedulerError> {
        serde_json::from_str(json).map_err(|e| SchedulerError::InvalidConfig(e.to_string()))
    }
}

// ============================================================================
// Results and Errors
// ============================================================================

/// Outcome of [`EventScheduler::advance_time`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvanceResult {
    /// Current date after advancing
    pub date: Date,

    /// IDs of the events evicted because their date passed, in eviction order
    pub expired: Vec<EventId>,
}

/// Scheduler error types
///
/// Each user-visible failure has its own variant so callers can branch on
/// exactly what was rejected.
#[derive(Debug, Error, PartialEq)]
pub enum SchedulerError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Date {date} is before the current date {current}")]
    InvalidDate { date: Date, current: Date },

    #[error("Day count must be positive")]
    InvalidDayCount,

    #[error("Date out of range: {0}")]
    DateOutOfRange(#[from] DateError),

    #[error("Invalid event ID: {0}")]
    InvalidEventId(EventId),

    #[error("Invalid member ID: {0}")]
    InvalidMemberId(MemberId),

    #[error("Event '{name}' already exists on {date}")]
    EventAlreadyExists { name: String, date: Date },

    #[error("Event ID {0} already exists")]
    EventIdAlreadyExists(EventId),

    #[error("Event not found: {0}")]
    EventIdNotFound(EventId),

    #[error("Member ID {0} already exists")]
    MemberIdAlreadyExists(MemberId),

    #[error("Member not found: {0}")]
    MemberIdNotFound(MemberId),

    #[error("Member {member_id} is already linked to event {event_id}")]
    AlreadyLinked { member_id: MemberId, event_id: EventId },

    #[error("Member {member_id} is not linked to event {event_id}")]
    NotLinked { member_id: MemberId, event_id: EventId },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

// ============================================================================
// Scheduler
// ============================================================================

/// Event and member scheduler
#[derive(Debug, Clone)]
pub struct EventScheduler {
    /// Only ever moves forward
    current_date: Date,

    /// Events keyed by their date
    events: Registry<Event, Date, LowestFirst>,

    /// Members keyed by participation count and ID
    members: Registry<Member, MemberRank, HighestFirst>,

    activity: ActivityLog,
    record_activity: bool,
}

impl EventScheduler {
    /// Create a scheduler from configuration
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            current_date: config.start_date,
            events: Registry::new(LowestFirst),
            members: Registry::new(HighestFirst),
            activity: ActivityLog::new(),
            record_activity: config.record_activity,
        }
    }

    /// Create a scheduler on `date` with default configuration
    pub fn starting_at(date: Date) -> Self {
        Self::new(SchedulerConfig::new(date))
    }

    pub fn current_date(&self) -> Date {
        self.current_date
    }

    pub fn activity_log(&self) -> &ActivityLog {
        &self.activity
    }

    // ------------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------------

    /// Schedule a new event on `date`
    ///
    /// # Errors
    /// - [`SchedulerError::InvalidDate`] if `date` is before the current date
    /// - [`SchedulerError::InvalidEventId`] if `event_id` is negative
    /// - [`SchedulerError::EventAlreadyExists`] if `(name, date)` is taken
    /// - [`SchedulerError::EventIdAlreadyExists`] if `event_id` is taken
    pub fn add_event_by_date(
        &mut self,
        name: &str,
        date: Date,
        event_id: EventId,
    ) -> Result<(), SchedulerError> {
        self.ensure_not_past(date)?;
        ensure_event_id(event_id)?;
        self.ensure_slot_free(name, date, None)?;
        if self.event(event_id).is_some() {
            return Err(SchedulerError::EventIdAlreadyExists(event_id));
        }

        self.events.insert(Event::new(event_id, name, date), date);
        self.record(Activity::EventScheduled {
            date: self.current_date,
            event_id,
            name: name.to_string(),
            event_date: date,
        });
        Ok(())
    }

    /// Schedule a new event `days` days after the current date
    ///
    /// Same rules as [`EventScheduler::add_event_by_date`], plus
    /// [`SchedulerError::DateOutOfRange`] when the target date is not
    /// representable.
    pub fn add_event_by_offset(
        &mut self,
        name: &str,
        days: u32,
        event_id: EventId,
    ) -> Result<(), SchedulerError> {
        let date = self.current_date.advanced_by(days)?;
        self.add_event_by_date(name, date, event_id)
    }

    /// Remove an event, releasing every member linked to it
    ///
    /// # Errors
    /// - [`SchedulerError::InvalidEventId`] if `event_id` is negative
    /// - [`SchedulerError::EventIdNotFound`] if no such event exists
    pub fn remove_event(&mut self, event_id: EventId) -> Result<(), SchedulerError> {
        ensure_event_id(event_id)?;
        self.evict(event_id, RemovalReason::Cancelled)
    }

    /// Move an event to `new_date`
    ///
    /// Moving an event to the date it already has is a no-op.
    ///
    /// # Errors
    /// - [`SchedulerError::InvalidDate`] if `new_date` is before the current date
    /// - [`SchedulerError::InvalidEventId`] if `event_id` is negative
    /// - [`SchedulerError::EventIdNotFound`] if no such event exists
    /// - [`SchedulerError::EventAlreadyExists`] if another event with the same
    ///   name is already on `new_date`
    pub fn change_event_date(
        &mut self,
        event_id: EventId,
        new_date: Date,
    ) -> Result<(), SchedulerError> {
        self.ensure_not_past(new_date)?;
        ensure_event_id(event_id)?;

        let identity = self
            .event(event_id)
            .map(Event::identity)
            .ok_or(SchedulerError::EventIdNotFound(event_id))?;
        let old_date = identity.date();
        if old_date == new_date {
            return Ok(());
        }
        self.ensure_slot_free(identity.name(), new_date, Some(event_id))?;

        self.events.change_priority(&identity, &old_date, new_date)?;
        if let Some(event) = self.events.find_mut(|e| e.id() == event_id) {
            event.set_date(new_date);
        }

        self.record(Activity::EventRescheduled {
            date: self.current_date,
            event_id,
            old_date,
            new_date,
        });
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Members
    // ------------------------------------------------------------------------

    /// Enroll a new member with no linked events
    ///
    /// # Errors
    /// - [`SchedulerError::InvalidMemberId`] if `member_id` is negative
    /// - [`SchedulerError::MemberIdAlreadyExists`] if `member_id` is taken
    pub fn add_member(&mut self, name: &str, member_id: MemberId) -> Result<(), SchedulerError> {
        ensure_member_id(member_id)?;
        if self.member(member_id).is_some() {
            return Err(SchedulerError::MemberIdAlreadyExists(member_id));
        }

        self.members
            .insert(Member::new(member_id, name), MemberRank::unlinked(member_id));
        self.record(Activity::MemberEnrolled {
            date: self.current_date,
            member_id,
            name: name.to_string(),
        });
        Ok(())
    }

    /// Link a member to an event and bump the member's participation
    ///
    /// # Errors
    /// - [`SchedulerError::InvalidMemberId`] / [`SchedulerError::InvalidEventId`]
    ///   for negative IDs
    /// - [`SchedulerError::EventIdNotFound`] / [`SchedulerError::MemberIdNotFound`]
    ///   for unknown IDs
    /// - [`SchedulerError::AlreadyLinked`] if the link exists
    pub fn link_member_to_event(
        &mut self,
        member_id: MemberId,
        event_id: EventId,
    ) -> Result<(), SchedulerError> {
        ensure_member_id(member_id)?;
        ensure_event_id(event_id)?;
        let linked = self
            .event(event_id)
            .map(|event| event.is_linked(member_id))
            .ok_or(SchedulerError::EventIdNotFound(event_id))?;
        let (member, rank) = self.member_binding(member_id)?;
        if linked {
            return Err(SchedulerError::AlreadyLinked {
                member_id,
                event_id,
            });
        }

        self.event_mut(event_id)?
            .link_member(member_id)
            .map_err(|_| SchedulerError::AlreadyLinked {
                member_id,
                event_id,
            })?;
        let new_rank = rank.incremented();
        self.members.change_priority(&member, &rank, new_rank)?;

        self.record(Activity::MemberLinked {
            date: self.current_date,
            member_id,
            event_id,
            event_count: new_rank.event_count(),
        });
        Ok(())
    }

    /// Unlink a member from an event and lower the member's participation
    ///
    /// # Errors
    /// - [`SchedulerError::InvalidMemberId`] / [`SchedulerError::InvalidEventId`]
    ///   for negative IDs
    /// - [`SchedulerError::EventIdNotFound`] / [`SchedulerError::MemberIdNotFound`]
    ///   for unknown IDs
    /// - [`SchedulerError::NotLinked`] if there is no such link
    pub fn unlink_member_from_event(
        &mut self,
        member_id: MemberId,
        event_id: EventId,
    ) -> Result<(), SchedulerError> {
        ensure_event_id(event_id)?;
        ensure_member_id(member_id)?;
        let linked = self
            .event(event_id)
            .map(|event| event.is_linked(member_id))
            .ok_or(SchedulerError::EventIdNotFound(event_id))?;
        let (member, rank) = self.member_binding(member_id)?;
        if !linked {
            return Err(SchedulerError::NotLinked {
                member_id,
                event_id,
            });
        }

        self.event_mut(event_id)?
            .unlink_member(member_id)
            .map_err(|_| SchedulerError::NotLinked {
                member_id,
                event_id,
            })?;
        let new_rank = rank.decremented();
        self.members.change_priority(&member, &rank, new_rank)?;

        self.record(Activity::MemberUnlinked {
            date: self.current_date,
            member_id,
            event_id,
            event_count: new_rank.event_count(),
        });
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Time
    // ------------------------------------------------------------------------

    /// Advance the current date by `days` ticks and evict every event whose
    /// date has passed
    ///
    /// # Errors
    /// - [`SchedulerError::InvalidDayCount`] when `days` is zero
    /// - [`SchedulerError::DateOutOfRange`] when the new date is not
    ///   representable; the current date stays where it was
    pub fn advance_time(&mut self, days: u32) -> Result<AdvanceResult, SchedulerError> {
        if days == 0 {
            return Err(SchedulerError::InvalidDayCount);
        }

        let from = self.current_date;
        self.current_date = from.advanced_by(days)?;
        self.record(Activity::TimeAdvanced {
            date: self.current_date,
            from,
            days,
        });

        // Eviction reshapes Events, so every round rescans from the head
        let mut expired = Vec::new();
        while let Some(event_id) = self.first_expired() {
            self.evict(event_id, RemovalReason::Expired)?;
            expired.push(event_id);
        }

        Ok(AdvanceResult {
            date: self.current_date,
            expired,
        })
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn events_count(&self) -> usize {
        self.events.len()
    }

    pub fn members_count(&self) -> usize {
        self.members.len()
    }

    /// Name of the earliest scheduled event
    pub fn next_event(&self) -> Option<&str> {
        self.events.first().map(Event::name)
    }

    pub fn event(&self, event_id: EventId) -> Option<&Event> {
        self.events.find(|e| e.id() == event_id)
    }

    pub fn member(&self, member_id: MemberId) -> Option<&Member> {
        self.members.find(|m| m.id() == member_id)
    }

    /// Number of events the member is linked to
    pub fn participation(&self, member_id: MemberId) -> Option<u32> {
        self.members
            .entries()
            .find(|(m, _)| m.id() == member_id)
            .map(|(_, rank)| rank.event_count())
    }

    /// Events in registry order (earliest first)
    pub fn events(&self) -> impl Iterator<Item = &Event> + '_ {
        self.events.iter()
    }

    /// Members with their ranks in registry order (busiest first)
    pub fn members(&self) -> impl Iterator<Item = (&Member, &MemberRank)> + '_ {
        self.members.entries()
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn ensure_not_past(&self, date: Date) -> Result<(), SchedulerError> {
        if date < self.current_date {
            return Err(SchedulerError::InvalidDate {
                date,
                current: self.current_date,
            });
        }
        Ok(())
    }

    /// Reject `(name, date)` if an event other than `except` holds it
    fn ensure_slot_free(
        &self,
        name: &str,
        date: Date,
        except: Option<EventId>,
    ) -> Result<(), SchedulerError> {
        let taken = self
            .events
            .iter()
            .any(|e| e.occupies(name, date) && Some(e.id()) != except);
        if taken {
            return Err(SchedulerError::EventAlreadyExists {
                name: name.to_string(),
                date,
            });
        }
        Ok(())
    }

    fn event_mut(&mut self, event_id: EventId) -> Result<&mut Event, SchedulerError> {
        self.events
            .find_mut(|e| e.id() == event_id)
            .ok_or(SchedulerError::EventIdNotFound(event_id))
    }

    /// Owned copy of a member's registry binding, usable as a lookup key
    fn member_binding(&self, member_id: MemberId) -> Result<(Member, MemberRank), SchedulerError> {
        self.members
            .entries()
            .find(|(m, _)| m.id() == member_id)
            .map(|(m, rank)| (m.clone(), *rank))
            .ok_or(SchedulerError::MemberIdNotFound(member_id))
    }

    fn first_expired(&self) -> Option<EventId> {
        self.events
            .iter()
            .find(|e| e.date() < self.current_date)
            .map(Event::id)
    }

    /// Release every member linked to the event, then drop the event
    fn evict(&mut self, event_id: EventId, reason: RemovalReason) -> Result<(), SchedulerError> {
        let event = self
            .event(event_id)
            .ok_or(SchedulerError::EventIdNotFound(event_id))?;
        let identity = event.identity();
        let released: Vec<MemberId> = event.member_ids().collect();

        let bindings = released
            .iter()
            .map(|&member_id| self.member_binding(member_id))
            .collect::<Result<Vec<_>, _>>()?;
        for (member, rank) in &bindings {
            self.members
                .change_priority(member, rank, rank.decremented())?;
        }
        self.events.remove_element(&identity)?;

        self.record(Activity::EventRemoved {
            date: self.current_date,
            event_id,
            name: identity.name().to_string(),
            reason,
            released_members: released,
        });
        Ok(())
    }

    fn record(&mut self, activity: Activity) {
        if self.record_activity {
            self.activity.log(activity);
        }
    }
}

fn ensure_event_id(event_id: EventId) -> Result<(), SchedulerError> {
    if event_id < 0 {
        return Err(SchedulerError::InvalidEventId(event_id));
    }
    Ok(())
}

fn ensure_member_id(member_id: MemberId) -> Result<(), SchedulerError> {
    if member_id < 0 {
        return Err(SchedulerError::InvalidMemberId(member_id));
    }
    Ok(())
}
