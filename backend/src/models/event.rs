//! Event model
//!
//! A scheduled event has:
//! - A caller-chosen numeric ID (unique within a scheduler)
//! - A name and a date; `(name, date)` is unique within a scheduler
//! - The IDs of the members linked to it, kept in ascending order

use crate::collections::Chain;
use crate::core::time::Date;
use crate::models::{EventId, MemberId};
use thiserror::Error;

/// Errors that can occur when editing an event's member links
#[derive(Debug, Error, PartialEq)]
pub enum EventError {
    #[error("Member {0} is already linked to this event")]
    MemberAlreadyLinked(MemberId),

    #[error("Member {0} is not linked to this event")]
    MemberNotLinked(MemberId),
}

/// A scheduled event
///
/// Two events are equal when their ID, name and date match; linked members
/// do not take part in equality.
///
/// # Example
/// ```
/// use event_manager_core::{Date, Event};
///
/// let mut event = Event::new(1, "Talk", Date::new(5, 1, 2024).unwrap());
/// event.link_member(9).unwrap();
/// event.link_member(2).unwrap();
///
/// assert_eq!(event.member_ids().collect::<Vec<_>>(), vec![2, 9]);
/// assert!(event.link_member(9).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Event {
    id: EventId,
    name: String,
    date: Date,
    member_ids: Chain<MemberId>,
}

impl Event {
    pub fn new(id: EventId, name: impl Into<String>, date: Date) -> Self {
        Self {
            id,
            name: name.into(),
            date,
            member_ids: Chain::new(),
        }
    }

    pub fn id(&self) -> EventId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date(&self) -> Date {
        self.date
    }

    /// Whether this event occupies the `(name, date)` slot
    pub fn occupies(&self, name: &str, date: Date) -> bool {
        self.name == name && self.date == date
    }

    /// Linked member IDs in ascending order
    pub fn member_ids(&self) -> impl Iterator<Item = MemberId> + '_ {
        self.member_ids.iter().copied()
    }

    pub fn is_linked(&self, member_id: MemberId) -> bool {
        self.member_ids.contains(&member_id)
    }

    pub fn linked_count(&self) -> usize {
        self.member_ids.len()
    }

    /// Link a member, keeping IDs ascending
    ///
    /// # Errors
    /// Returns [`EventError::MemberAlreadyLinked`] if the ID is already present.
    pub fn link_member(&mut self, member_id: MemberId) -> Result<(), EventError> {
        if self.is_linked(member_id) {
            return Err(EventError::MemberAlreadyLinked(member_id));
        }
        self.member_ids
            .insert_before(member_id, |existing, new| existing > new);
        Ok(())
    }

    /// Unlink a member
    ///
    /// # Errors
    /// Returns [`EventError::MemberNotLinked`] if the ID is not present.
    pub fn unlink_member(&mut self, member_id: MemberId) -> Result<(), EventError> {
        self.member_ids
            .remove_where(|id| *id == member_id)
            .map(|_| ())
            .ok_or(EventError::MemberNotLinked(member_id))
    }

    /// Copy of the event without its member links; compares equal to `self`
    pub(crate) fn identity(&self) -> Event {
        Event::new(self.id, self.name.clone(), self.date)
    }

    /// Move the event to another date
    ///
    /// The date is the event's registry priority, so only the scheduler moves
    /// it, together with the registry binding.
    pub(crate) fn set_date(&mut self, date: Date) {
        self.date = date;
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.name == other.name && self.date == other.date
    }
}

impl Eq for Event {}
