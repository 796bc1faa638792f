//! Plain-text reports
//!
//! Both writers format state the scheduler already holds, in registry order,
//! into any [`io::Write`] sink.

use crate::scheduler::engine::EventScheduler;
use std::io::{self, Write};

/// Write one line per event: `name,day.month.year` followed by
/// `,memberName` for every linked member, lowest member ID first
///
/// # Example
///
/// ```rust
/// use event_manager_core::{write_events_report, Date, EventScheduler};
///
/// let mut scheduler = EventScheduler::starting_at(Date::new(1, 1, 2024).unwrap());
/// scheduler.add_event_by_date("Talk", Date::new(5, 1, 2024).unwrap(), 1).unwrap();
/// scheduler.add_member("Ann", 7).unwrap();
/// scheduler.link_member_to_event(7, 1).unwrap();
///
/// let mut out = Vec::new();
/// write_events_report(&scheduler, &mut out).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "Talk,5.1.2024,Ann\n");
/// ```
pub fn write_events_report<W: Write>(scheduler: &EventScheduler, out: &mut W) -> io::Result<()> {
    for event in scheduler.events() {
        write!(out, "{},{}", event.name(), event.date())?;
        for member_id in event.member_ids() {
            // Linked IDs always resolve; skip rather than fail if one ever doesn't
            if let Some(member) = scheduler.member(member_id) {
                write!(out, ",{}", member.name())?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Write one line per member, `name,participationCount`, stopping at the
/// first member that takes part in nothing
pub fn write_contributors_report<W: Write>(
    scheduler: &EventScheduler,
    out: &mut W,
) -> io::Result<()> {
    for (member, rank) in scheduler.members() {
        if rank.event_count() == 0 {
            break;
        }
        writeln!(out, "{},{}", member.name(), rank.event_count())?;
    }
    Ok(())
}
