//! Weekly availability windows declared per student, therapist or class.
//!
//! A new or edited window must not overlap another window of the same owner
//! on the same day. All functions work over immutable snapshots handed in by
//! the caller; nothing here queries or mutates storage.

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::model::{AvailabilityId, EntityRef, Student};
use crate::overlap::times_overlap;

/// One recurring weekly availability window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub id: AvailabilityId,
    pub owner: EntityRef,
    pub day: Weekday,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// First existing window the candidate collides with: same owner, same day,
/// overlapping times. `exclude` drops the window being updated from the
/// search.
pub fn availability_conflict<'a>(
    existing: &'a [Availability],
    candidate: &Availability,
    exclude: Option<AvailabilityId>,
) -> Option<&'a Availability> {
    existing
        .iter()
        .filter(|window| exclude != Some(window.id))
        .filter(|window| window.owner == candidate.owner)
        .filter(|window| window.day == candidate.day)
        .find(|window| {
            times_overlap(
                Some(window.start),
                Some(window.end),
                Some(candidate.start),
                Some(candidate.end),
            )
        })
}

/// Clamp a student's availability windows to their recorded daily presence:
/// a window starting before arrival starts at arrival, one ending after
/// departure ends at departure. Students without recorded times are returned
/// unchanged. Returns new windows; the input snapshots are not touched.
pub fn clip_to_presence(windows: Vec<Availability>, student: &Student) -> Vec<Availability> {
    let (Some(arrival), Some(departure)) = (student.arrival, student.departure) else {
        return windows;
    };

    windows
        .into_iter()
        .map(|mut window| {
            if window.start < arrival {
                window.start = arrival;
            }
            if window.end > departure {
                window.end = departure;
            }
            window
        })
        .collect()
}
