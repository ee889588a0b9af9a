//! Human-readable diagnostics rendered from raw conflict sets.
//!
//! Everything here is presentation: the validator hands over resolved
//! entities and described slots, this module turns them into strings the
//! HTTP layer can show per field.

use chrono::{NaiveTime, Weekday};

use crate::model::{Room, Slot, Student, StudentClass, Therapist};
use crate::presence::PresenceViolation;

const TIME_FORMAT: &str = "%H:%M";

pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn fmt_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// One-line description of a stored slot, with therapist and room resolved
/// by the caller. Unresolvable references render as "unknown" rather than
/// failing the whole diagnostic.
pub fn describe_slot(slot: &Slot, therapist: Option<&Therapist>, room: Option<&Room>) -> String {
    format!(
        "[{} {}-{}, therapist: {}, room: {}]",
        day_name(slot.day),
        fmt_time(slot.start),
        fmt_time(slot.end),
        therapist.map_or_else(|| "unknown".to_string(), Therapist::full_name),
        room.map_or("unknown", |r| r.name.as_str()),
    )
}

pub fn therapist_conflict(therapist: &Therapist, described: &[String]) -> String {
    format!(
        "therapist '{}' already has overlapping slots: {}",
        therapist.full_name(),
        described.join("; "),
    )
}

pub fn room_conflict(room: &Room, described: &[String]) -> String {
    format!(
        "room '{}' is occupied at that time: {}",
        room.name,
        described.join("; "),
    )
}

pub fn student_conflict(student: &Student, described: &[String]) -> String {
    format!(
        "student '{}' already has overlapping slots: {}",
        student.full_name(),
        described.join("; "),
    )
}

/// Conflict stemming from class membership rather than direct assignment —
/// same semantics as [`student_conflict`], reported distinctly so the caller
/// can tell the two apart.
pub fn class_member_conflict(student: &Student, class: &StudentClass) -> String {
    format!(
        "student '{}' of class '{}' has a schedule conflict",
        student.full_name(),
        class.name,
    )
}

pub fn presence_conflict(violation: &PresenceViolation) -> String {
    let student = &violation.student;
    let window = match (student.arrival, student.departure) {
        (Some(arrival), Some(departure)) => {
            format!(" ({} - {})", fmt_time(arrival), fmt_time(departure))
        }
        _ => String::new(),
    };
    format!(
        "slot time falls outside the daily presence of student '{}'{}",
        student.full_name(),
        window,
    )
}
