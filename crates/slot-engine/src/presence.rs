//! Daily presence check: a session must fit inside every affected student's
//! arrival-to-departure window.

use chrono::NaiveTime;

use crate::model::Student;

/// A slot window escaping one student's recorded presence window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceViolation {
    pub student: Student,
}

/// Check `[start, end)` against each student's presence window and collect
/// every violation — not just the first.
///
/// Students missing either an arrival or a departure time carry no
/// constraint and are skipped. The boundaries themselves are admissible:
/// a slot starting at the arrival minute or ending at the departure minute
/// still fits.
pub fn presence_violations<'a, I>(students: I, start: NaiveTime, end: NaiveTime) -> Vec<PresenceViolation>
where
    I: IntoIterator<Item = &'a Student>,
{
    students
        .into_iter()
        .filter(|student| match (student.arrival, student.departure) {
            (Some(arrival), Some(departure)) => start < arrival || end > departure,
            _ => false,
        })
        .map(|student| PresenceViolation {
            student: student.clone(),
        })
        .collect()
}
