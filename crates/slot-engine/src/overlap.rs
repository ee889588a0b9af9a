//! Interval overlap predicates — the single family every conflict check
//! reduces to.
//!
//! Time-of-day intervals are half-open: adjacent slots (one ends exactly when
//! another starts) do NOT overlap. Validity date ranges are closed on both
//! ends, with a missing end date meaning open-ended.

use chrono::{NaiveDate, NaiveTime};

use crate::model::{Slot, SlotWindow};

/// True iff `[start_a, end_a)` and `[start_b, end_b)` intersect.
///
/// Two intervals overlap iff `start_a < end_b && end_a > start_b`; this
/// excludes the adjacent case where one ends exactly when the other starts.
/// Any missing bound yields `false` — no overlap is asserted without full
/// data.
pub fn times_overlap(
    start_a: Option<NaiveTime>,
    end_a: Option<NaiveTime>,
    start_b: Option<NaiveTime>,
    end_b: Option<NaiveTime>,
) -> bool {
    match (start_a, end_a, start_b, end_b) {
        (Some(sa), Some(ea), Some(sb), Some(eb)) => sa < eb && ea > sb,
        _ => false,
    }
}

/// True iff the closed date ranges `from_a..=to_a` and `from_b..=to_b`
/// intersect. A missing `to` is treated as unbounded. Two ranges overlap iff
/// neither ends strictly before the other starts, so ranges that share a
/// single day DO overlap.
pub fn date_ranges_overlap(
    from_a: NaiveDate,
    to_a: Option<NaiveDate>,
    from_b: NaiveDate,
    to_b: Option<NaiveDate>,
) -> bool {
    let a_ends_before_b = to_a.is_some_and(|to| to < from_b);
    let b_ends_before_a = to_b.is_some_and(|to| to < from_a);
    !a_ends_before_b && !b_ends_before_a
}

/// True iff two recurrence windows collide: same weekday, overlapping
/// validity date ranges, and overlapping time-of-day intervals.
pub fn windows_overlap(a: &SlotWindow, b: &SlotWindow) -> bool {
    a.day == b.day
        && date_ranges_overlap(a.valid_from, a.valid_to, b.valid_from, b.valid_to)
        && times_overlap(Some(a.start), Some(a.end), Some(b.start), Some(b.end))
}

/// True iff two stored slots would ever occupy the same moment.
pub fn slots_overlap(a: &Slot, b: &Slot) -> bool {
    windows_overlap(&a.window(), &b.window())
}
