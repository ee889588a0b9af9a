//! Core data model: slots, the people and rooms they bind, and typed ids.
//!
//! Stored entities are immutable snapshots for the duration of one validation
//! call — the engine reads them and never writes them back. User input enters
//! as a [`SlotCandidate`], where every required field is optional so that a
//! missing field becomes a per-field diagnostic instead of a panic.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

id_type!(
    /// Identifier of a stored slot. Unsaved candidates have none.
    SlotId
);
id_type!(StudentId);
id_type!(TherapistId);
id_type!(RoomId);
id_type!(
    /// Identifier of a [`StudentClass`].
    ClassId
);
id_type!(AvailabilityId);

/// One recurring weekly therapy session: day + time range + validity date
/// range + the resources it occupies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub id: SlotId,
    pub title: String,
    pub therapist_id: TherapistId,
    pub room_id: RoomId,
    pub day: Weekday,
    pub start: NaiveTime,
    pub end: NaiveTime,
    /// First date (inclusive) on which the weekly occurrence is in effect.
    pub valid_from: NaiveDate,
    /// Last date (inclusive); `None` means open-ended.
    pub valid_to: Option<NaiveDate>,
    pub student_class_id: Option<ClassId>,
    pub students: BTreeSet<StudentId>,
}

impl Slot {
    /// An individual session: exactly one student attached and no class.
    pub fn is_individual(&self) -> bool {
        self.student_class_id.is_none() && self.students.len() == 1
    }

    pub fn window(&self) -> SlotWindow {
        SlotWindow {
            day: self.day,
            start: self.start,
            end: self.end,
            valid_from: self.valid_from,
            valid_to: self.valid_to,
        }
    }
}

/// A candidate slot as submitted by the caller, before validation.
///
/// Every required field is `Option` here: the validator reports each absence
/// under its own field key rather than rejecting the whole request with a
/// single opaque failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotCandidate {
    /// Present when validating an update of an existing slot; the matching
    /// stored slot is then excluded from every overlap search.
    pub id: Option<SlotId>,
    pub title: Option<String>,
    pub therapist_id: Option<TherapistId>,
    pub room_id: Option<RoomId>,
    pub day: Option<Weekday>,
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
    pub valid_from: Option<NaiveDate>,
    pub valid_to: Option<NaiveDate>,
    pub student_class_id: Option<ClassId>,
    pub students: BTreeSet<StudentId>,
}

impl SlotCandidate {
    pub fn is_individual(&self) -> bool {
        self.student_class_id.is_none() && self.students.len() == 1
    }

    /// The recurrence window, available only once day, times and the validity
    /// start are all present. Overlap and presence checks are skipped for a
    /// windowless candidate — no conflict is asserted without full data.
    pub fn window(&self) -> Option<SlotWindow> {
        Some(SlotWindow {
            day: self.day?,
            start: self.start?,
            end: self.end?,
            valid_from: self.valid_from?,
            valid_to: self.valid_to,
        })
    }
}

/// The temporal footprint of a slot: weekday, time-of-day interval
/// (half-open) and validity date range (closed, optionally open-ended).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotWindow {
    pub day: Weekday,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub valid_from: NaiveDate,
    pub valid_to: Option<NaiveDate>,
}

/// A student, read-only to the engine. Arrival and departure bound the daily
/// presence window within which all of the student's slots must fit; students
/// without recorded times are unconstrained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub first_name: String,
    pub last_name: String,
    pub arrival: Option<NaiveTime>,
    pub departure: Option<NaiveTime>,
    pub class_id: Option<ClassId>,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TherapistRole {
    Psychologist,
    SpeechTherapist,
    PhysioTherapist,
    Pedagogue,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Therapist {
    pub id: TherapistId,
    pub first_name: String,
    pub last_name: String,
    pub role: TherapistRole,
}

impl Therapist {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
}

/// School department a class belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Department {
    Dept1,
    Dept2,
    Pdp,
    Zrw,
}

/// A class of students. The roster is looked up on demand through
/// [`Directory::students_in_class`](crate::store::Directory::students_in_class),
/// never cached here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentClass {
    pub id: ClassId,
    pub name: String,
    pub department: Department,
}

/// A schedule-owning entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum EntityRef {
    Student(StudentId),
    Therapist(TherapistId),
    Class(ClassId),
}
