//! Read-only collaborator contracts the engine consumes.
//!
//! The surrounding system (persistence layer, HTTP service, test fixture)
//! implements these; the engine only reads through them. Every method returns
//! a `Result` so that a failing backend propagates as
//! [`EngineError::Store`](crate::error::EngineError) instead of panicking
//! mid-validation.
//!
//! The `find_overlapping_*` queries may pre-filter by day of week and
//! time-of-day only — validity-date filtering and self-exclusion are the
//! engine's responsibility (see [`crate::conflict`]).

use chrono::{NaiveTime, Weekday};

use crate::error::Result;
use crate::model::{
    ClassId, Room, RoomId, Slot, Student, StudentClass, StudentId, Therapist, TherapistId,
};

/// Lookup of existing slots by occupied resource.
pub trait ScheduleStore {
    /// Slots held by `therapist` on `day` whose time interval intersects
    /// `[start, end)`.
    fn find_overlapping_for_therapist(
        &self,
        therapist: TherapistId,
        day: Weekday,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<Vec<Slot>>;

    /// Slots held in `room` on `day` whose time interval intersects
    /// `[start, end)`.
    fn find_overlapping_for_room(
        &self,
        room: RoomId,
        day: Weekday,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<Vec<Slot>>;

    /// Slots explicitly listing `student` on `day` whose time interval
    /// intersects `[start, end)`.
    fn find_overlapping_for_student(
        &self,
        student: StudentId,
        day: Weekday,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<Vec<Slot>>;

    /// All slots explicitly listing `student`, for listing and clearing.
    fn find_slots_for_student(&self, student: StudentId) -> Result<Vec<Slot>>;

    /// All slots attached to `class`.
    fn find_slots_for_class(&self, class: ClassId) -> Result<Vec<Slot>>;

    /// All slots held by `therapist`.
    fn find_slots_for_therapist(&self, therapist: TherapistId) -> Result<Vec<Slot>>;
}

/// Lookup of the people, rooms and classes slots refer to.
pub trait Directory {
    fn therapist(&self, id: TherapistId) -> Result<Option<Therapist>>;

    fn room(&self, id: RoomId) -> Result<Option<Room>>;

    fn student(&self, id: StudentId) -> Result<Option<Student>>;

    fn class(&self, id: ClassId) -> Result<Option<StudentClass>>;

    /// Current roster of `class`. Queried on demand at validation time; the
    /// engine never caches membership.
    fn students_in_class(&self, class: ClassId) -> Result<Vec<Student>>;
}
