//! In-memory reference implementation of the collaborator traits.
//!
//! Backs the integration tests and works as a fixture for embedders that do
//! not have a persistence layer yet. The overlap queries pre-filter by day
//! and time-of-day only, exactly like the storage queries they stand in for;
//! validity-date filtering and self-exclusion stay with the engine.

use std::collections::BTreeMap;

use chrono::{NaiveTime, Weekday};

use crate::error::Result;
use crate::model::{
    ClassId, Room, RoomId, Slot, SlotId, Student, StudentClass, StudentId, Therapist, TherapistId,
};
use crate::overlap::times_overlap;
use crate::store::{Directory, ScheduleStore};

#[derive(Debug, Default)]
pub struct InMemoryStore {
    slots: BTreeMap<SlotId, Slot>,
    students: BTreeMap<StudentId, Student>,
    therapists: BTreeMap<TherapistId, Therapist>,
    rooms: BTreeMap<RoomId, Room>,
    classes: BTreeMap<ClassId, StudentClass>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_slot(&mut self, slot: Slot) {
        self.slots.insert(slot.id, slot);
    }

    pub fn add_student(&mut self, student: Student) {
        self.students.insert(student.id, student);
    }

    pub fn add_therapist(&mut self, therapist: Therapist) {
        self.therapists.insert(therapist.id, therapist);
    }

    pub fn add_room(&mut self, room: Room) {
        self.rooms.insert(room.id, room);
    }

    pub fn add_class(&mut self, class: StudentClass) {
        self.classes.insert(class.id, class);
    }

    fn matching<F>(&self, day: Weekday, start: NaiveTime, end: NaiveTime, keyed: F) -> Vec<Slot>
    where
        F: Fn(&Slot) -> bool,
    {
        self.slots
            .values()
            .filter(|slot| keyed(slot))
            .filter(|slot| slot.day == day)
            .filter(|slot| times_overlap(Some(slot.start), Some(slot.end), Some(start), Some(end)))
            .cloned()
            .collect()
    }
}

impl ScheduleStore for InMemoryStore {
    fn find_overlapping_for_therapist(
        &self,
        therapist: TherapistId,
        day: Weekday,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<Vec<Slot>> {
        Ok(self.matching(day, start, end, |slot| slot.therapist_id == therapist))
    }

    fn find_overlapping_for_room(
        &self,
        room: RoomId,
        day: Weekday,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<Vec<Slot>> {
        Ok(self.matching(day, start, end, |slot| slot.room_id == room))
    }

    fn find_overlapping_for_student(
        &self,
        student: StudentId,
        day: Weekday,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<Vec<Slot>> {
        Ok(self.matching(day, start, end, |slot| slot.students.contains(&student)))
    }

    fn find_slots_for_student(&self, student: StudentId) -> Result<Vec<Slot>> {
        Ok(self
            .slots
            .values()
            .filter(|slot| slot.students.contains(&student))
            .cloned()
            .collect())
    }

    fn find_slots_for_class(&self, class: ClassId) -> Result<Vec<Slot>> {
        Ok(self
            .slots
            .values()
            .filter(|slot| slot.student_class_id == Some(class))
            .cloned()
            .collect())
    }

    fn find_slots_for_therapist(&self, therapist: TherapistId) -> Result<Vec<Slot>> {
        Ok(self
            .slots
            .values()
            .filter(|slot| slot.therapist_id == therapist)
            .cloned()
            .collect())
    }
}

impl Directory for InMemoryStore {
    fn therapist(&self, id: TherapistId) -> Result<Option<Therapist>> {
        Ok(self.therapists.get(&id).cloned())
    }

    fn room(&self, id: RoomId) -> Result<Option<Room>> {
        Ok(self.rooms.get(&id).cloned())
    }

    fn student(&self, id: StudentId) -> Result<Option<Student>> {
        Ok(self.students.get(&id).cloned())
    }

    fn class(&self, id: ClassId) -> Result<Option<StudentClass>> {
        Ok(self.classes.get(&id).cloned())
    }

    fn students_in_class(&self, class: ClassId) -> Result<Vec<Student>> {
        Ok(self
            .students
            .values()
            .filter(|student| student.class_id == Some(class))
            .cloned()
            .collect())
    }
}
