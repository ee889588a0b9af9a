//! Per-resource conflict search against previously committed slots.
//!
//! The store query pre-filters by day of week and time-of-day; the detector
//! owns the rest: dropping the slot being updated and re-checking the full
//! window overlap (including validity dates) with [`windows_overlap`]. Hits
//! are filtered from immutable snapshots — the detector reports, never
//! mutates.

use crate::error::Result;
use crate::model::{RoomId, Slot, SlotId, SlotWindow, StudentId, TherapistId};
use crate::overlap::windows_overlap;
use crate::store::ScheduleStore;

/// The resource a conflict search is keyed by. Closed set; the detector
/// matches exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Therapist(TherapistId),
    Room(RoomId),
    Student(StudentId),
}

pub struct ConflictDetector<'a, S: ScheduleStore> {
    store: &'a S,
}

impl<'a, S: ScheduleStore> ConflictDetector<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Existing slots that collide with `window` on the given resource,
    /// excluding the slot identified by `exclude` (the candidate itself when
    /// validating an update).
    pub fn conflicts_for(
        &self,
        resource: Resource,
        window: &SlotWindow,
        exclude: Option<SlotId>,
    ) -> Result<Vec<Slot>> {
        let hits = match resource {
            Resource::Therapist(id) => self
                .store
                .find_overlapping_for_therapist(id, window.day, window.start, window.end)?,
            Resource::Room(id) => self
                .store
                .find_overlapping_for_room(id, window.day, window.start, window.end)?,
            Resource::Student(id) => self
                .store
                .find_overlapping_for_student(id, window.day, window.start, window.end)?,
        };

        Ok(hits
            .into_iter()
            .filter(|slot| exclude != Some(slot.id))
            .filter(|slot| windows_overlap(window, &slot.window()))
            .collect())
    }
}
