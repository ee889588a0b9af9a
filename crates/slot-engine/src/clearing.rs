//! Plan the removal of an entity from the schedule.
//!
//! The decision logic is pure: given the target and the slots currently
//! referencing it, produce the actions the storage layer should apply. The
//! engine never deletes or detaches anything itself.

use crate::model::{EntityRef, Slot, SlotId, StudentId};

/// One storage action in a clear plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearAction {
    /// Remove the slot entirely.
    Delete(SlotId),
    /// Remove one student from the slot's explicit set, keeping the slot.
    Detach { slot: SlotId, student: StudentId },
}

/// Decide what clearing `target` means for each of its `slots` (as returned
/// by the matching `find_slots_for_*` query).
///
/// Therapist and class targets lose every slot. A student target deletes a
/// slot only where the student is its sole attendee; class-held slots are
/// left alone (the student attends through the class, not the explicit
/// set); anywhere else the student is detached and the slot survives.
pub fn clear_plan(target: EntityRef, slots: &[Slot]) -> Vec<ClearAction> {
    match target {
        EntityRef::Therapist(_) | EntityRef::Class(_) => {
            slots.iter().map(|slot| ClearAction::Delete(slot.id)).collect()
        }
        EntityRef::Student(student) => slots
            .iter()
            .filter(|slot| slot.students.contains(&student))
            .filter_map(|slot| {
                if slot.students.len() == 1 {
                    Some(ClearAction::Delete(slot.id))
                } else if slot.student_class_id.is_some() {
                    None
                } else {
                    Some(ClearAction::Detach {
                        slot: slot.id,
                        student,
                    })
                }
            })
            .collect(),
    }
}
