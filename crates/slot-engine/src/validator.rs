//! One-pass slot validation: structure, references, the class-or-students
//! invariant, resource conflicts and daily presence.
//!
//! Every check runs — nothing short-circuits on the first failure. Failures
//! accumulate into a [`ValidationErrors`] map keyed by [`Field`], which is an
//! explicit value threaded through each check, so the HTTP layer can render
//! per-field feedback from one pass.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::conflict::{ConflictDetector, Resource};
use crate::error::Result;
use crate::message;
use crate::model::{
    Room, Slot, SlotCandidate, SlotId, Student, StudentClass, StudentId, Therapist,
};
use crate::presence::presence_violations;
use crate::store::{Directory, ScheduleStore};

/// The input field a diagnostic is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Title,
    Therapist,
    Room,
    StudentClass,
    Students,
    DayOfWeek,
    Time,
    Validity,
    Presence,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Therapist => "therapist",
            Field::Room => "room",
            Field::StudentClass => "student_class",
            Field::Students => "students",
            Field::DayOfWeek => "day_of_week",
            Field::Time => "time",
            Field::Validity => "validity",
            Field::Presence => "presence",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-keyed accumulator of validation failures. Serializes as a JSON
/// object mapping each field name to its messages, in stable field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, Vec<String>>,
}

impl ValidationErrors {
    pub fn push(&mut self, field: Field, message: impl Into<String>) {
        self.errors.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Messages recorded for one field, empty slice if none.
    pub fn messages(&self, field: Field) -> &[String] {
        self.errors.get(&field).map_or(&[], Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &[String])> {
        self.errors
            .iter()
            .map(|(field, messages)| (*field, messages.as_slice()))
    }

    fn into_outcome(self) -> ValidationOutcome {
        if self.is_empty() {
            ValidationOutcome::Valid
        } else {
            ValidationOutcome::Rejected(self)
        }
    }
}

/// Verdict of one validation pass. `Valid` carries no further value — the
/// caller is free to persist the candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    Rejected(ValidationErrors),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }

    pub fn errors(&self) -> Option<&ValidationErrors> {
        match self {
            ValidationOutcome::Valid => None,
            ValidationOutcome::Rejected(errors) => Some(errors),
        }
    }
}

/// Entities the candidate references, resolved once up front. Unresolved
/// references were already reported; later checks only run against what is
/// actually here.
#[derive(Default)]
struct Resolved {
    therapist: Option<Therapist>,
    room: Option<Room>,
    class: Option<StudentClass>,
    students: Vec<Student>,
    class_members: Vec<Student>,
}

/// Stateless per-call validator over the caller-supplied read interfaces.
///
/// The engine checks against a consistent snapshot of the store; guarding
/// the validate-then-write sequence against concurrent writers is the
/// caller's responsibility (transaction boundary or storage-level
/// uniqueness backstop).
pub struct SlotValidator<'a, S, D> {
    slots: &'a S,
    directory: &'a D,
}

impl<'a, S: ScheduleStore, D: Directory> SlotValidator<'a, S, D> {
    pub fn new(slots: &'a S, directory: &'a D) -> Self {
        Self { slots, directory }
    }

    /// Validate a candidate slot against all previously committed slots.
    ///
    /// `exclude` names a stored slot to ignore in every overlap search; a
    /// candidate carrying its own id (an update) is always excluded as well.
    ///
    /// # Errors
    /// Returns [`EngineError::Store`](crate::error::EngineError) only when a
    /// collaborator lookup fails; business-rule violations come back inside
    /// [`ValidationOutcome::Rejected`].
    pub fn validate(
        &self,
        candidate: &SlotCandidate,
        exclude: Option<SlotId>,
    ) -> Result<ValidationOutcome> {
        let mut errors = ValidationErrors::default();

        check_structure(candidate, &mut errors);
        check_assignment(candidate, &mut errors);
        let resolved = self.resolve_references(candidate, &mut errors)?;

        let exclude = exclude.or(candidate.id);
        self.check_conflicts(candidate, &resolved, exclude, &mut errors)?;
        self.check_presence(candidate, &resolved, &mut errors);

        Ok(errors.into_outcome())
    }

    /// Look up everything the candidate points at, recording a field error
    /// for each reference that does not resolve.
    fn resolve_references(
        &self,
        candidate: &SlotCandidate,
        errors: &mut ValidationErrors,
    ) -> Result<Resolved> {
        let mut resolved = Resolved::default();

        if let Some(id) = candidate.therapist_id {
            match self.directory.therapist(id)? {
                Some(therapist) => resolved.therapist = Some(therapist),
                None => errors.push(Field::Therapist, "therapist not found"),
            }
        }

        if let Some(id) = candidate.room_id {
            match self.directory.room(id)? {
                Some(room) => resolved.room = Some(room),
                None => errors.push(Field::Room, "room not found"),
            }
        }

        if let Some(id) = candidate.student_class_id {
            match self.directory.class(id)? {
                Some(class) => {
                    resolved.class_members = self.directory.students_in_class(class.id)?;
                    resolved.class = Some(class);
                }
                None => errors.push(Field::StudentClass, "class not found"),
            }
        }

        for &id in &candidate.students {
            match self.directory.student(id)? {
                Some(student) => resolved.students.push(student),
                None => errors.push(Field::Students, format!("student {id} not found")),
            }
        }

        Ok(resolved)
    }

    /// Therapist, room and student double-booking checks. Skipped entirely
    /// when the candidate has no complete recurrence window — the missing
    /// fields are already in the map and no conflict is asserted without
    /// full data.
    fn check_conflicts(
        &self,
        candidate: &SlotCandidate,
        resolved: &Resolved,
        exclude: Option<SlotId>,
        errors: &mut ValidationErrors,
    ) -> Result<()> {
        let Some(window) = candidate.window() else {
            return Ok(());
        };
        let detector = ConflictDetector::new(self.slots);

        if let Some(therapist) = &resolved.therapist {
            let conflicts =
                detector.conflicts_for(Resource::Therapist(therapist.id), &window, exclude)?;
            if !conflicts.is_empty() {
                let described = self.describe_all(&conflicts)?;
                errors.push(
                    Field::Therapist,
                    message::therapist_conflict(therapist, &described),
                );
            }
        }

        if let Some(room) = &resolved.room {
            let conflicts = detector.conflicts_for(Resource::Room(room.id), &window, exclude)?;
            if !conflicts.is_empty() {
                let described = self.describe_all(&conflicts)?;
                errors.push(Field::Room, message::room_conflict(room, &described));
            }
        }

        for student in &resolved.students {
            let conflicts =
                detector.conflicts_for(Resource::Student(student.id), &window, exclude)?;
            if !conflicts.is_empty() {
                let described = self.describe_all(&conflicts)?;
                errors.push(
                    Field::Students,
                    message::student_conflict(student, &described),
                );
            }
        }

        // Class members run through the same search, reported under the
        // class field so the caller can tell membership conflicts from
        // direct-assignment ones.
        if let Some(class) = &resolved.class {
            for member in &resolved.class_members {
                let conflicts =
                    detector.conflicts_for(Resource::Student(member.id), &window, exclude)?;
                if !conflicts.is_empty() {
                    errors.push(
                        Field::StudentClass,
                        message::class_member_conflict(member, class),
                    );
                }
            }
        }

        Ok(())
    }

    /// Presence-window check over every affected student: the explicit set
    /// plus the attached class's current roster, deduplicated by id.
    fn check_presence(
        &self,
        candidate: &SlotCandidate,
        resolved: &Resolved,
        errors: &mut ValidationErrors,
    ) {
        let (Some(start), Some(end)) = (candidate.start, candidate.end) else {
            return;
        };

        let mut affected: BTreeMap<StudentId, &Student> = BTreeMap::new();
        for student in resolved.class_members.iter().chain(&resolved.students) {
            affected.insert(student.id, student);
        }

        for violation in presence_violations(affected.into_values(), start, end) {
            errors.push(Field::Presence, message::presence_conflict(&violation));
        }
    }

    fn describe_all(&self, conflicts: &[Slot]) -> Result<Vec<String>> {
        conflicts
            .iter()
            .map(|slot| {
                let therapist = self.directory.therapist(slot.therapist_id)?;
                let room = self.directory.room(slot.room_id)?;
                Ok(message::describe_slot(
                    slot,
                    therapist.as_ref(),
                    room.as_ref(),
                ))
            })
            .collect()
    }
}

fn check_structure(candidate: &SlotCandidate, errors: &mut ValidationErrors) {
    if candidate
        .title
        .as_deref()
        .is_none_or(|title| title.trim().is_empty())
    {
        errors.push(Field::Title, "title must not be blank");
    }
    if candidate.therapist_id.is_none() {
        errors.push(Field::Therapist, "therapist is required");
    }
    if candidate.room_id.is_none() {
        errors.push(Field::Room, "room is required");
    }
    if candidate.day.is_none() {
        errors.push(Field::DayOfWeek, "day of week is required");
    }

    if candidate.start.is_none() {
        errors.push(Field::Time, "start time is required");
    }
    if candidate.end.is_none() {
        errors.push(Field::Time, "end time is required");
    }
    if let (Some(start), Some(end)) = (candidate.start, candidate.end) {
        if start >= end {
            errors.push(Field::Time, "start time must be before end time");
        }
    }

    match (candidate.valid_from, candidate.valid_to) {
        (None, _) => errors.push(Field::Validity, "valid-from date is required"),
        (Some(from), Some(to)) if to < from => {
            errors.push(Field::Validity, "valid-to date must not precede valid-from date");
        }
        _ => {}
    }
}

fn check_assignment(candidate: &SlotCandidate, errors: &mut ValidationErrors) {
    if candidate.student_class_id.is_none() && candidate.students.is_empty() {
        errors.push(
            Field::Students,
            "slot must be assigned a class or at least one student",
        );
    }
}
