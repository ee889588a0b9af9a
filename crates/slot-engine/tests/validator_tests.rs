//! End-to-end validation tests over the in-memory store.

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveTime, Weekday};
use slot_engine::model::{
    ClassId, Department, Room, RoomId, Slot, SlotCandidate, SlotId, Student, StudentClass,
    StudentId, Therapist, TherapistId, TherapistRole,
};
use slot_engine::{EngineError, Field, InMemoryStore, SlotValidator, ValidationOutcome};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn t(hour: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, 0).unwrap()
}

fn d(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Therapists 1-2, rooms 1-2, class 1 with students 11-12, free student 21.
/// Student 11 and 21 are present 08:00-14:00; student 12 has no recorded
/// times.
fn fixture() -> InMemoryStore {
    let mut store = InMemoryStore::new();
    store.add_therapist(Therapist {
        id: TherapistId(1),
        first_name: "Anna".to_string(),
        last_name: "Nowak".to_string(),
        role: TherapistRole::Psychologist,
    });
    store.add_therapist(Therapist {
        id: TherapistId(2),
        first_name: "Piotr".to_string(),
        last_name: "Wisniewski".to_string(),
        role: TherapistRole::SpeechTherapist,
    });
    store.add_room(Room {
        id: RoomId(1),
        name: "12A".to_string(),
    });
    store.add_room(Room {
        id: RoomId(2),
        name: "Gym".to_string(),
    });
    store.add_class(StudentClass {
        id: ClassId(1),
        name: "1A".to_string(),
        department: Department::Dept1,
    });
    store.add_student(Student {
        id: StudentId(11),
        first_name: "Maria".to_string(),
        last_name: "Kowalska".to_string(),
        arrival: Some(t(8, 0)),
        departure: Some(t(14, 0)),
        class_id: Some(ClassId(1)),
    });
    store.add_student(Student {
        id: StudentId(12),
        first_name: "Tomasz".to_string(),
        last_name: "Zielinski".to_string(),
        arrival: None,
        departure: None,
        class_id: Some(ClassId(1)),
    });
    store.add_student(Student {
        id: StudentId(21),
        first_name: "Ewa".to_string(),
        last_name: "Mazur".to_string(),
        arrival: Some(t(8, 0)),
        departure: Some(t(14, 0)),
        class_id: None,
    });
    store
}

/// Monday 09:30-10:30, March 2025, therapist 1 in room 1 with student 21.
fn candidate() -> SlotCandidate {
    SlotCandidate {
        id: None,
        title: Some("sensory integration".to_string()),
        therapist_id: Some(TherapistId(1)),
        room_id: Some(RoomId(1)),
        day: Some(Weekday::Mon),
        start: Some(t(9, 30)),
        end: Some(t(10, 30)),
        valid_from: Some(d(2025, 3, 1)),
        valid_to: Some(d(2025, 3, 31)),
        student_class_id: None,
        students: BTreeSet::from([StudentId(21)]),
    }
}

fn stored_slot(id: i64, therapist: i64, room: i64, students: &[i64]) -> Slot {
    Slot {
        id: SlotId(id),
        title: "existing session".to_string(),
        therapist_id: TherapistId(therapist),
        room_id: RoomId(room),
        day: Weekday::Mon,
        start: t(9, 0),
        end: t(10, 0),
        valid_from: d(2025, 1, 1),
        valid_to: Some(d(2025, 6, 30)),
        student_class_id: None,
        students: students.iter().map(|&id| StudentId(id)).collect(),
    }
}

fn validate(store: &InMemoryStore, candidate: &SlotCandidate) -> ValidationOutcome {
    SlotValidator::new(store, store).validate(candidate, None).unwrap()
}

// ── Happy path ──────────────────────────────────────────────────────────────

#[test]
fn clean_candidate_is_valid() {
    let store = fixture();
    let outcome = validate(&store, &candidate());
    assert_eq!(outcome, ValidationOutcome::Valid);
}

#[test]
fn individual_flag_is_derived_from_the_student_set() {
    let c = candidate();
    assert!(c.is_individual(), "one student, no class");

    let mut with_class = candidate();
    with_class.student_class_id = Some(ClassId(1));
    assert!(!with_class.is_individual());

    let mut two_students = candidate();
    two_students.students = BTreeSet::from([StudentId(11), StudentId(21)]);
    assert!(!two_students.is_individual());
}

#[test]
fn validation_is_idempotent_against_an_unchanged_store() {
    let mut store = fixture();
    store.add_slot(stored_slot(1, 1, 2, &[22]));

    let first = validate(&store, &candidate());
    let second = validate(&store, &candidate());
    assert_eq!(first, second);
}

// ── Resource conflicts ──────────────────────────────────────────────────────

#[test]
fn therapist_double_booking_is_rejected() {
    // Therapist 1 already holds Monday 09:00-10:00 for Jan-Jun 2025; the
    // candidate overlaps it on time and validity.
    let mut store = fixture();
    store.add_slot(stored_slot(1, 1, 2, &[22]));

    let outcome = validate(&store, &candidate());
    let errors = outcome.errors().expect("should be rejected");

    assert_eq!(errors.messages(Field::Therapist).len(), 1);
    let message = &errors.messages(Field::Therapist)[0];
    assert!(message.contains("Anna Nowak"), "unexpected message: {message}");
    assert!(message.contains("Monday 09:00-10:00"), "unexpected message: {message}");
    assert!(errors.messages(Field::Room).is_empty());
    assert!(errors.messages(Field::Students).is_empty());
}

#[test]
fn same_times_on_another_day_are_accepted() {
    let mut store = fixture();
    store.add_slot(stored_slot(1, 1, 2, &[22]));

    let mut c = candidate();
    c.day = Some(Weekday::Tue);
    assert!(validate(&store, &c).is_valid());
}

#[test]
fn disjoint_validity_period_is_accepted() {
    let mut store = fixture();
    store.add_slot(stored_slot(1, 1, 2, &[22]));

    let mut c = candidate();
    c.valid_from = Some(d(2025, 7, 1));
    c.valid_to = Some(d(2025, 7, 31));
    assert!(validate(&store, &c).is_valid());
}

#[test]
fn room_conflict_is_reported_under_the_room_field() {
    let mut store = fixture();
    store.add_slot(stored_slot(1, 2, 1, &[22]));

    let outcome = validate(&store, &candidate());
    let errors = outcome.errors().expect("should be rejected");

    assert_eq!(errors.messages(Field::Room).len(), 1);
    assert!(errors.messages(Field::Room)[0].contains("'12A' is occupied"));
    assert!(errors.messages(Field::Therapist).is_empty());
}

#[test]
fn explicit_student_conflict_is_reported_under_students() {
    let mut store = fixture();
    store.add_slot(stored_slot(1, 2, 2, &[21]));

    let outcome = validate(&store, &candidate());
    let errors = outcome.errors().expect("should be rejected");

    assert_eq!(errors.messages(Field::Students).len(), 1);
    assert!(errors.messages(Field::Students)[0].contains("Ewa Mazur"));
}

#[test]
fn class_member_conflict_is_reported_under_the_class_field() {
    // Student 11 (a member of class 1) is explicitly booked elsewhere on
    // Monday morning; a class slot for 1A must flag them.
    let mut store = fixture();
    store.add_slot(stored_slot(1, 2, 2, &[11]));

    let mut c = candidate();
    c.students = BTreeSet::new();
    c.student_class_id = Some(ClassId(1));

    let outcome = validate(&store, &c);
    let errors = outcome.errors().expect("should be rejected");

    assert_eq!(errors.messages(Field::StudentClass).len(), 1);
    let message = &errors.messages(Field::StudentClass)[0];
    assert!(message.contains("Maria Kowalska"), "unexpected message: {message}");
    assert!(message.contains("of class '1A'"), "unexpected message: {message}");
    assert!(errors.messages(Field::Students).is_empty());
}

#[test]
fn updating_a_slot_with_unchanged_times_is_valid() {
    let mut store = fixture();
    store.add_slot(Slot {
        id: SlotId(5),
        title: "sensory integration".to_string(),
        therapist_id: TherapistId(1),
        room_id: RoomId(1),
        day: Weekday::Mon,
        start: t(9, 30),
        end: t(10, 30),
        valid_from: d(2025, 3, 1),
        valid_to: Some(d(2025, 3, 31)),
        student_class_id: None,
        students: BTreeSet::from([StudentId(21)]),
    });

    // Via the candidate's own id...
    let mut c = candidate();
    c.id = Some(SlotId(5));
    assert!(validate(&store, &c).is_valid());

    // ...and via the explicit exclusion argument.
    let outcome = SlotValidator::new(&store, &store)
        .validate(&candidate(), Some(SlotId(5)))
        .unwrap();
    assert!(outcome.is_valid());
}

// ── Presence ────────────────────────────────────────────────────────────────

#[test]
fn slot_past_departure_is_rejected_with_a_presence_error() {
    let store = fixture();
    let mut c = candidate();
    c.start = Some(t(13, 30));
    c.end = Some(t(14, 30));

    let outcome = validate(&store, &c);
    let errors = outcome.errors().expect("should be rejected");

    assert_eq!(errors.messages(Field::Presence).len(), 1);
    let message = &errors.messages(Field::Presence)[0];
    assert!(message.contains("Ewa Mazur"), "unexpected message: {message}");
    assert!(message.contains("08:00 - 14:00"), "unexpected message: {message}");
}

#[test]
fn presence_boundaries_are_admissible() {
    let store = fixture();
    let mut c = candidate();
    c.start = Some(t(8, 0));
    c.end = Some(t(14, 0));
    assert!(validate(&store, &c).is_valid());
}

#[test]
fn class_and_explicit_listing_dedupe_presence_but_not_conflicts() {
    // Student 11 attends both explicitly and through class 1A, and is booked
    // elsewhere at the same time. The double booking is reported through both
    // paths; the presence violation only once.
    let mut store = fixture();
    store.add_slot(Slot {
        id: SlotId(1),
        title: "existing session".to_string(),
        therapist_id: TherapistId(2),
        room_id: RoomId(2),
        day: Weekday::Mon,
        start: t(13, 0),
        end: t(14, 0),
        valid_from: d(2025, 1, 1),
        valid_to: Some(d(2025, 6, 30)),
        student_class_id: None,
        students: BTreeSet::from([StudentId(11)]),
    });

    let mut c = candidate();
    c.start = Some(t(13, 30));
    c.end = Some(t(14, 30));
    c.student_class_id = Some(ClassId(1));
    c.students = BTreeSet::from([StudentId(11)]);

    let outcome = validate(&store, &c);
    let errors = outcome.errors().expect("should be rejected");

    assert_eq!(errors.messages(Field::Students).len(), 1);
    assert_eq!(errors.messages(Field::StudentClass).len(), 1);
    assert_eq!(
        errors.messages(Field::Presence).len(),
        1,
        "one presence message even though the student is affected twice"
    );
}

// ── Structural and reference errors ─────────────────────────────────────────

#[test]
fn slot_without_class_or_students_is_rejected() {
    let store = fixture();
    let mut c = candidate();
    c.students = BTreeSet::new();

    let outcome = validate(&store, &c);
    let errors = outcome.errors().expect("should be rejected");
    assert_eq!(
        errors.messages(Field::Students),
        ["slot must be assigned a class or at least one student"]
    );
}

#[test]
fn inverted_validity_range_is_rejected() {
    let store = fixture();
    let mut c = candidate();
    c.valid_from = Some(d(2025, 4, 1));
    c.valid_to = Some(d(2025, 3, 1));

    let outcome = validate(&store, &c);
    let errors = outcome.errors().expect("should be rejected");
    assert_eq!(
        errors.messages(Field::Validity),
        ["valid-to date must not precede valid-from date"]
    );
}

#[test]
fn inverted_or_empty_time_range_is_rejected() {
    let store = fixture();

    let mut c = candidate();
    c.start = Some(t(11, 0));
    c.end = Some(t(10, 0));
    let outcome = validate(&store, &c);
    assert_eq!(
        outcome.errors().unwrap().messages(Field::Time),
        ["start time must be before end time"]
    );

    let mut c = candidate();
    c.start = Some(t(10, 0));
    c.end = Some(t(10, 0));
    assert!(!validate(&store, &c).is_valid(), "zero-length slot must be rejected");
}

#[test]
fn empty_candidate_reports_every_missing_field() {
    let store = fixture();
    let outcome = validate(&store, &SlotCandidate::default());
    let errors = outcome.errors().expect("should be rejected");

    assert_eq!(errors.messages(Field::Title), ["title must not be blank"]);
    assert_eq!(errors.messages(Field::Therapist), ["therapist is required"]);
    assert_eq!(errors.messages(Field::Room), ["room is required"]);
    assert_eq!(errors.messages(Field::DayOfWeek), ["day of week is required"]);
    assert_eq!(
        errors.messages(Field::Time),
        ["start time is required", "end time is required"]
    );
    assert_eq!(errors.messages(Field::Validity), ["valid-from date is required"]);
    assert_eq!(
        errors.messages(Field::Students),
        ["slot must be assigned a class or at least one student"]
    );
    // No window, no lookups: conflict and presence checks stay silent.
    assert!(errors.messages(Field::Presence).is_empty());
}

#[test]
fn unresolved_references_become_field_errors() {
    let store = fixture();
    let c = SlotCandidate {
        title: Some("group play".to_string()),
        therapist_id: Some(TherapistId(99)),
        room_id: Some(RoomId(99)),
        day: Some(Weekday::Wed),
        start: Some(t(9, 0)),
        end: Some(t(10, 0)),
        valid_from: Some(d(2025, 3, 1)),
        student_class_id: Some(ClassId(99)),
        students: BTreeSet::from([StudentId(99)]),
        ..SlotCandidate::default()
    };

    let outcome = validate(&store, &c);
    let errors = outcome.errors().expect("should be rejected");

    assert_eq!(errors.messages(Field::Therapist), ["therapist not found"]);
    assert_eq!(errors.messages(Field::Room), ["room not found"]);
    assert_eq!(errors.messages(Field::StudentClass), ["class not found"]);
    assert_eq!(errors.messages(Field::Students), ["student 99 not found"]);
}

#[test]
fn failures_accumulate_across_every_check() {
    // Blank title, double-booked therapist and a presence violation must all
    // surface from the same pass.
    let mut store = fixture();
    store.add_slot(Slot {
        id: SlotId(1),
        title: "existing session".to_string(),
        therapist_id: TherapistId(1),
        room_id: RoomId(2),
        day: Weekday::Mon,
        start: t(13, 0),
        end: t(14, 0),
        valid_from: d(2025, 1, 1),
        valid_to: Some(d(2025, 6, 30)),
        student_class_id: None,
        students: BTreeSet::from([StudentId(12)]),
    });

    let mut c = candidate();
    c.title = Some("   ".to_string());
    c.start = Some(t(13, 30));
    c.end = Some(t(14, 30));

    let outcome = validate(&store, &c);
    let errors = outcome.errors().expect("should be rejected");

    assert!(!errors.messages(Field::Title).is_empty());
    assert!(!errors.messages(Field::Therapist).is_empty());
    assert!(!errors.messages(Field::Presence).is_empty());
}

// ── Wire shape ──────────────────────────────────────────────────────────────

#[test]
fn errors_serialize_as_a_field_keyed_object() {
    let store = fixture();
    let mut c = candidate();
    c.students = BTreeSet::new();
    c.valid_from = Some(d(2025, 4, 1));
    c.valid_to = Some(d(2025, 3, 1));

    let outcome = validate(&store, &c);
    let errors = outcome.errors().expect("should be rejected");

    assert_eq!(
        serde_json::to_value(errors).unwrap(),
        serde_json::json!({
            "students": ["slot must be assigned a class or at least one student"],
            "validity": ["valid-to date must not precede valid-from date"],
        })
    );
}

// ── Infrastructure failures ─────────────────────────────────────────────────

struct FailingDirectory;

impl slot_engine::Directory for FailingDirectory {
    fn therapist(&self, _: TherapistId) -> slot_engine::Result<Option<Therapist>> {
        Err(EngineError::Store(anyhow::anyhow!("connection reset")))
    }
    fn room(&self, _: RoomId) -> slot_engine::Result<Option<Room>> {
        Err(EngineError::Store(anyhow::anyhow!("connection reset")))
    }
    fn student(&self, _: StudentId) -> slot_engine::Result<Option<Student>> {
        Err(EngineError::Store(anyhow::anyhow!("connection reset")))
    }
    fn class(&self, _: ClassId) -> slot_engine::Result<Option<StudentClass>> {
        Err(EngineError::Store(anyhow::anyhow!("connection reset")))
    }
    fn students_in_class(&self, _: ClassId) -> slot_engine::Result<Vec<Student>> {
        Err(EngineError::Store(anyhow::anyhow!("connection reset")))
    }
}

#[test]
fn collaborator_failure_propagates_as_an_engine_error() {
    let slots = InMemoryStore::new();
    let directory = FailingDirectory;
    let result = SlotValidator::new(&slots, &directory).validate(&candidate(), None);

    assert!(matches!(result, Err(EngineError::Store(_))));
}
