//! # slot-engine
//!
//! Conflict validation for recurring weekly therapy schedule slots.
//!
//! A slot binds a therapist, a room and either an explicit set of students
//! or a whole class to one weekly time window over a bounded validity
//! period. Given a candidate slot, the engine decides whether it can legally
//! coexist with all previously committed slots — therapist, room and student
//! exclusivity plus each student's daily presence window — and reports every
//! failure at once in a field-keyed map.
//!
//! The engine is stateless and read-only: it consumes the
//! [`ScheduleStore`]/[`Directory`] lookup traits the caller implements and
//! never writes. Correctness is relative to the snapshot those lookups
//! expose; serializing validate-then-write against concurrent writers is the
//! caller's job.
//!
//! ## Modules
//!
//! - [`overlap`] — time-of-day and validity-date interval predicates
//! - [`presence`] — daily arrival/departure containment check
//! - [`conflict`] — per-resource overlap search over existing slots
//! - [`validator`] — the one-pass orchestrator and its error accumulator
//! - [`message`] — human-readable conflict diagnostics
//! - [`availability`] — weekly availability windows and their overlap rules
//! - [`clearing`] — pure planning for removing an entity from the schedule
//! - [`store`] — the read-only collaborator traits
//! - [`memory`] — in-memory store for tests and embedding
//! - [`model`] / [`error`] — data types and error types

pub mod availability;
pub mod clearing;
pub mod conflict;
pub mod error;
pub mod memory;
pub mod message;
pub mod model;
pub mod overlap;
pub mod presence;
pub mod store;
pub mod validator;

pub use conflict::{ConflictDetector, Resource};
pub use error::{EngineError, Result};
pub use memory::InMemoryStore;
pub use model::{
    ClassId, EntityRef, Room, RoomId, Slot, SlotCandidate, SlotId, SlotWindow, Student,
    StudentClass, StudentId, Therapist, TherapistId,
};
pub use overlap::{date_ranges_overlap, slots_overlap, times_overlap};
pub use presence::{presence_violations, PresenceViolation};
pub use store::{Directory, ScheduleStore};
pub use validator::{Field, SlotValidator, ValidationErrors, ValidationOutcome};
