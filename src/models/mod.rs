//! Rostering domain models.
//!
//! Core data types for shift-schedule generation and evaluation:
//! immutable inputs ([`Shift`], [`Employee`]), output rows and run
//! aggregates ([`ShiftAssignment`], [`GenerationResult`]), and derived
//! quality artifacts ([`QualityReport`], [`StoredSchedule`]).
//!
//! Per-run mutable workload state lives in [`crate::engine`], not here.

mod employee;
mod quality;
mod schedule;
mod shift;

pub use employee::Employee;
pub use quality::{
    Concern, ConcernCategory, ConcernSeverity, HealthBand, QualityReport, Recommendation,
    StoredSchedule,
};
pub use schedule::{AssignmentStatus, GenerationResult, Severity, ShiftAssignment, Violation};
pub use shift::{span_hours, Shift, ShiftPriority};
