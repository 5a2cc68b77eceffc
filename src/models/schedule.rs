//! Generated-schedule (solution) models.
//!
//! A generation run emits exactly one [`ShiftAssignment`] per input shift
//! and one [`GenerationResult`] aggregate. Both are immutable once created
//! and are what the persistence store saves.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Severity of a constraint violation.
///
/// Hard violations block assignment unless the run allows overrides; soft
/// violations count against a per-run budget; warnings are advisory only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks assignment (e.g., double-booking, missing certification).
    Hard,
    /// Degrades quality but may be accepted (e.g., preference mismatch).
    Soft,
    /// Advisory only; never affects acceptance.
    Warning,
}

/// A constraint violation reported by the external validator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// Severity class.
    pub severity: Severity,
    /// Stable machine-readable code (e.g., "max_hours_exceeded").
    pub code: String,
    /// Human-readable description.
    pub message: String,
}

impl Violation {
    /// Creates a hard violation.
    pub fn hard(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Hard,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Creates a soft violation.
    pub fn soft(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Soft,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Creates a warning.
    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Final state of one shift after a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    /// A candidate was accepted with no hard violations.
    Assigned,
    /// A candidate was accepted despite hard violations (overrides on).
    Conflict,
    /// No candidate qualified; `employee_id` is empty.
    Unassigned,
}

/// One output row: the decision made for one shift.
///
/// Unassigned rows carry the top-ranked rejected attempt's violations as a
/// diagnostic, so callers can see why the shift went unfilled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftAssignment {
    /// The shift this row decides.
    pub shift_id: String,
    /// Winning employee, or empty string when unassigned.
    pub employee_id: String,
    /// Role the shift required.
    pub role: String,
    /// Shift date.
    pub date: NaiveDate,
    /// Shift start time.
    pub start_time: NaiveTime,
    /// Shift end time.
    pub end_time: NaiveTime,
    /// Outcome for this shift.
    pub status: AssignmentStatus,
    /// Violations attached to the accepted (or best rejected) attempt.
    pub violations: Vec<Violation>,
    /// Composite score of the accepted (or best rejected) attempt.
    pub score: f64,
}

impl ShiftAssignment {
    /// Hours this row covers (overnight windows wrap past midnight).
    pub fn duration_hours(&self) -> f64 {
        super::shift::span_hours(self.start_time, self.end_time)
    }

    /// Number of hard violations on this row.
    pub fn hard_count(&self) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Hard)
            .count()
    }

    /// Number of soft violations on this row.
    pub fn soft_count(&self) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Soft)
            .count()
    }
}

/// Aggregate outcome of one generation run.
///
/// Invariant: `assigned_shifts + unassigned_shifts == total_shifts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    /// One row per input shift.
    pub assignments: Vec<ShiftAssignment>,
    /// Number of input shifts.
    pub total_shifts: usize,
    /// Rows with status `Assigned` or `Conflict`.
    pub assigned_shifts: usize,
    /// Rows with status `Unassigned`.
    pub unassigned_shifts: usize,
    /// `assigned / total × 100`, rounded to 2 decimals; 0 when no shifts.
    pub coverage_pct: f64,
    /// Hard violations summed over all rows.
    pub hard_violations: usize,
    /// Soft violations summed over all rows.
    pub soft_violations: usize,
    /// Wall-clock duration of the run (ms).
    pub generation_ms: u64,
    /// Identifier of the algorithm that produced this result.
    pub algorithm: String,
}

impl GenerationResult {
    /// Coverage percentage for the given counts, rounded to 2 decimals.
    pub fn coverage(assigned: usize, total: usize) -> f64 {
        if total == 0 {
            return 0.0;
        }
        let pct = assigned as f64 / total as f64 * 100.0;
        (pct * 100.0).round() / 100.0
    }

    /// Finds the row for a given shift.
    pub fn assignment_for_shift(&self, shift_id: &str) -> Option<&ShiftAssignment> {
        self.assignments.iter().find(|a| a.shift_id == shift_id)
    }

    /// Returns all rows assigned to a given employee.
    pub fn assignments_for_employee(&self, employee_id: &str) -> Vec<&ShiftAssignment> {
        self.assignments
            .iter()
            .filter(|a| a.employee_id == employee_id)
            .collect()
    }

    /// Rows that went unfilled.
    pub fn unassigned(&self) -> Vec<&ShiftAssignment> {
        self.assignments
            .iter()
            .filter(|a| a.status == AssignmentStatus::Unassigned)
            .collect()
    }

    /// Whether the run filled every shift without hard violations.
    pub fn is_clean(&self) -> bool {
        self.unassigned_shifts == 0 && self.hard_violations == 0
    }
}
