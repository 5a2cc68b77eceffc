//! External collaborator interfaces.
//!
//! The engine consumes three collaborators it does not implement:
//! a [`ConstraintValidator`] that checks one candidate against business
//! rules, an optional [`CoverageScorer`], and a [`ScheduleStore`] for
//! persistence. All three are object-safe `Send + Sync` traits so the
//! surrounding service layer can plug in its own implementations.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Mutex;
use thiserror::Error;

use crate::engine::EmployeeWorkload;
use crate::models::{Employee, GenerationResult, Shift, StoredSchedule, Violation};

/// Outcome of validating one candidate against business rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidatorVerdict {
    /// Whether the candidate passes with no hard violations.
    pub valid: bool,
    /// All detected violations, hard and soft.
    pub violations: Vec<Violation>,
}

impl ValidatorVerdict {
    /// A passing verdict with no violations.
    pub fn clean() -> Self {
        Self {
            valid: true,
            violations: Vec::new(),
        }
    }

    /// A verdict carrying the given violations; `valid` is false iff any
    /// of them is hard.
    pub fn with_violations(violations: Vec<Violation>) -> Self {
        let valid = !violations
            .iter()
            .any(|v| v.severity == crate::models::Severity::Hard);
        Self { valid, violations }
    }
}

/// Checks one candidate assignment against business rules (max hours,
/// rest periods, overlaps, skill requirements).
///
/// Must be deterministic for a given employee/shift/workload snapshot
/// within one run; the engine calls it once per surviving candidate.
pub trait ConstraintValidator: Send + Sync + Debug {
    /// Validates assigning `employee` to `shift` given their current
    /// run-scoped workload.
    fn validate(
        &self,
        employee: &Employee,
        shift: &Shift,
        workload: &EmployeeWorkload,
    ) -> ValidatorVerdict;
}

/// A validator that accepts every candidate. Useful as a baseline and in
/// tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissiveValidator;

impl ConstraintValidator for PermissiveValidator {
    fn validate(&self, _: &Employee, _: &Shift, _: &EmployeeWorkload) -> ValidatorVerdict {
        ValidatorVerdict::clean()
    }
}

/// Externally computed coverage assessment of a generated plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageScore {
    /// Coverage percentage as the external scorer sees it (0–100).
    pub coverage_pct: f64,
}

/// Derives a coverage score from a generated plan.
///
/// Optional collaborator: returning `None` means the signal is absent and
/// the evaluator falls back to its neutral quality default (fail-open).
pub trait CoverageScorer: Send + Sync + Debug {
    /// Scores coverage for the given scope, or `None` when unavailable.
    fn score(&self, scope: &str, result: &GenerationResult) -> Option<CoverageScore>;
}

/// Persistence-layer failure.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested schedule does not exist.
    #[error("schedule '{0}' not found")]
    NotFound(String),
    /// The backing store rejected or lost the operation.
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Filter for listing stored schedules.
#[derive(Debug, Clone, Default)]
pub struct ScheduleFilter {
    /// Restrict to schedules generated for this scope.
    pub scope: Option<String>,
}

/// Stores and retrieves generated schedules.
///
/// A schedule and its assignments are logically one write; transactional
/// semantics are the store's responsibility, and the engine never retries
/// internally.
pub trait ScheduleStore: Send + Sync + Debug {
    /// Persists a schedule and returns its ID.
    fn save_schedule(&self, schedule: &StoredSchedule) -> Result<String, StoreError>;

    /// Fetches a schedule by ID.
    fn get_schedule(&self, id: &str) -> Result<StoredSchedule, StoreError>;

    /// Lists schedules matching the filter.
    fn list_schedules(&self, filter: &ScheduleFilter) -> Result<Vec<StoredSchedule>, StoreError>;
}

/// In-memory store for tests and single-process embedding.
#[derive(Debug, Default)]
pub struct MemoryScheduleStore {
    schedules: Mutex<HashMap<String, StoredSchedule>>,
}

impl MemoryScheduleStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScheduleStore for MemoryScheduleStore {
    fn save_schedule(&self, schedule: &StoredSchedule) -> Result<String, StoreError> {
        let mut guard = self
            .schedules
            .lock()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        guard.insert(schedule.id.clone(), schedule.clone());
        Ok(schedule.id.clone())
    }

    fn get_schedule(&self, id: &str) -> Result<StoredSchedule, StoreError> {
        let guard = self
            .schedules
            .lock()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        guard
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn list_schedules(&self, filter: &ScheduleFilter) -> Result<Vec<StoredSchedule>, StoreError> {
        let guard = self
            .schedules
            .lock()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        let mut out: Vec<StoredSchedule> = guard
            .values()
            .filter(|s| filter.scope.as_deref().map_or(true, |scope| s.scope == scope))
            .cloned()
            .collect();
        out.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(out)
    }
}
