//! Run-scoped workload accounting.
//!
//! The tracker is the explicit accumulator threaded through the assignment
//! loop: later shifts are scored against the hours and counts produced by
//! earlier ones, which is what makes generation inherently sequential.
//! Entries are created at run start and discarded at run end; they are
//! never persisted on their own.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::Employee;

/// Rest days an employee starts a run with.
pub const DEFAULT_REST_DAYS: u32 = 5;

/// Per-employee counters for one generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeWorkload {
    /// Shifts committed to this employee so far.
    pub shifts_assigned: u32,
    /// Hours committed this run-week.
    pub hours_this_week: f64,
    /// Rest days left; one is consumed per newly worked date.
    pub rest_days_remaining: u32,
    /// Date of the most recent committed assignment.
    pub last_assignment: Option<NaiveDate>,
}

impl Default for EmployeeWorkload {
    fn default() -> Self {
        Self {
            shifts_assigned: 0,
            hours_this_week: 0.0,
            rest_days_remaining: DEFAULT_REST_DAYS,
            last_assignment: None,
        }
    }
}

/// Workload counters for the whole employee pool.
///
/// `record` is called exactly once per committed assignment, after the
/// engine accepts a candidate. Looking up an employee that was not in the
/// initial pool is a programming error, not a recoverable condition, and
/// panics.
#[derive(Debug, Clone, Default)]
pub struct WorkloadTracker {
    entries: HashMap<String, EmployeeWorkload>,
}

impl WorkloadTracker {
    /// Creates one zeroed entry per employee.
    pub fn initialize(employees: &[Employee]) -> Self {
        let entries = employees
            .iter()
            .map(|e| (e.id.clone(), EmployeeWorkload::default()))
            .collect();
        Self { entries }
    }

    /// Records a committed assignment of `hours` on `date`.
    ///
    /// Increments the shift count and hour total, sets the last-assignment
    /// date, and consumes one rest day when `date` differs from the
    /// previous last-assignment date.
    ///
    /// # Panics
    /// If `employee_id` was not in the pool passed to [`initialize`].
    ///
    /// [`initialize`]: WorkloadTracker::initialize
    pub fn record(&mut self, employee_id: &str, hours: f64, date: NaiveDate) {
        let entry = self
            .entries
            .get_mut(employee_id)
            .unwrap_or_else(|| panic!("employee '{employee_id}' not in workload pool"));

        entry.shifts_assigned += 1;
        entry.hours_this_week += hours;
        if entry.last_assignment != Some(date) {
            entry.rest_days_remaining = entry.rest_days_remaining.saturating_sub(1);
        }
        entry.last_assignment = Some(date);
    }

    /// Current workload for an employee.
    ///
    /// # Panics
    /// If `employee_id` was not in the initial pool.
    pub fn get(&self, employee_id: &str) -> &EmployeeWorkload {
        self.entries
            .get(employee_id)
            .unwrap_or_else(|| panic!("employee '{employee_id}' not in workload pool"))
    }

    /// All entries, for evaluation and reporting.
    pub fn snapshot(&self) -> &HashMap<String, EmployeeWorkload> {
        &self.entries
    }

    /// Number of tracked employees.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
