//! Greedy shift-assignment engine.
//!
//! # Algorithm
//!
//! 1. Validate inputs; fail the run before any assignment work.
//! 2. Order shifts by (priority rank, date, id).
//! 3. For each shift, walk ranked candidates and accept the first that
//!    survives the hard-violation and soft-budget filters.
//! 4. On acceptance, update the workload tracker; later shifts are scored
//!    against it, which is why shifts are processed strictly sequentially.
//!
//! Bounded-time heuristic: one ranking pass per shift, no backtracking,
//! no guarantee of a global optimum. Every shift yields exactly one
//! output row; an unfillable shift is an `Unassigned` row, not an error.
//!
//! # Complexity
//! O(s · e · v) where s = shifts, e = employees, v = validator cost.

use std::time::Instant;

use thiserror::Error;
use tracing::{debug, info};

use crate::collab::ConstraintValidator;
use crate::models::{
    AssignmentStatus, Employee, GenerationResult, Shift, ShiftAssignment, Violation,
};
use crate::validation::{validate_input, ValidationError};

use super::{AssignmentAttempt, CandidateRanker, ScoreWeights, WorkloadTracker};

/// Fatal generation failure.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Input data failed structural validation; nothing was assigned.
    #[error("input validation failed with {} error(s)", .0.len())]
    InvalidInput(Vec<ValidationError>),
}

/// Tuning knobs for one generation run.
#[derive(Debug, Clone)]
pub struct GenerationParams {
    /// Label echoed on the result as `algorithm`.
    pub strategy: String,
    /// Soft violations tolerated per accepted assignment.
    pub max_soft_violations: usize,
    /// Whether candidates with hard violations may still be accepted
    /// (producing `Conflict` rows).
    pub allow_hard_overrides: bool,
    /// Candidate scoring weights.
    pub weights: ScoreWeights,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            strategy: "greedy".into(),
            max_soft_violations: 2,
            allow_hard_overrides: false,
            weights: ScoreWeights::default(),
        }
    }
}

impl GenerationParams {
    /// Creates default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the strategy label.
    pub fn with_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.strategy = strategy.into();
        self
    }

    /// Sets the per-assignment soft-violation budget.
    pub fn with_max_soft_violations(mut self, max: usize) -> Self {
        self.max_soft_violations = max;
        self
    }

    /// Allows accepting candidates despite hard violations.
    pub fn with_hard_overrides(mut self, allow: bool) -> Self {
        self.allow_hard_overrides = allow;
        self
    }

    /// Sets custom scoring weights.
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }
}

/// Running hard/soft totals over emitted rows.
#[derive(Debug, Clone, Copy, Default)]
struct ViolationTotals {
    hard: usize,
    soft: usize,
}

impl ViolationTotals {
    fn add(&mut self, violations: &[Violation]) {
        for v in violations {
            match v.severity {
                crate::models::Severity::Hard => self.hard += 1,
                crate::models::Severity::Soft => self.soft += 1,
                crate::models::Severity::Warning => {}
            }
        }
    }
}

/// Greedy shift-schedule generator.
///
/// # Example
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use rostering::collab::PermissiveValidator;
/// use rostering::engine::{GenerationParams, ScheduleGenerator};
/// use rostering::models::{Employee, Shift};
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
/// let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
/// let five = NaiveTime::from_hms_opt(17, 0, 0).unwrap();
///
/// let shifts = vec![Shift::new("S1", date, nine, five, "nurse")];
/// let employees = vec![Employee::new("E1", "nurse").with_available_date(date)];
///
/// let generator = ScheduleGenerator::new(&PermissiveValidator);
/// let result = generator
///     .generate(&shifts, &employees, &GenerationParams::default())
///     .unwrap();
/// assert_eq!(result.assigned_shifts, 1);
/// assert_eq!(result.coverage_pct, 100.0);
/// ```
#[derive(Debug)]
pub struct ScheduleGenerator<'a> {
    validator: &'a dyn ConstraintValidator,
}

impl<'a> ScheduleGenerator<'a> {
    /// Creates a generator backed by the given constraint validator.
    pub fn new(validator: &'a dyn ConstraintValidator) -> Self {
        Self { validator }
    }

    /// Generates a schedule for `shifts` from the `employees` pool.
    ///
    /// Every input shift yields exactly one row in the result; the run
    /// only fails on malformed input, never on unfillable shifts.
    pub fn generate(
        &self,
        shifts: &[Shift],
        employees: &[Employee],
        params: &GenerationParams,
    ) -> Result<GenerationResult, GenerateError> {
        validate_input(shifts, employees).map_err(GenerateError::InvalidInput)?;

        let started = Instant::now();
        let mut tracker = WorkloadTracker::initialize(employees);
        let ranker = CandidateRanker::new(self.validator).with_weights(params.weights);
        let mut totals = ViolationTotals::default();
        let mut assignments = Vec::with_capacity(shifts.len());
        let mut assigned = 0usize;

        for shift in ordered(shifts) {
            let attempts = ranker.rank(shift, employees, &tracker);
            let accepted = attempts
                .iter()
                .position(|a| acceptable(a, params))
                .map(|i| &attempts[i]);

            let row = match accepted {
                Some(attempt) => {
                    let status = if attempt.hard_count() > 0 {
                        AssignmentStatus::Conflict
                    } else {
                        AssignmentStatus::Assigned
                    };
                    tracker.record(&attempt.employee_id, shift.duration_hours(), shift.date);
                    assigned += 1;
                    debug!(
                        shift = %shift.id,
                        employee = %attempt.employee_id,
                        score = attempt.score,
                        ?status,
                        "shift assigned"
                    );
                    emit(shift, attempt, status)
                }
                None => {
                    // Keep the best rejected attempt as a diagnostic.
                    debug!(shift = %shift.id, candidates = attempts.len(), "shift unassigned");
                    unassigned_row(shift, attempts.first())
                }
            };

            totals.add(&row.violations);
            assignments.push(row);
        }

        let total = shifts.len();
        let result = GenerationResult {
            assignments,
            total_shifts: total,
            assigned_shifts: assigned,
            unassigned_shifts: total - assigned,
            coverage_pct: GenerationResult::coverage(assigned, total),
            hard_violations: totals.hard,
            soft_violations: totals.soft,
            generation_ms: started.elapsed().as_millis() as u64,
            algorithm: params.strategy.clone(),
        };
        info!(
            total = result.total_shifts,
            assigned = result.assigned_shifts,
            unassigned = result.unassigned_shifts,
            coverage = result.coverage_pct,
            hard = result.hard_violations,
            soft = result.soft_violations,
            "generation finished"
        );
        Ok(result)
    }
}

/// Whether the engine may commit to this attempt under the run's params.
fn acceptable(attempt: &AssignmentAttempt, params: &GenerationParams) -> bool {
    if params.allow_hard_overrides {
        return true;
    }
    attempt.hard_count() == 0 && attempt.soft_count() <= params.max_soft_violations
}

/// Shifts in processing order: priority rank, then date, then id.
fn ordered(shifts: &[Shift]) -> Vec<&Shift> {
    let mut out: Vec<&Shift> = shifts.iter().collect();
    out.sort_by(|a, b| {
        a.priority
            .rank()
            .cmp(&b.priority.rank())
            .then_with(|| a.date.cmp(&b.date))
            .then_with(|| a.id.cmp(&b.id))
    });
    out
}

fn emit(shift: &Shift, attempt: &AssignmentAttempt, status: AssignmentStatus) -> ShiftAssignment {
    ShiftAssignment {
        shift_id: shift.id.clone(),
        employee_id: attempt.employee_id.clone(),
        role: shift.required_role.clone(),
        date: shift.date,
        start_time: shift.start_time,
        end_time: shift.end_time,
        status,
        violations: attempt.violations.clone(),
        score: attempt.score,
    }
}

fn unassigned_row(shift: &Shift, best_rejected: Option<&AssignmentAttempt>) -> ShiftAssignment {
    ShiftAssignment {
        shift_id: shift.id.clone(),
        employee_id: String::new(),
        role: shift.required_role.clone(),
        date: shift.date,
        start_time: shift.start_time,
        end_time: shift.end_time,
        status: AssignmentStatus::Unassigned,
        violations: best_rejected.map(|a| a.violations.clone()).unwrap_or_default(),
        score: best_rejected.map(|a| a.score).unwrap_or(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::{PermissiveValidator, ValidatorVerdict};
    use crate::engine::EmployeeWorkload;
    use crate::models::ShiftPriority;
    use chrono::{NaiveDate, NaiveTime};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn time(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    fn shift(id: &str, d: u32) -> Shift {
        Shift::new(id, date(d), time(9), time(17), "nurse")
    }

    fn employee(id: &str, days: &[u32]) -> Employee {
        let mut e = Employee::new(id, "nurse");
        for &d in days {
            e = e.with_available_date(date(d));
        }
        e
    }

    /// Validator flagging a hard violation once an employee already holds
    /// a shift on the same date, and a soft violation when the shift's
    /// required skill is missing.
    #[derive(Debug)]
    struct HouseRules;

    impl ConstraintValidator for HouseRules {
        fn validate(
            &self,
            employee: &Employee,
            shift: &Shift,
            workload: &EmployeeWorkload,
        ) -> ValidatorVerdict {
            let mut violations = Vec::new();
            if workload.last_assignment == Some(shift.date) {
                violations.push(Violation::hard(
                    "double_booking",
                    format!("{} already works {}", employee.id, shift.date),
                ));
            }
            if let Some(skill) = &shift.required_skill {
                if !employee.skills.contains(skill) {
                    violations.push(Violation::soft(
                        "skill_mismatch",
                        format!("{} lacks '{skill}'", employee.id),
                    ));
                }
            }
            ValidatorVerdict::with_violations(violations)
        }
    }

    #[test]
    fn test_counts_invariant() {
        let shifts = vec![shift("S1", 1), shift("S2", 2), shift("S3", 3)];
        let employees = vec![employee("E1", &[1])];
        let generator = ScheduleGenerator::new(&PermissiveValidator);

        let r = generator
            .generate(&shifts, &employees, &GenerationParams::default())
            .unwrap();
        assert_eq!(r.total_shifts, 3);
        assert_eq!(r.assigned_shifts + r.unassigned_shifts, r.total_shifts);
        assert_eq!(r.assigned_shifts, 1);
        assert!((r.coverage_pct - 33.33).abs() < 1e-10);
    }

    #[test]
    fn test_invalid_input_is_fatal() {
        let shifts = vec![shift("S1", 1), shift("S1", 2)]; // Duplicate ID
        let employees = vec![employee("E1", &[1])];
        let generator = ScheduleGenerator::new(&PermissiveValidator);

        let err = generator
            .generate(&shifts, &employees, &GenerationParams::default())
            .unwrap_err();
        let GenerateError::InvalidInput(errors) = err;
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_priority_then_date_ordering() {
        // The single employee can take only one shift per day under
        // HouseRules; the critical shift must win the contested date.
        let shifts = vec![
            Shift::new("normal", date(1), time(9), time(17), "nurse"),
            Shift::new("critical", date(1), time(13), time(21), "nurse")
                .with_priority(ShiftPriority::Critical),
        ];
        let employees = vec![employee("E1", &[1])];
        let generator = ScheduleGenerator::new(&HouseRules);

        let r = generator
            .generate(&shifts, &employees, &GenerationParams::default())
            .unwrap();
        assert_eq!(
            r.assignment_for_shift("critical").unwrap().status,
            AssignmentStatus::Assigned
        );
        assert_eq!(
            r.assignment_for_shift("normal").unwrap().status,
            AssignmentStatus::Unassigned
        );
    }

    #[test]
    fn test_assigned_rows_have_no_hard_violations() {
        let shifts = vec![shift("S1", 1), shift("S2", 1), shift("S3", 2)];
        let employees = vec![employee("E1", &[1, 2]), employee("E2", &[1, 2])];
        let generator = ScheduleGenerator::new(&HouseRules);

        let r = generator
            .generate(&shifts, &employees, &GenerationParams::default())
            .unwrap();
        for a in &r.assignments {
            if a.status == AssignmentStatus::Assigned {
                assert_eq!(a.hard_count(), 0, "row {} carries hard violations", a.shift_id);
            }
        }
    }

    #[test]
    fn test_hard_override_produces_conflict() {
        // Two same-day shifts, one employee: the second acceptance
        // requires overriding the double-booking rule.
        let shifts = vec![shift("S1", 1), shift("S2", 1)];
        let employees = vec![employee("E1", &[1])];
        let generator = ScheduleGenerator::new(&HouseRules);

        let strict = generator
            .generate(&shifts, &employees, &GenerationParams::default())
            .unwrap();
        assert_eq!(strict.assigned_shifts, 1);
        assert_eq!(strict.unassigned_shifts, 1);
        // Diagnostic on the unassigned row names the blocking rule.
        let open = strict.unassigned()[0];
        assert!(open.violations.iter().any(|v| v.code == "double_booking"));

        let params = GenerationParams::default().with_hard_overrides(true);
        let lenient = generator.generate(&shifts, &employees, &params).unwrap();
        assert_eq!(lenient.assigned_shifts, 2);
        assert_eq!(lenient.hard_violations, 1);
        let conflicts: Vec<_> = lenient
            .assignments
            .iter()
            .filter(|a| a.status == AssignmentStatus::Conflict)
            .collect();
        assert_eq!(conflicts.len(), 1);
        assert!(conflicts[0].hard_count() > 0);
    }

    #[test]
    fn test_soft_budget_enforced() {
        // Skill mismatch is soft under HouseRules; budget 0 rejects it.
        let shifts = vec![shift("S1", 1).with_required_skill("triage")];
        let employees = vec![employee("E1", &[1])];
        let generator = ScheduleGenerator::new(&HouseRules);

        let params = GenerationParams::default().with_max_soft_violations(0);
        let r = generator.generate(&shifts, &employees, &params).unwrap();
        assert_eq!(r.unassigned_shifts, 1);

        let params = GenerationParams::default().with_max_soft_violations(1);
        let r = generator.generate(&shifts, &employees, &params).unwrap();
        assert_eq!(r.assigned_shifts, 1);
        assert_eq!(r.soft_violations, 1);
    }

    #[test]
    fn test_availability_and_skill_scenario() {
        // Shift 1 (critical): both available, E1 qualified → E1.
        // Shift 2: E1 unavailable → E2.
        // Shift 3: requires a skill neither free candidate has → soft
        // mismatch; acceptable within the default budget.
        let shifts = vec![
            Shift::new("S1", date(1), time(9), time(17), "nurse")
                .with_required_skill("triage")
                .with_priority(ShiftPriority::Critical),
            shift("S2", 2),
            shift("S3", 3).with_required_skill("dialysis"),
        ];
        let employees = vec![
            employee("E1", &[1, 3]).with_skill("triage").with_unavailable_date(date(2)),
            employee("E2", &[1, 2, 3]),
        ];
        let generator = ScheduleGenerator::new(&HouseRules);

        let r = generator
            .generate(&shifts, &employees, &GenerationParams::default())
            .unwrap();
        assert_eq!(r.assignment_for_shift("S1").unwrap().employee_id, "E1");
        assert_eq!(r.assignment_for_shift("S2").unwrap().employee_id, "E2");

        let s3 = r.assignment_for_shift("S3").unwrap();
        assert_eq!(s3.status, AssignmentStatus::Assigned);
        assert_eq!(s3.soft_count(), 1);
    }

    #[test]
    fn test_never_assigns_excluded_employee() {
        let shifts = vec![shift("S1", 1)];
        let employees = vec![
            employee("E1", &[2]),                                  // Wrong day
            employee("E2", &[1]).with_unavailable_date(date(1)),   // Opted out
        ];
        let generator = ScheduleGenerator::new(&PermissiveValidator);

        let r = generator
            .generate(&shifts, &employees, &GenerationParams::default())
            .unwrap();
        assert_eq!(r.unassigned_shifts, 1);
        assert_eq!(r.assignments[0].employee_id, "");
    }

    #[test]
    fn test_determinism_across_runs() {
        let shifts: Vec<Shift> = (1..=5).map(|d| shift(&format!("S{d}"), d)).collect();
        let employees = vec![
            employee("E1", &[1, 2, 3, 4, 5]),
            employee("E2", &[1, 2, 3, 4, 5]),
            employee("E3", &[1, 2, 3, 4, 5]),
        ];
        let generator = ScheduleGenerator::new(&HouseRules);
        let params = GenerationParams::default();

        let a = generator.generate(&shifts, &employees, &params).unwrap();
        let b = generator.generate(&shifts, &employees, &params).unwrap();
        let picks = |r: &GenerationResult| -> Vec<(String, String)> {
            r.assignments
                .iter()
                .map(|x| (x.shift_id.clone(), x.employee_id.clone()))
                .collect()
        };
        assert_eq!(picks(&a), picks(&b));
    }

    #[test]
    fn test_full_coverage_run() {
        // 10 shifts over 10 days, 10 fully available qualified employees.
        let shifts: Vec<Shift> = (1..=10).map(|d| shift(&format!("S{d:02}"), d)).collect();
        let employees: Vec<Employee> = (1..=10)
            .map(|i| employee(&format!("E{i:02}"), &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]))
            .collect();
        let generator = ScheduleGenerator::new(&HouseRules);

        let r = generator
            .generate(&shifts, &employees, &GenerationParams::default())
            .unwrap();
        assert_eq!(r.coverage_pct, 100.0);
        assert_eq!(r.hard_violations, 0);
        assert_eq!(r.unassigned_shifts, 0);
    }

    #[test]
    fn test_workload_spreads_assignments() {
        // Three same-priority shifts on different days, two identical
        // employees: the workload penalty must not give all three to one.
        let shifts = vec![shift("S1", 1), shift("S2", 2), shift("S3", 3)];
        let employees = vec![
            employee("E1", &[1, 2, 3]),
            employee("E2", &[1, 2, 3]),
        ];
        let generator = ScheduleGenerator::new(&PermissiveValidator);

        let r = generator
            .generate(&shifts, &employees, &GenerationParams::default())
            .unwrap();
        let e1 = r.assignments_for_employee("E1").len();
        let e2 = r.assignments_for_employee("E2").len();
        assert_eq!(e1 + e2, 3);
        assert!(e1 >= 1 && e2 >= 1, "one employee got everything: {e1}/{e2}");
    }

    #[test]
    fn test_empty_shift_list() {
        let employees = vec![employee("E1", &[1])];
        let generator = ScheduleGenerator::new(&PermissiveValidator);
        let r = generator
            .generate(&[], &employees, &GenerationParams::default())
            .unwrap();
        assert_eq!(r.total_shifts, 0);
        assert_eq!(r.coverage_pct, 0.0);
    }
}
