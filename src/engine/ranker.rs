//! Candidate ranking for one shift.
//!
//! Filters the employee pool by declared availability, consults the
//! external constraint validator for each survivor, computes a composite
//! score, and returns attempts sorted best-first. Pure apart from the
//! validator calls.

use serde::{Deserialize, Serialize};

use crate::collab::ConstraintValidator;
use crate::models::{Employee, Shift, Violation};

use super::WorkloadTracker;

/// Scoring constants for candidate evaluation.
///
/// Passed explicitly rather than read from shared state, so concurrent
/// runs can use different weights.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Starting score for every candidate.
    pub base: f64,
    /// Deducted per hard violation.
    pub hard_penalty: f64,
    /// Deducted per soft violation.
    pub soft_penalty: f64,
    /// Added when the candidate holds the shift's required skill.
    pub skill_bonus: f64,
    /// Added when the candidate prefers the shift's type.
    pub preference_bonus: f64,
    /// Deducted per shift already assigned this run (workload balancing).
    pub workload_penalty: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            base: 100.0,
            hard_penalty: 50.0,
            soft_penalty: 10.0,
            skill_bonus: 15.0,
            preference_bonus: 10.0,
            workload_penalty: 2.0,
        }
    }
}

/// One candidate-to-shift evaluation.
///
/// Transient: used to pick a winner and to explain the pick; never
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentAttempt {
    /// Candidate employee.
    pub employee_id: String,
    /// Whether the validator found no hard violations.
    pub valid: bool,
    /// Violations the validator reported, in reported order.
    pub violations: Vec<Violation>,
    /// Composite score; never negative.
    pub score: f64,
    /// Human-readable summary of how the score came about.
    pub reason: String,
}

impl AssignmentAttempt {
    /// Number of hard violations on this attempt.
    pub fn hard_count(&self) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == crate::models::Severity::Hard)
            .count()
    }

    /// Number of soft violations on this attempt.
    pub fn soft_count(&self) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == crate::models::Severity::Soft)
            .count()
    }
}

/// Ranks candidates for one shift, best-first.
#[derive(Debug)]
pub struct CandidateRanker<'a> {
    validator: &'a dyn ConstraintValidator,
    weights: ScoreWeights,
}

impl<'a> CandidateRanker<'a> {
    /// Creates a ranker with default weights.
    pub fn new(validator: &'a dyn ConstraintValidator) -> Self {
        Self {
            validator,
            weights: ScoreWeights::default(),
        }
    }

    /// Sets custom scoring weights.
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Evaluates all available employees for `shift` and returns attempts
    /// sorted by descending score.
    ///
    /// Employees whose available dates do not contain the shift date, or
    /// whose unavailable dates do, are excluded before validation. Equal
    /// scores tie-break by ascending employee ID so the order never
    /// depends on pool ordering.
    pub fn rank(
        &self,
        shift: &Shift,
        employees: &[Employee],
        tracker: &WorkloadTracker,
    ) -> Vec<AssignmentAttempt> {
        let mut attempts: Vec<AssignmentAttempt> = employees
            .iter()
            .filter(|e| e.is_available_on(shift.date))
            .map(|e| self.evaluate(shift, e, tracker))
            .collect();

        attempts.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.employee_id.cmp(&b.employee_id))
        });
        attempts
    }

    /// Scores one candidate.
    fn evaluate(
        &self,
        shift: &Shift,
        employee: &Employee,
        tracker: &WorkloadTracker,
    ) -> AssignmentAttempt {
        let workload = tracker.get(&employee.id);
        let verdict = self.validator.validate(employee, shift, workload);

        let hard = verdict
            .violations
            .iter()
            .filter(|v| v.severity == crate::models::Severity::Hard)
            .count();
        let soft = verdict
            .violations
            .iter()
            .filter(|v| v.severity == crate::models::Severity::Soft)
            .count();

        let w = &self.weights;
        let mut score = w.base;
        score -= hard as f64 * w.hard_penalty;
        score -= soft as f64 * w.soft_penalty;

        let has_skill = shift
            .required_skill
            .as_deref()
            .map_or(false, |s| employee.skills.contains(s));
        if has_skill {
            score += w.skill_bonus;
        }

        let prefers_type =
            !shift.shift_type.is_empty() && employee.preferred_shift_types.contains(&shift.shift_type);
        if prefers_type {
            score += w.preference_bonus;
        }

        score -= workload.shifts_assigned as f64 * w.workload_penalty;
        score = score.max(0.0);

        let reason = format!(
            "{} hard, {} soft, skill {}, preference {}, {} prior shift(s)",
            hard,
            soft,
            if has_skill { "match" } else { "none" },
            if prefers_type { "match" } else { "none" },
            workload.shifts_assigned,
        );

        AssignmentAttempt {
            employee_id: employee.id.clone(),
            valid: verdict.valid,
            violations: verdict.violations,
            score,
            reason,
        }
    }
}
