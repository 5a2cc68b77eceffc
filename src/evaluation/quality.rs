//! Schedule quality evaluation.
//!
//! Derives a [`QualityReport`] from a finished [`GenerationResult`]:
//! coverage, a 0–100 quality score, a workload-balance score computed
//! from the spread of per-employee hours, an ordinal health band, and
//! threshold-derived concerns with paired recommendations.
//!
//! Recomputed on demand; nothing here is incrementally maintained.

use serde::{Deserialize, Serialize};

use crate::collab::CoverageScore;
use crate::models::{
    AssignmentStatus, Concern, ConcernCategory, ConcernSeverity, GenerationResult, HealthBand,
    QualityReport, Recommendation,
};

/// Weights and thresholds for quality evaluation.
///
/// Passed to the evaluator at call time so concurrent evaluations can use
/// different thresholds without interference.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QualityConfig {
    /// Quality score used when no external coverage score is available.
    pub neutral_quality: f64,
    /// Fixed baseline blended with an external coverage score.
    pub blend_baseline: f64,
    /// Weight applied to the external coverage score in the blend.
    pub blend_weight: f64,
    /// Balance points lost per hour of standard deviation in employee hours.
    pub spread_penalty: f64,
    /// Constraint-score points lost per hard violation.
    pub hard_weight: f64,
    /// Constraint-score points lost per soft violation.
    pub soft_weight: f64,
    /// Composite weight of the quality score.
    pub quality_share: f64,
    /// Composite weight of coverage.
    pub coverage_share: f64,
    /// Composite weight of workload balance.
    pub balance_share: f64,
    /// Composite weight of constraint compliance.
    pub constraint_share: f64,
    /// Coverage below this raises a critical concern (%).
    pub coverage_floor: f64,
    /// Soft violations above this raise a warning concern.
    pub soft_tolerance: usize,
    /// Quality score below this raises a warning concern.
    pub quality_floor: f64,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            neutral_quality: 70.0,
            blend_baseline: 50.0,
            blend_weight: 0.5,
            spread_penalty: 10.0,
            hard_weight: 10.0,
            soft_weight: 2.0,
            quality_share: 0.35,
            coverage_share: 0.30,
            balance_share: 0.20,
            constraint_share: 0.15,
            coverage_floor: 80.0,
            soft_tolerance: 5,
            quality_floor: 60.0,
        }
    }
}

/// Evaluates generated schedules.
///
/// # Example
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use rostering::collab::PermissiveValidator;
/// use rostering::engine::{GenerationParams, ScheduleGenerator};
/// use rostering::evaluation::QualityEvaluator;
/// use rostering::models::{Employee, HealthBand, Shift};
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
/// let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
/// let five = NaiveTime::from_hms_opt(17, 0, 0).unwrap();
/// let shifts = vec![Shift::new("S1", date, nine, five, "nurse")];
/// let employees = vec![Employee::new("E1", "nurse").with_available_date(date)];
///
/// let result = ScheduleGenerator::new(&PermissiveValidator)
///     .generate(&shifts, &employees, &GenerationParams::default())
///     .unwrap();
/// let report = QualityEvaluator::new().evaluate(&result, None);
/// assert_eq!(report.health, HealthBand::Excellent);
/// ```
#[derive(Debug, Clone, Default)]
pub struct QualityEvaluator {
    config: QualityConfig,
}

impl QualityEvaluator {
    /// Creates an evaluator with default weights and thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a custom configuration.
    pub fn with_config(mut self, config: QualityConfig) -> Self {
        self.config = config;
        self
    }

    /// Evaluates a generation result.
    ///
    /// `external` is an optional coverage-scorer output; when absent the
    /// quality score falls back to the configured neutral default rather
    /// than failing (fail-open).
    pub fn evaluate(
        &self,
        result: &GenerationResult,
        external: Option<&CoverageScore>,
    ) -> QualityReport {
        let c = &self.config;

        let coverage_pct = GenerationResult::coverage(result.assigned_shifts, result.total_shifts);

        // The source blend is unbounded; clamp to keep scores in [0,100].
        let quality_score = match external {
            Some(score) => {
                (c.blend_baseline + score.coverage_pct * c.blend_weight).clamp(0.0, 100.0)
            }
            None => c.neutral_quality,
        };

        let balance_score = self.balance_score(result);

        let constraint_score = (100.0
            - result.hard_violations as f64 * c.hard_weight
            - result.soft_violations as f64 * c.soft_weight)
            .clamp(0.0, 100.0);

        let composite = quality_score * c.quality_share
            + coverage_pct * c.coverage_share
            + balance_score * c.balance_share
            + constraint_score * c.constraint_share;

        let (concerns, recommendations) = self.assess(result, coverage_pct, quality_score);

        QualityReport {
            coverage_pct,
            quality_score,
            balance_score,
            constraint_score,
            composite,
            hard_violations: result.hard_violations,
            soft_violations: result.soft_violations,
            health: HealthBand::classify(composite),
            concerns,
            recommendations,
        }
    }

    /// Workload-balance score from the spread of per-employee hours.
    ///
    /// Lower standard deviation = higher score; a pool of zero or one
    /// working employees is perfectly balanced by definition.
    fn balance_score(&self, result: &GenerationResult) -> f64 {
        let mut hours: std::collections::HashMap<&str, f64> = std::collections::HashMap::new();
        for a in &result.assignments {
            if a.status == AssignmentStatus::Unassigned {
                continue;
            }
            *hours.entry(a.employee_id.as_str()).or_insert(0.0) += a.duration_hours();
        }

        if hours.len() <= 1 {
            return 100.0;
        }

        let n = hours.len() as f64;
        let mean = hours.values().sum::<f64>() / n;
        let variance = hours.values().map(|h| (h - mean).powi(2)).sum::<f64>() / n;
        let stddev = variance.sqrt();

        (100.0 - stddev * self.config.spread_penalty).clamp(0.0, 100.0)
    }

    /// Threshold-derived concerns with one recommendation each.
    fn assess(
        &self,
        result: &GenerationResult,
        coverage_pct: f64,
        quality_score: f64,
    ) -> (Vec<Concern>, Vec<Recommendation>) {
        let c = &self.config;
        let mut concerns = Vec::new();
        let mut recommendations = Vec::new();

        let mut push = |severity: ConcernSeverity,
                        category: ConcernCategory,
                        message: String,
                        action: &str,
                        impact: &str| {
            concerns.push(Concern {
                severity,
                category,
                message,
            });
            recommendations.push(Recommendation {
                category,
                action: action.into(),
                priority: severity,
                expected_impact: impact.into(),
            });
        };

        if coverage_pct < c.coverage_floor {
            push(
                ConcernSeverity::Critical,
                ConcernCategory::Coverage,
                format!(
                    "Coverage {coverage_pct:.2}% is below the {:.0}% floor",
                    c.coverage_floor
                ),
                "Increase staffing or widen employee availability for the affected dates",
                "Raises coverage toward the floor",
            );
        }
        if result.hard_violations > 0 {
            push(
                ConcernSeverity::Critical,
                ConcernCategory::HardViolations,
                format!(
                    "{} hard constraint violation(s) present",
                    result.hard_violations
                ),
                "Review conflict rows and reassign or adjust the violated rules",
                "Removes blocking rule breaches",
            );
        }
        if result.soft_violations > c.soft_tolerance {
            push(
                ConcernSeverity::Warning,
                ConcernCategory::SoftViolations,
                format!(
                    "{} soft violations exceed the tolerated {}",
                    result.soft_violations, c.soft_tolerance
                ),
                "Tighten the per-assignment soft-violation budget or rebalance preferences",
                "Improves assignment fit",
            );
        }
        if quality_score < c.quality_floor {
            push(
                ConcernSeverity::Warning,
                ConcernCategory::Quality,
                format!(
                    "Quality score {quality_score:.1} is below the {:.0} floor",
                    c.quality_floor
                ),
                "Re-run generation with a larger candidate pool or relaxed constraints",
                "Lifts overall schedule quality",
            );
        }

        (concerns, recommendations)
    }
}
