//! Schedule quality models.
//!
//! A [`QualityReport`] is derived on demand from a [`GenerationResult`] by
//! the evaluator; it is never incrementally maintained. [`StoredSchedule`]
//! pairs a result with its report for persistence and comparison.

use serde::{Deserialize, Serialize};

use super::GenerationResult;

/// Ordinal health classification of a schedule.
///
/// Bands partition the composite score: `Excellent ≥ 85`, `Good ≥ 70`,
/// `Fair ≥ 50`, `Poor < 50`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthBand {
    /// Composite ≥ 85.
    Excellent,
    /// Composite in [70, 85).
    Good,
    /// Composite in [50, 70).
    Fair,
    /// Composite < 50.
    Poor,
}

impl HealthBand {
    /// Classifies a composite score into its band.
    pub fn classify(composite: f64) -> Self {
        if composite >= 85.0 {
            Self::Excellent
        } else if composite >= 70.0 {
            Self::Good
        } else if composite >= 50.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }
}

/// Area a concern or recommendation is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcernCategory {
    /// Too many shifts went unfilled.
    Coverage,
    /// Hard constraint violations are present.
    HardViolations,
    /// Soft violations exceed the tolerated level.
    SoftViolations,
    /// Overall quality score is low.
    Quality,
}

/// Urgency of a concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConcernSeverity {
    /// Should be addressed before publishing the schedule.
    Critical,
    /// Worth reviewing; does not block publication.
    Warning,
}

/// A deterministic, threshold-derived problem statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Concern {
    /// Urgency.
    pub severity: ConcernSeverity,
    /// Area the concern is about.
    pub category: ConcernCategory,
    /// Human-readable description with the triggering value.
    pub message: String,
}

/// An action suggested for one concern category.
///
/// Recommendations are advisory text; no numeric reoptimization is
/// attempted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    /// Concern category this addresses (1:1 with concerns).
    pub category: ConcernCategory,
    /// Suggested action.
    pub action: String,
    /// Urgency inherited from the concern.
    pub priority: ConcernSeverity,
    /// Qualitative expected impact (e.g., "raises coverage").
    pub expected_impact: String,
}

/// Quality assessment of one generated schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityReport {
    /// Coverage percentage, carried over from the result.
    pub coverage_pct: f64,
    /// Quality score (0–100).
    pub quality_score: f64,
    /// Workload-balance score (0–100); higher = more even hours.
    pub balance_score: f64,
    /// Constraint-compliance score (0–100).
    pub constraint_score: f64,
    /// Weighted composite the health band derives from (0–100).
    pub composite: f64,
    /// Hard violations in the underlying result.
    pub hard_violations: usize,
    /// Soft violations in the underlying result.
    pub soft_violations: usize,
    /// Ordinal health classification of the composite.
    pub health: HealthBand,
    /// Threshold-derived problems, worst first.
    pub concerns: Vec<Concern>,
    /// One suggested action per concern.
    pub recommendations: Vec<Recommendation>,
}

/// A persisted schedule: generation result plus its quality report.
///
/// This is the unit the [`crate::collab::ScheduleStore`] saves and the
/// comparator consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSchedule {
    /// Store-assigned identifier.
    pub id: String,
    /// Organization/department scope the schedule was generated for.
    pub scope: String,
    /// The generated plan.
    pub result: GenerationResult,
    /// The plan's quality assessment.
    pub quality: QualityReport,
}
