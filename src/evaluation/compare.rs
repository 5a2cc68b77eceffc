//! Comparison of two evaluated schedules.
//!
//! Computes signed per-metric deltas (B − A) and picks a winner by a
//! fixed tie-break order: quality score first, coverage on an exact
//! quality tie. Advisory only; nothing is merged or re-optimized.

use serde::{Deserialize, Serialize};

use crate::models::StoredSchedule;

/// Outcome of comparing schedule A against schedule B.
///
/// All deltas are `B − A`: positive means B is ahead on that metric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleComparison {
    /// ID of schedule A.
    pub schedule_a: String,
    /// ID of schedule B.
    pub schedule_b: String,
    /// ID of the schedule judged better.
    pub better_id: String,
    /// Quality-score delta.
    pub quality_delta: f64,
    /// Coverage-percentage delta.
    pub coverage_delta: f64,
    /// Workload-balance delta.
    pub balance_delta: f64,
    /// Total-violation delta (hard + soft).
    pub violation_delta: i64,
    /// Human-readable verdict naming the winner and its quality margin.
    pub recommendation: String,
}

/// Compares two previously generated and evaluated schedules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleComparator;

impl ScheduleComparator {
    /// Creates a comparator.
    pub fn new() -> Self {
        Self
    }

    /// Compares `a` against `b`.
    ///
    /// Winner: higher quality score; on an exact quality tie, higher
    /// coverage; when both are exactly equal the incumbent `a` wins.
    pub fn compare(&self, a: &StoredSchedule, b: &StoredSchedule) -> ScheduleComparison {
        let quality_delta = b.quality.quality_score - a.quality.quality_score;
        let coverage_delta = b.quality.coverage_pct - a.quality.coverage_pct;
        let balance_delta = b.quality.balance_score - a.quality.balance_score;
        let violations = |s: &StoredSchedule| -> i64 {
            (s.quality.hard_violations + s.quality.soft_violations) as i64
        };
        let violation_delta = violations(b) - violations(a);

        let b_wins = if quality_delta != 0.0 {
            quality_delta > 0.0
        } else {
            coverage_delta > 0.0
        };
        let (winner, margin) = if b_wins {
            (&b.id, quality_delta)
        } else {
            (&a.id, -quality_delta)
        };

        let recommendation = if quality_delta == 0.0 && coverage_delta == 0.0 {
            format!(
                "Schedules '{}' and '{}' are equivalent on quality and coverage; keeping '{}'",
                a.id, b.id, winner
            )
        } else {
            format!(
                "Schedule '{winner}' is better by {margin:.2} quality point(s)"
            )
        };

        ScheduleComparison {
            schedule_a: a.id.clone(),
            schedule_b: b.id.clone(),
            better_id: winner.clone(),
            quality_delta,
            coverage_delta,
            balance_delta,
            violation_delta,
            recommendation,
        }
    }
}
