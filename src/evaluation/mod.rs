//! Quality evaluation and schedule comparison.
//!
//! [`QualityEvaluator`] grades one finished generation result; the
//! [`ScheduleComparator`] ranks two evaluated schedules against each
//! other. Both are pure derivations, recomputed on demand.

mod compare;
mod quality;

pub use compare::{ScheduleComparator, ScheduleComparison};
pub use quality::{QualityConfig, QualityEvaluator};
