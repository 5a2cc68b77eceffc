//! Workforce rostering engine.
//!
//! Generates shift→employee assignment plans with a bounded-time greedy
//! heuristic, accounts hard/soft constraint violations, scores schedule
//! quality on a 0–100 scale, and compares competing schedules. Invoked as
//! a library by a surrounding service layer; entity CRUD, notification,
//! and authentication live elsewhere.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Shift`, `Employee`, `ShiftAssignment`,
//!   `GenerationResult`, `Violation`, `QualityReport`, `StoredSchedule`
//! - **`validation`**: Input integrity checks (duplicate IDs, empty time
//!   windows, missing roles)
//! - **`collab`**: External collaborator traits — constraint validator,
//!   coverage scorer, schedule store
//! - **`engine`**: Workload tracking, candidate ranking, greedy assignment
//! - **`evaluation`**: Quality scoring, health classification, comparison
//!
//! # Architecture
//!
//! One generation run is a single-threaded sequential computation: each
//! shift's candidate scores depend on the workload committed for earlier
//! shifts, so shifts cannot be assigned in parallel within a run.
//! Independent runs (per organization or department) share no state.
//!
//! The engine is a heuristic, not a solver: it walks shifts once in
//! priority order and never backtracks, so low coverage is a business
//! signal reported on the result, never an error.

pub mod collab;
pub mod engine;
pub mod evaluation;
pub mod models;
pub mod validation;

pub use collab::{ConstraintValidator, CoverageScorer, ScheduleStore};
pub use engine::{GenerateError, GenerationParams, ScheduleGenerator};
pub use evaluation::{QualityEvaluator, ScheduleComparator};
pub use models::{Employee, GenerationResult, QualityReport, Shift, StoredSchedule};
