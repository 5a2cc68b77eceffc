//! Schedule generation engine.
//!
//! A single-threaded greedy pipeline: the [`CandidateRanker`] scores the
//! pool per shift, the [`ScheduleGenerator`] walks shifts in priority
//! order and commits the best acceptable candidate, and the
//! [`WorkloadTracker`] threads run-scoped counters through the loop so
//! later shifts see earlier commitments.
//!
//! Independent runs share no state and may execute concurrently.

mod greedy;
mod ranker;
mod workload;

pub use greedy::{GenerateError, GenerationParams, ScheduleGenerator};
pub use ranker::{AssignmentAttempt, CandidateRanker, ScoreWeights};
pub use workload::{EmployeeWorkload, WorkloadTracker, DEFAULT_REST_DAYS};
