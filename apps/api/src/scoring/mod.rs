// Dashboard heuristics: career readiness, job relevance, interview analysis.
// All scorers are pure weighted sums over typed inputs; no I/O.

pub mod handlers;
pub mod interview;
pub mod readiness;
pub mod recency;
pub mod relevance;
