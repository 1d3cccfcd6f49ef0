//! Verification orchestration.
//!
//! One request, two concurrent channels: document extraction and face
//! matching run as independent tasks and are joined before aggregation
//! (a fork/join, not a pipeline). The orchestrator converts channel failures
//! into rejected results (its public contract never raises for expected
//! failure modes), aggregates field agreement and facial similarity into an
//! overall confidence, and applies the configured acceptance threshold.

pub mod narrative;
pub mod orchestrator;

pub use orchestrator::VerificationOrchestrator;
