//! Domain model shared by triage, persistence and advice.
//!
//! # Responsibility
//! - Define the static department catalog.
//! - Define persisted patient records (profile, visit history).
//! - Define the graded scales used by analysis and risk scoring.
//!
//! # Invariants
//! - Persisted records are identified by stable v4 UUIDs.
//! - Timestamps are Unix epoch milliseconds.

pub mod advice;
pub mod assessment;
pub mod department;
pub mod profile;
pub mod visit;
