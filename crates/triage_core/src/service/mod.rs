//! Use-case services.
//!
//! # Responsibility
//! - Orchestrate triage engines and repositories into use-case APIs.
//! - Keep CLI and agent-facing layers decoupled from storage details.

pub mod advice;
pub mod insights;
pub mod patient_service;
pub mod tool_service;
pub mod triage_service;
