//! Core domain logic for the symptom triage assistant.
//! This crate is the single source of truth for routing, scoring and
//! patient-record invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod triage;

pub use config::{load_config, parse_config, AdviceConfig, ConfigError, TriageConfig};
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{
    default_log_level, init_from_config, init_logging, logging_status, LoggingError,
};
pub use model::advice::{AdvicePriority, Recommendation};
pub use model::assessment::{RiskLevel, Severity, TimeToSeek, Urgency};
pub use model::department::{catalog, find_by_name, DepartmentInfo, DepartmentKey, UrgencyLevel};
pub use model::profile::{EmergencyContact, RecordValidationError, UserId, UserProfile};
pub use model::visit::{VisitId, VisitRecord};
pub use repo::kv_repo::{KvStore, MemoryKvStore, SqliteKvStore};
pub use repo::patient_repo::{KvPatientRepository, PatientRepository};
pub use repo::{RepoError, RepoResult};
pub use service::insights::HealthInsights;
pub use service::patient_service::{
    ExportDocument, NewProfile, NewVisit, PatientResult, PatientService, PatientServiceError,
    ProfileUpdate,
};
pub use service::tool_service::{dispatch, ToolCall, ToolError, UtteranceLog};
pub use service::triage_service::{assess_text, TriageReport, TriageService};
pub use triage::matcher::{chat_reply, route_department};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::{core_version, now_epoch_ms};

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn clock_is_past_2024() {
        assert!(now_epoch_ms() > 1_704_067_200_000);
    }
}
