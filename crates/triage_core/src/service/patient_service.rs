//! Patient profile and visit-history use cases.
//!
//! # Responsibility
//! - Own the active-user workflow on top of `PatientRepository`.
//! - Derive personalized advice and health insights from stored records.
//! - Export and import a portable JSON snapshot.
//!
//! # Invariants
//! - Visits are only appended for an active user.
//! - Import parses and validates the whole document before writing anything.
//! - Log lines carry counts and ids, never names, symptoms or conditions.

use crate::config::AdviceConfig;
use crate::model::advice::Recommendation;
use crate::model::assessment::RiskLevel;
use crate::model::profile::{EmergencyContact, UserId, UserProfile, ANONYMOUS_NAME};
use crate::model::visit::{VisitRecord, MILLIS_PER_DAY};
use crate::repo::patient_repo::PatientRepository;
use crate::repo::RepoError;
use crate::service::advice::build_advice;
use crate::service::insights::{compute_insights, HealthInsights};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub const EXPORT_VERSION: &str = "1.0";

pub type PatientResult<T> = Result<T, PatientServiceError>;

#[derive(Debug)]
pub enum PatientServiceError {
    NoActiveUser,
    ProfileNotFound(UserId),
    Repo(RepoError),
    InvalidImport(String),
    Export(serde_json::Error),
}

impl Display for PatientServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoActiveUser => write!(f, "no active user profile"),
            Self::ProfileNotFound(id) => write!(f, "profile not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InvalidImport(message) => write!(f, "invalid import document: {message}"),
            Self::Export(err) => write!(f, "failed to encode export document: {err}"),
        }
    }
}

impl Error for PatientServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Export(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for PatientServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Fields accepted when creating a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewProfile {
    /// Blank or missing names fall back to `ANONYMOUS_NAME`.
    pub name: Option<String>,
    pub age: Option<u32>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub allergies: Vec<String>,
    pub medications: Vec<String>,
    pub chronic_conditions: Vec<String>,
    pub emergency_contact: Option<EmergencyContact>,
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub allergies: Option<Vec<String>>,
    pub medications: Option<Vec<String>>,
    pub chronic_conditions: Option<Vec<String>>,
    pub emergency_contact: Option<EmergencyContact>,
}

/// Visit fields supplied by the caller; id and user are assigned on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVisit {
    pub date: i64,
    pub symptoms: Vec<String>,
    pub diagnosis: Option<String>,
    pub department: String,
    pub risk_level: RiskLevel,
    pub risk_score: u8,
    pub notes: String,
    pub follow_up_required: bool,
    pub follow_up_date: Option<i64>,
}

/// Portable snapshot of one user's records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    #[serde(default)]
    pub profile: Option<UserProfile>,
    #[serde(default)]
    pub history: Option<Vec<VisitRecord>>,
    #[serde(default)]
    pub export_date: Option<i64>,
    #[serde(default)]
    pub version: Option<String>,
}

/// Use-case service for patient records.
pub struct PatientService<R: PatientRepository> {
    repo: R,
    windows: AdviceConfig,
}

impl<R: PatientRepository> PatientService<R> {
    /// Creates a service with default advice windows.
    pub fn new(repo: R) -> Self {
        Self::with_windows(repo, AdviceConfig::default())
    }

    pub fn with_windows(repo: R, windows: AdviceConfig) -> Self {
        Self { repo, windows }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Creates and stores a profile, making it the active user.
    pub fn create_profile(&self, request: NewProfile, now_ms: i64) -> PatientResult<UserProfile> {
        let name = request
            .name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| ANONYMOUS_NAME.to_string());

        let mut profile = UserProfile::new(name, now_ms);
        profile.age = request.age;
        profile.date_of_birth = request.date_of_birth;
        profile.gender = request.gender;
        profile.allergies = request.allergies;
        profile.medications = request.medications;
        profile.chronic_conditions = request.chronic_conditions;
        profile.emergency_contact = request.emergency_contact;

        self.repo.save_profile(&profile)?;
        self.repo.set_current_user(profile.id)?;
        log::info!(
            "event=profile_create module=patient status=ok user_id={}",
            profile.id
        );
        Ok(profile)
    }

    pub fn current_user_id(&self) -> PatientResult<Option<UserId>> {
        Ok(self.repo.current_user_id()?)
    }

    /// Profile of the active user, if any.
    pub fn current_profile(&self) -> PatientResult<Option<UserProfile>> {
        match self.repo.current_user_id()? {
            Some(id) => Ok(self.repo.load_profile(id)?),
            None => Ok(None),
        }
    }

    pub fn profile(&self, id: UserId) -> PatientResult<Option<UserProfile>> {
        Ok(self.repo.load_profile(id)?)
    }

    /// All stored profiles in key order.
    pub fn list_profiles(&self) -> PatientResult<Vec<UserProfile>> {
        let mut profiles = Vec::new();
        for id in self.repo.list_profile_ids()? {
            if let Some(profile) = self.repo.load_profile(id)? {
                profiles.push(profile);
            }
        }
        Ok(profiles)
    }

    /// Makes an existing profile the active user.
    pub fn switch_user(&self, id: UserId) -> PatientResult<UserProfile> {
        let profile = self
            .repo
            .load_profile(id)?
            .ok_or(PatientServiceError::ProfileNotFound(id))?;
        self.repo.set_current_user(id)?;
        log::info!("event=user_switch module=patient status=ok user_id={id}");
        Ok(profile)
    }

    /// Applies a partial update to the active profile.
    pub fn update_profile(
        &self,
        update: ProfileUpdate,
        now_ms: i64,
    ) -> PatientResult<UserProfile> {
        let id = self.active_user()?;
        let mut profile = self
            .repo
            .load_profile(id)?
            .ok_or(PatientServiceError::ProfileNotFound(id))?;

        if let Some(name) = update.name {
            profile.name = name;
        }
        if let Some(age) = update.age {
            profile.age = Some(age);
        }
        if let Some(date_of_birth) = update.date_of_birth {
            profile.date_of_birth = Some(date_of_birth);
        }
        if let Some(gender) = update.gender {
            profile.gender = Some(gender);
        }
        if let Some(allergies) = update.allergies {
            profile.allergies = allergies;
        }
        if let Some(medications) = update.medications {
            profile.medications = medications;
        }
        if let Some(conditions) = update.chronic_conditions {
            profile.chronic_conditions = conditions;
        }
        if let Some(contact) = update.emergency_contact {
            profile.emergency_contact = Some(contact);
        }
        profile.last_updated = now_ms.max(profile.created_at);

        self.repo.save_profile(&profile)?;
        log::info!("event=profile_update module=patient status=ok user_id={id}");
        Ok(profile)
    }

    /// Appends a visit to the active user's history.
    pub fn add_visit(&self, visit: NewVisit) -> PatientResult<VisitRecord> {
        let id = self.active_user()?;
        let record = VisitRecord {
            id: Uuid::new_v4(),
            user_id: id,
            date: visit.date,
            symptoms: visit.symptoms,
            diagnosis: visit.diagnosis,
            department: visit.department,
            risk_level: visit.risk_level,
            risk_score: visit.risk_score,
            notes: visit.notes,
            follow_up_required: visit.follow_up_required,
            follow_up_date: visit.follow_up_date,
        };
        record.validate().map_err(RepoError::from)?;

        let mut history = self.repo.load_history(id)?;
        history.push(record.clone());
        self.repo.save_history(id, &history)?;
        log::info!(
            "event=visit_add module=patient status=ok user_id={id} visits={} risk_level={}",
            history.len(),
            record.risk_level
        );
        Ok(record)
    }

    /// History of the active user; empty when nobody is active.
    pub fn history(&self) -> PatientResult<Vec<VisitRecord>> {
        match self.repo.current_user_id()? {
            Some(id) => Ok(self.repo.load_history(id)?),
            None => Ok(Vec::new()),
        }
    }

    pub fn history_for(&self, id: UserId) -> PatientResult<Vec<VisitRecord>> {
        Ok(self.repo.load_history(id)?)
    }

    /// Advice for the given symptoms against the active user's records.
    pub fn personalized_advice(
        &self,
        symptoms: &[String],
        risk_level: RiskLevel,
        now_ms: i64,
    ) -> PatientResult<Vec<Recommendation>> {
        let profile = self.current_profile()?;
        let history = match &profile {
            Some(profile) => self.repo.load_history(profile.id)?,
            None => Vec::new(),
        };
        let window = self.windows.recent_days.saturating_mul(MILLIS_PER_DAY);
        let cutoff = now_ms.saturating_sub(window);
        let recent: Vec<&VisitRecord> = history
            .iter()
            .filter(|record| record.date >= cutoff)
            .collect();

        let advice = build_advice(
            profile.as_ref(),
            &recent,
            &history,
            symptoms,
            risk_level,
            now_ms,
        );
        log::debug!(
            "event=advice_build module=patient status=ok symptoms={} recommendations={}",
            symptoms.len(),
            advice.len()
        );
        Ok(advice)
    }

    /// Summary of the active user's history; `None` when there is none.
    pub fn health_insights(&self, now_ms: i64) -> PatientResult<Option<HealthInsights>> {
        let history = self.history()?;
        let chronic = self
            .current_profile()?
            .map(|profile| profile.chronic_conditions.len())
            .unwrap_or(0);
        Ok(compute_insights(&history, chronic, self.windows, now_ms))
    }

    /// Snapshot of the active user's profile and history.
    ///
    /// History is read by the active id, so it is kept even when the
    /// profile blob is missing.
    pub fn export(&self, now_ms: i64) -> PatientResult<ExportDocument> {
        let id = self.active_user()?;
        let profile = self.repo.load_profile(id)?;
        let history = self.repo.load_history(id)?;
        Ok(ExportDocument {
            profile,
            history: Some(history),
            export_date: Some(now_ms),
            version: Some(EXPORT_VERSION.to_string()),
        })
    }

    /// Pretty-printed JSON form of `export`.
    pub fn export_json(&self, now_ms: i64) -> PatientResult<String> {
        let document = self.export(now_ms)?;
        serde_json::to_string_pretty(&document).map_err(PatientServiceError::Export)
    }

    /// Restores a snapshot produced by `export`.
    ///
    /// The profile, when present, becomes the active user. History records
    /// are re-owned by the target user. Returns the target user id.
    pub fn import(&self, json: &str) -> PatientResult<UserId> {
        let document: ExportDocument = serde_json::from_str(json)
            .map_err(|err| PatientServiceError::InvalidImport(err.to_string()))?;

        if let Some(version) = &document.version {
            if version != EXPORT_VERSION {
                return Err(PatientServiceError::InvalidImport(format!(
                    "unsupported version `{version}`"
                )));
            }
        }
        if let Some(profile) = &document.profile {
            profile
                .validate()
                .map_err(|err| PatientServiceError::InvalidImport(err.to_string()))?;
        }

        let target = match &document.profile {
            Some(profile) => profile.id,
            None => self.active_user()?,
        };
        let history: Option<Vec<VisitRecord>> = document.history.map(|records| {
            records
                .into_iter()
                .map(|mut record| {
                    record.user_id = target;
                    record
                })
                .collect()
        });
        if let Some(records) = &history {
            for record in records {
                record
                    .validate()
                    .map_err(|err| PatientServiceError::InvalidImport(err.to_string()))?;
            }
        }

        if let Some(profile) = &document.profile {
            self.repo.save_profile(profile)?;
            self.repo.set_current_user(profile.id)?;
        }
        if let Some(records) = &history {
            self.repo.save_history(target, records)?;
        }
        log::info!(
            "event=records_import module=patient status=ok user_id={target} visits={}",
            history.as_ref().map_or(0, Vec::len)
        );
        Ok(target)
    }

    /// Removes the active user's profile, history and the active pointer.
    pub fn clear(&self) -> PatientResult<()> {
        if let Some(id) = self.repo.current_user_id()? {
            self.repo.remove_profile(id)?;
            self.repo.remove_history(id)?;
            log::info!("event=records_clear module=patient status=ok user_id={id}");
        }
        self.repo.clear_current_user()?;
        Ok(())
    }

    fn active_user(&self) -> PatientResult<UserId> {
        self.repo
            .current_user_id()?
            .ok_or(PatientServiceError::NoActiveUser)
    }
}

#[cfg(test)]
mod tests {
    use super::{NewProfile, NewVisit, PatientService, PatientServiceError, ProfileUpdate};
    use crate::config::AdviceConfig;
    use crate::model::advice::AdvicePriority;
    use crate::model::assessment::RiskLevel;
    use crate::model::profile::ANONYMOUS_NAME;
    use crate::model::visit::MILLIS_PER_DAY;
    use crate::repo::kv_repo::MemoryKvStore;
    use crate::repo::patient_repo::KvPatientRepository;

    const NOW: i64 = 1_710_460_800_000;

    fn service() -> PatientService<KvPatientRepository<MemoryKvStore>> {
        PatientService::new(KvPatientRepository::new(MemoryKvStore::new()))
    }

    fn visit(days_ago: i64, symptoms: &[&str], level: RiskLevel) -> NewVisit {
        NewVisit {
            date: NOW - days_ago * MILLIS_PER_DAY,
            symptoms: symptoms.iter().map(|s| (*s).to_string()).collect(),
            diagnosis: None,
            department: "General Medicine Department".to_string(),
            risk_level: level,
            risk_score: 20,
            notes: String::new(),
            follow_up_required: false,
            follow_up_date: None,
        }
    }

    #[test]
    fn blank_name_falls_back_to_anonymous() {
        let service = service();
        let profile = service
            .create_profile(
                NewProfile {
                    name: Some("   ".to_string()),
                    ..NewProfile::default()
                },
                NOW,
            )
            .expect("create");
        assert_eq!(profile.name, ANONYMOUS_NAME);
        assert_eq!(
            service.current_user_id().expect("current"),
            Some(profile.id)
        );
    }

    #[test]
    fn add_visit_without_user_is_rejected() {
        let err = service()
            .add_visit(visit(0, &["cough"], RiskLevel::Low))
            .expect_err("no active user");
        assert!(matches!(err, PatientServiceError::NoActiveUser));
    }

    #[test]
    fn update_keeps_unset_fields() {
        let service = service();
        service
            .create_profile(
                NewProfile {
                    name: Some("Sam".to_string()),
                    allergies: vec!["penicillin".to_string()],
                    ..NewProfile::default()
                },
                NOW,
            )
            .expect("create");

        let updated = service
            .update_profile(
                ProfileUpdate {
                    age: Some(40),
                    ..ProfileUpdate::default()
                },
                NOW + 1,
            )
            .expect("update");
        assert_eq!(updated.name, "Sam");
        assert_eq!(updated.age, Some(40));
        assert_eq!(updated.allergies, vec!["penicillin".to_string()]);
        assert_eq!(updated.last_updated, NOW + 1);
    }

    #[test]
    fn advice_without_profile_suggests_creating_one() {
        let advice = service()
            .personalized_advice(&["cough".to_string()], RiskLevel::Low, NOW)
            .expect("advice");
        assert_eq!(advice.len(), 1);
        assert_eq!(advice[0].priority, AdvicePriority::Low);
        assert!(!advice[0].action_required);
    }

    #[test]
    fn senior_with_high_risk_gets_urgent_advice() {
        let service = service();
        service
            .create_profile(
                NewProfile {
                    age: Some(70),
                    ..NewProfile::default()
                },
                NOW,
            )
            .expect("create");

        let advice = service
            .personalized_advice(&["dizziness".to_string()], RiskLevel::High, NOW)
            .expect("advice");
        let priorities: Vec<AdvicePriority> = advice.iter().map(|a| a.priority).collect();
        assert_eq!(
            priorities,
            vec![AdvicePriority::Medium, AdvicePriority::Urgent]
        );
    }

    #[test]
    fn recurrence_ignores_visits_outside_window() {
        let service = service();
        service
            .create_profile(NewProfile::default(), NOW)
            .expect("create");
        service
            .add_visit(visit(45, &["headache"], RiskLevel::Low))
            .expect("old visit");
        service
            .add_visit(visit(3, &["headache"], RiskLevel::Low))
            .expect("recent visit");

        let advice = service
            .personalized_advice(&["headache".to_string()], RiskLevel::Low, NOW)
            .expect("advice");
        assert!(advice.is_empty());

        service
            .add_visit(visit(1, &["headache"], RiskLevel::Low))
            .expect("second recent visit");
        let advice = service
            .personalized_advice(&["headache".to_string()], RiskLevel::Low, NOW)
            .expect("advice");
        assert_eq!(advice.len(), 1);
        assert!(advice[0].message.contains("headache"));
    }

    #[test]
    fn unbounded_windows_do_not_overflow() {
        let service = PatientService::with_windows(
            KvPatientRepository::new(MemoryKvStore::new()),
            AdviceConfig {
                recent_days: i64::MAX,
                trend_months: i64::MAX,
            },
        );
        service
            .create_profile(NewProfile::default(), NOW)
            .expect("create");
        service
            .add_visit(visit(1, &["cough"], RiskLevel::High))
            .expect("visit");

        service
            .personalized_advice(&["cough".to_string()], RiskLevel::Low, NOW)
            .expect("advice");
        let insights = service
            .health_insights(NOW)
            .expect("insights")
            .expect("history present");
        assert_eq!(insights.health_score, 90);
        assert_eq!(insights.risk_trends.len(), 1);
    }

    #[test]
    fn export_without_active_user_is_rejected() {
        let err = service().export(NOW).expect_err("no active user");
        assert!(matches!(err, PatientServiceError::NoActiveUser));
    }

    #[test]
    fn clear_removes_everything() {
        let service = service();
        service
            .create_profile(NewProfile::default(), NOW)
            .expect("create");
        service
            .add_visit(visit(0, &["cough"], RiskLevel::Low))
            .expect("visit");

        service.clear().expect("clear");
        assert!(service.current_profile().expect("profile").is_none());
        assert!(service.history().expect("history").is_empty());
        assert!(service.repo().store().is_empty());
    }
}
