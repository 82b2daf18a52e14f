//! End-to-end symptom assessment.
//!
//! # Responsibility
//! - Run analysis, risk scoring, catalog diagnosis and keyword routing
//!   over one description.
//! - Turn a finished report into a visit for the active user.
//!
//! # Invariants
//! - Assessment is pure; only `record_visit` touches storage.
//! - Raw descriptions are never logged.

use crate::model::advice::Recommendation;
use crate::model::assessment::RiskLevel;
use crate::model::visit::{VisitRecord, MILLIS_PER_DAY};
use crate::repo::patient_repo::PatientRepository;
use crate::service::patient_service::{NewVisit, PatientResult, PatientService};
use crate::triage::analysis::{analyze, SymptomAnalysis};
use crate::triage::diagnosis::{diagnose, DiagnosisResult};
use crate::triage::matcher::{contains_medical_symptoms, is_contagious, route_department};
use crate::triage::risk::{assess as assess_risk, RiskAssessment};
use serde::Serialize;

const HIGH_RISK_FOLLOW_UP_DAYS: i64 = 2;

/// Everything derived from one symptom description.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageReport {
    pub analysis: SymptomAnalysis,
    pub risk: RiskAssessment,
    pub diagnosis: DiagnosisResult,
    /// Label from the keyword dictionary, e.g. `Cardiology`.
    pub keyword_department: String,
    pub contagious: bool,
    pub is_medical: bool,
}

/// Assesses one description without touching storage.
pub fn assess_text(text: &str) -> TriageReport {
    let analysis = analyze(text);
    let risk = assess_risk(&analysis);
    let report = TriageReport {
        diagnosis: diagnose(text),
        keyword_department: route_department(text).to_string(),
        contagious: is_contagious(text),
        is_medical: contains_medical_symptoms(text),
        analysis,
        risk,
    };
    log::info!(
        "event=triage_assess module=triage status=ok text_len={} symptoms={} score={} level={}",
        text.len(),
        report.analysis.symptoms.len(),
        report.risk.risk_score,
        report.risk.risk_level
    );
    report
}

/// Maps a report onto the visit that records it.
///
/// High risk asks for a follow-up in two days; critical risk is flagged
/// without a date since care is needed immediately.
pub fn visit_from_report(report: &TriageReport, notes: impl Into<String>, now_ms: i64) -> NewVisit {
    let level = report.risk.risk_level;
    let follow_up_date = match level {
        RiskLevel::High => {
            Some(now_ms.saturating_add(HIGH_RISK_FOLLOW_UP_DAYS * MILLIS_PER_DAY))
        }
        _ => None,
    };
    NewVisit {
        date: now_ms,
        symptoms: report.analysis.symptoms.clone(),
        diagnosis: Some(report.diagnosis.reasoning.clone()),
        department: report.diagnosis.department.clone(),
        risk_level: level,
        risk_score: report.risk.risk_score,
        notes: notes.into(),
        follow_up_required: level.is_elevated(),
        follow_up_date,
    }
}

/// Assessment workflow bound to a patient store.
pub struct TriageService<'svc, R: PatientRepository> {
    patients: &'svc PatientService<R>,
}

impl<'svc, R: PatientRepository> TriageService<'svc, R> {
    pub fn new(patients: &'svc PatientService<R>) -> Self {
        Self { patients }
    }

    pub fn assess(&self, text: &str) -> TriageReport {
        assess_text(text)
    }

    /// Stores the report in the active user's history.
    pub fn record_visit(
        &self,
        report: &TriageReport,
        notes: impl Into<String>,
        now_ms: i64,
    ) -> PatientResult<VisitRecord> {
        self.patients
            .add_visit(visit_from_report(report, notes, now_ms))
    }

    /// Personalized advice for the symptoms and tier in `report`.
    pub fn advise(&self, report: &TriageReport, now_ms: i64) -> PatientResult<Vec<Recommendation>> {
        self.patients.personalized_advice(
            &report.analysis.symptoms,
            report.risk.risk_level,
            now_ms,
        )
    }
}
