//! Personalized advice rules over a profile and its visit history.
//!
//! All comparisons are case-insensitive substring checks, matching how the
//! triage keyword tables work.

use crate::model::advice::{AdvicePriority, Recommendation};
use crate::model::assessment::RiskLevel;
use crate::model::profile::UserProfile;
use crate::model::visit::VisitRecord;

const RECURRENCE_THRESHOLD: usize = 2;
const SENIOR_AGE: u32 = 65;
const ADULT_AGE: u32 = 18;

const MEDICATION_EFFECTS: &[(&str, &[&str])] = &[
    ("aspirin", &["stomach pain", "nausea", "bleeding"]),
    ("ibuprofen", &["stomach pain", "headache", "dizziness"]),
    ("acetaminophen", &["nausea", "liver pain"]),
    (
        "blood pressure medication",
        &["dizziness", "fatigue", "headache"],
    ),
    (
        "antidepressant",
        &["nausea", "dizziness", "headache", "fatigue"],
    ),
];

const CONDITION_SYMPTOMS: &[(&str, &[&str])] = &[
    (
        "diabetes",
        &["fatigue", "thirst", "frequent urination", "blurred vision"],
    ),
    ("hypertension", &["headache", "dizziness", "chest pain"]),
    (
        "asthma",
        &["shortness of breath", "wheezing", "cough", "chest tightness"],
    ),
    ("arthritis", &["joint pain", "stiffness", "swelling"]),
    (
        "heart disease",
        &["chest pain", "shortness of breath", "fatigue", "palpitations"],
    ),
];

/// Builds the full advice list for the current symptoms.
///
/// `recent` must already be filtered to the recency window; `history` is the
/// complete history used for follow-up checks.
pub fn build_advice(
    profile: Option<&UserProfile>,
    recent: &[&VisitRecord],
    history: &[VisitRecord],
    symptoms: &[String],
    risk_level: RiskLevel,
    now_ms: i64,
) -> Vec<Recommendation> {
    let Some(profile) = profile else {
        return vec![Recommendation::new(
            "Consider creating a user profile to receive personalized medical guidance based on your history.",
            AdvicePriority::Low,
            "No profile found",
            false,
        )];
    };

    let mut advice = Vec::new();

    let recurring = recurring_symptoms(symptoms, recent);
    if !recurring.is_empty() {
        advice.push(Recommendation::new(
            format!(
                "You've experienced similar symptoms recently: {}. Consider discussing this pattern with your doctor for a comprehensive evaluation.",
                recurring.join(", ")
            ),
            AdvicePriority::Medium,
            "Medical history pattern",
            true,
        ));
    }

    if !profile.medications.is_empty()
        && !medications_with_overlap(symptoms, &profile.medications).is_empty()
    {
        advice.push(Recommendation::new(
            format!(
                "Your current medications ({}) may be relevant to your symptoms. Please inform your healthcare provider about all medications you're taking.",
                profile.medications.join(", ")
            ),
            AdvicePriority::High,
            "Current medications",
            true,
        ));
    }

    if !profile.allergies.is_empty() {
        advice.push(Recommendation::new(
            format!(
                "Remember to inform healthcare providers about your known allergies: {}.",
                profile.allergies.join(", ")
            ),
            AdvicePriority::Medium,
            "Known allergies",
            false,
        ));
    }

    let conditions = relevant_conditions(symptoms, &profile.chronic_conditions);
    if !conditions.is_empty() {
        advice.push(Recommendation::new(
            format!(
                "Your chronic conditions ({}) may be related to your current symptoms. Consider consulting your specialist.",
                conditions.join(", ")
            ),
            AdvicePriority::High,
            "Chronic conditions",
            true,
        ));
    }

    if let Some(age) = profile.age {
        advice.extend(age_advice(age, risk_level));
    }

    let overdue = history
        .iter()
        .filter(|record| record.is_follow_up_overdue(now_ms))
        .count();
    if overdue > 0 {
        advice.push(Recommendation::new(
            format!(
                "You have {overdue} overdue follow-up appointment(s). Please schedule these as soon as possible."
            ),
            AdvicePriority::Urgent,
            "Overdue follow-ups",
            true,
        ));
    }

    advice
}

/// Current symptoms seen in at least two recent visits.
pub fn recurring_symptoms(symptoms: &[String], recent: &[&VisitRecord]) -> Vec<String> {
    symptoms
        .iter()
        .filter(|symptom| {
            let needle = symptom.to_lowercase();
            let occurrences = recent
                .iter()
                .filter(|record| {
                    record
                        .symptoms
                        .iter()
                        .any(|past| past.to_lowercase().contains(needle.as_str()))
                })
                .count();
            occurrences >= RECURRENCE_THRESHOLD
        })
        .cloned()
        .collect()
}

/// Medications whose known side effects overlap the current symptoms.
pub fn medications_with_overlap(symptoms: &[String], medications: &[String]) -> Vec<String> {
    matching_entries(symptoms, medications, MEDICATION_EFFECTS)
}

/// Chronic conditions whose typical symptoms overlap the current symptoms.
pub fn relevant_conditions(symptoms: &[String], conditions: &[String]) -> Vec<String> {
    matching_entries(symptoms, conditions, CONDITION_SYMPTOMS)
}

fn matching_entries(
    symptoms: &[String],
    entries: &[String],
    table: &[(&str, &[&str])],
) -> Vec<String> {
    let lowered: Vec<String> = symptoms.iter().map(|s| s.to_lowercase()).collect();
    let mut matched = Vec::new();
    for entry in entries {
        let entry_lower = entry.to_lowercase();
        for (kind, related) in table {
            if !entry_lower.contains(kind) {
                continue;
            }
            let overlaps = lowered
                .iter()
                .any(|symptom| related.iter().any(|item| symptom.contains(item)));
            if overlaps {
                matched.push(entry.clone());
            }
        }
    }
    matched
}

fn age_advice(age: u32, risk_level: RiskLevel) -> Vec<Recommendation> {
    let mut advice = Vec::new();

    if age >= SENIOR_AGE {
        advice.push(Recommendation::new(
            "As a senior, consider bringing a family member or caregiver to your appointment for support and to help remember important information.",
            AdvicePriority::Medium,
            "Age consideration",
            false,
        ));
        if risk_level.is_elevated() {
            advice.push(Recommendation::new(
                "Given your age and symptom severity, consider seeking immediate medical attention rather than waiting.",
                AdvicePriority::Urgent,
                "Age and risk level",
                true,
            ));
        }
    }

    if age < ADULT_AGE {
        advice.push(Recommendation::new(
            "As a minor, ensure a parent or guardian accompanies you to any medical appointments.",
            AdvicePriority::High,
            "Age requirement",
            true,
        ));
    }

    advice
}

#[cfg(test)]
mod tests {
    use super::{medications_with_overlap, recurring_symptoms, relevant_conditions};
    use crate::model::assessment::RiskLevel;
    use crate::model::visit::VisitRecord;
    use uuid::Uuid;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    fn visit(symptoms: &[&str]) -> VisitRecord {
        VisitRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            date: 0,
            symptoms: strings(symptoms),
            diagnosis: None,
            department: "Neurology Department".to_string(),
            risk_level: RiskLevel::Low,
            risk_score: 10,
            notes: String::new(),
            follow_up_required: false,
            follow_up_date: None,
        }
    }

    #[test]
    fn recurrence_needs_two_visits() {
        let first = visit(&["Severe Headache"]);
        let second = visit(&["headache", "nausea"]);
        let third = visit(&["nausea"]);
        let recent = vec![&first, &second, &third];

        let recurring = recurring_symptoms(&strings(&["headache", "cough", "nausea"]), &recent);
        assert_eq!(recurring, strings(&["headache", "nausea"]));
    }

    #[test]
    fn medication_overlap_matches_by_substring() {
        let meds = strings(&["Low-dose Aspirin", "Vitamin D"]);
        let hits = medications_with_overlap(&strings(&["nausea"]), &meds);
        assert_eq!(hits, strings(&["Low-dose Aspirin"]));
        assert!(medications_with_overlap(&strings(&["rash"]), &meds).is_empty());
    }

    #[test]
    fn chronic_condition_relevance() {
        let conditions = strings(&["Type 2 Diabetes", "Asthma"]);
        let hits = relevant_conditions(&strings(&["wheezing"]), &conditions);
        assert_eq!(hits, strings(&["Asthma"]));
    }
}
