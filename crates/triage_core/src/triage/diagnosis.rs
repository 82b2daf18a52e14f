//! Confidence-scored routing over the department catalog.
//!
//! Each department accumulates points from its common symptoms: direct
//! phrase hits weigh 20, single medical words that appear inside a common
//! symptom weigh 10 each. Emergency and pediatrics get bonuses for severe
//! and child-related wording. The highest strictly-greater score wins.

use super::{contains_any, normalize_text, strip_non_word};
use crate::model::department::{catalog, DepartmentInfo, DepartmentKey, UrgencyLevel};
use serde::Serialize;

const DIRECT_MATCH_POINTS: u32 = 20;
const KEYWORD_MATCH_POINTS: u32 = 10;
const EMERGENCY_BONUS: u32 = 50;
const PEDIATRIC_BONUS: u32 = 30;
const MAX_CONFIDENCE: u32 = 100;

const MEDICAL_WORDS: &[&str] = &[
    "pain",
    "ache",
    "hurt",
    "sore",
    "burning",
    "stabbing",
    "sharp",
    "dull",
    "fever",
    "temperature",
    "hot",
    "cold",
    "chills",
    "sweating",
    "nausea",
    "vomiting",
    "sick",
    "dizzy",
    "headache",
    "migraine",
    "breathing",
    "breath",
    "cough",
    "wheeze",
    "congestion",
    "heart",
    "chest",
    "palpitations",
    "racing",
    "irregular",
    "joint",
    "muscle",
    "bone",
    "back",
    "neck",
    "shoulder",
    "knee",
    "rash",
    "skin",
    "itchy",
    "red",
    "swollen",
    "bump",
    "lump",
    "blood",
    "bleeding",
    "bruise",
    "cut",
    "wound",
    "injury",
    "child",
    "baby",
    "infant",
    "kid",
    "pediatric",
    "young",
];

const SEVERE_KEYWORDS: &[&str] = &[
    "severe",
    "intense",
    "unbearable",
    "crushing",
    "stabbing",
    "can't breathe",
    "difficulty breathing",
    "unconscious",
    "bleeding heavily",
    "heart attack",
    "stroke",
    "emergency",
    "urgent",
    "critical",
    "life threatening",
];

const CHILD_KEYWORDS: &[&str] = &[
    "child",
    "baby",
    "infant",
    "kid",
    "toddler",
    "pediatric",
    "young",
    "my son",
    "my daughter",
    "years old",
    "months old",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisResult {
    pub department: String,
    pub confidence: u8,
    pub reasoning: String,
    pub urgency_level: UrgencyLevel,
    pub floor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
}

/// Picks the best catalog department for a description.
pub fn diagnose(text: &str) -> DiagnosisResult {
    let normalized = normalize_text(text);
    let keywords = medical_words(&normalized);
    let severe = contains_any(&normalized, SEVERE_KEYWORDS);
    let child = contains_any(&normalized, CHILD_KEYWORDS);

    let mut best = (DepartmentKey::GeneralMedicine, 0u32);
    for info in catalog() {
        let mut confidence = 0;

        for symptom in info.common_symptoms {
            if normalized.contains(symptom) {
                confidence += DIRECT_MATCH_POINTS;
            }
        }
        for keyword in &keywords {
            for symptom in info.common_symptoms {
                if symptom.contains(keyword.as_str()) {
                    confidence += KEYWORD_MATCH_POINTS;
                }
            }
        }
        if info.key == DepartmentKey::Emergency && severe {
            confidence += EMERGENCY_BONUS;
        }
        if info.key == DepartmentKey::Pediatrics && child {
            confidence += PEDIATRIC_BONUS;
        }

        if confidence > best.1 {
            best = (info.key, confidence);
        }
    }

    let selected = best.0.info();
    DiagnosisResult {
        department: selected.name.to_string(),
        // Bounded by MAX_CONFIDENCE.
        confidence: best.1.min(MAX_CONFIDENCE) as u8,
        reasoning: reasoning(&normalized, selected),
        urgency_level: selected.urgency,
        floor: selected.floor.to_string(),
        additional_info: Some(additional_info(selected.urgency).to_string()),
    }
}

/// Spoken-style reply for the video agent.
pub fn response_text(diagnosis: &DiagnosisResult) -> String {
    let mut response = format!(
        "I understand. Based on what you've described, it would be best for you to visit our {}. They are located on the {}. ",
        diagnosis.department, diagnosis.floor
    );
    response.push_str(match diagnosis.urgency_level {
        UrgencyLevel::Emergency => "This appears to be an urgent situation. Please proceed immediately to the Emergency Department. ",
        UrgencyLevel::Urgent => "I recommend scheduling an appointment as soon as possible. ",
        UrgencyLevel::Routine => "You can schedule a routine appointment during regular hours. ",
    });
    if let Some(info) = &diagnosis.additional_info {
        response.push_str(info);
        response.push(' ');
    }
    response.push_str(
        "Would you like me to provide you with directions or information about current waiting times?",
    );
    response
}

fn medical_words(normalized: &str) -> Vec<String> {
    normalized
        .split_whitespace()
        .map(strip_non_word)
        .filter(|word| MEDICAL_WORDS.contains(&word.as_str()))
        .collect()
}

fn reasoning(normalized: &str, department: &DepartmentInfo) -> String {
    let mut reasons = Vec::new();
    if department.urgency == UrgencyLevel::Emergency {
        reasons.push("symptoms indicate potential emergency condition".to_string());
    }
    reasons.push(format!(
        "symptoms align with {} specialization",
        department.name.to_lowercase()
    ));
    if department
        .common_symptoms
        .iter()
        .any(|symptom| normalized.contains(symptom))
    {
        reasons.push("direct symptom match found".to_string());
    }
    format!("Recommended because {}.", reasons.join(", "))
}

fn additional_info(urgency: UrgencyLevel) -> &'static str {
    match urgency {
        UrgencyLevel::Emergency => {
            "Please seek immediate medical attention. If this is life-threatening, call 911."
        }
        UrgencyLevel::Urgent => {
            "Please schedule an appointment as soon as possible or visit urgent care."
        }
        UrgencyLevel::Routine => "You can schedule a routine appointment during regular hours.",
    }
}
