//! Additive risk scoring over an analyzed symptom description.
//!
//! # Invariants
//! - `risk_score` is clamped to `0..=100`.
//! - `risk_level` and `time_to_seek` are pure functions of the clamped score.

use super::analysis::SymptomAnalysis;
use crate::model::assessment::{RiskLevel, Severity, TimeToSeek, Urgency};
use serde::Serialize;

const RED_FLAG_POINTS: u32 = 20;
const COMBINATION_POINTS: u32 = 25;
const DISTRESS_POINTS: u32 = 10;
const DISTRESS_SENTIMENT_BELOW: i32 = -2;
const MAX_SCORE: u32 = 100;

const RED_FLAGS: &[&str] = &[
    "chest pain",
    "difficulty breathing",
    "severe headache",
    "loss of consciousness",
    "severe bleeding",
    "severe allergic reaction",
    "stroke symptoms",
    "heart attack symptoms",
    "can't breathe",
    "crushing pain",
    "sudden severe pain",
];

const CRITICAL_COMBINATIONS: &[(&str, &str)] = &[
    ("chest pain", "shortness of breath"),
    ("chest pain", "difficulty breathing"),
    ("severe headache", "vision changes"),
    ("abdominal pain", "vomiting blood"),
    ("fever", "stiff neck"),
    ("confusion", "severe headache"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    pub risk_score: u8,
    pub recommendations: Vec<String>,
    /// Matched red-flag symptoms followed by matched combinations.
    pub red_flags: Vec<String>,
    pub time_to_seek: TimeToSeek,
}

fn severity_points(severity: Severity) -> u32 {
    match severity {
        Severity::Critical => 40,
        Severity::Severe => 30,
        Severity::Moderate => 15,
        Severity::Mild => 5,
    }
}

fn urgency_points(urgency: Urgency) -> u32 {
    match urgency {
        Urgency::Emergency => 35,
        Urgency::High => 25,
        Urgency::Medium => 10,
        Urgency::Low => 0,
    }
}

fn recommendations_for(level: RiskLevel) -> [&'static str; 3] {
    match level {
        RiskLevel::Critical => [
            "Seek emergency medical attention immediately",
            "Call 911 or go to the nearest emergency room",
            "Do not drive yourself - have someone else drive or call an ambulance",
        ],
        RiskLevel::High => [
            "Seek medical attention within the next few hours",
            "Contact your doctor or visit urgent care",
            "Monitor symptoms closely and seek immediate care if they worsen",
        ],
        RiskLevel::Medium => [
            "Schedule an appointment with your doctor within 1-2 days",
            "Monitor symptoms and seek care if they worsen",
            "Consider over-the-counter remedies if appropriate",
        ],
        RiskLevel::Low => [
            "Consider scheduling a routine appointment",
            "Monitor symptoms and practice self-care",
            "Seek care if symptoms persist or worsen",
        ],
    }
}

/// Scores one analysis.
pub fn assess(analysis: &SymptomAnalysis) -> RiskAssessment {
    let mut score = severity_points(analysis.severity) + urgency_points(analysis.urgency);
    let mut red_flags = Vec::new();

    for symptom in &analysis.symptoms {
        if RED_FLAGS.iter().any(|flag| symptom.contains(flag)) {
            score += RED_FLAG_POINTS;
            red_flags.push(symptom.clone());
        }
    }

    let mentions = |needle: &str| {
        analysis
            .symptoms
            .iter()
            .any(|symptom| symptom.contains(needle))
    };
    for (first, second) in CRITICAL_COMBINATIONS {
        if mentions(first) && mentions(second) {
            score += COMBINATION_POINTS;
            red_flags.push(format!("Critical combination: {first} + {second}"));
        }
    }

    if analysis.sentiment.score < DISTRESS_SENTIMENT_BELOW {
        score += DISTRESS_POINTS;
    }

    // Bounded by MAX_SCORE, so the narrowing cannot truncate.
    let risk_score = score.min(MAX_SCORE) as u8;
    let risk_level = RiskLevel::from_score(risk_score);

    RiskAssessment {
        risk_level,
        risk_score,
        recommendations: recommendations_for(risk_level)
            .iter()
            .map(|line| (*line).to_string())
            .collect(),
        red_flags,
        time_to_seek: TimeToSeek::from(risk_level),
    }
}

#[cfg(test)]
mod tests {
    use super::assess;
    use crate::model::assessment::{RiskLevel, Severity, TimeToSeek, Urgency};
    use crate::triage::analysis::{analyze, Entities, Sentiment, SymptomAnalysis};

    fn analysis_with(
        severity: Severity,
        urgency: Urgency,
        symptoms: &[&str],
        sentiment_score: i32,
    ) -> SymptomAnalysis {
        SymptomAnalysis {
            symptoms: symptoms.iter().map(|s| (*s).to_string()).collect(),
            severity,
            urgency,
            body_parts: Vec::new(),
            duration: None,
            sentiment: Sentiment {
                score: sentiment_score,
                comparative: 0.0,
                positive: Vec::new(),
                negative: Vec::new(),
            },
            entities: Entities::default(),
        }
    }

    #[test]
    fn base_points_only() {
        let risk = assess(&analysis_with(Severity::Mild, Urgency::Low, &["rash"], 0));
        assert_eq!(risk.risk_score, 5);
        assert_eq!(risk.risk_level, RiskLevel::Low);
        assert_eq!(risk.time_to_seek, TimeToSeek::Routine);
        assert!(risk.red_flags.is_empty());
        assert_eq!(risk.recommendations.len(), 3);
    }

    #[test]
    fn red_flags_and_combinations_accumulate() {
        let risk = assess(&analysis_with(
            Severity::Moderate,
            Urgency::Medium,
            &["chest pain", "shortness of breath"],
            0,
        ));
        // 15 + 10 + 20 (chest pain) + 25 (combination)
        assert_eq!(risk.risk_score, 70);
        assert_eq!(risk.risk_level, RiskLevel::Critical);
        assert_eq!(
            risk.red_flags,
            vec![
                "chest pain".to_string(),
                "Critical combination: chest pain + shortness of breath".to_string()
            ]
        );
    }

    #[test]
    fn distress_sentiment_adds_points_below_threshold_only() {
        let calm = assess(&analysis_with(Severity::Moderate, Urgency::Medium, &[], -2));
        let distressed = assess(&analysis_with(Severity::Moderate, Urgency::Medium, &[], -3));
        assert_eq!(calm.risk_score, 25);
        assert_eq!(distressed.risk_score, 35);
    }

    #[test]
    fn score_is_clamped_to_one_hundred() {
        let risk = assess(&analysis_with(
            Severity::Critical,
            Urgency::Emergency,
            &["chest pain", "difficulty breathing", "shortness of breath"],
            -5,
        ));
        assert_eq!(risk.risk_score, 100);
        assert_eq!(risk.time_to_seek, TimeToSeek::Immediately);
    }

    #[test]
    fn end_to_end_cardiac_description_is_critical() {
        let risk = assess(&analyze(
            "Crushing chest pain with shortness of breath since this morning",
        ));
        assert_eq!(risk.risk_level, RiskLevel::Critical);
        assert!(risk
            .red_flags
            .iter()
            .any(|flag| flag.starts_with("Critical combination")));
    }

    #[test]
    fn end_to_end_mild_description_is_low() {
        let risk = assess(&analyze("slight itching sometimes"));
        // mild 5 + low 0
        assert_eq!(risk.risk_score, 5);
        assert_eq!(risk.risk_level, RiskLevel::Low);
    }
}
