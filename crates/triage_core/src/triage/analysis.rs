//! Lightweight symptom text analysis.
//!
//! # Responsibility
//! - Pull symptom phrases, body parts and a duration hint out of free text.
//! - Grade severity and urgency from descriptive wording.
//! - Compute a word-list sentiment score.
//!
//! # Invariants
//! - Tier tables are scanned from the most serious tier down; the first tier
//!   with any hit wins.
//! - Unmatched severity defaults to `Moderate`, unmatched urgency to `Medium`.

use super::{contains_any, normalize_text, strip_non_word};
use crate::model::assessment::{Severity, Urgency};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

const SEVERITY_TIERS: &[(Severity, &[&str])] = &[
    (
        Severity::Critical,
        &[
            "unbearable",
            "excruciating",
            "severe",
            "intense",
            "crushing",
            "stabbing",
            "sharp",
            "worst",
        ],
    ),
    (
        Severity::Severe,
        &[
            "bad", "terrible", "awful", "horrible", "strong", "heavy", "serious",
        ],
    ),
    (
        Severity::Moderate,
        &[
            "uncomfortable",
            "bothersome",
            "noticeable",
            "persistent",
            "concerning",
        ],
    ),
    (
        Severity::Mild,
        &["slight", "minor", "little", "small", "light", "gentle"],
    ),
];

const URGENCY_TIERS: &[(Urgency, &[&str])] = &[
    (
        Urgency::Emergency,
        &[
            "can't breathe",
            "chest pain",
            "unconscious",
            "bleeding heavily",
            "severe allergic reaction",
            "heart attack",
            "stroke",
        ],
    ),
    (
        Urgency::High,
        &[
            "difficulty breathing",
            "severe pain",
            "high fever",
            "vomiting blood",
            "sudden",
            "acute",
        ],
    ),
    (
        Urgency::Medium,
        &[
            "persistent",
            "worsening",
            "spreading",
            "recurring",
            "getting worse",
        ],
    ),
    (
        Urgency::Low,
        &["mild", "occasional", "minor", "slight", "sometimes"],
    ),
];

const BODY_PARTS: &[&str] = &[
    "head", "neck", "chest", "back", "arm", "leg", "hand", "foot", "stomach", "abdomen", "throat",
    "eye", "ear", "nose", "mouth", "tooth", "teeth", "skin", "joint", "muscle", "bone", "heart",
    "lung", "kidney", "liver", "brain", "shoulder", "knee", "ankle", "wrist", "elbow",
];

// Compound phrases after the generic block feed red-flag and co-occurrence
// checks in the risk engine, which match against extracted symptoms. With
// them, texts such as "fever and stiff neck" land a tier higher than a
// single-word vocabulary would put them (50 instead of 25).
const SYMPTOM_KEYWORDS: &[&str] = &[
    "pain",
    "ache",
    "hurt",
    "sore",
    "tender",
    "burning",
    "stinging",
    "throbbing",
    "fever",
    "chills",
    "sweating",
    "nausea",
    "vomiting",
    "diarrhea",
    "constipation",
    "cough",
    "sneeze",
    "congestion",
    "runny nose",
    "sore throat",
    "hoarse",
    "headache",
    "dizziness",
    "fatigue",
    "weakness",
    "tired",
    "exhausted",
    "rash",
    "itching",
    "swelling",
    "bruising",
    "bleeding",
    "cut",
    "wound",
    "difficulty breathing",
    "shortness of breath",
    "wheezing",
    "chest tightness",
    "chest pain",
    "abdominal pain",
    "severe headache",
    "severe bleeding",
    "vomiting blood",
    "vision changes",
    "stiff neck",
    "confusion",
    "loss of consciousness",
    "can't breathe",
];

const POSITIVE_WORDS: &[&str] = &[
    "good",
    "better",
    "fine",
    "okay",
    "well",
    "healthy",
    "normal",
    "improving",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "worse", "terrible", "awful", "sick", "ill", "painful", "horrible", "worried", "scared",
];

const COMMON_CAPITALIZED_WORDS: &[&str] = &[
    "I", "The", "This", "That", "My", "Your", "His", "Her", "Our", "Their",
];

static DURATION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(\d+)\s*(day|week|month|year|hour|minute)s?",
        r"(?i)(since|for|about|around)\s+(\w+)",
        r"(?i)(yesterday|today|this morning|last night|few days|several days)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("valid duration regex"))
    .collect()
});

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Word-list sentiment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sentiment {
    /// +1 per positive word, -1 per negative word.
    pub score: i32,
    /// `score` divided by the token count of a split on whitespace runs.
    pub comparative: f64,
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

/// Capitalized-token heuristic; only `people` is ever populated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Entities {
    pub people: Vec<String>,
    pub places: Vec<String>,
    pub organizations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomAnalysis {
    pub symptoms: Vec<String>,
    pub severity: Severity,
    pub urgency: Urgency,
    pub body_parts: Vec<String>,
    pub duration: Option<String>,
    pub sentiment: Sentiment,
    pub entities: Entities,
}

/// Analyzes one free-text symptom description.
pub fn analyze(text: &str) -> SymptomAnalysis {
    let normalized = normalize_text(text);

    SymptomAnalysis {
        symptoms: matching_keywords(&normalized, SYMPTOM_KEYWORDS),
        severity: first_tier(&normalized, SEVERITY_TIERS).unwrap_or(Severity::Moderate),
        urgency: first_tier(&normalized, URGENCY_TIERS).unwrap_or(Urgency::Medium),
        body_parts: matching_keywords(&normalized, BODY_PARTS),
        duration: extract_duration(&normalized),
        sentiment: sentiment(&normalized),
        entities: extract_entities(text),
    }
}

fn matching_keywords(normalized: &str, keywords: &[&str]) -> Vec<String> {
    let mut hits: Vec<String> = Vec::new();
    for keyword in keywords {
        if normalized.contains(keyword) && !hits.iter().any(|hit| hit == keyword) {
            hits.push((*keyword).to_string());
        }
    }
    hits
}

fn first_tier<T: Copy>(normalized: &str, tiers: &[(T, &[&str])]) -> Option<T> {
    tiers
        .iter()
        .find(|(_, keywords)| contains_any(normalized, keywords))
        .map(|(tier, _)| *tier)
}

fn extract_duration(normalized: &str) -> Option<String> {
    DURATION_PATTERNS
        .iter()
        .find_map(|pattern| pattern.find(normalized))
        .map(|found| found.as_str().to_string())
}

fn sentiment(normalized: &str) -> Sentiment {
    let mut score = 0;
    let mut positive = Vec::new();
    let mut negative = Vec::new();

    // Leading and trailing whitespace yield empty tokens that still count
    // toward `comparative`; the split always yields at least one token.
    let tokens: Vec<&str> = WHITESPACE_RUN.split(normalized).collect();
    for token in &tokens {
        let word = strip_non_word(token);
        if POSITIVE_WORDS.contains(&word.as_str()) {
            score += 1;
            positive.push(word);
        } else if NEGATIVE_WORDS.contains(&word.as_str()) {
            score -= 1;
            negative.push(word);
        }
    }

    Sentiment {
        score,
        comparative: f64::from(score) / tokens.len() as f64,
        positive,
        negative,
    }
}

fn extract_entities(original: &str) -> Entities {
    let people = original
        .split_whitespace()
        .map(strip_non_word)
        .filter(|word| word.chars().count() > 2)
        .filter(|word| word.chars().next().is_some_and(|ch| ch.is_ascii_uppercase()))
        .filter(|word| !COMMON_CAPITALIZED_WORDS.contains(&word.as_str()))
        .collect();

    Entities {
        people,
        ..Entities::default()
    }
}

#[cfg(test)]
mod tests {
    use super::analyze;
    use crate::model::assessment::{Severity, Urgency};

    #[test]
    fn extracts_symptoms_in_table_order_without_duplicates() {
        let analysis = analyze("Cough, fever and more cough");
        assert_eq!(analysis.symptoms, vec!["fever", "cough"]);
    }

    #[test]
    fn compound_phrases_are_extracted_alongside_generic_words() {
        let analysis = analyze("chest pain and shortness of breath");
        assert!(analysis.symptoms.contains(&"pain".to_string()));
        assert!(analysis.symptoms.contains(&"chest pain".to_string()));
        assert!(analysis.symptoms.contains(&"shortness of breath".to_string()));
    }

    #[test]
    fn most_serious_severity_tier_wins() {
        assert_eq!(analyze("a slight but sharp pain").severity, Severity::Critical);
        assert_eq!(analyze("a terrible ache").severity, Severity::Severe);
        assert_eq!(analyze("a slight ache").severity, Severity::Mild);
        assert_eq!(analyze("an ache").severity, Severity::Moderate);
    }

    #[test]
    fn urgency_tiers_and_default() {
        assert_eq!(analyze("crushing chest pain").urgency, Urgency::Emergency);
        assert_eq!(analyze("sudden dizziness").urgency, Urgency::High);
        assert_eq!(analyze("a recurring rash").urgency, Urgency::Medium);
        assert_eq!(analyze("occasional itching").urgency, Urgency::Low);
        assert_eq!(analyze("itching").urgency, Urgency::Medium);
    }

    #[test]
    fn body_parts_use_substring_matching() {
        let analysis = analyze("my headache spreads to the neck");
        assert_eq!(analysis.body_parts, vec!["head", "neck"]);
    }

    #[test]
    fn duration_patterns_in_priority_order() {
        assert_eq!(
            analyze("coughing for 3 days now").duration.as_deref(),
            Some("3 days")
        );
        assert_eq!(
            analyze("dizzy since monday").duration.as_deref(),
            Some("since monday")
        );
        assert_eq!(
            analyze("it started yesterday").duration.as_deref(),
            Some("yesterday")
        );
        assert_eq!(analyze("it hurts").duration, None);
    }

    #[test]
    fn sentiment_counts_positive_and_negative_words() {
        let analysis = analyze("I feel worse, scared and sick but the rash is better");
        assert_eq!(analysis.sentiment.score, -2);
        assert_eq!(analysis.sentiment.negative, vec!["worse", "scared", "sick"]);
        assert_eq!(analysis.sentiment.positive, vec!["better"]);
        assert!(analysis.sentiment.comparative < 0.0);
    }

    #[test]
    fn empty_text_has_neutral_sentiment() {
        let analysis = analyze("");
        assert_eq!(analysis.sentiment.score, 0);
        assert_eq!(analysis.sentiment.comparative, 0.0);
        assert!(analysis.symptoms.is_empty());
    }

    #[test]
    fn capitalized_tokens_become_people_entities() {
        let analysis = analyze("My doctor Patel said The rash is Fine");
        assert_eq!(analysis.entities.people, vec!["Patel", "Fine"]);
        assert!(analysis.entities.places.is_empty());
    }

    #[test]
    fn padded_text_counts_empty_edge_tokens() {
        // "  worse  " splits into ["", "worse", ""].
        let padded = analyze("  worse  ");
        assert_eq!(padded.sentiment.score, -1);
        assert!((padded.sentiment.comparative - (-1.0 / 3.0)).abs() < 1e-9);

        let bare = analyze("worse");
        assert_eq!(bare.sentiment.comparative, -1.0);
    }
}
