//! Graded scales produced by symptom analysis and risk scoring.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Pain/discomfort intensity inferred from descriptive words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
    Critical,
}

/// How soon care is needed, inferred from situational phrases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Emergency,
}

/// Four-tier bucket over the 0..=100 risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Maps a clamped score onto its tier.
    ///
    /// Thresholds: `>= 70` critical, `>= 50` high, `>= 25` medium.
    pub fn from_score(score: u8) -> Self {
        match score {
            70.. => Self::Critical,
            50..=69 => Self::High,
            25..=49 => Self::Medium,
            _ => Self::Low,
        }
    }

    /// High and critical tiers warrant prompt follow-up.
    pub fn is_elevated(self) -> bool {
        matches!(self, Self::High | Self::Critical)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl Display for RiskLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recommended time frame for seeking care, paired with a risk tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeToSeek {
    Immediately,
    WithinHours,
    WithinDays,
    Routine,
}

impl From<RiskLevel> for TimeToSeek {
    fn from(value: RiskLevel) -> Self {
        match value {
            RiskLevel::Critical => Self::Immediately,
            RiskLevel::High => Self::WithinHours,
            RiskLevel::Medium => Self::WithinDays,
            RiskLevel::Low => Self::Routine,
        }
    }
}
