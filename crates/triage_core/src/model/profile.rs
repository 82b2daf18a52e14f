//! Patient profile model.
//!
//! # Invariants
//! - `id` is stable and never reused for another profile.
//! - `name` is never blank; anonymous profiles use `ANONYMOUS_NAME`.
//! - `last_updated >= created_at`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type UserId = Uuid;

pub const ANONYMOUS_NAME: &str = "Anonymous User";
const MAX_AGE_YEARS: u32 = 150;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub name: String,
    pub phone: String,
    pub relationship: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub medications: Vec<String>,
    #[serde(default)]
    pub chronic_conditions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<EmergencyContact>,
    /// Epoch milliseconds.
    pub created_at: i64,
    /// Epoch milliseconds.
    pub last_updated: i64,
}

impl UserProfile {
    /// Creates an empty profile stamped at `now_ms`.
    pub fn new(name: impl Into<String>, now_ms: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            age: None,
            date_of_birth: None,
            gender: None,
            allergies: Vec::new(),
            medications: Vec::new(),
            chronic_conditions: Vec::new(),
            emergency_contact: None,
            created_at: now_ms,
            last_updated: now_ms,
        }
    }

    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if self.name.trim().is_empty() {
            return Err(RecordValidationError::BlankName);
        }
        if let Some(age) = self.age {
            if age > MAX_AGE_YEARS {
                return Err(RecordValidationError::AgeOutOfRange(age));
            }
        }
        if self.last_updated < self.created_at {
            return Err(RecordValidationError::UpdatedBeforeCreated {
                created_at: self.created_at,
                last_updated: self.last_updated,
            });
        }
        if let Some(contact) = &self.emergency_contact {
            if contact.name.trim().is_empty() || contact.phone.trim().is_empty() {
                return Err(RecordValidationError::IncompleteEmergencyContact);
            }
        }
        Ok(())
    }
}

/// Validation failures shared by profile and visit records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    BlankName,
    AgeOutOfRange(u32),
    UpdatedBeforeCreated { created_at: i64, last_updated: i64 },
    IncompleteEmergencyContact,
    BlankDepartment,
    RiskScoreOutOfRange(u8),
    FollowUpWithoutFlag,
    DateOutOfRange(i64),
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "profile name cannot be blank"),
            Self::AgeOutOfRange(age) => write!(f, "age {age} is out of range"),
            Self::UpdatedBeforeCreated {
                created_at,
                last_updated,
            } => write!(
                f,
                "last_updated ({last_updated}) is earlier than created_at ({created_at})"
            ),
            Self::IncompleteEmergencyContact => {
                write!(f, "emergency contact requires a name and phone")
            }
            Self::BlankDepartment => write!(f, "visit department cannot be blank"),
            Self::RiskScoreOutOfRange(score) => {
                write!(f, "risk score {score} is outside 0..=100")
            }
            Self::FollowUpWithoutFlag => {
                write!(f, "follow-up date set but follow-up is not required")
            }
            Self::DateOutOfRange(date) => {
                write!(f, "date {date} is outside the supported epoch-ms range")
            }
        }
    }
}

impl Error for RecordValidationError {}
