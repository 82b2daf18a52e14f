//! Visit history record.
//!
//! # Invariants
//! - `risk_score` is within `0..=100`.
//! - `follow_up_date` is only set when `follow_up_required` is true.
//! - `date` and `follow_up_date` fall within `0..=MAX_RECORD_DATE_MS`.

use crate::model::assessment::RiskLevel;
use crate::model::profile::{RecordValidationError, UserId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type VisitId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitRecord {
    pub id: VisitId,
    pub user_id: UserId,
    /// Epoch milliseconds.
    pub date: i64,
    pub symptoms: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<String>,
    pub department: String,
    pub risk_level: RiskLevel,
    pub risk_score: u8,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub follow_up_required: bool,
    /// Epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up_date: Option<i64>,
}

impl VisitRecord {
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if self.department.trim().is_empty() {
            return Err(RecordValidationError::BlankDepartment);
        }
        if self.risk_score > 100 {
            return Err(RecordValidationError::RiskScoreOutOfRange(self.risk_score));
        }
        if self.follow_up_date.is_some() && !self.follow_up_required {
            return Err(RecordValidationError::FollowUpWithoutFlag);
        }
        for date in std::iter::once(self.date).chain(self.follow_up_date) {
            if !(0..=MAX_RECORD_DATE_MS).contains(&date) {
                return Err(RecordValidationError::DateOutOfRange(date));
            }
        }
        Ok(())
    }

    /// A follow-up is overdue once its date has passed without a newer visit
    /// clearing the flag.
    pub fn is_follow_up_overdue(&self, now_ms: i64) -> bool {
        self.follow_up_required && self.follow_up_date.is_some_and(|date| date < now_ms)
    }

    /// Days elapsed since this visit; negative for future-dated records.
    pub fn age_in_days(&self, now_ms: i64) -> f64 {
        now_ms.saturating_sub(self.date) as f64 / MILLIS_PER_DAY as f64
    }
}

pub const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// 9999-12-31T23:59:59.999Z.
pub const MAX_RECORD_DATE_MS: i64 = 253_402_300_799_999;
