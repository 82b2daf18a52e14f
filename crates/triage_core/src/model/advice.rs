//! Personalized recommendation model.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvicePriority {
    Low,
    Medium,
    High,
    Urgent,
}

/// One piece of advice derived from the profile and visit history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub message: String,
    pub priority: AdvicePriority,
    /// Short labels naming the facts this advice was derived from.
    pub based_on: Vec<String>,
    pub action_required: bool,
}

impl Recommendation {
    pub fn new(
        message: impl Into<String>,
        priority: AdvicePriority,
        based_on: &str,
        action_required: bool,
    ) -> Self {
        Self {
            message: message.into(),
            priority,
            based_on: vec![based_on.to_string()],
            action_required,
        }
    }
}
