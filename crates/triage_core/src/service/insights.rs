//! Aggregate health insights over a visit history.

use crate::config::AdviceConfig;
use crate::model::assessment::RiskLevel;
use crate::model::visit::{VisitRecord, MILLIS_PER_DAY};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

const TOP_SYMPTOM_COUNT: usize = 5;
const DAYS_PER_MONTH: f64 = 30.0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymptomCount {
    pub symptom: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskTrendPoint {
    /// Month label such as `Mar 2024`, in UTC.
    pub label: String,
    pub date: i64,
    pub risk_score: u8,
    pub risk_level: RiskLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthInsights {
    pub total_visits: usize,
    pub most_common_symptoms: Vec<SymptomCount>,
    pub risk_trends: Vec<RiskTrendPoint>,
    pub department_frequency: BTreeMap<String, usize>,
    pub average_risk_score: u8,
    pub last_visit: Option<i64>,
    pub health_score: u8,
}

/// Returns `None` when there is no history to summarize.
pub fn compute_insights(
    history: &[VisitRecord],
    chronic_condition_count: usize,
    windows: AdviceConfig,
    now_ms: i64,
) -> Option<HealthInsights> {
    if history.is_empty() {
        return None;
    }

    let total: u32 = history.iter().map(|record| u32::from(record.risk_score)).sum();
    let average = (f64::from(total) / history.len() as f64).round() as u8;

    Some(HealthInsights {
        total_visits: history.len(),
        most_common_symptoms: most_common_symptoms(history),
        risk_trends: risk_trends(history, windows.trend_months, now_ms),
        department_frequency: department_frequency(history),
        average_risk_score: average,
        last_visit: history.last().map(|record| record.date),
        health_score: health_score(history, chronic_condition_count, windows.recent_days, now_ms),
    })
}

/// Symptom counts, highest first; ties keep first-seen order.
pub fn most_common_symptoms(history: &[VisitRecord]) -> Vec<SymptomCount> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for symptom in history.iter().flat_map(|record| record.symptoms.iter()) {
        let entry = counts.entry(symptom.clone()).or_insert_with(|| {
            order.push(symptom.clone());
            0
        });
        *entry += 1;
    }

    let mut ranked: Vec<SymptomCount> = order
        .into_iter()
        .map(|symptom| {
            let count = counts.get(&symptom).copied().unwrap_or_default();
            SymptomCount { symptom, count }
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(TOP_SYMPTOM_COUNT);
    ranked
}

pub fn department_frequency(history: &[VisitRecord]) -> BTreeMap<String, usize> {
    let mut frequency = BTreeMap::new();
    for record in history {
        *frequency.entry(record.department.clone()).or_insert(0) += 1;
    }
    frequency
}

/// Visits from the last `months` months, oldest first.
pub fn risk_trends(history: &[VisitRecord], months: i64, now_ms: i64) -> Vec<RiskTrendPoint> {
    let max_months = months as f64;
    let mut points: Vec<RiskTrendPoint> = history
        .iter()
        .filter(|record| record.age_in_days(now_ms) / DAYS_PER_MONTH <= max_months)
        .map(|record| RiskTrendPoint {
            label: month_label(record.date),
            date: record.date,
            risk_score: record.risk_score,
            risk_level: record.risk_level,
        })
        .collect();
    points.sort_by_key(|point| point.date);
    points
}

/// `100 - 10*recent elevated - 5*chronic - 15*overdue`, clamped to `0..=100`.
pub fn health_score(
    history: &[VisitRecord],
    chronic_condition_count: usize,
    recent_days: i64,
    now_ms: i64,
) -> u8 {
    let recent_elevated = history
        .iter()
        .filter(|record| {
            now_ms.saturating_sub(record.date) <= recent_days.saturating_mul(MILLIS_PER_DAY)
                && record.risk_level.is_elevated()
        })
        .count() as i64;
    let overdue = history
        .iter()
        .filter(|record| record.is_follow_up_overdue(now_ms))
        .count() as i64;

    let score =
        100 - recent_elevated * 10 - chronic_condition_count as i64 * 5 - overdue * 15;
    score.clamp(0, 100) as u8
}

fn month_label(epoch_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(epoch_ms)
        .map(|date| date.format("%b %Y").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{compute_insights, health_score, most_common_symptoms};
    use crate::config::AdviceConfig;
    use crate::model::assessment::RiskLevel;
    use crate::model::visit::{VisitRecord, MILLIS_PER_DAY};
    use uuid::Uuid;

    // 2024-03-15T00:00:00Z
    const NOW: i64 = 1_710_460_800_000;
    const WINDOWS: AdviceConfig = AdviceConfig {
        recent_days: 30,
        trend_months: 6,
    };

    fn visit(days_ago: i64, symptoms: &[&str], level: RiskLevel, score: u8) -> VisitRecord {
        VisitRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            date: NOW - days_ago * MILLIS_PER_DAY,
            symptoms: symptoms.iter().map(|s| (*s).to_string()).collect(),
            diagnosis: None,
            department: "Neurology Department".to_string(),
            risk_level: level,
            risk_score: score,
            notes: String::new(),
            follow_up_required: false,
            follow_up_date: None,
        }
    }

    #[test]
    fn empty_history_has_no_insights() {
        assert!(compute_insights(&[], 0, WINDOWS, NOW).is_none());
    }

    #[test]
    fn symptom_ranking_prefers_count_then_first_seen() {
        let history = vec![
            visit(3, &["cough", "fever"], RiskLevel::Low, 10),
            visit(2, &["fever"], RiskLevel::Low, 10),
            visit(1, &["rash"], RiskLevel::Low, 10),
        ];
        let ranked = most_common_symptoms(&history);
        let names: Vec<&str> = ranked.iter().map(|s| s.symptom.as_str()).collect();
        assert_eq!(names, vec!["fever", "cough", "rash"]);
        assert_eq!(ranked[0].count, 2);
    }

    #[test]
    fn trend_excludes_old_visits_and_labels_months() {
        let history = vec![
            visit(1, &["cough"], RiskLevel::Low, 10),
            visit(400, &["cough"], RiskLevel::Low, 20),
        ];
        let insights = compute_insights(&history, 0, WINDOWS, NOW).expect("insights");
        assert_eq!(insights.risk_trends.len(), 1);
        assert_eq!(insights.risk_trends[0].label, "Mar 2024");
        assert_eq!(insights.average_risk_score, 15);
        assert_eq!(insights.last_visit, Some(NOW - 400 * MILLIS_PER_DAY));
    }

    #[test]
    fn health_score_penalties_and_clamp() {
        let mut overdue = visit(10, &["chest pain"], RiskLevel::High, 60);
        overdue.follow_up_required = true;
        overdue.follow_up_date = Some(NOW - MILLIS_PER_DAY);
        let history = vec![overdue, visit(5, &["cough"], RiskLevel::Critical, 80)];

        assert_eq!(health_score(&history, 1, 30, NOW), 100 - 20 - 5 - 15);
        assert_eq!(health_score(&history, 20, 30, NOW), 0);
    }

    #[test]
    fn health_score_saturates_on_extreme_inputs() {
        let mut ancient = visit(0, &["cough"], RiskLevel::High, 60);
        ancient.date = i64::MIN;
        assert_eq!(health_score(&[ancient], 0, i64::MAX, i64::MAX), 90);
    }
}
