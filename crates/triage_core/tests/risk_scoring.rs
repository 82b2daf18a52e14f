use triage_core::triage::analysis::analyze;
use triage_core::triage::risk::assess;
use triage_core::{assess_text, RiskLevel, Severity, TimeToSeek, Urgency};

#[test]
fn scores_follow_severity_and_urgency_points() {
    let cases = [
        // mild 5 + low 0
        ("a slight cough", 5, RiskLevel::Low),
        // moderate 15 + low 0
        ("mild runny nose", 15, RiskLevel::Low),
        // moderate 15 + medium 10
        ("I have a persistent cough", 25, RiskLevel::Medium),
        // severe 30 + medium 10
        ("terrible headache since yesterday", 40, RiskLevel::Medium),
    ];
    for (text, score, level) in cases {
        let risk = assess(&analyze(text));
        assert_eq!(risk.risk_score, score, "score for `{text}`");
        assert_eq!(risk.risk_level, level, "level for `{text}`");
    }
}

#[test]
fn red_flags_and_combinations_clamp_to_one_hundred() {
    let report = assess_text("crushing chest pain and shortness of breath");

    assert_eq!(report.analysis.severity, Severity::Critical);
    assert_eq!(report.analysis.urgency, Urgency::Emergency);
    assert_eq!(report.risk.risk_score, 100);
    assert_eq!(report.risk.risk_level, RiskLevel::Critical);
    assert_eq!(report.risk.time_to_seek, TimeToSeek::Immediately);
    assert_eq!(
        report.risk.red_flags,
        vec![
            "chest pain".to_string(),
            "Critical combination: chest pain + shortness of breath".to_string(),
        ]
    );
}

#[test]
fn combination_alone_lifts_tier() {
    let report = assess_text("fever and stiff neck");
    // moderate 15 + medium 10 + combination 25
    assert_eq!(report.risk.risk_score, 50);
    assert_eq!(report.risk.risk_level, RiskLevel::High);
    assert_eq!(report.risk.time_to_seek, TimeToSeek::WithinHours);

    // The same complaint without the exact phrase only extracts "fever".
    let loose = assess_text("fever with a neck that feels stiff");
    assert_eq!(loose.risk.risk_score, 25);
    assert_eq!(loose.risk.risk_level, RiskLevel::Medium);
}

#[test]
fn distressed_wording_adds_points() {
    let analysis = analyze("I feel bad, worse, awful and sick");
    assert_eq!(analysis.sentiment.score, -4);

    let risk = assess(&analysis);
    // severe 30 + medium 10 + distress 10
    assert_eq!(risk.risk_score, 50);
    assert_eq!(risk.risk_level, RiskLevel::High);
}

#[test]
fn every_tier_carries_three_recommendations() {
    for text in [
        "a slight cough",
        "I have a persistent cough",
        "fever and stiff neck",
        "crushing chest pain",
    ] {
        let risk = assess(&analyze(text));
        assert_eq!(risk.recommendations.len(), 3, "recommendations for `{text}`");
        assert!(risk.risk_score <= 100);
        assert_eq!(RiskLevel::from_score(risk.risk_score), risk.risk_level);
    }
}

#[test]
fn tier_boundaries() {
    assert_eq!(RiskLevel::from_score(0), RiskLevel::Low);
    assert_eq!(RiskLevel::from_score(24), RiskLevel::Low);
    assert_eq!(RiskLevel::from_score(25), RiskLevel::Medium);
    assert_eq!(RiskLevel::from_score(49), RiskLevel::Medium);
    assert_eq!(RiskLevel::from_score(50), RiskLevel::High);
    assert_eq!(RiskLevel::from_score(69), RiskLevel::High);
    assert_eq!(RiskLevel::from_score(70), RiskLevel::Critical);
    assert_eq!(RiskLevel::from_score(100), RiskLevel::Critical);
}
