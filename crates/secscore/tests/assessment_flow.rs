//! End-to-end scenarios driving the assessment pipeline through its public
//! surface: catalog load, scoring, classification, audit recommendation,
//! remediation list, and CSV export.

use chrono::NaiveDate;
use secscore::assessment::{
    export, recommendations, score, AppInfo, AuditRecommendation, Catalog, Locale, ResponseSet,
    RiskLevel, Severity,
};

fn respond_everywhere(catalog: &Catalog, pick: impl Fn(&secscore::assessment::Question) -> u32) -> ResponseSet {
    let mut responses = ResponseSet::new();
    for category in &catalog.categories {
        for question in &category.questions {
            responses.insert(question.id.clone(), pick(question));
        }
    }
    responses
}

#[test]
fn perfect_responses_need_only_a_light_review() {
    let catalog = Catalog::builtin().expect("builtin catalog loads");
    let responses = respond_everywhere(&catalog, |question| question.max_option_value());

    let result = score(&catalog, &responses);
    assert_eq!(result.percentage, 100.0);
    assert_eq!(result.risk_level, RiskLevel::Low);
    assert_eq!(result.audit, AuditRecommendation::LightReview);
    for category in &result.categories {
        assert_eq!(category.percentage, 100.0);
    }

    assert!(recommendations(&catalog, &responses, Locale::En).is_empty());
}

#[test]
fn all_zero_responses_demand_a_full_audit_and_flag_every_question() {
    let catalog = Catalog::builtin().expect("builtin catalog loads");
    let responses = respond_everywhere(&catalog, |_| 0);

    let result = score(&catalog, &responses);
    assert_eq!(result.percentage, 0.0);
    assert_eq!(result.risk_level, RiskLevel::Critical);
    assert_eq!(result.audit, AuditRecommendation::FullAuditRequired);

    let items = recommendations(&catalog, &responses, Locale::Fr);
    assert_eq!(items.len(), catalog.question_count());
    assert!(items.iter().all(|item| item.severity == Severity::High));
}

#[test]
fn partial_responses_only_count_answered_questions() {
    let catalog = Catalog::builtin().expect("builtin catalog loads");
    let first_question = catalog.categories[0].questions[0].clone();
    let responses = ResponseSet::from([(
        first_question.id.clone(),
        first_question.max_option_value(),
    )]);

    let result = score(&catalog, &responses);
    // Unanswered questions still count toward the possible score, so a
    // single perfect answer cannot carry the assessment.
    assert!(result.percentage < 100.0);
    assert_eq!(
        result.categories[0].achieved,
        first_question.possible_score()
    );
}

#[test]
fn export_bundle_reflects_the_assessment() {
    let catalog = Catalog::builtin().expect("builtin catalog loads");
    let responses = respond_everywhere(&catalog, |_| 0);
    let info = AppInfo {
        name: Some("Billing Portal".to_string()),
        owner: Some("Finance".to_string()),
        ..AppInfo::default()
    };
    let date = NaiveDate::from_ymd_opt(2026, 8, 27).expect("valid date");

    let summary = export::summary_csv(&catalog, &responses, &info, Locale::En, date)
        .expect("summary exports");
    let summary = String::from_utf8(summary).expect("utf-8");
    assert!(summary.contains("Billing Portal"));
    assert!(summary.contains("Critical Risk"));

    let answers =
        export::answers_csv(&catalog, &responses, Locale::En).expect("answers export");
    let answers = String::from_utf8(answers).expect("utf-8");
    assert_eq!(answers.lines().count(), catalog.question_count() + 1);

    let remediation = export::recommendations_csv(&catalog, &responses, Locale::En)
        .expect("recommendations export");
    let remediation = String::from_utf8(remediation).expect("utf-8");
    assert_eq!(remediation.lines().count(), catalog.question_count() + 1);
}
