use serde::Serialize;
use std::collections::HashMap;

use super::audit::AuditRecommendation;
use super::catalog::Catalog;
use super::risk::RiskLevel;

/// A respondent's selected option value per question id. Questions absent
/// from the map are excluded from both achieved and possible score.
pub type ResponseSet = HashMap<String, u32>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryScore {
    pub category_id: String,
    pub achieved: f64,
    pub possible: f64,
    pub percentage: f64,
    /// Catalog-declared category weight, carried for listings only.
    pub weight: f64,
}

/// Immutable outcome of one scoring run. Categories appear in catalog
/// order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub achieved: f64,
    pub possible: f64,
    pub percentage: f64,
    pub risk_level: RiskLevel,
    pub audit: AuditRecommendation,
    pub categories: Vec<CategoryScore>,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn percentage_of(achieved: f64, possible: f64) -> f64 {
    if possible > 0.0 {
        achieved / possible * 100.0
    } else {
        0.0
    }
}

/// Score a response set against the catalog.
///
/// Every question contributes `weight × max(option values)` to the possible
/// score of its category; answered questions additionally contribute
/// `weight × selected value` to the achieved score. The selected value is
/// trusted to be one of the question's declared option values and is not
/// re-validated here. Response ids that match no catalog question are
/// silently ignored; see the crate documentation for this lenient-input
/// policy.
pub fn score(catalog: &Catalog, responses: &ResponseSet) -> ScoreResult {
    let mut categories = Vec::with_capacity(catalog.categories.len());
    let mut total_achieved = 0.0;
    let mut total_possible = 0.0;

    for category in &catalog.categories {
        let mut achieved = 0.0;
        let mut possible = 0.0;

        for question in &category.questions {
            possible += question.possible_score();
            if let Some(value) = responses.get(&question.id) {
                achieved += question.weight * f64::from(*value);
            }
        }

        total_achieved += achieved;
        total_possible += possible;

        categories.push(CategoryScore {
            category_id: category.id.clone(),
            achieved,
            possible,
            percentage: round2(percentage_of(achieved, possible)),
            weight: category.weight,
        });
    }

    let overall = percentage_of(total_achieved, total_possible);
    let risk_level = RiskLevel::classify(overall);
    let audit = AuditRecommendation::recommend(overall, &categories);

    ScoreResult {
        achieved: total_achieved,
        possible: total_possible,
        percentage: round2(overall),
        risk_level,
        audit,
        categories,
    }
}
