use serde::Serialize;

use super::catalog::{Catalog, Locale};
use super::score::ResponseSet;

/// Remediation urgency for a flagged answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationItem {
    pub question_id: String,
    pub category: String,
    pub question: String,
    pub standards: Vec<String>,
    pub severity: Severity,
}

/// Flag answered questions that score below half of their ceiling, in
/// catalog traversal order. Severity is `High` only for answers valued
/// exactly zero; everything else under the inclusion threshold is
/// `Medium`, even an answer far below half. Unanswered questions are
/// never flagged.
pub fn recommendations(
    catalog: &Catalog,
    responses: &ResponseSet,
    locale: Locale,
) -> Vec<RecommendationItem> {
    let mut items = Vec::new();

    for category in &catalog.categories {
        for question in &category.questions {
            let Some(value) = responses.get(&question.id) else {
                continue;
            };

            let threshold = f64::from(question.max_option_value()) * 0.5;
            if f64::from(*value) < threshold {
                items.push(RecommendationItem {
                    question_id: question.id.clone(),
                    category: category.name.in_locale(locale).to_string(),
                    question: question.text.in_locale(locale).to_string(),
                    standards: question.standards.clone(),
                    severity: if *value == 0 {
                        Severity::High
                    } else {
                        Severity::Medium
                    },
                });
            }
        }
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::catalog::Catalog;

    fn catalog_with_zero_to_ten_options() -> Catalog {
        Catalog::from_reader(
            r#"{"categories":[
                {"id":"c1","name":{"fr":"Catégorie Un","en":"Category One"},"weight":1,"questions":[
                    {"id":"q1","text":{"fr":"Question Un","en":"Question One"},"weight":1,
                     "standards":["OWASP-A1"],
                     "options":[
                        {"label":{"fr":"Non","en":"No"},"value":0},
                        {"label":{"fr":"Faible","en":"Weak"},"value":4},
                        {"label":{"fr":"Moyen","en":"Medium"},"value":5},
                        {"label":{"fr":"Oui","en":"Yes"},"value":10}]},
                    {"id":"q2","text":{"fr":"Question Deux","en":"Question Two"},"weight":2,
                     "options":[
                        {"label":{"fr":"Non","en":"No"},"value":0},
                        {"label":{"fr":"Oui","en":"Yes"},"value":10}]}]}]}"#
                .as_bytes(),
        )
        .expect("catalog loads")
    }

    #[test]
    fn zero_answer_is_flagged_high() {
        let catalog = catalog_with_zero_to_ten_options();
        let responses = ResponseSet::from([("q1".to_string(), 0)]);

        let items = recommendations(&catalog, &responses, Locale::En);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].question_id, "q1");
        assert_eq!(items[0].severity, Severity::High);
        assert_eq!(items[0].category, "Category One");
        assert_eq!(items[0].question, "Question One");
        assert_eq!(items[0].standards, vec!["OWASP-A1".to_string()]);
    }

    #[test]
    fn below_half_but_nonzero_is_flagged_medium() {
        let catalog = catalog_with_zero_to_ten_options();
        let responses = ResponseSet::from([("q1".to_string(), 4)]);

        let items = recommendations(&catalog, &responses, Locale::Fr);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].severity, Severity::Medium);
        assert_eq!(items[0].category, "Catégorie Un");
    }

    #[test]
    fn exactly_half_is_not_flagged() {
        let catalog = catalog_with_zero_to_ten_options();
        let responses = ResponseSet::from([("q1".to_string(), 5)]);

        assert!(recommendations(&catalog, &responses, Locale::Fr).is_empty());
    }

    #[test]
    fn unanswered_questions_are_not_flagged() {
        let catalog = catalog_with_zero_to_ten_options();
        assert!(recommendations(&catalog, &ResponseSet::new(), Locale::Fr).is_empty());
    }

    #[test]
    fn items_follow_catalog_traversal_order() {
        let catalog = Catalog::builtin().expect("builtin catalog loads");
        let mut responses = ResponseSet::new();
        let mut expected_order = Vec::new();
        for category in &catalog.categories {
            for question in &category.questions {
                responses.insert(question.id.clone(), 0);
                expected_order.push(question.id.clone());
            }
        }

        let items = recommendations(&catalog, &responses, Locale::En);
        let actual_order: Vec<String> =
            items.iter().map(|item| item.question_id.clone()).collect();
        assert_eq!(actual_order, expected_order);
        assert!(items.iter().all(|item| item.severity == Severity::High));
    }
}
