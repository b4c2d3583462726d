use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Languages the catalog carries text for. French is the primary locale;
/// every lookup falls back to it when a tag is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Fr,
    En,
}

impl Locale {
    /// Parse a language tag leniently. Anything that is not English
    /// resolves to the primary locale.
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "en" => Self::En,
            _ => Self::Fr,
        }
    }

    pub const fn tag(self) -> &'static str {
        match self {
            Self::Fr => "fr",
            Self::En => "en",
        }
    }
}

/// A piece of display text in both supported languages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub fr: String,
    pub en: String,
}

impl LocalizedText {
    pub fn in_locale(&self, locale: Locale) -> &str {
        match locale {
            Locale::Fr => &self.fr,
            Locale::En => &self.en,
        }
    }
}

/// A selectable answer. Values are unsigned so the non-negative invariant
/// holds by construction; they need not be contiguous within a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub label: LocalizedText,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: LocalizedText,
    pub weight: f64,
    #[serde(default)]
    pub standards: Vec<String>,
    pub options: Vec<AnswerOption>,
}

impl Question {
    /// The highest option value, which defines this question's ceiling.
    pub fn max_option_value(&self) -> u32 {
        self.options.iter().map(|option| option.value).max().unwrap_or(0)
    }

    pub fn possible_score(&self) -> f64 {
        self.weight * f64::from(self.max_option_value())
    }

    /// Label of the first option carrying the given value, if any.
    pub fn option_label(&self, value: u32, locale: Locale) -> Option<&str> {
        self.options
            .iter()
            .find(|option| option.value == value)
            .map(|option| option.label.in_locale(locale))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: LocalizedText,
    /// Carried through to listings but not used in scoring arithmetic.
    pub weight: f64,
    pub questions: Vec<Question>,
}

/// The static question catalog: ordered categories holding ordered
/// questions. Loaded once at startup and shared read-only afterwards;
/// traversal order drives recommendation and export row order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub categories: Vec<Category>,
}

const BUILTIN_CATALOG: &str = include_str!("../../data/questions.json");

impl Catalog {
    /// Decode and validate a catalog from a JSON stream.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_reader(reader)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let file = File::open(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// The bilingual security questionnaire shipped with the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_reader(BUILTIN_CATALOG.as_bytes())
    }

    pub fn category(&self, category_id: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|category| category.id == category_id)
    }

    pub fn question_count(&self) -> usize {
        self.categories
            .iter()
            .map(|category| category.questions.len())
            .sum()
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.categories.is_empty() {
            return Err(CatalogError::NoCategories);
        }

        let mut seen = HashSet::new();
        for category in &self.categories {
            for question in &category.questions {
                if !seen.insert(question.id.as_str()) {
                    return Err(CatalogError::DuplicateQuestionId {
                        question_id: question.id.clone(),
                    });
                }
                if question.options.is_empty() {
                    return Err(CatalogError::NoOptions {
                        question_id: question.id.clone(),
                    });
                }
                if question.weight <= 0.0 {
                    return Err(CatalogError::InvalidWeight {
                        question_id: question.id.clone(),
                        weight: question.weight,
                    });
                }
            }
        }

        Ok(())
    }
}

/// Failures while loading the catalog. All of these are fatal at startup;
/// none occur per assessment.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file '{path}'")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("catalog is not valid JSON")]
    Parse(#[from] serde_json::Error),
    #[error("catalog declares no categories")]
    NoCategories,
    #[error("question '{question_id}' appears more than once")]
    DuplicateQuestionId { question_id: String },
    #[error("question '{question_id}' has no answer options")]
    NoOptions { question_id: String },
    #[error("question '{question_id}' has non-positive weight {weight}")]
    InvalidWeight { question_id: String, weight: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_catalog(json: &str) -> Result<Catalog, CatalogError> {
        Catalog::from_reader(json.as_bytes())
    }

    #[test]
    fn builtin_catalog_is_well_formed() {
        let catalog = Catalog::builtin().expect("builtin catalog loads");
        assert!(!catalog.categories.is_empty());
        assert!(catalog.question_count() >= catalog.categories.len());
        for category in &catalog.categories {
            for question in &category.questions {
                assert!(question.max_option_value() > 0, "{}", question.id);
            }
        }
    }

    #[test]
    fn rejects_question_without_options() {
        let result = minimal_catalog(
            r#"{"categories":[{"id":"c1","name":{"fr":"C","en":"C"},"weight":1,
                "questions":[{"id":"q1","text":{"fr":"Q","en":"Q"},"weight":1,"options":[]}]}]}"#,
        );
        assert!(matches!(
            result,
            Err(CatalogError::NoOptions { question_id }) if question_id == "q1"
        ));
    }

    #[test]
    fn rejects_duplicate_question_ids_across_categories() {
        let result = minimal_catalog(
            r#"{"categories":[
                {"id":"c1","name":{"fr":"C1","en":"C1"},"weight":1,"questions":[
                    {"id":"q1","text":{"fr":"Q","en":"Q"},"weight":1,
                     "options":[{"label":{"fr":"Non","en":"No"},"value":0}]}]},
                {"id":"c2","name":{"fr":"C2","en":"C2"},"weight":1,"questions":[
                    {"id":"q1","text":{"fr":"Q","en":"Q"},"weight":1,
                     "options":[{"label":{"fr":"Non","en":"No"},"value":0}]}]}]}"#,
        );
        assert!(matches!(
            result,
            Err(CatalogError::DuplicateQuestionId { question_id }) if question_id == "q1"
        ));
    }

    #[test]
    fn rejects_non_positive_weight() {
        let result = minimal_catalog(
            r#"{"categories":[{"id":"c1","name":{"fr":"C","en":"C"},"weight":1,
                "questions":[{"id":"q1","text":{"fr":"Q","en":"Q"},"weight":0,
                 "options":[{"label":{"fr":"Non","en":"No"},"value":0}]}]}]}"#,
        );
        assert!(matches!(result, Err(CatalogError::InvalidWeight { .. })));
    }

    #[test]
    fn rejects_empty_catalog() {
        let result = minimal_catalog(r#"{"categories":[]}"#);
        assert!(matches!(result, Err(CatalogError::NoCategories)));
    }

    #[test]
    fn unknown_locale_tags_fall_back_to_french() {
        assert_eq!(Locale::parse("en"), Locale::En);
        assert_eq!(Locale::parse("EN "), Locale::En);
        assert_eq!(Locale::parse("fr"), Locale::Fr);
        assert_eq!(Locale::parse("de"), Locale::Fr);
        assert_eq!(Locale::parse(""), Locale::Fr);
    }

    #[test]
    fn max_option_value_handles_non_contiguous_values() {
        let catalog = minimal_catalog(
            r#"{"categories":[{"id":"c1","name":{"fr":"C","en":"C"},"weight":1,
                "questions":[{"id":"q1","text":{"fr":"Q","en":"Q"},"weight":2,
                 "options":[
                    {"label":{"fr":"A","en":"A"},"value":7},
                    {"label":{"fr":"B","en":"B"},"value":0},
                    {"label":{"fr":"C","en":"C"},"value":3}]}]}]}"#,
        )
        .expect("catalog loads");
        let question = &catalog.categories[0].questions[0];
        assert_eq!(question.max_option_value(), 7);
        assert_eq!(question.possible_score(), 14.0);
        assert_eq!(question.option_label(3, Locale::En), Some("C"));
        assert_eq!(question.option_label(9, Locale::En), None);
    }
}
