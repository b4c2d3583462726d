use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::catalog::{Catalog, Locale};
use super::recommend::{recommendations, Severity};
use super::score::{score, ResponseSet};

/// Free-form metadata describing the assessed application. Echoed into the
/// summary export and API responses; never interpreted by the core.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize CSV row")]
    Csv(#[from] csv::Error),
    #[error("failed to flush CSV buffer")]
    Flush(#[from] std::io::Error),
}

fn bilingual(locale: Locale, fr: &'static str, en: &'static str) -> &'static str {
    match locale {
        Locale::Fr => fr,
        Locale::En => en,
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

/// Assessment summary: application metadata, overall result, and the
/// per-category breakdown. Rows vary in width, so the writer is flexible.
pub fn summary_csv(
    catalog: &Catalog,
    responses: &ResponseSet,
    app_info: &AppInfo,
    locale: Locale,
    generated_on: NaiveDate,
) -> Result<Vec<u8>, ExportError> {
    let result = score(catalog, responses);
    let mut buf = Vec::new();
    {
        let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(&mut buf);
        let field = |fr, en| bilingual(locale, fr, en);

        writer.write_record([field("Champ", "Field"), field("Valeur", "Value")])?;
        writer.write_record([
            field("Application", "Application"),
            app_info.name.as_deref().unwrap_or("-"),
        ])?;
        writer.write_record([
            field("Propriétaire", "Owner"),
            app_info.owner.as_deref().unwrap_or("-"),
        ])?;
        writer.write_record([
            field("Date", "Date"),
            generated_on.format("%Y-%m-%d").to_string().as_str(),
        ])?;
        writer.write_record([
            field("Score global", "Overall score"),
            format!(
                "{} / {}",
                format_number(result.achieved),
                format_number(result.possible)
            )
            .as_str(),
        ])?;
        writer.write_record([
            field("Pourcentage", "Percentage"),
            format!("{}%", format_number(result.percentage)).as_str(),
        ])?;
        writer.write_record([
            field("Niveau de risque", "Risk level"),
            result.risk_level.label(locale),
        ])?;
        writer.write_record([
            field("Recommandation d'audit", "Audit recommendation"),
            result.audit.label(locale),
        ])?;

        writer.write_record(["", ""])?;
        writer.write_record([
            field("Catégorie", "Category"),
            field("Score", "Score"),
            field("Maximum", "Maximum"),
            field("Pourcentage", "Percentage"),
        ])?;
        for category_score in &result.categories {
            let name = catalog
                .category(&category_score.category_id)
                .map(|category| category.name.in_locale(locale))
                .unwrap_or(category_score.category_id.as_str());
            writer.write_record([
                name,
                format_number(category_score.achieved).as_str(),
                format_number(category_score.possible).as_str(),
                format!("{}%", format_number(category_score.percentage)).as_str(),
            ])?;
        }

        writer.flush()?;
    }
    Ok(buf)
}

/// One row per answered question, in catalog order.
pub fn answers_csv(
    catalog: &Catalog,
    responses: &ResponseSet,
    locale: Locale,
) -> Result<Vec<u8>, ExportError> {
    let mut buf = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);
        writer.write_record([
            bilingual(locale, "Catégorie", "Category"),
            bilingual(locale, "Question", "Question"),
            bilingual(locale, "Réponse", "Answer"),
            bilingual(locale, "Valeur", "Value"),
            bilingual(locale, "Maximum", "Maximum"),
            bilingual(locale, "Standards", "Standards"),
        ])?;

        for category in &catalog.categories {
            for question in &category.questions {
                let Some(value) = responses.get(&question.id) else {
                    continue;
                };
                let label = question
                    .option_label(*value, locale)
                    .map(str::to_string)
                    .unwrap_or_else(|| value.to_string());
                writer.write_record([
                    category.name.in_locale(locale),
                    question.text.in_locale(locale),
                    label.as_str(),
                    value.to_string().as_str(),
                    question.max_option_value().to_string().as_str(),
                    question.standards.join(", ").as_str(),
                ])?;
            }
        }

        writer.flush()?;
    }
    Ok(buf)
}

/// Remediation list, one row per flagged answer.
pub fn recommendations_csv(
    catalog: &Catalog,
    responses: &ResponseSet,
    locale: Locale,
) -> Result<Vec<u8>, ExportError> {
    let items = recommendations(catalog, responses, locale);
    let mut buf = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);
        writer.write_record([
            bilingual(locale, "Sévérité", "Severity"),
            bilingual(locale, "Catégorie", "Category"),
            bilingual(locale, "Question", "Question"),
            bilingual(locale, "Standards", "Standards"),
            "Question ID",
        ])?;
        for item in &items {
            let severity = match item.severity {
                Severity::High => bilingual(locale, "haute", "high"),
                Severity::Medium => bilingual(locale, "moyenne", "medium"),
            };
            writer.write_record([
                severity,
                item.category.as_str(),
                item.question.as_str(),
                item.standards.join(", ").as_str(),
                item.question_id.as_str(),
            ])?;
        }
        writer.flush()?;
    }
    Ok(buf)
}

/// Blank questionnaire for offline completion: every question with its
/// available options and an empty answer column.
pub fn template_csv(catalog: &Catalog, locale: Locale) -> Result<Vec<u8>, ExportError> {
    let mut buf = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);
        writer.write_record([
            bilingual(locale, "Catégorie", "Category"),
            bilingual(locale, "Question", "Question"),
            bilingual(locale, "Standards", "Standards"),
            bilingual(locale, "Options", "Options"),
            bilingual(locale, "Réponse", "Answer"),
        ])?;
        for category in &catalog.categories {
            for question in &category.questions {
                let options = question
                    .options
                    .iter()
                    .map(|option| option.label.in_locale(locale))
                    .collect::<Vec<_>>()
                    .join(" | ");
                writer.write_record([
                    category.name.in_locale(locale),
                    question.text.in_locale(locale),
                    question.standards.join(", ").as_str(),
                    options.as_str(),
                    "",
                ])?;
            }
        }
        writer.flush()?;
    }
    Ok(buf)
}
