use crate::infra::load_catalog;
use chrono::Local;
use clap::Args;
use secscore::assessment::{
    export, recommendations, score, AppInfo, Catalog, Locale, RecommendationItem, ResponseSet,
    ScoreResult, Severity,
};
use secscore::config::CatalogConfig;
use secscore::error::AppError;
use std::fs;
use std::fs::File;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// JSON file mapping question ids to selected option values
    #[arg(long)]
    pub(crate) responses: PathBuf,
    /// Report language (fr or en; unknown tags fall back to fr)
    #[arg(long, default_value = "fr")]
    pub(crate) lang: String,
    /// Load the question catalog from a JSON file instead of the built-in one
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Name of the assessed application, echoed into the summary export
    #[arg(long)]
    pub(crate) app_name: Option<String>,
    /// Write summary, answers, and recommendations CSV files here
    #[arg(long)]
    pub(crate) export_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Report language (fr or en)
    #[arg(long, default_value = "fr")]
    pub(crate) lang: String,
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs {
        responses,
        lang,
        catalog,
        app_name,
        export_dir,
    } = args;

    let locale = Locale::parse(&lang);
    let catalog = load_catalog(&CatalogConfig { path: catalog })?;

    let file = File::open(&responses)?;
    let responses: ResponseSet =
        serde_json::from_reader(file).map_err(AppError::Responses)?;

    let result = score(&catalog, &responses);
    let items = recommendations(&catalog, &responses, locale);
    render_assessment(&catalog, &result, &items, locale);

    if let Some(dir) = export_dir {
        let app_info = AppInfo {
            name: app_name,
            ..AppInfo::default()
        };
        write_export_bundle(&catalog, &responses, &app_info, locale, &dir)?;
        println!("\nCSV export written to {}", dir.display());
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let locale = Locale::parse(&args.lang);
    let catalog = Catalog::builtin()?;

    // A mixed posture: cycle through each question's options so the demo
    // exercises every severity and at least one under-50% category.
    let mut responses = ResponseSet::new();
    let mut cursor = 0usize;
    for category in &catalog.categories {
        for question in &category.questions {
            let option = &question.options[cursor % question.options.len()];
            responses.insert(question.id.clone(), option.value);
            cursor += 1;
        }
    }

    println!("Security assessment demo ({})", locale.tag());
    let result = score(&catalog, &responses);
    let items = recommendations(&catalog, &responses, locale);
    render_assessment(&catalog, &result, &items, locale);

    Ok(())
}

fn render_assessment(
    catalog: &Catalog,
    result: &ScoreResult,
    items: &[RecommendationItem],
    locale: Locale,
) {
    println!(
        "Overall score: {} / {} ({}%)",
        result.achieved, result.possible, result.percentage
    );
    println!("Risk level: {}", result.risk_level.label(locale));
    println!(
        "Audit recommendation: {} (priority {:?})",
        result.audit.label(locale),
        result.audit.priority()
    );

    println!("Category breakdown:");
    for category_score in &result.categories {
        let name = catalog
            .category(&category_score.category_id)
            .map(|category| category.name.in_locale(locale))
            .unwrap_or(category_score.category_id.as_str());
        println!(
            "  - {}: {} / {} ({}%)",
            name, category_score.achieved, category_score.possible, category_score.percentage
        );
    }

    if items.is_empty() {
        println!("No remediation items.");
        return;
    }

    println!("Remediation items:");
    for item in items {
        let severity = match item.severity {
            Severity::High => "high",
            Severity::Medium => "medium",
        };
        if item.standards.is_empty() {
            println!("  - [{severity}] {}: {}", item.category, item.question);
        } else {
            println!(
                "  - [{severity}] {}: {} ({})",
                item.category,
                item.question,
                item.standards.join(", ")
            );
        }
    }
}

fn write_export_bundle(
    catalog: &Catalog,
    responses: &ResponseSet,
    app_info: &AppInfo,
    locale: Locale,
    dir: &PathBuf,
) -> Result<(), AppError> {
    fs::create_dir_all(dir)?;
    let today = Local::now().date_naive();

    let summary = export::summary_csv(catalog, responses, app_info, locale, today)?;
    fs::write(dir.join("summary.csv"), summary)?;

    let answers = export::answers_csv(catalog, responses, locale)?;
    fs::write(dir.join("answers.csv"), answers)?;

    let remediation = export::recommendations_csv(catalog, responses, locale)?;
    fs::write(dir.join("recommendations.csv"), remediation)?;

    Ok(())
}
