use crate::infra::{AppState, LangQuery};
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Local;
use secscore::assessment::{
    export, recommendations, score, AppInfo, AuditRecommendationView, CategoryScore, Locale,
    LocalizedText, RecommendationItem, ResponseSet, RiskLevelView, ScoreResult,
};
use secscore::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub(crate) fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/questions", get(questions_endpoint))
        .route("/api/v1/questions/:category_id", get(category_endpoint))
        .route("/api/v1/stats", get(stats_endpoint))
        .route("/api/v1/assessments", post(submit_endpoint))
        .route("/api/v1/export/results", post(export_results_endpoint))
        .route("/api/v1/export/template", get(export_template_endpoint))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub(crate) struct AssessmentRequest {
    pub(crate) responses: ResponseSet,
    #[serde(default)]
    pub(crate) lang: Option<String>,
    #[serde(default)]
    pub(crate) app_info: AppInfo,
}

impl AssessmentRequest {
    fn locale(&self) -> Locale {
        self.lang.as_deref().map(Locale::parse).unwrap_or_default()
    }
}

/// Score result shaped for API consumers: the raw numbers plus the fixed
/// presentation metadata for risk tier and audit recommendation.
#[derive(Debug, Serialize)]
pub(crate) struct ScoreView {
    pub(crate) total_score: f64,
    pub(crate) max_score: f64,
    pub(crate) percentage: f64,
    pub(crate) risk_level: RiskLevelView,
    pub(crate) audit_recommendation: AuditRecommendationView,
    pub(crate) categories: Vec<CategoryScore>,
}

impl From<ScoreResult> for ScoreView {
    fn from(result: ScoreResult) -> Self {
        Self {
            total_score: result.achieved,
            max_score: result.possible,
            percentage: result.percentage,
            risk_level: result.risk_level.view(),
            audit_recommendation: result.audit.view(),
            categories: result.categories,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AssessmentResponse {
    pub(crate) score: ScoreView,
    pub(crate) recommendations: Vec<RecommendationItem>,
    pub(crate) app_info: AppInfo,
    pub(crate) timestamp: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct StatsResponse {
    pub(crate) total_questions: usize,
    pub(crate) categories_count: usize,
    pub(crate) categories: Vec<CategoryStat>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CategoryStat {
    pub(crate) id: String,
    pub(crate) name: LocalizedText,
    pub(crate) questions_count: usize,
    pub(crate) weight: f64,
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "timestamp": Local::now().to_rfc3339() }))
}

pub(crate) async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Full catalog, both locales included; consumers pick the text they need.
pub(crate) async fn questions_endpoint(State(state): State<AppState>) -> Response {
    Json(state.catalog.as_ref().clone()).into_response()
}

pub(crate) async fn category_endpoint(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
) -> Response {
    match state.catalog.category(&category_id) {
        Some(category) => Json(category.clone()).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "category not found" })),
        )
            .into_response(),
    }
}

pub(crate) async fn stats_endpoint(State(state): State<AppState>) -> Json<StatsResponse> {
    let categories: Vec<CategoryStat> = state
        .catalog
        .categories
        .iter()
        .map(|category| CategoryStat {
            id: category.id.clone(),
            name: category.name.clone(),
            questions_count: category.questions.len(),
            weight: category.weight,
        })
        .collect();

    Json(StatsResponse {
        total_questions: state.catalog.question_count(),
        categories_count: categories.len(),
        categories,
    })
}

/// Score a submitted response set. An empty map is rejected here as a
/// request-layer policy; the scoring core itself handles it fine.
pub(crate) async fn submit_endpoint(
    State(state): State<AppState>,
    Json(request): Json<AssessmentRequest>,
) -> Response {
    if request.responses.is_empty() {
        let payload = json!({ "error": "no responses provided" });
        return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
    }

    let locale = request.locale();
    let result = score(&state.catalog, &request.responses);
    let items = recommendations(&state.catalog, &request.responses, locale);

    let response = AssessmentResponse {
        score: ScoreView::from(result),
        recommendations: items,
        app_info: request.app_info,
        timestamp: Local::now().to_rfc3339(),
    };
    (StatusCode::OK, Json(response)).into_response()
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ExportQuery {
    #[serde(default)]
    sheet: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResultSheet {
    Summary,
    Answers,
    Recommendations,
}

impl ResultSheet {
    fn parse(raw: Option<&str>) -> Option<Self> {
        match raw.map(|value| value.trim().to_ascii_lowercase()) {
            None => Some(Self::Summary),
            Some(value) => match value.as_str() {
                "" | "summary" => Some(Self::Summary),
                "answers" => Some(Self::Answers),
                "recommendations" => Some(Self::Recommendations),
                _ => None,
            },
        }
    }
}

pub(crate) async fn export_results_endpoint(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
    Json(request): Json<AssessmentRequest>,
) -> Result<Response, AppError> {
    if request.responses.is_empty() {
        let payload = json!({ "error": "no responses provided" });
        return Ok((StatusCode::BAD_REQUEST, Json(payload)).into_response());
    }

    let Some(sheet) = ResultSheet::parse(query.sheet.as_deref()) else {
        let payload = json!({ "error": "unknown sheet; use summary, answers, or recommendations" });
        return Ok((StatusCode::BAD_REQUEST, Json(payload)).into_response());
    };

    let locale = request.locale();
    let today = Local::now().date_naive();
    let bytes = match sheet {
        ResultSheet::Summary => export::summary_csv(
            &state.catalog,
            &request.responses,
            &request.app_info,
            locale,
            today,
        )?,
        ResultSheet::Answers => export::answers_csv(&state.catalog, &request.responses, locale)?,
        ResultSheet::Recommendations => {
            export::recommendations_csv(&state.catalog, &request.responses, locale)?
        }
    };

    let app = request
        .app_info
        .name
        .as_deref()
        .map(sanitize_filename_part)
        .unwrap_or_else(|| "application".to_string());
    let filename = format!("security_assessment_{app}_{}.csv", today.format("%Y%m%d"));
    Ok(csv_attachment(filename, bytes))
}

pub(crate) async fn export_template_endpoint(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
) -> Result<Response, AppError> {
    let locale = query.locale();
    let bytes = export::template_csv(&state.catalog, locale)?;
    let filename = format!(
        "security_questionnaire_template_{}_{}.csv",
        locale.tag(),
        Local::now().format("%Y%m%d")
    );
    Ok(csv_attachment(filename, bytes))
}

fn sanitize_filename_part(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if cleaned.is_empty() {
        "application".to_string()
    } else {
        cleaned
    }
}

fn csv_attachment(filename: String, bytes: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}
