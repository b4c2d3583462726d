use crate::cli::ServeArgs;
use crate::infra::{load_catalog, AppState};
use crate::routes::api_router;
use axum_prometheus::PrometheusMetricLayer;
use secscore::config::AppConfig;
use secscore::error::AppError;
use secscore::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(catalog_path) = args.catalog.take() {
        config.catalog.path = Some(catalog_path);
    }

    telemetry::init(&config.telemetry)?;

    let catalog = Arc::new(load_catalog(&config.catalog)?);
    info!(
        categories = catalog.categories.len(),
        questions = catalog.question_count(),
        "question catalog loaded"
    );

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        catalog,
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = api_router(app_state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "security assessment service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
