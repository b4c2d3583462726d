use metrics_exporter_prometheus::PrometheusHandle;
use secscore::assessment::{Catalog, Locale};
use secscore::config::CatalogConfig;
use secscore::error::AppError;
use serde::Deserialize;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) catalog: Arc<Catalog>,
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Load the catalog once at startup. A configured path overrides the
/// built-in questionnaire; either failure is fatal.
pub(crate) fn load_catalog(config: &CatalogConfig) -> Result<Catalog, AppError> {
    let catalog = match &config.path {
        Some(path) => Catalog::from_path(path)?,
        None => Catalog::builtin()?,
    };
    Ok(catalog)
}

/// `?lang=` query parameter shared by the read-only endpoints. Unknown
/// tags fall back to the primary locale.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct LangQuery {
    #[serde(default)]
    pub(crate) lang: Option<String>,
}

impl LangQuery {
    pub(crate) fn locale(&self) -> Locale {
        self.lang
            .as_deref()
            .map(Locale::parse)
            .unwrap_or_default()
    }
}
