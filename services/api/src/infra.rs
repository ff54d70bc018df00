use metrics_exporter_prometheus::PrometheusHandle;
use recall_atlas::config::{DataConfig, SiteConfig};
use recall_atlas::error::AppError;
use recall_atlas::recall::RecallAtlas;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::error;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Load both static documents; any problem is fatal for the caller.
pub(crate) fn load_atlas(data: &DataConfig, site: SiteConfig) -> Result<Arc<RecallAtlas>, AppError> {
    match RecallAtlas::load(data, site) {
        Ok(atlas) => Ok(Arc::new(atlas)),
        Err(err) => {
            error!(error = %err, "unable to load recall data");
            Err(err.into())
        }
    }
}
