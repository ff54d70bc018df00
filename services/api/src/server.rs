use crate::cli::ServeArgs;
use crate::infra::{load_atlas, AppState};
use crate::routes::with_recall_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use recall_atlas::config::AppConfig;
use recall_atlas::error::AppError;
use recall_atlas::telemetry;
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

    telemetry::init(&config.telemetry)?;

    let atlas = load_atlas(&config.data, config.site.clone())?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = with_recall_routes(atlas)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, base_url = config.site.base_url(), "recall atlas api ready");

    axum::serve(listener, app).await?;
    Ok(())
}
