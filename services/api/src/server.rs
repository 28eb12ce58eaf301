use crate::cli::ServeArgs;
use crate::infra::{reference_repository, AppState};
use crate::routes::with_estimation_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Local;
use paint_estimator::config::AppConfig;
use paint_estimator::error::AppError;
use paint_estimator::estimating::EstimationService;
use paint_estimator::telemetry;
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

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(reference_repository(
        &config.estimator,
        Local::now().date_naive(),
    )?);
    let snapshot = repository.catalog().snapshot();
    info!(
        paint_types = snapshot.paint_types.len(),
        surface_types = snapshot.surface_types.len(),
        labor_rates = snapshot.labor_rates.len(),
        paint_data = repository.catalog().paint_data.len(),
        "reference data loaded"
    );

    let service = Arc::new(EstimationService::new(repository, config.estimator.clone()));

    let app = with_estimation_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "paint estimator ready");

    axum::serve(listener, app).await?;
    Ok(())
}
