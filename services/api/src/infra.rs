use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use paint_estimator::config::EstimatorConfig;
use paint_estimator::error::AppError;
use paint_estimator::estimating::{InMemoryReferenceData, ReferenceCatalog, SurfaceCategory};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Seeded catalog, with labor rates replaced from CSV when configured.
pub(crate) fn load_catalog(
    config: &EstimatorConfig,
    effective_date: NaiveDate,
) -> Result<ReferenceCatalog, AppError> {
    let catalog = ReferenceCatalog::seeded(effective_date);
    match &config.labor_rates_csv {
        Some(path) => Ok(catalog.with_labor_rates_from(path)?),
        None => Ok(catalog),
    }
}

pub(crate) fn reference_repository(
    config: &EstimatorConfig,
    effective_date: NaiveDate,
) -> Result<InMemoryReferenceData, AppError> {
    load_catalog(config, effective_date).map(InMemoryReferenceData::new)
}

pub(crate) fn parse_surface_category(raw: &str) -> Result<SurfaceCategory, String> {
    SurfaceCategory::parse(raw).ok_or_else(|| {
        format!("'{raw}' is not a surface category (expected wall, ceiling, door, or linear)")
    })
}
