use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::config::EstimatorConfig;
use crate::estimating::domain::{
    LaborRate, LaborRateId, PaintDataEntry, PaintDataFilter, PaintDataId, PaintQualityId,
    PaintTypeId, ReferenceSnapshot, SurfaceCondition, SurfaceConditionId, SurfaceType,
    SurfaceTypeId,
};
use crate::estimating::repository::{
    InMemoryReferenceData, ReferenceCatalog, ReferenceDataRepository, RepositoryError,
};
use crate::estimating::{estimation_router, EstimationService, SurfaceSpec};

pub(super) fn effective_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date")
}

pub(super) fn seeded_repository() -> InMemoryReferenceData {
    InMemoryReferenceData::new(ReferenceCatalog::seeded(effective_date()))
}

pub(super) fn seeded_service() -> EstimationService<InMemoryReferenceData> {
    EstimationService::new(Arc::new(seeded_repository()), EstimatorConfig::default())
}

pub(super) fn seeded_router() -> axum::Router {
    estimation_router(Arc::new(seeded_service()))
}

/// Standard interior latex on drywall, excellent condition, Sydney labor.
pub(super) fn wall_surface(area: f64) -> SurfaceSpec {
    SurfaceSpec {
        area: Some(area),
        coats: Some(2),
        paint_type_id: Some(PaintTypeId(1)),
        surface_type_id: Some(SurfaceTypeId(1)),
        paint_quality_id: Some(PaintQualityId(2)),
        surface_condition_id: Some(SurfaceConditionId(1)),
        region: Some("Sydney".to_string()),
        ..SurfaceSpec::default()
    }
}

pub(super) fn approx(left: f64, right: f64) -> bool {
    (left - right).abs() < 1e-9
}

/// Catalog with a single wall combination priced at 0.80 per square metre.
pub(super) fn fixed_price_catalog() -> ReferenceCatalog {
    let mut catalog = ReferenceCatalog::seeded(effective_date());
    catalog.paint_data = vec![PaintDataEntry {
        id: PaintDataId(1),
        paint_type_id: PaintTypeId(1),
        surface_type_id: SurfaceTypeId(1),
        paint_quality_id: PaintQualityId(1),
        cost_per_m2: 0.8,
        coverage: 12.0,
        notes: "fixture".to_string(),
        is_active: true,
    }];
    catalog
}

pub(super) fn labor_rate(
    id: u32,
    region: &str,
    total_rate: f64,
    effective: NaiveDate,
) -> LaborRate {
    LaborRate {
        id: LaborRateId(id),
        name: format!("{region} rate"),
        region: region.to_string(),
        hourly_rate: total_rate,
        overhead_rate: 0.0,
        profit_margin: 0.0,
        total_rate,
        effective_date: effective,
        is_active: true,
    }
}

/// Delegates to the seeded catalog while counting every lookup.
#[derive(Default)]
pub(super) struct CountingRepository {
    inner: InMemoryReferenceData,
    lookups: AtomicUsize,
}

impl CountingRepository {
    pub(super) fn seeded() -> Self {
        Self {
            inner: seeded_repository(),
            lookups: AtomicUsize::new(0),
        }
    }

    pub(super) fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    fn touch(&self) {
        self.lookups.fetch_add(1, Ordering::SeqCst);
    }
}

impl ReferenceDataRepository for CountingRepository {
    fn paint_data_entry(
        &self,
        paint_type: PaintTypeId,
        surface_type: SurfaceTypeId,
        quality: PaintQualityId,
    ) -> Result<Option<PaintDataEntry>, RepositoryError> {
        self.touch();
        self.inner.paint_data_entry(paint_type, surface_type, quality)
    }

    fn labor_rate(&self, region: &str) -> Result<Option<LaborRate>, RepositoryError> {
        self.touch();
        self.inner.labor_rate(region)
    }

    fn surface_condition(
        &self,
        id: SurfaceConditionId,
    ) -> Result<Option<SurfaceCondition>, RepositoryError> {
        self.touch();
        self.inner.surface_condition(id)
    }

    fn surface_type(&self, id: SurfaceTypeId) -> Result<Option<SurfaceType>, RepositoryError> {
        self.touch();
        self.inner.surface_type(id)
    }

    fn snapshot(&self) -> Result<ReferenceSnapshot, RepositoryError> {
        self.touch();
        self.inner.snapshot()
    }

    fn paint_data(&self, filter: &PaintDataFilter) -> Result<Vec<PaintDataEntry>, RepositoryError> {
        self.touch();
        self.inner.paint_data(filter)
    }
}

pub(super) struct UnavailableRepository;

impl ReferenceDataRepository for UnavailableRepository {
    fn paint_data_entry(
        &self,
        _paint_type: PaintTypeId,
        _surface_type: SurfaceTypeId,
        _quality: PaintQualityId,
    ) -> Result<Option<PaintDataEntry>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn labor_rate(&self, _region: &str) -> Result<Option<LaborRate>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn surface_condition(
        &self,
        _id: SurfaceConditionId,
    ) -> Result<Option<SurfaceCondition>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn surface_type(&self, _id: SurfaceTypeId) -> Result<Option<SurfaceType>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn snapshot(&self) -> Result<ReferenceSnapshot, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn paint_data(
        &self,
        _filter: &PaintDataFilter,
    ) -> Result<Vec<PaintDataEntry>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
