use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, warn};

use super::area::Dimensions;
use super::cost::SurfaceSpec;
use super::domain::{PaintDataFilter, SurfaceCategory};
use super::repository::ReferenceDataRepository;
use super::service::{EstimateError, EstimationService};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AreaRequest {
    pub(crate) surface_type: SurfaceCategory,
    pub(crate) dimensions: Dimensions,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProjectCostRequest {
    #[serde(default)]
    pub(crate) surfaces: Vec<SurfaceSpec>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ValidateDimensionsRequest {
    #[serde(default)]
    pub(crate) dimensions: Dimensions,
}

/// Router builder exposing the calculation endpoints.
pub fn estimation_router<R>(service: Arc<EstimationService<R>>) -> Router
where
    R: ReferenceDataRepository + 'static,
{
    Router::new()
        .route("/api/calculate/area", post(area_handler::<R>))
        .route("/api/calculate/surface-cost", post(surface_cost_handler::<R>))
        .route("/api/calculate/project-cost", post(project_cost_handler::<R>))
        .route(
            "/api/calculate/validate-dimensions",
            post(validate_dimensions_handler::<R>),
        )
        .route("/api/calculate/reference-data", get(reference_data_handler::<R>))
        .route("/api/calculate/paint-data", get(paint_data_handler::<R>))
        .with_state(service)
}

pub(crate) async fn area_handler<R>(
    State(service): State<Arc<EstimationService<R>>>,
    payload: Result<Json<AreaRequest>, JsonRejection>,
) -> Response
where
    R: ReferenceDataRepository + 'static,
{
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return malformed(rejection.body_text()),
    };

    match service.calculate_area(request.surface_type, &request.dimensions) {
        Ok(area) => success(json!({ "success": true, "area": area.rounded() })),
        Err(error) => failure(error),
    }
}

pub(crate) async fn surface_cost_handler<R>(
    State(service): State<Arc<EstimationService<R>>>,
    payload: Result<Json<SurfaceSpec>, JsonRejection>,
) -> Response
where
    R: ReferenceDataRepository + 'static,
{
    let Json(surface) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return malformed(rejection.body_text()),
    };

    match service.surface_cost(&surface) {
        Ok(breakdown) => success(json!({
            "success": true,
            "costBreakdown": breakdown.rounded(),
        })),
        Err(error) => failure(error),
    }
}

pub(crate) async fn project_cost_handler<R>(
    State(service): State<Arc<EstimationService<R>>>,
    payload: Result<Json<ProjectCostRequest>, JsonRejection>,
) -> Response
where
    R: ReferenceDataRepository + 'static,
{
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return malformed(rejection.body_text()),
    };

    match service.project_cost(request.surfaces) {
        Ok(estimate) => success(json!({ "success": true, "data": estimate.rounded() })),
        Err(error) => failure(error),
    }
}

pub(crate) async fn validate_dimensions_handler<R>(
    State(service): State<Arc<EstimationService<R>>>,
    payload: Result<Json<ValidateDimensionsRequest>, JsonRejection>,
) -> Response
where
    R: ReferenceDataRepository + 'static,
{
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return malformed(rejection.body_text()),
    };

    let validation = service.validate_dimensions(&request.dimensions);
    success(json!({ "success": validation.valid, "data": validation }))
}

pub(crate) async fn reference_data_handler<R>(
    State(service): State<Arc<EstimationService<R>>>,
) -> Response
where
    R: ReferenceDataRepository + 'static,
{
    match service.reference_data() {
        Ok(snapshot) => success(json!({ "success": true, "data": snapshot })),
        Err(error) => failure(error),
    }
}

pub(crate) async fn paint_data_handler<R>(
    State(service): State<Arc<EstimationService<R>>>,
    filter: Result<Query<PaintDataFilter>, QueryRejection>,
) -> Response
where
    R: ReferenceDataRepository + 'static,
{
    let Query(filter) = match filter {
        Ok(filter) => filter,
        Err(rejection) => return malformed(rejection.body_text()),
    };

    match service.paint_data(&filter) {
        Ok(entries) => success(json!({ "success": true, "data": entries })),
        Err(error) => failure(error),
    }
}

fn success(payload: serde_json::Value) -> Response {
    (StatusCode::OK, Json(payload)).into_response()
}

fn malformed(message: String) -> Response {
    warn!(%message, "rejected malformed calculation request");
    let payload = json!({ "success": false, "error": message });
    (StatusCode::BAD_REQUEST, Json(payload)).into_response()
}

fn failure(err: EstimateError) -> Response {
    let status = if err.is_client_error() {
        warn!(error = %err, "rejected calculation request");
        StatusCode::BAD_REQUEST
    } else {
        error!(error = %err, "calculation failed");
        StatusCode::INTERNAL_SERVER_ERROR
    };

    let payload = json!({ "success": false, "error": err.to_string() });
    (status, Json(payload)).into_response()
}
