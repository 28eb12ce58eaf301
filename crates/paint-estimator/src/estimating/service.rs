use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use super::area::{AreaBreakdown, AreaCalculator, AreaError, Dimensions};
use super::cost::{
    price_surface, CostBreakdown, PricingError, PricingInputs, SurfaceField, SurfaceSpec,
};
use super::domain::{
    PaintDataEntry, PaintDataFilter, ReferenceSnapshot, SurfaceCategory, SurfaceConditionId,
};
use super::project::ProjectEstimate;
use super::repository::{ReferenceDataRepository, RepositoryError};
use crate::config::EstimatorConfig;

/// Composes the area calculator and the cost formulas over a reference-data repository.
pub struct EstimationService<R> {
    repository: Arc<R>,
    area: AreaCalculator,
    config: EstimatorConfig,
}

impl<R> EstimationService<R>
where
    R: ReferenceDataRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: EstimatorConfig) -> Self {
        Self {
            repository,
            area: AreaCalculator::from_config(&config),
            config,
        }
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    pub fn calculate_area(
        &self,
        category: SurfaceCategory,
        dimensions: &Dimensions,
    ) -> Result<AreaBreakdown, EstimateError> {
        let area = self.area.calculate(category, dimensions)?;
        debug!(%category, gross = area.gross_area, net = area.net_area, "area calculated");
        Ok(area)
    }

    pub fn validate_dimensions(&self, dimensions: &Dimensions) -> DimensionValidation {
        let errors = dimensions.validation_errors();
        DimensionValidation {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Price a single surface against the current reference data.
    pub fn surface_cost(&self, surface: &SurfaceSpec) -> Result<CostBreakdown, EstimateError> {
        self.price(surface)
    }

    /// Price every surface of a project. Any invalid surface rejects the whole batch before
    /// reference data is consulted.
    pub fn project_cost(
        &self,
        surfaces: Vec<SurfaceSpec>,
    ) -> Result<ProjectEstimate, EstimateError> {
        if surfaces.is_empty() {
            return Err(EstimateError::EmptyInput);
        }

        for (index, surface) in surfaces.iter().enumerate() {
            surface
                .required()
                .map_err(|field| EstimateError::MissingSurfaceField {
                    index: Some(index),
                    field,
                })?;
        }

        let mut priced = Vec::with_capacity(surfaces.len());
        for (index, surface) in surfaces.into_iter().enumerate() {
            let breakdown = self
                .price(&surface)
                .map_err(|err| err.at_surface(index))?;
            priced.push((surface, breakdown));
        }

        let estimate = ProjectEstimate::from_priced(priced);
        debug!(
            surfaces = estimate.surfaces.len(),
            total = estimate.total_cost,
            "project estimated"
        );
        Ok(estimate)
    }

    pub fn reference_data(&self) -> Result<ReferenceSnapshot, EstimateError> {
        Ok(self.repository.snapshot()?)
    }

    pub fn paint_data(
        &self,
        filter: &PaintDataFilter,
    ) -> Result<Vec<PaintDataEntry>, EstimateError> {
        Ok(self.repository.paint_data(filter)?)
    }

    fn price(&self, surface: &SurfaceSpec) -> Result<CostBreakdown, EstimateError> {
        let required = surface
            .required()
            .map_err(|field| EstimateError::MissingSurfaceField { index: None, field })?;

        let paint_data = self
            .repository
            .paint_data_entry(
                required.paint_type_id,
                required.surface_type_id,
                required.paint_quality_id,
            )?
            .ok_or_else(|| {
                EstimateError::not_found(format!(
                    "paint data for paint type {}, surface type {}, quality {}",
                    required.paint_type_id, required.surface_type_id, required.paint_quality_id
                ))
            })?;

        let surface_type = self
            .repository
            .surface_type(required.surface_type_id)?
            .ok_or_else(|| {
                EstimateError::not_found(format!("surface type {}", required.surface_type_id))
            })?;

        if let Some(requested) = surface.surface_category {
            if requested != surface_type.category {
                warn!(
                    %requested,
                    resolved = %surface_type.category,
                    surface_type = %surface_type.id,
                    "ignoring surface category that disagrees with the surface type"
                );
            }
        }

        let condition_id = surface
            .surface_condition_id
            .unwrap_or(SurfaceConditionId(self.config.default_condition_id));
        let condition = self
            .repository
            .surface_condition(condition_id)?
            .ok_or_else(|| EstimateError::not_found(format!("surface condition {condition_id}")))?;

        let region = surface
            .region
            .as_deref()
            .filter(|region| !region.trim().is_empty())
            .unwrap_or(self.config.default_region.as_str());
        let labor_rate = self
            .repository
            .labor_rate(region)?
            .ok_or_else(|| EstimateError::not_found(format!("labor rate for region '{region}'")))?;

        let coats = surface
            .coats
            .filter(|coats| *coats > 0)
            .unwrap_or(self.config.default_coats);

        let breakdown = price_surface(
            &PricingInputs {
                area: required.area,
                coats,
                category: surface_type.category,
                paint_data: &paint_data,
                condition: &condition,
                labor_rate: &labor_rate,
            },
            self.config.prep_time_divisor,
        )?;

        debug!(
            area = required.area,
            coats,
            material = breakdown.material_cost,
            labor = breakdown.labor_cost,
            "surface priced"
        );
        Ok(breakdown)
    }
}

/// Outcome of checking raw dimensions without computing an area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionValidation {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Error raised by the estimation service.
#[derive(Debug, thiserror::Error)]
pub enum EstimateError {
    #[error(transparent)]
    Area(#[from] AreaError),
    #[error("{}", missing_field_message(.index, .field))]
    MissingSurfaceField {
        index: Option<usize>,
        field: SurfaceField,
    },
    #[error("surfaces array cannot be empty")]
    EmptyInput,
    #[error("{}", not_found_message(.index, .reference))]
    ReferenceNotFound {
        index: Option<usize>,
        reference: String,
    },
    #[error(transparent)]
    Pricing(#[from] PricingError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl EstimateError {
    fn not_found(reference: String) -> Self {
        Self::ReferenceNotFound {
            index: None,
            reference,
        }
    }

    /// Attach the batch position of the surface that failed.
    fn at_surface(self, position: usize) -> Self {
        match self {
            Self::MissingSurfaceField { field, .. } => Self::MissingSurfaceField {
                index: Some(position),
                field,
            },
            Self::ReferenceNotFound { reference, .. } => Self::ReferenceNotFound {
                index: Some(position),
                reference,
            },
            other => other,
        }
    }

    /// Whether the failure stems from the request rather than the backing store.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, EstimateError::Repository(_))
    }
}

fn missing_field_message(index: &Option<usize>, field: &SurfaceField) -> String {
    match *index {
        Some(index) => format!(
            "surface {} is missing required field '{}'",
            index + 1,
            field.label()
        ),
        None => format!("missing required field '{}'", field.label()),
    }
}

fn not_found_message(index: &Option<usize>, reference: &str) -> String {
    match *index {
        Some(index) => format!("surface {}: reference data not found: {reference}", index + 1),
        None => format!("reference data not found: {reference}"),
    }
}
