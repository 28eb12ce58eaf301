//! Painting estimates: surface areas, material and labor pricing, and the reference data
//! they are priced against.

pub mod area;
pub mod cost;
pub mod domain;
pub mod import;
pub mod project;
pub mod repository;
pub mod router;
pub mod seed;
pub mod service;

#[cfg(test)]
mod tests;

pub use area::{AreaBreakdown, AreaCalculator, AreaError, Dimension, Dimensions};
pub use cost::{
    price_surface, CostBreakdown, PricingError, PricingInputs, SurfaceField, SurfaceSpec,
};
pub use domain::{
    LaborRate, PaintDataEntry, PaintDataFilter, PaintQuality, PaintType, QualityLevel,
    ReferenceSnapshot, SurfaceCategory, SurfaceCondition, SurfaceType,
};
pub use import::{LaborRateImportError, LaborRateImporter};
pub use project::{ProjectEstimate, SurfaceEstimate};
pub use repository::{
    InMemoryReferenceData, ReferenceCatalog, ReferenceDataRepository, RepositoryError,
};
pub use router::estimation_router;
pub use seed::{write_paint_data_csv, PricingRules};
pub use service::{DimensionValidation, EstimateError, EstimationService};
