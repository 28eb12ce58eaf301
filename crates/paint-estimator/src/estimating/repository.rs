use std::sync::Arc;

use super::domain::{
    LaborRate, PaintDataEntry, PaintDataFilter, PaintQuality, PaintQualityId, PaintType,
    PaintTypeId, ReferenceSnapshot, SurfaceCondition, SurfaceConditionId, SurfaceType,
    SurfaceTypeId,
};

/// Read-only access to the reference data the calculators price against.
///
/// Lookups return `Ok(None)` for absent or inactive records; errors are reserved for an
/// unreachable backing store.
pub trait ReferenceDataRepository: Send + Sync {
    fn paint_data_entry(
        &self,
        paint_type: PaintTypeId,
        surface_type: SurfaceTypeId,
        quality: PaintQualityId,
    ) -> Result<Option<PaintDataEntry>, RepositoryError>;

    fn labor_rate(&self, region: &str) -> Result<Option<LaborRate>, RepositoryError>;

    fn surface_condition(
        &self,
        id: SurfaceConditionId,
    ) -> Result<Option<SurfaceCondition>, RepositoryError>;

    fn surface_type(&self, id: SurfaceTypeId) -> Result<Option<SurfaceType>, RepositoryError>;

    fn snapshot(&self) -> Result<ReferenceSnapshot, RepositoryError>;

    fn paint_data(&self, filter: &PaintDataFilter) -> Result<Vec<PaintDataEntry>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("reference data unavailable: {0}")]
    Unavailable(String),
}

/// Complete set of reference collections, active or not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceCatalog {
    pub paint_types: Vec<PaintType>,
    pub surface_types: Vec<SurfaceType>,
    pub paint_qualities: Vec<PaintQuality>,
    pub surface_conditions: Vec<SurfaceCondition>,
    pub labor_rates: Vec<LaborRate>,
    pub paint_data: Vec<PaintDataEntry>,
}

impl ReferenceCatalog {
    pub fn snapshot(&self) -> ReferenceSnapshot {
        ReferenceSnapshot {
            paint_types: active(&self.paint_types, |item| item.is_active),
            surface_types: active(&self.surface_types, |item| item.is_active),
            paint_qualities: active(&self.paint_qualities, |item| item.is_active),
            surface_conditions: active(&self.surface_conditions, |item| item.is_active),
            labor_rates: active(&self.labor_rates, |item| item.is_active),
        }
    }

    /// Latest active rate for a region, compared case-insensitively.
    pub fn labor_rate_for(&self, region: &str) -> Option<&LaborRate> {
        let region = region.trim();
        self.labor_rates
            .iter()
            .filter(|rate| rate.is_active && rate.region.eq_ignore_ascii_case(region))
            .max_by_key(|rate| rate.effective_date)
    }
}

fn active<T: Clone>(items: &[T], is_active: impl Fn(&T) -> bool) -> Vec<T> {
    items.iter().filter(|item| is_active(*item)).cloned().collect()
}

/// Repository serving an immutable catalog held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReferenceData {
    catalog: Arc<ReferenceCatalog>,
}

impl InMemoryReferenceData {
    pub fn new(catalog: ReferenceCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    pub fn catalog(&self) -> &ReferenceCatalog {
        &self.catalog
    }
}

impl ReferenceDataRepository for InMemoryReferenceData {
    fn paint_data_entry(
        &self,
        paint_type: PaintTypeId,
        surface_type: SurfaceTypeId,
        quality: PaintQualityId,
    ) -> Result<Option<PaintDataEntry>, RepositoryError> {
        Ok(self
            .catalog
            .paint_data
            .iter()
            .find(|entry| {
                entry.is_active
                    && entry.paint_type_id == paint_type
                    && entry.surface_type_id == surface_type
                    && entry.paint_quality_id == quality
            })
            .cloned())
    }

    fn labor_rate(&self, region: &str) -> Result<Option<LaborRate>, RepositoryError> {
        Ok(self.catalog.labor_rate_for(region).cloned())
    }

    fn surface_condition(
        &self,
        id: SurfaceConditionId,
    ) -> Result<Option<SurfaceCondition>, RepositoryError> {
        Ok(self
            .catalog
            .surface_conditions
            .iter()
            .find(|condition| condition.is_active && condition.id == id)
            .cloned())
    }

    fn surface_type(&self, id: SurfaceTypeId) -> Result<Option<SurfaceType>, RepositoryError> {
        Ok(self
            .catalog
            .surface_types
            .iter()
            .find(|surface| surface.is_active && surface.id == id)
            .cloned())
    }

    fn snapshot(&self) -> Result<ReferenceSnapshot, RepositoryError> {
        Ok(self.catalog.snapshot())
    }

    fn paint_data(&self, filter: &PaintDataFilter) -> Result<Vec<PaintDataEntry>, RepositoryError> {
        Ok(self
            .catalog
            .paint_data
            .iter()
            .filter(|entry| entry.is_active && filter.matches(entry))
            .cloned()
            .collect())
    }
}
