//! Standard reference data and the pricing rule that derives the paint-data matrix.

use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use super::domain::{
    LaborRate, LaborRateId, PaintDataEntry, PaintDataId, PaintQuality, PaintQualityId, PaintType,
    PaintTypeId, QualityLevel, SurfaceCategory, SurfaceCondition, SurfaceConditionId,
    SurfaceType, SurfaceTypeId,
};
use super::repository::ReferenceCatalog;

/// Multiplier applied when a paint type's name contains `marker`.
#[derive(Debug, Clone, PartialEq)]
pub struct NameAdjustment {
    pub marker: &'static str,
    pub multiplier: f64,
}

/// Inputs to the per-square-metre pricing of a paint combination.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingRules {
    pub base_cost_per_m2: f64,
    pub basic_multiplier: f64,
    pub standard_multiplier: f64,
    pub premium_multiplier: f64,
    pub ceiling_multiplier: f64,
    pub door_multiplier: f64,
    pub linear_multiplier: f64,
    /// Matched against paint type names; every matching marker applies.
    pub name_adjustments: Vec<NameAdjustment>,
    pub default_coverage: f64,
    pub premium_coverage: f64,
}

impl Default for PricingRules {
    fn default() -> Self {
        Self {
            base_cost_per_m2: 0.15,
            basic_multiplier: 0.7,
            standard_multiplier: 1.0,
            premium_multiplier: 1.4,
            ceiling_multiplier: 1.2,
            door_multiplier: 1.5,
            linear_multiplier: 1.8,
            name_adjustments: vec![
                NameAdjustment {
                    marker: "Exterior",
                    multiplier: 1.3,
                },
                NameAdjustment {
                    marker: "Enamel",
                    multiplier: 1.6,
                },
            ],
            default_coverage: 12.0,
            premium_coverage: 14.0,
        }
    }
}

/// Cost and coverage derived for one combination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedPricing {
    pub cost_per_m2: f64,
    pub coverage: f64,
}

impl PricingRules {
    fn quality_multiplier(&self, level: QualityLevel) -> f64 {
        match level {
            QualityLevel::Basic => self.basic_multiplier,
            QualityLevel::Standard => self.standard_multiplier,
            QualityLevel::Premium => self.premium_multiplier,
        }
    }

    fn category_multiplier(&self, category: SurfaceCategory) -> f64 {
        match category {
            SurfaceCategory::Wall => 1.0,
            SurfaceCategory::Ceiling => self.ceiling_multiplier,
            SurfaceCategory::Door => self.door_multiplier,
            SurfaceCategory::Linear => self.linear_multiplier,
        }
    }

    pub fn derive(
        &self,
        paint_type: &PaintType,
        surface_type: &SurfaceType,
        quality: &PaintQuality,
    ) -> DerivedPricing {
        let mut cost = self.base_cost_per_m2;
        cost *= self.quality_multiplier(quality.level);
        cost *= self.category_multiplier(surface_type.category);
        for adjustment in &self.name_adjustments {
            if paint_type.name.contains(adjustment.marker) {
                cost *= adjustment.multiplier;
            }
        }

        let coverage = match quality.level {
            QualityLevel::Premium => self.premium_coverage,
            _ => self.default_coverage,
        };

        DerivedPricing {
            cost_per_m2: (cost * 1000.0).round() / 1000.0,
            coverage,
        }
    }

    /// Builds one entry per paint type, surface type, and quality, in that nesting order.
    pub fn paint_data_matrix(
        &self,
        paint_types: &[PaintType],
        surface_types: &[SurfaceType],
        qualities: &[PaintQuality],
    ) -> Vec<PaintDataEntry> {
        let mut entries =
            Vec::with_capacity(paint_types.len() * surface_types.len() * qualities.len());

        for paint_type in paint_types {
            for surface_type in surface_types {
                for quality in qualities {
                    let pricing = self.derive(paint_type, surface_type, quality);
                    entries.push(PaintDataEntry {
                        id: PaintDataId(entries.len() as u32 + 1),
                        paint_type_id: paint_type.id,
                        surface_type_id: surface_type.id,
                        paint_quality_id: quality.id,
                        cost_per_m2: pricing.cost_per_m2,
                        coverage: pricing.coverage,
                        notes: format!(
                            "{} {} for {}",
                            quality.name, paint_type.name, surface_type.name
                        ),
                        is_active: true,
                    });
                }
            }
        }

        entries
    }
}

impl ReferenceCatalog {
    /// The standard catalog, with labor rates effective from `effective_date`.
    pub fn seeded(effective_date: NaiveDate) -> Self {
        Self::seeded_with(&PricingRules::default(), effective_date)
    }

    pub fn seeded_with(rules: &PricingRules, effective_date: NaiveDate) -> Self {
        let paint_types = vec![
            paint_type(1, "Interior Latex", "Standard interior latex paint for walls and ceilings"),
            paint_type(
                2,
                "Exterior Acrylic",
                "Weather-resistant acrylic paint for exterior surfaces",
            ),
            paint_type(3, "Enamel", "Durable enamel paint for trim, doors, and high-traffic areas"),
        ];

        let surface_types = vec![
            surface_type(1, "Drywall", SurfaceCategory::Wall, "Standard interior drywall surfaces"),
            surface_type(
                2,
                "Plaster Ceiling",
                SurfaceCategory::Ceiling,
                "Traditional plaster ceiling surfaces",
            ),
            surface_type(3, "Wood Door", SurfaceCategory::Door, "Wooden door surfaces"),
            surface_type(
                4,
                "Timber Skirting",
                SurfaceCategory::Linear,
                "Timber skirting boards and trim",
            ),
        ];

        let paint_qualities = vec![
            quality(
                1,
                "Budget Paint",
                QualityLevel::Basic,
                "Basic quality paint for budget projects",
            ),
            quality(
                2,
                "Standard Paint",
                QualityLevel::Standard,
                "Good quality paint for most residential projects",
            ),
            quality(
                3,
                "Premium Paint",
                QualityLevel::Premium,
                "High-quality paint with excellent coverage and durability",
            ),
        ];

        let surface_conditions = vec![
            SurfaceCondition {
                id: SurfaceConditionId(1),
                name: "Excellent".to_string(),
                description: "Perfect condition, minimal prep required".to_string(),
                prep_time_wall: 2.0,
                prep_time_ceiling: 2.5,
                prep_time_door: 5.0,
                prep_time_linear: 3.0,
                is_active: true,
            },
            SurfaceCondition {
                id: SurfaceConditionId(2),
                name: "Good".to_string(),
                description: "Minor imperfections, light sanding and filling".to_string(),
                prep_time_wall: 4.0,
                prep_time_ceiling: 5.0,
                prep_time_door: 8.0,
                prep_time_linear: 6.0,
                is_active: true,
            },
        ];

        let labor_rates = vec![LaborRate {
            id: LaborRateId(1),
            name: "Sydney Standard Rate".to_string(),
            region: "Sydney".to_string(),
            hourly_rate: 65.0,
            overhead_rate: 15.0,
            profit_margin: 0.25,
            total_rate: 80.0,
            effective_date,
            is_active: true,
        }];

        let paint_data = rules.paint_data_matrix(&paint_types, &surface_types, &paint_qualities);
        debug!(entries = paint_data.len(), "seeded paint data matrix");

        Self {
            paint_types,
            surface_types,
            paint_qualities,
            surface_conditions,
            labor_rates,
            paint_data,
        }
    }
}

fn paint_type(id: u32, name: &str, description: &str) -> PaintType {
    PaintType {
        id: PaintTypeId(id),
        name: name.to_string(),
        description: description.to_string(),
        is_active: true,
    }
}

fn surface_type(id: u32, name: &str, category: SurfaceCategory, description: &str) -> SurfaceType {
    SurfaceType {
        id: SurfaceTypeId(id),
        name: name.to_string(),
        category,
        description: description.to_string(),
        is_active: true,
    }
}

fn quality(id: u32, name: &str, level: QualityLevel, description: &str) -> PaintQuality {
    PaintQuality {
        id: PaintQualityId(id),
        name: name.to_string(),
        level,
        description: description.to_string(),
        is_active: true,
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PaintDataRow<'a> {
    id: u32,
    paint_type: &'a str,
    surface_type: &'a str,
    paint_quality: &'a str,
    cost_per_m2: f64,
    coverage: f64,
    notes: &'a str,
}

/// Writes the catalog's paint-data matrix as CSV, naming each referenced record.
pub fn write_paint_data_csv<W: Write>(
    catalog: &ReferenceCatalog,
    writer: W,
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for entry in &catalog.paint_data {
        let paint_type = catalog
            .paint_types
            .iter()
            .find(|item| item.id == entry.paint_type_id)
            .map_or("", |item| item.name.as_str());
        let surface_type = catalog
            .surface_types
            .iter()
            .find(|item| item.id == entry.surface_type_id)
            .map_or("", |item| item.name.as_str());
        let paint_quality = catalog
            .paint_qualities
            .iter()
            .find(|item| item.id == entry.paint_quality_id)
            .map_or("", |item| item.name.as_str());

        csv_writer.serialize(PaintDataRow {
            id: entry.id.0,
            paint_type,
            surface_type,
            paint_quality,
            cost_per_m2: entry.cost_per_m2,
            coverage: entry.coverage,
            notes: &entry.notes,
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}
