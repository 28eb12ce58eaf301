use serde::{Deserialize, Serialize};

use super::domain::{
    round_display, LaborRate, PaintDataEntry, PaintQualityId, PaintTypeId, SurfaceCategory,
    SurfaceCondition, SurfaceConditionId, SurfaceTypeId,
};

/// Caller-supplied description of one surface to price.
///
/// Everything is optional at the wire level so that missing fields surface as
/// `MissingSurfaceField` rather than a body rejection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coats: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paint_type_id: Option<PaintTypeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface_type_id: Option<SurfaceTypeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paint_quality_id: Option<PaintQualityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface_condition_id: Option<SurfaceConditionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface_category: Option<SurfaceCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

/// Field a surface specification must carry before it can be priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceField {
    Area,
    PaintTypeId,
    SurfaceTypeId,
    PaintQualityId,
}

impl SurfaceField {
    pub fn label(&self) -> &'static str {
        match self {
            SurfaceField::Area => "area",
            SurfaceField::PaintTypeId => "paintTypeId",
            SurfaceField::SurfaceTypeId => "surfaceTypeId",
            SurfaceField::PaintQualityId => "paintQualityId",
        }
    }
}

/// A surface specification whose required fields are present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequiredSurface {
    pub area: f64,
    pub paint_type_id: PaintTypeId,
    pub surface_type_id: SurfaceTypeId,
    pub paint_quality_id: PaintQualityId,
}

impl SurfaceSpec {
    /// Checks the required fields in wire order; a non-positive area counts as missing.
    pub fn required(&self) -> Result<RequiredSurface, SurfaceField> {
        let area = self
            .area
            .filter(|area| area.is_finite() && *area > 0.0)
            .ok_or(SurfaceField::Area)?;
        let paint_type_id = self.paint_type_id.ok_or(SurfaceField::PaintTypeId)?;
        let surface_type_id = self.surface_type_id.ok_or(SurfaceField::SurfaceTypeId)?;
        let paint_quality_id = self.paint_quality_id.ok_or(SurfaceField::PaintQualityId)?;

        Ok(RequiredSurface {
            area,
            paint_type_id,
            surface_type_id,
            paint_quality_id,
        })
    }
}

/// Reference rows and quantities resolved for one surface.
#[derive(Debug, Clone, Copy)]
pub struct PricingInputs<'a> {
    pub area: f64,
    pub coats: u32,
    pub category: SurfaceCategory,
    pub paint_data: &'a PaintDataEntry,
    pub condition: &'a SurfaceCondition,
    pub labor_rate: &'a LaborRate,
}

/// Material and labor pricing for a surface, at full precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub material_cost: f64,
    pub labor_cost: f64,
    pub total_cost: f64,
    pub labor_hours: f64,
    pub cost_per_m2: f64,
    pub litres_required: f64,
}

impl CostBreakdown {
    /// Display form: each figure to two places, with the total rebuilt from the rounded parts.
    pub fn rounded(&self) -> Self {
        let material_cost = round_display(self.material_cost);
        let labor_cost = round_display(self.labor_cost);
        Self {
            material_cost,
            labor_cost,
            total_cost: round_display(material_cost + labor_cost),
            labor_hours: round_display(self.labor_hours),
            cost_per_m2: self.cost_per_m2,
            litres_required: round_display(self.litres_required),
        }
    }
}

/// Raised when a priced figure cannot be represented as a finite amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{figure} is too large to represent")]
pub struct PricingError {
    pub figure: &'static str,
}

/// Prices one surface. Prep time is minutes per square metre, so `prep_time_divisor`
/// converts the product into hours.
pub fn price_surface(
    inputs: &PricingInputs<'_>,
    prep_time_divisor: f64,
) -> Result<CostBreakdown, PricingError> {
    let coats = f64::from(inputs.coats);
    let material_cost = inputs.area * coats * inputs.paint_data.cost_per_m2;

    let prep_time = inputs.condition.prep_time(inputs.category);
    let labor_hours = inputs.area * prep_time / prep_time_divisor;
    let labor_cost = labor_hours * inputs.labor_rate.total_rate;

    let litres_required = if inputs.paint_data.coverage > 0.0 {
        inputs.area * coats / inputs.paint_data.coverage
    } else {
        0.0
    };

    let total_cost = material_cost + labor_cost;
    for (figure, value) in [
        ("materialCost", material_cost),
        ("laborCost", labor_cost),
        ("totalCost", total_cost),
        ("litresRequired", litres_required),
    ] {
        if !value.is_finite() {
            return Err(PricingError { figure });
        }
    }

    Ok(CostBreakdown {
        material_cost,
        labor_cost,
        total_cost,
        labor_hours,
        cost_per_m2: inputs.paint_data.cost_per_m2,
        litres_required,
    })
}
