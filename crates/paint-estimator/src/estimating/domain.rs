use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

macro_rules! reference_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

reference_id!(
    /// Identifier of a paint type record.
    PaintTypeId
);
reference_id!(
    /// Identifier of a surface type record.
    SurfaceTypeId
);
reference_id!(
    /// Identifier of a paint quality record.
    PaintQualityId
);
reference_id!(
    /// Identifier of a surface condition record.
    SurfaceConditionId
);
reference_id!(LaborRateId);
reference_id!(PaintDataId);

/// Surface families; the category selects the area formula and the prep-time column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceCategory {
    Wall,
    Ceiling,
    Door,
    /// Skirting boards and trim measured by run length.
    Linear,
}

impl SurfaceCategory {
    pub const ALL: [SurfaceCategory; 4] = [
        SurfaceCategory::Wall,
        SurfaceCategory::Ceiling,
        SurfaceCategory::Door,
        SurfaceCategory::Linear,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SurfaceCategory::Wall => "wall",
            SurfaceCategory::Ceiling => "ceiling",
            SurfaceCategory::Door => "door",
            SurfaceCategory::Linear => "linear",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(value.trim()))
    }
}

impl fmt::Display for SurfaceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityLevel {
    Basic,
    Standard,
    Premium,
}

impl QualityLevel {
    pub fn label(&self) -> &'static str {
        match self {
            QualityLevel::Basic => "basic",
            QualityLevel::Standard => "standard",
            QualityLevel::Premium => "premium",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaintType {
    pub id: PaintTypeId,
    pub name: String,
    pub description: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceType {
    pub id: SurfaceTypeId,
    pub name: String,
    pub category: SurfaceCategory,
    pub description: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaintQuality {
    pub id: PaintQualityId,
    pub name: String,
    pub level: QualityLevel,
    pub description: String,
    pub is_active: bool,
}

/// Preparation effort per surface category, in minutes per square metre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceCondition {
    pub id: SurfaceConditionId,
    pub name: String,
    pub description: String,
    pub prep_time_wall: f64,
    pub prep_time_ceiling: f64,
    pub prep_time_door: f64,
    pub prep_time_linear: f64,
    pub is_active: bool,
}

impl SurfaceCondition {
    pub fn prep_time(&self, category: SurfaceCategory) -> f64 {
        match category {
            SurfaceCategory::Wall => self.prep_time_wall,
            SurfaceCategory::Ceiling => self.prep_time_ceiling,
            SurfaceCategory::Door => self.prep_time_door,
            SurfaceCategory::Linear => self.prep_time_linear,
        }
    }
}

/// Regional labor pricing. `total_rate` is the billed hourly figure used for labor cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaborRate {
    pub id: LaborRateId,
    pub name: String,
    pub region: String,
    pub hourly_rate: f64,
    pub overhead_rate: f64,
    pub profit_margin: f64,
    pub total_rate: f64,
    pub effective_date: NaiveDate,
    pub is_active: bool,
}

/// Precomputed pricing for one paint type, surface type, and quality combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaintDataEntry {
    pub id: PaintDataId,
    pub paint_type_id: PaintTypeId,
    pub surface_type_id: SurfaceTypeId,
    pub paint_quality_id: PaintQualityId,
    pub cost_per_m2: f64,
    /// Square metres covered per litre.
    pub coverage: f64,
    pub notes: String,
    pub is_active: bool,
}

/// Active reference data as exposed to estimator clients.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceSnapshot {
    pub paint_types: Vec<PaintType>,
    pub surface_types: Vec<SurfaceType>,
    pub paint_qualities: Vec<PaintQuality>,
    pub surface_conditions: Vec<SurfaceCondition>,
    pub labor_rates: Vec<LaborRate>,
}

/// Optional filters for paint-data queries; absent fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaintDataFilter {
    pub paint_type_id: Option<PaintTypeId>,
    pub surface_type_id: Option<SurfaceTypeId>,
    pub paint_quality_id: Option<PaintQualityId>,
}

impl PaintDataFilter {
    pub fn matches(&self, entry: &PaintDataEntry) -> bool {
        self.paint_type_id.map_or(true, |id| id == entry.paint_type_id)
            && self
                .surface_type_id
                .map_or(true, |id| id == entry.surface_type_id)
            && self
                .paint_quality_id
                .map_or(true, |id| id == entry.paint_quality_id)
    }
}

/// Rounds a value to two decimal places for display.
pub fn round_display(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
