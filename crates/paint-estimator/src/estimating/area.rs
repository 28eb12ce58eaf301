use serde::{Deserialize, Serialize};

use super::domain::{round_display, SurfaceCategory};
use crate::config::EstimatorConfig;

/// Raw measurements in metres; which fields are required depends on the category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub door_count: u32,
    #[serde(default)]
    pub window_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Height,
    Length,
    Width,
}

impl Dimension {
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Height => "height",
            Dimension::Length => "length",
            Dimension::Width => "width",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Dimension::Height => "Height",
            Dimension::Length => "Length",
            Dimension::Width => "Width",
        }
    }
}

impl Dimensions {
    fn value(&self, dimension: Dimension) -> Option<f64> {
        match dimension {
            Dimension::Height => self.height,
            Dimension::Length => self.length,
            Dimension::Width => self.width,
        }
    }

    /// Messages for every supplied dimension that is not a positive finite number.
    pub fn validation_errors(&self) -> Vec<String> {
        [Dimension::Length, Dimension::Width, Dimension::Height]
            .into_iter()
            .filter_map(|dimension| {
                let value = self.value(dimension)?;
                if value.is_finite() && value > 0.0 {
                    None
                } else {
                    Some(format!("{} must be positive", dimension.title()))
                }
            })
            .collect()
    }
}

/// Square-metre totals for a measured surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaBreakdown {
    pub gross_area: f64,
    pub net_area: f64,
    pub deductions: f64,
}

impl AreaBreakdown {
    pub fn rounded(&self) -> Self {
        Self {
            gross_area: round_display(self.gross_area),
            net_area: round_display(self.net_area),
            deductions: round_display(self.deductions),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AreaError {
    #[error("missing required dimension '{}' for {category} surfaces", .dimension.label())]
    MissingDimension {
        category: SurfaceCategory,
        dimension: Dimension,
    },
    #[error("dimension '{}' must be a positive number (got {value})", .dimension.label())]
    InvalidDimension { dimension: Dimension, value: f64 },
    #[error("{category} area is too large to represent")]
    AreaOverflow { category: SurfaceCategory },
}

/// Applies the per-category area formulas and the wall opening allowances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaCalculator {
    door_allowance_m2: f64,
    window_allowance_m2: f64,
}

impl Default for AreaCalculator {
    fn default() -> Self {
        Self::from_config(&EstimatorConfig::default())
    }
}

impl AreaCalculator {
    pub fn new(door_allowance_m2: f64, window_allowance_m2: f64) -> Self {
        Self {
            door_allowance_m2,
            window_allowance_m2,
        }
    }

    pub fn from_config(config: &EstimatorConfig) -> Self {
        Self::new(config.door_allowance_m2, config.window_allowance_m2)
    }

    pub fn calculate(
        &self,
        category: SurfaceCategory,
        dimensions: &Dimensions,
    ) -> Result<AreaBreakdown, AreaError> {
        let required = |dimension| require(category, dimensions, dimension);

        let gross_area = match category {
            SurfaceCategory::Wall => required(Dimension::Length)? * required(Dimension::Height)?,
            SurfaceCategory::Ceiling => required(Dimension::Length)? * required(Dimension::Width)?,
            SurfaceCategory::Door => required(Dimension::Height)? * required(Dimension::Width)?,
            // height carries the board width for skirting and trim
            SurfaceCategory::Linear => required(Dimension::Length)? * required(Dimension::Height)?,
        };

        let deductions = match category {
            SurfaceCategory::Wall => {
                f64::from(dimensions.door_count) * self.door_allowance_m2
                    + f64::from(dimensions.window_count) * self.window_allowance_m2
            }
            _ => 0.0,
        };

        if !gross_area.is_finite() {
            return Err(AreaError::AreaOverflow { category });
        }

        Ok(AreaBreakdown {
            gross_area,
            net_area: (gross_area - deductions).max(0.0),
            deductions,
        })
    }
}

fn require(
    category: SurfaceCategory,
    dimensions: &Dimensions,
    dimension: Dimension,
) -> Result<f64, AreaError> {
    match dimensions.value(dimension) {
        None => Err(AreaError::MissingDimension {
            category,
            dimension,
        }),
        Some(value) if value == 0.0 => Err(AreaError::MissingDimension {
            category,
            dimension,
        }),
        Some(value) if !value.is_finite() || value < 0.0 => {
            Err(AreaError::InvalidDimension { dimension, value })
        }
        Some(value) => Ok(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(left: f64, right: f64) -> bool {
        (left - right).abs() < 1e-9
    }

    fn wall(length: f64, height: f64, doors: u32, windows: u32) -> Dimensions {
        Dimensions {
            length: Some(length),
            height: Some(height),
            door_count: doors,
            window_count: windows,
            ..Dimensions::default()
        }
    }

    #[test]
    fn wall_deducts_doors_and_windows() {
        let area = AreaCalculator::default()
            .calculate(SurfaceCategory::Wall, &wall(4.0, 2.7, 1, 2))
            .expect("wall area");

        assert!(approx(area.gross_area, 10.8));
        assert!(approx(area.deductions, 4.0));
        assert!(approx(area.net_area, 6.8));
    }

    #[test]
    fn wall_net_area_is_clamped_at_zero() {
        let area = AreaCalculator::default()
            .calculate(SurfaceCategory::Wall, &wall(1.0, 2.0, 2, 3))
            .expect("wall area");

        assert!(approx(area.gross_area, 2.0));
        assert!(area.deductions > area.gross_area);
        assert_eq!(area.net_area, 0.0);
    }

    #[test]
    fn openings_do_not_affect_other_categories() {
        let dimensions = Dimensions {
            length: Some(5.0),
            width: Some(3.0),
            door_count: 2,
            window_count: 2,
            ..Dimensions::default()
        };

        let area = AreaCalculator::default()
            .calculate(SurfaceCategory::Ceiling, &dimensions)
            .expect("ceiling area");

        assert!(approx(area.gross_area, 15.0));
        assert_eq!(area.deductions, 0.0);
        assert!(approx(area.net_area, 15.0));
    }

    #[test]
    fn door_and_linear_use_their_own_formulas() {
        let calculator = AreaCalculator::default();
        let door = Dimensions {
            height: Some(2.04),
            width: Some(0.82),
            ..Dimensions::default()
        };
        let skirting = Dimensions {
            length: Some(12.0),
            height: Some(0.1),
            ..Dimensions::default()
        };

        let door_area = calculator
            .calculate(SurfaceCategory::Door, &door)
            .expect("door area");
        let skirting_area = calculator
            .calculate(SurfaceCategory::Linear, &skirting)
            .expect("linear area");

        assert!(approx(door_area.gross_area, 2.04 * 0.82));
        assert!(approx(skirting_area.net_area, 1.2));
    }

    #[test]
    fn missing_dimension_names_the_field() {
        let dimensions = Dimensions {
            length: Some(4.0),
            ..Dimensions::default()
        };

        let err = AreaCalculator::default()
            .calculate(SurfaceCategory::Ceiling, &dimensions)
            .expect_err("width is required");

        assert_eq!(
            err,
            AreaError::MissingDimension {
                category: SurfaceCategory::Ceiling,
                dimension: Dimension::Width,
            }
        );
        assert!(err.to_string().contains("width"));
    }

    #[test]
    fn zero_counts_as_missing_and_negative_as_invalid() {
        let calculator = AreaCalculator::default();

        let zero = calculator.calculate(SurfaceCategory::Wall, &wall(0.0, 2.4, 0, 0));
        assert!(matches!(
            zero,
            Err(AreaError::MissingDimension {
                dimension: Dimension::Length,
                ..
            })
        ));

        let negative = calculator.calculate(SurfaceCategory::Wall, &wall(3.0, -2.4, 0, 0));
        assert!(matches!(
            negative,
            Err(AreaError::InvalidDimension {
                dimension: Dimension::Height,
                ..
            })
        ));
    }

    #[test]
    fn overflowing_products_are_rejected() {
        let dimensions = Dimensions {
            length: Some(1e200),
            width: Some(1e200),
            ..Dimensions::default()
        };

        let err = AreaCalculator::default()
            .calculate(SurfaceCategory::Ceiling, &dimensions)
            .expect_err("product overflows f64");

        assert_eq!(
            err,
            AreaError::AreaOverflow {
                category: SurfaceCategory::Ceiling
            }
        );
        assert_eq!(err.to_string(), "ceiling area is too large to represent");
    }

    #[test]
    fn custom_allowances_are_applied() {
        let area = AreaCalculator::new(2.0, 1.5)
            .calculate(SurfaceCategory::Wall, &wall(5.0, 2.4, 1, 1))
            .expect("wall area");

        assert!(approx(area.deductions, 3.5));
        assert!(approx(area.net_area, 12.0 - 3.5));
    }

    #[test]
    fn validation_reports_each_non_positive_dimension() {
        let dimensions = Dimensions {
            length: Some(-1.0),
            width: Some(0.0),
            height: Some(2.4),
            ..Dimensions::default()
        };

        assert_eq!(
            dimensions.validation_errors(),
            vec![
                "Length must be positive".to_string(),
                "Width must be positive".to_string()
            ]
        );
        assert!(wall(3.0, 2.4, 0, 0).validation_errors().is_empty());
    }
}
