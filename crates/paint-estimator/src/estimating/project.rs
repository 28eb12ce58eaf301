use serde::Serialize;

use super::cost::{CostBreakdown, SurfaceSpec};
use super::domain::round_display;

/// A caller's surface annotated with its own costs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceEstimate {
    #[serde(flatten)]
    pub surface: SurfaceSpec,
    pub material_cost: f64,
    pub labor_cost: f64,
    pub total_cost: f64,
}

/// Totals across every surface of a project plus the per-surface breakdowns, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEstimate {
    pub total_material_cost: f64,
    pub total_labor_cost: f64,
    pub total_cost: f64,
    pub surfaces: Vec<SurfaceEstimate>,
}

impl ProjectEstimate {
    pub fn from_priced<I>(priced: I) -> Self
    where
        I: IntoIterator<Item = (SurfaceSpec, CostBreakdown)>,
    {
        let mut total_material_cost = 0.0;
        let mut total_labor_cost = 0.0;
        let mut surfaces = Vec::new();

        for (surface, breakdown) in priced {
            total_material_cost += breakdown.material_cost;
            total_labor_cost += breakdown.labor_cost;
            surfaces.push(SurfaceEstimate {
                surface,
                material_cost: breakdown.material_cost,
                labor_cost: breakdown.labor_cost,
                total_cost: breakdown.total_cost,
            });
        }

        Self {
            total_material_cost,
            total_labor_cost,
            total_cost: total_material_cost + total_labor_cost,
            surfaces,
        }
    }

    /// Display form, two places throughout; totals are rebuilt from the rounded parts.
    pub fn rounded(&self) -> Self {
        let total_material_cost = round_display(self.total_material_cost);
        let total_labor_cost = round_display(self.total_labor_cost);

        Self {
            total_material_cost,
            total_labor_cost,
            total_cost: round_display(total_material_cost + total_labor_cost),
            surfaces: self
                .surfaces
                .iter()
                .map(|estimate| {
                    let material_cost = round_display(estimate.material_cost);
                    let labor_cost = round_display(estimate.labor_cost);
                    SurfaceEstimate {
                        surface: estimate.surface.clone(),
                        material_cost,
                        labor_cost,
                        total_cost: round_display(material_cost + labor_cost),
                    }
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breakdown(material_cost: f64, labor_cost: f64) -> CostBreakdown {
        CostBreakdown {
            material_cost,
            labor_cost,
            total_cost: material_cost + labor_cost,
            labor_hours: 0.0,
            cost_per_m2: 0.0,
            litres_required: 0.0,
        }
    }

    fn named(name: &str) -> SurfaceSpec {
        SurfaceSpec {
            name: Some(name.to_string()),
            ..SurfaceSpec::default()
        }
    }

    #[test]
    fn totals_sum_each_surface_in_order() {
        let estimate = ProjectEstimate::from_priced(vec![
            (named("north wall"), breakdown(3.24, 28.8)),
            (named("ceiling"), breakdown(4.5, 12.5)),
            (named("skirting"), breakdown(0.81, 3.6)),
        ]);

        assert!((estimate.total_material_cost - 8.55).abs() < 1e-9);
        assert!((estimate.total_labor_cost - 44.9).abs() < 1e-9);
        assert_eq!(
            estimate.total_cost,
            estimate.total_material_cost + estimate.total_labor_cost
        );
        let names: Vec<_> = estimate
            .surfaces
            .iter()
            .map(|surface| surface.surface.name.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(names, vec!["north wall", "ceiling", "skirting"]);
    }

    #[test]
    fn serialized_surfaces_keep_caller_fields() {
        let estimate = ProjectEstimate::from_priced(vec![(
            SurfaceSpec {
                area: Some(10.8),
                region: Some("Sydney".to_string()),
                ..SurfaceSpec::default()
            },
            breakdown(3.24, 28.8),
        )])
        .rounded();

        let value = serde_json::to_value(&estimate).expect("serializes");
        assert_eq!(value["totalCost"], serde_json::json!(32.04));
        assert_eq!(value["surfaces"][0]["area"], serde_json::json!(10.8));
        assert_eq!(value["surfaces"][0]["region"], serde_json::json!("Sydney"));
        assert_eq!(value["surfaces"][0]["laborCost"], serde_json::json!(28.8));
        assert!(value["surfaces"][0].get("paintTypeId").is_none());
    }
}
