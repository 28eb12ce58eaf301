use chrono::NaiveDate;
use paint_estimator::config::EstimatorConfig;
use paint_estimator::estimating::domain::{
    PaintQualityId, PaintTypeId, SurfaceConditionId, SurfaceTypeId,
};
use paint_estimator::estimating::{
    write_paint_data_csv, Dimensions, EstimateError, EstimationService, InMemoryReferenceData,
    ReferenceCatalog, SurfaceCategory, SurfaceSpec,
};
use std::sync::Arc;

fn seed_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 24).expect("valid seed date")
}

fn service_for(catalog: ReferenceCatalog) -> EstimationService<InMemoryReferenceData> {
    EstimationService::new(
        Arc::new(InMemoryReferenceData::new(catalog)),
        EstimatorConfig::default(),
    )
}

fn surface(area: f64, surface_type: u32, quality: u32) -> SurfaceSpec {
    SurfaceSpec {
        area: Some(area),
        coats: Some(2),
        paint_type_id: Some(PaintTypeId(1)),
        surface_type_id: Some(SurfaceTypeId(surface_type)),
        paint_quality_id: Some(PaintQualityId(quality)),
        surface_condition_id: Some(SurfaceConditionId(2)),
        ..SurfaceSpec::default()
    }
}

#[test]
fn measured_room_flows_into_project_estimate() {
    let service = service_for(ReferenceCatalog::seeded(seed_date()));

    let wall = service
        .calculate_area(
            SurfaceCategory::Wall,
            &Dimensions {
                length: Some(4.0),
                height: Some(2.7),
                door_count: 1,
                window_count: 2,
                ..Dimensions::default()
            },
        )
        .expect("wall measured");
    let ceiling = service
        .calculate_area(
            SurfaceCategory::Ceiling,
            &Dimensions {
                length: Some(4.0),
                width: Some(3.5),
                ..Dimensions::default()
            },
        )
        .expect("ceiling measured");

    let estimate = service
        .project_cost(vec![
            surface(wall.net_area, 1, 3),
            surface(ceiling.net_area, 2, 3),
        ])
        .expect("project estimated");

    let material: f64 = estimate.surfaces.iter().map(|s| s.material_cost).sum();
    let labor: f64 = estimate.surfaces.iter().map(|s| s.labor_cost).sum();
    assert!((estimate.total_material_cost - material).abs() < 1e-9);
    assert!((estimate.total_labor_cost - labor).abs() < 1e-9);
    assert_eq!(
        estimate.total_cost,
        estimate.total_material_cost + estimate.total_labor_cost
    );

    // premium drywall is 0.21 per m2, premium plaster ceiling 0.252
    assert!((estimate.surfaces[0].material_cost - 6.8 * 2.0 * 0.21).abs() < 1e-9);
    assert!((estimate.surfaces[1].material_cost - 14.0 * 2.0 * 0.252).abs() < 1e-9);

    let displayed = estimate.rounded();
    assert_eq!(
        displayed.total_cost,
        ((displayed.total_material_cost + displayed.total_labor_cost) * 100.0).round() / 100.0
    );
}

#[test]
fn imported_labor_rates_replace_seeded_rates() {
    let path = std::env::temp_dir().join(format!(
        "paint-estimator-rates-{}.csv",
        std::process::id()
    ));
    std::fs::write(
        &path,
        "name,region,hourlyRate,overheadRate,profitMargin,totalRate,effectiveDate,isActive\n\
         Brisbane Rate,Brisbane,60,12,0.2,72,2025-02-01,true\n",
    )
    .expect("rates written");

    let catalog = ReferenceCatalog::seeded(seed_date())
        .with_labor_rates_from(&path)
        .expect("rates imported");
    std::fs::remove_file(&path).ok();

    let service = service_for(catalog);
    let mut brisbane = surface(10.0, 1, 2);
    brisbane.region = Some("Brisbane".to_string());

    let breakdown = service.surface_cost(&brisbane).expect("priced in Brisbane");
    // good drywall: 4 min per m2
    assert!((breakdown.labor_cost - 10.0 * 4.0 / 60.0 * 72.0).abs() < 1e-9);

    let mut sydney = surface(10.0, 1, 2);
    sydney.region = Some("Sydney".to_string());
    assert!(matches!(
        service.surface_cost(&sydney),
        Err(EstimateError::ReferenceNotFound { .. })
    ));
}

#[test]
fn exported_matrix_matches_seeded_entries() {
    let catalog = ReferenceCatalog::seeded(seed_date());
    let mut buffer = Vec::new();
    write_paint_data_csv(&catalog, &mut buffer).expect("export succeeds");

    let mut reader = csv::Reader::from_reader(buffer.as_slice());
    let rows: Vec<csv::StringRecord> = reader
        .records()
        .collect::<Result<_, _>>()
        .expect("rows parse");

    assert_eq!(rows.len(), catalog.paint_data.len());
    for (row, entry) in rows.iter().zip(&catalog.paint_data) {
        let cost: f64 = row[4].parse().expect("numeric cost");
        assert_eq!(cost, entry.cost_per_m2);
        assert_eq!(&row[6], entry.notes.as_str());
    }
}
