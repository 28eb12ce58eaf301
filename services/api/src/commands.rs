use crate::infra::{load_catalog, parse_surface_category};
use chrono::Local;
use clap::Args;
use paint_estimator::config::EstimatorConfig;
use paint_estimator::error::AppError;
use paint_estimator::estimating::{
    write_paint_data_csv, AreaBreakdown, AreaCalculator, Dimensions, ReferenceCatalog,
    SurfaceCategory,
};
use std::fs::File;
use std::io;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct ExportPaintDataArgs {
    /// Destination file; the matrix is written to stdout when omitted
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct EstimateAreaArgs {
    /// Surface category: wall, ceiling, door, or linear
    #[arg(long, value_parser = parse_surface_category)]
    pub(crate) surface: SurfaceCategory,
    /// Length in metres (walls, ceilings, linear runs)
    #[arg(long)]
    pub(crate) length: Option<f64>,
    /// Height in metres (walls, doors); board width for linear runs
    #[arg(long)]
    pub(crate) height: Option<f64>,
    /// Width in metres (ceilings, doors)
    #[arg(long)]
    pub(crate) width: Option<f64>,
    /// Doors to deduct from a wall
    #[arg(long, default_value_t = 0)]
    pub(crate) doors: u32,
    /// Windows to deduct from a wall
    #[arg(long, default_value_t = 0)]
    pub(crate) windows: u32,
}

pub(crate) fn run_catalog_summary() -> Result<(), AppError> {
    let config = EstimatorConfig::load()?;
    let catalog = load_catalog(&config, Local::now().date_naive())?;
    print!("{}", render_catalog_summary(&catalog));
    Ok(())
}

pub(crate) fn run_export_paint_data(args: ExportPaintDataArgs) -> Result<(), AppError> {
    let catalog = ReferenceCatalog::seeded(Local::now().date_naive());

    match args.output {
        Some(path) => {
            let file = File::create(&path)?;
            write_paint_data_csv(&catalog, file)?;
            eprintln!(
                "wrote {} paint data entries to {}",
                catalog.paint_data.len(),
                path.display()
            );
        }
        None => write_paint_data_csv(&catalog, io::stdout().lock())?,
    }

    Ok(())
}

pub(crate) fn run_estimate_area(args: EstimateAreaArgs) -> Result<(), AppError> {
    let config = EstimatorConfig::load()?;
    print!("{}", estimate_area(&config, &args)?);
    Ok(())
}

fn estimate_area(config: &EstimatorConfig, args: &EstimateAreaArgs) -> Result<String, AppError> {
    let dimensions = Dimensions {
        height: args.height,
        length: args.length,
        width: args.width,
        door_count: args.doors,
        window_count: args.windows,
    };

    let area = AreaCalculator::from_config(config).calculate(args.surface, &dimensions)?;
    Ok(render_area(args.surface, &area))
}

fn render_catalog_summary(catalog: &ReferenceCatalog) -> String {
    let snapshot = catalog.snapshot();
    let mut out = String::new();

    out.push_str(&format!("Paint types ({})\n", snapshot.paint_types.len()));
    for paint in &snapshot.paint_types {
        out.push_str(&format!("  [{}] {}\n", paint.id, paint.name));
    }

    out.push_str(&format!("Surface types ({})\n", snapshot.surface_types.len()));
    for surface in &snapshot.surface_types {
        out.push_str(&format!(
            "  [{}] {} ({})\n",
            surface.id, surface.name, surface.category
        ));
    }

    out.push_str(&format!("Paint qualities ({})\n", snapshot.paint_qualities.len()));
    for quality in &snapshot.paint_qualities {
        out.push_str(&format!(
            "  [{}] {} ({})\n",
            quality.id,
            quality.name,
            quality.level.label()
        ));
    }

    out.push_str(&format!(
        "Surface conditions ({})\n",
        snapshot.surface_conditions.len()
    ));
    for condition in &snapshot.surface_conditions {
        out.push_str(&format!(
            "  [{}] {} | prep min/m2: wall {:.1}, ceiling {:.1}, door {:.1}, linear {:.1}\n",
            condition.id,
            condition.name,
            condition.prep_time_wall,
            condition.prep_time_ceiling,
            condition.prep_time_door,
            condition.prep_time_linear
        ));
    }

    out.push_str(&format!("Labor rates ({})\n", snapshot.labor_rates.len()));
    for rate in &snapshot.labor_rates {
        out.push_str(&format!(
            "  [{}] {} | {} | ${:.2}/h from {}\n",
            rate.id, rate.name, rate.region, rate.total_rate, rate.effective_date
        ));
    }

    out.push_str(&format!(
        "Paint data combinations: {}\n",
        catalog.paint_data.len()
    ));
    out
}

fn render_area(category: SurfaceCategory, area: &AreaBreakdown) -> String {
    let area = area.rounded();
    format!(
        "{category} area\n- gross: {:.2} m2\n- deductions: {:.2} m2\n- net: {:.2} m2\n",
        area.gross_area, area.deductions, area.net_area
    )
}
