use crate::commands::{run_catalog_summary, run_estimate_area, run_export_paint_data};
use crate::commands::{EstimateAreaArgs, ExportPaintDataArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use paint_estimator::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Paint Estimator",
    about = "Serve and explore painting cost estimates from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Inspect or export the seeded reference data
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },
    /// Run a one-off calculation without starting the server
    Estimate {
        #[command(subcommand)]
        command: EstimateCommand,
    },
}

#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// Print the paint types, surfaces, qualities, conditions, and labor rates
    Summary,
    /// Write the paint-data pricing matrix as CSV
    ExportPaintData(ExportPaintDataArgs),
}

#[derive(Subcommand, Debug)]
enum EstimateCommand {
    /// Calculate gross and net area for a surface
    Area(EstimateAreaArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Catalog {
            command: CatalogCommand::Summary,
        } => run_catalog_summary(),
        Command::Catalog {
            command: CatalogCommand::ExportPaintData(args),
        } => run_export_paint_data(args),
        Command::Estimate {
            command: EstimateCommand::Area(args),
        } => run_estimate_area(args),
    }
}
