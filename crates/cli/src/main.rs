use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use wayfarer_catalog::load_bundle;
use wayfarer_core::TripPlanRequest;
use wayfarer_ml::MlStack;
use wayfarer_observability::{init_tracing, AppMetrics};
use wayfarer_storage::Store;
use wayfarer_trips::TripService;

#[derive(Debug, Parser)]
#[command(name = "wayfarer")]
#[command(about = "Wayfarer itinerary planner CLI")]
struct Cli {
    #[arg(long, default_value = "assets")]
    assets_root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan a multi-day itinerary and print it as JSON.
    Plan {
        #[arg(long)]
        location: String,
        #[arg(long, default_value_t = 2)]
        days: i32,
        #[arg(long, default_value = "moderate")]
        budget: String,
    },
    Trips {
        #[command(subcommand)]
        command: TripsCommand,
    },
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },
}

#[derive(Debug, Subcommand)]
enum TripsCommand {
    List,
    Show { trip_id: String },
    Delete { trip_id: String },
}

#[derive(Debug, Subcommand)]
enum CatalogCommand {
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("wayfarer_cli");
    let cli = Cli::parse();

    let service = build_service(&cli.assets_root).await?;

    match cli.command {
        Command::Plan {
            location,
            days,
            budget,
        } => {
            let saved = service
                .plan_trip(TripPlanRequest {
                    location,
                    days: days.min(365),
                    budget,
                })
                .await?;

            println!("{}", serde_json::to_string_pretty(&saved)?);
        }
        Command::Trips { command } => match command {
            TripsCommand::List => {
                let trips = service.list_trips().await?;
                println!("{}", serde_json::to_string_pretty(&trips)?);
            }
            TripsCommand::Show { trip_id } => {
                let record = service
                    .load_trip(&trip_id)
                    .await?
                    .with_context(|| format!("no trip with id {trip_id}"))?;
                println!("{}", serde_json::to_string_pretty(&record.itinerary()?)?);
            }
            TripsCommand::Delete { trip_id } => {
                let deleted = service.delete_trip(&trip_id).await?;
                println!("{}", serde_json::json!({ "deleted": deleted }));
            }
        },
        Command::Catalog { command } => match command {
            CatalogCommand::Stats => {
                println!("{}", serde_json::to_string_pretty(&service.catalog_stats())?);
            }
        },
    }

    Ok(())
}

async fn build_service(assets_root: &PathBuf) -> Result<TripService<Store>> {
    let metrics = AppMetrics::shared();
    let ml_stack = MlStack::load_default();
    let bundle = load_bundle(assets_root);

    let store = if let Ok(database_url) = env::var("WAYFARER_DATABASE_URL") {
        Store::sqlite(&database_url).await?
    } else {
        Store::memory()
    };

    Ok(TripService::new(
        bundle,
        ml_stack,
        Arc::new(store),
        metrics,
    ))
}
