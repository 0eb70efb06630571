use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use turfbook::{CatalogSource, NearbyQuery, Position, Sport, TurfbookConfig, logging, web};

/// Find nearby turfs and relay match registrations for Play Before Retire
#[derive(Debug, Parser)]
#[command(name = "turfbook", version, about)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true, env = "TURFBOOK_CONFIG")]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the web server
    Serve {
        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
    /// List turfs offering a sport, nearest first
    Nearby {
        #[arg(long)]
        sport: String,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// Catalog file or URL, defaults to the configured source
        #[arg(long)]
        catalog: Option<String>,
    },
    /// List sports and whether registration is open
    Sports,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = TurfbookConfig::load_from_path(cli.config.clone())
        .context("Failed to load configuration")?;
    logging::init(&config.logging, cli.verbose)?;

    match cli.command {
        Command::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            web::run(&config).await
        }
        Command::Nearby {
            sport,
            lat,
            lon,
            catalog,
        } => {
            if let Some(catalog) = catalog {
                config.catalog.source = catalog;
            }
            nearby(&config, &sport, lat, lon).await
        }
        Command::Sports => {
            for sport in Sport::ALL {
                println!("{:<14} {}", sport.name(), sport.status());
            }
            Ok(())
        }
    }
}

async fn nearby(config: &TurfbookConfig, sport: &str, lat: f64, lon: f64) -> Result<()> {
    let sport = sport.trim();
    if sport.is_empty() {
        anyhow::bail!("Please select sport first");
    }
    let position = Position::try_new(lat, lon)?;

    let source = CatalogSource::from_config(&config.catalog)?;
    let catalog_text = source
        .load_text()
        .await
        .with_context(|| format!("Failed to load catalog from {}", source.describe()))?;

    let turfs = NearbyQuery::new(sport, position).rank(&catalog_text);
    if turfs.is_empty() {
        println!("No nearby turfs found.");
        return Ok(());
    }

    println!("Turf names are sorted from low distance to high distance.");
    for turf in &turfs {
        println!("{} ({})", turf.name, turf.distance_label());
    }
    Ok(())
}
