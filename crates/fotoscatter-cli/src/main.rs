use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fotoscatter_core::{storage::Database, AppConfig};

mod commands;

#[derive(Parser)]
#[command(name = "fotoscatter")]
#[command(version, about = "A scattered photo gallery for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the gallery TUI
    Run,
    /// Add a photo to the gallery
    Add {
        /// Photo title
        #[arg(short, long)]
        title: String,
        /// Image URL
        #[arg(short, long)]
        url: String,
        /// Photo description
        #[arg(short, long, default_value = "")]
        description: String,
        /// Display date (free-form; defaults to today)
        #[arg(long)]
        date: Option<String>,
        /// Card tilt in degrees (random when omitted)
        #[arg(long)]
        rotation: Option<f64>,
    },
    /// List all photos
    List,
    /// Remove a photo by id
    Remove {
        /// Photo id (uuid)
        id: String,
    },
    /// Insert sample photos for a demo gallery
    Seed {
        /// Number of photos to insert
        #[arg(short, long, default_value_t = 20)]
        count: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    // Initialize database
    let db = Arc::new(Database::new(&config).await?);

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(db, config).await,
        Some(Commands::Add {
            title,
            url,
            description,
            date,
            rotation,
        }) => commands::add::run(&db, &title, &url, &description, date, rotation).await,
        Some(Commands::List) => commands::list::run(&db).await,
        Some(Commands::Remove { id }) => commands::remove::run(&db, &id).await,
        Some(Commands::Seed { count }) => commands::seed::run(&db, count).await,
    }
}
