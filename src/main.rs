use anyhow::Context;
use clap::{Parser, Subcommand};
use mind_catalog::config::Config;
use mind_catalog::gateway::store_from_config;
use mind_catalog::storage::{CatalogStore, InMemoryCatalogStore};
use mind_catalog::{logging, metrics, FetchOrchestrator, FetchState};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::error;

#[derive(Parser)]
#[command(name = "mind_catalog")]
#[command(about = "Browse the mental model catalog grouped into categories")]
#[command(version = "0.1.0")]
struct Cli {
    /// Config file (defaults to ./mind_catalog.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Read catalog rows from a JSON file instead of the remote store
    #[arg(long, global = true)]
    fixture: Option<PathBuf>,

    /// Expose Prometheus metrics while running
    #[arg(long, global = true)]
    metrics: bool,

    /// Directory for rolling JSON logs
    #[arg(long, global = true, default_value = "logs")]
    log_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a summary of every category and its models
    Categories,
    /// Print the full catalog view as JSON
    Json,
    /// Show a single model by slug
    Model {
        slug: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    let _log_guard = logging::init_logging(&cli.log_dir);

    if cli.metrics {
        metrics::init_metrics();
    }

    let config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    let table = config
        .classification_table()
        .context("building classification table")?;

    let store: Arc<dyn CatalogStore> = match &cli.fixture {
        Some(path) => Arc::new(
            InMemoryCatalogStore::from_json_file(path)
                .with_context(|| format!("loading fixture {}", path.display()))?,
        ),
        None => store_from_config(&config.store)?,
    };

    let orchestrator = FetchOrchestrator::new(store, table);
    if let FetchState::Error(e) = orchestrator.mount().await {
        error!("Catalog fetch failed: {}", e);
        eprintln!("❌ Failed to load mental models: {}", e);
        std::process::exit(1);
    }

    match cli.command {
        Commands::Categories => {
            let view = orchestrator.view();
            if view.categories.is_empty() {
                println!("No mental models available.");
                return Ok(());
            }
            println!(
                "📚 {} mental models in {} categories\n",
                view.total_models,
                view.categories.len()
            );
            for category in view.categories.iter() {
                println!(
                    "{} {} ({}) - {} models",
                    category.icon,
                    category.name,
                    category.discipline,
                    category.models.len()
                );
                for model in &category.models {
                    println!(
                        "   - {} [complexity {}, applicability {}]",
                        model.name, model.complexity, model.applicability
                    );
                }
            }
        }
        Commands::Json => {
            println!("{}", serde_json::to_string_pretty(&orchestrator.view())?);
        }
        Commands::Model { slug } => match orchestrator.find_model(&slug) {
            Some(model) => {
                println!("{} ({})", model.name, model.slug);
                println!("   Discipline: {}", model.discipline);
                println!("   Origin: {}", model.origin);
                println!("   Complexity: {}/10", model.complexity);
                println!("   Applicability: {}/10", model.applicability);
                if !model.description.is_empty() {
                    println!("   {}", model.description);
                }
                if !model.use_case.is_empty() {
                    println!("   When to apply: {}", model.use_case);
                }
                if !model.example.is_empty() {
                    println!("   Example: {}", model.example);
                }
                if !model.driver_affinities.is_empty() {
                    println!("   Drivers: {}", model.driver_affinities.join(", "));
                }
            }
            None => {
                eprintln!("⚠️  No mental model with slug '{}'", slug);
                std::process::exit(2);
            }
        },
    }

    Ok(())
}
