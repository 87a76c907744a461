use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use hotel_resolver::infra::InMemoryDocumentStore;
use hotel_resolver::{logging, observability, HotelResolver, ResolverConfig};

#[derive(Parser)]
#[command(name = "hotel-resolver")]
#[command(about = "Resolve hotel ids across demo, external and stored sources")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to a resolver TOML config (defaults to $HOTEL_RESOLVER_CONFIG or resolver.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which source owns an id
    Classify {
        id: String,
    },
    /// Resolve an id and print the result as JSON
    Resolve {
        id: String,
        /// JSON fixture to seed the in-memory document store
        #[arg(long)]
        store: Option<PathBuf>,
        /// Print Prometheus metrics after resolving
        #[arg(long)]
        metrics: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => ResolverConfig::from_file(path)?,
        None => ResolverConfig::load()?,
    };

    match cli.command {
        Commands::Classify { id } => {
            let category = config.classifier.classify(&id);
            println!("{}", serde_json::to_string(&category)?);
        }
        Commands::Resolve { id, store, metrics } => {
            if metrics {
                if let Err(e) = observability::init() {
                    warn!("Metrics unavailable: {}", e);
                }
            }

            let store = match store {
                Some(path) => {
                    info!(path = %path.display(), "Seeding store from fixture");
                    InMemoryDocumentStore::from_json_file(&path)?
                }
                None => InMemoryDocumentStore::new(),
            };
            let resolver = HotelResolver::new(Arc::new(store), config);
            let result = resolver.resolve(&id).await;

            if result.is_not_found() {
                warn!(id = %id, "Hotel not found");
            }
            println!("{}", serde_json::to_string_pretty(&result)?);

            if let Some(rendered) = observability::render() {
                println!("{}", rendered);
            }
        }
    }
    Ok(())
}
