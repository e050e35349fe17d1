//! Component Sync
//!
//! Lists, creates, updates and deletes the learning components of a learning
//! space through the campus API.

use clap::{Parser, Subcommand};
use core_config::api_client::ApiClientConfig;
use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::{Environment, FromEnv};
use domain_learning_components::{
    ComponentFilter, ComponentKind, HttpLearningComponentRepository, MapperRegistry,
};
use eyre::{Result, eyre};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

mod sync;

use sync::{ComponentSync, read_payloads};

#[derive(Parser)]
#[command(name = "component-sync")]
#[command(about = "Manage the learning components of a learning space")]
struct Cli {
    /// Campus API base URL (overrides CAMPUS_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the components of a learning space
    List {
        #[arg(short, long)]
        space: i64,

        /// Only list components of this kind (projector, whiteboard)
        #[arg(short, long)]
        kind: Option<ComponentKind>,

        /// Include soft-deleted components
        #[arg(long)]
        include_deleted: bool,
    },

    /// Show one component
    Get {
        #[arg(short, long)]
        space: i64,

        #[arg(short, long)]
        id: i64,
    },

    /// Create the components described in a JSON file
    Create {
        #[arg(short, long)]
        space: i64,

        /// File holding one tagged component or a list of them
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Replace a component with the one described in a JSON file
    Update {
        #[arg(short, long)]
        space: i64,

        #[arg(short, long)]
        id: i64,

        #[arg(short, long)]
        file: PathBuf,
    },

    /// Soft-delete a component
    Delete {
        #[arg(short, long)]
        space: i64,

        #[arg(short, long)]
        id: i64,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();

    let environment = Environment::from_env();
    init_tracing(&environment);

    let cli = Cli::parse();

    let mut config = ApiClientConfig::from_env()?;
    if let Some(url) = cli.api_url {
        config = ApiClientConfig::new(url, config.timeout);
    }
    info!(base_url = %config.base_url, "Using campus API");

    let repository = HttpLearningComponentRepository::new(&config)?;
    let sync = ComponentSync::new(repository, MapperRegistry::global());

    match cli.command {
        Commands::List {
            space,
            kind,
            include_deleted,
        } => {
            let filter = ComponentFilter {
                kind,
                include_deleted,
            };
            print_json(&sync.list(space, filter).await?)?;
        }

        Commands::Get { space, id } => {
            print_json(&sync.get(space, id).await?)?;
        }

        Commands::Create { space, file } => {
            let payloads = read_payloads(&file)?;
            let result = sync.create_all(space, &payloads).await?;
            print_json(&result.created)?;

            if result.failed > 0 {
                return Err(eyre!(
                    "{} of {} components failed",
                    result.failed,
                    payloads.len()
                ));
            }
        }

        Commands::Update { space, id, file } => {
            let mut payloads = read_payloads(&file)?;
            if payloads.len() != 1 {
                return Err(eyre!(
                    "update expects exactly one component, found {}",
                    payloads.len()
                ));
            }
            let payload = payloads.remove(0);
            print_json(&sync.update(space, id, &payload).await?)?;
        }

        Commands::Delete { space, id } => {
            sync.delete(space, id).await?;
            info!(space, id, "Component deleted");
        }
    }

    Ok(())
}
