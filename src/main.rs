//! nutrifetch - look up food nutrition facts from the command line
//!
//! Thin CLI over the nutrifetch library: parses a subcommand, builds the
//! FatSecret service from environment credentials, and prints the resulting
//! response envelope as pretty JSON.

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use nutrifetch::cache::CacheManager;
use nutrifetch::cli::{Cli, Command};
use nutrifetch::config::FatSecretConfig;
use nutrifetch::ops::NutritionService;

/// Prints any serializable value as pretty JSON on stdout
fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Credentials may live in a .env file during development
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let config = FatSecretConfig::from_env()?;
    let cache_manager = if cli.no_cache {
        None
    } else {
        CacheManager::new()
    };
    let service = NutritionService::with_cache(config, cache_manager);

    match cli.command {
        Command::Nutrition { food } => {
            let response = service.search_nutrition(&food).await?;
            print_json(&response)?;
        }
        Command::Search { food, max } => {
            let results = service.search_foods(&food, Some(max)).await;
            print_json(&results)?;
        }
        Command::Details { food_id } => {
            let response = service.food_details(&food_id).await?;
            print_json(&response)?;
        }
        Command::Suggest { query, max, region } => {
            let response = service
                .suggestions(&query, Some(max), region.as_deref())
                .await?;
            print_json(&response)?;
        }
    }

    Ok(())
}
