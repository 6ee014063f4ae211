//! FX CLI
//!
//! Command-line interface for the FX summary API.

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use fx_client::FxClient;

#[derive(Parser)]
#[command(name = "fx")]
#[command(author, version, about = "FX summary API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the FX summary API
    #[arg(long, env = "FX_API_URL", default_value = "http://localhost:8000")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// EUR/USD summary over a date range
    Summary {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,
        /// End date (YYYY-MM-DD), inclusive
        #[arg(long)]
        end: NaiveDate,
    },
    /// Daily EUR/USD rates with percent changes
    Daily {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,
        /// End date (YYYY-MM-DD), inclusive
        #[arg(long)]
        end: NaiveDate,
    },
    /// Check API health
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = FxClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Summary { start, end } => {
            let summary = client.summary(start, end).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }

        Commands::Daily { start, end } => {
            let days = client.daily(start, end).await?;
            println!("{}", serde_json::to_string_pretty(&days)?);
        }
    }

    Ok(())
}
