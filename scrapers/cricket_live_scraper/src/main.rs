use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cricket_live_scraper::{
    config::ScraperConfig,
    http::HttpClient,
    pipeline::{run_commentary_pass, run_matches_pass},
};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory the JSON files are read from and written to
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape the live match listing and every scorecard
    Matches,
    /// Scrape ball-by-ball commentary for the matches in matches.json
    Commentary,
    /// Run both passes, listing first
    All,
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let mut config = ScraperConfig::from_env();
    if let Some(dir) = cli.data_dir {
        config.output.data_dir = dir;
    }

    let client = HttpClient::new(&config)?;

    match cli.command.unwrap_or(Commands::All) {
        Commands::Matches => {
            run_matches_pass(&client, &config)?;
        }
        Commands::Commentary => {
            run_commentary_pass(&client, &config)?;
        }
        Commands::All => {
            let matches = run_matches_pass(&client, &config)?;
            if matches.is_empty() {
                return Ok(());
            }
            run_commentary_pass(&client, &config)?;
        }
    }

    info!("Cricket data scraping completed");
    Ok(())
}
