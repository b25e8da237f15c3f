//! mal-crawler main entry point
//!
//! Command-line interface for the catalog crawler: ID-space scanning plus
//! per-entity extraction commands, all emitting JSON on stdout.

use anyhow::Context;
use clap::{Parser, Subcommand};
use mal_crawler::checkpoint::{JsonFileCheckpoint, SqliteCheckpoint};
use mal_crawler::config::{load_config_with_hash, CheckpointBackend, Config};
use mal_crawler::crawler::build_http_client;
use mal_crawler::records::{
    crawl_anime, crawl_characters, crawl_episodes, crawl_genre_catalog, crawl_genre_description,
    crawl_seasons, GenreGroup,
};
use mal_crawler::Scanner;
use reqwest::Client;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// mal-crawler: discover and extract catalog entries
#[derive(Parser, Debug)]
#[command(name = "mal-crawler")]
#[command(version = "1.0.0")]
#[command(about = "ID-space scanner and page extractor for an anime catalog site", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan the candidate ID range and print every confirmed-valid ID
    Scan {
        /// First candidate ID (default 1)
        #[arg(long)]
        low: Option<u32>,

        /// Last candidate ID (default: the configured last-id)
        #[arg(long)]
        high: Option<u32>,
    },

    /// Extract the detail record for one anime ID
    Anime { id: u32 },

    /// Extract the episode list for one anime ID
    Episodes { id: u32 },

    /// Extract the character and staff roster for one anime ID
    Characters { id: u32 },

    /// Extract the genre catalog
    Genres,

    /// Extract the explicit-genre catalog
    ExplicitGenres,

    /// Extract the theme catalog
    Themes,

    /// Extract the demographic catalog
    Demographics,

    /// Extract the description of one genre
    GenreDescription { id: u32 },

    /// Extract the season archive
    Seasons,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) =
        load_config_with_hash(&cli.config).context("failed to load configuration")?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    let client = build_http_client(&config.user_agent).context("failed to build HTTP client")?;

    match cli.command {
        Command::Scan { low, high } => handle_scan(config, client, low, high).await?,
        Command::Anime { id } => {
            print_json(&crawl_anime(&client, &config.site, id).await?)?;
        }
        Command::Episodes { id } => {
            print_json(&crawl_episodes(&client, &config.site, id).await?)?;
        }
        Command::Characters { id } => {
            print_json(&crawl_characters(&client, &config.site, id).await?)?;
        }
        Command::Genres => {
            print_json(&crawl_genre_catalog(&client, &config.site, GenreGroup::Genres).await)?;
        }
        Command::ExplicitGenres => {
            print_json(
                &crawl_genre_catalog(&client, &config.site, GenreGroup::ExplicitGenres).await,
            )?;
        }
        Command::Themes => {
            print_json(&crawl_genre_catalog(&client, &config.site, GenreGroup::Themes).await)?;
        }
        Command::Demographics => {
            print_json(
                &crawl_genre_catalog(&client, &config.site, GenreGroup::Demographics).await,
            )?;
        }
        Command::GenreDescription { id } => {
            print_json(&crawl_genre_description(&client, &config.site, id).await)?;
        }
        Command::Seasons => {
            print_json(&crawl_seasons(&client, &config.site).await)?;
        }
    }

    Ok(())
}

/// Runs the ID-space scan with the configured checkpoint backend
async fn handle_scan(
    config: Config,
    client: Client,
    low: Option<u32>,
    high: Option<u32>,
) -> anyhow::Result<()> {
    let low = low.unwrap_or(1);
    let high = high.unwrap_or(config.scan.last_id);
    let batch_size = config.scan.batch_size;
    let delay = Duration::from_secs(config.scan.sleep_interval);
    let path = Path::new(&config.checkpoint.path);

    let ids = match config.checkpoint.backend {
        CheckpointBackend::Json => {
            let store = JsonFileCheckpoint::new(path);
            let mut scanner = Scanner::new(client, config.site, store);
            scanner.scan(low, high, batch_size, delay).await?
        }
        CheckpointBackend::Sqlite => {
            let store = SqliteCheckpoint::new(path)?;
            let mut scanner = Scanner::new(client, config.site, store);
            scanner.scan(low, high, batch_size, delay).await?
        }
    };

    tracing::info!("Scan finished: {} valid ids", ids.len());
    print_json(&serde_json::json!({ "ids": ids }))?;
    Ok(())
}

/// Prints a record as pretty JSON on stdout
fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("mal_crawler=info,warn"),
            1 => EnvFilter::new("mal_crawler=debug,info"),
            2 => EnvFilter::new("mal_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
