use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use sonority_catalog::{load_env_file, Config};
use sonority_core::SeedSong;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "sonority", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the track dataset (default: data/spotify_tracks.csv)
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Recommend songs similar to a set of seed songs
    ///
    /// Each seed is located in the dataset by name (case-insensitive) and
    /// artist (case-insensitive substring). The mean of the seeds' numeric
    /// audio features is standardized with dataset-wide statistics and
    /// compared against every track by cosine similarity. Seed songs never
    /// appear in their own recommendations.
    ///
    /// Seeds missing from the dataset are looked up in the Spotify catalog
    /// and reported, but catalog results carry no audio features and do not
    /// influence the ranking. At least one seed must be in the dataset.
    ///
    /// Requires Spotify client credentials (see `sonority config example`).
    Recommend {
        /// Seed song as NAME::ARTIST (repeatable)
        #[arg(long = "seed", value_name = "NAME::ARTIST")]
        seeds: Vec<SeedSong>,

        /// Number of recommendations to return
        #[arg(short = 'n', long = "count", default_value_t = 10)]
        n: usize,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a song's data from the dataset, or from Spotify if missing
    Lookup {
        /// Track name
        name: String,

        /// Artist name (substring match)
        artist: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Print an example config file
    Example,
    /// Create the config file with defaults if it does not exist
    Init,
}

/// Logger options for this run: the configured ones, at debug level when
/// `--verbose` is given.
fn logging_opts(configured: &twyg::Opts, verbose: bool) -> twyg::Result<twyg::Opts> {
    if !verbose {
        return Ok(configured.clone());
    }

    twyg::OptsBuilder::new()
        .coloured(configured.coloured())
        .output(configured.output().clone())
        .level(twyg::LogLevel::Debug)
        .report_caller(configured.report_caller())
        .timestamp_format(configured.timestamp_format().clone())
        .pad_level(configured.pad_level())
        .pad_amount(configured.pad_amount())
        .pad_side(configured.pad_side())
        .msg_separator(configured.msg_separator())
        .arrow_char(configured.arrow_char())
        .colors(configured.colors().clone())
        .build()
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_file = load_env_file();
    let config = match cli.dataset {
        Some(path) => Config::load_with_dataset_path(path)?,
        None => Config::load()?,
    };

    let logging = logging_opts(&config.logging, cli.verbose)
        .map_err(|e| anyhow::anyhow!("Invalid logging configuration: {:?}", e))?;
    twyg::setup(logging).map_err(|e| anyhow::anyhow!("Failed to set up logging: {:?}", e))?;
    env_file.log();

    match cli.command {
        Commands::Recommend { seeds, n, json } => {
            let seeds = if seeds.is_empty() {
                commands::default_seeds()
            } else {
                seeds
            };
            commands::run_recommend(&config, seeds, n, json)
                .await
                .context("Recommendation failed")?;
        }
        Commands::Lookup { name, artist, json } => {
            commands::run_lookup(&config, &name, &artist, json).await?;
        }
        Commands::Config { command } => match command {
            ConfigCommands::Show => commands::config::show_config(&config)?,
            ConfigCommands::Path => commands::config::show_path()?,
            ConfigCommands::Example => commands::config::show_example()?,
            ConfigCommands::Init => commands::config::init_config()?,
        },
    }

    Ok(())
}
