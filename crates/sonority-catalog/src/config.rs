use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::error::{CatalogError, CatalogResult};

/// Unprefixed variable names accepted for the client credentials.
const LEGACY_CLIENT_ID_VAR: &str = "SPOTIFY_CLIENT_ID";
const LEGACY_CLIENT_SECRET_VAR: &str = "SPOTIFY_CLIENT_SECRET";

/// Configuration for sonority.
///
/// Configuration is loaded once at startup and passed to whatever needs it.
/// Sources, in priority order:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (SONORITY_* prefix), including those from a
///    `.env` file in the working directory
/// 3. Config file (~/.config/sonority/config.toml)
/// 4. Unprefixed SPOTIFY_CLIENT_ID / SPOTIFY_CLIENT_SECRET
/// 5. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Spotify client ID.
    ///
    /// Can be set via:
    /// - ENV: SONORITY_SPOTIFY_CLIENT_ID or SPOTIFY_CLIENT_ID
    /// - Config: spotify_client_id = "..."
    pub spotify_client_id: Option<String>,

    /// Spotify client secret.
    ///
    /// Can be set via:
    /// - ENV: SONORITY_SPOTIFY_CLIENT_SECRET or SPOTIFY_CLIENT_SECRET
    /// - Config: spotify_client_secret = "..."
    pub spotify_client_secret: Option<String>,

    /// Path to the track dataset (CSV).
    ///
    /// Can be set via:
    /// - CLI: --dataset /path/to/tracks.csv
    /// - ENV: SONORITY_DATASET_PATH
    /// - Config: dataset_path = "/path/to/tracks.csv"
    /// - Default: data/spotify_tracks.csv
    #[serde(default = "default_dataset_path")]
    pub dataset_path: PathBuf,

    /// Logger options, handed to `twyg` at startup.
    #[serde(default)]
    pub logging: twyg::Opts,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spotify_client_id: None,
            spotify_client_secret: None,
            dataset_path: default_dataset_path(),
            logging: twyg::Opts::default(),
        }
    }
}

impl Config {
    /// Load configuration from the config file and environment variables.
    ///
    /// Call [`load_env_file`] first so that variables from a `.env` file are
    /// visible here.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("sonority");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let mut config: Self = builder.build().context("Failed to build configuration")?;

        if config.spotify_client_id.is_none() {
            config.spotify_client_id = std::env::var(LEGACY_CLIENT_ID_VAR).ok();
        }
        if config.spotify_client_secret.is_none() {
            config.spotify_client_secret = std::env::var(LEGACY_CLIENT_SECRET_VAR).ok();
        }

        Ok(config)
    }

    /// Load configuration with a custom dataset path.
    ///
    /// This is used when the --dataset CLI flag is provided.
    pub fn load_with_dataset_path(dataset_path: PathBuf) -> Result<Self> {
        let mut config = Self::load()?;
        config.dataset_path = dataset_path;
        Ok(config)
    }

    /// The client credentials for the remote catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MissingCredentials`] if either value is
    /// unset or blank.
    pub fn credentials(&self) -> CatalogResult<Credentials> {
        let non_blank = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        match (
            non_blank(&self.spotify_client_id),
            non_blank(&self.spotify_client_secret),
        ) {
            (Some(client_id), Some(client_secret)) => Ok(Credentials {
                client_id,
                client_secret,
            }),
            _ => Err(CatalogError::MissingCredentials),
        }
    }
}

/// Outcome of reading a `.env` file into the process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvFile {
    /// Variables were read from this file.
    Loaded(PathBuf),
    /// No `.env` file was found.
    Missing,
    /// A `.env` file exists but could not be read or parsed.
    Unreadable(String),
}

impl EnvFile {
    fn from_result(result: dotenvy::Result<PathBuf>) -> Self {
        match result {
            Ok(path) => Self::Loaded(path),
            Err(e) if e.not_found() => Self::Missing,
            Err(e) => Self::Unreadable(e.to_string()),
        }
    }

    /// Report the outcome through the logger. Only useful once a logger is
    /// installed.
    pub fn log(&self) {
        match self {
            Self::Loaded(path) => log::debug!("Loaded environment from {}", path.display()),
            Self::Missing => {}
            Self::Unreadable(reason) => log::warn!("Ignoring unreadable .env file: {}", reason),
        }
    }
}

/// Load a `.env` file from the working directory (or a parent) into the
/// process environment. Existing variables are not overridden.
///
/// Nothing is logged here; the caller logs the returned outcome after the
/// logger is set up.
pub fn load_env_file() -> EnvFile {
    EnvFile::from_result(dotenvy::dotenv())
}

/// Client-credentials pair for the Spotify Web API.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Get the default dataset path, relative to the working directory.
fn default_dataset_path() -> PathBuf {
    PathBuf::from("data").join("spotify_tracks.csv")
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/sonority/config.toml
/// - macOS: ~/Library/Application Support/sonority/config.toml
/// - Windows: %APPDATA%\sonority\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sonority")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Sonority Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (SONORITY_* prefix, also read from ./.env)
# 3. This config file
# 4. SPOTIFY_CLIENT_ID / SPOTIFY_CLIENT_SECRET environment variables
# 5. Built-in defaults (lowest priority)

# Spotify client credentials, used to look up seed songs that are not in
# the local dataset
#
# Create an app at: https://developer.spotify.com/dashboard
#
# Can also be set via:
# - Environment: SONORITY_SPOTIFY_CLIENT_ID=... SONORITY_SPOTIFY_CLIENT_SECRET=...
spotify_client_id = "your-client-id-here"
spotify_client_secret = "your-client-secret-here"

# Path to the track dataset (CSV with name, artists and numeric feature columns)
#
# Can also be set via:
# - CLI: sonority --dataset /custom/tracks.csv recommend
# - Environment: SONORITY_DATASET_PATH=/custom/tracks.csv
#
# Default: data/spotify_tracks.csv (relative to the working directory)
#dataset_path = "/path/to/spotify_tracks.csv"
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}
