//! Remote catalog access for sonority.
//!
//! Loads configuration and credentials, builds the Spotify Web API client,
//! and implements the "dataset first, then catalog" song lookup used when
//! a seed song is missing from the local dataset.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod error;
pub mod fallback;
pub mod spotify;

pub use config::{load_env_file, Config, Credentials, EnvFile};
pub use error::{CatalogError, CatalogResult};
pub use fallback::{CatalogSearch, Fallback, SongData};
pub use spotify::{RemoteTrack, SpotifyClient};
