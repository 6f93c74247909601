//! Catalog error types.

use thiserror::Error;

/// Errors that can occur while talking to the remote catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Client credentials were not configured.
    #[error(
        "missing Spotify client credentials: set SONORITY_SPOTIFY_CLIENT_ID and \
         SONORITY_SPOTIFY_CLIENT_SECRET (or SPOTIFY_CLIENT_ID / SPOTIFY_CLIENT_SECRET) \
         in the environment or a .env file at the project root"
    )]
    MissingCredentials,

    /// The token endpoint rejected the client credentials.
    #[error("authentication with {source_name} failed: {message}")]
    Auth {
        source_name: String,
        message: String,
    },

    /// An HTTP request to the catalog returned an error status.
    #[error("HTTP error from {source_name}: {message}")]
    Http {
        source_name: String,
        message: String,
    },

    /// A response from the catalog could not be parsed.
    #[error("parse error from {source_name}: {message}")]
    Parse {
        source_name: String,
        message: String,
    },

    /// An error propagated from `reqwest`.
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
}

/// Convenience alias for catalog results.
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
