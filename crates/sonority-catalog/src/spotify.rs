//! Spotify Web API client.
//!
//! Authenticates with the client-credentials flow and searches the catalog
//! for single tracks. The access token is requested on the first search and
//! reused for the rest of the process; nothing else is cached.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;

use crate::config::{Config, Credentials};
use crate::error::{CatalogError, CatalogResult};

const SOURCE_NAME: &str = "Spotify";
const SPOTIFY_ACCOUNTS_BASE: &str = "https://accounts.spotify.com";
const SPOTIFY_API_BASE: &str = "https://api.spotify.com";

// ---------------------------------------------------------------------------
// API response types (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    tracks: Option<TrackPage>,
}

#[derive(Debug, Deserialize)]
struct TrackPage {
    #[serde(default)]
    items: Vec<SpotifyTrack>,
}

#[derive(Debug, Deserialize)]
struct SpotifyTrack {
    id: String,
    name: String,
    #[serde(default)]
    artists: Vec<SpotifyArtist>,
    #[serde(default)]
    popularity: u32,
    duration_ms: u64,
}

#[derive(Debug, Deserialize)]
struct SpotifyArtist {
    name: String,
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// A track found in the remote catalog.
///
/// Carries the same identifying attributes as a dataset row but none of the
/// audio features, so it cannot take part in similarity ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteTrack {
    /// Catalog identifier.
    pub id: String,
    pub name: String,
    /// Comma-joined artist names, in the same form as the dataset.
    pub artists: String,
    /// Popularity, 0--100.
    pub popularity: u32,
    pub duration_ms: u64,
}

impl From<SpotifyTrack> for RemoteTrack {
    fn from(track: SpotifyTrack) -> Self {
        let artists = track
            .artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            id: track.id,
            name: track.name,
            artists,
            popularity: track.popularity,
            duration_ms: track.duration_ms,
        }
    }
}

/// Spotify Web API client.
#[derive(Debug)]
pub struct SpotifyClient {
    http: Client,
    credentials: Credentials,
    accounts_base: String,
    api_base: String,
    token: OnceCell<String>,
}

impl SpotifyClient {
    /// Create a new client for the given credentials.
    ///
    /// No request is made until the first search.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(credentials: Credentials) -> CatalogResult<Self> {
        let http = Client::builder()
            .user_agent("sonority/0.1.0 (https://github.com/oxur/sonority)")
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            credentials,
            accounts_base: SPOTIFY_ACCOUNTS_BASE.to_string(),
            api_base: SPOTIFY_API_BASE.to_string(),
            token: OnceCell::new(),
        })
    }

    /// Build a client from the loaded configuration.
    ///
    /// # Errors
    /// Returns [`CatalogError::MissingCredentials`] if the client ID or
    /// secret is not configured.
    pub fn from_config(config: &Config) -> CatalogResult<Self> {
        Self::new(config.credentials()?)
    }

    /// Point the client at different accounts and API hosts.
    #[must_use]
    pub fn with_base_urls(mut self, accounts_base: &str, api_base: &str) -> Self {
        self.accounts_base = accounts_base.trim_end_matches('/').to_string();
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    /// Build the structured search query for a track.
    pub fn search_query(name: &str, artist: &str) -> String {
        format!("track:{} artist:{}", name, artist)
    }

    /// Search the catalog for the single best match for a track.
    ///
    /// Returns `Ok(None)` when the catalog has no match.
    pub async fn search_track(&self, name: &str, artist: &str) -> CatalogResult<Option<RemoteTrack>> {
        let token = self.access_token().await?;
        let query = Self::search_query(name, artist);

        log::debug!("Searching {} for '{}'", SOURCE_NAME, query);

        let response = self
            .http
            .get(format!("{}/v1/search", self.api_base))
            .bearer_auth(token)
            .query(&[("q", query.as_str()), ("type", "track"), ("limit", "1")])
            .send()
            .await?
            .error_for_status()
            .map_err(|e| CatalogError::Http {
                source_name: SOURCE_NAME.to_string(),
                message: e.to_string(),
            })?;

        let body = response.text().await?;
        parse_search_response(&body)
    }

    async fn access_token(&self) -> CatalogResult<&str> {
        let token = self
            .token
            .get_or_try_init(|| self.request_token())
            .await?;
        Ok(token.as_str())
    }

    async fn request_token(&self) -> CatalogResult<String> {
        log::debug!("Requesting {} access token", SOURCE_NAME);

        let response = self
            .http
            .post(format!("{}/api/token", self.accounts_base))
            .basic_auth(
                &self.credentials.client_id,
                Some(&self.credentials.client_secret),
            )
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            return Err(CatalogError::Auth {
                source_name: SOURCE_NAME.to_string(),
                message: format!("token request rejected with status {}", status),
            });
        }

        let response = response.error_for_status().map_err(|e| CatalogError::Http {
            source_name: SOURCE_NAME.to_string(),
            message: e.to_string(),
        })?;

        let token: TokenResponse = response.json().await.map_err(|e| CatalogError::Parse {
            source_name: SOURCE_NAME.to_string(),
            message: e.to_string(),
        })?;

        Ok(token.access_token)
    }
}

/// Decode a search response body into at most one track.
fn parse_search_response(body: &str) -> CatalogResult<Option<RemoteTrack>> {
    let result: SearchResponse = serde_json::from_str(body).map_err(|e| CatalogError::Parse {
        source_name: SOURCE_NAME.to_string(),
        message: e.to_string(),
    })?;

    Ok(result
        .tracks
        .and_then(|page| page.items.into_iter().next())
        .map(RemoteTrack::from))
}
