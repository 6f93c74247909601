//! Dataset-first song lookup with a remote catalog fallback.
//!
//! A song is looked up in the local dataset first. Only on a miss is the
//! remote catalog queried. Catalog results have no audio features, so they
//! are reported to the caller but never fed into similarity ranking.

use async_trait::async_trait;
use serde::Serialize;

use sonority_core::{Dataset, SeedSong, Track};

use crate::error::CatalogResult;
use crate::spotify::{RemoteTrack, SpotifyClient};

/// A remote catalog that can be searched for a single track.
#[async_trait]
pub trait CatalogSearch: Send + Sync {
    /// Search for the best match for (name, artist). `Ok(None)` means the
    /// catalog has no match.
    async fn search_track(&self, name: &str, artist: &str) -> CatalogResult<Option<RemoteTrack>>;
}

#[async_trait]
impl CatalogSearch for SpotifyClient {
    async fn search_track(&self, name: &str, artist: &str) -> CatalogResult<Option<RemoteTrack>> {
        SpotifyClient::search_track(self, name, artist).await
    }
}

/// Where a song's data came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum SongData {
    /// A full dataset row, including audio features.
    Dataset(Track),
    /// A remote catalog match; identifying fields only.
    Remote(RemoteTrack),
}

impl SongData {
    pub fn name(&self) -> &str {
        match self {
            Self::Dataset(track) => &track.name,
            Self::Remote(track) => &track.name,
        }
    }

    pub fn artists(&self) -> &str {
        match self {
            Self::Dataset(track) => &track.artists,
            Self::Remote(track) => &track.artists,
        }
    }

    /// Whether this song carries audio features usable for ranking.
    pub const fn has_features(&self) -> bool {
        matches!(self, Self::Dataset(_))
    }
}

/// Looks songs up in a dataset, falling back to a remote catalog.
#[derive(Debug)]
pub struct Fallback<'a, C> {
    dataset: &'a Dataset,
    catalog: &'a C,
}

impl<'a, C: CatalogSearch> Fallback<'a, C> {
    pub fn new(dataset: &'a Dataset, catalog: &'a C) -> Self {
        Self { dataset, catalog }
    }

    /// Data for one song: the dataset row if present, otherwise the remote
    /// catalog's best match, otherwise `None`.
    pub async fn song_data(&self, name: &str, artist: &str) -> CatalogResult<Option<SongData>> {
        if let Some(track) = self.dataset.find_song(name, artist) {
            return Ok(Some(SongData::Dataset(track.clone())));
        }

        log::info!(
            "'{}' by {} not in dataset, querying remote catalog",
            name,
            artist
        );

        let remote = self.catalog.search_track(name, artist).await?;
        if remote.is_none() {
            log::info!("'{}' by {} not found in remote catalog", name, artist);
        }

        Ok(remote.map(SongData::Remote))
    }

    /// Look up every seed the dataset cannot resolve in the remote catalog.
    ///
    /// Seeds present in the dataset are not returned. A failed remote lookup
    /// is logged and reported as not found, so one bad request does not hide
    /// the rest.
    pub async fn missing_seeds(&self, seeds: &[SeedSong]) -> Vec<(SeedSong, Option<RemoteTrack>)> {
        let mut missing = Vec::new();

        for seed in seeds {
            if self.dataset.find_seed(seed).is_some() {
                continue;
            }

            let remote = match self.catalog.search_track(&seed.name, &seed.artist).await {
                Ok(remote) => remote,
                Err(e) => {
                    log::warn!("Remote lookup failed for {}: {}", seed, e);
                    None
                }
            };
            missing.push((seed.clone(), remote));
        }

        missing
    }
}
