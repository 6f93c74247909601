use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::model::Track;

/// Separator between name and artist in the textual seed form.
const SEED_SEPARATOR: &str = "::";

/// A caller-supplied (name, artist) pair used as the basis for recommendations.
///
/// A seed is not a track: it has no feature values until it is resolved
/// against a dataset (or the remote catalog).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeedSong {
    pub name: String,
    pub artist: String,
}

impl SeedSong {
    #[must_use]
    pub fn new(name: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            artist: artist.into(),
        }
    }

    /// Whether `track` is this seed song.
    ///
    /// The name must be equal ignoring case; the seed's artist must be a
    /// case-insensitive substring of the track's comma-joined artists, so
    /// "sheeran" matches "Ed Sheeran, Justin Bieber".
    #[must_use]
    pub fn matches(&self, track: &Track) -> bool {
        track.name.to_lowercase() == self.name.to_lowercase()
            && track
                .artists
                .to_lowercase()
                .contains(&self.artist.to_lowercase())
    }
}

impl fmt::Display for SeedSong {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.artist)
    }
}

impl FromStr for SeedSong {
    type Err = Error;

    /// Parse `NAME::ARTIST`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, artist) = s.split_once(SEED_SEPARATOR).ok_or_else(|| {
            Error::InvalidData(format!(
                "seed song '{s}' must have the form NAME{SEED_SEPARATOR}ARTIST"
            ))
        })?;

        let (name, artist) = (name.trim(), artist.trim());
        if name.is_empty() || artist.is_empty() {
            return Err(Error::InvalidData(format!(
                "seed song '{s}' has an empty name or artist"
            )));
        }

        Ok(Self::new(name, artist))
    }
}
