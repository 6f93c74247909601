//! In-memory track dataset.
//!
//! A dataset is read once from a CSV file with at least `name` and `artists`
//! columns. Every other column whose cells all parse as finite numbers
//! becomes a feature column; the rest (ids, dates, booleans, text with gaps)
//! are ignored for similarity purposes.

use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::{SeedSong, Track};

const NAME_COLUMN: &str = "name";
const ARTISTS_COLUMN: &str = "artists";
const ID_COLUMN: &str = "id";

/// A read-only table of tracks with aligned numeric feature columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    feature_columns: Vec<String>,
    tracks: Vec<Track>,
}

impl Dataset {
    /// Build a dataset from already-parsed tracks.
    ///
    /// # Errors
    /// Returns [`Error::InvalidData`] if any track's feature vector does not
    /// have one value per feature column.
    pub fn from_tracks(feature_columns: Vec<String>, tracks: Vec<Track>) -> Result<Self> {
        if let Some(track) = tracks
            .iter()
            .find(|t| t.features.len() != feature_columns.len())
        {
            return Err(Error::InvalidData(format!(
                "track '{}' has {} features, expected {}",
                track,
                track.features.len(),
                feature_columns.len()
            )));
        }

        Ok(Self {
            feature_columns,
            tracks,
        })
    }

    /// Load a dataset from a CSV file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is not valid CSV, or
    /// lacks a `name` or `artists` column.
    pub fn load(path: &Path) -> Result<Self> {
        log::info!("Loading dataset from {}", path.display());
        let reader = csv::Reader::from_path(path)?;
        let dataset = Self::from_csv(reader)?;
        log::info!(
            "Loaded {} tracks with {} feature columns",
            dataset.len(),
            dataset.feature_columns.len()
        );
        Ok(dataset)
    }

    /// Load a dataset from any CSV source with a header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_csv(csv::Reader::from_reader(reader))
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Self> {
        let headers = reader.headers()?.clone();
        let position = |column: &str| headers.iter().position(|h| h.trim() == column);

        let name_idx = position(NAME_COLUMN).ok_or(Error::MissingColumn {
            column: NAME_COLUMN,
        })?;
        let artists_idx = position(ARTISTS_COLUMN).ok_or(Error::MissingColumn {
            column: ARTISTS_COLUMN,
        })?;
        let id_idx = position(ID_COLUMN);

        let records = reader.records().collect::<std::result::Result<Vec<_>, _>>()?;

        // pandas-style dtype inference: a column is numeric only if every
        // cell is a finite number. An empty table has no numeric columns.
        let numeric_idx: Vec<usize> = (0..headers.len())
            .filter(|&idx| idx != name_idx && idx != artists_idx)
            .filter(|&idx| {
                let numeric = !records.is_empty()
                    && records
                        .iter()
                        .all(|record| record.get(idx).and_then(parse_number).is_some());
                if !numeric {
                    log::debug!("Column '{}' is not numeric, skipping", &headers[idx]);
                }
                numeric
            })
            .collect();

        let feature_columns = numeric_idx
            .iter()
            .map(|&idx| headers[idx].trim().to_string())
            .collect();

        let tracks = records
            .iter()
            .map(|record| {
                let features = numeric_idx
                    .iter()
                    .filter_map(|&idx| record.get(idx).and_then(parse_number))
                    .collect();
                let mut track = Track::new(
                    record.get(name_idx).unwrap_or_default(),
                    record.get(artists_idx).unwrap_or_default(),
                    features,
                );
                track.id = id_idx
                    .and_then(|idx| record.get(idx))
                    .filter(|id| !id.is_empty())
                    .map(str::to_string);
                track
            })
            .collect();

        Self::from_tracks(feature_columns, tracks)
    }

    /// Names of the numeric columns that make up the feature space.
    pub fn feature_columns(&self) -> &[String] {
        &self.feature_columns
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Find a track by name and artist.
    ///
    /// Matching follows [`SeedSong::matches`]. When several rows match, the
    /// first one in dataset (file) order wins; no other ranking is applied.
    pub fn find_song(&self, name: &str, artist: &str) -> Option<&Track> {
        self.find_seed(&SeedSong::new(name, artist))
    }

    /// Find the first track matching a seed song.
    pub fn find_seed(&self, seed: &SeedSong) -> Option<&Track> {
        self.tracks.iter().find(|track| seed.matches(track))
    }
}

fn parse_number(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
id,name,artists,duration_ms,popularity,explicit,danceability,release_date
a1,Shape of You,Ed Sheeran,233713,87,False,0.825,2017-03-03
a2,Photograph,Ed Sheeran,258987,82,False,0.614,2014-06-20
a3,Blinding Lights,The Weeknd,200040,90,False,0.514,2019-11-29
a4,Shape of You,\"Ed Sheeran, Stormzy\",230000,60,True,0.700,2017-04-01
";

    fn dataset() -> Dataset {
        Dataset::from_reader(CSV.as_bytes()).unwrap()
    }

    #[test]
    fn test_numeric_column_detection() {
        let ds = dataset();
        assert_eq!(
            ds.feature_columns(),
            &["duration_ms", "popularity", "danceability"]
        );
        assert_eq!(ds.len(), 4);
        assert_eq!(ds.tracks()[0].features.as_slice(), &[233_713.0, 87.0, 0.825]);
        assert_eq!(ds.tracks()[0].id.as_deref(), Some("a1"));
    }

    #[test]
    fn test_column_with_gap_is_not_numeric() {
        let csv = "name,artists,tempo,energy\nA,X,120,0.5\nB,Y,,0.7\n";
        let ds = Dataset::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(ds.feature_columns(), &["energy"]);
        assert!(ds.tracks()[0].id.is_none());
    }

    #[test]
    fn test_missing_name_column() {
        let csv = "title,artists,energy\nA,X,0.5\n";
        let result = Dataset::from_reader(csv.as_bytes());
        assert!(matches!(
            result,
            Err(Error::MissingColumn { column: "name" })
        ));
    }

    #[test]
    fn test_missing_artists_column() {
        let csv = "name,artist,energy\nA,X,0.5\n";
        let result = Dataset::from_reader(csv.as_bytes());
        assert!(matches!(
            result,
            Err(Error::MissingColumn { column: "artists" })
        ));
    }

    #[test]
    fn test_empty_dataset_has_no_features() {
        let csv = "name,artists,energy\n";
        let ds = Dataset::from_reader(csv.as_bytes()).unwrap();
        assert!(ds.is_empty());
        assert!(ds.feature_columns().is_empty());
    }

    #[test]
    fn test_find_song_case_insensitive_name() {
        let ds = dataset();
        let track = ds.find_song("SHAPE OF YOU", "Ed Sheeran").unwrap();
        assert_eq!(track.id.as_deref(), Some("a1"));
    }

    #[test]
    fn test_find_song_artist_substring() {
        let ds = dataset();
        let track = ds.find_song("Blinding Lights", "weeknd").unwrap();
        assert_eq!(track.name, "Blinding Lights");
    }

    #[test]
    fn test_find_song_first_match_wins() {
        let ds = dataset();
        // Both a1 and a4 match; a1 comes first in file order.
        let track = ds.find_song("shape of you", "sheeran").unwrap();
        assert_eq!(track.id.as_deref(), Some("a1"));

        let track = ds.find_song("shape of you", "stormzy").unwrap();
        assert_eq!(track.id.as_deref(), Some("a4"));
    }

    #[test]
    fn test_find_song_not_found() {
        let ds = dataset();
        assert!(ds.find_song("Bad Habits", "Ed Sheeran").is_none());
        assert!(ds.find_song("Photograph", "The Weeknd").is_none());
    }

    #[test]
    fn test_from_tracks_rejects_misaligned_features() {
        let tracks = vec![Track::new("A", "X", vec![1.0, 2.0])];
        let result = Dataset::from_tracks(vec!["energy".to_string()], tracks);
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("tracks.csv");
        std::fs::write(&path, CSV).unwrap();

        let ds = Dataset::load(&path).unwrap();
        assert_eq!(ds.len(), 4);
    }

    #[test]
    fn test_load_missing_file() {
        // File errors surface through the csv reader.
        let result = Dataset::load(Path::new("/nonexistent/tracks.csv"));
        match result {
            Err(Error::Csv(e)) => assert!(e.is_io_error()),
            other => panic!("expected a csv I/O error, got {:?}", other),
        }
    }
}
