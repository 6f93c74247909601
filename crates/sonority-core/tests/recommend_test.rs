//! Integration tests for loading a CSV dataset and ranking it end to end.

use std::path::PathBuf;

use sonority_core::{mean_vector, recommend_songs, Dataset, Error, Recommender, SeedSong};
use tempfile::TempDir;

const TRACKS_CSV: &str = "\
id,name,artists,duration_ms,explicit,popularity,danceability,energy,key,loudness,tempo
7qiZ,Shape of You,Ed Sheeran,233713,False,87,0.825,0.652,1,-3.183,95.977
1HNk,Photograph,Ed Sheeran,258987,False,82,0.614,0.379,4,-10.480,107.989
0VjI,Blinding Lights,The Weeknd,200040,False,90,0.514,0.730,1,-5.934,171.005
";

fn write_dataset(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("spotify_tracks.csv");
    std::fs::write(&path, TRACKS_CSV).expect("Failed to write dataset");
    path
}

/// Three-row scenario: the seed is excluded and the other two are ranked.
#[test]
fn test_three_track_scenario() {
    let temp_dir = TempDir::new().unwrap();
    let dataset = Dataset::load(&write_dataset(&temp_dir)).expect("Failed to load dataset");

    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.feature_columns().len(), 7);

    let seeds = vec![SeedSong::new("Shape of You", "Ed Sheeran")];
    let recs = recommend_songs(&dataset, &seeds, 2).expect("Recommendation failed");

    assert_eq!(recs.len(), 2);
    let names: Vec<&str> = recs.iter().map(|r| r.name.as_str()).collect();
    assert!(names.contains(&"Photograph"));
    assert!(names.contains(&"Blinding Lights"));
    assert!(recs[0].similarity >= recs[1].similarity);

    // The ranking must agree with raw scores computed by the recommender.
    let recommender = Recommender::new(&dataset).unwrap();
    let mean = mean_vector(&dataset, &seeds).unwrap();
    let scores = recommender.score(&mean).unwrap();
    let expected_first = if scores[1] >= scores[2] {
        "Photograph"
    } else {
        "Blinding Lights"
    };
    assert_eq!(recs[0].name, expected_first);
    assert!((scores[0] - 1.0).abs() < 1e-9);
}

/// A seed that is not in the dataset does not prevent recommendations.
#[test]
fn test_partially_resolvable_seeds() {
    let temp_dir = TempDir::new().unwrap();
    let dataset = Dataset::load(&write_dataset(&temp_dir)).unwrap();

    let seeds = vec![
        SeedSong::new("Levitating", "Dua Lipa"),
        SeedSong::new("Blinding Lights", "The Weeknd"),
    ];
    let recs = recommend_songs(&dataset, &seeds, 10).unwrap();

    assert_eq!(recs.len(), 2);
    assert!(recs.iter().all(|r| r.name != "Blinding Lights"));
}

/// Seeds are matched by artist substring, so every matching row is excluded.
#[test]
fn test_results_never_contain_seeds() {
    let temp_dir = TempDir::new().unwrap();
    let dataset = Dataset::load(&write_dataset(&temp_dir)).unwrap();

    let seeds = vec![
        SeedSong::new("shape of you", "sheeran"),
        SeedSong::new("PHOTOGRAPH", "ed"),
    ];
    let recs = recommend_songs(&dataset, &seeds, 5).unwrap();

    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].name, "Blinding Lights");
    assert_eq!(recs[0].artists, "The Weeknd");
}

#[test]
fn test_no_resolvable_seeds() {
    let temp_dir = TempDir::new().unwrap();
    let dataset = Dataset::load(&write_dataset(&temp_dir)).unwrap();

    let result = recommend_songs(&dataset, &[SeedSong::new("Levitating", "Dua Lipa")], 5);
    assert!(matches!(result, Err(Error::NoValidSeeds)));
}

/// Filtering out every seed from a dataset that holds only seeds is empty,
/// not an error.
#[test]
fn test_all_rows_are_seeds() {
    let temp_dir = TempDir::new().unwrap();
    let dataset = Dataset::load(&write_dataset(&temp_dir)).unwrap();

    let seeds = vec![
        SeedSong::new("Shape of You", "Ed Sheeran"),
        SeedSong::new("Photograph", "Ed Sheeran"),
        SeedSong::new("Blinding Lights", "The Weeknd"),
    ];
    let recs = recommend_songs(&dataset, &seeds, 10).unwrap();
    assert!(recs.is_empty());
}

#[test]
fn test_recommendation_serializes_to_json() {
    let temp_dir = TempDir::new().unwrap();
    let dataset = Dataset::load(&write_dataset(&temp_dir)).unwrap();

    let recs = recommend_songs(&dataset, &[SeedSong::new("Photograph", "Ed Sheeran")], 1).unwrap();
    let json = serde_json::to_value(&recs).unwrap();

    assert_eq!(json.as_array().map(Vec::len), Some(1));
    assert!(json[0]["name"].is_string());
    assert!(json[0]["artists"].is_string());
    assert!(json[0]["similarity"].is_number());
}
