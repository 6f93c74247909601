use anyhow::{Context, Result};
use sonority_catalog::{Config, Fallback, SpotifyClient};
use sonority_core::{recommend_songs, Dataset, Recommendation, SeedSong};

/// Seeds used when none are given on the command line.
pub fn default_seeds() -> Vec<SeedSong> {
    vec![
        SeedSong::new("Shape of You", "Ed Sheeran"),
        SeedSong::new("Blinding Lights", "The Weeknd"),
    ]
}

pub async fn run_recommend(config: &Config, seeds: Vec<SeedSong>, n: usize, json: bool) -> Result<()> {
    // Credentials are checked before any data is read.
    let client = SpotifyClient::from_config(config)?;

    let dataset = Dataset::load(&config.dataset_path).with_context(|| {
        format!(
            "Failed to load dataset from {}",
            config.dataset_path.display()
        )
    })?;

    log::info!(
        "Recommending {} songs from {} seeds",
        n,
        seeds.len()
    );

    let fallback = Fallback::new(&dataset, &client);
    for (seed, remote) in fallback.missing_seeds(&seeds).await {
        match remote {
            Some(track) => eprintln!(
                "⚠ {} is not in the dataset; found on Spotify as '{}' by {} ({}), \
                 but without audio features it is not used for ranking",
                seed, track.name, track.artists, track.id
            ),
            None => eprintln!("⚠ {} was not found in the dataset or on Spotify", seed),
        }
    }

    let recommendations = recommend_songs(&dataset, &seeds, n)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&recommendations)?);
    } else if recommendations.is_empty() {
        println!("No recommendations found. Check your dataset and seed songs.");
    } else {
        println!("\nTop recommendations based on seed songs:");
        print!("{}", render_table(&recommendations));
    }

    Ok(())
}

/// Render recommendations as a left-aligned text table.
fn render_table(recommendations: &[Recommendation]) -> String {
    const NAME: &str = "name";
    const ARTISTS: &str = "artists";
    const SIMILARITY: &str = "similarity";

    let name_width = recommendations
        .iter()
        .map(|r| r.name.chars().count())
        .chain([NAME.len()])
        .max()
        .unwrap_or(NAME.len());
    let artists_width = recommendations
        .iter()
        .map(|r| r.artists.chars().count())
        .chain([ARTISTS.len()])
        .max()
        .unwrap_or(ARTISTS.len());

    let header = format!(
        "{:<name_width$}  {:<artists_width$}  {}",
        NAME, ARTISTS, SIMILARITY
    );
    let rows = recommendations.iter().map(|rec| {
        format!(
            "{:<name_width$}  {:<artists_width$}  {:.4}",
            rec.name, rec.artists, rec.similarity
        )
    });

    std::iter::once(header)
        .chain(rows)
        .map(|line| line + "\n")
        .collect()
}
