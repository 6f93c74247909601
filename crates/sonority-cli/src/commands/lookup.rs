use anyhow::Result;
use sonority_catalog::{Config, Fallback, SongData, SpotifyClient};
use sonority_core::Dataset;

pub async fn run_lookup(config: &Config, name: &str, artist: &str, json: bool) -> Result<()> {
    let client = SpotifyClient::from_config(config)?;
    let dataset = Dataset::load(&config.dataset_path)?;

    let fallback = Fallback::new(&dataset, &client);
    let Some(data) = fallback.song_data(name, artist).await? else {
        println!("'{}' by {} was not found in the dataset or on Spotify", name, artist);
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    println!("\n{}\n", heading(&data));

    match &data {
        SongData::Dataset(track) => {
            if let Some(id) = &track.id {
                println!("  id: {}", id);
            }
            for (column, value) in dataset
                .feature_columns()
                .iter()
                .zip(track.features.as_slice())
            {
                println!("  {}: {}", column, value);
            }
        }
        SongData::Remote(track) => {
            println!("  id: {}", track.id);
            println!("  popularity: {}", track.popularity);
            println!("  duration_ms: {}", track.duration_ms);
        }
    }

    if !data.has_features() {
        println!("\n  No audio features; this song cannot seed recommendations.");
    }

    Ok(())
}

fn heading(data: &SongData) -> String {
    let source = if data.has_features() { "dataset" } else { "Spotify" };
    format!("🎵 {} - {} ({})", data.name(), data.artists(), source)
}
