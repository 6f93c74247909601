use anyhow::Result;
use sonority_catalog::{config, Config};

/// Show the current effective configuration.
pub fn show_config(config: &Config) -> Result<()> {
    println!("Current Configuration");
    println!("=====================\n");

    println!("Config file: {}", config::config_file_path().display());

    let exists = config::config_file_path().exists();
    println!("File exists: {}\n", if exists { "yes" } else { "no (using defaults)" });

    println!("Settings:");
    println!(
        "  spotify_client_id: {}",
        config.spotify_client_id.as_deref().unwrap_or("<not set>")
    );
    println!(
        "  spotify_client_secret: {}",
        if config.spotify_client_secret.is_some() { "<set>" } else { "<not set>" }
    );
    println!("  dataset_path: {}", config.dataset_path.display());
    println!("  logging.level: {:?}", config.logging.level());
    println!("  logging.coloured: {}", config.logging.coloured());
    println!("  logging.output: {:?}", config.logging.output());

    println!("\nPriority: CLI args > ENV vars (SONORITY_*) > Config file > SPOTIFY_* ENV vars > Defaults");

    Ok(())
}

/// Show the config file path.
pub fn show_path() -> Result<()> {
    println!("{}", config::config_file_path().display());
    Ok(())
}

/// Show example configuration.
pub fn show_example() -> Result<()> {
    print!("{}", config::example_config());
    Ok(())
}

/// Initialize config file with defaults.
pub fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let config_path = config::config_file_path();

    if created {
        println!("✓ Created config file: {}", config_path.display());
        println!("\nEdit this file to add your Spotify client credentials.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }

    Ok(())
}
