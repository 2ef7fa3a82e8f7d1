use anyhow::Result;
use log::debug;
use smartwill_cli::Config;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Expands a leading `~` to the home directory.
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    if !path.starts_with("~") {
        return Ok(path.to_path_buf());
    }
    let home_dir = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?;
    let path_str = path.to_string_lossy();
    let without_tilde = &path_str[1..];
    Ok(home_dir.join(without_tilde.trim_start_matches('/')))
}

pub async fn load_config(config_path: &Path) -> Result<Config> {
    let expanded_path = expand_tilde(config_path)?;

    if !expanded_path.exists() {
        // Create default config if it doesn't exist
        let default_config = Config::default();
        create_config_file(&expanded_path, &default_config).await?;
        return Ok(default_config);
    }

    debug!("Reading config from {}", expanded_path.display());
    let config_content = fs::read_to_string(&expanded_path).await?;
    let config: Config = toml::from_str(&config_content)?;

    Ok(config)
}

async fn create_config_file(path: &Path, config: &Config) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let config_content = toml::to_string_pretty(config)?;
    fs::write(path, config_content).await?;

    println!("Created default config file at: {}", path.display());

    Ok(())
}

pub fn get_source_account(config: &Config) -> Result<String> {
    // Check environment variable first
    if let Ok(source) = std::env::var("SMARTWILL_SOURCE") {
        return Ok(source);
    }

    if let Some(source) = &config.auth.source {
        return Ok(source.clone());
    }

    Err(anyhow::anyhow!(
        "No source account found. Set SMARTWILL_SOURCE environment variable or add auth.source to the config file"
    ))
}
