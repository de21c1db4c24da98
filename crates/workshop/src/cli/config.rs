use dotenvy::dotenv;
use eyre::Result;
use std::path::Path;
use workshop_core::preferences::Preferences;

pub fn load_env() -> Result<()> {
    dotenv().ok();
    Ok(())
}

/// Preferences from `--config` if given, else the user config file.
///
/// A missing or unreadable config directory falls back to defaults.
pub fn load_preferences(config: Option<&Path>) -> Preferences {
    let loaded = match config {
        Some(path) => Preferences::load_from(path),
        None => Preferences::load(),
    };
    loaded.unwrap_or_else(|e| {
        tracing::warn!("Failed to load preferences: {}. Using defaults.", e);
        Preferences::default()
    })
}
