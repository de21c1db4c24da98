use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Preferences {
    #[serde(default)]
    pub minimap: MinimapPreferences,

    #[serde(default)]
    pub transcript: TranscriptPreferences,
}

/// Drawing constants for the branch minimap.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MinimapPreferences {
    #[serde(default = "default_column_width")]
    pub column_width: u32,
    #[serde(default = "default_row_height")]
    pub row_height: u32,
    #[serde(default = "default_node_radius")]
    pub node_radius: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranscriptPreferences {
    #[serde(default = "default_show_branch_indicators")]
    pub show_branch_indicators: bool,
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
}

fn default_column_width() -> u32 {
    24
}

fn default_row_height() -> u32 {
    28
}

fn default_node_radius() -> u32 {
    6
}

fn default_show_branch_indicators() -> bool {
    true
}

fn default_preview_chars() -> usize {
    72
}

impl Default for MinimapPreferences {
    fn default() -> Self {
        Self {
            column_width: default_column_width(),
            row_height: default_row_height(),
            node_radius: default_node_radius(),
        }
    }
}

impl Default for TranscriptPreferences {
    fn default() -> Self {
        Self {
            show_branch_indicators: default_show_branch_indicators(),
            preview_chars: default_preview_chars(),
        }
    }
}

impl Preferences {
    /// Get the path to the preferences file
    pub fn config_path() -> Result<PathBuf, crate::error::Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            crate::error::Error::Configuration("Could not determine config directory".to_string())
        })?;
        Ok(config_dir.join("workshop").join("preferences.toml"))
    }

    /// Load preferences from disk, or return defaults if not found
    pub fn load() -> Result<Self, crate::error::Error> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, crate::error::Error> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            match toml::from_str(&contents) {
                Ok(prefs) => Ok(prefs),
                Err(e) => {
                    tracing::warn!(
                        "Failed to parse preferences file at {:?}: {}. Using defaults.",
                        path,
                        e
                    );
                    Ok(Self::default())
                }
            }
        } else {
            Ok(Self::default())
        }
    }

    /// Write preferences to `path`, creating its directory.
    pub fn save_to(&self, path: &Path) -> Result<(), crate::error::Error> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self).map_err(|e| {
            crate::error::Error::Configuration(format!("Failed to serialize preferences: {e}"))
        })?;

        std::fs::write(path, contents)?;

        Ok(())
    }
}
