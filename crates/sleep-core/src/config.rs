use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::platform;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Where the local key-value store lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_store_file")]
    pub store_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Initial mpv volume, 0.0–1.0.
    #[serde(default = "default_volume")]
    pub volume: f32,
    #[serde(default = "default_true")]
    pub loop_playback: bool,
    /// Open a video window; `false` plays audio only.
    #[serde(default = "default_true")]
    pub video: bool,
    /// Explicit mpv binary. Falls back to beside-exe / PATH lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mpv_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_keys_bar: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            store_file: default_store_file(),
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            volume: default_volume(),
            loop_playback: true,
            video: true,
            mpv_path: None,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_keys_bar: true,
        }
    }
}

fn default_store_file() -> PathBuf {
    platform::data_dir().join("storage.json")
}

fn default_volume() -> f32 {
    0.5
}

fn default_true() -> bool {
    true
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(&config_path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let mut config: Self = toml::from_str(content)?;
        config.player.volume = config.player.volume.clamp(0.0, 1.0);
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.player.volume, 0.5);
        assert!(config.player.loop_playback);
        assert!(config.player.video);
        assert!(config.player.mpv_path.is_none());
        assert!(config.ui.show_keys_bar);
        assert!(config.storage.store_file.ends_with("storage.json"));
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::from_toml_str(
            "[player]\nvolume = 3.0\nvideo = false\n\n[storage]\nstore_file = \"/tmp/x.json\"\n",
        )
        .unwrap();
        assert_eq!(config.player.volume, 1.0);
        assert!(!config.player.video);
        assert!(config.player.loop_playback);
        assert_eq!(config.storage.store_file, PathBuf::from("/tmp/x.json"));
    }

    #[test]
    fn default_round_trips_through_toml() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        let back = Config::from_toml_str(&text).unwrap();
        assert_eq!(back.player.volume, 0.5);
        assert_eq!(back.storage.store_file, Config::default().storage.store_file);
    }
}
