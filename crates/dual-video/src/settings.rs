use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::assets::DEFAULT_ASSET_PORT;

/// Persisted player configuration (`<config_dir>/dual-video/player.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    #[serde(default = "default_host")]
    pub server_host: String,
    #[serde(default = "default_port")]
    pub server_port: u16,
    #[serde(default = "default_client_path")]
    pub client_path: String,
    #[serde(default = "default_port")]
    pub asset_port: u16,
    #[serde(default = "default_volume")]
    pub initial_global_volume: f32,
}

fn default_host() -> String { "localhost".to_string() }
fn default_port() -> u16 { DEFAULT_ASSET_PORT }
fn default_client_path() -> String { "/client".to_string() }
fn default_volume() -> f32 { 1.0 }

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            server_host: default_host(),
            server_port: default_port(),
            client_path: default_client_path(),
            asset_port: default_port(),
            initial_global_volume: default_volume(),
        }
    }
}

impl PlayerConfig {
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("dual-video").join("player.json")
    }

    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded player config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("Failed to parse player config: {e}");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No player config found, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self) {
        self.save_to(&Self::config_path());
    }

    pub fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::error!("Failed to create config dir: {e}");
                return;
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    log::error!("Failed to write player config: {e}");
                } else {
                    log::debug!("Saved player config to {}", path.display());
                }
            }
            Err(e) => log::error!("Failed to serialize player config: {e}"),
        }
    }

    /// WebSocket URL of the show-control server's client endpoint.
    pub fn server_url(&self) -> String {
        let path = if self.client_path.starts_with('/') {
            self.client_path.clone()
        } else {
            format!("/{}", self.client_path)
        };
        format!("ws://{}:{}{}", self.server_host, self.server_port, path)
    }
}
