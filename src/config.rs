use crate::error::ConfigError;
use crate::layout::DEFAULT_TILE_PADDING_PX;
use serde::Deserialize;
use tracing::warn;

#[cfg(target_arch = "wasm32")]
use gloo_storage::{errors::StorageError, LocalStorage, Storage};
#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

#[cfg(target_arch = "wasm32")]
const SETTINGS_KEY: &str = "stereoremote.settings";
#[cfg(not(target_arch = "wasm32"))]
const SETTINGS_FILE: &str = "settings.json";
#[cfg(not(target_arch = "wasm32"))]
const SERVER_URL_ENV: &str = "STEREOREMOTE_SERVER_URL";
/// Server assumed by desktop builds when none is configured.
#[cfg(not(target_arch = "wasm32"))]
pub const DEFAULT_DESKTOP_SERVER: &str = "http://localhost:5000";

/// User-adjustable settings for the control surface.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RemoteSettings {
    /// Base URL of the player server. Empty means the page's own origin.
    pub server_url: String,
    pub tile_padding_px: u32,
    pub reload_after_queue_edit: bool,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            server_url: String::new(),
            tile_padding_px: DEFAULT_TILE_PADDING_PX,
            reload_after_queue_edit: true,
        }
    }
}

impl RemoteSettings {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// An explicit server URL from the environment wins over the stored one.
    pub fn with_server_override(mut self, server_url: Option<String>) -> Self {
        if let Some(url) = server_url.map(|u| u.trim().to_string()) {
            if !url.is_empty() {
                self.server_url = url;
            }
        }
        self
    }

    /// Base URL every request path is appended to.
    pub fn base_url(&self) -> String {
        let configured = self.server_url.trim();
        if !configured.is_empty() {
            return configured.trim_end_matches('/').to_string();
        }
        page_origin()
    }
}

#[cfg(target_arch = "wasm32")]
fn page_origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
fn page_origin() -> String {
    DEFAULT_DESKTOP_SERVER.to_string()
}

/// Load settings, falling back to defaults when nothing usable is stored.
pub fn load_settings() -> RemoteSettings {
    match try_load_settings() {
        Ok(settings) => settings,
        Err(err) => {
            warn!("using default settings: {err}");
            RemoteSettings::default()
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub fn try_load_settings() -> Result<RemoteSettings, ConfigError> {
    match LocalStorage::get::<RemoteSettings>(SETTINGS_KEY) {
        Ok(settings) => Ok(settings),
        Err(StorageError::KeyNotFound(_)) => Ok(RemoteSettings::default()),
        Err(err) => Err(ConfigError::Storage(err.to_string())),
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn try_load_settings() -> Result<RemoteSettings, ConfigError> {
    let stored = match settings_path() {
        Some(path) => read_settings_file(&path)?,
        None => RemoteSettings::default(),
    };
    Ok(stored.with_server_override(std::env::var(SERVER_URL_ENV).ok()))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("stereoremote").join(SETTINGS_FILE))
}

#[cfg(not(target_arch = "wasm32"))]
fn read_settings_file(path: &Path) -> Result<RemoteSettings, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(text) => RemoteSettings::from_json(&text),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(RemoteSettings::default()),
        Err(err) => Err(err.into()),
    }
}
