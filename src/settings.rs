//! Game settings and preferences
//!
//! Persisted as JSON: LocalStorage on the web, `settings.json` natively.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Silence all tones
    pub muted: bool,
    /// Suspend audio while the game is paused
    pub mute_on_pause: bool,

    // === Simulation ===
    /// Fixed RNG seed for reproducible runs (time-derived when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            mute_on_pause: true,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings JSON; missing fields take defaults, volumes are clamped
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
        settings.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "brick_break_settings";

    /// Native settings file, relative to the working directory
    #[cfg(not(target_arch = "wasm32"))]
    pub const SETTINGS_PATH: &'static str = "settings.json";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("{e}; using defaults"),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from `settings.json`, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let path = std::path::Path::new(Self::SETTINGS_PATH);
        if !path.exists() {
            log::info!("Using default settings");
            return Self::default();
        }
        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{e}; using defaults");
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Result<Self, Error> {
        let json = std::fs::read_to_string(path).map_err(|e| Error::SettingsIo {
            path: path.display().to_string(),
            details: e.to_string(),
        })?;
        Self::from_json(&json)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        let path = std::path::Path::new(Self::SETTINGS_PATH);
        if let Err(e) = self.save_to(path) {
            log::warn!("{e}");
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), Error> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|e| Error::SettingsIo {
            path: path.display().to_string(),
            details: e.to_string(),
        })
    }
}
