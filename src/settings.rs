//! Game settings and preferences
//!
//! Persisted in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_PARTICLES;

/// HUD language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Locale {
    #[default]
    Portuguese,
    English,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Portuguese => "pt",
            Locale::English => "en",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pt" | "pt-br" | "portuguese" => Some(Locale::Portuguese),
            "en" | "en-us" | "english" => Some(Locale::English),
            _ => None,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub locale: Locale,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    // === Visual Effects ===
    /// Coin burst on catch
    pub particles: bool,
    /// Reduced motion (fewer particles)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            locale: Locale::Portuguese,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.5,
            muted: false,

            particles: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else if self.reduced_motion {
            MAX_PARTICLES / 4
        } else {
            MAX_PARTICLES
        }
    }

    /// Effective sfx gain (respects mute)
    pub fn sfx_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Effective music gain (respects mute)
    pub fn music_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.music_volume).clamp(0.0, 1.0)
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "apple_catch_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring corrupt settings: {}", e),
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
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_parse() {
        assert_eq!(Locale::from_str("EN"), Some(Locale::English));
        assert_eq!(Locale::from_str("pt-BR"), Some(Locale::Portuguese));
        assert_eq!(Locale::from_str("klingon"), None);
        assert_eq!(Locale::from_str(Locale::English.as_str()), Some(Locale::English));
    }

    #[test]
    fn test_mute_silences_everything() {
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        assert_eq!(settings.sfx_gain(), 0.0);
        assert_eq!(settings.music_gain(), 0.0);
    }

    #[test]
    fn test_particle_cap() {
        let mut settings = Settings::default();
        assert_eq!(settings.max_particles(), MAX_PARTICLES);
        settings.reduced_motion = true;
        assert_eq!(settings.max_particles(), MAX_PARTICLES / 4);
        settings.particles = false;
        assert_eq!(settings.max_particles(), 0);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"locale":"English"}"#).unwrap();
        assert_eq!(settings.locale, Locale::English);
        assert_eq!(settings.master_volume, 0.8);
    }
}
