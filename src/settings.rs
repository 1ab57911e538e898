//! Listener preferences
//!
//! Applied by every audio backend on top of the volumes the sound mapper
//! chooses, so muting never changes what the simulation does.

use serde::{Deserialize, Serialize};

/// Audio preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f64,
    /// Chime volume (0.0 - 1.0), applied to notes and chords
    pub chime_volume: f64,
    /// Accent volume (0.0 - 1.0), applied to percussion
    pub accent_volume: f64,
    /// Mute all audio
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            chime_volume: 1.0,
            accent_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON, clamping volumes into range
    pub fn from_json(json: &str) -> Result<Self, String> {
        let mut settings: Settings =
            serde_json::from_str(json).map_err(|err| format!("Invalid settings JSON: {err}"))?;
        settings.set_master_volume(settings.master_volume);
        settings.chime_volume = settings.chime_volume.clamp(0.0, 1.0);
        settings.accent_volume = settings.accent_volume.clamp(0.0, 1.0);
        Ok(settings)
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f64) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Effective multiplier for chime notes
    pub fn chime_gain(&self) -> f64 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.chime_volume
        }
    }

    /// Effective multiplier for percussion accents
    pub fn accent_gain(&self) -> f64 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.accent_volume
        }
    }
}
