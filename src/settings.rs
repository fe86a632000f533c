//! Game settings and preferences
//!
//! Owned and persisted by the host; the simulation reads them once at world
//! creation (burst cap, starfield) and the audio mixer reads volumes live.

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Live burst-spark cap for this preset. Low trims rocket detonations;
    /// that is the point of the preset.
    pub fn max_bursts(&self) -> usize {
        match self {
            QualityPreset::Low => 500,
            QualityPreset::Medium => 2000,
            QualityPreset::High => 10000,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual ===
    /// Render the parallax starfield
    pub starfield: bool,
    /// Stars seeded at world creation
    pub star_count: usize,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Mute everything
    pub muted: bool,

    // === Input ===
    /// Controller rumble on weapon fire
    pub rumble: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            starfield: true,
            star_count: 100,
            master_volume: 0.8,
            sfx_volume: 0.5,
            music_volume: 0.5,
            muted: false,
            rumble: true,
        }
    }
}

impl Settings {
    /// Serialize for the host's preference store
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            log::warn!("failed to serialize settings: {e}");
            String::from("{}")
        })
    }

    /// Load from the host's preference store, falling back to defaults on
    /// anything unreadable
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => settings.sanitized(),
            Err(e) => {
                log::warn!("failed to parse settings, using defaults: {e}");
                Settings::default()
            }
        }
    }

    /// Clamp volumes into range; stored preferences may predate validation
    fn sanitized(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let mut settings = Settings::default();
        settings.quality = QualityPreset::High;
        settings.muted = true;

        let restored = Settings::from_json(&settings.to_json());
        assert_eq!(restored.quality, QualityPreset::High);
        assert!(restored.muted);
    }

    #[test]
    fn test_garbage_json_falls_back_to_defaults() {
        let settings = Settings::from_json("not json at all");
        assert_eq!(settings.quality, QualityPreset::Medium);
        assert_eq!(settings.star_count, 100);
    }

    #[test]
    fn test_out_of_range_volumes_are_clamped() {
        let json = r#"{
            "quality": "Low",
            "starfield": true,
            "star_count": 50,
            "master_volume": 4.0,
            "sfx_volume": -1.0,
            "music_volume": 0.5,
            "muted": false,
            "rumble": true
        }"#;
        let settings = Settings::from_json(json);
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.sfx_volume, 0.0);
    }

    #[test]
    fn test_preset_from_str() {
        assert_eq!(QualityPreset::from_str("HIGH"), Some(QualityPreset::High));
        assert_eq!(QualityPreset::from_str("med"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::from_str("ultra"), None);
    }
}
