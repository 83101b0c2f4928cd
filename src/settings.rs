//! Experience settings
//!
//! Read once at startup from the page (a `data-settings` JSON attribute on
//! `<body>`). Nothing is written back.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::cosmos::UniverseLayout;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    Medium,
    #[default]
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

    /// Particles in the heart field for this preset
    pub fn field_particles(&self) -> usize {
        match self {
            QualityPreset::Low => FIELD_PARTICLES / 4,
            QualityPreset::Medium => FIELD_PARTICLES / 2,
            QualityPreset::High => FIELD_PARTICLES,
        }
    }

    /// Firework bursts for this preset
    pub fn firework_bursts(&self) -> usize {
        match self {
            QualityPreset::Low => FIREWORK_BURSTS / 3,
            QualityPreset::Medium => FIREWORK_BURSTS * 2 / 3,
            QualityPreset::High => FIREWORK_BURSTS,
        }
    }
}

/// Experience settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Effects ===
    /// Continuous sparks over the universe
    pub sparks: bool,
    /// Confetti on quest victory
    pub confetti: bool,
    /// Portals, energy waves and floating ornaments
    pub scenery: bool,

    // === Overrides ===
    /// Field particle count (overrides the preset)
    pub field_particles: Option<usize>,
    /// Spark emitter interval in ms
    pub spark_interval_ms: Option<f64>,

    // === Accessibility ===
    /// Reduced motion (slower drift, no sparks)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::High,

            sparks: true,
            confetti: true,
            scenery: true,

            field_particles: None,
            spark_interval_ms: None,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Parse settings JSON; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Universe sizes for these settings
    pub fn layout(&self) -> UniverseLayout {
        UniverseLayout {
            field_particles: self
                .field_particles
                .unwrap_or_else(|| self.quality.field_particles()),
            firework_bursts: self.quality.firework_bursts(),
            scenery: self.scenery,
        }
    }

    /// Effective spark emitter (respects reduced_motion)
    pub fn effective_sparks(&self) -> bool {
        self.sparks && !self.reduced_motion
    }

    pub fn spark_interval_ms(&self) -> f64 {
        self.spark_interval_ms
            .filter(|ms| *ms > 0.0)
            .unwrap_or(SPARK_INTERVAL_MS)
    }

    /// Drift multiplier for the animator
    pub fn drift_rate(&self) -> f32 {
        if self.reduced_motion { 0.5 } else { 1.0 }
    }

    /// Attribute on `<body>` holding the settings JSON
    const DATA_ATTRIBUTE: &'static str = "data-settings";

    /// Load settings from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body())
            .and_then(|body| body.get_attribute(Self::DATA_ATTRIBUTE));

        if let Some(json) = json {
            match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings (quality {})", settings.quality.as_str());
                    return settings;
                }
                Err(e) => log::warn!("Ignoring malformed {}: {}", Self::DATA_ATTRIBUTE, e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native builds read settings from the environment
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::env::var("COSMIC_BIRTHDAY_SETTINGS") {
            Ok(json) => Self::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring malformed settings ({}): {}", Self::DATA_ATTRIBUTE, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }
}
