//! Tunable constants for the particle field.
//!
//! Defaults reproduce the hero-section backdrop exactly; a JSON file can
//! override any subset of them:
//!
//! ```json
//! {
//!   "forces": { "interaction_radius": 160.0 },
//!   "style": { "background": "#05050d" }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::visuals::Color;

/// Complete particle field configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
    pub spawn: SpawnConfig,
    pub forces: ForceConfig,
    pub style: StyleConfig,
    pub host: HostConfig,
}

/// How a generation of particles is laid out.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpawnConfig {
    /// Surface area (px²) per particle.
    pub area_per_particle: f32,
    pub min_size: f32,
    pub max_size: f32,
    pub min_opacity: f32,
    pub max_opacity: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            area_per_particle: 6000.0,
            min_size: 0.5,
            max_size: 2.5,
            min_opacity: 0.2,
            max_opacity: 1.0,
        }
    }
}

/// Coefficients used by the integrator each tick.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ForceConfig {
    /// Pointer distance below which particles are pushed away.
    pub interaction_radius: f32,
    /// Velocity added per tick at zero distance.
    pub push_strength: f32,
    /// Spring coefficient pulling particles toward their anchor.
    pub return_force: f32,
    /// Per-tick velocity multiplier.
    pub damping: f32,
    /// Fraction of velocity kept (and reversed) on wall contact.
    pub bounce: f32,
    pub size_floor: f32,
    pub opacity_floor: f32,
    /// Per-tick multipliers applied while relaxing.
    pub size_decay: f32,
    pub opacity_decay: f32,
    /// `opacity = opacity_base + force * opacity_gain` while pushed.
    pub opacity_base: f32,
    pub opacity_gain: f32,
    /// `size = size_base + force * size_gain` while pushed.
    pub size_base: f32,
    pub size_gain: f32,
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            interaction_radius: 120.0,
            push_strength: 2.0,
            return_force: 0.05,
            damping: 0.9,
            bounce: 0.8,
            size_floor: 0.5,
            opacity_floor: 0.2,
            size_decay: 0.99,
            opacity_decay: 0.98,
            opacity_base: 0.3,
            opacity_gain: 0.7,
            size_base: 1.0,
            size_gain: 2.0,
        }
    }
}

/// Drawing parameters used by the renderer and the desktop host.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StyleConfig {
    /// Halo radius as a multiple of particle size.
    pub glow_factor: f32,
    /// Core radius as a multiple of particle size.
    pub core_scale: f32,
    /// Core alpha as a multiple of particle opacity.
    pub core_alpha: f32,
    pub core_color: Color,
    /// Particles closer than this are joined by a line.
    pub link_distance: f32,
    /// Peak line alpha before the opacity factor.
    pub link_alpha: f32,
    pub link_width: f32,
    /// Color the host paints behind the field.
    pub background: Color,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            glow_factor: 3.0,
            core_scale: 0.3,
            core_alpha: 0.8,
            core_color: Color::WHITE,
            link_distance: 100.0,
            link_alpha: 0.3,
            link_width: 0.5,
            background: Color::rgb(0x0a, 0x0a, 0x12),
        }
    }
}

/// Settings for the desktop host window.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HostConfig {
    pub title: String,
    /// Initial inner size in logical pixels.
    pub width: u32,
    pub height: u32,
    /// Fixed simulation rate in ticks per second; `None` ticks once per redraw.
    pub tick_rate: Option<f32>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            title: "Interactive Particle System".to_string(),
            width: 1280,
            height: 720,
            tick_rate: None,
        }
    }
}

impl FieldConfig {
    /// Save the configuration as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load and validate a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parse and validate a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: FieldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the simulation diverge or draw nothing sensible.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let spawn = &self.spawn;
        let forces = &self.forces;
        let style = &self.style;

        positive("spawn.area_per_particle", spawn.area_per_particle)?;
        ordered("spawn size", spawn.min_size, spawn.max_size)?;
        ordered("spawn opacity", spawn.min_opacity, spawn.max_opacity)?;
        if spawn.min_size < 0.0 || spawn.min_opacity < 0.0 || spawn.max_opacity > 1.0 {
            return Err(ConfigError::Invalid(
                "spawn size and opacity must be non-negative, opacity at most 1".into(),
            ));
        }

        positive("forces.interaction_radius", forces.interaction_radius)?;
        unit_open("forces.damping", forces.damping)?;
        unit_closed("forces.bounce", forces.bounce)?;
        unit_closed("forces.size_decay", forces.size_decay)?;
        unit_closed("forces.opacity_decay", forces.opacity_decay)?;
        unit_closed("forces.opacity_floor", forces.opacity_floor)?;
        if !(forces.return_force >= 0.0 && forces.push_strength >= 0.0) {
            return Err(ConfigError::Invalid(
                "forces.return_force and forces.push_strength must be non-negative".into(),
            ));
        }
        positive("forces.size_floor", forces.size_floor)?;
        non_negative("forces.size_base", forces.size_base)?;
        non_negative("forces.size_gain", forces.size_gain)?;
        non_negative("forces.opacity_gain", forces.opacity_gain)?;
        // Pushed opacity spans base..=base + gain and must stay within floor..=1.
        if !(forces.opacity_base >= forces.opacity_floor
            && forces.opacity_base + forces.opacity_gain <= 1.0)
        {
            return Err(ConfigError::Invalid(format!(
                "forces.opacity_base {} + opacity_gain {} must lie within opacity_floor {}..=1",
                forces.opacity_base, forces.opacity_gain, forces.opacity_floor
            )));
        }

        if !(style.link_distance >= 0.0 && style.glow_factor >= 0.0 && style.link_width > 0.0) {
            return Err(ConfigError::Invalid(
                "style distances must be non-negative and link_width positive".into(),
            ));
        }

        if self.host.width == 0 || self.host.height == 0 {
            return Err(ConfigError::Invalid("host window size must be non-zero".into()));
        }
        if let Some(rate) = self.host.tick_rate {
            positive("host.tick_rate", rate)?;
        }

        Ok(())
    }
}

fn positive(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{} must be positive, got {}", name, value)))
    }
}

fn non_negative(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{} must be non-negative, got {}", name, value)))
    }
}

fn ordered(name: &str, min: f32, max: f32) -> Result<(), ConfigError> {
    if min.is_finite() && max.is_finite() && min <= max {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{} range {}..{} is empty", name, min, max)))
    }
}

fn unit_open(name: &str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{} must be in (0, 1), got {}", name, value)))
    }
}

fn unit_closed(name: &str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{} must be in [0, 1], got {}", name, value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(FieldConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r##"{
            "forces": { "interaction_radius": 160.0 },
            "style": { "background": "#000000" }
        }"##;
        let config = FieldConfig::from_json(json).unwrap();

        assert_eq!(config.forces.interaction_radius, 160.0);
        assert_eq!(config.forces.damping, 0.9);
        assert_eq!(config.style.background, Color::BLACK);
        assert_eq!(config.spawn, SpawnConfig::default());
    }

    #[test]
    fn test_rejects_unstable_damping() {
        let result = FieldConfig::from_json(r#"{ "forces": { "damping": 1.2 } }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_zero_density() {
        let mut config = FieldConfig::default();
        config.spawn.area_per_particle = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_spawn_range() {
        let mut config = FieldConfig::default();
        config.spawn.min_size = 3.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_host_tick_rate_must_be_positive() {
        let result = FieldConfig::from_json(r#"{ "host": { "tick_rate": -30.0 } }"#);
        assert!(result.is_err());

        let config = FieldConfig::from_json(r#"{ "host": { "tick_rate": 60.0 } }"#).unwrap();
        assert_eq!(config.host.tick_rate, Some(60.0));
        assert_eq!(config.host.width, 1280);
    }

    fn rejects(json: &str) -> bool {
        matches!(FieldConfig::from_json(json), Err(ConfigError::Invalid(_)))
    }

    #[test]
    fn test_rejects_non_positive_size_floor() {
        assert!(rejects(r#"{ "forces": { "size_floor": 0.0 } }"#));
        assert!(rejects(r#"{ "forces": { "size_floor": -1.0 } }"#));
    }

    #[test]
    fn test_rejects_negative_size_base() {
        assert!(rejects(r#"{ "forces": { "size_base": -0.5 } }"#));
    }

    #[test]
    fn test_rejects_negative_size_gain() {
        assert!(rejects(r#"{ "forces": { "size_gain": -2.0 } }"#));
    }

    #[test]
    fn test_rejects_opacity_base_below_floor() {
        assert!(rejects(r#"{ "forces": { "opacity_base": -2.0 } }"#));
        assert!(rejects(r#"{ "forces": { "opacity_base": 0.1 } }"#));
    }

    #[test]
    fn test_rejects_opacity_gain_past_one() {
        assert!(rejects(r#"{ "forces": { "opacity_gain": 0.8 } }"#));
        assert!(rejects(r#"{ "forces": { "opacity_gain": -0.1 } }"#));
    }

    #[test]
    fn test_accepts_tighter_opacity_band() {
        let json = r#"{
            "forces": { "opacity_floor": 0.1, "opacity_base": 0.1, "opacity_gain": 0.9 }
        }"#;
        assert!(FieldConfig::from_json(json).is_ok());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let result = FieldConfig::from_json("{ not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("particle-field-{}.json", std::process::id()));
        let mut config = FieldConfig::default();
        config.style.link_distance = 80.0;

        config.save(&path).unwrap();
        let loaded = FieldConfig::load(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, config);
    }
}
