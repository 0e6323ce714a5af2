//! Tunable constants, grouped per view.
//!
//! Every field has a default, so an empty JSON object (or a partial one coming
//! from the web layer) yields a complete configuration.

use serde::Deserialize;

use crate::error::DataError;
use crate::extensions::easing::Easing;

/// Seed used when the host does not provide one.
pub const DEFAULT_SEED: u64 = 42;

/// Top-level configuration for the whole application.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sandbox: SandboxConfig,
    pub playback: PlaybackConfig,
    pub orbits: OrbitConfig,
    pub builder: BuilderConfig,
}

impl AppConfig {
    /// Parse a (possibly partial) configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Molecule sandbox bonding rules.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// Two unbonded atoms closer than this may bond.
    pub bond_threshold: f32,
    /// Distance a freshly bonded atom is snapped to.
    pub ideal_bond_length: f32,
    /// Width of the spawn window around the origin on x and y.
    pub spawn_jitter: f32,
    /// Seconds a discovery notification stays visible.
    pub notification_secs: f32,
    /// RNG seed for spawn jitter. `None` falls back to [`DEFAULT_SEED`].
    pub seed: Option<u64>,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            bond_threshold: 1.5,
            ideal_bond_length: 1.0,
            spawn_jitter: 0.5,
            notification_secs: 3.0,
            seed: None,
        }
    }
}

impl SandboxConfig {
    pub fn seed_or_default(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }
}

/// Reaction lab playback.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Seconds between automatic stage advances.
    pub stage_interval: f32,
    /// Seconds the renderer spends easing from one stage to the next.
    pub transition_duration: f32,
    pub easing: Easing,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            stage_interval: 1.5,
            transition_duration: 1.0,
            easing: Easing::CubicInOut,
        }
    }
}

/// Electron orbit layout for the atom explorer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    /// First shell radius as a multiple of the nucleus radius.
    pub shell_factor: f32,
    /// Radius added per additional shell.
    pub shell_gap: f32,
    /// Upper bound of the random radius offset per electron.
    pub radius_jitter: f32,
    /// Angular speed of the innermost shell (radians per second).
    pub base_speed: f32,
    /// Speed lost per shell outward.
    pub speed_falloff: f32,
    /// Vertical wobble amplitude as a fraction of the orbit radius.
    pub wobble: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            shell_factor: 1.5,
            shell_gap: 0.5,
            radius_jitter: 0.2,
            base_speed: 2.0,
            speed_falloff: 0.2,
            wobble: 0.3,
        }
    }
}

/// Particle atom builder layout.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Nucleus radius per cube root of nucleon count.
    pub nucleon_scale: f32,
    pub electron_base_radius: f32,
    pub electron_shell_gap: f32,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            nucleon_scale: 0.4,
            electron_base_radius: 2.0,
            electron_shell_gap: 1.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = AppConfig::from_json("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.sandbox.bond_threshold, 1.5);
        assert_eq!(config.playback.stage_interval, 1.5);
        assert_eq!(config.sandbox.seed_or_default(), DEFAULT_SEED);
    }

    #[test]
    fn partial_override() {
        let json = r#"{
            "sandbox": { "bond_threshold": 2.0, "seed": 7 },
            "playback": { "easing": "linear" }
        }"#;
        let config = AppConfig::from_json(json).unwrap();
        assert_eq!(config.sandbox.bond_threshold, 2.0);
        assert_eq!(config.sandbox.ideal_bond_length, 1.0);
        assert_eq!(config.sandbox.seed_or_default(), 7);
        assert_eq!(config.playback.easing, Easing::Linear);
        assert_eq!(config.playback.transition_duration, 1.0);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(AppConfig::from_json("{ \"sandbox\": 3 }").is_err());
    }
}
