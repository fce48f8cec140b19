//! Runtime configuration loaded from `assets/collision.toml`.
//!
//! [`SimConfig`] is a Bevy [`Resource`] that mirrors the tunable constants in
//! [`crate::constants`].  At startup, [`load_sim_config`] reads
//! `assets/collision.toml` and overwrites the defaults with any values present
//! in the file.  Missing keys fall back to the compile-time defaults, so a
//! minimal TOML can override just the values you care about:
//!
//! ```toml
//! velocity_scale = 30.0
//! collision_cooldown_secs = 0.1
//! ```
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `SimConfig::default()`.

use crate::constants::*;
use crate::error::{validate_non_negative, validate_positive, SimError, SimResult};
use bevy::prelude::*;
use serde::Deserialize;

pub const CONFIG_PATH: &str = "assets/collision.toml";

/// Runtime-tunable physics and input-form configuration.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // ── Physics ───────────────────────────────────────────────────────────────
    pub velocity_scale: f32,
    pub body_radius: f32,
    pub collision_cooldown_secs: f32,
    pub physics_hz: f32,
    pub body1_start_x: f32,
    pub body2_start_x: f32,

    // ── Input form ────────────────────────────────────────────────────────────
    pub caret_blink_secs: f32,
    pub form_redraw_hz: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            velocity_scale: VELOCITY_SCALE,
            body_radius: BODY_RADIUS,
            collision_cooldown_secs: COLLISION_COOLDOWN_SECS,
            physics_hz: PHYSICS_HZ,
            body1_start_x: BODY1_START_X,
            body2_start_x: BODY2_START_X,
            caret_blink_secs: CARET_BLINK_SECS,
            form_redraw_hz: FORM_REDRAW_HZ,
        }
    }
}

impl SimConfig {
    /// Check every value the simulation divides by or steps with.
    pub fn validate(&self) -> SimResult<()> {
        validate_positive("velocity_scale", self.velocity_scale)?;
        validate_positive("body_radius", self.body_radius)?;
        validate_non_negative("collision_cooldown_secs", self.collision_cooldown_secs)?;
        validate_positive("physics_hz", self.physics_hz)?;
        validate_positive("caret_blink_secs", self.caret_blink_secs)?;
        validate_positive("form_redraw_hz", self.form_redraw_hz)?;
        for (name, x) in [
            ("body1_start_x", self.body1_start_x),
            ("body2_start_x", self.body2_start_x),
        ] {
            if !(x.is_finite() && x >= 0.0 && x <= ARENA_WIDTH) {
                return Err(SimError::UnsafeConstant {
                    name,
                    value: x,
                    safe_range: "[0.0, 800.0]",
                });
            }
        }
        Ok(())
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> SimResult<Self> {
        let config: SimConfig = toml::from_str(contents).map_err(|e| SimError::ConfigParse {
            path: CONFIG_PATH.to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }
}

/// Startup system: attempt to load `assets/collision.toml` and overwrite the
/// `SimConfig` resource with any values present in the file.
///
/// A missing file is silently ignored (defaults are already in place from
/// `insert_resource`).  Parse or validation errors are logged and the
/// defaults are kept.  The fixed physics timestep is set from the final
/// `physics_hz` either way.
pub fn load_sim_config(mut config: ResMut<SimConfig>, mut fixed: ResMut<Time<Fixed>>) {
    match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => match SimConfig::from_toml_str(&contents) {
            Ok(loaded) => {
                *config = loaded;
                info!("Loaded simulation config from {CONFIG_PATH}");
            }
            Err(e) => {
                warn!("{e}; using defaults");
            }
        },
        Err(_) => {
            info!("No {CONFIG_PATH} found; using compiled defaults");
        }
    }
    fixed.set_timestep_hz(config.physics_hz as f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let cfg = SimConfig::from_toml_str("velocity_scale = 30.0\n").expect("valid toml");
        assert_eq!(cfg.velocity_scale, 30.0);
        assert_eq!(cfg.body_radius, BODY_RADIUS);
        assert_eq!(cfg.collision_cooldown_secs, COLLISION_COOLDOWN_SECS);
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(SimConfig::from_toml_str("").unwrap(), SimConfig::default());
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = SimConfig::from_toml_str("velocity_scale = \"fast\"").unwrap_err();
        assert!(matches!(err, SimError::ConfigParse { .. }), "{err:?}");
    }

    #[test]
    fn zero_scale_fails_validation() {
        let err = SimConfig::from_toml_str("velocity_scale = 0.0").unwrap_err();
        assert!(
            matches!(
                err,
                SimError::UnsafeConstant {
                    name: "velocity_scale",
                    ..
                }
            ),
            "{err:?}"
        );
    }

    #[test]
    fn start_position_outside_arena_fails_validation() {
        assert!(SimConfig::from_toml_str("body2_start_x = 900.0").is_err());
    }
}
