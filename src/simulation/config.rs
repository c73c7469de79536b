//! Tunable simulation parameters

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Lowest allowed fry timer in seconds
pub const FRY_TIMER_MIN: u32 = 1;
/// Highest allowed fry timer in seconds
pub const FRY_TIMER_MAX: u32 = 600;
/// Increment used by the timer adjuster
pub const FRY_TIMER_STEP: u32 = 15;
/// Fry timer used when the bundle has no DEEP_FRY duration
pub const FRY_TIMER_DEFAULT: u32 = 180;

/// Simulation configuration
///
/// Every field has a default so a config file only needs the values it
/// overrides.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Temperature an idle wok cools back down to
    pub ambient_temperature: f32,
    /// Degrees per second gained while cooking
    pub wok_heat_rate: f32,
    /// Degrees per second lost while idle
    pub wok_cool_rate: f32,
    /// Temperature at which a cooking wok starts overheating
    pub overheat_threshold: f32,
    /// Seconds of continuous overheating before the food burns
    pub burn_after_overheat_secs: f32,
    /// Degrees removed by an ADD_WATER action
    pub water_cooling: f32,
    /// Seconds an action runs when its step names no duration
    pub default_action_secs: u32,
    /// Seconds a done basket may stay in the oil before burning
    pub fryer_grace_secs: f32,
    /// Points awarded for each served plate
    pub score_per_serve: i32,
    /// Points removed per penalty unit
    pub score_per_mistake: i32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            ambient_temperature: 25.0,
            wok_heat_rate: 30.0,
            wok_cool_rate: 15.0,
            overheat_threshold: 360.0,
            burn_after_overheat_secs: 10.0,
            water_cooling: 120.0,
            default_action_secs: 5,
            fryer_grace_secs: 30.0,
            score_per_serve: 100,
            score_per_mistake: 10,
        }
    }
}

impl SimConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid simulation config")
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_json_str(&text)
    }
}

/// Clamp a requested fry time into the allowed range
pub fn clamp_fry_timer(secs: u32) -> u32 {
    secs.clamp(FRY_TIMER_MIN, FRY_TIMER_MAX)
}
