//! Configuration types for loading scenes from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scene. A scene consists of:
//!
//! - [`SettingsConfig`] – numerical settings, every field optional
//! - [`BodyConfig`]     – initial state for each body
//! - [`SceneConfig`]    – top-level wrapper used to load a scene from YAML
//!
//! # YAML format
//! An example scene YAML matching these types:
//!
//! ```yaml
//! settings:
//!   g: 6.674e-11          # gravitational constant
//!   d_mul_mil_km: 150     # million km per distance unit
//!   d_mul_px: 1000        # px per distance unit
//!   d_min: 1.0e9          # separation floor, m
//!   a_lim: 1.0            # acceleration cap, m/s^2
//!   time_step_hr: 24      # simulated hours ...
//!   time_step_sec: 1      # ... per real second
//!   render_ceil: false
//!
//! bodies:
//!   - x: 0.0
//!     y: 0.0
//!     mass: 1.989e30
//!     size: 8
//!     color: "#ffd27f"
//!     id: "Sun"
//!   - x: 997.0
//!     y: 0.0
//!     mass: 5.972e24
//!     vy: 29780.0         # physical units, m/s
//!     id: "Earth"
//! ```
//!
//! Settings parsing is deliberately lenient, mirroring the form behavior of
//! the interactive frontend: a missing or non-numeric value is never
//! rejected, it silently falls back to the documented default. Body fields
//! other than position and mass have defaults as well.

use serde::{Deserialize, Deserializer};
use serde_yaml::Value;

use crate::simulation::params::{self, Settings};

/// Accept a number or a number-like string; anything else falls back.
fn lenient_f64<'de, D>(de: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(de)?;
    Ok(match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Accept a bool or a bool-like string; anything else falls back.
fn lenient_bool<'de, D>(de: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(de)?;
    Ok(match v {
        Value::Bool(b) => Some(b),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// User-facing numerical settings; every field optional.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct SettingsConfig {
    #[serde(deserialize_with = "lenient_f64")]
    pub g: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub d_mul_mil_km: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub d_mul_px: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub d_min: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub a_lim: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub time_step_hr: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub time_step_sec: Option<f64>,
    #[serde(deserialize_with = "lenient_bool")]
    pub render_ceil: Option<bool>,
}

impl SettingsConfig {
    /// Runtime settings with every unset field at its documented default.
    pub fn into_settings(self) -> Settings {
        Settings {
            g: self.g.unwrap_or(params::DEFAULT_G),
            d_mul_mil_km: self.d_mul_mil_km.unwrap_or(params::DEFAULT_D_MUL_MIL_KM),
            d_mul_px: self.d_mul_px.unwrap_or(params::DEFAULT_D_MUL_PX),
            d_min: self.d_min.unwrap_or(params::DEFAULT_D_MIN),
            a_lim: self.a_lim.unwrap_or(params::DEFAULT_A_LIM),
            time_step_hr: self.time_step_hr.unwrap_or(params::DEFAULT_TIME_STEP_HR),
            time_step_sec: self.time_step_sec.unwrap_or(params::DEFAULT_TIME_STEP_SEC),
            render_ceil: self.render_ceil.unwrap_or(params::DEFAULT_RENDER_CEIL),
        }
    }
}

/// Configuration for a single body's initial state.
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: f64, // initial position, px
    pub y: f64,
    pub mass: f64, // mass of the body
    #[serde(default = "default_size")]
    pub size: f64, // drawn square edge, px
    #[serde(default = "default_color")]
    pub color: String, // hex color
    #[serde(default)]
    pub vx: f64, // initial velocity, physical units
    #[serde(default)]
    pub vy: f64,
    #[serde(default)]
    pub id: Option<String>, // optional label
}

fn default_size() -> f64 {
    4.0
}

fn default_color() -> String {
    "#ffffff".to_owned()
}

/// Top-level scene configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct SceneConfig {
    pub settings: SettingsConfig, // numerical settings, all optional
    pub bodies: Vec<BodyConfig>, // initial body list, may be empty
}
