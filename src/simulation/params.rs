//! Numerical and physical settings for the simulation
//!
//! `Settings` holds the runtime configuration:
//! - gravitational constant (`g`),
//! - distance-scale factors and the minimum-separation floor,
//! - acceleration cap (`a_lim`),
//! - time-step ratio and the render rounding flag
//!
//! The whole struct is replaced at once when the user applies new values;
//! missing form values fall back to the defaults below.

pub const DEFAULT_G: f64 = 6.674e-11; // gravitational constant, SI
pub const DEFAULT_D_MUL_MIL_KM: f64 = 150.0; // million km per distance unit
pub const DEFAULT_D_MUL_PX: f64 = 1000.0; // px per distance unit
pub const DEFAULT_D_MIN: f64 = 1.0e9; // separation floor, m
pub const DEFAULT_A_LIM: f64 = 1.0; // acceleration cap, m/s^2
pub const DEFAULT_TIME_STEP_HR: f64 = 1.0; // simulated hours ...
pub const DEFAULT_TIME_STEP_SEC: f64 = 1.0; // ... per real second
pub const DEFAULT_RENDER_CEIL: bool = false;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub g: f64, // gravitational constant
    pub d_mul_mil_km: f64, // distance-scale factor, million km side
    pub d_mul_px: f64, // distance-scale factor, pixel side
    pub d_min: f64, // floor on physical separation
    pub a_lim: f64, // cap on net acceleration magnitude
    pub time_step_hr: f64, // simulated hours per tick unit
    pub time_step_sec: f64, // real seconds per tick unit
    pub render_ceil: bool, // round drawn rects up
}

impl Settings {
    /// Physical length units per pixel of display space.
    pub fn distance_ratio(&self) -> f64 {
        self.d_mul_mil_km * 1.0e9 / self.d_mul_px
    }

    /// Simulated seconds per real elapsed second.
    pub fn time_ratio(&self) -> f64 {
        self.time_step_hr * 3600.0 / self.time_step_sec
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            g: DEFAULT_G,
            d_mul_mil_km: DEFAULT_D_MUL_MIL_KM,
            d_mul_px: DEFAULT_D_MUL_PX,
            d_min: DEFAULT_D_MIN,
            a_lim: DEFAULT_A_LIM,
            time_step_hr: DEFAULT_TIME_STEP_HR,
            time_step_sec: DEFAULT_TIME_STEP_SEC,
            render_ceil: DEFAULT_RENDER_CEIL,
        }
    }
}
