//! Pulley Calc - rope-and-pulley force calculator
//!
//! Core modules:
//! - `engine`: Pure geometry/force calculations (slopes, forces, axle load)
//! - `format`: Number formatting and result text
//! - `diagram`: SVG-space layout of the pulley diagram
//! - `interaction`: Input and drag state machine driving the configuration
//! - `settings`: Diagram constants as a serde value

pub mod diagram;
pub mod engine;
pub mod error;
pub mod format;
pub mod interaction;
pub mod settings;

pub use engine::{
    AngleUnit, CalculationResult, Configuration, ContactMode, Endpoint, Slope, WrapDirection,
    calculate,
};
pub use error::PulleyError;
pub use format::{ResultText, format_number};
pub use settings::Settings;

use glam::DVec2;

/// Calculator constants
pub mod consts {
    /// Below this |cos| the rope line is treated as vertical
    pub const VERTICAL_EPSILON: f64 = 1e-10;
    /// Below this magnitude numbers display as "0"
    pub const ZERO_EPSILON: f64 = 1e-10;
    /// Decimal places shown in results
    pub const DISPLAY_DECIMALS: usize = 4;

    /// Diagram view box (square, SVG user units)
    pub const VIEWBOX_SIZE: f64 = 400.0;
    pub const PULLEY_CENTER_X: f64 = 200.0;
    pub const PULLEY_CENTER_Y: f64 = 200.0;
    pub const PULLEY_RADIUS: f64 = 80.0;
    /// Length of the free rope segments drawn outside the pulley
    pub const ROPE_EXTENSION: f64 = 60.0;
    /// Display length per Newton for force arrows
    pub const FORCE_SCALE: f64 = 3.0;
    /// Slope labels sit this far above their segment midpoint
    pub const SLOPE_LABEL_LIFT: f64 = 10.0;
    /// Contact angle label sits this far inside the rim
    pub const ANGLE_LABEL_INSET: f64 = 25.0;

    /// Defaults for a fresh configuration
    pub const DEFAULT_TENSION: f64 = 10.0;
    pub const DEFAULT_THETA1_DEG: f64 = 180.0;
    pub const DEFAULT_THETA2_DEG: f64 = 270.0;
}

/// Normalized angle to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    use std::f64::consts::TAU;
    if !angle.is_finite() {
        return angle;
    }
    let r = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negatives up to exactly TAU
    if r >= TAU { 0.0 } else { r }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64) -> DVec2 {
    DVec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: DVec2) -> (f64, f64) {
    (pos.length(), pos.y.atan2(pos.x))
}
