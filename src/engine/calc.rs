//! Configuration and the full recompute pass
//!
//! A `CalculationResult` is never updated in place: every change to the
//! configuration produces a fresh one from `calculate`.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::geometry::{
    ContactMode, Endpoint, Slope, WrapDirection, axle_force, force, slope, wrapped_contact_angle,
};
use super::units::Angle;
use crate::consts::*;

/// User-controlled inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    /// Rope tension in Newtons (sign is not constrained)
    pub tension: f64,
    /// Contact point 1 (start of the wrap)
    pub theta1: Angle,
    /// Contact point 2 (end of the wrap)
    pub theta2: Angle,
    pub wrap_direction: WrapDirection,
    pub contact_mode: ContactMode,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            tension: DEFAULT_TENSION,
            theta1: Angle::degrees(DEFAULT_THETA1_DEG),
            theta2: Angle::degrees(DEFAULT_THETA2_DEG),
            wrap_direction: WrapDirection::CounterClockwise,
            contact_mode: ContactMode::Tangential,
        }
    }
}

/// Everything derived from a `Configuration`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub theta1_rad: f64,
    pub theta2_rad: f64,
    pub slope1: Slope,
    pub slope2: Slope,
    /// Force of rope segment 1 on the pulley (outward along the rope)
    pub force1: DVec2,
    /// Force of rope segment 2 on the pulley (outward along the rope)
    pub force2: DVec2,
    pub axle_force: DVec2,
    pub axle_force_magnitude: f64,
    /// Direction of the axle force in degrees, (-180, 180]
    pub axle_force_angle: f64,
    /// Wrapped angle in radians, [0, 2π)
    pub contact_angle: f64,
}

impl CalculationResult {
    /// Pull of rope end 1 on the hand holding it
    pub fn hand_force1(&self) -> DVec2 {
        -self.force1
    }

    /// Pull of rope end 2 on the hand holding it
    pub fn hand_force2(&self) -> DVec2 {
        -self.force2
    }

    pub fn contact_angle_degrees(&self) -> f64 {
        self.contact_angle.to_degrees()
    }
}

/// atan2 in degrees, with the zero vector (either sign of zero) pointing at 0°
fn direction_degrees(v: DVec2) -> f64 {
    if v == DVec2::ZERO {
        0.0
    } else {
        v.y.atan2(v.x).to_degrees()
    }
}

/// Recompute every derived quantity for a configuration
pub fn calculate(config: &Configuration) -> CalculationResult {
    let theta1_rad = config.theta1.radians();
    let theta2_rad = config.theta2.radians();
    let wrap = config.wrap_direction;
    let mode = config.contact_mode;

    let force1 = force(config.tension, theta1_rad, wrap, Endpoint::Start, mode);
    let force2 = force(config.tension, theta2_rad, wrap, Endpoint::End, mode);
    let axle = axle_force(force1, force2);

    let result = CalculationResult {
        theta1_rad,
        theta2_rad,
        slope1: slope(theta1_rad, wrap, Endpoint::Start, mode),
        slope2: slope(theta2_rad, wrap, Endpoint::End, mode),
        force1,
        force2,
        axle_force: axle,
        axle_force_magnitude: axle.length(),
        axle_force_angle: direction_degrees(axle),
        contact_angle: wrapped_contact_angle(theta1_rad, theta2_rad, wrap),
    };

    log::debug!(
        "recomputed: tension={} theta1={} theta2={} axle=({}, {})",
        config.tension,
        theta1_rad,
        theta2_rad,
        axle.x,
        axle.y
    );

    result
}
