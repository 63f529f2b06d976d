//! Rope geometry and forces at the two contact points
//!
//! Angles are in radians in the math frame (0 = right, counter-clockwise
//! positive, y up). The rope leaves the pulley at contact point 1 (the start
//! point) and at contact point 2 (the end point).

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

use crate::consts::VERTICAL_EPSILON;
use crate::normalize_angle;

/// Direction the rope wraps from point 1 to point 2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WrapDirection {
    #[default]
    #[serde(rename = "ccw")]
    CounterClockwise,
    #[serde(rename = "cw")]
    Clockwise,
}

impl WrapDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            WrapDirection::CounterClockwise => "ccw",
            WrapDirection::Clockwise => "cw",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "ccw" | "counter-clockwise" | "counterclockwise" => {
                Some(WrapDirection::CounterClockwise)
            }
            "cw" | "clockwise" => Some(WrapDirection::Clockwise),
            _ => None,
        }
    }
}

/// How the free rope leaves the contact point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContactMode {
    /// Rope leaves radially outward
    Perpendicular,
    /// Rope leaves along the tangent, away from the wrapped portion
    #[default]
    Tangential,
}

impl ContactMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactMode::Perpendicular => "perpendicular",
            ContactMode::Tangential => "tangential",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "perpendicular" | "radial" => Some(ContactMode::Perpendicular),
            "tangential" | "tangent" => Some(ContactMode::Tangential),
            _ => None,
        }
    }
}

/// Which end of the wrap a contact point is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Endpoint {
    Start,
    End,
}

/// Slope of a rope segment line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Slope {
    Defined(f64),
    /// The line is vertical; the slope is infinite
    Vertical,
}

impl Slope {
    pub fn value(&self) -> Option<f64> {
        match self {
            Slope::Defined(m) => Some(*m),
            Slope::Vertical => None,
        }
    }

    pub fn is_vertical(&self) -> bool {
        matches!(self, Slope::Vertical)
    }
}

/// Direction the free rope segment extends from a contact point.
///
/// This is also the direction of the force that segment exerts on the pulley.
pub fn effective_angle(
    contact_angle: f64,
    wrap: WrapDirection,
    endpoint: Endpoint,
    mode: ContactMode,
) -> f64 {
    match mode {
        ContactMode::Perpendicular => contact_angle,
        ContactMode::Tangential => {
            let turn = match (wrap, endpoint) {
                (WrapDirection::CounterClockwise, Endpoint::Start) => -FRAC_PI_2,
                (WrapDirection::CounterClockwise, Endpoint::End) => FRAC_PI_2,
                (WrapDirection::Clockwise, Endpoint::Start) => FRAC_PI_2,
                (WrapDirection::Clockwise, Endpoint::End) => -FRAC_PI_2,
            };
            contact_angle + turn
        }
    }
}

/// Slope of the rope segment leaving `contact_angle`
pub fn slope(
    contact_angle: f64,
    wrap: WrapDirection,
    endpoint: Endpoint,
    mode: ContactMode,
) -> Slope {
    let angle = effective_angle(contact_angle, wrap, endpoint, mode);
    if angle.cos().abs() < VERTICAL_EPSILON {
        Slope::Vertical
    } else {
        Slope::Defined(angle.tan())
    }
}

/// Force the rope segment exerts on the pulley at a contact point.
///
/// Points outward along the segment. The pull felt by a hand holding the rope
/// end is the negation.
pub fn force(
    tension: f64,
    contact_angle: f64,
    wrap: WrapDirection,
    endpoint: Endpoint,
    mode: ContactMode,
) -> DVec2 {
    let angle = effective_angle(contact_angle, wrap, endpoint, mode);
    DVec2::new(tension * angle.cos(), tension * angle.sin())
}

/// Angular extent of pulley surface covered by the rope, in [0, 2π)
pub fn wrapped_contact_angle(theta1: f64, theta2: f64, wrap: WrapDirection) -> f64 {
    let delta = match wrap {
        WrapDirection::CounterClockwise => theta2 - theta1,
        WrapDirection::Clockwise => theta1 - theta2,
    };
    normalize_angle(delta)
}

/// Net force on the axle: the vector sum of both rope forces
#[inline]
pub fn axle_force(force1: DVec2, force2: DVec2) -> DVec2 {
    force1 + force2
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::{PI, TAU};

    const EPS: f64 = 1e-9;

    fn approx(a: DVec2, b: DVec2) -> bool {
        (a - b).length() < EPS
    }

    #[test]
    fn test_perpendicular_ignores_wrap_and_endpoint() {
        for wrap in [WrapDirection::CounterClockwise, WrapDirection::Clockwise] {
            for endpoint in [Endpoint::Start, Endpoint::End] {
                let a = effective_angle(1.0, wrap, endpoint, ContactMode::Perpendicular);
                assert_eq!(a, 1.0);
            }
        }
    }

    #[test]
    fn test_tangential_rotation_signs() {
        let ccw = WrapDirection::CounterClockwise;
        let cw = WrapDirection::Clockwise;
        let t = ContactMode::Tangential;
        assert!((effective_angle(PI, ccw, Endpoint::Start, t) - PI / 2.0).abs() < EPS);
        assert!((effective_angle(PI, ccw, Endpoint::End, t) - 1.5 * PI).abs() < EPS);
        assert!((effective_angle(PI, cw, Endpoint::Start, t) - 1.5 * PI).abs() < EPS);
        assert!((effective_angle(PI, cw, Endpoint::End, t) - PI / 2.0).abs() < EPS);
    }

    #[test]
    fn test_slope_vertical_and_zero() {
        let ccw = WrapDirection::CounterClockwise;
        let p = ContactMode::Perpendicular;
        assert_eq!(slope(PI / 2.0, ccw, Endpoint::Start, p), Slope::Vertical);
        assert_eq!(slope(0.0, ccw, Endpoint::Start, p), Slope::Defined(0.0));
        assert!(slope(-PI / 2.0, ccw, Endpoint::Start, p).is_vertical());

        let m = slope(PI / 4.0, ccw, Endpoint::Start, p).value().unwrap();
        assert!((m - 1.0).abs() < EPS);
    }

    #[test]
    fn test_slope_tangential_at_bottom_is_horizontal() {
        // Rope leaving the bottom of the pulley tangentially runs horizontally
        let s = slope(
            1.5 * PI,
            WrapDirection::CounterClockwise,
            Endpoint::End,
            ContactMode::Tangential,
        );
        assert!(s.value().unwrap().abs() < EPS);
    }

    #[test]
    fn test_force_known_values() {
        let ccw = WrapDirection::CounterClockwise;
        let p = ContactMode::Perpendicular;
        assert!(approx(force(10.0, 0.0, ccw, Endpoint::Start, p), DVec2::new(10.0, 0.0)));
        assert!(approx(
            force(10.0, PI / 2.0, ccw, Endpoint::Start, p),
            DVec2::new(0.0, 10.0)
        ));
        // Negative tension flips the vector
        assert!(approx(force(-5.0, 0.0, ccw, Endpoint::End, p), DVec2::new(-5.0, 0.0)));
    }

    #[test]
    fn test_wrapped_contact_angle_directions() {
        let a = wrapped_contact_angle(PI, 1.5 * PI, WrapDirection::CounterClockwise);
        assert!((a - PI / 2.0).abs() < EPS);
        let b = wrapped_contact_angle(PI, 1.5 * PI, WrapDirection::Clockwise);
        assert!((b - 1.5 * PI).abs() < EPS);
        assert_eq!(wrapped_contact_angle(1.0, 1.0, WrapDirection::Clockwise), 0.0);
    }

    #[test]
    fn test_direction_and_mode_from_str() {
        assert_eq!(WrapDirection::from_str("cw"), Some(WrapDirection::Clockwise));
        assert_eq!(
            WrapDirection::from_str("CCW"),
            Some(WrapDirection::CounterClockwise)
        );
        assert_eq!(WrapDirection::from_str("up"), None);
        assert_eq!(
            ContactMode::from_str("tangential"),
            Some(ContactMode::Tangential)
        );
        assert_eq!(
            ContactMode::from_str(ContactMode::Perpendicular.as_str()),
            Some(ContactMode::Perpendicular)
        );
    }

    proptest! {
        #[test]
        fn prop_wrapped_contact_angle_in_range(
            t1 in -100.0f64..100.0,
            t2 in -100.0f64..100.0,
            cw in any::<bool>(),
        ) {
            let wrap = if cw { WrapDirection::Clockwise } else { WrapDirection::CounterClockwise };
            let a = wrapped_contact_angle(t1, t2, wrap);
            prop_assert!((0.0..TAU).contains(&a));
        }

        #[test]
        fn prop_force_magnitude_is_tension(
            tension in -1e3f64..1e3,
            theta in -10.0f64..10.0,
            tangential in any::<bool>(),
        ) {
            let mode = if tangential { ContactMode::Tangential } else { ContactMode::Perpendicular };
            let f = force(tension, theta, WrapDirection::Clockwise, Endpoint::End, mode);
            prop_assert!((f.length() - tension.abs()).abs() < 1e-9 * tension.abs().max(1.0));
        }

        #[test]
        fn prop_slope_vertical_iff_cos_near_zero(theta in -10.0f64..10.0) {
            let s = slope(theta, WrapDirection::CounterClockwise, Endpoint::Start, ContactMode::Perpendicular);
            prop_assert_eq!(s.is_vertical(), theta.cos().abs() < VERTICAL_EPSILON);
        }
    }
}
