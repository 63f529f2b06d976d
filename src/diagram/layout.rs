//! Diagram geometry in the SVG frame

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::engine::{CalculationResult, Configuration, Endpoint, WrapDirection, effective_angle};
use crate::format::format_number;
use crate::polar_to_cartesian;
use crate::settings::Settings;

/// A straight line between two SVG points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: DVec2,
    pub to: DVec2,
}

impl Segment {
    pub fn new(from: DVec2, to: DVec2) -> Self {
        Self { from, to }
    }

    #[inline]
    pub fn midpoint(&self) -> DVec2 {
        (self.from + self.to) / 2.0
    }

    #[inline]
    pub fn length(&self) -> f64 {
        (self.to - self.from).length()
    }
}

/// Circular arc of rope lying on the pulley
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcPath {
    pub from: DVec2,
    pub to: DVec2,
    pub radius: f64,
    pub large_arc: bool,
    /// SVG sweep flag (1 = clockwise on screen)
    pub sweep: bool,
}

impl ArcPath {
    /// SVG path data: `M x1 y1 A r r 0 large sweep x2 y2`
    pub fn path_data(&self) -> String {
        format!(
            "M {} {} A {} {} 0 {} {} {} {}",
            self.from.x,
            self.from.y,
            self.radius,
            self.radius,
            self.large_arc as u8,
            self.sweep as u8,
            self.to.x,
            self.to.y
        )
    }
}

/// Positioned text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub pos: DVec2,
    pub text: String,
}

/// Everything needed to draw one frame of the diagram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    pub center: DVec2,
    pub pulley_radius: f64,
    pub contact1: DVec2,
    pub contact2: DVec2,
    /// Free rope from contact point 1 outward
    pub rope1: Segment,
    /// Free rope from contact point 2 outward
    pub rope2: Segment,
    pub arc: ArcPath,
    /// Pull on hand 1, drawn from the rope end
    pub force1: Segment,
    /// Pull on hand 2, drawn from the rope end
    pub force2: Segment,
    /// Net axle force, drawn from the pulley center
    pub axle_force: Segment,
    pub slope1_label: Label,
    pub slope2_label: Label,
    pub angle_label: Label,
}

/// Math-frame offset from the pulley center to an SVG point
#[inline]
pub fn to_screen(settings: &Settings, offset: DVec2) -> DVec2 {
    DVec2::new(settings.center.x + offset.x, settings.center.y - offset.y)
}

/// SVG point to a math-frame offset from the pulley center
#[inline]
pub fn from_screen(settings: &Settings, point: DVec2) -> DVec2 {
    DVec2::new(point.x - settings.center.x, settings.center.y - point.y)
}

/// Point on the pulley rim at `theta`, in the SVG frame
pub fn rim_point(settings: &Settings, theta: f64) -> DVec2 {
    to_screen(settings, polar_to_cartesian(settings.pulley_radius, theta))
}

/// Draw a math-frame vector starting at an SVG point
fn arrow(settings: &Settings, start: DVec2, vector: DVec2) -> Segment {
    let tip = start + DVec2::new(vector.x, -vector.y) * settings.force_scale;
    Segment::new(start, tip)
}

impl Diagram {
    pub fn layout(config: &Configuration, result: &CalculationResult, settings: &Settings) -> Self {
        let wrap = config.wrap_direction;
        let mode = config.contact_mode;

        let rope = |theta: f64, endpoint: Endpoint| {
            let contact = rim_point(settings, theta);
            let direction = effective_angle(theta, wrap, endpoint, mode);
            let end = contact
                + DVec2::new(direction.cos(), -direction.sin()) * settings.rope_extension;
            Segment::new(contact, end)
        };

        let rope1 = rope(result.theta1_rad, Endpoint::Start);
        let rope2 = rope(result.theta2_rad, Endpoint::End);

        let arc = ArcPath {
            from: rope1.from,
            to: rope2.from,
            radius: settings.pulley_radius,
            large_arc: result.contact_angle > PI,
            // The y flip mirrors the sweep direction
            sweep: wrap == WrapDirection::Clockwise,
        };

        let force1 = arrow(settings, rope1.to, result.hand_force1());
        let force2 = arrow(settings, rope2.to, result.hand_force2());
        let axle_force = arrow(settings, settings.center, result.axle_force);

        let lift = DVec2::new(0.0, settings.slope_label_lift);
        let slope1_label = Label {
            pos: rope1.midpoint() - lift,
            text: format!("m₁={}", result.slope1),
        };
        let slope2_label = Label {
            pos: rope2.midpoint() - lift,
            text: format!("m₂={}", result.slope2),
        };

        let mid_angle = (result.theta1_rad + result.theta2_rad) / 2.0;
        let angle_label = Label {
            pos: to_screen(
                settings,
                polar_to_cartesian(settings.pulley_radius - settings.angle_label_inset, mid_angle),
            ),
            text: format!("{}°", format_number(result.contact_angle_degrees())),
        };

        Self {
            center: settings.center,
            pulley_radius: settings.pulley_radius,
            contact1: rope1.from,
            contact2: rope2.from,
            rope1,
            rope2,
            arc,
            force1,
            force2,
            axle_force,
            slope1_label,
            slope2_label,
            angle_label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Angle, ContactMode, calculate};

    const EPS: f64 = 1e-9;

    fn close(a: DVec2, b: DVec2) -> bool {
        (a - b).length() < EPS
    }

    fn default_diagram() -> Diagram {
        let config = Configuration::default();
        Diagram::layout(&config, &calculate(&config), &Settings::default())
    }

    #[test]
    fn test_screen_frame_roundtrip() {
        let s = Settings::default();
        let p = DVec2::new(30.0, -12.5);
        assert!(close(from_screen(&s, to_screen(&s, p)), p));
        // Up in the math frame is up on screen (smaller y)
        assert!(to_screen(&s, DVec2::new(0.0, 10.0)).y < s.center.y);
    }

    #[test]
    fn test_default_contact_points_and_ropes() {
        let d = default_diagram();
        // 180° is the left of the rim, 270° the bottom
        assert!(close(d.contact1, DVec2::new(120.0, 200.0)));
        assert!(close(d.contact2, DVec2::new(200.0, 280.0)));
        // Rope 1 runs straight up, rope 2 runs right
        assert!(close(d.rope1.to, DVec2::new(120.0, 140.0)));
        assert!(close(d.rope2.to, DVec2::new(260.0, 280.0)));
        assert!((d.rope1.length() - 60.0).abs() < EPS);
    }

    #[test]
    fn test_default_force_arrows() {
        let d = default_diagram();
        // Hand forces point back toward the pulley, 10 N * 3
        assert!(close(d.force1.to, DVec2::new(120.0, 170.0)));
        assert!(close(d.force2.to, DVec2::new(230.0, 280.0)));
        // Axle force (10, 10) points up and right
        assert!(close(d.axle_force.to, DVec2::new(230.0, 170.0)));
    }

    #[test]
    fn test_arc_flags() {
        let d = default_diagram();
        assert!(!d.arc.large_arc);
        assert!(!d.arc.sweep);

        let config = Configuration {
            wrap_direction: WrapDirection::Clockwise,
            ..Configuration::default()
        };
        let d = Diagram::layout(&config, &calculate(&config), &Settings::default());
        // 180° clockwise to 270° covers 270° of the rim
        assert!(d.arc.large_arc);
        assert!(d.arc.sweep);
        assert!(d.arc.path_data().contains(" A 80 80 0 1 1 "));
    }

    #[test]
    fn test_labels() {
        let d = default_diagram();
        assert_eq!(d.slope1_label.text, "m₁=undefined");
        assert_eq!(d.slope2_label.text, "m₂=0");
        assert_eq!(d.angle_label.text, "90°");
        assert!(close(d.slope1_label.pos, DVec2::new(120.0, 160.0)));
        // Mid angle 225°, 55 units from the center
        let expected = to_screen(
            &Settings::default(),
            polar_to_cartesian(55.0, 225f64.to_radians()),
        );
        assert!(close(d.angle_label.pos, expected));
    }

    #[test]
    fn test_perpendicular_rope_is_radial() {
        let config = Configuration {
            theta1: Angle::degrees(0.0),
            contact_mode: ContactMode::Perpendicular,
            ..Configuration::default()
        };
        let d = Diagram::layout(&config, &calculate(&config), &Settings::default());
        assert!(close(d.rope1.from, DVec2::new(280.0, 200.0)));
        assert!(close(d.rope1.to, DVec2::new(340.0, 200.0)));
    }
}
