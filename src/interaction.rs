//! Input handling for the calculator page
//!
//! Holds the single `Configuration` plus drag state and applies one input
//! event at a time. Every method that changes the configuration returns the
//! freshly recomputed result; the caller redraws from it.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::diagram::layout::from_screen;
use crate::engine::{
    Angle, AngleUnit, CalculationResult, Configuration, ContactMode, WrapDirection, calculate,
};
use crate::cartesian_to_polar;
use crate::format::format_number;
use crate::settings::Settings;

/// Which contact point is being dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragTarget {
    Point1,
    Point2,
}

/// Bounding box of the rendered diagram in client (CSS pixel) coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClientRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Parse a text field the way a browser number field is read: the longest
/// numeric prefix wins, anything unparseable is 0.
pub fn parse_number(text: &str) -> f64 {
    let s = text.trim_start();
    let mut end = 0;
    let mut best = None;
    for (i, c) in s.char_indices() {
        if !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')) {
            break;
        }
        end = i + c.len_utf8();
        if let Ok(v) = s[..end].parse::<f64>() {
            best = Some(v);
        }
    }
    if best.is_none() {
        let (sign, rest) = match s.as_bytes().first() {
            Some(b'-') => (-1.0, &s[1..]),
            Some(b'+') => (1.0, &s[1..]),
            _ => (1.0, s),
        };
        if rest.starts_with("Infinity") {
            return sign * f64::INFINITY;
        }
    }
    match best {
        Some(v) if !v.is_nan() => v,
        _ => 0.0,
    }
}

/// Map a client-space pointer position into diagram (view box) coordinates
pub fn client_to_viewbox(client: DVec2, rect: &ClientRect, viewbox_size: f64) -> DVec2 {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return DVec2::new(client.x - rect.left, client.y - rect.top);
    }
    DVec2::new(
        (client.x - rect.left) * (viewbox_size / rect.width),
        (client.y - rect.top) * (viewbox_size / rect.height),
    )
}

/// Calculator state driven by user input
#[derive(Debug, Clone)]
pub struct Calculator {
    config: Configuration,
    settings: Settings,
    drag: Option<DragTarget>,
    result: CalculationResult,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(Configuration::default(), Settings::default())
    }
}

impl Calculator {
    pub fn new(config: Configuration, settings: Settings) -> Self {
        let result = calculate(&config);
        Self {
            config,
            settings,
            drag: None,
            result,
        }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn result(&self) -> &CalculationResult {
        &self.result
    }

    fn recompute(&mut self) -> &CalculationResult {
        self.result = calculate(&self.config);
        &self.result
    }

    fn angle(&self, target: DragTarget) -> Angle {
        match target {
            DragTarget::Point1 => self.config.theta1,
            DragTarget::Point2 => self.config.theta2,
        }
    }

    fn angle_mut(&mut self, target: DragTarget) -> &mut Angle {
        match target {
            DragTarget::Point1 => &mut self.config.theta1,
            DragTarget::Point2 => &mut self.config.theta2,
        }
    }

    /// Tension text field edited
    pub fn set_tension_text(&mut self, text: &str) -> &CalculationResult {
        self.config.tension = parse_number(text);
        self.recompute()
    }

    /// Tension slider moved
    pub fn set_tension(&mut self, tension: f64) -> &CalculationResult {
        self.config.tension = tension;
        self.recompute()
    }

    /// Angle text field edited (value in the angle's current unit)
    pub fn set_angle_text(&mut self, target: DragTarget, text: &str) -> &CalculationResult {
        self.angle_mut(target).value = parse_number(text);
        self.recompute()
    }

    /// Angle slider moved (sliders are always in degrees)
    pub fn set_angle_degrees(&mut self, target: DragTarget, degrees: f64) -> &CalculationResult {
        let unit = self.angle(target).unit;
        *self.angle_mut(target) = Angle::from_radians(degrees.to_radians(), unit);
        self.recompute()
    }

    /// Unit selector changed; the angle itself is preserved
    pub fn set_angle_unit(&mut self, target: DragTarget, unit: AngleUnit) -> &CalculationResult {
        let converted = self.angle(target).in_unit(unit);
        *self.angle_mut(target) = converted;
        self.recompute()
    }

    pub fn set_wrap_direction(&mut self, wrap: WrapDirection) -> &CalculationResult {
        self.config.wrap_direction = wrap;
        self.recompute()
    }

    pub fn set_contact_mode(&mut self, mode: ContactMode) -> &CalculationResult {
        self.config.contact_mode = mode;
        self.recompute()
    }

    /// Text to show in an angle field
    pub fn angle_text(&self, target: DragTarget) -> String {
        format_number(self.angle(target).value)
    }

    /// Position for an angle slider, in degrees
    pub fn slider_degrees(&self, target: DragTarget) -> f64 {
        self.angle(target).as_degrees()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn drag_target(&self) -> Option<DragTarget> {
        self.drag
    }

    pub fn start_drag(&mut self, target: DragTarget) {
        log::debug!("drag start: {:?}", target);
        self.drag = Some(target);
    }

    /// Pointer moved to `client`. Returns the new result, or `None` when no
    /// drag is in progress.
    pub fn drag_to(&mut self, client: DVec2, rect: &ClientRect) -> Option<&CalculationResult> {
        let target = self.drag?;
        let point = client_to_viewbox(client, rect, self.settings.viewbox_size);
        let (_, theta) = cartesian_to_polar(from_screen(&self.settings, point));
        let unit = self.angle(target).unit;
        *self.angle_mut(target) = Angle::from_radians(theta, unit);
        Some(self.recompute())
    }

    pub fn end_drag(&mut self) {
        if let Some(target) = self.drag.take() {
            log::debug!("drag end: {:?}", target);
        }
    }
}
