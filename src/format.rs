//! Number formatting and the result text shown next to the diagram

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::consts::{DISPLAY_DECIMALS, ZERO_EPSILON};
use crate::engine::{CalculationResult, Slope};

/// Format a number for display.
///
/// Tiny magnitudes print as "0"; everything else is rounded to four decimal
/// places with trailing zeros removed. Exact halves at the last place round
/// away from zero.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value.abs() < ZERO_EPSILON {
        return "0".to_string();
    }

    let fixed = if is_exact_tie(value.abs()) {
        let scale = 10f64.powi(DISPLAY_DECIMALS as i32);
        let rounded = (value.abs() * scale).round() / scale;
        format!("{:.*}", DISPLAY_DECIMALS, rounded.copysign(value))
    } else {
        format!("{:.*}", DISPLAY_DECIMALS, value)
    };
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };

    // -0.00001 rounds to "-0"
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// True when `magnitude` sits exactly halfway between two four-decimal values.
///
/// Such values are the odd multiples of 1/32 (k + 0.5 over 10^4 only reduces
/// to a power-of-two denominator when 5^4 divides the numerator), and scaling
/// by 32 is exact, so no near-tie is misclassified.
fn is_exact_tie(magnitude: f64) -> bool {
    let scaled = magnitude * 32.0;
    scaled.fract() == 0.0 && scaled % 2.0 == 1.0
}

/// "(x, y)" with both components formatted
pub fn format_vector(v: DVec2) -> String {
    format!("({}, {})", format_number(v.x), format_number(v.y))
}

impl fmt::Display for Slope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slope::Defined(m) => write!(f, "{}", format_number(*m)),
            Slope::Vertical => write!(f, "undefined"),
        }
    }
}

/// Display strings for every result field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultText {
    pub slope1: String,
    pub slope2: String,
    /// Pull on the hand at rope end 1
    pub force1: String,
    /// Pull on the hand at rope end 2
    pub force2: String,
    pub axle_force: String,
    pub axle_magnitude: String,
    pub axle_angle: String,
    pub contact_angle_rad: String,
    pub contact_angle_deg: String,
}

impl ResultText {
    pub fn from_result(result: &CalculationResult) -> Self {
        Self {
            slope1: result.slope1.to_string(),
            slope2: result.slope2.to_string(),
            force1: format!("{} N", format_vector(result.hand_force1())),
            force2: format!("{} N", format_vector(result.hand_force2())),
            axle_force: format!("{} N", format_vector(result.axle_force)),
            axle_magnitude: format!("{} N", format_number(result.axle_force_magnitude)),
            axle_angle: format!("{}°", format_number(result.axle_force_angle)),
            contact_angle_rad: format!("{} rad", format_number(result.contact_angle)),
            contact_angle_deg: format!("{}°", format_number(result.contact_angle_degrees())),
        }
    }
}

impl fmt::Display for ResultText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Slope 1 (m₁):        {}", self.slope1)?;
        writeln!(f, "Slope 2 (m₂):        {}", self.slope2)?;
        writeln!(f, "Force on hand 1:     {}", self.force1)?;
        writeln!(f, "Force on hand 2:     {}", self.force2)?;
        writeln!(f, "Axle force:          {}", self.axle_force)?;
        writeln!(f, "Axle force |F|:      {}", self.axle_magnitude)?;
        writeln!(f, "Axle force angle:    {}", self.axle_angle)?;
        writeln!(f, "Contact angle:       {}", self.contact_angle_rad)?;
        write!(f, "Contact angle:       {}", self.contact_angle_deg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Configuration, calculate};

    #[test]
    fn test_format_number_examples() {
        assert_eq!(format_number(0.00000000001), "0");
        assert_eq!(format_number(1.23456789), "1.2346");
        assert_eq!(format_number(10.0), "10");
        assert_eq!(format_number(-2.5), "-2.5");
        assert_eq!(format_number(0.1), "0.1");
        assert_eq!(format_number(-0.00001), "0");
        assert_eq!(format_number(270.00000000001), "270");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_format_number_ties() {
        assert_eq!(format_number(0.03125), "0.0313");
        assert_eq!(format_number(-0.03125), "-0.0313");
        assert_eq!(format_number(2.03125), "2.0313");
        assert_eq!(format_number(0.15625), "0.1563");
        // Stored just below the half, so it rounds down
        assert_eq!(format_number(2.00005), "2");
    }

    #[test]
    fn test_slope_display() {
        assert_eq!(Slope::Vertical.to_string(), "undefined");
        assert_eq!(Slope::Defined(-1.0).to_string(), "-1");
    }

    #[test]
    fn test_result_text_for_default_configuration() {
        let text = ResultText::from_result(&calculate(&Configuration::default()));
        assert_eq!(text.slope1, "undefined");
        assert_eq!(text.slope2, "0");
        assert_eq!(text.force1, "(0, -10) N");
        assert_eq!(text.force2, "(-10, 0) N");
        assert_eq!(text.axle_force, "(10, 10) N");
        assert_eq!(text.axle_magnitude, "14.1421 N");
        assert_eq!(text.axle_angle, "45°");
        assert_eq!(text.contact_angle_rad, "1.5708 rad");
        assert_eq!(text.contact_angle_deg, "90°");
    }

    #[test]
    fn test_result_text_display_lists_every_field() {
        let text = ResultText::from_result(&calculate(&Configuration::default()));
        let shown = text.to_string();
        assert!(shown.contains("undefined"));
        assert!(shown.contains("14.1421 N"));
        assert_eq!(shown.lines().count(), 9);
    }
}
