//! Diagram settings
//!
//! The geometry of the drawing (view box, pulley placement, arrow scale).
//! The browser page uses the defaults; the command line can load overrides
//! from a JSON file.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::consts::*;
use crate::error::PulleyError;

/// Diagram layout settings, in SVG user units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Width and height of the square view box
    pub viewbox_size: f64,
    /// Pulley center (SVG frame, y down)
    pub center: DVec2,
    pub pulley_radius: f64,
    /// Length of each free rope segment drawn
    pub rope_extension: f64,
    /// Display length per Newton for force arrows
    pub force_scale: f64,
    pub slope_label_lift: f64,
    pub angle_label_inset: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            viewbox_size: VIEWBOX_SIZE,
            center: DVec2::new(PULLEY_CENTER_X, PULLEY_CENTER_Y),
            pulley_radius: PULLEY_RADIUS,
            rope_extension: ROPE_EXTENSION,
            force_scale: FORCE_SCALE,
            slope_label_lift: SLOPE_LABEL_LIFT,
            angle_label_inset: ANGLE_LABEL_INSET,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, PulleyError> {
        let settings: Settings =
            serde_json::from_str(json).map_err(|e| PulleyError::Settings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, PulleyError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| PulleyError::Settings(format!("{}: {}", path.display(), e)))?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    fn validate(&self) -> Result<(), PulleyError> {
        if self.viewbox_size.is_nan() || self.viewbox_size <= 0.0 {
            return Err(PulleyError::Settings(format!(
                "viewbox_size must be positive, got {}",
                self.viewbox_size
            )));
        }
        if self.pulley_radius.is_nan() || self.pulley_radius <= 0.0 {
            return Err(PulleyError::Settings(format!(
                "pulley_radius must be positive, got {}",
                self.pulley_radius
            )));
        }
        Ok(())
    }
}
