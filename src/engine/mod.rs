//! Geometry/force engine
//!
//! Everything the calculator derives from a configuration lives here. This
//! module must stay pure:
//! - No I/O, logging aside
//! - No hidden state: results depend only on the `Configuration`
//! - No rendering or platform dependencies

pub mod calc;
pub mod geometry;
pub mod units;

pub use calc::{CalculationResult, Configuration, calculate};
pub use geometry::{
    ContactMode, Endpoint, Slope, WrapDirection, axle_force, effective_angle, force, slope,
    wrapped_contact_angle,
};
pub use units::{Angle, AngleUnit};
