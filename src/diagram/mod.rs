//! Pulley diagram
//!
//! Turns a configuration and its result into SVG-frame geometry. The math
//! frame has y up; the SVG frame has y down, and the flip happens only here.

pub mod layout;
pub mod svg;

pub use layout::{ArcPath, Diagram, Label, Segment};
pub use svg::render_document;
