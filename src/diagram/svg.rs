//! Standalone SVG document for a laid-out diagram
//!
//! Element ids match the browser page, so the same stylesheet applies.

use glam::DVec2;

use super::layout::{Diagram, Label, Segment};
use crate::settings::Settings;

const ROPE_COLOR: &str = "#8b5a2b";
const FORCE_COLOR: &str = "#d62728";
const AXLE_COLOR: &str = "#1f77b4";

fn line(id: &str, segment: &Segment, stroke: &str, width: f64, marker: Option<&str>) -> String {
    let marker = marker
        .map(|m| format!(r#" marker-end="url(#{})""#, m))
        .unwrap_or_default();
    format!(
        r#"  <line id="{}" x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"{}/>"#,
        id, segment.from.x, segment.from.y, segment.to.x, segment.to.y, stroke, width, marker
    )
}

fn circle(id: &str, center: DVec2, r: f64, fill: &str) -> String {
    format!(
        r#"  <circle id="{}" cx="{}" cy="{}" r="{}" fill="{}"/>"#,
        id, center.x, center.y, r, fill
    )
}

fn text(id: &str, label: &Label) -> String {
    format!(
        r#"  <text id="{}" x="{}" y="{}" text-anchor="middle" font-size="12">{}</text>"#,
        id,
        label.pos.x,
        label.pos.y,
        escape(&label.text)
    )
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn arrow_marker(id: &str, color: &str) -> String {
    format!(
        r#"    <marker id="{}" markerWidth="10" markerHeight="7" refX="10" refY="3.5" orient="auto"><polygon points="0 0, 10 3.5, 0 7" fill="{}"/></marker>"#,
        id, color
    )
}

/// Serialize a diagram as a complete SVG document
pub fn render_document(diagram: &Diagram, settings: &Settings) -> String {
    let size = settings.viewbox_size;
    let mut lines = vec![
        format!(
            r#"<svg id="visualization" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {size} {size}" width="{size}" height="{size}">"#
        ),
        "  <defs>".to_string(),
        arrow_marker("arrow-force", FORCE_COLOR),
        arrow_marker("arrow-axle", AXLE_COLOR),
        "  </defs>".to_string(),
        format!(
            r##"  <circle id="pulley" cx="{}" cy="{}" r="{}" fill="#e8e8e8" stroke="#555" stroke-width="2"/>"##,
            diagram.center.x, diagram.center.y, diagram.pulley_radius
        ),
        circle("axle", diagram.center, 4.0, "#555"),
        format!(
            r#"  <path id="rope-arc" d="{}" fill="none" stroke="{}" stroke-width="4"/>"#,
            diagram.arc.path_data(),
            ROPE_COLOR
        ),
        line("rope-segment1", &diagram.rope1, ROPE_COLOR, 4.0, None),
        line("rope-segment2", &diagram.rope2, ROPE_COLOR, 4.0, None),
        line("force1-vector", &diagram.force1, FORCE_COLOR, 2.0, Some("arrow-force")),
        line("force2-vector", &diagram.force2, FORCE_COLOR, 2.0, Some("arrow-force")),
        line("axle-force-vector", &diagram.axle_force, AXLE_COLOR, 2.0, Some("arrow-axle")),
        circle("contact-point1", diagram.contact1, 6.0, "#2ca02c"),
        circle("contact-point2", diagram.contact2, 6.0, "#9467bd"),
        text("slope1-label", &diagram.slope1_label),
        text("slope2-label", &diagram.slope2_label),
        text("contact-angle-label", &diagram.angle_label),
        "</svg>".to_string(),
    ];
    lines.push(String::new());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Configuration, calculate};

    fn default_document() -> String {
        let settings = Settings::default();
        let config = Configuration::default();
        let diagram = Diagram::layout(&config, &calculate(&config), &settings);
        render_document(&diagram, &settings)
    }

    #[test]
    fn test_document_has_every_element() {
        let doc = default_document();
        assert!(doc.starts_with("<svg"));
        assert!(doc.trim_end().ends_with("</svg>"));
        for id in [
            "pulley",
            "rope-arc",
            "rope-segment1",
            "rope-segment2",
            "contact-point1",
            "contact-point2",
            "force1-vector",
            "force2-vector",
            "axle-force-vector",
            "slope1-label",
            "slope2-label",
            "contact-angle-label",
        ] {
            assert!(doc.contains(&format!(r#"id="{}""#, id)), "missing {}", id);
        }
    }

    #[test]
    fn test_document_labels_and_viewbox() {
        let doc = default_document();
        assert!(doc.contains(r#"viewBox="0 0 400 400""#));
        assert!(doc.contains(">m₁=undefined</text>"));
        assert!(doc.contains(">90°</text>"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b & c>"), "a&lt;b &amp; c&gt;");
    }
}
