//! SVG document generation.
//!
//! This is the single drawing description for both backends: the vector
//! writer saves this string, the rasterizer renders this string. There
//! is no background rect, so everything outside the silhouette stays
//! transparent.

use crate::compose::VectorPath;
use crate::geometry::Point;
use crate::style::Style;

/// Render a composed path into a complete SVG document.
pub fn svg_document(path: &VectorPath, style: &Style) -> String {
    let size = style.size_px;
    let mut svg = String::new();

    svg.push_str(&format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        size, size
    ));

    // All subpaths share one path element so the silhouette fills and
    // strokes as a unit.
    let data = path_data(&path.subpaths);
    if !data.is_empty() {
        svg.push_str(&format!(
            "  <path d=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{:.2}\"/>\n",
            data,
            style.face_color,
            style.edge_color,
            style.stroke_width()
        ));
    }

    // The outline paints beneath the fill, same stacking as drawing the
    // stroke first and the fill on top.
    if let Some(anchor) = path.label_anchor {
        svg.push_str(&format!(
            "  <text x=\"{:.2}\" y=\"{:.2}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{:.2}\" paint-order=\"stroke\" font-size=\"{:.2}\" font-weight=\"bold\" text-anchor=\"middle\" dominant-baseline=\"middle\" font-family=\"sans-serif\">{}</text>\n",
            anchor.x,
            anchor.y,
            style.text_color,
            style.edge_color,
            style.label_outline_width(),
            style.label_font_size(),
            escape_text(&path.display_name)
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

/// Build the d="" attribute from closed subpaths. Subpaths that lost
/// their area during projection are skipped.
fn path_data(subpaths: &[Vec<Point>]) -> String {
    let mut data = String::new();

    for subpath in subpaths {
        if subpath.len() < 3 {
            continue;
        }
        if !data.is_empty() {
            data.push(' ');
        }
        for (i, pt) in subpath.iter().enumerate() {
            if i == 0 {
                data.push_str(&format!("M{:.2},{:.2}", pt.x, pt.y));
            } else {
                data.push_str(&format!(" L{:.2},{:.2}", pt.x, pt.y));
            }
        }
        data.push_str(" Z");
    }

    data
}

/// Escape text content for XML.
fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

// ============================================================================
// TESTS
// ============================================================================
