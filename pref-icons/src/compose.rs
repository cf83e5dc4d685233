//! Icon composition: combined geometry plus extent plus style becomes a
//! pixel-space path description. Both output backends consume exactly
//! this structure, so whatever the rasterizer draws is what the vector
//! file says.

use crate::geometry::{self, Point, Shape};
use crate::project::{self, Extent};
use crate::style::Style;

/// Pixel-space description of one icon.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorPath {
    /// Closed subpaths in pixel coordinates, one per outer ring. Hole
    /// rings are not rendered; at icon sizes they read as noise.
    pub subpaths: Vec<Vec<Point>>,
    /// Label anchor in pixel coordinates, when a label is shown.
    pub label_anchor: Option<Point>,
    /// Text drawn at the anchor.
    pub display_name: String,
}

/// Project a combined shape into an icon-space path.
///
/// The label anchors on the area-weighted centroid, which keeps the name
/// over the landmass even when small outlying parts stretch the extent.
pub fn compose(shape: &Shape, extent: &Extent, style: &Style, display_name: &str) -> VectorPath {
    let subpaths = shape
        .parts()
        .iter()
        .map(|polygon| {
            polygon
                .outer
                .iter()
                .map(|&p| project::project(p, extent, style.size_px))
                .collect()
        })
        .collect();

    let label_anchor = if style.show_text {
        geometry::area_centroid(shape).map(|c| project::project(c, extent, style.size_px))
    } else {
        None
    };

    VectorPath {
        subpaths,
        label_anchor,
        display_name: display_name.to_string(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
