//! Geographic extent and pixel projection.
//!
//! Icons are square, so the extent is a padded square around the shape.
//! Latitude grows north while image rows grow down, hence the Y flip.

use crate::geometry::Point;

/// Geographic extent as [min_x, min_y, max_x, max_y]. Always square.
pub type Extent = [f64; 4];

/// Expand a bounding box into a padded square centered on the same spot.
///
/// The half-span is the larger box dimension times (0.5 + padding), so
/// padding is a fraction of the shape's own span.
pub fn square_extent(bbox: (f64, f64, f64, f64), padding: f64) -> Extent {
    let (min_x, min_y, max_x, max_y) = bbox;
    let cx = (min_x + max_x) / 2.0;
    let cy = (min_y + max_y) / 2.0;
    let half = (max_x - min_x).max(max_y - min_y) * (0.5 + padding);
    [cx - half, cy - half, cx + half, cy + half]
}

/// Map a geographic point into pixel space.
///
/// Callers guarantee a non-degenerate extent; `square_extent` output is
/// positive-span whenever the shape had any span at all.
#[inline]
pub fn project(point: Point, extent: &Extent, size_px: u32) -> Point {
    let size = size_px as f64;
    let x = (point.x - extent[0]) / (extent[2] - extent[0]) * size;
    let y = size - (point.y - extent[1]) / (extent[3] - extent[1]) * size;
    Point::new(x, y)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_is_square_and_contains_bbox() {
        let bbox = (0.0, 0.0, 10.0, 4.0);
        let extent = square_extent(bbox, 0.07);

        let width = extent[2] - extent[0];
        let height = extent[3] - extent[1];
        assert!((width - height).abs() < 1e-10);

        assert!(extent[0] < bbox.0 && extent[1] < bbox.1);
        assert!(extent[2] > bbox.2 && extent[3] > bbox.3);
    }

    #[test]
    fn extent_padding_math() {
        // Wide box: half-span = 10 * 0.57 = 5.7 around center (5, 2).
        let extent = square_extent((0.0, 0.0, 10.0, 4.0), 0.07);
        assert!((extent[0] - -0.7).abs() < 1e-10);
        assert!((extent[1] - -3.7).abs() < 1e-10);
        assert!((extent[2] - 10.7).abs() < 1e-10);
        assert!((extent[3] - 7.7).abs() < 1e-10);
    }

    #[test]
    fn zero_padding_hugs_the_larger_dimension() {
        let extent = square_extent((2.0, 0.0, 6.0, 8.0), 0.0);
        assert_eq!(extent, [0.0, 0.0, 8.0, 8.0]);
    }

    #[test]
    fn corners_map_exactly_with_y_flip() {
        let extent = [10.0, 20.0, 30.0, 40.0];
        let size = 256;

        let sw = project(Point::new(10.0, 20.0), &extent, size);
        assert_eq!((sw.x, sw.y), (0.0, 256.0));

        let ne = project(Point::new(30.0, 40.0), &extent, size);
        assert_eq!((ne.x, ne.y), (256.0, 0.0));

        let nw = project(Point::new(10.0, 40.0), &extent, size);
        assert_eq!((nw.x, nw.y), (0.0, 0.0));

        let se = project(Point::new(30.0, 20.0), &extent, size);
        assert_eq!((se.x, se.y), (256.0, 256.0));
    }

    #[test]
    fn center_maps_to_center() {
        let extent = [10.0, 20.0, 30.0, 40.0];
        let c = project(Point::new(20.0, 30.0), &extent, 100);
        assert_eq!((c.x, c.y), (50.0, 50.0));
    }

    #[test]
    fn north_is_up() {
        let extent = [0.0, 0.0, 10.0, 10.0];
        let north = project(Point::new(5.0, 9.0), &extent, 100);
        let south = project(Point::new(5.0, 1.0), &extent, 100);
        assert!(north.y < south.y);
    }
}
