//! Merge a region's features into one renderable shape.
//!
//! Boundary datasets often split a prefecture into many touching
//! features. Unioning them removes the interior seams so the icon is one
//! silhouette instead of a patchwork of outlines.

use std::panic::{catch_unwind, AssertUnwindSafe};

use geo::{BooleanOps, Coord, LineString, MultiPolygon};

use crate::geojson::RegionFeature;
use crate::geometry::{Point, Polygon, Ring, Shape};
use crate::report::Report;

/// Union a group's features left to right.
///
/// A single feature passes through unchanged. Boolean ops can panic on
/// degenerate slivers; a failing step drops that feature with a warning
/// and the fold continues from the accumulator, so one bad feature never
/// loses the region.
pub fn combine_features(
    features: &[RegionFeature],
    region: &str,
    report: &mut Report,
) -> Option<Shape> {
    let first = features.first()?;
    if features.len() == 1 {
        return Some(first.shape.clone());
    }

    let mut acc = to_geo(&first.shape);
    for feature in &features[1..] {
        let next = to_geo(&feature.shape);
        match catch_unwind(AssertUnwindSafe(|| acc.union(&next))) {
            Ok(merged) => acc = merged,
            Err(_) => {
                report.warn(Some(region), "could not union one feature, geometry dropped");
            }
        }
    }

    Some(from_geo(acc))
}

fn to_geo(shape: &Shape) -> MultiPolygon<f64> {
    MultiPolygon(shape.parts().iter().map(geo_polygon).collect())
}

fn geo_polygon(polygon: &Polygon) -> geo::Polygon<f64> {
    geo::Polygon::new(
        geo_ring(&polygon.outer),
        polygon.holes.iter().map(|hole| geo_ring(hole)).collect(),
    )
}

fn geo_ring(ring: &[Point]) -> LineString<f64> {
    LineString(ring.iter().map(|p| Coord { x: p.x, y: p.y }).collect())
}

fn from_geo(multi: MultiPolygon<f64>) -> Shape {
    let mut parts: Vec<Polygon> = multi.0.into_iter().map(from_geo_polygon).collect();
    if parts.len() == 1 {
        Shape::Polygon(parts.remove(0))
    } else {
        Shape::Multi(parts)
    }
}

fn from_geo_polygon(polygon: geo::Polygon<f64>) -> Polygon {
    let (exterior, interiors) = polygon.into_inner();
    Polygon::with_holes(
        from_geo_ring(exterior),
        interiors.into_iter().map(from_geo_ring).collect(),
    )
}

/// geo rings carry an explicit closing coordinate; ours do not.
fn from_geo_ring(line: LineString<f64>) -> Ring {
    let mut points: Ring = line.0.into_iter().map(|c| Point::new(c.x, c.y)).collect();
    if points.len() >= 2 && points.first() == points.last() {
        points.pop();
    }
    points
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn square(cx: f64, cy: f64, half: f64) -> Polygon {
        Polygon::new(vec![
            Point::new(cx - half, cy - half),
            Point::new(cx + half, cy - half),
            Point::new(cx + half, cy + half),
            Point::new(cx - half, cy + half),
        ])
    }

    fn feature(shape: Shape) -> RegionFeature {
        RegionFeature { properties: Map::new(), shape }
    }

    #[test]
    fn single_feature_is_identity() {
        let shape = Shape::Multi(vec![square(0.0, 0.0, 1.0), square(5.0, 5.0, 1.0)]);
        let mut report = Report::new();

        let combined = combine_features(&[feature(shape.clone())], "Hokkaido", &mut report);

        // Bit-exact rings, no round trip through boolean ops.
        assert_eq!(combined, Some(shape));
        assert!(report.events.is_empty());
    }

    #[test]
    fn empty_group_combines_to_nothing() {
        let mut report = Report::new();
        assert_eq!(combine_features(&[], "Hokkaido", &mut report), None);
    }

    #[test]
    fn disjoint_squares_stay_separate_parts() {
        let mut report = Report::new();
        let combined = combine_features(
            &[
                feature(Shape::Polygon(square(0.0, 0.0, 1.0))),
                feature(Shape::Polygon(square(10.0, 0.0, 1.0))),
            ],
            "Nagasaki",
            &mut report,
        )
        .unwrap();

        assert_eq!(combined.part_count(), 2);
        assert!((combined.area() - 8.0).abs() < 1e-6);
    }

    #[test]
    fn overlapping_squares_merge_into_one() {
        let mut report = Report::new();
        let combined = combine_features(
            &[
                feature(Shape::Polygon(square(0.0, 0.0, 1.0))),
                feature(Shape::Polygon(square(1.0, 0.0, 1.0))),
            ],
            "Osaka",
            &mut report,
        )
        .unwrap();

        assert_eq!(combined.part_count(), 1);
        // Two 2x2 squares overlapping by a 1x2 strip.
        assert!((combined.area() - 6.0).abs() < 1e-6);
        assert!(!report.has_warnings());
    }

    #[test]
    fn touching_squares_drop_the_seam() {
        let mut report = Report::new();
        let combined = combine_features(
            &[
                feature(Shape::Polygon(square(0.0, 0.0, 1.0))),
                feature(Shape::Polygon(square(2.0, 0.0, 1.0))),
            ],
            "Saitama",
            &mut report,
        )
        .unwrap();

        assert!((combined.area() - 8.0).abs() < 1e-6);
    }
}
