//! Core geometry types for region outlines.
//!
//! Coordinates are geographic before projection (x = longitude,
//! y = latitude) and pixel-space after. Rings are stored open: the
//! closing duplicate vertex is dropped when rings are built.

/// A 2D point with x,y coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A closed ring of vertices, stored without the closing duplicate.
pub type Ring = Vec<Point>;

/// A polygon with an outer boundary and zero or more holes.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    /// Outer boundary vertices.
    pub outer: Ring,
    /// Interior holes.
    pub holes: Vec<Ring>,
}

impl Polygon {
    /// Create a simple polygon with no holes.
    pub fn new(outer: Ring) -> Self {
        Self { outer, holes: Vec::new() }
    }

    /// Create a polygon with holes.
    pub fn with_holes(outer: Ring, holes: Vec<Ring>) -> Self {
        Self { outer, holes }
    }

    /// Absolute area with holes subtracted.
    pub fn area(&self) -> f64 {
        let outer = signed_area(&self.outer).abs();
        let holes: f64 = self.holes.iter().map(|h| signed_area(h).abs()).sum();
        (outer - holes).max(0.0)
    }
}

/// Region geometry: a single polygon or a multi-part shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Polygon(Polygon),
    Multi(Vec<Polygon>),
}

impl Shape {
    /// All polygon parts in order.
    pub fn parts(&self) -> &[Polygon] {
        match self {
            Shape::Polygon(polygon) => std::slice::from_ref(polygon),
            Shape::Multi(parts) => parts,
        }
    }

    /// Number of polygon parts.
    pub fn part_count(&self) -> usize {
        self.parts().len()
    }

    /// Total absolute area across parts, holes subtracted.
    pub fn area(&self) -> f64 {
        self.parts().iter().map(Polygon::area).sum()
    }

    /// Bounding box over outer rings as (min_x, min_y, max_x, max_y).
    pub fn bounding_box(&self) -> Option<(f64, f64, f64, f64)> {
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        let mut seen = false;

        for polygon in self.parts() {
            for p in &polygon.outer {
                min_x = min_x.min(p.x);
                min_y = min_y.min(p.y);
                max_x = max_x.max(p.x);
                max_y = max_y.max(p.y);
                seen = true;
            }
        }

        seen.then_some((min_x, min_y, max_x, max_y))
    }
}

/// Signed area of a ring using the shoelace formula.
///
/// Positive for counter-clockwise winding, negative for clockwise.
/// The absolute value is the enclosed area.
pub fn signed_area(ring: &[Point]) -> f64 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += ring[i].x * ring[j].y;
        area -= ring[j].x * ring[i].y;
    }
    area / 2.0
}

/// Mean of all outer-ring vertices.
///
/// This is the centroid the island filter tests against its geographic
/// window: crude, but it lands inside the part for coastline rings.
pub fn vertex_centroid(shape: &Shape) -> Option<Point> {
    let mut count = 0usize;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;

    for polygon in shape.parts() {
        for p in &polygon.outer {
            sum_x += p.x;
            sum_y += p.y;
            count += 1;
        }
    }

    if count == 0 {
        return None;
    }
    Some(Point::new(sum_x / count as f64, sum_y / count as f64))
}

/// Area-weighted centroid across a shape's outer rings.
///
/// Each part contributes its polygon centroid weighted by its area, so
/// the anchor sits over the visual mass of the shape rather than the
/// middle of its bounding box. Falls back to the vertex mean when the
/// total area vanishes.
pub fn area_centroid(shape: &Shape) -> Option<Point> {
    let mut weight = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;

    for polygon in shape.parts() {
        let ring = &polygon.outer;
        let signed = signed_area(ring);
        if signed == 0.0 {
            continue;
        }

        let mut sx = 0.0;
        let mut sy = 0.0;
        let n = ring.len();
        for i in 0..n {
            let j = (i + 1) % n;
            let cross = ring[i].x * ring[j].y - ring[j].x * ring[i].y;
            sx += (ring[i].x + ring[j].x) * cross;
            sy += (ring[i].y + ring[j].y) * cross;
        }

        let area = signed.abs();
        cx += sx / (6.0 * signed) * area;
        cy += sy / (6.0 * signed) * area;
        weight += area;
    }

    if weight > 0.0 {
        Some(Point::new(cx / weight, cy / weight))
    } else {
        vertex_centroid(shape)
    }
}

// ============================================================================
// TESTS
// ============================================================================
