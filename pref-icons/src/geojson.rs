//! GeoJSON input parsing.
//!
//! Input is untrusted. Only Polygon and MultiPolygon geometries are
//! usable; anything else is carried through parsing and dropped at
//! conversion time. Rings are normalized on the way in: the closing
//! duplicate vertex goes away and rings without three distinct points
//! are skipped.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::geometry::{Point, Polygon, Ring, Shape};

/// Error type for GeoJSON input.
#[derive(Debug)]
pub enum GeoJsonError {
    ParseError(String),
    NotACollection(String),
}

impl std::fmt::Display for GeoJsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeoJsonError::ParseError(msg) => write!(f, "GeoJSON parse error: {}", msg),
            GeoJsonError::NotACollection(kind) => {
                write!(f, "expected a FeatureCollection, got '{}'", kind)
            }
        }
    }
}

impl std::error::Error for GeoJsonError {}

/// Top-level GeoJSON document.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub features: Vec<Feature>,
}

/// One raw feature. Properties and geometry may both be absent or null.
#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

/// Geometry variants this tool can render. Unknown types (Point,
/// LineString, ...) parse into `Other` and convert to nothing.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Polygon { coordinates: Vec<Vec<Vec<f64>>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Vec<f64>>>> },
    #[serde(other)]
    Other,
}

/// A feature whose geometry parsed into usable rings.
#[derive(Debug, Clone)]
pub struct RegionFeature {
    pub properties: Map<String, Value>,
    pub shape: Shape,
}

impl RegionFeature {
    /// Convert a raw feature, dropping unusable geometry.
    pub fn from_feature(feature: &Feature) -> Option<Self> {
        let shape = feature_shape(feature)?;
        Some(Self {
            properties: feature.properties.clone().unwrap_or_default(),
            shape,
        })
    }
}

/// Parse a GeoJSON string into a feature collection.
pub fn parse_collection(input: &str) -> Result<FeatureCollection, GeoJsonError> {
    let collection: FeatureCollection =
        serde_json::from_str(input).map_err(|e| GeoJsonError::ParseError(e.to_string()))?;

    if collection.kind != "FeatureCollection" {
        return Err(GeoJsonError::NotACollection(collection.kind));
    }
    Ok(collection)
}

/// Extract the usable shape of a feature, if it has one.
pub fn feature_shape(feature: &Feature) -> Option<Shape> {
    match feature.geometry.as_ref()? {
        Geometry::Polygon { coordinates } => polygon_from_rings(coordinates).map(Shape::Polygon),
        Geometry::MultiPolygon { coordinates } => {
            let parts: Vec<Polygon> = coordinates
                .iter()
                .filter_map(|rings| polygon_from_rings(rings))
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(Shape::Multi(parts))
            }
        }
        Geometry::Other => None,
    }
}

/// Build a polygon from raw GeoJSON rings. The first ring is the outer
/// boundary; the polygon is unusable without it. Degenerate holes are
/// dropped silently.
fn polygon_from_rings(rings: &[Vec<Vec<f64>>]) -> Option<Polygon> {
    let outer = ring_points(rings.first()?)?;
    let holes = rings[1..].iter().filter_map(|r| ring_points(r)).collect();
    Some(Polygon::with_holes(outer, holes))
}

/// Normalize one raw ring: take lon/lat from each position (altitude and
/// anything after is ignored), collapse consecutive duplicates, drop the
/// closing duplicate. Needs three distinct points to count as a ring.
fn ring_points(raw: &[Vec<f64>]) -> Option<Ring> {
    let mut points: Ring = raw
        .iter()
        .filter(|pos| pos.len() >= 2)
        .map(|pos| Point::new(pos[0], pos[1]))
        .collect();

    points.dedup_by(|a, b| (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9);

    if points.len() >= 2 {
        let first = points[0];
        let last = points[points.len() - 1];
        if (first.x - last.x).abs() < 1e-9 && (first.y - last.y).abs() < 1e-9 {
            points.pop();
        }
    }

    if points.len() >= 3 { Some(points) } else { None }
}

// ============================================================================
// TESTS
// ============================================================================
