//! Island exclusion for regions whose territory spreads far beyond the
//! core. An icon extent that covered every island would shrink the
//! recognizable silhouette to a dot, so affected regions declare a
//! geographic window and parts outside it are dropped.

use crate::geojson::RegionFeature;
use crate::geometry::{self, Point, Polygon, Shape};
use crate::report::Report;

/// Inclusive lon/lat window around a region's core territory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MainlandBounds {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl MainlandBounds {
    /// Window membership, inclusive on all edges.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_lon && p.x <= self.max_lon && p.y >= self.min_lat && p.y <= self.max_lat
    }
}

/// Per-region window table.
///
/// Tokyo keeps the urban core and drops the Izu and Ogasawara chains,
/// which reach over 1000km south. Kagoshima keeps the Kyushu mainland
/// and drops the Satsunan islands down toward Okinawa.
pub fn override_for(code: u32) -> Option<MainlandBounds> {
    match code {
        13 => Some(MainlandBounds {
            min_lon: 139.0,
            max_lon: 139.9,
            min_lat: 35.5,
            max_lat: 35.9,
        }),
        46 => Some(MainlandBounds {
            min_lon: 129.4,
            max_lon: 131.5,
            min_lat: 30.8,
            max_lat: 32.2,
        }),
        _ => None,
    }
}

/// Drop a region's parts whose centroids fall outside the window.
///
/// A lone MultiPolygon feature is exploded into per-part atoms first;
/// otherwise whole features are the atoms. Atoms are measured, ordered
/// largest first, and kept when their centroid is inside the window.
/// Nothing inside keeps the single largest atom so the region still gets
/// an icon. Multiple survivors merge into one multi-part feature.
pub fn filter_mainland(
    features: Vec<RegionFeature>,
    bounds: &MainlandBounds,
    region: &str,
    report: &mut Report,
) -> Vec<RegionFeature> {
    if features.is_empty() {
        return features;
    }

    let atoms = explode(features);

    // Measure and order by area, largest first.
    let mut measured: Vec<(usize, f64, Point)> = atoms
        .iter()
        .enumerate()
        .map(|(index, feature)| {
            let area = feature.shape.area();
            let centroid =
                geometry::vertex_centroid(&feature.shape).unwrap_or(Point::new(0.0, 0.0));
            (index, area, centroid)
        })
        .collect();
    measured.sort_by(|a, b| b.1.total_cmp(&a.1));

    let keep: Vec<usize> = measured
        .iter()
        .filter(|(_, _, centroid)| bounds.contains(*centroid))
        .map(|(index, _, _)| *index)
        .collect();

    if keep.is_empty() {
        report.warn(
            Some(region),
            "no parts inside the mainland window, keeping the largest",
        );
        return vec![atoms[measured[0].0].clone()];
    }

    report.info(
        Some(region),
        format!(
            "mainland filter: {} -> {} parts (excluded islands)",
            atoms.len(),
            keep.len()
        ),
    );

    if keep.len() == 1 {
        return vec![atoms[keep[0]].clone()];
    }

    // Merge survivors into one multi-part feature, flattening any that
    // are themselves multi-part. Properties come from the first atom in
    // input order.
    let parts: Vec<Polygon> = keep
        .iter()
        .flat_map(|&index| atoms[index].shape.parts().iter().cloned())
        .collect();

    vec![RegionFeature {
        properties: atoms[0].properties.clone(),
        shape: Shape::Multi(parts),
    }]
}

/// Split a lone MultiPolygon feature into one atom per part. Any other
/// input is already atom-shaped.
fn explode(features: Vec<RegionFeature>) -> Vec<RegionFeature> {
    if features.len() != 1 {
        return features;
    }

    match &features[0].shape {
        Shape::Multi(parts) if parts.len() > 1 => {
            let properties = &features[0].properties;
            parts
                .iter()
                .map(|part| RegionFeature {
                    properties: properties.clone(),
                    shape: Shape::Polygon(part.clone()),
                })
                .collect()
        }
        _ => features,
    }
}

// ============================================================================
// TESTS
// ============================================================================
