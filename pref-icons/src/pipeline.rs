//! End-to-end icon planning.
//!
//! Takes raw GeoJSON text through parsing, column detection, grouping,
//! mainland filtering, union and composition, and hands back one
//! finished SVG document per region. Writing files is the caller's job.

use std::collections::BTreeSet;

use crate::combine::combine_features;
use crate::compose::compose;
use crate::geojson::{parse_collection, GeoJsonError, RegionFeature};
use crate::group::{detect_columns, group_features, GroupKey, SchemaError};
use crate::mainland::{filter_mainland, override_for};
use crate::project::square_extent;
use crate::regions::by_code;
use crate::report::Report;
use crate::style::Style;
use crate::svg::svg_document;

/// A fatal planning failure. Everything recoverable lands in the
/// [`Report`] instead.
#[derive(Debug)]
pub enum PlanError {
    /// The input was not parseable GeoJSON.
    Input(GeoJsonError),
    /// The input has no drawable features or no recognizable
    /// prefecture property.
    Schema(SchemaError),
}

impl std::fmt::Display for PlanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanError::Input(err) => write!(f, "{}", err),
            PlanError::Schema(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for PlanError {}

impl From<GeoJsonError> for PlanError {
    fn from(err: GeoJsonError) -> Self {
        PlanError::Input(err)
    }
}

impl From<SchemaError> for PlanError {
    fn from(err: SchemaError) -> Self {
        PlanError::Schema(err)
    }
}

/// One planned icon, ready to be written by an output backend.
#[derive(Debug, Clone)]
pub struct RegionIcon {
    /// Output filename without directory or extension.
    pub file_stem: String,
    /// Region name as drawn on the icon.
    pub name_local: String,
    /// Romanized name, when the region is in the table.
    pub name_romanized: Option<String>,
    /// Complete SVG document.
    pub svg: String,
}

/// Plan icons for every region in the input, in table order.
///
/// `selection` restricts output to the given prefecture codes; `None`
/// means everything. Groups keyed by an unrecognized name can only be
/// selected by running without a selection.
///
/// An input that yields no regions at all is an error, not an empty
/// plan.
pub fn generate_icons(
    geojson: &str,
    style: &Style,
    selection: Option<&BTreeSet<u32>>,
    report: &mut Report,
) -> Result<Vec<RegionIcon>, PlanError> {
    let collection = parse_collection(geojson)?;
    let features: Vec<RegionFeature> = collection
        .features
        .iter()
        .filter_map(RegionFeature::from_feature)
        .collect();

    let columns = detect_columns(&features)?;
    report.info(
        None,
        format!(
            "found columns - code: {}, name: {}",
            columns.code.as_deref().unwrap_or("none"),
            columns.name.as_deref().unwrap_or("none")
        ),
    );

    let groups = group_features(features, &columns, report);
    let mut icons = Vec::new();

    for (key, group) in groups {
        if let Some(selection) = selection {
            let keep = match &key {
                GroupKey::Code(code) => selection.contains(code),
                GroupKey::Name(_) => false,
            };
            if !keep {
                continue;
            }
        }
        if let Some(icon) = build_icon(key, group, style, report) {
            icons.push(icon);
        }
    }

    Ok(icons)
}

/// Build one icon from a grouped region, or skip it with a warning.
fn build_icon(
    key: GroupKey,
    features: Vec<RegionFeature>,
    style: &Style,
    report: &mut Report,
) -> Option<RegionIcon> {
    let (code, name_local, name_romanized) = match key {
        GroupKey::Code(code) => {
            let record = by_code(code)?;
            (
                Some(code),
                record.name_local.to_string(),
                Some(record.name_romanized.to_string()),
            )
        }
        GroupKey::Name(name) => (None, name, None),
    };

    let features = match code.and_then(override_for) {
        Some(bounds) => filter_mainland(features, &bounds, &name_local, report),
        None => features,
    };

    let shape = match combine_features(&features, &name_local, report) {
        Some(shape) => shape,
        None => {
            report.warn(Some(&name_local), "no usable geometry, skipped");
            return None;
        }
    };

    let bbox = match shape.bounding_box() {
        Some(bbox) => bbox,
        None => {
            report.warn(Some(&name_local), "no usable geometry, skipped");
            return None;
        }
    };
    let (min_x, min_y, max_x, max_y) = bbox;
    if (max_x - min_x).max(max_y - min_y) <= 0.0 {
        report.warn(Some(&name_local), "degenerate geometry, skipped");
        return None;
    }

    let extent = square_extent(bbox, style.padding);
    let path = compose(&shape, &extent, style, &name_local);
    let svg = svg_document(&path, style);

    Some(RegionIcon {
        file_stem: file_stem(code, &name_local, name_romanized.as_deref()),
        name_local,
        name_romanized,
        svg,
    })
}

/// Filename stem: zero-padded code plus lowercase romanized name for
/// table regions, the raw grouping name otherwise.
fn file_stem(code: Option<u32>, name_local: &str, name_romanized: Option<&str>) -> String {
    match (code, name_romanized) {
        (Some(code), Some(romanized)) => format!("{:02}_{}", code, romanized.to_lowercase()),
        _ => name_local.to_string(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
