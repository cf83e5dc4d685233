//! # pref-icons
//!
//! Core library for turning prefecture boundary GeoJSON into square
//! silhouette icons. [`pipeline::generate_icons`] drives the full chain;
//! the stage modules are public so callers can run any step on its own.

pub mod combine;
pub mod compose;
pub mod geojson;
pub mod geometry;
pub mod group;
pub mod mainland;
pub mod pipeline;
pub mod project;
pub mod regions;
pub mod report;
pub mod style;
pub mod svg;

// Re-export common types at crate root for convenience.
pub use compose::{compose, VectorPath};
pub use geojson::{parse_collection, FeatureCollection, GeoJsonError, RegionFeature};
pub use geometry::{Point, Polygon, Shape};
pub use group::{GroupKey, SchemaError};
pub use pipeline::{generate_icons, PlanError, RegionIcon};
pub use regions::{by_code, parse_selection, RegionRecord, PREFECTURES};
pub use report::{Event, Level, Report};
pub use style::Style;
pub use svg::svg_document;
