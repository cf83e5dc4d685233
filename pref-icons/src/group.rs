//! Feature grouping: figure out which property identifies the
//! prefecture, then bucket features per region.
//!
//! Datasets disagree on property naming, so detection walks ordered
//! candidate lists against the first feature. A code column wins over a
//! name column when both are present.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::geojson::RegionFeature;
use crate::regions;
use crate::report::Report;

/// Property keys checked for a numeric prefecture code, in priority order.
const CODE_KEYS: [&str; 5] = ["code", "pref_code", "jiscode", "PREF_CODE", "PREF"];

/// Property keys checked for a prefecture name, in priority order.
const NAME_KEYS: [&str; 7] = ["nam_ja", "name_ja", "NAME_JA", "name", "NAME", "pref_name", "P"];

/// Property columns detected from the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Columns {
    pub code: Option<String>,
    pub name: Option<String>,
}

/// The input gives this tool nothing to key regions on.
#[derive(Debug)]
pub enum SchemaError {
    NoFeatures,
    NoKeyColumns(Vec<String>),
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaError::NoFeatures => write!(f, "no drawable features in input"),
            SchemaError::NoKeyColumns(keys) => write!(
                f,
                "no prefecture code or name property found (feature has: {})",
                keys.join(", ")
            ),
        }
    }
}

impl std::error::Error for SchemaError {}

/// Grouping key for one region's features. Codes order before names, so
/// iteration over a key-ordered map yields coded prefectures first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum GroupKey {
    /// Known prefecture code.
    Code(u32),
    /// Literal name with no table match.
    Name(String),
}

/// Detect the key columns from the first feature's properties.
///
/// An input with no drawable features at all is rejected the same way
/// as one whose features carry no recognizable key.
pub fn detect_columns(features: &[RegionFeature]) -> Result<Columns, SchemaError> {
    let sample = match features.first() {
        Some(feature) => &feature.properties,
        None => return Err(SchemaError::NoFeatures),
    };

    let code = CODE_KEYS
        .iter()
        .find(|key| sample.contains_key(**key))
        .map(|key| key.to_string());
    let name = NAME_KEYS
        .iter()
        .find(|key| sample.contains_key(**key))
        .map(|key| key.to_string());

    if code.is_none() && name.is_none() {
        return Err(SchemaError::NoKeyColumns(sample.keys().cloned().collect()));
    }
    Ok(Columns { code, name })
}

/// Resolve one feature's grouping key.
///
/// A code value that identifies a known prefecture wins. Otherwise the
/// name value is tried: known names map onto their code so both kinds of
/// dataset land in the same bucket, unknown names become literal keys.
pub fn group_key(feature: &RegionFeature, columns: &Columns) -> Option<GroupKey> {
    if let Some(code_col) = &columns.code {
        if let Some(value) = feature.properties.get(code_col) {
            if let Some(code) = parse_code(value) {
                if regions::by_code(code).is_some() {
                    return Some(GroupKey::Code(code));
                }
            }
        }
    }

    if let Some(name_col) = &columns.name {
        if let Some(Value::String(name)) = feature.properties.get(name_col) {
            if !name.is_empty() {
                return Some(match regions::by_name_local(name) {
                    Some(record) => GroupKey::Code(record.code),
                    None => GroupKey::Name(name.clone()),
                });
            }
        }
    }

    None
}

/// Bucket features per region, preserving insertion order inside each
/// group. Features that yield no key are skipped with a warning.
pub fn group_features(
    features: Vec<RegionFeature>,
    columns: &Columns,
    report: &mut Report,
) -> BTreeMap<GroupKey, Vec<RegionFeature>> {
    let mut groups: BTreeMap<GroupKey, Vec<RegionFeature>> = BTreeMap::new();

    for (index, feature) in features.into_iter().enumerate() {
        match group_key(&feature, columns) {
            Some(key) => groups.entry(key).or_default().push(feature),
            None => report.warn(
                None,
                format!("feature {} has no usable prefecture key, skipped", index),
            ),
        }
    }

    groups
}

/// Parse a property value as a prefecture code. Accepts JSON integers,
/// whole-valued floats, and numeric strings.
fn parse_code(value: &Value) -> Option<u32> {
    match value {
        Value::Number(number) => number
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .or_else(|| {
                number
                    .as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u32::MAX as f64)
                    .map(|f| f as u32)
            }),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Polygon, Shape};
    use serde_json::json;

    fn feature_with(props: Value) -> RegionFeature {
        let properties = match props {
            Value::Object(map) => map,
            _ => panic!("props must be an object"),
        };
        RegionFeature {
            properties,
            shape: Shape::Polygon(Polygon::new(vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(1.0, 1.0),
            ])),
        }
    }

    #[test]
    fn code_column_wins_priority_order() {
        let features = vec![feature_with(json!({"PREF": 1, "code": 13, "name": "東京都"}))];
        let columns = detect_columns(&features).unwrap();
        assert_eq!(columns.code.as_deref(), Some("code"));
        assert_eq!(columns.name.as_deref(), Some("name"));
    }

    #[test]
    fn name_only_dataset_detects() {
        let features = vec![feature_with(json!({"nam_ja": "北海道"}))];
        let columns = detect_columns(&features).unwrap();
        assert_eq!(columns.code, None);
        assert_eq!(columns.name.as_deref(), Some("nam_ja"));
    }

    #[test]
    fn missing_key_columns_is_an_error() {
        let features = vec![feature_with(json!({"population": 1000}))];
        let err = detect_columns(&features).unwrap_err();
        assert!(err.to_string().contains("population"));
    }

    #[test]
    fn empty_input_is_an_error() {
        let err = detect_columns(&[]).unwrap_err();
        assert!(matches!(err, SchemaError::NoFeatures));
        assert!(err.to_string().contains("no drawable features"));
    }

    #[test]
    fn keys_parse_number_and_string_codes() {
        let columns = Columns { code: Some("code".to_string()), name: None };

        let a = feature_with(json!({"code": 13}));
        let b = feature_with(json!({"code": "46"}));
        let c = feature_with(json!({"code": 1.0}));

        assert_eq!(group_key(&a, &columns), Some(GroupKey::Code(13)));
        assert_eq!(group_key(&b, &columns), Some(GroupKey::Code(46)));
        assert_eq!(group_key(&c, &columns), Some(GroupKey::Code(1)));
    }

    #[test]
    fn known_name_maps_onto_its_code() {
        let columns = Columns { code: None, name: Some("name".to_string()) };
        let feature = feature_with(json!({"name": "東京都"}));
        assert_eq!(group_key(&feature, &columns), Some(GroupKey::Code(13)));
    }

    #[test]
    fn unknown_name_becomes_literal_key() {
        let columns = Columns { code: None, name: Some("name".to_string()) };
        let feature = feature_with(json!({"name": "小笠原村"}));
        assert_eq!(
            group_key(&feature, &columns),
            Some(GroupKey::Name("小笠原村".to_string()))
        );
    }

    #[test]
    fn unusable_code_falls_through_to_name() {
        let columns = Columns {
            code: Some("code".to_string()),
            name: Some("name".to_string()),
        };
        let unparseable = feature_with(json!({"code": "n/a", "name": "東京都"}));
        let out_of_range = feature_with(json!({"code": 99, "name": "東京都"}));

        assert_eq!(group_key(&unparseable, &columns), Some(GroupKey::Code(13)));
        assert_eq!(group_key(&out_of_range, &columns), Some(GroupKey::Code(13)));
    }

    #[test]
    fn keyless_feature_is_skipped_with_warning() {
        let columns = Columns { code: Some("code".to_string()), name: None };
        let features = vec![
            feature_with(json!({"code": 13})),
            feature_with(json!({"code": "??"})),
        ];

        let mut report = Report::new();
        let groups = group_features(features, &columns, &mut report);

        assert_eq!(groups.len(), 1);
        assert!(report.has_warnings());
    }

    #[test]
    fn groups_order_codes_before_names() {
        let columns = Columns {
            code: Some("code".to_string()),
            name: Some("name".to_string()),
        };
        let features = vec![
            feature_with(json!({"name": "択捉島"})),
            feature_with(json!({"code": 46})),
            feature_with(json!({"code": 1})),
        ];

        let mut report = Report::new();
        let groups = group_features(features, &columns, &mut report);
        let keys: Vec<GroupKey> = groups.into_keys().collect();

        assert_eq!(
            keys,
            vec![
                GroupKey::Code(1),
                GroupKey::Code(46),
                GroupKey::Name("択捉島".to_string()),
            ]
        );
    }

    #[test]
    fn same_key_accumulates_in_input_order() {
        let columns = Columns { code: Some("code".to_string()), name: None };
        let features = vec![
            feature_with(json!({"code": 13, "n": 1})),
            feature_with(json!({"code": 13, "n": 2})),
        ];

        let mut report = Report::new();
        let groups = group_features(features, &columns, &mut report);
        let tokyo = &groups[&GroupKey::Code(13)];

        assert_eq!(tokyo.len(), 2);
        assert_eq!(tokyo[0].properties["n"], json!(1));
        assert_eq!(tokyo[1].properties["n"], json!(2));
    }
}
