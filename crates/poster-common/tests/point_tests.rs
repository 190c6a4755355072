//! Tests for point loading and validation.

use poster_common::point::UNKNOWN_CATEGORY;
use poster_common::{GeoPoint, PosterError, PointStore};
use std::io::Write;

// ============================================================================
// GeoPoint construction tests
// ============================================================================

#[test]
fn test_geo_point_accessors() {
    let point = GeoPoint::new("Sebastian Inlet", 27.86, -80.45, "Beach/jetty").unwrap();
    assert_eq!(point.name(), "Sebastian Inlet");
    assert_eq!(point.latitude(), 27.86);
    assert_eq!(point.longitude(), -80.45);
    assert_eq!(point.category(), "Beach/jetty");
}

#[test]
fn test_geo_point_invalid_latitude() {
    let result = GeoPoint::new("Nowhere", 120.0, -80.0, "Beach");
    assert!(matches!(result, Err(PosterError::Validation(_))));
}

#[test]
fn test_geo_point_invalid_longitude() {
    let result = GeoPoint::new("Nowhere", 28.0, 200.0, "Beach");
    assert!(matches!(result, Err(PosterError::Validation(_))));
}

#[test]
fn test_geo_point_nan_rejected() {
    assert!(GeoPoint::new("Nowhere", f64::NAN, -80.0, "Beach").is_err());
}

// ============================================================================
// JSON loading tests
// ============================================================================

#[test]
fn test_load_valid_records() {
    let json = r#"[
        {"name": "Cocoa Beach Pier", "latitude": 28.37, "longitude": -80.6, "break_type": "Beach/pier"},
        {"name": "Sebastian Inlet", "latitude": 27.86, "longitude": -80.45, "break_type": "Beach/jetty"}
    ]"#;

    let store = PointStore::from_json(json).unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.points()[0].name(), "Cocoa Beach Pier");
    assert_eq!(store.points()[1].category(), "Beach/jetty");
}

#[test]
fn test_missing_longitude_dropped_without_aborting() {
    let json = r#"[
        {"name": "No Lon", "latitude": 28.0, "break_type": "Beach"},
        {"name": "Good One", "latitude": 27.0, "longitude": -80.2, "break_type": "Reef"}
    ]"#;

    let store = PointStore::from_json(json).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.points()[0].name(), "Good One");
}

#[test]
fn test_null_coordinates_dropped() {
    let json = r#"[
        {"name": "Null Lat", "latitude": null, "longitude": -80.0, "break_type": "Beach"}
    ]"#;

    let store = PointStore::from_json(json).unwrap();
    assert!(store.is_empty());
}

#[test]
fn test_malformed_number_dropped() {
    let json = r#"[
        {"name": "Bad", "latitude": "north-ish", "longitude": -80.0},
        {"name": "Stringy", "latitude": "26.5", "longitude": "-80.05"}
    ]"#;

    let store = PointStore::from_json(json).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.points()[0].latitude(), 26.5);
    assert_eq!(store.points()[0].longitude(), -80.05);
}

#[test]
fn test_missing_break_type_defaults_unknown() {
    let json = r#"[{"name": "Mystery Spot", "latitude": 29.0, "longitude": -81.0}]"#;

    let store = PointStore::from_json(json).unwrap();
    assert_eq!(store.points()[0].category(), UNKNOWN_CATEGORY);
}

#[test]
fn test_out_of_range_record_dropped() {
    let json = r#"[
        {"name": "Mars", "latitude": 95.0, "longitude": -80.0, "break_type": "Beach"},
        {"name": "Earth", "latitude": 25.0, "longitude": -80.0, "break_type": "Beach"}
    ]"#;

    let store = PointStore::from_json(json).unwrap();
    assert_eq!(store.len(), 1);
}

#[test]
fn test_invalid_json_is_data_load_error() {
    let result = PointStore::from_json("{not json");
    assert!(matches!(result, Err(PosterError::DataLoad { .. })));
}

#[test]
fn test_non_array_is_data_load_error() {
    let result = PointStore::from_json(r#"{"name": "solo"}"#);
    assert!(matches!(result, Err(PosterError::DataLoad { .. })));
}

// ============================================================================
// File loading tests
// ============================================================================

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[{{"name": "Jupiter Inlet", "latitude": 26.94, "longitude": -80.07, "break_type": "Beach/jetty"}}]"#
    )
    .unwrap();

    let store = PointStore::load(file.path()).unwrap();
    assert_eq!(store.len(), 1);
}

#[test]
fn test_load_missing_file() {
    let result = PointStore::load("/definitely/not/here/breaks.json");
    match result {
        Err(PosterError::DataLoad { path, .. }) => {
            assert!(path.ends_with("breaks.json"));
        }
        other => panic!("expected DataLoad, got {:?}", other),
    }
}

#[test]
fn test_fixture_points_load() {
    let file = test_utils::write_points_file(test_utils::points::SAMPLE_BREAKS);
    let store = PointStore::load(file.path()).unwrap();
    assert_eq!(store.len(), test_utils::points::SAMPLE_BREAKS.len());
}
