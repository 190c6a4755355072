//! Geocoded surf break points and the in-memory store they are loaded into.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{PosterError, PosterResult};

/// Category assigned to records that carry no `break_type`.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// A named, categorised location on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoPoint {
    name: String,
    latitude: f64,
    longitude: f64,
    category: String,
}

impl GeoPoint {
    /// Create a point, rejecting latitudes outside [-90, 90] and longitudes
    /// outside [-180, 180].
    pub fn new(
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        category: impl Into<String>,
    ) -> PosterResult<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(PosterError::Validation(format!(
                "Invalid latitude: {}",
                latitude
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(PosterError::Validation(format!(
                "Invalid longitude: {}",
                longitude
            )));
        }

        Ok(Self {
            name: name.into(),
            latitude,
            longitude,
            category: category.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn category(&self) -> &str {
        &self.category
    }
}

/// Raw record shape as written by the scraper. Every field is optional so a
/// single bad record never fails the whole file.
#[derive(Debug, Deserialize)]
struct RawRecord {
    name: Option<String>,
    latitude: Option<Value>,
    longitude: Option<Value>,
    break_type: Option<String>,
}

/// Immutable list of validated points, loaded once and shared by reference
/// across any number of renders.
#[derive(Debug, Clone, Default)]
pub struct PointStore {
    points: Vec<GeoPoint>,
}

impl PointStore {
    pub fn from_points(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }

    /// Load points from a JSON file.
    ///
    /// A missing file or a file that is not a JSON array fails with
    /// `DataLoad`. Individual records that are incomplete or invalid are
    /// skipped with a warning.
    pub fn load(path: impl AsRef<Path>) -> PosterResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| PosterError::DataLoad {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let store = Self::from_json(&content).map_err(|e| match e {
            PosterError::DataLoad { message, .. } => PosterError::DataLoad {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })?;

        info!(path = %path.display(), count = store.len(), "Loaded surf break points");
        Ok(store)
    }

    /// Parse points from a JSON array string.
    pub fn from_json(json: &str) -> PosterResult<Self> {
        let records: Vec<Value> = serde_json::from_str(json).map_err(|e| PosterError::DataLoad {
            path: Default::default(),
            message: format!("Invalid JSON: {}", e),
        })?;

        let total = records.len();
        let points: Vec<GeoPoint> = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match parse_record(record) {
                Ok(point) => Some(point),
                Err(reason) => {
                    warn!(index, reason = %reason, "Skipping invalid point record");
                    None
                }
            })
            .collect();

        if points.len() < total {
            warn!(
                kept = points.len(),
                dropped = total - points.len(),
                "Some point records were dropped"
            );
        }

        Ok(Self { points })
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GeoPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl<'a> IntoIterator for &'a PointStore {
    type Item = &'a GeoPoint;
    type IntoIter = std::slice::Iter<'a, GeoPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

fn parse_record(record: Value) -> Result<GeoPoint, String> {
    let raw: RawRecord = serde_json::from_value(record).map_err(|e| e.to_string())?;

    let latitude = raw
        .latitude
        .as_ref()
        .and_then(non_null)
        .ok_or("missing latitude")?;
    let longitude = raw
        .longitude
        .as_ref()
        .and_then(non_null)
        .ok_or("missing longitude")?;
    let name = raw.name.ok_or("missing name")?;

    let latitude = parse_coordinate(latitude).ok_or("malformed latitude")?;
    let longitude = parse_coordinate(longitude).ok_or("malformed longitude")?;
    let category = raw
        .break_type
        .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string());

    GeoPoint::new(name, latitude, longitude, category).map_err(|e| e.to_string())
}

fn non_null(value: &Value) -> Option<&Value> {
    (!value.is_null()).then_some(value)
}

/// Accept JSON numbers and numeric strings such as `"27.5"`.
fn parse_coordinate(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}
