//! Geographic bounding box mapped onto a poster raster.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A latitude/longitude rectangle in degrees.
///
/// Both axes must have `min < max`; this is checked at construction so the
/// projector never divides by a zero-sized extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBoundingBox")]
pub struct BoundingBox {
    min_lat: f64,
    max_lat: f64,
    min_lon: f64,
    max_lon: f64,
}

#[derive(Deserialize)]
struct RawBoundingBox {
    min_lat: f64,
    max_lat: f64,
    min_lon: f64,
    max_lon: f64,
}

impl TryFrom<RawBoundingBox> for BoundingBox {
    type Error = BboxError;

    fn try_from(raw: RawBoundingBox) -> Result<Self, Self::Error> {
        BoundingBox::new(raw.min_lat, raw.max_lat, raw.min_lon, raw.max_lon)
    }
}

impl BoundingBox {
    /// Florida peninsula and panhandle, Key West to the Georgia line.
    pub const FLORIDA: BoundingBox = BoundingBox {
        min_lat: 24.5,
        max_lat: 31.0,
        min_lon: -87.6,
        max_lon: -79.9,
    };

    /// Create a bounding box, rejecting empty, inverted or non-finite extents.
    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Result<Self, BboxError> {
        if ![min_lat, max_lat, min_lon, max_lon].iter().all(|v| v.is_finite()) {
            return Err(BboxError::NonFinite);
        }
        if min_lat >= max_lat {
            return Err(BboxError::EmptyLatitude { min_lat, max_lat });
        }
        if min_lon >= max_lon {
            return Err(BboxError::EmptyLongitude { min_lon, max_lon });
        }

        Ok(Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        })
    }

    /// Parse a CLI bbox string: "min_lat,max_lat,min_lon,max_lon"
    pub fn from_arg_string(s: &str) -> Result<Self, BboxError> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(BboxError::InvalidFormat(s.to_string()));
        }

        let mut values = [0.0f64; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| BboxError::InvalidNumber(part.to_string()))?;
        }

        Self::new(values[0], values[1], values[2], values[3])
    }

    pub fn min_lat(&self) -> f64 {
        self.min_lat
    }

    pub fn max_lat(&self) -> f64 {
        self.max_lat
    }

    pub fn min_lon(&self) -> f64 {
        self.min_lon
    }

    pub fn max_lon(&self) -> f64 {
        self.max_lon
    }

    /// Longitude span in degrees (always positive).
    pub fn lon_span(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Latitude span in degrees (always positive).
    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Check if a coordinate lies inside the box (edges inclusive).
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lon >= self.min_lon && lon <= self.max_lon
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::FLORIDA
    }
}

impl FromStr for BoundingBox {
    type Err = BboxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_arg_string(s)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BboxError {
    #[error("Invalid bounding box format: {0}. Expected 'min_lat,max_lat,min_lon,max_lon'")]
    InvalidFormat(String),

    #[error("Invalid number in bounding box: {0}")]
    InvalidNumber(String),

    #[error("Bounding box coordinates must be finite")]
    NonFinite,

    #[error("min_lat ({min_lat}) must be less than max_lat ({max_lat})")]
    EmptyLatitude { min_lat: f64, max_lat: f64 },

    #[error("min_lon ({min_lon}) must be less than max_lon ({max_lon})")]
    EmptyLongitude { min_lon: f64, max_lon: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_arg_bbox() {
        let bbox = BoundingBox::from_arg_string("24.5,31.0,-87.6,-79.9").unwrap();
        assert_eq!(bbox, BoundingBox::FLORIDA);
    }

    #[test]
    fn test_rejects_inverted() {
        assert!(matches!(
            BoundingBox::new(31.0, 24.5, -87.6, -79.9),
            Err(BboxError::EmptyLatitude { .. })
        ));
        assert!(matches!(
            BoundingBox::new(24.5, 31.0, -79.9, -79.9),
            Err(BboxError::EmptyLongitude { .. })
        ));
    }
}
