//! Label anchor placement for point markers.
//!
//! The heuristic follows the shape of the Florida coast: breaks in the Keys
//! and the far south get their label below the marker, everything else is
//! pushed out to sea on whichever coast (Atlantic or Gulf) is closer. The
//! anchor is then clamped so a label box of roughly 200x50 px stays on the
//! raster. Nearby labels can still overlap; there is no de-overlap pass.

use std::fmt;

use poster_common::BoundingBox;
use serde::Serialize;

use crate::equirect::Equirectangular;

/// Latitude below which labels are placed south of their marker.
pub const SOUTH_LABEL_LATITUDE: f64 = 26.0;

/// Vertical offset for south-facing labels.
pub const SOUTH_OFFSET_PX: i32 = 30;

/// Horizontal offset for east/west-facing labels.
pub const SIDE_OFFSET_PX: i32 = 40;

/// Minimum distance between a label anchor and the top/left raster edge.
pub const EDGE_MARGIN_PX: i32 = 10;

/// Space reserved to the right of the anchor for label text.
pub const LABEL_BOX_WIDTH: i32 = 200;

/// Space reserved below the anchor for the two label lines.
pub const LABEL_BOX_HEIGHT: i32 = 50;

/// Compass direction of the label relative to its marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelDirection {
    South,
    East,
    West,
}

impl fmt::Display for LabelDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LabelDirection::South => "south",
            LabelDirection::East => "east",
            LabelDirection::West => "west",
        };
        f.write_str(s)
    }
}

/// Where a label's text block is anchored (its top-left corner).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelPlacement {
    pub x: i32,
    pub y: i32,
    pub direction: LabelDirection,
}

/// Pick a label anchor for the marker at pixel `(x, y)`.
///
/// The result always lies within `[10, width-200] x [10, height-50]`; on
/// rasters too small for that range the lower bound wins.
pub fn place_label(x: i32, y: i32, width: u32, height: u32, bbox: &BoundingBox) -> LabelPlacement {
    let projection = Equirectangular::new(*bbox, width, height);
    let (lat, lon) = projection.pixel_to_geo(x as f64, y as f64);

    let distance_to_east = (lon - bbox.max_lon()).abs();
    let distance_to_west = (lon - bbox.min_lon()).abs();

    let (label_x, label_y, direction) = if lat < SOUTH_LABEL_LATITUDE {
        (x, y.saturating_add(SOUTH_OFFSET_PX), LabelDirection::South)
    } else if distance_to_east < distance_to_west {
        (x.saturating_add(SIDE_OFFSET_PX), y, LabelDirection::East)
    } else {
        (x.saturating_sub(SIDE_OFFSET_PX), y, LabelDirection::West)
    };

    LabelPlacement {
        x: clamp_to_margin(label_x, width as i64 - LABEL_BOX_WIDTH as i64),
        y: clamp_to_margin(label_y, height as i64 - LABEL_BOX_HEIGHT as i64),
        direction,
    }
}

/// `max(EDGE_MARGIN_PX, min(upper, value))`
fn clamp_to_margin(value: i32, upper: i64) -> i32 {
    let clamped = (value as i64).min(upper).max(EDGE_MARGIN_PX as i64);
    clamped as i32
}
