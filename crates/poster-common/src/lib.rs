//! Common types and utilities shared across the surf poster crates and services.

pub mod bbox;
pub mod error;
pub mod point;

pub use bbox::BoundingBox;
pub use error::{PosterError, PosterResult, RenderError};
pub use point::{GeoPoint, PointStore};
