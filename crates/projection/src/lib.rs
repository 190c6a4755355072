//! Geographic to pixel transformations for poster rasters.
//!
//! Only flat equirectangular scaling is supported: latitude and longitude are
//! mapped linearly onto the raster, with north at the top.

pub mod equirect;
pub mod label;

pub use equirect::{in_raster, project, unproject, Equirectangular};
pub use label::{place_label, LabelDirection, LabelPlacement};
