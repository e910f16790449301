//! Density volumes for the brainmap viewer
//!
//! This crate turns scattered stereotaxic coordinates into dense scalar
//! grids:
//!
//! - [`Volume`] - Dense 3D grid with a flat `z * ly * lx + y * lx + x` layout
//! - [`Kernel`] - Spherical splatting footprint
//! - [`AtlasCalibration`] - Grid/millimetre mapping and display constants per atlas
//! - [`DensityBuilder`] - Accumulates points into a [`DensityVolume`]
//! - [`CoordinatesPayload`] - JSON coordinate list with per-record decode errors
//! - [`TemplateVolume`] - 8-bit anatomical template

mod volume;
mod kernel;
mod atlas;
mod points;
mod density;
mod template;

pub use volume::{Dims, SliceAxis, Volume, VolumeError};
pub use kernel::{Kernel, DEFAULT_KERNEL_RADIUS, MAX_KERNEL_RADIUS};
pub use atlas::{AtlasCalibration, AtlasId, ReferenceMeshCalibration};
pub use points::{
    decode_coordinates, parse_coordinate, CoordinatesPayload, DecodeError, DecodeErrorKind,
    DecodedPoints, PayloadError,
};
pub use density::{DensityBuilder, DensityVolume};
pub use template::{
    decode_template, decode_template_f32_le, decode_template_u8, rescale_to_u8, TemplateFormat,
    TemplateVolume,
};

// Re-export the vector type used for point coordinates
pub use brainmap_math::Vec3;
