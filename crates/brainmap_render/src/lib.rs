//! Slice rendering and isosurface meshing for the brainmap viewer
//!
//! ## Key Components
//!
//! - [`colormap::ColorTable`] - Scalar-to-RGB transfer function
//! - [`slice::SliceRenderer`] - Axis-aligned slices into RGBA pixel buffers
//! - [`mesh::SurfaceNets`] - Dual-grid isosurface extraction
//! - [`mesh::MeshPostProcessor`] - Recentering, triangulation and normals for display

pub mod color_tables;
pub mod colormap;
pub mod slice;
pub mod mesh;

pub use colormap::{ColorTable, ColorTableError};
pub use slice::{PixelBuffer, SliceRenderer, DEFAULT_OVERLAY_ALPHA};
pub use mesh::{
    DisplayMesh, DimensionError, Face, FinalizeError, MeshPostProcessor, RawMesh, SurfaceNets,
    UnsupportedFaceArity,
};

// Re-export volume types for convenience
pub use brainmap_volume::{DensityVolume, Dims, SliceAxis, TemplateVolume, Volume};
pub use brainmap_math::Vec3;
