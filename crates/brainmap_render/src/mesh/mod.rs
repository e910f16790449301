//! Isosurface meshing
//!
//! Surface Nets extraction over a scalar grid, followed by recentering and
//! triangulation for display.

pub mod lookup_tables;
pub mod types;
pub mod error;
pub mod surface_nets;
pub mod post_process;

pub use lookup_tables::{CUBE_EDGES, EDGE_TABLE};

pub use types::{Face, ExtractStats, RawMesh, MeshVertex, DisplayMesh, triangle_normal};

pub use error::{DimensionError, FinalizeError, UnsupportedFaceArity};

pub use surface_nets::{SurfaceNets, extract_surface, face_normals, DEGENERATE_EDGE_EPSILON};
pub use post_process::{MeshPostProcessor, align_reference_mesh, DEFAULT_DISPLAY_SCALE};
