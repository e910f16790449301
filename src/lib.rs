//! Brainmap - density maps of stereotaxic coordinates
//!
//! Splats point observations into a density volume over an anatomical
//! atlas, renders it as composited 2D slices and extracts an isosurface
//! for 3D display.

pub mod config;
pub mod session;
pub mod export;

pub use config::{AppConfig, ConfigError};
pub use session::{DirtyFlags, ViewerSession};
pub use export::ExportError;
