//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`BM_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

use brainmap_volume::{
    AtlasCalibration, AtlasId, SliceAxis, TemplateFormat, DEFAULT_KERNEL_RADIUS, MAX_KERNEL_RADIUS,
};
use brainmap_render::DEFAULT_OVERLAY_ALPHA;
use brainmap_render::mesh::DEFAULT_DISPLAY_SCALE;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Density volume configuration
    #[serde(default)]
    pub volume: VolumeConfig,
    /// 2D slice view configuration
    #[serde(default)]
    pub slice: SliceConfig,
    /// Isosurface configuration
    #[serde(default)]
    pub mesh: MeshConfig,
    /// Output file configuration
    #[serde(default)]
    pub output: OutputConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`BM_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // BM_MESH__ISO_LEVEL=0.3 -> mesh.iso_level = 0.3
        figment = figment.merge(Env::prefixed("BM_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Density volume configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeConfig {
    /// Atlas the coordinates are registered to
    pub atlas: AtlasId,
    /// Splatting kernel radius in density cells (clamped to `0..=64`)
    pub kernel_radius: i32,
}

impl VolumeConfig {
    /// Atlas calibration with the configured kernel radius
    pub fn calibration(&self) -> AtlasCalibration {
        let radius = self.kernel_radius.clamp(0, MAX_KERNEL_RADIUS);
        if radius != self.kernel_radius {
            log::warn!(
                "volume.kernel_radius {} out of range, using {}",
                self.kernel_radius,
                radius
            );
        }
        self.atlas.calibration().with_kernel_radius(radius)
    }
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            atlas: AtlasId::Colin27,
            kernel_radius: DEFAULT_KERNEL_RADIUS,
        }
    }
}

/// 2D slice view configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SliceConfig {
    /// Slicing axis (sagittal, coronal, axial)
    pub axis: SliceAxis,
    /// Slice position as a percentage of the axis extent
    pub position: f32,
    /// Opacity of the density overlay drawn over the template
    pub overlay_alpha: f32,
    /// Raw anatomical template, drawn beneath the density slice
    pub template_path: Option<String>,
    /// Voxel encoding of the template file (u8 or f32)
    pub template_format: TemplateFormat,
}

impl Default for SliceConfig {
    fn default() -> Self {
        Self {
            axis: SliceAxis::Axial,
            position: 50.0,
            overlay_alpha: DEFAULT_OVERLAY_ALPHA,
            template_path: None,
            template_format: TemplateFormat::U8,
        }
    }
}

/// Isosurface configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    /// Threshold as a fraction of the maximum density
    pub relative_level: f32,
    /// Isovalue applied to the thresholded field
    pub iso_level: f32,
    /// Grid-to-display scale
    pub display_scale: f32,
    /// Emit quads from the mesher instead of triangle pairs
    pub emit_quads: bool,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            relative_level: 0.5,
            iso_level: 0.5,
            display_scale: DEFAULT_DISPLAY_SCALE,
            emit_quads: false,
        }
    }
}

/// Output file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Composited slice image (PNG)
    pub slice_png: String,
    /// Display mesh (Wavefront OBJ)
    pub mesh_obj: String,
    /// Flat-shaded vertex stream (raw position + normal f32s)
    pub mesh_vertices: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            slice_png: "slice.png".to_string(),
            mesh_obj: "mesh.obj".to_string(),
            mesh_vertices: None,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
