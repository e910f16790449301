//! Viewer session
//!
//! Holds the current density volume and the two views built from it: the
//! composited 2D slice and the 3D display mesh. Edits only mark what they
//! invalidate; [`ViewerSession::refresh`] rebuilds those outputs into fresh
//! buffers and swaps them in whole, so readers never see a half-built view.

use bitflags::bitflags;

use brainmap_render::mesh::{
    DisplayMesh, ExtractStats, FinalizeError, MeshPostProcessor, SurfaceNets,
};
use brainmap_render::{ColorTable, PixelBuffer, SliceRenderer};
use brainmap_volume::{
    AtlasCalibration, CoordinatesPayload, DecodeError, DensityBuilder, DensityVolume, SliceAxis,
    TemplateVolume, Vec3,
};

use crate::config::AppConfig;

bitflags! {
    /// Outputs that are out of date and need rebuilding
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct DirtyFlags: u8 {
        /// No changes
        const NONE = 0;
        /// Slice image (axis, position, template or density changed)
        const SLICE = 1 << 0;
        /// Display mesh (threshold or density changed)
        const MESH = 1 << 1;
        /// Everything needs a rebuild
        const ALL = Self::SLICE.bits() | Self::MESH.bits();
    }
}

/// Density volume plus the slice and mesh views built over it
pub struct ViewerSession {
    builder: DensityBuilder,
    renderer: SliceRenderer,
    mesher: SurfaceNets,
    post: MeshPostProcessor,
    template: Option<TemplateVolume>,

    axis: SliceAxis,
    position: f32,
    relative_level: f32,
    iso_level: f32,

    density: DensityVolume,
    decode_errors: Vec<DecodeError>,
    slice: PixelBuffer,
    mesh: DisplayMesh,
    mesh_stats: ExtractStats,
    dirty: DirtyFlags,
}

impl ViewerSession {
    /// Empty session for `calibration` with default view settings
    pub fn new(calibration: AtlasCalibration) -> Self {
        let builder = DensityBuilder::new(calibration);
        let density = DensityVolume::empty(builder.dims());
        Self {
            builder,
            renderer: SliceRenderer::new(ColorTable::negpos()),
            mesher: SurfaceNets::new(),
            post: MeshPostProcessor::default(),
            template: None,
            axis: SliceAxis::Axial,
            position: 50.0,
            relative_level: 0.5,
            iso_level: 0.5,
            density,
            decode_errors: Vec::new(),
            slice: PixelBuffer::new(0, 0),
            mesh: DisplayMesh::empty(),
            mesh_stats: ExtractStats::default(),
            dirty: DirtyFlags::ALL,
        }
    }

    /// Session configured from the application config
    pub fn from_config(config: &AppConfig) -> Self {
        let mut session = Self::new(config.volume.calibration());
        session.renderer = SliceRenderer::new(ColorTable::negpos())
            .with_overlay_alpha(config.slice.overlay_alpha);
        session.mesher = SurfaceNets::new().with_quads(config.mesh.emit_quads);
        session.post = MeshPostProcessor::new(config.mesh.display_scale);
        session.axis = config.slice.axis;
        session.position = config.slice.position;
        session.relative_level = config.mesh.relative_level;
        session.iso_level = config.mesh.iso_level;
        session
    }

    /// Draw `template` beneath the density slice
    pub fn with_template(mut self, template: TemplateVolume) -> Self {
        self.set_template(Some(template));
        self
    }

    // --- Inputs ---

    /// Replace the dataset with `points`
    pub fn load_points(&mut self, points: &[Vec3]) {
        self.density = self.builder.accumulate(points);
        self.decode_errors.clear();
        self.mark_dirty(DirtyFlags::ALL);
        log::info!(
            "Loaded {} points (max density {})",
            points.len(),
            self.density.max_value()
        );
    }

    /// Replace the dataset with decoded `"x,y,z"` records
    ///
    /// Malformed records are skipped and kept in [`Self::decode_errors`].
    pub fn load_records<S: AsRef<str>>(&mut self, records: &[S]) -> &[DecodeError] {
        let (density, errors) = self.builder.accumulate_records(records);
        self.density = density;
        self.decode_errors = errors;
        self.mark_dirty(DirtyFlags::ALL);
        if !self.decode_errors.is_empty() {
            log::warn!(
                "Skipped {} of {} coordinate records",
                self.decode_errors.len(),
                records.len()
            );
        }
        log::info!(
            "Loaded {} points (max density {})",
            self.density.point_count(),
            self.density.max_value()
        );
        &self.decode_errors
    }

    /// Replace the dataset with the records of a coordinates payload
    pub fn load_payload(&mut self, payload: &CoordinatesPayload) -> &[DecodeError] {
        self.load_records(&payload.coordinates)
    }

    pub fn set_template(&mut self, template: Option<TemplateVolume>) {
        self.template = template;
        self.mark_dirty(DirtyFlags::SLICE);
    }

    pub fn set_axis(&mut self, axis: SliceAxis) {
        if axis != self.axis {
            self.axis = axis;
            self.mark_dirty(DirtyFlags::SLICE);
        }
    }

    /// Set the slice position as a percentage of the axis extent
    pub fn set_position(&mut self, position: f32) {
        if position != self.position {
            self.position = position;
            self.mark_dirty(DirtyFlags::SLICE);
        }
    }

    pub fn set_slice(&mut self, axis: SliceAxis, position: f32) {
        self.set_axis(axis);
        self.set_position(position);
    }

    /// Set the threshold as a fraction of the maximum density
    pub fn set_relative_level(&mut self, level: f32) {
        if level != self.relative_level {
            self.relative_level = level;
            self.mark_dirty(DirtyFlags::MESH);
        }
    }

    pub fn set_iso_level(&mut self, level: f32) {
        if level != self.iso_level {
            self.iso_level = level;
            self.mark_dirty(DirtyFlags::MESH);
        }
    }

    // --- Dirty tracking ---

    #[inline]
    pub fn dirty_flags(&self) -> DirtyFlags {
        self.dirty
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    #[inline]
    pub fn mark_dirty(&mut self, flags: DirtyFlags) {
        self.dirty |= flags;
    }

    /// Rebuild every out-of-date output and swap it in
    ///
    /// Returns the outputs that were rebuilt. On error nothing is swapped
    /// and the dirty flags are kept.
    pub fn refresh(&mut self) -> Result<DirtyFlags, FinalizeError> {
        let dirty = self.dirty;

        let mesh = if dirty.contains(DirtyFlags::MESH) {
            let field = self.density.threshold_field(self.relative_level);
            let raw = self.mesher.extract(&field, self.iso_level);
            let mesh = self.post.finalize(&raw, self.density.dims())?;
            Some((mesh, raw.stats))
        } else {
            None
        };

        let slice = if dirty.contains(DirtyFlags::SLICE) {
            Some(self.renderer.render(
                &self.density,
                self.template.as_ref(),
                self.axis,
                self.position,
            ))
        } else {
            None
        };

        if let Some((mesh, stats)) = mesh {
            self.mesh = mesh;
            self.mesh_stats = stats;
        }
        if let Some(slice) = slice {
            self.slice = slice;
        }
        self.dirty = DirtyFlags::NONE;

        log::debug!("Refreshed {:?}", dirty);
        Ok(dirty)
    }

    // --- Outputs ---

    #[inline]
    pub fn density(&self) -> &DensityVolume {
        &self.density
    }

    #[inline]
    pub fn decode_errors(&self) -> &[DecodeError] {
        &self.decode_errors
    }

    /// Last composited slice
    #[inline]
    pub fn slice(&self) -> &PixelBuffer {
        &self.slice
    }

    /// Last display mesh
    #[inline]
    pub fn mesh(&self) -> &DisplayMesh {
        &self.mesh
    }

    /// Extraction counters for the last display mesh
    #[inline]
    pub fn mesh_stats(&self) -> ExtractStats {
        self.mesh_stats
    }

    #[inline]
    pub fn calibration(&self) -> &AtlasCalibration {
        self.builder.calibration()
    }

    #[inline]
    pub fn axis(&self) -> SliceAxis {
        self.axis
    }

    #[inline]
    pub fn position(&self) -> f32 {
        self.position
    }

    /// Millimetre label of the current slice, e.g. `Z: 20`
    pub fn slice_label(&self) -> String {
        self.calibration().slice_label(self.axis, self.position)
    }
}

impl Default for ViewerSession {
    fn default() -> Self {
        Self::new(AtlasCalibration::colin27())
    }
}
