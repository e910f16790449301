//! Atlas calibration
//!
//! The grid-to-millimetre mapping, grid sizes and display offsets all belong
//! to the anatomical atlas the data is registered to. They are kept together
//! here, selected by [`AtlasId`], so an alternate atlas only needs a new
//! calibration entry.

use std::fmt;
use serde::{Serialize, Deserialize};
use brainmap_math::Vec3;

use crate::kernel::{DEFAULT_KERNEL_RADIUS, MAX_KERNEL_RADIUS};
use crate::volume::{Dims, SliceAxis};

/// Identifier of a supported anatomical atlas
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AtlasId {
    /// Colin 27 single-subject template in MNI space
    #[default]
    Colin27,
}

impl AtlasId {
    /// Calibration constants for this atlas
    pub fn calibration(self) -> AtlasCalibration {
        match self {
            AtlasId::Colin27 => AtlasCalibration::colin27(),
        }
    }
}

impl fmt::Display for AtlasId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtlasId::Colin27 => f.write_str("colin27"),
        }
    }
}

/// Calibration of the reference anatomical surface mesh
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReferenceMeshCalibration {
    /// Uniform scale applied to reference mesh vertices
    pub scale: f32,
    /// Translation applied after scaling
    pub offset: [f32; 3],
}

/// Constants tying grid space to an atlas
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AtlasCalibration {
    pub atlas: AtlasId,
    /// Edge length of a density cell in millimetres
    pub voxel_size_mm: f32,
    /// Grid coordinate of the millimetre origin, per axis
    pub grid_offset: [f32; 3],
    /// Density volume grid
    pub density_dims: Dims,
    /// Anatomical template grid
    pub template_dims: Dims,
    /// Millimetre coordinate subtracted from template indices for slice labels
    pub label_origin_mm: [i32; 3],
    /// Default splatting kernel radius in density cells
    pub kernel_radius: i32,
    pub reference_mesh: ReferenceMeshCalibration,
}

impl AtlasCalibration {
    /// Colin 27 at 4 mm density resolution over a 1 mm template
    pub const fn colin27() -> Self {
        Self {
            atlas: AtlasId::Colin27,
            voxel_size_mm: 4.0,
            grid_offset: [22.0, 31.0, 17.5],
            density_dims: Dims::new(45, 54, 45),
            template_dims: Dims::new(180, 216, 180),
            label_origin_mm: [88, 124, 70],
            kernel_radius: DEFAULT_KERNEL_RADIUS,
            reference_mesh: ReferenceMeshCalibration {
                scale: 0.14,
                offset: [0.0, 3.0, -2.0],
            },
        }
    }

    /// Override the splatting kernel radius, clamped to `0..=MAX_KERNEL_RADIUS`
    pub fn with_kernel_radius(mut self, radius: i32) -> Self {
        self.kernel_radius = radius.clamp(0, MAX_KERNEL_RADIUS);
        self
    }

    /// Integer grid cell containing a millimetre coordinate
    ///
    /// `floor(mm / voxel_size + offset)` per axis. The result may lie
    /// outside the grid; callers range-check before use.
    pub fn mm_to_grid(&self, p: Vec3) -> [i64; 3] {
        let mut cell = [0i64; 3];
        for (axis, c) in cell.iter_mut().enumerate() {
            *c = (p[axis] / self.voxel_size_mm + self.grid_offset[axis]).floor() as i64;
        }
        cell
    }

    /// Millimetre coordinate of a grid cell's lower corner
    pub fn grid_to_mm(&self, cell: [i64; 3]) -> Vec3 {
        let mut p = Vec3::ZERO;
        for axis in 0..3 {
            p[axis] = (cell[axis] as f32 - self.grid_offset[axis]) * self.voxel_size_mm;
        }
        p
    }

    /// Millimetre coordinate of the slice shown at `percent` along `axis`
    pub fn slice_coordinate_mm(&self, axis: SliceAxis, percent: f32) -> i32 {
        let extent = self.template_dims.extent(axis) as f32;
        let percent = if percent.is_finite() { percent.clamp(0.0, 100.0) } else { 0.0 };
        (extent * percent / 100.0).round() as i32 - self.label_origin_mm[axis.axis_index()]
    }

    /// Human-readable slice label, e.g. `Z: 20`
    pub fn slice_label(&self, axis: SliceAxis, percent: f32) -> String {
        format!("{}: {}", axis.label(), self.slice_coordinate_mm(axis, percent))
    }

    /// Move a reference surface vertex into the display frame of extracted meshes
    pub fn align_reference_vertex(&self, v: Vec3) -> Vec3 {
        v * self.reference_mesh.scale + Vec3::from_array(self.reference_mesh.offset)
    }
}

impl Default for AtlasCalibration {
    fn default() -> Self {
        Self::colin27()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mm_to_grid_origin() {
        let cal = AtlasCalibration::colin27();
        assert_eq!(cal.mm_to_grid(Vec3::ZERO), [22, 31, 17]);
    }

    #[test]
    fn test_mm_to_grid_floors_negative() {
        let cal = AtlasCalibration::colin27();
        // -90 / 4 + 22 = -0.5 -> -1
        assert_eq!(cal.mm_to_grid(Vec3::new(-90.0, 0.0, 0.0))[0], -1);
        assert_eq!(cal.mm_to_grid(Vec3::new(-16.0, -16.0, 18.0)), [18, 27, 22]);
    }

    #[test]
    fn test_grid_to_mm_round_trips_lattice() {
        let cal = AtlasCalibration::colin27();
        let cell = [10, 20, 30];
        assert_eq!(cal.mm_to_grid(cal.grid_to_mm(cell)), cell);
    }

    #[test]
    fn test_slice_labels() {
        let cal = AtlasCalibration::colin27();
        assert_eq!(cal.slice_coordinate_mm(SliceAxis::Sagittal, 50.0), 2);
        assert_eq!(cal.slice_coordinate_mm(SliceAxis::Coronal, 50.0), -16);
        assert_eq!(cal.slice_label(SliceAxis::Axial, 50.0), "Z: 20");
    }

    #[test]
    fn test_reference_alignment() {
        let cal = AtlasCalibration::colin27();
        let v = cal.align_reference_vertex(Vec3::new(100.0, 0.0, 0.0));
        assert!((v.x - 14.0).abs() < 1e-4);
        assert_eq!(v.y, 3.0);
        assert_eq!(v.z, -2.0);
    }

    #[test]
    fn test_atlas_id_lookup() {
        assert_eq!(AtlasId::Colin27.calibration(), AtlasCalibration::default());
        assert_eq!(AtlasId::default().to_string(), "colin27");
    }
}
