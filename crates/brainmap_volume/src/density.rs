//! Density volume construction
//!
//! Each point observation is splatted into a regular integer grid through a
//! spherical [`Kernel`]. The builder performs a full rebuild on every call:
//! a fresh volume is allocated, filled and handed back, so a caller holding
//! the previous volume never sees a half-built one.

use brainmap_math::Vec3;

use crate::atlas::AtlasCalibration;
use crate::kernel::Kernel;
use crate::points::{decode_coordinates, DecodeError};
use crate::volume::{Dims, Volume};

/// Accumulated point density with its running maximum
#[derive(Clone, Debug, PartialEq)]
pub struct DensityVolume {
    volume: Volume<u32>,
    max_value: u32,
    point_count: usize,
}

impl DensityVolume {
    /// An all-zero density volume
    pub fn empty(dims: Dims) -> Self {
        Self {
            volume: Volume::new(dims),
            max_value: 0,
            point_count: 0,
        }
    }

    #[inline]
    pub fn volume(&self) -> &Volume<u32> {
        &self.volume
    }

    #[inline]
    pub fn dims(&self) -> Dims {
        self.volume.dims()
    }

    /// Largest cell value (0 when no point landed in the grid)
    #[inline]
    pub fn max_value(&self) -> u32 {
        self.max_value
    }

    /// Number of points that were accumulated
    #[inline]
    pub fn point_count(&self) -> usize {
        self.point_count
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> u32 {
        self.volume.get(x, y, z)
    }

    /// Number of cells with a nonzero count
    pub fn nonzero_cells(&self) -> usize {
        self.volume.as_slice().iter().filter(|v| **v > 0).count()
    }

    /// Scalar field `value - max * relative_level` for isosurface extraction
    ///
    /// With the mesher run at level 0.5 this places the surface just above
    /// `relative_level` of the maximum density, so the threshold shown to the
    /// user is independent of the dataset size.
    pub fn threshold_field(&self, relative_level: f32) -> Volume<f32> {
        let offset = self.max_value as f32 * relative_level;
        self.volume.map(|v| v as f32 - offset)
    }
}

/// Splats point observations into a density volume
#[derive(Clone, Debug)]
pub struct DensityBuilder {
    calibration: AtlasCalibration,
    kernel: Kernel,
}

impl DensityBuilder {
    /// Builder for an atlas, with the kernel radius taken from the calibration
    pub fn new(calibration: AtlasCalibration) -> Self {
        Self {
            kernel: Kernel::spherical(calibration.kernel_radius),
            calibration,
        }
    }

    #[inline]
    pub fn calibration(&self) -> &AtlasCalibration {
        &self.calibration
    }

    #[inline]
    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    #[inline]
    pub fn dims(&self) -> Dims {
        self.calibration.density_dims
    }

    /// Build a density volume from decoded millimetre points
    ///
    /// Contributions falling outside the grid are dropped. Cost is
    /// O(points * kernel cells).
    pub fn accumulate(&self, points: &[Vec3]) -> DensityVolume {
        let dims = self.dims();
        let mut density = DensityVolume::empty(dims);
        let data = density.volume.as_mut_slice();
        let mut max_value = 0u32;

        for p in points {
            let [gx, gy, gz] = self.calibration.mm_to_grid(*p);
            for [dx, dy, dz] in self.kernel.offsets() {
                // Saturated grid coordinates from huge inputs must not wrap back into range
                let cell = match (
                    gx.checked_add(*dx as i64),
                    gy.checked_add(*dy as i64),
                    gz.checked_add(*dz as i64),
                ) {
                    (Some(x), Some(y), Some(z)) => dims.checked_index(x, y, z),
                    _ => None,
                };
                if let Some(i) = cell {
                    let v = data[i].saturating_add(1);
                    data[i] = v;
                    if v > max_value {
                        max_value = v;
                    }
                }
            }
        }

        density.max_value = max_value;
        density.point_count = points.len();
        log::debug!(
            "Accumulated {} points into {} grid (kernel {} cells, max {})",
            points.len(),
            dims,
            self.kernel.len(),
            max_value
        );
        density
    }

    /// Decode `"x,y,z"` records and accumulate the ones that parse
    ///
    /// Malformed records are skipped and returned; they never abort the batch.
    pub fn accumulate_records<S: AsRef<str>>(&self, records: &[S]) -> (DensityVolume, Vec<DecodeError>) {
        let decoded = decode_coordinates(records);
        (self.accumulate(&decoded.points), decoded.errors)
    }
}

impl Default for DensityBuilder {
    fn default() -> Self {
        Self::new(AtlasCalibration::colin27())
    }
}
