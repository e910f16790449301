//! Spherical splatting kernel
//!
//! The kernel is the set of integer offsets `(dx, dy, dz)` with
//! `dx² + dy² + dz² <= R²`. It is built once and shared by every point
//! accumulated into a density volume.

/// Default kernel radius in grid cells
pub const DEFAULT_KERNEL_RADIUS: i32 = 3;

/// Largest accepted kernel radius; a ball this size already covers the
/// whole 45x54x45 density grid from its center
pub const MAX_KERNEL_RADIUS: i32 = 64;

/// Immutable set of lattice offsets inside a sphere
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Kernel {
    radius: i32,
    offsets: Vec<[i32; 3]>,
}

impl Kernel {
    /// Enumerate every lattice offset within `radius` of the origin
    ///
    /// Offsets are ordered x outer, y middle, z inner. The radius is
    /// clamped to `0..=MAX_KERNEL_RADIUS`, so a negative radius gives a
    /// single-cell kernel.
    pub fn spherical(radius: i32) -> Self {
        let r = radius.clamp(0, MAX_KERNEL_RADIUS);
        if r != radius {
            log::warn!("Kernel radius {} clamped to {}", radius, r);
        }
        let r_sq = r * r;
        let mut offsets = Vec::new();
        for dx in -r..=r {
            for dy in -r..=r {
                for dz in -r..=r {
                    if dx * dx + dy * dy + dz * dz <= r_sq {
                        offsets.push([dx, dy, dz]);
                    }
                }
            }
        }
        Self { radius: r, offsets }
    }

    #[inline]
    pub fn radius(&self) -> i32 {
        self.radius
    }

    #[inline]
    pub fn offsets(&self) -> &[[i32; 3]] {
        &self.offsets
    }

    /// Number of cells in the footprint
    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Self::spherical(DEFAULT_KERNEL_RADIUS)
    }
}
