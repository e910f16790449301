//! Turns a raw Surface Nets mesh into a display mesh
//!
//! Vertices are scaled and shifted so the density grid sits around the
//! origin, faces are split into triangles, and normals and bounds are
//! recomputed for the transformed geometry.

use brainmap_math::{Aabb, BoundingSphere, Vec3};
use brainmap_volume::{AtlasCalibration, Dims};

use super::error::{FinalizeError, UnsupportedFaceArity};
use super::types::{triangle_normal, DisplayMesh, Face, RawMesh};

/// Default grid-to-display scale
pub const DEFAULT_DISPLAY_SCALE: f32 = 0.5;

/// Recenters and triangulates meshes for display
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshPostProcessor {
    scale: f32,
}

impl MeshPostProcessor {
    pub fn new(scale: f32) -> Self {
        Self { scale }
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Offset added after scaling: `-dims / 4 + 0.5` per axis
    pub fn recenter_offset(dims: Dims) -> Vec3 {
        Vec3::new(
            -(dims.x as f32) / 4.0 + 0.5,
            -(dims.y as f32) / 4.0 + 0.5,
            -(dims.z as f32) / 4.0 + 0.5,
        )
    }

    /// Map one grid-space vertex into display space
    #[inline]
    pub fn transform(&self, v: Vec3, dims: Dims) -> Vec3 {
        v * self.scale + Self::recenter_offset(dims)
    }

    /// Build the display mesh for `raw`, extracted from a grid of size `dims`
    ///
    /// Quads split along their `(0, 2)` diagonal. Faces with more than four
    /// vertices, or with an index past the vertex list, are rejected.
    pub fn finalize(&self, raw: &RawMesh, dims: Dims) -> Result<DisplayMesh, FinalizeError> {
        let vertices: Vec<Vec3> = raw.vertices.iter().map(|v| self.transform(*v, dims)).collect();

        let mut triangles = Vec::with_capacity(raw.faces.len() * 2);
        for (face, f) in raw.faces.iter().enumerate() {
            if let Some(&index) = f.indices().iter().find(|&&i| i as usize >= vertices.len()) {
                return Err(FinalizeError::IndexOutOfRange {
                    face,
                    index,
                    vertex_count: vertices.len(),
                });
            }
            match f {
                Face::Triangle(t) => triangles.push(*t),
                Face::Quad([a, b, c, d]) => {
                    triangles.push([*a, *b, *c]);
                    triangles.push([*a, *c, *d]);
                }
                Face::Polygon(p) => {
                    return Err(UnsupportedFaceArity { face, arity: p.len() }.into());
                }
            }
        }

        let normals = triangles
            .iter()
            .map(|[a, b, c]| {
                triangle_normal(vertices[*a as usize], vertices[*b as usize], vertices[*c as usize])
            })
            .collect();

        // Bounds cover referenced vertices only
        let mut used = Vec::with_capacity(vertices.len());
        let mut seen = vec![false; vertices.len()];
        for tri in &triangles {
            for &i in tri {
                if !seen[i as usize] {
                    seen[i as usize] = true;
                    used.push(vertices[i as usize]);
                }
            }
        }

        log::debug!(
            "Display mesh: {} vertices, {} triangles",
            vertices.len(),
            triangles.len()
        );

        Ok(DisplayMesh {
            bounding_box: Aabb::from_points(&used),
            bounding_sphere: BoundingSphere::from_points(&used),
            vertices,
            triangles,
            normals,
        })
    }
}

impl Default for MeshPostProcessor {
    fn default() -> Self {
        Self::new(DEFAULT_DISPLAY_SCALE)
    }
}

/// Place a reference brain mesh into the density display frame
///
/// Vertices go through the atlas's reference-mesh scale and offset; faces
/// are kept and normals recomputed. `mesh` must have valid triangle
/// indices, as every mesh from [`MeshPostProcessor::finalize`] does.
pub fn align_reference_mesh(mesh: &DisplayMesh, calibration: &AtlasCalibration) -> DisplayMesh {
    let vertices: Vec<Vec3> = mesh
        .vertices
        .iter()
        .map(|v| calibration.align_reference_vertex(*v))
        .collect();
    let normals = mesh
        .triangles
        .iter()
        .map(|[a, b, c]| {
            triangle_normal(vertices[*a as usize], vertices[*b as usize], vertices[*c as usize])
        })
        .collect();
    DisplayMesh {
        bounding_box: Aabb::from_points(&vertices),
        bounding_sphere: BoundingSphere::from_points(&vertices),
        vertices,
        triangles: mesh.triangles.clone(),
        normals,
    }
}
