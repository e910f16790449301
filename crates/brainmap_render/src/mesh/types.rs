//! Mesh data handed between the mesher, the post-processor and the renderer

use bytemuck::{Pod, Zeroable};
use brainmap_math::{Aabb, BoundingSphere, Vec3};

/// A polygon as emitted by the mesher
///
/// The arity is resolved once, in the post-processor, which splits quads
/// into triangles and rejects anything larger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Face {
    Triangle([u32; 3]),
    Quad([u32; 4]),
    /// More than four vertices; triangulation is not supported
    Polygon(Vec<u32>),
}

impl Face {
    /// Vertex indices in winding order
    pub fn indices(&self) -> &[u32] {
        match self {
            Face::Triangle(t) => t,
            Face::Quad(q) => q,
            Face::Polygon(p) => p,
        }
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.indices().len()
    }
}

/// Counters collected during one extraction pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExtractStats {
    /// Cells visited by the raster pass
    pub cells_visited: usize,
    /// Cells whose corners straddle the isovalue (one vertex each)
    pub straddling_cells: usize,
    /// Crossed edges skipped because their endpoint values were nearly equal
    pub degenerate_edges: usize,
}

/// Isosurface as produced by Surface Nets, in grid coordinates
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawMesh {
    pub vertices: Vec<Vec3>,
    pub faces: Vec<Face>,
    /// One unit normal per face, following the face winding
    pub normals: Vec<Vec3>,
    pub stats: ExtractStats,
}

impl RawMesh {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.faces.is_empty()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }
}

/// Unit normal of triangle (a, b, c), following its winding
///
/// Degenerate triangles get a zero normal.
#[inline]
pub fn triangle_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a).normalized()
}

/// A vertex ready for upload, one per triangle corner
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Triangulated, recentered mesh for display
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayMesh {
    pub vertices: Vec<Vec3>,
    pub triangles: Vec<[u32; 3]>,
    /// One unit normal per triangle
    pub normals: Vec<Vec3>,
    /// `None` for an empty mesh
    pub bounding_box: Option<Aabb>,
    pub bounding_sphere: Option<BoundingSphere>,
}

impl DisplayMesh {
    pub fn empty() -> Self {
        Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
            normals: Vec::new(),
            bounding_box: None,
            bounding_sphere: None,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Flat-shaded vertex stream: three vertices per triangle carrying the face normal
    pub fn flat_vertices(&self) -> Vec<MeshVertex> {
        let mut out = Vec::with_capacity(self.triangles.len() * 3);
        for (tri, normal) in self.triangles.iter().zip(&self.normals) {
            for &i in tri {
                out.push(MeshVertex {
                    position: self.vertices[i as usize].to_array(),
                    normal: normal.to_array(),
                });
            }
        }
        out
    }

    /// [`flat_vertices`](Self::flat_vertices) as raw bytes: six native-endian
    /// f32 per vertex, position then normal
    pub fn flat_vertex_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.flat_vertices()).to_vec()
    }
}

impl Default for DisplayMesh {
    fn default() -> Self {
        Self::empty()
    }
}
