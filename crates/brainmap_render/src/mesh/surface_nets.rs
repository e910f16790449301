//! Surface Nets isosurface extraction
//!
//! A dual-grid mesher: every cell whose corners straddle the isovalue gets
//! exactly one vertex, placed at the centroid of the points where the
//! surface crosses the cell's edges. Faces connect the vertices of the four
//! cells around each crossed edge, so neighbouring faces share vertices and
//! the surface has no cracks.
//!
//! The volume is walked once in raster order (z outer, x inner). Vertex
//! indices of the current and previous z layer are kept in two alternating
//! row buffers of `(nx + 1) * (ny + 1)` entries; a face only ever looks back
//! at cells that were visited earlier in the pass.

use brainmap_math::Vec3;
use brainmap_volume::{Dims, Volume, VolumeError};

use super::error::DimensionError;
use super::lookup_tables::{CUBE_EDGES, EDGE_TABLE};
use super::types::{triangle_normal, ExtractStats, Face, RawMesh};

/// Crossed edges whose endpoint values differ by no more than this are skipped
pub const DEGENERATE_EDGE_EPSILON: f32 = 1e-6;

/// Initial row buffer capacity, in vertex indices
const INITIAL_BUFFER_LEN: usize = 4096;

/// Reusable Surface Nets mesher
///
/// Owns the row buffers so repeated extractions (e.g. while the isovalue is
/// being dragged) reuse one allocation. The buffers grow when a larger grid
/// comes in and are never shared.
#[derive(Clone, Debug)]
pub struct SurfaceNets {
    emit_quads: bool,
    buffer: Vec<u32>,
}

impl SurfaceNets {
    pub fn new() -> Self {
        Self {
            emit_quads: false,
            buffer: vec![0; INITIAL_BUFFER_LEN],
        }
    }

    /// Emit one quad per crossed edge instead of two triangles
    pub fn with_quads(mut self, emit_quads: bool) -> Self {
        self.emit_quads = emit_quads;
        self
    }

    #[inline]
    pub fn emits_quads(&self) -> bool {
        self.emit_quads
    }

    /// Check whether a surface can exist in `field` at `level`
    pub fn check_input(field: &Volume<f32>, level: f32) -> Result<(), DimensionError> {
        let dims = field.dims();
        if dims.x < 2 || dims.y < 2 || dims.z < 2 {
            return Err(DimensionError::AxisTooSmall(dims));
        }
        if !level.is_finite() {
            return Err(DimensionError::NonFiniteLevel(level));
        }
        let (min, max) = field
            .as_slice()
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
        if level < min || level > max {
            return Err(DimensionError::LevelOutOfRange { level, min, max });
        }
        Ok(())
    }

    /// Extract the isosurface of `field` at `level`
    ///
    /// Vertices are in grid coordinates. Unusable input (an axis shorter
    /// than 2 samples, a non-finite or out-of-range level) yields an empty
    /// mesh.
    pub fn extract(&mut self, field: &Volume<f32>, level: f32) -> RawMesh {
        if let Err(err) = Self::check_input(field, level) {
            log::debug!("Surface Nets: {}; returning empty mesh", err);
            return RawMesh::default();
        }

        let dims = field.dims();
        let (nx, ny, nz) = (dims.x, dims.y, dims.z);
        let data = field.as_slice();

        let row = nx + 1;
        let layer = (nx + 1) * (ny + 1);
        if self.buffer.len() < layer * 2 {
            self.buffer.resize(layer * 2, 0);
        }
        let buffer = &mut self.buffer;

        let mut mesh = RawMesh::default();
        let mut stats = ExtractStats::default();
        let mut grid = [0.0f32; 8];
        let mut buf_no = 1usize;

        for z in 0..nz - 1 {
            // Buffer offsets to the neighbouring cell along x, y and z
            let r: [isize; 3] = [
                1,
                row as isize,
                if buf_no == 1 { layer as isize } else { -(layer as isize) },
            ];

            for y in 0..ny - 1 {
                for x in 0..nx - 1 {
                    stats.cells_visited += 1;

                    // Corner g sits at (x + (g & 1), y + (g >> 1 & 1), z + (g >> 2 & 1))
                    let n = dims.index(x, y, z);
                    let mut mask = 0usize;
                    for (g, value) in grid.iter_mut().enumerate() {
                        let offset = (g & 1) + ((g >> 1) & 1) * nx + ((g >> 2) & 1) * nx * ny;
                        *value = data[n + offset] - level;
                        if *value < 0.0 {
                            mask |= 1 << g;
                        }
                    }
                    if mask == 0 || mask == 0xff {
                        continue;
                    }

                    let edge_mask = EDGE_TABLE[mask];
                    let mut sum = Vec3::ZERO;
                    let mut crossings = 0u32;
                    for (e, &[e0, e1]) in CUBE_EDGES.iter().enumerate() {
                        if edge_mask & (1 << e) == 0 {
                            continue;
                        }
                        // Every crossed edge counts toward the average, even
                        // a degenerate one that adds nothing to the sum
                        crossings += 1;
                        let g0 = grid[e0];
                        let g1 = grid[e1];
                        let d = g0 - g1;
                        if d.abs() <= DEGENERATE_EDGE_EPSILON {
                            stats.degenerate_edges += 1;
                            log::trace!("Degenerate edge {} in cell ({}, {}, {})", e, x, y, z);
                            continue;
                        }
                        let t = g0 / d;
                        for axis in 0..3 {
                            let bit = 1 << axis;
                            let a = e0 & bit;
                            let b = e1 & bit;
                            if a != b {
                                sum[axis] += if a != 0 { 1.0 - t } else { t };
                            } else if a != 0 {
                                sum[axis] += 1.0;
                            }
                        }
                    }

                    // A straddling cell crosses at least one edge
                    let vertex = Vec3::new(x as f32, y as f32, z as f32) + sum / crossings as f32;

                    let m = (x + 1) + row * (y + 1) + buf_no * layer;
                    let vid = mesh.vertices.len() as u32;
                    buffer[m] = vid;
                    mesh.vertices.push(vertex);
                    stats.straddling_cells += 1;

                    let pos = [x, y, z];
                    for axis in 0..3 {
                        if edge_mask & (1 << axis) == 0 {
                            continue;
                        }
                        let iu = (axis + 1) % 3;
                        let iv = (axis + 2) % 3;
                        if pos[iu] == 0 || pos[iv] == 0 {
                            continue;
                        }
                        let du = r[iu];
                        let dv = r[iv];
                        let q_u = buffer[back(m, du)];
                        let q_uv = buffer[back(m, du + dv)];
                        let q_v = buffer[back(m, dv)];

                        // Corner 0 inside flips the winding
                        let quad = if mask & 1 != 0 {
                            [vid, q_v, q_uv, q_u]
                        } else {
                            [vid, q_u, q_uv, q_v]
                        };
                        if self.emit_quads {
                            mesh.faces.push(Face::Quad(quad));
                        } else {
                            mesh.faces.push(Face::Triangle([quad[0], quad[2], quad[3]]));
                            mesh.faces.push(Face::Triangle([quad[0], quad[1], quad[2]]));
                        }
                    }
                }
            }
            buf_no ^= 1;
        }

        mesh.normals = face_normals(&mesh.vertices, &mesh.faces);
        mesh.stats = stats;
        log::debug!(
            "Surface Nets: {} cells, {} vertices, {} faces, {} degenerate edges",
            stats.cells_visited,
            mesh.vertices.len(),
            mesh.faces.len(),
            stats.degenerate_edges
        );
        mesh
    }
}

impl Default for SurfaceNets {
    fn default() -> Self {
        Self::new()
    }
}

/// Buffer index `offset` entries before `m`
#[inline]
fn back(m: usize, offset: isize) -> usize {
    (m as isize - offset) as usize
}

/// One unit normal per face from its first three vertices
pub fn face_normals(vertices: &[Vec3], faces: &[Face]) -> Vec<Vec3> {
    faces
        .iter()
        .map(|f| {
            let idx = f.indices();
            triangle_normal(
                vertices[idx[0] as usize],
                vertices[idx[1] as usize],
                vertices[idx[2] as usize],
            )
        })
        .collect()
}

/// Extract an isosurface from a flat scalar buffer in `z * ny * nx + y * nx + x` order
///
/// Grids with an axis shorter than 2 samples give an empty mesh. A buffer
/// whose length does not match `dims` is an error.
pub fn extract_surface(field: &[f32], dims: Dims, level: f32) -> Result<RawMesh, VolumeError> {
    if dims.x < 2 || dims.y < 2 || dims.z < 2 {
        log::debug!("Surface Nets: {}; returning empty mesh", DimensionError::AxisTooSmall(dims));
        return Ok(RawMesh::default());
    }
    let volume = Volume::from_vec(dims, field.to_vec())?;
    Ok(SurfaceNets::new().extract(&volume, level))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planar_field(dims: Dims) -> Volume<f32> {
        // Positive on the z = 0 layer, negative above
        Volume::from_fn(dims, |_, _, z| if z == 0 { 1.0 } else { -1.0 })
    }

    #[test]
    fn test_uniform_fields_are_empty() {
        let dims = Dims::new(6, 5, 4);
        let mut nets = SurfaceNets::new();
        for value in [-3.0f32, 0.0, 2.5] {
            let field = Volume::filled(dims, value);
            for level in [-10.0f32, 0.0, 1.0, 10.0] {
                let mesh = nets.extract(&field, level);
                assert_eq!(mesh.vertex_count(), 0);
                assert_eq!(mesh.face_count(), 0);
            }
        }
    }

    #[test]
    fn test_small_dims_are_empty() {
        for dims in [Dims::new(1, 4, 4), Dims::new(4, 1, 4), Dims::new(4, 4, 1)] {
            let field = Volume::from_fn(dims, |x, y, z| (x + y + z) as f32 - 2.0);
            assert!(SurfaceNets::new().extract(&field, 0.0).is_empty());
            assert!(matches!(
                SurfaceNets::check_input(&field, 0.0),
                Err(DimensionError::AxisTooSmall(_))
            ));
        }
        assert!(extract_surface(&[], Dims::new(0, 0, 0), 0.0).unwrap().is_empty());
    }

    #[test]
    fn test_level_outside_range_is_empty() {
        let field = planar_field(Dims::new(3, 3, 3));
        assert!(matches!(
            SurfaceNets::check_input(&field, 4.0),
            Err(DimensionError::LevelOutOfRange { .. })
        ));
        assert!(matches!(
            SurfaceNets::check_input(&field, f32::NAN),
            Err(DimensionError::NonFiniteLevel(_))
        ));
        assert!(SurfaceNets::new().extract(&field, -4.0).is_empty());
        assert!(SurfaceNets::new().extract(&field, f32::INFINITY).is_empty());
    }

    #[test]
    fn test_single_cell_planar_cut() {
        let corners = [1.0f32, 1.0, 1.0, 1.0, -1.0, -1.0, -1.0, -1.0];
        let mesh = extract_surface(&corners, Dims::new(2, 2, 2), 0.0).unwrap();
        assert_eq!(mesh.vertex_count(), 1);
        assert_eq!(mesh.stats.straddling_cells, 1);
        assert_eq!(mesh.vertices[0], Vec3::new(0.5, 0.5, 0.5));
        // A lone cell has no already-visited neighbours to connect to
        assert_eq!(mesh.face_count(), 0);
    }

    #[test]
    fn test_degenerate_edges_count_toward_average() {
        // Corner 7 is just below the level, its three neighbours sit on it
        let mut corners = [0.0f32; 8];
        corners[7] = -1e-7;
        let mesh = extract_surface(&corners, Dims::new(2, 2, 2), 0.0).unwrap();
        assert_eq!(mesh.vertex_count(), 1);
        assert_eq!(mesh.stats.degenerate_edges, 3);
        // Nothing contributes: the vertex stays at the cell origin
        assert_eq!(mesh.vertices[0], Vec3::ZERO);

        // One usable edge (3-7) among three crossed ones
        corners[3] = 1.0;
        let mesh = extract_surface(&corners, Dims::new(2, 2, 2), 0.0).unwrap();
        assert_eq!(mesh.stats.degenerate_edges, 2);
        let v = mesh.vertices[0];
        for axis in 0..3 {
            assert!((v[axis] - 1.0 / 3.0).abs() < 1e-5, "{:?}", v);
        }
    }

    #[test]
    fn test_planar_cut_faces_and_normals() {
        let mesh = SurfaceNets::new().extract(&planar_field(Dims::new(3, 3, 3)), 0.0);
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 2);
        for v in &mesh.vertices {
            assert_eq!(v.z, 0.5);
        }
        // Normals point toward the region below the isovalue
        for n in &mesh.normals {
            assert!((n.z - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_length_mismatch_is_error() {
        assert!(extract_surface(&[0.0; 7], Dims::new(2, 2, 2), 0.0).is_err());
    }

    #[test]
    fn test_vertex_per_straddling_cell() {
        let dims = Dims::new(7, 6, 5);
        let field = Volume::from_fn(dims, |x, y, z| {
            let (dx, dy, dz) = (x as f32 - 3.2, y as f32 - 2.7, z as f32 - 2.1);
            (dx * dx + dy * dy + dz * dz).sqrt() - 2.0
        });
        let mesh = SurfaceNets::new().extract(&field, 0.0);

        let mut straddling = 0;
        for z in 0..dims.z - 1 {
            for y in 0..dims.y - 1 {
                for x in 0..dims.x - 1 {
                    let mut below = 0;
                    for g in 0..8 {
                        let v = field.get(x + (g & 1), y + ((g >> 1) & 1), z + ((g >> 2) & 1));
                        if v < 0.0 {
                            below += 1;
                        }
                    }
                    if below != 0 && below != 8 {
                        straddling += 1;
                    }
                }
            }
        }
        assert_eq!(mesh.vertex_count(), straddling);
        assert_eq!(mesh.stats.cells_visited, 6 * 5 * 4);
    }

    #[test]
    fn test_quads_split_into_same_triangles() {
        let dims = Dims::new(8, 8, 8);
        let field = Volume::from_fn(dims, |x, y, z| {
            let (dx, dy, dz) = (x as f32 - 3.5, y as f32 - 3.5, z as f32 - 3.5);
            (dx * dx + dy * dy + dz * dz).sqrt() - 2.5
        });
        let tris = SurfaceNets::new().extract(&field, 0.0);
        let quads = SurfaceNets::new().with_quads(true).extract(&field, 0.0);
        assert_eq!(tris.vertices, quads.vertices);
        assert_eq!(tris.face_count(), quads.face_count() * 2);

        let mut from_quads = Vec::new();
        for face in &quads.faces {
            match face {
                Face::Quad([a, b, c, d]) => {
                    from_quads.push(Face::Triangle([*a, *c, *d]));
                    from_quads.push(Face::Triangle([*a, *b, *c]));
                }
                other => panic!("Expected quad, got {:?}", other),
            }
        }
        assert_eq!(from_quads, tris.faces);
    }

    #[test]
    fn test_buffer_grows_and_is_reused() {
        let mut nets = SurfaceNets::new();
        let big = Dims::new(80, 80, 3);
        let field = Volume::from_fn(big, |_, _, z| z as f32 - 0.5);
        let first = nets.extract(&field, 0.0);
        assert!(nets.buffer.len() >= 81 * 81 * 2);
        assert_eq!(first.vertex_count(), 79 * 79);

        // A second, smaller extraction through the same buffers gives a fresh result
        let small = planar_field(Dims::new(3, 3, 3));
        let second = nets.extract(&small, 0.0);
        assert_eq!(second.vertex_count(), 4);
        assert_eq!(second.face_count(), 2);
    }
}
