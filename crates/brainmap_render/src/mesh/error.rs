//! Mesh error types

use std::fmt;
use brainmap_volume::Dims;

/// Input the mesher cannot extract a surface from
///
/// These are recovered locally: the mesher logs the reason and returns an
/// empty mesh.
#[derive(Debug, Clone, PartialEq)]
pub enum DimensionError {
    /// An axis has fewer than two samples, so the grid has no cells
    AxisTooSmall(Dims),
    /// The isovalue is NaN or infinite
    NonFiniteLevel(f32),
    /// The isovalue lies outside the field's range, so no cell straddles it
    LevelOutOfRange { level: f32, min: f32, max: f32 },
}

impl fmt::Display for DimensionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimensionError::AxisTooSmall(dims) => {
                write!(f, "Grid {} needs at least 2 samples per axis", dims)
            }
            DimensionError::NonFiniteLevel(level) => {
                write!(f, "Isovalue {} is not finite", level)
            }
            DimensionError::LevelOutOfRange { level, min, max } => {
                write!(f, "Isovalue {} is outside the field range [{}, {}]", level, min, max)
            }
        }
    }
}

impl std::error::Error for DimensionError {}

/// A face with more than four vertices reached triangulation
///
/// Surface Nets only emits triangles and quads, so this signals a broken
/// invariant rather than bad user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedFaceArity {
    /// Index of the face in the raw mesh
    pub face: usize,
    pub arity: usize,
}

impl fmt::Display for UnsupportedFaceArity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Face {} has {} vertices; only triangles and quads can be triangulated",
            self.face, self.arity
        )
    }
}

impl std::error::Error for UnsupportedFaceArity {}

/// A raw mesh the post-processor cannot turn into a display mesh
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinalizeError {
    /// A face has more than four vertices
    UnsupportedArity(UnsupportedFaceArity),
    /// A face references a vertex the mesh does not have
    IndexOutOfRange {
        face: usize,
        index: u32,
        vertex_count: usize,
    },
}

impl fmt::Display for FinalizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FinalizeError::UnsupportedArity(e) => write!(f, "{}", e),
            FinalizeError::IndexOutOfRange { face, index, vertex_count } => write!(
                f,
                "Face {} references vertex {} but the mesh has {} vertices",
                face, index, vertex_count
            ),
        }
    }
}

impl std::error::Error for FinalizeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FinalizeError::UnsupportedArity(e) => Some(e),
            FinalizeError::IndexOutOfRange { .. } => None,
        }
    }
}

impl From<UnsupportedFaceArity> for FinalizeError {
    fn from(e: UnsupportedFaceArity) -> Self {
        FinalizeError::UnsupportedArity(e)
    }
}
