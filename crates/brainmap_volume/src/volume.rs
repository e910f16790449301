//! Dense 3D scalar grids
//!
//! A [`Volume`] stores its cells in a flat vector indexed
//! `z * ly * lx + y * lx + x`.

use std::fmt;
use serde::{Serialize, Deserialize};

/// Grid dimensions (Lx, Ly, Lz)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dims {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl Dims {
    #[inline]
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Total number of cells
    #[inline]
    pub const fn len(&self) -> usize {
        self.x * self.y * self.z
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Extents as an array in axis order
    #[inline]
    pub const fn to_array(&self) -> [usize; 3] {
        [self.x, self.y, self.z]
    }

    /// Extent along one axis
    #[inline]
    pub const fn extent(&self, axis: SliceAxis) -> usize {
        match axis {
            SliceAxis::Sagittal => self.x,
            SliceAxis::Coronal => self.y,
            SliceAxis::Axial => self.z,
        }
    }

    /// Flat index of an in-range cell
    #[inline]
    pub const fn index(&self, x: usize, y: usize, z: usize) -> usize {
        z * self.y * self.x + y * self.x + x
    }

    /// Flat index of a signed cell coordinate, or `None` if it lies outside the grid
    #[inline]
    pub fn checked_index(&self, x: i64, y: i64, z: i64) -> Option<usize> {
        if x < 0 || y < 0 || z < 0 {
            return None;
        }
        let (x, y, z) = (x as usize, y as usize, z as usize);
        if x < self.x && y < self.y && z < self.z {
            Some(self.index(x, y, z))
        } else {
            None
        }
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.x, self.y, self.z)
    }
}

/// Axis-aligned viewing plane
///
/// The slice is taken perpendicular to the named axis: sagittal fixes x,
/// coronal fixes y and axial fixes z.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SliceAxis {
    Sagittal,
    Coronal,
    #[default]
    Axial,
}

impl SliceAxis {
    pub const ALL: [SliceAxis; 3] = [SliceAxis::Sagittal, SliceAxis::Coronal, SliceAxis::Axial];

    /// Index of the fixed axis (0 = x, 1 = y, 2 = z)
    #[inline]
    pub const fn axis_index(self) -> usize {
        match self {
            SliceAxis::Sagittal => 0,
            SliceAxis::Coronal => 1,
            SliceAxis::Axial => 2,
        }
    }

    /// Letter used when labelling the slice coordinate
    #[inline]
    pub const fn label(self) -> char {
        match self {
            SliceAxis::Sagittal => 'X',
            SliceAxis::Coronal => 'Y',
            SliceAxis::Axial => 'Z',
        }
    }

    /// Width and height of the image plane for a grid
    #[inline]
    pub const fn plane_size(self, dims: Dims) -> (usize, usize) {
        match self {
            SliceAxis::Sagittal => (dims.y, dims.z),
            SliceAxis::Coronal => (dims.x, dims.z),
            SliceAxis::Axial => (dims.x, dims.y),
        }
    }

    /// 3D cell for plane coordinate (u, v) on slice `s`
    #[inline]
    pub const fn cell(self, s: usize, u: usize, v: usize) -> (usize, usize, usize) {
        match self {
            SliceAxis::Sagittal => (s, u, v),
            SliceAxis::Coronal => (u, s, v),
            SliceAxis::Axial => (u, v, s),
        }
    }

    /// Slice index for a position given as a percentage of the axis extent
    ///
    /// `floor(extent * percent / 100)`, with the percentage clamped to
    /// [0, 100] and the index clamped to the last slice.
    pub fn slice_index(self, dims: Dims, percent: f32) -> usize {
        let extent = dims.extent(self);
        if extent == 0 {
            return 0;
        }
        let percent = if percent.is_finite() { percent.clamp(0.0, 100.0) } else { 0.0 };
        let s = (extent as f32 * percent / 100.0).floor() as usize;
        s.min(extent - 1)
    }
}

impl fmt::Display for SliceAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SliceAxis::Sagittal => "sagittal",
            SliceAxis::Coronal => "coronal",
            SliceAxis::Axial => "axial",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for SliceAxis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sagittal" | "x" => Ok(SliceAxis::Sagittal),
            "coronal" | "y" => Ok(SliceAxis::Coronal),
            "axial" | "z" => Ok(SliceAxis::Axial),
            other => Err(format!("unknown slice axis '{}'", other)),
        }
    }
}

/// Error constructing a volume
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VolumeError {
    /// Buffer length does not match the grid dimensions
    LengthMismatch { dims: Dims, expected: usize, actual: usize },
    /// One of the dimensions is zero
    EmptyDims(Dims),
}

impl fmt::Display for VolumeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VolumeError::LengthMismatch { dims, expected, actual } => write!(
                f,
                "Volume buffer for {} grid needs {} cells, got {}",
                dims, expected, actual
            ),
            VolumeError::EmptyDims(dims) => write!(f, "Volume dimensions {} are empty", dims),
        }
    }
}

impl std::error::Error for VolumeError {}

/// A dense 3D grid of cells
#[derive(Clone, Debug, PartialEq)]
pub struct Volume<T> {
    dims: Dims,
    data: Vec<T>,
}

impl<T: Copy + Default> Volume<T> {
    /// Create a volume with every cell set to `T::default()`
    pub fn new(dims: Dims) -> Self {
        Self {
            dims,
            data: vec![T::default(); dims.len()],
        }
    }

    /// Reset every cell to `T::default()`
    pub fn clear(&mut self) {
        self.data.fill(T::default());
    }
}

impl<T: Copy> Volume<T> {
    /// Create a volume with every cell set to `value`
    pub fn filled(dims: Dims, value: T) -> Self {
        Self {
            dims,
            data: vec![value; dims.len()],
        }
    }

    /// Wrap an existing buffer, checking its length against the dimensions
    pub fn from_vec(dims: Dims, data: Vec<T>) -> Result<Self, VolumeError> {
        if dims.is_empty() {
            return Err(VolumeError::EmptyDims(dims));
        }
        if data.len() != dims.len() {
            return Err(VolumeError::LengthMismatch {
                dims,
                expected: dims.len(),
                actual: data.len(),
            });
        }
        Ok(Self { dims, data })
    }

    /// Build a volume by evaluating `f(x, y, z)` for every cell
    pub fn from_fn(dims: Dims, mut f: impl FnMut(usize, usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(dims.len());
        for z in 0..dims.z {
            for y in 0..dims.y {
                for x in 0..dims.x {
                    data.push(f(x, y, z));
                }
            }
        }
        Self { dims, data }
    }

    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// Value at an in-range cell
    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> T {
        self.data[self.dims.index(x, y, z)]
    }

    /// Mutable access to an in-range cell
    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize, z: usize) -> &mut T {
        let i = self.dims.index(x, y, z);
        &mut self.data[i]
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Apply `f` to every cell, producing a new volume of the same shape
    pub fn map<U: Copy>(&self, f: impl Fn(T) -> U) -> Volume<U> {
        Volume {
            dims: self.dims,
            data: self.data.iter().map(|v| f(*v)).collect(),
        }
    }
}
