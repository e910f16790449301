//! Bounding volumes for culling and camera fitting

use serde::{Serialize, Deserialize};
use crate::Vec3;

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create a box from its corners
    #[inline]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point, or `None` for an empty set
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut aabb = Self::new(*first, *first);
        for p in rest {
            aabb.min = aabb.min.min_components(*p);
            aabb.max = aabb.max.max_components(*p);
        }
        Some(aabb)
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// True if the point lies inside or on the box
    pub fn contains(&self, p: Vec3) -> bool {
        p.x >= self.min.x && p.x <= self.max.x
            && p.y >= self.min.y && p.y <= self.max.y
            && p.z >= self.min.z && p.z <= self.max.z
    }
}

/// Sphere enclosing a point set
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    /// Sphere centered on the bounding box center with the radius of the farthest point
    ///
    /// Not the minimal enclosing sphere, but every point is inside.
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let center = Aabb::from_points(points)?.center();
        let radius_sq = points
            .iter()
            .map(|p| (*p - center).length_squared())
            .fold(0.0f32, f32::max);
        Some(Self { center, radius: radius_sq.sqrt() })
    }
}
