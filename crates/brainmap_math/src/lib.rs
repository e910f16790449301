//! 3D Mathematics Library
//!
//! This crate provides the vector and bounding-volume types shared by the
//! brainmap volume and mesh crates.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Aabb`] - Axis-aligned bounding box
//! - [`BoundingSphere`] - Sphere enclosing a point set

mod vec3;
pub mod bounds;

pub use vec3::Vec3;
pub use bounds::{Aabb, BoundingSphere};
