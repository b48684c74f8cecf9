//! Geometry primitives shared by every subsystem.

mod aabb;
mod plane;

pub use aabb::{AABB, Axis};
pub use plane::Plane;
