//! Camera module - view-projection source and frustum extraction.
//!
//! Cameras are passive data containers owned by the caller. The intersection
//! engine only needs a view-projection matrix, so anything implementing
//! `ViewProjection` can stand in for a camera.

mod camera;
mod frustum;

pub use camera::{Camera, ViewProjection};
pub use frustum::{
    Frustum, FrustumTest, FrustumType,
    aabb_intersects_planes, classify_aabb_planes,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};
