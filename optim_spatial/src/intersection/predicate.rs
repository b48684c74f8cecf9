/// Triangle vs plane-set test shared by every intersection strategy.

use glam::Vec3;
use crate::math::Plane;

/// Conservative triangle/frustum test.
///
/// Returns false only when a single plane has all three vertices strictly on its
/// negative side. A triangle straddling the corner region outside two planes still
/// passes (false positive); a triangle that touches the convex volume never fails.
#[inline]
pub fn triangle_intersects(v0: Vec3, v1: Vec3, v2: Vec3, planes: &[Plane]) -> bool {
    !planes.iter().any(|plane| {
        plane.distance_to_point(v0) < 0.0
            && plane.distance_to_point(v1) < 0.0
            && plane.distance_to_point(v2) < 0.0
    })
}
