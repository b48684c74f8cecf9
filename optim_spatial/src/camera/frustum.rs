/// Frustum - six clipping planes extracted from a view-projection matrix.
///
/// Plane normals point inward; a point P is inside when
/// `plane.distance_to_point(P) >= 0` for every plane.

use glam::{Mat4, Vec3};
use crate::math::{AABB, Plane};

/// Result of a 3-way frustum/AABB classification.
///
/// - `Outside` → skip the entire subtree
/// - `Inside` → collect everything without further testing
/// - `Partial` → test children individually
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrustumTest {
    Outside,
    Inside,
    Partial,
}

/// Which planes take part in a test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrustumType {
    /// All six planes
    #[default]
    Accurate,
    /// Side planes only (left, right, bottom, top); near and far are dropped
    Simplified,
}

impl FrustumType {
    /// Number of planes used by this frustum type.
    pub fn plane_count(self) -> usize {
        match self {
            FrustumType::Accurate => 6,
            FrustumType::Simplified => 4,
        }
    }
}

/// Frustum plane indices
pub const PLANE_LEFT: usize = 0;
pub const PLANE_RIGHT: usize = 1;
pub const PLANE_BOTTOM: usize = 2;
pub const PLANE_TOP: usize = 3;
pub const PLANE_NEAR: usize = 4;
pub const PLANE_FAR: usize = 5;

/// Six normalized frustum planes: left, right, bottom, top, near, far.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    pub planes: [Plane; 6],
}

impl Frustum {
    /// Extract frustum planes from a view-projection matrix.
    ///
    /// Gribb & Hartmann method, GL clip-space convention (depth in [-1, 1]).
    /// Works for both perspective and orthographic projections.
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let row0 = vp.row(0);
        let row1 = vp.row(1);
        let row2 = vp.row(2);
        let row3 = vp.row(3);

        let planes = [
            row3 + row0, // left
            row3 - row0, // right
            row3 + row1, // bottom
            row3 - row1, // top
            row3 + row2, // near
            row3 - row2, // far
        ]
        .map(|coefficients| Plane::from_vec4(coefficients).normalized());

        Self { planes }
    }

    /// Planes selected by `frustum_type`, in standard order.
    pub fn planes(&self, frustum_type: FrustumType) -> &[Plane] {
        &self.planes[..frustum_type.plane_count()]
    }

    /// Point containment against all six planes.
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes.iter().all(|plane| plane.is_inside(point))
    }

    /// Conservative AABB test against all six planes.
    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        aabb_intersects_planes(&self.planes, aabb)
    }

    /// 3-way AABB classification against all six planes.
    pub fn classify_aabb(&self, aabb: &AABB) -> FrustumTest {
        classify_aabb_planes(&self.planes, aabb)
    }
}

/// Corner of `aabb` furthest along `normal` (the "positive vertex").
#[inline]
fn positive_vertex(aabb: &AABB, normal: Vec3) -> Vec3 {
    Vec3::new(
        if normal.x >= 0.0 { aabb.max.x } else { aabb.min.x },
        if normal.y >= 0.0 { aabb.max.y } else { aabb.min.y },
        if normal.z >= 0.0 { aabb.max.z } else { aabb.min.z },
    )
}

/// Corner of `aabb` furthest against `normal` (the "negative vertex").
#[inline]
fn negative_vertex(aabb: &AABB, normal: Vec3) -> Vec3 {
    Vec3::new(
        if normal.x >= 0.0 { aabb.min.x } else { aabb.max.x },
        if normal.y >= 0.0 { aabb.min.y } else { aabb.max.y },
        if normal.z >= 0.0 { aabb.min.z } else { aabb.max.z },
    )
}

/// Test an AABB against an arbitrary plane set.
///
/// Returns `false` only when the positive vertex lies outside some plane.
/// May return false positives, never false negatives.
pub fn aabb_intersects_planes(planes: &[Plane], aabb: &AABB) -> bool {
    planes
        .iter()
        .all(|plane| plane.distance_to_point(positive_vertex(aabb, plane.normal)) >= 0.0)
}

/// Classify an AABB against an arbitrary plane set.
pub fn classify_aabb_planes(planes: &[Plane], aabb: &AABB) -> FrustumTest {
    let mut all_inside = true;

    for plane in planes {
        if plane.distance_to_point(positive_vertex(aabb, plane.normal)) < 0.0 {
            return FrustumTest::Outside;
        }
        if plane.distance_to_point(negative_vertex(aabb, plane.normal)) < 0.0 {
            all_inside = false;
        }
    }

    if all_inside { FrustumTest::Inside } else { FrustumTest::Partial }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
