/// Half-space plane.
///
/// A point P is on the positive (inside) side when `dot(normal, P) + distance >= 0`.
/// The layout is `#[repr(C)]` and `Pod`, so plane arrays upload to a compute device
/// as-is (16 bytes per plane: normal.xyz, distance).

use bytemuck::{Pod, Zeroable};
use glam::{Vec3, Vec4};

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Plane {
    /// Plane normal, pointing toward the inside half-space
    pub normal: Vec3,
    /// Signed offset along the normal
    pub distance: f32,
}

impl Plane {
    pub fn new(normal: Vec3, distance: f32) -> Self {
        Self { normal, distance }
    }

    /// Plane through `point` with the given inward normal.
    pub fn from_normal_and_point(normal: Vec3, point: Vec3) -> Self {
        let normal = normal.normalize_or_zero();
        Self { normal, distance: -normal.dot(point) }
    }

    /// Build from (A, B, C, D) coefficients of `Ax + By + Cz + D = 0`.
    pub fn from_vec4(coefficients: Vec4) -> Self {
        Self { normal: coefficients.truncate(), distance: coefficients.w }
    }

    /// (A, B, C, D) coefficients.
    pub fn to_vec4(&self) -> Vec4 {
        self.normal.extend(self.distance)
    }

    /// Rescale so the normal has unit length. Degenerate planes are returned unchanged.
    pub fn normalized(&self) -> Self {
        let len = self.normal.length();
        if len > 0.0 {
            Self { normal: self.normal / len, distance: self.distance / len }
        } else {
            *self
        }
    }

    /// Signed distance of `point` (positive on the inside).
    #[inline]
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }

    /// True when `point` lies on the inside (non-negative) side.
    #[inline]
    pub fn is_inside(&self, point: Vec3) -> bool {
        self.distance_to_point(point) >= 0.0
    }
}
