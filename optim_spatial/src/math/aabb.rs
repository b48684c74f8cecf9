/// Axis-aligned bounding box utilities.
///
/// Stored as min/max corners; center and size are derived. Union and expansion
/// work directly on the corners, so a union of unions is bit-exact regardless of
/// the order in which boxes are folded in.

use glam::{Mat4, Vec3};

/// One of the three coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Component index (0, 1, 2) for indexing a `Vec3`.
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

impl AABB {
    /// Create a box from its corners. The corners are reordered per axis, so the
    /// result always has non-negative size.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self { min: a.min(b), max: a.max(b) }
    }

    /// Create a box from a center and a full size. Negative size components are
    /// taken by absolute value.
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        Self { min: center - half, max: center + half }
    }

    /// Zero-size box at a point.
    pub fn from_point(point: Vec3) -> Self {
        Self { min: point, max: point }
    }

    /// Union of a sequence of boxes, `None` when the sequence is empty.
    pub fn union_all<'a, I>(boxes: I) -> Option<AABB>
    where
        I: IntoIterator<Item = &'a AABB>,
    {
        let mut iter = boxes.into_iter();
        let first = *iter.next()?;
        Some(iter.fold(first, |acc, b| acc.union(b)))
    }

    /// Center point.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Full size (max - min).
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Half size.
    pub fn extents(&self) -> Vec3 {
        self.size() * 0.5
    }

    /// Grow this box to also enclose `other`.
    pub fn encapsulate(&mut self, other: &AABB) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// Grow this box to also enclose `point`.
    pub fn encapsulate_point(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Union of two boxes.
    pub fn union(&self, other: &AABB) -> AABB {
        let mut result = *self;
        result.encapsulate(other);
        result
    }

    /// Grow the total size by `amount` on every axis (`amount / 2` per face).
    ///
    /// A negative amount shrinks the box, clamped so the size never goes below zero.
    pub fn expand(&mut self, amount: f32) {
        let center = self.center();
        let size = (self.size() + Vec3::splat(amount)).max(Vec3::ZERO);
        *self = AABB::from_center_size(center, size);
    }

    /// Copy of this box expanded by `amount` (see `expand`).
    pub fn expanded(&self, amount: f32) -> AABB {
        let mut result = *self;
        result.expand(amount);
        result
    }

    /// Surface area: 2 * (sx*sy + sy*sz + sz*sx).
    pub fn surface_area(&self) -> f32 {
        let s = self.size();
        2.0 * (s.x * s.y + s.y * s.z + s.z * s.x)
    }

    /// Axis with the largest extent.
    ///
    /// Y wins when it is strictly larger than X and not smaller than Z; Z wins only
    /// when strictly larger than both; X is the fallback for every remaining tie.
    pub fn largest_axis(&self) -> Axis {
        let s = self.size();
        if s.y > s.x && s.y >= s.z {
            Axis::Y
        } else if s.z > s.x && s.z > s.y {
            Axis::Z
        } else {
            Axis::X
        }
    }

    /// True when min <= max on every axis (and no component is NaN).
    pub fn is_valid(&self) -> bool {
        self.min.cmple(self.max).all()
    }

    /// Transform this box by a matrix, returning the tight world-space box.
    ///
    /// Uses the Arvo method: projects each matrix axis onto the box extents
    /// instead of transforming all 8 corners.
    pub fn transformed(&self, matrix: &Mat4) -> AABB {
        let translation = matrix.col(3).truncate();
        let mut new_min = translation;
        let mut new_max = translation;

        for i in 0..3 {
            let axis = matrix.col(i).truncate();
            let a = axis * self.min[i];
            let b = axis * self.max[i];
            new_min += a.min(b);
            new_max += a.max(b);
        }

        AABB { min: new_min, max: new_max }
    }

    /// True when `other` lies entirely within this box.
    pub fn contains(&self, other: &AABB) -> bool {
        self.min.cmple(other.min).all() && self.max.cmpge(other.max).all()
    }

    /// True when `point` lies inside or on the boundary.
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.min.cmple(point).all() && self.max.cmpge(point).all()
    }

    /// True when the two boxes overlap or touch.
    pub fn intersects(&self, other: &AABB) -> bool {
        self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
    }
}

#[cfg(test)]
#[path = "aabb_tests.rs"]
mod tests;
