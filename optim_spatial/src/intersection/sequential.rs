/// Sequential strategy - one triangle after another, in index order.

use std::time::Instant;
use crate::error::Result;
use crate::math::Plane;
use super::mesh::TriangleMesh;
use super::predicate::triangle_intersects;
use super::strategy::IntersectionStrategy;
use super::types::{IntersectionOptions, IntersectionResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialStrategy;

impl SequentialStrategy {
    pub fn new() -> Self {
        Self
    }

    /// Index of the first intersecting triangle, stopping at the first hit.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a malformed mesh.
    pub fn first_intersection(&self, mesh: &TriangleMesh, planes: &[Plane]) -> Result<Option<usize>> {
        mesh.validate()?;

        Ok((0..mesh.triangle_count()).find(|&t| {
            let (v0, v1, v2) = mesh.triangle(t);
            triangle_intersects(v0, v1, v2, planes)
        }))
    }
}

impl IntersectionStrategy for SequentialStrategy {
    fn name(&self) -> &str {
        "sequential"
    }

    fn intersect(
        &self,
        mesh: &TriangleMesh,
        planes: &[Plane],
        options: &IntersectionOptions,
    ) -> Result<IntersectionResult> {
        let started = Instant::now();
        mesh.validate()?;

        let intersections = (0..mesh.triangle_count())
            .map(|t| {
                let (v0, v1, v2) = mesh.triangle(t);
                triangle_intersects(v0, v1, v2, planes)
            })
            .collect();

        Ok(IntersectionResult::finish(intersections, options, started))
    }
}
