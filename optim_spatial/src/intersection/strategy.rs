/// IntersectionStrategy trait

use crate::error::Result;
use crate::math::Plane;
use super::mesh::TriangleMesh;
use super::types::{IntersectionOptions, IntersectionResult};

/// One way of evaluating the triangle predicate over a whole mesh.
///
/// Every strategy returns identical `intersections` for identical inputs. Planes are
/// used as given; `options.frustum_type` is applied by the caller when planes come
/// from a frustum.
pub trait IntersectionStrategy: Send + Sync {
    /// Strategy name for logs
    fn name(&self) -> &str;

    /// Test every triangle of `mesh` against `planes`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a malformed mesh, plus strategy-specific failures.
    fn intersect(
        &self,
        mesh: &TriangleMesh,
        planes: &[Plane],
        options: &IntersectionOptions,
    ) -> Result<IntersectionResult>;
}
