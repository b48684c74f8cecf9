/// FrustumIntersectionSystem - camera in, per-triangle visibility out.
///
/// Derives the frustum from the camera each call, trims it to the requested plane
/// set and hands the query to the selected strategy.

use std::sync::Arc;
use crate::camera::{Frustum, FrustumType, ViewProjection};
use crate::compute::ComputeDevice;
use crate::error::Result;
use crate::math::Plane;
use crate::{engine_trace, engine_warn};
use super::batched::{BatchConfig, BatchedParallelStrategy};
use super::mesh::TriangleMesh;
use super::offloaded::OffloadedStrategy;
use super::sequential::SequentialStrategy;
use super::strategy::IntersectionStrategy;
use super::types::{Implementation, IntersectionOptions, IntersectionResult};

#[derive(Default)]
pub struct FrustumIntersectionSystem {
    sequential: SequentialStrategy,
    batched: BatchedParallelStrategy,
    offloaded: Option<OffloadedStrategy>,
}

impl FrustumIntersectionSystem {
    /// System without a compute device (offloaded queries fall back to sequential)
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `device` for `Implementation::Offloaded`
    pub fn with_device(mut self, device: Arc<dyn ComputeDevice>) -> Self {
        self.offloaded = Some(OffloadedStrategy::new(device));
        self
    }

    /// # Errors
    ///
    /// `InvalidConfiguration` for an invalid batch configuration.
    pub fn with_batch_config(mut self, config: BatchConfig) -> Result<Self> {
        self.batched = BatchedParallelStrategy::new(config)?;
        Ok(self)
    }

    pub fn set_device(&mut self, device: Option<Arc<dyn ComputeDevice>>) {
        self.offloaded = device.map(OffloadedStrategy::new);
    }

    pub fn has_device(&self) -> bool {
        self.offloaded.is_some()
    }

    pub fn batch_config(&self) -> &BatchConfig {
        self.batched.config()
    }

    /// Strategy that serves `implementation`.
    ///
    /// `Offloaded` without a device resolves to the sequential strategy.
    pub fn strategy(&self, implementation: Implementation) -> &dyn IntersectionStrategy {
        match implementation {
            Implementation::Sequential => &self.sequential,
            Implementation::BatchedParallel => &self.batched,
            Implementation::Offloaded => match &self.offloaded {
                Some(offloaded) => offloaded,
                None => {
                    engine_warn!("optim::FrustumIntersectionSystem",
                        "No compute device configured, running offloaded query sequentially");
                    &self.sequential
                }
            },
        }
    }

    /// Test every triangle of `mesh` against the frustum of `camera`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a malformed mesh, `OffloadFailure` when the compute device
    /// fails, `BackendError` when the batched worker pool cannot start.
    pub fn intersect<C: ViewProjection + ?Sized>(
        &self,
        mesh: &TriangleMesh,
        camera: &C,
        options: &IntersectionOptions,
        implementation: Implementation,
    ) -> Result<IntersectionResult> {
        let frustum = Frustum::from_view_projection(&camera.view_projection_matrix());
        self.intersect_planes(mesh, frustum.planes(options.frustum_type), options, implementation)
    }

    /// Same as `intersect` with explicit planes (used as given).
    pub fn intersect_planes(
        &self,
        mesh: &TriangleMesh,
        planes: &[Plane],
        options: &IntersectionOptions,
        implementation: Implementation,
    ) -> Result<IntersectionResult> {
        let strategy = self.strategy(implementation);
        engine_trace!("optim::FrustumIntersectionSystem",
            "{} triangles against {} planes ({})",
            mesh.triangle_count(), planes.len(), strategy.name());

        strategy.intersect(mesh, planes, options)
    }

    /// Index of the first triangle intersecting the frustum of `camera`, if any.
    pub fn first_intersection<C: ViewProjection + ?Sized>(
        &self,
        mesh: &TriangleMesh,
        camera: &C,
        frustum_type: FrustumType,
    ) -> Result<Option<usize>> {
        let frustum = Frustum::from_view_projection(&camera.view_projection_matrix());
        self.sequential.first_intersection(mesh, frustum.planes(frustum_type))
    }
}
