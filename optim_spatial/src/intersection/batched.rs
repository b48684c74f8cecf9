/// Batched parallel strategy
///
/// The result slots are split into disjoint chunks of `batch_size` triangles and the
/// chunks run on a rayon pool built for the call. Inputs are only read; each worker
/// writes its own chunk, so no synchronization is needed beyond the final join.

use std::time::Instant;
use rayon::prelude::*;
use crate::error::Result;
use crate::math::Plane;
use crate::{engine_bail, engine_err, engine_trace};
use super::mesh::TriangleMesh;
use super::predicate::triangle_intersects;
use super::strategy::IntersectionStrategy;
use super::types::{IntersectionOptions, IntersectionResult};

/// Batching parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchConfig {
    /// Triangles per batch
    pub batch_size: usize,
    /// Worker threads (None = available parallelism)
    pub thread_count: Option<usize>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 64,
            thread_count: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BatchedParallelStrategy {
    config: BatchConfig,
}

impl BatchedParallelStrategy {
    /// # Errors
    ///
    /// `InvalidConfiguration` when `batch_size` or `thread_count` is 0.
    pub fn new(config: BatchConfig) -> Result<Self> {
        if config.batch_size == 0 {
            engine_bail!("optim::BatchedParallelStrategy", InvalidConfiguration,
                "batch_size must be >= 1");
        }
        if config.thread_count == Some(0) {
            engine_bail!("optim::BatchedParallelStrategy", InvalidConfiguration,
                "thread_count must be >= 1 when set");
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }
}

impl IntersectionStrategy for BatchedParallelStrategy {
    fn name(&self) -> &str {
        "batched-parallel"
    }

    fn intersect(
        &self,
        mesh: &TriangleMesh,
        planes: &[Plane],
        options: &IntersectionOptions,
    ) -> Result<IntersectionResult> {
        let started = Instant::now();
        mesh.validate()?;

        let triangle_count = mesh.triangle_count();
        let mut intersections = vec![false; triangle_count];
        if triangle_count == 0 {
            return Ok(IntersectionResult::finish(intersections, options, started));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.thread_count.unwrap_or(0))
            .build()
            .map_err(|e| engine_err!("optim::BatchedParallelStrategy", BackendError,
                "Failed to create worker pool: {}", e))?;

        let batch_size = self.config.batch_size;
        engine_trace!("optim::BatchedParallelStrategy",
            "{} triangles in {} batches on {} threads",
            triangle_count, triangle_count.div_ceil(batch_size), pool.current_num_threads());

        pool.install(|| {
            intersections
                .par_chunks_mut(batch_size)
                .enumerate()
                .for_each(|(batch, slots)| {
                    let first = batch * batch_size;
                    for (offset, slot) in slots.iter_mut().enumerate() {
                        let (v0, v1, v2) = mesh.triangle(first + offset);
                        *slot = triangle_intersects(v0, v1, v2, planes);
                    }
                });
        });

        Ok(IntersectionResult::finish(intersections, options, started))
    }
}
