/// Options and results of an intersection query.

use std::time::{Duration, Instant};
use crate::camera::FrustumType;

/// Strategy selector of `FrustumIntersectionSystem::intersect`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Implementation {
    /// Single-threaded loop in triangle order
    Sequential,
    /// Fixed-size batches on a rayon pool
    BatchedParallel,
    /// Frustum kernel on the configured compute device
    Offloaded,
}

/// Per-call options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntersectionOptions {
    /// Planes tested (6 for Accurate, 4 for Simplified)
    pub frustum_type: FrustumType,
    /// Also fill `IntersectionResult::intersected_indices`
    pub collect_indices: bool,
    /// Record wall-clock time in `IntersectionResult::elapsed`
    pub measure_time: bool,
}

/// Outcome of an intersection query.
///
/// `intersections` always holds one entry per triangle, in triangle order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntersectionResult {
    pub intersections: Vec<bool>,
    /// Ascending indices of intersecting triangles (empty unless `collect_indices`)
    pub intersected_indices: Vec<usize>,
    /// Query duration (None unless `measure_time`)
    pub elapsed: Option<Duration>,
}

impl IntersectionResult {
    /// Assemble the result of a finished query.
    pub(crate) fn finish(intersections: Vec<bool>, options: &IntersectionOptions, started: Instant) -> Self {
        let intersected_indices = if options.collect_indices {
            intersections.iter()
                .enumerate()
                .filter_map(|(i, &hit)| hit.then_some(i))
                .collect()
        } else {
            Vec::new()
        };

        Self {
            intersections,
            intersected_indices,
            elapsed: options.measure_time.then(|| started.elapsed()),
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.intersections.len()
    }

    pub fn intersected_count(&self) -> usize {
        self.intersections.iter().filter(|&&hit| hit).count()
    }

    /// True when at least one triangle intersects
    pub fn any(&self) -> bool {
        self.intersections.iter().any(|&hit| hit)
    }

    /// Indices of intersecting triangles, computed from the dense flags
    pub fn iter_intersected(&self) -> impl Iterator<Item = usize> + '_ {
        self.intersections.iter()
            .enumerate()
            .filter_map(|(i, &hit)| hit.then_some(i))
    }
}
