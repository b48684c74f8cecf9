/*!
# Optim Spatial

Spatial acceleration structures for rendering optimization.

This crate provides the algorithmic core behind the Optim scene tooling: a BVH builder
driven by the surface area heuristic, and a frustum/triangle intersection engine whose
predicate can be evaluated through interchangeable execution strategies (sequential,
batched-parallel on a worker pool, or offloaded to a compute device).

## Architecture

- **AABB / Plane**: shared geometry primitives
- **Camera / Frustum**: view-projection source and plane extraction
- **BvhTree**: SAH-built bounding volume hierarchy with traversal and frustum queries
- **FrustumIntersectionSystem**: selects an `IntersectionStrategy` and returns a dense
  per-triangle result
- **ComputeDevice**: offload target trait, with `HostComputeDevice` as the software backend
- **BoundsHierarchy**: hierarchical bounds with visibility propagation
- **ScenePartitioner**: grid / Voronoi cell lookup
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod math;
pub mod camera;
pub mod bvh;
pub mod compute;
pub mod intersection;
pub mod hierarchy;
pub mod partition;

// Main optim namespace module
pub mod optim {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging facade
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Geometry primitives
    pub mod math {
        pub use crate::math::*;
    }

    // Camera and frustum
    pub mod camera {
        pub use crate::camera::*;
    }

    // Bounding volume hierarchy
    pub mod bvh {
        pub use crate::bvh::*;
    }

    // Compute device abstraction
    pub mod compute {
        pub use crate::compute::*;
    }

    // Frustum/triangle intersection engine
    pub mod intersection {
        pub use crate::intersection::*;
    }

    // Hierarchical bounds culling
    pub mod hierarchy {
        pub use crate::hierarchy::*;
    }

    // Scene partitioning
    pub mod partition {
        pub use crate::partition::*;
    }
}

// Re-export math library at crate root
pub use glam;
