//! Frustum/triangle intersection engine.
//!
//! Every strategy evaluates the same conservative predicate (`triangle_intersects`)
//! and produces one flag per triangle:
//!
//! - `SequentialStrategy`: index-order loop, plus an early-exit `first_intersection`
//! - `BatchedParallelStrategy`: disjoint batches on a per-call rayon pool
//! - `OffloadedStrategy`: frustum kernel on a `ComputeDevice`
//!
//! `FrustumIntersectionSystem` turns a camera into planes and picks the strategy.

mod batched;
mod mesh;
mod offloaded;
mod predicate;
mod sequential;
mod strategy;
mod system;
mod types;

pub use batched::{BatchConfig, BatchedParallelStrategy};
pub use mesh::TriangleMesh;
pub use offloaded::OffloadedStrategy;
pub use predicate::triangle_intersects;
pub use sequential::SequentialStrategy;
pub use strategy::IntersectionStrategy;
pub use system::FrustumIntersectionSystem;
pub use types::{Implementation, IntersectionOptions, IntersectionResult};
