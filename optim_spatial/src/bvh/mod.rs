//! Bounding volume hierarchy
//!
//! Binary BVH over caller-supplied bounded items, built top-down with the
//! surface area heuristic. The tree is rebuilt wholesale; there is no incremental
//! update.

mod node;
mod builder;
mod tree;

pub use node::{BvhItem, BvhNode, DepthFirst};
pub use builder::{BvhBuilder, BvhConfig};
pub use tree::{BvhTree, BvhStats};
