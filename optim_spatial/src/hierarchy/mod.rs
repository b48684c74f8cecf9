//! Hierarchical bounds groups with view-frustum visibility propagation.

mod bounds_hierarchy;

pub use bounds_hierarchy::{BoundsGroup, BoundsGroupKey, BoundsHierarchy, VisibilityChange};
