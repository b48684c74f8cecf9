/// BvhTree - owns the root node and the measured build time.
///
/// Created empty, populated by `build` / `rebuild`. Rebuilding discards the old
/// tree entirely.

use std::time::Duration;
use crate::camera::{Frustum, FrustumTest, FrustumType, classify_aabb_planes, aabb_intersects_planes};
use crate::error::Result;
use crate::math::AABB;
use super::builder::{BvhBuilder, BvhConfig};
use super::node::{BvhItem, BvhNode, DepthFirst};

/// Shape statistics of a built tree.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BvhStats {
    /// Number of internal (branch) nodes
    pub internal_count: usize,
    /// Number of leaf nodes
    pub leaf_count: usize,
    /// Depth of the deepest node (root = 0)
    pub max_depth: usize,
    /// Largest item count of any leaf
    pub max_leaf_size: usize,
    /// Total items stored across all leaves
    pub item_count: usize,
}

/// Bounding volume hierarchy over items with handle type `H`.
#[derive(Debug, Clone)]
pub struct BvhTree<H> {
    root: Option<BvhNode<H>>,
    build_time: Duration,
}

impl<H> Default for BvhTree<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> BvhTree<H> {
    /// Empty tree (no root, zero build time).
    pub fn new() -> Self {
        Self { root: None, build_time: Duration::ZERO }
    }

    pub(crate) fn from_parts(root: Option<BvhNode<H>>, build_time: Duration) -> Self {
        Self { root, build_time }
    }

    /// Build a tree over `items` with the given leaf size.
    ///
    /// Empty input yields an empty tree.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` when `leaf_size` is 0.
    pub fn build<I>(items: I, leaf_size: usize) -> Result<Self>
    where
        I: IntoIterator<Item = BvhItem<H>>,
    {
        Ok(BvhBuilder::new(BvhConfig { leaf_size })?.build(items))
    }

    /// Replace this tree with a fresh build. On error the current tree is kept.
    pub fn rebuild<I>(&mut self, items: I, leaf_size: usize) -> Result<()>
    where
        I: IntoIterator<Item = BvhItem<H>>,
    {
        *self = Self::build(items, leaf_size)?;
        Ok(())
    }

    // ===== ACCESSORS =====

    pub fn root(&self) -> Option<&BvhNode<H>> {
        self.root.as_ref()
    }

    /// Wall-clock duration of the last build.
    pub fn build_time(&self) -> Duration {
        self.build_time
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Bounds of the root node.
    pub fn bounds(&self) -> Option<&AABB> {
        self.root.as_ref().map(BvhNode::bounds)
    }

    // ===== TRAVERSAL =====

    /// Depth-first pre-order walk yielding `(depth, node)`.
    pub fn nodes_with_depth(&self) -> DepthFirst<'_, H> {
        match &self.root {
            Some(root) => root.iter(),
            None => DepthFirst::empty(),
        }
    }

    /// Depth-first pre-order walk over every node (left before right).
    pub fn nodes(&self) -> impl Iterator<Item = &BvhNode<H>> + '_ {
        self.nodes_with_depth().map(|(_, node)| node)
    }

    /// Leaf nodes only, left to right.
    pub fn leaves(&self) -> impl Iterator<Item = &BvhNode<H>> + '_ {
        self.nodes().filter(|node| node.is_leaf())
    }

    /// Every item in leaf order.
    pub fn items(&self) -> impl Iterator<Item = &BvhItem<H>> + '_ {
        self.leaves().flat_map(BvhNode::items)
    }

    pub fn stats(&self) -> BvhStats {
        let mut stats = BvhStats::default();
        for (depth, node) in self.nodes_with_depth() {
            stats.max_depth = stats.max_depth.max(depth);
            match node {
                BvhNode::Leaf { items, .. } => {
                    stats.leaf_count += 1;
                    stats.item_count += items.len();
                    stats.max_leaf_size = stats.max_leaf_size.max(items.len());
                }
                BvhNode::Internal { .. } => stats.internal_count += 1,
            }
        }
        stats
    }

    /// Dump the node hierarchy at debug severity.
    pub fn log_hierarchy(&self) {
        match &self.root {
            None => crate::engine_debug!("optim::BvhTree", "Tree is empty"),
            Some(_) => {
                for (depth, node) in self.nodes_with_depth() {
                    let bounds = node.bounds();
                    crate::engine_debug!("optim::BvhTree",
                        "{:indent$}Node: leaf={}, center={}, size={}, items={}",
                        "", node.is_leaf(), bounds.center(), bounds.size(), node.items().len(),
                        indent = depth * 2);
                }
            }
        }
    }
}

impl<H: Clone> BvhTree<H> {
    /// Collect the handles of every item whose bounds pass the frustum test.
    ///
    /// Hierarchical 3-way classification per node:
    /// - `Outside` → skip the subtree
    /// - `Inside` → collect the whole subtree without further tests
    /// - `Partial` → descend; leaf items are tested individually
    ///
    /// Results are appended to `results`.
    pub fn query_frustum(&self, frustum: &Frustum, frustum_type: FrustumType, results: &mut Vec<H>) {
        if let Some(root) = &self.root {
            let planes = frustum.planes(frustum_type);
            let mut pending = vec![(root, classify_aabb_planes(planes, root.bounds()))];

            while let Some((node, class)) = pending.pop() {
                match class {
                    FrustumTest::Outside => {}

                    FrustumTest::Inside => {
                        results.extend(node.collect_items().into_iter().map(|item| item.handle.clone()));
                    }

                    FrustumTest::Partial => match node {
                        BvhNode::Leaf { items, .. } => {
                            results.extend(
                                items.iter()
                                    .filter(|item| aabb_intersects_planes(planes, &item.bounds))
                                    .map(|item| item.handle.clone()),
                            );
                        }
                        BvhNode::Internal { left, right, .. } => {
                            // Right first so results stay in leaf order
                            for child in [right.as_ref(), left.as_ref()] {
                                pending.push((child, classify_aabb_planes(planes, child.bounds())));
                            }
                        }
                    },
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tests;
