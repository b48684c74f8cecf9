/// BvhBuilder - top-down SAH construction.
///
/// At each node the items are sorted by bounds center along the largest axis of
/// the node bounds, then split at the index minimizing
/// `area(left) * count(left) + area(right) * count(right)`.
/// Prefix and suffix unions make each split evaluation O(n).

use std::time::Instant;
use crate::error::Result;
use crate::engine_bail;
use crate::math::AABB;
use super::node::{BvhItem, BvhNode};
use super::tree::BvhTree;

/// BVH construction settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BvhConfig {
    /// Maximum number of items in a leaf (must be >= 1)
    pub leaf_size: usize,
}

impl Default for BvhConfig {
    fn default() -> Self {
        Self { leaf_size: 4 }
    }
}

/// Builds `BvhTree`s with a validated configuration.
#[derive(Debug, Clone)]
pub struct BvhBuilder {
    config: BvhConfig,
}

impl BvhBuilder {
    /// Create a builder.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` when `leaf_size` is 0.
    pub fn new(config: BvhConfig) -> Result<Self> {
        if config.leaf_size < 1 {
            engine_bail!("optim::BvhBuilder", InvalidConfiguration,
                "leaf_size must be >= 1 (got {})", config.leaf_size);
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &BvhConfig {
        &self.config
    }

    /// Build a tree over `items`. The builder consumes its own working copy; the
    /// caller's collection is never reordered.
    pub fn build<H, I>(&self, items: I) -> BvhTree<H>
    where
        I: IntoIterator<Item = BvhItem<H>>,
    {
        let items: Vec<BvhItem<H>> = items.into_iter().collect();
        if items.is_empty() {
            return BvhTree::new();
        }

        let item_count = items.len();
        let start = Instant::now();
        let root = Self::build_nodes(items, self.config.leaf_size);
        let build_time = start.elapsed();

        crate::engine_debug!("optim::BvhBuilder",
            "Built BVH over {} items (leaf_size {}) in {:?}",
            item_count, self.config.leaf_size, build_time);

        BvhTree::from_parts(root, build_time)
    }

    /// Build a node over a non-empty item set.
    ///
    /// Uses an explicit work stack: degenerate inputs (e.g. identical bounds)
    /// produce trees as deep as the item count.
    fn build_nodes<H>(items: Vec<BvhItem<H>>, leaf_size: usize) -> Option<BvhNode<H>> {
        enum Task<H> {
            Build(Vec<BvhItem<H>>),
            Join(AABB),
        }

        let mut tasks = vec![Task::Build(items)];
        let mut built: Vec<BvhNode<H>> = Vec::new();

        while let Some(task) = tasks.pop() {
            match task {
                Task::Build(mut items) => {
                    let mut bounds = items[0].bounds;
                    for item in &items[1..] {
                        bounds.encapsulate(&item.bounds);
                    }

                    if items.len() <= leaf_size {
                        // The left half of a split keeps its parent's capacity
                        items.shrink_to_fit();
                        built.push(BvhNode::Leaf { bounds, items });
                        continue;
                    }

                    let axis = bounds.largest_axis().index();
                    // Stable: equal centers keep their input order
                    items.sort_by(|a, b| a.bounds.center()[axis].total_cmp(&b.bounds.center()[axis]));

                    let split = Self::find_split_index(&items);
                    let right_items = items.split_off(split);

                    // Popped in reverse: left subtree, right subtree, then the join
                    tasks.push(Task::Join(bounds));
                    tasks.push(Task::Build(right_items));
                    tasks.push(Task::Build(items));
                }
                Task::Join(bounds) => {
                    let right = built.pop()?;
                    let left = built.pop()?;
                    built.push(BvhNode::Internal {
                        bounds,
                        left: Box::new(left),
                        right: Box::new(right),
                    });
                }
            }
        }

        built.pop()
    }

    /// SAH split index over items already sorted along the split axis.
    ///
    /// Candidates are `1..count`; the strictly lowest cost wins, so ties resolve to
    /// the lowest index. Requires `items.len() >= 2`.
    pub(crate) fn find_split_index<H>(items: &[BvhItem<H>]) -> usize {
        let count = items.len();

        let mut prefix: Vec<AABB> = Vec::with_capacity(count);
        let mut acc = items[0].bounds;
        for item in items {
            acc.encapsulate(&item.bounds);
            prefix.push(acc);
        }

        let mut suffix: Vec<AABB> = vec![items[count - 1].bounds; count];
        for i in (0..count - 1).rev() {
            suffix[i] = suffix[i + 1].union(&items[i].bounds);
        }

        let mut best_cost = f32::INFINITY;
        let mut best_index = count / 2;
        for i in 1..count {
            let left_area = prefix[i - 1].surface_area();
            let right_area = suffix[i].surface_area();
            let cost = left_area * i as f32 + right_area * (count - i) as f32;
            if cost < best_cost {
                best_cost = cost;
                best_index = i;
            }
        }

        best_index
    }
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
