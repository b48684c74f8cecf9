/// BVH nodes and the bounded items they hold.

use crate::math::AABB;

/// A bounded object reference: an opaque handle plus its bounds captured at build time.
#[derive(Debug, Clone, PartialEq)]
pub struct BvhItem<H> {
    pub handle: H,
    pub bounds: AABB,
}

impl<H> BvhItem<H> {
    pub fn new(handle: H, bounds: AABB) -> Self {
        Self { handle, bounds }
    }
}

/// A node of the hierarchy. Each internal node exclusively owns its two children.
#[derive(Debug, Clone)]
pub enum BvhNode<H> {
    /// Leaf holding items in sorted split order.
    Leaf {
        /// Union of the items' bounds
        bounds: AABB,
        items: Vec<BvhItem<H>>,
    },
    /// Internal node with two children.
    Internal {
        /// Union of both children's bounds
        bounds: AABB,
        left: Box<BvhNode<H>>,
        right: Box<BvhNode<H>>,
    },
}

impl<H> BvhNode<H> {
    pub fn bounds(&self) -> &AABB {
        match self {
            BvhNode::Leaf { bounds, .. } | BvhNode::Internal { bounds, .. } => bounds,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, BvhNode::Leaf { .. })
    }

    /// Items stored directly in this node (empty for internal nodes).
    pub fn items(&self) -> &[BvhItem<H>] {
        match self {
            BvhNode::Leaf { items, .. } => items,
            BvhNode::Internal { .. } => &[],
        }
    }

    /// (left, right) children of an internal node.
    pub fn children(&self) -> Option<(&BvhNode<H>, &BvhNode<H>)> {
        match self {
            BvhNode::Leaf { .. } => None,
            BvhNode::Internal { left, right, .. } => Some((left.as_ref(), right.as_ref())),
        }
    }

    /// Number of items in this subtree.
    pub fn item_count(&self) -> usize {
        self.iter().map(|(_, node)| node.items().len()).sum()
    }

    /// Every item in this subtree, in leaf order (left to right).
    pub fn collect_items(&self) -> Vec<&BvhItem<H>> {
        self.iter().flat_map(|(_, node)| node.items()).collect()
    }

    /// Depth-first pre-order traversal of this subtree (left before right).
    /// Depth is relative to this node.
    pub fn iter(&self) -> DepthFirst<'_, H> {
        DepthFirst { stack: vec![(0, self)] }
    }
}

impl<H> Drop for BvhNode<H> {
    /// Iterative teardown: depth can reach the item count.
    fn drop(&mut self) {
        let mut pending: Vec<BvhNode<H>> = Vec::new();
        detach_internal_children(self, &mut pending);
        while let Some(mut node) = pending.pop() {
            detach_internal_children(&mut node, &mut pending);
        }
    }
}

/// Move internal children out of `node`, leaving empty leaves in their place.
fn detach_internal_children<H>(node: &mut BvhNode<H>, pending: &mut Vec<BvhNode<H>>) {
    if let BvhNode::Internal { left, right, .. } = node {
        for child in [left, right] {
            if !child.is_leaf() {
                let placeholder = BvhNode::Leaf { bounds: *child.bounds(), items: Vec::new() };
                pending.push(std::mem::replace(child.as_mut(), placeholder));
            }
        }
    }
}

/// Lazy depth-first pre-order iterator yielding `(depth, node)`.
///
/// Finite, and each call to `BvhNode::iter` / `BvhTree::nodes` starts a fresh walk.
pub struct DepthFirst<'a, H> {
    stack: Vec<(usize, &'a BvhNode<H>)>,
}

impl<'a, H> DepthFirst<'a, H> {
    pub(crate) fn empty() -> Self {
        Self { stack: Vec::new() }
    }
}

impl<'a, H> Iterator for DepthFirst<'a, H> {
    type Item = (usize, &'a BvhNode<H>);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        if let BvhNode::Internal { left, right, .. } = node {
            // Right first so left is visited first
            self.stack.push((depth + 1, right.as_ref()));
            self.stack.push((depth + 1, left.as_ref()));
        }
        Some((depth, node))
    }
}
