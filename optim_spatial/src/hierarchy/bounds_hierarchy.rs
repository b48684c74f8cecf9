/// BoundsHierarchy - nested groups of items with aggregated bounds.
///
/// Each group owns a set of items and any number of child groups. Its bounds cover
/// its items and the bounds of every child, grown by the group margin. Culling uses
/// the side planes of the frustum only (near and far are ignored) and a group's
/// rendered state is pushed down to its children when it changes.

use std::collections::VecDeque;
use glam::Vec3;
use slotmap::{new_key_type, SlotMap};
use crate::bvh::BvhItem;
use crate::camera::{aabb_intersects_planes, Frustum, FrustumType};
use crate::error::Result;
use crate::math::AABB;
use crate::{engine_bail, engine_trace};

new_key_type! {
    /// Stable key of a group in a BoundsHierarchy
    pub struct BoundsGroupKey;
}

/// Rendered state change produced by culling or `set_rendered`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityChange {
    pub group: BoundsGroupKey,
    pub rendered: bool,
}

/// One group of the hierarchy
#[derive(Debug, Clone)]
pub struct BoundsGroup<H> {
    parent: Option<BoundsGroupKey>,
    children: Vec<BoundsGroupKey>,
    items: Vec<BvhItem<H>>,
    origin: Vec3,
    margin: f32,
    bounds: AABB,
    rendered: bool,
}

impl<H> BoundsGroup<H> {
    pub fn parent(&self) -> Option<BoundsGroupKey> {
        self.parent
    }

    pub fn children(&self) -> &[BoundsGroupKey] {
        &self.children
    }

    pub fn items(&self) -> &[BvhItem<H>] {
        &self.items
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// Bounds as of the last `recalculate_bounds`
    pub fn bounds(&self) -> &AABB {
        &self.bounds
    }

    pub fn is_rendered(&self) -> bool {
        self.rendered
    }
}

pub struct BoundsHierarchy<H> {
    groups: SlotMap<BoundsGroupKey, BoundsGroup<H>>,
    roots: Vec<BoundsGroupKey>,
}

impl<H> Default for BoundsHierarchy<H> {
    fn default() -> Self {
        Self {
            groups: SlotMap::with_key(),
            roots: Vec::new(),
        }
    }
}

impl<H> BoundsHierarchy<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn group(&self, key: BoundsGroupKey) -> Option<&BoundsGroup<H>> {
        self.groups.get(key)
    }

    fn group_or_err(&self, key: BoundsGroupKey) -> Result<&BoundsGroup<H>> {
        match self.groups.get(key) {
            Some(group) => Ok(group),
            None => engine_bail!("optim::BoundsHierarchy", InvalidInput, "Unknown group {:?}", key),
        }
    }

    /// Add a group under `parent` (or as a root). New groups start rendered, with
    /// zero-size bounds at `origin`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when `parent` is not in the hierarchy.
    pub fn insert_group(&mut self, parent: Option<BoundsGroupKey>, origin: Vec3, margin: f32) -> Result<BoundsGroupKey> {
        if let Some(parent) = parent {
            self.group_or_err(parent)?;
        }

        let key = self.groups.insert(BoundsGroup {
            parent,
            children: Vec::new(),
            items: Vec::new(),
            origin,
            margin,
            bounds: AABB::from_point(origin),
            rendered: true,
        });

        match parent {
            Some(parent) => self.groups[parent].children.push(key),
            None => self.roots.push(key),
        }
        Ok(key)
    }

    /// Attach an item to a group. Bounds are not updated until `recalculate_bounds`.
    pub fn add_item(&mut self, key: BoundsGroupKey, item: BvhItem<H>) -> Result<()> {
        match self.groups.get_mut(key) {
            Some(group) => {
                group.items.push(item);
                Ok(())
            }
            None => engine_bail!("optim::BoundsHierarchy", InvalidInput, "Unknown group {:?}", key),
        }
    }

    /// Remove a group and all of its descendants. Returns the number of groups removed.
    pub fn remove_group(&mut self, key: BoundsGroupKey) -> Result<usize> {
        let parent = self.group_or_err(key)?.parent;
        match parent {
            Some(parent) => self.groups[parent].children.retain(|&child| child != key),
            None => self.roots.retain(|&root| root != key),
        }

        let mut pending = vec![key];
        let mut removed = 0;
        while let Some(current) = pending.pop() {
            if let Some(group) = self.groups.remove(current) {
                pending.extend(group.children);
                removed += 1;
            }
        }
        Ok(removed)
    }

    pub fn parent(&self, key: BoundsGroupKey) -> Option<BoundsGroupKey> {
        self.groups.get(key).and_then(|group| group.parent)
    }

    /// Children of a group (empty for unknown keys)
    pub fn children(&self, key: BoundsGroupKey) -> &[BoundsGroupKey] {
        self.groups.get(key).map(|group| group.children.as_slice()).unwrap_or(&[])
    }

    /// Groups without a parent, in insertion order
    pub fn roots(&self) -> &[BoundsGroupKey] {
        &self.roots
    }

    pub fn bounds(&self, key: BoundsGroupKey) -> Option<AABB> {
        self.groups.get(key).map(|group| group.bounds)
    }

    pub fn is_rendered(&self, key: BoundsGroupKey) -> Option<bool> {
        self.groups.get(key).map(|group| group.rendered)
    }

    /// Recompute the bounds of a group and, first, of every descendant.
    ///
    /// Item bounds are merged starting from a zero-size box at the group origin, which
    /// the first item with a non-zero size replaces. Child bounds are then merged in and
    /// the result is grown by the margin.
    pub fn recalculate_bounds(&mut self, key: BoundsGroupKey) -> Result<AABB> {
        let group = self.group_or_err(key)?;
        let children = group.children.clone();

        let mut bounds = AABB::from_point(group.origin);
        for item in &group.items {
            if bounds.size() == Vec3::ZERO {
                bounds = item.bounds;
            } else {
                bounds.encapsulate(&item.bounds);
            }
        }

        for child in children {
            let child_bounds = self.recalculate_bounds(child)?;
            bounds.encapsulate(&child_bounds);
        }

        let group = &mut self.groups[key];
        bounds.expand(group.margin);
        group.bounds = bounds;
        Ok(bounds)
    }

    /// Recalculate every root (and so every group).
    pub fn recalculate_all(&mut self) -> Result<()> {
        for root in self.roots.clone() {
            self.recalculate_bounds(root)?;
        }
        Ok(())
    }

    /// Set the rendered state of a group.
    ///
    /// Does nothing when the state is unchanged; otherwise the new state is applied
    /// to each child with the same rule. Returns the groups whose state changed,
    /// parents before children.
    pub fn set_rendered(&mut self, key: BoundsGroupKey, rendered: bool) -> Result<Vec<VisibilityChange>> {
        self.group_or_err(key)?;
        let mut changes = Vec::new();
        self.apply_rendered(key, rendered, &mut changes);
        Ok(changes)
    }

    fn apply_rendered(&mut self, key: BoundsGroupKey, rendered: bool, changes: &mut Vec<VisibilityChange>) {
        let Some(group) = self.groups.get_mut(key) else {
            return;
        };
        if group.rendered == rendered {
            return;
        }
        group.rendered = rendered;
        changes.push(VisibilityChange { group: key, rendered });

        for child in group.children.clone() {
            self.apply_rendered(child, rendered, changes);
        }
    }

    /// Cull one group against the side planes of `frustum`.
    pub fn evaluate_culling(&mut self, key: BoundsGroupKey, frustum: &Frustum) -> Result<Vec<VisibilityChange>> {
        let bounds = self.group_or_err(key)?.bounds;
        let visible = aabb_intersects_planes(frustum.planes(FrustumType::Simplified), &bounds);
        self.set_rendered(key, visible)
    }

    /// Cull every group, roots first, then level by level.
    pub fn evaluate_all(&mut self, frustum: &Frustum) -> Vec<VisibilityChange> {
        let mut changes = Vec::new();
        let mut queue: VecDeque<BoundsGroupKey> = self.roots.iter().copied().collect();

        while let Some(key) = queue.pop_front() {
            let Some(group) = self.groups.get(key) else {
                continue;
            };
            queue.extend(group.children.iter().copied());

            let visible = aabb_intersects_planes(frustum.planes(FrustumType::Simplified), &group.bounds);
            self.apply_rendered(key, visible, &mut changes);
        }

        engine_trace!("optim::BoundsHierarchy",
            "Evaluated {} groups, {} visibility changes", self.groups.len(), changes.len());
        changes
    }
}

#[cfg(test)]
#[path = "bounds_hierarchy_tests.rs"]
mod tests;
