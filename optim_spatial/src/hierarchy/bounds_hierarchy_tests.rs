/// Unit tests for BoundsHierarchy.

use glam::{Mat4, Vec3};
use crate::bvh::BvhItem;
use crate::camera::Frustum;
use crate::error::Error;
use crate::math::AABB;
use super::*;

fn unit_box_at(center: Vec3) -> AABB {
    AABB::from_center_size(center, Vec3::ONE)
}

/// Frustum whose side planes bound x and y to [-1, 1].
fn ndc_frustum() -> Frustum {
    Frustum::from_view_projection(&Mat4::IDENTITY)
}

// ============================================================================
// Structure
// ============================================================================

#[test]
fn test_insert_and_navigate() {
    let mut hierarchy: BoundsHierarchy<u32> = BoundsHierarchy::new();
    let root = hierarchy.insert_group(None, Vec3::ZERO, 0.0).unwrap();
    let a = hierarchy.insert_group(Some(root), Vec3::ZERO, 0.0).unwrap();
    let b = hierarchy.insert_group(Some(root), Vec3::ZERO, 0.0).unwrap();
    let leaf = hierarchy.insert_group(Some(a), Vec3::ZERO, 0.0).unwrap();

    assert_eq!(hierarchy.len(), 4);
    assert_eq!(hierarchy.roots(), &[root]);
    assert_eq!(hierarchy.children(root), &[a, b]);
    assert_eq!(hierarchy.children(a), &[leaf]);
    assert_eq!(hierarchy.parent(leaf), Some(a));
    assert_eq!(hierarchy.parent(root), None);
    assert_eq!(hierarchy.is_rendered(leaf), Some(true));
}

#[test]
fn test_insert_under_unknown_parent() {
    let mut hierarchy: BoundsHierarchy<u32> = BoundsHierarchy::new();
    let gone = hierarchy.insert_group(None, Vec3::ZERO, 0.0).unwrap();
    hierarchy.remove_group(gone).unwrap();

    let result = hierarchy.insert_group(Some(gone), Vec3::ZERO, 0.0);
    assert!(matches!(result, Err(Error::InvalidInput(_))));
    assert!(matches!(hierarchy.add_item(gone, BvhItem::new(0, unit_box_at(Vec3::ZERO))), Err(Error::InvalidInput(_))));
}

#[test]
fn test_remove_group_removes_subtree() {
    let mut hierarchy: BoundsHierarchy<u32> = BoundsHierarchy::new();
    let root = hierarchy.insert_group(None, Vec3::ZERO, 0.0).unwrap();
    let a = hierarchy.insert_group(Some(root), Vec3::ZERO, 0.0).unwrap();
    let b = hierarchy.insert_group(Some(root), Vec3::ZERO, 0.0).unwrap();
    let leaf = hierarchy.insert_group(Some(a), Vec3::ZERO, 0.0).unwrap();

    assert_eq!(hierarchy.remove_group(a).unwrap(), 2);
    assert_eq!(hierarchy.len(), 2);
    assert_eq!(hierarchy.children(root), &[b]);
    assert!(hierarchy.group(leaf).is_none());
    assert!(matches!(hierarchy.remove_group(a), Err(Error::InvalidInput(_))));

    assert_eq!(hierarchy.remove_group(root).unwrap(), 2);
    assert!(hierarchy.is_empty());
    assert!(hierarchy.roots().is_empty());
}

// ============================================================================
// Bounds
// ============================================================================

#[test]
fn test_empty_group_bounds_at_origin() {
    let mut hierarchy: BoundsHierarchy<u32> = BoundsHierarchy::new();
    let group = hierarchy.insert_group(None, Vec3::new(3.0, 0.0, 0.0), 2.0).unwrap();

    let bounds = hierarchy.recalculate_bounds(group).unwrap();
    assert_eq!(bounds.center(), Vec3::new(3.0, 0.0, 0.0));
    assert_eq!(bounds.size(), Vec3::splat(2.0));
}

#[test]
fn test_item_bounds_replace_origin() {
    let mut hierarchy: BoundsHierarchy<u32> = BoundsHierarchy::new();
    let group = hierarchy.insert_group(None, Vec3::new(100.0, 100.0, 100.0), 0.0).unwrap();
    hierarchy.add_item(group, BvhItem::new(1, unit_box_at(Vec3::ZERO))).unwrap();
    hierarchy.add_item(group, BvhItem::new(2, unit_box_at(Vec3::new(4.0, 0.0, 0.0)))).unwrap();

    let bounds = hierarchy.recalculate_bounds(group).unwrap();
    assert_eq!(bounds.min, Vec3::new(-0.5, -0.5, -0.5));
    assert_eq!(bounds.max, Vec3::new(4.5, 0.5, 0.5));
    assert_eq!(hierarchy.bounds(group), Some(bounds));
}

#[test]
fn test_children_and_margin() {
    let mut hierarchy: BoundsHierarchy<u32> = BoundsHierarchy::new();
    let root = hierarchy.insert_group(None, Vec3::ZERO, 1.0).unwrap();
    let child = hierarchy.insert_group(Some(root), Vec3::ZERO, 0.0).unwrap();
    hierarchy.add_item(root, BvhItem::new(1, unit_box_at(Vec3::ZERO))).unwrap();
    hierarchy.add_item(child, BvhItem::new(2, unit_box_at(Vec3::new(0.0, 10.0, 0.0)))).unwrap();

    let bounds = hierarchy.recalculate_bounds(root).unwrap();
    // Union is [-0.5, 10.5] on y, grown by 0.5 per face
    assert_eq!(bounds.min, Vec3::new(-1.0, -1.0, -1.0));
    assert_eq!(bounds.max, Vec3::new(1.0, 11.0, 1.0));

    // Children are recalculated as part of the parent
    assert_eq!(hierarchy.bounds(child).unwrap().center(), Vec3::new(0.0, 10.0, 0.0));
}

// ============================================================================
// Rendered state
// ============================================================================

#[test]
fn test_set_rendered_propagates() {
    let mut hierarchy: BoundsHierarchy<u32> = BoundsHierarchy::new();
    let root = hierarchy.insert_group(None, Vec3::ZERO, 0.0).unwrap();
    let child = hierarchy.insert_group(Some(root), Vec3::ZERO, 0.0).unwrap();
    let grandchild = hierarchy.insert_group(Some(child), Vec3::ZERO, 0.0).unwrap();

    assert!(hierarchy.set_rendered(root, true).unwrap().is_empty());

    let changes = hierarchy.set_rendered(root, false).unwrap();
    assert_eq!(changes, vec![
        VisibilityChange { group: root, rendered: false },
        VisibilityChange { group: child, rendered: false },
        VisibilityChange { group: grandchild, rendered: false },
    ]);
    assert_eq!(hierarchy.is_rendered(grandchild), Some(false));
}

#[test]
fn test_propagation_stops_at_unchanged_child() {
    let mut hierarchy: BoundsHierarchy<u32> = BoundsHierarchy::new();
    let root = hierarchy.insert_group(None, Vec3::ZERO, 0.0).unwrap();
    let child = hierarchy.insert_group(Some(root), Vec3::ZERO, 0.0).unwrap();
    let grandchild = hierarchy.insert_group(Some(child), Vec3::ZERO, 0.0).unwrap();

    hierarchy.set_rendered(child, false).unwrap();
    hierarchy.set_rendered(grandchild, true).unwrap();

    let changes = hierarchy.set_rendered(root, false).unwrap();
    assert_eq!(changes, vec![VisibilityChange { group: root, rendered: false }]);
    assert_eq!(hierarchy.is_rendered(grandchild), Some(true));
}

// ============================================================================
// Culling
// ============================================================================

#[test]
fn test_evaluate_culling() {
    let mut hierarchy: BoundsHierarchy<u32> = BoundsHierarchy::new();
    let inside = hierarchy.insert_group(None, Vec3::ZERO, 0.0).unwrap();
    let outside = hierarchy.insert_group(None, Vec3::ZERO, 0.0).unwrap();
    let far_away = hierarchy.insert_group(None, Vec3::ZERO, 0.0).unwrap();
    hierarchy.add_item(inside, BvhItem::new(1, unit_box_at(Vec3::ZERO))).unwrap();
    hierarchy.add_item(outside, BvhItem::new(2, unit_box_at(Vec3::new(10.0, 0.0, 0.0)))).unwrap();
    // Beyond the far plane, which culling ignores
    hierarchy.add_item(far_away, BvhItem::new(3, unit_box_at(Vec3::new(0.0, 0.0, 50.0)))).unwrap();
    hierarchy.recalculate_all().unwrap();

    let frustum = ndc_frustum();
    assert!(hierarchy.evaluate_culling(inside, &frustum).unwrap().is_empty());
    assert_eq!(
        hierarchy.evaluate_culling(outside, &frustum).unwrap(),
        vec![VisibilityChange { group: outside, rendered: false }],
    );
    assert!(hierarchy.evaluate_culling(far_away, &frustum).unwrap().is_empty());
    assert_eq!(hierarchy.is_rendered(far_away), Some(true));
}

#[test]
fn test_evaluate_all() {
    let mut hierarchy: BoundsHierarchy<u32> = BoundsHierarchy::new();
    let root = hierarchy.insert_group(None, Vec3::ZERO, 0.0).unwrap();
    let near_child = hierarchy.insert_group(Some(root), Vec3::ZERO, 0.0).unwrap();
    let far_child = hierarchy.insert_group(Some(root), Vec3::ZERO, 0.0).unwrap();
    hierarchy.add_item(near_child, BvhItem::new(1, unit_box_at(Vec3::ZERO))).unwrap();
    hierarchy.add_item(far_child, BvhItem::new(2, unit_box_at(Vec3::new(10.0, 0.0, 0.0)))).unwrap();
    hierarchy.recalculate_all().unwrap();

    let frustum = ndc_frustum();
    let changes = hierarchy.evaluate_all(&frustum);
    assert_eq!(changes, vec![VisibilityChange { group: far_child, rendered: false }]);

    // Hiding the root hides the child that was still rendered
    hierarchy.set_rendered(root, false).unwrap();
    assert_eq!(hierarchy.is_rendered(near_child), Some(false));

    // Re-evaluating restores what is actually visible
    let changes = hierarchy.evaluate_all(&frustum);
    assert_eq!(changes, vec![
        VisibilityChange { group: root, rendered: true },
        VisibilityChange { group: near_child, rendered: true },
        VisibilityChange { group: far_child, rendered: true },
        VisibilityChange { group: far_child, rendered: false },
    ]);
}
