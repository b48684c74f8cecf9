use glam::{Mat4, Vec3};
use super::*;

fn unit_at(x: f32, y: f32, z: f32) -> AABB {
    AABB::from_center_size(Vec3::new(x, y, z), Vec3::ONE)
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_new_reorders_corners() {
    let aabb = AABB::new(Vec3::new(1.0, -1.0, 3.0), Vec3::new(-1.0, 2.0, 0.0));
    assert_eq!(aabb.min, Vec3::new(-1.0, -1.0, 0.0));
    assert_eq!(aabb.max, Vec3::new(1.0, 2.0, 3.0));
    assert!(aabb.is_valid());
}

#[test]
fn test_from_center_size() {
    let aabb = AABB::from_center_size(Vec3::new(2.0, 0.0, 0.0), Vec3::new(2.0, 4.0, 6.0));
    assert_eq!(aabb.min, Vec3::new(1.0, -2.0, -3.0));
    assert_eq!(aabb.max, Vec3::new(3.0, 2.0, 3.0));
    assert_eq!(aabb.center(), Vec3::new(2.0, 0.0, 0.0));
    assert_eq!(aabb.size(), Vec3::new(2.0, 4.0, 6.0));
    assert_eq!(aabb.extents(), Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn test_from_point_has_zero_size() {
    let aabb = AABB::from_point(Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(aabb.size(), Vec3::ZERO);
    assert_eq!(aabb.surface_area(), 0.0);
}

// ============================================================================
// Union / expansion
// ============================================================================

#[test]
fn test_encapsulate() {
    let mut a = unit_at(0.0, 0.0, 0.0);
    a.encapsulate(&unit_at(8.0, 0.0, 0.0));
    assert_eq!(a.min, Vec3::new(-0.5, -0.5, -0.5));
    assert_eq!(a.max, Vec3::new(8.5, 0.5, 0.5));
}

#[test]
fn test_union_all() {
    let boxes: Vec<AABB> = (0..9).map(|i| unit_at(i as f32, 0.0, 0.0)).collect();
    let union = AABB::union_all(&boxes).unwrap();
    assert_eq!(union.min.x, -0.5);
    assert_eq!(union.max.x, 8.5);
    assert!(AABB::union_all(&[]).is_none());
}

#[test]
fn test_encapsulate_point() {
    let mut a = AABB::from_point(Vec3::ZERO);
    a.encapsulate_point(Vec3::new(-1.0, 2.0, 0.5));
    assert_eq!(a.min, Vec3::new(-1.0, 0.0, 0.0));
    assert_eq!(a.max, Vec3::new(0.0, 2.0, 0.5));
}

#[test]
fn test_expand_grows_total_size() {
    let aabb = unit_at(0.0, 0.0, 0.0).expanded(1.0);
    assert_eq!(aabb.size(), Vec3::splat(2.0));
    assert_eq!(aabb.center(), Vec3::ZERO);
}

#[test]
fn test_expand_negative_clamps_to_zero() {
    let aabb = unit_at(3.0, 0.0, 0.0).expanded(-5.0);
    assert_eq!(aabb.size(), Vec3::ZERO);
    assert_eq!(aabb.center(), Vec3::new(3.0, 0.0, 0.0));
}

// ============================================================================
// Surface area / largest axis
// ============================================================================

#[test]
fn test_surface_area() {
    let aabb = AABB::from_center_size(Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(aabb.surface_area(), 2.0 * (2.0 + 6.0 + 3.0));
}

#[test]
fn test_largest_axis_strict() {
    assert_eq!(AABB::from_center_size(Vec3::ZERO, Vec3::new(3.0, 1.0, 1.0)).largest_axis(), Axis::X);
    assert_eq!(AABB::from_center_size(Vec3::ZERO, Vec3::new(1.0, 3.0, 1.0)).largest_axis(), Axis::Y);
    assert_eq!(AABB::from_center_size(Vec3::ZERO, Vec3::new(1.0, 1.0, 3.0)).largest_axis(), Axis::Z);
}

#[test]
fn test_largest_axis_tie_breaks() {
    // Y ties Z (both larger than X) -> Y
    assert_eq!(AABB::from_center_size(Vec3::ZERO, Vec3::new(1.0, 2.0, 2.0)).largest_axis(), Axis::Y);
    // X ties Y -> X
    assert_eq!(AABB::from_center_size(Vec3::ZERO, Vec3::new(2.0, 2.0, 1.0)).largest_axis(), Axis::X);
    // X ties Z -> X
    assert_eq!(AABB::from_center_size(Vec3::ZERO, Vec3::new(2.0, 1.0, 2.0)).largest_axis(), Axis::X);
    // Cube -> X
    assert_eq!(AABB::from_center_size(Vec3::ZERO, Vec3::ONE).largest_axis(), Axis::X);
}

#[test]
fn test_axis_index() {
    assert_eq!(Axis::X.index(), 0);
    assert_eq!(Axis::Y.index(), 1);
    assert_eq!(Axis::Z.index(), 2);
}

// ============================================================================
// Queries
// ============================================================================

#[test]
fn test_contains_and_intersects() {
    let big = AABB::new(Vec3::splat(-10.0), Vec3::splat(10.0));
    let small = AABB::new(Vec3::splat(-1.0), Vec3::splat(1.0));
    let straddling = AABB::new(Vec3::splat(5.0), Vec3::splat(15.0));
    let far = AABB::new(Vec3::splat(20.0), Vec3::splat(21.0));

    assert!(big.contains(&small));
    assert!(!small.contains(&big));
    assert!(!big.contains(&straddling));
    assert!(big.intersects(&straddling));
    assert!(!big.intersects(&far));
    assert!(big.contains_point(Vec3::splat(10.0)));
    assert!(!big.contains_point(Vec3::splat(10.5)));
}

#[test]
fn test_transformed_translation_and_rotation() {
    let aabb = AABB::new(Vec3::new(-1.0, -2.0, -3.0), Vec3::new(1.0, 2.0, 3.0));

    let moved = aabb.transformed(&Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0)));
    assert_eq!(moved.min, Vec3::new(9.0, -2.0, -3.0));
    assert_eq!(moved.max, Vec3::new(11.0, 2.0, 3.0));

    let rotated = aabb.transformed(&Mat4::from_rotation_z(std::f32::consts::FRAC_PI_2));
    assert!((rotated.size() - Vec3::new(4.0, 2.0, 6.0)).abs().max_element() < 1e-5);
}
