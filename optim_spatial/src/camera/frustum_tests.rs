use glam::{Mat4, Vec3};
use crate::math::AABB;
use crate::camera::{Camera, ViewProjection};
use super::*;

fn forward_camera() -> Camera {
    // Eye at z=5 looking at the origin, 90° FOV, near 0.1, far 100
    Camera::perspective_look_at(
        Vec3::new(0.0, 0.0, 5.0),
        Vec3::ZERO,
        Vec3::Y,
        std::f32::consts::FRAC_PI_2,
        1.0,
        0.1,
        100.0,
    )
}

// ============================================================================
// Frustum::from_view_projection
// ============================================================================

#[test]
fn test_identity_matrix_gives_ndc_cube() {
    let frustum = Frustum::from_view_projection(&Mat4::IDENTITY);

    for plane in &frustum.planes {
        assert!((plane.normal.length() - 1.0).abs() < 1e-6);
    }

    assert_eq!(frustum.planes[PLANE_LEFT].normal, Vec3::X);
    assert_eq!(frustum.planes[PLANE_LEFT].distance, 1.0);
    assert_eq!(frustum.planes[PLANE_RIGHT].normal, -Vec3::X);
    assert_eq!(frustum.planes[PLANE_BOTTOM].normal, Vec3::Y);
    assert_eq!(frustum.planes[PLANE_TOP].normal, -Vec3::Y);
    assert_eq!(frustum.planes[PLANE_NEAR].normal, Vec3::Z);
    assert_eq!(frustum.planes[PLANE_FAR].normal, -Vec3::Z);
}

#[test]
fn test_perspective_planes_are_normalized() {
    let frustum = Frustum::from_view_projection(&forward_camera().view_projection_matrix());
    for plane in &frustum.planes {
        assert!((plane.normal.length() - 1.0).abs() < 1e-4, "plane normal should be unit length");
    }
}

#[test]
fn test_perspective_contains_point() {
    let frustum = Frustum::from_view_projection(&forward_camera().view_projection_matrix());

    assert!(frustum.contains_point(Vec3::ZERO));
    // Behind the eye
    assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, 10.0)));
    // Beyond the far plane
    assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, -200.0)));
    // Far off to the side
    assert!(!frustum.contains_point(Vec3::new(50.0, 0.0, 0.0)));
}

#[test]
fn test_near_plane_faces_view_direction() {
    let frustum = Frustum::from_view_projection(&forward_camera().view_projection_matrix());
    // Camera looks down -Z, so the near plane's inward normal is -Z
    let near = frustum.planes[PLANE_NEAR];
    assert!((near.normal - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-4);
    // The near plane sits at z = 5 - 0.1
    assert!(near.distance_to_point(Vec3::new(0.0, 0.0, 4.9)).abs() < 1e-3);
}

// ============================================================================
// Plane selection
// ============================================================================

#[test]
fn test_simplified_drops_near_and_far() {
    let frustum = Frustum::from_view_projection(&Mat4::IDENTITY);

    let accurate = frustum.planes(FrustumType::Accurate);
    let simplified = frustum.planes(FrustumType::Simplified);

    assert_eq!(accurate.len(), 6);
    assert_eq!(simplified.len(), 4);
    assert_eq!(simplified, &frustum.planes[PLANE_LEFT..=PLANE_TOP]);
    assert_eq!(FrustumType::default(), FrustumType::Accurate);
}

// ============================================================================
// AABB tests
// ============================================================================

#[test]
fn test_aabb_inside_frustum() {
    let frustum = Frustum::from_view_projection(&forward_camera().view_projection_matrix());
    let aabb = AABB::new(Vec3::splat(-1.0), Vec3::splat(1.0));

    assert!(frustum.intersects_aabb(&aabb));
    assert_eq!(frustum.classify_aabb(&aabb), FrustumTest::Inside);
}

#[test]
fn test_aabb_outside_frustum() {
    let frustum = Frustum::from_view_projection(&forward_camera().view_projection_matrix());
    let aabb = AABB::new(Vec3::splat(100.0), Vec3::splat(101.0));

    assert!(!frustum.intersects_aabb(&aabb));
    assert_eq!(frustum.classify_aabb(&aabb), FrustumTest::Outside);
}

#[test]
fn test_aabb_straddling_frustum_is_partial() {
    let frustum = Frustum::from_view_projection(&forward_camera().view_projection_matrix());
    // Spans from inside the view volume to behind the camera
    let aabb = AABB::new(Vec3::new(-1.0, -1.0, 0.0), Vec3::new(1.0, 1.0, 20.0));

    assert!(frustum.intersects_aabb(&aabb));
    assert_eq!(frustum.classify_aabb(&aabb), FrustumTest::Partial);
}

#[test]
fn test_aabb_behind_camera_visible_to_simplified_planes() {
    // Side planes of an orthographic box never reject along the view axis
    let projection = Mat4::orthographic_rh_gl(-10.0, 10.0, -10.0, 10.0, 0.1, 100.0);
    let frustum = Frustum::from_view_projection(&projection);
    let behind = AABB::new(Vec3::new(-1.0, -1.0, 5.0), Vec3::new(1.0, 1.0, 6.0));

    assert!(!frustum.intersects_aabb(&behind));
    assert!(aabb_intersects_planes(frustum.planes(FrustumType::Simplified), &behind));
    assert_eq!(
        classify_aabb_planes(frustum.planes(FrustumType::Simplified), &behind),
        FrustumTest::Inside
    );
}
