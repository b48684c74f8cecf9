/// Camera - passive view/projection container.
///
/// The camera computes nothing beyond the combined view-projection matrix.
/// The caller sets the view and projection from its own scene representation.

use glam::{Mat4, Vec3};

/// Anything that can provide a view-projection matrix (projection * view).
pub trait ViewProjection {
    fn view_projection_matrix(&self) -> Mat4;
}

impl ViewProjection for Mat4 {
    fn view_projection_matrix(&self) -> Mat4 {
        *self
    }
}

/// Low-level camera.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    view_matrix: Mat4,
    projection_matrix: Mat4,
}

impl Camera {
    pub fn new(view: Mat4, projection: Mat4) -> Self {
        Self {
            view_matrix: view,
            projection_matrix: projection,
        }
    }

    /// Right-handed perspective camera at `eye` looking at `target`.
    ///
    /// Uses the GL clip-space depth range ([-1, 1]), which is the convention the
    /// frustum plane extraction assumes.
    pub fn perspective_look_at(
        eye: Vec3,
        target: Vec3,
        up: Vec3,
        fov_y_radians: f32,
        aspect_ratio: f32,
        z_near: f32,
        z_far: f32,
    ) -> Self {
        Self::new(
            Mat4::look_at_rh(eye, target, up),
            Mat4::perspective_rh_gl(fov_y_radians, aspect_ratio, z_near, z_far),
        )
    }

    // ===== GETTERS =====

    /// View matrix (inverse of the camera's world transform).
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    /// Projection matrix (perspective or orthographic).
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    // ===== SETTERS =====

    pub fn set_view(&mut self, matrix: Mat4) {
        self.view_matrix = matrix;
    }

    pub fn set_projection(&mut self, matrix: Mat4) {
        self.projection_matrix = matrix;
    }
}

impl ViewProjection for Camera {
    fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }
}
