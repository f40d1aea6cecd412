//! Minimal camera
//!
//! A look-at perspective camera with just enough surface for the forcefield:
//! a view-projection uniform for the material and screen-point-to-ray
//! unprojection for the pointer impact source.

use glam::{Mat4, Vec2, Vec3};

use crate::source::ray::Ray;

/// Viewport dimensions in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Create a new viewport.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Get the aspect ratio.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / (self.height.max(1)) as f32
    }
}

/// Perspective look-at camera.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    /// Camera position in world space.
    pub position: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    /// Up direction.
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Near clip distance.
    pub near: f32,
    /// Far clip distance.
    pub far: f32,
}

impl Camera {
    /// Create a camera at `position` looking at `target`.
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            target,
            up: Vec3::Y,
            fov_y: 45f32.to_radians(),
            near: 0.1,
            far: 100.0,
        }
    }

    /// Get the view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Get the projection matrix for the given viewport.
    pub fn projection_matrix(&self, viewport: Viewport) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, viewport.aspect(), self.near, self.far)
    }

    /// Get the combined view-projection matrix.
    pub fn view_projection(&self, viewport: Viewport) -> Mat4 {
        self.projection_matrix(viewport) * self.view_matrix()
    }

    /// Unproject a screen point (pixels, origin top-left) into a world-space
    /// ray from the camera through that point.
    pub fn screen_point_to_ray(&self, screen: Vec2, viewport: Viewport) -> Ray {
        let ndc = Vec2::new(
            2.0 * screen.x / viewport.width.max(1) as f32 - 1.0,
            1.0 - 2.0 * screen.y / viewport.height.max(1) as f32,
        );

        let inverse = self.view_projection(viewport).inverse();
        let far_point = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));

        Ray::new(self.position, far_point - self.position)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 1.0, 5.0), Vec3::ZERO)
    }
}

/// Camera uniform block for the forcefield material.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world position (xyz), w unused.
    pub position: [f32; 4],
}

impl CameraUniform {
    /// Identity transform placeholder used before the first camera update.
    pub fn identity() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 4],
        }
    }

    /// Build the uniform from a camera and viewport.
    pub fn from_camera(camera: &Camera, viewport: Viewport) -> Self {
        Self {
            view_proj: camera.view_projection(viewport).to_cols_array_2d(),
            position: [camera.position.x, camera.position.y, camera.position.z, 0.0],
        }
    }
}
