// Screen-space camera for 2D rendering

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};

/// Screen-space camera: origin at the top-left corner, y pointing down,
/// one unit per physical pixel. Matches the coordinate system sprites are laid out in.
#[derive(Debug, Clone)]
pub struct Camera {
    viewport: Vec2,
    view_proj: Mat4,
}

impl Camera {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        let viewport = Vec2::new(viewport_width, viewport_height);
        Self {
            viewport,
            view_proj: Self::projection(viewport),
        }
    }

    fn projection(viewport: Vec2) -> Mat4 {
        // bottom = height, top = 0 flips y so +y runs down the screen
        Mat4::orthographic_rh(0.0, viewport.x, viewport.y, 0.0, -1.0, 1.0)
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Get the view-projection matrix
    pub fn view_proj_matrix(&self) -> Mat4 {
        self.view_proj
    }
}

/// Camera uniform for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_proj_matrix().to_cols_array_2d(),
        }
    }
}
