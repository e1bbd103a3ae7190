//! A fixed camera looking at the table.
//!
//! The scene is static, so there is no controller: the camera is placed once
//! from the [`SceneConfig`](crate::config::SceneConfig) and only the
//! projection follows window resizes.

use cgmath::{Deg, Matrix4, Point3, Rad, Vector3, perspective};

/// wgpu clip space has z in 0..1 where cgmath (OpenGL) produces -1..1.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
}

impl Camera {
    pub fn new(eye: impl Into<Point3<f32>>, target: impl Into<Point3<f32>>) -> Self {
        Self {
            eye: eye.into(),
            target: target.into(),
            up: Vector3::unit_y(),
        }
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.eye, self.target, self.up)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    aspect: f32,
    fovy: Rad<f32>,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new(width: u32, height: u32, fovy: impl Into<Rad<f32>>, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width.max(1) as f32 / height.max(1) as f32,
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

/// Laid out like `Camera` in `scene.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_position: [f32; 4],
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    pub fn new() -> Self {
        use cgmath::SquareMatrix;
        Self {
            view_position: [0.0; 4],
            view_proj: Matrix4::identity().into(),
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera, projection: &Projection) {
        self.view_position = camera.eye.to_homogeneous().into();
        self.view_proj = (projection.calc_matrix() * camera.calc_matrix()).into();
    }
}

/// Camera and projection built from the configured eye, target and lens.
pub fn from_config(config: &crate::config::SceneConfig) -> (Camera, Projection) {
    let camera = Camera::new(config.eye, config.target);
    let projection = Projection::new(
        config.width,
        config.height,
        Deg(config.fovy),
        config.znear,
        config.zfar,
    );
    (camera, projection)
}

#[cfg(test)]
mod tests {
    use cgmath::{Transform, Vector4};

    use super::*;

    #[test]
    fn target_lands_in_the_middle_of_clip_space() {
        let camera = Camera::new((0.0, 14.0, 20.0), (0.0, 5.0, 0.0));
        let projection = Projection::new(1000, 800, Deg(45.0), 0.1, 200.0);
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera, &projection);

        let view_proj: Matrix4<f32> = uniform.view_proj.into();
        let clip = view_proj * Vector4::new(0.0, 5.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
        assert_eq!(uniform.view_position, [0.0, 14.0, 20.0, 1.0]);
    }

    #[test]
    fn resize_ignores_minimised_windows() {
        let mut projection = Projection::new(800, 400, Deg(45.0), 0.1, 100.0);
        projection.resize(0, 300);
        assert_eq!(projection.aspect(), 2.0);
        projection.resize(300, 300);
        assert_eq!(projection.aspect(), 1.0);
        let m = projection.calc_matrix();
        assert!(m.transform_point(Point3::new(0.0, 0.0, -1.0)).z.is_finite());
    }
}
