//! Per-object transform parameters and model-matrix composition.

use cgmath::{Deg, Matrix4, Vector3};

/// Scale, Euler rotation and position of one drawn object.
///
/// Rotations are independent axis angles in degrees. The composed matrix
/// applies scale first, then X, Y and Z rotation, then translation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub scale: Vector3<f32>,
    pub rotation_x: Deg<f32>,
    pub rotation_y: Deg<f32>,
    pub rotation_z: Deg<f32>,
    pub position: Vector3<f32>,
}

impl Transform {
    /// Unrotated transform.
    pub fn new(scale: impl Into<Vector3<f32>>, position: impl Into<Vector3<f32>>) -> Self {
        Self {
            scale: scale.into(),
            rotation_x: Deg(0.0),
            rotation_y: Deg(0.0),
            rotation_z: Deg(0.0),
            position: position.into(),
        }
    }

    pub fn rotated(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation_x = Deg(x);
        self.rotation_y = Deg(y);
        self.rotation_z = Deg(z);
        self
    }

    pub fn to_matrix(&self) -> Matrix4<f32> {
        compose(
            self.scale,
            self.rotation_x,
            self.rotation_y,
            self.rotation_z,
            self.position,
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new([1.0, 1.0, 1.0], [0.0, 0.0, 0.0])
    }
}

/// `T · Rz · Ry · Rx · S`
pub fn compose(
    scale: Vector3<f32>,
    rotation_x: Deg<f32>,
    rotation_y: Deg<f32>,
    rotation_z: Deg<f32>,
    position: Vector3<f32>,
) -> Matrix4<f32> {
    Matrix4::from_translation(position)
        * Matrix4::from_angle_z(rotation_z)
        * Matrix4::from_angle_y(rotation_y)
        * Matrix4::from_angle_x(rotation_x)
        * Matrix4::from_nonuniform_scale(scale.x, scale.y, scale.z)
}
