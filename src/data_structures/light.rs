//! Light descriptors pushed to the shader once at scene setup.

use cgmath::Vector3;

/// Number of point lights the shader's uniform block has room for.
pub const MAX_POINT_LIGHTS: usize = 4;

/// A point light with distance attenuation `1 / (constant + linear·d + quadratic·d²)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vector3<f32>,
    pub ambient: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
    pub active: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    pub direction: Vector3<f32>,
    pub ambient: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
    pub active: bool,
}

/// The complete, static lighting configuration of a scene.
#[derive(Clone, Debug, PartialEq)]
pub struct LightSetup {
    pub lighting_enabled: bool,
    pub point_lights: Vec<PointLight>,
    pub directional: Option<DirectionalLight>,
}

impl Default for LightSetup {
    fn default() -> Self {
        Self {
            lighting_enabled: true,
            point_lights: Vec::new(),
            directional: None,
        }
    }
}

impl LightSetup {
    /// Lighting switched off; objects show their flat colour or texture.
    pub fn unlit() -> Self {
        Self {
            lighting_enabled: false,
            ..Default::default()
        }
    }
}
