//! The scene shader's uniform interface.
//!
//! Uniforms are addressed by the names the WGSL shader's structs mirror, the
//! same way a GL program exposes them: `model`, `objectColor`,
//! `pointLights[1].diffuse` and so on. [`ShaderState`] is the CPU-side copy
//! of that uniform state. Setters write into it immediately and the next draw
//! snapshots the per-object part ([`ObjectUniform`]); the lighting part
//! ([`LightingUniform`]) is written once and uploaded when it changes.

use cgmath::{Matrix, Matrix3, Matrix4, SquareMatrix, Vector2, Vector3, Vector4};

use crate::{
    data_structures::light::MAX_POINT_LIGHTS,
    error::{SceneError, SceneResult},
    resources::MAX_TEXTURE_UNITS,
};

pub const MODEL: &str = "model";
pub const OBJECT_COLOR: &str = "objectColor";
pub const OBJECT_TEXTURE: &str = "objectTexture";
pub const USE_TEXTURE: &str = "bUseTexture";
pub const USE_LIGHTING: &str = "bUseLighting";
pub const UV_SCALE: &str = "UVscale";
pub const MATERIAL_DIFFUSE: &str = "material.diffuseColor";
pub const MATERIAL_SPECULAR: &str = "material.specularColor";
pub const MATERIAL_SHININESS: &str = "material.shininess";

/// `pointLights[index].field`
pub fn point_light(index: usize, field: &str) -> String {
    format!("pointLights[{index}].{field}")
}

/// `directionalLight.field`
pub fn directional_light(field: &str) -> String {
    format!("directionalLight.{field}")
}

/// Typed uniform setters addressed by uniform name.
pub trait UniformSink {
    fn set_mat4(&mut self, name: &str, value: Matrix4<f32>) -> SceneResult<()>;
    fn set_vec2(&mut self, name: &str, value: Vector2<f32>) -> SceneResult<()>;
    fn set_vec3(&mut self, name: &str, value: Vector3<f32>) -> SceneResult<()>;
    fn set_vec4(&mut self, name: &str, value: Vector4<f32>) -> SceneResult<()>;
    fn set_float(&mut self, name: &str, value: f32) -> SceneResult<()>;
    fn set_int(&mut self, name: &str, value: i32) -> SceneResult<()>;
    fn set_bool(&mut self, name: &str, value: bool) -> SceneResult<()>;
    fn set_sampler(&mut self, name: &str, unit: usize) -> SceneResult<()>;
}

/// Per-draw uniforms, laid out like `ObjectUniform` in `scene.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    /// Inverse transpose of the model matrix's upper 3×3, padded to 4×4.
    pub normal: [[f32; 4]; 4],
    pub object_color: [f32; 4],
    pub diffuse_color: [f32; 3],
    pub shininess: f32,
    pub specular_color: [f32; 3],
    pub use_texture: u32,
    pub uv_scale: [f32; 2],
    pub texture_unit: u32,
    _padding: u32,
}

impl Default for ObjectUniform {
    fn default() -> Self {
        let identity: [[f32; 4]; 4] = Matrix4::identity().into();
        Self {
            model: identity,
            normal: identity,
            object_color: [1.0; 4],
            diffuse_color: [1.0; 3],
            shininess: 1.0,
            specular_color: [0.0; 3],
            use_texture: 0,
            uv_scale: [1.0; 2],
            texture_unit: 0,
            _padding: 0,
        }
    }
}

impl ObjectUniform {
    pub fn uses_texture(&self) -> bool {
        self.use_texture != 0
    }

    pub fn model_matrix(&self) -> Matrix4<f32> {
        self.model.into()
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointLightRaw {
    pub position: [f32; 3],
    pub constant: f32,
    pub ambient: [f32; 3],
    pub linear: f32,
    pub diffuse: [f32; 3],
    pub quadratic: f32,
    pub specular: [f32; 3],
    pub active: u32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DirectionalLightRaw {
    pub direction: [f32; 3],
    _padding: u32,
    pub ambient: [f32; 3],
    _padding2: u32,
    pub diffuse: [f32; 3],
    _padding3: u32,
    pub specular: [f32; 3],
    pub active: u32,
}

/// Scene-wide lighting, laid out like `Lighting` in `scene.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    pub point_lights: [PointLightRaw; MAX_POINT_LIGHTS],
    pub directional: DirectionalLightRaw,
    pub use_lighting: u32,
    _padding: [u32; 3],
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum PointField {
    Position,
    Ambient,
    Diffuse,
    Specular,
    Constant,
    Linear,
    Quadratic,
    Active,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum DirectionalField {
    Direction,
    Ambient,
    Diffuse,
    Specular,
    Active,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Uniform {
    Model,
    ObjectColor,
    ObjectTexture,
    UseTexture,
    UseLighting,
    UvScale,
    MaterialDiffuse,
    MaterialSpecular,
    MaterialShininess,
    Point(usize, PointField),
    Directional(DirectionalField),
}

impl Uniform {
    fn parse(name: &str) -> SceneResult<Self> {
        let unknown = || SceneError::UnknownUniform(name.to_string());
        let uniform = match name {
            MODEL => Uniform::Model,
            OBJECT_COLOR => Uniform::ObjectColor,
            OBJECT_TEXTURE => Uniform::ObjectTexture,
            USE_TEXTURE => Uniform::UseTexture,
            USE_LIGHTING => Uniform::UseLighting,
            UV_SCALE => Uniform::UvScale,
            MATERIAL_DIFFUSE => Uniform::MaterialDiffuse,
            MATERIAL_SPECULAR => Uniform::MaterialSpecular,
            MATERIAL_SHININESS => Uniform::MaterialShininess,
            _ => {
                if let Some(field) = name.strip_prefix("directionalLight.") {
                    let field = match field {
                        "direction" => DirectionalField::Direction,
                        "ambient" => DirectionalField::Ambient,
                        "diffuse" => DirectionalField::Diffuse,
                        "specular" => DirectionalField::Specular,
                        "bActive" => DirectionalField::Active,
                        _ => return Err(unknown()),
                    };
                    Uniform::Directional(field)
                } else if let Some(rest) = name.strip_prefix("pointLights[") {
                    let (index, field) = rest.split_once("].").ok_or_else(unknown)?;
                    let index: usize = index.parse().map_err(|_| unknown())?;
                    let field = match field {
                        "position" => PointField::Position,
                        "ambient" => PointField::Ambient,
                        "diffuse" => PointField::Diffuse,
                        "specular" => PointField::Specular,
                        "constant" => PointField::Constant,
                        "linear" => PointField::Linear,
                        "quadratic" => PointField::Quadratic,
                        "bActive" => PointField::Active,
                        _ => return Err(unknown()),
                    };
                    if index >= MAX_POINT_LIGHTS {
                        return Err(SceneError::TooManyPointLights {
                            index,
                            max: MAX_POINT_LIGHTS,
                        });
                    }
                    Uniform::Point(index, field)
                } else {
                    return Err(unknown());
                }
            }
        };
        Ok(uniform)
    }

    /// The type the uniform is declared with in the shader.
    fn type_name(self) -> &'static str {
        match self {
            Uniform::Model => "mat4",
            Uniform::ObjectColor => "vec4",
            Uniform::ObjectTexture => "sampler",
            Uniform::UseTexture | Uniform::UseLighting => "bool",
            Uniform::UvScale => "vec2",
            Uniform::MaterialDiffuse | Uniform::MaterialSpecular => "vec3",
            Uniform::MaterialShininess => "float",
            Uniform::Point(_, field) => match field {
                PointField::Position
                | PointField::Ambient
                | PointField::Diffuse
                | PointField::Specular => "vec3",
                PointField::Constant | PointField::Linear | PointField::Quadratic => "float",
                PointField::Active => "bool",
            },
            Uniform::Directional(DirectionalField::Active) => "bool",
            Uniform::Directional(_) => "vec3",
        }
    }
}

fn mismatch(name: &str, uniform: Uniform) -> SceneError {
    SceneError::UniformType {
        name: name.to_string(),
        expected: uniform.type_name(),
    }
}

/// CPU mirror of the scene shader's uniform state.
#[derive(Debug, Clone)]
pub struct ShaderState {
    object: ObjectUniform,
    lighting: LightingUniform,
    lighting_dirty: bool,
}

impl Default for ShaderState {
    fn default() -> Self {
        Self {
            object: ObjectUniform::default(),
            lighting: LightingUniform::default(),
            lighting_dirty: true,
        }
    }
}

impl ShaderState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The per-object uniforms the next draw will use.
    pub fn object(&self) -> &ObjectUniform {
        &self.object
    }

    pub fn lighting(&self) -> &LightingUniform {
        &self.lighting
    }

    /// The lighting block if it changed since the last call.
    pub fn take_lighting_changes(&mut self) -> Option<LightingUniform> {
        std::mem::take(&mut self.lighting_dirty).then_some(self.lighting)
    }

    fn set_flag(&mut self, name: &str, value: bool) -> SceneResult<()> {
        let value = u32::from(value);
        match Uniform::parse(name)? {
            Uniform::UseTexture => self.object.use_texture = value,
            Uniform::UseLighting => self.lighting_mut().use_lighting = value,
            Uniform::Point(i, PointField::Active) => self.lighting_mut().point_lights[i].active = value,
            Uniform::Directional(DirectionalField::Active) => {
                self.lighting_mut().directional.active = value
            }
            other => return Err(mismatch(name, other)),
        }
        Ok(())
    }

    fn lighting_mut(&mut self) -> &mut LightingUniform {
        self.lighting_dirty = true;
        &mut self.lighting
    }
}

impl UniformSink for ShaderState {
    fn set_mat4(&mut self, name: &str, value: Matrix4<f32>) -> SceneResult<()> {
        match Uniform::parse(name)? {
            Uniform::Model => {
                self.object.model = value.into();
                self.object.normal = normal_matrix(&value).into();
                Ok(())
            }
            other => Err(mismatch(name, other)),
        }
    }

    fn set_vec2(&mut self, name: &str, value: Vector2<f32>) -> SceneResult<()> {
        match Uniform::parse(name)? {
            Uniform::UvScale => {
                self.object.uv_scale = value.into();
                Ok(())
            }
            other => Err(mismatch(name, other)),
        }
    }

    fn set_vec3(&mut self, name: &str, value: Vector3<f32>) -> SceneResult<()> {
        let value: [f32; 3] = value.into();
        match Uniform::parse(name)? {
            Uniform::MaterialDiffuse => self.object.diffuse_color = value,
            Uniform::MaterialSpecular => self.object.specular_color = value,
            uniform @ Uniform::Point(i, field) => {
                let light = &mut self.lighting_mut().point_lights[i];
                match field {
                    PointField::Position => light.position = value,
                    PointField::Ambient => light.ambient = value,
                    PointField::Diffuse => light.diffuse = value,
                    PointField::Specular => light.specular = value,
                    _ => return Err(mismatch(name, uniform)),
                }
            }
            uniform @ Uniform::Directional(field) => {
                let light = &mut self.lighting_mut().directional;
                match field {
                    DirectionalField::Direction => light.direction = value,
                    DirectionalField::Ambient => light.ambient = value,
                    DirectionalField::Diffuse => light.diffuse = value,
                    DirectionalField::Specular => light.specular = value,
                    DirectionalField::Active => return Err(mismatch(name, uniform)),
                }
            }
            other => return Err(mismatch(name, other)),
        }
        Ok(())
    }

    fn set_vec4(&mut self, name: &str, value: Vector4<f32>) -> SceneResult<()> {
        match Uniform::parse(name)? {
            Uniform::ObjectColor => {
                self.object.object_color = value.into();
                Ok(())
            }
            other => Err(mismatch(name, other)),
        }
    }

    fn set_float(&mut self, name: &str, value: f32) -> SceneResult<()> {
        match Uniform::parse(name)? {
            Uniform::MaterialShininess => self.object.shininess = value,
            uniform @ Uniform::Point(i, field) => {
                let light = &mut self.lighting_mut().point_lights[i];
                match field {
                    PointField::Constant => light.constant = value,
                    PointField::Linear => light.linear = value,
                    PointField::Quadratic => light.quadratic = value,
                    _ => return Err(mismatch(name, uniform)),
                }
            }
            other => return Err(mismatch(name, other)),
        }
        Ok(())
    }

    fn set_int(&mut self, name: &str, value: i32) -> SceneResult<()> {
        match Uniform::parse(name)? {
            uniform @ Uniform::ObjectTexture => {
                let unit = usize::try_from(value).map_err(|_| mismatch(name, uniform))?;
                self.set_sampler(name, unit)
            }
            Uniform::UseTexture
            | Uniform::UseLighting
            | Uniform::Point(_, PointField::Active)
            | Uniform::Directional(DirectionalField::Active) => self.set_flag(name, value != 0),
            other => Err(mismatch(name, other)),
        }
    }

    fn set_bool(&mut self, name: &str, value: bool) -> SceneResult<()> {
        self.set_flag(name, value)
    }

    /// Units outside `0..MAX_TEXTURE_UNITS` are rejected.
    fn set_sampler(&mut self, name: &str, unit: usize) -> SceneResult<()> {
        match Uniform::parse(name)? {
            uniform @ Uniform::ObjectTexture => {
                if unit >= MAX_TEXTURE_UNITS {
                    return Err(mismatch(name, uniform));
                }
                self.object.texture_unit = unit as u32;
                Ok(())
            }
            other => Err(mismatch(name, other)),
        }
    }
}

fn normal_matrix(model: &Matrix4<f32>) -> Matrix4<f32> {
    let upper = Matrix3::from_cols(model.x.truncate(), model.y.truncate(), model.z.truncate());
    upper
        .invert()
        .map(|inverse| Matrix4::from(inverse.transpose()))
        .unwrap_or_else(Matrix4::identity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_indexed_point_light_names() {
        assert_eq!(
            Uniform::parse("pointLights[1].quadratic"),
            Ok(Uniform::Point(1, PointField::Quadratic))
        );
        assert_eq!(
            Uniform::parse("directionalLight.bActive"),
            Ok(Uniform::Directional(DirectionalField::Active))
        );
    }

    #[test]
    fn rejects_malformed_and_out_of_range_names() {
        assert!(matches!(
            Uniform::parse("pointLights[x].position"),
            Err(SceneError::UnknownUniform(_))
        ));
        assert!(matches!(
            Uniform::parse("pointLights[0]position"),
            Err(SceneError::UnknownUniform(_))
        ));
        assert_eq!(
            Uniform::parse(&point_light(MAX_POINT_LIGHTS, "position")),
            Err(SceneError::TooManyPointLights {
                index: MAX_POINT_LIGHTS,
                max: MAX_POINT_LIGHTS
            })
        );
    }

    #[test]
    fn normal_matrix_undoes_nonuniform_scale() {
        let model = Matrix4::from_nonuniform_scale(2.0, 4.0, 1.0);
        let normal = normal_matrix(&model);
        assert_eq!(normal.x.x, 0.5);
        assert_eq!(normal.y.y, 0.25);
        assert_eq!(normal.z.z, 1.0);
    }

    #[test]
    fn lighting_changes_are_reported_once() {
        let mut state = ShaderState::new();
        assert!(state.take_lighting_changes().is_some());
        assert!(state.take_lighting_changes().is_none());
        state.set_bool(USE_LIGHTING, true).unwrap();
        assert_eq!(state.take_lighting_changes().map(|l| l.use_lighting), Some(1));
    }
}
