//! Staging per-draw shader state.
//!
//! Each function writes one aspect of the next draw into a [`UniformSink`]:
//! the model matrix, flat colour or texture sampling, UV tiling, material and
//! the scene lights. State persists between draws until it is overwritten, so
//! the last write before a draw wins.
//!
//! Lookups that fail leave the sink untouched and return the error; callers
//! decide whether that is fatal.

use cgmath::{Vector2, Vector4};

use crate::{
    data_structures::{
        light::{LightSetup, MAX_POINT_LIGHTS},
        material::MaterialRegistry,
        transform::Transform,
    },
    error::{SceneError, SceneResult},
    resources::TextureRegistry,
    shader::{self, UniformSink},
};

/// Compose the model matrix of `transform` and stage it.
pub fn set_transformations(sink: &mut impl UniformSink, transform: &Transform) -> SceneResult<()> {
    sink.set_mat4(shader::MODEL, transform.to_matrix())
}

/// Switch to flat-colour mode with the given RGBA colour.
pub fn set_flat_color(sink: &mut impl UniformSink, color: impl Into<Vector4<f32>>) -> SceneResult<()> {
    sink.set_bool(shader::USE_TEXTURE, false)?;
    sink.set_vec4(shader::OBJECT_COLOR, color.into())
}

/// Switch to texture mode, sampling the texture registered under `tag`.
///
/// Returns the texture unit now selected.
pub fn set_texture(
    sink: &mut impl UniformSink,
    textures: &TextureRegistry,
    tag: &str,
) -> SceneResult<usize> {
    let unit = textures.bound_slot(tag)?;
    sink.set_bool(shader::USE_TEXTURE, true)?;
    sink.set_sampler(shader::OBJECT_TEXTURE, unit)?;
    Ok(unit)
}

pub fn set_uv_scale(sink: &mut impl UniformSink, u: f32, v: f32) -> SceneResult<()> {
    sink.set_vec2(shader::UV_SCALE, Vector2::new(u, v))
}

/// Stage the material registered under `tag`.
///
/// Does nothing when no materials are defined at all.
pub fn set_material(
    sink: &mut impl UniformSink,
    materials: &MaterialRegistry,
    tag: &str,
) -> SceneResult<()> {
    if materials.is_empty() {
        log::debug!("no materials defined, ignoring `{tag}`");
        return Ok(());
    }
    let material = materials.find(tag)?;
    sink.set_vec3(shader::MATERIAL_DIFFUSE, material.diffuse)?;
    sink.set_vec3(shader::MATERIAL_SPECULAR, material.specular)?;
    sink.set_float(shader::MATERIAL_SHININESS, material.shininess)
}

/// Push the whole light setup. Point lights beyond those in `lights` are
/// switched off, as is the directional light when there is none.
pub fn configure_lights(sink: &mut impl UniformSink, lights: &LightSetup) -> SceneResult<()> {
    if lights.point_lights.len() > MAX_POINT_LIGHTS {
        // Report the first light that has no slot.
        return Err(SceneError::TooManyPointLights {
            index: MAX_POINT_LIGHTS,
            max: MAX_POINT_LIGHTS,
        });
    }

    sink.set_bool(shader::USE_LIGHTING, lights.lighting_enabled)?;

    for (index, light) in lights.point_lights.iter().enumerate() {
        let name = |field: &str| shader::point_light(index, field);
        sink.set_vec3(&name("position"), light.position)?;
        sink.set_vec3(&name("ambient"), light.ambient)?;
        sink.set_vec3(&name("diffuse"), light.diffuse)?;
        sink.set_vec3(&name("specular"), light.specular)?;
        sink.set_float(&name("constant"), light.constant)?;
        sink.set_float(&name("linear"), light.linear)?;
        sink.set_float(&name("quadratic"), light.quadratic)?;
        sink.set_bool(&name("bActive"), light.active)?;
    }
    for index in lights.point_lights.len()..MAX_POINT_LIGHTS {
        sink.set_bool(&shader::point_light(index, "bActive"), false)?;
    }

    match &lights.directional {
        Some(light) => {
            sink.set_vec3(&shader::directional_light("direction"), light.direction)?;
            sink.set_vec3(&shader::directional_light("ambient"), light.ambient)?;
            sink.set_vec3(&shader::directional_light("diffuse"), light.diffuse)?;
            sink.set_vec3(&shader::directional_light("specular"), light.specular)?;
            sink.set_bool(&shader::directional_light("bActive"), light.active)
        }
        None => sink.set_bool(&shader::directional_light("bActive"), false),
    }
}
