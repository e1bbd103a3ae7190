use std::path::Path;

use cgmath::{Matrix4, SquareMatrix, Vector3, Vector4};
use party_scene::{
    binder,
    data_structures::{
        light::{DirectionalLight, LightSetup, MAX_POINT_LIGHTS, PointLight},
        material::MaterialRegistry,
        transform::Transform,
    },
    error::SceneError,
    resources::{MAX_TEXTURE_UNITS, TextureRegistry},
    shader::{self, ShaderState, UniformSink},
};

use crate::common::test_utils::{MemoryDecoder, RecordingBackend};

mod common;

fn bound_registry(tags: &[&str]) -> TextureRegistry {
    let decoder = tags
        .iter()
        .fold(MemoryDecoder::new(), |d, tag| d.with_solid(*tag, 4));
    let mut device = RecordingBackend::new();
    let mut registry = TextureRegistry::new();
    for tag in tags {
        registry
            .load(&mut device, &decoder, Path::new(tag), tag)
            .unwrap();
    }
    registry.bind_all(&mut device);
    registry
}

#[test]
fn second_texture_before_a_draw_wins() {
    let textures = bound_registry(&["Party", "Blue"]);
    let mut state = ShaderState::new();

    binder::set_texture(&mut state, &textures, "Party").unwrap();
    binder::set_texture(&mut state, &textures, "Blue").unwrap();

    assert!(state.object().uses_texture());
    assert_eq!(state.object().texture_unit, 1);
}

#[test]
fn missing_texture_keeps_the_previous_sampler() {
    let textures = bound_registry(&["Party", "Blue"]);
    let mut state = ShaderState::new();
    binder::set_texture(&mut state, &textures, "Blue").unwrap();
    let before = *state.object();

    assert_eq!(
        binder::set_texture(&mut state, &textures, "missing"),
        Err(SceneError::TextureNotFound("missing".to_string()))
    );
    assert_eq!(*state.object(), before);
}

#[test]
fn missing_texture_on_fresh_state_stays_in_colour_mode() {
    let textures = TextureRegistry::new();
    let mut state = ShaderState::new();

    assert!(binder::set_texture(&mut state, &textures, "missing").is_err());
    assert!(!state.object().uses_texture());
    assert_eq!(state.object().texture_unit, 0);
}

#[test]
fn flat_colour_switches_texturing_off() {
    let textures = bound_registry(&["Floor"]);
    let mut state = ShaderState::new();
    binder::set_texture(&mut state, &textures, "Floor").unwrap();

    binder::set_flat_color(&mut state, [0.3, 0.3, 0.3, 1.0]).unwrap();

    assert!(!state.object().uses_texture());
    assert_eq!(state.object().object_color, [0.3, 0.3, 0.3, 1.0]);
}

#[test]
fn transformations_stage_model_and_normal_matrices() {
    let mut state = ShaderState::new();
    let transform = Transform::new([2.0, 4.0, 1.0], [1.0, 2.0, 3.0]);

    binder::set_transformations(&mut state, &transform).unwrap();

    let model = state.object().model_matrix();
    assert_eq!(model, transform.to_matrix());
    let normal: Matrix4<f32> = state.object().normal.into();
    assert_eq!(normal.x.x, 0.5);
    assert_eq!(normal.y.y, 0.25);
    assert_eq!(normal.w, Vector4::new(0.0, 0.0, 0.0, 1.0));
}

#[test]
fn uv_scale_is_staged() {
    let mut state = ShaderState::new();
    assert_eq!(state.object().uv_scale, [1.0, 1.0]);
    binder::set_uv_scale(&mut state, 0.2, 0.5).unwrap();
    assert_eq!(state.object().uv_scale, [0.2, 0.5]);
}

#[test]
fn material_is_staged_and_misses_keep_the_previous_one() {
    let mut materials = MaterialRegistry::new();
    materials
        .define_with("Ceramic", [0.9, 0.9, 0.95], [0.9, 0.9, 0.9], 48.0)
        .unwrap();
    let mut state = ShaderState::new();

    binder::set_material(&mut state, &materials, "Ceramic").unwrap();
    assert_eq!(state.object().diffuse_color, [0.9, 0.9, 0.95]);
    assert_eq!(state.object().specular_color, [0.9, 0.9, 0.9]);
    assert_eq!(state.object().shininess, 48.0);

    assert_eq!(
        binder::set_material(&mut state, &materials, "Marble"),
        Err(SceneError::MaterialNotFound("Marble".to_string()))
    );
    assert_eq!(state.object().shininess, 48.0);
}

#[test]
fn zero_shininess_is_staged_unchanged() {
    let mut materials = MaterialRegistry::new();
    materials
        .define_with("Matte", [0.5, 0.5, 0.5], [0.0, 0.0, 0.0], 0.0)
        .unwrap();
    let mut state = ShaderState::new();

    binder::set_material(&mut state, &materials, "Matte").unwrap();

    assert_eq!(state.object().shininess, 0.0);
}

#[test]
fn material_lookups_are_skipped_without_materials() {
    let mut state = ShaderState::new();
    let before = *state.object();

    binder::set_material(&mut state, &MaterialRegistry::new(), "Wood").unwrap();

    assert_eq!(*state.object(), before);
}

#[test]
fn lights_fill_the_lighting_block() {
    let lights = LightSetup {
        lighting_enabled: true,
        point_lights: vec![PointLight {
            position: Vector3::new(0.0, 8.3, 0.0),
            ambient: Vector3::new(0.3, 0.15, 0.05),
            diffuse: Vector3::new(1.0, 0.6, 0.2),
            specular: Vector3::new(1.0, 0.8, 0.5),
            constant: 1.0,
            linear: 0.09,
            quadratic: 0.032,
            active: true,
        }],
        directional: Some(DirectionalLight {
            direction: Vector3::new(-0.2, -1.0, -0.3),
            ambient: Vector3::new(0.1, 0.1, 0.15),
            diffuse: Vector3::new(0.2, 0.2, 0.3),
            specular: Vector3::new(0.1, 0.1, 0.15),
            active: true,
        }),
    };
    let mut state = ShaderState::new();
    // Leftovers from an earlier configuration must be switched off.
    state
        .set_bool(&shader::point_light(2, "bActive"), true)
        .unwrap();

    binder::configure_lights(&mut state, &lights).unwrap();

    let lighting = state.lighting();
    assert_eq!(lighting.use_lighting, 1);
    assert_eq!(lighting.point_lights[0].position, [0.0, 8.3, 0.0]);
    assert_eq!(lighting.point_lights[0].quadratic, 0.032);
    assert_eq!(lighting.point_lights[0].active, 1);
    for light in &lighting.point_lights[1..] {
        assert_eq!(light.active, 0);
    }
    assert_eq!(lighting.directional.direction, [-0.2, -1.0, -0.3]);
    assert_eq!(lighting.directional.active, 1);
}

#[test]
fn too_many_point_lights_are_rejected() {
    let light = PointLight {
        position: Vector3::new(0.0, 0.0, 0.0),
        ambient: Vector3::new(0.0, 0.0, 0.0),
        diffuse: Vector3::new(1.0, 1.0, 1.0),
        specular: Vector3::new(1.0, 1.0, 1.0),
        constant: 1.0,
        linear: 0.0,
        quadratic: 0.0,
        active: true,
    };
    for count in [MAX_POINT_LIGHTS + 1, MAX_POINT_LIGHTS + 3] {
        let lights = LightSetup {
            point_lights: vec![light.clone(); count],
            ..LightSetup::default()
        };

        assert_eq!(
            binder::configure_lights(&mut ShaderState::new(), &lights),
            Err(SceneError::TooManyPointLights {
                index: MAX_POINT_LIGHTS,
                max: MAX_POINT_LIGHTS
            })
        );
    }
}

#[test]
fn unknown_names_and_wrong_types_are_errors() {
    let mut state = ShaderState::new();
    assert_eq!(
        state.set_float("material.roughness", 1.0),
        Err(SceneError::UnknownUniform("material.roughness".to_string()))
    );
    assert!(matches!(
        state.set_vec3(shader::MODEL, Vector3::new(1.0, 0.0, 0.0)),
        Err(SceneError::UniformType { .. })
    ));
    assert!(matches!(
        state.set_mat4(shader::OBJECT_COLOR, Matrix4::identity()),
        Err(SceneError::UniformType { .. })
    ));
}

#[test]
fn int_setters_cover_flags_and_samplers() {
    let mut state = ShaderState::new();
    state.set_int(shader::USE_TEXTURE, 1).unwrap();
    state.set_int(shader::OBJECT_TEXTURE, 3).unwrap();
    assert!(state.object().uses_texture());
    assert_eq!(state.object().texture_unit, 3);
    assert!(state.set_int(shader::OBJECT_TEXTURE, -1).is_err());
    assert_eq!(state.object().texture_unit, 3);
}

#[test]
fn type_errors_name_the_declared_type() {
    let mut state = ShaderState::new();
    let declared = |name: &str, expected: &'static str| SceneError::UniformType {
        name: name.to_string(),
        expected,
    };

    assert_eq!(state.set_int(shader::MODEL, 1), Err(declared("model", "mat4")));
    assert_eq!(
        state.set_int(shader::UV_SCALE, 1),
        Err(declared("UVscale", "vec2"))
    );
    assert_eq!(
        state.set_bool(shader::OBJECT_COLOR, true),
        Err(declared("objectColor", "vec4"))
    );
    assert_eq!(
        state.set_mat4(shader::OBJECT_COLOR, Matrix4::identity()),
        Err(declared("objectColor", "vec4"))
    );
    let constant = shader::point_light(0, "constant");
    assert_eq!(
        state.set_vec3(&constant, Vector3::new(1.0, 0.0, 0.0)),
        Err(SceneError::UniformType {
            name: constant.clone(),
            expected: "float"
        })
    );
    // Flags still accept ints.
    state.set_int(shader::USE_LIGHTING, 1).unwrap();
    assert_eq!(state.lighting().use_lighting, 1);
}

#[test]
fn sampler_units_beyond_the_last_unit_are_rejected() {
    let mut state = ShaderState::new();
    state
        .set_sampler(shader::OBJECT_TEXTURE, MAX_TEXTURE_UNITS - 1)
        .unwrap();

    for unit in [MAX_TEXTURE_UNITS, usize::MAX] {
        assert!(matches!(
            state.set_sampler(shader::OBJECT_TEXTURE, unit),
            Err(SceneError::UniformType { .. })
        ));
    }
    assert_eq!(state.object().texture_unit, (MAX_TEXTURE_UNITS - 1) as u32);
}
