//! The birthday party table.
//!
//! A checkered floor with a wooden table on it. On the table: a cake on a
//! plate with a single candle, a wrapped present, a party hat on a napkin and
//! a balloon floating on its string. The candle flame is the main (warm)
//! point light, a faint purple light sits behind the balloon and a cool
//! directional light fills the room.

use cgmath::Vector3;

use crate::data_structures::{
    light::{DirectionalLight, LightSetup, PointLight},
    material::Material,
    mesh::MeshKind,
    transform::Transform,
};

use super::{DrawStep, SceneDefinition, TextureAsset};

const TABLE_LEG_HEIGHT: f32 = 4.0;

pub fn textures() -> Vec<TextureAsset> {
    vec![
        TextureAsset::new("textures/Party_hat.jpg", "Party"),
        TextureAsset::new("textures/blue_party.jpg", "Blue"),
        TextureAsset::new("textures/Check_floor.jpg", "Floor"),
        TextureAsset::new("textures/table.jpg", "Table"),
        TextureAsset::new("textures/Plate.jpg", "Plate"),
        TextureAsset::new("textures/top_frosting.png", "Frost"),
        TextureAsset::new("textures/frosting_sides.png", "Frost_sides"),
        TextureAsset::new("textures/Purple_balloon.png", "balloon"),
        TextureAsset::new("textures/red_present.jpg", "present"),
    ]
}

pub fn materials() -> Vec<Material> {
    vec![
        // warm yellow wax
        Material::new("Candle", [1.0, 0.85, 0.5], [0.2, 0.2, 0.2], 4.0),
        // deep purple rubber with a soft sheen
        Material::new("Balloon", [0.4, 0.1, 0.6], [0.3, 0.2, 0.5], 16.0),
        // glossy red with gold highlights
        Material::new("WrappingPaper", [0.7, 0.0, 0.0], [1.0, 0.9, 0.3], 64.0),
        Material::new("Wood", [0.4, 0.25, 0.1], [0.05, 0.05, 0.05], 4.0),
        Material::new("PaperHat", [0.8, 0.4, 0.6], [0.1, 0.1, 0.1], 2.0),
        Material::new("Cake", [0.95, 0.8, 0.7], [0.2, 0.15, 0.1], 8.0),
        // slightly blue glazed white
        Material::new("Ceramic", [0.9, 0.9, 0.95], [0.9, 0.9, 0.9], 48.0),
    ]
}

pub fn lights() -> LightSetup {
    LightSetup {
        lighting_enabled: true,
        point_lights: vec![
            // candle flame
            PointLight {
                position: Vector3::new(0.0, 8.3, 0.0),
                ambient: Vector3::new(0.3, 0.15, 0.05),
                diffuse: Vector3::new(1.0, 0.6, 0.2),
                specular: Vector3::new(1.0, 0.8, 0.5),
                constant: 1.0,
                linear: 0.09,
                quadratic: 0.032,
                active: true,
            },
            // purple accent behind the balloon
            PointLight {
                position: Vector3::new(2.5, 6.0, -2.0),
                ambient: Vector3::new(0.05, 0.02, 0.08),
                diffuse: Vector3::new(0.1, 0.05, 0.2),
                specular: Vector3::new(0.1, 0.1, 0.2),
                constant: 1.0,
                linear: 0.14,
                quadratic: 0.044,
                active: true,
            },
        ],
        directional: Some(DirectionalLight {
            direction: Vector3::new(-0.2, -1.0, -0.3),
            ambient: Vector3::new(0.1, 0.1, 0.15),
            diffuse: Vector3::new(0.2, 0.2, 0.3),
            specular: Vector3::new(0.1, 0.1, 0.15),
            active: true,
        }),
    }
}

pub fn steps() -> Vec<DrawStep> {
    let mut steps = vec![
        DrawStep::new(
            "floor",
            MeshKind::Plane,
            Transform::new([20.0, 1.0, 10.0], [0.0, 0.0, 0.0]),
        )
        .texture("Floor")
        .uv_scale(2.5, 2.5)
        .material("Ceramic"),
        DrawStep::new(
            "party hat",
            MeshKind::Cone,
            Transform::new([1.0, 2.25, 1.0], [5.0, 4.36, -1.5]),
        )
        .texture("Party")
        .uv_scale(1.0, 1.0)
        .material("PaperHat"),
        DrawStep::new(
            "party hat pompom",
            MeshKind::Sphere,
            Transform::new([0.25, 0.25, 0.25], [5.0, 6.8, -1.5]),
        )
        .texture("Blue")
        .uv_scale(1.0, 1.0)
        .material("PaperHat"),
        DrawStep::new(
            "napkin",
            MeshKind::Box,
            Transform::new([5.0, 0.01, 5.0], [5.0, 4.33, -1.5]).rotated(0.0, 35.0, 0.0),
        )
        .texture("Blue")
        .uv_scale(1.0, 1.0),
        DrawStep::new(
            "table top",
            MeshKind::Box,
            Transform::new([19.0, 0.5, 10.0], [0.0, 4.0, 0.0]),
        )
        .texture("Table")
        .uv_scale(3.0, 3.0)
        .material("Wood"),
    ];

    // Legs are centred at half their height so they stand on the floor.
    let leg_y = TABLE_LEG_HEIGHT / 2.0;
    for (x, z) in [(-9.2, -4.7), (9.2, -4.7), (-9.2, 4.7), (9.2, 4.7)] {
        steps.push(
            DrawStep::new(
                "table leg",
                MeshKind::Box,
                Transform::new([0.3, TABLE_LEG_HEIGHT, 0.3], [x, leg_y, z]),
            )
            .texture("Table")
            .uv_scale(1.0, 1.0)
            .material("Wood"),
        );
    }

    steps.extend([
        DrawStep::new(
            "present",
            MeshKind::Box,
            Transform::new([3.0, 3.0, 3.0], [-6.0, 5.76, -2.0]).rotated(0.0, -35.0, 0.0),
        )
        .color([0.6, 0.1, 0.1, 1.0])
        .texture("present")
        .uv_scale(0.2, 0.5)
        .material("WrappingPaper"),
        DrawStep::new(
            "balloon",
            MeshKind::Sphere,
            Transform::new([2.0, 2.5, 2.0], [4.0, 12.0, -4.0]),
        )
        .texture("balloon")
        .uv_scale(1.0, 1.0)
        .material("Balloon"),
        DrawStep::new(
            "balloon knot",
            MeshKind::Pyramid4,
            Transform::new([0.3, 0.3, 0.3], [4.0, 9.45, -4.0]),
        )
        .texture("balloon")
        .uv_scale(1.0, 1.0)
        .material("Balloon"),
        DrawStep::new(
            "balloon string",
            MeshKind::Cylinder,
            Transform::new([0.025, 10.0, 0.05], [4.0, 4.2, -4.0]),
        )
        .color([0.3, 0.3, 0.3, 1.0]),
        DrawStep::new(
            "cake",
            MeshKind::Cylinder,
            Transform::new([3.0, 2.0, 3.0], [0.0, 4.33, 0.0]),
        )
        .texture("Frost_sides")
        .uv_scale(1.5, 1.5)
        .material("Cake"),
        DrawStep::new(
            "cake icing",
            MeshKind::Cylinder,
            Transform::new([3.01, 0.1, 3.01], [0.0, 6.18, 0.0]),
        )
        .texture("Frost")
        .uv_scale(1.0, 1.0)
        .material("Cake"),
        DrawStep::new(
            "plate",
            MeshKind::Cylinder,
            Transform::new([3.5, 0.1, 3.5], [0.0, 4.33, 0.0]),
        )
        .texture("Plate")
        .uv_scale(1.0, 1.0)
        .material("Ceramic"),
        DrawStep::new(
            "candle",
            MeshKind::Cylinder,
            Transform::new([0.1, 2.0, 0.1], [0.0, 6.33, 0.0]),
        )
        .color([0.9, 0.9, 0.4, 1.0])
        .material("Candle"),
    ]);

    steps
}

/// The complete party scene.
pub fn definition() -> SceneDefinition {
    SceneDefinition {
        textures: textures(),
        materials: materials(),
        lights: lights(),
        meshes: MeshKind::ALL.to_vec(),
        steps: steps(),
    }
}
