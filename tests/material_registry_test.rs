use cgmath::Vector3;
use party_scene::{
    data_structures::material::{Material, MaterialRegistry},
    error::SceneError,
    scene::party,
};

#[test]
fn defined_materials_are_found_with_exact_values() {
    let mut registry = MaterialRegistry::new();
    registry
        .define_with("Wood", [0.4, 0.25, 0.1], [0.05, 0.05, 0.05], 4.0)
        .unwrap();

    let wood = registry.find("Wood").unwrap();
    assert_eq!(wood.diffuse, Vector3::new(0.4, 0.25, 0.1));
    assert_eq!(wood.specular, Vector3::new(0.05, 0.05, 0.05));
    assert_eq!(wood.shininess, 4.0);
}

#[test]
fn missing_tags_are_not_found() {
    let empty = MaterialRegistry::new();
    assert_eq!(
        empty.find("Wood"),
        Err(SceneError::MaterialNotFound("Wood".to_string()))
    );

    let mut registry = MaterialRegistry::new();
    registry
        .define(Material::new("Ceramic", [0.9, 0.9, 0.95], [0.9, 0.9, 0.9], 48.0))
        .unwrap();
    assert_eq!(
        registry.find("Marble"),
        Err(SceneError::MaterialNotFound("Marble".to_string()))
    );
}

#[test]
fn the_first_definition_of_a_tag_wins() {
    let mut registry = MaterialRegistry::new();
    registry.define_with("Cake", [1.0, 0.0, 0.0], [0.0, 0.0, 0.0], 8.0).unwrap();
    registry.define_with("Cake", [0.0, 1.0, 0.0], [0.0, 0.0, 0.0], 2.0).unwrap();

    assert_eq!(registry.len(), 2);
    assert_eq!(registry.find("Cake").unwrap().shininess, 8.0);
}

#[test]
fn invalid_shininess_is_rejected() {
    let mut registry = MaterialRegistry::new();
    for shininess in [-1.0, f32::NAN, f32::INFINITY] {
        assert!(matches!(
            registry.define_with("Bad", [1.0; 3], [1.0; 3], shininess),
            Err(SceneError::InvalidShininess { .. })
        ));
    }
    assert!(registry.is_empty());
    registry.define_with("Matte", [1.0; 3], [0.0; 3], 0.0).unwrap();
    assert_eq!(registry.len(), 1);
}

#[test]
fn party_materials_are_all_defined() {
    let mut registry = MaterialRegistry::new();
    for material in party::materials() {
        registry.define(material).unwrap();
    }

    assert_eq!(registry.len(), 7);
    for tag in [
        "Candle",
        "Balloon",
        "WrappingPaper",
        "Wood",
        "PaperHat",
        "Cake",
        "Ceramic",
    ] {
        assert!(registry.find(tag).is_ok(), "{tag} is missing");
    }
    let paper = registry.find("WrappingPaper").unwrap();
    assert_eq!(paper.diffuse, Vector3::new(0.7, 0.0, 0.0));
    assert_eq!(paper.specular, Vector3::new(1.0, 0.9, 0.3));
    assert_eq!(paper.shininess, 64.0);
}
