//! Surface reflectance properties and their tagged registry.

use cgmath::Vector3;

use crate::error::{SceneError, SceneResult};

/// Phong reflectance of a surface.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub tag: String,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
    pub shininess: f32,
}

impl Material {
    pub fn new(
        tag: impl Into<String>,
        diffuse: impl Into<Vector3<f32>>,
        specular: impl Into<Vector3<f32>>,
        shininess: f32,
    ) -> Self {
        Self {
            tag: tag.into(),
            diffuse: diffuse.into(),
            specular: specular.into(),
            shininess,
        }
    }
}

/// Append-only list of materials looked up by tag.
///
/// Tags are not required to be unique; a lookup returns the first material
/// defined under the tag.
#[derive(Clone, Debug, Default)]
pub struct MaterialRegistry {
    materials: Vec<Material>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a material. Shininess must be finite and not negative.
    pub fn define(&mut self, material: Material) -> SceneResult<()> {
        if !material.shininess.is_finite() || material.shininess < 0.0 {
            return Err(SceneError::InvalidShininess {
                tag: material.tag,
                shininess: material.shininess,
            });
        }
        log::debug!("defined material `{}`", material.tag);
        self.materials.push(material);
        Ok(())
    }

    pub fn define_with(
        &mut self,
        tag: impl Into<String>,
        diffuse: impl Into<Vector3<f32>>,
        specular: impl Into<Vector3<f32>>,
        shininess: f32,
    ) -> SceneResult<()> {
        self.define(Material::new(tag, diffuse, specular, shininess))
    }

    pub fn find(&self, tag: &str) -> SceneResult<Material> {
        self.materials
            .iter()
            .find(|material| material.tag == tag)
            .cloned()
            .ok_or_else(|| SceneError::MaterialNotFound(tag.to_string()))
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }
}
