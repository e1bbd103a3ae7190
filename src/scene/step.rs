use cgmath::Vector4;

use crate::{
    binder,
    data_structures::{material::MaterialRegistry, mesh::MeshKind, transform::Transform},
    error::SceneError,
    resources::TextureRegistry,
    shader::UniformSink,
};

/// One fully specified draw: which primitive, where, and how it is shaded.
///
/// Applying a step writes only what it specifies. Anything it leaves out
/// (material, UV scale) keeps whatever the previous step staged.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawStep {
    pub label: String,
    pub mesh: MeshKind,
    pub transform: Transform,
    /// Flat colour, applied before the texture so a texture on the same step wins.
    pub color: Option<Vector4<f32>>,
    pub texture: Option<String>,
    pub uv_scale: Option<(f32, f32)>,
    pub material: Option<String>,
}

impl DrawStep {
    pub fn new(label: impl Into<String>, mesh: MeshKind, transform: Transform) -> Self {
        Self {
            label: label.into(),
            mesh,
            transform,
            color: None,
            texture: None,
            uv_scale: None,
            material: None,
        }
    }

    pub fn color(mut self, rgba: [f32; 4]) -> Self {
        self.color = Some(rgba.into());
        self
    }

    pub fn texture(mut self, tag: impl Into<String>) -> Self {
        self.texture = Some(tag.into());
        self
    }

    pub fn uv_scale(mut self, u: f32, v: f32) -> Self {
        self.uv_scale = Some((u, v));
        self
    }

    pub fn material(mut self, tag: impl Into<String>) -> Self {
        self.material = Some(tag.into());
        self
    }

    /// Stage this step's shader state.
    ///
    /// Every part is attempted even if an earlier one fails; the failures are
    /// returned so the caller can report them and still issue the draw.
    pub fn apply(
        &self,
        sink: &mut impl UniformSink,
        textures: &TextureRegistry,
        materials: &MaterialRegistry,
    ) -> Vec<SceneError> {
        let mut issues = Vec::new();

        if let Err(e) = binder::set_transformations(sink, &self.transform) {
            issues.push(e);
        }
        if let Some(color) = self.color {
            if let Err(e) = binder::set_flat_color(sink, color) {
                issues.push(e);
            }
        }
        if let Some(tag) = &self.texture {
            if let Err(e) = binder::set_texture(sink, textures, tag) {
                issues.push(e);
            }
        }
        if let Some((u, v)) = self.uv_scale {
            if let Err(e) = binder::set_uv_scale(sink, u, v) {
                issues.push(e);
            }
        }
        if let Some(tag) = &self.material {
            if let Err(e) = binder::set_material(sink, materials, tag) {
                issues.push(e);
            }
        }

        issues
    }
}
