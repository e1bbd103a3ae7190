//! Loading scene assets and the seams to the graphics device.
//!
//! The scene core never talks to wgpu directly. It goes through three narrow
//! collaborator traits so that registries and draw steps can be exercised
//! without a GPU:
//!
//! - [`ImageDecoder`] turns an image file into raw pixels
//! - [`TextureDevice`] owns GPU textures and the texture units they are bound to
//! - [`MeshProvider`] uploads primitive geometry and issues draw calls
//!
//! [`crate::gpu::GpuBackend`] implements the last two on wgpu.

use std::path::Path;

use crate::{
    data_structures::mesh::MeshKind,
    error::SceneResult,
    shader::ObjectUniform,
};

pub mod decode;
pub mod texture;

pub use self::decode::{DecodedImage, FileImageDecoder, ImageDecoder};
pub use self::texture::{MAX_TEXTURE_UNITS, TextureEntry, TextureRegistry};

/// Opaque handle to a texture created by a [`TextureDevice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

pub trait TextureDevice {
    /// Upload decoded pixels into a new texture. Wrap mode is repeat on both
    /// axes, filtering is linear and a full mip chain is generated.
    fn create_texture(&mut self, image: &DecodedImage, label: &str) -> SceneResult<TextureId>;

    /// Make `texture` the one sampled through texture unit `unit`.
    fn bind_unit(&mut self, unit: usize, texture: TextureId);

    fn destroy_texture(&mut self, texture: TextureId);
}

pub trait MeshProvider {
    /// Upload the geometry of `kind`. Only needs to happen once per kind no
    /// matter how often it is drawn.
    fn load_mesh(&mut self, kind: MeshKind) -> SceneResult<()>;

    /// Draw `kind` with the per-object uniforms staged for this draw.
    fn draw_mesh(&mut self, kind: MeshKind, object: &ObjectUniform) -> SceneResult<()>;
}

pub fn load_binary(path: &Path) -> anyhow::Result<Vec<u8>> {
    Ok(std::fs::read(path)?)
}
