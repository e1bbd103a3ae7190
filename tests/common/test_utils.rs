#![allow(dead_code)]

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use party_scene::{
    data_structures::mesh::MeshKind,
    error::{SceneError, SceneResult},
    resources::{DecodedImage, ImageDecoder, MeshProvider, TextureDevice, TextureId},
    scene::party,
    shader::ObjectUniform,
};

/// Everything a [`RecordingBackend`] was asked to do, in order.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Call {
    CreateTexture { label: String, width: u32, height: u32 },
    BindUnit { unit: usize, texture: TextureId },
    DestroyTexture(TextureId),
    LoadMesh(MeshKind),
    Draw { kind: MeshKind, object: ObjectUniform },
}

/// Texture device and mesh provider that only records calls.
#[derive(Debug, Default)]
pub(crate) struct RecordingBackend {
    pub calls: Vec<Call>,
    next_id: u32,
    /// `load_mesh` fails for this kind.
    pub failing_mesh: Option<MeshKind>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_mesh(kind: MeshKind) -> Self {
        Self {
            failing_mesh: Some(kind),
            ..Self::default()
        }
    }

    pub fn draws(&self) -> Vec<(MeshKind, ObjectUniform)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Draw { kind, object } => Some((*kind, *object)),
                _ => None,
            })
            .collect()
    }

    pub fn bound_units(&self) -> Vec<(usize, TextureId)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::BindUnit { unit, texture } => Some((*unit, *texture)),
                _ => None,
            })
            .collect()
    }

    pub fn created_textures(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, Call::CreateTexture { .. }))
            .count()
    }

    pub fn destroyed(&self) -> Vec<TextureId> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::DestroyTexture(id) => Some(*id),
                _ => None,
            })
            .collect()
    }

    pub fn loaded_meshes(&self) -> Vec<MeshKind> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::LoadMesh(kind) => Some(*kind),
                _ => None,
            })
            .collect()
    }
}

impl TextureDevice for RecordingBackend {
    fn create_texture(&mut self, image: &DecodedImage, label: &str) -> SceneResult<TextureId> {
        let id = TextureId(self.next_id);
        self.next_id += 1;
        self.calls.push(Call::CreateTexture {
            label: label.to_string(),
            width: image.width,
            height: image.height,
        });
        Ok(id)
    }

    fn bind_unit(&mut self, unit: usize, texture: TextureId) {
        self.calls.push(Call::BindUnit { unit, texture });
    }

    fn destroy_texture(&mut self, texture: TextureId) {
        self.calls.push(Call::DestroyTexture(texture));
    }
}

impl MeshProvider for RecordingBackend {
    fn load_mesh(&mut self, kind: MeshKind) -> SceneResult<()> {
        if self.failing_mesh == Some(kind) {
            return Err(SceneError::MeshUpload {
                kind,
                reason: "out of memory".to_string(),
            });
        }
        self.calls.push(Call::LoadMesh(kind));
        Ok(())
    }

    fn draw_mesh(&mut self, kind: MeshKind, object: &ObjectUniform) -> SceneResult<()> {
        if !self.loaded_meshes().contains(&kind) {
            return Err(SceneError::MeshNotLoaded(kind));
        }
        self.calls.push(Call::Draw {
            kind,
            object: *object,
        });
        Ok(())
    }
}

/// Image decoder serving images from memory by path.
#[derive(Debug, Default)]
pub(crate) struct MemoryDecoder {
    images: HashMap<PathBuf, DecodedImage>,
}

impl MemoryDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(mut self, path: impl Into<PathBuf>, image: DecodedImage) -> Self {
        self.images.insert(path.into(), image);
        self
    }

    /// A 2×2 image with `channels` channels under `path`.
    pub fn with_solid(self, path: impl Into<PathBuf>, channels: u8) -> Self {
        self.with_image(path, solid_image(2, 2, channels))
    }
}

impl ImageDecoder for MemoryDecoder {
    fn decode(&self, path: &Path) -> SceneResult<DecodedImage> {
        self.images
            .get(path)
            .cloned()
            .ok_or_else(|| SceneError::ImageDecode {
                path: path.to_path_buf(),
                reason: "no such file".to_string(),
            })
    }
}

pub(crate) fn solid_image(width: u32, height: u32, channels: u8) -> DecodedImage {
    DecodedImage {
        pixels: vec![200; (width * height) as usize * channels as usize],
        width,
        height,
        channels,
    }
}

pub(crate) const ASSET_ROOT: &str = "assets";

/// Decoder that can serve every texture of the party scene below [`ASSET_ROOT`].
pub(crate) fn party_decoder() -> MemoryDecoder {
    party::textures()
        .into_iter()
        .enumerate()
        .fold(MemoryDecoder::new(), |decoder, (i, asset)| {
            // Alternate RGB and RGBA like the jpg/png mix on disk.
            let channels = if i % 2 == 0 { 3 } else { 4 };
            decoder.with_solid(Path::new(ASSET_ROOT).join(&asset.path), channels)
        })
}
