//! Error type shared by the scene core.
//!
//! Everything below the window/GPU plumbing reports failures as a
//! [`SceneError`]. The application shell works in `anyhow::Result` and lets
//! `?` do the conversion.

use std::path::PathBuf;

use thiserror::Error;

use crate::data_structures::mesh::MeshKind;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("could not decode image {path:?}: {reason}")]
    ImageDecode { path: PathBuf, reason: String },
    #[error("image {path:?} has {channels} channels, only 3 (RGB) and 4 (RGBA) are supported")]
    UnsupportedChannels { path: PathBuf, channels: u8 },
    #[error("all {0} texture units are in use")]
    TextureUnitsExhausted(usize),
    #[error("a texture tagged `{0}` is already registered")]
    DuplicateTexture(String),
    #[error("no texture is registered under `{0}`")]
    TextureNotFound(String),
    #[error("texture `{tag}` (unit {unit}) was registered after the last bind")]
    TextureNotBound { tag: String, unit: usize },
    #[error("failed to create GPU texture `{tag}`: {reason}")]
    TextureUpload { tag: String, reason: String },
    #[error("no material is defined under `{0}`")]
    MaterialNotFound(String),
    #[error("material `{tag}` has invalid shininess {shininess}")]
    InvalidShininess { tag: String, shininess: f32 },
    #[error("unknown shader uniform `{0}`")]
    UnknownUniform(String),
    #[error("shader uniform `{name}` expects a {expected}")]
    UniformType { name: String, expected: &'static str },
    #[error("point light index {index} exceeds the {max} supported lights")]
    TooManyPointLights { index: usize, max: usize },
    #[error("failed to upload {kind:?} mesh: {reason}")]
    MeshUpload { kind: MeshKind, reason: String },
    #[error("{0:?} mesh was drawn before it was loaded")]
    MeshNotLoaded(MeshKind),
    #[error("the scene has already been prepared")]
    AlreadyPrepared,
    #[error("the scene must be prepared before it can be rendered")]
    NotPrepared,
}

pub type SceneResult<T> = Result<T, SceneError>;
