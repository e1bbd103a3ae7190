//! party-scene
//!
//! A static birthday-party table assembled from six primitive shapes, lit by
//! Phong shading and drawn with wgpu. The scene is described declaratively as
//! a list of draw steps; each step composes a model matrix and stages colour
//! or texture, UV tiling and material before its mesh is drawn.
//!
//! High-level modules
//! - `binder`: stages per-draw shader state (transform, colour, texture, material, lights)
//! - `camera`: the fixed camera and its uniform
//! - `config`: window, camera and asset settings
//! - `context`: window, device, queue and surface
//! - `data_structures`: meshes, transforms, materials, lights and GPU textures
//! - `error`: the scene error type
//! - `flow`: the application shell and event loop
//! - `gpu`: the wgpu backend behind the texture and mesh seams
//! - `pipelines`: the scene render pipeline and its bind group layouts
//! - `resources`: image decoding, the texture registry and the device seams
//! - `scene`: draw steps, the scene manager and the party scene itself
//! - `shader`: the uniform interface of the scene shader

pub mod binder;
pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod error;
pub mod flow;
pub mod gpu;
pub mod pipelines;
pub mod resources;
pub mod scene;
pub mod shader;

// Re-exports commonly used types for convenience in downstream code.
pub use crate::{
    config::SceneConfig,
    error::{SceneError, SceneResult},
    scene::{DrawStep, RenderReport, SceneDefinition, SceneManager},
};
