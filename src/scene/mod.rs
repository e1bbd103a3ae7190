//! Assembling the scene out of draw steps.
//!
//! A [`SceneManager`] owns everything a scene needs: the backend that talks to
//! the GPU, both registries and the shader state. It goes through two phases.
//! [`prepare`](SceneManager::prepare) runs once and loads textures, lights,
//! materials and geometry. [`render`](SceneManager::render) then replays the
//! same [`DrawStep`]s every frame.

use std::path::{Path, PathBuf};

use crate::{
    binder,
    data_structures::{
        light::LightSetup,
        material::{Material, MaterialRegistry},
        mesh::MeshKind,
    },
    error::{SceneError, SceneResult},
    resources::{ImageDecoder, MeshProvider, TextureDevice, TextureRegistry},
    shader::{LightingUniform, ShaderState},
};

pub mod party;
pub mod step;

pub use self::step::DrawStep;

/// Everything a backend has to provide to host a scene.
pub trait SceneBackend: TextureDevice + MeshProvider {}

impl<T: TextureDevice + MeshProvider> SceneBackend for T {}

/// An image file, relative to the asset root, and the tag it is known by.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureAsset {
    pub path: PathBuf,
    pub tag: String,
}

impl TextureAsset {
    pub fn new(path: impl Into<PathBuf>, tag: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            tag: tag.into(),
        }
    }
}

/// Static description of a scene.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneDefinition {
    pub textures: Vec<TextureAsset>,
    pub materials: Vec<Material>,
    pub lights: LightSetup,
    /// Primitive kinds to upload during prepare.
    pub meshes: Vec<MeshKind>,
    pub steps: Vec<DrawStep>,
}

impl SceneDefinition {
    pub fn party() -> Self {
        party::definition()
    }
}

/// What happened while rendering one frame.
#[derive(Debug, Default, PartialEq)]
pub struct RenderReport {
    /// Draw calls issued, one per step.
    pub draws: usize,
    /// Non-fatal problems, keyed by step index.
    pub issues: Vec<(usize, SceneError)>,
}

impl RenderReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Created,
    Prepared,
    TornDown,
}

pub struct SceneManager<B: SceneBackend> {
    backend: B,
    shader: ShaderState,
    textures: TextureRegistry,
    materials: MaterialRegistry,
    definition: SceneDefinition,
    phase: Phase,
    frames: u64,
}

impl<B: SceneBackend> SceneManager<B> {
    pub fn new(backend: B, definition: SceneDefinition) -> Self {
        Self {
            backend,
            shader: ShaderState::new(),
            textures: TextureRegistry::new(),
            materials: MaterialRegistry::new(),
            definition,
            phase: Phase::Created,
            frames: 0,
        }
    }

    /// Load every texture, bind them, push the lights, define the materials
    /// and upload the geometry of every primitive kind the scene uses.
    ///
    /// Any failure aborts prepare: textures loaded so far are released and
    /// the registries and staged uniforms are reset, so prepare can be
    /// retried from a clean state.
    pub fn prepare(&mut self, decoder: &impl ImageDecoder, asset_root: &Path) -> SceneResult<()> {
        if self.phase != Phase::Created {
            return Err(SceneError::AlreadyPrepared);
        }
        if let Err(e) = self.load_definition(decoder, asset_root) {
            self.textures.teardown(&mut self.backend);
            self.materials = MaterialRegistry::new();
            self.shader = ShaderState::new();
            return Err(e);
        }
        self.phase = Phase::Prepared;
        Ok(())
    }

    fn load_definition(&mut self, decoder: &impl ImageDecoder, asset_root: &Path) -> SceneResult<()> {
        for asset in &self.definition.textures {
            let path = asset_root.join(&asset.path);
            self.textures
                .load(&mut self.backend, decoder, &path, &asset.tag)?;
        }
        self.textures.bind_all(&mut self.backend);

        binder::configure_lights(&mut self.shader, &self.definition.lights)?;

        for material in &self.definition.materials {
            self.materials.define(material.clone())?;
        }

        for kind in &self.definition.meshes {
            self.backend.load_mesh(*kind).inspect_err(|e| log::error!("{e}"))?;
        }

        log::info!(
            "scene prepared: {} textures, {} materials, {} mesh kinds, {} draw steps",
            self.textures.len(),
            self.materials.len(),
            self.definition.meshes.len(),
            self.definition.steps.len()
        );
        Ok(())
    }

    /// Replay every draw step once.
    ///
    /// Tag lookups that fail inside a step do not stop the frame: the step is
    /// drawn with whatever state was staged before, and the failure ends up
    /// in the report. A failing draw call is returned as an error.
    pub fn render(&mut self) -> SceneResult<RenderReport> {
        if self.phase != Phase::Prepared {
            return Err(SceneError::NotPrepared);
        }

        let first_frame = self.frames == 0;
        let mut report = RenderReport::default();
        for (index, step) in self.definition.steps.iter().enumerate() {
            for issue in step.apply(&mut self.shader, &self.textures, &self.materials) {
                if first_frame {
                    log::warn!("draw step {index} ({}): {issue}", step.label);
                } else {
                    log::debug!("draw step {index} ({}): {issue}", step.label);
                }
                report.issues.push((index, issue));
            }
            self.backend.draw_mesh(step.mesh, self.shader.object())?;
            report.draws += 1;
        }

        self.frames += 1;
        Ok(report)
    }

    /// Release every GPU texture. The scene cannot be rendered afterwards.
    pub fn teardown(&mut self) {
        if self.phase == Phase::TornDown {
            return;
        }
        self.textures.teardown(&mut self.backend);
        self.phase = Phase::TornDown;
        log::debug!("scene torn down after {} frames", self.frames);
    }

    /// The lighting block if it changed since the last call.
    pub fn take_lighting_changes(&mut self) -> Option<LightingUniform> {
        self.shader.take_lighting_changes()
    }

    pub fn is_prepared(&self) -> bool {
        self.phase == Phase::Prepared
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn shader(&self) -> &ShaderState {
        &self.shader
    }

    pub fn textures(&self) -> &TextureRegistry {
        &self.textures
    }

    pub fn materials(&self) -> &MaterialRegistry {
        &self.materials
    }

    pub fn steps(&self) -> &[DrawStep] {
        &self.definition.steps
    }
}

impl<B: SceneBackend> Drop for SceneManager<B> {
    fn drop(&mut self) {
        self.teardown();
    }
}
