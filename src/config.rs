//! Runtime configuration for the party scene application.

use std::path::PathBuf;

use cgmath::Point3;

/// Environment variable that overrides [`SceneConfig::asset_root`].
pub const ASSET_ROOT_ENV: &str = "PARTY_SCENE_ASSETS";

/// Window, camera and asset settings.
///
/// Nothing here changes what is drawn; the scene content itself is declared in
/// [`crate::scene::party`].
#[derive(Clone, Debug)]
pub struct SceneConfig {
    /// Directory the texture paths of the scene are resolved against.
    pub asset_root: PathBuf,
    pub window_title: String,
    pub width: u32,
    pub height: u32,
    pub clear_colour: wgpu::Color,
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from("./assets"),
            window_title: "Party Scene".to_string(),
            width: 1000,
            height: 800,
            clear_colour: wgpu::Color {
                r: 0.05,
                g: 0.05,
                b: 0.08,
                a: 1.0,
            },
            eye: Point3::new(0.0, 14.0, 20.0),
            target: Point3::new(0.0, 5.0, 0.0),
            fovy: 45.0,
            znear: 0.1,
            zfar: 200.0,
        }
    }
}

impl SceneConfig {
    /// Default configuration with the asset root taken from
    /// `PARTY_SCENE_ASSETS` when it is set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(root) = std::env::var(ASSET_ROOT_ENV) {
            if !root.is_empty() {
                config.asset_root = PathBuf::from(root);
            }
        }
        config
    }
}
