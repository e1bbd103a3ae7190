//! Scene data structures: meshes, transforms, materials, lights and textures.
//!
//! - `mesh` holds the primitive shapes and their generated geometry
//! - `transform` holds per-object transform parameters and matrix composition
//! - `material` holds reflectance properties and the tagged material registry
//! - `light` holds point and directional light descriptors
//! - `texture` wraps GPU texture resources

pub mod light;
pub mod material;
pub mod mesh;
pub mod texture;
pub mod transform;
