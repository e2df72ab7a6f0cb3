//! Built-in sub-renderers of the logo scene.
//!
//! - [`LogoMeshRenderer`]: the extruded, lit brand text
//! - [`ParticleRenderer`]: floating particles around the logo

pub mod logo_mesh;
pub mod particles;

pub use logo_mesh::{LogoMeshRenderer, ObjectUniform};
pub use particles::ParticleRenderer;
