//! Seam between the registry and the scene layers.

mod sub_renderer;

pub use sub_renderer::*;
