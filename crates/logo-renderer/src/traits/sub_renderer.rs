//! Scene layers and the trait each layer's renderer implements.

use crate::context::RenderContext;
use crate::scene::{FrameInput, SceneDescription};

/// Drawable parts of the logo scene, declared in draw order.
///
/// The extruded text writes depth; particles are blended on top of it and
/// must come after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SceneLayer {
    Logo,
    Particles,
}

impl SceneLayer {
    pub const ALL: [SceneLayer; 2] = [SceneLayer::Logo, SceneLayer::Particles];

    pub fn name(self) -> &'static str {
        match self {
            SceneLayer::Logo => "logo",
            SceneLayer::Particles => "particles",
        }
    }
}

/// Renderer for a single [`SceneLayer`].
pub trait SubRenderer: Send + Sync {
    fn layer(&self) -> SceneLayer;

    /// Whether this layer has anything to draw for `scene`.
    ///
    /// Hidden layers are neither prepared nor drawn for that frame.
    fn is_visible(&self, _scene: &SceneDescription) -> bool {
        true
    }

    /// Create pipelines, layouts and static buffers.
    fn on_init(&mut self, ctx: &RenderContext);

    /// Upload this frame's geometry and uniforms. Runs before the pass opens.
    fn prepare(&mut self, ctx: &RenderContext, frame: &FrameInput<'_>);

    fn render<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>, ctx: &'a RenderContext);

    fn on_destroy(&mut self) {}
}
