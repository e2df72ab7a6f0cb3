//! Offscreen logo renderer.
//!
//! Draws a [`SceneDescription`] into a texture the UI displays, and
//! renders export captures at a fixed size.

mod capture;
mod targets;

pub use capture::{PendingCapture, padded_bytes_per_row, unpad_rows};
pub use targets::{RenderTargets, Target};

use std::sync::Arc;

use crate::camera::OrbitCamera;
use crate::constants::viewport::MSAA_SAMPLES;
use crate::context::RenderContext;
use crate::plugin::RendererRegistry;
use crate::error_scope::{ErrorWatch, validation_scope};
use crate::postprocess::{
    BloomPass, PostInputs, PostProcessGuard, PostProcessState, PostStage, check_submission,
    passthrough,
};
use crate::scene::{FrameInput, SceneDescription, Turntable};
use crate::sub_renderers::{LogoMeshRenderer, ParticleRenderer};
use crate::text_mesh::TextMesher;

/// Renderer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RendererConfig {
    /// 4x multisampling
    pub msaa: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self { msaa: true }
    }
}

impl RendererConfig {
    pub fn sample_count(&self) -> u32 {
        if self.msaa { MSAA_SAMPLES } else { 1 }
    }
}

/// Main logo renderer
pub struct LogoRenderer {
    ctx: RenderContext,
    registry: RendererRegistry,
    camera: OrbitCamera,
    turntable: Turntable,
    guard: PostProcessGuard,
    post: PostStage,
    /// Validation scopes of bloom work not yet answered
    post_errors: ErrorWatch,
    targets: Option<RenderTargets>,
    frame_count: u64,
}

impl LogoRenderer {
    pub fn new(device: Arc<wgpu::Device>, queue: Arc<wgpu::Queue>, config: RendererConfig) -> Self {
        Self::with_mesher(device, queue, config, TextMesher::new())
    }

    pub fn with_mesher(
        device: Arc<wgpu::Device>,
        queue: Arc<wgpu::Queue>,
        config: RendererConfig,
        mesher: TextMesher,
    ) -> Self {
        let ctx = RenderContext::new(device, queue, config.sample_count());

        let mut registry = RendererRegistry::new();
        registry.register(LogoMeshRenderer::with_mesher(mesher));
        registry.register(ParticleRenderer::new());
        registry.init_all(&ctx);

        let mut guard = PostProcessGuard::new();
        let mut post = PostStage::install(BloomPass::try_load(ctx.device()), &mut guard);
        let mut post_errors = ErrorWatch::new();
        if let Some(check) = post.take_load_check() {
            post_errors.watch(check);
        }

        let layers: Vec<&str> = registry.layers().map(|layer| layer.name()).collect();
        tracing::info!(
            "Logo renderer initialized (layers: {}, {}x MSAA)",
            layers.join(", "),
            ctx.sample_count()
        );

        Self {
            ctx,
            registry,
            camera: OrbitCamera::new(1.0),
            turntable: Turntable::default(),
            guard,
            post,
            post_errors,
            targets: None,
            frame_count: 0,
        }
    }

    pub fn context(&self) -> &RenderContext {
        &self.ctx
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    pub fn post_state(&self) -> &PostProcessState {
        self.guard.state()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Current viewport size, if any
    pub fn size(&self) -> Option<(u32, u32)> {
        self.targets.as_ref().map(RenderTargets::size)
    }

    /// Resize the viewport targets. Returns true if they were recreated.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 || self.size() == Some((width, height)) {
            return false;
        }
        self.targets = Some(RenderTargets::new(
            self.ctx.device(),
            width,
            height,
            self.ctx.sample_count(),
        ));
        self.camera.set_aspect(width, height);
        tracing::debug!("Viewport resized to {}x{}", width, height);
        true
    }

    /// The texture the last frame ended up in
    pub fn output_view(&self) -> Option<&wgpu::TextureView> {
        self.targets.as_ref().map(|targets| &targets.output.view)
    }

    pub fn output_texture(&self) -> Option<&wgpu::Texture> {
        self.targets.as_ref().map(|targets| &targets.output.texture)
    }

    /// Draw one viewport frame and advance the animations.
    ///
    /// Returns true while something is moving and another frame is wanted.
    pub fn render(&mut self, scene: &SceneDescription) -> bool {
        let camera_moving = self.camera.update();
        let spinning = self.turntable.advance(scene);

        let Some(targets) = &self.targets else {
            return camera_moving || spinning;
        };

        self.ctx
            .upload_globals(&self.camera.uniform(), &scene.lights.uniform());
        let frame = FrameInput {
            scene,
            model: self.turntable.model_matrix(scene),
            advance: true,
        };
        self.registry.prepare_all(&self.ctx, &frame);

        draw_frame(
            &self.ctx,
            &self.registry,
            &mut self.guard,
            &self.post,
            &mut self.post_errors,
            targets,
            scene,
        );
        self.frame_count += 1;

        camera_moving || spinning || scene.particle_count > 0
    }

    /// Render the current view at `width` x `height` and start reading it back.
    ///
    /// Animations are not advanced, so the capture shows the pose on screen.
    pub fn capture(&mut self, scene: &SceneDescription, width: u32, height: u32) -> PendingCapture {
        let targets = RenderTargets::new(self.ctx.device(), width, height, self.ctx.sample_count());

        let mut camera = self.camera.clone();
        camera.set_aspect(width, height);
        self.ctx
            .upload_globals(&camera.uniform(), &scene.lights.uniform());
        let frame = FrameInput {
            scene,
            model: self.turntable.model_matrix(scene),
            advance: false,
        };
        self.registry.prepare_all(&self.ctx, &frame);

        draw_frame(
            &self.ctx,
            &self.registry,
            &mut self.guard,
            &self.post,
            &mut self.post_errors,
            &targets,
            scene,
        );

        let mut encoder = self
            .ctx
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Capture Encoder"),
            });
        let pending = PendingCapture::encode(self.ctx.device(), &mut encoder, &targets.output.texture);
        self.ctx.queue().submit(std::iter::once(encoder.finish()));
        pending.start();

        tracing::info!("Capturing frame at {}x{}", width, height);
        pending
    }
}

impl Drop for LogoRenderer {
    fn drop(&mut self) {
        self.registry.destroy_all();
    }
}

/// Base pass, then post-processing into the output target.
///
/// Each step is submitted on its own so a failing post stage cannot take
/// the base frame down with it. Post work runs in a validation scope; a
/// rejected submission disables the stage and the scene is copied through.
fn draw_frame(
    ctx: &RenderContext,
    registry: &RendererRegistry,
    guard: &mut PostProcessGuard,
    post: &PostStage,
    post_errors: &mut ErrorWatch,
    targets: &RenderTargets,
    scene: &SceneDescription,
) {
    let (width, height) = targets.size();
    let inputs = PostInputs {
        has_device: true,
        has_scene: true,
        has_camera: true,
        width,
        height,
    };

    let post_ran = guard.render_frame(
        &inputs,
        || draw_base(ctx, registry, targets, scene),
        || {
            let ((), check) = validation_scope(ctx.device(), || {
                let mut encoder = ctx
                    .device()
                    .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                        label: Some("Post Encoder"),
                    });
                post.apply(
                    ctx.device(),
                    ctx.queue(),
                    &mut encoder,
                    (&targets.scene.texture, &targets.scene.view),
                    (&targets.output.texture, &targets.output.view),
                    scene.bloom.as_ref(),
                );
                ctx.queue().submit(std::iter::once(encoder.finish()));
            });
            check_submission(post_errors, check)
        },
    );

    if !post_ran {
        post_errors.clear();
        let mut encoder = ctx
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Passthrough Encoder"),
            });
        passthrough(&mut encoder, &targets.scene.texture, &targets.output.texture);
        ctx.queue().submit(std::iter::once(encoder.finish()));
    }
}

fn draw_base(
    ctx: &RenderContext,
    registry: &RendererRegistry,
    targets: &RenderTargets,
    scene: &SceneDescription,
) {
    let mut encoder = ctx
        .device()
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Scene Encoder"),
        });

    {
        let (view, resolve_target) = targets.color_attachment();
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(scene.clear_color()),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &targets.depth.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        registry.render_all(&mut pass, ctx);
    }

    ctx.queue().submit(std::iter::once(encoder.finish()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_count() {
        assert_eq!(RendererConfig::default().sample_count(), 4);
        assert_eq!(RendererConfig { msaa: false }.sample_count(), 1);
    }
}
