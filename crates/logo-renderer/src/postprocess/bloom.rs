//! GPU bloom stage

use std::panic::{AssertUnwindSafe, catch_unwind};

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use super::{BloomSettings, LoadError, PostProcessError, PostProcessGuard};
use crate::capability::panic_message;
use crate::error_scope::{ScopeCheck, ScopeOutcome, validation_scope};
use crate::constants::viewport::COLOR_FORMAT;
use crate::pipeline::PipelineConfig;

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct BloomUniform {
    params: [f32; 4],
    texel: [f32; 4],
}

/// Composites a thresholded, blurred copy of the scene over itself
pub struct BloomPass {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    uniform_buffer: wgpu::Buffer,
    load_check: Option<ScopeCheck>,
}

impl BloomPass {
    /// Build the GPU resources inside a validation scope.
    ///
    /// A panic or a validation error the backend reports right away
    /// fails the load. An answer that is still outstanding is kept on
    /// the pass, see [`PostStage::take_load_check`].
    pub fn try_load(device: &wgpu::Device) -> Result<Self, LoadError> {
        let (built, mut check) =
            validation_scope(device, || catch_unwind(AssertUnwindSafe(|| Self::build(device))));
        let mut pass =
            built.map_err(|payload| LoadError::Pipeline(panic_message(payload.as_ref())))?;
        match check.poll() {
            ScopeOutcome::Failed(message) => Err(LoadError::Pipeline(message)),
            ScopeOutcome::Clean => Ok(pass),
            ScopeOutcome::Pending => {
                pass.load_check = Some(check);
                Ok(pass)
            }
        }
    }

    fn build(device: &wgpu::Device) -> Self {
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Bloom Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let pipeline = PipelineConfig::new(
            "Bloom",
            include_str!("../shaders/bloom.wgsl"),
            COLOR_FORMAT,
            None,
            &[&bind_group_layout],
        )
        .with_blend(None)
        .build(device);

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Bloom Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Bloom Uniform Buffer"),
            contents: bytemuck::cast_slice(&[BloomUniform::zeroed()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        Self {
            pipeline,
            bind_group_layout,
            sampler,
            uniform_buffer,
            load_check: None,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn apply(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        source: &wgpu::TextureView,
        target: &wgpu::TextureView,
        settings: &BloomSettings,
        size: (u32, u32),
    ) {
        let (width, height) = size;
        let uniform = BloomUniform {
            params: [settings.strength, settings.radius, settings.threshold, 0.0],
            texel: [1.0 / width.max(1) as f32, 1.0 / height.max(1) as f32, 0.0, 0.0],
        };
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniform]));

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Bloom Bind Group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(source),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: self.uniform_buffer.as_entire_binding(),
                },
            ],
        });

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Bloom Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &bind_group, &[]);
        pass.draw(0..3, 0..1);
    }
}

/// The post-processing stage in use
pub enum PostStage {
    Bloom(BloomPass),
    /// Stand-in after a failed load; passes the scene through unchanged
    Noop,
}

impl PostStage {
    /// Use the loaded pass, or [`PostStage::Noop`] with `guard` disabled
    pub fn install(loaded: Result<BloomPass, LoadError>, guard: &mut PostProcessGuard) -> Self {
        match loaded {
            Ok(pass) => {
                tracing::info!("Bloom stage loaded");
                PostStage::Bloom(pass)
            }
            Err(e) => {
                tracing::error!("Bloom stage failed to load: {}", e);
                guard.disable(PostProcessError::Load(e));
                PostStage::Noop
            }
        }
    }

    /// Load check the backend had not answered when the pass was built
    pub fn take_load_check(&mut self) -> Option<ScopeCheck> {
        match self {
            PostStage::Bloom(pass) => pass.load_check.take(),
            PostStage::Noop => None,
        }
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, PostStage::Noop)
    }

    /// Write `source` into `target`, with bloom when loaded and requested
    #[allow(clippy::too_many_arguments)]
    pub fn apply(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        source: (&wgpu::Texture, &wgpu::TextureView),
        target: (&wgpu::Texture, &wgpu::TextureView),
        settings: Option<&BloomSettings>,
    ) {
        let size = (source.0.width(), source.0.height());
        match (self, settings) {
            (PostStage::Bloom(pass), Some(settings)) => {
                pass.apply(device, queue, encoder, source.1, target.1, settings, size)
            }
            _ => passthrough(encoder, source.0, target.0),
        }
    }
}

/// Copy the scene unchanged into the output target
pub fn passthrough(encoder: &mut wgpu::CommandEncoder, source: &wgpu::Texture, target: &wgpu::Texture) {
    encoder.copy_texture_to_texture(
        source.as_image_copy(),
        target.as_image_copy(),
        source.size(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_load_installs_noop_and_disables() {
        let mut guard = PostProcessGuard::new();
        let mut stage = PostStage::install(
            Err(LoadError::Pipeline("shader module is invalid".into())),
            &mut guard,
        );

        assert!(stage.is_noop());
        assert!(stage.take_load_check().is_none());
        let reason = guard.disabled_reason().unwrap();
        assert!(reason.contains("bloom failed to load"));
        assert!(reason.contains("shader module is invalid"));
    }
}
