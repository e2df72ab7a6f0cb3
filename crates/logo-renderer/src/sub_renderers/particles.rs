//! Particle renderer

use bytemuck::{Pod, Zeroable};
use logo_core::Color;

use crate::constants::particles as constants;
use crate::context::{RenderContext, UniformSlot};
use crate::particles::ParticleField;
use crate::pipeline::PipelineConfig;
use crate::scene::{FrameInput, SceneDescription};
use crate::traits::{SceneLayer, SubRenderer};
use crate::vertex::ParticleInstance;

/// Appearance shared by all particles
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ParticleUniform {
    /// rgb = linear color, a = opacity
    pub color: [f32; 4],
    /// x = world size
    pub size: [f32; 4],
}

impl Default for ParticleUniform {
    fn default() -> Self {
        let [r, g, b] = Color::from_hex(constants::COLOR).to_linear_f32();
        Self {
            color: [r, g, b, constants::OPACITY],
            size: [constants::SIZE, 0.0, 0.0, 0.0],
        }
    }
}

/// Draws the particle field as instanced camera-facing quads
pub struct ParticleRenderer {
    field: ParticleField,
    pipeline: Option<wgpu::RenderPipeline>,
    appearance: Option<UniformSlot<ParticleUniform>>,
    instance_buffer: Option<wgpu::Buffer>,
    instance_count: u32,
}

impl ParticleRenderer {
    pub fn new() -> Self {
        Self::with_field(ParticleField::new())
    }

    pub fn with_field(field: ParticleField) -> Self {
        Self {
            field,
            pipeline: None,
            appearance: None,
            instance_buffer: None,
            instance_count: 0,
        }
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn instance_count(&self) -> u32 {
        self.instance_count
    }
}

impl Default for ParticleRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SubRenderer for ParticleRenderer {
    fn layer(&self) -> SceneLayer {
        SceneLayer::Particles
    }

    fn is_visible(&self, scene: &SceneDescription) -> bool {
        scene.particle_count > 0
    }

    fn on_init(&mut self, ctx: &RenderContext) {
        let device = ctx.device();

        let appearance: UniformSlot<ParticleUniform> =
            UniformSlot::new(device, "particle appearance", wgpu::ShaderStages::VERTEX_FRAGMENT);

        let pipeline = PipelineConfig::new(
            "Particles",
            include_str!("../shaders/particles.wgsl"),
            ctx.color_format(),
            Some(ctx.depth_format()),
            &[ctx.camera().layout(), appearance.layout()],
        )
        .with_vertex_layouts(vec![ParticleInstance::layout()])
        .with_depth_write(false)
        .with_sample_count(ctx.sample_count())
        .build(device);

        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Particle Instance Buffer"),
            size: (constants::MAX_COUNT * std::mem::size_of::<ParticleInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        self.pipeline = Some(pipeline);
        self.appearance = Some(appearance);
        self.instance_buffer = Some(instance_buffer);
    }

    fn prepare(&mut self, ctx: &RenderContext, frame: &FrameInput<'_>) {
        let count = frame.scene.particle_count.min(constants::MAX_COUNT);
        self.field.set_count(count);
        if frame.advance {
            self.field.step();
        }

        self.instance_count = self.field.len() as u32;
        if self.field.is_empty() {
            return;
        }
        if let Some(buffer) = &self.instance_buffer {
            ctx.queue()
                .write_buffer(buffer, 0, bytemuck::cast_slice(&self.field.instances()));
        }
    }

    fn render<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>, ctx: &'a RenderContext) {
        if self.instance_count == 0 {
            return;
        }
        let (Some(pipeline), Some(appearance), Some(instances)) =
            (&self.pipeline, &self.appearance, &self.instance_buffer)
        else {
            return;
        };

        pass.set_pipeline(pipeline);
        pass.set_bind_group(0, ctx.camera().bind_group(), &[]);
        pass.set_bind_group(1, appearance.bind_group(), &[]);
        pass.set_vertex_buffer(0, instances.slice(..));
        pass.draw(0..6, 0..self.instance_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_particle_appearance() {
        let uniform = ParticleUniform::default();
        assert_relative_eq!(uniform.color[3], 0.6);
        assert_relative_eq!(uniform.size[0], 0.05);
        // #ffaa00: full red, no blue
        assert_relative_eq!(uniform.color[0], 1.0, epsilon = 1e-4);
        assert_relative_eq!(uniform.color[2], 0.0);
    }

    #[test]
    fn test_uninitialized_renderer_is_empty() {
        let renderer = ParticleRenderer::with_field(ParticleField::with_seed(7));
        assert_eq!(renderer.layer(), SceneLayer::Particles);
        assert_eq!(renderer.instance_count(), 0);
        assert!(renderer.field().is_empty());
        assert!(renderer.layer() > SceneLayer::Logo);
    }
}
