//! Device handles and the per-frame globals every scene layer binds.

use std::marker::PhantomData;
use std::sync::Arc;

use bytemuck::Pod;
use wgpu::util::DeviceExt;

use crate::camera::CameraUniform;
use crate::constants::viewport::{COLOR_FORMAT, DEPTH_FORMAT};
use crate::light::LightUniform;

/// A single uniform buffer together with its layout and bind group.
///
/// The frame globals bind camera at group 0 and lights at group 1. Layers
/// may hold further slots of their own.
pub struct UniformSlot<T> {
    layout: wgpu::BindGroupLayout,
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    _marker: PhantomData<T>,
}

impl<T: Pod + Default> UniformSlot<T> {
    pub(crate) fn new(device: &wgpu::Device, label: &str, visibility: wgpu::ShaderStages) -> Self {
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(label),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::bytes_of(&T::default()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self {
            layout,
            buffer,
            bind_group,
            _marker: PhantomData,
        }
    }

    pub(crate) fn write(&self, queue: &wgpu::Queue, value: &T) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(value));
    }

    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

/// Shared GPU state handed to every [`SubRenderer`](crate::SubRenderer).
pub struct RenderContext {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    sample_count: u32,
    camera: UniformSlot<CameraUniform>,
    lights: UniformSlot<LightUniform>,
}

impl RenderContext {
    pub fn new(device: Arc<wgpu::Device>, queue: Arc<wgpu::Queue>, sample_count: u32) -> Self {
        let camera = UniformSlot::new(&device, "logo camera", wgpu::ShaderStages::VERTEX_FRAGMENT);
        let lights = UniformSlot::new(&device, "logo lights", wgpu::ShaderStages::FRAGMENT);
        Self {
            device,
            queue,
            sample_count,
            camera,
            lights,
        }
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Format of the HDR scene target and of every post-processing target
    pub fn color_format(&self) -> wgpu::TextureFormat {
        COLOR_FORMAT
    }

    pub fn depth_format(&self) -> wgpu::TextureFormat {
        DEPTH_FORMAT
    }

    /// 1 or 4
    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    pub fn camera(&self) -> &UniformSlot<CameraUniform> {
        &self.camera
    }

    pub fn lights(&self) -> &UniformSlot<LightUniform> {
        &self.lights
    }

    /// Upload the view and lighting used by every layer of the next frame.
    pub fn upload_globals(&self, camera: &CameraUniform, lights: &LightUniform) {
        self.camera.write(&self.queue, camera);
        self.lights.write(&self.queue, lights);
    }
}
