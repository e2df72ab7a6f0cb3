//! Extruded brand text renderer

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use logo_core::{EmbeddedTexture, ResolvedMaterial};
use wgpu::util::DeviceExt;

use crate::context::RenderContext;
use crate::pipeline::PipelineConfig;
use crate::scene::FrameInput;
use crate::text_mesh::{TextGeometryParams, TextMesh, TextMesher};
use crate::traits::{SceneLayer, SubRenderer};
use crate::vertex::MeshVertex;

/// Per-object uniform of the logo mesh
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    /// rgb = linear base color, a = opacity
    pub base_color: [f32; 4],
    /// rgb = linear emissive color, a = intensity
    pub emissive: [f32; 4],
    /// x = metalness, y = roughness, z = has texture
    pub params: [f32; 4],
}

impl ObjectUniform {
    pub fn new(model: Mat4, material: &ResolvedMaterial, has_texture: bool) -> Self {
        let [r, g, b] = material.base_color.to_linear_f32();
        let emissive = match &material.emissive {
            Some(emissive) => {
                let [er, eg, eb] = emissive.color.to_linear_f32();
                [er, eg, eb, emissive.intensity]
            }
            None => [0.0; 4],
        };

        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: model.inverse().transpose().to_cols_array_2d(),
            base_color: [r, g, b, material.opacity.unwrap_or(1.0)],
            emissive,
            params: [
                material.metalness,
                material.roughness,
                if has_texture { 1.0 } else { 0.0 },
                0.0,
            ],
        }
    }
}

/// Identity of an uploaded texture, without comparing its bytes every frame
#[derive(Debug, Clone, PartialEq, Eq)]
struct TextureKey {
    name: String,
    ptr: usize,
    len: usize,
}

impl TextureKey {
    fn of(texture: &EmbeddedTexture) -> Self {
        Self {
            name: texture.name().to_string(),
            ptr: texture.bytes().as_ptr() as usize,
            len: texture.bytes().len(),
        }
    }
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

/// Draws the brand text with the composed material
pub struct LogoMeshRenderer {
    mesher: TextMesher,
    opaque_pipeline: Option<wgpu::RenderPipeline>,
    /// Glass and other see-through materials; depth is tested but not written
    transparent_pipeline: Option<wgpu::RenderPipeline>,
    object_layout: Option<wgpu::BindGroupLayout>,
    object_buffer: Option<wgpu::Buffer>,
    sampler: Option<wgpu::Sampler>,
    fallback_view: Option<wgpu::TextureView>,
    bind_group: Option<wgpu::BindGroup>,
    mesh: Option<GpuMesh>,
    geometry: Option<TextGeometryParams>,
    texture: Option<(TextureKey, wgpu::TextureView)>,
    /// Key of the last texture that could not be decoded
    rejected_texture: Option<TextureKey>,
    transparent: bool,
}

impl LogoMeshRenderer {
    pub fn new() -> Self {
        Self::with_mesher(TextMesher::new())
    }

    pub fn with_mesher(mesher: TextMesher) -> Self {
        Self {
            mesher,
            opaque_pipeline: None,
            transparent_pipeline: None,
            object_layout: None,
            object_buffer: None,
            sampler: None,
            fallback_view: None,
            bind_group: None,
            mesh: None,
            geometry: None,
            texture: None,
            rejected_texture: None,
            transparent: false,
        }
    }

    /// Swap the font. The mesh is rebuilt on the next frame.
    pub fn set_mesher(&mut self, mesher: TextMesher) {
        self.mesher = mesher;
        self.geometry = None;
    }

    /// Number of indices of the current mesh
    pub fn index_count(&self) -> u32 {
        self.mesh.as_ref().map_or(0, |mesh| mesh.index_count)
    }

    fn update_geometry(&mut self, device: &wgpu::Device, params: &TextGeometryParams) {
        if self.geometry.as_ref() == Some(params) {
            return;
        }
        // Remember the params even on failure so a bad font is not re-parsed every frame
        self.geometry = Some(params.clone());

        match self.mesher.build(params) {
            Ok(mesh) => {
                tracing::debug!(
                    "Rebuilt logo mesh for {:?}: {} vertices, {} indices",
                    params.text,
                    mesh.vertices.len(),
                    mesh.indices.len()
                );
                self.mesh = upload_mesh(device, &mesh);
            }
            Err(e) => {
                tracing::warn!("Failed to build logo mesh for {:?}: {}", params.text, e);
            }
        }
    }

    fn update_texture(&mut self, ctx: &RenderContext, texture: Option<&EmbeddedTexture>) {
        let Some(texture) = texture else {
            if self.texture.take().is_some() {
                self.bind_group = None;
            }
            return;
        };

        let key = TextureKey::of(texture);
        let current = self.texture.as_ref().map(|(k, _)| k);
        if current == Some(&key) || self.rejected_texture.as_ref() == Some(&key) {
            return;
        }

        match decode_texture(ctx, texture) {
            Ok(view) => {
                tracing::info!("Uploaded texture {}", texture.name());
                self.texture = Some((key, view));
                self.rejected_texture = None;
            }
            Err(e) => {
                tracing::warn!("Ignoring texture {}: {}", texture.name(), e);
                self.texture = None;
                self.rejected_texture = Some(key);
            }
        }
        self.bind_group = None;
    }

    fn ensure_bind_group(&mut self, device: &wgpu::Device) {
        if self.bind_group.is_some() {
            return;
        }
        let (Some(layout), Some(buffer), Some(sampler), Some(fallback)) = (
            &self.object_layout,
            &self.object_buffer,
            &self.sampler,
            &self.fallback_view,
        ) else {
            return;
        };
        let view = self.texture.as_ref().map_or(fallback, |(_, view)| view);

        self.bind_group = Some(device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Logo Object Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        }));
    }
}

impl Default for LogoMeshRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SubRenderer for LogoMeshRenderer {
    fn layer(&self) -> SceneLayer {
        SceneLayer::Logo
    }

    fn on_init(&mut self, ctx: &RenderContext) {
        let device = ctx.device();
        let object_layout = create_object_layout(device);
        let layouts = [
            ctx.camera().layout(),
            ctx.lights().layout(),
            &object_layout,
        ];
        let shader = include_str!("../shaders/logo.wgsl");

        let opaque = PipelineConfig::new(
            "Logo",
            shader,
            ctx.color_format(),
            Some(ctx.depth_format()),
            &layouts,
        )
        .with_vertex_layouts(vec![MeshVertex::layout()])
        .with_sample_count(ctx.sample_count())
        .build(device);

        let transparent = PipelineConfig::new(
            "Logo Transparent",
            shader,
            ctx.color_format(),
            Some(ctx.depth_format()),
            &layouts,
        )
        .with_vertex_layouts(vec![MeshVertex::layout()])
        .with_depth_write(false)
        .with_sample_count(ctx.sample_count())
        .build(device);

        let object_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Logo Object Buffer"),
            contents: bytemuck::cast_slice(&[ObjectUniform::zeroed()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Logo Texture Sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let fallback = create_rgba_texture(device, ctx.queue(), "Logo Fallback Texture", 1, 1, &[
            255, 255, 255, 255,
        ]);

        self.opaque_pipeline = Some(opaque);
        self.transparent_pipeline = Some(transparent);
        self.object_layout = Some(object_layout);
        self.object_buffer = Some(object_buffer);
        self.sampler = Some(sampler);
        self.fallback_view = Some(fallback);
        self.bind_group = None;
    }

    fn prepare(&mut self, ctx: &RenderContext, frame: &FrameInput<'_>) {
        let material = &frame.scene.material;

        self.update_geometry(ctx.device(), &frame.scene.text);
        self.update_texture(ctx, material.texture.as_ref());
        self.ensure_bind_group(ctx.device());
        self.transparent = material.is_transparent();

        if let Some(buffer) = &self.object_buffer {
            let uniform = ObjectUniform::new(frame.model, material, self.texture.is_some());
            ctx.queue().write_buffer(buffer, 0, bytemuck::bytes_of(&uniform));
        }
    }

    fn render<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>, ctx: &'a RenderContext) {
        let pipeline = if self.transparent {
            &self.transparent_pipeline
        } else {
            &self.opaque_pipeline
        };
        let (Some(pipeline), Some(bind_group), Some(mesh)) = (pipeline, &self.bind_group, &self.mesh)
        else {
            return;
        };

        pass.set_pipeline(pipeline);
        pass.set_bind_group(0, ctx.camera().bind_group(), &[]);
        pass.set_bind_group(1, ctx.lights().bind_group(), &[]);
        pass.set_bind_group(2, bind_group, &[]);
        pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..mesh.index_count, 0, 0..1);
    }

    fn on_destroy(&mut self) {
        self.mesh = None;
        self.texture = None;
        self.bind_group = None;
    }
}

fn upload_mesh(device: &wgpu::Device, mesh: &TextMesh) -> Option<GpuMesh> {
    if mesh.is_empty() {
        return None;
    }

    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Logo Vertex Buffer"),
        contents: bytemuck::cast_slice(&mesh.vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Logo Index Buffer"),
        contents: bytemuck::cast_slice(&mesh.indices),
        usage: wgpu::BufferUsages::INDEX,
    });

    Some(GpuMesh {
        vertex_buffer,
        index_buffer,
        index_count: mesh.indices.len() as u32,
    })
}

fn create_object_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Logo Object Bind Group Layout"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    })
}

/// Decode an uploaded image, shrinking it to the device's texture limit
fn decode_texture(
    ctx: &RenderContext,
    texture: &EmbeddedTexture,
) -> Result<wgpu::TextureView, image::ImageError> {
    let mut decoded = image::load_from_memory(texture.bytes())?;

    let max = ctx.device().limits().max_texture_dimension_2d;
    if decoded.width() > max || decoded.height() > max {
        tracing::debug!(
            "Downscaling texture {} from {}x{} to fit {}",
            texture.name(),
            decoded.width(),
            decoded.height(),
            max
        );
        decoded = decoded.resize(max, max, image::imageops::FilterType::Triangle);
    }

    let rgba = decoded.to_rgba8();
    Ok(create_rgba_texture(
        ctx.device(),
        ctx.queue(),
        texture.name(),
        rgba.width(),
        rgba.height(),
        rgba.as_raw(),
    ))
}

fn create_rgba_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    label: &str,
    width: u32,
    height: u32,
    rgba: &[u8],
) -> wgpu::TextureView {
    let size = wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        texture.as_image_copy(),
        rgba,
        wgpu::ImageDataLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        size,
    );
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use logo_core::{EditorState, compose_material};

    #[test]
    fn test_object_uniform_from_material() {
        let state = EditorState::default();
        let material = compose_material(&state);
        let uniform = ObjectUniform::new(Mat4::IDENTITY, &material, false);

        assert_eq!(uniform.model, Mat4::IDENTITY.to_cols_array_2d());
        assert_relative_eq!(uniform.base_color[3], 1.0);
        assert_relative_eq!(uniform.params[0], material.metalness);
        assert_relative_eq!(uniform.params[1], material.roughness);
        assert_eq!(uniform.params[2], 0.0);
    }

    #[test]
    fn test_transparent_material_carries_opacity() {
        let mut state = EditorState::default();
        state.style = logo_core::StylePreset::Glass;
        let material = compose_material(&state);
        let uniform = ObjectUniform::new(Mat4::IDENTITY, &material, true);

        assert!(material.is_transparent());
        assert!(uniform.base_color[3] < 1.0);
        assert_eq!(uniform.params[2], 1.0);
    }

    #[test]
    fn test_normal_matrix_of_rotation_is_rotation() {
        let model = Mat4::from_rotation_y(0.7);
        let material = compose_material(&EditorState::default());
        let uniform = ObjectUniform::new(model, &material, false);

        let normal = Mat4::from_cols_array_2d(&uniform.normal_matrix);
        assert!(normal.abs_diff_eq(model, 1e-5));
    }

    #[test]
    fn test_texture_key_tracks_upload() {
        let a = EmbeddedTexture::new("a.png", "image/png", vec![1u8, 2, 3]).unwrap();
        let same = a.clone();
        let b = EmbeddedTexture::new("a.png", "image/png", vec![1u8, 2, 3]).unwrap();

        assert_eq!(TextureKey::of(&a), TextureKey::of(&same));
        assert_ne!(TextureKey::of(&a), TextureKey::of(&b));
    }
}
