//! Offscreen render targets

use crate::constants::viewport::{COLOR_FORMAT, DEPTH_FORMAT};

/// A texture with its default view
pub struct Target {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TargetKind {
    /// Single-sampled HDR color that post-processing samples and readback copies
    Color,
    /// Multisampled color the scene pass resolves from
    Multisampled(u32),
    Depth(u32),
}

impl TargetKind {
    fn format(self) -> wgpu::TextureFormat {
        match self {
            TargetKind::Color | TargetKind::Multisampled(_) => COLOR_FORMAT,
            TargetKind::Depth(_) => DEPTH_FORMAT,
        }
    }

    fn sample_count(self) -> u32 {
        match self {
            TargetKind::Color => 1,
            TargetKind::Multisampled(samples) | TargetKind::Depth(samples) => samples,
        }
    }

    fn usage(self) -> wgpu::TextureUsages {
        match self {
            TargetKind::Color => {
                wgpu::TextureUsages::RENDER_ATTACHMENT
                    | wgpu::TextureUsages::TEXTURE_BINDING
                    | wgpu::TextureUsages::COPY_SRC
                    | wgpu::TextureUsages::COPY_DST
            }
            TargetKind::Multisampled(_) | TargetKind::Depth(_) => {
                wgpu::TextureUsages::RENDER_ATTACHMENT
            }
        }
    }

    fn create(self, device: &wgpu::Device, label: &str, width: u32, height: u32) -> Target {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: self.sample_count(),
            dimension: wgpu::TextureDimension::D2,
            format: self.format(),
            usage: self.usage(),
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Target { texture, view }
    }
}

/// Textures one frame is drawn into.
///
/// The base scene lands in `scene` (resolved from `msaa` when
/// multisampling), post-processing writes `scene` into `output`.
pub struct RenderTargets {
    width: u32,
    height: u32,
    pub scene: Target,
    pub output: Target,
    pub depth: Target,
    pub msaa: Option<Target>,
}

impl RenderTargets {
    pub fn new(device: &wgpu::Device, width: u32, height: u32, sample_count: u32) -> Self {
        let msaa = (sample_count > 1).then(|| {
            TargetKind::Multisampled(sample_count).create(device, "logo msaa color", width, height)
        });
        Self {
            width,
            height,
            scene: TargetKind::Color.create(device, "logo scene", width, height),
            output: TargetKind::Color.create(device, "logo output", width, height),
            depth: TargetKind::Depth(sample_count).create(device, "logo depth", width, height),
            msaa,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Attachment the scene pass draws into, and where it resolves to
    pub fn color_attachment(&self) -> (&wgpu::TextureView, Option<&wgpu::TextureView>) {
        match &self.msaa {
            Some(msaa) => (&msaa.view, Some(&self.scene.view)),
            None => (&self.scene.view, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_color_targets_are_sampled_and_copied() {
        assert!(TargetKind::Color.usage().contains(wgpu::TextureUsages::COPY_SRC));
        assert!(!TargetKind::Depth(4).usage().contains(wgpu::TextureUsages::TEXTURE_BINDING));
        assert_eq!(TargetKind::Multisampled(4).sample_count(), 4);
        assert_eq!(TargetKind::Color.sample_count(), 1);
        assert_eq!(TargetKind::Depth(1).format(), DEPTH_FORMAT);
    }
}
