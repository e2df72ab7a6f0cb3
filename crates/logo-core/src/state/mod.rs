//! Editor state: the full parameter record of a logo and the store that owns it

mod patch;
mod store;
mod validation;

pub use patch::EditorPatch;
pub use store::EditorStore;
pub use validation::{FieldRange, StateError, ranges, MAX_BRAND_NAME_CHARS};

use crate::preset::{BackgroundMode, MaterialPreset, StylePreset};
use crate::texture::EmbeddedTexture;

/// Text shown when the brand name is empty
pub const PLACEHOLDER_BRAND: &str = "BRAND";

/// All parameters of the logo being edited
#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    // Text & style
    pub brand_name: String,
    pub style: StylePreset,

    // Geometry
    pub extrusion_depth: f32,
    pub bevel_size: f32,
    pub bevel_segments: u32,

    // Transform (degrees)
    pub rotation_x: f32,
    pub rotation_y: f32,
    pub rotation_z: f32,

    // Lighting
    pub light_intensity: f32,
    /// Elevation of the key light in degrees
    pub light_angle_x: f32,
    /// Azimuth of the key light in degrees
    pub light_angle_y: f32,
    pub shadow_enabled: bool,
    pub shadow_strength: f32,
    pub shadow_softness: f32,

    // Material
    pub material_preset: MaterialPreset,
    pub roughness: f32,
    pub metalness: f32,
    pub custom_texture: Option<EmbeddedTexture>,

    // Effects
    pub bloom_enabled: bool,
    pub bloom_intensity: f32,
    pub rim_light_enabled: bool,
    pub rim_light_intensity: f32,
    pub particles_enabled: bool,
    pub particle_intensity: f32,

    // Camera effects
    pub dof_enabled: bool,
    pub dof_focus: f32,
    pub dof_aperture: f32,
    pub motion_blur_enabled: bool,
    pub motion_blur_strength: f32,

    // Background
    pub background_mode: BackgroundMode,

    // Animation
    pub is_animating: bool,
    pub animation_speed: f32,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            brand_name: PLACEHOLDER_BRAND.to_string(),
            style: StylePreset::Cinematic,
            extrusion_depth: 0.5,
            bevel_size: 0.02,
            bevel_segments: 5,
            rotation_x: 0.0,
            rotation_y: 0.0,
            rotation_z: 0.0,
            light_intensity: 1.5,
            light_angle_x: 45.0,
            light_angle_y: 45.0,
            shadow_enabled: true,
            shadow_strength: 0.5,
            shadow_softness: 0.5,
            material_preset: MaterialPreset::Gold,
            roughness: 0.3,
            metalness: 0.8,
            custom_texture: None,
            bloom_enabled: true,
            bloom_intensity: 0.5,
            rim_light_enabled: true,
            rim_light_intensity: 0.8,
            particles_enabled: false,
            particle_intensity: 0.5,
            dof_enabled: false,
            dof_focus: 5.0,
            dof_aperture: 0.02,
            motion_blur_enabled: false,
            motion_blur_strength: 0.5,
            background_mode: BackgroundMode::DarkStage,
            is_animating: false,
            animation_speed: 1.0,
        }
    }
}

impl EditorState {
    /// Text that ends up in the 3D geometry
    pub fn display_text(&self) -> &str {
        if self.brand_name.is_empty() {
            PLACEHOLDER_BRAND
        } else {
            &self.brand_name
        }
    }

    /// Rotation in radians (x, y, z)
    pub fn rotation_radians(&self) -> glam::Vec3 {
        glam::Vec3::new(
            self.rotation_x.to_radians(),
            self.rotation_y.to_radians(),
            self.rotation_z.to_radians(),
        )
    }
}
