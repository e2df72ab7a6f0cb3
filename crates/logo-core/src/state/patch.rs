//! Partial updates of the editor state

use super::EditorState;
use crate::preset::{BackgroundMode, MaterialPreset, StylePreset};
use crate::texture::EmbeddedTexture;

/// A partial `EditorState`: every `Some` field overwrites the current value.
///
/// `custom_texture` is doubly optional so a patch can clear the texture
/// (`Some(None)`) as well as leave it untouched (`None`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorPatch {
    pub brand_name: Option<String>,
    pub style: Option<StylePreset>,
    pub extrusion_depth: Option<f32>,
    pub bevel_size: Option<f32>,
    pub bevel_segments: Option<u32>,
    pub rotation_x: Option<f32>,
    pub rotation_y: Option<f32>,
    pub rotation_z: Option<f32>,
    pub light_intensity: Option<f32>,
    pub light_angle_x: Option<f32>,
    pub light_angle_y: Option<f32>,
    pub shadow_enabled: Option<bool>,
    pub shadow_strength: Option<f32>,
    pub shadow_softness: Option<f32>,
    pub material_preset: Option<MaterialPreset>,
    pub roughness: Option<f32>,
    pub metalness: Option<f32>,
    pub custom_texture: Option<Option<EmbeddedTexture>>,
    pub bloom_enabled: Option<bool>,
    pub bloom_intensity: Option<f32>,
    pub rim_light_enabled: Option<bool>,
    pub rim_light_intensity: Option<f32>,
    pub particles_enabled: Option<bool>,
    pub particle_intensity: Option<f32>,
    pub dof_enabled: Option<bool>,
    pub dof_focus: Option<f32>,
    pub dof_aperture: Option<f32>,
    pub motion_blur_enabled: Option<bool>,
    pub motion_blur_strength: Option<f32>,
    pub background_mode: Option<BackgroundMode>,
    pub is_animating: Option<bool>,
    pub animation_speed: Option<f32>,
}

macro_rules! merge_fields {
    ($patch:expr, $state:expr, $($field:ident),* $(,)?) => {
        $(
            if let Some(value) = &$patch.$field {
                $state.$field = value.clone();
            }
        )*
    };
}

macro_rules! touched_fields {
    ($patch:expr, $($field:ident),* $(,)?) => {{
        let mut names = Vec::new();
        $(
            if $patch.$field.is_some() {
                names.push(stringify!($field));
            }
        )*
        names
    }};
}

impl EditorPatch {
    /// Shallow-merge this patch into `state`, last write wins per field
    pub fn apply_to(&self, state: &mut EditorState) {
        merge_fields!(
            self,
            state,
            brand_name,
            style,
            extrusion_depth,
            bevel_size,
            bevel_segments,
            rotation_x,
            rotation_y,
            rotation_z,
            light_intensity,
            light_angle_x,
            light_angle_y,
            shadow_enabled,
            shadow_strength,
            shadow_softness,
            material_preset,
            roughness,
            metalness,
            custom_texture,
            bloom_enabled,
            bloom_intensity,
            rim_light_enabled,
            rim_light_intensity,
            particles_enabled,
            particle_intensity,
            dof_enabled,
            dof_focus,
            dof_aperture,
            motion_blur_enabled,
            motion_blur_strength,
            background_mode,
            is_animating,
            animation_speed,
        );
    }

    /// Names of the fields this patch sets
    pub fn touched_fields(&self) -> Vec<&'static str> {
        touched_fields!(
            self,
            brand_name,
            style,
            extrusion_depth,
            bevel_size,
            bevel_segments,
            rotation_x,
            rotation_y,
            rotation_z,
            light_intensity,
            light_angle_x,
            light_angle_y,
            shadow_enabled,
            shadow_strength,
            shadow_softness,
            material_preset,
            roughness,
            metalness,
            custom_texture,
            bloom_enabled,
            bloom_intensity,
            rim_light_enabled,
            rim_light_intensity,
            particles_enabled,
            particle_intensity,
            dof_enabled,
            dof_focus,
            dof_aperture,
            motion_blur_enabled,
            motion_blur_strength,
            background_mode,
            is_animating,
            animation_speed,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.touched_fields().is_empty()
    }

    /// Whether the patch changes anything the material depends on
    pub fn touches_material(&self) -> bool {
        self.style.is_some()
            || self.material_preset.is_some()
            || self.roughness.is_some()
            || self.metalness.is_some()
            || self.custom_texture.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_patch_is_identity() {
        let mut state = EditorState::default();
        EditorPatch::default().apply_to(&mut state);
        assert_eq!(state, EditorState::default());
        assert!(EditorPatch::default().is_empty());
    }

    #[test]
    fn test_touched_fields() {
        let patch = EditorPatch {
            roughness: Some(0.1),
            background_mode: Some(BackgroundMode::Studio),
            ..Default::default()
        };
        assert_eq!(patch.touched_fields(), vec!["roughness", "background_mode"]);
        assert!(patch.touches_material());
    }

    #[test]
    fn test_clear_texture() {
        let mut state = EditorState {
            custom_texture: Some(
                EmbeddedTexture::new("t.png", "image/png", vec![1, 2, 3]).unwrap(),
            ),
            ..Default::default()
        };
        EditorPatch {
            custom_texture: Some(None),
            ..Default::default()
        }
        .apply_to(&mut state);
        assert!(state.custom_texture.is_none());
    }
}
