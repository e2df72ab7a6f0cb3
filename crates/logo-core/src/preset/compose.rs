//! Final material composition from style, material preset and user edits

use super::{Emissive, StyleConfig, resolve_material_color, resolve_style};
use crate::color::Color;
use crate::state::EditorState;
use crate::texture::EmbeddedTexture;

/// Material the renderer draws the logo with
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedMaterial {
    pub base_color: Color,
    pub metalness: f32,
    pub roughness: f32,
    pub emissive: Option<Emissive>,
    pub opacity: Option<f32>,
    pub texture: Option<EmbeddedTexture>,
}

impl ResolvedMaterial {
    pub fn is_transparent(&self) -> bool {
        self.opacity.is_some()
    }
}

/// Combine the selected style and material preset with the user's values.
///
/// The material preset always supplies the base color, the state supplies
/// roughness/metalness, and the style's glow and transparency pass through.
pub fn compose_material(state: &EditorState) -> ResolvedMaterial {
    let style: StyleConfig = resolve_style(state.style);

    ResolvedMaterial {
        base_color: resolve_material_color(state.material_preset),
        metalness: state.metalness,
        roughness: state.roughness,
        emissive: style.emissive,
        opacity: style.opacity,
        texture: state.custom_texture.clone(),
    }
}

/// Whether the surface values still match the selected style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialCustomization {
    /// Roughness and metalness equal the style's values
    Preset,
    /// The user moved roughness or metalness away from the style
    Customized,
}

pub fn material_customization(state: &EditorState) -> MaterialCustomization {
    const EPSILON: f32 = 1e-4;

    let style = resolve_style(state.style);
    let matches = (state.roughness - style.roughness).abs() < EPSILON
        && (state.metalness - style.metalness).abs() < EPSILON;

    if matches {
        MaterialCustomization::Preset
    } else {
        MaterialCustomization::Customized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::{MaterialPreset, StylePreset};

    #[test]
    fn test_material_color_overrides_style_color() {
        let state = EditorState {
            style: StylePreset::Neon,
            material_preset: MaterialPreset::Silver,
            ..Default::default()
        };
        let material = compose_material(&state);
        assert_eq!(material.base_color, Color::from_hex(0xc0c0c0));
        // Neon's glow survives the color override
        assert!(material.emissive.is_some());
    }

    #[test]
    fn test_user_surface_values_win() {
        let state = EditorState {
            style: StylePreset::Gold,
            roughness: 0.9,
            metalness: 0.1,
            ..Default::default()
        };
        let material = compose_material(&state);
        assert_eq!(material.roughness, 0.9);
        assert_eq!(material.metalness, 0.1);
        assert_eq!(material_customization(&state), MaterialCustomization::Customized);
    }

    #[test]
    fn test_glass_passes_transparency_through() {
        let state = EditorState {
            style: StylePreset::Glass,
            ..Default::default()
        };
        let material = compose_material(&state);
        assert!(material.is_transparent());
        assert_eq!(material.opacity, Some(0.6));
    }

    #[test]
    fn test_defaults_match_cinematic() {
        // Cinematic is 0.3 / 0.8, which equals the defaults
        assert_eq!(
            material_customization(&EditorState::default()),
            MaterialCustomization::Preset
        );
    }
}
