//! Brand presets: one-click bundles of style, material, lighting and effects

use serde::{Deserialize, Serialize};

use super::{BackgroundMode, MaterialPreset, StylePreset};
use crate::state::EditorPatch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BrandPreset {
    Luxury,
    Tech,
    Spiritual,
    Gaming,
    Corporate,
}

impl BrandPreset {
    pub const ALL: [BrandPreset; 5] = [
        BrandPreset::Luxury,
        BrandPreset::Tech,
        BrandPreset::Spiritual,
        BrandPreset::Gaming,
        BrandPreset::Corporate,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BrandPreset::Luxury => "Luxury",
            BrandPreset::Tech => "Tech",
            BrandPreset::Spiritual => "Spiritual",
            BrandPreset::Gaming => "Gaming",
            BrandPreset::Corporate => "Corporate",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            BrandPreset::Luxury => "Premium gold finish with dramatic lighting",
            BrandPreset::Tech => "Sleek chrome with modern aesthetics",
            BrandPreset::Spiritual => "Ethereal glass with soft glow",
            BrandPreset::Gaming => "Bold neon with particle effects",
            BrandPreset::Corporate => "Professional metal finish",
        }
    }
}

/// The editor fields a brand preset overwrites
pub fn resolve_brand_preset(preset: BrandPreset) -> EditorPatch {
    match preset {
        BrandPreset::Luxury => EditorPatch {
            style: Some(StylePreset::Gold),
            material_preset: Some(MaterialPreset::Gold),
            roughness: Some(0.2),
            metalness: Some(1.0),
            bloom_enabled: Some(true),
            bloom_intensity: Some(0.7),
            rim_light_enabled: Some(true),
            rim_light_intensity: Some(1.0),
            background_mode: Some(BackgroundMode::DarkStage),
            light_intensity: Some(2.0),
            ..Default::default()
        },
        BrandPreset::Tech => EditorPatch {
            style: Some(StylePreset::Chrome),
            material_preset: Some(MaterialPreset::Silver),
            roughness: Some(0.1),
            metalness: Some(1.0),
            bloom_enabled: Some(true),
            bloom_intensity: Some(0.4),
            rim_light_enabled: Some(true),
            rim_light_intensity: Some(0.6),
            background_mode: Some(BackgroundMode::Gradient),
            light_intensity: Some(1.8),
            ..Default::default()
        },
        BrandPreset::Spiritual => EditorPatch {
            style: Some(StylePreset::Glass),
            material_preset: Some(MaterialPreset::Marble),
            roughness: Some(0.4),
            metalness: Some(0.3),
            bloom_enabled: Some(true),
            bloom_intensity: Some(0.8),
            rim_light_enabled: Some(true),
            rim_light_intensity: Some(0.9),
            background_mode: Some(BackgroundMode::Studio),
            light_intensity: Some(1.2),
            ..Default::default()
        },
        BrandPreset::Gaming => EditorPatch {
            style: Some(StylePreset::Neon),
            material_preset: Some(MaterialPreset::CarbonFiber),
            roughness: Some(0.5),
            metalness: Some(0.6),
            bloom_enabled: Some(true),
            bloom_intensity: Some(1.0),
            rim_light_enabled: Some(true),
            rim_light_intensity: Some(1.0),
            particles_enabled: Some(true),
            particle_intensity: Some(0.7),
            background_mode: Some(BackgroundMode::DarkStage),
            light_intensity: Some(1.5),
            ..Default::default()
        },
        BrandPreset::Corporate => EditorPatch {
            style: Some(StylePreset::Metal),
            material_preset: Some(MaterialPreset::Silver),
            roughness: Some(0.4),
            metalness: Some(0.7),
            bloom_enabled: Some(false),
            rim_light_enabled: Some(false),
            background_mode: Some(BackgroundMode::Studio),
            light_intensity: Some(1.3),
            ..Default::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::EditorState;

    #[test]
    fn test_every_preset_yields_a_valid_state() {
        for preset in BrandPreset::ALL {
            let mut state = EditorState::default();
            resolve_brand_preset(preset).apply_to(&mut state);
            assert_eq!(state.validate(), Ok(()), "{}", preset.name());
        }
    }

    #[test]
    fn test_presets_never_touch_text_or_transform() {
        for preset in BrandPreset::ALL {
            let patch = resolve_brand_preset(preset);
            assert!(patch.brand_name.is_none());
            assert!(patch.rotation_x.is_none());
            assert!(patch.rotation_y.is_none());
            assert!(patch.rotation_z.is_none());
        }
    }

    #[test]
    fn test_corporate_disables_effects() {
        let patch = resolve_brand_preset(BrandPreset::Corporate);
        assert_eq!(patch.bloom_enabled, Some(false));
        assert_eq!(patch.rim_light_enabled, Some(false));
        assert!(patch.bloom_intensity.is_none());
    }
}
