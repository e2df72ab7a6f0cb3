//! Style presets: base material properties for the logo surface

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Named bundle of base material properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StylePreset {
    Metal,
    Gold,
    Chrome,
    Glass,
    Neon,
    #[default]
    Cinematic,
}

impl StylePreset {
    pub const ALL: [StylePreset; 6] = [
        StylePreset::Metal,
        StylePreset::Gold,
        StylePreset::Chrome,
        StylePreset::Glass,
        StylePreset::Neon,
        StylePreset::Cinematic,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StylePreset::Metal => "Metal",
            StylePreset::Gold => "Gold",
            StylePreset::Chrome => "Chrome",
            StylePreset::Glass => "Glass",
            StylePreset::Neon => "Neon",
            StylePreset::Cinematic => "Cinematic",
        }
    }
}

/// Self-illumination of a style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Emissive {
    pub color: Color,
    pub intensity: f32,
}

/// Resolved configuration of a style preset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleConfig {
    pub color: Color,
    pub metalness: f32,
    pub roughness: f32,
    pub emissive: Option<Emissive>,
    /// Opacity when the style is see-through, `None` for opaque styles
    pub opacity: Option<f32>,
}

impl StyleConfig {
    pub fn is_transparent(&self) -> bool {
        self.opacity.is_some()
    }
}

/// Look up the base material properties of a style
pub fn resolve_style(style: StylePreset) -> StyleConfig {
    let opaque = |hex, metalness, roughness| StyleConfig {
        color: Color::from_hex(hex),
        metalness,
        roughness,
        emissive: None,
        opacity: None,
    };

    match style {
        StylePreset::Metal => opaque(0x888888, 0.9, 0.3),
        StylePreset::Gold => opaque(0xffd700, 1.0, 0.2),
        StylePreset::Chrome => opaque(0xffffff, 1.0, 0.1),
        StylePreset::Glass => StyleConfig {
            opacity: Some(0.6),
            ..opaque(0xffffff, 0.0, 0.0)
        },
        StylePreset::Neon => StyleConfig {
            emissive: Some(Emissive {
                color: Color::from_hex(0x00ffff),
                intensity: 0.5,
            }),
            ..opaque(0x00ffff, 0.5, 0.2)
        },
        StylePreset::Cinematic => opaque(0xcccccc, 0.8, 0.3),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_style_is_fully_populated() {
        for style in StylePreset::ALL {
            let config = resolve_style(style);
            assert!((0.0..=1.0).contains(&config.metalness), "{}", style.name());
            assert!((0.0..=1.0).contains(&config.roughness), "{}", style.name());
            if let Some(opacity) = config.opacity {
                assert!((0.0..=1.0).contains(&opacity));
            }
            if let Some(emissive) = config.emissive {
                assert!(emissive.intensity > 0.0);
            }
        }
    }

    #[test]
    fn test_glass_is_transparent() {
        let glass = resolve_style(StylePreset::Glass);
        assert!(glass.is_transparent());
        assert_eq!(glass.opacity, Some(0.6));
        assert!(!resolve_style(StylePreset::Chrome).is_transparent());
    }

    #[test]
    fn test_neon_glows() {
        let neon = resolve_style(StylePreset::Neon);
        let emissive = neon.emissive.expect("neon is emissive");
        assert_eq!(emissive.color, Color::from_hex(0x00ffff));
        assert_eq!(emissive.intensity, 0.5);
    }
}
