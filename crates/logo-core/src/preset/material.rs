//! Material presets: base color overrides applied on top of a style

use serde::{Deserialize, Serialize};

use crate::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MaterialPreset {
    #[default]
    Gold,
    Silver,
    Matte,
    CarbonFiber,
    Marble,
}

impl MaterialPreset {
    pub const ALL: [MaterialPreset; 5] = [
        MaterialPreset::Gold,
        MaterialPreset::Silver,
        MaterialPreset::Matte,
        MaterialPreset::CarbonFiber,
        MaterialPreset::Marble,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MaterialPreset::Gold => "Gold",
            MaterialPreset::Silver => "Silver",
            MaterialPreset::Matte => "Matte",
            MaterialPreset::CarbonFiber => "Carbon Fiber",
            MaterialPreset::Marble => "Marble",
        }
    }
}

/// Base color a material preset forces onto the logo
pub fn resolve_material_color(preset: MaterialPreset) -> Color {
    match preset {
        MaterialPreset::Gold => Color::from_hex(0xffd700),
        MaterialPreset::Silver => Color::from_hex(0xc0c0c0),
        MaterialPreset::Matte => Color::from_hex(0x666666),
        MaterialPreset::CarbonFiber => Color::from_hex(0x1a1a1a),
        MaterialPreset::Marble => Color::from_hex(0xf5f5dc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_colors() {
        assert_eq!(
            resolve_material_color(MaterialPreset::CarbonFiber).to_hex_string(),
            "#1a1a1a"
        );
        assert_eq!(
            resolve_material_color(MaterialPreset::Marble).to_hex_string(),
            "#f5f5dc"
        );
    }
}
