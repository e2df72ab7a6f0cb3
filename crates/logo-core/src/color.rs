//! Packed RGB colors used by the preset tables

use serde::{Deserialize, Serialize};

/// 24-bit sRGB color stored as `0xRRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0x000000);
    pub const WHITE: Color = Color(0xffffff);

    pub const fn from_hex(hex: u32) -> Self {
        Self(hex & 0x00ff_ffff)
    }

    pub fn r(self) -> u8 {
        ((self.0 >> 16) & 0xff) as u8
    }

    pub fn g(self) -> u8 {
        ((self.0 >> 8) & 0xff) as u8
    }

    pub fn b(self) -> u8 {
        (self.0 & 0xff) as u8
    }

    /// Components in 0.0-1.0 (sRGB, not linearized)
    pub fn to_rgb_f32(self) -> [f32; 3] {
        [
            self.r() as f32 / 255.0,
            self.g() as f32 / 255.0,
            self.b() as f32 / 255.0,
        ]
    }

    /// Components in 0.0-1.0 converted to linear space for shading
    pub fn to_linear_f32(self) -> [f32; 3] {
        self.to_rgb_f32().map(srgb_to_linear)
    }

    /// CSS-style `#rrggbb`
    pub fn to_hex_string(self) -> String {
        format!("#{:06x}", self.0)
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_components() {
        let gold = Color::from_hex(0xffd700);
        assert_eq!((gold.r(), gold.g(), gold.b()), (0xff, 0xd7, 0x00));
        assert_eq!(gold.to_hex_string(), "#ffd700");
    }

    #[test]
    fn test_linear_endpoints() {
        assert_eq!(Color::BLACK.to_linear_f32(), [0.0, 0.0, 0.0]);
        let white = Color::WHITE.to_linear_f32();
        for c in white {
            approx::assert_abs_diff_eq!(c, 1.0, epsilon = 1e-6);
        }
    }
}
