//! Background modes and their fixed rendering parameters

use serde::{Deserialize, Serialize};

use crate::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BackgroundMode {
    Studio,
    #[default]
    DarkStage,
    Gradient,
    Transparent,
}

impl BackgroundMode {
    pub const ALL: [BackgroundMode; 4] = [
        BackgroundMode::Studio,
        BackgroundMode::DarkStage,
        BackgroundMode::Gradient,
        BackgroundMode::Transparent,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BackgroundMode::Studio => "Studio",
            BackgroundMode::DarkStage => "Dark Stage",
            BackgroundMode::Gradient => "Gradient",
            BackgroundMode::Transparent => "Transparent",
        }
    }
}

/// Linear distance fog
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    pub color: Color,
    pub near: f32,
    pub far: f32,
}

/// Rendering strategy for one background mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundConfig {
    /// `None` leaves the frame transparent
    pub clear_color: Option<Color>,
    pub fog: Option<Fog>,
    /// Extra hemispheric fill light imitating a studio environment map
    pub environment_fill: f32,
}

impl BackgroundConfig {
    pub fn is_transparent(&self) -> bool {
        self.clear_color.is_none()
    }
}

pub fn resolve_background(mode: BackgroundMode) -> BackgroundConfig {
    match mode {
        BackgroundMode::Studio => BackgroundConfig {
            clear_color: Some(Color::from_hex(0xf0f0f0)),
            fog: None,
            environment_fill: 0.6,
        },
        BackgroundMode::DarkStage => BackgroundConfig {
            clear_color: Some(Color::from_hex(0x0a0a0a)),
            fog: Some(Fog {
                color: Color::from_hex(0x0a0a0a),
                near: 10.0,
                far: 50.0,
            }),
            environment_fill: 0.0,
        },
        BackgroundMode::Gradient => BackgroundConfig {
            clear_color: Some(Color::from_hex(0x1a1a2e)),
            fog: Some(Fog {
                color: Color::from_hex(0x16213e),
                near: 10.0,
                far: 50.0,
            }),
            environment_fill: 0.0,
        },
        BackgroundMode::Transparent => BackgroundConfig {
            clear_color: None,
            fog: None,
            environment_fill: 0.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_transparent_mode_has_no_clear_color() {
        for mode in BackgroundMode::ALL {
            let config = resolve_background(mode);
            assert_eq!(config.is_transparent(), mode == BackgroundMode::Transparent);
        }
    }

    #[test]
    fn test_fog_ranges() {
        for mode in BackgroundMode::ALL {
            if let Some(fog) = resolve_background(mode).fog {
                assert!(fog.near < fog.far);
            }
        }
    }
}
