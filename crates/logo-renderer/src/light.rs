//! Key, ambient and rim lights for the logo scene

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use logo_core::{BackgroundConfig, Color, EditorState};

use crate::constants::light as constants;

/// Key light position from two angles in degrees.
///
/// `angle_x` is the elevation and `angle_y` the azimuth around Y:
/// `x = sin(ay)·cos(ax)·d, y = sin(ax)·d, z = cos(ay)·cos(ax)·d`.
pub fn light_position(angle_x_deg: f32, angle_y_deg: f32, distance: f32) -> Vec3 {
    let ax = angle_x_deg.to_radians();
    let ay = angle_y_deg.to_radians();
    Vec3::new(
        ay.sin() * ax.cos() * distance,
        ax.sin() * distance,
        ay.cos() * ax.cos() * distance,
    )
}

/// Light uniform buffer data sent to GPU (128 bytes)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LightUniform {
    /// Key light position (xyz) and intensity (w)
    pub key: [f32; 4],
    /// Ambient color (rgb) and strength (w)
    pub ambient: [f32; 4],
    /// Rim light position (xyz) and intensity (w, 0 when off)
    pub rim: [f32; 4],
    /// Rim light color (rgb)
    pub rim_color: [f32; 4],
    /// x = enabled (1.0 or 0.0), y = strength, z = softness
    pub shadow: [f32; 4],
    /// Fog color (rgb) and enabled (w)
    pub fog_color: [f32; 4],
    /// x = near, y = far
    pub fog_range: [f32; 4],
    /// x = environment fill from the backdrop
    pub environment: [f32; 4],
}

impl Default for LightUniform {
    fn default() -> Self {
        LightRig::default().uniform()
    }
}

/// Terminator shading stands in for cast shadows: `strength` darkens the
/// side facing away from the key light and `softness` widens the falloff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowSettings {
    pub enabled: bool,
    pub strength: f32,
    pub softness: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RimLight {
    pub position: Vec3,
    pub color: Color,
    pub intensity: f32,
}

/// All lights of the scene
#[derive(Debug, Clone, PartialEq)]
pub struct LightRig {
    pub ambient: f32,
    pub key_position: Vec3,
    pub key_intensity: f32,
    pub shadow: ShadowSettings,
    pub rim: Option<RimLight>,
    pub background: BackgroundConfig,
}

impl Default for LightRig {
    fn default() -> Self {
        Self::from_state(&EditorState::default())
    }
}

impl LightRig {
    pub fn from_state(state: &EditorState) -> Self {
        let rim = state.rim_light_enabled.then(|| RimLight {
            position: Vec3::from(constants::RIM_POSITION),
            color: Color(constants::RIM_COLOR),
            intensity: state.rim_light_intensity,
        });

        Self {
            ambient: constants::AMBIENT_INTENSITY,
            key_position: light_position(
                state.light_angle_x,
                state.light_angle_y,
                constants::KEY_DISTANCE,
            ),
            key_intensity: state.light_intensity,
            shadow: ShadowSettings {
                enabled: state.shadow_enabled,
                strength: state.shadow_strength,
                softness: state.shadow_softness,
            },
            rim,
            background: logo_core::resolve_background(state.background_mode),
        }
    }

    pub fn uniform(&self) -> LightUniform {
        let (rim, rim_color) = match &self.rim {
            Some(rim) => {
                let [r, g, b] = rim.color.to_linear_f32();
                (
                    [rim.position.x, rim.position.y, rim.position.z, rim.intensity],
                    [r, g, b, 1.0],
                )
            }
            None => ([0.0; 4], [0.0; 4]),
        };

        let (fog_color, fog_range) = match &self.background.fog {
            Some(fog) => {
                let [r, g, b] = fog.color.to_linear_f32();
                ([r, g, b, 1.0], [fog.near, fog.far, 0.0, 0.0])
            }
            None => ([0.0; 4], [0.0; 4]),
        };

        LightUniform {
            key: [
                self.key_position.x,
                self.key_position.y,
                self.key_position.z,
                self.key_intensity,
            ],
            ambient: [1.0, 1.0, 1.0, self.ambient],
            rim,
            rim_color,
            shadow: [
                if self.shadow.enabled { 1.0 } else { 0.0 },
                self.shadow.strength,
                self.shadow.softness,
                0.0,
            ],
            fog_color,
            fog_range,
            environment: [self.background.environment_fill, 0.0, 0.0, 0.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use logo_core::BackgroundMode;

    #[test]
    fn test_light_position_default_angles() {
        let p = light_position(45.0, 45.0, 10.0);
        assert_relative_eq!(p.x, 5.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 7.071_068, epsilon = 1e-5);
        assert_relative_eq!(p.z, 5.0, epsilon = 1e-5);
    }

    #[test]
    fn test_light_position_keeps_distance() {
        for (ax, ay) in [(0.0, 0.0), (90.0, 0.0), (30.0, 270.0), (15.0, 360.0)] {
            assert_relative_eq!(light_position(ax, ay, 10.0).length(), 10.0, epsilon = 1e-4);
        }
        let overhead = light_position(90.0, 123.0, 10.0);
        assert_relative_eq!(overhead.y, 10.0, epsilon = 1e-5);
    }

    #[test]
    fn test_rim_light_follows_toggle() {
        let mut state = EditorState::default();
        assert!(LightRig::from_state(&state).rim.is_some());

        state.rim_light_enabled = false;
        let rig = LightRig::from_state(&state);
        assert!(rig.rim.is_none());
        assert_eq!(rig.uniform().rim[3], 0.0);
    }

    #[test]
    fn test_fog_only_for_fogged_backdrops() {
        let mut state = EditorState::default();
        state.background_mode = BackgroundMode::DarkStage;
        assert_eq!(LightRig::from_state(&state).uniform().fog_range[..2], [10.0, 50.0]);

        state.background_mode = BackgroundMode::Studio;
        assert_eq!(LightRig::from_state(&state).uniform().fog_color[3], 0.0);
    }
}
