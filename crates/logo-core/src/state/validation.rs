//! Range validation of editor parameters

use thiserror::Error;

use super::EditorState;

/// Longest brand name accepted, in characters
pub const MAX_BRAND_NAME_CHARS: usize = 20;

/// Inclusive numeric range of one editor field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRange {
    pub field: &'static str,
    pub min: f32,
    pub max: f32,
    /// Slider increment used by the inspector
    pub step: f32,
}

impl FieldRange {
    const fn new(field: &'static str, min: f32, max: f32, step: f32) -> Self {
        Self {
            field,
            min,
            max,
            step,
        }
    }

    pub fn contains(&self, value: f32) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }

    pub fn check(&self, value: f32) -> Result<(), StateError> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(StateError::OutOfRange {
                field: self.field,
                value,
                min: self.min,
                max: self.max,
            })
        }
    }

    pub fn as_range(&self) -> std::ops::RangeInclusive<f32> {
        self.min..=self.max
    }
}

/// Declared ranges of every numeric field
pub mod ranges {
    use super::FieldRange;

    pub const EXTRUSION_DEPTH: FieldRange = FieldRange::new("extrusion_depth", 0.1, 2.0, 0.1);
    pub const BEVEL_SIZE: FieldRange = FieldRange::new("bevel_size", 0.0, 0.1, 0.005);
    pub const BEVEL_SEGMENTS: FieldRange = FieldRange::new("bevel_segments", 1.0, 10.0, 1.0);
    pub const ROTATION: FieldRange = FieldRange::new("rotation", -180.0, 180.0, 1.0);
    pub const LIGHT_INTENSITY: FieldRange = FieldRange::new("light_intensity", 0.0, 3.0, 0.1);
    pub const LIGHT_ANGLE_X: FieldRange = FieldRange::new("light_angle_x", 0.0, 90.0, 5.0);
    pub const LIGHT_ANGLE_Y: FieldRange = FieldRange::new("light_angle_y", 0.0, 360.0, 5.0);
    pub const SHADOW_STRENGTH: FieldRange = FieldRange::new("shadow_strength", 0.0, 1.0, 0.05);
    pub const SHADOW_SOFTNESS: FieldRange = FieldRange::new("shadow_softness", 0.0, 1.0, 0.05);
    pub const ROUGHNESS: FieldRange = FieldRange::new("roughness", 0.0, 1.0, 0.05);
    pub const METALNESS: FieldRange = FieldRange::new("metalness", 0.0, 1.0, 0.05);
    pub const BLOOM_INTENSITY: FieldRange = FieldRange::new("bloom_intensity", 0.0, 1.0, 0.05);
    pub const RIM_LIGHT_INTENSITY: FieldRange =
        FieldRange::new("rim_light_intensity", 0.0, 2.0, 0.1);
    pub const PARTICLE_INTENSITY: FieldRange =
        FieldRange::new("particle_intensity", 0.0, 1.0, 0.05);
    pub const DOF_FOCUS: FieldRange = FieldRange::new("dof_focus", 0.1, 20.0, 0.1);
    pub const DOF_APERTURE: FieldRange = FieldRange::new("dof_aperture", 0.0, 0.1, 0.005);
    pub const MOTION_BLUR_STRENGTH: FieldRange =
        FieldRange::new("motion_blur_strength", 0.0, 1.0, 0.05);
    pub const ANIMATION_SPEED: FieldRange = FieldRange::new("animation_speed", 0.1, 3.0, 0.1);
}

/// Reasons an editor update is rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StateError {
    #[error("{field} = {value} is outside the allowed range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("brand name is {len} characters long, at most {max} are allowed")]
    BrandNameTooLong { len: usize, max: usize },
}

impl EditorState {
    /// Check every field against its declared range
    pub fn validate(&self) -> Result<(), StateError> {
        let len = self.brand_name.chars().count();
        if len > MAX_BRAND_NAME_CHARS {
            return Err(StateError::BrandNameTooLong {
                len,
                max: MAX_BRAND_NAME_CHARS,
            });
        }

        let rotation = |field, value| {
            FieldRange {
                field,
                ..ranges::ROTATION
            }
            .check(value)
        };

        ranges::EXTRUSION_DEPTH.check(self.extrusion_depth)?;
        ranges::BEVEL_SIZE.check(self.bevel_size)?;
        ranges::BEVEL_SEGMENTS.check(self.bevel_segments as f32)?;
        rotation("rotation_x", self.rotation_x)?;
        rotation("rotation_y", self.rotation_y)?;
        rotation("rotation_z", self.rotation_z)?;
        ranges::LIGHT_INTENSITY.check(self.light_intensity)?;
        ranges::LIGHT_ANGLE_X.check(self.light_angle_x)?;
        ranges::LIGHT_ANGLE_Y.check(self.light_angle_y)?;
        ranges::SHADOW_STRENGTH.check(self.shadow_strength)?;
        ranges::SHADOW_SOFTNESS.check(self.shadow_softness)?;
        ranges::ROUGHNESS.check(self.roughness)?;
        ranges::METALNESS.check(self.metalness)?;
        ranges::BLOOM_INTENSITY.check(self.bloom_intensity)?;
        ranges::RIM_LIGHT_INTENSITY.check(self.rim_light_intensity)?;
        ranges::PARTICLE_INTENSITY.check(self.particle_intensity)?;
        ranges::DOF_FOCUS.check(self.dof_focus)?;
        ranges::DOF_APERTURE.check(self.dof_aperture)?;
        ranges::MOTION_BLUR_STRENGTH.check(self.motion_blur_strength)?;
        ranges::ANIMATION_SPEED.check(self.animation_speed)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(EditorState::default().validate(), Ok(()));
    }

    #[test]
    fn test_out_of_range_roughness() {
        let state = EditorState {
            roughness: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            state.validate(),
            Err(StateError::OutOfRange {
                field: "roughness",
                ..
            })
        ));
    }

    #[test]
    fn test_nan_is_rejected() {
        let state = EditorState {
            light_intensity: f32::NAN,
            ..Default::default()
        };
        assert!(state.validate().is_err());
    }

    #[test]
    fn test_rotation_error_names_the_axis() {
        let state = EditorState {
            rotation_z: 200.0,
            ..Default::default()
        };
        assert!(matches!(
            state.validate(),
            Err(StateError::OutOfRange {
                field: "rotation_z",
                ..
            })
        ));
    }

    #[test]
    fn test_brand_name_counts_characters_not_bytes() {
        let state = EditorState {
            brand_name: "ÄÖÜ".repeat(6),
            ..Default::default()
        };
        assert_eq!(state.validate(), Ok(()));

        let state = EditorState {
            brand_name: "X".repeat(21),
            ..Default::default()
        };
        assert_eq!(
            state.validate(),
            Err(StateError::BrandNameTooLong { len: 21, max: 20 })
        );
    }
}
