//! Declarative scene built from the editor state

use glam::{EulerRot, Mat4, Vec3};
use logo_core::{BackgroundConfig, EditorState, ProFeature, ResolvedMaterial, TierGate};

use crate::constants::{animation, text};
use crate::light::LightRig;
use crate::particles::particle_count;
use crate::postprocess::BloomSettings;
use crate::text_mesh::TextGeometryParams;

/// Everything needed to draw one logo frame
#[derive(Debug, Clone, PartialEq)]
pub struct SceneDescription {
    pub text: TextGeometryParams,
    pub material: ResolvedMaterial,
    /// Model rotation in radians (XYZ order)
    pub rotation: Vec3,
    /// Turntable speed while animating
    pub animation_speed: Option<f32>,
    pub lights: LightRig,
    pub background: BackgroundConfig,
    /// 0 when particles are off
    pub particle_count: usize,
    pub bloom: Option<BloomSettings>,
}

impl SceneDescription {
    pub fn from_state(state: &EditorState, material: &ResolvedMaterial) -> Self {
        let lights = LightRig::from_state(state);
        let background = lights.background;

        Self {
            text: TextGeometryParams {
                text: state.display_text().to_string(),
                size: text::SIZE,
                curve_segments: text::CURVE_SEGMENTS,
                depth: state.extrusion_depth,
                bevel_size: state.bevel_size,
                bevel_segments: state.bevel_segments,
            },
            material: material.clone(),
            rotation: state.rotation_radians(),
            animation_speed: state.is_animating.then_some(state.animation_speed),
            lights,
            background,
            particle_count: if state.particles_enabled {
                particle_count(state.particle_intensity)
            } else {
                0
            },
            bloom: state
                .bloom_enabled
                .then(|| BloomSettings::from_intensity(state.bloom_intensity)),
        }
    }

    /// Drop effects the current tier is not entitled to
    pub fn gated(mut self, gate: &TierGate) -> Self {
        if !gate.is_entitled(ProFeature::Particles) {
            self.particle_count = 0;
        }
        self
    }

    /// Clear color of the target, fully transparent for the transparent backdrop
    pub fn clear_color(&self) -> wgpu::Color {
        match self.background.clear_color {
            Some(color) => {
                let [r, g, b] = color.to_linear_f32();
                wgpu::Color {
                    r: r as f64,
                    g: g as f64,
                    b: b as f64,
                    a: 1.0,
                }
            }
            None => wgpu::Color::TRANSPARENT,
        }
    }
}

/// Per-frame data handed to sub-renderers
pub struct FrameInput<'a> {
    pub scene: &'a SceneDescription,
    pub model: Mat4,
    /// False for export captures, which must not step animations
    pub advance: bool,
}

/// Rotation accumulated by the turntable animation.
///
/// Editing the rotation sliders restarts the spin from the edited pose.
#[derive(Debug, Clone, Default)]
pub struct Turntable {
    spin: f32,
    base: Vec3,
}

impl Turntable {
    /// Advance one frame. Returns true while animating.
    pub fn advance(&mut self, scene: &SceneDescription) -> bool {
        if scene.rotation != self.base {
            self.base = scene.rotation;
            self.spin = 0.0;
        }
        match scene.animation_speed {
            Some(speed) => {
                self.spin = (self.spin + animation::SPIN_PER_FRAME * speed) % std::f32::consts::TAU;
                true
            }
            None => false,
        }
    }

    pub fn spin(&self) -> f32 {
        self.spin
    }

    pub fn model_matrix(&self, scene: &SceneDescription) -> Mat4 {
        let r = scene.rotation;
        Mat4::from_euler(EulerRot::XYZ, r.x, r.y + self.spin, r.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use logo_core::{BrandPreset, EditorStore, Tier};

    fn scene_for(store: &EditorStore) -> SceneDescription {
        SceneDescription::from_state(store.state(), store.material())
    }

    #[test]
    fn test_defaults() {
        let store = EditorStore::new();
        let scene = scene_for(&store);

        assert_eq!(scene.text.text, "BRAND");
        assert_eq!(scene.text.curve_segments, 12);
        assert_eq!(scene.rotation, Vec3::ZERO);
        assert_eq!(scene.particle_count, 0);
        assert!(scene.animation_speed.is_none());

        let bloom = scene.bloom.unwrap();
        assert_relative_eq!(bloom.strength, 1.0);
        assert_relative_eq!(bloom.radius, 0.4);
        assert_relative_eq!(bloom.threshold, 0.85);
    }

    #[test]
    fn test_rotation_in_radians() {
        let mut state = EditorState::default();
        state.rotation_y = 90.0;
        state.rotation_z = -180.0;
        let scene = SceneDescription::from_state(&state, &logo_core::compose_material(&state));
        assert_relative_eq!(scene.rotation.y, std::f32::consts::FRAC_PI_2);
        assert_relative_eq!(scene.rotation.z, -std::f32::consts::PI);
    }

    #[test]
    fn test_particles_need_pro() {
        let mut store = EditorStore::new();
        store.apply_brand_preset(BrandPreset::Gaming);

        let scene = scene_for(&store);
        assert_eq!(scene.particle_count, 700);
        assert_eq!(scene.clone().gated(&TierGate::new(Tier::Pro)).particle_count, 700);
        assert_eq!(scene.gated(&TierGate::default()).particle_count, 0);
    }

    #[test]
    fn test_transparent_backdrop_clears_to_nothing() {
        let mut state = EditorState::default();
        state.background_mode = logo_core::BackgroundMode::Transparent;
        let scene = SceneDescription::from_state(&state, &logo_core::compose_material(&state));
        assert_eq!(scene.clear_color(), wgpu::Color::TRANSPARENT);
    }

    #[test]
    fn test_turntable() {
        let mut state = EditorState::default();
        state.is_animating = true;
        state.animation_speed = 2.0;
        let material = logo_core::compose_material(&state);
        let scene = SceneDescription::from_state(&state, &material);

        let mut turntable = Turntable::default();
        assert!(turntable.advance(&scene));
        assert!(turntable.advance(&scene));
        assert_relative_eq!(turntable.spin(), 0.04, epsilon = 1e-6);

        state.rotation_x = 10.0;
        let edited = SceneDescription::from_state(&state, &material);
        turntable.advance(&edited);
        assert_relative_eq!(turntable.spin(), 0.02, epsilon = 1e-6);

        state.is_animating = false;
        let paused = SceneDescription::from_state(&state, &material);
        assert!(!turntable.advance(&paused));
        assert_relative_eq!(turntable.spin(), 0.02, epsilon = 1e-6);
    }
}
