//! Cinematic and camera effects

use egui::Ui;
use logo_core::{EditorPatch, ProFeature, ranges};

use super::section::slider_row;
use super::{InspectorSection, SectionContext};
use crate::panels::pro_badge;

/// Toggle for a Pro feature, disabled without entitlement
fn gated_checkbox(ui: &mut Ui, value: &mut bool, label: &str, entitled: bool) -> bool {
    ui.horizontal(|ui| {
        let changed = ui
            .add_enabled(entitled, egui::Checkbox::new(value, label))
            .on_disabled_hover_text("Upgrade to Pro to unlock")
            .changed();
        if !entitled {
            pro_badge(ui);
        }
        changed
    })
    .inner
}

pub struct EffectsSection;

impl InspectorSection for EffectsSection {
    fn name(&self) -> &str {
        "Cinematic Effects"
    }

    fn ui(&mut self, ui: &mut Ui, ctx: &mut SectionContext) -> bool {
        let state = ctx.state;
        let mut patch = EditorPatch::default();

        let mut bloom = state.bloom_enabled;
        if ui.checkbox(&mut bloom, "Bloom / Glow").changed() {
            patch.bloom_enabled = Some(bloom);
        }
        if state.bloom_enabled {
            let mut intensity = state.bloom_intensity;
            if slider_row(ui, "Bloom Intensity", &mut intensity, ranges::BLOOM_INTENSITY) {
                patch.bloom_intensity = Some(intensity);
            }
        }

        let mut rim = state.rim_light_enabled;
        if ui.checkbox(&mut rim, "Rim Light").changed() {
            patch.rim_light_enabled = Some(rim);
        }
        if state.rim_light_enabled {
            let mut intensity = state.rim_light_intensity;
            if slider_row(ui, "Rim Intensity", &mut intensity, ranges::RIM_LIGHT_INTENSITY) {
                patch.rim_light_intensity = Some(intensity);
            }
        }

        let entitled = ctx.is_entitled(ProFeature::Particles);
        let mut particles = state.particles_enabled;
        if gated_checkbox(ui, &mut particles, "Particles", entitled) {
            patch.particles_enabled = Some(particles);
        }
        if state.particles_enabled && entitled {
            let mut intensity = state.particle_intensity;
            if slider_row(ui, "Particle Intensity", &mut intensity, ranges::PARTICLE_INTENSITY) {
                patch.particle_intensity = Some(intensity);
            }
        }

        if patch.is_empty() {
            return false;
        }
        ctx.update(patch);
        true
    }
}

/// Depth of field and motion blur settings
pub struct CameraEffectsSection;

impl InspectorSection for CameraEffectsSection {
    fn name(&self) -> &str {
        "Camera Effects"
    }

    fn default_open(&self) -> bool {
        false
    }

    fn ui(&mut self, ui: &mut Ui, ctx: &mut SectionContext) -> bool {
        let state = ctx.state;
        let mut patch = EditorPatch::default();

        let dof_entitled = ctx.is_entitled(ProFeature::DepthOfField);
        let mut dof = state.dof_enabled;
        if gated_checkbox(ui, &mut dof, "Depth of Field", dof_entitled) {
            patch.dof_enabled = Some(dof);
        }
        if state.dof_enabled && dof_entitled {
            let mut focus = state.dof_focus;
            let mut aperture = state.dof_aperture;
            if slider_row(ui, "Focus Distance", &mut focus, ranges::DOF_FOCUS) {
                patch.dof_focus = Some(focus);
            }
            if slider_row(ui, "Aperture", &mut aperture, ranges::DOF_APERTURE) {
                patch.dof_aperture = Some(aperture);
            }
        }

        let blur_entitled = ctx.is_entitled(ProFeature::MotionBlur);
        let mut blur = state.motion_blur_enabled;
        if gated_checkbox(ui, &mut blur, "Motion Blur", blur_entitled) {
            patch.motion_blur_enabled = Some(blur);
        }
        if state.motion_blur_enabled && blur_entitled {
            let mut strength = state.motion_blur_strength;
            if slider_row(ui, "Blur Strength", &mut strength, ranges::MOTION_BLUR_STRENGTH) {
                patch.motion_blur_strength = Some(strength);
            }
        }

        ui.weak("Camera effects are not drawn in the preview yet.");

        if patch.is_empty() {
            return false;
        }
        ctx.update(patch);
        true
    }
}
