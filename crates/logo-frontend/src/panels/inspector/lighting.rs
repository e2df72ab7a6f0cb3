//! Lighting, shadows and background

use egui::Ui;
use logo_core::{BackgroundMode, EditorPatch, ranges};

use super::section::slider_row;
use super::{InspectorSection, SectionContext};

pub struct LightingSection;

impl InspectorSection for LightingSection {
    fn name(&self) -> &str {
        "Lighting & Shadows"
    }

    fn ui(&mut self, ui: &mut Ui, ctx: &mut SectionContext) -> bool {
        let state = ctx.state;
        let mut intensity = state.light_intensity;
        let mut angle_x = state.light_angle_x;
        let mut angle_y = state.light_angle_y;
        let mut shadows = state.shadow_enabled;
        let mut strength = state.shadow_strength;
        let mut softness = state.shadow_softness;
        let mut patch = EditorPatch::default();

        if slider_row(ui, "Light Intensity", &mut intensity, ranges::LIGHT_INTENSITY) {
            patch.light_intensity = Some(intensity);
        }
        if slider_row(ui, "Light Angle X", &mut angle_x, ranges::LIGHT_ANGLE_X) {
            patch.light_angle_x = Some(angle_x);
        }
        if slider_row(ui, "Light Angle Y", &mut angle_y, ranges::LIGHT_ANGLE_Y) {
            patch.light_angle_y = Some(angle_y);
        }

        if ui.checkbox(&mut shadows, "Shadows").changed() {
            patch.shadow_enabled = Some(shadows);
        }
        if state.shadow_enabled {
            ui.indent("shadow_settings", |ui| {
                if slider_row(ui, "Shadow Strength", &mut strength, ranges::SHADOW_STRENGTH) {
                    patch.shadow_strength = Some(strength);
                }
                if slider_row(ui, "Shadow Softness", &mut softness, ranges::SHADOW_SOFTNESS) {
                    patch.shadow_softness = Some(softness);
                }
            });
        }

        if patch.is_empty() {
            return false;
        }
        ctx.update(patch);
        true
    }
}

pub struct BackgroundSection;

impl InspectorSection for BackgroundSection {
    fn name(&self) -> &str {
        "Background"
    }

    fn ui(&mut self, ui: &mut Ui, ctx: &mut SectionContext) -> bool {
        ui.label("Scene Mode");
        let mut mode = ctx.state.background_mode;
        egui::ComboBox::from_id_salt("background_mode")
            .selected_text(mode.name())
            .show_ui(ui, |ui| {
                for candidate in BackgroundMode::ALL {
                    ui.selectable_value(&mut mode, candidate, candidate.name());
                }
            });

        if mode == ctx.state.background_mode {
            return false;
        }
        ctx.update(EditorPatch {
            background_mode: Some(mode),
            ..Default::default()
        });
        true
    }
}
