//! Geometry and rotation sections

use egui::Ui;
use logo_core::{EditorPatch, ranges};

use super::section::{int_slider_row, slider_row};
use super::{InspectorSection, SectionContext};
use crate::state::AppAction;

/// Extrusion and bevel of the text mesh
pub struct GeometrySection;

impl InspectorSection for GeometrySection {
    fn name(&self) -> &str {
        "Geometry"
    }

    fn ui(&mut self, ui: &mut Ui, ctx: &mut SectionContext) -> bool {
        let mut depth = ctx.state.extrusion_depth;
        let mut bevel = ctx.state.bevel_size;
        let mut segments = ctx.state.bevel_segments;
        let mut patch = EditorPatch::default();

        if slider_row(ui, "Extrusion Depth", &mut depth, ranges::EXTRUSION_DEPTH) {
            patch.extrusion_depth = Some(depth);
        }
        if slider_row(ui, "Bevel Size", &mut bevel, ranges::BEVEL_SIZE) {
            patch.bevel_size = Some(bevel);
        }
        if int_slider_row(ui, "Bevel Smoothness", &mut segments, ranges::BEVEL_SEGMENTS) {
            patch.bevel_segments = Some(segments);
        }

        if patch.is_empty() {
            return false;
        }
        ctx.update(patch);
        true
    }
}

/// Rotation of the logo in degrees
pub struct TransformSection;

impl InspectorSection for TransformSection {
    fn name(&self) -> &str {
        "Rotation"
    }

    fn ui(&mut self, ui: &mut Ui, ctx: &mut SectionContext) -> bool {
        let mut x = ctx.state.rotation_x;
        let mut y = ctx.state.rotation_y;
        let mut z = ctx.state.rotation_z;
        let mut patch = EditorPatch::default();

        if slider_row(ui, "X Axis", &mut x, ranges::ROTATION) {
            patch.rotation_x = Some(x);
        }
        if slider_row(ui, "Y Axis", &mut y, ranges::ROTATION) {
            patch.rotation_y = Some(y);
        }
        if slider_row(ui, "Z Axis", &mut z, ranges::ROTATION) {
            patch.rotation_z = Some(z);
        }

        let mut changed = !patch.is_empty();
        if changed {
            ctx.update(patch);
        }

        if ui.button("Reset Rotation").clicked() {
            ctx.pending_actions.push(AppAction::ResetTransform);
            changed = true;
        }
        changed
    }
}
