//! InspectorSection trait and shared controls

use egui::Ui;
use logo_core::{
    EditorPatch, EditorState, ExportResolution, FieldRange, MaterialCustomization, ProFeature,
    TierGate,
};

use crate::state::{AppAction, ExportActivity, SharedAppState};

/// Context passed to inspector sections for rendering
pub struct SectionContext<'a> {
    /// Editor state as of the start of the frame
    pub state: &'a EditorState,
    pub gate: &'a TierGate,
    pub customization: MaterialCustomization,
    pub export_resolution: ExportResolution,
    pub export_activity: ExportActivity,
    /// For file dialogs that answer after the frame
    pub app_state: &'a SharedAppState,
    /// Queue for actions to be processed
    pub pending_actions: &'a mut Vec<AppAction>,
}

impl SectionContext<'_> {
    pub fn update(&mut self, patch: EditorPatch) {
        self.pending_actions.push(AppAction::Update(patch));
    }

    pub fn is_entitled(&self, feature: ProFeature) -> bool {
        self.gate.is_entitled(feature)
    }
}

/// One collapsible group of inspector controls
pub trait InspectorSection {
    /// Header text
    fn name(&self) -> &str;

    /// Render the controls.
    /// Returns true if any value was changed
    fn ui(&mut self, ui: &mut Ui, ctx: &mut SectionContext) -> bool;

    fn default_open(&self) -> bool {
        true
    }
}

/// Labelled slider over a field's declared range
pub(super) fn slider_row(ui: &mut Ui, label: &str, value: &mut f32, range: FieldRange) -> bool {
    ui.label(label);
    ui.add(
        egui::Slider::new(value, range.as_range())
            .step_by(range.step as f64)
            .max_decimals(3),
    )
    .changed()
}

/// Slider for integer fields such as bevel segments
pub(super) fn int_slider_row(ui: &mut Ui, label: &str, value: &mut u32, range: FieldRange) -> bool {
    ui.label(label);
    ui.add(egui::Slider::new(value, range.min as u32..=range.max as u32))
        .changed()
}
