//! Animation controls under the viewport

use logo_core::{EditorPatch, ranges};

use crate::panels::Panel;
use crate::state::{AppAction, SharedAppState};

pub struct TimelinePanel;

impl TimelinePanel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TimelinePanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for TimelinePanel {
    fn name(&self) -> &str {
        "Timeline"
    }

    fn ui(&mut self, ui: &mut egui::Ui, app_state: &SharedAppState) {
        let mut state = app_state.lock();
        let is_animating = state.store.state().is_animating;
        let mut speed = state.store.state().animation_speed;

        ui.horizontal(|ui| {
            let label = if is_animating { "⏸ Pause" } else { "▶ Play" };
            if ui.button(label).clicked() {
                state.queue_action(AppAction::Update(EditorPatch {
                    is_animating: Some(!is_animating),
                    ..Default::default()
                }));
            }
            if ui
                .button("⟲ Reset")
                .on_hover_text("Reset rotation")
                .clicked()
            {
                state.queue_action(AppAction::ResetTransform);
            }

            ui.separator();
            ui.label("Speed");
            let response = ui.add(
                egui::Slider::new(&mut speed, ranges::ANIMATION_SPEED.as_range())
                    .step_by(ranges::ANIMATION_SPEED.step as f64)
                    .custom_formatter(|value, _| format!("{:.1}x", value)),
            );
            if response.changed() {
                state.queue_action(AppAction::Update(EditorPatch {
                    animation_speed: Some(speed),
                    ..Default::default()
                }));
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if is_animating {
                    ui.colored_label(egui::Color32::LIGHT_GREEN, "Playing");
                } else {
                    ui.weak("Paused");
                }
            });
        });
    }
}
