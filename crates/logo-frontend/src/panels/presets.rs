//! Brand presets sidebar

use logo_core::BrandPreset;

use crate::panels::Panel;
use crate::state::{AppAction, SharedAppState};

/// One-click brand presets
pub struct PresetsPanel;

impl PresetsPanel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PresetsPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for PresetsPanel {
    fn name(&self) -> &str {
        "Presets"
    }

    fn ui(&mut self, ui: &mut egui::Ui, app_state: &SharedAppState) {
        ui.heading("Brand Presets");
        ui.weak("One-click professional styles");
        ui.separator();

        egui::ScrollArea::vertical().show(ui, |ui| {
            for preset in BrandPreset::ALL {
                let clicked = egui::Frame::group(ui.style())
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.strong(preset.name());
                        ui.small(preset.description());
                    })
                    .response
                    .interact(egui::Sense::click())
                    .on_hover_cursor(egui::CursorIcon::PointingHand)
                    .clicked();

                if clicked {
                    app_state
                        .lock()
                        .queue_action(AppAction::ApplyBrandPreset(preset));
                }
                ui.add_space(4.0);
            }

            ui.separator();
            if ui.button("Reset All").clicked() {
                app_state.lock().queue_action(AppAction::ResetAll);
            }
        });
    }
}
