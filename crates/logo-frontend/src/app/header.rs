//! Header bar: title, view tabs, settings and tier badge

use logo_core::{ExportResolution, Tier};

use crate::config::{BackendPreference, SharedConfig, UiConfig, UiTheme};
use crate::state::{ActiveView, AppAction, SharedAppState};

pub fn render_header(ctx: &egui::Context, app_state: &SharedAppState, config: &SharedConfig) {
    let (active_view, tier) = {
        let state = app_state.lock();
        (state.active_view, state.tier.tier())
    };

    egui::TopBottomPanel::top("header").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            ui.vertical(|ui| {
                ui.strong("3D Logo Creator");
                ui.weak("Cinematic Brand Design Studio");
            });
            ui.separator();

            for view in ActiveView::ALL {
                if ui.selectable_label(active_view == view, view.name()).clicked()
                    && active_view != view
                {
                    app_state.lock().queue_action(AppAction::SetView(view));
                }
            }
            ui.separator();

            ui.menu_button("Settings", |ui| settings_menu(ui, config));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let (text, color) = match tier {
                    Tier::Pro => ("PRO", egui::Color32::from_rgb(0xff, 0xb3, 0x00)),
                    Tier::Free => ("FREE", ui.visuals().weak_text_color()),
                };
                let badge = ui
                    .add(egui::Button::new(egui::RichText::new(text).strong().color(color)))
                    .on_hover_text("Toggle the demo tier");
                if badge.clicked() {
                    app_state.lock().queue_action(AppAction::ToggleTier);
                }
                if tier == Tier::Free && ui.button("Upgrade").clicked() {
                    app_state
                        .lock()
                        .queue_action(AppAction::SetView(ActiveView::Pricing));
                }
            });
        });
    });
}

fn settings_menu(ui: &mut egui::Ui, config: &SharedConfig) {
    let mut manager = config.write();
    let current = manager.config().clone();
    let mut next = current.clone();

    ui.label("Theme");
    ui.horizontal(|ui| {
        ui.radio_value(&mut next.ui.theme, UiTheme::Dark, "Dark");
        ui.radio_value(&mut next.ui.theme, UiTheme::Light, "Light");
    });
    ui.add(egui::Slider::new(&mut next.ui.scale, UiConfig::SCALE_RANGE).text("UI scale"));

    ui.separator();
    ui.label("Renderer (applies on restart)");
    egui::ComboBox::from_id_salt("backend_preference")
        .selected_text(next.renderer.backend.name())
        .show_ui(ui, |ui| {
            for backend in BackendPreference::ALL {
                ui.selectable_value(&mut next.renderer.backend, backend, backend.name());
            }
        });
    ui.checkbox(&mut next.renderer.msaa, "Anti-aliasing (MSAA)");

    ui.separator();
    ui.label("Default export resolution");
    for resolution in ExportResolution::ALL {
        ui.radio_value(&mut next.export.default_resolution, resolution, resolution.label());
    }

    ui.separator();
    if next != current {
        *manager.config_mut() = next;
    }
    ui.horizontal(|ui| {
        if ui
            .add_enabled(manager.is_dirty(), egui::Button::new("Save"))
            .clicked()
        {
            if let Err(e) = manager.save() {
                tracing::error!("Failed to save config: {}", e);
            }
            ui.close_menu();
        }
        if ui.button("Reset to defaults").clicked() {
            manager.reset_to_defaults();
        }
    });
}
