//! Toast notifications in the bottom-right corner

use crate::state::{NoticeKind, SharedAppState};

const TOAST_WIDTH: f32 = 280.0;

fn accent(kind: NoticeKind) -> egui::Color32 {
    match kind {
        NoticeKind::Success => egui::Color32::from_rgb(0x4c, 0xaf, 0x50),
        NoticeKind::Info => egui::Color32::from_rgb(0x42, 0xa5, 0xf5),
        NoticeKind::Warning => egui::Color32::from_rgb(0xff, 0xb3, 0x00),
        NoticeKind::Error => egui::Color32::from_rgb(0xef, 0x53, 0x50),
    }
}

/// Draw the pending notices on top of everything else
pub fn show_notices(ctx: &egui::Context, app_state: &SharedAppState) {
    let notices = app_state.lock().notifications.notices().to_vec();
    if notices.is_empty() {
        return;
    }

    let mut dismissed = Vec::new();

    egui::Area::new(egui::Id::new("notices"))
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-12.0, -12.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            ui.set_max_width(TOAST_WIDTH);
            for notice in &notices {
                egui::Frame::popup(ui.style())
                    .stroke(egui::Stroke::new(1.0, accent(notice.kind)))
                    .show(ui, |ui| {
                        ui.set_width(TOAST_WIDTH);
                        ui.horizontal(|ui| {
                            ui.colored_label(accent(notice.kind), "●");
                            ui.label(&notice.message);
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                if ui.small_button("✖").clicked() {
                                    dismissed.push(notice.id);
                                }
                            });
                        });
                    });
                ui.add_space(4.0);
            }
        });

    if !dismissed.is_empty() {
        let mut state = app_state.lock();
        for id in dismissed {
            state.notifications.dismiss(id);
        }
    }

    // Keep frames coming so notices expire without input
    ctx.request_repaint_after(std::time::Duration::from_millis(250));
}
