//! 3D viewport panel

use logo_renderer::{Capability, ContextState, PostProcessState, SceneDescription};

use crate::state::SharedAppState;
use crate::unavailable;
use crate::viewport::ViewportState;

/// What the viewport panel needs besides the app state
pub struct ViewportInputs<'a> {
    pub viewport: Option<&'a mut ViewportState>,
    pub render_state: Option<&'a egui_wgpu::RenderState>,
    pub capability: &'a Capability,
}

/// Draws the logo and turns pointer input into camera moves
pub struct ViewportPanel {
    /// Set when the user asked to reload after a lost context
    reload_requested: bool,
    /// The effects-disabled notice was posted for the current renderer
    post_notice_posted: bool,
    /// A reload could not bring the lost device back
    restart_required: bool,
}

impl ViewportPanel {
    pub fn new() -> Self {
        Self {
            reload_requested: false,
            post_notice_posted: false,
            restart_required: false,
        }
    }

    pub fn name(&self) -> &str {
        "Viewport"
    }

    /// Take a pending reload request
    pub fn take_reload_request(&mut self) -> bool {
        std::mem::take(&mut self.reload_requested)
    }

    /// Only a restart of the app can render again
    #[cfg_attr(target_arch = "wasm32", allow(dead_code))]
    pub fn require_restart(&mut self) {
        self.restart_required = true;
    }

    /// Forget per-renderer state after the renderer was replaced
    #[cfg_attr(target_arch = "wasm32", allow(dead_code))]
    pub fn reset(&mut self) {
        self.post_notice_posted = false;
    }

    /// Message to post the first time post-processing is seen disabled
    fn post_notice(&mut self, state: &PostProcessState) -> Option<String> {
        let PostProcessState::Disabled { reason } = state else {
            return None;
        };
        if std::mem::replace(&mut self.post_notice_posted, true) {
            return None;
        }
        Some(format!("Visual effects disabled: {}", reason))
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, app_state: &SharedAppState, inputs: ViewportInputs) {
        let (Some(viewport), Some(render_state)) = (inputs.viewport, inputs.render_state) else {
            unavailable_ui(ui, inputs.capability);
            return;
        };

        if let ContextState::ContextLost(event) = viewport.context_state() {
            let reason = format!("{} ({})", event.reason, event.message);
            if context_lost_ui(ui, &reason, self.restart_required) {
                self.reload_requested = true;
            }
            return;
        }

        let rect = ui.available_rect_before_wrap();
        let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());

        let pixels_per_point = ui.ctx().pixels_per_point();
        let width = (rect.width() * pixels_per_point).round() as u32;
        let height = (rect.height() * pixels_per_point).round() as u32;
        if width == 0 || height == 0 {
            return;
        }

        if response.dragged() {
            viewport.drag(response.drag_delta());
        }
        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll != 0.0 {
                viewport.scroll(scroll);
            }
        }
        if response.double_clicked() {
            viewport.reset_camera();
        }

        let scene = {
            let state = app_state.lock();
            SceneDescription::from_state(state.store.state(), state.store.material())
                .gated(&state.tier)
        };

        let texture_id = {
            let mut egui_renderer = render_state.renderer.write();
            viewport.ensure_size(width, height, &mut egui_renderer)
        };
        let Some(texture_id) = texture_id else {
            return;
        };

        if viewport.render(&scene) {
            ui.ctx().request_repaint();
        }

        let image = egui::Image::new(egui::load::SizedTexture::new(texture_id, rect.size()));
        image.paint_at(ui, rect);

        let painter = ui.painter_at(rect);
        painter.text(
            rect.left_top() + egui::vec2(8.0, 8.0),
            egui::Align2::LEFT_TOP,
            "Drag to orbit · Scroll to zoom · Double-click to reset",
            egui::FontId::proportional(11.0),
            ui.visuals().weak_text_color(),
        );

        if let Some(message) = self.post_notice(viewport.renderer().post_state()) {
            app_state.lock().notifications.warn(message);
        }

        let hovering_files = ui.ctx().input(|i| !i.raw.hovered_files.is_empty());
        if hovering_files {
            painter.rect_filled(rect, 0.0, egui::Color32::from_black_alpha(160));
            painter.rect_stroke(
                rect.shrink(8.0),
                8.0,
                egui::Stroke::new(2.0, ui.visuals().selection.stroke.color),
            );
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "Drop texture image here",
                egui::FontId::proportional(20.0),
                egui::Color32::WHITE,
            );
        }
    }
}

impl Default for ViewportPanel {
    fn default() -> Self {
        Self::new()
    }
}

fn unavailable_ui(ui: &mut egui::Ui, capability: &Capability) {
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.25);
        ui.heading(unavailable::TITLE);
        ui.label("Your device could not create a GPU context. This may be due to:");
        ui.add_space(4.0);
        for cause in unavailable::CAUSES {
            ui.label(format!("• {}", cause));
        }
        ui.add_space(8.0);
        match capability {
            Capability::Unavailable { reason } => {
                ui.weak(reason.as_str());
            }
            Capability::Unchecked => {
                ui.weak("No GPU context was provided.");
            }
            Capability::Available(_) => {}
        }
        ui.add_space(8.0);
        ui.label("You can still adjust settings and export SVG files.");
    });
}

/// Returns true when the reload button was clicked
fn context_lost_ui(ui: &mut egui::Ui, reason: &str, restart_required: bool) -> bool {
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.3);
        ui.heading("Rendering context lost");
        if restart_required {
            ui.label("The GPU device cannot be recovered. Restart Logo Studio to render again.");
        } else {
            ui.label("The GPU stopped responding. Reload to continue editing.");
        }
        ui.weak(reason);
        ui.add_space(8.0);
        !restart_required && ui.button("Reload").clicked()
    })
    .inner
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_notice_posted_once_per_renderer() {
        let mut panel = ViewportPanel::new();
        assert_eq!(panel.post_notice(&PostProcessState::Active), None);

        let disabled = PostProcessState::Disabled {
            reason: "bloom failed to load".into(),
        };
        assert_eq!(
            panel.post_notice(&disabled).as_deref(),
            Some("Visual effects disabled: bloom failed to load")
        );
        assert_eq!(panel.post_notice(&disabled), None);

        panel.reset();
        assert!(panel.post_notice(&disabled).is_some());
    }

    #[test]
    fn test_restart_outlives_renderer_reset() {
        let mut panel = ViewportPanel::new();
        panel.require_restart();
        panel.reset();
        assert!(panel.restart_required);
        assert!(!panel.take_reload_request());
    }
}
