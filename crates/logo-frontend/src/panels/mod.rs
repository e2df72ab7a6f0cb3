//! UI panels

mod docs;
mod fallback;
mod inspector;
mod notices;
mod presets;
mod pricing;
mod timeline;
mod viewport;

pub use docs::DocsPanel;
pub use fallback::{FallbackAction, show_fallback_screen};
pub use inspector::InspectorPanel;
pub use notices::show_notices;
pub use presets::PresetsPanel;
pub use pricing::PricingPanel;
pub use timeline::TimelinePanel;
pub use viewport::{ViewportInputs, ViewportPanel};

use crate::state::SharedAppState;

/// Common interface of the editor panels
pub trait Panel {
    /// Title shown on the panel's tab
    fn name(&self) -> &str;

    fn ui(&mut self, ui: &mut egui::Ui, app_state: &SharedAppState);
}

/// Small "PRO" badge next to gated controls
pub(crate) fn pro_badge(ui: &mut egui::Ui) {
    ui.label(
        egui::RichText::new("PRO")
            .small()
            .strong()
            .color(egui::Color32::from_rgb(0xff, 0xb3, 0x00)),
    );
}
