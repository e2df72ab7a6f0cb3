//! Inspector panel with one collapsible section per parameter group

mod effects;
mod export;
mod geometry;
mod lighting;
mod material;
mod section;

pub use section::{InspectorSection, SectionContext};

use effects::{CameraEffectsSection, EffectsSection};
use export::ExportSection;
use geometry::{GeometrySection, TransformSection};
use lighting::{BackgroundSection, LightingSection};
use logo_core::{EditorPatch, MAX_BRAND_NAME_CHARS};
use material::MaterialSection;

use crate::panels::Panel;
use crate::state::{AppAction, SharedAppState};

/// Tabs grouping the inspector sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum InspectorTab {
    #[default]
    Geometry,
    Material,
    Effects,
    Export,
}

impl InspectorTab {
    const ALL: [InspectorTab; 4] = [
        InspectorTab::Geometry,
        InspectorTab::Material,
        InspectorTab::Effects,
        InspectorTab::Export,
    ];

    fn name(&self) -> &'static str {
        match self {
            InspectorTab::Geometry => "Geometry",
            InspectorTab::Material => "Material",
            InspectorTab::Effects => "Effects",
            InspectorTab::Export => "Export",
        }
    }
}

/// Parameter controls for the logo being edited
pub struct InspectorPanel {
    tab: InspectorTab,
    geometry: GeometrySection,
    transform: TransformSection,
    material: MaterialSection,
    lighting: LightingSection,
    background: BackgroundSection,
    effects: EffectsSection,
    camera_effects: CameraEffectsSection,
    export: ExportSection,
}

impl InspectorPanel {
    pub fn new() -> Self {
        Self {
            tab: InspectorTab::default(),
            geometry: GeometrySection,
            transform: TransformSection,
            material: MaterialSection,
            lighting: LightingSection,
            background: BackgroundSection,
            effects: EffectsSection,
            camera_effects: CameraEffectsSection,
            export: ExportSection,
        }
    }

    fn sections(&mut self) -> Vec<&mut dyn InspectorSection> {
        match self.tab {
            InspectorTab::Geometry => vec![
                &mut self.geometry as &mut dyn InspectorSection,
                &mut self.transform,
            ],
            InspectorTab::Material => vec![
                &mut self.material as &mut dyn InspectorSection,
                &mut self.lighting,
                &mut self.background,
            ],
            InspectorTab::Effects => vec![
                &mut self.effects as &mut dyn InspectorSection,
                &mut self.camera_effects,
            ],
            InspectorTab::Export => vec![&mut self.export as &mut dyn InspectorSection],
        }
    }
}

impl Default for InspectorPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for InspectorPanel {
    fn name(&self) -> &str {
        "Inspector"
    }

    fn ui(&mut self, ui: &mut egui::Ui, app_state: &SharedAppState) {
        let mut state = app_state.lock();

        ui.heading("Inspector");
        ui.weak("Customize your logo");
        ui.separator();

        let mut pending_actions: Vec<AppAction> = Vec::new();

        ui.label("Brand Name");
        let mut brand_name = state.store.state().brand_name.clone();
        let response = ui.add(
            egui::TextEdit::singleline(&mut brand_name)
                .char_limit(MAX_BRAND_NAME_CHARS)
                .hint_text("Enter brand name"),
        );
        if response.changed() {
            let upper: String = brand_name
                .to_uppercase()
                .chars()
                .take(MAX_BRAND_NAME_CHARS)
                .collect();
            pending_actions.push(AppAction::Update(EditorPatch {
                brand_name: Some(upper),
                ..Default::default()
            }));
        }
        ui.separator();

        ui.horizontal(|ui| {
            for tab in InspectorTab::ALL {
                ui.selectable_value(&mut self.tab, tab, tab.name());
            }
        });
        ui.separator();

        let editor_state = state.store.state().clone();
        let mut ctx = SectionContext {
            state: &editor_state,
            gate: &state.tier,
            customization: state.store.material_customization(),
            export_resolution: state.export_resolution,
            export_activity: state.export_activity,
            app_state,
            pending_actions: &mut pending_actions,
        };

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for section in self.sections() {
                    render_section(ui, section, &mut ctx);
                }
            });

        for action in pending_actions {
            state.queue_action(action);
        }
    }
}

/// Render a section under a collapsing header.
/// Returns true if the section queued a change.
fn render_section(
    ui: &mut egui::Ui,
    section: &mut dyn InspectorSection,
    ctx: &mut SectionContext,
) -> bool {
    let response = egui::CollapsingHeader::new(section.name())
        .default_open(section.default_open())
        .show(ui, |ui| section.ui(ui, ctx));
    ui.separator();
    response.body_returned.unwrap_or(false)
}
