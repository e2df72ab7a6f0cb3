//! Editor dock layout

use egui_dock::{DockState, NodeIndex, TabViewer};
use logo_renderer::Capability;

use crate::panels::{InspectorPanel, Panel, PresetsPanel, TimelinePanel, ViewportInputs, ViewportPanel};
use crate::state::SharedAppState;
use crate::viewport::ViewportState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorTab {
    Presets,
    Viewport,
    Inspector,
    Timeline,
}

/// Presets left, inspector right, timeline under the viewport
pub fn create_dock_state() -> DockState<EditorTab> {
    let mut dock_state = DockState::new(vec![EditorTab::Viewport]);
    let surface = dock_state.main_surface_mut();

    let [center, _inspector] = surface.split_right(NodeIndex::root(), 0.72, vec![EditorTab::Inspector]);
    let [center, _presets] = surface.split_left(center, 0.22, vec![EditorTab::Presets]);
    let [_viewport, _timeline] = surface.split_below(center, 0.85, vec![EditorTab::Timeline]);

    dock_state
}

/// The editor's panels
pub struct EditorPanels {
    pub presets: PresetsPanel,
    pub viewport: ViewportPanel,
    pub inspector: InspectorPanel,
    pub timeline: TimelinePanel,
}

impl EditorPanels {
    pub fn new() -> Self {
        Self {
            presets: PresetsPanel::new(),
            viewport: ViewportPanel::new(),
            inspector: InspectorPanel::new(),
            timeline: TimelinePanel::new(),
        }
    }
}

impl Default for EditorPanels {
    fn default() -> Self {
        Self::new()
    }
}

pub struct EditorTabViewer<'a> {
    pub panels: &'a mut EditorPanels,
    pub app_state: &'a SharedAppState,
    pub viewport: Option<&'a mut ViewportState>,
    pub render_state: Option<&'a egui_wgpu::RenderState>,
    pub capability: &'a Capability,
}

impl TabViewer for EditorTabViewer<'_> {
    type Tab = EditorTab;

    fn title(&mut self, tab: &mut Self::Tab) -> egui::WidgetText {
        match tab {
            EditorTab::Presets => self.panels.presets.name().into(),
            EditorTab::Viewport => self.panels.viewport.name().into(),
            EditorTab::Inspector => self.panels.inspector.name().into(),
            EditorTab::Timeline => self.panels.timeline.name().into(),
        }
    }

    fn ui(&mut self, ui: &mut egui::Ui, tab: &mut Self::Tab) {
        match tab {
            EditorTab::Presets => self.panels.presets.ui(ui, self.app_state),
            EditorTab::Viewport => {
                let inputs = ViewportInputs {
                    viewport: self.viewport.as_deref_mut(),
                    render_state: self.render_state,
                    capability: self.capability,
                };
                self.panels.viewport.ui(ui, self.app_state, inputs);
            }
            EditorTab::Inspector => self.panels.inspector.ui(ui, self.app_state),
            EditorTab::Timeline => self.panels.timeline.ui(ui, self.app_state),
        }
    }

    fn closeable(&mut self, _tab: &mut Self::Tab) -> bool {
        false
    }

    fn clear_background(&self, tab: &Self::Tab) -> bool {
        *tab != EditorTab::Viewport
    }
}
