//! Application state and the actions that change it

mod notifications;

pub use notifications::{NOTICE_LIFETIME, Notice, NoticeKind, Notifications};

use std::sync::Arc;

use logo_core::{
    BrandPreset, EditorPatch, EditorStore, EmbeddedTexture, ExportRequest, ExportResolution,
    StylePreset, Tier, TierGate,
};
use parking_lot::Mutex;

/// Top-level view selected in the header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Editor,
    Architecture,
    Pricing,
}

impl ActiveView {
    pub const ALL: [ActiveView; 3] = [ActiveView::Editor, ActiveView::Architecture, ActiveView::Pricing];

    pub fn name(&self) -> &'static str {
        match self {
            ActiveView::Editor => "Editor",
            ActiveView::Architecture => "Architecture",
            ActiveView::Pricing => "Pricing",
        }
    }
}

/// What the export machinery is busy with
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ExportActivity {
    #[default]
    Idle,
    /// Waiting for a frame to come back from the GPU
    Capturing,
    /// Recording an animation, with the elapsed fraction
    Recording { progress: f32 },
}

impl ExportActivity {
    pub fn is_busy(&self) -> bool {
        !matches!(self, ExportActivity::Idle)
    }
}

/// Actions that can be performed on the application state
#[derive(Debug, Clone)]
pub enum AppAction {
    /// Merge a partial update into the editor state
    Update(EditorPatch),
    ApplyBrandPreset(BrandPreset),
    SelectStyle(StylePreset),
    ResetTransform,
    ResetAll,
    /// A file picked or dropped as surface texture
    LoadTexture { name: String, data: Vec<u8> },
    ClearTexture,
    SetExportResolution(ExportResolution),
    Export(ExportRequest),
    CancelRecording,
    SetTier(Tier),
    ToggleTier,
    SetView(ActiveView),
    /// Put the camera back to its starting orbit
    ResetCamera,
}

impl AppAction {
    /// Actions that need the renderer or the export machinery
    fn needs_app(&self) -> bool {
        matches!(
            self,
            AppAction::Export(_) | AppAction::CancelRecording | AppAction::ResetCamera
        )
    }
}

/// Main application state
pub struct AppState {
    pub store: EditorStore,
    pub tier: TierGate,
    pub active_view: ActiveView,
    pub export_resolution: ExportResolution,
    pub export_activity: ExportActivity,
    pub notifications: Notifications,
    pending_actions: Vec<AppAction>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            store: EditorStore::new(),
            tier: TierGate::default(),
            active_view: ActiveView::default(),
            export_resolution: ExportResolution::default(),
            export_activity: ExportActivity::default(),
            notifications: Notifications::new(),
            pending_actions: Vec::new(),
        }
    }

    /// Queue an action for the next frame
    pub fn queue_action(&mut self, action: AppAction) {
        self.pending_actions.push(action);
    }

    pub fn take_actions(&mut self) -> Vec<AppAction> {
        std::mem::take(&mut self.pending_actions)
    }

    /// Apply an action to the state.
    ///
    /// Actions that need the renderer are handed back to the caller.
    pub fn apply(&mut self, action: AppAction) -> Option<AppAction> {
        if action.needs_app() {
            return Some(action);
        }

        match action {
            AppAction::Update(patch) => {
                if let Err(e) = self.store.update(patch) {
                    self.notifications.error(format!("Change rejected: {}", e));
                }
            }
            AppAction::ApplyBrandPreset(preset) => {
                self.store.apply_brand_preset(preset);
                self.notifications
                    .success(format!("Applied {} preset", preset.name()));
            }
            AppAction::SelectStyle(style) => self.store.select_style(style),
            AppAction::ResetTransform => self.store.reset_transform(),
            AppAction::ResetAll => self.store.reset_all(),
            AppAction::LoadTexture { name, data } => self.load_texture(name, data),
            AppAction::ClearTexture => self.set_texture(None),
            AppAction::SetExportResolution(resolution) => {
                self.export_resolution = resolution;
            }
            AppAction::SetTier(tier) => self.tier.set_tier(tier),
            AppAction::ToggleTier => self.tier.toggle(),
            AppAction::SetView(view) => {
                tracing::debug!("Switching to {} view", view.name());
                self.active_view = view;
            }
            AppAction::Export(_) | AppAction::CancelRecording | AppAction::ResetCamera => {}
        }
        None
    }

    fn load_texture(&mut self, name: String, data: Vec<u8>) {
        match EmbeddedTexture::from_file_name(name, data) {
            Ok(texture) => {
                self.notifications
                    .success(format!("Texture {} loaded", texture.name()));
                self.set_texture(Some(texture));
            }
            Err(e) => {
                self.notifications.error(e.to_string());
            }
        }
    }

    fn set_texture(&mut self, texture: Option<EmbeddedTexture>) {
        let patch = EditorPatch {
            custom_texture: Some(texture),
            ..Default::default()
        };
        if let Err(e) = self.store.update(patch) {
            self.notifications.error(e.to_string());
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared application state handle
pub type SharedAppState = Arc<Mutex<AppState>>;

pub fn create_shared_state() -> SharedAppState {
    Arc::new(Mutex::new(AppState::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use logo_core::ImageFormat;

    #[test]
    fn test_queue_is_drained_once() {
        let mut state = AppState::new();
        state.queue_action(AppAction::ResetAll);
        state.queue_action(AppAction::ToggleTier);
        assert_eq!(state.take_actions().len(), 2);
        assert!(state.take_actions().is_empty());
    }

    #[test]
    fn test_rejected_update_posts_error() {
        let mut state = AppState::new();
        let before = state.store.snapshot();

        let patch = EditorPatch {
            brand_name: Some("X".repeat(21)),
            ..Default::default()
        };
        assert!(state.apply(AppAction::Update(patch)).is_none());

        assert_eq!(state.store.state(), &before);
        assert_eq!(state.notifications.notices().len(), 1);
        assert_eq!(state.notifications.notices()[0].kind, NoticeKind::Error);
    }

    #[test]
    fn test_texture_load_and_clear() {
        let mut state = AppState::new();
        state.apply(AppAction::LoadTexture {
            name: "marble.png".into(),
            data: vec![0x89, b'P', b'N', b'G'],
        });
        assert_eq!(
            state.store.state().custom_texture.as_ref().map(|t| t.mime()),
            Some("image/png")
        );

        state.apply(AppAction::ClearTexture);
        assert!(state.store.state().custom_texture.is_none());
    }

    #[test]
    fn test_non_image_texture_is_refused() {
        let mut state = AppState::new();
        state.apply(AppAction::LoadTexture {
            name: "readme.txt".into(),
            data: b"hello".to_vec(),
        });
        assert!(state.store.state().custom_texture.is_none());
        assert_eq!(state.notifications.notices()[0].kind, NoticeKind::Error);
    }

    #[test]
    fn test_export_is_handed_back() {
        let mut state = AppState::new();
        let action = AppAction::Export(ExportRequest::Image {
            format: ImageFormat::Png,
            resolution: ExportResolution::Hd1080,
        });
        assert!(matches!(state.apply(action), Some(AppAction::Export(_))));
        assert!(state.apply(AppAction::ResetCamera).is_some());
    }

    #[test]
    fn test_tier_and_view() {
        let mut state = AppState::new();
        state.apply(AppAction::ToggleTier);
        assert!(state.tier.is_pro());
        state.apply(AppAction::SetTier(Tier::Free));
        assert!(!state.tier.is_pro());

        state.apply(AppAction::SetView(ActiveView::Pricing));
        assert_eq!(state.active_view, ActiveView::Pricing);
    }
}
