//! Main application

mod dock;
mod export;
mod header;

use egui_dock::{DockArea, DockState};
use logo_renderer::{AdapterProbe, Capability, CapabilityGuard, RendererConfig};

use crate::config::{SharedConfig, UiConfig, UiTheme, create_shared_config};
use crate::panels::{DocsPanel, FallbackAction, Panel, PricingPanel, show_fallback_screen, show_notices};
use crate::startup::{SharedStartupMonitor, now_seconds};
use crate::state::{ActiveView, AppAction, SharedAppState, create_shared_state};
use crate::viewport::ViewportState;
use dock::{EditorPanels, EditorTab, EditorTabViewer, create_dock_state};
use export::ExportDriver;

/// Main application
pub struct LogoStudioApp {
    app_state: SharedAppState,
    config: SharedConfig,
    startup: SharedStartupMonitor,
    render_state: Option<egui_wgpu::RenderState>,
    capability: Capability,
    viewport: Option<ViewportState>,
    dock_state: DockState<EditorTab>,
    panels: EditorPanels,
    docs: DocsPanel,
    pricing: PricingPanel,
    exports: ExportDriver,
    /// UI preferences currently applied to the egui context
    applied_ui: Option<UiConfig>,
}

impl LogoStudioApp {
    pub fn new(cc: &eframe::CreationContext<'_>, startup: SharedStartupMonitor) -> Self {
        let config = create_shared_config();
        let app_state = create_shared_state();
        app_state.lock().export_resolution = config.read().config().export.default_resolution;

        let render_state = cc.wgpu_render_state.clone();
        let mut guard = CapabilityGuard::new();
        let capability = match &render_state {
            Some(render_state) => {
                let adapter: &wgpu::Adapter = &render_state.adapter;
                guard.check(&AdapterProbe::new(Some(adapter))).clone()
            }
            None => guard.check(&AdapterProbe::new(None)).clone(),
        };

        if let Capability::Available(diagnostics) = &capability {
            for line in diagnostics.report_lines() {
                tracing::debug!("{}", line);
            }
        }

        let viewport = match (&render_state, capability.is_available()) {
            (Some(render_state), true) => {
                route_gpu_errors(render_state, startup.clone());
                Some(create_viewport(render_state, &config))
            }
            _ => None,
        };

        Self {
            app_state,
            config,
            startup,
            render_state,
            capability,
            viewport,
            dock_state: create_dock_state(),
            panels: EditorPanels::new(),
            docs: DocsPanel::new(),
            pricing: PricingPanel::new(),
            exports: ExportDriver::new(),
            applied_ui: None,
        }
    }

    fn apply_ui_config(&mut self, ctx: &egui::Context) {
        let ui_config = self.config.read().config().ui.clone();
        if self.applied_ui.as_ref() == Some(&ui_config) {
            return;
        }

        ctx.set_visuals(match ui_config.theme {
            UiTheme::Dark => egui::Visuals::dark(),
            UiTheme::Light => egui::Visuals::light(),
        });
        ctx.set_zoom_factor(ui_config.effective_scale());
        self.applied_ui = Some(ui_config);
    }

    /// Apply queued actions, handling the ones that need the renderer here
    fn process_actions(&mut self, now: f64) {
        let actions = self.app_state.lock().take_actions();

        for action in actions {
            let mut state = self.app_state.lock();
            let Some(action) = state.apply(action) else {
                continue;
            };
            match action {
                AppAction::Export(request) => {
                    self.exports
                        .request(request, &mut state, self.viewport.as_mut(), now);
                }
                AppAction::CancelRecording => self.exports.cancel(),
                AppAction::ResetCamera => {
                    if let Some(viewport) = &mut self.viewport {
                        viewport.reset_camera();
                    }
                }
                other => tracing::warn!("Unhandled action: {:?}", other),
            }
        }
    }

    /// Turn files dropped onto the window into a texture
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(file) = dropped.first() else {
            return;
        };

        match read_dropped_file(file) {
            Some((name, data)) => {
                self.app_state
                    .lock()
                    .queue_action(AppAction::LoadTexture { name, data });
            }
            None => {
                self.app_state
                    .lock()
                    .notifications
                    .error("Could not read the dropped file");
            }
        }
    }

    fn handle_fallback(&mut self, action: FallbackAction) {
        let clear_cache = action == FallbackAction::ClearCacheAndReload;
        tracing::info!("Reloading (clear cache: {})", clear_cache);
        self.reload(clear_cache);
    }

    #[cfg(target_arch = "wasm32")]
    fn reload(&mut self, clear_cache: bool) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if clear_cache {
            for (name, storage) in [
                ("local", window.local_storage()),
                ("session", window.session_storage()),
            ] {
                match storage {
                    Ok(Some(storage)) => {
                        if let Err(e) = storage.clear() {
                            tracing::warn!("Failed to clear {} storage: {:?}", name, e);
                        }
                    }
                    Ok(None) => {}
                    Err(e) => tracing::warn!("No access to {} storage: {:?}", name, e),
                }
            }
        }
        if let Err(e) = window.location().reload() {
            tracing::error!("Reload failed: {:?}", e);
        }
    }

    /// Start over with fresh state and a fresh renderer
    #[cfg(not(target_arch = "wasm32"))]
    fn reload(&mut self, clear_cache: bool) {
        if clear_cache {
            let mut manager = self.config.write();
            manager.reset_to_defaults();
            if let Err(e) = manager.save() {
                tracing::error!("Failed to reset config: {}", e);
            }
        }

        self.exports.cancel();
        self.exports = ExportDriver::new();
        {
            let mut state = self.app_state.lock();
            *state = crate::state::AppState::new();
            state.export_resolution = self.config.read().config().export.default_resolution;
        }
        self.applied_ui = None;

        self.panels.viewport.reset();
        if let Some(render_state) = &self.render_state
            && self.capability.is_available()
        {
            match &mut self.viewport {
                Some(viewport) => {
                    if !viewport.rebuild(render_state, renderer_config(render_state, &self.config)) {
                        self.panels.viewport.require_restart();
                        self.app_state.lock().notifications.error(
                            "The graphics device was lost. Restart Logo Studio to keep rendering.",
                        );
                    }
                }
                None => self.viewport = Some(create_viewport(render_state, &self.config)),
            }
        }

        self.startup.lock().restart(now_seconds());
    }

    fn show_editor(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::central_panel(&ctx.style()).inner_margin(0.0))
            .show(ctx, |ui| {
                let mut viewer = EditorTabViewer {
                    panels: &mut self.panels,
                    app_state: &self.app_state,
                    viewport: self.viewport.as_mut(),
                    render_state: self.render_state.as_ref(),
                    capability: &self.capability,
                };
                DockArea::new(&mut self.dock_state)
                    .style(egui_dock::Style::from_egui(ui.style().as_ref()))
                    .show_inside(ui, &mut viewer);
            });
    }
}

impl eframe::App for LogoStudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.startup.lock().tick(now_seconds());

        let failure = self.startup.lock().failure().cloned();
        if let Some(failure) = failure {
            if let Some(action) = show_fallback_screen(ctx, &failure, &self.capability) {
                self.handle_fallback(action);
            }
            return;
        }

        self.apply_ui_config(ctx);

        let now = ctx.input(|i| i.time);
        self.handle_dropped_files(ctx);
        self.process_actions(now);

        if let Some(viewport) = &mut self.viewport
            && viewport.poll_context()
        {
            self.app_state
                .lock()
                .notifications
                .error("The rendering context was lost");
        }

        let exporting = {
            let mut state = self.app_state.lock();
            state.notifications.expire(now);
            self.exports.poll(&mut state, self.viewport.as_mut(), now)
        };
        if exporting {
            ctx.request_repaint();
        }

        header::render_header(ctx, &self.app_state, &self.config);

        let active_view = self.app_state.lock().active_view;
        match active_view {
            ActiveView::Editor => self.show_editor(ctx),
            ActiveView::Architecture => {
                egui::CentralPanel::default().show(ctx, |ui| self.docs.ui(ui, &self.app_state));
            }
            ActiveView::Pricing => {
                egui::CentralPanel::default().show(ctx, |ui| self.pricing.ui(ui, &self.app_state));
            }
        }

        show_notices(ctx, &self.app_state);

        if self.panels.viewport.take_reload_request() {
            self.reload(false);
        }
    }
}

fn renderer_config(render_state: &egui_wgpu::RenderState, config: &SharedConfig) -> RendererConfig {
    let backend = render_state.adapter.get_info().backend;
    RendererConfig {
        msaa: config.read().config().renderer.msaa_for(backend),
    }
}

fn create_viewport(render_state: &egui_wgpu::RenderState, config: &SharedConfig) -> ViewportState {
    let renderer_config = renderer_config(render_state, config);
    tracing::info!("Creating viewport renderer (MSAA: {})", renderer_config.msaa);
    ViewportState::new(render_state, renderer_config)
}

/// Report wgpu validation errors as startup failures instead of panicking
fn route_gpu_errors(render_state: &egui_wgpu::RenderState, startup: SharedStartupMonitor) {
    render_state.device.on_uncaptured_error(Box::new(move |error| {
        tracing::error!("wgpu error: {}", error);
        if let Some(mut monitor) = startup.try_lock() {
            monitor.report(&error.to_string(), Some("wgpu device".to_string()));
        }
    }));
}

#[cfg(not(target_arch = "wasm32"))]
fn read_dropped_file(file: &egui::DroppedFile) -> Option<(String, Vec<u8>)> {
    if let Some(bytes) = &file.bytes {
        return Some((file.name.clone(), bytes.to_vec()));
    }
    let path = file.path.as_ref()?;
    let data = std::fs::read(path)
        .map_err(|e| tracing::error!("Failed to read {:?}: {}", path, e))
        .ok()?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.name.clone());
    Some((name, data))
}

#[cfg(target_arch = "wasm32")]
fn read_dropped_file(file: &egui::DroppedFile) -> Option<(String, Vec<u8>)> {
    let bytes = file.bytes.as_ref()?;
    Some((file.name.clone(), bytes.to_vec()))
}
