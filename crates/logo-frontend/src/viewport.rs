//! Viewport rendering state

use std::sync::Arc;

use logo_renderer::{
    ContextLossMonitor, ContextState, LogoRenderer, PendingCapture, RendererConfig,
    SceneDescription,
};

/// Radians of orbit per dragged point
const ORBIT_SPEED: f32 = 0.01;
/// Zoom per scrolled point
const ZOOM_SPEED: f32 = 0.002;

/// The renderer and the egui texture it draws into
pub struct ViewportState {
    renderer: LogoRenderer,
    device: Arc<wgpu::Device>,
    texture_id: Option<egui::TextureId>,
    loss_monitor: ContextLossMonitor,
    context_state: ContextState,
}

impl ViewportState {
    pub fn new(render_state: &egui_wgpu::RenderState, config: RendererConfig) -> Self {
        let device: Arc<wgpu::Device> = render_state.device.clone();
        let queue: Arc<wgpu::Queue> = render_state.queue.clone();

        let loss_monitor = ContextLossMonitor::new();
        loss_monitor.attach(&device);

        Self {
            renderer: LogoRenderer::new(device.clone(), queue, config),
            device,
            texture_id: None,
            loss_monitor,
            context_state: ContextState::default(),
        }
    }

    /// Replace the renderer with a fresh one on `render_state`'s device.
    ///
    /// Returns false, leaving everything as is, when the context was lost
    /// and the host still offers the same device.
    pub fn rebuild(&mut self, render_state: &egui_wgpu::RenderState, config: RendererConfig) -> bool {
        let new_device = !Arc::ptr_eq(&self.device, &render_state.device);
        let mut context_state = self.context_state.clone();
        if !context_state.restore(new_device) {
            tracing::warn!("Cannot rebuild the viewport on a lost device");
            return false;
        }

        self.release(&mut render_state.renderer.write());
        *self = Self::new(render_state, config);
        self.context_state = context_state;
        true
    }

    pub fn renderer(&self) -> &LogoRenderer {
        &self.renderer
    }

    pub fn context_state(&self) -> &ContextState {
        &self.context_state
    }

    /// Pick up device-lost notifications. Returns true if the context was just lost.
    pub fn poll_context(&mut self) -> bool {
        self.context_state.poll(&self.loss_monitor)
    }

    /// Resize the render targets and keep the egui texture pointing at them
    pub fn ensure_size(
        &mut self,
        width: u32,
        height: u32,
        egui_renderer: &mut egui_wgpu::Renderer,
    ) -> Option<egui::TextureId> {
        let width = width.max(1);
        let height = height.max(1);

        if self.renderer.resize(width, height) || self.texture_id.is_none() {
            if let Some(old) = self.texture_id.take() {
                egui_renderer.free_texture(&old);
            }
            let view = self.renderer.output_view()?;
            self.texture_id = Some(egui_renderer.register_native_texture(
                &self.device,
                view,
                wgpu::FilterMode::Linear,
            ));
        }

        self.texture_id
    }

    /// Draw one frame. Returns true while another frame is wanted.
    pub fn render(&mut self, scene: &SceneDescription) -> bool {
        if self.context_state.is_lost() {
            return false;
        }
        self.renderer.render(scene)
    }

    /// Start reading back the current view at the given size
    pub fn capture(&mut self, scene: &SceneDescription, width: u32, height: u32) -> Option<PendingCapture> {
        if self.context_state.is_lost() {
            return None;
        }
        Some(self.renderer.capture(scene, width, height))
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Orbit from a pointer drag in points
    pub fn drag(&mut self, delta: egui::Vec2) {
        self.renderer
            .camera_mut()
            .orbit(delta.x * ORBIT_SPEED, delta.y * ORBIT_SPEED);
    }

    /// Zoom from a scroll in points, positive scrolls in
    pub fn scroll(&mut self, delta: f32) {
        self.renderer.camera_mut().zoom(delta * ZOOM_SPEED);
    }

    pub fn reset_camera(&mut self) {
        self.renderer.camera_mut().reset();
    }

    /// Release the egui texture before the viewport goes away
    pub fn release(&mut self, egui_renderer: &mut egui_wgpu::Renderer) {
        if let Some(id) = self.texture_id.take() {
            egui_renderer.free_texture(&id);
        }
    }
}
