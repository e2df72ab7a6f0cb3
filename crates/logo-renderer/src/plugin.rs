//! Layer-ordered set of scene renderers.

use crate::context::RenderContext;
use crate::scene::{FrameInput, SceneDescription};
use crate::traits::{SceneLayer, SubRenderer};

struct Slot {
    renderer: Box<dyn SubRenderer>,
    visible: bool,
}

/// One renderer per [`SceneLayer`], kept in draw order.
///
/// Visibility is decided once per frame in [`prepare_all`](Self::prepare_all)
/// and reused by [`render_all`](Self::render_all), so a layer that was not
/// prepared is never drawn with stale buffers.
#[derive(Default)]
pub struct RendererRegistry {
    slots: Vec<Slot>,
}

impl RendererRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `renderer` at its layer's position, replacing any renderer
    /// already registered for that layer.
    pub fn register<R: SubRenderer + 'static>(&mut self, renderer: R) {
        let layer = renderer.layer();
        let slot = Slot {
            renderer: Box::new(renderer),
            visible: false,
        };
        match self.slots.binary_search_by_key(&layer, |s| s.renderer.layer()) {
            Ok(index) => {
                tracing::debug!("Replacing {} renderer", layer.name());
                let mut old = std::mem::replace(&mut self.slots[index], slot);
                old.renderer.on_destroy();
            }
            Err(index) => self.slots.insert(index, slot),
        }
    }

    pub fn contains(&self, layer: SceneLayer) -> bool {
        self.slots.iter().any(|s| s.renderer.layer() == layer)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Registered layers in draw order
    pub fn layers(&self) -> impl Iterator<Item = SceneLayer> + '_ {
        self.slots.iter().map(|s| s.renderer.layer())
    }

    /// Layers drawn in the last prepared frame
    pub fn visible_layers(&self) -> impl Iterator<Item = SceneLayer> + '_ {
        self.slots
            .iter()
            .filter(|s| s.visible)
            .map(|s| s.renderer.layer())
    }

    pub fn init_all(&mut self, ctx: &RenderContext) {
        for slot in &mut self.slots {
            slot.renderer.on_init(ctx);
        }
    }

    fn update_visibility(&mut self, scene: &SceneDescription) {
        for slot in &mut self.slots {
            slot.visible = slot.renderer.is_visible(scene);
        }
    }

    pub fn prepare_all(&mut self, ctx: &RenderContext, frame: &FrameInput<'_>) {
        self.update_visibility(frame.scene);
        for slot in self.slots.iter_mut().filter(|s| s.visible) {
            slot.renderer.prepare(ctx, frame);
        }
    }

    pub fn render_all<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>, ctx: &'a RenderContext) {
        for slot in self.slots.iter().filter(|s| s.visible) {
            slot.renderer.render(pass, ctx);
        }
    }

    pub fn destroy_all(&mut self) {
        for mut slot in self.slots.drain(..) {
            slot.renderer.on_destroy();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logo_core::{EditorState, compose_material};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Stub {
        layer: SceneLayer,
        needs_particles: bool,
        destroyed: Arc<AtomicUsize>,
    }

    impl Stub {
        fn new(layer: SceneLayer) -> Self {
            Self {
                layer,
                needs_particles: layer == SceneLayer::Particles,
                destroyed: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    impl SubRenderer for Stub {
        fn layer(&self) -> SceneLayer {
            self.layer
        }

        fn is_visible(&self, scene: &SceneDescription) -> bool {
            !self.needs_particles || scene.particle_count > 0
        }

        fn on_init(&mut self, _ctx: &RenderContext) {}
        fn prepare(&mut self, _ctx: &RenderContext, _frame: &FrameInput<'_>) {}
        fn render<'a>(&'a self, _pass: &mut wgpu::RenderPass<'a>, _ctx: &'a RenderContext) {}

        fn on_destroy(&mut self) {
            self.destroyed.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_layers_sorted_regardless_of_registration_order() {
        let mut registry = RendererRegistry::new();
        registry.register(Stub::new(SceneLayer::Particles));
        registry.register(Stub::new(SceneLayer::Logo));

        let layers: Vec<_> = registry.layers().collect();
        assert_eq!(layers, SceneLayer::ALL.to_vec());
    }

    #[test]
    fn test_register_replaces_same_layer() {
        let mut registry = RendererRegistry::new();
        let first = Stub::new(SceneLayer::Logo);
        let destroyed = first.destroyed.clone();
        registry.register(first);
        registry.register(Stub::new(SceneLayer::Logo));

        assert_eq!(registry.len(), 1);
        assert_eq!(destroyed.load(Ordering::SeqCst), 1);
        assert!(!registry.contains(SceneLayer::Particles));
    }

    #[test]
    fn test_particles_hidden_until_enabled() {
        let mut registry = RendererRegistry::new();
        registry.register(Stub::new(SceneLayer::Logo));
        registry.register(Stub::new(SceneLayer::Particles));

        let mut state = EditorState::default();
        state.particles_enabled = false;
        let scene = SceneDescription::from_state(&state, &compose_material(&state));
        registry.update_visibility(&scene);
        assert_eq!(registry.visible_layers().collect::<Vec<_>>(), vec![SceneLayer::Logo]);

        state.particles_enabled = true;
        state.particle_intensity = 0.5;
        let scene = SceneDescription::from_state(&state, &compose_material(&state));
        registry.update_visibility(&scene);
        assert_eq!(registry.visible_layers().count(), 2);

        registry.destroy_all();
        assert!(registry.is_empty());
    }
}
