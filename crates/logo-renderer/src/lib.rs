//! Logo Studio Renderer
//!
//! wgpu-based rendering of a logo scene.
//!
//! # Architecture
//!
//! - [`scene::SceneDescription`] - Declarative scene built from the editor state
//! - [`text_mesh`] - Extruded text geometry from TrueType outlines
//! - [`capability`] - Backend probing and device-loss tracking
//! - [`postprocess`] - Bloom stage and the guard that disables it on failure
//! - [`error_scope`] - Non-blocking validation scopes around fallible GPU work
//! - [`plugin::RendererRegistry`] - Layer-ordered scene renderers
//! - [`context::RenderContext`] - GPU context abstraction
//! - [`renderer::LogoRenderer`] - Offscreen renderer driving all of the above
//!
//! # Example
//!
//! ```ignore
//! use logo_renderer::{LogoRenderer, RendererConfig, SceneDescription};
//!
//! let mut renderer = LogoRenderer::new(device, queue, RendererConfig::default());
//! let scene = SceneDescription::from_state(store.state(), store.material());
//!
//! renderer.resize(width, height);
//! renderer.render(&scene);
//! let view = renderer.output_view();
//! ```

pub mod camera;
pub mod capability;
pub mod constants;
pub mod context;
pub mod error_scope;
pub mod light;
pub mod particles;
pub mod pipeline;
pub mod plugin;
pub mod postprocess;
pub mod renderer;
pub mod scene;
pub mod sub_renderers;
pub mod text_mesh;
pub mod traits;
pub mod vertex;

pub use camera::{CameraUniform, OrbitCamera};
pub use capability::{
    AdapterProbe, BackendDiagnostics, Capability, CapabilityGuard, ContextKind,
    ContextLossMonitor, ContextProbe, ContextState, LossEvent, ProbeError,
};
#[cfg(not(target_arch = "wasm32"))]
pub use capability::InstanceProbe;
pub use context::RenderContext;
pub use error_scope::{ErrorWatch, ScopeCheck, ScopeOutcome};
pub use light::{LightRig, LightUniform, light_position};
pub use particles::ParticleField;
pub use plugin::RendererRegistry;
pub use postprocess::{
    BloomSettings, LoadError, PostInputs, PostProcessError, PostProcessGuard, PostProcessState,
};
pub use renderer::{LogoRenderer, PendingCapture, RendererConfig};
pub use scene::{FrameInput, SceneDescription, Turntable};
pub use sub_renderers::{LogoMeshRenderer, ParticleRenderer};
pub use text_mesh::{TextGeometryParams, TextMesh, TextMeshError, TextMesher};
pub use traits::{SceneLayer, SubRenderer};
pub use vertex::{MeshVertex, ParticleInstance};
