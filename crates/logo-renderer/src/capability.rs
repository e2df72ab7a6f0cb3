//! Rendering backend availability and device loss.
//!
//! [`CapabilityGuard`] probes for a modern GPU context first and a legacy
//! GL context second. Probing never propagates failures: probe errors and
//! panics both end in [`Capability::Unavailable`].
//!
//! Once rendering runs, [`ContextLossMonitor`] receives device-lost
//! notifications from wgpu (possibly off the UI thread) and
//! [`ContextState`] turns them into `Available ⇄ ContextLost`.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;

/// Message of a caught panic payload
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Kind of rendering context, in probing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextKind {
    /// Vulkan, Metal, DX12 or WebGPU
    Modern,
    /// OpenGL ES / WebGL2
    Legacy,
}

impl ContextKind {
    pub const PROBE_ORDER: [ContextKind; 2] = [ContextKind::Modern, ContextKind::Legacy];

    pub fn name(&self) -> &'static str {
        match self {
            ContextKind::Modern => "Modern (Vulkan/Metal/DX12/WebGPU)",
            ContextKind::Legacy => "Legacy (OpenGL/WebGL2)",
        }
    }

    pub fn backends(&self) -> wgpu::Backends {
        match self {
            ContextKind::Modern => wgpu::Backends::PRIMARY,
            ContextKind::Legacy => wgpu::Backends::GL,
        }
    }

    pub fn of_backend(backend: wgpu::Backend) -> Option<Self> {
        match backend {
            wgpu::Backend::Vulkan
            | wgpu::Backend::Metal
            | wgpu::Backend::Dx12
            | wgpu::Backend::BrowserWebGpu => Some(ContextKind::Modern),
            wgpu::Backend::Gl => Some(ContextKind::Legacy),
            _ => None,
        }
    }
}

/// Troubleshooting details of an obtained context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendDiagnostics {
    pub kind: ContextKind,
    pub renderer: String,
    pub vendor: String,
    pub backend: String,
    pub max_texture_size: u32,
    pub max_viewport: (u32, u32),
    /// Number of optional features the adapter exposes
    pub extension_count: usize,
}

impl BackendDiagnostics {
    pub fn from_adapter(kind: ContextKind, adapter: &wgpu::Adapter) -> Self {
        let info = adapter.get_info();
        let limits = adapter.limits();
        let max = limits.max_texture_dimension_2d;

        Self {
            kind,
            renderer: info.name,
            vendor: vendor_name(info.vendor),
            backend: format!("{:?}", info.backend),
            max_texture_size: max,
            max_viewport: (max, max),
            extension_count: adapter.features().iter().count(),
        }
    }

    /// Human-readable report, one entry per line
    pub fn report_lines(&self) -> Vec<String> {
        vec![
            format!("Context: {}", self.kind.name()),
            format!("Renderer: {}", self.renderer),
            format!("Vendor: {}", self.vendor),
            format!("Backend: {}", self.backend),
            format!("Max texture size: {}", self.max_texture_size),
            format!(
                "Max viewport: {}×{}",
                self.max_viewport.0, self.max_viewport.1
            ),
            format!("Extensions: {}", self.extension_count),
        ]
    }
}

fn vendor_name(id: u32) -> String {
    match id {
        0x1002 => "AMD".to_string(),
        0x10de => "NVIDIA".to_string(),
        0x8086 => "Intel".to_string(),
        0x106b => "Apple".to_string(),
        0x13b5 => "ARM".to_string(),
        0x5143 => "Qualcomm".to_string(),
        0 => "Unknown".to_string(),
        other => format!("0x{:04x}", other),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    #[error("no graphics adapter found")]
    NoAdapter,

    #[error("{0}")]
    Backend(String),
}

/// Something that can try to obtain a rendering context of a given kind
pub trait ContextProbe {
    /// `Ok(None)` when this kind of context is simply not available
    fn probe(&self, kind: ContextKind) -> Result<Option<BackendDiagnostics>, ProbeError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Capability {
    #[default]
    Unchecked,
    Available(BackendDiagnostics),
    Unavailable { reason: String },
}

impl Capability {
    pub fn is_available(&self) -> bool {
        matches!(self, Capability::Available(_))
    }
}

#[derive(Debug, Default)]
pub struct CapabilityGuard {
    capability: Capability,
}

impl CapabilityGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capability(&self) -> &Capability {
        &self.capability
    }

    /// Probe modern then legacy contexts. Never panics.
    pub fn check(&mut self, probe: &dyn ContextProbe) -> &Capability {
        let mut failures = Vec::new();

        for kind in ContextKind::PROBE_ORDER {
            let result = catch_unwind(AssertUnwindSafe(|| probe.probe(kind)));
            match result {
                Ok(Ok(Some(diagnostics))) => {
                    tracing::info!(
                        "Rendering backend available: {} on {} ({})",
                        diagnostics.renderer,
                        diagnostics.backend,
                        kind.name()
                    );
                    self.capability = Capability::Available(diagnostics);
                    return &self.capability;
                }
                Ok(Ok(None)) => {
                    tracing::debug!("No {} context", kind.name());
                    failures.push(format!("{}: not supported", kind.name()));
                }
                Ok(Err(e)) => {
                    tracing::warn!("Probing {} context failed: {}", kind.name(), e);
                    failures.push(format!("{}: {}", kind.name(), e));
                }
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    tracing::warn!("Probing {} context panicked: {}", kind.name(), message);
                    failures.push(format!("{}: {}", kind.name(), message));
                }
            }
        }

        let reason = failures.join("; ");
        tracing::error!("No rendering backend available: {}", reason);
        self.capability = Capability::Unavailable { reason };
        &self.capability
    }
}

/// Probe answering from an adapter that was already obtained
pub struct AdapterProbe<'a> {
    adapter: Option<&'a wgpu::Adapter>,
}

impl<'a> AdapterProbe<'a> {
    pub fn new(adapter: Option<&'a wgpu::Adapter>) -> Self {
        Self { adapter }
    }
}

impl ContextProbe for AdapterProbe<'_> {
    fn probe(&self, kind: ContextKind) -> Result<Option<BackendDiagnostics>, ProbeError> {
        let adapter = self.adapter.ok_or(ProbeError::NoAdapter)?;
        let backend = adapter.get_info().backend;
        if ContextKind::of_backend(backend) == Some(kind) {
            Ok(Some(BackendDiagnostics::from_adapter(kind, adapter)))
        } else {
            Ok(None)
        }
    }
}

/// Probe enumerating the adapters of a fresh wgpu instance
#[cfg(not(target_arch = "wasm32"))]
pub struct InstanceProbe {
    instance: wgpu::Instance,
}

#[cfg(not(target_arch = "wasm32"))]
impl InstanceProbe {
    pub fn new() -> Self {
        Self {
            instance: wgpu::Instance::new(wgpu::InstanceDescriptor {
                backends: wgpu::Backends::PRIMARY | wgpu::Backends::GL,
                ..Default::default()
            }),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for InstanceProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ContextProbe for InstanceProbe {
    fn probe(&self, kind: ContextKind) -> Result<Option<BackendDiagnostics>, ProbeError> {
        let adapters = self.instance.enumerate_adapters(kind.backends());
        Ok(adapters
            .iter()
            .find(|adapter| adapter.get_info().device_type != wgpu::DeviceType::Cpu)
            .or(adapters.first())
            .map(|adapter| BackendDiagnostics::from_adapter(kind, adapter)))
    }
}

/// A device-lost notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LossEvent {
    pub reason: String,
    pub message: String,
}

/// Collects device-lost notifications for the UI thread
#[derive(Debug, Clone, Default)]
pub struct ContextLossMonitor {
    lost: Arc<Mutex<Option<LossEvent>>>,
}

impl ContextLossMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route `device`'s lost callback into this monitor
    pub fn attach(&self, device: &wgpu::Device) {
        let monitor = self.clone();
        device.set_device_lost_callback(move |reason, message| {
            // Dropping our own device is not a loss
            if matches!(reason, wgpu::DeviceLostReason::Destroyed) {
                return;
            }
            monitor.report_loss(LossEvent {
                reason: format!("{:?}", reason),
                message,
            });
        });
    }

    pub fn report_loss(&self, event: LossEvent) {
        tracing::error!("Rendering device lost: {} ({})", event.reason, event.message);
        *self.lost.lock() = Some(event);
    }

    /// Take the pending loss, if any
    pub fn take_loss(&self) -> Option<LossEvent> {
        self.lost.lock().take()
    }
}

/// Runtime state of a context that started successfully
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ContextState {
    #[default]
    Available,
    ContextLost(LossEvent),
}

impl ContextState {
    pub fn is_lost(&self) -> bool {
        matches!(self, ContextState::ContextLost(_))
    }

    /// Pick up a pending loss. Returns true if the state changed.
    pub fn poll(&mut self, monitor: &ContextLossMonitor) -> bool {
        match monitor.take_loss() {
            Some(event) if !self.is_lost() => {
                *self = ContextState::ContextLost(event);
                true
            }
            _ => false,
        }
    }

    /// Rendering moved to `new_device` or stayed on the old one.
    ///
    /// A lost device never comes back, so only a different device leaves
    /// `ContextLost`. Returns true if the state is `Available` afterwards.
    pub fn restore(&mut self, new_device: bool) -> bool {
        if !self.is_lost() {
            return true;
        }
        if !new_device {
            return false;
        }
        tracing::info!("Rendering context restored on a new device");
        *self = ContextState::Available;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagnostics(kind: ContextKind) -> BackendDiagnostics {
        BackendDiagnostics {
            kind,
            renderer: "Test GPU".to_string(),
            vendor: "Test".to_string(),
            backend: "Gl".to_string(),
            max_texture_size: 4096,
            max_viewport: (4096, 4096),
            extension_count: 3,
        }
    }

    struct ThrowingProbe;

    impl ContextProbe for ThrowingProbe {
        fn probe(&self, _kind: ContextKind) -> Result<Option<BackendDiagnostics>, ProbeError> {
            Err(ProbeError::Backend("context creation failed".into()))
        }
    }

    struct PanickingProbe;

    impl ContextProbe for PanickingProbe {
        fn probe(&self, _kind: ContextKind) -> Result<Option<BackendDiagnostics>, ProbeError> {
            panic!("driver crashed")
        }
    }

    struct LegacyOnlyProbe;

    impl ContextProbe for LegacyOnlyProbe {
        fn probe(&self, kind: ContextKind) -> Result<Option<BackendDiagnostics>, ProbeError> {
            Ok((kind == ContextKind::Legacy).then(|| diagnostics(kind)))
        }
    }

    #[test]
    fn test_throwing_probes_are_unavailable() {
        let mut guard = CapabilityGuard::new();
        assert_eq!(guard.capability(), &Capability::Unchecked);

        match guard.check(&ThrowingProbe) {
            Capability::Unavailable { reason } => {
                assert!(reason.contains("context creation failed"));
                assert!(reason.contains("Modern"));
                assert!(reason.contains("Legacy"));
            }
            other => panic!("expected Unavailable, got {:?}", other),
        }
    }

    #[test]
    fn test_panicking_probes_are_unavailable() {
        let mut guard = CapabilityGuard::new();
        let capability = guard.check(&PanickingProbe);
        assert!(matches!(capability, Capability::Unavailable { reason } if reason.contains("driver crashed")));
    }

    #[test]
    fn test_falls_back_to_legacy() {
        let mut guard = CapabilityGuard::new();
        assert_eq!(
            guard.check(&LegacyOnlyProbe),
            &Capability::Available(diagnostics(ContextKind::Legacy))
        );
    }

    #[test]
    fn test_report_lines() {
        let lines = diagnostics(ContextKind::Modern).report_lines();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[1], "Renderer: Test GPU");
        assert_eq!(lines[5], "Max viewport: 4096×4096");
    }

    #[test]
    fn test_backend_kinds() {
        assert_eq!(
            ContextKind::of_backend(wgpu::Backend::Vulkan),
            Some(ContextKind::Modern)
        );
        assert_eq!(
            ContextKind::of_backend(wgpu::Backend::Gl),
            Some(ContextKind::Legacy)
        );
        assert_eq!(ContextKind::of_backend(wgpu::Backend::Empty), None);
    }

    #[test]
    fn test_missing_adapter_is_unavailable() {
        let mut guard = CapabilityGuard::new();
        let capability = guard.check(&AdapterProbe::new(None));
        assert!(matches!(capability, Capability::Unavailable { reason } if reason.contains("no graphics adapter")));
    }

    #[test]
    fn test_loss_and_restore() {
        let monitor = ContextLossMonitor::new();
        let mut state = ContextState::default();
        assert!(!state.poll(&monitor));

        monitor.report_loss(LossEvent {
            reason: "Unknown".into(),
            message: "GPU reset".into(),
        });
        assert!(state.poll(&monitor));
        assert!(state.is_lost());
        assert!(!state.poll(&monitor));

        // the same device stays lost
        assert!(!state.restore(false));
        assert!(state.is_lost());

        assert!(state.restore(true));
        assert_eq!(state, ContextState::Available);
        assert!(state.restore(false));
    }
}
