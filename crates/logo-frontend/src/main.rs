//! Logo Studio main entry point

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    use logo_frontend::config::ConfigManager;
    use logo_frontend::startup::{create_startup_monitor, install_panic_hook};
    use logo_frontend::unavailable;
    use logo_renderer::{Capability, CapabilityGuard, InstanceProbe};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "logo_frontend=debug,logo_renderer=info,logo_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Logo Studio");

    let startup = create_startup_monitor();
    install_panic_hook(startup.clone());

    // Pre-flight: without any adapter there is nothing eframe could start
    let mut guard = CapabilityGuard::new();
    match guard.check(&InstanceProbe::new()) {
        Capability::Available(diagnostics) => {
            for line in diagnostics.report_lines() {
                tracing::info!("{}", line);
            }
        }
        Capability::Unavailable { reason } => {
            tracing::error!("No usable GPU: {}", reason);
            unavailable::show_dialog(reason);
            return Ok(());
        }
        Capability::Unchecked => {}
    }

    let backend = ConfigManager::new().config().renderer.backend;
    tracing::info!("Requesting {} backends", backend.name());

    let wgpu_options = egui_wgpu::WgpuConfiguration {
        wgpu_setup: egui_wgpu::WgpuSetup::CreateNew {
            supported_backends: backend.backends(),
            power_preference: wgpu::PowerPreference::HighPerformance,
            device_descriptor: std::sync::Arc::new(|adapter| wgpu::DeviceDescriptor {
                label: Some("logo-studio device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: wgpu::MemoryHints::default(),
            }),
        },
        ..Default::default()
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([960.0, 640.0])
            .with_title("Logo Studio")
            .with_drag_and_drop(true),
        wgpu_options,
        ..Default::default()
    };

    let result = eframe::run_native(
        "logo-studio",
        native_options,
        Box::new(move |cc| Ok(Box::new(logo_frontend::LogoStudioApp::new(cc, startup)))),
    );
    if let Err(eframe::Error::Wgpu(e)) = &result {
        tracing::error!("Renderer failed to start: {}", e);
        unavailable::show_dialog(&e.to_string());
    }
    result
}

#[cfg(target_arch = "wasm32")]
fn main() {}
