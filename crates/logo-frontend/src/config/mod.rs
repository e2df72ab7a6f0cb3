//! Application configuration module
//!
//! User preferences that survive a restart: renderer backend, export
//! defaults and UI settings. The logo being edited is never persisted.

mod manager;

pub use manager::{ConfigError, ConfigManager, SharedConfig, create_shared_config};

use logo_core::ExportResolution;
use serde::{Deserialize, Serialize};

/// Which wgpu backends to request at startup
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum BackendPreference {
    /// Modern backends with GL as fallback
    #[default]
    Auto,
    /// Vulkan, Metal, DX12 or WebGPU only
    Modern,
    /// OpenGL / WebGL2 only
    Legacy,
}

impl BackendPreference {
    pub const ALL: [BackendPreference; 3] = [
        BackendPreference::Auto,
        BackendPreference::Modern,
        BackendPreference::Legacy,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BackendPreference::Auto => "Auto",
            BackendPreference::Modern => "Modern",
            BackendPreference::Legacy => "Legacy (GL)",
        }
    }

    pub fn backends(&self) -> wgpu::Backends {
        match self {
            BackendPreference::Auto => wgpu::Backends::PRIMARY | wgpu::Backends::GL,
            BackendPreference::Modern => wgpu::Backends::PRIMARY,
            BackendPreference::Legacy => wgpu::Backends::GL,
        }
    }
}

/// Renderer preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderSettings {
    pub backend: BackendPreference,
    /// 4x multisampling, ignored on GL
    pub msaa: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            backend: BackendPreference::Auto,
            msaa: true,
        }
    }
}

impl RenderSettings {
    /// MSAA only when the adapter is not a GL one
    pub fn msaa_for(&self, backend: wgpu::Backend) -> bool {
        self.msaa && backend != wgpu::Backend::Gl
    }
}

/// Export preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ExportConfig {
    /// Resolution preselected in the export section
    pub default_resolution: ExportResolution,
}

/// UI theme
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum UiTheme {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    pub theme: UiTheme,
    /// egui zoom factor
    pub scale: f32,
}

impl UiConfig {
    pub const SCALE_RANGE: std::ops::RangeInclusive<f32> = 0.75..=1.5;

    /// Hand-edited files may carry any number
    pub fn effective_scale(&self) -> f32 {
        if self.scale.is_finite() {
            self.scale.clamp(*Self::SCALE_RANGE.start(), *Self::SCALE_RANGE.end())
        } else {
            1.0
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: UiTheme::Dark,
            scale: 1.0,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppConfig {
    /// Configuration format version
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub renderer: RenderSettings,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl AppConfig {
    /// Current configuration version
    pub const CURRENT_VERSION: u32 = 1;

    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let config: AppConfig = ron::from_str("(version: 1, ui: (theme: Light))")
            .expect("partial config parses");
        assert_eq!(config.ui.theme, UiTheme::Light);
        assert_eq!(config.ui.scale, 1.0);
        assert_eq!(config.renderer, RenderSettings::default());
        assert_eq!(config.export.default_resolution, ExportResolution::Hd1080);
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = AppConfig::new();
        config.renderer.backend = BackendPreference::Legacy;
        config.export.default_resolution = ExportResolution::Uhd4k;

        let text = ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::default()).unwrap();
        let parsed: AppConfig = ron::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_scale_is_clamped() {
        let mut ui = UiConfig::default();
        ui.scale = 4.0;
        assert_eq!(ui.effective_scale(), 1.5);
        ui.scale = f32::NAN;
        assert_eq!(ui.effective_scale(), 1.0);
    }

    #[test]
    fn test_msaa_is_off_on_gl() {
        let settings = RenderSettings::default();
        assert!(settings.msaa_for(wgpu::Backend::Vulkan));
        assert!(!settings.msaa_for(wgpu::Backend::Gl));
    }

    #[test]
    fn test_backend_preferences() {
        assert_eq!(BackendPreference::Legacy.backends(), wgpu::Backends::GL);
        assert!(BackendPreference::Auto.backends().contains(wgpu::Backends::GL));
        assert!(!BackendPreference::Modern.backends().contains(wgpu::Backends::GL));
    }
}
