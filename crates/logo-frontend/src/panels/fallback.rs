//! Full-window error screen shown when startup failed

use logo_renderer::Capability;

use crate::startup::StartupFailure;

/// What the user asked for on the fallback screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackAction {
    Reload,
    /// Drop stored site data first
    ClearCacheAndReload,
}

const RECOVERY_STEPS: [&str; 4] = [
    "Reload the page or restart the application",
    "Clear the cache and reload",
    "Update your graphics drivers or browser",
    "Try a different browser or enable hardware acceleration",
];

/// Plain-text report for bug reports
fn details_text(failure: &StartupFailure, capability: &Capability) -> String {
    let mut lines = vec![
        format!("Error: {}", failure.message),
        format!(
            "Location: {}",
            failure.location.as_deref().unwrap_or("unknown")
        ),
    ];
    match capability {
        Capability::Available(diagnostics) => lines.extend(diagnostics.report_lines()),
        Capability::Unavailable { reason } => lines.push(format!("GPU: unavailable ({})", reason)),
        Capability::Unchecked => lines.push("GPU: not checked".to_string()),
    }
    lines.join("\n")
}

/// Replace the whole UI with the error screen
pub fn show_fallback_screen(
    ctx: &egui::Context,
    failure: &StartupFailure,
    capability: &Capability,
) -> Option<FallbackAction> {
    let mut action = None;

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(48.0);
            ui.heading(egui::RichText::new("Application Error").color(ui.visuals().error_fg_color));
            ui.label("Logo Studio failed to start.");
            ui.add_space(16.0);
        });

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.strong("Try these steps:");
            for (i, step) in RECOVERY_STEPS.iter().enumerate() {
                ui.label(format!("{}. {}", i + 1, step));
            }
        });

        ui.add_space(8.0);
        egui::CollapsingHeader::new("Technical details")
            .default_open(false)
            .show(ui, |ui| {
                egui::Grid::new("failure_details")
                    .num_columns(2)
                    .show(ui, |ui| {
                        ui.label("Message");
                        ui.monospace(&failure.message);
                        ui.end_row();

                        ui.label("Location");
                        ui.monospace(failure.location.as_deref().unwrap_or("unknown"));
                        ui.end_row();
                    });

                ui.add_space(4.0);
                ui.strong("GPU");
                match capability {
                    Capability::Available(diagnostics) => {
                        for line in diagnostics.report_lines() {
                            ui.monospace(line);
                        }
                    }
                    Capability::Unavailable { reason } => {
                        ui.monospace(format!("Unavailable: {}", reason));
                    }
                    Capability::Unchecked => {
                        ui.weak("Not checked");
                    }
                }

                if ui.button("Copy details").clicked() {
                    ui.ctx().copy_text(details_text(failure, capability));
                }
            });

        ui.add_space(16.0);
        ui.horizontal(|ui| {
            if ui.button("Reload").clicked() {
                action = Some(FallbackAction::Reload);
            }
            if ui.button("Clear cache and reload").clicked() {
                action = Some(FallbackAction::ClearCacheAndReload);
            }
        });
    });

    action
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_details_include_location_and_gpu() {
        let failure = StartupFailure {
            message: "shader compilation failed".to_string(),
            location: Some("renderer.rs:42:7".to_string()),
        };
        let capability = Capability::Unavailable {
            reason: "no graphics adapter found".to_string(),
        };

        let text = details_text(&failure, &capability);
        assert!(text.contains("Error: shader compilation failed"));
        assert!(text.contains("Location: renderer.rs:42:7"));
        assert!(text.contains("no graphics adapter found"));
    }
}
