//! Architecture view: how a logo gets from the editor to the screen and to a file

use logo_core::{BrandPreset, MaterialPreset, StylePreset, resolve_style};

use crate::panels::Panel;
use crate::state::SharedAppState;

/// (stage, what happens)
const PIPELINE: [(&str, &str); 5] = [
    (
        "1. Editor state",
        "Every control writes a partial patch into the editor store. The patch is \
         validated against the field ranges and merged; rejected patches change nothing.",
    ),
    (
        "2. Preset resolution",
        "The selected style, material and background presets are resolved into a \
         material, a light rig and a backdrop. The resolved material is recomputed \
         whenever the state changes.",
    ),
    (
        "3. Scene description",
        "The resolved state becomes a declarative scene: extruded text geometry from font \
         outlines, lights, particles and bloom settings. Pro-only effects are dropped for \
         the Free tier.",
    ),
    (
        "4. GPU rendering",
        "wgpu draws the scene offscreen with multisampling. Bloom runs as a separate \
         post-processing pass that switches itself off for the session if it fails.",
    ),
    (
        "5. Export",
        "Frames are read back from the GPU and encoded as PNG or JPG. SVG is generated \
         from a template, and animations are recorded for five seconds into WebM.",
    ),
];

/// (component, responsibility)
const COMPONENTS: [(&str, &str); 6] = [
    ("logo-core", "Presets, editor store, tier gate and export encoders. No GPU code."),
    ("logo-renderer", "Text meshing, lights, particles, bloom and offscreen rendering."),
    ("Capability guard", "Probes modern then legacy GPU backends and tracks device loss."),
    ("Startup monitor", "Replaces the UI with an error screen if startup fails."),
    ("logo-frontend", "egui editor, export driver, downloads and preferences."),
    ("Tier gate", "Free/Pro switch consulted by effects and exports."),
];

pub struct DocsPanel;

impl DocsPanel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DocsPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for DocsPanel {
    fn name(&self) -> &str {
        "Architecture"
    }

    fn ui(&mut self, ui: &mut egui::Ui, _app_state: &SharedAppState) {
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.heading("Architecture");
            ui.weak("From slider to pixels to file");
            ui.add_space(8.0);

            egui::CollapsingHeader::new("Rendering Pipeline")
                .default_open(true)
                .show(ui, |ui| {
                    for (stage, text) in PIPELINE {
                        ui.strong(stage);
                        ui.label(text);
                        ui.add_space(4.0);
                    }
                });

            egui::CollapsingHeader::new("Components")
                .default_open(true)
                .show(ui, |ui| {
                    egui::Grid::new("components")
                        .num_columns(2)
                        .striped(true)
                        .show(ui, |ui| {
                            for (name, text) in COMPONENTS {
                                ui.monospace(name);
                                ui.label(text);
                                ui.end_row();
                            }
                        });
                });

            egui::CollapsingHeader::new("Style Presets").show(ui, |ui| {
                egui::Grid::new("style_presets")
                    .num_columns(4)
                    .striped(true)
                    .show(ui, |ui| {
                        ui.strong("Style");
                        ui.strong("Metalness");
                        ui.strong("Roughness");
                        ui.strong("Notes");
                        ui.end_row();

                        for style in StylePreset::ALL {
                            let config = resolve_style(style);
                            ui.label(style.name());
                            ui.label(format!("{:.1}", config.metalness));
                            ui.label(format!("{:.1}", config.roughness));
                            let notes = match (config.opacity, config.emissive) {
                                (Some(opacity), _) => format!("see-through ({:.0}%)", opacity * 100.0),
                                (None, Some(_)) => "glows".to_string(),
                                (None, None) => String::new(),
                            };
                            ui.label(notes);
                            ui.end_row();
                        }
                    });
            });

            egui::CollapsingHeader::new("Brand Presets").show(ui, |ui| {
                for preset in BrandPreset::ALL {
                    ui.horizontal(|ui| {
                        ui.strong(preset.name());
                        ui.label(preset.description());
                    });
                }
            });

            egui::CollapsingHeader::new("Material Presets").show(ui, |ui| {
                let names: Vec<&str> = MaterialPreset::ALL.iter().map(|m| m.name()).collect();
                ui.label(names.join(", "));
                ui.weak("A material preset replaces the base color of the selected style.");
            });
        });
    }
}
