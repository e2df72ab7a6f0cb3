//! Style, material preset, surface values and custom texture

use egui::Ui;
use logo_core::{EditorPatch, MaterialCustomization, MaterialPreset, StylePreset, ranges};

use super::section::slider_row;
use super::{InspectorSection, SectionContext};
use crate::state::AppAction;

/// Image types accepted as texture
const TEXTURE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "webp", "bmp"];

pub struct MaterialSection;

impl InspectorSection for MaterialSection {
    fn name(&self) -> &str {
        "Material & Style"
    }

    fn ui(&mut self, ui: &mut Ui, ctx: &mut SectionContext) -> bool {
        let mut changed = false;

        ui.label("Style Preset");
        let mut style = ctx.state.style;
        egui::ComboBox::from_id_salt("style_preset")
            .selected_text(style.name())
            .show_ui(ui, |ui| {
                for preset in StylePreset::ALL {
                    ui.selectable_value(&mut style, preset, preset.name());
                }
            });
        if style != ctx.state.style {
            ctx.pending_actions.push(AppAction::SelectStyle(style));
            changed = true;
        }

        ui.label("Material Preset");
        let mut material = ctx.state.material_preset;
        egui::ComboBox::from_id_salt("material_preset")
            .selected_text(material.name())
            .show_ui(ui, |ui| {
                for preset in MaterialPreset::ALL {
                    ui.selectable_value(&mut material, preset, preset.name());
                }
            });
        if material != ctx.state.material_preset {
            ctx.update(EditorPatch {
                material_preset: Some(material),
                ..Default::default()
            });
            changed = true;
        }

        let mut roughness = ctx.state.roughness;
        let mut metalness = ctx.state.metalness;
        let mut patch = EditorPatch::default();
        if slider_row(ui, "Roughness", &mut roughness, ranges::ROUGHNESS) {
            patch.roughness = Some(roughness);
        }
        if slider_row(ui, "Metalness", &mut metalness, ranges::METALNESS) {
            patch.metalness = Some(metalness);
        }
        if !patch.is_empty() {
            ctx.update(patch);
            changed = true;
        }

        if ctx.customization == MaterialCustomization::Customized {
            ui.horizontal(|ui| {
                ui.weak("Customized from the style");
                if ui.small_button("Restore").clicked() {
                    ctx.pending_actions
                        .push(AppAction::SelectStyle(ctx.state.style));
                    changed = true;
                }
            });
        }

        ui.add_space(4.0);
        ui.label("Custom Texture");
        match &ctx.state.custom_texture {
            Some(texture) => {
                ui.horizontal(|ui| {
                    ui.monospace(texture.name());
                    if ui.small_button("✖").on_hover_text("Remove texture").clicked() {
                        ctx.pending_actions.push(AppAction::ClearTexture);
                        changed = true;
                    }
                });
            }
            None => {
                ui.weak("Drop an image onto the window or");
            }
        }
        if ui.button("Upload Texture...").clicked() {
            pick_texture(ctx);
        }

        changed
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn pick_texture(ctx: &mut SectionContext) {
    let Some(path) = rfd::FileDialog::new()
        .add_filter("Images", &TEXTURE_EXTENSIONS)
        .pick_file()
    else {
        return;
    };

    match std::fs::read(&path) {
        Ok(data) => {
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "texture".to_string());
            ctx.pending_actions
                .push(AppAction::LoadTexture { name, data });
        }
        Err(e) => {
            tracing::error!("Failed to read {:?}: {}", path, e);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn pick_texture(ctx: &mut SectionContext) {
    let app_state = ctx.app_state.clone();
    wasm_bindgen_futures::spawn_local(async move {
        if let Some(file) = rfd::AsyncFileDialog::new()
            .add_filter("Images", &TEXTURE_EXTENSIONS)
            .pick_file()
            .await
        {
            let name = file.file_name();
            let data = file.read().await;
            app_state
                .lock()
                .queue_action(AppAction::LoadTexture { name, data });
        }
    });
}
