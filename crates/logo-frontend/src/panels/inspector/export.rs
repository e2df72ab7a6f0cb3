//! Export options

use egui::Ui;
use logo_core::{ExportRequest, ExportResolution, ImageFormat, ProFeature};

use super::{InspectorSection, SectionContext};
use crate::panels::pro_badge;
use crate::state::{AppAction, ExportActivity};

pub struct ExportSection;

impl InspectorSection for ExportSection {
    fn name(&self) -> &str {
        "Export Options"
    }

    fn ui(&mut self, ui: &mut Ui, ctx: &mut SectionContext) -> bool {
        let mut changed = false;
        let busy = ctx.export_activity.is_busy();

        ui.label("Resolution");
        for resolution in ExportResolution::ALL {
            let entitled = resolution
                .required_feature()
                .is_none_or(|feature| ctx.is_entitled(feature));
            ui.horizontal(|ui| {
                let selected = ctx.export_resolution == resolution;
                if ui
                    .add_enabled(entitled, egui::RadioButton::new(selected, resolution.label()))
                    .clicked()
                    && !selected
                {
                    ctx.pending_actions
                        .push(AppAction::SetExportResolution(resolution));
                    changed = true;
                }
                if !entitled {
                    pro_badge(ui);
                }
            });
        }

        ui.add_space(4.0);
        ui.label("Static Exports");
        ui.horizontal(|ui| {
            for format in [ImageFormat::Png, ImageFormat::Jpg] {
                let request = ExportRequest::Image {
                    format,
                    resolution: ctx.export_resolution,
                };
                if ui
                    .add_enabled(!busy, egui::Button::new(request.label()))
                    .clicked()
                {
                    ctx.pending_actions.push(AppAction::Export(request));
                    changed = true;
                }
            }
            if ui
                .add_enabled(!busy, egui::Button::new(ExportRequest::Vector.label()))
                .clicked()
            {
                ctx.pending_actions
                    .push(AppAction::Export(ExportRequest::Vector));
                changed = true;
            }
        });

        ui.add_space(4.0);
        let video_entitled = ctx.is_entitled(ProFeature::VideoExport);
        ui.horizontal(|ui| {
            ui.label("Animation Export");
            if !video_entitled {
                pro_badge(ui);
            }
        });

        match ctx.export_activity {
            ExportActivity::Recording { progress } => {
                ui.add(
                    egui::ProgressBar::new(progress)
                        .text(format!("Recording… {:.0}%", progress * 100.0)),
                );
                if ui.button("Cancel Recording").clicked() {
                    ctx.pending_actions.push(AppAction::CancelRecording);
                    changed = true;
                }
            }
            ExportActivity::Capturing => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Capturing frame…");
                });
            }
            ExportActivity::Idle => {
                if ui
                    .add_enabled(
                        video_entitled,
                        egui::Button::new("Export Animation (5s WebM)"),
                    )
                    .on_disabled_hover_text("Upgrade to Pro to unlock")
                    .clicked()
                {
                    ctx.pending_actions
                        .push(AppAction::Export(ExportRequest::Video));
                    changed = true;
                }
            }
        }

        changed
    }
}
