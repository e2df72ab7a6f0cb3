//! Free vs Pro comparison with the demo tier toggle

use logo_core::Tier;

use crate::panels::Panel;
use crate::state::{AppAction, SharedAppState};

/// (feature, included in Free, included in Pro)
const FEATURES: [(&str, bool, bool); 14] = [
    ("Basic 3D Logo Creation", true, true),
    ("6 Style Presets", true, true),
    ("5 Brand Presets", true, true),
    ("Geometry Controls", true, true),
    ("Material & Lighting", true, true),
    ("Bloom & Rim Light", true, true),
    ("1080p Export (PNG/JPG)", true, true),
    ("SVG Vector Export", true, true),
    ("Particle Effects", false, true),
    ("Depth of Field", false, true),
    ("Motion Blur", false, true),
    ("4K Export", false, true),
    ("Animation Export (Video)", false, true),
    ("Priority Support", false, true),
];

struct Plan {
    tier: Tier,
    price: &'static str,
    tagline: &'static str,
}

const PLANS: [Plan; 2] = [
    Plan {
        tier: Tier::Free,
        price: "$0",
        tagline: "Perfect for getting started",
    },
    Plan {
        tier: Tier::Pro,
        price: "$19",
        tagline: "For professional creators",
    },
];

pub struct PricingPanel;

impl PricingPanel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PricingPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for PricingPanel {
    fn name(&self) -> &str {
        "Pricing"
    }

    fn ui(&mut self, ui: &mut egui::Ui, app_state: &SharedAppState) {
        let current = app_state.lock().tier.tier();
        let mut selected = None;

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Choose Your Plan");
                ui.weak("Start free, upgrade when you need advanced features");
            });
            ui.add_space(12.0);

            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.strong("Demo Mode Toggle");
                    let mut is_pro = current == Tier::Pro;
                    if ui.toggle_value(&mut is_pro, "Pro").changed() {
                        selected = Some(if is_pro { Tier::Pro } else { Tier::Free });
                    }
                    ui.label(if current == Tier::Pro {
                        "Pro Mode Active"
                    } else {
                        "Free Mode Active"
                    });
                });
            });
            ui.add_space(12.0);

            ui.columns(2, |columns| {
                for (column, plan) in columns.iter_mut().zip(PLANS.iter()) {
                    if let Some(tier) = plan_card(column, plan, current) {
                        selected = Some(tier);
                    }
                }
            });

            ui.add_space(12.0);
            egui::CollapsingHeader::new("Monetization Model")
                .default_open(true)
                .show(ui, |ui| {
                    ui.label(
                        "Free Tier: full access to the core logo editor, all style and brand \
                         presets, and 1080p PNG/JPG plus SVG exports.",
                    );
                    ui.label(
                        "Pro Tier ($19/month): particle effects, camera effects, 4K exports \
                         and animation export for video intros.",
                    );
                    ui.label(
                        "Future Expansion: team workspaces, brand kits and additional \
                         export formats.",
                    );
                });
        });

        if let Some(tier) = selected {
            app_state.lock().queue_action(AppAction::SetTier(tier));
        }
    }
}

/// Returns the tier to switch to when the card's button was clicked
fn plan_card(ui: &mut egui::Ui, plan: &Plan, current: Tier) -> Option<Tier> {
    let mut clicked = None;

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.heading(plan.tier.name());
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(plan.price).size(28.0).strong());
            ui.weak("/month");
        });
        ui.weak(plan.tagline);
        ui.separator();

        for (feature, free, pro) in FEATURES {
            let included = match plan.tier {
                Tier::Free => free,
                Tier::Pro => pro,
            };
            let (mark, color) = if included {
                ("✔", egui::Color32::LIGHT_GREEN)
            } else {
                ("✖", ui.visuals().weak_text_color())
            };
            ui.horizontal(|ui| {
                ui.colored_label(color, mark);
                if included {
                    ui.label(feature);
                } else {
                    ui.weak(feature);
                }
            });
        }

        ui.add_space(8.0);
        let label = if plan.tier == current {
            "Current Plan"
        } else if plan.tier == Tier::Free {
            "Switch to Free"
        } else {
            "Upgrade to Pro"
        };
        if ui
            .add_enabled(plan.tier != current, egui::Button::new(label))
            .clicked()
        {
            clicked = Some(plan.tier);
        }
    });

    clicked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_features_are_in_pro() {
        assert!(FEATURES.iter().all(|(_, free, pro)| !free || *pro));
        assert_eq!(FEATURES.iter().filter(|(_, free, _)| !free).count(), 6);
    }
}
