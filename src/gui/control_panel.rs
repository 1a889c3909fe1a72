//! Control Panel Widget
//! Left side panel with data source, filter buttons and status line.

use egui::{Color32, RichText};
use grantscope::data::{RoleFilter, StatusFilter};

/// Status choices offered as buttons.
const STATUS_CHOICES: [&str; 3] = ["All", "Active", "Closed"];
const ROLE_CHOICES: [RoleFilter; 3] = [RoleFilter::All, RoleFilter::Solo, RoleFilter::Shared];

/// How the status line is colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Info,
    Success,
    Warn,
}

impl StatusTone {
    fn color(self) -> Color32 {
        match self {
            StatusTone::Info => Color32::GRAY,
            StatusTone::Success => Color32::from_rgb(40, 167, 69),
            StatusTone::Warn => Color32::from_rgb(220, 53, 69),
        }
    }
}

/// Left side control panel.
pub struct ControlPanel {
    pub source: String,
    pub status: String,
    pub tone: StatusTone,
    pub export_enabled: bool,
}

impl ControlPanel {
    pub fn new(source: String) -> Self {
        Self {
            source,
            status: "Ready".to_string(),
            tone: StatusTone::Info,
            export_enabled: false,
        }
    }

    /// Draw the control panel. `current_*` are only read to highlight buttons.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        current_status: &StatusFilter,
        current_role: RoleFilter,
        is_loading: bool,
    ) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🌍 GrantScope")
                    .size(22.0)
                    .color(Color32::from_rgb(31, 111, 235)),
            );
            ui.label(
                RichText::new("Grant portfolio dashboard")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.add(egui::TextEdit::singleline(&mut self.source).desired_width(f32::INFINITY));
                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    ui.add_enabled_ui(!is_loading, |ui| {
                        if ui.button("🔄 Load").clicked() {
                            action = ControlPanelAction::Reload;
                        }
                        if ui.button("📂 Browse").clicked() {
                            action = ControlPanelAction::BrowseCsv;
                        }
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Filter Section =====
        ui.label(RichText::new("📌 Grant Status").size(14.0).strong());
        ui.add_space(5.0);
        ui.horizontal(|ui| {
            for label in STATUS_CHOICES {
                let choice = StatusFilter::from(label);
                if ui
                    .selectable_label(*current_status == choice, label)
                    .clicked()
                {
                    action = ControlPanelAction::SetStatus(choice);
                }
            }
        });

        ui.add_space(10.0);

        // ===== Role Filter Section =====
        ui.label(RichText::new("🤝 Agent Role").size(14.0).strong());
        ui.add_space(5.0);
        ui.horizontal(|ui| {
            for choice in ROLE_CHOICES {
                if ui
                    .selectable_label(current_role == choice, choice.to_string())
                    .clicked()
                {
                    action = ControlPanelAction::SetRole(choice);
                }
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled, |ui| {
                let button = egui::Button::new(RichText::new("💾 Export View (JSON)").size(14.0))
                    .min_size(egui::vec2(180.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportJson;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Line =====
        if is_loading {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(RichText::new(&self.status).size(11.0).color(self.tone.color()));
            });
        } else {
            ui.label(RichText::new(&self.status).size(11.0).color(self.tone.color()));
        }

        action
    }

    pub fn set_status(&mut self, tone: StatusTone, status: &str) {
        self.tone = tone;
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    Reload,
    BrowseCsv,
    SetStatus(StatusFilter),
    SetRole(RoleFilter),
    ExportJson,
}
