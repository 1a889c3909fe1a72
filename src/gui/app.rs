//! GrantScope Main Application
//! Main window with control panel and dashboard viewer.

use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction, StatusTone};
use egui::SidePanel;
use grantscope::{AppConfig, Dashboard, DashboardView, DataLoader, Record, ViewState};
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use tracing::info;

/// CSV loading result from background thread
enum LoadResult {
    Complete { source: String, records: Vec<Record> },
    Error(String),
}

/// Main application window.
pub struct GrantScopeApp {
    config: AppConfig,
    dashboard: Dashboard,
    state: ViewState,
    view: Option<DashboardView>,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl GrantScopeApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let mut app = Self {
            state: config.initial_view(),
            control_panel: ControlPanel::new(config.source.clone()),
            config,
            dashboard: Dashboard::default(),
            view: None,
            chart_viewer: ChartViewer::new(),
            load_rx: None,
            is_loading: false,
        };
        let source = app.config.source.clone();
        app.start_load(source);
        app
    }

    /// Load `source` on a background thread.
    fn start_load(&mut self, source: String) {
        if self.is_loading {
            return;
        }
        self.control_panel.source = source.clone();
        self.control_panel.set_status(StatusTone::Info, "Loading CSV...");
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        thread::spawn(move || {
            let mut loader = DataLoader::new();
            let loaded = loader.load(&source).map(|records| records.len());
            let result = match loaded {
                Ok(_) => LoadResult::Complete {
                    source,
                    records: loader.into_records(),
                },
                Err(e) => LoadResult::Error(e.to_string()),
            };
            let _ = tx.send(result);
        });
    }

    /// Handle CSV file selection
    fn handle_browse_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv", "txt"])
            .pick_file()
        {
            self.start_load(path.to_string_lossy().to_string());
        }
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(LoadResult::Complete { source, records }) => {
                let count = records.len();
                self.dashboard = Dashboard::new(records, self.config.matcher());
                self.control_panel.set_status(
                    StatusTone::Success,
                    &format!("Loaded {} rows from {}.", count, source),
                );
                self.is_loading = false;
                self.refresh_view();
            }
            Ok(LoadResult::Error(err)) => {
                self.control_panel.set_status(
                    StatusTone::Warn,
                    &format!("Could not load CSV. Check the data source path or URL. ({})", err),
                );
                self.is_loading = false;
            }
            Err(std::sync::mpsc::TryRecvError::Empty) => {
                self.load_rx = Some(rx);
            }
            Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                self.is_loading = false;
            }
        }
    }

    /// Recompute every view from the current selection.
    fn refresh_view(&mut self) {
        self.view = if self.dashboard.is_empty() {
            None
        } else {
            Some(self.dashboard.view(&self.state))
        };
        self.control_panel.export_enabled = self.view.is_some();
    }

    /// Write the current view to a JSON file.
    fn handle_export_json(&mut self) {
        let Some(view) = &self.view else {
            self.control_panel
                .set_status(StatusTone::Warn, "Nothing to export");
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name("grantscope_view.json")
            .save_file()
        else {
            return;
        };

        let written = serde_json::to_string_pretty(view)
            .map_err(anyhow::Error::from)
            .and_then(|json| std::fs::write(&path, json).map_err(anyhow::Error::from));
        match written {
            Ok(()) => {
                info!(path = %path.display(), "exported view");
                self.control_panel.set_status(
                    StatusTone::Success,
                    &format!("Exported view to {}", path.display()),
                );
            }
            Err(e) => {
                self.control_panel
                    .set_status(StatusTone::Warn, &format!("Export error: {}", e));
            }
        }
    }
}

impl eframe::App for GrantScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(330.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(
                        ui,
                        &self.state.status,
                        self.state.role,
                        self.is_loading,
                    );

                    match action {
                        ControlPanelAction::Reload => {
                            let source = self.control_panel.source.trim().to_string();
                            self.start_load(source);
                        }
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::SetStatus(status) => {
                            self.state.status = status;
                            self.refresh_view();
                        }
                        ControlPanelAction::SetRole(role) => {
                            self.state.role = role;
                            self.refresh_view();
                        }
                        ControlPanelAction::ExportJson => self.handle_export_json(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Dashboard
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(key) = self.chart_viewer.show(ui, self.view.as_ref()) {
                self.state.sort.toggle(&key);
                self.refresh_view();
            }
        });
    }
}
