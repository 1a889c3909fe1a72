//! GrantScope - Grant portfolio dashboard
//!
//! Desktop front-end over the `grantscope` library.

mod gui;

use anyhow::Context;
use eframe::egui;
use grantscope::config::{AppConfig, CONFIG_FILE};
use gui::GrantScopeApp;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> anyhow::Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let config = AppConfig::load(Path::new(CONFIG_FILE)).context("loading configuration")?;
    info!(source = %config.source, agent = %config.target_agent, "startup");

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1100.0, 700.0])
            .with_title("GrantScope"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "GrantScope",
        options,
        Box::new(|cc| Ok(Box::new(GrantScopeApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))
}
