//! Wishlist Dashboard - Published Spreadsheet Viewer
//!
//! Loads a wishlist from a published spreadsheet, summarises it and shows
//! each item as an expandable card.

mod cards;
mod config;
mod data;
mod gui;
mod stats;

use anyhow::anyhow;
use clap::Parser;
use config::AppConfig;
use eframe::egui;
use gui::WishlistApp;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::parse();
    log::info!("Starting {} dashboard", config.title);

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 800.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title(&config.title),
        ..Default::default()
    };

    // Run the application
    let app_name = config.title.clone();
    eframe::run_native(
        &app_name,
        options,
        Box::new(move |cc| Ok(Box::new(WishlistApp::new(cc, config)))),
    )
    .map_err(|e| anyhow!("dashboard exited with error: {}", e))
}
