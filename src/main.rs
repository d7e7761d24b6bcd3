// Standup Recurrence Application
// Main entry point

use anyhow::{anyhow, Result};
use standup_recurrence::services::settings::{default_settings_path, SettingsService};
use standup_recurrence::ui_egui::RecurrenceDemoApp;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Standup Recurrence editor");

    let settings_service = SettingsService::new(default_settings_path());
    let settings = settings_service.load_or_default();
    log::info!("Using settings from {}", settings_service.path().display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Standup Recurrence")
            .with_inner_size([settings.window_width, settings.window_height])
            .with_min_inner_size([480.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Standup Recurrence",
        options,
        Box::new(move |cc| Ok(Box::new(RecurrenceDemoApp::new(cc, settings_service, settings)))),
    )
    .map_err(|e| anyhow!("Failed to run the editor window: {e}"))
}
