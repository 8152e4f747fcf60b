mod app;
mod ui;
mod viewport;

// Re-export library modules so that `crate::state`, `crate::asset`, etc.
// resolve to the lib crate types everywhere in the binary.
pub use ikarus_gui_lib::asset;
pub use ikarus_gui_lib::scene;
pub use ikarus_gui_lib::state;

use app::StorefrontApp;
use state::AppSettings;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ikarus_gui=info,ikarus_gui_lib=info".into()),
        )
        .init();

    let settings = AppSettings::load();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Ikarus 3D")
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([360.0, 480.0]),
        multisampling: if settings.viewport.antialiasing { 4 } else { 0 },
        depth_buffer: 24,
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "ikarus-gui",
        native_options,
        Box::new(move |cc| Ok(Box::new(StorefrontApp::new(cc, settings)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}
