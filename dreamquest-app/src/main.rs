//! DreamQuest desktop app.

mod app;
mod images;
mod runtime;
mod screens;
mod worker;

fn main() -> eframe::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 750.0])
            .with_title("DreamQuest"),
        ..Default::default()
    };

    eframe::run_native(
        "DreamQuest",
        options,
        Box::new(|cc| Ok(Box::new(app::DreamQuestApp::new(cc)))),
    )
}
