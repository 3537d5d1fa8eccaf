//! Settings: font size, high contrast, narration toggle.

use crate::app::DreamQuestApp;
use crate::screens::back_header;
use crate::worker::WorkerRequest;
use dreamquest_core::state::FontSize;

pub fn show(app: &mut DreamQuestApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let title = app.ui_text.settings.clone();
        back_header(app, ui, &title);

        let mut settings = app.settings;

        ui.label(&app.ui_text.font_size);
        ui.horizontal(|ui| {
            ui.selectable_value(&mut settings.font_size, FontSize::Small, &app.ui_text.small);
            ui.selectable_value(
                &mut settings.font_size,
                FontSize::Medium,
                &app.ui_text.medium,
            );
            ui.selectable_value(&mut settings.font_size, FontSize::Large, &app.ui_text.large);
        });
        ui.add_space(8.0);

        ui.checkbox(&mut settings.high_contrast, &app.ui_text.high_contrast);
        ui.checkbox(&mut settings.narration, &app.ui_text.narration);

        if settings != app.settings {
            app.settings = settings;
            app.send(WorkerRequest::UpdateSettings(settings));
        }
    });
}
