//! Hall of Legends: every ending unlocked across playthroughs.

use crate::app::DreamQuestApp;
use crate::screens::back_header;

pub fn show(app: &mut DreamQuestApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let title = app.ui_text.hall_of_legends.clone();
        back_header(app, ui, &title);

        if app.state.endings_unlocked.is_empty() {
            ui.label(&app.ui_text.no_endings);
            return;
        }

        let endings = app.state.endings_unlocked.clone();
        egui::ScrollArea::vertical().show(ui, |ui| {
            for ending in endings {
                ui.heading(&ending.title);
                if !ending.image_url.is_empty() {
                    if let Some(texture) = app.images.texture(ui.ctx(), &ending.image_url) {
                        let size = texture.size_vec2();
                        let scale = (ui.available_width() / size.x).min(0.5);
                        ui.image((texture.id(), size * scale));
                    }
                }
                ui.label(&ending.text);
                ui.separator();
            }
        });
    });
}
