//! Achievements list with locked/unlocked markers.

use crate::app::DreamQuestApp;
use crate::screens::back_header;
use dreamquest_core::state::achievement_catalog;

pub fn show(app: &mut DreamQuestApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let title = app.ui_text.achievements.clone();
        back_header(app, ui, &title);

        // From the menu there may be no active game; show the full catalog
        // with whatever is unlocked in the current state.
        let achievements = if app.state.achievements.is_empty() {
            achievement_catalog()
        } else {
            app.state.achievements.clone()
        };

        for achievement in achievements {
            ui.horizontal(|ui| {
                let marker = if achievement.unlocked { "[x]" } else { "[ ]" };
                ui.monospace(marker);
                if achievement.unlocked {
                    ui.strong(&achievement.name);
                } else {
                    ui.weak(&achievement.name);
                }
            });
            ui.weak(&achievement.description);
            ui.add_space(6.0);
        }
    });
}
