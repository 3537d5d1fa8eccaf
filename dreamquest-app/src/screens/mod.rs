//! One module per screen. Each exposes `show(app, ctx)`.

pub mod achievements;
pub mod character_creation;
pub mod game;
pub mod hall_of_legends;
pub mod menu;
pub mod settings;
pub mod story_builder;

use crate::app::{DreamQuestApp, View};

/// A small back-to-menu header shared by the secondary screens.
pub fn back_header(app: &mut DreamQuestApp, ui: &mut egui::Ui, title: &str) {
    ui.horizontal(|ui| {
        if ui.button(format!("< {}", app.ui_text.menu)).clicked() {
            app.view = View::Menu;
        }
        ui.heading(title);
    });
    ui.separator();
}
