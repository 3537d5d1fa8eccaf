//! Character creation: name, archetype, background.

use crate::app::{DreamQuestApp, View};
use dreamquest_core::state::{Archetype, Background, CharacterProfile};

pub fn show(app: &mut DreamQuestApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(30.0);
            ui.heading(&app.ui_text.create_your_character);
            ui.add_space(20.0);

            ui.label(&app.ui_text.character_name);
            ui.text_edit_singleline(&mut app.creation.name);
            ui.add_space(12.0);

            ui.label(&app.ui_text.select_archetype);
            ui.horizontal(|ui| {
                for archetype in Archetype::ALL {
                    let label = archetype_label(app, archetype);
                    ui.selectable_value(&mut app.creation.archetype, archetype, label);
                }
            });
            ui.add_space(12.0);

            ui.label(&app.ui_text.select_background);
            ui.horizontal(|ui| {
                for background in Background::ALL {
                    let label = background_label(app, background);
                    ui.selectable_value(&mut app.creation.background, background, label);
                }
            });
            ui.add_space(20.0);

            let ready = !app.creation.name.trim().is_empty() && !app.busy;
            if ui
                .add_enabled(ready, egui::Button::new(&app.ui_text.begin_adventure))
                .clicked()
            {
                let character = CharacterProfile {
                    name: app.creation.name.trim().to_string(),
                    archetype: app.creation.archetype,
                    background: app.creation.background,
                };
                app.start_game(character);
            }

            if app.busy {
                ui.add_space(10.0);
                ui.spinner();
                ui.label(&app.ui_text.loading);
            }

            ui.add_space(10.0);
            if ui.button(&app.ui_text.return_to_menu).clicked() {
                app.view = View::Menu;
            }
        });
    });
}

fn archetype_label(app: &DreamQuestApp, archetype: Archetype) -> String {
    match archetype {
        Archetype::Warrior => app.ui_text.warrior.clone(),
        Archetype::Scholar => app.ui_text.scholar.clone(),
        Archetype::Rogue => app.ui_text.rogue.clone(),
    }
}

fn background_label(app: &DreamQuestApp, background: Background) -> String {
    match background {
        Background::Noble => app.ui_text.noble.clone(),
        Background::Orphan => app.ui_text.orphan.clone(),
        Background::Merchant => app.ui_text.merchant.clone(),
    }
}
