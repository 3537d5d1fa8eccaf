//! Main menu: start, continue, secondary screens, language selector.

use crate::app::{DreamQuestApp, View};
use crate::worker::WorkerRequest;
use dreamquest_core::localization::SUPPORTED_LANGUAGES;

pub fn show(app: &mut DreamQuestApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.heading(&app.ui_text.title);
            ui.add_space(20.0);

            if app.busy {
                ui.spinner();
                ui.label(&app.ui_text.loading);
                return;
            }

            if ui.button(&app.ui_text.new_game).clicked() {
                app.creation = Default::default();
                app.view = View::CharacterCreation;
            }

            if app.has_save {
                let continued = ui.button(format!(
                    "{} ({}, {} {})",
                    app.ui_text.continue_game,
                    app.state.character.name,
                    app.state.points,
                    app.ui_text.points.to_lowercase(),
                ));
                if continued.clicked() {
                    app.send(WorkerRequest::ContinueGame);
                }
            }

            ui.add_space(10.0);
            if ui.button(&app.ui_text.story_builder).clicked() {
                app.view = View::StoryBuilder;
            }
            if ui.button(&app.ui_text.achievements).clicked() {
                app.view = View::Achievements;
            }
            if ui.button(&app.ui_text.hall_of_legends).clicked() {
                app.view = View::HallOfLegends;
            }
            if ui.button(&app.ui_text.settings).clicked() {
                app.view = View::Settings;
            }

            ui.add_space(20.0);
            language_selector(app, ui);
        });
    });
}

fn language_selector(app: &mut DreamQuestApp, ui: &mut egui::Ui) {
    let mut selected = app.language;
    egui::ComboBox::from_label(app.ui_text.select_language.clone())
        .selected_text(selected.name)
        .show_ui(ui, |ui| {
            for language in SUPPORTED_LANGUAGES {
                ui.selectable_value(&mut selected, language, language.name);
            }
        });

    if selected != app.language {
        app.send_busy(WorkerRequest::SetLanguage(selected));
    }
}
