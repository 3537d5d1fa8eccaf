//! The main gameplay screen: scene, choices, and the status sidebar.

use crate::app::DreamQuestApp;
use crate::worker::WorkerRequest;
use dreamquest_core::state::RelationshipStatus;
use dreamquest_core::GameStatus;

pub fn show(app: &mut DreamQuestApp, ctx: &egui::Context) {
    side_panel(app, ctx);

    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical().show(ui, |ui| {
            scene_image(app, ui);
            ui.add_space(8.0);
            ui.label(app.state.story_state.story_text.clone());
            ui.add_space(12.0);

            if app.busy {
                ui.spinner();
                ui.label(&app.ui_text.loading);
            } else if app.status == GameStatus::GameOver {
                game_over(app, ui);
            } else {
                choices(app, ui);
            }
        });
    });
}

fn side_panel(app: &mut DreamQuestApp, ctx: &egui::Context) {
    egui::SidePanel::right("status")
        .resizable(true)
        .default_width(240.0)
        .show(ctx, |ui| {
            ui.heading(&app.state.character.name);
            ui.label(format!(
                "{} / {}",
                app.state.character.archetype.name(),
                app.state.character.background.name()
            ));
            ui.separator();

            ui.label(format!("{}: {}", app.ui_text.map, app.state.current_location));
            ui.label(format!("{}: {}", app.ui_text.points, app.state.points));
            ui.separator();

            ui.collapsing(app.ui_text.inventory.clone(), |ui| {
                if app.state.inventory.is_empty() {
                    ui.weak("-");
                }
                for item in &app.state.inventory {
                    ui.label(&item.name).on_hover_text(&item.description);
                }
            });

            ui.collapsing(app.ui_text.relationships.clone(), |ui| {
                if app.state.relationships.is_empty() {
                    ui.weak("-");
                }
                for relationship in &app.state.relationships {
                    let marker = match relationship.status {
                        RelationshipStatus::Ally => "+",
                        RelationshipStatus::Neutral => "=",
                        RelationshipStatus::Rival => "-",
                    };
                    ui.label(format!(
                        "{} {} ({})",
                        marker, relationship.name, relationship.score
                    ));
                }
            });

            let unlocked = app
                .state
                .achievements
                .iter()
                .filter(|a| a.unlocked)
                .count();
            ui.label(format!(
                "{}: {}/{}",
                app.ui_text.achievements_unlocked,
                unlocked,
                app.state.achievements.len()
            ));

            ui.separator();
            let can_leave = !app.busy;
            if ui
                .add_enabled(can_leave, egui::Button::new(&app.ui_text.exit_to_menu))
                .clicked()
            {
                app.send(WorkerRequest::ReturnToMenu);
            }
        });
}

fn scene_image(app: &mut DreamQuestApp, ui: &mut egui::Ui) {
    let Some(url) = app.state.story_state.image_url.clone() else {
        return;
    };
    if let Some(texture) = app.images.texture(ui.ctx(), &url) {
        let available = ui.available_width();
        let size = texture.size_vec2();
        let scale = (available / size.x).min(1.0);
        ui.image((texture.id(), size * scale));
    }
}

fn choices(app: &mut DreamQuestApp, ui: &mut egui::Ui) {
    let choices = app.state.story_state.choices.clone();
    for choice in choices {
        let missing_item = choice
            .required_item
            .as_deref()
            .map(|item| !app.state.has_item(item))
            .unwrap_or(false);

        let mut text = egui::RichText::new(&choice.text);
        if choice.is_timed {
            text = text.color(egui::Color32::LIGHT_RED);
        }

        let button = ui.add_enabled(!missing_item, egui::Button::new(text));
        let button = match &choice.required_item {
            Some(item) => button.on_disabled_hover_text(format!("Requires: {item}")),
            None => button,
        };

        if button.clicked() {
            app.send_busy(WorkerRequest::Choice(choice.text.clone()));
        }
    }
}

fn game_over(app: &mut DreamQuestApp, ui: &mut egui::Ui) {
    ui.heading(&app.state.story_state.game_over_text);
    ui.add_space(8.0);

    ui.label(&app.ui_text.share_your_story);
    if ui.button(&app.ui_text.copy_to_clipboard).clicked() {
        ui.ctx().copy_text(share_text(app));
        app.share_copied = true;
    }
    if app.share_copied {
        ui.weak(&app.ui_text.copied);
    }
    ui.add_space(12.0);

    if ui.button(&app.ui_text.play_again).clicked() {
        let character = app.state.character.clone();
        app.start_game(character);
    }
    if ui.button(&app.ui_text.return_to_menu).clicked() {
        app.send(WorkerRequest::ReturnToMenu);
    }
}

fn share_text(app: &DreamQuestApp) -> String {
    format!(
        "{} - \"{}\"\n{} {}. {}: {}",
        app.ui_text.title,
        app.state.story_state.game_over_text,
        app.state.character.name,
        app.state.character.archetype.name(),
        app.ui_text.points,
        app.state.points,
    )
}
