//! Story builder: one prompt in, one illustrated scene out.

use crate::app::DreamQuestApp;
use crate::screens::back_header;
use crate::worker::WorkerRequest;

pub fn show(app: &mut DreamQuestApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let title = app.ui_text.create_your_own_story.clone();
        back_header(app, ui, &title);

        ui.add(
            egui::TextEdit::multiline(&mut app.story_builder.prompt)
                .hint_text(app.ui_text.story_prompt.clone())
                .desired_rows(3)
                .desired_width(f32::INFINITY),
        );

        let ready = !app.story_builder.prompt.trim().is_empty() && !app.busy;
        if ui
            .add_enabled(ready, egui::Button::new(&app.ui_text.generate))
            .clicked()
        {
            let prompt = app.story_builder.prompt.trim().to_string();
            app.story_builder.result = None;
            app.send_busy(WorkerRequest::GenerateCustomStory(prompt));
        }

        if app.busy {
            ui.spinner();
            ui.label(&app.ui_text.loading);
        }

        if let Some(story) = app.story_builder.result.clone() {
            ui.separator();
            if let Some(texture) = app.images.texture(ui.ctx(), &story.image_url) {
                let size = texture.size_vec2();
                let scale = (ui.available_width() / size.x).min(1.0);
                ui.image((texture.id(), size * scale));
            }
            ui.add_space(8.0);
            ui.label(&story.story_text);
        }
    });
}
