//! Top-level application state and the egui frame loop.

use crate::images::ImageCache;
use crate::screens;
use crate::worker::{self, WorkerRequest, WorkerResponse};
use dreamquest_core::localization::{Language, UiText};
use dreamquest_core::state::{
    Archetype, Background, CharacterProfile, FontSize, GameState, Settings,
};
use dreamquest_core::storyteller::CustomStory;
use dreamquest_core::GameStatus;
use std::sync::mpsc::{Receiver, Sender};

/// Which screen is currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Menu,
    CharacterCreation,
    Playing,
    Settings,
    Achievements,
    HallOfLegends,
    StoryBuilder,
}

/// In-progress character creation form.
pub struct CreationForm {
    pub name: String,
    pub archetype: Archetype,
    pub background: Background,
}

impl Default for CreationForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            archetype: Archetype::Warrior,
            background: Background::Noble,
        }
    }
}

/// Story builder form and its latest result.
#[derive(Default)]
pub struct StoryBuilderForm {
    pub prompt: String,
    pub result: Option<CustomStory>,
}

pub struct DreamQuestApp {
    requests: Sender<WorkerRequest>,
    responses: Receiver<WorkerResponse>,

    pub view: View,
    pub busy: bool,
    pub error: Option<String>,

    // Mirror of the worker-owned session, refreshed on every response.
    pub state: GameState,
    pub status: GameStatus,
    pub has_save: bool,
    pub settings: Settings,
    pub language: Language,
    pub ui_text: UiText,

    pub creation: CreationForm,
    pub story_builder: StoryBuilderForm,
    pub share_copied: bool,

    pub images: ImageCache,
}

impl DreamQuestApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let (requests, responses) = worker::spawn();

        Self {
            requests,
            responses,
            view: View::Menu,
            busy: true, // waiting for the initial snapshot
            error: None,
            state: GameState::default(),
            status: GameStatus::Menu,
            has_save: false,
            settings: Settings::default(),
            language: Language::default(),
            ui_text: UiText::default(),
            creation: CreationForm::default(),
            story_builder: StoryBuilderForm::default(),
            share_copied: false,
            images: ImageCache::default(),
        }
    }

    /// Send a request that triggers a model call and mark the UI busy.
    pub fn send_busy(&mut self, request: WorkerRequest) {
        self.busy = true;
        self.error = None;
        let _ = self.requests.send(request);
    }

    /// Send a request that completes locally.
    pub fn send(&mut self, request: WorkerRequest) {
        let _ = self.requests.send(request);
    }

    pub fn start_game(&mut self, character: CharacterProfile) {
        self.share_copied = false;
        self.send_busy(WorkerRequest::StartGame(character));
    }

    fn drain_responses(&mut self) {
        while let Ok(response) = self.responses.try_recv() {
            match response {
                WorkerResponse::StateUpdate {
                    state,
                    status,
                    has_save,
                    settings,
                } => {
                    self.state = *state;
                    self.status = status;
                    self.has_save = has_save;
                    self.settings = settings;
                    self.busy = false;

                    match status {
                        GameStatus::Playing | GameStatus::GameOver => {
                            self.view = View::Playing;
                        }
                        GameStatus::Menu => {
                            if self.view == View::Playing {
                                self.view = View::Menu;
                                self.images.clear();
                            }
                        }
                        GameStatus::Loading => {}
                    }
                }
                WorkerResponse::UiTextUpdate { language, ui_text } => {
                    self.language = language;
                    self.ui_text = *ui_text;
                    self.busy = false;
                }
                WorkerResponse::CustomStoryReady(story) => {
                    self.story_builder.result = Some(story);
                    self.busy = false;
                }
                WorkerResponse::Error(message) => {
                    self.error = Some(message);
                    self.busy = false;
                }
            }
        }
    }

    fn apply_settings(&self, ctx: &egui::Context) {
        let scale = match self.settings.font_size {
            FontSize::Small => 1.0,
            FontSize::Medium => 1.15,
            FontSize::Large => 1.35,
        };
        ctx.set_pixels_per_point(scale);

        let mut visuals = egui::Visuals::dark();
        if self.settings.high_contrast {
            visuals.override_text_color = Some(egui::Color32::WHITE);
            visuals.panel_fill = egui::Color32::BLACK;
            visuals.window_fill = egui::Color32::BLACK;
        }
        ctx.set_visuals(visuals);
    }
}

impl eframe::App for DreamQuestApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_responses();
        self.apply_settings(ctx);

        if self.busy {
            // Keep polling the worker channel while a request is in flight.
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        if let Some(error) = self.error.clone() {
            egui::TopBottomPanel::top("error_banner").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(egui::Color32::LIGHT_RED, &error);
                    if ui.small_button("x").clicked() {
                        self.error = None;
                    }
                });
            });
        }

        match self.view {
            View::Menu => screens::menu::show(self, ctx),
            View::CharacterCreation => screens::character_creation::show(self, ctx),
            View::Playing => screens::game::show(self, ctx),
            View::Settings => screens::settings::show(self, ctx),
            View::Achievements => screens::achievements::show(self, ctx),
            View::HallOfLegends => screens::hall_of_legends::show(self, ctx),
            View::StoryBuilder => screens::story_builder::show(self, ctx),
        }
    }
}

impl Drop for DreamQuestApp {
    fn drop(&mut self) {
        let _ = self.requests.send(WorkerRequest::Shutdown);
    }
}
