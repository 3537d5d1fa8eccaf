//! Background worker that owns the game session.
//!
//! The UI thread never blocks on the network. All session operations run on
//! a dedicated worker thread that drives the shared tokio runtime, and the
//! UI communicates with it over plain channels. Requests are handled one at
//! a time, which keeps model calls strictly sequential.

use crate::runtime::RUNTIME;
use dreamquest_core::localization::{Language, UiText};
use dreamquest_core::persist;
use dreamquest_core::state::{CharacterProfile, GameState, Settings};
use dreamquest_core::storyteller::CustomStory;
use dreamquest_core::{GameSession, GameStatus};
use std::sync::mpsc::{Receiver, Sender};

/// Request sent from the UI to the worker.
#[derive(Debug)]
pub enum WorkerRequest {
    /// Start a new adventure for the given character.
    StartGame(CharacterProfile),
    /// Apply the player's choice.
    Choice(String),
    /// Resume the saved adventure.
    ContinueGame,
    /// Return to the main menu, discarding the save.
    ReturnToMenu,
    /// Switch the UI language.
    SetLanguage(Language),
    /// Persist new settings.
    UpdateSettings(Settings),
    /// Generate a one-off story from a free-form prompt.
    GenerateCustomStory(String),
    /// Shut the worker down.
    Shutdown,
}

/// Response sent from the worker to the UI.
#[derive(Debug)]
pub enum WorkerResponse {
    /// Fresh snapshot of the session for rendering.
    StateUpdate {
        state: Box<GameState>,
        status: GameStatus,
        has_save: bool,
        settings: Settings,
    },
    /// The UI string table changed.
    UiTextUpdate {
        language: Language,
        ui_text: Box<UiText>,
    },
    /// A custom story finished generating.
    CustomStoryReady(CustomStory),
    /// An operation failed. The session state is unchanged.
    Error(String),
}

/// Spawn the worker thread and return its channel endpoints.
pub fn spawn() -> (Sender<WorkerRequest>, Receiver<WorkerResponse>) {
    let (request_tx, request_rx) = std::sync::mpsc::channel();
    let (response_tx, response_rx) = std::sync::mpsc::channel();

    std::thread::spawn(move || run(request_rx, response_tx));

    (request_tx, response_rx)
}

fn run(requests: Receiver<WorkerRequest>, responses: Sender<WorkerResponse>) {
    let mut session = match RUNTIME.block_on(GameSession::from_env(persist::data_dir())) {
        Ok(session) => session,
        Err(err) => {
            let _ = responses.send(WorkerResponse::Error(err.to_string()));
            return;
        }
    };

    // Initial snapshot so the menu knows whether a save exists.
    send_state(&responses, &session);

    while let Ok(request) = requests.recv() {
        match request {
            WorkerRequest::StartGame(character) => {
                if let Err(err) = RUNTIME.block_on(session.new_game(character)) {
                    let _ = responses.send(WorkerResponse::Error(err.to_string()));
                }
                send_state(&responses, &session);
            }
            WorkerRequest::Choice(text) => {
                if let Err(err) = RUNTIME.block_on(session.choose(&text)) {
                    let _ = responses.send(WorkerResponse::Error(err.to_string()));
                }
                send_state(&responses, &session);
            }
            WorkerRequest::ContinueGame => {
                if let Err(err) = session.continue_game() {
                    let _ = responses.send(WorkerResponse::Error(err.to_string()));
                }
                send_state(&responses, &session);
            }
            WorkerRequest::ReturnToMenu => {
                if let Err(err) = RUNTIME.block_on(session.return_to_menu()) {
                    let _ = responses.send(WorkerResponse::Error(err.to_string()));
                }
                send_state(&responses, &session);
            }
            WorkerRequest::SetLanguage(language) => {
                if let Err(err) = RUNTIME.block_on(session.set_language(language)) {
                    let _ = responses.send(WorkerResponse::Error(err.to_string()));
                }
                let _ = responses.send(WorkerResponse::UiTextUpdate {
                    language: session.language(),
                    ui_text: Box::new(session.ui_text().clone()),
                });
            }
            WorkerRequest::UpdateSettings(settings) => {
                if let Err(err) = RUNTIME.block_on(session.update_settings(settings)) {
                    let _ = responses.send(WorkerResponse::Error(err.to_string()));
                }
                send_state(&responses, &session);
            }
            WorkerRequest::GenerateCustomStory(prompt) => {
                match RUNTIME.block_on(session.custom_story(&prompt)) {
                    Ok(story) => {
                        let _ = responses.send(WorkerResponse::CustomStoryReady(story));
                    }
                    Err(err) => {
                        let _ = responses.send(WorkerResponse::Error(err.to_string()));
                    }
                }
            }
            WorkerRequest::Shutdown => break,
        }
    }
}

fn send_state(responses: &Sender<WorkerResponse>, session: &GameSession) {
    let _ = responses.send(WorkerResponse::StateUpdate {
        state: Box::new(session.state().clone()),
        status: session.status(),
        has_save: session.has_save(),
        settings: *session.settings(),
    });
}
