//! GameSession - the primary public API for playing DreamQuest.
//!
//! Wraps the storyteller, the reducer, localization, and persistence into a
//! single interface. Requests are strictly sequential: one model call is in
//! flight at a time, and a failed call leaves the game state untouched.

use crate::localization::{Language, UiText, SUPPORTED_LANGUAGES};
use crate::persist::{
    delete_save, game_save_path, load_game_or_default, load_settings_or_default, settings_path,
    PersistError, SavedGame, SavedSettings,
};
use crate::reducer::{reduce, GameEvent};
use crate::state::{CharacterProfile, GameState, Settings};
use crate::storyteller::{Chapter, CustomStory, Storyteller, StorytellerError};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from GameSession operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Storyteller error: {0}")]
    Storyteller(#[from] StorytellerError),

    #[error("Persistence error: {0}")]
    Persist(#[from] PersistError),

    #[error("A request is already in flight")]
    Busy,

    #[error("No saved game to continue")]
    NoSave,

    #[error("No adventure in progress")]
    NotPlaying,

    #[error("No API key configured - set GEMINI_API_KEY environment variable")]
    NoApiKey,
}

/// Where the session currently is in the game loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Menu,
    Loading,
    Playing,
    GameOver,
}

/// A DreamQuest game session.
///
/// Owns the storyteller, the current game state, user settings, and the
/// active UI string table. All gameplay flows through this type.
pub struct GameSession {
    storyteller: Storyteller,
    state: GameState,
    settings: Settings,
    status: GameStatus,
    language: Language,
    ui_text: UiText,
    save_dir: PathBuf,
}

impl GameSession {
    /// Create a session with an existing storyteller and a fresh state.
    pub fn new(storyteller: Storyteller, save_dir: impl Into<PathBuf>) -> Self {
        Self {
            storyteller,
            state: GameState::default(),
            settings: Settings::default(),
            status: GameStatus::Menu,
            language: Language::default(),
            ui_text: UiText::default(),
            save_dir: save_dir.into(),
        }
    }

    /// Create a session from the environment, restoring any saved game and
    /// settings from the save directory.
    ///
    /// Requires `GEMINI_API_KEY` to be set.
    pub async fn from_env(save_dir: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let storyteller = Storyteller::from_env().map_err(|_| SessionError::NoApiKey)?;
        let save_dir = save_dir.into();

        let state = load_game_or_default(game_save_path(&save_dir)).await;
        let settings = load_settings_or_default(settings_path(&save_dir)).await;

        Ok(Self {
            storyteller,
            state,
            settings,
            status: GameStatus::Menu,
            language: Language::default(),
            ui_text: UiText::default(),
            save_dir,
        })
    }

    /// Whether a mid-adventure save exists to continue from.
    pub fn has_save(&self) -> bool {
        !self.state.story_history.is_empty() && !self.state.story_state.is_game_over
    }

    /// Start a new adventure for the given character.
    ///
    /// Discards any existing save. Unlocked endings carry over. On failure
    /// the session returns to the menu.
    pub async fn new_game(&mut self, character: CharacterProfile) -> Result<(), SessionError> {
        if self.status == GameStatus::Loading {
            return Err(SessionError::Busy);
        }
        self.status = GameStatus::Loading;

        delete_save(game_save_path(&self.save_dir)).await?;
        self.state = reduce(&self.state, &GameEvent::GameStarted { character });

        let chapter = match self
            .storyteller
            .initial_chapter(&self.state.character, self.language.code)
            .await
        {
            Ok(chapter) => chapter,
            Err(err) => {
                self.status = GameStatus::Menu;
                return Err(err.into());
            }
        };

        if let Err(err) = self.commit_chapter(chapter).await {
            self.status = GameStatus::Menu;
            return Err(err);
        }
        Ok(())
    }

    /// Resume the saved adventure.
    pub fn continue_game(&mut self) -> Result<(), SessionError> {
        if self.status == GameStatus::Loading {
            return Err(SessionError::Busy);
        }
        if !self.has_save() {
            return Err(SessionError::NoSave);
        }
        self.status = GameStatus::Playing;
        Ok(())
    }

    /// Apply the player's choice and advance the story.
    ///
    /// Only valid mid-adventure: rejected with `Busy` while a request is in
    /// flight and with `NotPlaying` from the menu or a finished game. On
    /// failure the state is unchanged and play continues from the same scene.
    pub async fn choose(&mut self, choice: &str) -> Result<(), SessionError> {
        match self.status {
            GameStatus::Loading => return Err(SessionError::Busy),
            GameStatus::Menu | GameStatus::GameOver => return Err(SessionError::NotPlaying),
            GameStatus::Playing => {}
        }
        self.status = GameStatus::Loading;

        let chapter = match self
            .storyteller
            .next_chapter(choice, &self.state, self.language.code)
            .await
        {
            Ok(chapter) => chapter,
            Err(err) => {
                self.status = GameStatus::Playing;
                return Err(err.into());
            }
        };

        self.commit_chapter(chapter).await
    }

    /// Return to the main menu, discarding the save. Endings survive.
    pub async fn return_to_menu(&mut self) -> Result<(), SessionError> {
        if self.status == GameStatus::Loading {
            return Err(SessionError::Busy);
        }
        delete_save(game_save_path(&self.save_dir)).await?;
        self.state = reduce(&self.state, &GameEvent::GameReset);
        self.status = GameStatus::Menu;
        Ok(())
    }

    /// Generate a one-off story from a free-form prompt.
    pub async fn custom_story(&mut self, prompt: &str) -> Result<CustomStory, SessionError> {
        if self.status == GameStatus::Loading {
            return Err(SessionError::Busy);
        }
        Ok(self
            .storyteller
            .custom_story(prompt, self.language.code)
            .await?)
    }

    /// Switch the UI language, translating the string table on demand.
    ///
    /// English needs no model call. For other languages a transport failure
    /// leaves the previously active language and table in place and surfaces
    /// the error so the caller can show a notice.
    pub async fn set_language(&mut self, language: Language) -> Result<(), SessionError> {
        if self.status == GameStatus::Loading {
            return Err(SessionError::Busy);
        }
        if language.code == "en" {
            self.language = language;
            self.ui_text = UiText::default();
            return Ok(());
        }

        match self.storyteller.translate_ui(language.code).await {
            Ok(translated) => {
                self.language = language;
                self.ui_text = translated;
                Ok(())
            }
            // Keep whatever table is active; the caller shows the error.
            Err(err) => Err(err.into()),
        }
    }

    /// Update and persist user settings.
    pub async fn update_settings(&mut self, settings: Settings) -> Result<(), SessionError> {
        self.settings = settings.clone();
        SavedSettings::new(settings)
            .save_json(settings_path(&self.save_dir))
            .await?;
        Ok(())
    }

    /// Merge a generated chapter into the state, advance the status machine,
    /// and persist. The status leaves `Loading` even when the save write
    /// fails, so an I/O error never wedges the session behind the busy guard.
    async fn commit_chapter(&mut self, chapter: Chapter) -> Result<(), SessionError> {
        self.state = reduce(
            &self.state,
            &GameEvent::ChapterApplied {
                response: chapter.response,
                image_url: Some(chapter.image_url),
            },
        );
        self.status = if self.state.story_state.is_game_over {
            GameStatus::GameOver
        } else {
            GameStatus::Playing
        };
        self.persist_state().await?;
        Ok(())
    }

    async fn persist_state(&self) -> Result<(), PersistError> {
        SavedGame::new(self.state.clone())
            .save_json(game_save_path(&self.save_dir))
            .await
    }

    /// The current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Where the session is in the game loop.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// The active UI language.
    pub fn language(&self) -> Language {
        self.language
    }

    /// The active UI string table.
    pub fn ui_text(&self) -> &UiText {
        &self.ui_text
    }

    /// The directory saves are written to.
    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    /// Find a supported language by ISO code.
    pub fn find_language(code: &str) -> Option<Language> {
        SUPPORTED_LANGUAGES.iter().copied().find(|l| l.code == code)
    }
}
