//! DreamQuest game engine with AI storyteller.
//!
//! This crate provides:
//! - A pure reducer for merging structured story responses into game state
//! - An AI storyteller backed by Gemini, with scene image generation
//! - On-demand UI translation with English fallback
//! - Save/load for game state and settings
//!
//! # Quick Start
//!
//! ```ignore
//! use dreamquest_core::{
//!     persist, Archetype, Background, CharacterProfile, GameSession,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut session = GameSession::from_env(persist::data_dir()).await?;
//!
//!     let character = CharacterProfile {
//!         name: "Ava".to_string(),
//!         archetype: Archetype::Scholar,
//!         background: Background::Orphan,
//!     };
//!     session.new_game(character).await?;
//!
//!     println!("{}", session.state().story_state.story_text);
//!     Ok(())
//! }
//! ```

pub mod localization;
pub mod persist;
pub mod reducer;
pub mod response;
pub mod session;
pub mod state;
pub mod storyteller;
pub mod testing;

// Primary public API
pub use localization::{Language, UiText, SUPPORTED_LANGUAGES};
pub use reducer::{reduce, GameEvent};
pub use response::StoryResponse;
pub use session::{GameSession, GameStatus, SessionError};
pub use state::{
    Archetype, Background, CharacterProfile, GameState, Settings,
};
pub use storyteller::{Chapter, CustomStory, Storyteller, StorytellerConfig, StorytellerError};
pub use testing::{MockStoryteller, TestHarness};
