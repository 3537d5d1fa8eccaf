//! AI storyteller agent.
//!
//! The `Storyteller` wraps the Gemini client and turns game state into
//! prompts and the model's structured JSON back into typed responses. All
//! calls are strictly sequential request/response: no streaming, no retries,
//! no cancellation. A failed call surfaces an error and changes nothing.

use crate::localization::{translation_schema, UiText};
use crate::response::{
    custom_story_schema, parse_with_fallback, story_schema, CustomStoryResponse, StoryResponse,
};
use crate::state::{CharacterProfile, GameState};
use gemini::{Gemini, ImageRequest, Request};
use thiserror::Error;

/// How many recent history entries go into the continuation prompt.
const HISTORY_WINDOW: usize = 3;

/// Suffix applied to every image prompt for a consistent visual style.
const IMAGE_STYLE: &str = ", cinematic, hyper-detailed, atmospheric, fantasy art";

/// Errors from the storyteller.
#[derive(Debug, Error)]
pub enum StorytellerError {
    #[error("Gemini API error: {0}")]
    Api(#[from] gemini::Error),

    #[error("No API key configured - set GEMINI_API_KEY environment variable")]
    NoApiKey,
}

/// Configuration for the storyteller.
#[derive(Debug, Clone)]
pub struct StorytellerConfig {
    /// Text model override (defaults to the client's model).
    pub model: Option<String>,

    /// Image model override.
    pub image_model: Option<String>,

    /// Maximum tokens for story responses.
    pub max_output_tokens: usize,

    /// Temperature for story generation.
    pub temperature: Option<f32>,
}

impl Default for StorytellerConfig {
    fn default() -> Self {
        Self {
            model: None,
            image_model: None,
            max_output_tokens: 4096,
            temperature: Some(0.85),
        }
    }
}

/// A generated chapter: the structured response plus its scene image.
#[derive(Debug, Clone)]
pub struct Chapter {
    pub response: StoryResponse,
    /// Scene image as a `data:` URL.
    pub image_url: String,
}

/// A single-scene story from the story builder.
#[derive(Debug, Clone)]
pub struct CustomStory {
    pub story_text: String,
    pub image_url: String,
}

/// The AI storyteller.
pub struct Storyteller {
    client: Gemini,
    config: StorytellerConfig,
}

impl Storyteller {
    /// Create a new storyteller with an API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Gemini::new(api_key),
            config: StorytellerConfig::default(),
        }
    }

    /// Create a storyteller from the GEMINI_API_KEY environment variable.
    pub fn from_env() -> Result<Self, StorytellerError> {
        let client = Gemini::from_env().map_err(|_| StorytellerError::NoApiKey)?;
        Ok(Self {
            client,
            config: StorytellerConfig::default(),
        })
    }

    /// Configure the storyteller.
    pub fn with_config(mut self, config: StorytellerConfig) -> Self {
        self.config = config;
        self
    }

    /// Generate the opening chapter for a freshly created character.
    pub async fn initial_chapter(
        &self,
        character: &CharacterProfile,
        language: &str,
    ) -> Result<Chapter, StorytellerError> {
        let prompt = build_initial_prompt(character, language);
        self.generate_chapter(&prompt).await
    }

    /// Generate the next chapter from the player's choice and current state.
    pub async fn next_chapter(
        &self,
        choice: &str,
        state: &GameState,
        language: &str,
    ) -> Result<Chapter, StorytellerError> {
        let prompt = build_continue_prompt(choice, state, language);
        self.generate_chapter(&prompt).await
    }

    /// Generate a single-scene story from a free-form user prompt.
    pub async fn custom_story(
        &self,
        user_prompt: &str,
        language: &str,
    ) -> Result<CustomStory, StorytellerError> {
        let prompt = build_custom_story_prompt(user_prompt, language);

        let request = self
            .base_request(prompt)
            .with_response_schema(custom_story_schema());

        let response = self.client.generate(request).await?;
        let story: CustomStoryResponse =
            parse_with_fallback(&response.text, CustomStoryResponse::fallback());

        let image_url = self.scene_image(&story.image_prompt).await?;

        Ok(CustomStory {
            story_text: story.story_text,
            image_url,
        })
    }

    /// Translate the full UI string table into the given language.
    ///
    /// Parse failures fall back to the English table; only transport-level
    /// failures surface as errors.
    pub async fn translate_ui(&self, language: &str) -> Result<UiText, StorytellerError> {
        let base = UiText::default();
        let table = serde_json::to_string_pretty(&base).expect("UiText serializes");
        let prompt = format!(
            "Translate the values of the following JSON object into the language \
             with the ISO 639-1 code \"{language}\". Maintain the exact JSON structure \
             and keys. Output ONLY the raw JSON object.\n{table}"
        );

        let mut request = Request::new(prompt).with_response_schema(translation_schema());
        if let Some(ref model) = self.config.model {
            request = request.with_model(model);
        }

        let response = self.client.generate(request).await?;
        Ok(parse_with_fallback(&response.text, base))
    }

    async fn generate_chapter(&self, prompt: &str) -> Result<Chapter, StorytellerError> {
        let request = self
            .base_request(prompt.to_string())
            .with_response_schema(story_schema());

        let response = self.client.generate(request).await?;
        let story: StoryResponse = parse_with_fallback(&response.text, StoryResponse::fallback());

        let image_url = self.scene_image(&story.image_prompt).await?;

        Ok(Chapter {
            response: story,
            image_url,
        })
    }

    /// Generate the scene image for a chapter, returned as a data URL.
    async fn scene_image(&self, image_prompt: &str) -> Result<String, StorytellerError> {
        let mut request = ImageRequest::new(format!("{image_prompt}{IMAGE_STYLE}"));
        if let Some(ref model) = self.config.image_model {
            request = request.with_model(model);
        }

        let image = self.client.generate_image(request).await?;
        Ok(image.to_data_url())
    }

    fn base_request(&self, prompt: String) -> Request {
        let mut request = Request::new(prompt).with_max_output_tokens(self.config.max_output_tokens);
        if let Some(ref model) = self.config.model {
            request = request.with_model(model);
        }
        if let Some(temperature) = self.config.temperature {
            request = request.with_temperature(temperature);
        }
        request
    }
}

fn build_initial_prompt(character: &CharacterProfile, language: &str) -> String {
    let mut prompt = String::new();
    prompt.push_str(&format!(
        "You are a master storyteller for a dynamic text adventure game. The \
         user's language is {language}. All your text output must be in this language.\n"
    ));
    prompt.push_str("PLAYER CHARACTER:\n");
    prompt.push_str(&format!("- Name: {}\n", character.name));
    prompt.push_str(&format!("- Archetype: {}\n", character.archetype.name()));
    prompt.push_str(&format!("- Background: {}\n\n", character.background.name()));
    prompt.push_str(include_str!("prompts/initial_scene.txt"));
    prompt
}

fn build_continue_prompt(choice: &str, state: &GameState, language: &str) -> String {
    let history_summary = state
        .story_history
        .iter()
        .rev()
        .take(HISTORY_WINDOW)
        .rev()
        .cloned()
        .collect::<Vec<_>>()
        .join("\n---\n");

    let inventory_names: Vec<&str> = state.inventory.iter().map(|i| i.name.as_str()).collect();

    let ending_titles = if state.endings_unlocked.is_empty() {
        "None".to_string()
    } else {
        state
            .endings_unlocked
            .iter()
            .map(|e| e.title.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut prompt = String::new();
    prompt.push_str(&format!(
        "You are a master storyteller continuing a text adventure. The user's \
         language is {language}. All text must be in this language.\n\n"
    ));
    prompt.push_str("CURRENT GAME STATE:\n");
    prompt.push_str(&format!(
        "- Player Character: {}\n",
        serde_json::to_string(&state.character).unwrap_or_default()
    ));
    prompt.push_str(&format!(
        "- Inventory: {}\n",
        serde_json::to_string(&inventory_names).unwrap_or_default()
    ));
    prompt.push_str(&format!(
        "- Relationships: {}\n",
        serde_json::to_string(&state.relationships).unwrap_or_default()
    ));
    prompt.push_str(&format!("- Story So Far (summary): {history_summary}\n"));
    prompt.push_str(&format!("- Previously Unlocked Endings: {ending_titles}\n\n"));
    prompt.push_str(&format!("PLAYER'S LAST CHOICE: \"{choice}\"\n\n"));
    prompt.push_str(include_str!("prompts/continue_scene.txt"));
    prompt
}

fn build_custom_story_prompt(user_prompt: &str, language: &str) -> String {
    let mut prompt = String::new();
    prompt.push_str(&format!(
        "You are a creative storyteller. A user wants you to create a short, \
         single-scene story based on their prompt. The user's language is \
         {language}. Your response must be in this language.\n"
    ));
    prompt.push_str(&format!("USER PROMPT: \"{user_prompt}\"\n\n"));
    prompt.push_str(include_str!("prompts/story_builder.txt"));
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Archetype, Background, Ending, Item};

    fn ava() -> CharacterProfile {
        CharacterProfile {
            name: "Ava".to_string(),
            archetype: Archetype::Scholar,
            background: Background::Orphan,
        }
    }

    #[test]
    fn test_initial_prompt_contents() {
        let prompt = build_initial_prompt(&ava(), "en");
        assert!(prompt.contains("Name: Ava"));
        assert!(prompt.contains("Archetype: Scholar"));
        assert!(prompt.contains("Background: Orphan"));
        assert!(prompt.contains("first_step"));
        assert!(prompt.contains("island jungle"));
    }

    #[test]
    fn test_continue_prompt_includes_state() {
        let mut state = GameState::default();
        state.character = ava();
        state.inventory.push(Item {
            name: "Machete".to_string(),
            description: "A worn blade.".to_string(),
        });
        state.story_history = vec![
            "One.".to_string(),
            "Two.".to_string(),
            "Three.".to_string(),
            "Four.".to_string(),
        ];
        state.endings_unlocked.push(Ending {
            title: "The Fallen Tower".to_string(),
            text: String::new(),
            image_url: String::new(),
        });

        let prompt = build_continue_prompt("Press on", &state, "en");
        assert!(prompt.contains("\"Machete\""));
        assert!(prompt.contains("The Fallen Tower"));
        assert!(prompt.contains("PLAYER'S LAST CHOICE: \"Press on\""));
        // Only the last three history entries are summarized.
        assert!(!prompt.contains("One."));
        assert!(prompt.contains("Two.\n---\nThree.\n---\nFour."));
    }

    #[test]
    fn test_continue_prompt_no_endings() {
        let prompt = build_continue_prompt("Look around", &GameState::default(), "de");
        assert!(prompt.contains("Previously Unlocked Endings: None"));
        assert!(prompt.contains("language is de"));
    }

    #[test]
    fn test_custom_story_prompt() {
        let prompt = build_custom_story_prompt("a clockwork dragon", "fr");
        assert!(prompt.contains("USER PROMPT: \"a clockwork dragon\""));
        assert!(prompt.contains("imagePrompt"));
    }

    #[test]
    fn test_config_defaults() {
        let config = StorytellerConfig::default();
        assert_eq!(config.max_output_tokens, 4096);
        assert_eq!(config.temperature, Some(0.85));
        assert!(config.model.is_none());
    }
}
