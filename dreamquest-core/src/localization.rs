//! UI string table and on-demand translation support.
//!
//! The English table is the source of truth. Switching to another language
//! asks the model for a full translation constrained to the exact key set;
//! any failure falls back to English so the UI always has a complete table.

use serde::{Deserialize, Serialize};
use serde_json::json;

/// A selectable UI language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// ISO 639-1 code.
    pub code: &'static str,
    /// Native display name.
    pub name: &'static str,
}

/// Languages offered in the language selector.
pub const SUPPORTED_LANGUAGES: [Language; 6] = [
    Language { code: "en", name: "English" },
    Language { code: "es", name: "Español" },
    Language { code: "fr", name: "Français" },
    Language { code: "de", name: "Deutsch" },
    Language { code: "ja", name: "日本語" },
    Language { code: "hi", name: "हिन्दी" },
];

impl Default for Language {
    fn default() -> Self {
        SUPPORTED_LANGUAGES[0]
    }
}

/// The complete UI string table. `Default` is the English table; translations
/// replace every value while keeping the key set fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiText {
    pub title: String,
    pub new_game: String,
    #[serde(rename = "continue")]
    pub continue_game: String,
    pub achievements: String,
    pub settings: String,
    pub loading: String,
    pub play_again: String,
    pub return_to_menu: String,
    pub select_language: String,
    // Character creation
    pub create_your_character: String,
    pub character_name: String,
    pub select_archetype: String,
    pub warrior: String,
    pub scholar: String,
    pub rogue: String,
    pub select_background: String,
    pub noble: String,
    pub orphan: String,
    pub merchant: String,
    pub begin_adventure: String,
    // Game UI
    pub inventory: String,
    pub relationships: String,
    pub map: String,
    pub achievements_unlocked: String,
    pub points: String,
    pub hall_of_legends: String,
    pub story_builder: String,
    pub resume: String,
    pub exit_to_menu: String,
    pub menu: String,
    // Settings
    pub font_size: String,
    pub small: String,
    pub medium: String,
    pub large: String,
    pub high_contrast: String,
    pub narration: String,
    pub on: String,
    pub off: String,
    // Story builder
    pub create_your_own_story: String,
    pub story_prompt: String,
    pub generate: String,
    // Hall of legends
    pub no_endings: String,
    // Share
    pub share_your_story: String,
    pub copy_to_clipboard: String,
    pub copied: String,
}

impl Default for UiText {
    fn default() -> Self {
        Self {
            title: "DreamQuest".into(),
            new_game: "New Game".into(),
            continue_game: "Continue".into(),
            achievements: "Achievements".into(),
            settings: "Settings".into(),
            loading: "Generating your adventure...".into(),
            play_again: "Play Again".into(),
            return_to_menu: "Return to Menu".into(),
            select_language: "Select Language".into(),
            create_your_character: "Create Your Character".into(),
            character_name: "Enter Your Name".into(),
            select_archetype: "Select Archetype".into(),
            warrior: "Warrior".into(),
            scholar: "Scholar".into(),
            rogue: "Rogue".into(),
            select_background: "Select Background".into(),
            noble: "Noble".into(),
            orphan: "Orphan".into(),
            merchant: "Merchant".into(),
            begin_adventure: "Begin Adventure".into(),
            inventory: "Inventory".into(),
            relationships: "Relationships".into(),
            map: "Map".into(),
            achievements_unlocked: "Achievements Unlocked".into(),
            points: "Points".into(),
            hall_of_legends: "Hall of Legends".into(),
            story_builder: "Story Builder".into(),
            resume: "Resume".into(),
            exit_to_menu: "Exit to Menu".into(),
            menu: "Menu".into(),
            font_size: "Font Size".into(),
            small: "Small".into(),
            medium: "Medium".into(),
            large: "Large".into(),
            high_contrast: "High Contrast".into(),
            narration: "Narration".into(),
            on: "On".into(),
            off: "Off".into(),
            create_your_own_story: "Create Your Own Story".into(),
            story_prompt: "Enter your story prompt...".into(),
            generate: "Generate".into(),
            no_endings: "You have not unlocked any endings yet. Finish an adventure to see it here!"
                .into(),
            share_your_story: "Share Your Story".into(),
            copy_to_clipboard: "Copy to Clipboard".into(),
            copied: "Copied!".into(),
        }
    }
}

/// Build the structured-output schema for a UI translation: every key of the
/// English table, all strings, all required. Deriving the schema from the
/// serialized table keeps it in lockstep with the struct.
pub fn translation_schema() -> serde_json::Value {
    let base = serde_json::to_value(UiText::default()).expect("UiText serializes");
    let keys: Vec<&str> = base
        .as_object()
        .expect("UiText serializes to an object")
        .keys()
        .map(String::as_str)
        .collect();

    let mut properties = serde_json::Map::new();
    for key in &keys {
        properties.insert((*key).to_string(), json!({ "type": "STRING" }));
    }

    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": keys
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_is_default() {
        let ui = UiText::default();
        assert_eq!(ui.title, "DreamQuest");
        assert_eq!(ui.new_game, "New Game");
    }

    #[test]
    fn test_continue_key_spelling() {
        let value = serde_json::to_value(UiText::default()).unwrap();
        // "continue" is a Rust keyword, so the field is renamed on the wire.
        assert_eq!(value["continue"], "Continue");
        assert!(value.get("continueGame").is_none());
    }

    #[test]
    fn test_schema_requires_every_key() {
        let schema = translation_schema();
        let base = serde_json::to_value(UiText::default()).unwrap();
        let key_count = base.as_object().unwrap().len();

        assert_eq!(schema["required"].as_array().unwrap().len(), key_count);
        assert_eq!(
            schema["properties"].as_object().unwrap().len(),
            key_count
        );
        assert_eq!(schema["properties"]["newGame"]["type"], "STRING");
    }

    #[test]
    fn test_translation_round_trip() {
        // A translated table parses back into the struct with no keys lost.
        let mut value = serde_json::to_value(UiText::default()).unwrap();
        value["newGame"] = serde_json::Value::String("Nueva Partida".into());

        let translated: UiText = serde_json::from_value(value).unwrap();
        assert_eq!(translated.new_game, "Nueva Partida");
        assert_eq!(translated.title, "DreamQuest");
    }

    #[test]
    fn test_supported_languages() {
        assert_eq!(SUPPORTED_LANGUAGES.len(), 6);
        assert_eq!(SUPPORTED_LANGUAGES[0].code, "en");
        assert_eq!(Language::default().code, "en");
    }
}
