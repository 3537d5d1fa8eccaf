//! Structured model responses and tolerant parsing.
//!
//! The upstream service is asked for JSON conforming to a fixed schema, but
//! its raw output is still untrusted: it may be wrapped in code fences or
//! malformed outright. Parsing never panics; on failure the caller-supplied
//! fallback is substituted and the incident is logged.

use crate::state::{Choice, Item, Mood, TimeOfDay};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// A change to a named NPC relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipChange {
    pub name: String,
    pub change: i64,
}

/// One chapter's worth of structured output from the model: narrative,
/// choices, and the state deltas to merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryResponse {
    #[serde(default)]
    pub story_text: String,

    /// Scene description handed to the image generator.
    #[serde(default)]
    pub image_prompt: String,

    #[serde(default)]
    pub choices: Vec<Choice>,

    #[serde(default)]
    pub is_game_over: bool,

    /// When `is_game_over` is set, the title of the ending.
    #[serde(default)]
    pub game_over_text: String,

    #[serde(default)]
    pub items_gained: Vec<Item>,

    /// Names of inventory items consumed this chapter.
    #[serde(default)]
    pub items_used: Vec<String>,

    #[serde(default)]
    pub relationship_changes: Vec<RelationshipChange>,

    /// Id of an achievement unlocked this chapter, if any.
    #[serde(default)]
    pub achievement_unlocked: Option<String>,

    #[serde(default)]
    pub current_location: String,

    #[serde(default)]
    pub mood: Mood,

    #[serde(default)]
    pub time_of_day: TimeOfDay,

    #[serde(default)]
    pub points_awarded: u64,
}

impl Default for StoryResponse {
    fn default() -> Self {
        Self {
            story_text: String::new(),
            image_prompt: String::new(),
            choices: Vec::new(),
            is_game_over: false,
            game_over_text: String::new(),
            items_gained: Vec::new(),
            items_used: Vec::new(),
            relationship_changes: Vec::new(),
            achievement_unlocked: None,
            current_location: String::new(),
            mood: Mood::default(),
            time_of_day: TimeOfDay::default(),
            points_awarded: 0,
        }
    }
}

impl StoryResponse {
    /// The documented fallback chapter, substituted when the model's output
    /// cannot be parsed. Ends the story gracefully rather than crashing.
    pub fn fallback() -> Self {
        Self {
            story_text: "The story machine is broken. Please try again.".to_string(),
            image_prompt: "A single cracked gear on a white background.".to_string(),
            choices: vec![Choice::new("Try Again")],
            is_game_over: true,
            game_over_text: "An unexpected error occurred.".to_string(),
            current_location: "Error".to_string(),
            ..Self::default()
        }
    }
}

/// A single-scene story from the story builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomStoryResponse {
    #[serde(default)]
    pub story_text: String,
    #[serde(default)]
    pub image_prompt: String,
}

impl CustomStoryResponse {
    pub fn fallback() -> Self {
        Self {
            story_text: "Could not generate story.".to_string(),
            image_prompt: "An error.".to_string(),
        }
    }
}

/// Strip optional markdown code fences from raw model output.
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open
        .strip_suffix("```")
        .unwrap_or(without_open)
        .trim()
}

/// Parse raw model output as JSON, substituting `fallback` on failure.
///
/// The system must never crash on malformed upstream output, so the only
/// trace of a bad payload is a warning in the logs.
pub fn parse_with_fallback<T: DeserializeOwned>(raw: &str, fallback: T) -> T {
    let cleaned = strip_code_fences(raw);
    match serde_json::from_str(cleaned) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(%error, raw, "failed to parse model output, using fallback");
            fallback
        }
    }
}

/// Structured-output schema for a story chapter.
pub fn story_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "storyText": {
                "type": "STRING",
                "description": "A compelling, descriptive paragraph for the current scene. At least 3 sentences long."
            },
            "imagePrompt": {
                "type": "STRING",
                "description": "A detailed, vivid, artistic description of the scene for an AI image generator. Focus on atmosphere, colors, key elements, and character actions."
            },
            "choices": {
                "type": "ARRAY",
                "description": "An array of 3 short, distinct action phrases for the player to choose from.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "text": { "type": "STRING" },
                        "requiredItem": {
                            "type": "STRING",
                            "description": "Optional item name from inventory required for this choice."
                        }
                    }
                }
            },
            "isGameOver": {
                "type": "BOOLEAN",
                "description": "Set to true if this is a definitive end of the story (good or bad)."
            },
            "gameOverText": {
                "type": "STRING",
                "description": "If isGameOver is true, this is the concluding message. Otherwise, it's an empty string."
            },
            "itemsGained": {
                "type": "ARRAY",
                "description": "A list of items the player acquires in this scene.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "description": { "type": "STRING" }
                    }
                }
            },
            "itemsUsed": {
                "type": "ARRAY",
                "description": "A list of item names from the player's inventory that were consumed or used.",
                "items": { "type": "STRING" }
            },
            "relationshipChanges": {
                "type": "ARRAY",
                "description": "A list of changes to NPC relationships.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "change": {
                            "type": "INTEGER",
                            "description": "A positive or negative number representing the change."
                        }
                    }
                }
            },
            "achievementUnlocked": {
                "type": "STRING",
                "description": "The ID of an achievement unlocked in this scene, or null."
            },
            "currentLocation": {
                "type": "STRING",
                "description": "The name of the current location for the map."
            },
            "mood": {
                "type": "STRING",
                "description": "The dominant mood of the scene: 'adventurous', 'tense', 'calm', 'mysterious', or 'dark'."
            },
            "timeOfDay": {
                "type": "STRING",
                "description": "The time of day: 'Day', 'Night', 'Dusk', or 'Dawn'."
            },
            "pointsAwarded": {
                "type": "INTEGER",
                "description": "Number of points awarded to the player for this chapter. Usually 10."
            }
        },
        "required": [
            "storyText", "imagePrompt", "choices", "isGameOver", "gameOverText",
            "itemsGained", "itemsUsed", "relationshipChanges", "achievementUnlocked",
            "currentLocation", "mood", "timeOfDay", "pointsAwarded"
        ]
    })
}

/// Structured-output schema for a single-scene custom story.
pub fn custom_story_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "storyText": { "type": "STRING" },
            "imagePrompt": { "type": "STRING" }
        },
        "required": ["storyText", "imagePrompt"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_clean_json() {
        let raw = r#"{"storyText": "You awaken.", "pointsAwarded": 10}"#;
        let response: StoryResponse = parse_with_fallback(raw, StoryResponse::fallback());
        assert_eq!(response.story_text, "You awaken.");
        assert_eq!(response.points_awarded, 10);
        assert!(!response.is_game_over);
    }

    #[test]
    fn test_parse_strips_code_fences() {
        let raw = "```json\n{\"storyText\": \"Fenced.\"}\n```";
        let response: StoryResponse = parse_with_fallback(raw, StoryResponse::fallback());
        assert_eq!(response.story_text, "Fenced.");
    }

    #[test]
    fn test_parse_strips_bare_fences() {
        let raw = "```\n{\"storyText\": \"Bare.\"}\n```";
        let response: StoryResponse = parse_with_fallback(raw, StoryResponse::fallback());
        assert_eq!(response.story_text, "Bare.");
    }

    #[test]
    fn test_malformed_json_yields_fallback() {
        let response: StoryResponse =
            parse_with_fallback("this is not json", StoryResponse::fallback());
        assert_eq!(
            response.story_text,
            "The story machine is broken. Please try again."
        );
        assert!(response.is_game_over);
        assert_eq!(response.current_location, "Error");
        assert_eq!(response.points_awarded, 0);
    }

    #[test]
    fn test_truncated_json_yields_fallback() {
        let response: StoryResponse =
            parse_with_fallback("{\"storyText\": \"cut off", StoryResponse::fallback());
        assert!(response.is_game_over);
    }

    #[test]
    fn test_full_wire_response_round_trip() {
        let raw = r#"{
            "storyText": "The jungle hums around you.",
            "imagePrompt": "Dense jungle at dusk",
            "choices": [
                {"text": "Press on"},
                {"text": "Use the machete", "requiredItem": "Machete"},
                {"text": "Run!", "isTimed": true}
            ],
            "isGameOver": false,
            "gameOverText": "",
            "itemsGained": [{"name": "Machete", "description": "A worn blade."}],
            "itemsUsed": ["Torch"],
            "relationshipChanges": [{"name": "Kai", "change": 2}],
            "achievementUnlocked": "first_step",
            "currentLocation": "Jungle Edge",
            "mood": "mysterious",
            "timeOfDay": "Dusk",
            "pointsAwarded": 10
        }"#;

        let response: StoryResponse = parse_with_fallback(raw, StoryResponse::fallback());
        assert_eq!(response.choices.len(), 3);
        assert_eq!(response.choices[1].required_item.as_deref(), Some("Machete"));
        assert!(response.choices[2].is_timed);
        assert_eq!(response.items_used, vec!["Torch"]);
        assert_eq!(response.achievement_unlocked.as_deref(), Some("first_step"));
        assert_eq!(response.mood, Mood::Mysterious);
        assert_eq!(response.time_of_day, TimeOfDay::Dusk);
    }

    #[test]
    fn test_null_achievement_accepted() {
        let raw = r#"{"storyText": "Quiet.", "achievementUnlocked": null}"#;
        let response: StoryResponse = parse_with_fallback(raw, StoryResponse::fallback());
        assert_eq!(response.achievement_unlocked, None);
    }

    #[test]
    fn test_story_schema_covers_wire_fields() {
        let schema = story_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();

        // Every schema-required key must deserialize into StoryResponse.
        let value = serde_json::to_value(StoryResponse::fallback()).unwrap();
        for key in required {
            assert!(
                value.get(key).is_some(),
                "schema field {key} missing from StoryResponse wire format"
            );
        }
    }

    #[test]
    fn test_custom_story_fallback() {
        let response: CustomStoryResponse =
            parse_with_fallback("nope", CustomStoryResponse::fallback());
        assert_eq!(response.story_text, "Could not generate story.");
    }
}
