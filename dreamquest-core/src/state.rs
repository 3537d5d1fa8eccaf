//! Core game state types.
//!
//! `GameState` is the single aggregate the whole game revolves around. It is
//! serialized to disk on every mutation during active play, and its wire
//! format (camelCase keys) doubles as the save format.

use serde::{Deserialize, Serialize};

/// The dominant mood of the current scene, as reported by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Adventurous,
    Tense,
    Calm,
    Mysterious,
    Dark,
}

impl Default for Mood {
    fn default() -> Self {
        Mood::Calm
    }
}

/// In-story time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeOfDay {
    Day,
    Night,
    Dusk,
    Dawn,
}

impl Default for TimeOfDay {
    fn default() -> Self {
        TimeOfDay::Day
    }
}

/// Player archetype, fixed at character creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Archetype {
    Warrior,
    Scholar,
    Rogue,
}

impl Archetype {
    pub fn name(&self) -> &'static str {
        match self {
            Archetype::Warrior => "Warrior",
            Archetype::Scholar => "Scholar",
            Archetype::Rogue => "Rogue",
        }
    }

    pub const ALL: [Archetype; 3] = [Archetype::Warrior, Archetype::Scholar, Archetype::Rogue];
}

/// Player background, fixed at character creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Background {
    Noble,
    Orphan,
    Merchant,
}

impl Background {
    pub fn name(&self) -> &'static str {
        match self {
            Background::Noble => "Noble",
            Background::Orphan => "Orphan",
            Background::Merchant => "Merchant",
        }
    }

    pub const ALL: [Background; 3] = [Background::Noble, Background::Orphan, Background::Merchant];
}

/// The player character. Immutable once the adventure begins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterProfile {
    pub name: String,
    pub archetype: Archetype,
    pub background: Background,
}

impl Default for CharacterProfile {
    fn default() -> Self {
        Self {
            name: String::new(),
            archetype: Archetype::Warrior,
            background: Background::Noble,
        }
    }
}

/// An action the player can take next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    pub text: String,

    /// Timed choices are presented with urgency in the UI.
    #[serde(default)]
    pub is_timed: bool,

    /// When set, the choice is only selectable if the named item is held.
    #[serde(default)]
    pub required_item: Option<String>,
}

impl Choice {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_timed: false,
            required_item: None,
        }
    }
}

/// An inventory item. Items are unique by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub description: String,
}

/// Standing with a named NPC, derived from an accumulated score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationshipStatus {
    Ally,
    Neutral,
    Rival,
}

impl RelationshipStatus {
    /// Derive the status from the accumulated score.
    pub fn from_score(score: i64) -> Self {
        if score > 3 {
            RelationshipStatus::Ally
        } else if score < -3 {
            RelationshipStatus::Rival
        } else {
            RelationshipStatus::Neutral
        }
    }
}

/// Relationship with a named NPC. Scores are unbounded and accumulate
/// additively across chapters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub name: String,
    pub score: i64,
    pub status: RelationshipStatus,
}

/// A one-way unlockable milestone flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub unlocked: bool,
}

/// The fixed achievement catalog, all locked.
pub fn achievement_catalog() -> Vec<Achievement> {
    let entries = [
        ("first_step", "First Step", "Began your grand adventure."),
        ("secret_finder", "Secret Finder", "Discovered a hidden path."),
        ("true_friend", "True Friend", "Forged a strong alliance."),
        ("the_end", "The End?", "Reached one of the story's endings."),
    ];

    entries
        .iter()
        .map(|(id, name, description)| Achievement {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            unlocked: false,
        })
        .collect()
}

/// A terminal narrative outcome, recorded permanently once reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ending {
    pub title: String,
    pub text: String,
    pub image_url: String,
}

/// The current narrative snapshot: text, choices, scene image, and tone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryState {
    pub story_text: String,
    pub choices: Vec<Choice>,
    pub image_url: Option<String>,
    pub is_game_over: bool,
    pub game_over_text: String,
    pub mood: Mood,
    pub time_of_day: TimeOfDay,
}

impl Default for StoryState {
    fn default() -> Self {
        Self {
            story_text: String::new(),
            choices: Vec::new(),
            image_url: None,
            is_game_over: false,
            game_over_text: String::new(),
            mood: Mood::default(),
            time_of_day: TimeOfDay::default(),
        }
    }
}

/// The full game state for one player.
///
/// Created fresh on new game (endings carried over for cross-playthrough
/// memory), persisted on every mutation during active play, and reset to
/// defaults (endings preserved) on return to menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub story_state: StoryState,
    pub character: CharacterProfile,
    pub inventory: Vec<Item>,
    pub relationships: Vec<Relationship>,
    pub achievements: Vec<Achievement>,
    pub story_history: Vec<String>,
    pub current_location: String,
    pub points: u64,
    pub endings_unlocked: Vec<Ending>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            story_state: StoryState::default(),
            character: CharacterProfile::default(),
            inventory: Vec::new(),
            relationships: Vec::new(),
            achievements: Vec::new(),
            story_history: Vec::new(),
            current_location: "The Beginning".to_string(),
            points: 0,
            endings_unlocked: Vec::new(),
        }
    }
}

impl GameState {
    /// Check whether the player holds an item with the given name.
    pub fn has_item(&self, name: &str) -> bool {
        self.inventory.iter().any(|i| i.name == name)
    }

    /// Check whether the achievement with the given id is unlocked.
    pub fn is_achievement_unlocked(&self, id: &str) -> bool {
        self.achievements.iter().any(|a| a.id == id && a.unlocked)
    }

    /// Look up the relationship score for a named NPC.
    pub fn relationship_score(&self, name: &str) -> Option<i64> {
        self.relationships
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.score)
    }

    /// Check whether an ending with the given title has been recorded.
    pub fn has_ending(&self, title: &str) -> bool {
        self.endings_unlocked.iter().any(|e| e.title == title)
    }
}

/// UI font size preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    Medium,
    Large,
}

impl Default for FontSize {
    fn default() -> Self {
        FontSize::Medium
    }
}

/// Player-facing application settings, persisted separately from game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub font_size: FontSize,
    pub high_contrast: bool,
    pub narration: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font_size: FontSize::Medium,
            high_contrast: false,
            narration: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = GameState::default();
        assert_eq!(state.current_location, "The Beginning");
        assert_eq!(state.points, 0);
        assert!(state.inventory.is_empty());
        assert!(state.endings_unlocked.is_empty());
        assert_eq!(state.story_state.mood, Mood::Calm);
        assert_eq!(state.story_state.time_of_day, TimeOfDay::Day);
    }

    #[test]
    fn test_achievement_catalog() {
        let catalog = achievement_catalog();
        assert_eq!(catalog.len(), 4);
        assert!(catalog.iter().all(|a| !a.unlocked));
        assert!(catalog.iter().any(|a| a.id == "first_step"));
        assert!(catalog.iter().any(|a| a.id == "the_end"));
    }

    #[test]
    fn test_relationship_status_from_score() {
        assert_eq!(RelationshipStatus::from_score(4), RelationshipStatus::Ally);
        assert_eq!(RelationshipStatus::from_score(3), RelationshipStatus::Neutral);
        assert_eq!(RelationshipStatus::from_score(0), RelationshipStatus::Neutral);
        assert_eq!(RelationshipStatus::from_score(-3), RelationshipStatus::Neutral);
        assert_eq!(RelationshipStatus::from_score(-4), RelationshipStatus::Rival);
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let state = GameState::default();
        let value = serde_json::to_value(&state).unwrap();
        assert!(value.get("storyState").is_some());
        assert!(value.get("storyHistory").is_some());
        assert!(value.get("currentLocation").is_some());
        assert!(value.get("endingsUnlocked").is_some());
        assert_eq!(value["storyState"]["mood"], "calm");
        assert_eq!(value["storyState"]["timeOfDay"], "Day");
    }

    #[test]
    fn test_settings_wire_format() {
        let settings = Settings::default();
        let value = serde_json::to_value(settings).unwrap();
        assert_eq!(value["fontSize"], "medium");
        assert_eq!(value["highContrast"], false);
    }

    #[test]
    fn test_state_queries() {
        let mut state = GameState::default();
        state.inventory.push(Item {
            name: "Rusty Key".to_string(),
            description: "Opens something, somewhere.".to_string(),
        });
        state.relationships.push(Relationship {
            name: "Mira".to_string(),
            score: 5,
            status: RelationshipStatus::Ally,
        });

        assert!(state.has_item("Rusty Key"));
        assert!(!state.has_item("Golden Key"));
        assert_eq!(state.relationship_score("Mira"), Some(5));
        assert_eq!(state.relationship_score("Unknown"), None);
        assert!(!state.has_ending("The Fallen Tower"));
    }
}
