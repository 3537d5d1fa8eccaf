//! Pure state reducer.
//!
//! All game-state mutation flows through `reduce(state, event)`, which returns
//! a new `GameState` and never touches I/O. This keeps the merge semantics
//! testable without a storyteller, a network, or a rendering layer.
//!
//! Invariants upheld here:
//! - inventory items are unique by name (re-gaining an item is a no-op)
//! - achievements and endings are monotonic
//! - endings are deduplicated by title and survive resets
//! - relationship deltas accumulate additively

use crate::response::StoryResponse;
use crate::state::{
    achievement_catalog, CharacterProfile, Ending, GameState, Relationship, RelationshipStatus,
    StoryState,
};

/// An event that advances the game state.
#[derive(Debug, Clone)]
pub enum GameEvent {
    /// A new adventure begins for the given character. Endings carry over
    /// from the previous state; everything else resets.
    GameStarted { character: CharacterProfile },

    /// A structured model response arrived and should be merged, together
    /// with the generated scene image.
    ChapterApplied {
        response: StoryResponse,
        image_url: Option<String>,
    },

    /// Return to menu: reset to defaults, preserving unlocked endings.
    GameReset,
}

/// Apply an event to the state, producing the next state.
pub fn reduce(state: &GameState, event: &GameEvent) -> GameState {
    match event {
        GameEvent::GameStarted { character } => GameState {
            character: character.clone(),
            achievements: achievement_catalog(),
            endings_unlocked: state.endings_unlocked.clone(),
            ..GameState::default()
        },
        GameEvent::ChapterApplied {
            response,
            image_url,
        } => apply_chapter(state, response, image_url.clone()),
        GameEvent::GameReset => GameState {
            endings_unlocked: state.endings_unlocked.clone(),
            ..GameState::default()
        },
    }
}

fn apply_chapter(
    state: &GameState,
    response: &StoryResponse,
    image_url: Option<String>,
) -> GameState {
    let mut next = state.clone();

    next.story_state = StoryState {
        story_text: response.story_text.clone(),
        choices: response.choices.clone(),
        image_url: image_url.clone(),
        is_game_over: response.is_game_over,
        game_over_text: response.game_over_text.clone(),
        mood: response.mood,
        time_of_day: response.time_of_day,
    };

    // Union gained items by name, then drop consumed ones.
    for item in &response.items_gained {
        if !next.inventory.iter().any(|i| i.name == item.name) {
            next.inventory.push(item.clone());
        }
    }
    next.inventory
        .retain(|item| !response.items_used.contains(&item.name));

    for change in &response.relationship_changes {
        match next
            .relationships
            .iter_mut()
            .find(|r| r.name == change.name)
        {
            Some(existing) => {
                existing.score += change.change;
                existing.status = RelationshipStatus::from_score(existing.score);
            }
            None => next.relationships.push(Relationship {
                name: change.name.clone(),
                score: change.change,
                status: RelationshipStatus::from_score(change.change),
            }),
        }
    }

    if let Some(id) = &response.achievement_unlocked {
        if let Some(achievement) = next.achievements.iter_mut().find(|a| &a.id == id) {
            achievement.unlocked = true;
        }
    }

    next.story_history.push(response.story_text.clone());
    next.current_location = response.current_location.clone();
    next.points += response.points_awarded;

    if response.is_game_over && !next.has_ending(&response.game_over_text) {
        next.endings_unlocked.push(Ending {
            title: response.game_over_text.clone(),
            text: response.story_text.clone(),
            image_url: image_url.unwrap_or_default(),
        });
    }

    next
}
