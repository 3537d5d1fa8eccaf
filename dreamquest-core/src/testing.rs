//! Testing utilities for DreamQuest.
//!
//! This module provides tools for integration testing:
//! - `MockStoryteller` for deterministic scripted responses without API calls
//! - `TestHarness` for driving the reducer through whole playthroughs
//! - Assertion helpers for verifying game state

use crate::reducer::{reduce, GameEvent};
use crate::response::StoryResponse;
use crate::state::{Archetype, Background, CharacterProfile, GameState, Item};

/// A mock storyteller that returns scripted responses in order.
///
/// Once the script is exhausted it returns the standard fallback response,
/// mirroring what the real response layer does on a malformed reply.
pub struct MockStoryteller {
    responses: Vec<StoryResponse>,
    response_index: usize,
}

impl MockStoryteller {
    /// Create a mock with scripted responses.
    pub fn new(responses: Vec<StoryResponse>) -> Self {
        Self {
            responses,
            response_index: 0,
        }
    }

    /// Return the next scripted response, or the fallback when exhausted.
    pub fn next_response(&mut self) -> StoryResponse {
        if self.response_index < self.responses.len() {
            let response = self.responses[self.response_index].clone();
            self.response_index += 1;
            response
        } else {
            StoryResponse::fallback()
        }
    }

    /// Add a response to the end of the script.
    pub fn queue_response(&mut self, response: StoryResponse) {
        self.responses.push(response);
    }

    /// Replay the script from the beginning.
    pub fn reset(&mut self) {
        self.response_index = 0;
    }
}

/// Test harness for running scripted playthroughs against the reducer.
pub struct TestHarness {
    /// The mock storyteller.
    pub storyteller: MockStoryteller,
    /// The current game state.
    pub state: GameState,
}

impl TestHarness {
    /// Create a harness with a sample character, already past game start.
    pub fn new() -> Self {
        Self::with_character(sample_character("Test Hero"))
    }

    /// Create a harness for a specific character.
    pub fn with_character(character: CharacterProfile) -> Self {
        let state = reduce(&GameState::default(), &GameEvent::GameStarted { character });
        Self {
            storyteller: MockStoryteller::new(Vec::new()),
            state,
        }
    }

    /// Queue a scripted response.
    pub fn expect_response(&mut self, response: StoryResponse) -> &mut Self {
        self.storyteller.queue_response(response);
        self
    }

    /// Make a choice: consume the next scripted response and apply it.
    pub fn choose(&mut self, _choice: &str) -> StoryResponse {
        let response = self.storyteller.next_response();
        self.state = reduce(
            &self.state,
            &GameEvent::ChapterApplied {
                response: response.clone(),
                image_url: None,
            },
        );
        response
    }

    /// Start a fresh playthrough with the same character, keeping endings.
    pub fn restart(&mut self) {
        let character = self.state.character.clone();
        self.state = reduce(&self.state, &GameEvent::GameStarted { character });
    }

    /// Return to menu, keeping endings only.
    pub fn reset(&mut self) {
        self.state = reduce(&self.state, &GameEvent::GameReset);
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// A sample character for tests.
pub fn sample_character(name: &str) -> CharacterProfile {
    CharacterProfile {
        name: name.to_string(),
        archetype: Archetype::Warrior,
        background: Background::Noble,
    }
}

/// A minimal chapter response awarding points at a location.
pub fn chapter(text: &str, location: &str, points: u64) -> StoryResponse {
    StoryResponse {
        story_text: text.to_string(),
        current_location: location.to_string(),
        points_awarded: points,
        ..StoryResponse::default()
    }
}

/// A chapter that grants a single item.
pub fn chapter_with_item(text: &str, item_name: &str) -> StoryResponse {
    StoryResponse {
        story_text: text.to_string(),
        items_gained: vec![Item {
            name: item_name.to_string(),
            description: format!("{item_name} found along the way."),
        }],
        ..StoryResponse::default()
    }
}

/// A game-over chapter with an ending title.
pub fn ending_chapter(text: &str, title: &str) -> StoryResponse {
    StoryResponse {
        story_text: text.to_string(),
        is_game_over: true,
        game_over_text: title.to_string(),
        ..StoryResponse::default()
    }
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert the player's point total.
#[track_caller]
pub fn assert_points(harness: &TestHarness, expected: u64) {
    assert_eq!(
        harness.state.points, expected,
        "Expected {expected} points, got {}",
        harness.state.points
    );
}

/// Assert the inventory contains an item with the given name.
#[track_caller]
pub fn assert_has_item(harness: &TestHarness, name: &str) {
    assert!(
        harness.state.has_item(name),
        "Expected inventory to contain '{name}'"
    );
}

/// Assert the inventory does NOT contain an item with the given name.
#[track_caller]
pub fn assert_no_item(harness: &TestHarness, name: &str) {
    assert!(
        !harness.state.has_item(name),
        "Expected inventory to NOT contain '{name}'"
    );
}

/// Assert an achievement is unlocked.
#[track_caller]
pub fn assert_achievement_unlocked(harness: &TestHarness, id: &str) {
    assert!(
        harness.state.is_achievement_unlocked(id),
        "Expected achievement '{id}' to be unlocked"
    );
}

/// Assert an ending with the given title has been recorded.
#[track_caller]
pub fn assert_has_ending(harness: &TestHarness, title: &str) {
    assert!(
        harness.state.has_ending(title),
        "Expected ending '{title}' to be unlocked"
    );
}

/// Assert a relationship score.
#[track_caller]
pub fn assert_relationship(harness: &TestHarness, name: &str, score: i64) {
    let actual = harness.state.relationship_score(name);
    assert_eq!(
        actual,
        Some(score),
        "Expected relationship with '{name}' at {score}, got {actual:?}"
    );
}
