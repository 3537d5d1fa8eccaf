//! QA tests for the state reducer driven through the test harness.
//!
//! These tests verify the merge semantics over whole playthroughs:
//! - points accumulate and achievements unlock
//! - inventory stays deduplicated and consumed items disappear
//! - relationships accumulate and cross status thresholds
//! - endings persist across playthroughs and never duplicate
//!
//! Run with: `cargo test -p dreamquest-core --test qa_reducer`

use dreamquest_core::response::{RelationshipChange, StoryResponse};
use dreamquest_core::state::{Archetype, Background, CharacterProfile, RelationshipStatus};
use dreamquest_core::testing::{
    assert_achievement_unlocked, assert_has_ending, assert_has_item, assert_no_item,
    assert_points, assert_relationship, chapter, chapter_with_item, ending_chapter, TestHarness,
};

fn ava() -> CharacterProfile {
    CharacterProfile {
        name: "Ava".to_string(),
        archetype: Archetype::Scholar,
        background: Background::Orphan,
    }
}

#[test]
fn test_opening_chapter_awards_first_step() {
    let mut harness = TestHarness::with_character(ava());
    harness.expect_response(StoryResponse {
        story_text: "The jungle closes behind you.".to_string(),
        current_location: "Jungle Edge".to_string(),
        points_awarded: 10,
        achievement_unlocked: Some("first_step".to_string()),
        ..StoryResponse::default()
    });

    harness.choose("begin");

    assert_points(&harness, 10);
    assert_achievement_unlocked(&harness, "first_step");
    assert_eq!(harness.state.character.name, "Ava");
    assert_eq!(harness.state.current_location, "Jungle Edge");
    assert_eq!(harness.state.story_history.len(), 1);
}

#[test]
fn test_inventory_stays_deduplicated_over_many_chapters() {
    let mut harness = TestHarness::new();

    // The same item offered three times lands in inventory once.
    for _ in 0..3 {
        harness.expect_response(chapter_with_item("A machete glints.", "Machete"));
    }
    harness.choose("take it");
    harness.choose("take it again");
    harness.choose("take it once more");

    assert_has_item(&harness, "Machete");
    assert_eq!(harness.state.inventory.len(), 1);
}

#[test]
fn test_consumed_items_leave_the_inventory() {
    let mut harness = TestHarness::new();
    harness.expect_response(chapter_with_item("A torch on the wall.", "Torch"));
    harness.expect_response(StoryResponse {
        story_text: "The torch gutters out in the rain.".to_string(),
        items_used: vec!["Torch".to_string()],
        ..StoryResponse::default()
    });

    harness.choose("grab the torch");
    assert_has_item(&harness, "Torch");

    harness.choose("press on through the storm");
    assert_no_item(&harness, "Torch");
}

#[test]
fn test_relationship_crosses_into_ally() {
    let mut harness = TestHarness::new();
    for _ in 0..2 {
        harness.expect_response(StoryResponse {
            story_text: "Kai nods approvingly.".to_string(),
            relationship_changes: vec![RelationshipChange {
                name: "Kai".to_string(),
                change: 2,
            }],
            ..StoryResponse::default()
        });
    }

    harness.choose("help Kai");
    assert_relationship(&harness, "Kai", 2);
    assert_eq!(
        harness.state.relationships[0].status,
        RelationshipStatus::Neutral
    );

    harness.choose("help Kai again");
    assert_relationship(&harness, "Kai", 4);
    assert_eq!(
        harness.state.relationships[0].status,
        RelationshipStatus::Ally
    );
}

#[test]
fn test_ending_unlocks_once_across_playthroughs() {
    let mut harness = TestHarness::with_character(ava());
    harness.expect_response(ending_chapter(
        "The tower crumbles around you.",
        "The Fallen Tower",
    ));
    harness.choose("climb the tower");

    assert_has_ending(&harness, "The Fallen Tower");
    assert!(harness.state.story_state.is_game_over);
    assert_eq!(harness.state.endings_unlocked.len(), 1);

    // New playthrough reaches the same ending. Still one entry.
    harness.restart();
    assert_points(&harness, 0);
    assert_has_ending(&harness, "The Fallen Tower");

    harness.expect_response(ending_chapter(
        "The tower crumbles around you, again.",
        "The Fallen Tower",
    ));
    harness.choose("climb the tower again");
    assert_eq!(harness.state.endings_unlocked.len(), 1);
}

#[test]
fn test_distinct_endings_accumulate() {
    let mut harness = TestHarness::new();
    harness.expect_response(ending_chapter("It ends in fire.", "Ashes"));
    harness.choose("light the beacon");
    harness.restart();

    harness.expect_response(ending_chapter("It ends in silence.", "Quiet End"));
    harness.choose("walk into the mist");

    assert_has_ending(&harness, "Ashes");
    assert_has_ending(&harness, "Quiet End");
    assert_eq!(harness.state.endings_unlocked.len(), 2);
}

#[test]
fn test_reset_returns_to_defaults_keeping_endings() {
    let mut harness = TestHarness::new();
    harness.expect_response(chapter("You earn your keep.", "Harbor", 30));
    harness.expect_response(ending_chapter("Done.", "Quiet End"));
    harness.choose("work the docks");
    harness.choose("sail away");

    harness.reset();

    assert_points(&harness, 0);
    assert!(harness.state.story_history.is_empty());
    assert!(harness.state.inventory.is_empty());
    assert_eq!(harness.state.current_location, "The Beginning");
    assert_has_ending(&harness, "Quiet End");
}

#[test]
fn test_malformed_script_falls_back_to_game_over() {
    // An exhausted script behaves like the fallback for a malformed reply:
    // the game ends gracefully rather than crashing.
    let mut harness = TestHarness::new();
    let response = harness.choose("anything");

    assert!(response.is_game_over);
    assert!(harness.state.story_state.is_game_over);
    assert!(!harness.state.story_state.story_text.is_empty());
}
