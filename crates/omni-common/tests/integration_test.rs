//! Integration tests for omni-common crate.
//!
//! Exercises the formatting core end to end: provider records go in, message
//! chunks that fit Discord's limit come out.

use omni_common::test_utils::{injury_fixtures, odds_fixtures};
use omni_common::{
    format_event_block, format_team_injuries, generate_response_list, split_text, Lookup,
    OmniError, Sport, MAX_MESSAGE_LENGTH,
};

#[test]
fn test_full_slate_packs_into_ordered_chunks() {
    let events = odds_fixtures::sample_slate(40);
    let blocks: Vec<String> = events.iter().filter_map(format_event_block).collect();
    assert_eq!(blocks.len(), 40);

    let chunks = generate_response_list(&blocks, MAX_MESSAGE_LENGTH);
    assert!(chunks.len() > 1);
    assert!(chunks
        .iter()
        .all(|chunk| chunk.chars().count() <= MAX_MESSAGE_LENGTH));
    assert_eq!(chunks.concat(), blocks.concat());

    let first_home = chunks[0].find("Home Team 0").unwrap();
    let second_home = chunks[0].find("Home Team 1").unwrap();
    assert!(first_home < second_home);
}

#[test]
fn test_events_without_moneyline_are_left_out() {
    let mut events = odds_fixtures::sample_slate(3);
    events[1].moneyline = None;

    let blocks: Vec<String> = events.iter().filter_map(format_event_block).collect();
    assert_eq!(blocks.len(), 2);
    assert!(!blocks.concat().contains("Home Team 1"));
}

#[test]
fn test_injury_blocks_never_split() {
    let teams: Vec<_> = (0..32)
        .map(|i| injury_fixtures::sample_team(&format!("Team {i}")))
        .collect();
    let blocks: Vec<String> = teams.iter().map(format_team_injuries).collect();
    let chunks = generate_response_list(&blocks, MAX_MESSAGE_LENGTH);

    for chunk in &chunks {
        assert!(chunk.starts_with("**Team "));
        assert!(chunk.ends_with("\n\n"));
    }
}

#[test]
fn test_long_answer_is_split_and_repacked() {
    let answer = "word ".repeat(1200);
    let chunks = generate_response_list(split_text(&answer, MAX_MESSAGE_LENGTH), MAX_MESSAGE_LENGTH);

    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks.concat(), answer);
}

#[test]
fn test_sport_and_lookup_surface() {
    assert_eq!("nfl".parse::<Sport>().unwrap().lines_title(), "NFL Lines");

    let lookup: Lookup<Vec<u8>> = Lookup::from_items(Err(OmniError::network("timed out")));
    assert!(matches!(lookup, Lookup::TransientError(_)));
}
