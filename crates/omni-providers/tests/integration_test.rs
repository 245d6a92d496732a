//! Integration tests for omni-providers crate.
//!
//! Feeds recorded provider bodies through the parsers and into the
//! formatting core, the same path a live command takes.

use omni_common::test_utils::init_test_logging;
use omni_common::{
    format_event_block, format_team_injuries, generate_response_list, ChartPeriod, Lookup,
    Ticker, MAX_MESSAGE_LENGTH,
};
use omni_config::{AiConfig, HttpConfig};
use omni_providers::{
    parse_injury_report, parse_markets, snapshot_from_chart, ApiClient, AssistantProvider,
    ChatCompletionClient, Fundamentals,
};
use std::sync::Arc;

const NBA_MARKETS: &str = include_str!("fixtures/nba_markets.json");
const NFL_INJURIES: &str = include_str!("fixtures/nfl_injuries.html");

#[test]
fn test_markets_fixture_formats_into_blocks() {
    init_test_logging();

    let events = parse_markets(NBA_MARKETS).unwrap();
    assert_eq!(events.len(), 2);

    let blocks: Vec<String> = events.iter().filter_map(format_event_block).collect();
    assert!(blocks[0].contains("**ML - Home:** _-165_, **Away:** _+144_"));
    assert!(blocks[0].contains("**Spread - Home:** _-4.5 -105_, **Away:** _+4.5 -110_"));
    assert!(blocks[0].contains("**Total Points:** _o221.5 -110, u221.5 -105_"));

    // Pick'em spread renders without a sign on both sides.
    assert!(blocks[1].contains("**Spread - Home:** _0.0 -109_, **Away:** _0.0 -109_"));
    assert!(!blocks[1].contains("Total Points"));

    let chunks = generate_response_list(&blocks, MAX_MESSAGE_LENGTH);
    assert_eq!(chunks.len(), 1);
}

#[test]
fn test_injury_fixture_formats_with_severity_icons() {
    let teams = parse_injury_report(NFL_INJURIES).unwrap();
    assert_eq!(teams.len(), 2);
    assert_eq!(teams[0].players.len(), 2);

    let block = format_team_injuries(&teams[0]);
    assert_eq!(
        block,
        "**Arizona Cardinals**\n\
         \u{1F7E1} _Kyler Example - Oct 26_\n\
         \u{1F534} _Marvin Sample - Nov 9_\n\n"
    );

    let falcons = format_team_injuries(&teams[1]);
    assert!(falcons.contains("\u{1F7E1} _Bijan Placeholder - Oct 20_"));
}

#[test]
fn test_chart_body_without_result_is_not_found() {
    let ticker: Ticker = "ZZZZ".parse().unwrap();
    let result = snapshot_from_chart(
        &ticker,
        ChartPeriod::FiveDays,
        r#"{"chart":{"result":[],"error":null}}"#,
        Fundamentals::default(),
    );
    assert!(matches!(result, Ok(None)));
}

#[tokio::test]
async fn test_assistant_without_key_reports_transient_error() {
    let http = Arc::new(ApiClient::new(&HttpConfig::default()).unwrap());
    let assistant = ChatCompletionClient::new(http, AiConfig::default());

    match assistant.ask("Who won the 1986 World Series?").await {
        Lookup::TransientError(reason) => assert!(reason.contains("API key")),
        other => panic!("expected transient error, got {other:?}"),
    }
}
