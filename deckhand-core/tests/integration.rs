//! Integration tests for deckhand payload parsing and presentation
//!
//! These tests use fixture files in `tests/fixtures/` that mirror the studio
//! service's JSON payloads, and drive them through deserialization, day
//! bucketing, and display formatting.

use chrono::{NaiveDate, TimeZone, Utc};
use deckhand_core::display;
use deckhand_core::recency::{group_by_day, relative_age_at, relative_age_opt};
use deckhand_core::{Conversation, GenerationRecord, OutputType, StageStatus, Workflow};
use std::path::PathBuf;

/// Get the path to a fixture file
fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn load_conversations() -> Vec<Conversation> {
    let raw = std::fs::read_to_string(fixture_path("conversations.json")).unwrap();
    serde_json::from_str(&raw).unwrap()
}

fn load_generations() -> Vec<GenerationRecord> {
    let raw = std::fs::read_to_string(fixture_path("generations.json")).unwrap();
    serde_json::from_str(&raw).unwrap()
}

// ============================================
// Payload Parsing
// ============================================

#[test]
fn test_parse_conversations_payload() {
    let conversations = load_conversations();
    assert_eq!(conversations.len(), 4);

    // Legacy "filename"/"size" keys deserialize through the aliases.
    let third = &conversations[2];
    assert_eq!(third.files.len(), 2);
    assert_eq!(third.files[0].name, "onboarding_guide.docx");
    assert_eq!(third.files[0].size_bytes, Some(120034));

    // A conversation without updates falls back to its creation time.
    let fourth = &conversations[3];
    assert_eq!(fourth.last_touched(), Some(fourth.created_at));
}

#[test]
fn test_parse_generations_payload() {
    let generations = load_generations();
    assert_eq!(generations.len(), 3);

    // "ppt" is the legacy wire value for slides.
    assert_eq!(generations[1].output_type, OutputType::Slides);
    assert_eq!(generations[2].output_type, OutputType::Poster);

    assert!(generations[0].has_artifact());
    assert!(!generations[1].has_artifact());
    assert_eq!(generations[0].slides.len(), 3);
}

#[test]
fn test_parse_workflow_payload() {
    let raw = std::fs::read_to_string(fixture_path("workflow.json")).unwrap();
    let workflow: Workflow = serde_json::from_str(&raw).unwrap();

    assert_eq!(workflow.output_type, OutputType::Slides);
    assert_eq!(workflow.stages.len(), 4);
    assert_eq!(workflow.active_stage().map(|s| s.id.as_str()), Some("Plan"));
    assert!(!workflow.is_complete());
    assert_eq!(workflow.stages[0].status, StageStatus::Completed);
    assert_eq!(
        workflow.current_step.as_deref(),
        Some("Outlining slide 7 of 12")
    );
}

// ============================================
// Presentation
// ============================================

#[test]
fn test_conversations_bucket_by_last_touched() {
    let conversations = load_conversations();
    let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();

    let groups = group_by_day(
        conversations,
        |conv| conv.last_touched().map(|ts| ts.date_naive()),
        today,
    );

    // Every record lands in exactly one bucket.
    assert_eq!(groups.len(), 4);
    assert_eq!(groups.today.len(), 1);
    assert_eq!(groups.today[0].id, "conv-001");
    assert_eq!(groups.yesterday.len(), 1);
    assert_eq!(groups.yesterday[0].id, "conv-002");
    assert_eq!(groups.this_week.len(), 1);
    assert_eq!(groups.this_week[0].id, "conv-003");
    assert_eq!(groups.older.len(), 1);
    assert_eq!(groups.older[0].id, "conv-004");

    let labels: Vec<_> = groups.sections().map(|(b, _)| b.label()).collect();
    assert_eq!(labels, vec!["Today", "Yesterday", "This Week", "Older"]);
}

#[test]
fn test_conversation_rows_format() {
    let conversations = load_conversations();
    let now = Utc.with_ymd_and_hms(2026, 3, 10, 9, 20, 44).unwrap();

    let first = &conversations[0];
    assert_eq!(display::conversation_title(first), "quarterly_report");
    assert_eq!(display::conversation_subtitle(first), "1 file · 6 messages");
    assert_eq!(
        relative_age_at(first.last_touched().unwrap(), now),
        "5m ago"
    );

    let second = &conversations[1];
    assert_eq!(display::conversation_title(second), "Poster brainstorm");

    let fourth = &conversations[3];
    assert_eq!(display::conversation_title(fourth), "New Chat");
    assert_eq!(display::conversation_subtitle(fourth), "Empty");
}

#[test]
fn test_generation_display_names() {
    let generations = load_generations();

    assert_eq!(
        generations[0].display_name(),
        "Slides - quarterly_report - minimal - detailed - medium"
    );
    // Absent parts are skipped, not rendered as gaps.
    assert_eq!(
        generations[1].display_name(),
        "Slides - onboarding_guide - academic - long"
    );
    assert_eq!(
        generations[2].display_name(),
        "Poster - quarterly_report - vibrant - summary - dense"
    );
}

#[test]
fn test_generation_missing_timestamp_degrades_to_empty_age() {
    let generations = load_generations();
    assert_eq!(relative_age_opt(generations[2].created_at), "");
}
