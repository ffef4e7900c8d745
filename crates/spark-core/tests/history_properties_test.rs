//! Integration test: window statistics over synthetic entry sets, and the persisted
//! entry shape surviving JSON serialization.

use chrono::{Duration, TimeZone, Utc};
use serde_json::json;
use spark_core::{
    aggregate, aggregate_at, EntryRecord, EntrySource, JournalEntry, Sentiment, Stability,
    TextAnalyzer, Window,
};

fn record(mood: f64, ts: chrono::DateTime<Utc>) -> EntryRecord {
    EntryRecord {
        mood_score: mood,
        sentiment: Sentiment::Neutral,
        emotions: vec![],
        topics: vec![],
        timestamp: ts,
        source: EntrySource::Journal,
    }
}

#[test]
fn empty_set_yields_no_data_stats() {
    let stats = aggregate(&[], Window::Week);
    assert_eq!(stats.total_entries, 0);
    assert_eq!(stats.stability, Stability::NoData);
    assert_eq!(stats.trends.len(), 7);
    assert!(stats.emotions.len() >= 4);
    let v = serde_json::to_value(&stats).unwrap();
    assert_eq!(v["stability"], "No data");
    assert_eq!(v["totalEntries"], 0);
}

#[test]
fn variance_of_one_hundredth_is_very_stable() {
    let now = Utc::now();
    let entries = vec![record(0.4, now), record(0.6, now - Duration::hours(2))];
    let stats = aggregate_at(&entries, Window::Week, now);
    assert!((stats.variance - 0.01).abs() < 1e-9);
    assert_eq!(stats.stability, Stability::VeryStable);
}

#[test]
fn variance_of_fifteen_hundredths_is_variable() {
    let now = Utc::now();
    let spread = 0.15_f64.sqrt();
    let entries = vec![
        record(0.5 - spread, now),
        record(0.5 + spread, now - Duration::hours(3)),
    ];
    let stats = aggregate_at(&entries, Window::Week, now);
    assert!((stats.variance - 0.15).abs() < 1e-9);
    assert_eq!(stats.stability, Stability::Variable);
}

#[test]
fn one_entry_week_has_seven_buckets_six_neutral() {
    // Wednesday.
    let now = Utc.with_ymd_and_hms(2026, 10, 21, 12, 0, 0).unwrap();
    let stats = aggregate_at(&[record(0.9, now)], Window::Week, now);
    let days: Vec<&str> = stats.trends.iter().map(|b| b.day.as_str()).collect();
    assert_eq!(days, vec!["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]);
    assert_eq!(stats.trends.iter().filter(|b| b.sentiment == 50).count(), 6);
    assert_eq!(stats.trends[3].sentiment, 90);
    assert_eq!(stats.trends[3].count, 1);
}

#[test]
fn month_window_keeps_older_entries_than_week() {
    let now = Utc::now();
    let entries = vec![record(0.7, now), record(0.3, now - Duration::days(12))];
    assert_eq!(aggregate_at(&entries, Window::Week, now).total_entries, 1);
    assert_eq!(aggregate_at(&entries, Window::Month, now).total_entries, 2);
    assert_eq!(aggregate_at(&entries, Window::All, now).total_entries, 2);
}

#[test]
fn malformed_records_fall_back_to_neutral() {
    let raw = json!([
        { "timestamp": "2026-10-19T10:00:00Z" },
        { "timestamp": "2026-10-19T11:00:00Z", "moodScore": null, "emotions": null, "source": null },
        { "timestamp": "2026-10-19T12:00:00Z", "moodScore": 0.8, "sentiment": "positive",
          "source": "chat-conversation" },
        { "timestamp": "2026-10-19T13:00:00Z", "sentiment": "happy" },
        { "timestamp": "2026-10-19T14:00:00Z", "sentiment": "very_positive" },
        { "timestamp": "2026-10-19T15:00:00Z", "sentiment": 3 }
    ]);
    let records: Vec<EntryRecord> = serde_json::from_value(raw).unwrap();
    assert_eq!(records[0].mood_score, 0.5);
    assert_eq!(records[1].sentiment, Sentiment::Neutral);
    assert!(records[1].emotions.is_empty());
    assert_eq!(records[2].source, EntrySource::Chatbot);
    assert_eq!(records[3].sentiment, Sentiment::Neutral);
    assert_eq!(records[4].sentiment, Sentiment::VeryPositive);
    assert_eq!(records[5].sentiment, Sentiment::Neutral);

    let now = Utc.with_ymd_and_hms(2026, 10, 19, 18, 0, 0).unwrap();
    let stats = aggregate_at(&records, Window::Week, now);
    assert_eq!(stats.total_entries, 6);
    assert_eq!(stats.data_sources.journal, 5);
    assert_eq!(stats.data_sources.chatbot, 1);
    assert_eq!(stats.positive, 2);
    assert_eq!(stats.neutral, 4);
}

#[test]
fn journal_entry_json_round_trip() {
    let analysis = TextAnalyzer::default().analyze("Extremely grateful for my team at work, not sad at all");
    let entry = JournalEntry::new(
        "Extremely grateful for my team at work, not sad at all",
        "grateful",
        analysis,
        EntrySource::Journal,
    );
    let text = serde_json::to_string(&entry).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    for key in ["id", "date", "timestamp", "content", "mood", "analysis", "source", "title", "wordCount"] {
        assert!(value.get(key).is_some(), "missing {}", key);
    }
    assert!(value["analysis"].get("moodScore").is_some());
    assert!(value["analysis"].get("analysisTime").is_some());

    let back: JournalEntry = serde_json::from_str(&text).unwrap();
    assert_eq!(back, entry);
    assert!(back.analysis.same_analysis(&entry.analysis));
}

#[test]
fn insights_reflect_a_positive_stable_week() {
    let now = Utc::now();
    let analyzer = TextAnalyzer::default();
    let entries: Vec<EntryRecord> = [
        "So happy and grateful today",
        "Amazing progress on my project, feeling proud",
        "Wonderful calm evening with family",
    ]
    .iter()
    .enumerate()
    .map(|(i, text)| {
        let a = analyzer.analyze(text);
        let entry = JournalEntry::new_at(
            *text,
            "happy",
            a,
            EntrySource::Journal,
            now - Duration::hours(i as i64),
        );
        entry.record()
    })
    .collect();
    let stats = aggregate_at(&entries, Window::Week, now);
    assert_eq!(stats.total_entries, 3);
    assert_eq!(stats.overall, 100);
    assert!(!stats.insights.is_empty() && stats.insights.len() <= 4);
    assert!(stats.insights[0].contains("very positive outlook"));
}
