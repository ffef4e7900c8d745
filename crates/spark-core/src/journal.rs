//! Journal entries: the persisted record, search/filter, journal-level stats, and export.
//!
//! Entries are created once and never edited; deletion removes them wholesale.

use crate::analyzer::{AnalysisResult, TextAnalyzer};
use crate::history::{self, EntryRecord, HistoryStats, SentimentCounts, Window};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

const TITLE_MAX_CHARS: usize = 50;
const TOP_JOURNAL_LABELS: usize = 5;
pub const DEFAULT_MOOD: &str = "happy";

/// Where an entry originated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntrySource {
    #[default]
    Journal,
    #[serde(alias = "chat-conversation")]
    Chatbot,
    #[serde(alias = "mood-tracker")]
    Mood,
}

impl fmt::Display for EntrySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Journal => "journal",
            Self::Chatbot => "chatbot",
            Self::Mood => "mood",
        })
    }
}

/// Coarse label for a mood score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoodLevel {
    Excellent,
    Good,
    Okay,
    Low,
    #[serde(rename = "Very Low")]
    VeryLow,
}

impl MoodLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            Self::Excellent
        } else if score >= 0.6 {
            Self::Good
        } else if score >= 0.4 {
            Self::Okay
        } else if score >= 0.2 {
            Self::Low
        } else {
            Self::VeryLow
        }
    }
}

/// A saved journal entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: String,
    /// Creation day, `YYYY-MM-DD` (UTC).
    pub date: String,
    pub timestamp: DateTime<Utc>,
    pub content: String,
    /// Caller-chosen mood tag (e.g. "happy", "anxious").
    pub mood: String,
    pub analysis: AnalysisResult,
    #[serde(default)]
    pub source: EntrySource,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub word_count: usize,
}

impl JournalEntry {
    /// Builds a new entry stamped now with a fresh id.
    pub fn new(
        content: impl Into<String>,
        mood: impl Into<String>,
        analysis: AnalysisResult,
        source: EntrySource,
    ) -> Self {
        Self::new_at(content, mood, analysis, source, Utc::now())
    }

    pub fn new_at(
        content: impl Into<String>,
        mood: impl Into<String>,
        analysis: AnalysisResult,
        source: EntrySource,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let content = content.into();
        Self {
            id: format!("journal-{}", uuid::Uuid::new_v4()),
            date: timestamp.format("%Y-%m-%d").to_string(),
            timestamp,
            title: generate_title(&content),
            word_count: count_words(&content),
            mood: mood.into(),
            content,
            analysis,
            source,
        }
    }

    /// Analyzes `content` and builds the entry in one step.
    pub fn analyze(
        analyzer: &TextAnalyzer,
        content: impl Into<String>,
        mood: impl Into<String>,
        source: EntrySource,
    ) -> Self {
        let content = content.into();
        let analysis = analyzer.analyze(&content);
        Self::new(content, mood, analysis, source)
    }

    pub fn mood_level(&self) -> MoodLevel {
        MoodLevel::from_score(self.analysis.mood_score)
    }

    pub fn record(&self) -> EntryRecord {
        EntryRecord::from(self)
    }
}

impl From<&JournalEntry> for EntryRecord {
    fn from(entry: &JournalEntry) -> Self {
        EntryRecord {
            mood_score: entry.analysis.mood_score,
            sentiment: entry.analysis.sentiment,
            emotions: entry.analysis.emotions.clone(),
            topics: entry.analysis.topics.clone(),
            timestamp: entry.timestamp,
            source: entry.source,
        }
    }
}

/// First sentence, truncated to 50 characters with a trailing ellipsis.
pub fn generate_title(content: &str) -> String {
    let first = content
        .split(['.', '!', '?'])
        .next()
        .unwrap_or_default()
        .trim();
    if first.chars().count() > TITLE_MAX_CHARS {
        let cut: String = first.chars().take(TITLE_MAX_CHARS).collect();
        format!("{}...", cut)
    } else {
        first.to_string()
    }
}

/// Whitespace-separated word count of the raw text.
pub fn count_words(content: &str) -> usize {
    content.split_whitespace().count()
}

/// Aggregates journal entries over a window.
pub fn aggregate_entries(entries: &[JournalEntry], window: Window) -> HistoryStats {
    let records: Vec<EntryRecord> = entries.iter().map(EntryRecord::from).collect();
    history::aggregate(&records, window)
}

/// Topic filter plus case-insensitive search over content, mood and topics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalQuery {
    /// Only entries tagged with this topic; None or "all" keeps every topic.
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
}

impl JournalQuery {
    pub fn matches(&self, entry: &JournalEntry) -> bool {
        let topic_ok = match self.topic.as_deref() {
            None | Some("all") | Some("") => true,
            Some(topic) => entry.analysis.topics.iter().any(|t| t == topic),
        };
        let search_ok = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(q) => {
                let q = q.to_lowercase();
                entry.content.to_lowercase().contains(&q)
                    || entry.mood.to_lowercase().contains(&q)
                    || entry
                        .analysis
                        .topics
                        .iter()
                        .any(|t| t.to_lowercase().contains(&q))
            }
        };
        topic_ok && search_ok
    }

    pub fn apply<'a>(&self, entries: &'a [JournalEntry]) -> Vec<&'a JournalEntry> {
        entries.iter().filter(|e| self.matches(e)).collect()
    }
}

/// Journal-level statistics over every stored entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalStats {
    pub total_entries: usize,
    pub entries_last_7_days: usize,
    pub positivity_rate: f64,
    pub average_mood: f64,
    pub sentiment_distribution: SentimentCounts,
    pub top_topics: Vec<String>,
    pub top_emotions: Vec<String>,
    pub most_frequent_mood: String,
    /// Distinct writing days relative to weeks covered, percent, capped at 100.
    pub writing_consistency: f64,
    /// Mean content length in characters.
    pub average_entry_length: f64,
}

impl JournalStats {
    /// None for an empty journal.
    pub fn compute(entries: &[JournalEntry]) -> Option<Self> {
        Self::compute_at(entries, Utc::now())
    }

    pub fn compute_at(entries: &[JournalEntry], now: DateTime<Utc>) -> Option<Self> {
        if entries.is_empty() {
            return None;
        }
        let total = entries.len();
        let week_ago = now - Duration::days(7);
        let entries_last_7_days = entries.iter().filter(|e| e.timestamp >= week_ago).count();

        let mut distribution = SentimentCounts::default();
        for e in entries {
            distribution.record(e.analysis.sentiment);
        }
        let positivity_rate = distribution.positive_total() as f64 / total as f64 * 100.0;
        let average_mood =
            entries.iter().map(|e| e.analysis.mood_score).sum::<f64>() / total as f64;

        let top_topics = history::top_labels(
            entries.iter().map(|e| e.analysis.topics.as_slice()),
            TOP_JOURNAL_LABELS,
        );
        let top_emotions = history::top_labels(
            entries.iter().map(|e| e.analysis.emotions.as_slice()),
            TOP_JOURNAL_LABELS,
        );
        let moods: Vec<String> = entries.iter().map(|e| e.mood.clone()).collect();
        let most_frequent_mood = history::top_labels(std::iter::once(moods.as_slice()), 1)
            .into_iter()
            .next()
            .unwrap_or_else(|| DEFAULT_MOOD.to_string());

        let writing_days: HashSet<&str> = entries.iter().map(|e| e.date.as_str()).collect();
        let consistency = writing_days.len() as f64 / (total as f64 / 7.0).max(1.0);
        let average_entry_length =
            entries.iter().map(|e| e.content.chars().count()).sum::<usize>() as f64 / total as f64;

        Some(Self {
            total_entries: total,
            entries_last_7_days,
            positivity_rate,
            average_mood,
            sentiment_distribution: distribution,
            top_topics,
            top_emotions,
            most_frequent_mood,
            writing_consistency: (consistency * 100.0).min(100.0),
            average_entry_length,
        })
    }
}

/// Downloadable journal bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalExport {
    pub entries: Vec<JournalEntry>,
    pub stats: Option<JournalStats>,
    pub export_date: DateTime<Utc>,
}

impl JournalExport {
    pub fn new(entries: Vec<JournalEntry>) -> Self {
        let stats = JournalStats::compute(&entries);
        Self {
            entries,
            stats,
            export_date: Utc::now(),
        }
    }

    /// Suggested file name, `journal-export-YYYY-MM-DD.json`.
    pub fn file_name(&self) -> String {
        format!("journal-export-{}.json", self.export_date.format("%Y-%m-%d"))
    }
}

/// Counts of entries per mood tag, for mood pickers that show usage.
pub fn mood_frequency(entries: &[JournalEntry]) -> HashMap<String, usize> {
    let mut out = HashMap::new();
    for e in entries {
        *out.entry(e.mood.clone()).or_insert(0) += 1;
    }
    out
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry_at(text: &str, mood: &str, ts: DateTime<Utc>) -> JournalEntry {
        let analysis = TextAnalyzer::default().analyze(text);
        JournalEntry::new_at(text, mood, analysis, EntrySource::Journal, ts)
    }

    #[test]
    fn title_is_first_sentence_truncated() {
        assert_eq!(generate_title("Great day. Then rain!"), "Great day");
        assert_eq!(generate_title("   "), "");
        let long = "a".repeat(60);
        let title = generate_title(&long);
        assert_eq!(title.len(), 53);
        assert!(title.ends_with("..."));
    }

    #[test]
    fn new_entry_fills_derived_fields() {
        let ts = Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap();
        let e = entry_at("Loved my design class today! More tomorrow.", "inspired", ts);
        assert!(e.id.starts_with("journal-"));
        assert_eq!(e.date, "2026-10-19");
        assert_eq!(e.title, "Loved my design class today");
        assert_eq!(e.word_count, 7);
        assert_eq!(e.source, EntrySource::Journal);
        assert!(e.analysis.topics.contains(&"design".to_string()));
    }

    #[test]
    fn mood_levels() {
        assert_eq!(MoodLevel::from_score(0.85), MoodLevel::Excellent);
        assert_eq!(MoodLevel::from_score(0.6), MoodLevel::Good);
        assert_eq!(MoodLevel::from_score(0.4), MoodLevel::Okay);
        assert_eq!(MoodLevel::from_score(0.2), MoodLevel::Low);
        assert_eq!(MoodLevel::from_score(0.0), MoodLevel::VeryLow);
    }

    #[test]
    fn query_filters_topic_and_search() {
        let now = Utc::now();
        let entries = vec![
            entry_at("My job interview went well", "happy", now),
            entry_at("Cooking with family", "peaceful", now),
        ];
        let career = JournalQuery {
            topic: Some("career".to_string()),
            search: None,
        };
        assert_eq!(career.apply(&entries).len(), 1);

        let by_mood = JournalQuery {
            topic: Some("all".to_string()),
            search: Some("PEACE".to_string()),
        };
        let hits = by_mood.apply(&entries);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].mood, "peaceful");

        let by_topic_text = JournalQuery {
            topic: None,
            search: Some("hobb".to_string()),
        };
        assert_eq!(by_topic_text.apply(&entries).len(), 1);
        assert_eq!(JournalQuery::default().apply(&entries).len(), 2);
    }

    #[test]
    fn journal_stats_over_entries() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        let entries = vec![
            entry_at("So happy about my project", "happy", now),
            entry_at("Tired and stressed about the exam", "tired", now - Duration::days(1)),
            entry_at("Grateful for my friend", "happy", now - Duration::days(10)),
        ];
        let stats = JournalStats::compute_at(&entries, now).unwrap();
        assert_eq!(stats.total_entries, 3);
        assert_eq!(stats.entries_last_7_days, 2);
        assert!((stats.positivity_rate - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.most_frequent_mood, "happy");
        assert_eq!(stats.writing_consistency, 100.0);
        assert!(JournalStats::compute_at(&[], now).is_none());
    }

    #[test]
    fn export_carries_entries_and_stats() {
        let e = entry_at("Calm evening", "peaceful", Utc::now());
        let export = JournalExport::new(vec![e]);
        assert!(export.stats.is_some());
        assert!(export.file_name().starts_with("journal-export-"));
        let v = serde_json::to_value(&export).unwrap();
        assert!(v.get("exportDate").is_some());
        assert_eq!(v["entries"][0]["mood"], "peaceful");
    }

    #[test]
    fn mood_frequency_and_entry_mood_level() {
        let now = Utc::now();
        let entries = vec![
            entry_at("Amazing wonderful day", "happy", now),
            entry_at("I am not happy", "sad", now),
            entry_at("Quiet walk", "happy", now),
        ];
        let freq = mood_frequency(&entries);
        assert_eq!(freq.get("happy"), Some(&2));
        assert_eq!(freq.get("sad"), Some(&1));
        assert_eq!(entries[0].mood_level(), MoodLevel::Excellent);
        assert_eq!(entries[1].mood_level(), MoodLevel::VeryLow);
        assert_eq!(entries[2].mood_level(), MoodLevel::Okay);
    }

    #[test]
    fn aggregate_entries_matches_record_aggregation() {
        let now = Utc::now();
        let entries = vec![entry_at("Great progress", "happy", now)];
        let stats = aggregate_entries(&entries, Window::Week);
        assert_eq!(stats.total_entries, 1);
        assert_eq!(stats.positive, 1);
    }

    #[test]
    fn source_aliases_deserialize() {
        let s: EntrySource = serde_json::from_str("\"chat-conversation\"").unwrap();
        assert_eq!(s, EntrySource::Chatbot);
        let s: EntrySource = serde_json::from_str("\"mood-tracker\"").unwrap();
        assert_eq!(s, EntrySource::Mood);
    }
}
