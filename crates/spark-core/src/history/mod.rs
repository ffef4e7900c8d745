//! History aggregation: window statistics over analyzed entries.
//!
//! Everything here is a pure function of the records and a clock value. [`HistoryStats`] is
//! derived on demand and never stored as a source of truth.

mod emotions;
mod insights;

pub use emotions::{default_distribution, display_name, EmotionShare, MAX_EMOTION_ROWS, MIN_EMOTION_ROWS};
pub use insights::MAX_INSIGHTS;

use crate::analyzer::{round2, Sentiment};
use crate::journal::EntrySource;
use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Weekday buckets, in output order.
pub const TREND_DAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
/// Value reported for a trend bucket with no entries.
pub const NEUTRAL_TREND: u32 = 50;
const TOP_LABELS: usize = 5;
const NEUTRAL_MOOD: f64 = 0.5;

/// Trailing period to aggregate over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Window {
    #[default]
    Week,
    Month,
    All,
}

impl Window {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::All => "all",
        }
    }

    pub fn duration(&self) -> Option<Duration> {
        match self {
            Self::Week => Some(Duration::days(7)),
            Self::Month => Some(Duration::days(30)),
            Self::All => None,
        }
    }

    /// Earliest timestamp inside the window; None when unbounded.
    pub fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.duration().map(|d| now - d)
    }

    /// Inclusive at the cutoff.
    pub fn contains(&self, timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self.cutoff(now) {
            Some(cutoff) => timestamp >= cutoff,
            None => true,
        }
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Window {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week" | "7d" => Ok(Self::Week),
            "month" | "30d" => Ok(Self::Month),
            "all" => Ok(Self::All),
            other => Err(format!("unknown window: {}", other)),
        }
    }
}

fn neutral_mood() -> f64 {
    NEUTRAL_MOOD
}

fn mood_or_neutral<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(d)?.unwrap_or(NEUTRAL_MOOD))
}

/// Known class names (either spelling accepted by `Sentiment::from_str`); anything else is neutral.
fn lenient_sentiment<'de, D: Deserializer<'de>>(d: D) -> Result<Sentiment, D::Error> {
    let raw = Option::<serde_json::Value>::deserialize(d)?;
    Ok(raw
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|s| s.parse().ok())
        .unwrap_or_default())
}

fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

/// Aggregator view of one entry. Missing or null fields fall back to neutral defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryRecord {
    #[serde(default = "neutral_mood", deserialize_with = "mood_or_neutral")]
    pub mood_score: f64,
    #[serde(default, deserialize_with = "lenient_sentiment")]
    pub sentiment: Sentiment,
    #[serde(default, deserialize_with = "null_as_default")]
    pub emotions: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub topics: Vec<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: EntrySource,
}

impl EntryRecord {
    /// Mood score clamped to [0, 1]; non-finite values count as neutral.
    pub fn mood(&self) -> f64 {
        if self.mood_score.is_finite() {
            self.mood_score.clamp(0.0, 1.0)
        } else {
            NEUTRAL_MOOD
        }
    }
}

/// Consistency of mood across a window, from the population variance of mood scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stability {
    #[serde(rename = "Very Stable")]
    VeryStable,
    #[serde(rename = "Stable")]
    Stable,
    #[serde(rename = "Moderate")]
    Moderate,
    #[serde(rename = "Variable")]
    Variable,
    #[serde(rename = "No data")]
    NoData,
}

impl Stability {
    pub fn from_variance(variance: f64) -> Self {
        if variance < 0.02 {
            Self::VeryStable
        } else if variance < 0.05 {
            Self::Stable
        } else if variance < 0.1 {
            Self::Moderate
        } else {
            Self::Variable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeryStable => "Very Stable",
            Self::Stable => "Stable",
            Self::Moderate => "Moderate",
            Self::Variable => "Variable",
            Self::NoData => "No data",
        }
    }
}

impl fmt::Display for Stability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Count of entries per sentiment class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentCounts {
    #[serde(rename = "very positive")]
    pub very_positive: usize,
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    #[serde(rename = "very negative")]
    pub very_negative: usize,
}

impl SentimentCounts {
    pub fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::VeryPositive => self.very_positive += 1,
            Sentiment::Positive => self.positive += 1,
            Sentiment::Neutral => self.neutral += 1,
            Sentiment::Negative => self.negative += 1,
            Sentiment::VeryNegative => self.very_negative += 1,
        }
    }

    pub fn get(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::VeryPositive => self.very_positive,
            Sentiment::Positive => self.positive,
            Sentiment::Neutral => self.neutral,
            Sentiment::Negative => self.negative,
            Sentiment::VeryNegative => self.very_negative,
        }
    }

    pub fn positive_total(&self) -> usize {
        self.total_where(Sentiment::is_positive)
    }

    pub fn negative_total(&self) -> usize {
        self.total_where(Sentiment::is_negative)
    }

    fn total_where(&self, keep: impl Fn(&Sentiment) -> bool) -> usize {
        Sentiment::ALL
            .iter()
            .filter(|s| keep(*s))
            .map(|s| self.get(*s))
            .sum()
    }
}

/// Average mood (0–100) of entries written on one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendBucket {
    pub day: String,
    pub sentiment: u32,
    pub count: usize,
}

/// Where entries came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSources {
    pub journal: usize,
    pub chatbot: usize,
    pub mood: usize,
}

/// Statistics over a window of entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStats {
    pub window: Window,
    pub total_entries: usize,
    /// Share of positive and very positive entries, percent.
    pub positivity_rate: f64,
    /// `positivity_rate` rounded; 50 for an empty window.
    pub overall: u32,
    pub average_mood: f64,
    pub variance: f64,
    pub stability: Stability,
    pub sentiment_counts: SentimentCounts,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    pub trends: Vec<TrendBucket>,
    pub emotions: Vec<EmotionShare>,
    pub top_topics: Vec<String>,
    pub top_emotions: Vec<String>,
    pub insights: Vec<String>,
    pub data_sources: DataSources,
}

impl HistoryStats {
    /// Stats for a window with no entries.
    pub fn empty(window: Window) -> Self {
        Self {
            window,
            total_entries: 0,
            positivity_rate: 0.0,
            overall: NEUTRAL_TREND,
            average_mood: NEUTRAL_MOOD,
            variance: 0.0,
            stability: Stability::NoData,
            sentiment_counts: SentimentCounts::default(),
            positive: 0,
            negative: 0,
            neutral: 0,
            trends: empty_trends(),
            emotions: default_distribution(),
            top_topics: Vec::new(),
            top_emotions: Vec::new(),
            insights: insights::EMPTY_WINDOW_INSIGHTS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            data_sources: DataSources::default(),
        }
    }
}

pub(crate) fn empty_trends() -> Vec<TrendBucket> {
    TREND_DAYS
        .iter()
        .map(|day| TrendBucket {
            day: day.to_string(),
            sentiment: NEUTRAL_TREND,
            count: 0,
        })
        .collect()
}

/// Aggregates `entries` over `window`, ending now.
pub fn aggregate(entries: &[EntryRecord], window: Window) -> HistoryStats {
    aggregate_at(entries, window, Utc::now())
}

/// Aggregates `entries` over `window` ending at `now`.
pub fn aggregate_at(entries: &[EntryRecord], window: Window, now: DateTime<Utc>) -> HistoryStats {
    let data_sources = count_sources(entries);
    let filtered: Vec<EntryRecord> = entries
        .iter()
        .filter(|e| window.contains(e.timestamp, now))
        .cloned()
        .collect();

    tracing::debug!(
        target: "spark::history",
        window = %window,
        total = entries.len(),
        in_window = filtered.len(),
        "aggregating history"
    );

    if filtered.is_empty() {
        return HistoryStats {
            data_sources,
            ..HistoryStats::empty(window)
        };
    }

    let total = filtered.len();
    let mut sentiment_counts = SentimentCounts::default();
    for e in &filtered {
        sentiment_counts.record(e.sentiment);
    }

    let positivity_rate = sentiment_counts.positive_total() as f64 / total as f64 * 100.0;
    let overall = positivity_rate.round() as u32;
    let moods: Vec<f64> = filtered.iter().map(EntryRecord::mood).collect();
    let mean = moods.iter().sum::<f64>() / total as f64;
    let variance = population_variance(&moods, mean);
    let stability = Stability::from_variance(variance);

    let trends = weekday_trends(&filtered);
    let emotions = emotions::distribution(&filtered);
    let top_topics = top_labels(filtered.iter().map(|e| e.topics.as_slice()), TOP_LABELS);
    let top_emotions = top_labels(filtered.iter().map(|e| e.emotions.as_slice()), TOP_LABELS);

    let insights = insights::generate(&insights::InsightInputs {
        total_entries: total,
        overall,
        stability,
        emotions: &emotions,
        trends: &trends,
    });

    HistoryStats {
        window,
        total_entries: total,
        positivity_rate,
        overall,
        average_mood: round2(mean),
        variance,
        stability,
        sentiment_counts,
        positive: sentiment_counts.positive_total(),
        negative: sentiment_counts.negative_total(),
        neutral: sentiment_counts.neutral,
        trends,
        emotions,
        top_topics,
        top_emotions,
        insights,
        data_sources,
    }
}

/// Population variance (divides by n).
pub fn population_variance(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64
}

/// All seven weekday buckets (UTC), Sun..Sat; empty buckets report [`NEUTRAL_TREND`].
pub fn weekday_trends(entries: &[EntryRecord]) -> Vec<TrendBucket> {
    let mut sums = [0.0_f64; 7];
    let mut counts = [0usize; 7];
    for e in entries {
        let idx = e.timestamp.weekday().num_days_from_sunday() as usize;
        sums[idx] += e.mood() * 100.0;
        counts[idx] += 1;
    }
    TREND_DAYS
        .iter()
        .enumerate()
        .map(|(i, day)| TrendBucket {
            day: day.to_string(),
            sentiment: if counts[i] == 0 {
                NEUTRAL_TREND
            } else {
                (sums[i] / counts[i] as f64).round() as u32
            },
            count: counts[i],
        })
        .collect()
}

/// Most frequent labels, ties in first-encounter order.
pub fn top_labels<'a>(groups: impl Iterator<Item = &'a [String]>, limit: usize) -> Vec<String> {
    let mut order: Vec<&'a str> = Vec::new();
    let mut counts: HashMap<&'a str, usize> = HashMap::new();
    for group in groups {
        for label in group {
            let c = counts.entry(label.as_str()).or_insert(0);
            if *c == 0 {
                order.push(label.as_str());
            }
            *c += 1;
        }
    }
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order.into_iter().take(limit).map(str::to_string).collect()
}

fn count_sources(entries: &[EntryRecord]) -> DataSources {
    let mut sources = DataSources::default();
    for e in entries {
        match e.source {
            EntrySource::Journal => sources.journal += 1,
            EntrySource::Chatbot => sources.chatbot += 1,
            EntrySource::Mood => sources.mood += 1,
        }
    }
    sources
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn rec(mood: f64, sentiment: Sentiment, ts: DateTime<Utc>) -> EntryRecord {
        EntryRecord {
            mood_score: mood,
            sentiment,
            emotions: vec![],
            topics: vec![],
            timestamp: ts,
            source: EntrySource::Journal,
        }
    }

    #[test]
    fn sentiment_totals_fold_the_very_classes() {
        let mut counts = SentimentCounts::default();
        for s in [
            Sentiment::VeryNegative,
            Sentiment::Negative,
            Sentiment::Negative,
            Sentiment::Neutral,
            Sentiment::VeryPositive,
        ] {
            counts.record(s);
        }
        assert_eq!(counts.negative_total(), 3);
        assert_eq!(counts.positive_total(), 1);
        assert_eq!(counts.get(Sentiment::Neutral), 1);
    }

    #[test]
    fn window_parsing_and_cutoffs() {
        assert_eq!("Week".parse::<Window>().unwrap(), Window::Week);
        assert_eq!("30d".parse::<Window>().unwrap(), Window::Month);
        assert!("year".parse::<Window>().is_err());
        let now = at(2026, 10, 19);
        assert_eq!(Window::Week.cutoff(now), Some(now - Duration::days(7)));
        assert_eq!(Window::All.cutoff(now), None);
        assert!(Window::Week.contains(now - Duration::days(7), now));
        assert!(!Window::Week.contains(now - Duration::days(7) - Duration::seconds(1), now));
        assert!(Window::All.contains(at(1999, 1, 1), now));
    }

    #[test]
    fn stability_thresholds() {
        assert_eq!(Stability::from_variance(0.0), Stability::VeryStable);
        assert_eq!(Stability::from_variance(0.01), Stability::VeryStable);
        assert_eq!(Stability::from_variance(0.02), Stability::Stable);
        assert_eq!(Stability::from_variance(0.05), Stability::Moderate);
        assert_eq!(Stability::from_variance(0.1), Stability::Variable);
        assert_eq!(Stability::from_variance(0.15), Stability::Variable);
    }

    #[test]
    fn variance_is_population() {
        let v = population_variance(&[0.4, 0.6], 0.5);
        assert!((v - 0.01).abs() < 1e-12);
        assert_eq!(population_variance(&[], 0.0), 0.0);
    }

    #[test]
    fn trends_bucket_by_utc_weekday() {
        // 2026-10-18 is a Sunday, 2026-10-19 a Monday.
        let entries = vec![
            rec(0.8, Sentiment::Positive, at(2026, 10, 18)),
            rec(0.6, Sentiment::Positive, at(2026, 10, 18)),
            rec(0.25, Sentiment::Negative, at(2026, 10, 19)),
        ];
        let trends = weekday_trends(&entries);
        assert_eq!(trends.len(), 7);
        assert_eq!(trends[0].day, "Sun");
        assert_eq!(trends[0].sentiment, 70);
        assert_eq!(trends[0].count, 2);
        assert_eq!(trends[1].sentiment, 25);
        assert!(trends[2..].iter().all(|b| b.sentiment == NEUTRAL_TREND && b.count == 0));
    }

    #[test]
    fn top_labels_break_ties_by_first_encounter() {
        let groups: Vec<Vec<String>> = vec![
            vec!["career".into(), "health".into()],
            vec!["health".into(), "goals".into()],
            vec!["goals".into(), "learning".into()],
        ];
        let top = top_labels(groups.iter().map(|g| g.as_slice()), 3);
        assert_eq!(top, vec!["health", "goals", "career"]);
    }

    #[test]
    fn out_of_range_moods_are_clamped() {
        let now = at(2026, 10, 19);
        let mut wild = rec(7.0, Sentiment::Neutral, now);
        assert_eq!(wild.mood(), 1.0);
        wild.mood_score = f64::NAN;
        assert_eq!(wild.mood(), 0.5);
    }

    #[test]
    fn entries_outside_window_are_ignored_but_sources_count_all() {
        let now = at(2026, 10, 19);
        let mut old = rec(0.1, Sentiment::VeryNegative, now - Duration::days(40));
        old.source = EntrySource::Mood;
        let entries = vec![old, rec(0.9, Sentiment::VeryPositive, now)];
        let stats = aggregate_at(&entries, Window::Month, now);
        assert_eq!(stats.total_entries, 1);
        assert_eq!(stats.positivity_rate, 100.0);
        assert_eq!(stats.data_sources.mood, 1);
        assert_eq!(stats.data_sources.journal, 1);
    }
}
