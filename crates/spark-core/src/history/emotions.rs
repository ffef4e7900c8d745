//! Emotion distribution over a window of entries.

use super::EntryRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Rows returned to callers are never fewer than this.
pub const MIN_EMOTION_ROWS: usize = 4;
pub const MAX_EMOTION_ROWS: usize = 8;

/// Default categories, largest first. Used for the empty window and to pad sparse windows.
const DEFAULT_CATEGORIES: &[(&str, &str, u32)] = &[
    ("joy", "Joy & Happiness", 25),
    ("contentment", "Contentment", 20),
    ("anxiety", "Anxiety & Worry", 15),
    ("excitement", "Excitement", 15),
    ("gratitude", "Gratitude", 10),
    ("frustration", "Frustration", 8),
    ("sadness", "Sadness", 5),
    ("overwhelm", "Overwhelm", 2),
];

/// One row of the emotion distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionShare {
    /// Raw label as stored on entries.
    pub label: String,
    /// Human-readable category name.
    pub name: String,
    /// Percentage of entries in the window carrying this label, rounded.
    pub value: u32,
    pub raw_count: usize,
    /// False for rows padded from the default categories.
    pub observed: bool,
}

/// Display name for an emotion (or sentiment) label.
pub fn display_name(label: &str) -> String {
    let mapped = match label {
        "joy" | "happy" | "very positive" => "Joy & Happiness",
        "gratitude" => "Gratitude",
        "excited" | "excitement" => "Excitement",
        "anxiety" | "anxious" | "worried" | "negative" => "Anxiety & Worry",
        "sad" | "sadness" | "very negative" => "Sadness",
        "anger" | "angry" | "frustrated" | "frustration" => "Frustration",
        "content" | "contentment" | "peaceful" | "positive" => "Contentment",
        "overwhelmed" | "overwhelm" => "Overwhelm",
        "neutral" => "Neutral",
        other => return capitalize(other),
    };
    mapped.to_string()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// All default categories (what an empty window shows).
pub fn default_distribution() -> Vec<EmotionShare> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|(label, name, value)| EmotionShare {
            label: label.to_string(),
            name: name.to_string(),
            value: *value,
            raw_count: 0,
            observed: false,
        })
        .collect()
}

/// Counts labels across entries (once per entry), as a percentage of `entries.len()`, sorted
/// by count descending with ties in first-seen order, capped at [`MAX_EMOTION_ROWS`] and padded from the
/// default categories up to [`MIN_EMOTION_ROWS`].
pub fn distribution(entries: &[EntryRecord]) -> Vec<EmotionShare> {
    let total = entries.len();
    if total == 0 {
        return default_distribution();
    }

    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for entry in entries {
        let mut seen_in_entry: Vec<&str> = Vec::new();
        for label in &entry.emotions {
            if seen_in_entry.contains(&label.as_str()) {
                continue;
            }
            seen_in_entry.push(label);
            let count = counts.entry(label.clone()).or_insert(0);
            if *count == 0 {
                order.push(label.clone());
            }
            *count += 1;
        }
    }

    let mut rows: Vec<EmotionShare> = order
        .into_iter()
        .map(|label| {
            let raw_count = counts.get(&label).copied().unwrap_or(0);
            EmotionShare {
                name: display_name(&label),
                value: percent(raw_count, total),
                label,
                raw_count,
                observed: true,
            }
        })
        .collect();
    // Stable sort keeps first-seen order among equal counts.
    rows.sort_by(|a, b| b.raw_count.cmp(&a.raw_count));
    rows.truncate(MAX_EMOTION_ROWS);

    if rows.len() < MIN_EMOTION_ROWS {
        for pad in default_distribution() {
            if rows.len() >= MIN_EMOTION_ROWS {
                break;
            }
            if rows.iter().any(|r| r.name == pad.name) {
                continue;
            }
            rows.push(pad);
        }
    }
    rows
}

fn percent(count: usize, total: usize) -> u32 {
    ((count as f64 / total as f64) * 100.0).round() as u32
}
