//! TextAnalyzer: lexicon scoring of free text into an [`AnalysisResult`].
//!
//! Pure computation over the input string and an immutable [`Lexicon`]; safe to share across
//! threads. Raw text is never logged, only counts.

use crate::lexicon::{Lexicon, LexiconError, Modifier, Polarity, DEFAULT_TOPIC};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Weight of a negated positive word, added to the negative score.
const NEGATED_POSITIVE_WEIGHT: f64 = 0.7;
/// Weight of a negated negative word, added to the positive score.
const NEGATED_NEGATIVE_WEIGHT: f64 = 0.5;
const MAX_CONTENT_KEYWORDS: usize = 10;
const MAX_KEYWORDS: usize = 8;
const MIN_KEYWORD_LEN: usize = 4;

static WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-z0-9_]+").expect("static word pattern compiles"));

/// Five-band sentiment class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Sentiment {
    #[serde(rename = "very positive")]
    VeryPositive,
    #[serde(rename = "positive")]
    Positive,
    #[default]
    #[serde(rename = "neutral")]
    Neutral,
    #[serde(rename = "negative")]
    Negative,
    #[serde(rename = "very negative")]
    VeryNegative,
}

impl Sentiment {
    /// All classes, most positive first.
    pub const ALL: [Sentiment; 5] = [
        Sentiment::VeryPositive,
        Sentiment::Positive,
        Sentiment::Neutral,
        Sentiment::Negative,
        Sentiment::VeryNegative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeryPositive => "very positive",
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
            Self::VeryNegative => "very negative",
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(self, Self::VeryPositive | Self::Positive)
    }

    pub fn is_negative(&self) -> bool {
        matches!(self, Self::VeryNegative | Self::Negative)
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase().replace(['_', '-'], " ");
        Sentiment::ALL
            .into_iter()
            .find(|c| c.as_str() == lowered)
            .ok_or_else(|| format!("unknown sentiment: {}", s))
    }
}

/// Result of analyzing one text. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub sentiment: Sentiment,
    /// 0.0–1.0, two decimals.
    pub confidence: f64,
    /// 0.0 (most negative) – 1.0 (most positive), two decimals.
    pub mood_score: f64,
    pub positive_score: f64,
    pub negative_score: f64,
    /// Detected emotion labels, first detection first.
    pub emotions: Vec<String>,
    /// Matched topics in table order; never empty.
    pub topics: Vec<String>,
    pub keywords: Vec<String>,
    pub word_count: usize,
    pub analysis_time: DateTime<Utc>,
}

impl AnalysisResult {
    /// Field-for-field equality ignoring `analysis_time`.
    pub fn same_analysis(&self, other: &AnalysisResult) -> bool {
        self.sentiment == other.sentiment
            && self.confidence == other.confidence
            && self.mood_score == other.mood_score
            && self.positive_score == other.positive_score
            && self.negative_score == other.negative_score
            && self.emotions == other.emotions
            && self.topics == other.topics
            && self.keywords == other.keywords
            && self.word_count == other.word_count
    }
}

/// Accumulated polarity scores for a token stream.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Scores {
    positive: f64,
    negative: f64,
}

/// Lowercases and splits text into ASCII word runs (`[a-z0-9_]+`); everything else separates.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD_RE
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Maps the positive share of the total score to (sentiment, confidence, mood score).
pub fn classify(positive: f64, negative: f64) -> (Sentiment, f64, f64) {
    let total = positive + negative;
    if total <= 0.0 {
        return (Sentiment::Neutral, 0.5, 0.5);
    }
    let ratio = positive / total;
    if ratio > 0.7 {
        (Sentiment::VeryPositive, ratio.min(0.95), 0.7 + ratio * 0.3)
    } else if ratio > 0.6 {
        (Sentiment::Positive, ratio.min(0.9), 0.5 + ratio * 0.4)
    } else if ratio > 0.4 {
        (Sentiment::Neutral, 0.7, 0.4 + ratio * 0.3)
    } else if ratio > 0.3 {
        (Sentiment::Negative, (1.0 - ratio).min(0.8), ratio * 0.6)
    } else {
        (Sentiment::VeryNegative, (1.0 - ratio).min(0.9), ratio * 0.4)
    }
}

/// Rounds to two decimals, half away from zero (equals half-up for the non-negative values here).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Stateless scoring engine over an injected lexicon.
#[derive(Debug, Clone)]
pub struct TextAnalyzer {
    lexicon: Arc<Lexicon>,
}

impl Default for TextAnalyzer {
    fn default() -> Self {
        Self::new(Lexicon::reference())
    }
}

impl TextAnalyzer {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    /// Analyzer over a TOML lexicon file, or the reference lexicon when `path` is None.
    pub fn try_new(path: Option<&std::path::Path>) -> Result<Self, LexiconError> {
        match path {
            Some(p) => Ok(Self::new(Arc::new(Lexicon::from_path(p)?))),
            None => Ok(Self::default()),
        }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Analyzes `text`. Total over all inputs.
    pub fn analyze(&self, text: &str) -> AnalysisResult {
        let lowered = text.to_lowercase();
        let tokens: Vec<&str> = WORD_RE.find_iter(&lowered).map(|m| m.as_str()).collect();

        let (scores, emotions) = self.score(&tokens);
        let (sentiment, confidence, mood_score) = classify(scores.positive, scores.negative);
        let topics = self.extract_topics(&lowered);
        let keywords = self.extract_keywords(&tokens, &emotions);

        tracing::debug!(
            target: "spark::analyzer",
            word_count = tokens.len(),
            sentiment = %sentiment,
            emotions = emotions.len(),
            topics = topics.len(),
            "analyzed text"
        );

        AnalysisResult {
            sentiment,
            confidence: round2(confidence).clamp(0.0, 1.0),
            mood_score: round2(mood_score).clamp(0.0, 1.0),
            positive_score: scores.positive,
            negative_score: scores.negative,
            emotions,
            topics,
            keywords,
            word_count: tokens.len(),
            analysis_time: Utc::now(),
        }
    }

    /// Left-to-right walk: modifiers adjust the running intensity until a sentiment word
    /// consumes it; negation looks back exactly one token.
    fn score(&self, tokens: &[&str]) -> (Scores, Vec<String>) {
        let lex = &self.lexicon;
        let mut scores = Scores::default();
        let mut emotions: Vec<String> = Vec::new();
        let mut intensity = 1.0_f64;

        for (i, token) in tokens.iter().enumerate() {
            if let Some(modifier) = lex.modifier(token) {
                if let Modifier::Scale(factor) = modifier {
                    intensity *= factor;
                }
                continue;
            }

            for pattern in lex.emotions() {
                if pattern.is_triggered_by(token) && !emotions.iter().any(|e| e == &pattern.label) {
                    emotions.push(pattern.label.clone());
                }
            }

            let negated = i > 0 && lex.is_negator(tokens[i - 1]);
            match lex.polarity(token) {
                Some(Polarity::Positive) => {
                    if negated {
                        scores.negative += intensity * NEGATED_POSITIVE_WEIGHT;
                    } else {
                        scores.positive += intensity;
                    }
                    intensity = 1.0;
                }
                Some(Polarity::Negative) => {
                    if negated {
                        scores.positive += intensity * NEGATED_NEGATIVE_WEIGHT;
                    } else {
                        scores.negative += intensity;
                    }
                    intensity = 1.0;
                }
                None => {}
            }
        }
        (scores, emotions)
    }

    fn extract_topics(&self, lowered: &str) -> Vec<String> {
        let topics: Vec<String> = self
            .lexicon
            .topics()
            .iter()
            .filter(|t| t.matches(lowered))
            .map(|t| t.label.clone())
            .collect();
        if topics.is_empty() {
            vec![DEFAULT_TOPIC.to_string()]
        } else {
            topics
        }
    }

    fn extract_keywords(&self, tokens: &[&str], emotions: &[String]) -> Vec<String> {
        let content = tokens
            .iter()
            .filter(|t| t.len() >= MIN_KEYWORD_LEN && !self.lexicon.is_stop_word(t))
            .take(MAX_CONTENT_KEYWORDS)
            .map(|t| t.to_string());

        let mut keywords: Vec<String> = Vec::with_capacity(MAX_KEYWORDS);
        for word in content.chain(emotions.iter().cloned()) {
            if keywords.len() == MAX_KEYWORDS {
                break;
            }
            if !keywords.contains(&word) {
                keywords.push(word);
            }
        }
        keywords
    }
}
