//! Lexicon: polarity word sets, modifiers, emotion triggers, topic matchers and stop words.
//!
//! A [`Lexicon`] is compiled once from a [`LexiconSource`] (the reference tables or a TOML file)
//! and is immutable afterwards. Analyzers hold it behind an `Arc` so alternate tables can be
//! injected without touching the scoring logic.

mod reference;

pub use reference::REFERENCE_LEXICON_VERSION;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Topic label used when no topic pattern matches.
pub const DEFAULT_TOPIC: &str = "personal reflection";

/// Configuration error raised while compiling a lexicon. Fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    #[error("lexicon table is empty: {0}")]
    EmptyTable(&'static str),
    #[error("invalid modifier for '{word}': {factor} (must be finite and > 0)")]
    InvalidModifier { word: String, factor: f64 },
    #[error("pattern '{label}' has no words")]
    EmptyPattern { label: String },
    #[error("topic pattern '{label}' failed to compile: {source}")]
    TopicPattern {
        label: String,
        #[source]
        source: regex::Error,
    },
    #[error("read lexicon {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse lexicon: {0}")]
    Parse(#[from] toml::de::Error),
}

/// How an intensifier token affects the next sentiment word.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Modifier {
    /// Multiplies the running intensity (boosters > 1, dampeners < 1).
    Scale(f64),
    /// Flips the polarity of the sentiment word that immediately follows.
    Negate,
}

/// Polarity of a lexicon word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Positive,
    Negative,
}

/// Serializable form of the lexicon tables (reference tables or a TOML file).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexiconSource {
    #[serde(default)]
    pub version: String,
    pub positive: Vec<String>,
    pub negative: Vec<String>,
    /// Word (or phrase) -> scaling factor.
    pub intensifiers: BTreeMap<String, f64>,
    #[serde(default)]
    pub negators: Vec<String>,
    /// Emotion label -> trigger words, evaluated in order.
    pub emotions: Vec<PatternSource>,
    /// Topic label -> words, evaluated in order.
    pub topics: Vec<PatternSource>,
    pub stop_words: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternSource {
    pub label: String,
    pub words: Vec<String>,
}

impl LexiconSource {
    /// The tables the engine ships with.
    pub fn reference() -> Self {
        fn words(list: &[&str]) -> Vec<String> {
            list.iter().map(|w| w.to_string()).collect()
        }
        fn patterns(table: &[(&str, &[&str])]) -> Vec<PatternSource> {
            table
                .iter()
                .map(|(label, list)| PatternSource {
                    label: label.to_string(),
                    words: words(list),
                })
                .collect()
        }
        Self {
            version: REFERENCE_LEXICON_VERSION.to_string(),
            positive: words(reference::POSITIVE_WORDS),
            negative: words(reference::NEGATIVE_WORDS),
            intensifiers: reference::INTENSIFIERS
                .iter()
                .map(|(w, f)| (w.to_string(), *f))
                .collect(),
            negators: words(reference::NEGATORS),
            emotions: patterns(reference::EMOTION_PATTERNS),
            topics: patterns(reference::TOPIC_PATTERNS),
            stop_words: words(reference::STOP_WORDS),
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, LexiconError> {
        Ok(toml::from_str(s)?)
    }
}

/// Emotion label with its trigger words.
#[derive(Debug, Clone)]
pub struct EmotionPattern {
    pub label: String,
    triggers: HashSet<String>,
}

impl EmotionPattern {
    pub fn is_triggered_by(&self, token: &str) -> bool {
        self.triggers.contains(token)
    }
}

/// Topic label with a word-boundary alternation matcher over the whole text.
#[derive(Debug, Clone)]
pub struct TopicPattern {
    pub label: String,
    matcher: Regex,
}

impl TopicPattern {
    fn compile(label: &str, words: &[String]) -> Result<Self, LexiconError> {
        let alternation = words
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join("|");
        // ASCII word boundaries: tokens are ASCII word runs, so the matcher must agree with them.
        let matcher = Regex::new(&format!(r"(?-u:\b)(?:{})(?-u:\b)", alternation)).map_err(
            |source| LexiconError::TopicPattern {
                label: label.to_string(),
                source,
            },
        )?;
        Ok(Self {
            label: label.to_string(),
            matcher,
        })
    }

    /// `lowered` must already be lowercase.
    pub fn matches(&self, lowered: &str) -> bool {
        self.matcher.is_match(lowered)
    }
}

/// Compiled, immutable lexicon.
#[derive(Debug, Clone)]
pub struct Lexicon {
    version: String,
    positive: HashSet<String>,
    negative: HashSet<String>,
    modifiers: HashMap<String, Modifier>,
    emotions: Vec<EmotionPattern>,
    topics: Vec<TopicPattern>,
    stop_words: HashSet<String>,
}

static REFERENCE: Lazy<Arc<Lexicon>> = Lazy::new(|| {
    Arc::new(
        Lexicon::compile(LexiconSource::reference())
            .expect("reference lexicon tables are non-empty and valid"),
    )
});

fn normalize(words: Vec<String>) -> HashSet<String> {
    words
        .into_iter()
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

impl Lexicon {
    /// Shared handle to the reference lexicon (compiled on first use).
    pub fn reference() -> Arc<Lexicon> {
        Arc::clone(&REFERENCE)
    }

    /// Reads and compiles a TOML lexicon file.
    pub fn from_path(path: &Path) -> Result<Self, LexiconError> {
        let raw = std::fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let lexicon = Self::compile(LexiconSource::from_toml_str(&raw)?)?;
        tracing::info!(
            target: "spark::lexicon",
            path = %path.display(),
            version = %lexicon.version,
            "loaded lexicon from file"
        );
        Ok(lexicon)
    }

    /// Validates and compiles the tables. Empty tables are rejected: an empty lexicon would
    /// classify every text as neutral.
    pub fn compile(source: LexiconSource) -> Result<Self, LexiconError> {
        let positive = normalize(source.positive);
        if positive.is_empty() {
            return Err(LexiconError::EmptyTable("positive"));
        }
        let negative = normalize(source.negative);
        if negative.is_empty() {
            return Err(LexiconError::EmptyTable("negative"));
        }
        if source.intensifiers.is_empty() {
            return Err(LexiconError::EmptyTable("intensifiers"));
        }
        let mut modifiers = HashMap::with_capacity(source.intensifiers.len() + source.negators.len());
        for (word, factor) in source.intensifiers {
            if !factor.is_finite() || factor <= 0.0 {
                return Err(LexiconError::InvalidModifier { word, factor });
            }
            modifiers.insert(word.trim().to_lowercase(), Modifier::Scale(factor));
        }
        for word in normalize(source.negators) {
            modifiers.insert(word, Modifier::Negate);
        }

        if source.emotions.is_empty() {
            return Err(LexiconError::EmptyTable("emotions"));
        }
        let mut emotions = Vec::with_capacity(source.emotions.len());
        for p in source.emotions {
            let triggers = normalize(p.words);
            if triggers.is_empty() {
                return Err(LexiconError::EmptyPattern { label: p.label });
            }
            emotions.push(EmotionPattern {
                label: p.label,
                triggers,
            });
        }

        if source.topics.is_empty() {
            return Err(LexiconError::EmptyTable("topics"));
        }
        let mut topics = Vec::with_capacity(source.topics.len());
        for p in source.topics {
            let words: Vec<String> = p
                .words
                .iter()
                .map(|w| w.trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect();
            if words.is_empty() {
                return Err(LexiconError::EmptyPattern { label: p.label });
            }
            topics.push(TopicPattern::compile(&p.label, &words)?);
        }

        let stop_words = normalize(source.stop_words);
        if stop_words.is_empty() {
            return Err(LexiconError::EmptyTable("stop_words"));
        }

        Ok(Self {
            version: source.version,
            positive,
            negative,
            modifiers,
            emotions,
            topics,
            stop_words,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn modifier(&self, token: &str) -> Option<Modifier> {
        self.modifiers.get(token).copied()
    }

    pub fn is_negator(&self, token: &str) -> bool {
        matches!(self.modifiers.get(token), Some(Modifier::Negate))
    }

    /// Positive wins if a custom table lists a word in both sets.
    pub fn polarity(&self, token: &str) -> Option<Polarity> {
        if self.positive.contains(token) {
            Some(Polarity::Positive)
        } else if self.negative.contains(token) {
            Some(Polarity::Negative)
        } else {
            None
        }
    }

    pub fn emotions(&self) -> &[EmotionPattern] {
        &self.emotions
    }

    pub fn topics(&self) -> &[TopicPattern] {
        &self.topics
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }
}
