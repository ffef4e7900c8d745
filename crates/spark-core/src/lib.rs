//! spark-core: journal sentiment engine (lexicon analyzer, history statistics, entry store).
//!
//! Re-exports the analyzer, aggregator, journal and store types so skills and the
//! daemon keep a consistent public API.

mod analyzer;
mod config;
pub mod history;
mod journal;
pub mod lexicon;
mod orchestrator;
mod store;

pub use analyzer::{classify, round2, tokenize, AnalysisResult, Sentiment, TextAnalyzer};
pub use config::{journal_key_from_env, CoreConfig};
pub use history::{
    aggregate, aggregate_at, DataSources, EmotionShare, EntryRecord, HistoryStats,
    SentimentCounts, Stability, TrendBucket, Window,
};
pub use journal::{
    aggregate_entries, count_words, generate_title, mood_frequency,
    EntrySource, JournalEntry, JournalExport, JournalQuery, JournalStats, MoodLevel,
    DEFAULT_MOOD,
};
pub use lexicon::{Lexicon, LexiconError, LexiconSource, REFERENCE_LEXICON_VERSION};
pub use orchestrator::{AgentSkill, SkillRegistry, TenantContext, UnknownSkill, DEFAULT_USER_ID};
pub use store::{
    parse_key, EntryStore, MemoryEntryStore, SledEntryStore, StoreError, ENV_JOURNAL_KEY,
};
