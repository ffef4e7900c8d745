//! Journal skills dispatched through the core skill registry.

pub use spark_core::{AgentSkill, SkillRegistry};

mod analyze_sentiment;
mod journal_skill;
mod sentiment_report;

pub use analyze_sentiment::AnalyzeSentiment;
pub use journal_skill::JournalSkill;
pub use sentiment_report::SentimentReport;

use spark_core::{EntryStore, TextAnalyzer, Window};
use std::sync::Arc;

/// Registry with every journal skill wired to one store and analyzer.
pub fn default_registry(
    store: Arc<dyn EntryStore>,
    analyzer: TextAnalyzer,
    default_window: Window,
) -> SkillRegistry {
    let mut registry = SkillRegistry::new();
    registry.register(Arc::new(AnalyzeSentiment::new(analyzer.clone())));
    registry.register(Arc::new(
        JournalSkill::new(Arc::clone(&store), analyzer).with_default_window(default_window),
    ));
    registry.register(Arc::new(
        SentimentReport::new(store).with_default_window(default_window),
    ));
    registry
}
