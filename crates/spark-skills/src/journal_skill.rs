//! Journal skill: save, delete, list and export journal entries.
//! Raw journal text is never logged; only ids, counts and labels.

use serde::Deserialize;
use chrono::Utc;
use spark_core::{
    mood_frequency, AgentSkill, EntrySource, EntryStore, JournalEntry, JournalExport,
    JournalQuery, JournalStats, TenantContext, TextAnalyzer, Window, DEFAULT_MOOD,
};
use std::sync::Arc;

const SKILL_NAME: &str = "journal";

#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
enum JournalAction {
    Save {
        content: String,
        #[serde(default)]
        mood: Option<String>,
        #[serde(default)]
        source: EntrySource,
    },
    Delete {
        id: String,
    },
    List {
        #[serde(default)]
        window: Option<Window>,
        #[serde(default)]
        topic: Option<String>,
        #[serde(default)]
        query: Option<String>,
    },
    Export,
}

pub struct JournalSkill {
    store: Arc<dyn EntryStore>,
    analyzer: TextAnalyzer,
    default_window: Window,
}

impl JournalSkill {
    pub fn new(store: Arc<dyn EntryStore>, analyzer: TextAnalyzer) -> Self {
        Self {
            store,
            analyzer,
            default_window: Window::default(),
        }
    }

    pub fn with_default_window(mut self, window: Window) -> Self {
        self.default_window = window;
        self
    }

    async fn save(
        &self,
        user: &str,
        content: String,
        mood: Option<String>,
        source: EntrySource,
    ) -> Result<serde_json::Value, Box<dyn std::error::Error + Send + Sync>> {
        if content.trim().is_empty() {
            return Err("journal save requires non-empty content".into());
        }
        let mood = mood
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MOOD.to_string());
        let entry = JournalEntry::analyze(&self.analyzer, content, mood, source);

        let store = Arc::clone(&self.store);
        let saved = entry.clone();
        tokio::task::spawn_blocking(move || store.create(&saved)).await??;

        tracing::info!(
            target: "spark::journal",
            user,
            id = %entry.id,
            sentiment = %entry.analysis.sentiment,
            topics = entry.analysis.topics.len(),
            "Journal entry saved"
        );
        Ok(serde_json::json!({
            "status": "ok",
            "skill": SKILL_NAME,
            "action": "save",
            "mood_level": entry.mood_level(),
            "entry": entry,
        }))
    }

    async fn delete(
        &self,
        user: &str,
        id: String,
    ) -> Result<serde_json::Value, Box<dyn std::error::Error + Send + Sync>> {
        let store = Arc::clone(&self.store);
        let target = id.clone();
        let deleted = tokio::task::spawn_blocking(move || store.delete(&target)).await??;
        tracing::info!(target: "spark::journal", user, id = %id, deleted, "Journal entry delete");
        Ok(serde_json::json!({
            "status": "ok",
            "skill": SKILL_NAME,
            "action": "delete",
            "id": id,
            "deleted": deleted,
        }))
    }

    async fn list(
        &self,
        window: Option<Window>,
        topic: Option<String>,
        query: Option<String>,
    ) -> Result<serde_json::Value, Box<dyn std::error::Error + Send + Sync>> {
        let window = window.unwrap_or(self.default_window);
        let store = Arc::clone(&self.store);
        let entries = tokio::task::spawn_blocking(move || store.list_all()).await??;
        let filter = JournalQuery {
            topic,
            search: query,
        };
        // The window scopes the listing; stats and mood counts cover the whole journal.
        let now = Utc::now();
        let matched: Vec<&JournalEntry> = filter
            .apply(&entries)
            .into_iter()
            .filter(|e| window.contains(e.timestamp, now))
            .collect();
        let stats = JournalStats::compute_at(&entries, now);
        let moods = mood_frequency(&entries);
        Ok(serde_json::json!({
            "status": "ok",
            "skill": SKILL_NAME,
            "action": "list",
            "window": window,
            "count": matched.len(),
            "entries": matched,
            "stats": stats,
            "mood_frequency": moods,
        }))
    }

    async fn export(&self) -> Result<serde_json::Value, Box<dyn std::error::Error + Send + Sync>> {
        let store = Arc::clone(&self.store);
        let entries = tokio::task::spawn_blocking(move || store.list_all()).await??;
        let export = JournalExport::new(entries);
        tracing::info!(
            target: "spark::journal",
            entries = export.entries.len(),
            "Journal exported"
        );
        Ok(serde_json::json!({
            "status": "ok",
            "skill": SKILL_NAME,
            "action": "export",
            "file_name": export.file_name(),
            "export": export,
        }))
    }
}

#[async_trait::async_trait]
impl AgentSkill for JournalSkill {
    fn name(&self) -> &str {
        SKILL_NAME
    }

    async fn execute(
        &self,
        ctx: &TenantContext,
        payload: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, Box<dyn std::error::Error + Send + Sync>> {
        let payload = payload.ok_or("journal requires payload: { action, ... }")?;
        let action: JournalAction = serde_json::from_value(payload)?;
        let user = ctx.resolved_user_id();
        match action {
            JournalAction::Save {
                content,
                mood,
                source,
            } => self.save(user, content, mood, source).await,
            JournalAction::Delete { id } => self.delete(user, id).await,
            JournalAction::List {
                window,
                topic,
                query,
            } => self.list(window, topic, query).await,
            JournalAction::Export => self.export().await,
        }
    }
}
