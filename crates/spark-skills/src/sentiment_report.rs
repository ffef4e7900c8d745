//! Sentiment Report skill: window statistics (trend, emotions, stability, insights) over stored entries.

use serde::Deserialize;
use spark_core::{aggregate_entries, AgentSkill, EntryStore, TenantContext, Window};
use std::sync::Arc;

const SKILL_NAME: &str = "sentiment_report";

#[derive(Debug, Default, Deserialize)]
struct SentimentReportArgs {
    #[serde(default)]
    window: Option<Window>,
}

pub struct SentimentReport {
    store: Arc<dyn EntryStore>,
    default_window: Window,
}

impl SentimentReport {
    pub fn new(store: Arc<dyn EntryStore>) -> Self {
        Self {
            store,
            default_window: Window::default(),
        }
    }

    pub fn with_default_window(mut self, window: Window) -> Self {
        self.default_window = window;
        self
    }
}

#[async_trait::async_trait]
impl AgentSkill for SentimentReport {
    fn name(&self) -> &str {
        SKILL_NAME
    }

    async fn execute(
        &self,
        ctx: &TenantContext,
        payload: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, Box<dyn std::error::Error + Send + Sync>> {
        let args: SentimentReportArgs = match payload {
            Some(p) => serde_json::from_value(p)?,
            None => SentimentReportArgs::default(),
        };
        let window = args.window.unwrap_or(self.default_window);

        let store = Arc::clone(&self.store);
        let entries = tokio::task::spawn_blocking(move || store.list_all()).await??;
        // Data sources count every entry; the window only scopes the statistics.
        let stats = aggregate_entries(&entries, window);

        tracing::info!(
            target: "spark::history",
            user = ctx.resolved_user_id(),
            window = %window,
            entries = stats.total_entries,
            stability = %stats.stability,
            "Sentiment report built"
        );

        Ok(serde_json::json!({
            "status": "ok",
            "skill": SKILL_NAME,
            "window": window,
            "stats": stats,
        }))
    }
}
