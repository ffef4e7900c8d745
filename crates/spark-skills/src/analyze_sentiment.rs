//! Analyze Sentiment skill: scores free text with the lexicon analyzer.
//! Nothing is stored; the text is never logged.

use spark_core::{AgentSkill, MoodLevel, TenantContext, TextAnalyzer};
use serde::Deserialize;

const SKILL_NAME: &str = "analyze_sentiment";

#[derive(Debug, Deserialize)]
struct AnalyzeSentimentArgs {
    text: String,
}

pub struct AnalyzeSentiment {
    analyzer: TextAnalyzer,
}

impl AnalyzeSentiment {
    pub fn new(analyzer: TextAnalyzer) -> Self {
        Self { analyzer }
    }
}

#[async_trait::async_trait]
impl AgentSkill for AnalyzeSentiment {
    fn name(&self) -> &str {
        SKILL_NAME
    }

    async fn execute(
        &self,
        ctx: &TenantContext,
        payload: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, Box<dyn std::error::Error + Send + Sync>> {
        let payload = payload.ok_or("analyze_sentiment requires payload: { text }")?;
        let args: AnalyzeSentimentArgs = serde_json::from_value(payload)?;
        let analysis = self.analyzer.analyze(&args.text);
        tracing::info!(
            target: "spark::analyzer",
            user = ctx.resolved_user_id(),
            sentiment = %analysis.sentiment,
            words = analysis.word_count,
            "Text analyzed"
        );
        let level = MoodLevel::from_score(analysis.mood_score);

        Ok(serde_json::json!({
            "status": "ok",
            "skill": SKILL_NAME,
            "analysis": analysis,
            "mood_level": level,
        }))
    }
}
