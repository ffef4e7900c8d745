//! Spark digest daemon
//!
//! Opens the journal store and, on every tick, builds the sentiment report for the
//! configured window and logs its stability and insights.

use spark_core::{CoreConfig, EntryStore, SledEntryStore, TenantContext, TextAnalyzer};
use spark_skills::{default_registry, SkillRegistry};
use std::{sync::Arc, time::Duration};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DAEMON_TENANT: &str = "spark-daemon";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Load .env file if present (before any env::var calls)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[spark-daemon] .env not loaded: {} (using system environment)", e);
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CoreConfig::load()?;

    // Lexicon problems are fatal at startup.
    let analyzer = match TextAnalyzer::try_new(config.lexicon_path().as_deref()) {
        Ok(a) => a,
        Err(e) => {
            tracing::error!(target: "spark::daemon", error = %e, "Lexicon failed to load");
            return Err(e.into());
        }
    };

    // NOTE: sled is single-writer; run one daemon per storage path.
    let store: Arc<dyn EntryStore> = Arc::new(SledEntryStore::open_path(&config.storage_path())?);
    let registry = default_registry(Arc::clone(&store), analyzer.clone(), config.default_window);
    let tick_rate = config.tick_rate_secs.max(1);

    tracing::info!(
        target: "spark::daemon",
        app = %config.app_name,
        lexicon = analyzer.lexicon().version(),
        tick_rate_secs = tick_rate,
        window = %config.default_window,
        storage_path = %config.storage_path,
        skills = ?registry.skill_names(),
        "Spark daemon started"
    );

    let ctx = TenantContext::new(DAEMON_TENANT);
    let mut interval = tokio::time::interval(Duration::from_secs(tick_rate));

    loop {
        tokio::select! {
            _ = interval.tick() => {
                if let Err(e) = tick(&registry, &ctx).await {
                    tracing::warn!(target: "spark::daemon", error = %e, "digest tick failed");
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!(target: "spark::daemon", "CTRL-C received; shutting down daemon");
                break;
            }
        }
    }
    Ok(())
}

async fn tick(
    registry: &SkillRegistry,
    ctx: &TenantContext,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let report = registry.dispatch("sentiment_report", ctx, None).await?;
    let stats = &report["stats"];
    tracing::info!(
        target: "spark::daemon",
        window = report["window"].as_str().unwrap_or("week"),
        entries = stats["totalEntries"].as_u64().unwrap_or(0),
        overall = stats["overall"].as_u64().unwrap_or(0),
        stability = stats["stability"].as_str().unwrap_or("No data"),
        "Digest computed"
    );
    if let Some(insights) = stats["insights"].as_array() {
        for insight in insights.iter().filter_map(|v| v.as_str()) {
            tracing::info!(target: "spark::daemon", "{}", insight);
        }
    }
    Ok(())
}
