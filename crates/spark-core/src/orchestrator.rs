//! Skill dispatch: JSON-in/JSON-out capabilities routed by name.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

pub const DEFAULT_USER_ID: &str = "default";

/// Who is calling; skills use it only for log correlation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TenantContext {
    pub tenant_id: String,
    /// Optional correlation id for request tracing.
    #[serde(default)]
    pub correlation_id: Option<String>,
    /// Journal owner. When None or empty, [`DEFAULT_USER_ID`] is used.
    #[serde(default)]
    pub user_id: Option<String>,
}

impl TenantContext {
    pub fn new(tenant_id: impl Into<String>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            ..Self::default()
        }
    }

    /// Resolved user id (never empty).
    pub fn resolved_user_id(&self) -> &str {
        self.user_id
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_USER_ID)
    }
}

#[derive(Debug)]
pub struct UnknownSkill(pub String);

impl fmt::Display for UnknownSkill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown skill: {}", self.0)
    }
}

impl std::error::Error for UnknownSkill {}

/// Trait implemented by every skill.
#[async_trait::async_trait]
pub trait AgentSkill: Send + Sync {
    /// Unique skill name for routing.
    fn name(&self) -> &str;

    async fn execute(
        &self,
        ctx: &TenantContext,
        payload: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, Box<dyn std::error::Error + Send + Sync>>;
}

/// Registry of skills that can be dispatched by name.
pub struct SkillRegistry {
    skills: Vec<Arc<dyn AgentSkill>>,
}

impl SkillRegistry {
    pub fn new() -> Self {
        Self { skills: Vec::new() }
    }

    /// Registers a skill; a later registration with the same name replaces the earlier one.
    pub fn register(&mut self, skill: Arc<dyn AgentSkill>) {
        self.skills.retain(|s| s.name() != skill.name());
        self.skills.push(skill);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn AgentSkill>> {
        self.skills.iter().find(|s| s.name() == name).cloned()
    }

    pub fn skill_names(&self) -> Vec<String> {
        self.skills.iter().map(|s| s.name().to_string()).collect()
    }

    pub async fn dispatch(
        &self,
        name: &str,
        ctx: &TenantContext,
        payload: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, Box<dyn std::error::Error + Send + Sync>> {
        let skill = self
            .get(name)
            .ok_or_else(|| UnknownSkill(name.to_string()))?;
        tracing::debug!(
            target: "spark::skills",
            skill = name,
            tenant = %ctx.tenant_id,
            correlation_id = ctx.correlation_id.as_deref().unwrap_or("-"),
            "Dispatching skill"
        );
        skill.execute(ctx, payload).await
    }
}

impl Default for SkillRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Echo(&'static str);

    #[async_trait::async_trait]
    impl AgentSkill for Echo {
        fn name(&self) -> &str {
            self.0
        }

        async fn execute(
            &self,
            ctx: &TenantContext,
            payload: Option<serde_json::Value>,
        ) -> Result<serde_json::Value, Box<dyn std::error::Error + Send + Sync>> {
            Ok(json!({ "skill": self.0, "user": ctx.resolved_user_id(), "payload": payload }))
        }
    }

    #[tokio::test]
    async fn dispatch_routes_by_name() {
        let mut registry = SkillRegistry::new();
        registry.register(Arc::new(Echo("echo")));
        let ctx = TenantContext::new("t1");
        let out = registry
            .dispatch("echo", &ctx, Some(json!({"x": 1})))
            .await
            .unwrap();
        assert_eq!(out["user"], "default");
        assert_eq!(out["payload"]["x"], 1);
    }

    #[tokio::test]
    async fn unknown_skill_is_an_error() {
        let registry = SkillRegistry::default();
        let err = registry
            .dispatch("missing", &TenantContext::new("t1"), None)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "unknown skill: missing");
    }

    #[test]
    fn register_replaces_same_name() {
        let mut registry = SkillRegistry::new();
        registry.register(Arc::new(Echo("a")));
        registry.register(Arc::new(Echo("b")));
        registry.register(Arc::new(Echo("a")));
        assert_eq!(registry.skill_names(), vec!["b".to_string(), "a".to_string()]);
    }
}
