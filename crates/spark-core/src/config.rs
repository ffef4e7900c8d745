//! Runtime configuration loaded from an optional TOML file and the environment.
//!
//! | Env | Default | Description |
//! |-----|---------|-------------|
//! | SPARK_CONFIG | config/spark | Config file path (extension optional). |
//! | SPARK__STORAGE_PATH | ./data/spark_journal | Sled directory for journal entries. |
//! | SPARK__LEXICON_PATH | (unset) | TOML lexicon replacing the reference tables. |
//! | SPARK__DEFAULT_WINDOW | week | Window for reports when the caller gives none. |
//! | SPARK__TICK_RATE_SECS | 3600 | Digest daemon interval. |
//! | SPARK_JOURNAL_KEY | (unset) | 64 hex chars; encrypts entries at rest. |

use crate::history::Window;
use crate::store::{parse_key, StoreError, ENV_JOURNAL_KEY};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const ENV_CONFIG_PATH: &str = "SPARK_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/spark";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreConfig {
    pub app_name: String,
    pub storage_path: String,
    #[serde(default)]
    pub lexicon_path: Option<String>,
    #[serde(default)]
    pub default_window: Window,
    pub tick_rate_secs: u64,
}

impl CoreConfig {
    /// Precedence: env `SPARK__*` > file at `SPARK_CONFIG` (or `config/spark`) > defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let built = config::Config::builder()
            .set_default("app_name", "Spark Journal")?
            .set_default("storage_path", "./data/spark_journal")?
            .set_default("default_window", "week")?
            .set_default("tick_rate_secs", 3600_i64)?
            .add_source(config::File::with_name(&config_path).required(false))
            .add_source(config::Environment::with_prefix("SPARK").separator("__"))
            .build()?;
        built.try_deserialize()
    }

    pub fn storage_path(&self) -> PathBuf {
        PathBuf::from(&self.storage_path)
    }

    pub fn lexicon_path(&self) -> Option<PathBuf> {
        self.lexicon_path
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
    }
}

/// Journal encryption key from `SPARK_JOURNAL_KEY`. Unset or blank => None.
pub fn journal_key_from_env() -> Result<Option<[u8; 32]>, StoreError> {
    match std::env::var(ENV_JOURNAL_KEY) {
        Ok(hex) if !hex.trim().is_empty() => parse_key(&hex).map(Some),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexicon_path_ignores_blank() {
        let mut cfg = CoreConfig {
            app_name: "t".to_string(),
            storage_path: "./x".to_string(),
            lexicon_path: Some("  ".to_string()),
            default_window: Window::Week,
            tick_rate_secs: 1,
        };
        assert!(cfg.lexicon_path().is_none());
        cfg.lexicon_path = Some("lex.toml".to_string());
        assert_eq!(cfg.lexicon_path(), Some(PathBuf::from("lex.toml")));
    }

    #[test]
    fn config_deserializes_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spark.toml");
        std::fs::write(
            &path,
            "app_name = \"Test\"\nstorage_path = \"/tmp/j\"\ndefault_window = \"month\"\ntick_rate_secs = 5\n",
        )
        .unwrap();
        let cfg: CoreConfig = config::Config::builder()
            .add_source(config::File::from(path.as_path()))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(cfg.default_window, Window::Month);
        assert_eq!(cfg.tick_rate_secs, 5);
        assert!(cfg.lexicon_path.is_none());
    }
}
