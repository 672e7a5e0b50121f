//! CLI configuration

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tessera_service::EngineConfig;

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "TESSERA_CONFIG";

/// Get default config directory
pub fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".tessera")
}

pub fn config_file_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| default_config_dir().join("config.toml"))
}

/// Configuration for the CLI
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Graph document loaded when `--graph` is absent
    pub graph: Option<PathBuf>,
    /// Project used when `--project` is absent
    pub project: Option<String>,
    /// Caller identity used when `--caller` is absent
    pub caller: Option<String>,
    pub engine: EngineConfig,
}

impl Config {
    /// Load from the config file; a missing file yields defaults
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&config_file_path())
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        config.engine.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&config_file_path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        tracing::debug!("Saved config to {:?}", path);
        Ok(())
    }

    /// Every settable key, engine settings as `engine.<name>`
    pub fn keys() -> Vec<String> {
        let mut keys = vec!["graph".to_string(), "project".to_string(), "caller".to_string()];
        if let Ok(serde_json::Value::Object(engine)) = serde_json::to_value(EngineConfig::default())
        {
            keys.extend(engine.keys().map(|k| format!("engine.{}", k)));
        }
        keys
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "graph" => self.graph.as_ref().map(|p| p.display().to_string()),
            "project" => self.project.clone(),
            "caller" => self.caller.clone(),
            _ => {
                let field = key.strip_prefix("engine.")?;
                let engine = serde_json::to_value(&self.engine).ok()?;
                engine.get(field).map(|v| v.to_string())
            }
        }
    }

    /// Set a key; engine values must be positive integers and pass validation
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "graph" => self.graph = Some(PathBuf::from(value)),
            "project" => self.project = Some(value.to_string()),
            "caller" => self.caller = Some(value.to_string()),
            _ => {
                let field = key
                    .strip_prefix("engine.")
                    .ok_or_else(|| anyhow::anyhow!("Unknown config key: {}", key))?;
                let number: u64 = value
                    .parse()
                    .with_context(|| format!("{} expects a number, got '{}'", key, value))?;

                let mut engine = serde_json::to_value(&self.engine)?;
                let slot = engine
                    .get_mut(field)
                    .ok_or_else(|| anyhow::anyhow!("Unknown config key: {}", key))?;
                *slot = serde_json::Value::from(number);

                let updated: EngineConfig = serde_json::from_value(engine)
                    .with_context(|| format!("{} is out of range: {}", key, value))?;
                updated.validate()?;
                self.engine = updated;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_engine_keys() {
        let mut config = Config::default();
        config.set("engine.max_path_depth", "12").unwrap();
        assert_eq!(config.engine.max_path_depth, 12);
        assert_eq!(config.get("engine.max_path_depth").as_deref(), Some("12"));

        assert!(config.set("engine.max_path_depth", "deep").is_err());
        assert!(config.set("engine.no_such_setting", "1").is_err());
        assert!(config.set("colour", "blue").is_err());
    }

    #[test]
    fn test_set_rejects_invalid_engine() {
        let mut config = Config::default();
        assert!(config.set("engine.default_path_depth", "0").is_err());
        assert_eq!(config.engine, EngineConfig::default());
    }

    #[test]
    fn test_keys_cover_engine() {
        let keys = Config::keys();
        assert!(keys.contains(&"graph".to_string()));
        assert!(keys.contains(&"engine.max_betweenness_entities".to_string()));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set("graph", "/tmp/graph.json").unwrap();
        config.set("project", "acme").unwrap();
        config.set("engine.default_rank_limit", "7").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded, Config::default());
    }
}
