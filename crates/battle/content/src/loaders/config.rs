//! Battle configuration loader.

use std::path::Path;

use battle_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

const BUNDLED_CONFIG: &str = include_str!("../../data/battle.toml");

/// Loader for battle configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        let config = Self::parse(&content)?;
        tracing::debug!(path = %path.display(), slots = config.agent_slots, "battle config loaded");
        Ok(config)
    }

    /// Parse config data from TOML text. Missing keys fall back to defaults.
    pub fn parse(content: &str) -> LoadResult<BattleConfig> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))
    }

    /// Configuration shipped with the crate.
    pub fn bundled() -> LoadResult<BattleConfig> {
        Self::parse(BUNDLED_CONFIG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_agent_slots() {
        let config = ConfigLoader::parse("agent_slots = 4").unwrap();
        assert_eq!(config.agent_slots, 4);
    }

    #[test]
    fn empty_document_uses_defaults() {
        let config = ConfigLoader::parse("").unwrap();
        assert_eq!(config, BattleConfig::default());
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(ConfigLoader::parse("agent_slots = \"three\"").is_err());
    }

    #[test]
    fn bundled_config_has_three_slots() {
        assert_eq!(ConfigLoader::bundled().unwrap().agent_slots, 3);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "agent_slots = 2").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.agent_slots, 2);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let error = ConfigLoader::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(error.to_string().contains("Failed to read file"));
    }
}
