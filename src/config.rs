//! Configuration file support for fixture generation.
//!
//! Configuration is read from TOML. Every field has a default, so a missing
//! section (or a missing file, via [`Config::load_from_file_or_default`])
//! falls back to the values the circuit was compiled for.

use crate::DEFAULT_TREE_DEPTH;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "fixtures.toml";
const DEFAULT_COMMITMENT_FILE: &str = "commitmentTest.json";
const DEFAULT_HISTORY_FILE: &str = "commitmentHistory.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tree: TreeConfig,
    #[serde(default)]
    pub files: FilesConfig,
    #[serde(default)]
    pub fixture: FixtureConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeConfig {
    #[serde(default = "default_depth")]
    pub depth: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilesConfig {
    #[serde(default = "default_commitment_file")]
    pub commitment_file: PathBuf,
    #[serde(default = "default_history_file")]
    pub history_file: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureConfig {
    /// Seed for filler leaves; unset means fresh randomness each run.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_TREE_DEPTH,
        }
    }
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            commitment_file: default_commitment_file(),
            history_file: default_history_file(),
        }
    }
}

fn default_depth() -> u32 {
    DEFAULT_TREE_DEPTH
}

fn default_commitment_file() -> PathBuf {
    PathBuf::from(DEFAULT_COMMITMENT_FILE)
}

fn default_history_file() -> PathBuf {
    PathBuf::from(DEFAULT_HISTORY_FILE)
}

impl Config {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Loads `path` if it exists; a missing file yields the defaults but a
    /// malformed one is still an error.
    pub fn load_from_file_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.tree.depth, 3);
        assert_eq!(
            config.files.commitment_file,
            PathBuf::from("commitmentTest.json")
        );
        assert_eq!(
            config.files.history_file,
            PathBuf::from("commitmentHistory.json")
        );
        assert_eq!(config.fixture.seed, None);
    }

    #[test]
    fn test_custom_config() {
        let config_toml = r#"
            [tree]
            depth = 5

            [fixture]
            seed = 42
        "#;

        let config: Config = toml::from_str(config_toml).unwrap();
        assert_eq!(config.tree.depth, 5);
        assert_eq!(config.fixture.seed, Some(42));
        assert_eq!(config.files, FilesConfig::default());
    }

    #[test]
    fn test_save_and_load_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("conf").join("fixtures.toml");
        let mut config = Config::default();
        config.files.history_file = PathBuf::from("out/history.json");
        config.fixture.seed = Some(9);

        config.save_to_file(&path).unwrap();
        assert_eq!(Config::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from_file_or_default(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fixtures.toml");
        std::fs::write(&path, "[tree\ndepth = ").unwrap();
        assert!(Config::load_from_file_or_default(&path).is_err());
    }
}
