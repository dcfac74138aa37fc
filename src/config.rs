//! Configuration Management
//!
//! Handles persistent configuration storage for tagfinder.

use crate::output::OutputFormat;
use crate::tags::AwsSettings;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Default AWS region
    #[serde(default)]
    pub region: Option<String>,
    /// Default AWS shared-config profile
    #[serde(default)]
    pub profile: Option<String>,
    /// Default output format for `list` and `arn`
    #[serde(default)]
    pub output: Option<OutputFormat>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tagfinder").join("config.json"))
    }

    /// Default log file, kept alongside the config file
    pub fn log_path() -> PathBuf {
        Self::config_path()
            .and_then(|p| p.parent().map(|dir| dir.join("tagfinder.log")))
            .unwrap_or_else(|| PathBuf::from("tagfinder.log"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from `path`, falling back to defaults when the
    /// file is missing or unreadable
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("ignoring unreadable config {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Effective AWS settings (CLI > config > ambient AWS environment)
    pub fn aws_settings(
        &self,
        region: Option<String>,
        profile: Option<String>,
        endpoint_url: Option<String>,
    ) -> AwsSettings {
        AwsSettings {
            region: region.or_else(|| self.region.clone()),
            profile: profile.or_else(|| self.profile.clone()),
            endpoint_url,
        }
    }

    /// Effective output format (CLI > config > text)
    pub fn effective_output(&self, output: Option<OutputFormat>) -> OutputFormat {
        output.or(self.output).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("tagfinder-test-{}", uuid::Uuid::new_v4()))
            .join("config.json")
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = Config::load_from(&temp_config_path());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_config_path();
        let config = Config {
            region: Some("eu-west-1".to_string()),
            profile: None,
            output: Some(OutputFormat::Json),
        };
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path), config);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_garbage_file_yields_defaults() {
        let path = temp_config_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{not json").unwrap();

        assert_eq!(Config::load_from(&path), Config::default());
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_log_path_sits_next_to_config() {
        let log_path = Config::log_path();
        assert_eq!(log_path.file_name().unwrap(), "tagfinder.log");
        if let Some(config_path) = Config::config_path() {
            assert_eq!(log_path.parent(), config_path.parent());
        }
    }

    #[test]
    fn test_cli_overrides_config() {
        let config = Config {
            region: Some("eu-west-1".to_string()),
            profile: Some("work".to_string()),
            output: Some(OutputFormat::Yaml),
        };

        let settings = config.aws_settings(Some("us-east-1".to_string()), None, None);
        assert_eq!(settings.region.as_deref(), Some("us-east-1"));
        assert_eq!(settings.profile.as_deref(), Some("work"));

        assert_eq!(config.effective_output(None), OutputFormat::Yaml);
        assert_eq!(config.effective_output(Some(OutputFormat::Text)), OutputFormat::Text);
        assert_eq!(Config::default().effective_output(None), OutputFormat::Text);
    }
}
