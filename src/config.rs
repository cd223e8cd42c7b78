//! Configuration management for the job tailor

use crate::error::{JobTailorError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub classification: ClassificationConfig,
    pub template: TemplateConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationConfig {
    /// Minimum percentage for a category to appear in a breakdown
    pub breakdown_threshold: f64,
    /// Multiplier for keyword hits found in a posting title
    pub title_weight: f64,
    /// External TOML catalog replacing the built-in one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Titles that count as "no title" and fall back to the role's display title
    pub default_title_markers: Vec<String>,
    /// Turn structural warnings into errors
    pub strict: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            breakdown_threshold: 5.0,
            title_weight: 2.0,
            catalog_path: None,
        }
    }
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            default_title_markers: ["", "position", "job title", "title", "n/a", "unknown"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            strict: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            color_output: true,
        }
    }
}

impl Config {
    /// Load from the per-user config file, writing defaults on first run.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    /// Load from an explicit file. A missing file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(JobTailorError::Configuration(format!(
                "Config file does not exist: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| JobTailorError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| JobTailorError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("job-tailor")
            .join("config.toml")
    }

    fn validate(&self) -> Result<()> {
        let threshold = self.classification.breakdown_threshold;
        if !(0.0..=100.0).contains(&threshold) {
            return Err(JobTailorError::Configuration(format!(
                "classification.breakdown_threshold must be within 0..=100, got {}",
                threshold
            )));
        }

        let title_weight = self.classification.title_weight;
        if !title_weight.is_finite() || title_weight < 0.0 {
            return Err(JobTailorError::Configuration(format!(
                "classification.title_weight must be a non-negative number, got {}",
                title_weight
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::default();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load_from(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(JobTailorError::Configuration(_))));
    }

    #[test]
    fn test_invalid_threshold_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.classification.breakdown_threshold = 150.0;
        config.save_to(&path).unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_output_format_is_lowercase_in_toml() {
        let content = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(content.contains("format = \"console\""));
        assert!(content.contains("breakdown_threshold = 5.0"));
    }
}
