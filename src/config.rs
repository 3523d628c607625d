//! Configuration management for the keyword ranker

use crate::error::{KeywordRankerError, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub output: OutputConfig,
    pub presets: Vec<KeywordPreset>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub default_factor: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

/// A named keyword bundle. Keywords and priority entries are stored as
/// comma-separated strings, the same shape they take on the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordPreset {
    pub name: String,
    pub keywords: String,
    pub priority: String,
    pub description: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            analysis: AnalysisConfig {
                default_factor: 2.0,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
            presets: vec![
                KeywordPreset {
                    name: "Product Data Analyst".to_string(),
                    keywords: "product,data,analy,sql,python,numpy,pandas,visual,stat,hypoth,test,experiment,math,science,athena,s3,regress,classif,intel,machine,learn,sagemaker,copenhagen".to_string(),
                    priority: "sql,python,pandas".to_string(),
                    description: "Keyword bundle for product analytics roles".to_string(),
                },
                KeywordPreset {
                    name: "Data Engineer".to_string(),
                    keywords: "data,engineer,product,lake,warehouse,pipeline,machine,learn,architect,process,stat,aws,python,spark,kafka,cassandra,druid,snowflake,redshift,s3,athena,airflow,etl,elt,sagemaker,copenhagen".to_string(),
                    priority: "kafka,cassandra,druid".to_string(),
                    description: "Keyword bundle for data platform roles".to_string(),
                },
            ],
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating the file
    /// with defaults on first run.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, creating the file with
    /// defaults if it does not exist yet.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content).map_err(|e| {
                KeywordRankerError::Configuration(format!("Failed to parse config: {}", e))
            })?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            KeywordRankerError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("keyword-ranker")
            .join("config.toml")
    }

    pub fn get_preset_by_name(&self, name: &str) -> Option<&KeywordPreset> {
        self.presets
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn list_presets(&self) -> &[KeywordPreset] {
        &self.presets
    }
}

/// The immutable per-run analysis configuration: an ordered keyword list,
/// the priority subset, and the weight factor applied to priority counts.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordConfig {
    pub keywords: Vec<String>,
    pub priority: HashSet<String>,
    pub factor: f64,
}

impl KeywordConfig {
    pub fn new(keywords: Vec<String>, priority: Vec<String>, factor: f64) -> Result<Self> {
        if factor.is_nan() {
            return Err(KeywordRankerError::InvalidConfiguration(
                "weight factor must be a number".to_string(),
            ));
        }
        if keywords.is_empty() {
            warn!("keyword list is empty; every document will score zero");
        }

        Ok(Self {
            keywords,
            priority: priority.into_iter().collect(),
            factor,
        })
    }

    pub fn from_preset(preset: &KeywordPreset, factor: f64) -> Result<Self> {
        Self::new(
            split_keywords(&preset.keywords),
            split_keywords(&preset.priority),
            factor,
        )
    }
}

/// Split a comma-separated keyword string, keeping each token verbatim.
/// No trimming and no deduplication: a token with surrounding spaces is a
/// different substring pattern, and duplicates count twice.
pub fn split_keywords(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(',').map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_presets_present() {
        let config = Config::default();
        assert_eq!(config.presets.len(), 2);
        assert!(config.get_preset_by_name("Data Engineer").is_some());
        assert!(config.get_preset_by_name("data engineer").is_some());
        assert!(config.get_preset_by_name("unknown role").is_none());
    }

    #[test]
    fn test_split_keywords_verbatim() {
        let keywords = split_keywords("sql, python,pandas");
        assert_eq!(keywords, vec!["sql", " python", "pandas"]);
        assert!(split_keywords("").is_empty());
        // Trailing comma yields an empty (degenerate) pattern
        assert_eq!(split_keywords("sql,"), vec!["sql", ""]);
    }

    #[test]
    fn test_keyword_config_rejects_nan_factor() {
        let result = KeywordConfig::new(vec!["sql".to_string()], vec![], f64::NAN);
        assert!(result.is_err());
    }

    #[test]
    fn test_keyword_config_allows_negative_factor() {
        let config = KeywordConfig::new(vec!["sql".to_string()], vec![], -1.5).unwrap();
        assert_eq!(config.factor, -1.5);
    }

    #[test]
    fn test_keyword_config_from_preset() {
        let defaults = Config::default();
        let preset = defaults.get_preset_by_name("Product Data Analyst").unwrap();
        let config = KeywordConfig::from_preset(preset, 2.0).unwrap();
        assert!(config.keywords.contains(&"pandas".to_string()));
        assert!(config.priority.contains("sql"));
        assert!(!config.priority.contains("numpy"));
    }

    #[test]
    fn test_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let created = Config::load_from(&path).unwrap();
        assert!(path.exists());

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.presets.len(), created.presets.len());
        assert_eq!(loaded.analysis.default_factor, 2.0);
    }
}
