use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::errors::AgentError;
use crate::pipeline::classifier::ClassifierRules;
use crate::pipeline::filter::FilterCriteria;

/// Process configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    /// File path or http(s) URL serving a JSON array of postings.
    pub postings_source: String,
    pub search_config_path: PathBuf,
    pub history_path: PathBuf,
    pub digest_path: PathBuf,
    pub log_dir: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            postings_source: require_env("JOBWATCH_POSTINGS")?,
            search_config_path: env_path("JOBWATCH_CONFIG", "config/config.json"),
            history_path: env_path("JOBWATCH_HISTORY", "history/job_history.json"),
            digest_path: env_path("JOBWATCH_DIGEST", "outputs/latest_digest.md"),
            log_dir: env_path("JOBWATCH_LOG_DIR", "logs"),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_path(key: &str, default: &str) -> PathBuf {
    std::env::var(key)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}

// ────────────────────────────────────────────────────────────────────────────
// Search configuration (config.json)
// ────────────────────────────────────────────────────────────────────────────

/// Filter and classifier settings read from the JSON search config.
///
/// Every section is optional. A missing key behaves as an empty rule, so a
/// partial file degrades to "keep everything" rather than failing the run.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub scrapers: ScrapersSection,
    #[serde(default)]
    pub filters: FiltersSection,
    #[serde(default)]
    pub search_filters: SearchFiltersSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScrapersSection {
    #[serde(default)]
    pub linkedin: SearchKeywords,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchKeywords {
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub location_keywords: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FiltersSection {
    #[serde(default)]
    pub max_post_age_days: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchFiltersSection {
    #[serde(default)]
    pub manufacturing_engineering: KeywordList,
    #[serde(default)]
    pub ai_research: KeywordList,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeywordList {
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl SearchConfig {
    /// Reads and parses the search config file. A missing or invalid file is fatal;
    /// missing keys inside a valid file are not.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Missing search config at {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid JSON in {}", path.display()))
    }

    pub fn filter_criteria(&self) -> FilterCriteria {
        FilterCriteria::new(
            &self.scrapers.linkedin.keywords,
            &self.scrapers.linkedin.location_keywords,
            self.filters.max_post_age_days,
        )
    }

    pub fn classifier_rules(&self) -> ClassifierRules {
        ClassifierRules::new(
            &self.search_filters.manufacturing_engineering.keywords,
            &self.search_filters.ai_research.keywords,
        )
    }

    /// Lists the rules that fell back to their permissive default.
    pub fn missing_rules(&self) -> Vec<AgentError> {
        let mut missing = Vec::new();
        if self.scrapers.linkedin.keywords.is_empty() {
            missing.push(AgentError::ConfigurationMissing(
                "scrapers.linkedin.keywords is empty; every title passes".to_string(),
            ));
        }
        if self.filters.max_post_age_days.is_none() {
            missing.push(AgentError::ConfigurationMissing(
                "filters.max_post_age_days is not set; posting age is not limited".to_string(),
            ));
        }
        if self.search_filters.manufacturing_engineering.keywords.is_empty() {
            missing.push(AgentError::ConfigurationMissing(
                "search_filters.manufacturing_engineering.keywords is empty".to_string(),
            ));
        }
        if self.search_filters.ai_research.keywords.is_empty() {
            missing.push(AgentError::ConfigurationMissing(
                "search_filters.ai_research.keywords is empty".to_string(),
            ));
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_CONFIG: &str = r#"{
        "scrapers": {
            "linkedin": {
                "keywords": ["Engineer", "Scientist"],
                "location_keywords": ["California", "Remote"]
            }
        },
        "filters": { "max_post_age_days": 30 },
        "search_filters": {
            "manufacturing_engineering": { "keywords": ["Manufacturing", "Process"] },
            "ai_research": { "keywords": ["Machine Learning", "AI Research"] }
        },
        "email_notifications": { "enabled": false }
    }"#;

    #[test]
    fn test_full_config_parses() {
        let cfg: SearchConfig = serde_json::from_str(FULL_CONFIG).unwrap();
        assert_eq!(cfg.scrapers.linkedin.keywords.len(), 2);
        assert_eq!(cfg.filters.max_post_age_days, Some(30));
        assert_eq!(cfg.search_filters.ai_research.keywords[1], "AI Research");
        assert!(cfg.missing_rules().is_empty());
    }

    #[test]
    fn test_empty_object_uses_permissive_defaults() {
        let cfg: SearchConfig = serde_json::from_str("{}").unwrap();
        let criteria = cfg.filter_criteria();
        assert!(criteria.title_keywords.is_empty());
        assert!(criteria.location_keywords.is_empty());
        assert_eq!(criteria.max_post_age_days, None);
        assert_eq!(cfg.missing_rules().len(), 4);
        assert!(cfg.missing_rules().iter().all(|e| e.is_recoverable()));
    }

    #[test]
    fn test_partial_section_keeps_present_keys() {
        let cfg: SearchConfig =
            serde_json::from_str(r#"{"scrapers": {"linkedin": {"keywords": ["Engineer"]}}}"#)
                .unwrap();
        let criteria = cfg.filter_criteria();
        assert_eq!(criteria.title_keywords, vec!["engineer".to_string()]);
        assert!(criteria.location_keywords.is_empty());
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = SearchConfig::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("Missing search config"));
    }

    #[test]
    fn test_load_invalid_json_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = SearchConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid JSON"));
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, FULL_CONFIG).unwrap();
        let cfg = SearchConfig::load(&path).unwrap();
        assert_eq!(cfg.classifier_rules().manufacturing_keywords.len(), 2);
    }
}
