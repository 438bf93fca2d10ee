use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::classifier::{Category, CategoryRule, ClassifierBuilder, ClassifierError, WasteClassifier};

pub const DEFAULT_ANALYZE_PATH: &str = "/vision/v3.2/analyze";
pub const DEFAULT_VISUAL_FEATURES: &str = "Tags,Description";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const KEY_VAR: &str = "AZURE_KEY";
pub const ENDPOINT_VAR: &str = "AZURE_ENDPOINT";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required secret: {0}")]
    MissingSecret(&'static str),
    #[error("Invalid endpoint '{0}': expected an http:// or https:// URL")]
    InvalidEndpoint(String),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Invalid rules: {0}")]
    InvalidRules(#[from] ClassifierError),
}

/// Connection settings for the remote tagging service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Base endpoint, e.g. `https://<resource>.cognitiveservices.azure.com`
    pub endpoint: String,
    pub api_key: String,
    pub analyze_path: String,
    /// Value of the `visualFeatures` query parameter
    pub visual_features: String,
    pub timeout_secs: u64,
}

/// Secrets file layout, keyed the same way as the environment variables
#[derive(Debug, Default, Deserialize)]
struct SecretsFile {
    #[serde(rename = "AZURE_KEY", default)]
    api_key: Option<String>,
    #[serde(rename = "AZURE_ENDPOINT", default)]
    endpoint: Option<String>,
}

impl ServiceConfig {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let endpoint = endpoint.into();
        let api_key = api_key.into();

        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingSecret(KEY_VAR));
        }
        if endpoint.trim().is_empty() {
            return Err(ConfigError::MissingSecret(ENDPOINT_VAR));
        }
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::InvalidEndpoint(endpoint));
        }

        Ok(Self {
            endpoint,
            api_key,
            analyze_path: DEFAULT_ANALYZE_PATH.to_string(),
            visual_features: DEFAULT_VISUAL_FEATURES.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Full URL of the analyze operation, without query parameters
    pub fn analyze_url(&self) -> String {
        format!("{}{}", self.endpoint.trim_end_matches('/'), self.analyze_path)
    }

    /// Returns the default secrets file path
    pub fn default_secrets_path() -> PathBuf {
        // 1. Check environment variable
        if let Ok(path) = env::var("ECOSORT_CONFIG") {
            return PathBuf::from(path).join("secrets.json");
        }

        // 2. Use platform-specific config directory
        if let Some(config_dir) = dirs::config_dir() {
            return config_dir.join("ecosort").join("secrets.json");
        }

        // 3. Fallback to user's home directory
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir.join(".config").join("ecosort").join("secrets.json");
        }

        // 4. If all else fails, use system temp directory
        env::temp_dir().join("ecosort").join("secrets.json")
    }

    /// Resolves the endpoint and key from explicit values first, then the
    /// secrets file. A missing secrets file is not an error unless a value
    /// is still unresolved.
    ///
    /// Environment variables are expected to be folded into `endpoint` and
    /// `api_key` by the caller (the CLI does this through clap).
    pub fn resolve(
        endpoint: Option<String>,
        api_key: Option<String>,
        secrets_path: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        if let (Some(endpoint), Some(api_key)) = (&endpoint, &api_key) {
            return Self::new(endpoint.clone(), api_key.clone());
        }

        let path = secrets_path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_secrets_path);
        let secrets = if path.exists() {
            log::info!("Reading secrets from {:?}", path);
            serde_json::from_str::<SecretsFile>(&fs::read_to_string(&path)?)?
        } else {
            log::debug!("No secrets file at {:?}", path);
            SecretsFile::default()
        };

        let endpoint = endpoint
            .or(secrets.endpoint)
            .ok_or(ConfigError::MissingSecret(ENDPOINT_VAR))?;
        let api_key = api_key
            .or(secrets.api_key)
            .ok_or(ConfigError::MissingSecret(KEY_VAR))?;
        Self::new(endpoint, api_key)
    }

    /// Reads the endpoint and key from `AZURE_ENDPOINT` and `AZURE_KEY`,
    /// falling back to the default secrets file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(env::var(ENDPOINT_VAR).ok(), env::var(KEY_VAR).ok(), None)
    }
}

#[derive(Debug, Deserialize)]
struct RuleEntry {
    category: Category,
    tip: String,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    keywords: Vec<String>,
}

impl From<RuleEntry> for CategoryRule {
    fn from(entry: RuleEntry) -> Self {
        let rule = CategoryRule::new(entry.category, entry.tip).with_keywords(entry.keywords);
        match entry.color {
            Some(color) => rule.with_color(color),
            None => rule,
        }
    }
}

/// Keyword rules loaded from JSON, replacing the built-in tables.
///
/// ```json
/// {
///   "rules": [
///     {"category": "recyclable", "tip": "Recycle it.", "color": "#4CAF50", "keywords": ["glass"]}
///   ],
///   "fallback": {"category": "general_waste", "tip": "Bin it."}
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct RulesFile {
    rules: Vec<RuleEntry>,
    #[serde(default)]
    fallback: Option<RuleEntry>,
}

impl RulesFile {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Builds a classifier with the rules in file order
    pub fn into_classifier(self) -> Result<WasteClassifier, ConfigError> {
        let mut builder = ClassifierBuilder::new();
        for entry in self.rules {
            builder = builder.add_rule(entry.into())?;
        }
        if let Some(fallback) = self.fallback {
            builder = builder.with_fallback(fallback.into())?;
        }
        Ok(builder.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tag;
    use std::io::Write;

    #[test]
    fn test_service_config_validation() {
        assert!(matches!(
            ServiceConfig::new("https://example.com", ""),
            Err(ConfigError::MissingSecret(KEY_VAR))
        ));
        assert!(matches!(
            ServiceConfig::new("", "key"),
            Err(ConfigError::MissingSecret(ENDPOINT_VAR))
        ));
        assert!(matches!(
            ServiceConfig::new("example.com", "key"),
            Err(ConfigError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn test_analyze_url() {
        let config = ServiceConfig::new("https://vision.example.com/", "key").unwrap();
        assert_eq!(config.analyze_url(), "https://vision.example.com/vision/v3.2/analyze");
        assert_eq!(config.visual_features, "Tags,Description");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_resolve_prefers_explicit_values() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(file, r#"{{"AZURE_KEY": "file-key", "AZURE_ENDPOINT": "https://file.example.com"}}"#)?;

        let config = ServiceConfig::resolve(None, Some("flag-key".into()), Some(file.path()))?;
        assert_eq!(config.api_key, "flag-key");
        assert_eq!(config.endpoint, "https://file.example.com");

        let config = ServiceConfig::resolve(None, None, Some(file.path()))?;
        assert_eq!(config.api_key, "file-key");
        Ok(())
    }

    #[test]
    fn test_resolve_missing_secrets() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("secrets.json");
        let result = ServiceConfig::resolve(Some("https://example.com".into()), None, Some(missing.as_path()));
        assert!(matches!(result, Err(ConfigError::MissingSecret(KEY_VAR))));
    }

    #[test]
    fn test_default_secrets_path() {
        // Test with environment variable
        env::set_var("ECOSORT_CONFIG", "/tmp/test-ecosort");
        let path = ServiceConfig::default_secrets_path();
        assert!(path.ends_with("test-ecosort/secrets.json"));
        env::remove_var("ECOSORT_CONFIG");

        // Test without environment variable
        let path = ServiceConfig::default_secrets_path();
        assert!(path.ends_with("secrets.json"));
    }

    #[test]
    fn test_rules_file() -> Result<(), ConfigError> {
        let rules = RulesFile::from_json(
            r##"{
                "rules": [
                    {"category": "compost", "tip": "Compost it.", "keywords": ["Banana"]},
                    {"category": "recyclable", "tip": "Recycle it.", "color": "#00FF00", "keywords": ["can"]}
                ],
                "fallback": {"category": "general_waste", "tip": "Bin it."}
            }"##,
        )?;
        let classifier = rules.into_classifier()?;

        let result = classifier.classify(&[Tag::new("can", 0.9), Tag::new("banana", 0.8)]);
        assert_eq!(result.category, Category::Compost);
        assert_eq!(result.disposal_tip, "Compost it.");
        assert_eq!(result.display_color, None);

        let result = classifier.classify(&[Tag::new("glass", 0.9)]);
        assert_eq!(result.category, Category::GeneralWaste);
        assert_eq!(result.disposal_tip, "Bin it.");
        Ok(())
    }

    #[test]
    fn test_rules_file_validation() {
        let rules = RulesFile::from_json(
            r#"{"rules": [{"category": "compost", "tip": "Compost it.", "keywords": []}]}"#,
        )
        .unwrap();
        assert!(matches!(rules.into_classifier(), Err(ConfigError::InvalidRules(_))));

        assert!(matches!(
            RulesFile::from_json(r#"{"rules": [{"category": "landfill", "tip": "x"}]}"#),
            Err(ConfigError::ParseError(_))
        ));
    }
}
