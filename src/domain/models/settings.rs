use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use tracing::{debug, warn};

use crate::domain::DomainError;

pub const DEFAULT_SETTINGS_FILE: &str = "appsettings.json";
pub const DEFAULT_API_VERSION: &str = "2024-02-01";

pub const OPENAI_ENDPOINT: &str = "AzureOAIEndpoint";
pub const OPENAI_KEY: &str = "AzureOAIKey";
pub const OPENAI_DEPLOYMENT: &str = "AzureOAIDeploymentName";
pub const OPENAI_API_VERSION: &str = "AzureOAIApiVersion";
pub const SEARCH_ENDPOINT: &str = "AzureSearchEndpoint";
pub const SEARCH_KEY: &str = "AzureSearchKey";
pub const SEARCH_INDEX: &str = "AzureSearchIndex";

/// Flat key/value configuration loaded once at start-up.
///
/// Values are never mutated after loading. The typed accessors
/// ([`Settings::openai`], [`Settings::search`], [`Settings::image_endpoint`])
/// validate that every key they consume is present and non-empty, and report
/// failures with a message naming the file the settings came from.
#[derive(Clone)]
pub struct Settings {
    source: String,
    values: HashMap<String, String>,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.values.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("Settings")
            .field("source", &self.source)
            .field("keys", &keys)
            .finish()
    }
}

impl Settings {
    pub fn new(source: impl Into<String>, values: HashMap<String, String>) -> Self {
        Self {
            source: source.into(),
            values,
        }
    }

    pub fn empty(source: impl Into<String>) -> Self {
        Self::new(source, HashMap::new())
    }

    /// Parse a flat JSON object. Strings are kept as-is, numbers and booleans
    /// are stringified, nested values are ignored.
    pub fn from_json(source: impl Into<String>, text: &str) -> Result<Self, DomainError> {
        let source = source.into();
        let value: serde_json::Value = serde_json::from_str(text)
            .map_err(|e| DomainError::parse(format!("Failed to parse {}: {}", source, e)))?;

        let object = value.as_object().ok_or_else(|| {
            DomainError::parse(format!("{} must contain a JSON object", source))
        })?;

        let mut values = HashMap::with_capacity(object.len());
        for (key, value) in object {
            let text = match value {
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                _ => {
                    debug!("Ignoring non-scalar setting {}", key);
                    continue;
                }
            };
            values.insert(key.clone(), text);
        }

        Ok(Self::new(source, values))
    }

    /// Load settings from `path`.
    ///
    /// A missing file yields empty settings so that each program can report
    /// the missing keys in its own way. A file that exists but cannot be
    /// parsed is an error.
    pub fn load(path: &Path) -> Result<Self, DomainError> {
        let source = path.display().to_string();
        match std::fs::read_to_string(path) {
            Ok(text) => {
                let settings = Self::from_json(source, &text)?;
                debug!("Loaded {} settings from {}", settings.values.len(), settings.source);
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("Settings file {} not found; continuing with empty settings", source);
                Ok(Self::empty(source))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Value for `key`, trimmed; `None` when absent or blank.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn missing_keys<'a>(&self, keys: &[&'a str]) -> Vec<&'a str> {
        keys.iter()
            .copied()
            .filter(|key| self.get(key).is_none())
            .collect()
    }

    /// Endpoint, key and deployment used by every chat program.
    pub fn openai(&self) -> Result<OpenAiSettings, DomainError> {
        self.ensure(&[OPENAI_ENDPOINT, OPENAI_KEY, OPENAI_DEPLOYMENT])?;
        Ok(OpenAiSettings {
            connection: self.connection(),
            deployment: self.value(OPENAI_DEPLOYMENT),
        })
    }

    /// Endpoint and key only; the image program names its deployment itself.
    pub fn image_endpoint(&self) -> Result<ServiceEndpoint, DomainError> {
        self.ensure(&[OPENAI_ENDPOINT, OPENAI_KEY])?;
        Ok(self.connection())
    }

    pub fn search(&self) -> Result<SearchSettings, DomainError> {
        self.ensure(&[SEARCH_ENDPOINT, SEARCH_KEY, SEARCH_INDEX])?;
        Ok(SearchSettings {
            endpoint: self.value(SEARCH_ENDPOINT),
            key: self.value(SEARCH_KEY),
            index: self.value(SEARCH_INDEX),
        })
    }

    pub fn configuration_error(&self) -> DomainError {
        DomainError::configuration(format!(
            "Please check your {} file for missing or incorrect values.",
            self.source
        ))
    }

    fn ensure(&self, keys: &[&str]) -> Result<(), DomainError> {
        let missing = self.missing_keys(keys);
        if missing.is_empty() {
            return Ok(());
        }
        warn!("Missing settings in {}: {}", self.source, missing.join(", "));
        Err(self.configuration_error())
    }

    fn value(&self, key: &str) -> String {
        self.get(key).unwrap_or_default().to_string()
    }

    fn connection(&self) -> ServiceEndpoint {
        ServiceEndpoint {
            endpoint: self.value(OPENAI_ENDPOINT),
            api_key: self.value(OPENAI_KEY),
            api_version: self
                .get(OPENAI_API_VERSION)
                .unwrap_or(DEFAULT_API_VERSION)
                .to_string(),
        }
    }
}

/// Where and how to reach an Azure OpenAI resource.
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceEndpoint {
    pub endpoint: String,
    pub api_key: String,
    pub api_version: String,
}

impl fmt::Debug for ServiceEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceEndpoint")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("api_version", &self.api_version)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiSettings {
    pub connection: ServiceEndpoint,
    pub deployment: String,
}

#[derive(Clone, PartialEq, Eq)]
pub struct SearchSettings {
    pub endpoint: String,
    pub key: String,
    pub index: String,
}

impl fmt::Debug for SearchSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchSettings")
            .field("endpoint", &self.endpoint)
            .field("key", &"<redacted>")
            .field("index", &self.index)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_settings() -> Settings {
        Settings::from_json(
            "appsettings.json",
            r#"{
                "AzureOAIEndpoint": "https://example.openai.azure.com/",
                "AzureOAIKey": "secret",
                "AzureOAIDeploymentName": "gpt-35-turbo",
                "AzureSearchEndpoint": "https://search.example.net",
                "AzureSearchKey": "search-secret",
                "AzureSearchIndex": "margies-index"
            }"#,
        )
        .expect("valid settings")
    }

    #[test]
    fn openai_settings_use_default_api_version() {
        let openai = full_settings().openai().expect("openai settings");
        assert_eq!(openai.deployment, "gpt-35-turbo");
        assert_eq!(openai.connection.endpoint, "https://example.openai.azure.com/");
        assert_eq!(openai.connection.api_version, DEFAULT_API_VERSION);
    }

    #[test]
    fn blank_values_count_as_missing() {
        let settings = Settings::from_json(
            "appsettings.json",
            r#"{"AzureOAIEndpoint": "  ", "AzureOAIKey": "k", "AzureOAIDeploymentName": "d"}"#,
        )
        .unwrap();

        assert_eq!(
            settings.missing_keys(&[OPENAI_ENDPOINT, OPENAI_KEY, OPENAI_DEPLOYMENT]),
            vec![OPENAI_ENDPOINT]
        );
        let err = settings.openai().unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("appsettings.json"));
    }

    #[test]
    fn image_endpoint_does_not_need_a_deployment() {
        let settings = Settings::from_json(
            "appsettings.json",
            r#"{"AzureOAIEndpoint": "https://e", "AzureOAIKey": "k"}"#,
        )
        .unwrap();
        assert!(settings.image_endpoint().is_ok());
        assert!(settings.openai().is_err());
    }

    #[test]
    fn search_settings_require_all_three_keys() {
        let search = full_settings().search().expect("search settings");
        assert_eq!(search.index, "margies-index");

        let partial = Settings::from_json("conf.json", r#"{"AzureSearchEndpoint": "https://s"}"#)
            .unwrap();
        let err = partial.search().unwrap_err();
        assert!(err.to_string().contains("conf.json"));
    }

    #[test]
    fn scalars_are_stringified_and_nested_values_ignored() {
        let settings = Settings::from_json(
            "appsettings.json",
            r#"{"Retries": 3, "Enabled": true, "Nested": {"a": 1}}"#,
        )
        .unwrap();
        assert_eq!(settings.get("Retries"), Some("3"));
        assert_eq!(settings.get("Enabled"), Some("true"));
        assert_eq!(settings.get("Nested"), None);
    }

    #[test]
    fn non_object_json_is_rejected() {
        assert!(Settings::from_json("appsettings.json", "[1, 2]").is_err());
        assert!(Settings::from_json("appsettings.json", "not json").is_err());
    }

    #[test]
    fn missing_file_loads_empty_settings() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings = Settings::load(&dir.path().join("appsettings.json")).expect("load");
        assert!(settings.openai().is_err());
    }

    #[test]
    fn debug_output_redacts_keys() {
        let openai = full_settings().openai().unwrap();
        let rendered = format!("{:?}", openai);
        assert!(!rendered.contains("secret"));
    }

    #[test]
    fn settings_debug_lists_keys_without_values() {
        let rendered = format!("{:?}", full_settings());
        assert!(!rendered.contains("secret"));
        assert!(!rendered.contains("search-secret"));
        assert!(rendered.contains("AzureOAIKey"));
        assert!(rendered.contains("AzureSearchKey"));
        assert!(rendered.contains("appsettings.json"));
    }
}
