use crate::adapters::{BearerImageFetcher, GoogleDocsStore, InMemoryDocumentStore};
use crate::core::inserter::ImageInserter;
use crate::domain::model::ImageSize;
use crate::domain::ports::DocumentStore;
use crate::utils::error::{HookError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub fetch: FetchConfig,
    pub store: StoreConfig,
    pub image: Option<ImageConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    /// When set, POST routes require `Authorization: Bearer <inbound_token>`.
    pub inbound_token: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            inbound_token: None,
        }
    }
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    pub bearer_token: String,
    pub timeout_seconds: Option<u64>,
    pub max_image_bytes: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreType {
    GoogleDocs,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub r#type: StoreType,
    pub base_url: Option<String>,
    pub access_token: Option<String>,
    /// Documents pre-created by the memory backend.
    #[serde(default)]
    pub documents: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    pub width_pt: f64,
    pub height_pt: f64,
}

impl ServiceConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(HookError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| HookError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SLACK_BOT_TOKEN})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| HookError::ConfigError {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.server
            .bind
            .parse::<SocketAddr>()
            .map_err(|e| HookError::InvalidConfigValueError {
                field: "server.bind".to_string(),
                value: self.server.bind.clone(),
                reason: e.to_string(),
            })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.fetch.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }

    pub fn max_image_bytes(&self) -> u64 {
        self.fetch.max_image_bytes.unwrap_or(DEFAULT_MAX_IMAGE_BYTES)
    }

    pub fn image_size(&self) -> Option<ImageSize> {
        self.image.as_ref().map(|i| ImageSize {
            width_pt: i.width_pt,
            height_pt: i.height_pt,
        })
    }

    /// Inbound token, ignoring blank values.
    pub fn inbound_token(&self) -> Option<&str> {
        self.server
            .inbound_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    pub fn build_inserter(&self) -> Result<ImageInserter> {
        let fetcher = BearerImageFetcher::new(
            self.fetch.bearer_token.trim(),
            self.timeout(),
            self.max_image_bytes(),
        )?;

        let store: Arc<dyn DocumentStore> = match self.store.r#type {
            StoreType::GoogleDocs => {
                let base_url = self
                    .store
                    .base_url
                    .as_deref()
                    .unwrap_or(crate::adapters::google_docs::DEFAULT_BASE_URL);
                let access_token = required_field("store.access_token", &self.store.access_token)?;
                Arc::new(GoogleDocsStore::new(
                    base_url,
                    access_token.trim(),
                    self.image_size(),
                    self.timeout(),
                )?)
            }
            StoreType::Memory => {
                tracing::warn!("Using in-memory document store; inserts are not persisted");
                Arc::new(InMemoryDocumentStore::with_documents(
                    self.store.documents.iter().cloned(),
                ))
            }
        };

        Ok(ImageInserter::new(Arc::new(fetcher), store))
    }
}

fn required_field<'a>(field_name: &str, value: &'a Option<String>) -> Result<&'a String> {
    value.as_ref().ok_or_else(|| HookError::MissingConfigError {
        field: field_name.to_string(),
    })
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        self.bind_addr()?;

        validation::validate_secret("fetch.bearer_token", &self.fetch.bearer_token)?;
        if let Some(timeout) = self.fetch.timeout_seconds {
            validation::validate_range("fetch.timeout_seconds", timeout, 1, 300)?;
        }
        if let Some(max) = self.fetch.max_image_bytes {
            validation::validate_positive_number("fetch.max_image_bytes", max, 1)?;
        }

        if let Some(token) = &self.server.inbound_token {
            if !token.trim().is_empty() {
                validation::validate_secret("server.inbound_token", token)?;
            }
        }

        if self.store.r#type == StoreType::GoogleDocs {
            if let Some(base_url) = &self.store.base_url {
                validation::validate_url("store.base_url", base_url)?;
            }
            let token = required_field("store.access_token", &self.store.access_token)?;
            validation::validate_secret("store.access_token", token)?;
        }

        for id in &self.store.documents {
            validation::validate_non_empty_string("store.documents", id)?;
        }

        if let Some(image) = &self.image {
            validation::validate_range("image.width_pt", image.width_pt, 1.0, 2000.0)?;
            validation::validate_range("image.height_pt", image.height_pt, 1.0, 2000.0)?;
        }

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC: &str = r#"
[server]
bind = "127.0.0.1:9090"

[fetch]
bearer_token = "xoxb-abc"
timeout_seconds = 10

[store]
type = "google_docs"
access_token = "ya29.token"

[image]
width_pt = 200.0
height_pt = 200.0
"#;

    #[test]
    fn test_parse_basic_toml_config() {
        let config = ServiceConfig::from_toml_str(BASIC).unwrap();

        assert_eq!(config.bind_addr().unwrap().port(), 9090);
        assert_eq!(config.store.r#type, StoreType::GoogleDocs);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.max_image_bytes(), DEFAULT_MAX_IMAGE_BYTES);
        assert_eq!(
            config.image_size(),
            Some(ImageSize {
                width_pt: 200.0,
                height_pt: 200.0
            })
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let toml_content = r#"
[fetch]
bearer_token = "xoxb-abc"

[store]
type = "memory"
documents = ["doc-1"]
"#;
        let config = ServiceConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.server.bind, DEFAULT_BIND);
        assert_eq!(config.inbound_token(), None);
        assert!(config.image_size().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("DOC_HOOK_TEST_FETCH_TOKEN", "xoxb-from-env");

        let toml_content = r#"
[fetch]
bearer_token = "${DOC_HOOK_TEST_FETCH_TOKEN}"

[store]
type = "memory"
"#;

        let config = ServiceConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.fetch.bearer_token, "xoxb-from-env");

        std::env::remove_var("DOC_HOOK_TEST_FETCH_TOKEN");
    }

    #[test]
    fn test_unresolved_secret_is_missing() {
        let toml_content = r#"
[fetch]
bearer_token = "${DOC_HOOK_TEST_NEVER_SET}"

[store]
type = "memory"
"#;

        let config = ServiceConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(HookError::MissingConfigError { field }) if field == "fetch.bearer_token"
        ));
    }

    #[test]
    fn test_google_docs_requires_access_token() {
        let toml_content = r#"
[fetch]
bearer_token = "xoxb-abc"

[store]
type = "google_docs"
"#;

        let config = ServiceConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
        assert!(config.build_inserter().is_err());
    }

    #[test]
    fn test_invalid_values() {
        let mut config = ServiceConfig::from_toml_str(BASIC).unwrap();
        config.server.bind = "not-an-address".to_string();
        assert!(config.validate().is_err());

        let mut config = ServiceConfig::from_toml_str(BASIC).unwrap();
        config.store.base_url = Some("ftp://docs.example.com".to_string());
        assert!(config.validate().is_err());

        let mut config = ServiceConfig::from_toml_str(BASIC).unwrap();
        config.fetch.timeout_seconds = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nan_image_size_rejected() {
        let toml_content = r#"
[fetch]
bearer_token = "xoxb-abc"

[store]
type = "memory"

[image]
width_pt = nan
height_pt = 200.0
"#;
        let config = ServiceConfig::from_toml_str(toml_content).unwrap();
        assert!(config.image_size().unwrap().width_pt.is_nan());
        assert!(matches!(
            config.validate(),
            Err(HookError::InvalidConfigValueError { field, .. }) if field == "image.width_pt"
        ));
    }

    #[test]
    fn test_unknown_store_type() {
        let toml_content = r#"
[fetch]
bearer_token = "xoxb-abc"

[store]
type = "dropbox"
"#;
        assert!(matches!(
            ServiceConfig::from_toml_str(toml_content),
            Err(HookError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC.as_bytes()).unwrap();

        let config = ServiceConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.fetch.bearer_token, "xoxb-abc");
    }
}
