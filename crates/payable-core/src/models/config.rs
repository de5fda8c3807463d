//! Configuration structures for the export pipeline.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::xml::DEFAULT_ENCODING;

/// Placeholder values shipped as defaults. Seeing one at runtime means the
/// setting was never configured.
pub const PLACEHOLDER_BASE_URL: &str = "https://<example>.rossum.app";
pub const PLACEHOLDER_AUTH_TOKEN: &str = "<your_auth_token>";
pub const PLACEHOLDER_TARGET_ENDPOINT: &str = "https://www.postb.in/XXXX-YYYY-ZZZZ";

/// Main configuration for the payable pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayableConfig {
    /// Source API configuration.
    pub rossum: RossumConfig,

    /// Upload target configuration.
    pub target: TargetConfig,

    /// XML output configuration.
    pub xml: XmlConfig,

    /// HTTP transport configuration.
    pub http: HttpConfig,

    /// Annotation to process.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
}

/// Rossum API connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RossumConfig {
    /// Base URL of the Rossum organization, without a trailing slash.
    pub base_url: String,

    /// Bearer token for the export endpoint.
    pub auth_token: String,
}

impl Default for RossumConfig {
    fn default() -> Self {
        Self {
            base_url: PLACEHOLDER_BASE_URL.to_string(),
            auth_token: PLACEHOLDER_AUTH_TOKEN.to_string(),
        }
    }
}

/// Where the rendered XML is posted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    pub endpoint: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            endpoint: PLACEHOLDER_TARGET_ENDPOINT.to_string(),
        }
    }
}

/// XML output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XmlConfig {
    /// Encoding name written into the XML declaration.
    pub encoding: String,
}

impl Default for XmlConfig {
    fn default() -> Self {
        Self {
            encoding: DEFAULT_ENCODING.to_string(),
        }
    }
}

/// HTTP client and retry settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Retries after the first attempt.
    pub max_retries: u32,

    /// Response statuses that trigger a retry.
    pub retry_statuses: Vec<u16>,

    /// Base delay between retries, doubled on each attempt (0 = immediate).
    pub backoff_ms: u64,

    /// Per-request timeout.
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            max_retries: 4,
            retry_statuses: vec![403, 429, 500, 502, 503, 504],
            backoff_ms: 0,
            timeout_secs: 30,
        }
    }
}

/// Environment variables read by [`PayableConfig::apply_env`].
pub const ENV_KEYS: [&str; 5] = [
    "ROSSUM_BASE_URL",
    "ROSSUM_AUTH_TOKEN",
    "TARGET_ENDPOINT",
    "XML_ENCODING",
    "DOCUMENT_ID",
];

impl PayableConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Override settings from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Override settings from `lookup`. Empty values are ignored.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(url) = get("ROSSUM_BASE_URL") {
            self.rossum.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(token) = get("ROSSUM_AUTH_TOKEN") {
            self.rossum.auth_token = token;
        }
        if let Some(endpoint) = get("TARGET_ENDPOINT") {
            self.target.endpoint = endpoint;
        }
        if let Some(encoding) = get("XML_ENCODING") {
            self.xml.encoding = encoding;
        }
        if let Some(id) = get("DOCUMENT_ID") {
            self.document_id = Some(id);
        }
    }

    /// Annotation ID to process, or an error if none is configured.
    ///
    /// The ID is passed through as text; a blank value counts as missing.
    pub fn require_document_id(&self) -> std::result::Result<&str, ConfigError> {
        self.document_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(ConfigError::MissingDocumentId)
    }

    /// Settings still holding their shipped placeholder value.
    pub fn placeholder_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.rossum.base_url == PLACEHOLDER_BASE_URL {
            issues.push("rossum.base_url is not configured (ROSSUM_BASE_URL)".to_string());
        }
        if self.rossum.auth_token == PLACEHOLDER_AUTH_TOKEN {
            issues.push("rossum.auth_token is not configured (ROSSUM_AUTH_TOKEN)".to_string());
        }
        if self.target.endpoint == PLACEHOLDER_TARGET_ENDPOINT {
            issues.push("target.endpoint is not configured (TARGET_ENDPOINT)".to_string());
        }

        issues
    }

    /// URL of the export endpoint.
    pub fn export_url(&self) -> String {
        format!("{}/api/v1/annotations/export", self.rossum.base_url)
    }

    /// API URL identifying one annotation.
    pub fn annotation_url(&self, document_id: &str) -> String {
        format!("{}/api/v1/annotations/{}", self.rossum.base_url, document_id)
    }
}
