//! HTTP transport: annotation export fetch and XML upload.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use payable_core::AnnotationExport;
use payable_core::models::config::{HttpConfig, PayableConfig};

/// Upload request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadRequest<'a> {
    annotation_id: &'a str,
    content: &'a str,
}

/// Client for the Rossum export API and the upload target.
pub struct Transport {
    client: reqwest::Client,
    config: PayableConfig,
}

impl Transport {
    pub fn new(config: &PayableConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("payable-cli/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.http.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Export one annotation as JSON.
    pub async fn fetch_export(&self, document_id: &str) -> anyhow::Result<AnnotationExport> {
        let url = self.config.export_url();
        let body = json!({ "annotations": [self.config.annotation_url(document_id)] });
        debug!("Fetching export from {}", url);

        let response = self
            .send_with_retry(|| {
                self.client
                    .post(&url)
                    .query(&[("format", "json")])
                    .bearer_auth(&self.config.rossum.auth_token)
                    .json(&body)
            })
            .await?;

        let payload = read_response(response).await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Post base64-encoded XML to the target endpoint.
    pub async fn upload(&self, document_id: &str, xml: &str) -> anyhow::Result<Value> {
        let content = encode_xml(xml);
        let request = UploadRequest {
            annotation_id: document_id,
            content: &content,
        };

        info!(
            "Uploading XML for annotation {} to {} ({} base64 bytes)",
            document_id,
            self.config.target.endpoint,
            content.len()
        );
        debug!("Upload content: {}", content);

        let response = self
            .send_with_retry(|| self.client.post(&self.config.target.endpoint).json(&request))
            .await?;

        read_response(response).await
    }

    async fn send_with_retry<F>(&self, build: F) -> anyhow::Result<reqwest::Response>
    where
        F: Fn() -> reqwest::RequestBuilder,
    {
        let http = &self.config.http;
        let mut attempt = 0;

        loop {
            match build().send().await {
                Ok(response)
                    if attempt < http.max_retries
                        && is_retry_status(http, response.status().as_u16()) =>
                {
                    warn!(
                        "Request returned HTTP {}, retrying ({}/{})",
                        response.status(),
                        attempt + 1,
                        http.max_retries
                    );
                }
                Ok(response) => return Ok(response),
                Err(e) if attempt < http.max_retries && (e.is_connect() || e.is_timeout()) => {
                    warn!(
                        "Request failed: {}, retrying ({}/{})",
                        e,
                        attempt + 1,
                        http.max_retries
                    );
                }
                Err(e) => return Err(e.into()),
            }

            tokio::time::sleep(backoff_delay(http, attempt)).await;
            attempt += 1;
        }
    }
}

async fn read_response(response: reqwest::Response) -> anyhow::Result<Value> {
    let status = response.status();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = response.text().await?;

    if !status.is_success() {
        anyhow::bail!("HTTP {}: {}", status, body);
    }

    debug!("Response: {}, {}", status, body);
    decode_body(content_type.as_deref(), body)
}

/// JSON bodies are parsed; anything else is wrapped as `{"text": body}`.
fn decode_body(content_type: Option<&str>, body: String) -> anyhow::Result<Value> {
    if content_type.is_some_and(|ct| ct.contains("application/json")) {
        Ok(serde_json::from_str(&body)?)
    } else {
        Ok(json!({ "text": body }))
    }
}

fn is_retry_status(http: &HttpConfig, status: u16) -> bool {
    http.retry_statuses.contains(&status)
}

fn backoff_delay(http: &HttpConfig, attempt: u32) -> Duration {
    let factor = 2u64.saturating_pow(attempt);
    Duration::from_millis(http.backoff_ms.saturating_mul(factor))
}

/// Base64 of the UTF-8 XML bytes.
pub fn encode_xml(xml: &str) -> String {
    STANDARD.encode(xml.as_bytes())
}
