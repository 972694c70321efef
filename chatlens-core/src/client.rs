//! HTTP client for the external chat analysis service.
//!
//! The service exposes a single request/response operation: a multipart
//! upload of one chat-log file under field name `file`, answered with an
//! [`AnalysisReport`]. File type and size constraints are the service's
//! business; this client does not validate them.

use std::path::Path;
use std::time::Duration;

use reqwest::multipart;

use crate::config::ServiceConfig;
use crate::error::{Error, Result};
use crate::types::AnalysisReport;

/// HTTP client for the analysis service's upload endpoint.
#[derive(Clone)]
pub struct AnalysisClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl AnalysisClient {
    /// Create a new client from configuration.
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        config.validate()?;

        let base_url = config.server_url.trim_end_matches('/').to_string();

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// Upload a chat-log file for analysis and decode the returned report.
    ///
    /// Any non-success outcome (unreachable service, non-2xx status, garbled
    /// payload) maps to [`Error::Service`] with an opaque reason. There are
    /// no automatic retries; a retry is a fresh upload.
    pub async fn analyze(&self, path: &Path) -> Result<AnalysisReport> {
        let url = format!("{}/analyze", self.base_url);

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "chat-log.json".to_string());
        let bytes = tokio::fs::read(path).await?;

        tracing::debug!(url = %url, file = %file_name, bytes = bytes.len(), "Uploading chat log");

        let form = multipart::Form::new().part("file", multipart::Part::bytes(bytes).file_name(file_name));

        let response = self
            .http_client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::Service(format!("HTTP request failed: {}", e)))?;

        let status = response.status();

        if status.is_success() {
            response
                .json::<AnalysisReport>()
                .await
                .map_err(|e| Error::Service(format!("failed to parse response: {}", e)))
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            Err(Error::Service(format!(
                "API error ({}): {}",
                status, error_text
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_with_default_config() {
        let config = ServiceConfig::default();
        assert!(AnalysisClient::new(&config).is_ok());
    }

    #[test]
    fn test_client_rejects_invalid_config() {
        let config = ServiceConfig {
            server_url: String::new(),
            ..Default::default()
        };
        assert!(AnalysisClient::new(&config).is_err());
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = ServiceConfig {
            server_url: "http://localhost:5000/".to_string(),
            ..Default::default()
        };
        let client = AnalysisClient::new(&config).unwrap();
        assert_eq!(client.base_url, "http://localhost:5000");
    }
}
