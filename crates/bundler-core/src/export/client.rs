//! Label Studio data-manager client.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;

use super::api::{CreateViewRequest, ViewApi};
use crate::config::StudioCredentials;
use crate::error::ExportError;

/// Creates views through `POST {endpoint}/api/dm/views/`.
pub struct LabelStudioClient {
    views_url: String,
    token: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl LabelStudioClient {
    /// Build a client; `timeout` bounds every request end to end.
    pub fn new(credentials: &StudioCredentials, timeout: Duration) -> Result<Self, ExportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ExportError::Transport(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            views_url: views_url(&credentials.endpoint),
            token: credentials.token.clone(),
            timeout,
            client,
        })
    }

    pub fn views_url(&self) -> &str {
        &self.views_url
    }
}

fn views_url(endpoint: &str) -> String {
    format!("{}/api/dm/views/", endpoint.trim_end_matches('/'))
}

#[async_trait]
impl ViewApi for LabelStudioClient {
    fn name(&self) -> &str {
        "label-studio"
    }

    async fn create_view(&self, request: &CreateViewRequest) -> Result<(), ExportError> {
        let resp = self
            .client
            .post(&self.views_url)
            .header("Authorization", format!("Token {}", self.token))
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ExportError::Timeout {
                        timeout_ms: self.timeout.as_millis() as u64,
                    }
                } else {
                    ExportError::Transport(e.to_string())
                }
            })?;

        let status = resp.status();
        if status != StatusCode::CREATED {
            let body = resp.text().await.unwrap_or_default();
            return Err(ExportError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_views_url_strips_trailing_slash() {
        assert_eq!(
            views_url("http://localhost:8080/"),
            "http://localhost:8080/api/dm/views/"
        );
        assert_eq!(
            views_url("https://ls.example.com"),
            "https://ls.example.com/api/dm/views/"
        );
    }

    #[test]
    fn test_client_construction() {
        let creds = StudioCredentials {
            endpoint: "http://localhost:8080".to_string(),
            token: "secret".to_string(),
        };
        let client = LabelStudioClient::new(&creds, Duration::from_secs(5)).unwrap();
        assert_eq!(client.name(), "label-studio");
        assert_eq!(client.views_url(), "http://localhost:8080/api/dm/views/");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let creds = StudioCredentials {
            endpoint: "http://127.0.0.1:9".to_string(),
            token: "secret".to_string(),
        };
        let client = LabelStudioClient::new(&creds, Duration::from_secs(2)).unwrap();
        let request = CreateViewRequest::for_ids(1, "t", &[1], None);
        let err = client.create_view(&request).await.unwrap_err();
        assert!(matches!(err, ExportError::Transport(_)), "got {err:?}");
    }
}
