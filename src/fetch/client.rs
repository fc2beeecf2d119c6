use crate::config::HttpConfig;
use crate::errors::{FetchError, FetchResult};
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::{debug, info};

/// HTTP client for the remote CSV sources
///
/// One request per source, no retries: a failed request or a non-success
/// status is returned to the caller as-is.
#[derive(Debug, Clone)]
pub struct SourceClient {
    client: Client,
}

impl SourceClient {
    pub fn new(config: &HttpConfig) -> FetchResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| FetchError::ClientBuild(e.to_string()))?;

        Ok(Self { client })
    }

    /// GET a source and return its body as text
    pub async fn fetch_text(&self, url: &Url) -> FetchResult<String> {
        debug!(%url, "fetching source");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::RequestFailed {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::BadStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::BodyReadFailed {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        info!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}
