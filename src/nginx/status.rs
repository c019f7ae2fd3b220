//! stub_status fetching.
//!
//! Pulls the plaintext stub_status page from the running nginx and hands the
//! lines through unmodified; parsing them is the consumer's business.

use std::time::Duration;

use crate::config::schema::NginxConfig;

/// Client for nginx's stub_status monitoring page.
#[derive(Debug, Clone)]
pub struct StatusClient {
    url: String,
    timeout: Duration,
}

impl StatusClient {
    pub fn new(config: &NginxConfig) -> Self {
        Self {
            url: config.stub_status_url.clone(),
            timeout: Duration::from_secs(config.status_timeout_secs),
        }
    }

    /// Fetch the status page and split it into lines.
    ///
    /// Network problems and non-success statuses come back as a single
    /// error string for the handler to wrap; they never panic the caller.
    pub async fn fetch(&self) -> Result<Vec<String>, String> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| format!("failed to build status client: {e}"))?;

        let response = client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| format!("failed to fetch {}: {e}", self.url))?;

        let response = response
            .error_for_status()
            .map_err(|e| format!("status page returned an error: {e}"))?;

        let body = response
            .text()
            .await
            .map_err(|e| format!("failed to read status body: {e}"))?;

        Ok(body.trim().lines().map(str::to_string).collect())
    }
}
