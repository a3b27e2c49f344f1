//! Foresight client implementation.

use foresight_core::{ArtifactBundle, ForesightError, GenerateInput, Result};
use serde::Deserialize;
use tokio::time::Duration;
use tracing::debug;

/// Client for the Foresight generation API.
#[derive(Clone)]
pub struct ForesightClient {
    /// Base URL of the server.
    base_url: String,

    /// HTTP client.
    http_client: reqwest::Client,
}

/// Where a run currently is in its lifecycle.
#[derive(Debug, Clone)]
pub enum RunStatus {
    /// Accepted but the result is not stored yet.
    Processing,
    /// The result is available.
    Ready(ArtifactBundle),
}

/// Response from submitting a generation request.
#[derive(Debug, Deserialize)]
struct SubmitResponse {
    run_id: String,
}

/// Error body returned by the server.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[allow(dead_code)]
    error: String,
    #[serde(default)]
    details: Vec<String>,
}

impl ForesightClient {
    /// Create a client without probing the server.
    pub fn new(url: &str) -> Self {
        Self {
            base_url: url.trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Connect to a server, verifying it answers the health check.
    pub async fn connect(url: &str) -> Result<Self> {
        let client = Self::new(url);

        let health_url = format!("{}/health", client.base_url);
        client
            .http_client
            .get(&health_url)
            .send()
            .await
            .map_err(|e| ForesightError::Connection(e.to_string()))?
            .error_for_status()
            .map_err(|e| ForesightError::Connection(e.to_string()))?;

        Ok(client)
    }

    /// Submit a generation request. Returns the run id to poll.
    ///
    /// A 400 from the server becomes `InvalidInput` carrying every
    /// violation the server listed.
    pub async fn start_run(&self, input: &GenerateInput) -> Result<String> {
        let url = format!("{}/v1/generate", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .json(input)
            .send()
            .await
            .map_err(|e| ForesightError::Connection(e.to_string()))?;

        if response.status().as_u16() == 400 {
            let body: ErrorResponse = response
                .json()
                .await
                .map_err(|e| ForesightError::Serialization(e.to_string()))?;
            return Err(ForesightError::InvalidInput {
                details: body.details,
            });
        }
        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ForesightError::Internal(format!(
                "failed to submit run: {}",
                error_text
            )));
        }

        let submit: SubmitResponse = response
            .json()
            .await
            .map_err(|e| ForesightError::Serialization(e.to_string()))?;
        debug!(run_id = %submit.run_id, "run accepted");

        Ok(submit.run_id)
    }

    /// Poll a run by id.
    pub async fn fetch_run(&self, run_id: &str) -> Result<RunStatus> {
        let url = format!("{}/v1/runs/{}", self.base_url, run_id);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| ForesightError::Connection(e.to_string()))?;

        match response.status().as_u16() {
            404 => Err(ForesightError::run_not_found(run_id)),
            202 => Ok(RunStatus::Processing),
            500 => {
                let body: ErrorResponse = response
                    .json()
                    .await
                    .map_err(|e| ForesightError::Serialization(e.to_string()))?;
                Err(ForesightError::InvalidArtifacts {
                    details: body.details,
                })
            }
            _ => {
                let bundle: ArtifactBundle = response
                    .error_for_status()
                    .map_err(|e| ForesightError::Connection(e.to_string()))?
                    .json()
                    .await
                    .map_err(|e| ForesightError::Serialization(e.to_string()))?;
                Ok(RunStatus::Ready(bundle))
            }
        }
    }

    /// Poll until the run is ready, sleeping `interval` between polls.
    pub async fn wait_for_result(
        &self,
        run_id: &str,
        interval: Duration,
    ) -> Result<ArtifactBundle> {
        loop {
            match self.fetch_run(run_id).await? {
                RunStatus::Ready(bundle) => return Ok(bundle),
                RunStatus::Processing => tokio::time::sleep(interval).await,
            }
        }
    }
}
