//! Remote dataset sources.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::{Result, TracklensError};

/// Default catalog identifier on the Hugging Face hub.
pub const DEFAULT_REMOTE_ID: &str = "maharshipandya/spotify-tracks-dataset";

/// A named catalog that can hand over the dataset as CSV bytes.
pub trait RemoteSource: Send + Sync {
    /// Identifier used in logs and metadata.
    fn name(&self) -> &str;

    /// Download the dataset.
    fn fetch(&self) -> Result<Vec<u8>>;
}

/// Downloads a CSV file from a Hugging Face dataset repository.
pub struct HuggingFaceSource {
    client: Client,
    dataset_id: String,
    file: String,
    revision: String,
}

impl HuggingFaceSource {
    /// Create a source for `dataset_id` with the given request timeout.
    pub fn new(
        dataset_id: impl Into<String>,
        file: impl Into<String>,
        revision: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TracklensError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            dataset_id: dataset_id.into(),
            file: file.into(),
            revision: revision.into(),
        })
    }

    /// Download URL of the configured file.
    pub fn url(&self) -> String {
        format!(
            "https://huggingface.co/datasets/{}/resolve/{}/{}",
            self.dataset_id, self.revision, self.file
        )
    }

    fn fetch_error(&self, message: impl Into<String>) -> TracklensError {
        TracklensError::Fetch {
            source_name: self.dataset_id.clone(),
            message: message.into(),
        }
    }
}

impl RemoteSource for HuggingFaceSource {
    fn name(&self) -> &str {
        &self.dataset_id
    }

    fn fetch(&self) -> Result<Vec<u8>> {
        let url = self.url();
        tracing::info!("Downloading dataset from {}", url);

        let response = self.client.get(&url).send().map_err(|e| {
            if e.is_timeout() {
                self.fetch_error(format!("request timed out: {}", e))
            } else {
                self.fetch_error(format!("request failed: {}", e))
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            let excerpt: String = body.chars().take(200).collect();
            return Err(self.fetch_error(format!("HTTP {}: {}", status, excerpt)));
        }

        let bytes = response
            .bytes()
            .map_err(|e| self.fetch_error(format!("failed to read body: {}", e)))?;
        Ok(bytes.to_vec())
    }
}
