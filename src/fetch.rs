//! Stage 1: fetch sellers.json bodies from every configured source.
//!
//! Sources are fetched one at a time in list order. A failing source is
//! logged and skipped; only the final file write can fail the stage.

use anyhow::{bail, Context, Result};
use indexmap::IndexMap;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::HttpConfig;
use crate::label;

/// Fetches sellers.json documents and merges them under sanitized labels.
pub struct SellersFetcher {
    client: Client,
}

impl SellersFetcher {
    pub fn new(http: &HttpConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(http.request_timeout_secs))
            .user_agent(http.user_agent.clone())
            .build()
            .unwrap_or_default();

        Self { client }
    }

    /// Fetch every source and write the merged `{label -> raw body}` mapping
    /// to `output_path`, replacing any existing file.
    ///
    /// Returns the number of sources that were fetched successfully.
    pub async fn fetch_and_save(&self, sources: &[String], output_path: &str) -> Result<usize> {
        let mut combined: IndexMap<String, Value> = IndexMap::new();

        for url in sources {
            match self.fetch_one(url).await {
                Ok(body) => {
                    let used = label::insert_labeled(&mut combined, url, body);
                    info!("Fetched {} -> '{}'", url, used);
                }
                Err(e) => {
                    warn!("Skipping {}: {:#}", url, e);
                }
            }
        }

        let json = serde_json::to_string_pretty(&combined)
            .context("Failed to serialize combined output")?;
        std::fs::write(output_path, json)
            .with_context(|| format!("Failed to write combined output to {}", output_path))?;

        info!(
            "Wrote {} of {} sources to {}",
            combined.len(),
            sources.len(),
            output_path
        );
        Ok(combined.len())
    }

    /// Fetch a single URL and parse its body as JSON.
    async fn fetch_one(&self, url: &str) -> Result<Value> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        let status = response.status();
        if !status.is_success() {
            bail!("{} returned HTTP {}", url, status);
        }

        let text = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {}", url))?;

        serde_json::from_str(&text)
            .with_context(|| format!("Response from {} is not valid JSON", url))
    }
}
