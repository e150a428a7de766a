//! Sequential pipeline driver.
//!
//! The three stages communicate only through their files on disk; a fatal
//! failure in any stage aborts the remaining ones. Per-URL fetch failures
//! are handled inside stage 1 and never reach this level.

use anyhow::Result;
use tracing::info;

use crate::config::AppConfig;
use crate::consolidate::{self, ConsolidatedReport};
use crate::extract;
use crate::fetch::SellersFetcher;

/// Run fetch, extract, and consolidate strictly in sequence.
pub async fn run(config: &AppConfig) -> Result<ConsolidatedReport> {
    let out = &config.output;

    let fetcher = SellersFetcher::new(&config.http);
    let fetched = fetcher
        .fetch_and_save(&config.sources.urls, &out.combined_path)
        .await?;
    info!("Stage 1 complete: {} of {} sources fetched", fetched, config.sources.urls.len());

    extract::extract_domains(&out.combined_path, &out.domain_data_path)?;
    info!("Stage 2 complete: domain data written");

    let report = consolidate::consolidate(&out.domain_data_path, &out.consolidated_path)?;
    info!("Stage 3 complete: consolidated report written");

    Ok(report)
}
