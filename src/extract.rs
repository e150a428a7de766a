//! Stage 2: reduce each fetched sellers.json body to its unique seller domains.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, info};

/// Per-label unique domain record.
///
/// `count` is the cardinality of the deduplicated list, not the raw
/// seller count. The list preserves first-seen order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainRecord {
    pub count: usize,
    #[serde(rename = "Unique domains")]
    pub unique_domains: Vec<String>,
}

/// Read the combined `{label -> raw body}` file, extract each label's
/// unique seller domains, and write the `{label -> record}` mapping to
/// `output_path`. Read, parse, and write failures are all fatal.
pub fn extract_domains(input_path: &str, output_path: &str) -> Result<()> {
    let content = std::fs::read_to_string(input_path)
        .with_context(|| format!("Failed to read combined output from {}", input_path))?;
    let combined: IndexMap<String, Value> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {} as JSON", input_path))?;

    let mut records: IndexMap<String, DomainRecord> = IndexMap::new();
    for (label, entry) in &combined {
        let record = extract_unique_domains(label, entry);
        records.insert(label.clone(), record);
    }

    let json =
        serde_json::to_string_pretty(&records).context("Failed to serialize domain data")?;
    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write domain data to {}", output_path))?;

    info!("Extracted domains for {} labels to {}", records.len(), output_path);
    Ok(())
}

/// Deduplicate the `domain` fields of a raw entry's seller list.
///
/// A missing `sellers` field is treated as an empty list. Sellers whose
/// `domain` is absent or not a string are dropped before deduplication.
pub fn extract_unique_domains(label: &str, entry: &Value) -> DomainRecord {
    let sellers = entry
        .get("sellers")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    let mut seen: HashSet<&str> = HashSet::new();
    let mut unique_domains: Vec<String> = Vec::new();
    let mut skipped = 0usize;

    for seller in sellers {
        match seller.get("domain").and_then(Value::as_str) {
            Some(domain) => {
                if seen.insert(domain) {
                    unique_domains.push(domain.to_string());
                }
            }
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!("{}: dropped {} sellers without a domain field", label, skipped);
    }

    DomainRecord {
        count: unique_domains.len(),
        unique_domains,
    }
}
