//! Stage 3: merge per-label domain records into one ranked frequency report.

use anyhow::{Context, Result};
use chrono::Local;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::extract::DomainRecord;

/// Final crawl report.
///
/// `domains` maps each domain to the number of labels it appeared under,
/// sorted descending by count. `unique_url_count` is the sum of every
/// label's unique-domain count, so a domain disclosed by three systems
/// contributes three.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsolidatedReport {
    #[serde(rename = "crawlDate")]
    pub crawl_date: String,
    #[serde(rename = "uniqueUrlCount")]
    pub unique_url_count: u64,
    pub domains: IndexMap<String, u64>,
}

/// Read the `{label -> domain record}` file, build the ranked report,
/// and write it to `output_path`. Read, parse, and write failures are
/// all fatal.
pub fn consolidate(input_path: &str, output_path: &str) -> Result<ConsolidatedReport> {
    let content = std::fs::read_to_string(input_path)
        .with_context(|| format!("Failed to read domain data from {}", input_path))?;
    let records: IndexMap<String, DomainRecord> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {} as JSON", input_path))?;

    let crawl_date = Local::now().format("%d-%m-%Y").to_string();
    let report = build_report(&records, crawl_date);

    let json = serde_json::to_string_pretty(&report)
        .context("Failed to serialize consolidated report")?;
    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write consolidated report to {}", output_path))?;

    info!(
        "Consolidated {} labels into {} ranked domains at {}",
        records.len(),
        report.domains.len(),
        output_path
    );
    Ok(report)
}

/// Accumulate per-label records into a report stamped with `crawl_date`.
///
/// Domains are tallied in label iteration order, then stable-sorted by
/// count descending, so ties keep their accumulation order.
pub fn build_report(
    records: &IndexMap<String, DomainRecord>,
    crawl_date: String,
) -> ConsolidatedReport {
    let mut domains: IndexMap<String, u64> = IndexMap::new();
    let mut unique_url_count: u64 = 0;

    for record in records.values() {
        unique_url_count += record.count as u64;
        for domain in &record.unique_domains {
            *domains.entry(domain.clone()).or_insert(0) += 1;
        }
    }

    domains.sort_by(|_, a, _, b| b.cmp(a));

    ConsolidatedReport {
        crawl_date,
        unique_url_count,
        domains,
    }
}

/// Print a human-readable end-of-run summary to stdout.
pub fn print_crawl_summary(report: &ConsolidatedReport, top_n: usize) {
    if report.domains.is_empty() {
        println!("No seller domains found.");
        return;
    }

    println!("\n=== Crawl Summary ===");
    println!("Crawl date: {}", report.crawl_date);
    println!("Distinct domains: {}", report.domains.len());
    println!("Sum of per-source unique domains: {}", report.unique_url_count);

    println!("Top {} domains:", top_n.min(report.domains.len()));
    for (domain, count) in report.domains.iter().take(top_n) {
        println!("  {:>5}  {}", count, domain);
    }
    println!("=====================\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(domains: &[&str]) -> DomainRecord {
        DomainRecord {
            count: domains.len(),
            unique_domains: domains.iter().map(|d| d.to_string()).collect(),
        }
    }

    #[test]
    fn test_unique_url_count_is_sum_of_counts() {
        let mut records = IndexMap::new();
        records.insert("a".to_string(), record(&["x.io", "y.io", "z.io"]));
        records.insert("b".to_string(), record(&["x.io", "q.io", "r.io", "s.io", "t.io"]));

        let report = build_report(&records, "01-01-2026".to_string());
        assert_eq!(report.unique_url_count, 8);
    }

    #[test]
    fn test_domains_sorted_descending() {
        let mut records = IndexMap::new();
        records.insert("a".to_string(), record(&["x.io", "y.io"]));
        records.insert("b".to_string(), record(&["x.io"]));
        records.insert("c".to_string(), record(&["x.io", "y.io", "z.io"]));

        let report = build_report(&records, "01-01-2026".to_string());

        let counts: Vec<u64> = report.domains.values().copied().collect();
        for pair in counts.windows(2) {
            assert!(pair[0] >= pair[1], "counts not non-increasing: {:?}", counts);
        }
        assert_eq!(report.domains["x.io"], 3);
        assert_eq!(report.domains["y.io"], 2);
        assert_eq!(report.domains["z.io"], 1);
    }

    #[test]
    fn test_ties_keep_accumulation_order() {
        let mut records = IndexMap::new();
        records.insert("a".to_string(), record(&["first.io", "second.io", "third.io"]));

        let report = build_report(&records, "01-01-2026".to_string());

        // All counts are 1; stable sort keeps first-seen order
        let order: Vec<&str> = report.domains.keys().map(String::as_str).collect();
        assert_eq!(order, vec!["first.io", "second.io", "third.io"]);
    }

    #[test]
    fn test_empty_input_yields_empty_report() {
        let records = IndexMap::new();
        let report = build_report(&records, "01-01-2026".to_string());
        assert_eq!(report.unique_url_count, 0);
        assert!(report.domains.is_empty());
    }

    #[test]
    fn test_report_serializes_with_camel_case_keys() {
        let mut records = IndexMap::new();
        records.insert("a".to_string(), record(&["x.io"]));

        let report = build_report(&records, "05-08-2026".to_string());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["crawlDate"], "05-08-2026");
        assert_eq!(json["uniqueUrlCount"], 1);
        assert_eq!(json["domains"]["x.io"], 1);
    }

    #[test]
    fn test_crawl_date_format() {
        let date = Local::now().format("%d-%m-%Y").to_string();
        assert_eq!(date.len(), 10);
        let bytes = date.as_bytes();
        assert_eq!(bytes[2], b'-');
        assert_eq!(bytes[5], b'-');
        assert!(date.chars().enumerate().all(|(i, c)| {
            if i == 2 || i == 5 { c == '-' } else { c.is_ascii_digit() }
        }));
    }
}
