//! Label derivation for crawl sources.
//!
//! Each source URL is reduced to a stable label used as the key in the
//! combined and domain-data files. The mapping is deterministic and
//! idempotent so repeated runs key the same source identically.

use indexmap::IndexMap;
use tracing::warn;

/// Derive a label from a source URL.
///
/// Strips the `http://`/`https://` scheme and a single leading `www.`
/// host label, then collapses every run of non-ASCII-alphanumeric
/// characters into one underscore and trims leading underscores.
///
/// `https://www.philo.com/sellers.json` -> `philo_com_sellers_json`
pub fn sanitize_label(url: &str) -> String {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    let rest = rest.strip_prefix("www.").unwrap_or(rest);

    let mut label = String::with_capacity(rest.len());
    let mut last_was_underscore = false;
    for c in rest.chars() {
        if c.is_ascii_alphanumeric() {
            label.push(c);
            last_was_underscore = false;
        } else if !last_was_underscore {
            label.push('_');
            last_was_underscore = true;
        }
    }

    label.trim_start_matches('_').to_string()
}

/// Insert `value` under the label derived from `url`, disambiguating
/// collisions with a numeric suffix instead of silently overwriting.
///
/// Returns the label actually used.
pub fn insert_labeled<V>(map: &mut IndexMap<String, V>, url: &str, value: V) -> String {
    let base = sanitize_label(url);
    if !map.contains_key(&base) {
        map.insert(base.clone(), value);
        return base;
    }

    let mut n = 2;
    loop {
        let candidate = format!("{}_{}", base, n);
        if !map.contains_key(&candidate) {
            warn!(
                "Label collision: {} also sanitizes to '{}', stored as '{}'",
                url, base, candidate
            );
            map.insert(candidate.clone(), value);
            return candidate;
        }
        n += 1;
    }
}
