//! CSV source retrieval: an ordered list of candidates, the first that
//! loads wins.
//!
//! Candidates are either URLs or local file paths. URLs are requested with
//! a cache-busting `v=<unix millis>` parameter and a per-candidate timeout;
//! a non-2xx status counts as a failed attempt. When every candidate fails,
//! the error lists each attempt and why it failed.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

use crate::error::{FailedAttempt, PickError, Result};

/// One place a CSV document may be loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    File(PathBuf),
}

impl Source {
    /// `http://` and `https://` prefixes mean a URL; anything else is a path.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Source::Url(raw.to_string())
        } else {
            Source::File(PathBuf::from(raw))
        }
    }

    /// Parse a comma-separated candidate list, skipping blanks.
    pub fn parse_list(raw: &str) -> Vec<Self> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Source::parse)
            .collect()
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Url(url) => write!(f, "{url}"),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Build the shared HTTP client.
pub fn build_client() -> Result<Client> {
    let client = Client::builder()
        .user_agent(concat!("pick-duel/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Append a `v=<millis>` parameter so intermediaries never serve a stale copy.
pub fn cache_busted(url: &str, millis: i64) -> String {
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}v={millis}")
}

/// Load one candidate. The error string is the failure reason.
async fn fetch_one(
    client: &Client,
    source: &Source,
    timeout: Duration,
) -> std::result::Result<String, String> {
    match source {
        Source::File(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|e| e.to_string()),
        Source::Url(url) => {
            let url = cache_busted(url, chrono::Utc::now().timestamp_millis());
            let res = client
                .get(&url)
                .timeout(timeout)
                .send()
                .await
                .map_err(|e| {
                    if e.is_timeout() {
                        format!("timed out after {}ms", timeout.as_millis())
                    } else {
                        e.to_string()
                    }
                })?;

            let status = res.status();
            if !status.is_success() {
                return Err(format!("HTTP {}", status.as_u16()));
            }
            res.text().await.map_err(|e| e.to_string())
        }
    }
}

/// Try each candidate in order and return the first successful body along
/// with the candidate that produced it.
pub async fn fetch_first(
    client: &Client,
    sources: &[Source],
    timeout: Duration,
) -> Result<(Source, String)> {
    let mut attempts = Vec::with_capacity(sources.len());

    for source in sources {
        debug!(%source, "fetching CSV source");
        match fetch_one(client, source, timeout).await {
            Ok(body) => {
                debug!(%source, bytes = body.len(), "CSV source loaded");
                return Ok((source.clone(), body));
            }
            Err(reason) => {
                warn!(%source, %reason, "CSV source failed, trying next candidate");
                attempts.push(FailedAttempt {
                    source: source.to_string(),
                    reason,
                });
            }
        }
    }

    Err(PickError::SourceUnavailable { attempts })
}

#[cfg(test)]
mod tests;
