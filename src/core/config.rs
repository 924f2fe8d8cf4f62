//! Runtime configuration resolved from environment variables.
//!
//! - `PICK_DUEL_DB`: picks database path (default: platform data dir)
//! - `PICK_DUEL_SCHEDULE`: comma-separated schedule sources, tried in order
//! - `PICK_DUEL_TIMEOUT_SECS`: per-source fetch timeout (default: 10)

use std::path::PathBuf;
use std::time::Duration;

use super::files::default_database_path;
use super::http::Source;
use crate::{DB_ENV_VAR, SCHEDULE_ENV_VAR, TIMEOUT_ENV_VAR};

/// Default per-candidate fetch timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Schedule locations tried when nothing is configured.
pub const DEFAULT_SCHEDULE_SOURCES: [&str; 2] =
    ["data/weekly/latest.csv", "docs/data/weekly/latest.csv"];

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_path: PathBuf,
    pub schedule_sources: Vec<Source>,
    pub fetch_timeout: Duration,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let database_path = lookup(DB_ENV_VAR)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_database_path);

        let schedule_sources = lookup(SCHEDULE_ENV_VAR)
            .map(|s| Source::parse_list(&s))
            .filter(|sources| !sources.is_empty())
            .unwrap_or_else(|| {
                DEFAULT_SCHEDULE_SOURCES
                    .iter()
                    .map(|s| Source::parse(s))
                    .collect()
            });

        let timeout_secs = lookup(TIMEOUT_ENV_VAR)
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            database_path,
            schedule_sources,
            fetch_timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Command-line sources take precedence over the configured ones.
    pub fn sources_or_default(&self, cli_sources: &[String]) -> Vec<Source> {
        if cli_sources.is_empty() {
            self.schedule_sources.clone()
        } else {
            cli_sources.iter().map(|s| Source::parse(s)).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(|_| None);

        assert_eq!(config.database_path, default_database_path());
        assert_eq!(config.fetch_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.schedule_sources.len(), 2);
        assert_eq!(
            config.schedule_sources[0],
            Source::File(PathBuf::from("data/weekly/latest.csv"))
        );
    }

    #[test]
    fn test_values_from_environment() {
        let config = Config::from_lookup(lookup_from(&[
            (DB_ENV_VAR, "/tmp/picks.db"),
            (
                SCHEDULE_ENV_VAR,
                "https://example.com/latest.csv, local/latest.csv",
            ),
            (TIMEOUT_ENV_VAR, "3"),
        ]));

        assert_eq!(config.database_path, PathBuf::from("/tmp/picks.db"));
        assert_eq!(config.fetch_timeout, Duration::from_secs(3));
        assert_eq!(
            config.schedule_sources,
            vec![
                Source::Url("https://example.com/latest.csv".to_string()),
                Source::File(PathBuf::from("local/latest.csv")),
            ]
        );
    }

    #[test]
    fn test_invalid_timeout_falls_back() {
        let config = Config::from_lookup(lookup_from(&[(TIMEOUT_ENV_VAR, "0")]));
        assert_eq!(config.fetch_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        let config = Config::from_lookup(lookup_from(&[(TIMEOUT_ENV_VAR, "soon")]));
        assert_eq!(config.fetch_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = Config::from_lookup(lookup_from(&[
            (DB_ENV_VAR, "  "),
            (SCHEDULE_ENV_VAR, " , "),
        ]));
        assert_eq!(config.database_path, default_database_path());
        assert_eq!(config.schedule_sources.len(), 2);
    }

    #[test]
    fn test_cli_sources_override() {
        let config = Config::from_lookup(|_| None);
        let sources = config.sources_or_default(&["picks.csv".to_string()]);
        assert_eq!(sources, vec![Source::File(PathBuf::from("picks.csv"))]);

        let sources = config.sources_or_default(&[]);
        assert_eq!(sources, config.schedule_sources);
    }
}
