//! Core utilities for the pick tracker
//!
//! This module consolidates common utilities that are used across
//! the application:
//! - `csv`: CSV parsing and writing with named-field access
//! - `files`: Default locations and whole-file writes
//! - `http`: Ordered source candidates and first-successful fetch
//! - `config`: Environment configuration

pub mod config;
pub mod csv;
pub mod files;
pub mod http;

// Re-export commonly used items for convenience
pub use config::Config;
pub use csv::{CsvTable, Record};
pub use files::write_string;
pub use http::{build_client, fetch_first, Source};
