//! Data models for the storage layer

use serde::{Deserialize, Serialize};

/// One raw key-value entry as stored in the database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredValue {
    pub key: String,
    pub value: String,
    pub updated_at: u64, // seconds since the Unix epoch
}
