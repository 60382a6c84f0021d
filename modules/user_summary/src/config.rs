use serde::{Deserialize, Serialize};

/// Configuration for the user_summary module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserSummaryConfig {
    #[serde(default = "default_source_base_url")]
    pub source_base_url: String,
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: u32,
    #[serde(default = "default_request_timeout_sec")]
    pub request_timeout_sec: u64,
}

impl Default for UserSummaryConfig {
    fn default() -> Self {
        Self {
            source_base_url: default_source_base_url(),
            fetch_limit: default_fetch_limit(),
            request_timeout_sec: default_request_timeout_sec(),
        }
    }
}

fn default_source_base_url() -> String {
    "https://dummyjson.com".to_string()
}

fn default_fetch_limit() -> u32 {
    100
}

fn default_request_timeout_sec() -> u64 {
    30
}
