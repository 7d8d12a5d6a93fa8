use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// libhangul's hanja dictionary
pub const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/libhangul/libhangul/main/data/hanja/hanja.txt";

const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

fn default_url() -> String {
    env::var("HANJA_SOURCE_URL").unwrap_or_else(|_| DEFAULT_SOURCE_URL.to_string())
}

fn default_timeout_seconds() -> u64 {
    env::var("HANJA_FETCH_TIMEOUT_SECONDS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_TIMEOUT_SECONDS)
}

/// Where the dictionary comes from when no input file is given.
///
/// Fields missing from a config file fall back to the environment, then to the built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub url: String,
    pub timeout_seconds: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl SourceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
