use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Resource location inside the input-method app, relative to the working directory
pub const DEFAULT_OUTPUT_PATH: &str = "NRIME/Resources/hanja.db";

fn default_path() -> PathBuf {
    env::var_os("HANJA_OUTPUT_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }
}
