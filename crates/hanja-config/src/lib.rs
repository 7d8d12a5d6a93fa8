use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use self::log::LogConfig;
use self::output::OutputConfig;
use self::source::SourceConfig;

pub mod log;
pub mod output;
pub mod source;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub output: OutputConfig,
    pub log: LogConfig,
}

impl Config {
    /// Built-in defaults with `HANJA_*` environment overrides
    pub fn new() -> Self {
        Config {
            source: SourceConfig::new(),
            output: OutputConfig::new(),
            log: LogConfig::new(),
        }
    }

    /// Load a JSON config file. Fields the file leaves out come from [`Config::new`].
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file {}", path.display()))?;
        let reader = BufReader::new(file);
        let config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Load `path` if given, env defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::new()),
        }
    }
}
