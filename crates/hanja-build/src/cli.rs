use std::path::PathBuf;

use clap::Parser;
use hanja_config::Config;

/// Build the hanja lookup database from a `hangul:hanja:meaning` dictionary
#[derive(Debug, Parser)]
#[command(name = "hanja-build", version, about)]
pub struct Args {
    /// Dictionary text file. Downloaded from the configured URL when omitted.
    pub input: Option<PathBuf>,

    /// Database to write. Defaults to the configured output path.
    pub output: Option<PathBuf>,

    /// JSON config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the download URL
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Print the build summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Apply command line overrides on top of a loaded config
    pub fn apply(&self, config: &mut Config) {
        if let Some(url) = &self.url {
            config.source.url = url.clone();
        }
        if let Some(output) = &self.output {
            config.output.path = output.clone();
        }
        match self.verbose {
            0 => {}
            1 => config.log.level = "debug".to_string(),
            _ => config.log.level = "trace".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn test_no_positional_arguments() {
        let args = Args::try_parse_from(["hanja-build"]).unwrap();
        assert!(args.input.is_none());
        assert!(args.output.is_none());
        assert!(!args.json);
    }

    #[test]
    fn test_input_and_output() {
        let args = Args::try_parse_from(["hanja-build", "hanja.txt", "out/hanja.db"]).unwrap();
        assert_eq!(args.input.as_deref(), Some(Path::new("hanja.txt")));
        assert_eq!(args.output.as_deref(), Some(Path::new("out/hanja.db")));
    }

    #[test]
    fn test_rejects_third_positional() {
        assert!(Args::try_parse_from(["hanja-build", "a", "b", "c"]).is_err());
    }

    #[test]
    fn test_apply_overrides_config() {
        let args = Args::try_parse_from([
            "hanja-build",
            "--url",
            "http://localhost/hanja.txt",
            "-vv",
            "in.txt",
            "custom.db",
        ])
        .unwrap();

        let mut config = Config::default();
        args.apply(&mut config);
        assert_eq!(config.source.url, "http://localhost/hanja.txt");
        assert_eq!(config.output.path, Path::new("custom.db"));
        assert_eq!(config.log.level, "trace");
    }

    #[test]
    fn test_apply_without_flags_keeps_config() {
        let args = Args::try_parse_from(["hanja-build"]).unwrap();
        let mut config = Config::default();
        args.apply(&mut config);
        assert_eq!(config, Config::default());
    }
}
