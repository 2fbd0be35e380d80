pub mod defaults;
pub mod toml_config;

use crate::core::{ConfigProvider, OverwritePolicy};
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_range, validate_sources, Validate};
use defaults::LegacyArgs;
use serde::{Deserialize, Serialize};

pub const MAX_CONCURRENCY: usize = 256;

#[cfg_attr(feature = "cli", derive(clap::Parser))]
#[cfg_attr(feature = "cli", command(name = "anagram-etl"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Group words from text files into anagram classes")
)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Word list to read, one word per line (repeat the flag for more files)
    #[cfg_attr(feature = "cli", arg(long = "source"))]
    pub sources: Vec<String>,

    /// File that receives one line per anagram class
    #[cfg_attr(feature = "cli", arg(long = "result"))]
    pub result_path: Option<String>,

    /// Number of sources grouped at the same time
    #[cfg_attr(feature = "cli", arg(long, default_value_t = defaults::DEFAULT_CONCURRENCY))]
    pub concurrency: usize,

    #[cfg_attr(
        feature = "cli",
        arg(long, help = "Fail instead of replacing an existing result file")
    )]
    pub no_clobber: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Enable verbose output"))]
    pub verbose: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Log CPU and memory usage per phase"))]
    pub monitor: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Emit logs as JSON lines"))]
    pub json_logs: bool,

    /// `source=<path>` and `result=<path>` parameters
    #[cfg_attr(feature = "cli", arg(value_name = "KEY=PATH"))]
    pub legacy_args: Vec<String>,
}

impl CliConfig {
    /// Folds legacy parameters in and fills missing paths with their defaults.
    ///
    /// Flags win over legacy parameters for the result path; sources from both are kept.
    pub fn resolve(mut self) -> Self {
        let legacy = LegacyArgs::parse(self.legacy_args.drain(..));
        self.sources.extend(legacy.sources);
        if self.result_path.is_none() {
            self.result_path = legacy.result;
        }

        if self.sources.is_empty() {
            self.sources.push(defaults::default_source());
        }
        if self.result_path.is_none() {
            self.result_path = Some(defaults::default_result());
        }
        self
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            result_path: None,
            concurrency: defaults::DEFAULT_CONCURRENCY,
            no_clobber: false,
            verbose: false,
            monitor: false,
            json_logs: false,
            legacy_args: Vec::new(),
        }
    }
}

impl ConfigProvider for CliConfig {
    fn sources(&self) -> &[String] {
        &self.sources
    }

    fn result_path(&self) -> &str {
        self.result_path
            .as_deref()
            .unwrap_or(defaults::RESULT_FILE_NAME)
    }

    fn concurrent_sources(&self) -> usize {
        self.concurrency
    }

    fn overwrite_policy(&self) -> OverwritePolicy {
        if self.no_clobber {
            OverwritePolicy::Refuse
        } else {
            OverwritePolicy::Replace
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_sources("source", &self.sources)?;
        validate_path("result", self.result_path())?;
        validate_range("concurrency", self.concurrency, 1, MAX_CONCURRENCY)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::AnagramError;
    use tempfile::NamedTempFile;

    #[test]
    fn test_resolve_applies_legacy_args() {
        let config = CliConfig {
            legacy_args: vec!["source=a.txt".to_string(), "result=out.txt".to_string()],
            ..CliConfig::default()
        }
        .resolve();

        assert_eq!(config.sources, vec!["a.txt"]);
        assert_eq!(config.result_path(), "out.txt");
        assert!(config.legacy_args.is_empty());
    }

    #[test]
    fn test_flag_result_wins_over_legacy() {
        let config = CliConfig {
            sources: vec!["a.txt".to_string()],
            result_path: Some("flag.txt".to_string()),
            legacy_args: vec!["source=b.txt".to_string(), "result=legacy.txt".to_string()],
            ..CliConfig::default()
        }
        .resolve();

        assert_eq!(config.sources, vec!["a.txt", "b.txt"]);
        assert_eq!(config.result_path(), "flag.txt");
    }

    #[test]
    fn test_resolve_fills_defaults() {
        let config = CliConfig::default().resolve();
        assert_eq!(config.sources.len(), 1);
        assert!(config.sources[0].ends_with(defaults::SOURCE_FILE_NAME));
        assert!(config.result_path().ends_with(defaults::RESULT_FILE_NAME));
    }

    #[test]
    fn test_no_clobber_refuses() {
        let config = CliConfig {
            no_clobber: true,
            ..CliConfig::default()
        };
        assert_eq!(config.overwrite_policy(), OverwritePolicy::Refuse);
        assert_eq!(
            CliConfig::default().overwrite_policy(),
            OverwritePolicy::Replace
        );
    }

    #[test]
    fn test_validate_missing_source() {
        let config = CliConfig {
            sources: vec!["/no/such/words.txt".to_string()],
            result_path: Some("out.txt".to_string()),
            ..CliConfig::default()
        };

        let err = config.validate().unwrap_err();
        assert!(matches!(err, AnagramError::InvalidConfigValueError { ref field, .. } if field == "source"));
    }

    #[test]
    fn test_validate_concurrency_bounds() {
        let source = NamedTempFile::new().unwrap();
        let mut config = CliConfig {
            sources: vec![source.path().to_str().unwrap().to_string()],
            result_path: Some("out.txt".to_string()),
            ..CliConfig::default()
        };
        assert!(config.validate().is_ok());

        config.concurrency = 0;
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_parse_command_line() {
        use clap::Parser;

        let config = CliConfig::try_parse_from([
            "anagram-etl",
            "--source",
            "words, part 1.txt",
            "--source",
            "c.txt",
            "--no-clobber",
            "result=out.txt",
        ])
        .unwrap()
        .resolve();

        // 路徑中的逗號不會拆開
        assert_eq!(config.sources, vec!["words, part 1.txt", "c.txt"]);
        assert_eq!(config.result_path(), "out.txt");
        assert_eq!(config.concurrency, defaults::DEFAULT_CONCURRENCY);
        assert_eq!(config.overwrite_policy(), OverwritePolicy::Refuse);
    }
}
