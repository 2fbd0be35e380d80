use crate::config::{defaults, MAX_CONCURRENCY};
use crate::core::{ConfigProvider, OverwritePolicy};
use crate::utils::error::{AnagramError, Result};
use crate::utils::validation::{validate_path, validate_range, validate_sources, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub processing: Option<ProcessingConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub sources: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub result_path: String,
    /// `false` 時若結果檔已存在則失敗
    pub overwrite: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    pub concurrency: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AnagramError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| AnagramError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${WORDS_DIR})，未定義的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid pattern"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn concurrency(&self) -> usize {
        self.processing
            .as_ref()
            .and_then(|p| p.concurrency)
            .unwrap_or(defaults::DEFAULT_CONCURRENCY)
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.monitoring.as_ref().and_then(|m| m.log_level.as_deref())
    }
}

impl ConfigProvider for TomlConfig {
    fn sources(&self) -> &[String] {
        &self.input.sources
    }

    fn result_path(&self) -> &str {
        &self.output.result_path
    }

    fn concurrent_sources(&self) -> usize {
        self.concurrency()
    }

    fn overwrite_policy(&self) -> OverwritePolicy {
        match self.output.overwrite {
            Some(false) => OverwritePolicy::Refuse,
            _ => OverwritePolicy::Replace,
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_sources("input.sources", &self.input.sources)?;
        validate_path("output.result_path", &self.output.result_path)?;
        validate_range(
            "processing.concurrency",
            self.concurrency(),
            1,
            MAX_CONCURRENCY,
        )?;
        Ok(())
    }
}
