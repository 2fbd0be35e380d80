use std::path::{Path, PathBuf};

pub const SOURCE_FILE_NAME: &str = "sample.txt";
pub const RESULT_FILE_NAME: &str = "result.txt";
pub const DEFAULT_CONCURRENCY: usize = 4;

const SOURCE_PREFIX: &str = "source=";
const RESULT_PREFIX: &str = "result=";

/// Directory holding the running executable, or the current directory when it cannot be found.
pub fn default_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn default_source() -> String {
    let dir = default_dir();
    tracing::info!("Use default source file dir: {}", dir.display());
    dir.join(SOURCE_FILE_NAME).display().to_string()
}

pub fn default_result() -> String {
    let dir = default_dir();
    tracing::info!("Use default result file dir: {}", dir.display());
    dir.join(RESULT_FILE_NAME).display().to_string()
}

/// `source=<path>` / `result=<path>` parameters, as older scripts pass them.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LegacyArgs {
    pub sources: Vec<String>,
    pub result: Option<String>,
}

impl LegacyArgs {
    pub fn parse<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut parsed = Self::default();
        for arg in args {
            let arg = arg.as_ref();
            if let Some(path) = arg.strip_prefix(SOURCE_PREFIX) {
                parsed.sources.push(path.to_string());
            } else if let Some(path) = arg.strip_prefix(RESULT_PREFIX) {
                // 第一個 result= 為準
                if parsed.result.is_none() {
                    parsed.result = Some(path.to_string());
                } else {
                    tracing::warn!("⚠️ Ignoring extra parameter: {}", arg);
                }
            } else {
                tracing::warn!("⚠️ Ignoring unknown parameter: {}", arg);
            }
        }
        parsed
    }
}
