use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnagramError {
    #[error("Cannot read source '{name}': {source}")]
    SourceUnreadable {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write result '{name}': {source}")]
    SinkUnwritable {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Grouping worker failed: {message}")]
    WorkerFailed { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Source,
    Sink,
    Runtime,
    Configuration,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,      // 警告，但成功
            ErrorSeverity::Medium => 2,   // 設定錯誤
            ErrorSeverity::High => 1,     // 讀寫錯誤
            ErrorSeverity::Critical => 3, // 系統錯誤
        }
    }
}

impl AnagramError {
    pub fn source_unreadable(name: impl Into<String>, source: std::io::Error) -> Self {
        Self::SourceUnreadable {
            name: name.into(),
            source,
        }
    }

    pub fn sink_unwritable(name: impl Into<String>, source: std::io::Error) -> Self {
        Self::SinkUnwritable {
            name: name.into(),
            source,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::SourceUnreadable { .. } => ErrorCategory::Source,
            Self::SinkUnwritable { .. } => ErrorCategory::Sink,
            Self::WorkerFailed { .. } => ErrorCategory::Runtime,
            Self::IoError(_) => ErrorCategory::Io,
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Source | ErrorCategory::Sink => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Runtime | ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    /// 給使用者的下一步建議
    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::SourceUnreadable { name, .. } => format!(
                "Check that '{}' exists, is readable and contains UTF-8 text",
                name
            ),
            Self::SinkUnwritable { source, .. }
                if source.kind() == std::io::ErrorKind::AlreadyExists =>
            {
                "Remove the existing result file or run without --no-clobber".to_string()
            }
            Self::SinkUnwritable { name, .. } => format!(
                "Check that the directory of '{}' exists and is writable",
                name
            ),
            Self::WorkerFailed { .. } => {
                "Re-run with --verbose and report the failure if it persists".to_string()
            }
            Self::IoError(_) => "Check file permissions and available disk space".to_string(),
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                "Review the command-line options or the configuration file".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::SourceUnreadable { name, .. } => {
                format!("Source file could not be read: {}", name)
            }
            Self::SinkUnwritable { name, .. } => {
                format!("Result file could not be written: {}", name)
            }
            Self::WorkerFailed { .. } => "Anagram grouping stopped unexpectedly".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AnagramError>;
