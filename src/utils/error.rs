use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Input file not found: {path}")]
    InputNotFoundError { path: String },

    #[error("Invalid input document: {message}")]
    InvalidDocumentError { message: String },

    #[error("Invalid repository record at index {index}: {message}")]
    InvalidRecordError { index: usize, message: String },

    #[error("Repository record at index {index} has no '{field}' field")]
    MissingFieldError { index: usize, field: String },

    #[error("Cannot parse percentage '{value}' for language '{language}'")]
    PercentageParseError { language: String, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Config,
    Input,
    Data,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// 程序結束碼：資料與輸入錯誤為 1，設定錯誤為 2，I/O 錯誤為 3
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::TomlError(_)
            | EtlError::ConfigError { .. }
            | EtlError::InvalidConfigValueError { .. } => ErrorCategory::Config,
            EtlError::InputNotFoundError { .. }
            | EtlError::InvalidDocumentError { .. }
            | EtlError::SerializationError(_) => ErrorCategory::Input,
            EtlError::InvalidRecordError { .. }
            | EtlError::MissingFieldError { .. }
            | EtlError::PercentageParseError { .. } => ErrorCategory::Data,
            EtlError::IoError(_) => ErrorCategory::Io,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 參數或設定錯誤，與 clap 的用法錯誤同樣以 2 結束
            ErrorCategory::Config => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Data => ErrorSeverity::High,
            // 寫入失敗通常是權限或磁碟問題
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EtlError::InputNotFoundError { path } => {
                format!("Check that '{}' exists and is readable", path)
            }
            EtlError::SerializationError(_) | EtlError::InvalidDocumentError { .. } => {
                "The input must be a JSON array of repository objects".to_string()
            }
            EtlError::InvalidRecordError { index, .. } => format!(
                "Fix repository #{}: it must be an object whose 'languages' is an array of objects",
                index
            ),
            EtlError::MissingFieldError { index, field } => {
                format!("Add a '{}' array to repository #{}", field, index)
            }
            EtlError::PercentageParseError { language, .. } => format!(
                "Use a numeric percentage string for '{}', e.g. \"42.5\"",
                language
            ),
            EtlError::TomlError(_) => "Check the TOML syntax of the config file".to_string(),
            EtlError::ConfigError { .. } | EtlError::InvalidConfigValueError { .. } => {
                "Review the command line flags and config file values".to_string()
            }
            EtlError::IoError(_) => {
                "Check file permissions and free disk space, then retry".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Config => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Could not read the repositories file: {}", self),
            ErrorCategory::Data => format!("Repository data is invalid: {}", self),
            ErrorCategory::Io => format!("File system error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
