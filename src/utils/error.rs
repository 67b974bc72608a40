use crate::document::DocumentError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Document error: {0}")]
    DocumentError(#[from] DocumentError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code for a run that ended with an error of this severity.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl AuditError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AuditError::CsvError(_) | AuditError::DocumentError(_) => ErrorCategory::Input,
            AuditError::TomlError(_)
            | AuditError::ConfigError { .. }
            | AuditError::InvalidConfigValueError { .. }
            | AuditError::MissingConfigError { .. } => ErrorCategory::Configuration,
            AuditError::SerializationError(_) | AuditError::ProcessingError { .. } => {
                ErrorCategory::Data
            }
            AuditError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AuditError::DocumentError(_) => ErrorSeverity::Low,
            AuditError::CsvError(_) | AuditError::ProcessingError { .. } => ErrorSeverity::Medium,
            AuditError::TomlError(_)
            | AuditError::ConfigError { .. }
            | AuditError::InvalidConfigValueError { .. }
            | AuditError::MissingConfigError { .. }
            | AuditError::SerializationError(_) => ErrorSeverity::High,
            AuditError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            AuditError::CsvError(_) => {
                "Check the roster header and delimiter; every row needs the same columns".to_string()
            }
            AuditError::IoError(_) => {
                "Make sure the input file exists and the output directory is writable".to_string()
            }
            AuditError::SerializationError(_) => {
                "Report this as a bug; the audit report could not be encoded".to_string()
            }
            AuditError::TomlError(_) => {
                "Make sure the file is valid TOML and every required table is present".to_string()
            }
            AuditError::DocumentError(e) => format!("Correct the document number: {}", e.field_message()),
            AuditError::ConfigError { .. } => "Review the configuration file".to_string(),
            AuditError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}'", field)
            }
            AuditError::MissingConfigError { field } => format!("Provide a value for '{}'", field),
            AuditError::ProcessingError { .. } => "Retry with --verbose for details".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AuditError::CsvError(e) => format!("Could not read the customer roster: {}", e),
            AuditError::IoError(e) => format!("File system error: {}", e),
            AuditError::TomlError(_) => "The configuration file is not valid TOML".to_string(),
            AuditError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            AuditError::DocumentError(e) => e.field_message().to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AuditError>;
