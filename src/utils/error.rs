use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnrollError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Record format error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Refusing to overwrite '{file}': it could not be loaded at startup")]
    UnloadedRecordsError { file: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required setting: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Storage,
    Configuration,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EnrollError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EnrollError::IoError(_)
            | EnrollError::CsvError(_)
            | EnrollError::UnloadedRecordsError { .. } => ErrorCategory::Storage,
            EnrollError::ConfigError { .. }
            | EnrollError::ConfigValidationError { .. }
            | EnrollError::InvalidConfigValueError { .. }
            | EnrollError::MissingConfigError { .. } => ErrorCategory::Configuration,
            EnrollError::ValidationError { .. } => ErrorCategory::Input,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Storage => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EnrollError::IoError(_) => {
                "Check that the data directory exists and is writable"
            }
            EnrollError::CsvError(_) => {
                "Inspect students.txt / courses.txt for damaged lines"
            }
            EnrollError::UnloadedRecordsError { .. } => {
                "Fix the read error reported at startup and restart; changes made in this run are not saved"
            }
            EnrollError::ConfigError { .. } | EnrollError::ConfigValidationError { .. } => {
                "Make sure the config file is valid TOML"
            }
            EnrollError::InvalidConfigValueError { .. } => {
                "Correct the highlighted value in the config file or command line"
            }
            EnrollError::MissingConfigError { .. } => "Add the missing setting to the config file",
            EnrollError::ValidationError { .. } => "Re-enter the value and try again",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Storage => format!("Could not access saved records: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Input => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EnrollError>;
