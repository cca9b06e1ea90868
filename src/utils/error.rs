use thiserror::Error;

#[derive(Error, Debug)]
pub enum SelectorError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Catalog source '{source_name}' failed: {message}")]
    SourceError { source_name: String, message: String },

    #[error("Catalog contains no usable product records")]
    EmptyCatalog,

    #[error("Invalid input for '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    Input,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl SelectorError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn source_failed(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SourceError {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::HttpError(_) | Self::SourceError { .. } => ErrorCategory::Network,
            Self::CsvError(_) | Self::SerializationError(_) | Self::EmptyCatalog => {
                ErrorCategory::Data
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::InvalidInput { .. } => ErrorCategory::Input,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration | ErrorCategory::Input => {
                ErrorSeverity::High
            }
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::HttpError(_) | Self::SourceError { .. } => {
                "Could not fetch the product catalog.".to_string()
            }
            Self::CsvError(_) | Self::SerializationError(_) => {
                "The product catalog could not be parsed.".to_string()
            }
            Self::EmptyCatalog => "The product catalog has no usable products.".to_string(),
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::ConfigValidationError { field, message } => {
                format!("Configuration field '{}' is invalid: {}", field, message)
            }
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
            Self::MissingConfigError { field } => {
                format!("Configuration field '{}' is required", field)
            }
            Self::InvalidInput { field, reason } => format!("Invalid {}: {}", field, reason),
            Self::IoError(e) => format!("File system error: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => {
                "Check the sheet URL and your connection, or pass --catalog to use a local file"
            }
            ErrorCategory::Data => {
                "Make sure the catalog has Model, Length, Girth and Girth Category columns"
            }
            ErrorCategory::Configuration => "Review the command line flags and the TOML config",
            ErrorCategory::Input => "Use measurements from --list-options and ranges with min <= max",
            ErrorCategory::System => "Check that the paths exist and are readable/writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, SelectorError>;
