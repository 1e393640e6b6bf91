use crate::core::scripture::ScriptureError;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LiturgistError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    SpreadsheetError(#[from] calamine::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    TemplateError(#[from] handlebars::RenderError),

    #[error("Scripture error: {0}")]
    ScriptureError(#[from] ScriptureError),

    #[error("Unexpected schedule file type: {extension}")]
    UnsupportedScheduleError { extension: String },

    #[error("Date {date} was not found in the schedule.")]
    DateNotFoundError { date: NaiveDate },

    #[error("Error parsing date '{value}'")]
    DateParseError { value: String },

    #[error("Unable to open template file: {path}")]
    TemplateNotFoundError { path: String },

    #[error("Document conversion with '{program}' failed: {message}")]
    ConversionError { program: String, message: String },

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

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Processing,
    Output,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl LiturgistError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LiturgistError::CsvError(_)
            | LiturgistError::SpreadsheetError(_)
            | LiturgistError::UnsupportedScheduleError { .. }
            | LiturgistError::DateNotFoundError { .. }
            | LiturgistError::DateParseError { .. } => ErrorCategory::Input,
            LiturgistError::ConfigError { .. }
            | LiturgistError::ConfigValidationError { .. }
            | LiturgistError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            LiturgistError::SerializationError(_)
            | LiturgistError::ScriptureError(_)
            | LiturgistError::ProcessingError { .. } => ErrorCategory::Processing,
            LiturgistError::TemplateError(_)
            | LiturgistError::TemplateNotFoundError { .. }
            | LiturgistError::ConversionError { .. } => ErrorCategory::Output,
            LiturgistError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Processing => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::Medium,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            LiturgistError::UnsupportedScheduleError { .. } => {
                "Save the schedule as .csv, .json, .ods, .xlsx or .xls".to_string()
            }
            LiturgistError::DateNotFoundError { .. } => {
                "Pass --date with a date present in the schedule's Date column".to_string()
            }
            LiturgistError::DateParseError { .. } => {
                "Use an ISO date such as 2024-02-18".to_string()
            }
            LiturgistError::TemplateNotFoundError { .. } => {
                "Check the --template path".to_string()
            }
            LiturgistError::ScriptureError(_) => {
                "Check the scripture reference against the Bible JSON (book, chapter and verse)"
                    .to_string()
            }
            LiturgistError::ConversionError { program, .. } => {
                format!("Make sure '{}' is installed and on PATH, or write a .txt/.html output", program)
            }
            LiturgistError::CsvError(_) => "Check the schedule for malformed rows".to_string(),
            LiturgistError::SpreadsheetError(_) => {
                "Check that the schedule opens in a spreadsheet application".to_string()
            }
            LiturgistError::TemplateError(_) => "Check the template syntax".to_string(),
            _ => match self.category() {
                ErrorCategory::Configuration => "Review the configuration file".to_string(),
                ErrorCategory::System => "Check file permissions and paths".to_string(),
                _ => "Run with --verbose for more detail".to_string(),
            },
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            LiturgistError::DateNotFoundError { .. }
            | LiturgistError::TemplateNotFoundError { .. }
            | LiturgistError::UnsupportedScheduleError { .. } => self.to_string(),
            LiturgistError::IoError(e) => format!("Unable to read or write a file: {}", e),
            LiturgistError::CsvError(e) => format!("Error reading schedule: {}", e),
            LiturgistError::SpreadsheetError(e) => format!("Error reading schedule: {}", e),
            LiturgistError::TemplateError(e) => format!("Error rendering template: {}", e),
            LiturgistError::ConversionError { .. } => format!("Error generating output: {}", self),
            _ => format!("Error processing schedule data: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, LiturgistError>;
