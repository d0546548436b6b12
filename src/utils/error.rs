use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistrarError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Failed to decode database {}: {message}", .path.display())]
    DecodeError { path: PathBuf, message: String },

    #[error("No {collection} ID left to assign after {last_id}")]
    IdSpaceExhausted {
        collection: &'static str,
        last_id: u64,
    },

    #[error("Invalid student or course ID (student {student_id}, course {course_id})")]
    InvalidReference { student_id: u64, course_id: u64 },

    #[error("Student ID {student_id} not found")]
    StudentNotFound { student_id: u64 },

    #[error("Course ID {course_id} not found")]
    CourseNotFound { course_id: u64 },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Storage,
    Data,
    Reference,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RegistrarError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::IoError(_) => ErrorCategory::Storage,
            Self::SerializationError(_)
            | Self::CsvError(_)
            | Self::DecodeError { .. }
            | Self::IdSpaceExhausted { .. } => ErrorCategory::Data,
            Self::InvalidReference { .. }
            | Self::StudentNotFound { .. }
            | Self::CourseNotFound { .. } => ErrorCategory::Reference,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    /// Reference errors are reported to the user but never fail the process.
    /// IO failures are usually transient (permissions, a full disk) and worth retrying.
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Reference => ErrorSeverity::Low,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Data => match self {
                Self::DecodeError { .. } => ErrorSeverity::Critical,
                _ => ErrorSeverity::High,
            },
            ErrorCategory::Storage => ErrorSeverity::Medium,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::IoError(_) => {
                "Check that the database directory exists and is writable".to_string()
            }
            Self::SerializationError(_) | Self::CsvError(_) => {
                "Re-run with --verbose and report the failing record".to_string()
            }
            Self::DecodeError { path, .. } => format!(
                "Fix or remove {}, or set database.on_corrupt = \"reset\" to back it up and start empty",
                path.display()
            ),
            Self::IdSpaceExhausted { collection, .. } => format!(
                "Renumber the {collection} in the database file so the highest ID is below {}",
                u64::MAX
            ),
            Self::InvalidReference { .. } => {
                "Use `view students` and `view courses` to find existing IDs".to_string()
            }
            Self::StudentNotFound { .. } => {
                "Use `view students` to list existing student IDs".to_string()
            }
            Self::CourseNotFound { .. } => {
                "Use `view courses` to list existing course IDs".to_string()
            }
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Check registrar.toml and the command-line flags".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidReference { .. } => "Invalid student or course ID.".to_string(),
            Self::StudentNotFound { student_id } => format!("Student ID {student_id} not found."),
            Self::CourseNotFound { course_id } => format!("Course ID {course_id} not found."),
            Self::DecodeError { path, .. } => {
                format!("Error decoding JSON from {}.", path.display())
            }
            other => other.to_string(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, RegistrarError>;
