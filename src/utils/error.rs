use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Request failed for {url}: {message}")]
    TransportError { url: String, message: String },

    #[error("Completion request failed: {message}")]
    CompletionError { message: String },

    #[error("Could not parse extraction response: {message}")]
    ExtractionParseError { message: String },

    #[error("Failed to write listing: {message}")]
    PersistenceError { message: String },

    #[error("Could not read {path}: {message}")]
    InputError { path: String, message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Extraction,
    Storage,
    Input,
    Configuration,
}

impl TrackerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TrackerError::TransportError { .. } | TrackerError::CompletionError { .. } => {
                ErrorCategory::Network
            }
            TrackerError::ExtractionParseError { .. } => ErrorCategory::Extraction,
            TrackerError::PersistenceError { .. } => ErrorCategory::Storage,
            TrackerError::InputError { .. } => ErrorCategory::Input,
            TrackerError::MissingConfigError { .. }
            | TrackerError::InvalidConfigValueError { .. }
            | TrackerError::ConfigValidationError { .. } => ErrorCategory::Configuration,
        }
    }

    /// 給使用者的修復建議
    pub fn recovery_suggestion(&self) -> String {
        match self {
            TrackerError::TransportError { .. } => {
                "Check that the job posting URL is reachable from this machine".to_string()
            }
            TrackerError::CompletionError { .. } => {
                "Check OPENAI_API_KEY and the configured model name".to_string()
            }
            TrackerError::ExtractionParseError { .. } => {
                "The model returned an unexpected format; try the URL again".to_string()
            }
            TrackerError::PersistenceError { .. } => {
                "Check NOTION_API_KEY, NOTION_DATABASE_ID and that the database has the expected columns"
                    .to_string()
            }
            TrackerError::InputError { .. } => {
                "Create the jobs file with one URL per line".to_string()
            }
            TrackerError::MissingConfigError { field } => {
                format!("Set {} in the environment, a .env file or the config file", field)
            }
            TrackerError::InvalidConfigValueError { field, .. }
            | TrackerError::ConfigValidationError { field, .. } => {
                format!("Fix the value of {} in your configuration", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Input problem: {}", self),
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_names_url_and_reason() {
        let err = TrackerError::TransportError {
            url: "https://jobs.example.com/1".to_string(),
            message: "HTTP 404 Not Found".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "Request failed for https://jobs.example.com/1: HTTP 404 Not Found"
        );
        assert_eq!(err.category(), ErrorCategory::Network);
    }

    #[test]
    fn test_missing_config_suggestion_names_variable() {
        let err = TrackerError::MissingConfigError {
            field: "NOTION_API_KEY".to_string(),
        };

        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.recovery_suggestion().contains("NOTION_API_KEY"));
        assert!(err.user_friendly_message().starts_with("Configuration problem"));
    }
}
