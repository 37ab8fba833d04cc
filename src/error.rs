//! Error types and handling for the `TravelWeather` application

use thiserror::Error;

/// Main error type for the `TravelWeather` application
#[derive(Error, Debug)]
pub enum TravelWeatherError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// The search query was blank after trimming
    #[error("Search query is empty")]
    EmptyQuery,

    /// The reference dataset failed its load-time checks
    #[error("Dataset integrity violation: {message}")]
    DatasetIntegrity { message: String },

    /// No saved destination with this id is visible to the caller
    #[error("Saved destination {id} not found")]
    RecordNotFound { id: u64 },

    /// The operation needs a signed-in user
    #[error("No user is signed in")]
    Unauthenticated,

    /// Record store failures
    #[error("Store error: {message}")]
    Store { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl TravelWeatherError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new dataset integrity error
    pub fn integrity<S: Into<String>>(message: S) -> Self {
        Self::DatasetIntegrity {
            message: message.into(),
        }
    }

    /// Create a new store error
    pub fn store<S: Into<String>>(message: S) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TravelWeatherError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            TravelWeatherError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            TravelWeatherError::EmptyQuery => {
                "Type a country or month to search (e.g. Japan, March).".to_string()
            }
            TravelWeatherError::DatasetIntegrity { message } => {
                format!("Travel data is inconsistent: {message}")
            }
            TravelWeatherError::RecordNotFound { .. } => {
                "That saved destination no longer exists.".to_string()
            }
            TravelWeatherError::Unauthenticated => {
                "Please sign in to manage saved destinations.".to_string()
            }
            TravelWeatherError::Store { .. } => {
                "Saved destinations are unavailable right now. Please try again.".to_string()
            }
            TravelWeatherError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

impl From<serde_json::Error> for TravelWeatherError {
    fn from(err: serde_json::Error) -> Self {
        TravelWeatherError::integrity(format!("malformed dataset: {err}"))
    }
}

impl From<postcard::Error> for TravelWeatherError {
    fn from(err: postcard::Error) -> Self {
        TravelWeatherError::store(format!("record encoding failed: {err}"))
    }
}

impl From<fjall::Error> for TravelWeatherError {
    fn from(err: fjall::Error) -> Self {
        TravelWeatherError::store(err.to_string())
    }
}

impl From<tokio::task::JoinError> for TravelWeatherError {
    fn from(err: tokio::task::JoinError) -> Self {
        TravelWeatherError::store(format!("background task failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = TravelWeatherError::config("bad port");
        assert!(matches!(config_err, TravelWeatherError::Config { .. }));

        let integrity_err = TravelWeatherError::integrity("duplicate region");
        assert!(matches!(
            integrity_err,
            TravelWeatherError::DatasetIntegrity { .. }
        ));

        let validation_err = TravelWeatherError::validation("unknown month");
        assert!(matches!(validation_err, TravelWeatherError::Validation { .. }));
    }

    #[test]
    fn test_user_messages() {
        let validation_err = TravelWeatherError::validation("Smarch");
        assert!(validation_err.user_message().contains("Smarch"));

        assert!(
            TravelWeatherError::EmptyQuery
                .user_message()
                .contains("country or month")
        );
        assert!(
            TravelWeatherError::Unauthenticated
                .user_message()
                .contains("sign in")
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TravelWeatherError = io_err.into();
        assert!(matches!(err, TravelWeatherError::Io { .. }));
    }

    #[test]
    fn test_json_error_is_integrity_violation() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: TravelWeatherError = json_err.into();
        assert!(matches!(err, TravelWeatherError::DatasetIntegrity { .. }));
    }
}
