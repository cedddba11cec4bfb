//! Error types and handling for the tour guide service

use thiserror::Error;

/// Main error type for the tour guide service
#[derive(Error, Debug)]
pub enum TourGuideError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// An external provider could not be reached or answered with a failure
    #[error("Upstream error ({provider}): {message}")]
    Upstream { provider: String, message: String },

    /// Every routing provider was tried and none produced a route
    #[error("Route unavailable: {message}")]
    RouteUnavailable { message: String },

    /// A requested record does not exist
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// The runtime environment lacks a capability (e.g. geolocation)
    #[error("Unsupported: {message}")]
    Unsupported { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl TourGuideError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new upstream error for the named provider
    pub fn upstream<P: Into<String>, S: Into<String>>(provider: P, message: S) -> Self {
        Self::Upstream {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn route_unavailable<S: Into<String>>(message: S) -> Self {
        Self::RouteUnavailable {
            message: message.into(),
        }
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn unsupported<S: Into<String>>(message: S) -> Self {
        Self::Unsupported {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TourGuideError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            TourGuideError::Upstream { provider, .. } => {
                format!("Unable to reach {provider}. Please try again later.")
            }
            TourGuideError::RouteUnavailable { .. } => {
                "Could not find a route right now. Please try again.".to_string()
            }
            TourGuideError::NotFound { message } => message.clone(),
            TourGuideError::Unsupported { .. } => {
                "Location is not available on this device.".to_string()
            }
            TourGuideError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            TourGuideError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = TourGuideError::config("missing API key");
        assert!(matches!(config_err, TourGuideError::Config { .. }));

        let upstream_err = TourGuideError::upstream("osrm", "connection refused");
        assert!(matches!(upstream_err, TourGuideError::Upstream { .. }));
        assert_eq!(
            upstream_err.to_string(),
            "Upstream error (osrm): connection refused"
        );

        let validation_err = TourGuideError::validation("invalid coordinates");
        assert!(matches!(validation_err, TourGuideError::Validation { .. }));
    }

    #[test]
    fn test_user_messages() {
        let upstream_err = TourGuideError::upstream("Overpass", "HTTP 504");
        assert!(upstream_err.user_message().contains("Unable to reach Overpass"));

        let route_err = TourGuideError::route_unavailable("ORS returned 401");
        assert!(route_err.user_message().contains("try again"));

        let not_found = TourGuideError::not_found("No places found for 'xyz'");
        assert_eq!(not_found.user_message(), "No places found for 'xyz'");

        let validation_err = TourGuideError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TourGuideError = io_err.into();
        assert!(matches!(err, TourGuideError::Io { .. }));
    }
}
