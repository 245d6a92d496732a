//! Error types and utilities for Omni Bot

use thiserror::Error;

/// Result type alias for Omni Bot operations
pub type Result<T> = std::result::Result<T, OmniError>;

/// Main error type for Omni Bot operations
#[derive(Error, Debug)]
pub enum OmniError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Network related errors (HTTP requests, etc.)
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An upstream data provider answered, but not with something usable
    #[error("{provider} error: {message}")]
    Provider {
        provider: String,
        message: String,
        status_code: Option<u16>,
    },

    /// Discord API related errors
    #[error("Discord API error: {message}")]
    Discord {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Chart rendering errors
    #[error("Chart error: {message}")]
    Chart {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation errors for user input or data
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Generic error with custom message
    #[error("{message}")]
    Generic {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl OmniError {
    /// Create a new generic error with a custom message
    pub fn new(msg: impl Into<String>) -> Self {
        Self::Generic {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new generic error with a custom message and source
    pub fn with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Generic {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new network error with source
    pub fn network_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Network {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new provider error
    pub fn provider(provider: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: msg.into(),
            status_code: None,
        }
    }

    /// Create a new provider error carrying the HTTP status it answered with
    pub fn provider_with_status(
        provider: impl Into<String>,
        msg: impl Into<String>,
        status: u16,
    ) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: msg.into(),
            status_code: Some(status),
        }
    }

    /// Create a new Discord API error
    pub fn discord(msg: impl Into<String>) -> Self {
        Self::Discord {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new chart error
    pub fn chart(msg: impl Into<String>) -> Self {
        Self::Chart {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new chart error with source
    pub fn chart_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Chart {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: None,
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// HTTP status code reported by an upstream provider, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Provider { status_code, .. } => *status_code,
            _ => None,
        }
    }

    /// Whether the failure is worth retrying (timeouts, connection drops, 5xx)
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network { .. } => true,
            Self::Provider { status_code, .. } => status_code.map_or(false, |s| s >= 500),
            _ => false,
        }
    }
}

// Error conversion implementations for external types

/// Convert from reqwest::Error to OmniError
impl From<reqwest::Error> for OmniError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::network_with_source("Request timeout", err)
        } else if err.is_connect() {
            Self::network_with_source("Connection failed", err)
        } else if err.is_status() {
            let status_code = err.status().map(|s| s.as_u16()).unwrap_or(0);
            Self::network_with_source(format!("HTTP error: {}", status_code), err)
        } else if err.is_decode() {
            Self::with_source("Malformed response body", err)
        } else {
            Self::network_with_source("Network request failed", err)
        }
    }
}

/// Convert from toml::de::Error to OmniError
impl From<toml::de::Error> for OmniError {
    fn from(err: toml::de::Error) -> Self {
        Self::config_with_source("TOML parsing error", err)
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to OmniError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for OmniError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::chart_with_source("Chart rendering failed", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    #[test]
    fn test_error_creation() {
        let error = OmniError::new("test message");
        assert!(error.to_string().contains("test message"));

        let config_error = OmniError::config("config issue");
        assert_eq!(config_error.to_string(), "Configuration error: config issue");

        let provider_error = OmniError::provider_with_status("Odds API", "Server error", 503);
        assert_eq!(provider_error.to_string(), "Odds API error: Server error");
        assert_eq!(provider_error.status_code(), Some(503));

        let validation_error = OmniError::validation_field("Unknown sport", "sport");
        assert!(validation_error.to_string().contains("Validation error"));
        assert!(validation_error.to_string().contains("Unknown sport"));
    }

    #[test]
    fn test_error_with_source() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let wrapped_error = OmniError::with_source("Failed to read file", io_error);

        assert!(wrapped_error.to_string().contains("Failed to read file"));
        assert!(wrapped_error.source().is_some());

        let chart_error = OmniError::chart_with_source(
            "Encoding failed",
            io::Error::new(io::ErrorKind::Other, "buffer too small"),
        );
        assert!(chart_error.to_string().starts_with("Chart error"));
        assert!(chart_error.source().is_some());
    }

    #[test]
    fn test_transient_classification() {
        assert!(OmniError::network("timeout").is_transient());
        assert!(OmniError::provider_with_status("Quotes", "bad gateway", 502).is_transient());
        assert!(!OmniError::provider_with_status("Quotes", "unauthorized", 401).is_transient());
        assert!(!OmniError::provider("Quotes", "no status").is_transient());
        assert!(!OmniError::validation("nope").is_transient());
    }

    #[test]
    fn test_serde_error_conversion() {
        let serde_error =
            serde_json::from_str::<serde_json::Value>(r#"{"invalid": json}"#).unwrap_err();
        let omni_error: OmniError = serde_error.into();

        assert!(omni_error.to_string().contains("Serialization error"));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_error = toml::from_str::<toml::Value>("key = = value").unwrap_err();
        let omni_error: OmniError = toml_error.into();

        assert!(matches!(omni_error, OmniError::Config { .. }));
        assert!(omni_error.source().is_some());
    }
}
