//! Error types for editlink

use thiserror::Error;

/// Result type alias for editlink operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Content service errors.
///
/// `Clone` so a single brand-config fetch can be shared between every
/// caller waiting on it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Not logged in to the content service")]
    Unauthorized,

    #[error("Access denied by the content service")]
    Forbidden,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Request was redirected to {0}")]
    Redirected(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to content service".to_string())
        } else if err.is_decode() {
            ApiError::InvalidResponse(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Failures of the lookup pipeline that are not transport errors
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("No brand is configured for {hostname}")]
    BrandNotFound { hostname: String },

    #[error("User does not have access to brand {brand}")]
    AccessDenied { brand: String },

    #[error("Failed to set brand cookie for {brand}")]
    CookieWriteFailed { brand: String },

    #[error("Invalid tab URL: {0}")]
    InvalidTabUrl(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Link store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Could not determine data directory")]
    NoDataDir,

    #[error("Link store I/O error: {0}")]
    Io(String),

    #[error("Link store database error: {0}")]
    Database(#[from] rusqlite::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_redirected_mentions_target() {
        let err = ApiError::Redirected("https://login.example.com".to_string());
        assert!(err.to_string().contains("login.example.com"));
    }

    #[test]
    fn test_api_error_is_cloneable_and_comparable() {
        let err = ApiError::ServerError("boom".to_string());
        assert_eq!(err.clone(), err);
    }

    #[test]
    fn test_lookup_error_messages() {
        let err = LookupError::BrandNotFound {
            hostname: "unrelated.com".to_string(),
        };
        assert!(err.to_string().contains("unrelated.com"));

        let err = LookupError::AccessDenied {
            brand: "b".to_string(),
        };
        assert!(err.to_string().contains("access to brand b"));
    }

    #[test]
    fn test_error_from_api_error() {
        let err: Error = ApiError::Unauthorized.into();

        match err {
            Error::Api(ApiError::Unauthorized) => (),
            _ => panic!("Expected Error::Api(ApiError::Unauthorized)"),
        }
    }

    #[test]
    fn test_error_from_lookup_error() {
        let err: Error = LookupError::CookieWriteFailed {
            brand: "a".to_string(),
        }
        .into();

        match err {
            Error::Lookup(LookupError::CookieWriteFailed { brand }) => assert_eq!(brand, "a"),
            _ => panic!("Expected Error::Lookup(CookieWriteFailed)"),
        }
    }

    #[test]
    fn test_config_error_from_yaml_error() {
        let yaml_str = "invalid: [yaml: content";
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let config_err: ConfigError = yaml_err.into();

        match config_err {
            ConfigError::ParseError(_) => (),
            _ => panic!("Expected ConfigError::ParseError"),
        }
    }
}
