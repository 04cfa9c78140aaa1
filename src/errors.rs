//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`Error`] covers:
//! - Asset fetching and decoding errors ([`AssetError`])
//! - Slot binding / configuration errors ([`ConfigError`])
//! - File I/O and JSON errors
//!
//! None of these are fatal to a frame update: the patcher catches resolution
//! failures at its boundary and reduces them to a log line plus a report entry.
//!
//! ```rust,ignore
//! use gallery::errors::Result;
//!
//! fn load_config() -> Result<()> {
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    /// Fetching or decoding an image failed.
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// The slot binding or frame configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures while turning a locator into a decoded image.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// The requested asset was not found.
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// Transport-level failure (DNS, connection reset, CORS on the web, ...).
    #[error("Network error: {0}")]
    Network(String),

    /// HTTP response with a non-success status code.
    #[error("HTTP response error: status {status} for {url}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// The bytes could not be decoded as an image.
    #[error("Image decode error: {0}")]
    Format(String),

    /// Malformed `data:` locator.
    #[error("Data URI error: {0}")]
    DataUri(String),

    /// The locator is neither a path, an http(s) URL nor a data URI.
    #[error("Invalid locator: {0}")]
    InvalidLocator(String),

    /// A background decode task panicked or was cancelled.
    #[error("Task join error: {0}")]
    TaskJoin(String),

    /// Feature not enabled.
    #[error("Feature not enabled: {0}")]
    FeatureNotEnabled(String),
}

/// Invalid slot binding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("slot `{0}` is bound more than once")]
    DuplicateSlot(String),

    #[error("scene object `{0}` is bound to more than one slot")]
    DuplicateObject(String),

    #[error("slot name must not be empty")]
    EmptySlotName,

    #[error("slot `{0}` has an empty object name")]
    EmptyObjectName(String),
}

impl From<image::ImageError> for AssetError {
    fn from(err: image::ImageError) -> Self {
        AssetError::Format(err.to_string())
    }
}

impl From<base64::DecodeError> for AssetError {
    fn from(err: base64::DecodeError) -> Self {
        AssetError::DataUri(err.to_string())
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<tokio::task::JoinError> for AssetError {
    fn from(err: tokio::task::JoinError) -> Self {
        AssetError::TaskJoin(err.to_string())
    }
}

#[cfg(feature = "http")]
impl From<url::ParseError> for AssetError {
    fn from(err: url::ParseError) -> Self {
        AssetError::InvalidLocator(err.to_string())
    }
}

/// Alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_errors_convert_into_top_level() {
        let err: Error = AssetError::NotFound("a.png".into()).into();
        assert!(matches!(err, Error::Asset(AssetError::NotFound(_))));
        assert_eq!(err.to_string(), "Asset not found: a.png");
    }

    #[test]
    fn http_status_message_names_url() {
        let err = AssetError::HttpStatus {
            status: 404,
            url: "https://x/img.png".into(),
        };
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("https://x/img.png"));
    }
}
