//! Client-specific error types.

use thiserror::Error;

/// Errors from talking to the remote record service.
#[derive(Error, Debug)]
pub enum ClientError {
	/// Transport-level failure (connection, timeout, TLS).
	#[error("request failed: {0}")]
	Http(#[from] reqwest::Error),

	/// The service answered with a non-success status.
	#[error("remote service returned HTTP {0}")]
	Status(reqwest::StatusCode),

	/// The response body did not match the expected shape.
	#[error("failed to decode response body: {0}")]
	Decode(#[from] serde_json::Error),

	/// The configured base URL is not a valid URL.
	#[error("invalid base URL: {0}")]
	InvalidBaseUrl(String),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
