//! Bridge error types

use thiserror::Error;

/// Errors that can occur while synthesizing or dispatching tools
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Provider has no base URL, neither in its document nor supplied externally
    #[error("Provider '{0}' has no base URL (no servers entry and none configured)")]
    MissingBaseUrl(String),

    /// Provider document could not be read or parsed
    #[error("Invalid document for provider '{provider}': {reason}")]
    InvalidDocument { provider: String, reason: String },

    /// A required tool parameter was not supplied
    #[error("Missing required parameter '{parameter}' for tool '{tool}'")]
    MissingParameter { tool: String, parameter: String },

    /// No tool matches the given id or name
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Upstream answered with a non-2xx status
    #[error("Request failed with status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// HTTP transport failure (connect, timeout, body read)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl BridgeError {
    /// Create a generic error from a string
    pub fn other(msg: impl Into<String>) -> Self {
        BridgeError::Other(msg.into())
    }

    /// Create an invalid document error
    pub fn invalid_document(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        BridgeError::InvalidDocument {
            provider: provider.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing parameter error
    pub fn missing_parameter(tool: impl Into<String>, parameter: impl Into<String>) -> Self {
        BridgeError::MissingParameter {
            tool: tool.into(),
            parameter: parameter.into(),
        }
    }
}

/// Result type alias for bridge operations
pub type BridgeResult<T> = Result<T, BridgeError>;
