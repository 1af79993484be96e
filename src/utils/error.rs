use thiserror::Error;

pub const TIMEOUT_MESSAGE: &str = "Request timeout. Please check your connection.";
pub const CANNOT_CONNECT_MESSAGE: &str = "Network error - cannot connect to server";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {reason} (got '{value}')")]
    InvalidValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

impl ClientError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            ClientError::HttpError(_) => "Could not set up the HTTP client.".to_string(),
            ClientError::IoError(e) => format!("Could not read a local file: {}", e),
            ClientError::SerializationError(e) => format!("Could not encode output: {}", e),
            ClientError::ConfigError { message } => format!("Configuration problem: {}", message),
            ClientError::InvalidValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            ClientError::MissingConfigError { field } => {
                format!("Setting '{}' is required", field)
            }
            ClientError::ValidationError { message } => format!("Invalid input: {}", message),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ClientError::HttpError(_) => "Check TLS support and proxy environment variables",
            ClientError::IoError(_) => "Check that the file exists and is readable",
            ClientError::SerializationError(_) => "Report this as a bug",
            ClientError::ConfigError { .. }
            | ClientError::InvalidValueError { .. }
            | ClientError::MissingConfigError { .. } => {
                "Fix the value in the config file, command line or AXIMOIX_* environment"
            }
            ClientError::ValidationError { .. } => "Correct the form fields and submit again",
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Outcome of a single failed API call. Never fatal: the orchestrator turns it
/// into a display message next to fallback content.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("request timed out")]
    Timeout,

    #[error("transport error: {message}")]
    Transport { message: String },

    #[error("server responded with status {status}")]
    Server { status: u16, detail: Option<String> },

    #[error("unexpected response body: {message}")]
    Decode { message: String },

    #[error("request cancelled")]
    Cancelled,
}

impl ApiError {
    /// Message for the rendering layer. Structured server detail wins over the
    /// transport's own message, which wins over the generic fallback.
    pub fn display_message(&self) -> String {
        match self {
            ApiError::Timeout => TIMEOUT_MESSAGE.to_string(),
            ApiError::Transport { message } if !message.trim().is_empty() => message.clone(),
            ApiError::Transport { .. } => CANNOT_CONNECT_MESSAGE.to_string(),
            ApiError::Server {
                detail: Some(detail),
                ..
            } => detail.clone(),
            ApiError::Server { status, .. } => format!("Server error: {}", status),
            ApiError::Decode { message } => format!("Unexpected response from server: {}", message),
            ApiError::Cancelled => "Request cancelled".to_string(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::Decode {
                message: err.to_string(),
            }
        } else if let Some(status) = err.status() {
            ApiError::Server {
                status: status.as_u16(),
                detail: None,
            }
        } else {
            ApiError::Transport {
                message: err.to_string(),
            }
        }
    }
}

/// Pulls a human readable detail out of an error body, checking the keys the
/// backend variants use in order.
pub fn structured_detail(body: &serde_json::Value) -> Option<String> {
    ["detail", "message", "error"].iter().find_map(|key| {
        match body.get(*key)? {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            serde_json::Value::Null => None,
            serde_json::Value::String(_) => None,
            other => Some(other.to_string()),
        }
    })
}
