use thiserror::Error;

/// Failures detected while validating a budget view request.
///
/// Every variant is terminal for the request: the ledger is left untouched.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RequestError {
    #[error("missing required parameter `{0}`")]
    MissingParameter(&'static str),
    #[error("invalid date `{0}`, expected YYYY-MM-DD")]
    InvalidDateFormat(String),
    #[error("parameter `{name}` is not a number: `{raw}`")]
    InvalidNumber { name: &'static str, raw: String },
    #[error("parameter `{0}` must be a finite number")]
    NonFinite(&'static str),
    #[error("parameter `{name}` is out of range: {value}")]
    OutOfRange { name: &'static str, value: f64 },
    #[error("malformed parameter `{0}`, expected key=value")]
    Malformed(String),
}

/// Error type for configuration load and save failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("unknown config key `{0}`")]
    UnknownKey(String),
    #[error("invalid value `{value}` for `{key}`")]
    InvalidValue { key: String, value: String },
}
