use crate::schema::Violations;
use serde_json::Value;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid request configuration: {0}")]
    Configuration(String),
    #[error("Transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),
    #[error("Schema validation failed:\n{0}")]
    Validation(Violations),
    #[error("Schema {name} is unusable: {reason}")]
    Schema { name: String, reason: String },
    #[error("Expected status code {expected}, got {actual}")]
    UnexpectedStatus { expected: u16, actual: u16 },
    #[error("Field `{path}` mismatch: expected {expected}, got {}", display_actual(.actual))]
    FieldMismatch {
        path: String,
        expected: Value,
        actual: Option<Value>,
    },
    #[error("IoError: {0}")]
    IoError(#[from] io::Error),
}

fn display_actual(actual: &Option<Value>) -> String {
    match actual {
        Some(value) => value.to_string(),
        None => String::from("<missing>"),
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Transport(Box::new(e))
    }
}

impl From<reqwest::header::InvalidHeaderName> for Error {
    fn from(e: reqwest::header::InvalidHeaderName) -> Self {
        Error::Configuration(format!("Invalid header name: {}", e))
    }
}

impl From<reqwest::header::InvalidHeaderValue> for Error {
    fn from(e: reqwest::header::InvalidHeaderValue) -> Self {
        Error::Configuration(format!("Invalid header value: {}", e))
    }
}
