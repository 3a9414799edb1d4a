//! Error type of every backend call made by the console.
//!
//! Errors never escape an operation: the lifecycle renders them with
//! `Display` and stores the text as the panel's current error.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Request could not complete (connection refused, CORS, unreadable body)
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered with a non-2xx status
    #[error("{}", http_message(*status, detail.as_deref()))]
    Http { status: u16, detail: Option<String> },

    /// Numeric reading came back as something that is not a number
    #[error("Invalid {quantity} value")]
    Parse { quantity: String },

    /// 2xx body did not have the expected JSON shape
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// Operation refused before any request was sent
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    pub fn parse(quantity: impl Into<String>) -> Self {
        ApiError::Parse {
            quantity: quantity.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }
}

fn http_message(status: u16, detail: Option<&str>) -> String {
    match detail {
        Some(detail) => format!("HTTP error! status: {}, description: {}", status, detail),
        None => format!("HTTP error! status: {}", status),
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
