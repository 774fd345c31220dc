//! Error types for the Waypoint client

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Network errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    // Configuration errors
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Invalid title: {0}")]
    InvalidTitle(String),

    #[error("Invalid variant class: {0}")]
    InvalidVariantClass(String),

    // Data format errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
