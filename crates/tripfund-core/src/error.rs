//! Error types for Tripfund
//!
//! The planning math never fails; these cover the edges around it
//! (config files, trip files, advice providers).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Advice error: {0}")]
    Advice(String),
}

pub type Result<T> = std::result::Result<T, Error>;
