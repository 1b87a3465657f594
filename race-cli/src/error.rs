use byterace::RaceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarkerParseError {
    #[error("Marker must be a single ASCII character or a 0xNN byte: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Couldn't initialize the file streams: {0}")]
    StreamsInitError(RaceError),

    #[error("Couldn't write the report: {0}")]
    ReportError(String),

    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    RaceError(#[from] RaceError),
}
