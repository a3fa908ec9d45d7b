use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpectrumError {
    #[error("Invalid sample: {0}")]
    InvalidSample(String),

    #[error("Operation requires a non-empty sample")]
    EmptySample,

    #[error("No points at or above {threshold_dbm:.2} dBm")]
    NoPointsAboveThreshold { threshold_dbm: f64 },

    #[error("Invalid spectrogram axis: {0}")]
    InvalidAxis(String),

    #[error("Column index {index} out of range for {columns} columns")]
    IndexOutOfRange { index: usize, columns: usize },

    #[error("No columns between {low_hz} Hz and {high_hz} Hz")]
    EmptyBand { low_hz: f64, high_hz: f64 },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SpectrumError>;
