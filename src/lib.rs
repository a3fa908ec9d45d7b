pub mod analysis;
pub mod batch;
pub mod capture;
pub mod config;
pub mod error;
pub mod output;
pub mod spectrum;

#[cfg(feature = "simulation")]
pub mod simulation;

pub use config::AnalysisConfig;
pub use error::{Result, SpectrumError};
pub use spectrum::{SpectrumPoint, SpectrumSample, Spectrogram};
