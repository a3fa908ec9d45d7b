pub mod sample;
pub mod spectrogram;

pub use sample::{SpectrumPoint, SpectrumSample};
pub use spectrogram::Spectrogram;
