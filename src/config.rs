//! Configuration for spectrum characterization.
//!
//! Every section has defaults, so a TOML file only needs the keys it changes:
//!
//! ```toml
//! [peaks]
//! min_height_dbm = -75.0
//! min_distance = 3
//!
//! [pulse]
//! sampling_rate = "125us"
//!
//! [occupation]
//! threshold_dbm = -70.0
//! selection = { type = "band", low_hz = 433.0e6, high_hz = 434.0e6 }
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::analysis::FrequencySelection;
use crate::error::{Result, SpectrumError};

/// Sampling rate of a time-axis sample
///
/// Can be specified as either a rate in Hz or a sample period.
///
/// # Parsing formats
/// - `1000` or `1000hz` - rate in Hz
/// - `48khz`, `2.4mhz` - rate with SI prefix
/// - `125us` / `125μs` or `1ms` - sample period
///
/// # Example
/// ```
/// use rfmetrics::config::SamplingRate;
///
/// let rate: SamplingRate = "125us".parse().unwrap();
/// assert!((rate.as_hz() - 8000.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize)]
#[serde(try_from = "RawSamplingRate")]
pub struct SamplingRate(f64);

impl SamplingRate {
    /// Create from a rate in Hz
    pub fn from_hz(hz: f64) -> Self {
        Self(hz)
    }

    /// Create from a sample period in microseconds
    pub fn from_period_us(us: f64) -> Self {
        Self(1_000_000.0 / us)
    }

    pub fn as_hz(&self) -> f64 {
        self.0
    }

    /// Sample period in seconds
    pub fn period_secs(&self) -> f64 {
        1.0 / self.0
    }

    /// Finite and strictly positive
    pub fn is_valid(&self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }
}

impl fmt::Display for SamplingRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}hz", self.0)
    }
}

impl FromStr for SamplingRate {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();

        let parse_positive = |num: &str, what: &str| -> std::result::Result<f64, String> {
            let value: f64 = num
                .trim()
                .parse()
                .map_err(|_| format!("invalid {}: {}", what, s))?;
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{} must be positive", what));
            }
            Ok(value)
        };

        // Sample period suffixes
        if let Some(num) = lower.strip_suffix("us").or_else(|| lower.strip_suffix("μs")) {
            return Ok(Self::from_period_us(parse_positive(num, "period")?));
        }
        if let Some(num) = lower.strip_suffix("ms") {
            return Ok(Self::from_period_us(parse_positive(num, "period")? * 1000.0));
        }

        let (num, scale) = if let Some(num) = lower.strip_suffix("mhz") {
            (num, 1e6)
        } else if let Some(num) = lower.strip_suffix("khz") {
            (num, 1e3)
        } else {
            (lower.strip_suffix("hz").unwrap_or(lower.as_str()), 1.0)
        };
        Ok(Self::from_hz(parse_positive(num, "sampling rate")? * scale))
    }
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum RawSamplingRate {
    Hz(f64),
    Text(String),
}

impl TryFrom<RawSamplingRate> for SamplingRate {
    type Error = String;

    fn try_from(raw: RawSamplingRate) -> std::result::Result<Self, Self::Error> {
        match raw {
            RawSamplingRate::Hz(hz) if Self::from_hz(hz).is_valid() => Ok(Self::from_hz(hz)),
            RawSamplingRate::Hz(hz) => Err(format!("sampling rate must be positive, got {}", hz)),
            RawSamplingRate::Text(text) => text.parse(),
        }
    }
}

/// Complete analysis configuration
///
/// Use `AnalysisConfig::default()` for the stock thresholds.
///
/// # Example
/// ```
/// use rfmetrics::config::AnalysisConfig;
///
/// let mut config = AnalysisConfig::default();
/// config.peaks.min_distance = 3;
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub peaks: PeakConfig,
    pub bandwidth: BandwidthConfig,
    pub pulse: PulseConfig,
    pub occupation: OccupationConfig,
}

/// Spectral peak detection
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default)]
pub struct PeakConfig {
    /// Absolute floor in dBm, `None` for no floor
    pub min_height_dbm: Option<f64>,
    /// Minimum index spacing between peaks
    pub min_distance: usize,
}

/// Bandwidth measurements
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default)]
pub struct BandwidthConfig {
    /// Absolute threshold for occupied bandwidth in dBm
    pub occupied_threshold_dbm: f64,
    /// dB below peak for the relative bandwidth
    pub relative_db: f64,
}

/// Pulse-train analysis
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default)]
pub struct PulseConfig {
    /// Pulse floor in dBm; the mean amplitude when unset
    pub height_dbm: Option<f64>,
    /// Minimum index spacing between pulses
    pub min_distance: usize,
    /// Sampling rate of the time axis; PRF is reported in Hz only when set
    pub sampling_rate: Option<SamplingRate>,
}

/// Time-of-occupation tracking
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default)]
pub struct OccupationConfig {
    pub threshold_dbm: f64,
    pub selection: FrequencySelection,
}

impl Default for PeakConfig {
    fn default() -> Self {
        Self {
            min_height_dbm: Some(-80.0),
            min_distance: 5,
        }
    }
}

impl Default for BandwidthConfig {
    fn default() -> Self {
        Self {
            occupied_threshold_dbm: -80.0,
            relative_db: 3.0,
        }
    }
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            height_dbm: None,
            min_distance: 1,
            sampling_rate: None,
        }
    }
}

impl Default for OccupationConfig {
    fn default() -> Self {
        Self {
            threshold_dbm: -80.0,
            selection: FrequencySelection::default(),
        }
    }
}

impl AnalysisConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| SpectrumError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| SpectrumError::Config(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_toml_str(&content)?;
        log::debug!("loaded analysis config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("bandwidth.occupied_threshold_dbm", self.bandwidth.occupied_threshold_dbm),
            ("bandwidth.relative_db", self.bandwidth.relative_db),
            ("occupation.threshold_dbm", self.occupation.threshold_dbm),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(SpectrumError::Config(format!("{} must be finite", name)));
            }
        }
        if self.bandwidth.relative_db < 0.0 {
            return Err(SpectrumError::Config(
                "bandwidth.relative_db must not be negative".to_string(),
            ));
        }
        if let Some(rate) = self.pulse.sampling_rate
            && !rate.is_valid()
        {
            return Err(SpectrumError::Config(format!(
                "pulse.sampling_rate must be positive, got {}",
                rate.as_hz()
            )));
        }
        if let FrequencySelection::Band { low_hz, high_hz } = self.occupation.selection
            && low_hz > high_hz
        {
            return Err(SpectrumError::Config(format!(
                "occupation band is inverted: {} > {}",
                low_hz, high_hz
            )));
        }
        Ok(())
    }
}
