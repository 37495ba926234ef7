//! Error types for the classifier
//!
//! [`ConfigError`] covers everything that can be wrong with a configuration.
//! It is only ever returned while building, the classifier itself cannot fail
//! once constructed.
//!
//! ## Example
//!
//! ```
//! use adc_button::{Builder, ChannelConfig, ConfigError};
//!
//! // No channels
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(ConfigError::NoChannels)));
//!
//! // Thresholds must rise
//! let config = Builder::new()
//!     .channel(ChannelConfig::new(3).steps(&[0, 900, 800]))
//!     .build()
//!     .unwrap();
//! assert!(adc_button::Classifier::new(&config).is_err());
//! ```

use crate::state::DETECTED_COUNT;

/// Minimum number of thresholds in a step table (one bucket)
pub const MIN_STEPS: usize = 2;

/// Errors that can occur when building a configuration or a channel list
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// No channel was configured
    NoChannels,
    /// The sampling interval was zero
    ZeroSampleInterval,
    /// A step table has fewer than [`MIN_STEPS`] thresholds
    TooFewSteps {
        /// ADC channel the table belongs to
        channel: u8,
        /// Number of thresholds supplied
        steps: usize,
    },
    /// A threshold is not strictly greater than the one before it
    NonMonotonicSteps {
        /// ADC channel the table belongs to
        channel: u8,
        /// Index of the offending threshold
        index: usize,
    },
    /// The long-press judgment is not longer than press detection
    ///
    /// With `ticks <= DETECTED_COUNT` every confirmed press would already be
    /// a long press, so a short release could never be reported.
    PressJudgeTooShort {
        /// ADC channel the judgment belongs to
        channel: u8,
        /// Judgment length in polling ticks
        ticks: u16,
    },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::NoChannels => write!(f, "At least one ADC channel must be configured"),
            ConfigError::ZeroSampleInterval => write!(f, "Sample interval must be non-zero"),
            ConfigError::TooFewSteps { channel, steps } => write!(
                f,
                "Channel {channel}: {steps} step levels given, at least {MIN_STEPS} required"
            ),
            ConfigError::NonMonotonicSteps { channel, index } => write!(
                f,
                "Channel {channel}: step level {index} does not rise above the previous one"
            ),
            ConfigError::PressJudgeTooShort { channel, ticks } => write!(
                f,
                "Channel {channel}: press judgment of {ticks} ticks must exceed {DETECTED_COUNT}"
            ),
        }
    }
}

impl core::error::Error for ConfigError {}
