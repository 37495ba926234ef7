//! Classifier configuration types and builder

use alloc::vec::Vec;

pub use crate::error::ConfigError;

/// Step levels of the stock six-button ladder, in millivolts
pub const DEFAULT_STEP_LEVELS: [u16; 7] = [0, 683, 1193, 1631, 2090, 2578, 3103];

/// Default hold time separating a press from a long press
pub const DEFAULT_PRESS_JUDGE_TIME_MS: u32 = 3000;

/// Default polling period
pub const DEFAULT_SAMPLE_INTERVAL_MS: u32 = 20;

#[cfg(feature = "std")]
pub const DEFAULT_TASK_STACK_SIZE: usize = 3 * 1024;

/// One analog input carrying a resistor ladder
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelConfig {
    /// ADC channel number handed to the voltage source
    pub channel: u8,
    /// Bucket edges in millivolts, strictly ascending
    pub steps: Vec<u16>,
    /// Hold time after which a press counts as long
    pub press_judge_time_ms: u32,
}

impl ChannelConfig {
    /// Channel using [`DEFAULT_STEP_LEVELS`] and [`DEFAULT_PRESS_JUDGE_TIME_MS`]
    pub fn new(channel: u8) -> Self {
        Self {
            channel,
            steps: DEFAULT_STEP_LEVELS.to_vec(),
            press_judge_time_ms: DEFAULT_PRESS_JUDGE_TIME_MS,
        }
    }

    /// Replace the step levels
    pub fn steps(mut self, steps: &[u16]) -> Self {
        self.steps = steps.to_vec();
        self
    }

    /// Set the long-press hold time
    pub fn press_judge_time_ms(mut self, value: u32) -> Self {
        self.press_judge_time_ms = value;
        self
    }

    /// Judgment time expressed in polling ticks
    pub fn press_judge_ticks(&self, sample_interval_ms: u32) -> u16 {
        let ticks = self.press_judge_time_ms / sample_interval_ms.max(1);
        u16::try_from(ticks).unwrap_or(u16::MAX)
    }
}

/// Polling worker thread settings
#[cfg(feature = "std")]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskConfig {
    pub name: alloc::string::String,
    pub stack_size: usize,
}

#[cfg(feature = "std")]
impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            name: alloc::string::String::from("adc_button"),
            stack_size: DEFAULT_TASK_STACK_SIZE,
        }
    }
}

/// Classifier configuration
///
/// Use [`Builder`] to create a Config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Period between two samples of every channel
    pub sample_interval_ms: u32,
    /// Channels in polling order
    pub channels: Vec<ChannelConfig>,
    /// Worker thread settings
    #[cfg(feature = "std")]
    pub task: TaskConfig,
}

/// Builder for constructing classifier configuration
///
/// # Example
///
/// ```
/// use adc_button::{Builder, ChannelConfig};
///
/// let config = Builder::new()
///     .sample_interval_ms(20)
///     .channel(ChannelConfig::new(3).press_judge_time_ms(200))
///     .build()
///     .expect("valid configuration");
/// assert_eq!(config.channels[0].press_judge_ticks(config.sample_interval_ms), 10);
/// ```
pub struct Builder {
    sample_interval_ms: u32,
    channels: Vec<ChannelConfig>,
    #[cfg(feature = "std")]
    task: TaskConfig,
}

impl Default for Builder {
    fn default() -> Self {
        Builder {
            sample_interval_ms: DEFAULT_SAMPLE_INTERVAL_MS,
            channels: Vec::new(),
            #[cfg(feature = "std")]
            task: TaskConfig::default(),
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the polling period
    pub fn sample_interval_ms(mut self, value: u32) -> Self {
        self.sample_interval_ms = value;
        self
    }

    /// Append a channel; channels are polled in the order they are added
    pub fn channel(mut self, channel: ChannelConfig) -> Self {
        self.channels.push(channel);
        self
    }

    /// Append several channels
    pub fn channels(mut self, channels: impl IntoIterator<Item = ChannelConfig>) -> Self {
        self.channels.extend(channels);
        self
    }

    /// Set worker thread settings
    #[cfg(feature = "std")]
    pub fn task(mut self, task: TaskConfig) -> Self {
        self.task = task;
        self
    }

    /// Build the configuration
    ///
    /// Step tables are validated when the channel list is created.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoChannels` if no channel was added and
    /// `ConfigError::ZeroSampleInterval` for a zero polling period.
    pub fn build(self) -> Result<Config, ConfigError> {
        if self.channels.is_empty() {
            return Err(ConfigError::NoChannels);
        }
        if self.sample_interval_ms == 0 {
            return Err(ConfigError::ZeroSampleInterval);
        }
        Ok(Config {
            sample_interval_ms: self.sample_interval_ms,
            channels: self.channels,
            #[cfg(feature = "std")]
            task: self.task,
        })
    }
}
