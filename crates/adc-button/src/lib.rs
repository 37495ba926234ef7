//! # adc-button
//!
//! Debounced button input for resistor ladders read over ADC.
//!
//! Several buttons share one analog pin; each one pulls the pin into its own
//! voltage bucket. Sampling the pin at a fixed interval and running the
//! samples through a small state machine yields discrete events:
//!
//! - **Pressed**: the same bucket was seen on two consecutive samples
//! - **LongPressed**: the hold reached the press-judge time, once per hold
//! - **Release** / **LongRelease**: the ladder left the bucket after a short
//!   or long hold
//!
//! The core is `no_std` + `alloc`. The `std` feature (default) adds
//! [`AdcButtons`], a polling thread with cooperative shutdown.
//!
//! ## Quick start
//!
//! ```
//! use adc_button::{Builder, ButtonState, ChannelConfig, Classifier};
//!
//! let config = Builder::new()
//!     .sample_interval_ms(20)
//!     .channel(ChannelConfig::new(3).press_judge_time_ms(200))
//!     .build()
//!     .unwrap();
//! let mut classifier = Classifier::new(&config).unwrap();
//!
//! assert_eq!(classifier.feed(0, Some(900)), None);
//! let event = classifier.feed(0, Some(900)).unwrap();
//! assert_eq!((event.state, event.id), (ButtonState::Pressed, 1));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![cfg_attr(
    not(test),
    deny(
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::unwrap_used
    )
)]

extern crate alloc;

pub mod channel;
pub mod classifier;
pub mod config;
pub mod error;
pub mod interface;
pub mod state;
pub mod step;
#[cfg(feature = "std")]
pub mod worker;

pub use channel::{Channel, ChannelDescriptor, ChannelList};
pub use classifier::Classifier;
#[cfg(feature = "std")]
pub use config::TaskConfig;
pub use config::{
    Builder, ChannelConfig, Config, DEFAULT_PRESS_JUDGE_TIME_MS, DEFAULT_SAMPLE_INTERVAL_MS,
    DEFAULT_STEP_LEVELS,
};
pub use error::ConfigError;
pub use interface::{ButtonEvent, EventSink, VoltageSource};
pub use state::{ButtonState, ButtonTracker, DETECTED_COUNT};
pub use step::StepTable;
#[cfg(feature = "std")]
pub use worker::{AdcButtons, WorkerError};
