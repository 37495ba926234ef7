//! Hardware and consumer seams
//!
//! The classifier never touches an ADC itself. Samples come from a
//! [`VoltageSource`] and results leave through an [`EventSink`].
//!
//! ## Example
//!
//! ```
//! use adc_button::{ButtonEvent, VoltageSource};
//!
//! struct FixedLadder(u16);
//!
//! impl VoltageSource for FixedLadder {
//!     type Error = core::convert::Infallible;
//!
//!     fn read_millivolts(&mut self, _channel: u8) -> Result<u16, Self::Error> {
//!         Ok(self.0)
//!     }
//! }
//!
//! let mut events = Vec::new();
//! let mut sink = |event: ButtonEvent| events.push(event);
//! # let _ = (&mut sink, FixedLadder(900));
//! ```

use core::fmt::Debug;

use crate::state::ButtonState;

/// Trait for reading a calibrated voltage from an ADC channel
///
/// ## Implementing
///
/// Implementations may block for the duration of a conversion. A failed read
/// is not fatal: the classifier treats it as an open ladder for that tick.
pub trait VoltageSource {
    /// Error type for read operations
    type Error: Debug;

    /// Sample `channel` and return the voltage in millivolts
    ///
    /// # Errors
    ///
    /// Returns an error if the conversion or calibration fails.
    fn read_millivolts(&mut self, channel: u8) -> Result<u16, Self::Error>;
}

impl<T: VoltageSource + ?Sized> VoltageSource for &mut T {
    type Error = T::Error;

    fn read_millivolts(&mut self, channel: u8) -> Result<u16, Self::Error> {
        (**self).read_millivolts(channel)
    }
}

/// A classified button transition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ButtonEvent {
    /// Never [`ButtonState::Idle`]
    pub state: ButtonState,
    /// Bucket index of the button on its ladder
    pub id: usize,
    /// ADC channel the ladder is wired to
    pub channel: u8,
    /// Sample that produced the event, `None` if the read failed
    pub millivolts: Option<u16>,
}

/// Receiver of classified events
///
/// Delivery is fire-and-forget; implemented for every `FnMut(ButtonEvent)`.
pub trait EventSink {
    fn emit(&mut self, event: ButtonEvent);
}

impl<F> EventSink for F
where
    F: FnMut(ButtonEvent),
{
    fn emit(&mut self, event: ButtonEvent) {
        self(event)
    }
}
