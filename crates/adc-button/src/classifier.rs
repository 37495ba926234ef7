//! Sampling every channel and turning transitions into events

use core::time::Duration;

use crate::channel::ChannelList;
use crate::config::Config;
use crate::error::ConfigError;
use crate::interface::{ButtonEvent, EventSink, VoltageSource};

/// Owns the channel list and classifies one tick at a time
#[derive(Debug)]
pub struct Classifier {
    channels: ChannelList,
    sample_interval_ms: u32,
}

impl Classifier {
    /// Build the channel list described by `config`
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found in the channel configuration.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            channels: ChannelList::new(&config.channels, config.sample_interval_ms)?,
            sample_interval_ms: config.sample_interval_ms,
        })
    }

    pub fn channels(&self) -> &ChannelList {
        &self.channels
    }

    /// Polling period between two calls to [`Classifier::poll`]
    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.sample_interval_ms))
    }

    /// Classify an explicit reading for the channel at `index`
    ///
    /// Returns `None` for idle ticks and for an index past the end of the
    /// list.
    pub fn feed(&mut self, index: usize, millivolts: Option<u16>) -> Option<ButtonEvent> {
        let channel = self.channels.get_mut(index)?;
        let (state, id) = channel.sample(millivolts);
        let id = id?;
        Some(ButtonEvent {
            state,
            id,
            channel: channel.descriptor().channel(),
            millivolts,
        })
    }

    /// Sample every channel once, in list order, and emit what changed
    ///
    /// Returns the number of events emitted.
    pub fn poll<S, K>(&mut self, source: &mut S, sink: &mut K) -> usize
    where
        S: VoltageSource,
        K: EventSink,
    {
        let mut emitted = 0;
        for index in 0..self.channels.len() {
            let Some(channel) = self.channels.get(index) else {
                continue;
            };
            let adc_channel = channel.descriptor().channel();
            let millivolts = match source.read_millivolts(adc_channel) {
                Ok(mv) => Some(mv),
                Err(err) => {
                    log::debug!("adc channel {} read failed: {:?}", adc_channel, err);
                    None
                }
            };
            if let Some(event) = self.feed(index, millivolts) {
                log::debug!(
                    "{:?}: channel:{} id:{} mv:{:?}",
                    event.state,
                    event.channel,
                    event.id,
                    event.millivolts
                );
                sink.emit(event);
                emitted += 1;
            }
        }
        emitted
    }

    /// Forget every press in progress
    pub fn reset(&mut self) {
        self.channels.reset();
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;
    use crate::config::{Builder, ChannelConfig};
    use crate::state::ButtonState;

    #[derive(Debug)]
    struct Unplugged;

    struct Script {
        readings: Vec<Result<u16, Unplugged>>,
        reads: Vec<u8>,
    }

    impl VoltageSource for Script {
        type Error = Unplugged;

        fn read_millivolts(&mut self, channel: u8) -> Result<u16, Self::Error> {
            self.reads.push(channel);
            if self.readings.is_empty() {
                Err(Unplugged)
            } else {
                self.readings.remove(0)
            }
        }
    }

    fn classifier(channels: &[u8]) -> Classifier {
        let config = Builder::new()
            .channels(
                channels
                    .iter()
                    .map(|&ch| ChannelConfig::new(ch).press_judge_time_ms(200)),
            )
            .build()
            .unwrap();
        Classifier::new(&config).unwrap()
    }

    #[test]
    fn poll_reads_channels_in_list_order() {
        let mut classifier = classifier(&[4, 1, 9]);
        let mut source = Script {
            readings: Vec::new(),
            reads: Vec::new(),
        };
        let mut events = Vec::new();
        classifier.poll(&mut source, &mut |e: ButtonEvent| events.push(e));
        assert_eq!(source.reads, [4, 1, 9]);
        assert!(events.is_empty());
    }

    #[test]
    fn poll_emits_press_with_sample() {
        let mut classifier = classifier(&[7]);
        let mut source = Script {
            readings: vec![Ok(900), Ok(905)],
            reads: Vec::new(),
        };
        let mut events = Vec::new();
        assert_eq!(classifier.poll(&mut source, &mut |e: ButtonEvent| events.push(e)), 0);
        assert_eq!(classifier.poll(&mut source, &mut |e: ButtonEvent| events.push(e)), 1);
        assert_eq!(
            events,
            [ButtonEvent {
                state: ButtonState::Pressed,
                id: 1,
                channel: 7,
                millivolts: Some(905),
            }]
        );
    }

    #[test]
    fn read_failure_releases_held_button() {
        let mut classifier = classifier(&[0]);
        let mut source = Script {
            readings: vec![Ok(1200), Ok(1200), Ok(1200)],
            reads: Vec::new(),
        };
        let mut events = Vec::new();
        for _ in 0..4 {
            classifier.poll(&mut source, &mut |e: ButtonEvent| events.push(e));
        }
        let states: Vec<_> = events.iter().map(|e| (e.state, e.millivolts)).collect();
        assert_eq!(
            states,
            [(ButtonState::Pressed, Some(1200)), (ButtonState::Release, None)]
        );
    }

    #[test]
    fn feed_past_end_is_none() {
        let mut classifier = classifier(&[0]);
        assert_eq!(classifier.feed(3, Some(900)), None);
    }

    #[test]
    fn sample_interval_follows_config() {
        assert_eq!(
            classifier(&[0]).sample_interval(),
            Duration::from_millis(20)
        );
    }
}
