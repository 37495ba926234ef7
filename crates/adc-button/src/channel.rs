//! Configured channels and their runtime state

use alloc::vec::Vec;

use crate::config::ChannelConfig;
use crate::error::ConfigError;
use crate::state::{ButtonState, ButtonTracker, DETECTED_COUNT};
use crate::step::StepTable;

/// Immutable description of one ladder input
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelDescriptor {
    channel: u8,
    steps: StepTable,
    press_judge_ticks: u16,
}

impl ChannelDescriptor {
    /// Validate a channel configuration against the polling period
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for a malformed step table or a press
    /// judgment not longer than [`DETECTED_COUNT`] ticks.
    pub fn new(config: &ChannelConfig, sample_interval_ms: u32) -> Result<Self, ConfigError> {
        if sample_interval_ms == 0 {
            return Err(ConfigError::ZeroSampleInterval);
        }
        let steps = StepTable::new(config.channel, &config.steps)?;
        let press_judge_ticks = config.press_judge_ticks(sample_interval_ms);
        if press_judge_ticks <= DETECTED_COUNT {
            return Err(ConfigError::PressJudgeTooShort {
                channel: config.channel,
                ticks: press_judge_ticks,
            });
        }
        Ok(Self {
            channel: config.channel,
            steps,
            press_judge_ticks,
        })
    }

    pub fn channel(&self) -> u8 {
        self.channel
    }

    pub fn steps(&self) -> &StepTable {
        &self.steps
    }

    pub fn press_judge_ticks(&self) -> u16 {
        self.press_judge_ticks
    }
}

/// A descriptor paired with the state of its buttons
#[derive(Clone, Debug)]
pub struct Channel {
    descriptor: ChannelDescriptor,
    tracker: ButtonTracker,
}

impl Channel {
    fn new(descriptor: ChannelDescriptor) -> Self {
        let tracker =
            ButtonTracker::new(descriptor.steps.buttons(), descriptor.press_judge_ticks);
        Self {
            descriptor,
            tracker,
        }
    }

    pub fn descriptor(&self) -> &ChannelDescriptor {
        &self.descriptor
    }

    pub fn tracker(&self) -> &ButtonTracker {
        &self.tracker
    }

    /// Classify one sample
    ///
    /// Returns the tick's state and, for anything but idle, the button it
    /// refers to.
    pub fn sample(&mut self, millivolts: Option<u16>) -> (ButtonState, Option<usize>) {
        let act_id = self.tracker.active_id();
        let id = millivolts.and_then(|mv| self.descriptor.steps.lookup(mv));
        let state = self.tracker.update(id);
        if state.is_event() {
            (state, act_id)
        } else {
            (state, None)
        }
    }

    pub fn reset(&mut self) {
        self.tracker.reset();
    }
}

/// Channels in polling order
#[derive(Debug)]
pub struct ChannelList {
    channels: Vec<Channel>,
}

impl ChannelList {
    /// Build the list, one entry per configured channel, order preserved
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoChannels`] for an empty slice, or the first
    /// per-channel validation error.
    pub fn new(configs: &[ChannelConfig], sample_interval_ms: u32) -> Result<Self, ConfigError> {
        if configs.is_empty() {
            return Err(ConfigError::NoChannels);
        }
        let channels = configs
            .iter()
            .map(|config| ChannelDescriptor::new(config, sample_interval_ms).map(Channel::new))
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!("created adc button list with {} channels", channels.len());
        Ok(Self { channels })
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Channel> {
        self.channels.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Channel> {
        self.channels.get_mut(index)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Channel> {
        self.channels.iter()
    }

    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, Channel> {
        self.channels.iter_mut()
    }

    /// Return every button slot to its initial state
    pub fn reset(&mut self) {
        self.channels.iter_mut().for_each(Channel::reset);
    }
}

impl Drop for ChannelList {
    fn drop(&mut self) {
        log::debug!("destroying adc button list ({} channels)", self.channels.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_keeps_configuration_order() {
        let configs = [
            ChannelConfig::new(6),
            ChannelConfig::new(1).steps(&[100, 200, 300]),
        ];
        let list = ChannelList::new(&configs, 20).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(0).unwrap().descriptor().channel(), 6);
        assert_eq!(list.get(1).unwrap().descriptor().channel(), 1);
        assert_eq!(list.get(1).unwrap().descriptor().steps().buttons(), 2);
        assert_eq!(list.get(0).unwrap().descriptor().press_judge_ticks(), 150);
    }

    #[test]
    fn empty_list_is_rejected() {
        assert!(matches!(
            ChannelList::new(&[], 20),
            Err(ConfigError::NoChannels)
        ));
    }

    #[test]
    fn first_invalid_channel_fails_the_list() {
        let configs = [
            ChannelConfig::new(0),
            ChannelConfig::new(1).steps(&[0, 800, 700]),
        ];
        assert_eq!(
            ChannelList::new(&configs, 20).unwrap_err(),
            ConfigError::NonMonotonicSteps {
                channel: 1,
                index: 2
            }
        );
    }

    #[test]
    fn short_press_judgment_is_rejected() {
        let config = ChannelConfig::new(2).press_judge_time_ms(40);
        assert_eq!(
            ChannelDescriptor::new(&config, 20),
            Err(ConfigError::PressJudgeTooShort {
                channel: 2,
                ticks: 2
            })
        );
    }

    #[test]
    fn sample_reports_previously_active_button() {
        let config = ChannelConfig::new(0).press_judge_time_ms(200);
        let mut list = ChannelList::new(&[config], 20).unwrap();
        let channel = list.get_mut(0).unwrap();
        assert_eq!(channel.sample(Some(900)), (ButtonState::Idle, None));
        assert_eq!(channel.sample(Some(900)), (ButtonState::Pressed, Some(1)));
        assert_eq!(channel.sample(Some(1500)), (ButtonState::Release, Some(1)));
        assert_eq!(channel.tracker().active_id(), Some(2));
    }

    #[test]
    fn missing_reading_acts_like_open_ladder() {
        let config = ChannelConfig::new(0).press_judge_time_ms(200);
        let mut list = ChannelList::new(&[config], 20).unwrap();
        let channel = list.get_mut(0).unwrap();
        channel.sample(Some(2000));
        channel.sample(Some(2000));
        assert_eq!(channel.sample(None), (ButtonState::Release, Some(3)));
    }

    #[test]
    fn reset_clears_all_channels() {
        let mut list =
            ChannelList::new(&[ChannelConfig::new(0), ChannelConfig::new(1)], 20).unwrap();
        for channel in list.iter_mut() {
            channel.sample(Some(700));
        }
        list.reset();
        assert!(list.iter().all(|c| c.tracker().active_id().is_none()));
    }
}
