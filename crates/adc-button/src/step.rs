//! Voltage to button id lookup
//!
//! A resistor ladder puts a distinct voltage on the shared pin for each
//! button. The step table lists the bucket edges in millivolts; `n` edges
//! describe `n - 1` buttons, bucket `i` being `(steps[i], steps[i + 1]]`.

use alloc::vec::Vec;

use crate::error::{ConfigError, MIN_STEPS};

/// Ascending bucket edges for one channel
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepTable {
    levels: Vec<u16>,
}

impl StepTable {
    /// Create a step table with validation
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TooFewSteps`] for fewer than two levels and
    /// [`ConfigError::NonMonotonicSteps`] if a level does not rise strictly.
    pub fn new(channel: u8, levels: &[u16]) -> Result<Self, ConfigError> {
        if levels.len() < MIN_STEPS {
            return Err(ConfigError::TooFewSteps {
                channel,
                steps: levels.len(),
            });
        }
        if let Some(pos) = levels.windows(2).position(|pair| pair[0] >= pair[1]) {
            return Err(ConfigError::NonMonotonicSteps {
                channel,
                index: pos + 1,
            });
        }
        Ok(Self {
            levels: levels.to_vec(),
        })
    }

    /// Number of buttons (buckets) the table describes
    pub fn buttons(&self) -> usize {
        self.levels.len() - 1
    }

    pub fn levels(&self) -> &[u16] {
        &self.levels
    }

    /// Bucket holding `millivolts`, or `None` outside every bucket
    pub fn lookup(&self, millivolts: u16) -> Option<usize> {
        for (i, edge) in self.levels.windows(2).enumerate() {
            log::trace!(
                "steps:{} mv:{} i:{} ({}, {}]",
                self.buttons(),
                millivolts,
                i,
                edge[0],
                edge[1]
            );
            if edge[0] < millivolts && millivolts <= edge[1] {
                return Some(i);
            }
        }
        None
    }
}
