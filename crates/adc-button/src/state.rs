//! Debounce and hold tracking for one channel
//!
//! Each button of a channel owns a slot. A slot becomes active when its
//! bucket is first sampled; two consecutive matches confirm a press and a run
//! of `press_judge_ticks` matches confirms a long press, reported once per
//! hold. Leaving the bucket reports a release for the active button.

use alloc::vec;
use alloc::vec::Vec;

/// Consecutive matching samples needed to confirm a press
pub const DETECTED_COUNT: u16 = 2;

/// Classification result of one tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ButtonState {
    /// Nothing to report; never delivered to a sink
    #[default]
    Idle,
    Pressed,
    LongPressed,
    Release,
    LongRelease,
}

impl ButtonState {
    /// Whether this state is delivered as an event
    pub fn is_event(self) -> bool {
        self != ButtonState::Idle
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct ButtonSlot {
    active: bool,
    click_count: u16,
    long_click: bool,
}

/// Runtime state of every button on one channel
#[derive(Clone, Debug)]
pub struct ButtonTracker {
    slots: Vec<ButtonSlot>,
    press_judge_ticks: u16,
}

impl ButtonTracker {
    pub fn new(buttons: usize, press_judge_ticks: u16) -> Self {
        Self {
            slots: vec![ButtonSlot::default(); buttons],
            press_judge_ticks,
        }
    }

    /// Button currently considered held, if any
    pub fn active_id(&self) -> Option<usize> {
        self.slots.iter().position(|slot| slot.active)
    }

    /// Consecutive matches recorded for `id` (0 for unknown ids)
    pub fn click_count(&self, id: usize) -> u16 {
        self.slots.get(id).map_or(0, |slot| slot.click_count)
    }

    pub fn press_judge_ticks(&self) -> u16 {
        self.press_judge_ticks
    }

    pub fn reset(&mut self) {
        self.slots.fill(ButtonSlot::default());
    }

    /// Advance the state machine with the bucket sampled this tick
    ///
    /// Any non-idle result refers to the button that was active before the
    /// call. Ids outside the slot table are treated as no bucket.
    pub fn update(&mut self, id: Option<usize>) -> ButtonState {
        let id = id.filter(|&id| id < self.slots.len());
        let act_id = self.active_id();

        let (id, act_id) = match (id, act_id) {
            (None, None) => return ButtonState::Idle,
            (None, Some(act_id)) => return self.leave(act_id),
            (Some(id), None) => {
                self.adopt(id);
                return ButtonState::Idle;
            }
            (Some(id), Some(act_id)) => (id, act_id),
        };

        if id != act_id {
            return self.slide(act_id, id);
        }

        let judge = self.press_judge_ticks;
        let slot = &mut self.slots[act_id];
        slot.click_count = slot.click_count.saturating_add(1);
        if slot.click_count == DETECTED_COUNT {
            return ButtonState::Pressed;
        }
        if slot.long_click {
            return ButtonState::Idle;
        }
        if slot.click_count >= judge {
            log::debug!(
                "long press: act id:{} cnt:{}",
                act_id,
                slot.click_count
            );
            slot.long_click = true;
            return ButtonState::LongPressed;
        }
        ButtonState::Idle
    }

    // The adopting sample counts as the first match.
    fn adopt(&mut self, id: usize) {
        self.slots[id] = ButtonSlot {
            active: true,
            click_count: 1,
            long_click: false,
        };
    }

    fn release_state(&self, click_count: u16) -> ButtonState {
        if click_count < self.press_judge_ticks {
            ButtonState::Release
        } else {
            ButtonState::LongRelease
        }
    }

    fn leave(&mut self, act_id: usize) -> ButtonState {
        let click_count = self.slots[act_id].click_count;
        // A lone sample is bounce. The slot stays as it is.
        if click_count <= 1 {
            return ButtonState::Idle;
        }
        let state = self.release_state(click_count);
        log::debug!("{:?}: act id:{} cnt:{}", state, act_id, click_count);
        self.slots[act_id] = ButtonSlot::default();
        state
    }

    fn slide(&mut self, act_id: usize, id: usize) -> ButtonState {
        let click_count = self.slots[act_id].click_count;
        log::warn!("old id:{} new id:{} cnt:{}", act_id, id, click_count);
        self.slots[act_id] = ButtonSlot::default();
        self.adopt(id);
        if click_count < DETECTED_COUNT {
            return ButtonState::Idle;
        }
        self.release_state(click_count)
    }
}
