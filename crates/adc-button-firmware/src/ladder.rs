//! Button ladder of the ESP32-S3 audio dev board.
//!
//! All six user buttons share GPIO5 (ADC1 channel 4). ADC2 is shared with
//! Wi-Fi, so the ladder stays on ADC1.

use core::fmt;
use std::sync::Arc;

use esp_idf_svc::hal::adc::attenuation::DB_11;
use esp_idf_svc::hal::adc::oneshot::config::{AdcChannelConfig, Calibration};
use esp_idf_svc::hal::adc::oneshot::{AdcChannelDriver, AdcDriver};
use esp_idf_svc::hal::adc::ADC1;
use esp_idf_svc::hal::gpio::Gpio5;
use esp_idf_svc::sys::EspError;

use adc_button::{ChannelConfig, VoltageSource};

pub const LADDER_ADC_CHANNEL: u8 = 4;

// Measured: VOL+ ~320, VOL- ~720, SET ~990, PLAY ~1500, MUTE ~1810,
// REC ~2210, released ~3100 mV.
const LADDER_STEP_LEVELS: [u16; 7] = [0, 520, 855, 1245, 1655, 2010, 2600];
const PRESS_JUDGE_TIME_MS: u32 = 2000;

pub type SharedAdc1Driver = Arc<AdcDriver<'static, ADC1>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardButton {
    VolumeUp,
    VolumeDown,
    Set,
    Play,
    Mute,
    Record,
}

impl BoardButton {
    pub fn from_id(id: usize) -> Option<Self> {
        match id {
            0 => Some(BoardButton::VolumeUp),
            1 => Some(BoardButton::VolumeDown),
            2 => Some(BoardButton::Set),
            3 => Some(BoardButton::Play),
            4 => Some(BoardButton::Mute),
            5 => Some(BoardButton::Record),
            _ => None,
        }
    }
}

pub fn channel_config() -> ChannelConfig {
    ChannelConfig::new(LADDER_ADC_CHANNEL)
        .steps(&LADDER_STEP_LEVELS)
        .press_judge_time_ms(PRESS_JUDGE_TIME_MS)
}

#[derive(Debug)]
pub enum LadderError {
    UnknownChannel(u8),
    Adc(EspError),
}

impl fmt::Display for LadderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LadderError::UnknownChannel(channel) => {
                write!(f, "ADC channel {} is not wired to the ladder", channel)
            }
            LadderError::Adc(err) => write!(f, "ADC read failed: {}", err),
        }
    }
}

impl std::error::Error for LadderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LadderError::Adc(err) => Some(err),
            LadderError::UnknownChannel(_) => None,
        }
    }
}

/// Calibrated oneshot reads of the ladder pin
pub struct BoardLadder {
    adc: SharedAdc1Driver,
    pin: AdcChannelDriver<'static, Gpio5, SharedAdc1Driver>,
}

impl BoardLadder {
    pub fn new(adc: SharedAdc1Driver, gpio: Gpio5) -> Result<Self, EspError> {
        // 11 dB covers roughly 0-3.1 V, enough for the released level.
        let config = AdcChannelConfig {
            attenuation: DB_11,
            calibration: Calibration::Curve,
            ..Default::default()
        };
        let pin = AdcChannelDriver::new(adc.clone(), gpio, &config)?;
        log::info!("ADC ladder on ADC1 channel {}", LADDER_ADC_CHANNEL);
        Ok(Self { adc, pin })
    }
}

impl VoltageSource for BoardLadder {
    type Error = LadderError;

    fn read_millivolts(&mut self, channel: u8) -> Result<u16, Self::Error> {
        if channel != LADDER_ADC_CHANNEL {
            return Err(LadderError::UnknownChannel(channel));
        }
        self.adc.read(&mut self.pin).map_err(LadderError::Adc)
    }
}
