mod ladder;
mod runtime_diagnostics;

use std::sync::mpsc::{self, TrySendError};
use std::sync::Arc;

use esp_idf_svc::hal::adc::oneshot::AdcDriver;
use esp_idf_svc::hal::cpu::Core;
use esp_idf_svc::hal::peripherals::Peripherals;

use adc_button::{AdcButtons, Builder, ButtonEvent, ButtonState, TaskConfig};

use ladder::{BoardButton, BoardLadder};
use runtime_diagnostics::{configure_button_task, log_heap, restore_thread_defaults};

const SAMPLE_INTERVAL_MS: u32 = 20;
const EVENT_QUEUE_DEPTH: usize = 8;
const BUTTON_TASK_STACK_BYTES: usize = 4 * 1024;
const BUTTON_TASK_PRIORITY: u8 = 10;
const BUTTON_TASK_CORE: Core = Core::Core0;

fn report(event: ButtonEvent) {
    let Some(button) = BoardButton::from_id(event.id) else {
        log::warn!("Unmapped ladder id {} on channel {}", event.id, event.channel);
        return;
    };
    let mv = event.millivolts.map_or(-1, i32::from);
    match event.state {
        ButtonState::Pressed => log::info!("{:?} pressed ({} mV)", button, mv),
        ButtonState::LongPressed => log::info!("{:?} held ({} mV)", button, mv),
        ButtonState::Release => log::info!("{:?} released", button),
        ButtonState::LongRelease => log::info!("{:?} released after hold", button),
        ButtonState::Idle => {}
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();
    log_heap("startup");

    let peripherals = Peripherals::take()?;
    let adc = Arc::new(AdcDriver::new(peripherals.adc1)?);
    let ladder = BoardLadder::new(adc, peripherals.pins.gpio5)?;

    let config = Builder::new()
        .sample_interval_ms(SAMPLE_INTERVAL_MS)
        .channel(ladder::channel_config())
        .task(TaskConfig {
            name: "adc_button".into(),
            stack_size: BUTTON_TASK_STACK_BYTES,
        })
        .build()?;

    // The worker must never block on a slow consumer.
    let (event_tx, event_rx) = mpsc::sync_channel(EVENT_QUEUE_DEPTH);
    let sink = move |event: ButtonEvent| {
        if let Err(TrySendError::Full(event)) = event_tx.try_send(event) {
            log::warn!("Button queue full, dropped {:?}", event);
        }
    };
    let mut buttons = AdcButtons::new(&config, ladder, sink)?;

    configure_button_task(BUTTON_TASK_PRIORITY, BUTTON_TASK_CORE);
    let started = buttons.start();
    restore_thread_defaults();
    started?;
    log_heap("button_task_started");

    log::info!("Waiting for button events... Press a button!");
    for event in event_rx.iter() {
        report(event);
    }

    buttons.stop()?;
    Ok(())
}
