use esp_idf_svc::hal::cpu::Core;
use esp_idf_svc::hal::task::thread::ThreadSpawnConfiguration;
use esp_idf_svc::sys;

/// Log heap usage statistics and current task stack headroom.
pub fn log_heap(label: &str) {
    let free_heap = unsafe { sys::esp_get_free_heap_size() };
    let min_free = unsafe { sys::esp_get_minimum_free_heap_size() };
    let stack_hwm_words = unsafe { sys::uxTaskGetStackHighWaterMark(core::ptr::null_mut()) };
    let stack_hwm_bytes = (stack_hwm_words as usize) * core::mem::size_of::<sys::StackType_t>();
    log::info!(
        "[MEM] {}: free={} min_free={} stack_hwm={}B",
        label,
        free_heap,
        min_free,
        stack_hwm_bytes
    );
}

/// Priority and core for the next `std::thread` spawned on ESP-IDF.
///
/// Stack size and name come from the worker's own `TaskConfig`.
pub fn configure_button_task(priority: u8, core: Core) {
    let mut config = ThreadSpawnConfiguration::default();
    config.priority = priority;
    config.pin_to_core = Some(core);
    config.inherit = false;

    if let Err(err) = config.set() {
        log::warn!("Failed to configure button task spawn: {}", err);
    } else {
        log::info!(
            "Button task spawn: priority={} core={:?}",
            config.priority,
            core
        );
    }
}

/// Put pthread spawn defaults back after the button task exists.
pub fn restore_thread_defaults() {
    if let Err(err) = ThreadSpawnConfiguration::default().set() {
        log::warn!("Failed to restore pthread defaults: {}", err);
    }
}
