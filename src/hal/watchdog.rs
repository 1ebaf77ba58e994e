//! Board reset through the task watchdog.

use esp_idf_svc::sys;

use crate::console::SystemControl;
use crate::log_globals::CONSOLE_LOG_STREAM;
use crate::logging::timestamp_us;
use crate::rt_error;

/// Shortest timeout the task watchdog accepts.
const RESET_TIMEOUT_MS: u32 = 1;

/// Resets the board by letting the task watchdog starve.
pub struct TaskWatchdog;

impl SystemControl for TaskWatchdog {
    fn arm_watchdog(&mut self) {
        let config = sys::esp_task_wdt_config_t {
            timeout_ms: RESET_TIMEOUT_MS,
            idle_core_mask: 0,
            trigger_panic: true,
        };

        // SAFETY: FFI calls with a valid config; a null handle subscribes the
        // calling task.
        let (configured, subscribed) = unsafe {
            let mut configured = sys::esp_task_wdt_reconfigure(&config);
            if configured != sys::ESP_OK {
                configured = sys::esp_task_wdt_init(&config);
            }
            (configured, sys::esp_task_wdt_add(core::ptr::null_mut()))
        };

        if configured != sys::ESP_OK {
            rt_error!(CONSOLE_LOG_STREAM, timestamp_us(), "watchdog config failed: {}", configured);
        }
        // already subscribed is fine
        if subscribed != sys::ESP_OK && subscribed != sys::ESP_ERR_INVALID_ARG {
            rt_error!(CONSOLE_LOG_STREAM, timestamp_us(), "watchdog subscribe failed: {}", subscribed);
        }
    }
}
