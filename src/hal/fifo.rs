//! Cross-core word FIFO pair on FreeRTOS queues.
//!
//! ```text
//! Core 1 (console)                      Core 0 (hardware)
//!        tx ───▶ [ to_hw   queue ] ───▶ rx
//!        rx ◀─── [ from_hw queue ] ◀─── tx
//! ```

use core::ffi::c_void;
use core::mem::size_of;

use esp_idf_svc::hal::delay::BLOCK;
use esp_idf_svc::sys::{self, EspError, QueueHandle_t};

use crate::channel::WordQueue;

const QUEUE_TYPE_BASE: u8 = 0;
const SEND_TO_BACK: sys::BaseType_t = 0;
const PD_TRUE: sys::BaseType_t = 1;

/// One side of the FIFO pair.
pub struct FifoEndpoint {
    tx: QueueHandle_t,
    rx: QueueHandle_t,
}

// SAFETY: FreeRTOS queues are designed for cross-task use; the handles are
// never freed.
unsafe impl Send for FifoEndpoint {}

/// Create both queues and return `(console_end, hardware_end)`.
pub fn fifo_pair(depth: usize) -> Result<(FifoEndpoint, FifoEndpoint), EspError> {
    let to_hw = create_queue(depth)?;
    let from_hw = create_queue(depth)?;

    Ok((
        FifoEndpoint { tx: to_hw, rx: from_hw },
        FifoEndpoint { tx: from_hw, rx: to_hw },
    ))
}

fn create_queue(depth: usize) -> Result<QueueHandle_t, EspError> {
    // SAFETY: plain allocation call, checked for null below
    let handle = unsafe {
        sys::xQueueGenericCreate(depth as _, size_of::<u32>() as _, QUEUE_TYPE_BASE)
    };
    if handle.is_null() {
        return Err(EspError::from_infallible::<{ sys::ESP_ERR_NO_MEM }>());
    }
    Ok(handle)
}

impl WordQueue for FifoEndpoint {
    fn push_blocking(&mut self, word: u32) {
        // SAFETY: the queue copies size_of::<u32>() bytes out of `word`
        while unsafe {
            sys::xQueueGenericSend(self.tx, &word as *const u32 as *const c_void, BLOCK, SEND_TO_BACK)
        } != PD_TRUE
        {}
    }

    fn pop_blocking(&mut self) -> u32 {
        let mut word = 0u32;
        // SAFETY: the queue copies size_of::<u32>() bytes into `word`
        while unsafe { sys::xQueueReceive(self.rx, &mut word as *mut u32 as *mut c_void, BLOCK) }
            != PD_TRUE
        {}
        word
    }

    fn drain(&mut self) -> usize {
        let mut word = 0u32;
        let mut count = 0;
        // SAFETY: as in pop_blocking, with a zero timeout
        while unsafe { sys::xQueueReceive(self.rx, &mut word as *mut u32 as *mut c_void, 0) }
            == PD_TRUE
        {
            count += 1;
        }
        count
    }
}
