//! # RustEmpConsole
//!
//! Operator console for a dual-core EM fault-injection pulser.
//!
//! ## Architecture
//!
//! ```text
//! Serial link ──▶ Console (core 1) ──▶ Channel ══ FIFO pair ══▶ Hardware context (core 0)
//!             ◀──                  ◀──         ◀══          ◀══
//! ```
//!
//! - The console is the only producer of requests and the only consumer of
//!   responses; the hardware context mirrors it
//! - One request in flight at a time, no framing, no timeouts
//! - Everything blocks: a silent hardware context freezes the console
//!
//! The library is `no_std` and allocation-free; board glue lives in [`hal`]
//! and is only built for ESP-IDF targets.

#![cfg_attr(not(test), no_std)]

pub mod channel;
pub mod config;
pub mod console;
pub mod hardware;
pub mod log_globals;
pub mod logging;
pub mod protocol;

#[cfg(target_os = "espidf")]
pub mod hal;
#[cfg(target_os = "espidf")]
pub mod uart_logger;

pub use channel::{Channel, WordQueue};
pub use config::PulseConfig;
pub use console::{Console, SerialIo, SessionState, SystemControl};
pub use hardware::HardwareContext;
pub use log_globals::{CONSOLE_LOG_STREAM, HW_LOG_STREAM};
pub use protocol::{Opcode, Request};
