//! Hardware Abstraction Layer for the ESP32-S3 pulser.
//!
//! Thin wrappers around ESP-IDF peripherals.
//! Protocol and console logic stay in core modules, HAL is just I/O.

pub mod board;
pub mod fifo;
pub mod uart;
pub mod watchdog;

pub use board::{BoardPins, PulserBoard};
pub use fifo::{fifo_pair, FifoEndpoint};
pub use uart::UartConsole;
pub use watchdog::TaskWatchdog;
