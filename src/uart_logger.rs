//! UART log output on GPIO6.
//!
//! Drains both context log streams to a TX-only UART so that log traffic
//! never mixes with the operator console.
//!
//! ```text
//! ESP32-S3 GPIO6 (TX) ──────▶ USB-UART RX
//!                              └─▶ PC Serial Monitor
//! ```
//!
//! **WARNING**: GPIO6 conflicts with Octal PSRAM. Only use on Quad flash boards!

use core::fmt::Write;

use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::hal::gpio::{self, OutputPin};
use esp_idf_svc::hal::peripheral::Peripheral;
use esp_idf_svc::hal::uart::{self, UartTxDriver, UART1};
use esp_idf_svc::hal::units::Hertz;
use esp_idf_svc::sys::EspError;

use crate::config::LoggerConfig;
use crate::log_globals::{CONSOLE_LOG_STREAM, HW_LOG_STREAM};
use crate::logging::{format_log_entry, timestamp_us, LogStream, SliceWriter};

/// Dropped-message report interval.
const DROPPED_REPORT_US: i64 = 10_000_000;

/// Initialize UART1 TX-only for logging output.
pub fn init_uart_logger<'d>(
    uart: impl Peripheral<P = UART1> + 'd,
    tx_pin: impl Peripheral<P = impl OutputPin> + 'd,
    config: &LoggerConfig,
) -> Result<UartTxDriver<'d>, EspError> {
    let uart_config = uart::config::Config::default().baudrate(Hertz(config.baud_rate));

    UartTxDriver::new(
        uart,
        tx_pin,
        Option::<gpio::AnyIOPin>::None, // CTS
        Option::<gpio::AnyIOPin>::None, // RTS
        &uart_config,
    )
}

fn drain_stream(uart: &mut UartTxDriver<'_>, stream: &LogStream, buf: &mut [u8]) -> bool {
    let mut work_done = false;
    while let Some(entry) = stream.drain() {
        let len = format_log_entry(&entry, buf);
        let _ = uart.write(&buf[..len]);
        work_done = true;
    }
    work_done
}

/// Log drain task (runs on core 1 next to the console).
pub fn uart_logger_task(uart: &mut UartTxDriver<'_>) -> ! {
    let mut format_buf = [0u8; 160];
    let mut last_dropped_report = 0i64;

    loop {
        // Hardware context first: its ring is the one that must not fill up
        let hw = drain_stream(uart, &HW_LOG_STREAM, &mut format_buf);
        let console = drain_stream(uart, &CONSOLE_LOG_STREAM, &mut format_buf);

        let now = timestamp_us();
        if now - last_dropped_report > DROPPED_REPORT_US {
            let hw_dropped = HW_LOG_STREAM.dropped();
            let console_dropped = CONSOLE_LOG_STREAM.dropped();

            if hw_dropped > 0 || console_dropped > 0 {
                let mut msg = [0u8; 64];
                let mut w = SliceWriter::new(&mut msg);
                let _ = writeln!(w, "[WARN] Dropped: HW={}, CONSOLE={}", hw_dropped, console_dropped);
                let len = w.len();
                let _ = uart.write(&msg[..len]);

                HW_LOG_STREAM.reset_dropped();
                CONSOLE_LOG_STREAM.reset_dropped();
            }

            last_dropped_report = now;
        }

        if !hw && !console {
            FreeRtos::delay_ms(10);
        }
    }
}
