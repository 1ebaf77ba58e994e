//! Operator console on UART0.

use core::fmt;

use esp_idf_svc::hal::delay::BLOCK;
use esp_idf_svc::hal::gpio::{AnyIOPin, InputPin, OutputPin};
use esp_idf_svc::hal::peripheral::Peripheral;
use esp_idf_svc::hal::uart::{self, UartDriver, UART0};
use esp_idf_svc::hal::units::Hertz;
use esp_idf_svc::sys::EspError;

use crate::config::ConsoleConfig;
use crate::console::SerialIo;

/// Console serial link. `\n` goes out as `\r\n`.
pub struct UartConsole<'d> {
    driver: UartDriver<'d>,
}

impl<'d> UartConsole<'d> {
    pub fn new(
        uart: impl Peripheral<P = UART0> + 'd,
        tx_pin: impl Peripheral<P = impl OutputPin> + 'd,
        rx_pin: impl Peripheral<P = impl InputPin> + 'd,
        config: &ConsoleConfig,
    ) -> Result<Self, EspError> {
        let uart_config = uart::config::Config::default().baudrate(Hertz(config.baud_rate));

        let driver = UartDriver::new(
            uart,
            tx_pin,
            rx_pin,
            Option::<AnyIOPin>::None, // CTS
            Option::<AnyIOPin>::None, // RTS
            &uart_config,
        )?;

        Ok(Self { driver })
    }

    fn write_raw(&mut self, bytes: &[u8]) -> fmt::Result {
        self.driver.write(bytes).map(|_| ()).map_err(|_| fmt::Error)
    }
}

impl fmt::Write for UartConsole<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for (i, chunk) in s.split('\n').enumerate() {
            if i > 0 {
                self.write_raw(b"\r\n")?;
            }
            if !chunk.is_empty() {
                self.write_raw(chunk.as_bytes())?;
            }
        }
        Ok(())
    }
}

impl SerialIo for UartConsole<'_> {
    fn read_byte(&mut self) -> Option<u8> {
        let mut byte = [0u8; 1];
        loop {
            match self.driver.read(&mut byte, BLOCK) {
                Ok(1) => return Some(byte[0]),
                Ok(_) => continue,
                Err(_) => return None,
            }
        }
    }

    fn echo(&mut self, byte: u8) {
        let _ = self.write_raw(&[byte]);
    }
}
