//! Board wiring for the console and log UARTs.

/// Operator console UART and cross-core FIFO sizing.
#[derive(Clone, Copy, Debug)]
pub struct ConsoleConfig {
    pub baud_rate: u32,
    pub tx_pin: u8,
    pub rx_pin: u8,
    /// Words per FIFO direction.
    pub fifo_depth: usize,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            baud_rate: 115200,
            tx_pin: 43, // UART0 TX on the S3 dev boards
            rx_pin: 44,
            fifo_depth: 8,
        }
    }
}

/// TX-only log UART.
#[derive(Clone, Copy, Debug)]
pub struct LoggerConfig {
    pub baud_rate: u32,
    pub tx_pin: u8,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            baud_rate: 115200,
            tx_pin: 6, // GPIO6 - Quad flash only, conflicts with Octal PSRAM
        }
    }
}
