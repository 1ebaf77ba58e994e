//! EmpConsole - Main entry point
//!
//! On the board:
//! 1. Hardware context pinned to core 0
//! 2. Console and UART log drain on core 1
//! 3. Main task idles
//!
//! On a host the same console runs over stdin/stdout against a simulated
//! hardware context.

#[cfg(not(target_os = "espidf"))]
mod host_sim;

#[cfg(target_os = "espidf")]
fn main() -> Result<(), esp_idf_svc::sys::EspError> {
    firmware::run()
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    host_sim::run();
}

#[cfg(target_os = "espidf")]
mod firmware {
    use esp_idf_svc::hal::cpu::Core;
    use esp_idf_svc::hal::delay::FreeRtos;
    use esp_idf_svc::hal::gpio::{InputPin, OutputPin};
    use esp_idf_svc::hal::peripherals::Peripherals;
    use esp_idf_svc::hal::task::thread::ThreadSpawnConfiguration;
    use esp_idf_svc::sys::{self as esp_idf_sys, EspError};

    use rust_emp_console::config::{ConsoleConfig, LoggerConfig};
    use rust_emp_console::hal::{fifo_pair, BoardPins, PulserBoard, TaskWatchdog, UartConsole};
    use rust_emp_console::uart_logger::{init_uart_logger, uart_logger_task};
    use rust_emp_console::{hardware, Console};

    const STACK_SIZE: usize = 8 * 1024;

    fn spawn_on<F>(core: Core, f: F) -> Result<(), EspError>
    where
        F: FnOnce() + Send + 'static,
    {
        ThreadSpawnConfiguration {
            pin_to_core: Some(core),
            ..Default::default()
        }
        .set()?;

        std::thread::Builder::new()
            .stack_size(STACK_SIZE)
            .spawn(f)
            .map(|_| ())
            .map_err(|_| EspError::from_infallible::<{ esp_idf_sys::ESP_FAIL }>())
    }

    pub fn run() -> Result<(), EspError> {
        // Initialize ESP-IDF
        esp_idf_sys::link_patches();

        let peripherals = Peripherals::take()?;
        let pins = peripherals.pins;
        let console_config = ConsoleConfig::default();

        let (console_end, mut hw_end) = fifo_pair(console_config.fifo_depth)?;

        let mut board = PulserBoard::new(BoardPins {
            hv_enable: pins.gpio4.downgrade_output(),
            pulse: pins.gpio5.downgrade_output(),
            gp1: pins.gpio2.downgrade_output(),
            trigger: pins.gpio1.downgrade_input(),
            charged: pins.gpio7.downgrade_input(),
        })?;

        let mut log_uart = init_uart_logger(
            peripherals.uart1,
            pins.gpio6,
            &LoggerConfig::default(),
        )?;

        let serial = UartConsole::new(
            peripherals.uart0,
            pins.gpio43,
            pins.gpio44,
            &console_config,
        )?;

        // Hardware context: serves the FIFO, nothing else
        spawn_on(Core::Core0, move || hardware::serve(&mut hw_end, &mut board))?;

        spawn_on(Core::Core1, move || uart_logger_task(&mut log_uart))?;

        spawn_on(Core::Core1, move || {
            let mut console = Console::new(serial, console_end, TaskWatchdog);
            console.run()
        })?;

        ThreadSpawnConfiguration::default().set()?;

        loop {
            FreeRtos::delay_ms(1000);
        }
    }
}
