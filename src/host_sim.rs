//! Host simulator: the console over stdin/stdout, with a simulated hardware
//! context on its own thread.
//!
//! The terminal is left in cooked mode, so it already echoes input and
//! delivers `\n` for Enter. The adapter below turns `\n` into the `\r` the
//! line reader expects and skips the console's own echo.
//!
//! End of stdin exits the process instead of feeding the console empty
//! lines: on the board the UART never ends, and here an empty line would
//! re-run the last command forever.

use std::fmt;
use std::io::{self, Read, Write};
use std::sync::mpsc::{sync_channel, Receiver, SyncSender};
use std::thread;
use std::time::Duration;

use rust_emp_console::config::{ConsoleConfig, PulseConfig};
use rust_emp_console::console::StatusWord;
use rust_emp_console::logging::format_log_entry;
use rust_emp_console::{hardware, Console, HardwareContext, Request, SerialIo, SystemControl, WordQueue};
use rust_emp_console::{CONSOLE_LOG_STREAM, HW_LOG_STREAM};

/// Delay before the simulated GP0 edge arrives.
const SIMULATED_TRIGGER_DELAY: Duration = Duration::from_millis(500);

struct StdFifo {
    tx: SyncSender<u32>,
    rx: Receiver<u32>,
}

fn fifo_pair(depth: usize) -> (StdFifo, StdFifo) {
    let (to_hw_tx, to_hw_rx) = sync_channel(depth);
    let (from_hw_tx, from_hw_rx) = sync_channel(depth);
    (
        StdFifo { tx: to_hw_tx, rx: from_hw_rx },
        StdFifo { tx: from_hw_tx, rx: to_hw_rx },
    )
}

impl WordQueue for StdFifo {
    fn push_blocking(&mut self, word: u32) {
        if self.tx.send(word).is_err() {
            peer_gone();
        }
    }

    fn pop_blocking(&mut self) -> u32 {
        self.rx.recv().unwrap_or_else(|_| peer_gone())
    }

    fn drain(&mut self) -> usize {
        self.rx.try_iter().count()
    }
}

fn peer_gone() -> ! {
    eprintln!("hardware context stopped");
    std::process::exit(1);
}

struct StdioSerial {
    stdin: io::Stdin,
    stdout: io::Stdout,
}

impl fmt::Write for StdioSerial {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let mut out = self.stdout.lock();
        out.write_all(s.as_bytes()).map_err(|_| fmt::Error)?;
        out.flush().map_err(|_| fmt::Error)
    }
}

impl SerialIo for StdioSerial {
    fn read_byte(&mut self) -> Option<u8> {
        let mut byte = [0u8; 1];
        match self.stdin.lock().read(&mut byte) {
            Ok(1) if byte[0] == b'\n' => Some(b'\r'),
            Ok(1) => Some(byte[0]),
            // EOF: exit rather than repeat the last command forever.
            _ => std::process::exit(0),
        }
    }

    fn echo(&mut self, _byte: u8) {}
}

struct ProcessExit;

impl SystemControl for ProcessExit {
    fn arm_watchdog(&mut self) {
        println!("(simulated watchdog reset)");
    }

    fn halt(&mut self) -> ! {
        std::process::exit(0);
    }
}

/// Pulser state without any pins behind it.
#[derive(Default)]
struct SimulatedBoard {
    armed: bool,
    timeout_active: bool,
    hvp_internal: bool,
    gp1: bool,
    timing: PulseConfig,
}

impl HardwareContext for SimulatedBoard {
    fn execute(&mut self, request: Request) -> bool {
        match request {
            Request::Arm => self.armed = true,
            Request::Disarm => self.armed = false,
            Request::Pulse | Request::FastTrigger => return self.armed,
            Request::Status => {}
            Request::EnableTimeout => self.timeout_active = true,
            Request::DisableTimeout => self.timeout_active = false,
            Request::ConfigPulseTime(us) => self.timing.pulse_time_micros = us,
            Request::ConfigPulsePower(power) => self.timing.pulse_power = power,
            Request::InternalHvp => self.hvp_internal = true,
            Request::ExternalHvp => self.hvp_internal = false,
            Request::ConfigPulseDelayCycles(c) => self.timing.pulse_delay_cycles = c,
            Request::ConfigPulseTimeCycles(c) => self.timing.pulse_time_cycles = c,
            Request::Gp1Toggle => self.gp1 = !self.gp1,
            Request::Gp1Low => self.gp1 = false,
            Request::Gp1High => self.gp1 = true,
        }
        true
    }

    fn status(&mut self) -> StatusWord {
        let mut status = StatusWord::empty();
        status.set(StatusWord::ARMED, self.armed);
        // charging is instant in the simulation
        status.set(StatusWord::CHARGED, self.armed);
        status.set(StatusWord::TIMEOUT_ACTIVE, self.timeout_active);
        status.set(StatusWord::HVP_INTERNAL, self.hvp_internal);
        status
    }

    fn wait_for_trigger(&mut self) {
        thread::sleep(SIMULATED_TRIGGER_DELAY);
    }
}

/// Print pending log entries to stderr when `EMP_LOG` is set.
fn dump_logs() {
    if std::env::var_os("EMP_LOG").is_none() {
        return;
    }
    let mut buf = [0u8; 160];
    for stream in [&HW_LOG_STREAM, &CONSOLE_LOG_STREAM] {
        while let Some(entry) = stream.drain() {
            let len = format_log_entry(&entry, &mut buf);
            eprint!("{}", String::from_utf8_lossy(&buf[..len]));
        }
    }
}

pub fn run() {
    let config = ConsoleConfig::default();
    let (console_end, mut hw_end) = fifo_pair(config.fifo_depth);

    thread::spawn(move || {
        let mut board = SimulatedBoard {
            timeout_active: true,
            hvp_internal: true,
            ..Default::default()
        };
        hardware::serve(&mut hw_end, &mut board)
    });

    thread::spawn(|| loop {
        dump_logs();
        thread::sleep(Duration::from_millis(100));
    });

    let serial = StdioSerial {
        stdin: io::stdin(),
        stdout: io::stdout(),
    };
    let mut console = Console::new(serial, console_end, ProcessExit);
    console.run()
}
