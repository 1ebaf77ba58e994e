//! Console loop: read a line, dispatch it, print the result and a prompt.

use core::fmt::Write;

use super::commands::dispatch;
use super::help::HelpScreen;
use super::io::{SerialIo, SystemControl};
use super::line_buffer::LineBuffer;
use super::reader::read_line;
use super::session::SessionState;
use crate::channel::{Channel, WordQueue};
use crate::log_globals::CONSOLE_LOG_STREAM;
use crate::logging::timestamp_us;
use crate::rt_info;

/// Version string (set by build.rs, includes git hash)
pub const VERSION: &str = env!("VERSION_STRING");

/// Everything the dispatcher talks to.
pub struct Ports<S, Q, W> {
    pub serial: S,
    pub channel: Channel<Q>,
    pub system: W,
}

impl<S, Q: WordQueue, W> Ports<S, Q, W> {
    pub fn new(serial: S, queue: Q, system: W) -> Self {
        Self {
            serial,
            channel: Channel::new(queue),
            system,
        }
    }
}

/// Console state machine.
///
/// Owns the session; the dispatcher borrows it for one command at a time.
/// There is no exit: `reset` never returns, and end of input only yields
/// empty lines.
pub struct Console<S, Q, W> {
    session: SessionState,
    line: LineBuffer,
    ports: Ports<S, Q, W>,
}

impl<S, Q, W> Console<S, Q, W>
where
    S: SerialIo,
    Q: WordQueue,
    W: SystemControl,
{
    pub fn new(serial: S, queue: Q, system: W) -> Self {
        Self {
            session: SessionState::new(),
            line: LineBuffer::new(),
            ports: Ports::new(serial, queue, system),
        }
    }

    /// Start a fresh session: defaults restored, stale FIFO words dropped.
    pub fn enter(&mut self) {
        self.session = SessionState::new();
        let stale = self.ports.channel.drain();
        rt_info!(
            CONSOLE_LOG_STREAM,
            timestamp_us(),
            "console entered, {} stale words drained",
            stale
        );
    }

    /// One read-dispatch-print cycle.
    pub fn step(&mut self) {
        read_line(&mut self.ports.serial, &mut self.line);
        let _ = writeln!(self.ports.serial);

        if !dispatch(self.line.as_bytes(), &mut self.session, &mut self.ports) {
            let help = HelpScreen {
                version: VERSION,
                verbose: self.session.verbose,
                pulse: &self.session.pulse,
            };
            let _ = write!(self.ports.serial, "{}", help);
        }
        let _ = writeln!(self.ports.serial);

        self.print_prompt();
    }

    /// Enter the console and serve it forever.
    pub fn run(&mut self) -> ! {
        self.enter();
        loop {
            self.step();
        }
    }

    pub fn print_prompt(&mut self) {
        if self.session.last_command.is_empty() {
            let _ = write!(self.ports.serial, " > ");
        } else {
            let _ = write!(self.ports.serial, "[{}] > ", self.session.last_command);
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn ports(&self) -> &Ports<S, Q, W> {
        &self.ports
    }

    pub fn ports_mut(&mut self) -> &mut Ports<S, Q, W> {
        &mut self.ports
    }
}
