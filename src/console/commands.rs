//! Command table and dispatcher.
//!
//! Tokens are matched exactly and case-sensitively against a fixed table;
//! most commands have a short and a long spelling. Each entry maps to one
//! [`Action`], which fixes the number of round-trips to the hardware context.

use core::fmt::Write;

use super::console::Ports;
use super::error::ConsoleError;
use super::flows::{self, Flow};
use super::io::{SerialIo, SystemControl};
use super::line_buffer::LineBuffer;
use super::session::SessionState;
use super::status;
use crate::channel::WordQueue;
use crate::log_globals::CONSOLE_LOG_STREAM;
use crate::logging::timestamp_us;
use crate::protocol::Opcode;
use crate::{rt_debug, rt_info, rt_warn};

/// Console-only effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocalEffect {
    ToggleVerbose,
}

/// What a command does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Not handled: the console prints the help screen.
    Help,
    Local(LocalEffect),
    /// One request, one result word.
    Remote {
        opcode: Opcode,
        ok: Option<&'static str>,
        fail: Option<&'static str>,
    },
    /// One request, then one data word after `ok`.
    RemoteWithData { opcode: Opcode, fail: &'static str },
    /// One request, then a second word once an external event happened.
    RemoteDeferred {
        opcode: Opcode,
        waiting: &'static str,
        done: &'static str,
        fail: &'static str,
    },
    ConfigFlow(Flow),
    /// Arm the watchdog and never return.
    Fatal,
}

/// Command descriptor
#[derive(Debug)]
pub struct CommandDescriptor {
    pub short: &'static str,
    pub long: Option<&'static str>,
    /// Help-screen label with the short form bracketed.
    pub label: &'static str,
    /// Description column of the verbose help screen.
    pub detail: &'static str,
    /// Verbose help leaves a blank line after this entry.
    pub section_end: bool,
    pub action: Action,
}

impl CommandDescriptor {
    /// Exact, case-sensitive comparison on raw bytes.
    pub fn matches(&self, token: &[u8]) -> bool {
        self.short.as_bytes() == token || self.long.map(str::as_bytes) == Some(token)
    }
}

const fn remote(
    opcode: Opcode,
    ok: Option<&'static str>,
    fail: Option<&'static str>,
) -> Action {
    Action::Remote { opcode, ok, fail }
}

/// All commands, in help-screen order.
pub static COMMANDS: &[CommandDescriptor] = &[
    CommandDescriptor {
        short: "h",
        long: Some("help"),
        label: "[h]elp",
        detail: "Show this list",
        section_end: false,
        action: Action::Help,
    },
    CommandDescriptor {
        short: "a",
        long: Some("arm"),
        label: "[a]rm",
        detail: "Enable HV",
        section_end: false,
        action: remote(Opcode::Arm, Some("Device armed!"), Some("Arming failed!")),
    },
    CommandDescriptor {
        short: "d",
        long: Some("disarm"),
        label: "[d]isarm",
        detail: "Remove HV",
        section_end: false,
        action: remote(Opcode::Disarm, Some("Device disarmed!"), Some("Disarming failed!")),
    },
    CommandDescriptor {
        short: "p",
        long: Some("pulse"),
        label: "[p]ulse",
        detail: "Manual one shot",
        section_end: false,
        action: remote(Opcode::Pulse, Some("Pulsed!"), Some("Pulse failed!")),
    },
    CommandDescriptor {
        short: "en",
        long: Some("enable_timeout"),
        label: "[en]able_timeout",
        detail: "Enable HV Timeout",
        section_end: false,
        action: remote(
            Opcode::EnableTimeout,
            Some("Timeout enabled!"),
            Some("Enabling timeout failed!"),
        ),
    },
    CommandDescriptor {
        short: "di",
        long: Some("disable_timeout"),
        label: "[di]sable_timeout",
        detail: "Disable HV Timeout",
        section_end: true,
        action: remote(
            Opcode::DisableTimeout,
            Some("Timeout disabled!"),
            Some("Disabling timeout failed!"),
        ),
    },
    CommandDescriptor {
        short: "f",
        long: Some("fast_trigger"),
        label: "[f]ast_trigger",
        detail: "Start pin trigger detection [GP0]",
        section_end: false,
        action: Action::RemoteDeferred {
            opcode: Opcode::FastTrigger,
            waiting: "Fast trigger active...",
            done: "Triggered!",
            fail: "Setting up fast trigger failed.",
        },
    },
    CommandDescriptor {
        short: "fa",
        long: Some("fast_trigger_configure"),
        label: "[fa]st_trigger_configure",
        detail: "Fast trigger configuration",
        section_end: true,
        action: Action::ConfigFlow(Flow::FastTrigger),
    },
    CommandDescriptor {
        short: "in",
        long: Some("internal_hvp"),
        label: "[in]ternal_hvp",
        detail: "Use Internal HV PWM Charge logic",
        section_end: false,
        action: remote(
            Opcode::InternalHvp,
            Some("Internal HVP mode active!"),
            Some("Setting up internal HVP mode failed."),
        ),
    },
    CommandDescriptor {
        short: "ex",
        long: Some("external_hvp"),
        label: "[ex]ternal_hvp",
        detail: "Use External HV PWM Charge logic",
        section_end: false,
        action: remote(
            Opcode::ExternalHvp,
            Some("External HVP mode active!"),
            Some("Setting up external HVP mode failed."),
        ),
    },
    CommandDescriptor {
        short: "c",
        long: Some("configure"),
        label: "[c]onfigure",
        detail: "HVP Charge configuration",
        section_end: true,
        action: Action::ConfigFlow(Flow::Charge),
    },
    CommandDescriptor {
        short: "gl",
        long: None,
        label: "[gl] GP1 Low",
        detail: "General purpose output LOW    [GP1]",
        section_end: false,
        action: remote(Opcode::Gp1Low, None, None),
    },
    CommandDescriptor {
        short: "gh",
        long: None,
        label: "[gh] GP1 High",
        detail: "General purpose output HIGH   [GP1]",
        section_end: false,
        action: remote(Opcode::Gp1High, None, None),
    },
    CommandDescriptor {
        short: "gt",
        long: None,
        label: "[gt] GP1 Toggle",
        detail: "General purpose output TOGGLE [GP1]",
        section_end: true,
        action: remote(Opcode::Gp1Toggle, None, Some("GP1 toggle failed.")),
    },
    CommandDescriptor {
        short: "s",
        long: Some("status"),
        label: "[s]tatus",
        detail: "Read pulser status",
        section_end: false,
        action: Action::RemoteWithData {
            opcode: Opcode::Status,
            fail: "Getting status failed!",
        },
    },
    CommandDescriptor {
        short: "r",
        long: Some("reset"),
        label: "[r]eset",
        detail: "Reset board",
        section_end: false,
        action: Action::Fatal,
    },
    CommandDescriptor {
        short: "v",
        long: Some("verbose"),
        label: "[v]erbose",
        detail: "Toggle verbose output",
        section_end: false,
        action: Action::Local(LocalEffect::ToggleVerbose),
    },
];

/// Look up a token. No prefix matching.
pub fn find(token: &[u8]) -> Option<&'static CommandDescriptor> {
    COMMANDS.iter().find(|c| c.matches(token))
}

/// Every accepted spelling, short forms first within each command.
pub fn command_names() -> impl Iterator<Item = &'static str> {
    COMMANDS
        .iter()
        .flat_map(|c| core::iter::once(c.short).chain(c.long))
}

/// Handle one command line.
///
/// A non-empty line always becomes the session's last command, even when it
/// is not recognized. An empty line repeats the last command, or asks for
/// help when there is none.
///
/// Returns `false` only when the help screen should be printed. Remote
/// failures are reported on the serial link and still count as handled.
pub fn dispatch<L, S, Q, W>(line: L, session: &mut SessionState, ports: &mut Ports<S, Q, W>) -> bool
where
    L: AsRef<[u8]>,
    S: SerialIo,
    Q: WordQueue,
    W: SystemControl,
{
    // History is a single slot that is never set to an empty line, so one
    // level of indirection is always enough.
    let line = line.as_ref();
    let mut command = LineBuffer::new();
    if line.is_empty() {
        if session.last_command.is_empty() {
            return false;
        }
        command.clone_from(&session.last_command);
        let _ = writeln!(ports.serial, "Repeat previous command ({})", command);
    } else {
        session.last_command.set_bytes(line);
        command.set_bytes(line);
    }

    match execute(command.as_bytes(), session, ports) {
        Ok(()) => true,
        Err(e) => {
            rt_info!(CONSOLE_LOG_STREAM, timestamp_us(), "'{}': {}", command, e);
            false
        }
    }
}

/// Execute a single command token.
pub fn execute<T, S, Q, W>(
    token: T,
    session: &mut SessionState,
    ports: &mut Ports<S, Q, W>,
) -> Result<(), ConsoleError>
where
    T: AsRef<[u8]>,
    S: SerialIo,
    Q: WordQueue,
    W: SystemControl,
{
    let cmd = find(token.as_ref()).ok_or(ConsoleError::UnknownCommand)?;
    rt_debug!(CONSOLE_LOG_STREAM, timestamp_us(), "exec {}", cmd.short);

    match cmd.action {
        Action::Help => return Err(ConsoleError::HelpRequested),

        Action::Local(LocalEffect::ToggleVerbose) => {
            session.verbose = !session.verbose;
        }

        Action::Remote { opcode, ok, fail } => {
            let message = match ports.channel.send(opcode) {
                Ok(()) => ok,
                Err(_) => fail,
            };
            if let Some(message) = message {
                let _ = writeln!(ports.serial, "{}", message);
            }
        }

        Action::RemoteWithData { opcode, fail } => match ports.channel.send(opcode) {
            Ok(()) => {
                let word = ports.channel.receive();
                let report = status::decode(word, session.verbose);
                let _ = write!(ports.serial, "{}", report);
            }
            Err(_) => {
                let _ = writeln!(ports.serial, "{}", fail);
            }
        },

        Action::RemoteDeferred {
            opcode,
            waiting,
            done,
            fail,
        } => match ports.channel.send(opcode) {
            Ok(()) => {
                let _ = writeln!(ports.serial, "{}", waiting);
                // Blocks until the external event; the word itself carries nothing.
                let _ = ports.channel.receive();
                let _ = writeln!(ports.serial, "{}", done);
            }
            Err(_) => {
                let _ = writeln!(ports.serial, "{}", fail);
            }
        },

        Action::ConfigFlow(flow) => flows::run(flow, session, ports),

        Action::Fatal => {
            rt_warn!(CONSOLE_LOG_STREAM, timestamp_us(), "reset requested");
            ports.system.arm_watchdog();
            ports.system.halt();
        }
    }

    Ok(())
}
