//! Operator console on the serial link.
//!
//! Blocking, one command at a time: the console reads a line, runs it
//! (possibly several round-trips to the hardware context) and only then
//! reads the next one. Zero heap allocation.

pub mod commands;
#[allow(clippy::module_inception)]
pub mod console;
pub mod error;
pub mod flows;
pub mod help;
pub mod io;
pub mod line_buffer;
pub mod numeric;
pub mod reader;
pub mod session;
pub mod status;

pub use commands::{command_names, dispatch, execute, Action, CommandDescriptor, COMMANDS};
pub use console::{Console, Ports, VERSION};
pub use error::{ConsoleError, RemoteError};
pub use flows::Flow;
pub use io::{SerialIo, SystemControl};
pub use line_buffer::{LineBuffer, LINE_SIZE};
pub use reader::read_line;
pub use session::SessionState;
pub use status::{decode as decode_status, StatusReport, StatusWord};
