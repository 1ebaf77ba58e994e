//! Console error types

use crate::protocol::Opcode;

/// Why a command line was not handled.
///
/// Both variants make the console print the help screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleError {
    /// E01: Unknown command
    UnknownCommand,
    /// E02: Help explicitly requested
    HelpRequested,
}

impl ConsoleError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "E01",
            Self::HelpRequested => "E02",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "unknown command",
            Self::HelpRequested => "help requested",
        }
    }
}

impl core::fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

/// The hardware context answered a request with something other than `ok`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteError {
    pub opcode: Opcode,
    /// Raw result word.
    pub code: u32,
}

impl core::fmt::Display for RemoteError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} failed (result {})", self.opcode.name(), self.code)
    }
}
