//! Per-session console state.

use super::line_buffer::LineBuffer;
use crate::config::PulseConfig;

/// Everything the console remembers between commands.
///
/// Reset to defaults each time the console is entered; never persisted.
#[derive(Clone, Debug)]
pub struct SessionState {
    /// Last non-empty command line. Empty means no history yet.
    pub last_command: LineBuffer,
    pub verbose: bool,
    pub pulse: PulseConfig,
}

impl SessionState {
    pub const fn new() -> Self {
        Self {
            last_command: LineBuffer::new(),
            verbose: false,
            pulse: PulseConfig::new(),
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
