//! Help screen, in terse and verbose layouts.

use core::fmt;

use super::commands::{Action, LocalEffect, COMMANDS};
use super::flows::FlowParam;
use crate::config::PulseConfig;

const BANNER: &str = concat!(
    r" _____ _____ _____    _____       _                               _    _____             _         ", "\n",
    r"|   __|     |   __|  |  |  |___ _| |___ ___ ___ ___ ___ _ _ ___ _| |  |  |  |___ ___ ___|_|___ ___ ", "\n",
    r"|  |  | | | |  |  |  |  |  |   | . | -_|  _| . |  _| . | | |   | . |  |  |  | -_|  _|_ -| | . |   |", "\n",
    r"|_____|_|_|_|_____|  |_____|_|_|___|___|_| |_  |_| |___|___|_|_|___|   \___/|___|_| |___|_|___|_|_|", "\n",
    r"                                           |___|                                                   ", "\n",
);

/// Help screen showing the session's cached configuration values.
pub struct HelpScreen<'a> {
    /// Firmware version, printed under the banner.
    pub version: &'a str,
    pub verbose: bool,
    pub pulse: &'a PulseConfig,
}

impl fmt::Display for HelpScreen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PicoEMP Commands:")?;
        writeln!(f)?;
        f.write_str(BANNER)?;
        writeln!(f, "{}", self.version)?;
        writeln!(f)?;
        writeln!(f, "- <empty to repeat last command>")?;
        writeln!(f)?;

        for cmd in COMMANDS {
            // help and verbose look the same in both layouts
            let plain = matches!(
                cmd.action,
                Action::Help | Action::Local(LocalEffect::ToggleVerbose)
            );
            let params: &[FlowParam] = match cmd.action {
                Action::ConfigFlow(flow) => flow.params(),
                _ => &[],
            };

            if plain || !self.verbose {
                write!(f, "- {}", cmd.label)?;
                for (i, p) in params.iter().enumerate() {
                    let lead = if i == 0 { ": [" } else { ", " };
                    write!(f, "{}{}", lead, self.pulse.get(p.field))?;
                }
                if !params.is_empty() {
                    write!(f, "]")?;
                }
                writeln!(f)?;
                continue;
            }

            writeln!(f, "- {:<30}({})", cmd.label, cmd.detail)?;
            for p in params {
                writeln!(f, "   |--> {}={}", p.help_name, self.pulse.get(p.field))?;
            }
            if cmd.section_end {
                writeln!(f)?;
            }
        }

        Ok(())
    }
}
