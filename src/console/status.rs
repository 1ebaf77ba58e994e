//! Status word decoding.

use core::fmt;

use bitflags::bitflags;

bitflags! {
    /// Status bitmask reported by the hardware context.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct StatusWord: u32 {
        const ARMED = 1 << 0;
        const CHARGED = 1 << 1;
        const TIMEOUT_ACTIVE = 1 << 2;
        const HVP_INTERNAL = 1 << 3;
    }
}

/// A status word ready for printing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusReport {
    pub status: StatusWord,
    pub verbose: bool,
}

/// Decode a raw status word. Undefined bits are ignored.
pub fn decode(word: u32, verbose: bool) -> StatusReport {
    StatusReport {
        status: StatusWord::from_bits_truncate(word),
        verbose,
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.status;
        writeln!(f, "Status:")?;
        flag(f, self.verbose, s.contains(StatusWord::ARMED), "Armed", "Disarmed", false)?;
        flag(f, self.verbose, s.contains(StatusWord::CHARGED), "Charged", "Not charged", false)?;
        flag(
            f,
            self.verbose,
            s.contains(StatusWord::TIMEOUT_ACTIVE),
            "Timeout active",
            "Timeout disabled",
            false,
        )?;
        // The HVP tag reads [0] when the bit is set; the other three read [1].
        flag(
            f,
            self.verbose,
            s.contains(StatusWord::HVP_INTERNAL),
            "HVP internal",
            "HVP external",
            true,
        )
    }
}

fn flag(
    f: &mut fmt::Formatter<'_>,
    verbose: bool,
    set: bool,
    on: &str,
    off: &str,
    inverted_tag: bool,
) -> fmt::Result {
    let label = if set { on } else { off };
    if verbose {
        let tag = u8::from(set != inverted_tag);
        writeln!(f, "- [{}] {}", tag, label)
    } else {
        writeln!(f, "- {}", label)
    }
}
