//! Seams between the console and the board.

use core::fmt::Write;

/// Operator serial link: byte-at-a-time input, formatted output.
pub trait SerialIo: Write {
    /// Block until a byte arrives. `None` means the stream has ended.
    fn read_byte(&mut self) -> Option<u8>;

    /// Echo a received byte back unchanged.
    ///
    /// Must write the raw byte: bytes above 0x7F are not characters and
    /// would be re-encoded by `write_char`.
    fn echo(&mut self, byte: u8);
}

/// Board reset control.
pub trait SystemControl {
    /// Arm the hardware watchdog with its shortest timeout.
    fn arm_watchdog(&mut self);

    /// Spin until the watchdog resets the board.
    fn halt(&mut self) -> ! {
        loop {
            core::hint::spin_loop();
        }
    }
}
