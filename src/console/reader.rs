//! Line reader: bytes in, one command line out.

use super::io::SerialIo;
use super::line_buffer::LineBuffer;

/// Read one line into `line`, echoing every byte.
///
/// - `\r` ends the line and is not stored
/// - `\n` is discarded; it never ends a line
/// - end of stream ends the line with whatever has been collected
/// - bytes past [`LINE_SIZE`](super::line_buffer::LINE_SIZE) are dropped
///   until `\r` arrives, so the next read starts clean
///
/// Blocks for as long as the serial link stays quiet.
pub fn read_line<S: SerialIo + ?Sized>(serial: &mut S, line: &mut LineBuffer) {
    line.clear();

    while let Some(byte) = serial.read_byte() {
        serial.echo(byte);

        match byte {
            b'\r' => return,
            b'\n' => continue,
            _ => {
                line.push(byte);
            }
        }
    }
}
