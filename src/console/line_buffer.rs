//! Bounded command line buffer

use core::fmt::{self, Write};

/// Maximum characters kept per line. Input past this is dropped.
pub const LINE_SIZE: usize = 255;

/// Fixed-capacity line of raw bytes.
#[derive(Clone)]
pub struct LineBuffer {
    buf: [u8; LINE_SIZE],
    len: usize,
}

impl LineBuffer {
    pub const fn new() -> Self {
        Self {
            buf: [0u8; LINE_SIZE],
            len: 0,
        }
    }

    /// Append a byte. Returns `false` (and drops it) once the buffer is full.
    pub fn push(&mut self, c: u8) -> bool {
        if self.len < LINE_SIZE {
            self.buf[self.len] = c;
            self.len += 1;
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Replace the contents, truncating at [`LINE_SIZE`].
    pub fn set(&mut self, s: &str) {
        self.set_bytes(s.as_bytes());
    }

    /// Replace the contents with raw bytes, truncating at [`LINE_SIZE`].
    pub fn set_bytes(&mut self, bytes: &[u8]) {
        let copy_len = bytes.len().min(LINE_SIZE);
        self.buf[..copy_len].copy_from_slice(&bytes[..copy_len]);
        self.len = copy_len;
    }

    /// Contents as text. Lines that are not valid UTF-8 read as empty, so
    /// emptiness must be decided on [`is_empty`](Self::is_empty).
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == LINE_SIZE
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Prints the line with invalid UTF-8 sequences replaced by U+FFFD.
impl fmt::Display for LineBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rest = self.as_bytes();
        while !rest.is_empty() {
            match core::str::from_utf8(rest) {
                Ok(text) => return f.write_str(text),
                Err(e) => {
                    let (valid, tail) = rest.split_at(e.valid_up_to());
                    if let Ok(text) = core::str::from_utf8(valid) {
                        f.write_str(text)?;
                    }
                    f.write_char(char::REPLACEMENT_CHARACTER)?;
                    // a sequence cut at the end of the buffer has no length
                    let skip = e.error_len().unwrap_or(tail.len());
                    rest = &tail[skip..];
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for LineBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LineBuffer").field(&self.as_bytes()).finish()
    }
}
