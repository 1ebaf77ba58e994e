//! Blocking request/response channel to the hardware context.
//!
//! The channel is a thin layer over a bounded word queue shared with exactly
//! one peer. Push blocks while the queue is full, pop blocks while it is
//! empty, and neither can be cancelled: a silent peer freezes the caller.
//!
//! The channel does not track outstanding requests. Callers must drain the
//! complete response (result word plus any opcode-specific data words) before
//! sending the next request; the command dispatcher is the only caller.

use crate::console::error::RemoteError;
use crate::log_globals::CONSOLE_LOG_STREAM;
use crate::logging::timestamp_us;
use crate::protocol::{Opcode, RETURN_OK};
use crate::{rt_debug, rt_warn};

/// One endpoint of the cross-context word FIFO pair.
pub trait WordQueue {
    /// Push a word to the peer, blocking while the queue is full.
    fn push_blocking(&mut self, word: u32);

    /// Pop a word from the peer, blocking while the queue is empty.
    fn pop_blocking(&mut self) -> u32;

    /// Discard every word already queued from the peer.
    ///
    /// Returns the number of words discarded.
    fn drain(&mut self) -> usize;
}

impl<Q: WordQueue + ?Sized> WordQueue for &mut Q {
    fn push_blocking(&mut self, word: u32) {
        (**self).push_blocking(word)
    }

    fn pop_blocking(&mut self) -> u32 {
        (**self).pop_blocking()
    }

    fn drain(&mut self) -> usize {
        (**self).drain()
    }
}

/// Console side of the protocol.
pub struct Channel<Q> {
    queue: Q,
}

impl<Q: WordQueue> Channel<Q> {
    pub fn new(queue: Q) -> Self {
        Self { queue }
    }

    /// Drop stale words left over from a previous session.
    pub fn drain(&mut self) -> usize {
        self.queue.drain()
    }

    /// Send a request without payload and wait for its result word.
    pub fn send(&mut self, opcode: Opcode) -> Result<(), RemoteError> {
        rt_debug!(CONSOLE_LOG_STREAM, timestamp_us(), "tx {}", opcode.name());
        self.queue.push_blocking(opcode.as_word());
        self.result(opcode)
    }

    /// Send a request with one payload word and wait for its result word.
    pub fn send_with(&mut self, opcode: Opcode, payload: u32) -> Result<(), RemoteError> {
        rt_debug!(
            CONSOLE_LOG_STREAM,
            timestamp_us(),
            "tx {} 0x{:08x}",
            opcode.name(),
            payload
        );
        self.queue.push_blocking(opcode.as_word());
        self.queue.push_blocking(payload);
        self.result(opcode)
    }

    /// Pop one opcode-specific data word following an `ok` result.
    pub fn receive(&mut self) -> u32 {
        let word = self.queue.pop_blocking();
        rt_debug!(CONSOLE_LOG_STREAM, timestamp_us(), "rx data 0x{:08x}", word);
        word
    }

    pub fn queue(&self) -> &Q {
        &self.queue
    }

    pub fn queue_mut(&mut self) -> &mut Q {
        &mut self.queue
    }

    /// Give back the underlying queue.
    pub fn into_inner(self) -> Q {
        self.queue
    }

    fn result(&mut self, opcode: Opcode) -> Result<(), RemoteError> {
        let code = self.queue.pop_blocking();
        if code == RETURN_OK {
            rt_debug!(CONSOLE_LOG_STREAM, timestamp_us(), "rx {} ok", opcode.name());
            Ok(())
        } else {
            rt_warn!(
                CONSOLE_LOG_STREAM,
                timestamp_us(),
                "rx {} failed (code {})",
                opcode.name(),
                code
            );
            Err(RemoteError { opcode, code })
        }
    }
}
