//! Scripted doubles shared by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::fmt;
use std::sync::mpsc::{sync_channel, Receiver, SyncSender};

use rust_emp_console::console::{Ports, SerialIo, SessionState, StatusWord, SystemControl};
use rust_emp_console::protocol::{Request, RETURN_FAIL, RETURN_OK};
use rust_emp_console::{HardwareContext, WordQueue};

pub const OK: u32 = RETURN_OK;
pub const FAIL: u32 = RETURN_FAIL;

/// Serial link fed from a fixed input; everything written is captured.
///
/// `raw` holds the exact bytes sent, echo included. `output` is the same
/// stream as text, with echoed non-ASCII bytes shown as U+FFFD.
pub struct ScriptedSerial {
    input: VecDeque<u8>,
    pub output: String,
    pub raw: Vec<u8>,
}

impl ScriptedSerial {
    pub fn new(input: &str) -> Self {
        Self::from_bytes(input.as_bytes())
    }

    pub fn from_bytes(input: &[u8]) -> Self {
        Self {
            input: input.iter().copied().collect(),
            output: String::new(),
            raw: Vec::new(),
        }
    }

    /// Input bytes not read yet.
    pub fn remaining(&self) -> usize {
        self.input.len()
    }

    pub fn take_output(&mut self) -> String {
        self.raw.clear();
        std::mem::take(&mut self.output)
    }
}

impl fmt::Write for ScriptedSerial {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.output.push_str(s);
        self.raw.extend_from_slice(s.as_bytes());
        Ok(())
    }
}

impl SerialIo for ScriptedSerial {
    fn read_byte(&mut self) -> Option<u8> {
        self.input.pop_front()
    }

    fn echo(&mut self, byte: u8) {
        self.raw.push(byte);
        self.output.push(if byte.is_ascii() {
            char::from(byte)
        } else {
            char::REPLACEMENT_CHARACTER
        });
    }
}

/// Queue endpoint that records pushes and answers pops from a script.
///
/// Popping past the end of the script panics: the real queue would block
/// forever.
#[derive(Default)]
pub struct ScriptedQueue {
    pub pushed: Vec<u32>,
    replies: VecDeque<u32>,
}

impl ScriptedQueue {
    pub fn with_replies(replies: &[u32]) -> Self {
        Self {
            pushed: Vec::new(),
            replies: replies.iter().copied().collect(),
        }
    }

    pub fn reply(&mut self, words: &[u32]) {
        self.replies.extend(words);
    }

    pub fn unread(&self) -> usize {
        self.replies.len()
    }
}

impl WordQueue for ScriptedQueue {
    fn push_blocking(&mut self, word: u32) {
        self.pushed.push(word);
    }

    fn pop_blocking(&mut self) -> u32 {
        self.replies
            .pop_front()
            .expect("pop on empty queue: peer never answered")
    }

    fn drain(&mut self) -> usize {
        let n = self.replies.len();
        self.replies.clear();
        n
    }
}

/// Reset control whose halt unwinds instead of spinning.
#[derive(Default)]
pub struct MockSystem {
    pub watchdog_armed: bool,
}

pub const HALT_MESSAGE: &str = "halted waiting for watchdog";

impl SystemControl for MockSystem {
    fn arm_watchdog(&mut self) {
        self.watchdog_armed = true;
    }

    fn halt(&mut self) -> ! {
        panic!("{}", HALT_MESSAGE);
    }
}

pub type TestPorts = Ports<ScriptedSerial, ScriptedQueue, MockSystem>;

/// Ports with the given operator input and hardware replies.
pub fn ports(input: &str, replies: &[u32]) -> TestPorts {
    Ports::new(
        ScriptedSerial::new(input),
        ScriptedQueue::with_replies(replies),
        MockSystem::default(),
    )
}

pub fn session() -> SessionState {
    SessionState::new()
}

/// Words the console pushed so far.
pub fn pushed(ports: &TestPorts) -> &[u32] {
    &ports.channel.queue().pushed
}

/// One end of a bounded std FIFO pair.
pub struct StdFifo {
    tx: SyncSender<u32>,
    rx: Receiver<u32>,
}

/// `(console_end, hardware_end)`
pub fn fifo_pair(depth: usize) -> (StdFifo, StdFifo) {
    let (to_hw_tx, to_hw_rx) = sync_channel(depth);
    let (from_hw_tx, from_hw_rx) = sync_channel(depth);
    (
        StdFifo { tx: to_hw_tx, rx: from_hw_rx },
        StdFifo { tx: from_hw_tx, rx: to_hw_rx },
    )
}

impl WordQueue for StdFifo {
    fn push_blocking(&mut self, word: u32) {
        self.tx.send(word).expect("peer dropped");
    }

    fn pop_blocking(&mut self) -> u32 {
        self.rx.recv().expect("peer dropped")
    }

    fn drain(&mut self) -> usize {
        self.rx.try_iter().count()
    }
}

/// Hardware double that records every request it is handed.
#[derive(Default)]
pub struct RecordingBoard {
    pub requests: Vec<Request>,
    /// Requests answered with `fail`.
    pub reject: Vec<Request>,
    pub status: u32,
    pub triggers: usize,
}

impl HardwareContext for RecordingBoard {
    fn execute(&mut self, request: Request) -> bool {
        self.requests.push(request);
        !self.reject.contains(&request)
    }

    fn status(&mut self) -> StatusWord {
        StatusWord::from_bits_truncate(self.status)
    }

    fn wait_for_trigger(&mut self) {
        self.triggers += 1;
    }
}
