//! Hardware-context side of the protocol.
//!
//! Pulse generation, trigger detection and HV charging belong to the
//! [`HardwareContext`] implementor. This module only owns the framing: it
//! reads one request with its payload, hands it over, and writes back the
//! result word followed by whatever data words the opcode defines.

use crate::channel::WordQueue;
use crate::console::status::StatusWord;
use crate::log_globals::HW_LOG_STREAM;
use crate::logging::timestamp_us;
use crate::protocol::{Opcode, Request, ResponseData, RETURN_FAIL, RETURN_OK};
use crate::{rt_debug, rt_warn};

/// Word pushed once a fast trigger has fired.
pub const TRIGGER_FIRED: u32 = RETURN_OK;

/// The pulser hardware, as driven from the hardware context.
pub trait HardwareContext {
    /// Execute a request. `false` answers `fail`.
    fn execute(&mut self, request: Request) -> bool;

    /// Current status bits, read right after an accepted `Status` request.
    fn status(&mut self) -> StatusWord;

    /// Block until the armed fast trigger has fired.
    fn wait_for_trigger(&mut self);
}

/// Serve exactly one request from `queue`.
///
/// Blocks until an opcode arrives. Unknown opcodes are answered with `fail`
/// and carry no payload.
pub fn serve_one<Q, H>(queue: &mut Q, hw: &mut H) -> Option<Request>
where
    Q: WordQueue + ?Sized,
    H: HardwareContext + ?Sized,
{
    let word = queue.pop_blocking();

    let Some(opcode) = Opcode::from_word(word) else {
        rt_warn!(HW_LOG_STREAM, timestamp_us(), "unknown opcode {}", word);
        queue.push_blocking(RETURN_FAIL);
        return None;
    };

    let payload = match opcode.payload_words() {
        0 => None,
        _ => Some(queue.pop_blocking()),
    };
    let request = Request::decode(opcode, payload);

    if !hw.execute(request) {
        rt_warn!(HW_LOG_STREAM, timestamp_us(), "{} failed", opcode.name());
        queue.push_blocking(RETURN_FAIL);
        return Some(request);
    }

    rt_debug!(HW_LOG_STREAM, timestamp_us(), "{} ok", opcode.name());
    queue.push_blocking(RETURN_OK);

    match opcode.response_data() {
        ResponseData::None => {}
        ResponseData::Status => {
            let status = hw.status();
            queue.push_blocking(status.bits());
        }
        ResponseData::Deferred => {
            hw.wait_for_trigger();
            rt_debug!(HW_LOG_STREAM, timestamp_us(), "trigger fired");
            queue.push_blocking(TRIGGER_FIRED);
        }
    }

    Some(request)
}

/// Serve requests forever.
pub fn serve<Q, H>(queue: &mut Q, hw: &mut H) -> !
where
    Q: WordQueue + ?Sized,
    H: HardwareContext + ?Sized,
{
    loop {
        serve_one(queue, hw);
    }
}
