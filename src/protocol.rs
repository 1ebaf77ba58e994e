//! Console ↔ hardware-context wire protocol.
//!
//! Every exchange is a sequence of 32-bit words on the cross-core FIFO pair:
//!
//! ```text
//! console ──▶ [opcode] [payload?]            ──▶ hardware context
//! console ◀── [result] [status | trigger]?   ◀── hardware context
//! ```
//!
//! The protocol is opcode-indexed, not self-describing: the number of payload
//! words and of extra response words is fixed per opcode. There are no
//! correlation IDs, so only one request may be in flight at a time.

/// Result word: request accepted and executed.
pub const RETURN_OK: u32 = 0;

/// Result word: request failed. Any word other than [`RETURN_OK`] is a failure.
pub const RETURN_FAIL: u32 = 1;

/// Request opcodes understood by the hardware context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum Opcode {
    Arm = 0,
    Disarm = 1,
    Pulse = 2,
    Status = 3,
    EnableTimeout = 4,
    DisableTimeout = 5,
    FastTrigger = 6,
    ConfigPulseTime = 7,
    ConfigPulsePower = 8,
    InternalHvp = 9,
    ExternalHvp = 10,
    ConfigPulseDelayCycles = 11,
    ConfigPulseTimeCycles = 12,
    Gp1Toggle = 13,
    Gp1Low = 14,
    Gp1High = 15,
}

/// Extra words that follow an `ok` result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponseData {
    /// Result word only.
    None,
    /// One status bitmask word.
    Status,
    /// One word sent later, once the external trigger has fired.
    Deferred,
}

impl Opcode {
    /// All opcodes, in wire order.
    pub const ALL: [Opcode; 16] = [
        Opcode::Arm,
        Opcode::Disarm,
        Opcode::Pulse,
        Opcode::Status,
        Opcode::EnableTimeout,
        Opcode::DisableTimeout,
        Opcode::FastTrigger,
        Opcode::ConfigPulseTime,
        Opcode::ConfigPulsePower,
        Opcode::InternalHvp,
        Opcode::ExternalHvp,
        Opcode::ConfigPulseDelayCycles,
        Opcode::ConfigPulseTimeCycles,
        Opcode::Gp1Toggle,
        Opcode::Gp1Low,
        Opcode::Gp1High,
    ];

    /// Decode a raw word. Returns `None` for words outside the opcode table.
    pub fn from_word(word: u32) -> Option<Self> {
        Self::ALL.get(word as usize).copied()
    }

    #[inline]
    pub fn as_word(self) -> u32 {
        self as u32
    }

    /// Number of payload words following the opcode.
    pub fn payload_words(self) -> usize {
        match self {
            Opcode::ConfigPulseTime
            | Opcode::ConfigPulsePower
            | Opcode::ConfigPulseDelayCycles
            | Opcode::ConfigPulseTimeCycles => 1,
            _ => 0,
        }
    }

    /// Extra response words following an `ok` result.
    pub fn response_data(self) -> ResponseData {
        match self {
            Opcode::Status => ResponseData::Status,
            Opcode::FastTrigger => ResponseData::Deferred,
            _ => ResponseData::None,
        }
    }

    /// Short name for logs.
    pub fn name(self) -> &'static str {
        match self {
            Opcode::Arm => "arm",
            Opcode::Disarm => "disarm",
            Opcode::Pulse => "pulse",
            Opcode::Status => "status",
            Opcode::EnableTimeout => "enable_timeout",
            Opcode::DisableTimeout => "disable_timeout",
            Opcode::FastTrigger => "fast_trigger",
            Opcode::ConfigPulseTime => "config_pulse_time",
            Opcode::ConfigPulsePower => "config_pulse_power",
            Opcode::InternalHvp => "internal_hvp",
            Opcode::ExternalHvp => "external_hvp",
            Opcode::ConfigPulseDelayCycles => "config_pulse_delay_cycles",
            Opcode::ConfigPulseTimeCycles => "config_pulse_time_cycles",
            Opcode::Gp1Toggle => "gp1_toggle",
            Opcode::Gp1Low => "gp1_low",
            Opcode::Gp1High => "gp1_high",
        }
    }
}

/// A decoded request, as seen by the hardware context.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Request {
    Arm,
    Disarm,
    Pulse,
    Status,
    EnableTimeout,
    DisableTimeout,
    FastTrigger,
    /// Charge pulse width in microseconds.
    ConfigPulseTime(u32),
    /// Charge PWM duty as a fraction.
    ConfigPulsePower(f32),
    InternalHvp,
    ExternalHvp,
    /// Fast-trigger delay in clock cycles.
    ConfigPulseDelayCycles(u32),
    /// Fast-trigger pulse width in clock cycles.
    ConfigPulseTimeCycles(u32),
    Gp1Toggle,
    Gp1Low,
    Gp1High,
}

impl Request {
    /// Build a request from its opcode and optional payload word.
    ///
    /// The payload is ignored for opcodes that carry none; a missing payload
    /// for an opcode that requires one reads as zero.
    pub fn decode(opcode: Opcode, payload: Option<u32>) -> Self {
        let word = payload.unwrap_or(0);
        match opcode {
            Opcode::Arm => Request::Arm,
            Opcode::Disarm => Request::Disarm,
            Opcode::Pulse => Request::Pulse,
            Opcode::Status => Request::Status,
            Opcode::EnableTimeout => Request::EnableTimeout,
            Opcode::DisableTimeout => Request::DisableTimeout,
            Opcode::FastTrigger => Request::FastTrigger,
            Opcode::ConfigPulseTime => Request::ConfigPulseTime(word),
            Opcode::ConfigPulsePower => Request::ConfigPulsePower(word_to_f32(word)),
            Opcode::InternalHvp => Request::InternalHvp,
            Opcode::ExternalHvp => Request::ExternalHvp,
            Opcode::ConfigPulseDelayCycles => Request::ConfigPulseDelayCycles(word),
            Opcode::ConfigPulseTimeCycles => Request::ConfigPulseTimeCycles(word),
            Opcode::Gp1Toggle => Request::Gp1Toggle,
            Opcode::Gp1Low => Request::Gp1Low,
            Opcode::Gp1High => Request::Gp1High,
        }
    }

    pub fn opcode(&self) -> Opcode {
        match self {
            Request::Arm => Opcode::Arm,
            Request::Disarm => Opcode::Disarm,
            Request::Pulse => Opcode::Pulse,
            Request::Status => Opcode::Status,
            Request::EnableTimeout => Opcode::EnableTimeout,
            Request::DisableTimeout => Opcode::DisableTimeout,
            Request::FastTrigger => Opcode::FastTrigger,
            Request::ConfigPulseTime(_) => Opcode::ConfigPulseTime,
            Request::ConfigPulsePower(_) => Opcode::ConfigPulsePower,
            Request::InternalHvp => Opcode::InternalHvp,
            Request::ExternalHvp => Opcode::ExternalHvp,
            Request::ConfigPulseDelayCycles(_) => Opcode::ConfigPulseDelayCycles,
            Request::ConfigPulseTimeCycles(_) => Opcode::ConfigPulseTimeCycles,
            Request::Gp1Toggle => Opcode::Gp1Toggle,
            Request::Gp1Low => Opcode::Gp1Low,
            Request::Gp1High => Opcode::Gp1High,
        }
    }

    /// Payload word, if the opcode carries one.
    pub fn payload(&self) -> Option<u32> {
        match *self {
            Request::ConfigPulseTime(v)
            | Request::ConfigPulseDelayCycles(v)
            | Request::ConfigPulseTimeCycles(v) => Some(v),
            Request::ConfigPulsePower(f) => Some(f32_to_word(f)),
            _ => None,
        }
    }
}

/// IEEE-754 single-precision bit pattern of `value`.
#[inline]
pub fn f32_to_word(value: f32) -> u32 {
    value.to_bits()
}

/// Inverse of [`f32_to_word`].
#[inline]
pub fn word_to_f32(word: u32) -> f32 {
    f32::from_bits(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_word_mapping() {
        for (i, op) in Opcode::ALL.iter().enumerate() {
            assert_eq!(op.as_word(), i as u32);
            assert_eq!(Opcode::from_word(i as u32), Some(*op));
        }
        assert_eq!(Opcode::from_word(16), None);
        assert_eq!(Opcode::from_word(u32::MAX), None);
    }

    #[test]
    fn test_payload_arity() {
        let with_payload: Vec<_> = Opcode::ALL
            .iter()
            .filter(|op| op.payload_words() == 1)
            .copied()
            .collect();
        assert_eq!(
            with_payload,
            [
                Opcode::ConfigPulseTime,
                Opcode::ConfigPulsePower,
                Opcode::ConfigPulseDelayCycles,
                Opcode::ConfigPulseTimeCycles,
            ]
        );
    }

    #[test]
    fn test_response_data() {
        assert_eq!(Opcode::Status.response_data(), ResponseData::Status);
        assert_eq!(Opcode::FastTrigger.response_data(), ResponseData::Deferred);
        assert_eq!(Opcode::Pulse.response_data(), ResponseData::None);
    }

    #[test]
    fn test_power_bits() {
        let word = f32_to_word(0.0122);
        assert_eq!(word, 0.0122f32.to_bits());
        assert_eq!(word_to_f32(word), 0.0122f32);
    }

    #[test]
    fn test_request_decode_power() {
        let req = Request::decode(Opcode::ConfigPulsePower, Some(f32_to_word(0.5)));
        assert_eq!(req, Request::ConfigPulsePower(0.5));
        assert_eq!(req.payload(), Some(0.5f32.to_bits()));
        assert_eq!(req.opcode(), Opcode::ConfigPulsePower);
    }

    #[test]
    fn test_request_decode_ignores_payload() {
        assert_eq!(Request::decode(Opcode::Arm, Some(7)), Request::Arm);
        assert_eq!(Request::Arm.payload(), None);
    }
}
