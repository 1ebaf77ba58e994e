//! Module: config
//!
//! Purpose: Compile-time defaults and the session's cached pulse parameters.
//!
//! Nothing here is persisted: every console entry starts from the defaults,
//! and the operator's values live only as long as the session.

pub mod board;

pub use board::{ConsoleConfig, LoggerConfig};

use core::fmt;

use crate::protocol::f32_to_word;

/// Charge pulse width, microseconds.
pub const PULSE_TIME_US_DEFAULT: u32 = 5;

/// Charge PWM duty, fraction of full scale.
pub const PULSE_POWER_DEFAULT: f32 = 0.0122;

/// Fast-trigger delay, clock cycles.
pub const PULSE_DELAY_CYCLES_DEFAULT: u32 = 0;

/// Fast-trigger pulse width, clock cycles (5 µs at 8 ns per cycle).
pub const PULSE_TIME_CYCLES_DEFAULT: u32 = 625;

/// Parameter value as sent on the wire.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamValue {
    U32(u32),
    F32(f32),
}

impl ParamValue {
    /// Payload word for the hardware context.
    pub fn to_word(self) -> u32 {
        match self {
            ParamValue::U32(v) => v,
            ParamValue::F32(f) => f32_to_word(f),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::U32(v) => write!(f, "{}", v),
            ParamValue::F32(v) => write!(f, "{:.6}", v),
        }
    }
}

/// Value type of a pulse parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamType {
    U32,
    F32,
}

/// Selects one field of [`PulseConfig`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PulseField {
    TimeMicros,
    Power,
    DelayCycles,
    TimeCycles,
}

impl PulseField {
    pub fn param_type(self) -> ParamType {
        match self {
            PulseField::Power => ParamType::F32,
            _ => ParamType::U32,
        }
    }

    /// Compile-time default.
    pub fn default_value(self) -> ParamValue {
        match self {
            PulseField::TimeMicros => ParamValue::U32(PULSE_TIME_US_DEFAULT),
            PulseField::Power => ParamValue::F32(PULSE_POWER_DEFAULT),
            PulseField::DelayCycles => ParamValue::U32(PULSE_DELAY_CYCLES_DEFAULT),
            PulseField::TimeCycles => ParamValue::U32(PULSE_TIME_CYCLES_DEFAULT),
        }
    }
}

/// Cached pulse parameters.
///
/// Each field holds its default or the last value the operator confirmed.
/// A failed transmission does not roll the cache back, so after a `fail` the
/// cache may differ from what the hardware context actually uses.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PulseConfig {
    pub pulse_time_micros: u32,
    pub pulse_power: f32,
    pub pulse_delay_cycles: u32,
    pub pulse_time_cycles: u32,
}

impl PulseConfig {
    pub const fn new() -> Self {
        Self {
            pulse_time_micros: PULSE_TIME_US_DEFAULT,
            pulse_power: PULSE_POWER_DEFAULT,
            pulse_delay_cycles: PULSE_DELAY_CYCLES_DEFAULT,
            pulse_time_cycles: PULSE_TIME_CYCLES_DEFAULT,
        }
    }

    pub fn get(&self, field: PulseField) -> ParamValue {
        match field {
            PulseField::TimeMicros => ParamValue::U32(self.pulse_time_micros),
            PulseField::Power => ParamValue::F32(self.pulse_power),
            PulseField::DelayCycles => ParamValue::U32(self.pulse_delay_cycles),
            PulseField::TimeCycles => ParamValue::U32(self.pulse_time_cycles),
        }
    }

    /// Overwrite a field. A value of the wrong type is converted the way a
    /// C assignment would (float truncated toward zero, integer widened).
    pub fn set(&mut self, field: PulseField, value: ParamValue) {
        match field {
            PulseField::TimeMicros => self.pulse_time_micros = as_u32(value),
            PulseField::Power => self.pulse_power = as_f32(value),
            PulseField::DelayCycles => self.pulse_delay_cycles = as_u32(value),
            PulseField::TimeCycles => self.pulse_time_cycles = as_u32(value),
        }
    }
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn as_u32(value: ParamValue) -> u32 {
    match value {
        ParamValue::U32(v) => v,
        ParamValue::F32(f) => f as u32,
    }
}

fn as_f32(value: ParamValue) -> f32 {
    match value {
        ParamValue::U32(v) => v as f32,
        ParamValue::F32(f) => f,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = PulseConfig::new();
        assert_eq!(cfg.pulse_time_micros, 5);
        assert_eq!(cfg.pulse_power, 0.0122);
        assert_eq!(cfg.pulse_delay_cycles, 0);
        assert_eq!(cfg.pulse_time_cycles, 625);
        assert_eq!(cfg, PulseConfig::default());
    }

    #[test]
    fn test_get_matches_field_defaults() {
        let cfg = PulseConfig::new();
        for field in [
            PulseField::TimeMicros,
            PulseField::Power,
            PulseField::DelayCycles,
            PulseField::TimeCycles,
        ] {
            assert_eq!(cfg.get(field), field.default_value());
        }
    }

    #[test]
    fn test_set_field() {
        let mut cfg = PulseConfig::new();
        cfg.set(PulseField::DelayCycles, ParamValue::U32(125));
        cfg.set(PulseField::Power, ParamValue::F32(0.5));
        assert_eq!(cfg.pulse_delay_cycles, 125);
        assert_eq!(cfg.pulse_power, 0.5);
        assert_eq!(cfg.pulse_time_cycles, 625);
    }

    #[test]
    fn test_value_display_and_word() {
        assert_eq!(ParamValue::U32(625).to_string(), "625");
        assert_eq!(ParamValue::F32(0.0122).to_string(), "0.012200");
        assert_eq!(ParamValue::F32(0.0122).to_word(), 0.0122f32.to_bits());
        assert_eq!(ParamValue::U32(7).to_word(), 7);
    }
}
