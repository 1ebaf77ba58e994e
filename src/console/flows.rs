//! Interactive multi-parameter configuration.
//!
//! Every flow first collects all of its parameters, then transmits each one
//! as its own `(opcode, value)` request. An empty answer keeps the cached
//! value. A `fail` result is reported and the remaining parameters are still
//! sent; the cache is never rolled back.

use core::fmt::Write;

use super::console::Ports;
use super::io::{SerialIo, SystemControl};
use super::line_buffer::LineBuffer;
use super::numeric::{parse_f32_lenient, parse_u32_lenient};
use super::reader::read_line;
use super::session::SessionState;
use crate::channel::WordQueue;
use crate::config::{ParamType, ParamValue, PulseField};
use crate::log_globals::CONSOLE_LOG_STREAM;
use crate::logging::timestamp_us;
use crate::protocol::Opcode;
use crate::rt_info;

/// One prompted parameter.
#[derive(Debug)]
pub struct FlowParam {
    /// Name used in prompts and the summary line.
    pub name: &'static str,
    /// Shorter name used by the verbose help screen.
    pub help_name: &'static str,
    pub field: PulseField,
    pub opcode: Opcode,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Pin-triggered pulse delay and width, in clock cycles.
    FastTrigger,
    /// HV charge pulse width (µs) and PWM power.
    Charge,
}

static FAST_TRIGGER_PARAMS: [FlowParam; 2] = [
    FlowParam {
        name: "pulse_delay_cycles",
        help_name: "delay_cycles",
        field: PulseField::DelayCycles,
        opcode: Opcode::ConfigPulseDelayCycles,
    },
    FlowParam {
        name: "pulse_time_cycles",
        help_name: "time_cycles",
        field: PulseField::TimeCycles,
        opcode: Opcode::ConfigPulseTimeCycles,
    },
];

static CHARGE_PARAMS: [FlowParam; 2] = [
    FlowParam {
        name: "pulse_time",
        help_name: "pulse_time",
        field: PulseField::TimeMicros,
        opcode: Opcode::ConfigPulseTime,
    },
    FlowParam {
        name: "pulse_power",
        help_name: "pulse_power",
        field: PulseField::Power,
        opcode: Opcode::ConfigPulsePower,
    },
];

const FAST_TRIGGER_PREAMBLE: &str = concat!(
    " Configure in cycles\n",
    "  1 cycle = 8ns (At 125MHz Clock)\n",
    "  1us = 125 cycles\n",
    "  1ms = 125000 cycles\n",
    "  max = MAX_UINT32 = 4294967295 cycles = 34359ms\n",
);

impl Flow {
    /// Parameters in prompt and transmit order.
    pub fn params(self) -> &'static [FlowParam] {
        match self {
            Flow::FastTrigger => &FAST_TRIGGER_PARAMS,
            Flow::Charge => &CHARGE_PARAMS,
        }
    }

    fn preamble(self) -> &'static str {
        match self {
            Flow::FastTrigger => FAST_TRIGGER_PREAMBLE,
            Flow::Charge => "",
        }
    }
}

/// Run `flow` to completion: prompt, cache, transmit, summarize.
pub fn run<S, Q, W>(flow: Flow, session: &mut SessionState, ports: &mut Ports<S, Q, W>)
where
    S: SerialIo,
    Q: WordQueue,
    W: SystemControl,
{
    let _ = ports.serial.write_str(flow.preamble());

    let mut answer = LineBuffer::new();
    for param in flow.params() {
        let _ = write!(
            ports.serial,
            " {} (current: {}, default: {})?\n> ",
            param.name,
            session.pulse.get(param.field),
            param.field.default_value()
        );
        read_line(&mut ports.serial, &mut answer);
        let _ = writeln!(ports.serial);

        if answer.is_empty() {
            let _ = writeln!(ports.serial, "Using default");
        } else {
            let value = parse_value(param.field.param_type(), answer.as_str());
            session.pulse.set(param.field, value);
            rt_info!(CONSOLE_LOG_STREAM, timestamp_us(), "{}={}", param.name, value);
        }
    }

    for param in flow.params() {
        let word = session.pulse.get(param.field).to_word();
        if ports.channel.send_with(param.opcode, word).is_err() {
            let _ = writeln!(ports.serial, "Config {} failed.", param.name);
        }
    }

    for (i, param) in flow.params().iter().enumerate() {
        let sep = if i == 0 { "" } else { ", " };
        let _ = write!(ports.serial, "{}{}={}", sep, param.name, session.pulse.get(param.field));
    }
    let _ = writeln!(ports.serial);
}

fn parse_value(ty: ParamType, text: &str) -> ParamValue {
    match ty {
        ParamType::U32 => ParamValue::U32(parse_u32_lenient(text)),
        ParamType::F32 => ParamValue::F32(parse_f32_lenient(text)),
    }
}
