//! Configuration flow tests

mod common;

use common::{ports, pushed, session, FAIL, OK};
use rust_emp_console::config::PulseConfig;
use rust_emp_console::console::dispatch;
use rust_emp_console::protocol::Opcode;

const TIME: u32 = Opcode::ConfigPulseTime as u32;
const POWER: u32 = Opcode::ConfigPulsePower as u32;
const DELAY_CYCLES: u32 = Opcode::ConfigPulseDelayCycles as u32;
const TIME_CYCLES: u32 = Opcode::ConfigPulseTimeCycles as u32;

#[test]
fn test_charge_flow_defaults_on_empty_answers() {
    let mut s = session();
    let mut p = ports("\r\r", &[OK, OK]);

    assert!(dispatch("c", &mut s, &mut p));

    assert_eq!(pushed(&p), [TIME, 5, POWER, 0.0122f32.to_bits()]);
    assert_eq!(s.pulse, PulseConfig::new());

    let out = &p.serial.output;
    assert!(out.contains(" pulse_time (current: 5, default: 5)?\n> "));
    assert!(out.contains(" pulse_power (current: 0.012200, default: 0.012200)?\n> "));
    assert_eq!(out.matches("Using default\n").count(), 2);
    assert!(out.ends_with("pulse_time=5, pulse_power=0.012200\n"));
}

#[test]
fn test_fast_trigger_flow_sets_and_sends_values() {
    let mut s = session();
    let mut p = ports("125\r250\r", &[OK, OK]);

    assert!(dispatch("fast_trigger_configure", &mut s, &mut p));

    assert_eq!(pushed(&p), [DELAY_CYCLES, 125, TIME_CYCLES, 250]);
    assert_eq!(s.pulse.pulse_delay_cycles, 125);
    assert_eq!(s.pulse.pulse_time_cycles, 250);

    let out = &p.serial.output;
    assert!(out.starts_with(" Configure in cycles\n  1 cycle = 8ns (At 125MHz Clock)\n"));
    assert!(out.contains(" pulse_delay_cycles (current: 0, default: 0)?\n> 125\r\n"));
    assert!(out.contains(" pulse_time_cycles (current: 625, default: 625)?\n> 250\r\n"));
    assert!(!out.contains("Using default"));
    assert!(out.ends_with("pulse_delay_cycles=125, pulse_time_cycles=250\n"));
}

#[test]
fn test_empty_answer_keeps_previous_user_value() {
    let mut s = session();
    let mut p = ports("9\r0.5\r\r\r", &[OK, OK, OK, OK]);

    dispatch("c", &mut s, &mut p);
    p.serial.take_output();
    dispatch("c", &mut s, &mut p);

    assert_eq!(s.pulse.pulse_time_micros, 9);
    assert_eq!(s.pulse.pulse_power, 0.5);
    // second run transmits the cached values, not the defaults
    assert_eq!(&pushed(&p)[4..], [TIME, 9, POWER, 0.5f32.to_bits()]);
    assert!(p.serial.output.contains("(current: 9, default: 5)"));
    assert!(p.serial.output.contains("(current: 0.500000, default: 0.012200)"));
}

#[test]
fn test_failure_does_not_abort_or_roll_back() {
    let mut s = session();
    let mut p = ports("10\r20\r", &[FAIL, OK]);

    assert!(dispatch("fa", &mut s, &mut p));

    assert_eq!(pushed(&p), [DELAY_CYCLES, 10, TIME_CYCLES, 20]);
    assert_eq!(s.pulse.pulse_delay_cycles, 10);
    assert!(p.serial.output.contains("Config pulse_delay_cycles failed.\n"));
    assert!(!p.serial.output.contains("Config pulse_time_cycles failed."));
}

#[test]
fn test_unparsable_input_degrades_to_zero() {
    let mut s = session();
    let mut p = ports("abc\rpower\r", &[OK, OK]);

    dispatch("configure", &mut s, &mut p);

    assert_eq!(s.pulse.pulse_time_micros, 0);
    assert_eq!(s.pulse.pulse_power, 0.0);
    assert_eq!(pushed(&p), [TIME, 0, POWER, 0.0f32.to_bits()]);
}

#[test]
fn test_numeric_prefix_is_used() {
    let mut s = session();
    let mut p = ports("12us\r0.25x\r", &[OK, OK]);

    dispatch("c", &mut s, &mut p);

    assert_eq!(s.pulse.pulse_time_micros, 12);
    assert_eq!(s.pulse.pulse_power, 0.25);
}

#[test]
fn test_flow_repeat_prompts_again() {
    let mut s = session();
    let mut p = ports("1\r2\r\r\r", &[OK, OK, OK, OK]);

    dispatch("fa", &mut s, &mut p);
    dispatch("", &mut s, &mut p);

    assert_eq!(
        pushed(&p),
        [DELAY_CYCLES, 1, TIME_CYCLES, 2, DELAY_CYCLES, 1, TIME_CYCLES, 2]
    );
    assert_eq!(s.last_command.as_str(), "fa");
}

#[test]
fn test_flow_answers_are_not_commands() {
    let mut s = session();
    let mut p = ports("arm\r\r", &[OK, OK]);

    dispatch("c", &mut s, &mut p);

    assert_eq!(s.last_command.as_str(), "c");
    assert_eq!(s.pulse.pulse_time_micros, 0);
}
