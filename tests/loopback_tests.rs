//! Console and hardware context talking over a real FIFO pair

mod common;

use std::thread;

use common::{fifo_pair, session, MockSystem, RecordingBoard, ScriptedSerial};
use rust_emp_console::console::{dispatch, Ports};
use rust_emp_console::hardware::serve_one;
use rust_emp_console::protocol::Request;

/// Run `lines` through the dispatcher while a hardware thread serves
/// `requests` requests. Returns console output and what the board saw.
fn run(lines: &[&str], input: &str, board: RecordingBoard, requests: usize) -> (String, RecordingBoard) {
    let (console_end, mut hw_end) = fifo_pair(8);

    let hw = thread::spawn(move || {
        let mut board = board;
        for _ in 0..requests {
            serve_one(&mut hw_end, &mut board);
        }
        board
    });

    let mut ports = Ports::new(ScriptedSerial::new(input), console_end, MockSystem::default());
    let mut s = session();
    for line in lines {
        dispatch(line, &mut s, &mut ports);
    }

    let board = hw.join().expect("hardware thread panicked");
    (ports.serial.output, board)
}

#[test]
fn test_arm_then_status() {
    let board = RecordingBoard {
        status: 0b0111,
        ..Default::default()
    };
    let (out, board) = run(&["arm", "s"], "", board, 2);

    assert_eq!(board.requests, [Request::Arm, Request::Status]);
    assert_eq!(
        out,
        "Device armed!\nStatus:\n- Armed\n- Charged\n- Timeout active\n- HVP external\n"
    );
}

#[test]
fn test_rejected_arm() {
    let board = RecordingBoard {
        reject: vec![Request::Arm],
        ..Default::default()
    };
    let (out, _) = run(&["a"], "", board, 1);

    assert_eq!(out, "Arming failed!\n");
}

#[test]
fn test_charge_flow_reaches_hardware() {
    let (out, board) = run(&["c"], "20\r0.5\r", RecordingBoard::default(), 2);

    assert_eq!(
        board.requests,
        [Request::ConfigPulseTime(20), Request::ConfigPulsePower(0.5)]
    );
    assert!(out.ends_with("pulse_time=20, pulse_power=0.500000\n"));
}

#[test]
fn test_fast_trigger_round_trip() {
    let (out, board) = run(&["f"], "", RecordingBoard::default(), 1);

    assert_eq!(board.triggers, 1);
    assert_eq!(out, "Fast trigger active...\nTriggered!\n");
}

#[test]
fn test_gpio_commands_are_silent_on_success() {
    let (out, board) = run(&["gl", "gh", "gt"], "", RecordingBoard::default(), 3);

    assert_eq!(board.requests, [Request::Gp1Low, Request::Gp1High, Request::Gp1Toggle]);
    assert!(out.is_empty());
}
