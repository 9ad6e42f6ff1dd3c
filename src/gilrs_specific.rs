use std::thread::sleep;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use gilrs::EventType::{ButtonPressed, Disconnected};
use gilrs::{Axis, Button, Event, Gamepad, GamepadId, Gilrs};
use log::debug;

use crate::configs::Configs;
use crate::deadzones::print_deadzones;
use crate::diagnostics::{ButtonSnapshot, DiagnosticSession};
use crate::drift::{DriftDetector, StickSide};
use crate::exec_or_eyre;
use crate::match_event::{BUTTON_COUNT, STANDARD_BUTTONS, button_index, button_label, print_event};
use crate::math_ops::{StickZone, Vector};
use crate::report::{
    DiagnosticReport, button_explanation, drift_explanation, trigger_explanation,
};

fn init_gilrs() -> Result<Gilrs> {
    exec_or_eyre!(Gilrs::new())
}

fn axis_value(gamepad: &Gamepad, axis: Axis) -> f32 {
    // Missing axis data reads as centered, never as an error.
    gamepad.axis_data(axis).map_or(0.0, |data| data.value())
}

fn stick_position(gamepad: &Gamepad, x_axis: Axis, y_axis: Axis) -> Vector {
    Vector::new(axis_value(gamepad, x_axis), axis_value(gamepad, y_axis))
}

fn trigger_value(gamepad: &Gamepad, button: Button) -> f32 {
    gamepad.button_data(button).map_or(0.0, |data| data.value())
}

fn buttons_snapshot(gamepad: &Gamepad) -> [ButtonSnapshot; BUTTON_COUNT] {
    std::array::from_fn(|index| {
        gamepad
            .button_data(STANDARD_BUTTONS[index])
            .map_or(ButtonSnapshot::default(), |data| ButtonSnapshot {
                pressed: data.is_pressed(),
                value: data.value(),
            })
    })
}

fn print_report(report: &DiagnosticReport, detector: &DriftDetector, session: &DiagnosticSession) {
    println!();
    println!(
        "Drift:    {} - {}",
        report.drift,
        drift_explanation(report.drift)
    );
    for side in [StickSide::Left, StickSide::Right] {
        let position = detector.position(side);
        println!(
            "  {side} stick: {} [{}] - {}",
            position,
            StickZone::from_magnitude(position.magnitude()),
            detector.state(side),
        );
    }

    println!(
        "Buttons:  {} - {}",
        report.buttons,
        button_explanation(report.buttons, session.total_presses())
    );
    for &index in session.stuck_buttons() {
        println!("  Button {index} ({}) appears stuck", button_label(index));
    }

    println!(
        "Triggers: {} - {} (max pull: {:.0}%)",
        report.triggers,
        trigger_explanation(report.triggers),
        session.max_trigger() * 100.0
    );
    println!("Overall:  {}", report.overall());
}

fn watch_gamepad(
    gilrs: &mut Gilrs,
    id: GamepadId,
    detector: &mut DriftDetector,
    session: &mut DiagnosticSession,
    configs: &Configs,
) -> Result<()> {
    let tick_interval = Duration::from_millis(configs.tick_interval_ms);
    let mut last_report: Option<DiagnosticReport> = None;

    loop {
        while let Some(Event { id: event_id, event, .. }) = gilrs.next_event() {
            debug!("{}", print_event(&event)?);

            if event_id != id {
                continue;
            }
            match event {
                ButtonPressed(button, _) => {
                    if let Some(index) = button_index(&button) {
                        session.record_press(index);
                    }
                }
                Disconnected => {
                    // Stale counters and deadlines must not leak into the
                    // next connection session.
                    detector.reset();
                    session.reset();
                    println!("Gamepad disconnected");
                    return Ok(());
                }
                _ => {}
            }
        }

        if let Some(gamepad) = gilrs.connected_gamepad(id) {
            let now = Instant::now();
            detector.sample(
                StickSide::Left,
                stick_position(&gamepad, Axis::LeftStickX, Axis::LeftStickY),
                now,
            );
            detector.sample(
                StickSide::Right,
                stick_position(&gamepad, Axis::RightStickX, Axis::RightStickY),
                now,
            );

            session.observe_buttons(&buttons_snapshot(&gamepad));
            session.observe_triggers(
                trigger_value(&gamepad, Button::LeftTrigger2),
                trigger_value(&gamepad, Button::RightTrigger2),
            );

            let report = DiagnosticReport::capture(detector, session);
            if last_report != Some(report) {
                print_report(&report, detector, session);
                last_report = Some(report);
            }
        }

        sleep(tick_interval);
    }
}

pub fn run_monitor_loop(configs: Configs) -> Result<()> {
    let mut detector = DriftDetector::new();
    let mut session = DiagnosticSession::new();

    let mut wait_msg_is_printed = false;
    loop {
        let mut gilrs = init_gilrs()?;
        for (id, gamepad) in gilrs.gamepads() {
            println!(
                "id {}: {} is {:?}",
                id,
                gamepad.name(),
                gamepad.power_info()
            );
        }

        let connected: Vec<GamepadId> = gilrs.gamepads().map(|(id, _)| id).collect();
        match connected.as_slice() {
            [] => {
                if !wait_msg_is_printed {
                    wait_msg_is_printed = true;
                    println!("Gamepad is not connected. Waiting...");
                }
            }
            [id] => {
                wait_msg_is_printed = false;
                let id = *id;

                print_deadzones(&gilrs, id)?;
                detector.reset();
                session.reset();

                watch_gamepad(&mut gilrs, id, &mut detector, &mut session, &configs)?;
            }
            _ => {
                println!("Only one gamepad is supported. Disconnect other gamepads");
            }
        }
        sleep(Duration::from_millis(configs.reconnect_interval_ms));
    }
}
