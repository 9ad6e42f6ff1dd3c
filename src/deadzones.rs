use color_eyre::eyre::{OptionExt, Result};
use gilrs::{Axis, Gamepad, GamepadId, Gilrs};

use crate::math_ops::Vector;

fn axis_deadzone(gamepad: &Gamepad, axis: Axis) -> Result<f32> {
    gamepad
        .deadzone(gamepad.axis_code(axis).ok_or_eyre("No such axis")?)
        .ok_or_eyre("Can't get a deadzone")
}

fn stick_deadzone(gamepad: &Gamepad, x_axis: Axis, y_axis: Axis) -> Result<Vector> {
    Ok(Vector::new(
        axis_deadzone(gamepad, x_axis)?,
        axis_deadzone(gamepad, y_axis)?,
    ))
}

/// Prints the driver-reported deadzones of both sticks so drift
/// numbers can be read against what the driver already filters out.
pub fn print_deadzones(gilrs: &Gilrs, id: GamepadId) -> Result<()> {
    let gamepad = gilrs
        .connected_gamepad(id)
        .ok_or_eyre("Couldn't get Gamepad by id")?;

    let left = stick_deadzone(&gamepad, Axis::LeftStickX, Axis::LeftStickY)?;
    println!("Left stick deadzones: ({}, {})", left.x, left.y);

    let right = stick_deadzone(&gamepad, Axis::RightStickX, Axis::RightStickY)?;
    println!("Right stick deadzones: ({}, {})", right.x, right.y);
    Ok(())
}
