use color_eyre::eyre::{Result, bail};
use gilrs::ev::Code;
use gilrs::{Axis, Button, EventType, EventType::*};
use regex::Regex;

use crate::exec_or_eyre;

/// Standard-layout slot count (buttons 0-15 plus the guide button).
pub const BUTTON_COUNT: usize = 17;

/// Standard-layout buttons in slot order, used when polling per-button
/// state each tick.
pub const STANDARD_BUTTONS: [Button; BUTTON_COUNT] = [
    Button::South,
    Button::East,
    Button::West,
    Button::North,
    Button::LeftTrigger,
    Button::RightTrigger,
    Button::LeftTrigger2,
    Button::RightTrigger2,
    Button::Select,
    Button::Start,
    Button::LeftThumb,
    Button::RightThumb,
    Button::DPadUp,
    Button::DPadDown,
    Button::DPadLeft,
    Button::DPadRight,
    Button::Mode,
];

/// Standard-layout slot of a button; `None` for buttons outside the
/// standard mapping (C, Z, Unknown).
pub fn button_index(button: &Button) -> Option<usize> {
    match button {
        Button::South => Some(0),
        Button::East => Some(1),
        Button::West => Some(2),
        Button::North => Some(3),
        Button::LeftTrigger => Some(4),
        Button::RightTrigger => Some(5),
        Button::LeftTrigger2 => Some(6),
        Button::RightTrigger2 => Some(7),
        Button::Select => Some(8),
        Button::Start => Some(9),
        Button::LeftThumb => Some(10),
        Button::RightThumb => Some(11),
        Button::DPadUp => Some(12),
        Button::DPadDown => Some(13),
        Button::DPadLeft => Some(14),
        Button::DPadRight => Some(15),
        Button::Mode => Some(16),
        Button::C | Button::Z | Button::Unknown => None,
    }
}

pub fn button_label(index: usize) -> &'static str {
    match index {
        0 => "A / Cross",
        1 => "B / Circle",
        2 => "X / Square",
        3 => "Y / Triangle",
        4 => "LB / L1",
        5 => "RB / R1",
        6 => "LT / L2",
        7 => "RT / R2",
        8 => "Back / Select",
        9 => "Start / Options",
        10 => "LS",
        11 => "RS",
        12 => "D-Up",
        13 => "D-Down",
        14 => "D-Left",
        15 => "D-Right",
        16 => "Guide",
        _ => "Unknown",
    }
}

pub fn print_button(button: &Button) -> &str {
    match button {
        Button::South => "South",
        Button::East => "East",
        Button::North => "North",
        Button::West => "West",
        Button::C => "C",
        Button::Z => "Z",
        Button::LeftTrigger => "LeftTrigger",
        Button::LeftTrigger2 => "LeftTrigger2",
        Button::RightTrigger => "RightTrigger",
        Button::RightTrigger2 => "RightTrigger2",
        Button::Select => "Select",
        Button::Start => "Start",
        Button::Mode => "Mode",
        Button::LeftThumb => "LeftThumb",
        Button::RightThumb => "RightThumb",
        Button::DPadUp => "DPadUp",
        Button::DPadDown => "DPadDown",
        Button::DPadLeft => "DPadLeft",
        Button::DPadRight => "DPadRight",
        Button::Unknown => "Unknown",
    }
}

pub fn print_axis(axis: &Axis) -> &str {
    match axis {
        Axis::LeftStickX => "LeftStickX",
        Axis::LeftStickY => "LeftStickY",
        Axis::LeftZ => "LeftZ",
        Axis::RightStickX => "RightStickX",
        Axis::RightStickY => "RightStickY",
        Axis::RightZ => "RightZ",
        Axis::DPadX => "DPadX",
        Axis::DPadY => "DPadY",
        Axis::Unknown => "Unknown",
    }
}

fn print_code(code: &Code) -> Result<u16> {
    let re = exec_or_eyre!(Regex::new(r"\(([0-9]+)\)"))?;
    let binding = code.to_string();
    let Some(caps) = re.captures(binding.as_str()) else {
        bail!("Can't extract code: {}", code.to_string())
    };
    exec_or_eyre!(str::parse::<u16>(&caps[1]))
}

pub fn print_event(event: &EventType) -> Result<String> {
    let (event_type, button_or_axis, value, code) = match event {
        AxisChanged(axis, value, code) => ("AxisChanged", print_axis(axis), *value, Some(code)),
        ButtonChanged(button, value, code) => {
            ("ButtonChanged", print_button(button), *value, Some(code))
        }
        ButtonReleased(button, code) => ("ButtonReleased", print_button(button), 0.0, Some(code)),
        ButtonPressed(button, code) => ("ButtonPressed", print_button(button), 1.0, Some(code)),
        ButtonRepeated(button, code) => ("ButtonRepeated", print_button(button), 1.0, Some(code)),
        Connected => ("Connected", "", 0.0, None),
        Disconnected => ("Disconnected", "", 0.0, None),
        Dropped => ("Dropped", "", 0.0, None),
        _ => ("Unhandled", "", 0.0, None),
    };

    let code_as_num = match code {
        Some(code) => print_code(code)?,
        None => 0,
    };
    Ok(format!(
        "{event_type}; BtnOrAxis: {button_or_axis}; Value: {value:.3}; Num: {code_as_num}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_buttons_match_their_indices() {
        for (index, button) in STANDARD_BUTTONS.iter().enumerate() {
            assert_eq!(button_index(button), Some(index));
        }
    }

    #[test]
    fn test_nonstandard_buttons_have_no_slot() {
        assert_eq!(button_index(&Button::C), None);
        assert_eq!(button_index(&Button::Z), None);
        assert_eq!(button_index(&Button::Unknown), None);
    }

    #[test]
    fn test_trigger_slots_match_standard_mapping() {
        assert_eq!(button_index(&Button::LeftTrigger2), Some(6));
        assert_eq!(button_index(&Button::RightTrigger2), Some(7));
        assert_eq!(button_label(6), "LT / L2");
    }
}
