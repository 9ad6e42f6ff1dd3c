use std::collections::VecDeque;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::drift::DRIFT_THRESHOLD;

/// Displacement above which drift is severe rather than minor.
pub const SEVERE_DRIFT_THRESHOLD: f32 = 0.3;

/// A button reporting pressed with an analog value above this is
/// treated as mechanically stuck.
pub const STUCK_VALUE_THRESHOLD: f32 = 0.8;

pub const TRIGGER_FULL_PULL: f32 = 0.95;
pub const TRIGGER_PARTIAL_PULL: f32 = 0.7;
pub const TRIGGER_MIN_ACTIVITY: f32 = 0.3;

pub const TRIGGER_HISTORY_CAP: usize = 100;

pub const BUTTONS_WELL_TESTED: u32 = 50;
pub const BUTTONS_PARTIALLY_TESTED: u32 = 10;

/// Health tier of one diagnostic category. `Pending` is not a verdict:
/// it means the category has not seen enough input to judge yet.
#[derive(
    EnumIter, EnumString, AsRefStr, Display, Default, Eq, Hash, PartialEq, Copy, Clone, Debug,
    Serialize, Deserialize,
)]
pub enum Tier {
    Good,
    Warning,
    Critical,
    #[default]
    Pending,
}

#[derive(PartialEq, Copy, Clone, Default, Debug, Serialize, Deserialize)]
pub struct ButtonSnapshot {
    pub pressed: bool,
    pub value: f32,
}

/// Last `TRIGGER_HISTORY_CAP` pull values of one trigger, oldest
/// evicted first. Only the running maximum is ever read from it.
#[derive(Clone, Debug, Default)]
pub struct TriggerHistory {
    samples: VecDeque<f32>,
}

impl TriggerHistory {
    pub fn push(&mut self, value: f32) {
        self.samples.push_back(value);
        if self.samples.len() > TRIGGER_HISTORY_CAP {
            self.samples.pop_front();
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn max(&self) -> f32 {
        self.samples.iter().copied().fold(0.0, f32::max)
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

/// Everything accumulated over one connection session: per-index press
/// counters, both trigger histories and the latest stuck-button scan.
/// Reset wholesale whenever a device connects or disconnects.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticSession {
    press_counts: AHashMap<usize, u32>,
    left_trigger: TriggerHistory,
    right_trigger: TriggerHistory,
    stuck_buttons: Vec<usize>,
}

impl DiagnosticSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_press(&mut self, index: usize) {
        *self.press_counts.entry(index).or_insert(0) += 1;
    }

    #[inline]
    pub fn press_count(&self, index: usize) -> u32 {
        match self.press_counts.get(&index) {
            None => 0,
            Some(count) => *count,
        }
    }

    #[inline]
    pub fn total_presses(&self) -> u32 {
        self.press_counts.values().sum()
    }

    /// Rescans the latest per-button snapshot for stuck candidates.
    /// The scan is replaced every frame, not accumulated.
    pub fn observe_buttons(&mut self, snapshot: &[ButtonSnapshot]) {
        self.stuck_buttons.clear();
        for (index, button) in snapshot.iter().enumerate() {
            if button.pressed && button.value > STUCK_VALUE_THRESHOLD {
                self.stuck_buttons.push(index);
            }
        }
    }

    pub fn observe_triggers(&mut self, left: f32, right: f32) {
        self.left_trigger.push(left);
        self.right_trigger.push(right);
    }

    #[inline]
    pub fn stuck_buttons(&self) -> &[usize] {
        &self.stuck_buttons
    }

    #[inline]
    pub fn max_trigger(&self) -> f32 {
        self.left_trigger.max().max(self.right_trigger.max())
    }

    /// A stuck button is Critical no matter how many presses were
    /// counted; low press totals alone never fail the category.
    pub fn button_tier(&self) -> Tier {
        if !self.stuck_buttons.is_empty() {
            return Tier::Critical;
        }
        match self.total_presses() {
            0 => Tier::Pending,
            total if total > BUTTONS_WELL_TESTED => Tier::Good,
            _ => Tier::Warning,
        }
    }

    pub fn trigger_tier(&self) -> Tier {
        let max_trigger = self.max_trigger();
        if max_trigger > TRIGGER_FULL_PULL {
            Tier::Good
        } else if max_trigger > TRIGGER_PARTIAL_PULL {
            Tier::Warning
        } else if max_trigger > TRIGGER_MIN_ACTIVITY {
            Tier::Critical
        } else {
            Tier::Pending
        }
    }

    pub fn reset(&mut self) {
        self.press_counts.clear();
        self.left_trigger.clear();
        self.right_trigger.clear();
        self.stuck_buttons.clear();
    }
}

/// Tier from the sticks' current displacement, independent of the
/// drift detector's debounced state.
pub fn drift_tier(max_magnitude: f32) -> Tier {
    if max_magnitude > SEVERE_DRIFT_THRESHOLD {
        Tier::Critical
    } else if max_magnitude > DRIFT_THRESHOLD {
        Tier::Warning
    } else {
        Tier::Good
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(entries: &[(bool, f32)]) -> Vec<ButtonSnapshot> {
        entries
            .iter()
            .map(|&(pressed, value)| ButtonSnapshot { pressed, value })
            .collect()
    }

    #[test]
    fn test_drift_tier_bands() {
        assert_eq!(drift_tier(0.0), Tier::Good);
        assert_eq!(drift_tier(0.15), Tier::Good);
        assert_eq!(drift_tier(0.16), Tier::Warning);
        assert_eq!(drift_tier(0.3), Tier::Warning);
        assert_eq!(drift_tier(0.31), Tier::Critical);
        assert_eq!(drift_tier(1.0), Tier::Critical);
    }

    #[test]
    fn test_trigger_history_evicts_oldest() {
        let mut history = TriggerHistory::default();
        history.push(0.99);
        for _ in 0..TRIGGER_HISTORY_CAP {
            history.push(0.1);
        }
        assert_eq!(history.len(), TRIGGER_HISTORY_CAP);
        // The 0.99 was the oldest entry and fell out of the window.
        assert!((history.max() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_trigger_tier_uses_max_across_both() {
        let mut session = DiagnosticSession::new();
        session.observe_triggers(0.96, 0.5);
        assert_eq!(session.trigger_tier(), Tier::Good);
    }

    #[test]
    fn test_trigger_tier_bands() {
        let mut session = DiagnosticSession::new();
        assert_eq!(session.trigger_tier(), Tier::Pending);

        session.observe_triggers(0.2, 0.0);
        assert_eq!(session.trigger_tier(), Tier::Pending);

        session.observe_triggers(0.5, 0.0);
        assert_eq!(session.trigger_tier(), Tier::Critical);

        session.observe_triggers(0.8, 0.0);
        assert_eq!(session.trigger_tier(), Tier::Warning);

        session.observe_triggers(0.0, 0.96);
        assert_eq!(session.trigger_tier(), Tier::Good);
    }

    #[test]
    fn test_stuck_button_is_critical_regardless_of_presses() {
        let mut session = DiagnosticSession::new();
        for _ in 0..60 {
            session.record_press(0);
        }
        session.observe_buttons(&snapshot(&[(false, 0.0), (true, 0.9)]));
        assert_eq!(session.stuck_buttons(), &[1]);
        assert_eq!(session.button_tier(), Tier::Critical);
    }

    #[test]
    fn test_pressed_without_high_value_is_not_stuck() {
        let mut session = DiagnosticSession::new();
        session.observe_buttons(&snapshot(&[(true, 0.8), (false, 0.95)]));
        assert!(session.stuck_buttons().is_empty());
    }

    #[test]
    fn test_button_tier_bands() {
        let mut session = DiagnosticSession::new();
        assert_eq!(session.button_tier(), Tier::Pending);

        for _ in 0..5 {
            session.record_press(2);
        }
        assert_eq!(session.button_tier(), Tier::Warning);

        for _ in 0..25 {
            session.record_press(3);
        }
        assert_eq!(session.button_tier(), Tier::Warning);

        for press in 0..25 {
            session.record_press(press % 4);
        }
        assert_eq!(session.total_presses(), 55);
        assert_eq!(session.button_tier(), Tier::Good);
    }

    #[test]
    fn test_stuck_scan_is_replaced_each_frame() {
        let mut session = DiagnosticSession::new();
        session.observe_buttons(&snapshot(&[(true, 0.9)]));
        assert_eq!(session.button_tier(), Tier::Critical);

        session.observe_buttons(&snapshot(&[(false, 0.0)]));
        assert_eq!(session.button_tier(), Tier::Pending);
    }

    #[test]
    fn test_reset_clears_session() {
        let mut session = DiagnosticSession::new();
        session.record_press(0);
        session.record_press(0);
        session.record_press(1);
        session.observe_triggers(0.99, 0.99);
        session.observe_buttons(&snapshot(&[(true, 0.9)]));

        session.reset();
        assert_eq!(session.total_presses(), 0);
        assert_eq!(session.press_count(0), 0);
        assert!(session.stuck_buttons().is_empty());
        assert_eq!(session.button_tier(), Tier::Pending);
        assert_eq!(session.trigger_tier(), Tier::Pending);
    }
}
