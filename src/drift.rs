use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::math_ops::Vector;

/// Displacement beyond which a stick counts as off-center. Strictly
/// greater-than: a magnitude of exactly 0.15 is still centered.
pub const DRIFT_THRESHOLD: f32 = 0.15;

/// How long a stick has to stay off-center, without a single centered
/// frame in between, before drift is confirmed.
pub const CONFIRM_DELAY: Duration = Duration::from_millis(3000);

#[derive(
    EnumIter, EnumString, AsRefStr, Display, Eq, Hash, PartialEq, Copy, Clone, Debug, Serialize,
    Deserialize,
)]
pub enum StickSide {
    Left,
    Right,
}

#[derive(
    EnumIter, EnumString, AsRefStr, Display, Default, Eq, Hash, PartialEq, Copy, Clone, Debug,
    Serialize, Deserialize,
)]
pub enum DriftState {
    #[default]
    Normal,
    Monitoring,
    Confirmed,
}

/// One stick's debounce state. `deadline` is armed on the frame the
/// magnitude first exceeds the threshold and cleared the moment a
/// centered frame arrives, so it is pending iff the breach has held
/// continuously since it was armed.
#[derive(Copy, Clone, Debug, Default)]
struct StickMonitor {
    state: DriftState,
    deadline: Option<Instant>,
    position: Vector,
}

impl StickMonitor {
    fn sample(&mut self, position: Vector, now: Instant) {
        self.position = position;

        let magnitude = position.magnitude();
        if magnitude > DRIFT_THRESHOLD {
            let deadline = *self.deadline.get_or_insert(now + CONFIRM_DELAY);
            self.state = match now >= deadline {
                true => DriftState::Confirmed,
                false => DriftState::Monitoring,
            };
        } else {
            self.deadline = None;
            self.state = DriftState::Normal;
        }
    }

    fn reset(&mut self) {
        self.state = DriftState::Normal;
        self.deadline = None;
        self.position = Vector::zero();
    }
}

/// Frame-driven drift detector for both sticks. The caller passes the
/// current time into `sample`, which keeps the whole state machine a
/// function of `(now, samples)` and lets tests run on a virtual clock.
#[derive(Copy, Clone, Debug, Default)]
pub struct DriftDetector {
    left: StickMonitor,
    right: StickMonitor,
}

impl DriftDetector {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn monitor(&self, side: StickSide) -> &StickMonitor {
        match side {
            StickSide::Left => &self.left,
            StickSide::Right => &self.right,
        }
    }

    #[inline]
    fn monitor_mut(&mut self, side: StickSide) -> &mut StickMonitor {
        match side {
            StickSide::Left => &mut self.left,
            StickSide::Right => &mut self.right,
        }
    }

    #[inline]
    pub fn sample(&mut self, side: StickSide, position: Vector, now: Instant) {
        self.monitor_mut(side).sample(position, now);
    }

    #[inline]
    pub fn state(&self, side: StickSide) -> DriftState {
        self.monitor(side).state
    }

    #[inline]
    pub fn position(&self, side: StickSide) -> Vector {
        self.monitor(side).position
    }

    /// Larger of the two sticks' current displacement magnitudes.
    #[inline]
    pub fn max_magnitude(&self) -> f32 {
        self.left
            .position
            .magnitude()
            .max(self.right.position.magnitude())
    }

    /// Back to `Normal` on both sticks with no pending confirmation.
    /// Called whenever a gamepad connects or disconnects so a stale
    /// deadline never fires against a new device.
    pub fn reset(&mut self) {
        self.left.reset();
        self.right.reset();
    }
}
