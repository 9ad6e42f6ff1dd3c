use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

#[inline]
pub fn distance(x: f32, y: f32) -> f32 {
    x.hypot(y)
}

#[derive(PartialEq, Copy, Clone, Default, Debug, Serialize, Deserialize)]
pub struct Vector {
    pub x: f32,
    pub y: f32,
}

impl Vector {
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    #[inline]
    pub fn magnitude(&self) -> f32 {
        distance(self.x, self.y)
    }
}

impl std::fmt::Display for Vector {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "[X: {:.2}, Y: {:.2}]", self.x, self.y)
    }
}

const EDGE_DISPLACEMENT: f32 = 0.8;
const MID_DISPLACEMENT: f32 = 0.5;

/// Coarse displacement band of a stick, used by the live readout to
/// color the position indicator.
#[derive(
    PartialOrd, EnumIter, EnumString, AsRefStr, Display, Eq, Hash, PartialEq, Copy, Clone, Debug,
    Serialize, Deserialize,
)]
pub enum StickZone {
    Center,
    Mid,
    Edge,
}

impl StickZone {
    #[inline]
    pub fn from_magnitude(magnitude: f32) -> Self {
        if magnitude > EDGE_DISPLACEMENT {
            Self::Edge
        } else if magnitude > MID_DISPLACEMENT {
            Self::Mid
        } else {
            Self::Center
        }
    }
}
