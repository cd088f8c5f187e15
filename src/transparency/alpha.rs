//! Alpha values and clamping

use serde::{Deserialize, Serialize};

/// Lowest alpha ever applied; anything below would leave an unusable window
pub const MIN_ALPHA: u8 = 150;

/// Fully opaque
pub const MAX_ALPHA: u8 = 255;

/// Step used by increase/decrease
pub const ALPHA_STEP: u8 = 10;

/// An opacity byte in `[MIN_ALPHA, MAX_ALPHA]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Alpha(u8);

impl Alpha {
    pub const OPAQUE: Alpha = Alpha(MAX_ALPHA);
    pub const FLOOR: Alpha = Alpha(MIN_ALPHA);

    /// Clamp any requested value into the applicable range
    pub fn clamped(requested: i64) -> Self {
        Alpha(requested.clamp(MIN_ALPHA as i64, MAX_ALPHA as i64) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Alpha {
    fn default() -> Self {
        Alpha::OPAQUE
    }
}

impl From<Alpha> for u8 {
    fn from(alpha: Alpha) -> Self {
        alpha.0
    }
}

impl std::fmt::Display for Alpha {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
