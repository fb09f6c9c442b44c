//! Volume — a validated mixer level.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Mixer volume in percent, always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Volume(u8);

impl Volume {
    /// Highest accepted level.
    pub const MAX: u8 = 100;

    /// Build a volume, rejecting levels above [`Volume::MAX`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::VolumeOutOfRange`] for levels above 100.
    pub fn new(level: u8) -> Result<Self, ValidationError> {
        Self::try_from(i64::from(level))
    }

    /// The level as a percentage.
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Volume {
    type Error = ValidationError;

    fn try_from(level: i64) -> Result<Self, Self::Error> {
        u8::try_from(level)
            .ok()
            .filter(|level| *level <= Self::MAX)
            .map(Self)
            .ok_or(ValidationError::VolumeOutOfRange(level))
    }
}

impl From<Volume> for u8 {
    fn from(volume: Volume) -> Self {
        volume.0
    }
}

impl std::fmt::Display for Volume {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
