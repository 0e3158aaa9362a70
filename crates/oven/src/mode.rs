//! Named transform modes.

use crate::error::TransformError;
use std::fmt;
use std::str::FromStr;

/// The fixed set of transforms a caller can select by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Stretch: trade height for width at roughly constant pixel count.
    Normal,
    /// Saturate: scale color saturation.
    Defrosting,
    /// Reduce file size: lower the lossy encoder quality.
    Grill,
    /// Reduce resolution: scale both dimensions down uniformly.
    Popcorn,
}

impl Mode {
    /// Every mode, in the order they are advertised.
    pub const ALL: [Mode; 4] = [Mode::Normal, Mode::Defrosting, Mode::Grill, Mode::Popcorn];

    pub fn name(self) -> &'static str {
        match self {
            Mode::Normal => "Normal",
            Mode::Defrosting => "Defrosting",
            Mode::Grill => "Grill",
            Mode::Popcorn => "Popcorn",
        }
    }

    /// Name of the transform this mode runs.
    pub fn transform_name(self) -> &'static str {
        match self {
            Mode::Normal => "stretch",
            Mode::Defrosting => "saturate",
            Mode::Grill => "reduce_file_size",
            Mode::Popcorn => "reduce_resolution",
        }
    }
}

impl FromStr for Mode {
    type Err = TransformError;

    /// Exact, case-sensitive match on [`Mode::name`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| TransformError::UnsupportedMode(s.to_string()))
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
