//! Caller-supplied transform strength.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A finite, signed transform strength.
///
/// The valid domain depends on the transform; an `Intensity` only guarantees
/// that the value is a real number.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Intensity(f64);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Given intensity '{input}' wasn't a number")]
pub struct ParseIntensityError {
    pub input: String,
}

impl Intensity {
    pub const ZERO: Intensity = Intensity(0.0);

    /// Returns `None` for NaN and infinities.
    pub fn new(value: f64) -> Option<Self> {
        value.is_finite().then_some(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// The value as an integer, if it has no fractional part.
    pub fn as_integer(self) -> Option<i64> {
        (self.0.fract() == 0.0).then_some(self.0 as i64)
    }
}

impl FromStr for Intensity {
    type Err = ParseIntensityError;

    /// Parse trimmed decimal text. Trailing garbage, NaN and infinities are
    /// rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<f64>()
            .ok()
            .and_then(Intensity::new)
            .ok_or_else(|| ParseIntensityError {
                input: s.to_string(),
            })
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
