//! Progress value object (0-100 completion percentage).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Completion percentage between 0.0 and 100.0 inclusive.
///
/// Carries the exact rational percentage `100 * completed / total` at
/// floating precision; no additional rounding is applied.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Progress(f64);

impl Progress {
    /// Zero percent.
    pub const ZERO: Self = Self(0.0);

    /// One hundred percent.
    pub const COMPLETE: Self = Self(100.0);

    /// Creates a new Progress, clamping to the valid range.
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 100.0))
    }

    /// Computes progress from completed and total counts.
    ///
    /// A zero total yields zero progress.
    pub fn from_counts(completed: usize, total: usize) -> Self {
        if total == 0 {
            return Self::ZERO;
        }
        Self(100.0 * completed as f64 / total as f64)
    }

    /// Returns the value as f64.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Whether this represents full completion.
    pub fn is_complete(&self) -> bool {
        self.0 >= 100.0
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
