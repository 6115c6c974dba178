//! Simulation time model.
//!
//! The engine advances in whole days.  `Day(0)` is the first simulated day;
//! the day counter only moves forward when a day's pipeline completes.
//!
//! Intervention windows are expressed with [`DayWindow`], which carries both
//! membership tests used by the built-in policies: inclusive
//! (`start <= day <= end`) and half-open (`start <= day < end`).

use std::fmt;

// ── Day ───────────────────────────────────────────────────────────────────────

/// An absolute simulation day counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Day(pub u32);

impl Day {
    pub const ZERO: Day = Day(0);

    /// The day after `self`.
    #[inline]
    pub fn next(self) -> Day {
        Day(self.0 + 1)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "day {}", self.0)
    }
}

// ── DayWindow ─────────────────────────────────────────────────────────────────

/// A `[start, end]` range of days during which a policy is active.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DayWindow {
    pub start: Day,
    pub end:   Day,
}

impl DayWindow {
    /// Window from `start` to `end`.  Callers validate `start <= end`.
    #[inline]
    pub fn new(start: u32, end: u32) -> Self {
        Self { start: Day(start), end: Day(end) }
    }

    /// `true` when `start <= end`.
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.start <= self.end
    }

    /// `start <= day <= end`.
    #[inline]
    pub fn contains(&self, day: Day) -> bool {
        self.start <= day && day <= self.end
    }

    /// `start <= day < end`.
    #[inline]
    pub fn contains_exclusive(&self, day: Day) -> bool {
        self.start <= day && day < self.end
    }
}

impl fmt::Display for DayWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start.0, self.end.0)
    }
}
