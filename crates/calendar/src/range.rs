// SPDX-License-Identifier: MIT

//!
//! The month range a calendar grid spans
//!

use serde::Serialize;
use thiserror::Error;

/// Errors that can arise when building a calendar grid
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// The range end must be strictly greater than the start
    #[error("Invalid month range: end ({end}) must be greater than start ({start})")]
    InvalidRange { start: i32, end: i32 },

    /// A month offset shifted the date outside what the date type can hold
    #[error("Month offset {0} is outside the supported date range")]
    MonthOutOfBounds(i32),
}

/// A half-open range of signed month offsets relative to the current month
/// (e.g. -1 is last month).  `start` is inclusive, `end` exclusive.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MonthRange {
    start: i32,
    end: i32,
}

impl MonthRange {
    /// Create a valid [`MonthRange`] if `end > start`
    pub fn from(start: i32, end: i32) -> Result<Self, CalendarError> {
        if end <= start {
            return Err(CalendarError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The first month offset in the range (inclusive)
    pub fn start(&self) -> i32 {
        self.start
    }

    /// The month offset the range ends before (exclusive)
    pub fn end(&self) -> i32 {
        self.end
    }

    /// How many months the range spans
    pub fn month_count(&self) -> u32 {
        (self.end - self.start) as u32
    }

    /// Iterate the month offsets in the range
    pub fn offsets(&self) -> impl Iterator<Item = i32> {
        self.start..self.end
    }
}

impl Default for MonthRange {
    /// One year back, two years forward
    fn default() -> Self {
        MonthRange {
            start: -12,
            end: 24,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rejects_empty_and_reversed_ranges() {
        assert!(MonthRange::from(0, 0).is_err());
        assert!(MonthRange::from(3, -3).is_err());
        assert!(MonthRange::from(-3, 3).is_ok());
    }

    #[test]
    fn month_count() {
        assert_eq!(MonthRange::default().month_count(), 36);
        assert_eq!(MonthRange::from(-1, 1).unwrap().month_count(), 2);
    }
}
