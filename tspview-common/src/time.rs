//! Time range and re-basing utilities
//!
//! The trace server speaks absolute nanosecond timestamps (`i64`). The
//! renderer works in small numbers relative to an origin, so every
//! timestamp that leaves the provider is re-based:
//!
//! ```text
//! re-based = absolute - origin
//! ```
//!
//! # Examples
//!
//! ```rust
//! use tspview_common::time::{rebase, TimeRange};
//!
//! let origin = 1_332_170_682_440_133_097;
//! assert_eq!(rebase(origin + 250, origin), 250);
//!
//! let range = TimeRange::new(origin + 10, origin + 30).rebased(origin);
//! assert_eq!(range, TimeRange::new(10, 30));
//! assert_eq!(range.length(), 20);
//! ```

use serde::{Deserialize, Serialize};

/// Absolute or re-based timestamp in nanoseconds
pub type Timestamp = i64;

/// Half-open time range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl TimeRange {
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }

    /// `end - start` (negative for an inverted range)
    pub fn length(&self) -> Timestamp {
        self.end - self.start
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    /// Both bounds shifted by `-origin`
    pub fn rebased(&self, origin: Timestamp) -> Self {
        Self {
            start: rebase(self.start, origin),
            end: rebase(self.end, origin),
        }
    }

    /// Both bounds shifted by `+offset` (inverse of [`TimeRange::rebased`])
    pub fn offset_by(&self, offset: Timestamp) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
        }
    }

    /// True when `other` lies within `[self.start, self.end]`
    pub fn encloses(&self, other: &TimeRange) -> bool {
        other.start >= self.start && other.end <= self.end
    }
}

/// Convert an absolute timestamp into origin-relative coordinates
pub fn rebase(timestamp: Timestamp, origin: Timestamp) -> Timestamp {
    timestamp - origin
}
