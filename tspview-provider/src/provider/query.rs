//! Interval query construction
//!
//! Turns a time window and a resolution into the sample timestamps the
//! server evaluates, then wraps them with the requested entry ids (and
//! optional marker categories) into a [`Query`].

use std::num::NonZeroUsize;
use tspview_common::time::{TimeRange, Timestamp};
use tspview_common::tsp::{EntryId, Query};
use tspview_common::{Error, Result};

/// Zoomed view: a window relative to the chart origin plus a sample count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewRequest {
    window: TimeRange,
    resolution: NonZeroUsize,
}

impl ViewRequest {
    /// Validate a view request
    ///
    /// # Errors
    /// `InvalidRequest` when `resolution <= 0` or the window is inverted.
    pub fn new(window: TimeRange, resolution: i64) -> Result<Self> {
        let resolution = usize::try_from(resolution)
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or_else(|| {
                Error::InvalidRequest(format!("resolution must be positive, got {}", resolution))
            })?;

        if window.is_inverted() {
            return Err(Error::InvalidRequest(format!(
                "view window start {} is after end {}",
                window.start, window.end
            )));
        }

        Ok(Self { window, resolution })
    }

    /// Window in chart-relative coordinates
    pub fn window(&self) -> TimeRange {
        self.window
    }

    pub fn resolution(&self) -> NonZeroUsize {
        self.resolution
    }
}

/// Split `[lo, hi]` into `n` equal parts, one sample per part
///
/// # Errors
/// `InvalidRequest` when `n <= 0` or `lo > hi`.
pub fn split_range_into_equal_parts(
    lo: Timestamp,
    hi: Timestamp,
    n: i64,
) -> Result<Vec<Timestamp>> {
    let n = usize::try_from(n)
        .ok()
        .and_then(NonZeroUsize::new)
        .ok_or_else(|| Error::InvalidRequest(format!("sample count must be positive, got {}", n)))?;
    if lo > hi {
        return Err(Error::InvalidRequest(format!(
            "range start {} is after end {}",
            lo, hi
        )));
    }
    Ok(sample_times(TimeRange::new(lo, hi), n))
}

/// Sample timestamps over `range`
///
/// First sample is the lower bound, last is the upper bound, interior
/// samples are rounded to the nearest integer. Non-decreasing. An inverted
/// range is sampled between its smaller and larger bound.
pub(crate) fn sample_times(range: TimeRange, n: NonZeroUsize) -> Vec<Timestamp> {
    let lo = range.start.min(range.end);
    let hi = range.start.max(range.end);
    let n = n.get();

    if n == 1 || lo == hi {
        return vec![lo];
    }

    // i128 keeps i * (hi - lo) exact for nanosecond epochs
    let span = hi as i128 - lo as i128;
    let parts = (n - 1) as i128;
    let mut times: Vec<Timestamp> = (0..n)
        .map(|i| {
            let offset = (2 * i as i128 * span + parts) / (2 * parts);
            (lo as i128 + offset) as Timestamp
        })
        .collect();
    if let Some(last) = times.last_mut() {
        *last = hi;
    }
    times
}

/// State/annotation query for one model build
///
/// With a view, samples `view.window + total_range.start`; otherwise samples
/// the whole total range at `default_resolution`.
pub fn interval_query(
    total_range: TimeRange,
    view: Option<&ViewRequest>,
    requested_ids: &[EntryId],
    marker_categories: Option<&[String]>,
    default_resolution: NonZeroUsize,
) -> Query {
    let times = match view {
        Some(view) => sample_times(view.window().offset_by(total_range.start), view.resolution()),
        None => sample_times(total_range, default_resolution),
    };

    Query::selection(times, requested_ids.to_vec())
        .with_marker_categories(marker_categories.map(<[String]>::to_vec))
}

/// Arrow query, sampled relative to `arrow_origin` instead of the chart origin
pub fn arrow_query(
    view: &ViewRequest,
    arrow_origin: Timestamp,
    requested_ids: &[EntryId],
) -> Query {
    let times = sample_times(view.window().offset_by(arrow_origin), view.resolution());
    Query::selection(times, requested_ids.to_vec())
}
