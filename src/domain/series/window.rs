//! Lookback windowing over a sample sequence.

use super::Sample;
use crate::shared::Window;
use chrono::{DateTime, Utc};
use std::borrow::Cow;

/// Whether timestamps are non-decreasing.
pub fn is_time_ordered(samples: &[Sample]) -> bool {
    samples
        .windows(2)
        .all(|pair| pair[0].timestamp <= pair[1].timestamp)
}

/// Oldest instant still inside `window` as of `now`; `None` when unbounded.
pub fn cutoff(window: Window, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    window
        .duration()
        .map(|d| now.checked_sub_signed(d).unwrap_or(DateTime::<Utc>::MIN_UTC))
}

/// Samples with `timestamp >= now - window`, in their original order.
///
/// `AllTime` returns the input as-is. For time-ordered input the result is a
/// borrowed suffix; unordered input is filtered into an owned copy so that
/// out-of-order samples inside the window are still kept.
pub fn filter(samples: &[Sample], window: Window, now: DateTime<Utc>) -> Cow<'_, [Sample]> {
    let Some(cutoff) = cutoff(window, now) else {
        return Cow::Borrowed(samples);
    };

    if is_time_ordered(samples) {
        let start = samples.partition_point(|s| s.timestamp < cutoff);
        return Cow::Borrowed(&samples[start..]);
    }

    tracing::debug!(
        len = samples.len(),
        window = %window,
        "Series not time-ordered, filtering by scan"
    );
    Cow::Owned(
        samples
            .iter()
            .filter(|s| s.timestamp >= cutoff)
            .cloned()
            .collect(),
    )
}
