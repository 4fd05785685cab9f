//! Median location and the zoom-in split of a wide median-holding range.
//!
//! Splitting runs only as part of a median query: when the entry holding the
//! median rank is a genuine range, it is divided at its midpoint so future
//! queries resolve finer near the median, at the cost of one extra entry
//! (possibly triggering a corrective merge).

use crate::median::range::Range;
use crate::median::stats::RangeStats;
use crate::median::summary::Summary;

/// 1-indexed rank of the median, `ceil(total / 2)`.
#[inline]
pub(crate) fn position_of_median(total_values: u64) -> u64 {
    (total_values + 1) / 2
}

/// Index of the entry holding the median rank: the first entry whose running
/// occurrence total reaches `position_of_median`. `None` only for an empty
/// summary.
pub(crate) fn locate_median_entry(summary: &Summary) -> Option<usize> {
    let position = position_of_median(summary.total_values());
    let mut seen = 0_u64;
    for (i, entry) in summary.entries().iter().enumerate() {
        seen += entry.stats().occurrence_count();
        if seen >= position {
            return Some(i);
        }
    }
    None
}

/// Replace a wide entry with its two midpoint halves.
///
/// The occurrence count is halved blind — the true interior distribution is
/// unknown — with `floor(count/2)` on the lower half and `ceil(count/2)` on
/// the upper. The asymmetry is part of the contract; keep ceil on the upper
/// sub-range.
pub(crate) fn split_entry(summary: &mut Summary, range: Range) {
    let (lower, upper) = range.split_midpoint();
    let prior = summary.remove(&range);
    debug_assert!(prior.is_some(), "split target missing from summary");
    let count = prior.map(|s| s.occurrence_count()).unwrap_or(0);
    // Merged ranges carry the counts of both parents, so a wide range always
    // holds at least 2.
    debug_assert!(count >= 2);

    summary.put(lower, RangeStats::new(count / 2));
    summary.put(upper, RangeStats::new(count - count / 2));
}
