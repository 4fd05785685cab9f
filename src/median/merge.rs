//! Overflow policy: fuse the two adjacent entries farthest from the median.
//!
//! Invoked once per overflow event. The scan works on a fresh distribution,
//! visits candidates in descending distance order, and performs at most one
//! merge before returning. Entries whose distance rounds to zero at one
//! decimal are median candidates and are terminal for the scan: they must
//! never be merged away.

use std::cmp::Reverse;

use ordered_float::OrderedFloat;

use crate::median::distribution;
use crate::median::range::Range;
use crate::median::stats::RangeStats;
use crate::median::summary::Summary;

/// What a single merge pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MergeOutcome {
    /// Two neighbors were fused into this range.
    Merged(Range),
    /// Every candidate was either a median candidate or had no qualifying
    /// neighbor; the summary is left as-is. A defined no-op, never a retry loop.
    NoCandidate,
}

/// Round to one decimal, the granularity at which a distance counts as zero
/// for the terminal check.
#[inline]
fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Recompute the distribution, then fuse at most one pair of neighbors.
///
/// Candidate selection: scan entries in descending `distance_from_median`
/// order. The positional neighbor is the right one for the first entry and
/// the left one otherwise — outliers sit at the edges of the ordered summary,
/// so the fused range grows inward. A neighbor that is itself a median
/// candidate disqualifies the pair; the scan then advances to the next
/// candidate rather than retrying, and exhaustion is a no-op outcome.
pub(crate) fn merge_once(summary: &mut Summary) -> MergeOutcome {
    distribution::recompute(summary);
    if summary.len() < 2 {
        return MergeOutcome::NoCandidate;
    }

    // Snapshot (range, distance, count) and order by descending distance.
    // The stable sort keeps ascending-range order among ties, matching the
    // scan order of the selection semantics.
    let mut by_distance: Vec<(Range, f64, u64)> = summary
        .entries()
        .iter()
        .map(|e| {
            (
                e.range(),
                e.stats().distance_from_median(),
                e.stats().occurrence_count(),
            )
        })
        .collect();
    by_distance.sort_by_key(|&(_, d, _)| Reverse(OrderedFloat(d)));

    for &(mergee, distance, mergee_count) in &by_distance {
        if round1(distance) == 0.0 {
            // Reached the median candidates; nothing past this point may merge.
            break;
        }

        // Positional neighbor in ascending-range order, edge-biased.
        let Some(idx) = summary.entries().iter().position(|e| e.range() == mergee) else {
            continue;
        };
        let neighbor_idx = if idx == 0 { idx + 1 } else { idx - 1 };
        let neighbor = &summary.entries()[neighbor_idx];
        if neighbor.stats().is_median_candidate() {
            continue;
        }

        let neighbor_range = neighbor.range();
        let neighbor_count = neighbor.stats().occurrence_count();
        let fused = mergee.union(&neighbor_range);

        summary.remove(&mergee);
        summary.remove(&neighbor_range);
        summary.put(fused, RangeStats::new(mergee_count + neighbor_count));

        crate::mtrace!(
            "merge: {mergee} + {neighbor_range} -> {fused} (distance {distance:.3})"
        );
        return MergeOutcome::Merged(fused);
    }

    crate::mtrace!("merge: no qualifying pair, summary left at {}", summary.len());
    MergeOutcome::NoCandidate
}
