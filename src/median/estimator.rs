// src/median/estimator.rs
use crate::{MedError, MedResult};

use crate::median::distribution;
use crate::median::merge::{self, MergeOutcome};
use crate::median::range::Range;
use crate::median::split;
use crate::median::stats::RangeStats;
use crate::median::summary::Summary;

/// Default summary capacity used by [`RunningMedianBuilder`] and the CLI.
pub const DEFAULT_CAPACITY: usize = 64;

/// Running-median estimator over an unbounded integer stream.
///
/// Keeps a fixed-capacity [`Summary`] of disjoint value ranges instead of the
/// full history. Inserts that overflow the capacity trigger one merge of the
/// two adjacent entries farthest from the median; a median query that lands
/// on a wide range splits it to regain resolution where it matters. Memory
/// and per-call cost therefore depend only on `capacity`, never on stream
/// length.
///
/// The estimate is exact until the first merge and approximate after it.
#[derive(Debug, Clone)]
pub struct RunningMedian {
    summary: Summary,
    capacity: usize,
}

impl Default for RunningMedian {
    fn default() -> Self {
        RunningMedian {
            summary: Summary::new(),
            capacity: DEFAULT_CAPACITY,
        }
    }
}

/// Builder for [`RunningMedian`].
#[derive(Debug, Clone)]
pub struct RunningMedianBuilder {
    capacity: usize,
}

impl Default for RunningMedianBuilder {
    fn default() -> Self {
        RunningMedianBuilder {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl RunningMedianBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum number of summary entries after any call completes.
    #[inline]
    pub fn capacity(mut self, n: usize) -> Self {
        self.capacity = n;
        self
    }

    /// Build the estimator; capacity 0 is a configuration error.
    pub fn build(self) -> MedResult<RunningMedian> {
        if self.capacity == 0 {
            return Err(MedError::InvalidCapacity { got: self.capacity });
        }
        Ok(RunningMedian {
            summary: Summary::new(),
            capacity: self.capacity,
        })
    }
}

impl RunningMedian {
    /// Entry point for fluent construction.
    #[inline]
    pub fn builder() -> RunningMedianBuilder {
        RunningMedianBuilder::default()
    }

    /// Estimator with the given capacity (must be >= 1).
    pub fn with_capacity(capacity: usize) -> MedResult<Self> {
        Self::builder().capacity(capacity).build()
    }

    /// The configured capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of stream values observed so far.
    #[inline]
    pub fn total_values(&self) -> u64 {
        self.summary.total_values()
    }

    /// Number of summary entries currently held.
    #[inline]
    pub fn len(&self) -> usize {
        self.summary.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.summary.is_empty()
    }

    /// Observe one stream value.
    ///
    /// An entry covering `value` (exact singleton first, then containment) is
    /// incremented in place; otherwise a new singleton entry is created, and
    /// an overflow is resolved by a single distribution-then-merge pass.
    pub fn insert(&mut self, value: i64) {
        if self.summary.record_existing(value) {
            return;
        }
        self.summary.insert_singleton(value);
        if self.summary.len() > self.capacity {
            let outcome = merge::merge_once(&mut self.summary);
            debug_assert!(
                outcome == MergeOutcome::NoCandidate || self.summary.len() <= self.capacity
            );
        }
    }

    /// Current approximate median.
    ///
    /// Fails with [`MedError::Empty`] before the first insert. If the entry
    /// holding the median rank is a singleton, its value is the answer; a
    /// wide range answers with its truncated midpoint and is then split so
    /// later queries resolve finer (the split may trigger one merge). The
    /// returned value is always the pre-split midpoint.
    pub fn median(&mut self) -> MedResult<f64> {
        if self.summary.is_empty() {
            return Err(MedError::Empty);
        }
        let idx = split::locate_median_entry(&self.summary).ok_or(MedError::Invariant {
            what: "median rank beyond summary counts",
        })?;
        let range = self.summary.entries()[idx].range();
        if range.is_singleton() {
            return Ok(range.low() as f64);
        }

        let approx = range.midpoint() as f64;
        split::split_entry(&mut self.summary, range);
        if self.summary.len() > self.capacity {
            merge::merge_once(&mut self.summary);
        }
        Ok(approx)
    }

    /// Ordered diagnostic snapshot of the summary with freshly computed
    /// distribution figures. Works on a copy; the estimator is not mutated.
    pub fn describe(&self) -> Vec<(Range, RangeStats)> {
        let mut snapshot = self.summary.clone();
        distribution::recompute(&mut snapshot);
        snapshot
            .entries()
            .iter()
            .map(|e| (e.range(), *e.stats()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::median::test_helpers::*;

    #[test]
    fn empty_estimator_reports_an_explicit_error() {
        let mut rm = RunningMedian::with_capacity(4).expect("capacity ok");
        assert_eq!(rm.median(), Err(MedError::Empty));
    }

    #[test]
    fn zero_capacity_is_rejected_at_construction() {
        assert_eq!(
            RunningMedian::with_capacity(0).err(),
            Some(MedError::InvalidCapacity { got: 0 })
        );
        assert!(RunningMedian::builder().capacity(1).build().is_ok());
    }

    #[test]
    fn a_single_value_is_its_own_median() {
        let mut rm = RunningMedian::with_capacity(4).expect("capacity ok");
        rm.insert(-17);
        assert_eq!(rm.median(), Ok(-17.0));
        assert_eq!(rm.total_values(), 1);
    }

    #[test]
    fn exact_for_odd_counts_of_distinct_values_in_any_order() {
        let orders: [&[i64]; 3] = [
            &[10, 20, 30, 40, 50],
            &[50, 40, 30, 20, 10],
            &[30, 50, 10, 40, 20],
        ];
        for values in orders {
            let mut rm = RunningMedian::with_capacity(16).expect("capacity ok");
            for &v in values {
                rm.insert(v);
            }
            assert_eq!(rm.median(), Ok(exact_median(values)));
        }
    }

    #[test]
    fn even_counts_answer_with_the_lower_middle_entry() {
        // The rank walk stops at ceil(n/2); with 4 distinct singletons that is
        // the 2nd value, not the average of the middle pair.
        let mut rm = RunningMedian::with_capacity(16).expect("capacity ok");
        for v in [1, 3, 4, 9] {
            rm.insert(v);
        }
        assert_eq!(rm.median(), Ok(3.0));
    }

    #[test]
    fn repeated_values_pile_into_one_entry() {
        let mut rm = RunningMedian::with_capacity(4).expect("capacity ok");
        for _ in 0..10 {
            rm.insert(5);
        }
        assert_eq!(rm.len(), 1);
        assert_eq!(rm.total_values(), 10);
        assert_eq!(rm.median(), Ok(5.0));
    }

    #[test]
    fn pi_digit_scenario_at_capacity_four() {
        let mut rm = RunningMedian::with_capacity(4).expect("capacity ok");

        // First four inserts: three entries, no overflow, rank 2 lands on the
        // doubled-up singleton 1.
        for v in [3, 1, 4, 1] {
            rm.insert(v);
        }
        assert_eq!(rm.len(), 3);
        let counts: Vec<u64> = rm
            .describe()
            .iter()
            .map(|(_, s)| s.occurrence_count())
            .collect();
        assert_eq!(counts, vec![2, 1, 1]);
        assert_eq!(rm.median(), Ok(1.0));

        // 5 fits below capacity; 9 overflows and forces a merge. From here on
        // only structural invariants may be asserted.
        rm.insert(5);
        assert_eq!(rm.median(), Ok(3.0));
        rm.insert(9);
        assert_summary_invariants(&rm, 6);
        assert!(rm.median().is_ok());
        assert_summary_invariants(&rm, 6);
    }

    #[test]
    fn wide_median_range_answers_midpoint_then_splits() {
        let mut rm = RunningMedian::with_capacity(4).expect("capacity ok");
        // Five distinct values overflow capacity 4; the edge-biased merge
        // fuses the left edge into [1, 2].
        for v in [1, 2, 3, 4, 5] {
            rm.insert(v);
        }
        assert_eq!(rm.len(), 4);

        // Piling one more occurrence into the fused range moves the median
        // rank inside it.
        rm.insert(1);

        let entries = rm.describe();
        let wide = entries
            .iter()
            .find(|(r, _)| !r.is_singleton())
            .map(|(r, _)| *r)
            .expect("a merged range exists");
        assert_eq!(wide, Range::span(1, 2));

        // The answer is the pre-split truncated midpoint; the summary is
        // refined (and possibly re-merged) afterwards.
        let got = rm.median().expect("non-empty");
        assert_eq!(got, wide.midpoint() as f64);
        assert_summary_invariants(&rm, 6);
    }

    #[test]
    fn total_values_grows_by_exactly_one_per_insert() {
        let mut rm = RunningMedian::with_capacity(4).expect("capacity ok");
        for (i, v) in [7, 7, 3, 9, 9, 9, 1].into_iter().enumerate() {
            rm.insert(v);
            assert_eq!(rm.total_values(), (i + 1) as u64);
        }
    }

    #[test]
    fn describe_is_ordered_fresh_and_side_effect_free() {
        let mut rm = RunningMedian::with_capacity(8).expect("capacity ok");
        for v in [4, 2, 6] {
            rm.insert(v);
        }
        let snapshot = rm.describe();
        assert_eq!(snapshot.len(), 3);
        let mass: f64 = snapshot.iter().map(|(_, s)| s.probability_mass()).sum();
        assert!((mass - 1.0).abs() < 1e-12);
        assert!(snapshot.windows(2).all(|w| w[0].0.high() < w[1].0.low()));

        // Distances come out fresh even though no overflow ever ran.
        let middle = &snapshot[1];
        assert_eq!(middle.1.distance_from_median(), 0.0);

        // Describe must not advance any state.
        assert_eq!(rm.total_values(), 3);
        assert_eq!(rm.describe().len(), 3);
    }
}
