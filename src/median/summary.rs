use crate::median::range::{is_disjoint_sorted, Range};
use crate::median::stats::RangeStats;

/// One `(Range, RangeStats)` pair of the summary.
#[derive(Debug, Clone)]
pub struct SummaryEntry {
    pub(crate) range: Range,
    pub(crate) stats: RangeStats,
}

impl SummaryEntry {
    #[inline]
    pub fn range(&self) -> Range {
        self.range
    }
    #[inline]
    pub fn stats(&self) -> &RangeStats {
        &self.stats
    }
}

/// The bounded state: an ordered collection of pairwise-disjoint
/// `(Range, RangeStats)` entries plus the running total of observed values.
///
/// Entries are kept in a flat vector sorted by `low`; capacity is small, so
/// positional scans and sorted inserts are all O(capacity). Disjointness is
/// structural: only the merge and split policies change range boundaries, and
/// both replace entries with ranges covering exactly the removed ones.
///
/// Count conservation (`Σ occurrence_count == total_values`) is likewise
/// structural: `record_existing`/`insert_singleton` bump the total together
/// with an entry count, while `remove`/`put` move counts without touching the
/// total.
#[derive(Debug, Clone, Default)]
pub struct Summary {
    entries: Vec<SummaryEntry>,
    total_values: u64,
}

impl Summary {
    pub(crate) fn new() -> Self {
        Summary::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of stream values represented by the summary.
    #[inline]
    pub fn total_values(&self) -> u64 {
        self.total_values
    }

    /// Entries in ascending order of `low`.
    #[inline]
    pub fn entries(&self) -> &[SummaryEntry] {
        &self.entries
    }

    #[inline]
    pub(crate) fn entries_mut(&mut self) -> &mut [SummaryEntry] {
        &mut self.entries
    }

    /// The entry covering `value`, if any.
    ///
    /// Checks for an exact singleton entry first, then falls back to a linear
    /// containment scan over the (few) ranges.
    pub fn find(&self, value: i64) -> Option<&SummaryEntry> {
        self.find_index(value).map(|i| &self.entries[i])
    }

    fn find_index(&self, value: i64) -> Option<usize> {
        let probe = Range::singleton(value);
        self.entries
            .iter()
            .position(|e| e.range == probe)
            .or_else(|| self.entries.iter().position(|e| e.range.contains(value)))
    }

    /// Record another occurrence of `value` if some entry already covers it.
    pub(crate) fn record_existing(&mut self, value: i64) -> bool {
        match self.find_index(value) {
            Some(i) => {
                self.entries[i].stats.record_occurrence();
                self.total_values += 1;
                true
            }
            None => false,
        }
    }

    /// Insert a new singleton entry with count 1 for a value no range covers.
    pub(crate) fn insert_singleton(&mut self, value: i64) {
        self.insert_sorted(Range::singleton(value), RangeStats::new(1));
        self.total_values += 1;
    }

    /// Remove the entry keyed by exactly `range`, returning its stats.
    pub(crate) fn remove(&mut self, range: &Range) -> Option<RangeStats> {
        let i = self.entries.iter().position(|e| e.range == *range)?;
        Some(self.entries.remove(i).stats)
    }

    /// Insert an entry produced by a merge or split. The caller is the only
    /// party allowed to fabricate range boundaries, and must hand over counts
    /// taken out via `remove` so the total stays conserved.
    pub(crate) fn put(&mut self, range: Range, stats: RangeStats) {
        self.insert_sorted(range, stats);
    }

    fn insert_sorted(&mut self, range: Range, stats: RangeStats) {
        let at = self
            .entries
            .partition_point(|e| e.range.low() < range.low());
        self.entries.insert(at, SummaryEntry { range, stats });
        debug_assert!(
            self.is_disjoint_sorted(),
            "summary ranges overlap after insert of {range}"
        );
    }

    pub(crate) fn is_disjoint_sorted(&self) -> bool {
        let ranges: Vec<Range> = self.entries.iter().map(|e| e.range).collect();
        is_disjoint_sorted(&ranges)
    }
}
