use crate::median::estimator::RunningMedian;

/// Exact median by the full-history method: sort everything, take the middle
/// (averaging the two middles for even counts).
pub fn exact_median(values: &[i64]) -> f64 {
    assert!(!values.is_empty(), "exact_median() requires non-empty values");
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid] as f64
    } else {
        (sorted[mid - 1] + sorted[mid]) as f64 / 2.0
    }
}

/// Assert the structural invariants that must hold after every public call:
/// entries pairwise disjoint and sorted by low, occurrence counts summing to
/// the number of inserts, and the summary within its configured capacity.
pub fn assert_summary_invariants(rm: &RunningMedian, expected_total: u64) {
    let entries = rm.describe();

    for w in entries.windows(2) {
        assert!(
            w[0].0.high() < w[1].0.low(),
            "summary ranges out of order or overlapping: {} then {}",
            w[0].0,
            w[1].0
        );
    }

    let counted: u64 = entries.iter().map(|(_, s)| s.occurrence_count()).sum();
    assert_eq!(
        counted, expected_total,
        "occurrence counts no longer sum to the insert count"
    );
    assert_eq!(rm.total_values(), expected_total);

    assert!(
        rm.len() <= rm.capacity(),
        "summary holds {} entries, capacity is {}",
        rm.len(),
        rm.capacity()
    );
}
