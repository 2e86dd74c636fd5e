//! Block-sum matching between a positive and a negative block assignment.
//!
//! Two assignments into `k` blocks form `k` zero-sum groups iff the multiset
//! of positive block sums equals the multiset of negated negative block sums.
//! Sorting both sum buffers makes block identity irrelevant; only the
//! multisets are compared.

/// Per-block sum accumulator for one search.
///
/// The two buffers are cleared and refilled for every candidate and only
/// grow when `k` does, so the hot loop does not allocate. Each search owns
/// its own matcher; nothing here is shared between threads.
#[derive(Clone, Debug, Default)]
pub struct GroupMatcher {
    positive_sums: Vec<i128>,
    negative_sums: Vec<i128>,
}

impl GroupMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `k` if the block sums pair up into `k` zero-sum groups, else `0`.
    ///
    /// Only `a + b == 0` between paired block sums is tested, so the two sides
    /// may be passed in either order as long as values and assignments agree.
    pub fn count_groups(
        &mut self,
        positive_values: &[i64],
        negative_values: &[i64],
        positive_blocks: &[usize],
        negative_blocks: &[usize],
        k: usize,
    ) -> usize {
        debug_assert_eq!(positive_values.len(), positive_blocks.len());
        debug_assert_eq!(negative_values.len(), negative_blocks.len());
        reset(&mut self.positive_sums, k);
        reset(&mut self.negative_sums, k);
        for (&v, &b) in positive_values.iter().zip(positive_blocks) {
            self.positive_sums[b] += i128::from(v);
        }
        for (&v, &b) in negative_values.iter().zip(negative_blocks) {
            self.negative_sums[b] -= i128::from(v);
        }
        self.positive_sums.sort_unstable();
        self.negative_sums.sort_unstable();
        if self.positive_sums == self.negative_sums {
            k
        } else {
            0
        }
    }
}

#[inline]
fn reset(buf: &mut Vec<i128>, k: usize) {
    buf.clear();
    buf.resize(k, 0);
}

/// Lay out a validated matching as consecutive zero-sum groups.
///
/// Values are bucketed by block id; both sides' buckets are ordered by the
/// absolute value of their sum (stable, so ties keep block-id order), the
/// i-th positive bucket is paired with the i-th negative bucket, and each
/// pair is emitted positives first.
pub fn build_solution(
    positive_values: &[i64],
    negative_values: &[i64],
    positive_blocks: &[usize],
    negative_blocks: &[usize],
    k: usize,
) -> Vec<i64> {
    let positive = bucket(positive_values, positive_blocks, k);
    let negative = bucket(negative_values, negative_blocks, k);
    let mut out = Vec::with_capacity(positive_values.len() + negative_values.len());
    for (p, n) in positive.into_iter().zip(negative) {
        out.extend(p);
        out.extend(n);
    }
    out
}

fn bucket(values: &[i64], blocks: &[usize], k: usize) -> Vec<Vec<i64>> {
    let mut buckets: Vec<Vec<i64>> = vec![Vec::new(); k];
    for (&v, &b) in values.iter().zip(blocks) {
        buckets[b].push(v);
    }
    buckets.sort_by_key(|members| crate::ledger::wide_sum(members).unsigned_abs());
    buckets
}
