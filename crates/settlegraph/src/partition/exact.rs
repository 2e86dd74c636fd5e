//! Set partitions into exactly `k` blocks, in restricted-growth-string order.

use crate::error::SimplifyError;

/// Enumerates every partition of `n` labeled positions into exactly `k`
/// nonempty unordered blocks.
///
/// The current partition is the restricted growth string `s` (block id per
/// position) together with `m`, where `m[i]` is the largest block id among
/// positions `0..=i`. At every emitted state:
/// - `s[i] <= m[i]`, `m` is non-decreasing and `m[i] <= m[i-1] + 1`;
/// - `m[n-1] == k-1`, so exactly the ids `0..k` are in use.
///
/// Block relabelings of the same partition therefore never appear twice.
#[derive(Clone, Debug)]
pub struct ExactPartitionGenerator {
    k: usize,
    s: Vec<usize>,
    m: Vec<usize>,
}

impl ExactPartitionGenerator {
    /// Start at the lexicographically smallest canonical partition: the first
    /// `n-k+1` positions in block 0, then one new block per remaining position.
    pub fn new(n: usize, k: usize) -> Result<Self, SimplifyError> {
        if n < 1 {
            return Err(SimplifyError::invalid("'n' must be at least 1"));
        }
        if k < 1 {
            return Err(SimplifyError::invalid("'k' must be at least 1"));
        }
        if k > n {
            return Err(SimplifyError::invalid(format!(
                "'k' ({k}) exceeds 'n' ({n})"
            )));
        }
        Ok(Self::first(n, k))
    }

    /// Unchecked constructor for callers that already validated `1 <= k <= n`.
    pub(crate) fn first(n: usize, k: usize) -> Self {
        let mut s = vec![0; n];
        for (i, id) in s.iter_mut().enumerate().skip(n - k + 1) {
            *id = i + k - n;
        }
        let m = s.clone();
        Self { k, s, m }
    }

    /// Step to the next canonical partition. Returns `false` once every
    /// partition with exactly `k` blocks has been emitted; the state is then
    /// unspecified.
    pub fn advance(&mut self) -> bool {
        let n = self.s.len();
        let k = self.k;
        for i in (1..n).rev() {
            if self.s[i] < k - 1 && self.s[i] <= self.m[i - 1] {
                self.s[i] += 1;
                self.m[i] = self.m[i - 1].max(self.s[i]);
                // Positions from `forced` on must open the still-missing blocks.
                let forced = n - k + self.m[i] + 1;
                let top = self.m[i];
                for j in i + 1..forced {
                    self.s[j] = 0;
                    self.m[j] = top;
                }
                for j in forced..n {
                    self.s[j] = j + k - n;
                    self.m[j] = self.s[j];
                }
                return true;
            }
        }
        false
    }

    /// Block id per position for the current partition.
    #[inline]
    pub fn block_ids(&self) -> &[usize] {
        &self.s
    }

    #[cfg(test)]
    pub(super) fn prefix_maxima(&self) -> &[usize] {
        &self.m
    }
}

/// True iff `ids` is a restricted growth string using exactly the ids `0..k`.
pub fn is_canonical_partition(ids: &[usize], k: usize) -> bool {
    let mut max_seen: Option<usize> = None;
    for &id in ids {
        let limit = max_seen.map_or(0, |m| m + 1);
        if id > limit {
            return false;
        }
        max_seen = Some(max_seen.map_or(id, |m| m.max(id)));
    }
    match max_seen {
        Some(m) => m + 1 == k,
        None => k == 0,
    }
}
