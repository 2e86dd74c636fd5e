//! Exhaustive bisection simplifier.
//!
//! Tries every split of the values into two zero-sum halves, recurses into
//! both, and keeps the split with the most groups. Exponential in the input
//! length; intended as an independent optimality check for small ledgers.

use tracing::trace;

use crate::error::SimplifyError;
use crate::ledger::is_group;
use crate::simplify::Simplifier;

/// Largest input a subset mask can address.
pub const MAX_BISECTION_LEN: usize = 63;

/// Lazy sequence of the proper subsets of `0..len` that contain index 0,
/// encoded as bitmasks. Each unordered split `{A, B}` appears exactly once.
#[derive(Clone, Debug)]
pub struct SubsetMasks {
    next: u64,
    end: u64,
}

impl SubsetMasks {
    pub fn new(len: usize) -> Result<Self, SimplifyError> {
        if len == 0 || len > MAX_BISECTION_LEN {
            return Err(SimplifyError::invalid(format!(
                "bisection supports 1..={MAX_BISECTION_LEN} values, got {len}"
            )));
        }
        Ok(Self {
            next: 0,
            // Excludes the all-ones tail, i.e. the full set.
            end: (1u64 << (len - 1)) - 1,
        })
    }

    /// Rewind to the first mask.
    pub fn restart(&mut self) {
        self.next = 0;
    }
}

impl Iterator for SubsetMasks {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.next >= self.end {
            return None;
        }
        let mask = (self.next << 1) | 1;
        self.next += 1;
        Some(mask)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = usize::try_from(self.end - self.next).unwrap_or(usize::MAX);
        (left, Some(left))
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BisectionSimplifier;

impl Simplifier for BisectionSimplifier {
    fn name(&self) -> &'static str {
        "bisection"
    }

    fn group_nontrivial(&self, values: &[i64]) -> Result<Vec<i64>, SimplifyError> {
        let groups = best_split(values)?;
        trace!(groups = groups.len(), "bisection done");
        Ok(groups.into_iter().flatten().collect())
    }
}

fn best_split(values: &[i64]) -> Result<Vec<Vec<i64>>, SimplifyError> {
    let positives = values.iter().filter(|&&v| v > 0).count();
    let ceiling = positives.min(values.len() - positives);
    let mut best: Vec<Vec<i64>> = Vec::new();
    if ceiling > 1 {
        for mask in SubsetMasks::new(values.len())? {
            let (inside, outside) = split_by_mask(values, mask);
            // The whole set balances, so one balanced half implies the other.
            if !is_group(&inside) {
                continue;
            }
            let mut groups = best_split(&inside)?;
            groups.extend(best_split(&outside)?);
            if groups.len() > best.len() {
                best = groups;
                if best.len() == ceiling {
                    break;
                }
            }
        }
    }
    if best.is_empty() {
        best.push(values.to_vec());
    }
    Ok(best)
}

fn split_by_mask(values: &[i64], mask: u64) -> (Vec<i64>, Vec<i64>) {
    let mut inside = Vec::with_capacity(values.len());
    let mut outside = Vec::with_capacity(values.len());
    for (i, &v) in values.iter().enumerate() {
        if mask & (1 << i) != 0 {
            inside.push(v);
        } else {
            outside.push(v);
        }
    }
    (inside, outside)
}
