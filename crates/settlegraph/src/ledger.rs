//! Equity arrays: balance checks, run counting and the stripping pipeline.
//!
//! An equity array holds one signed balance per party; a balanced ledger sums
//! to zero. Sums are accumulated in `i128`, so no `i64` input can overflow them.

use std::collections::HashMap;

use crate::error::SimplifyError;

#[inline]
pub(crate) fn wide_sum(values: &[i64]) -> i128 {
    values.iter().map(|&v| i128::from(v)).sum()
}

/// True iff `equities` sums to exactly zero.
pub fn is_group(equities: &[i64]) -> bool {
    wide_sum(equities) == 0
}

/// `InvalidArgument` unless `equities` sums to zero.
pub fn check_is_group(equities: &[i64]) -> Result<(), SimplifyError> {
    let sum = wide_sum(equities);
    if sum != 0 {
        return Err(SimplifyError::invalid(format!(
            "equities sum to {sum}, expected 0"
        )));
    }
    Ok(())
}

/// Number of zero-summing runs when reading `equities` left to right.
///
/// Every zero counts as its own trivial group and does not disturb the run
/// it sits in. Used as a lower bound on the achievable group count.
pub fn count_groups(equities: &[i64]) -> Result<usize, SimplifyError> {
    check_is_group(equities)?;
    let mut sum: i128 = 0;
    let mut count = 0;
    for &v in equities {
        if v == 0 {
            count += 1;
            continue;
        }
        sum += i128::from(v);
        if sum == 0 {
            count += 1;
        }
    }
    Ok(count)
}

/// Cut `equities` into maximal-count contiguous runs that each sum to zero.
///
/// A trailing remainder that does not close is returned as a final run.
pub fn zero_sum_runs(equities: &[i64]) -> Vec<&[i64]> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut sum: i128 = 0;
    for (i, &v) in equities.iter().enumerate() {
        sum += i128::from(v);
        if sum == 0 {
            runs.push(&equities[start..=i]);
            start = i + 1;
        }
    }
    if start < equities.len() {
        runs.push(&equities[start..]);
    }
    runs
}

/// Remove zero-valued nodes. Returns the nonzero values in input order and
/// the number of zeros removed.
pub fn strip_trivial_groups(equities: &[i64]) -> (Vec<i64>, usize) {
    let rest: Vec<i64> = equities.iter().copied().filter(|&v| v != 0).collect();
    let zeros = equities.len() - rest.len();
    (rest, zeros)
}

/// Result of [`strip_semitrivial_groups`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SemitrivialSplit {
    /// Flattened `[v, -v]` pairs, one pair per semi-trivial group.
    pub pairs: Vec<i64>,
    /// Values left without an exact opposite.
    pub rest: Vec<i64>,
}

/// Pair every `v` with a `-v` (by multiplicity); the leftovers are returned
/// grouped by value in order of first appearance.
pub fn strip_semitrivial_groups(values: &[i64]) -> SemitrivialSplit {
    let mut counts: HashMap<i64, usize> = HashMap::with_capacity(values.len());
    for &v in values {
        *counts.entry(v).or_default() += 1;
    }
    let mut out = SemitrivialSplit {
        pairs: Vec::with_capacity(values.len()),
        rest: Vec::with_capacity(values.len()),
    };
    for &v in values {
        let here = counts.get(&v).copied().unwrap_or(0);
        if here == 0 {
            continue;
        }
        // i64::MIN has no opposite.
        let opposite_key = v.checked_neg();
        let opposite = opposite_key
            .and_then(|o| counts.get(&o).copied())
            .unwrap_or(0);
        match opposite_key {
            Some(o) if opposite > 0 && v != 0 => {
                let pairs = here.min(opposite);
                for _ in 0..pairs {
                    out.pairs.push(v);
                    out.pairs.push(o);
                }
                counts.insert(v, here - pairs);
                counts.insert(o, opposite - pairs);
            }
            _ => {
                out.rest.extend(std::iter::repeat(v).take(here));
                counts.insert(v, 0);
            }
        }
    }
    out
}

/// Nonzero values split by sign, each side in input order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphSplit {
    pub positive: Vec<i64>,
    pub negative: Vec<i64>,
}

/// Partition nonzero values into positive and negative sides.
pub fn split_by_sign(values: &[i64]) -> Result<GraphSplit, SimplifyError> {
    let mut split = GraphSplit::default();
    for (i, &v) in values.iter().enumerate() {
        match v {
            v if v > 0 => split.positive.push(v),
            v if v < 0 => split.negative.push(v),
            _ => {
                return Err(SimplifyError::invalid(format!(
                    "zero element at index {i}"
                )))
            }
        }
    }
    Ok(split)
}

/// A ledger separated into trivial, semi-trivial and non-trivial parts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LedgerSplit {
    /// Number of zero-valued nodes.
    pub trivial: usize,
    /// Flattened `[v, -v]` pairs.
    pub semitrivial: Vec<i64>,
    /// Everything else; balanced whenever the whole ledger is.
    pub nontrivial: Vec<i64>,
}

impl LedgerSplit {
    pub fn new(equities: &[i64]) -> Self {
        let (nonzero, trivial) = strip_trivial_groups(equities);
        let SemitrivialSplit { pairs, rest } = strip_semitrivial_groups(&nonzero);
        Self {
            trivial,
            semitrivial: pairs,
            nontrivial: rest,
        }
    }

    /// Reassemble: grouped non-trivial part, then the zeros, then the pairs.
    pub fn assemble(&self, grouped_nontrivial: Vec<i64>) -> Vec<i64> {
        let mut out = grouped_nontrivial;
        out.reserve(self.trivial + self.semitrivial.len());
        out.extend(std::iter::repeat(0).take(self.trivial));
        out.extend_from_slice(&self.semitrivial);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_checks() {
        assert!(is_group(&[0, -3, 2, -1, 2]));
        assert!(!is_group(&[0, -2, 2, -1, 2]));
        assert!(!is_group(&[0, -4, 2, -1, 2]));
        assert!(is_group(&[]));
        assert!(is_group(&[i64::MAX, i64::MAX, -i64::MAX, -i64::MAX]));
        assert!(check_is_group(&[1, 2]).is_err());
    }

    #[test]
    fn counts_runs_and_zeros() {
        assert_eq!(count_groups(&[-1, 3, -2, 0, 10, -4, -7, 1]).unwrap(), 3);
        assert_eq!(count_groups(&[0, 0]).unwrap(), 2);
        assert_eq!(count_groups(&[]).unwrap(), 0);
        assert!(matches!(
            count_groups(&[-1, 3, -2, 0, 10, -4, 7]),
            Err(SimplifyError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn runs_are_contiguous_zero_sums() {
        let values = [3, -1, -2, 0, 4, -4];
        let runs = zero_sum_runs(&values);
        assert_eq!(runs, vec![&[3, -1, -2][..], &[0][..], &[4, -4][..]]);
    }

    #[test]
    fn strips_trivial_groups() {
        let (rest, zeros) = strip_trivial_groups(&[2, 0, -3, 1, 0]);
        assert_eq!(rest, vec![2, -3, 1]);
        assert_eq!(zeros, 2);
    }

    #[test]
    fn ledger_split_matches_known_layout() {
        let split = LedgerSplit::new(&[2, 0, -3, 1, 4, -4, 0]);
        assert_eq!(split.trivial, 2);
        let mut semi = split.semitrivial.clone();
        semi.sort_unstable();
        assert_eq!(semi, vec![-4, 4]);
        let mut rest = split.nontrivial.clone();
        rest.sort_unstable();
        assert_eq!(rest, vec![-3, 1, 2]);
    }

    #[test]
    fn semitrivial_pairs_respect_multiplicity() {
        let out = strip_semitrivial_groups(&[3, -3, 3, 5, -3, -3]);
        assert_eq!(out.pairs, vec![3, -3, 3, -3]);
        assert_eq!(out.rest, vec![-3, 5]);
        let out = strip_semitrivial_groups(&[3, -3, 3]);
        assert_eq!(out.pairs, vec![3, -3]);
        assert_eq!(out.rest, vec![3]);
        let out = strip_semitrivial_groups(&[i64::MIN, 7]);
        assert!(out.pairs.is_empty());
        assert_eq!(out.rest, vec![i64::MIN, 7]);
    }

    #[test]
    fn splits_by_sign_in_order() {
        let gs = split_by_sign(&[2, -3, 5, -9, 5]).unwrap();
        assert_eq!(gs.positive, vec![2, 5, 5]);
        assert_eq!(gs.negative, vec![-3, -9]);
        assert!(split_by_sign(&[1, 0, -1]).is_err());
    }

    #[test]
    fn assemble_appends_zeros_then_pairs() {
        let split = LedgerSplit::new(&[0, 4, -4, 0, 3, -1, -2]);
        assert_eq!(split.assemble(vec![3, -1, -2]), vec![3, -1, -2, 0, 0, 4, -4]);
    }
}
