//! The `Simplifier` interface and the partitional (optimal) simplifier.
//!
//! Every simplifier shares the same outer pipeline: validate the ledger,
//! strip zeros and `+v/-v` pairs, group what is left, then append the zeros
//! and the pairs after the grouped part. Implementations differ only in how
//! they group the non-trivial remainder.

use tracing::debug;

use crate::error::SimplifyError;
use crate::ledger::{check_is_group, count_groups, split_by_sign, LedgerSplit};
use crate::search::{find_matching, SearchCfg, Sides};

/// Reorders a balanced equity array into consecutive zero-sum runs.
pub trait Simplifier {
    /// Short, stable identifier used in logs and reports.
    fn name(&self) -> &'static str;

    /// Group a balanced array of nonzero values that contains no `+v/-v`
    /// pair. The result must be a permutation of `values` in which
    /// consecutive runs sum to zero.
    fn group_nontrivial(&self, values: &[i64]) -> Result<Vec<i64>, SimplifyError>;

    /// Permutation of `equities` grouped so that consecutive runs each sum
    /// to zero. Fails with `InvalidArgument` if `equities` does not balance.
    fn simplify(&self, equities: &[i64]) -> Result<Vec<i64>, SimplifyError> {
        check_is_group(equities)?;
        if equities.iter().all(|&v| v == 0) {
            return Ok(equities.to_vec());
        }
        let split = LedgerSplit::new(equities);
        let grouped = if split.nontrivial.is_empty() {
            Vec::new()
        } else {
            self.group_nontrivial(&split.nontrivial)?
        };
        let out = split.assemble(grouped);
        debug!(
            simplifier = self.name(),
            len = equities.len(),
            zeros = split.trivial,
            pairs = split.semitrivial.len() / 2,
            "simplified"
        );
        Ok(out)
    }
}

/// Optimal simplifier: block-partition search on both sign sides.
#[derive(Clone, Copy, Debug, Default)]
pub struct PartitionalSimplifier {
    pub cfg: SearchCfg,
}

impl PartitionalSimplifier {
    pub fn new(cfg: SearchCfg) -> Self {
        Self { cfg }
    }
}

impl Simplifier for PartitionalSimplifier {
    fn name(&self) -> &'static str {
        "partitional"
    }

    fn group_nontrivial(&self, values: &[i64]) -> Result<Vec<i64>, SimplifyError> {
        let floor = if self.cfg.use_group_hint {
            count_groups(values)?
        } else {
            1
        };
        let split = split_by_sign(values)?;
        let sides = Sides::from_split(&split);
        let matching = find_matching(sides, floor, &self.cfg)?;
        debug!(
            k = matching.block_count,
            hint = floor,
            "partitional matching found"
        );
        Ok(matching.to_solution(&sides))
    }
}

/// Simplify `equities` with the default racing partitional search.
pub fn simplify(equities: &[i64]) -> Result<Vec<i64>, SimplifyError> {
    PartitionalSimplifier::default().simplify(equities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::zero_sum_runs;
    use crate::search::SearchStrategy;

    fn sorted(mut v: Vec<i64>) -> Vec<i64> {
        v.sort_unstable();
        v
    }

    #[test]
    fn rejects_unbalanced_input() {
        assert!(matches!(
            simplify(&[1, 2, -2]),
            Err(SimplifyError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn empty_and_all_zero_inputs_pass_through() {
        assert_eq!(simplify(&[]).unwrap(), Vec::<i64>::new());
        assert_eq!(simplify(&[0, 0, 0]).unwrap(), vec![0, 0, 0]);
    }

    #[test]
    fn only_pairs_and_zeros_skip_the_search() {
        let out = simplify(&[5, 0, -5, 1, -1]).unwrap();
        assert_eq!(out, vec![0, 5, -5, 1, -1]);
    }

    #[test]
    fn grouped_part_comes_before_zeros_and_pairs() {
        let out = simplify(&[0, 4, -4, 0, 3, -1, -2]).unwrap();
        assert_eq!(out, vec![3, -1, -2, 0, 0, 4, -4]);
        assert_eq!(count_groups(&out).unwrap(), 4);
    }

    #[test]
    fn every_strategy_reaches_the_same_count() {
        let input = [6, -5, 4, -5, 9, -3, 1, -7];
        let counts: Vec<usize> = [
            SearchStrategy::Race,
            SearchStrategy::AscendingOnly,
            SearchStrategy::DescendingOnly,
        ]
        .into_iter()
        .map(|strategy| {
            let s = PartitionalSimplifier::new(SearchCfg {
                strategy,
                use_group_hint: false,
                ..SearchCfg::default()
            });
            let out = s.simplify(&input).unwrap();
            assert_eq!(sorted(out.clone()), sorted(input.to_vec()));
            count_groups(&out).unwrap()
        })
        .collect();
        assert_eq!(counts, vec![2, 2, 2]);
    }

    #[test]
    fn group_hint_never_changes_the_answer() {
        let input = [1, 2, -3, 4, 5, -9, 2, -1, -1];
        let with = PartitionalSimplifier::default().simplify(&input).unwrap();
        let without = PartitionalSimplifier::new(SearchCfg {
            use_group_hint: false,
            ..SearchCfg::default()
        })
        .simplify(&input)
        .unwrap();
        assert_eq!(count_groups(&with).unwrap(), count_groups(&without).unwrap());
        assert!(zero_sum_runs(&with).iter().all(|r| r.iter().sum::<i64>() == 0));
    }
}
