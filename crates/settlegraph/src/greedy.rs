//! Greedy combinational simplifier: fast, possibly suboptimal.
//!
//! Positive values are walked as index combinations in size-then-lex order.
//! For each one, negative combinations are scanned for an equal magnitude;
//! the first exact hit is emitted as a group and both combinations are
//! deleted from their lists. Small groups are therefore taken first, which is
//! usually but not always optimal.

use tracing::trace;

use crate::combination::CombinationIndexGenerator;
use crate::error::SimplifyError;
use crate::ledger::{split_by_sign, wide_sum, GraphSplit};
use crate::simplify::Simplifier;

#[derive(Clone, Copy, Debug, Default)]
pub struct GreedySimplifier;

impl Simplifier for GreedySimplifier {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn group_nontrivial(&self, values: &[i64]) -> Result<Vec<i64>, SimplifyError> {
        let GraphSplit {
            mut positive,
            mut negative,
        } = split_by_sign(values)?;
        // Both ascending by magnitude.
        positive.sort_unstable();
        negative.sort_unstable_by(|a, b| b.cmp(a));

        let mut out = Vec::with_capacity(values.len());
        if positive.is_empty() || negative.is_empty() {
            out.extend(positive);
            out.extend(negative);
            return Ok(out);
        }
        let mut groups = 0usize;
        let mut outer = CombinationIndexGenerator::new(positive.len())?;
        'outer: while outer.advance() {
            if negative.is_empty() {
                break;
            }
            let target = pick_sum(&positive, outer.indices());
            let mut inner = CombinationIndexGenerator::new(negative.len())?;
            while inner.advance() {
                let magnitude = -pick_sum(&negative, inner.indices());
                if magnitude > target {
                    if inner.has_no_gaps() {
                        continue 'outer;
                    }
                } else if magnitude == target {
                    let taken_pos = outer.indices().to_vec();
                    let taken_neg = inner.indices().to_vec();
                    out.extend(taken_pos.iter().map(|&i| positive[i]));
                    out.extend(taken_neg.iter().map(|&i| negative[i]));
                    remove_indices(&mut positive, &taken_pos);
                    remove_indices(&mut negative, &taken_neg);
                    outer.shrink_after_removing(&taken_pos)?;
                    groups += 1;
                    trace!(
                        positives = taken_pos.len(),
                        negatives = taken_neg.len(),
                        "greedy group"
                    );
                    continue 'outer;
                }
            }
        }
        if !positive.is_empty() || !negative.is_empty() {
            // The leftovers balance; emit them as one final group.
            debug_assert_eq!(wide_sum(&positive), -wide_sum(&negative));
            groups += 1;
            out.extend(positive);
            out.extend(negative);
        }
        trace!(groups, "greedy done");
        Ok(out)
    }
}

fn pick_sum(values: &[i64], indices: &[usize]) -> i128 {
    indices.iter().map(|&i| i128::from(values[i])).sum()
}

/// `indices` must be strictly increasing.
fn remove_indices(values: &mut Vec<i64>, indices: &[usize]) {
    for &i in indices.iter().rev() {
        values.remove(i);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::count_groups;

    fn sorted(mut v: Vec<i64>) -> Vec<i64> {
        v.sort_unstable();
        v
    }

    #[test]
    fn takes_small_groups_first() {
        let input = [1, 2, -3, 4, 5, -9];
        let out = GreedySimplifier.simplify(&input).unwrap();
        assert_eq!(sorted(out.clone()), sorted(input.to_vec()));
        assert_eq!(count_groups(&out).unwrap(), 2);
        assert_eq!(&out[..3], &[1, 2, -3]);
    }

    #[test]
    fn single_group_is_returned_whole() {
        let out = GreedySimplifier.simplify(&[2, -3, 5, -9, 5]).unwrap();
        assert_eq!(count_groups(&out).unwrap(), 1);
        assert_eq!(sorted(out), vec![-9, -3, 2, 5, 5]);
    }

    #[test]
    fn residue_forms_a_final_group() {
        // Target 5 is pruned at magnitude 6 before {2, 3} is tried; once 6
        // takes -6 the walk has no combination left and {5, -2, -3} remains.
        let out = GreedySimplifier
            .group_nontrivial(&[5, 6, -2, -3, -6])
            .unwrap();
        assert_eq!(out, vec![6, -6, 5, -2, -3]);
    }

    #[test]
    fn never_beats_the_partition_search() {
        let input = [3, 3, 3, -1, -2, -2, -4];
        let greedy = count_groups(&GreedySimplifier.simplify(&input).unwrap()).unwrap();
        let optimal = count_groups(&crate::simplify::simplify(&input).unwrap()).unwrap();
        assert!(greedy <= optimal);
        assert_eq!(optimal, 2);
    }

    #[test]
    fn removes_indices_back_to_front() {
        let mut v = vec![10, 11, 12, 13, 14];
        remove_indices(&mut v, &[0, 2, 4]);
        assert_eq!(v, vec![11, 13]);
    }
}
