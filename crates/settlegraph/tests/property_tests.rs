//! Property-based tests for simplification invariants.
//!
//! - Output is a permutation of the input.
//! - Every consecutive run of the output balances.
//! - Simplifying twice finds no more groups.
//! - Racing, ascending-only and descending-only reach the same group count.
//! - Greedy never beats the optimum; bisection always matches it.

use proptest::prelude::*;
use settlegraph::partition::{is_canonical_partition, ExactPartitionGenerator};
use settlegraph::prelude::*;

/// Balanced ledgers of up to eight small values: random head, balancing tail.
fn ledger_strategy() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-12i64..=12, 1..8).prop_map(|mut values| {
        let tail: i64 = values.iter().sum();
        values.push(-tail);
        values
    })
}

/// Never degrades `Race` to one search, even on a single hardware thread.
fn with_strategy(strategy: SearchStrategy) -> PartitionalSimplifier {
    PartitionalSimplifier::new(SearchCfg {
        strategy,
        single_core_fallback: false,
        ..SearchCfg::default()
    })
}

fn sorted(mut v: Vec<i64>) -> Vec<i64> {
    v.sort_unstable();
    v
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn output_is_a_balanced_permutation(input in ledger_strategy()) {
        let out = simplify(&input).unwrap();
        prop_assert_eq!(sorted(out.clone()), sorted(input));
        prop_assert!(zero_sum_runs(&out).iter().all(|r| is_group(r)));
    }

    #[test]
    fn simplifying_twice_gains_nothing(input in ledger_strategy()) {
        let once = simplify(&input).unwrap();
        let twice = simplify(&once).unwrap();
        prop_assert_eq!(count_groups(&once).unwrap(), count_groups(&twice).unwrap());
    }

    #[test]
    fn race_matches_both_directions(input in ledger_strategy()) {
        let race = count_groups(&with_strategy(SearchStrategy::Race).simplify(&input).unwrap()).unwrap();
        let asc = count_groups(&with_strategy(SearchStrategy::AscendingOnly).simplify(&input).unwrap()).unwrap();
        let desc = count_groups(&with_strategy(SearchStrategy::DescendingOnly).simplify(&input).unwrap()).unwrap();
        prop_assert_eq!(race, asc);
        prop_assert_eq!(race, desc);
    }

    #[test]
    fn greedy_is_bounded_and_bisection_is_exact(input in ledger_strategy()) {
        let optimal = count_groups(&simplify(&input).unwrap()).unwrap();
        let greedy = GreedySimplifier.simplify(&input).unwrap();
        prop_assert_eq!(sorted(greedy.clone()), sorted(input.clone()));
        prop_assert!(count_groups(&greedy).unwrap() <= optimal);
        let bisected = count_groups(&BisectionSimplifier.simplify(&input).unwrap()).unwrap();
        prop_assert_eq!(bisected, optimal);
    }

    #[test]
    fn exact_partitions_stay_canonical(n in 1usize..8, k_seed in 0usize..8) {
        let k = 1 + k_seed % n;
        let mut gen = ExactPartitionGenerator::new(n, k).unwrap();
        let mut seen = std::collections::HashSet::new();
        loop {
            prop_assert!(is_canonical_partition(gen.block_ids(), k));
            prop_assert!(seen.insert(gen.block_ids().to_vec()));
            if !gen.advance() {
                break;
            }
        }
    }
}
