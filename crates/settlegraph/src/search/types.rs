//! Data types shared by the ascending/descending searches and the race.

use std::fmt;

use crate::ledger::GraphSplit;
use crate::matcher::build_solution;

/// Which search produced (or failed to produce) a result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchSide {
    /// Exhaustive sweep from the floor upward.
    Ascending,
    /// Sweep from `k = n` downward; first success is optimal.
    Descending,
}

impl fmt::Display for SearchSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "ascending"),
            Self::Descending => write!(f, "descending"),
        }
    }
}

/// How `find_matching` schedules the two searches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchStrategy {
    /// Run both on two threads; the first to finish cancels the other.
    #[default]
    Race,
    AscendingOnly,
    DescendingOnly,
}

/// Search configuration.
#[derive(Clone, Copy, Debug)]
pub struct SearchCfg {
    pub strategy: SearchStrategy,
    /// Start the sweeps at the number of zero-sum runs already present in the
    /// input instead of `k = 1`. Only prunes; never changes the answer.
    pub use_group_hint: bool,
    /// Degrade `Race` to `DescendingOnly` on hosts with a single hardware thread.
    pub single_core_fallback: bool,
}

impl Default for SearchCfg {
    fn default() -> Self {
        Self {
            strategy: SearchStrategy::Race,
            use_group_hint: true,
            single_core_fallback: true,
        }
    }
}

/// The two sign sides of a ledger, ordered so that `small` is never longer
/// than `large`.
///
/// The descending search opens an exact `k`-partition of the large side for
/// every `k` the small side proposes; the ordering keeps `k <= large.len()`.
#[derive(Clone, Copy, Debug)]
pub struct Sides<'a> {
    small: &'a [i64],
    large: &'a [i64],
    small_is_positive: bool,
}

impl<'a> Sides<'a> {
    /// Order the sides; on equal lengths the negative side is treated as small.
    pub fn new(positive: &'a [i64], negative: &'a [i64]) -> Self {
        if positive.len() < negative.len() {
            Self {
                small: positive,
                large: negative,
                small_is_positive: true,
            }
        } else {
            Self {
                small: negative,
                large: positive,
                small_is_positive: false,
            }
        }
    }

    pub fn from_split(split: &'a GraphSplit) -> Self {
        Self::new(&split.positive, &split.negative)
    }

    #[inline]
    pub fn small(&self) -> &'a [i64] {
        self.small
    }

    #[inline]
    pub fn large(&self) -> &'a [i64] {
        self.large
    }

    #[inline]
    pub fn small_is_positive(&self) -> bool {
        self.small_is_positive
    }
}

/// A validated block assignment of both sides into `block_count` groups.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Matching {
    pub small_blocks: Vec<usize>,
    pub large_blocks: Vec<usize>,
    pub block_count: usize,
}

impl Matching {
    pub(crate) fn capture(small_blocks: &[usize], large_blocks: &[usize], k: usize) -> Self {
        Self {
            small_blocks: small_blocks.to_vec(),
            large_blocks: large_blocks.to_vec(),
            block_count: k,
        }
    }

    /// Lay the matched values out as consecutive groups, positives first.
    pub fn to_solution(&self, sides: &Sides<'_>) -> Vec<i64> {
        if sides.small_is_positive {
            build_solution(
                sides.small,
                sides.large,
                &self.small_blocks,
                &self.large_blocks,
                self.block_count,
            )
        } else {
            build_solution(
                sides.large,
                sides.small,
                &self.large_blocks,
                &self.small_blocks,
                self.block_count,
            )
        }
    }
}

/// What a single search reports back to its coordinator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The search ran to its natural end (exhaustion or first success).
    Finished(Option<Matching>),
    /// The search observed its stop flag and abandoned its bookkeeping.
    Cancelled,
}
