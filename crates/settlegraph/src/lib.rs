//! Settlement-graph simplification.
//!
//! A settlement graph is a ledger of signed balances that sums to zero. The
//! crate reorders such a ledger into the largest number of consecutive
//! zero-sum groups; each group settles internally with `len - 1` transfers.
//!
//! Layout
//! - `partition`: restricted-growth set partitions, exact `k` and swept `k`.
//! - `matcher`: per-block sum matching and solution layout.
//! - `search`: ascending/descending partition searches and the two-thread race.
//! - `simplify`: the `Simplifier` pipeline and the optimal partitional simplifier.
//! - `greedy`, `bisect`: a fast heuristic and an exhaustive reference simplifier.
//! - `combination`: shrinkable index combinations for the greedy walk.
//! - `ledger`: balance checks, run counting and trivial/semi-trivial stripping.
//! - `sample`: reproducible random ledgers.

pub mod bisect;
pub mod combination;
pub mod error;
pub mod greedy;
pub mod ledger;
pub mod matcher;
pub mod partition;
pub mod sample;
pub mod search;
pub mod simplify;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::SimplifyError;
pub use simplify::{simplify, PartitionalSimplifier, Simplifier};

/// Common exports for callers that simplify and sample ledgers.
pub mod prelude {
    pub use crate::bisect::BisectionSimplifier;
    pub use crate::error::SimplifyError;
    pub use crate::greedy::GreedySimplifier;
    pub use crate::ledger::{count_groups, is_group, zero_sum_runs};
    pub use crate::sample::{
        draw_equity_graph, EquityGraphGenerator, EquityGraphParams, GeneratorError, ReplayToken,
    };
    pub use crate::search::{SearchCfg, SearchStrategy};
    pub use crate::simplify::{simplify, PartitionalSimplifier, Simplifier};
}
