//! The two partition searches: exhaustive ascending and first-success descending.

use tracing::trace;

use super::stop::StopFlag;
use super::types::{Matching, SearchOutcome, Sides};
use crate::error::SimplifyError;
use crate::matcher::GroupMatcher;
use crate::partition::{
    AscendingPartitionGenerator, DescendingPartitionGenerator, ExactPartitionGenerator,
    PartitionSweep,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Goal {
    /// Visit every candidate and keep the largest `k` that matched.
    Exhaustive,
    /// Return the first candidate that matches.
    FirstSuccess,
}

/// Ascending search over `k = floor..=small.len()`, keeping the best match.
///
/// Polls `stop` after every candidate and returns `Cancelled` once it is set.
pub fn search_ascending(
    sides: Sides<'_>,
    floor: usize,
    stop: &StopFlag,
) -> Result<SearchOutcome, SimplifyError> {
    let small = AscendingPartitionGenerator::new(sides.small().len(), floor)?;
    sweep(small, sides, Goal::Exhaustive, stop)
}

/// Descending search over `k = small.len()..=floor`, stopping at the first
/// match. Larger `k` come first, so that match is optimal.
pub fn search_descending(
    sides: Sides<'_>,
    floor: usize,
    stop: &StopFlag,
) -> Result<SearchOutcome, SimplifyError> {
    let small = DescendingPartitionGenerator::new(sides.small().len(), floor)?;
    sweep(small, sides, Goal::FirstSuccess, stop)
}

fn sweep<G: PartitionSweep>(
    mut small_gen: G,
    sides: Sides<'_>,
    goal: Goal,
    stop: &StopFlag,
) -> Result<SearchOutcome, SimplifyError> {
    let (small, large) = (sides.small(), sides.large());
    let mut matcher = GroupMatcher::new();
    let mut best: Option<Matching> = None;
    let mut last_k = 0;
    loop {
        let k = small_gen.block_count();
        if k != last_k {
            trace!(k, ?goal, "entering block count");
            last_k = k;
        }
        let mut large_gen = ExactPartitionGenerator::new(large.len(), k)?;
        loop {
            let groups =
                matcher.count_groups(small, large, small_gen.block_ids(), large_gen.block_ids(), k);
            if groups > best.as_ref().map_or(0, |b| b.block_count) {
                best = Some(Matching::capture(
                    small_gen.block_ids(),
                    large_gen.block_ids(),
                    k,
                ));
                if goal == Goal::FirstSuccess {
                    return Ok(SearchOutcome::Finished(best));
                }
            }
            if stop.is_requested() {
                return Ok(SearchOutcome::Cancelled);
            }
            if !large_gen.advance() {
                break;
            }
        }
        if !small_gen.advance() {
            break;
        }
    }
    Ok(SearchOutcome::Finished(best))
}
