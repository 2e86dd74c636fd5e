//! Racing coordinator: ascending and descending searches on two threads.
//!
//! Each thread owns its generators and sum buffers. The only shared state is
//! a pair of stop flags: each search polls its own and raises its peer's on
//! exit. Results travel back through the scoped join handles, so the
//! coordinator reads them only after both threads have stopped, and a
//! panicking search surfaces as a join error instead of an empty result.

use std::thread;

use tracing::debug;

use super::runner::{search_ascending, search_descending};
use super::stop::{StopFlag, StopPeerOnExit};
use super::types::{Matching, SearchCfg, SearchOutcome, SearchSide, SearchStrategy, Sides};
use crate::error::SimplifyError;

/// Lifecycle of one coordinator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RacePhase {
    Idle,
    Racing,
    Done,
}

/// Winning matching plus the side that produced it (`None` when there was
/// nothing to race).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RaceReport {
    pub matching: Matching,
    pub winner: Option<SearchSide>,
}

type Joined = thread::Result<Result<SearchOutcome, SimplifyError>>;

/// Signature shared by `search_ascending` and `search_descending`.
type SearchFn =
    for<'s, 'f> fn(Sides<'s>, usize, &'f StopFlag) -> Result<SearchOutcome, SimplifyError>;

/// Runs both searches once and returns the optimal matching.
#[derive(Debug)]
pub struct RacingSearchCoordinator<'a> {
    sides: Sides<'a>,
    floor: usize,
    phase: RacePhase,
}

impl<'a> RacingSearchCoordinator<'a> {
    pub fn new(sides: Sides<'a>, floor: usize) -> Self {
        Self {
            sides,
            floor,
            phase: RacePhase::Idle,
        }
    }

    pub fn phase(&self) -> RacePhase {
        self.phase
    }

    /// Race the two searches to completion. A coordinator runs exactly once.
    pub fn run(&mut self) -> Result<RaceReport, SimplifyError> {
        self.run_with(search_ascending, search_descending)
    }

    fn run_with(
        &mut self,
        ascending: SearchFn,
        descending: SearchFn,
    ) -> Result<RaceReport, SimplifyError> {
        if self.phase != RacePhase::Idle {
            return Err(SimplifyError::invalid("racing coordinator already ran"));
        }
        if self.sides.small().is_empty() {
            self.phase = RacePhase::Done;
            return empty_report(&self.sides);
        }
        self.phase = RacePhase::Racing;
        debug!(
            small = self.sides.small().len(),
            large = self.sides.large().len(),
            floor = self.floor,
            "race start"
        );
        let joined = race(self.sides, self.floor, ascending, descending);
        self.phase = RacePhase::Done;
        let (asc_joined, desc_joined) = joined?;
        let ascending = settle(SearchSide::Ascending, asc_joined)?;
        let descending = settle(SearchSide::Descending, desc_joined)?;
        let report = match (descending, ascending) {
            (SearchOutcome::Finished(Some(matching)), _) => RaceReport {
                matching,
                winner: Some(SearchSide::Descending),
            },
            (_, SearchOutcome::Finished(Some(matching))) => RaceReport {
                matching,
                winner: Some(SearchSide::Ascending),
            },
            _ => {
                return Err(SimplifyError::invariant(
                    "both searches ended without a matching",
                ))
            }
        };
        debug!(
            winner = ?report.winner,
            k = report.matching.block_count,
            "race done"
        );
        Ok(report)
    }
}

fn race(
    sides: Sides<'_>,
    floor: usize,
    ascending: SearchFn,
    descending: SearchFn,
) -> Result<(Joined, Joined), SimplifyError> {
    let ascending_stop = StopFlag::new();
    let descending_stop = StopFlag::new();
    let (asc_stop, desc_stop) = (&ascending_stop, &descending_stop);
    thread::scope(|scope| -> Result<(Joined, Joined), SimplifyError> {
        let asc_handle = thread::Builder::new()
            .name("ascending-search".into())
            .spawn_scoped(scope, move || {
                let _peer = StopPeerOnExit(desc_stop);
                ascending(sides, floor, asc_stop)
            })
            .map_err(|_| SimplifyError::ThreadFailure {
                search: SearchSide::Ascending,
            })?;
        let desc_handle = thread::Builder::new()
            .name("descending-search".into())
            .spawn_scoped(scope, move || {
                let _peer = StopPeerOnExit(asc_stop);
                descending(sides, floor, desc_stop)
            });
        let desc_handle = match desc_handle {
            Ok(handle) => handle,
            Err(_) => {
                asc_stop.request();
                let _ = asc_handle.join();
                return Err(SimplifyError::ThreadFailure {
                    search: SearchSide::Descending,
                });
            }
        };
        Ok((asc_handle.join(), desc_handle.join()))
    })
}

fn settle(side: SearchSide, joined: Joined) -> Result<SearchOutcome, SimplifyError> {
    match joined {
        Ok(outcome) => outcome,
        Err(_) => Err(SimplifyError::ThreadFailure { search: side }),
    }
}

fn empty_report(sides: &Sides<'_>) -> Result<RaceReport, SimplifyError> {
    if !sides.large().is_empty() {
        return Err(SimplifyError::invalid(
            "one sign side is empty but the other is not; ledger cannot balance",
        ));
    }
    Ok(RaceReport {
        matching: Matching::default(),
        winner: None,
    })
}

/// Find an optimal matching for `sides`, scheduling the searches per `cfg`.
///
/// `floor` is clamped into `[1, small.len()]`.
pub fn find_matching(
    sides: Sides<'_>,
    floor: usize,
    cfg: &SearchCfg,
) -> Result<Matching, SimplifyError> {
    let n = sides.small().len();
    if n == 0 {
        return empty_report(&sides).map(|r| r.matching);
    }
    let floor = floor.clamp(1, n);
    let strategy = match cfg.strategy {
        SearchStrategy::Race if cfg.single_core_fallback && !has_parallelism() => {
            debug!("single hardware thread; racing degraded to descending search");
            SearchStrategy::DescendingOnly
        }
        other => other,
    };
    let idle = StopFlag::new();
    let outcome = match strategy {
        SearchStrategy::Race => {
            return RacingSearchCoordinator::new(sides, floor)
                .run()
                .map(|r| r.matching)
        }
        SearchStrategy::AscendingOnly => search_ascending(sides, floor, &idle)?,
        SearchStrategy::DescendingOnly => search_descending(sides, floor, &idle)?,
    };
    match outcome {
        SearchOutcome::Finished(Some(matching)) => Ok(matching),
        _ => Err(SimplifyError::invariant(format!(
            "{strategy:?} search ended without a matching"
        ))),
    }
}

fn has_parallelism() -> bool {
    thread::available_parallelism().map_or(false, |n| n.get() >= 2)
}
