//! Optimal group matching: partition searches and the two-thread race.
//!
//! Purpose
//! - Given the positive and negative sides of a balanced ledger, find block
//!   assignments of both sides into the largest number `k` of blocks whose
//!   sums pair up into zero-sum groups.
//!
//! Why this design
//! - The ascending search is exhaustive from the floor upward; the
//!   descending search starts at the largest `k` and stops at its first hit.
//!   Neither dominates the other in running time, so the race runs both and
//!   keeps whichever finishes first. Both compute the same optimal `k`.
//! - Cancellation is two independent one-way flags, polled once per
//!   candidate; worst-case latency is one matcher evaluation.
//! - Exactly two worker threads per race, joined before any result is read.

mod race;
mod runner;
mod stop;
mod types;

pub use race::{find_matching, RacePhase, RaceReport, RacingSearchCoordinator};
pub use runner::{search_ascending, search_descending};
pub use stop::StopFlag;
pub use types::{Matching, SearchCfg, SearchOutcome, SearchSide, SearchStrategy, Sides};
