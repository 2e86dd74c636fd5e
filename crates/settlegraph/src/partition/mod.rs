//! Set-partition generators over the positions of one side of a ledger.
//!
//! Purpose
//! - Enumerate candidate block assignments for the positive or negative
//!   nodes: exactly `k` blocks (`exact`), or sweeping `k` upward/downward
//!   between a floor and `n` (`sweep`).
//!
//! Why this design
//! - Restricted growth strings give one canonical representative per set
//!   partition, so the matcher never sees two relabelings of the same split.
//! - Generators mutate a single buffer in place; the current assignment is
//!   lent out as `&[usize]`, which the borrow checker stops callers from
//!   holding across `advance()`.

mod exact;
mod sweep;

pub use exact::{is_canonical_partition, ExactPartitionGenerator};
pub use sweep::{AscendingPartitionGenerator, DescendingPartitionGenerator, PartitionSweep};
