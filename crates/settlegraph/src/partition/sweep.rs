//! Partition streams that sweep the block count `k` across a range.
//!
//! Both sweeps splice fresh [`ExactPartitionGenerator`]s together whenever
//! the current one is exhausted; they differ only in the direction `k` moves.

use super::exact::ExactPartitionGenerator;
use crate::error::SimplifyError;

/// Common surface of the partition streams driven by the searches.
pub trait PartitionSweep {
    /// Step to the next partition; `false` once no block count remains.
    fn advance(&mut self) -> bool;
    /// Block id per position of the current partition.
    fn block_ids(&self) -> &[usize];
    /// Block count `k` of the current partition.
    fn block_count(&self) -> usize;
}

fn check_range(n: usize, floor: usize) -> Result<(), SimplifyError> {
    if n < 1 {
        return Err(SimplifyError::invalid("'n' must be at least 1"));
    }
    if floor < 1 || floor > n {
        return Err(SimplifyError::invalid(format!(
            "block floor {floor} outside [1, {n}]"
        )));
    }
    Ok(())
}

/// Partitions with `k = floor, floor+1, ..., n` blocks, in that order.
#[derive(Clone, Debug)]
pub struct AscendingPartitionGenerator {
    n: usize,
    k: usize,
    inner: ExactPartitionGenerator,
}

impl AscendingPartitionGenerator {
    pub fn new(n: usize, floor: usize) -> Result<Self, SimplifyError> {
        check_range(n, floor)?;
        Ok(Self {
            n,
            k: floor,
            inner: ExactPartitionGenerator::first(n, floor),
        })
    }

    pub fn current_block_count(&self) -> usize {
        self.k
    }
}

impl PartitionSweep for AscendingPartitionGenerator {
    fn advance(&mut self) -> bool {
        if self.inner.advance() {
            return true;
        }
        if self.k < self.n {
            self.k += 1;
            self.inner = ExactPartitionGenerator::first(self.n, self.k);
            return true;
        }
        false
    }

    fn block_ids(&self) -> &[usize] {
        self.inner.block_ids()
    }

    fn block_count(&self) -> usize {
        self.k
    }
}

/// Partitions with `k = n, n-1, ..., floor` blocks, in that order.
#[derive(Clone, Debug)]
pub struct DescendingPartitionGenerator {
    n: usize,
    k: usize,
    floor: usize,
    inner: ExactPartitionGenerator,
}

impl DescendingPartitionGenerator {
    pub fn new(n: usize, floor: usize) -> Result<Self, SimplifyError> {
        check_range(n, floor)?;
        Ok(Self {
            n,
            k: n,
            floor,
            inner: ExactPartitionGenerator::first(n, n),
        })
    }

    pub fn current_block_count(&self) -> usize {
        self.k
    }
}

impl PartitionSweep for DescendingPartitionGenerator {
    fn advance(&mut self) -> bool {
        if self.inner.advance() {
            return true;
        }
        if self.k > self.floor {
            self.k -= 1;
            self.inner = ExactPartitionGenerator::first(self.n, self.k);
            return true;
        }
        false
    }

    fn block_ids(&self) -> &[usize] {
        self.inner.block_ids()
    }

    fn block_count(&self) -> usize {
        self.k
    }
}
