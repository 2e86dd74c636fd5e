//! Index combinations in size-then-lexicographic order, with in-place
//! universe shrinking.
//!
//! The greedy matcher walks positive-node combinations `{0}, {1}, …, {0,1},
//! {0,2}, …` and, whenever one of them forms a group, deletes those nodes.
//! [`CombinationIndexGenerator::shrink_after_removing`] renumbers the
//! surviving indices and positions the generator so the walk continues where
//! it left off instead of restarting from size 1.

use crate::error::SimplifyError;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Cursor {
    BeforeFirst,
    At,
    /// Next `advance()` installs this combination verbatim.
    Resume(Vec<usize>),
    Done,
}

/// Generator of sorted index subsets of `0..universe`.
#[derive(Clone, Debug)]
pub struct CombinationIndexGenerator {
    universe: usize,
    indices: Vec<usize>,
    cursor: Cursor,
}

impl CombinationIndexGenerator {
    pub fn new(universe: usize) -> Result<Self, SimplifyError> {
        if universe < 1 {
            return Err(SimplifyError::invalid("combination universe must be nonempty"));
        }
        Ok(Self {
            universe,
            indices: Vec::new(),
            cursor: Cursor::BeforeFirst,
        })
    }

    /// Step to the next combination; the first call yields `{0}`.
    pub fn advance(&mut self) -> bool {
        match std::mem::replace(&mut self.cursor, Cursor::At) {
            Cursor::BeforeFirst => {
                if self.universe == 0 {
                    self.cursor = Cursor::Done;
                    return false;
                }
                self.indices.clear();
                self.indices.push(0);
                true
            }
            Cursor::Resume(next) => {
                self.indices = next;
                true
            }
            Cursor::Done => {
                self.cursor = Cursor::Done;
                false
            }
            Cursor::At => {
                if self.step() {
                    true
                } else {
                    self.cursor = Cursor::Done;
                    false
                }
            }
        }
    }

    fn step(&mut self) -> bool {
        let size = self.indices.len();
        let n = self.universe;
        if let Some(i) = (0..size).rev().find(|&i| self.indices[i] < n - size + i) {
            self.indices[i] += 1;
            for j in i + 1..size {
                self.indices[j] = self.indices[j - 1] + 1;
            }
            return true;
        }
        if size < n {
            self.indices.clear();
            self.indices.extend(0..=size);
            return true;
        }
        false
    }

    /// Current combination (empty before the first `advance()`).
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn combination_size(&self) -> usize {
        self.indices.len()
    }

    pub fn universe_size(&self) -> usize {
        self.universe
    }

    /// True iff the current combination is a contiguous run of indices.
    ///
    /// Over values sorted ascending, every later combination of the same size
    /// is elementwise at least as large, which lets callers prune.
    pub fn has_no_gaps(&self) -> bool {
        self.indices.windows(2).all(|w| w[1] == w[0] + 1)
    }

    /// Rewind to before `{0}` without touching the universe.
    pub fn reset(&mut self) {
        self.indices.clear();
        self.cursor = Cursor::BeforeFirst;
    }

    /// Delete `removed` from the universe and renumber the survivors densely.
    ///
    /// The next `advance()` yields the smallest combination of the current
    /// size, made of survivors, that follows the current one in the old
    /// numbering; failing that, the first combination one size larger. When
    /// the current size no longer fits, the generator resumes at the full
    /// remaining universe.
    pub fn shrink_after_removing(&mut self, removed: &[usize]) -> Result<(), SimplifyError> {
        let old_n = self.universe;
        let mut is_removed = vec![false; old_n];
        for &r in removed {
            if r >= old_n {
                return Err(SimplifyError::invalid(format!(
                    "index {r} outside universe of size {old_n}"
                )));
            }
            if is_removed[r] {
                return Err(SimplifyError::invalid(format!("index {r} removed twice")));
            }
            is_removed[r] = true;
        }
        let new_n = old_n - removed.len();
        self.universe = new_n;

        // below[x] = survivors with old index < x, i.e. the new index of a surviving x.
        let mut below = Vec::with_capacity(old_n + 1);
        let mut count = 0;
        below.push(0);
        for &gone in &is_removed {
            if !gone {
                count += 1;
            }
            below.push(count);
        }

        let current = match std::mem::replace(&mut self.cursor, Cursor::Done) {
            Cursor::At => std::mem::take(&mut self.indices),
            Cursor::Resume(pending) => {
                // Not yet yielded: keep it if it survived intact.
                if pending.iter().all(|&x| !is_removed[x]) {
                    self.cursor = Cursor::Resume(pending.iter().map(|&x| below[x]).collect());
                    return Ok(());
                }
                pending
            }
            idle @ (Cursor::BeforeFirst | Cursor::Done) => {
                self.indices.clear();
                if new_n > 0 {
                    self.cursor = idle;
                }
                return Ok(());
            }
        };
        self.indices.clear();
        let size = current.len();
        if new_n == 0 {
            return Ok(());
        }
        if size > new_n {
            self.cursor = Cursor::Resume((0..new_n).collect());
            return Ok(());
        }

        let clean_prefix = current.iter().take_while(|&&x| !is_removed[x]).count();
        let successor = (0..size).rev().filter(|&i| i <= clean_prefix).find_map(|i| {
            // Smallest survivor above current[i], in new numbering.
            let start = below[current[i] + 1];
            if start + (size - i) > new_n {
                return None;
            }
            let mut next: Vec<usize> = current[..i].iter().map(|&x| below[x]).collect();
            next.extend(start..start + size - i);
            Some(next)
        });

        self.cursor = match successor {
            Some(next) => Cursor::Resume(next),
            None if size < new_n => Cursor::Resume((0..=size).collect()),
            None => Cursor::Done,
        };
        Ok(())
    }
}
