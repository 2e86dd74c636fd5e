//! Random balanced equity arrays (random arcs + replay tokens).
//!
//! Purpose
//! - Reproducible ledgers for the demo runner, property tests and benches.
//!
//! Model
//! - Start from `len` zero balances and add `len * (len - 1) * load` random
//!   arcs. Each arc moves a uniform weight from `[min_weight, max_weight)`
//!   from one random party to another (self-loops allowed, they are no-ops),
//!   so the array always balances.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use thiserror::Error;

/// Upper clamp on the arc load factor.
pub const MAX_ARC_LOAD_FACTOR: f64 = 0.99;

/// Error type for equity-graph generation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GeneratorError {
    #[error("invalid generator params: {reason}")]
    InvalidParams { reason: String },
    #[error("degenerate sample: {reason}")]
    DegenerateSample { reason: String },
}

impl GeneratorError {
    fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }

    fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateSample {
            reason: reason.into(),
        }
    }
}

/// Random-arc sampler configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EquityGraphParams {
    /// Number of parties.
    pub len: usize,
    /// Inclusive lower bound on arc weight.
    pub min_weight: i64,
    /// Exclusive upper bound on arc weight.
    pub max_weight: i64,
    /// Fraction of the `len * (len - 1)` possible arcs to draw. Clamped to
    /// [`MAX_ARC_LOAD_FACTOR`].
    pub arc_load_factor: f64,
}

impl Default for EquityGraphParams {
    fn default() -> Self {
        Self {
            len: 16,
            min_weight: -10,
            max_weight: 20,
            arc_load_factor: 0.3,
        }
    }
}

impl EquityGraphParams {
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.len == 0 {
            return Err(GeneratorError::invalid("need at least one party"));
        }
        if self.min_weight >= self.max_weight {
            return Err(GeneratorError::invalid("min_weight < max_weight required"));
        }
        if !self.arc_load_factor.is_finite() || self.arc_load_factor < 0.0 {
            return Err(GeneratorError::invalid(
                "arc_load_factor must be finite and >= 0",
            ));
        }
        Ok(())
    }

    /// Number of arcs one draw adds.
    pub fn arc_count(&self) -> usize {
        let load = self.arc_load_factor.min(MAX_ARC_LOAD_FACTOR);
        let pairs = self.len as f64 * self.len.saturating_sub(1) as f64;
        (pairs * load) as usize
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        StdRng::seed_from_u64(mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15))))
    }
}

/// Draw one balanced equity array.
///
/// Fails with `DegenerateSample` if a balance would leave the `i64` range.
pub fn draw_equity_graph(
    params: &EquityGraphParams,
    tok: ReplayToken,
) -> Result<Vec<i64>, GeneratorError> {
    params.validate()?;
    let mut rng = tok.to_std_rng();
    let mut equities = vec![0i64; params.len];
    for _ in 0..params.arc_count() {
        let weight = rng.gen_range(params.min_weight..params.max_weight);
        let from = rng.gen_range(0..params.len);
        let to = rng.gen_range(0..params.len);
        equities[from] = equities[from]
            .checked_add(weight)
            .ok_or_else(|| GeneratorError::degenerate("balance overflow"))?;
        equities[to] = equities[to]
            .checked_sub(weight)
            .ok_or_else(|| GeneratorError::degenerate("balance overflow"))?;
    }
    Ok(equities)
}

/// A single equity array plus replay metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct EquityGraphSample {
    pub equities: Vec<i64>,
    pub params: EquityGraphParams,
    pub replay: ReplayToken,
}

/// Stream of equity arrays sharing one seed; sample `i` replays from
/// `ReplayToken { seed, index: i }`.
#[derive(Clone, Debug)]
pub struct EquityGraphGenerator {
    params: EquityGraphParams,
    seed: u64,
    next_index: u64,
}

impl EquityGraphGenerator {
    pub fn new(params: EquityGraphParams, seed: u64) -> Result<Self, GeneratorError> {
        params.validate()?;
        Ok(Self {
            params,
            seed,
            next_index: 0,
        })
    }

    /// Seed the stream from the OS entropy source.
    pub fn from_entropy(params: EquityGraphParams) -> Result<Self, GeneratorError> {
        Self::new(params, rand::thread_rng().next_u64())
    }

    pub fn params(&self) -> &EquityGraphParams {
        &self.params
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn generate_next(&mut self) -> Result<EquityGraphSample, GeneratorError> {
        let replay = ReplayToken {
            seed: self.seed,
            index: self.next_index,
        };
        self.next_index += 1;
        Ok(EquityGraphSample {
            equities: draw_equity_graph(&self.params, replay)?,
            params: self.params,
            replay,
        })
    }

    pub fn regenerate(&self, replay: &ReplayToken) -> Result<Vec<i64>, GeneratorError> {
        draw_equity_graph(&self.params, *replay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::is_group;

    #[test]
    fn draws_are_balanced_and_reproducible() {
        let params = EquityGraphParams::default();
        let tok = ReplayToken { seed: 7, index: 3 };
        let a = draw_equity_graph(&params, tok).unwrap();
        let b = draw_equity_graph(&params, tok).unwrap();
        assert_eq!(a.len(), 16);
        assert!(is_group(&a));
        assert_eq!(a, b);
        let c = draw_equity_graph(&params, ReplayToken { seed: 7, index: 4 }).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn arc_count_clamps_the_load() {
        let mut params = EquityGraphParams::default();
        assert_eq!(params.arc_count(), 72);
        params.arc_load_factor = 5.0;
        assert_eq!(params.arc_count(), 237);
        params.len = 1;
        assert_eq!(params.arc_count(), 0);
    }

    #[test]
    fn zero_load_gives_an_all_zero_ledger() {
        let params = EquityGraphParams {
            arc_load_factor: 0.0,
            ..EquityGraphParams::default()
        };
        let g = draw_equity_graph(&params, ReplayToken { seed: 1, index: 0 }).unwrap();
        assert!(g.iter().all(|&v| v == 0));
    }

    #[test]
    fn rejects_invalid_params() {
        let bad = [
            EquityGraphParams {
                len: 0,
                ..EquityGraphParams::default()
            },
            EquityGraphParams {
                min_weight: 5,
                max_weight: 5,
                ..EquityGraphParams::default()
            },
            EquityGraphParams {
                arc_load_factor: f64::NAN,
                ..EquityGraphParams::default()
            },
        ];
        for params in bad {
            assert!(matches!(
                EquityGraphGenerator::new(params, 0),
                Err(GeneratorError::InvalidParams { .. })
            ));
        }
    }

    #[test]
    fn overflow_is_reported() {
        let params = EquityGraphParams {
            len: 3,
            min_weight: i64::MAX - 1,
            max_weight: i64::MAX,
            arc_load_factor: 0.99,
        };
        assert_eq!(params.arc_count(), 5);
        let mut overflowed = 0;
        for index in 0..64 {
            match draw_equity_graph(&params, ReplayToken { seed: 0, index }) {
                Ok(g) => assert!(is_group(&g)),
                Err(e) => {
                    assert!(matches!(e, GeneratorError::DegenerateSample { .. }));
                    overflowed += 1;
                }
            }
        }
        assert!(overflowed > 0);
    }

    #[test]
    fn generator_stream_replays() {
        let mut gen = EquityGraphGenerator::new(EquityGraphParams::default(), 42).unwrap();
        let first = gen.generate_next().unwrap();
        let second = gen.generate_next().unwrap();
        assert_eq!(first.replay, ReplayToken { seed: 42, index: 0 });
        assert_eq!(second.replay.index, 1);
        assert_eq!(gen.regenerate(&first.replay).unwrap(), first.equities);
        assert_eq!(gen.regenerate(&second.replay).unwrap(), second.equities);
    }
}
