//! Bounded random integer sampling.
//!
//! A sample is `sign * (base + r)` with `r` drawn uniformly from
//! `[0, |distance|)` and `sign` taken from `distance` (positive when the
//! distance is zero). Callers work in fixed-point (hundredths) to keep
//! fractional ranges on this integer contract.

use std::collections::VecDeque;
use std::fmt;

use driftview_common::error::{DriftError, DriftResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform draws.
pub trait RandomSource: Send {
    /// Uniform value in `[0, bound)`; `0` when `bound` is zero.
    fn below(&mut self, bound: u32) -> u32;
}

impl RandomSource for StdRng {
    fn below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.random_range(0..bound)
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
///
/// Each scripted value is reduced modulo the requested bound so a script
/// can never escape the sampler's range.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    draws: VecDeque<u32>,
}

impl ScriptedSource {
    pub fn new(draws: impl IntoIterator<Item = u32>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
        }
    }
}

impl RandomSource for ScriptedSource {
    fn below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        match self.draws.pop_front() {
            Some(value) => {
                self.draws.push_back(value);
                value % bound
            }
            None => 0,
        }
    }
}

/// Draws bounded signed integers from a [`RandomSource`].
pub struct RandomRangeSampler {
    source: Box<dyn RandomSource>,
}

impl fmt::Debug for RandomRangeSampler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomRangeSampler").finish_non_exhaustive()
    }
}

impl RandomRangeSampler {
    pub fn new(source: Box<dyn RandomSource>) -> Self {
        Self { source }
    }

    /// Sampler seeded from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self::new(Box::new(StdRng::from_os_rng()))
    }

    /// Deterministic sampler for reproducible sequences.
    pub fn seeded(seed: u64) -> Self {
        Self::new(Box::new(StdRng::seed_from_u64(seed)))
    }

    /// Sampler replaying exact draws.
    pub fn scripted(draws: impl IntoIterator<Item = u32>) -> Self {
        Self::new(Box::new(ScriptedSource::new(draws)))
    }

    /// `sign(distance) * (base + r)`, `r` uniform in `[0, |distance|)`.
    ///
    /// A zero distance always yields `+base`.
    pub fn sample(&mut self, base: i64, signed_distance: i64) -> DriftResult<i64> {
        let unsigned_distance = signed_distance.unsigned_abs();
        let bound = u32::try_from(unsigned_distance).map_err(|_| DriftError::DistanceOverflow {
            distance: signed_distance,
        })?;
        let sign: i64 = if signed_distance < 0 { -1 } else { 1 };
        let random = self.source.below(bound);
        let value = base
            .checked_add(i64::from(random))
            .and_then(|magnitude| magnitude.checked_mul(sign))
            .ok_or_else(|| {
                DriftError::invalid_parameter(format!(
                    "sample base {base} plus draw {random} overflows"
                ))
            })?;

        tracing::debug!(base, signed_distance, random, value, "sampled");
        Ok(value)
    }

    /// Fair-ish boolean: parity of a draw over a distance of 100.
    pub fn coin_flip(&mut self) -> bool {
        // A distance of 100 always fits the draw range.
        self.sample(0, 100).map(|v| v % 2 != 0).unwrap_or(false)
    }
}
