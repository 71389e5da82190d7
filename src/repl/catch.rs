//! Catch odds.
//!
//! Base experience in `[64, 608]` maps to a catch chance in `[0.9, 0.1]`:
//! the raw odds `1 / (normalized + 1)` run from 1.0 down to 0.5 and are
//! rescaled linearly onto the target range.

use rand::Rng;

const MIN_BASE_EXP: u32 = 64;
const MAX_BASE_EXP: u32 = 608;
const MIN_CHANCE: f64 = 0.1;
const MAX_CHANCE: f64 = 0.9;

fn normalized(base_exp: u32) -> f64 {
    let clamped = base_exp.clamp(MIN_BASE_EXP, MAX_BASE_EXP);
    f64::from(clamped - MIN_BASE_EXP) / f64::from(MAX_BASE_EXP - MIN_BASE_EXP)
}

fn raw_odds(base_exp: u32) -> f64 {
    1.0 / (normalized(base_exp) + 1.0)
}

/// Probability of catching a Pokemon with the given base experience.
///
/// Unknown base experience is treated as the hardest catch.
pub fn catch_chance(base_exp: Option<u32>) -> f64 {
    let base_exp = base_exp.unwrap_or(MAX_BASE_EXP);
    let raw_min = raw_odds(MAX_BASE_EXP);
    let raw_max = raw_odds(MIN_BASE_EXP);

    MIN_CHANCE + (raw_odds(base_exp) - raw_min) * ((MAX_CHANCE - MIN_CHANCE) / (raw_max - raw_min))
}

/// Rolls against `chance`, returning true on a catch.
pub fn roll<R: Rng + ?Sized>(rng: &mut R, chance: f64) -> bool {
    rng.gen::<f64>() <= chance
}
