//! Logistic duel resolution.
//!
//! Every probabilistic contest in the engine (possession, attack push, shot,
//! penalty kick) is the same primitive:
//!
//! ```text
//! diff = A - B - offset
//! p    = 1 / (1 + exp(-diff * k))
//! ```
//!
//! and the challenger wins when a uniform draw falls below `p`.

use rand::Rng;

use crate::models::DuelRecord;

/// Steepness and bias of one contest type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DuelTuning {
    pub k: f32,
    pub offset: f32,
}

impl DuelTuning {
    pub const fn new(k: f32, offset: f32) -> Self {
        Self { k, offset }
    }
}

/// Lane possession: home vs away possession strength.
pub const POSSESSION: DuelTuning = DuelTuning::new(0.02, 0.0);

/// Scaled attack strength vs the defending side's defense.
pub const ATTACK_PUSH: DuelTuning = DuelTuning::new(0.025, 0.0);

/// Attacking bonus applied before the push duel.
pub const ATTACK_PUSH_SCALE: f32 = 1.15;

/// Shot vs keeper. The offset puts equal-quality conversion around 25-30%.
pub const SHOT: DuelTuning = DuelTuning::new(0.03, 20.0);

/// Spot kick vs keeper. Negative offset: the kicker is the favourite.
pub const PENALTY: DuelTuning = DuelTuning::new(0.1, -11.5);

/// Probability that `a` beats `b`.
#[inline]
pub fn win_probability(a: f32, b: f32, tuning: DuelTuning) -> f32 {
    let diff = a - b - tuning.offset;
    1.0 / (1.0 + (-diff * tuning.k).exp())
}

/// Roll one duel and record it from `a`'s side.
pub fn resolve<R: Rng + ?Sized>(rng: &mut R, a: f32, b: f32, tuning: DuelTuning) -> DuelRecord {
    let probability = win_probability(a, b, tuning);
    let roll: f32 = rng.gen();
    DuelRecord { strength: a, opposition: b, probability, won: roll < probability }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_even_contest_is_a_coin_flip() {
        assert!((win_probability(50.0, 50.0, POSSESSION) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_shot_offset_calibration() {
        // Equal-quality striker and keeper, average distance.
        let p = win_probability(75.0 * 0.85, 75.0, SHOT);
        assert!(p > 0.22 && p < 0.32, "p = {}", p);
    }

    #[test]
    fn test_penalty_favours_kicker() {
        let p = win_probability(75.0, 75.0, PENALTY);
        assert!(p > 0.7 && p < 0.8, "p = {}", p);
    }

    #[test]
    fn test_resolve_empirical_rate() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let wins = (0..10_000)
            .filter(|_| resolve(&mut rng, 60.0, 40.0, POSSESSION).won)
            .count();
        let expected = win_probability(60.0, 40.0, POSSESSION) * 10_000.0;
        assert!((wins as f32 - expected).abs() < 300.0, "wins = {}", wins);
    }

    proptest! {
        #[test]
        fn prop_probability_in_unit_interval(a in 0.0f32..500.0, b in 0.0f32..500.0) {
            let p = win_probability(a, b, SHOT);
            prop_assert!((0.0..=1.0).contains(&p));
        }

        #[test]
        fn prop_probability_monotonic_in_strength(
            a in 0.0f32..200.0,
            delta in 0.0f32..50.0,
            b in 0.0f32..200.0
        ) {
            let lo = win_probability(a, b, ATTACK_PUSH);
            let hi = win_probability(a + delta, b, ATTACK_PUSH);
            prop_assert!(hi + 1e-6 >= lo);
        }
    }
}
