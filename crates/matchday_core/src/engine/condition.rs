//! Match-time condition curve.
//!
//! Fitness lives on a 1.0-6.0 scale. It decays linearly per simulated minute,
//! recovers a share of the player's baseline at breaks, and feeds a
//! performance multiplier together with form and experience.
//!
//! | Input | Scale | Neutral |
//! |-------|-------|---------|
//! | fitness / baseline stamina | 1.0-6.0 | - |
//! | form | 1-10 | 5 |
//! | experience | 1-20 | 10 |

/// Fitness floor (also the value a dismissed player collapses to).
pub const FITNESS_MIN: f32 = 1.0;
/// Fitness ceiling.
pub const FITNESS_MAX: f32 = 6.0;

/// Fitness lost per simulated minute (~1.1 over 90 minutes).
pub const DECAY_PER_MINUTE: f32 = 0.012;
/// Share of the baseline restored at half-time and extra-time breaks.
pub const RECOVERY_FRACTION: f32 = 0.10;

/// Performance band the multiplier is clamped to.
pub const MULTIPLIER_MIN: f32 = 0.70;
pub const MULTIPLIER_MAX: f32 = 1.20;

// multiplier = fitness_part * form_part * experience_part
// Exhausted, out-of-form novices land just under MULTIPLIER_MIN.
const FITNESS_FLOOR_FACTOR: f32 = 0.76;
const FITNESS_SPAN: f32 = 0.24;
const FORM_FLOOR_FACTOR: f32 = 0.90;
const FORM_SPAN: f32 = 0.22;
const EXPERIENCE_FLOOR_FACTOR: f32 = 0.97;
const EXPERIENCE_SPAN: f32 = 0.10;

// Spot kicks lean harder on experience than open play does.
const PENALTY_BASE: f32 = 0.88;
const PENALTY_FORM_SPAN: f32 = 0.10;
const PENALTY_EXPERIENCE_SPAN: f32 = 0.14;

#[inline]
pub fn clamp_fitness(value: f32) -> f32 {
    value.clamp(FITNESS_MIN, FITNESS_MAX)
}

/// Form 1-10 → 0.0-1.0
#[inline]
fn form01(form: u8) -> f32 {
    ((form.clamp(1, 10) - 1) as f32 / 9.0).clamp(0.0, 1.0)
}

/// Experience 1-20 → 0.0-1.0
#[inline]
fn experience01(experience: u8) -> f32 {
    ((experience.clamp(1, 20) - 1) as f32 / 19.0).clamp(0.0, 1.0)
}

/// Fitness lost over `minutes` of play.
pub fn decay(minutes: u8) -> f32 {
    DECAY_PER_MINUTE * minutes as f32
}

/// Fitness restored at a break for a player with the given baseline.
pub fn recovery(baseline_stamina: f32) -> f32 {
    clamp_fitness(baseline_stamina) * RECOVERY_FRACTION
}

/// Overall performance multiplier (0.70-1.20).
///
/// Non-decreasing in `fitness / baseline`; higher form and experience push it up.
pub fn multiplier(fitness: f32, baseline_stamina: f32, form: u8, experience: u8) -> f32 {
    let baseline = clamp_fitness(baseline_stamina);
    let ratio = (clamp_fitness(fitness) / baseline).clamp(0.0, 1.0);

    let fitness_part = FITNESS_FLOOR_FACTOR + FITNESS_SPAN * ratio;
    let form_part = FORM_FLOOR_FACTOR + FORM_SPAN * form01(form);
    let experience_part = EXPERIENCE_FLOOR_FACTOR + EXPERIENCE_SPAN * experience01(experience);

    (fitness_part * form_part * experience_part).clamp(MULTIPLIER_MIN, MULTIPLIER_MAX)
}

/// Spot-kick multiplier (0.88-1.12), independent of fitness.
pub fn penalty_multiplier(form: u8, experience: u8) -> f32 {
    PENALTY_BASE + PENALTY_FORM_SPAN * form01(form) + PENALTY_EXPERIENCE_SPAN * experience01(experience)
}

/// One condition step for a single player: break recovery first, then decay.
pub fn step(fitness: f32, baseline_stamina: f32, minutes: u8, is_break: bool) -> f32 {
    let mut next = fitness;
    if is_break {
        let ceiling = clamp_fitness(baseline_stamina);
        next = (next + recovery(baseline_stamina)).min(ceiling);
    }
    clamp_fitness(next - decay(minutes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_decay_is_linear_and_positive() {
        assert!(decay(1) > 0.0);
        assert!((decay(10) - 10.0 * decay(1)).abs() < 1e-6);
    }

    #[test]
    fn test_recovery_never_exceeds_baseline() {
        let after = step(4.9, 5.0, 0, true);
        assert!((after - 5.0).abs() < 1e-6);
        let after = step(3.0, 5.0, 0, true);
        assert!((after - 3.5).abs() < 1e-6);
    }

    #[test]
    fn test_fitness_floor_after_long_match() {
        let mut fitness = 1.2;
        for _ in 0..120 {
            fitness = step(fitness, 1.2, 1, false);
        }
        assert_eq!(fitness, FITNESS_MIN);
    }

    #[test]
    fn test_multiplier_band_extremes() {
        let worst = multiplier(FITNESS_MIN, FITNESS_MAX, 1, 1);
        let best = multiplier(FITNESS_MAX, FITNESS_MAX, 10, 20);
        assert_eq!(worst, MULTIPLIER_MIN, "worst = {}", worst);
        assert!(best > 1.18 && best <= MULTIPLIER_MAX, "best = {}", best);
    }

    #[test]
    fn test_floor_is_reached_by_the_curve() {
        let ratio = FITNESS_MIN / FITNESS_MAX;
        let raw = (FITNESS_FLOOR_FACTOR + FITNESS_SPAN * ratio) * FORM_FLOOR_FACTOR * EXPERIENCE_FLOOR_FACTOR;
        assert!(raw < MULTIPLIER_MIN, "raw = {}", raw);
        assert!(multiplier(FITNESS_MIN + 0.5, FITNESS_MAX, 1, 1) > MULTIPLIER_MIN);
    }

    #[test]
    fn test_form_and_experience_boost() {
        let base = multiplier(4.0, 5.0, 5, 10);
        assert!(multiplier(4.0, 5.0, 9, 10) > base);
        assert!(multiplier(4.0, 5.0, 5, 18) > base);
        assert!(penalty_multiplier(9, 18) > penalty_multiplier(2, 3));
    }

    proptest! {
        #[test]
        fn prop_fitness_stays_in_bounds(
            fitness in 1.0f32..6.0,
            baseline in 1.0f32..6.0,
            minutes in 0u8..30,
            is_break in any::<bool>()
        ) {
            let next = step(fitness, baseline, minutes, is_break);
            prop_assert!((FITNESS_MIN..=FITNESS_MAX).contains(&next));
        }

        #[test]
        fn prop_multiplier_monotonic_in_fitness(
            low in 1.0f32..6.0,
            delta in 0.0f32..5.0,
            baseline in 1.0f32..6.0,
            form in 1u8..=10,
            experience in 1u8..=20
        ) {
            let high = (low + delta).min(FITNESS_MAX);
            let a = multiplier(low, baseline, form, experience);
            let b = multiplier(high, baseline, form, experience);
            prop_assert!(b + 1e-6 >= a);
            prop_assert!((MULTIPLIER_MIN..=MULTIPLIER_MAX).contains(&a));
        }
    }
}
