//! Key-moment scheduling.
//!
//! A period is split into `count` equal-width windows and one minute is drawn
//! uniformly inside each, so attacks are spread over the period without
//! landing on a fixed grid.

use rand::Rng;

/// Attack sequences across minutes 1-90.
pub const REGULATION_KEY_MOMENTS: usize = 20;
/// Attack sequences across minutes 91-120.
pub const EXTRA_TIME_KEY_MOMENTS: usize = 7;

/// Pre-roll `count` key-moment minutes in `first..=last`, ascending.
///
/// Two windows can round to the same minute; that minute then hosts two sequences.
pub fn schedule_key_moments<R: Rng + ?Sized>(
    rng: &mut R,
    first: u8,
    last: u8,
    count: usize,
) -> Vec<u8> {
    if count == 0 || last < first {
        return Vec::new();
    }

    let span = (last - first) as f32 + 1.0;
    let width = span / count as f32;

    (0..count)
        .map(|i| {
            let offset = (i as f32 + rng.gen::<f32>()) * width;
            let minute = first as f32 + offset.floor();
            (minute as u8).clamp(first, last)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_regulation_schedule_shape() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let minutes = schedule_key_moments(&mut rng, 1, 90, REGULATION_KEY_MOMENTS);
        assert_eq!(minutes.len(), REGULATION_KEY_MOMENTS);
        assert!(minutes.windows(2).all(|w| w[0] <= w[1]));
        assert!(minutes.iter().all(|m| (1..=90).contains(m)));
    }

    #[test]
    fn test_each_window_gets_one_moment() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let minutes = schedule_key_moments(&mut rng, 91, 120, EXTRA_TIME_KEY_MOMENTS);
        let width = 30.0 / EXTRA_TIME_KEY_MOMENTS as f32;
        for (i, m) in minutes.iter().enumerate() {
            let lo = 91.0 + (i as f32 * width).floor();
            let hi = 91.0 + ((i + 1) as f32 * width).floor();
            assert!((*m as f32) >= lo && (*m as f32) <= hi, "window {} got {}", i, m);
        }
    }

    #[test]
    fn test_schedules_differ_between_seeds() {
        let a = schedule_key_moments(&mut ChaCha8Rng::seed_from_u64(1), 1, 90, 20);
        let b = schedule_key_moments(&mut ChaCha8Rng::seed_from_u64(2), 1, 90, 20);
        assert_ne!(a, b);
    }

    #[test]
    fn test_empty_requests() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(schedule_key_moments(&mut rng, 1, 90, 0).is_empty());
        assert!(schedule_key_moments(&mut rng, 10, 5, 3).is_empty());
    }
}
