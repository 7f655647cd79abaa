//! Deterministic day-seeded shuffle.
//!
//! The same seed always yields the same order, so every request on a given
//! calendar day agrees on "today's picks" without coordination.

use chrono::{Datelike, Local, NaiveDate};

const MULTIPLIER: u64 = 9_301;
const INCREMENT: u64 = 49_297;
const MODULUS: u64 = 233_280;

/// Linear congruential generator producing values in `[0, 1)`.
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: u64::from(seed),
        }
    }

    /// Advance the generator and return the next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = (self.state * MULTIPLIER + INCREMENT) % MODULUS;
        self.state as f64 / MODULUS as f64
    }
}

/// Seed for a calendar day: day of year plus year.
pub fn day_seed(date: NaiveDate) -> u32 {
    date.ordinal() + date.year().unsigned_abs()
}

/// Seed for today in the server's local time zone.
pub fn today_seed() -> u32 {
    day_seed(Local::now().date_naive())
}

/// Fisher-Yates shuffle of a copy of `items`, driven by `seed`.
pub fn seeded_shuffle<T: Clone>(items: &[T], seed: u32) -> Vec<T> {
    let mut shuffled = items.to_vec();
    let mut rng = SeededRng::new(seed);
    for i in (1..shuffled.len()).rev() {
        let j = (rng.next_f64() * (i + 1) as f64).floor() as usize;
        shuffled.swap(i, j);
    }
    shuffled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_sequence() {
        let mut rng = SeededRng::new(0);
        // (0 * 9301 + 49297) % 233280 = 49297
        assert_eq!(rng.next_f64(), 49_297.0 / 233_280.0);
        // (49297 * 9301 + 49297) % 233280 = 165494
        let expected = ((49_297u64 * 9_301 + 49_297) % 233_280) as f64 / 233_280.0;
        assert_eq!(rng.next_f64(), expected);
    }

    #[test]
    fn test_rng_stays_in_unit_interval() {
        let mut rng = SeededRng::new(u32::MAX);
        for _ in 0..10_000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_day_seed() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        assert_eq!(day_seed(date), 32 + 2026);
        let next = date.succ_opt().unwrap();
        assert_ne!(day_seed(date), day_seed(next));
    }

    #[test]
    fn test_same_seed_same_order() {
        let items: Vec<u32> = (0..25).collect();
        let first = seeded_shuffle(&items, 2_316);
        let second = seeded_shuffle(&items.clone(), 2_316);
        assert_eq!(first, second);
    }

    #[test]
    fn test_output_is_permutation() {
        let items = vec!["a", "b", "b", "c", "d", "e", "f"];
        for seed in [0, 1, 42, 2_316, 99_999, u32::MAX] {
            let mut shuffled = seeded_shuffle(&items, seed);
            assert_eq!(shuffled.len(), items.len());
            shuffled.sort();
            let mut sorted = items.clone();
            sorted.sort();
            assert_eq!(shuffled, sorted);
        }
    }

    #[test]
    fn test_input_not_mutated_and_seeds_differ() {
        let items: Vec<u32> = (0..20).collect();
        let a = seeded_shuffle(&items, 2_100);
        let b = seeded_shuffle(&items, 2_101);
        assert_eq!(items, (0..20).collect::<Vec<_>>());
        assert_ne!(a, b);
    }

    #[test]
    fn test_empty_and_single() {
        let empty: Vec<u8> = Vec::new();
        assert!(seeded_shuffle(&empty, 7).is_empty());
        assert_eq!(seeded_shuffle(&["only"], 7), vec!["only"]);
    }
}
