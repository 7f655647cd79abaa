//! Uniform random reordering.

use rand::Rng;

/// Fisher-Yates shuffle of a copy of `items` using `rng`.
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.gen_range(0..=i);
        out.swap(i, j);
    }
    out
}

/// Shuffle a copy of `items` with the thread-local generator.
pub fn shuffled_random<T: Clone>(items: &[T]) -> Vec<T> {
    shuffled(items, &mut rand::thread_rng())
}
