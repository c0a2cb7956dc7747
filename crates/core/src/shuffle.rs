//! Uniform random reordering used for question draws and option display.

use rand::Rng;
use rand::seq::SliceRandom;

/// Shuffle `items` in place with a Fisher-Yates pass.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}

/// Return a shuffled copy of `items`, leaving the input untouched.
#[must_use]
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut copy = items.to_vec();
    shuffle(&mut copy, rng);
    copy
}

/// Shuffle a copy of `items` and keep the first `count`.
#[must_use]
pub fn draw<T: Clone, R: Rng + ?Sized>(items: &[T], count: usize, rng: &mut R) -> Vec<T> {
    let mut picked = shuffled(items, rng);
    picked.truncate(count);
    picked
}
