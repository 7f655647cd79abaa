//! Selection and ordering of content for display.
//!
//! - `seeded_shuffle`: stable-for-the-day ordering from a numeric seed
//! - `diversify`: round-robin across categories
//! - `shuffled`: uniform random ordering

mod diversify;
mod seeded;
mod shuffle;

pub use diversify::diversify;
pub use seeded::{SeededRng, day_seed, seeded_shuffle, today_seed};
pub use shuffle::{shuffled, shuffled_random};
