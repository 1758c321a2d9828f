//! Sample generation
//!
//! Seeded so failures reproduce.

use colorspace_core::Rgb;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Evenly spaced RGB cube with `steps` values per channel
pub fn rgb_grid(steps: usize) -> Vec<Rgb> {
    let step = |i: usize| i as f64 / (steps - 1).max(1) as f64;
    let mut colors = Vec::with_capacity(steps * steps * steps);
    for r in 0..steps {
        for g in 0..steps {
            for b in 0..steps {
                colors.push(Rgb::new(step(r), step(g), step(b)));
            }
        }
    }
    colors
}

/// Uniform random colors inside the unit cube
pub fn random_rgb(seed: u64, count: usize) -> Vec<Rgb> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| Rgb::new(rng.r#gen(), rng.r#gen(), rng.r#gen()))
        .collect()
}

/// Uniform random values in `[low, high)`
pub fn random_values(seed: u64, count: usize, low: f64, high: f64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count).map(|_| rng.gen_range(low..high)).collect()
}

/// Gray levels from 0 to 1 inclusive
pub fn gray_ramp(steps: usize) -> Vec<f64> {
    (0..steps).map(|i| i as f64 / (steps - 1).max(1) as f64).collect()
}
