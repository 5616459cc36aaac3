//! Deterministic test signals.

use std::f64::consts::PI;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Creates a PCG32 generator from a 32-bit seed.
///
/// The seed is duplicated into both halves of the 64-bit state seed.
pub fn create_rng(seed: u32) -> Pcg32 {
    let seed64 = (seed as u64) | ((seed as u64) << 32);
    Pcg32::seed_from_u64(seed64)
}

/// Derives an independent seed for a named signal from a base seed.
pub fn derive_seed(base_seed: u32, key: &str) -> u32 {
    let mut input = Vec::with_capacity(4 + key.len());
    input.extend_from_slice(&base_seed.to_le_bytes());
    input.extend_from_slice(key.as_bytes());
    let hash = blake3::hash(&input);
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&hash.as_bytes()[..4]);
    u32::from_le_bytes(bytes)
}

/// Sum of sines: `Σ amp·sin(2π·freq·n/fs)`.
pub fn sines(components: &[(f64, f64)], sample_rate: f64, len: usize) -> Vec<f64> {
    (0..len)
        .map(|n| {
            let t = n as f64 / sample_rate;
            components
                .iter()
                .map(|&(freq, amp)| amp * (2.0 * PI * freq * t).sin())
                .sum()
        })
        .collect()
}

/// The three-tone signal used by the reference traces (5, 35 and 80 Hz).
pub fn mixed_tones(sample_rate: f64, len: usize) -> Vec<f64> {
    sines(&[(5.0, 1.0), (35.0, 0.5), (80.0, 0.2)], sample_rate, len)
}

/// Uniform white noise in `[-1, 1)`.
pub fn white_noise(seed: u32, len: usize) -> Vec<f64> {
    let mut rng = create_rng(derive_seed(seed, "white_noise"));
    (0..len).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

/// A constant signal.
pub fn constant(value: f64, len: usize) -> Vec<f64> {
    vec![value; len]
}

/// A unit impulse at `at`.
pub fn impulse(len: usize, at: usize) -> Vec<f64> {
    let mut x = vec![0.0; len];
    if at < len {
        x[at] = 1.0;
    }
    x
}
