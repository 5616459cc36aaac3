//! Per-pass biquad state.

use crate::cascade::{Biquad, Cascade};

/// Recurrence used by a [`BiquadRuntime`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Topology {
    /// Direct Form II: `w = x - a1·v1 - a2·v2; y = b0·w + b1·v1 + b2·v2`.
    DirectForm2,
    /// Direct Form II transposed: `y = b0·x + v1; v1 = b1·x - a1·y + v2; v2 = b2·x - a2·y`.
    #[default]
    DirectForm2Transposed,
}

/// One biquad with its two delay registers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadRuntime {
    biquad: Biquad,
    topology: Topology,
    v1: f64,
    v2: f64,
}

impl BiquadRuntime {
    /// Creates a runtime with zeroed state.
    pub fn new(biquad: Biquad, topology: Topology) -> Self {
        Self {
            biquad,
            topology,
            v1: 0.0,
            v2: 0.0,
        }
    }

    /// Zeroed runtimes for every section of a cascade.
    pub fn for_cascade(cascade: &Cascade, topology: Topology) -> Vec<Self> {
        cascade
            .sections()
            .iter()
            .map(|&b| Self::new(b, topology))
            .collect()
    }

    /// Sets both delay registers.
    pub fn seed(&mut self, v1: f64, v2: f64) {
        self.v1 = v1;
        self.v2 = v2;
    }

    /// Zeroes both delay registers.
    pub fn reset(&mut self) {
        self.seed(0.0, 0.0);
    }

    /// Current delay registers `[v1, v2]`.
    pub fn state(&self) -> [f64; 2] {
        [self.v1, self.v2]
    }

    /// The section coefficients.
    pub fn biquad(&self) -> &Biquad {
        &self.biquad
    }

    /// The recurrence in use.
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Processes one sample.
    #[inline]
    pub fn step(&mut self, x: f64) -> f64 {
        let b = &self.biquad;
        match self.topology {
            Topology::DirectForm2 => {
                let w = x - b.a1() * self.v1 - b.a2() * self.v2;
                let y = b.b0() * w + b.b1() * self.v1 + b.b2() * self.v2;
                self.v2 = self.v1;
                self.v1 = w;
                y
            }
            Topology::DirectForm2Transposed => {
                let y = b.b0() * x + self.v1;
                self.v1 = b.b1() * x - b.a1() * y + self.v2;
                self.v2 = b.b2() * x - b.a2() * y;
                y
            }
        }
    }

    /// Filters `data` in place.
    pub fn process(&mut self, data: &mut [f64]) {
        for sample in data.iter_mut() {
            *sample = self.step(*sample);
        }
    }
}

/// Runs `data` through every runtime in order, in place.
pub fn process_cascade(runtimes: &mut [BiquadRuntime], data: &mut [f64]) {
    for runtime in runtimes.iter_mut() {
        runtime.process(data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section() -> Biquad {
        Biquad::new(0.2, 0.3, 0.1, 1.0, -0.5, 0.2).unwrap()
    }

    #[test]
    fn test_impulse_response_matches_difference_equation() {
        let mut rt = BiquadRuntime::new(section(), Topology::DirectForm2Transposed);
        let mut x = vec![0.0; 6];
        x[0] = 1.0;
        rt.process(&mut x);

        // y[n] = 0.2x[n] + 0.3x[n-1] + 0.1x[n-2] + 0.5y[n-1] - 0.2y[n-2]
        let mut expected = vec![0.0; 6];
        let input = [1.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        for n in 0..6 {
            let xm1 = if n >= 1 { input[n - 1] } else { 0.0 };
            let xm2 = if n >= 2 { input[n - 2] } else { 0.0 };
            let ym1 = if n >= 1 { expected[n - 1] } else { 0.0 };
            let ym2 = if n >= 2 { expected[n - 2] } else { 0.0 };
            expected[n] = 0.2 * input[n] + 0.3 * xm1 + 0.1 * xm2 + 0.5 * ym1 - 0.2 * ym2;
        }
        for (got, want) in x.iter().zip(expected.iter()) {
            assert!((got - want).abs() < 1e-14);
        }
    }

    #[test]
    fn test_topologies_agree_from_zero_state() {
        let signal: Vec<f64> = (0..64).map(|i| ((i * 7) % 11) as f64 - 5.0).collect();
        let mut a = signal.clone();
        let mut b = signal;
        BiquadRuntime::new(section(), Topology::DirectForm2).process(&mut a);
        BiquadRuntime::new(section(), Topology::DirectForm2Transposed).process(&mut b);
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < 1e-12);
        }
    }

    #[test]
    fn test_seed_and_reset() {
        let mut rt = BiquadRuntime::new(section(), Topology::DirectForm2);
        rt.seed(1.5, -2.0);
        assert_eq!(rt.state(), [1.5, -2.0]);
        rt.reset();
        assert_eq!(rt.state(), [0.0, 0.0]);
        assert_eq!(rt.topology(), Topology::DirectForm2);
    }
}
