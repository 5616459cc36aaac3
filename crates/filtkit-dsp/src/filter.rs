//! Single-pass cascade filtering.

use crate::cascade::Cascade;
use crate::error::{DspError, DspResult};
use crate::runtime::{process_cascade, BiquadRuntime, Topology};

/// Filters `x` through SOS rows `[b0, b1, b2, a0, a1, a2]` with zero initial state.
pub fn sosfilt(sos: &[[f64; 6]], x: &[f64]) -> DspResult<Vec<f64>> {
    let cascade = Cascade::from_sos(sos)?;
    Ok(lfilter(&cascade, x))
}

/// Single causal pass through the cascade, starting from zero state.
pub fn lfilter(cascade: &Cascade, x: &[f64]) -> Vec<f64> {
    let mut runtimes = BiquadRuntime::for_cascade(cascade, Topology::DirectForm2Transposed);
    let mut out = x.to_vec();
    process_cascade(&mut runtimes, &mut out);
    out
}

/// Causal pass from explicit transposed-form states, one `[v1, v2]` per section.
///
/// Returns the output and the final states, so consecutive blocks can be
/// chained.
pub fn sosfilt_with_state(
    cascade: &Cascade,
    x: &[f64],
    zi: &[[f64; 2]],
) -> DspResult<(Vec<f64>, Vec<[f64; 2]>)> {
    if zi.len() != cascade.len() {
        return Err(DspError::LengthMismatch {
            expected: cascade.len(),
            actual: zi.len(),
        });
    }
    let mut runtimes = BiquadRuntime::for_cascade(cascade, Topology::DirectForm2Transposed);
    for (rt, state) in runtimes.iter_mut().zip(zi) {
        rt.seed(state[0], state[1]);
    }
    let mut out = x.to_vec();
    process_cascade(&mut runtimes, &mut out);
    let zf = runtimes.iter().map(BiquadRuntime::state).collect();
    Ok((out, zf))
}
