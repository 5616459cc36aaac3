//! Zero-phase (forward-backward) filtering.
//!
//! The engine pads the signal, runs the cascade forward from a steady-state
//! seed, reverses, runs it again from a fresh seed, reverses back and strips
//! the padding. Each transition is an explicit [`Stage`] so the pipeline can
//! be stepped and inspected.

use filtkit_spec::{FiltfiltOptions, PadType};
use log::warn;

use crate::cascade::Cascade;
use crate::error::{DspError, DspResult};
use crate::runtime::{process_cascade, BiquadRuntime};
use crate::steady_state::{seeded_runtimes, unit_states, SeedMethod};
use crate::tolerances::Tolerances;

/// Pipeline position of a [`ZeroPhaseEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Signal loaded, nothing done yet.
    Idle,
    /// Edge extension applied.
    Padded,
    /// First pass complete.
    ForwardFiltered,
    /// Buffer reversed for the second pass.
    Reversed1,
    /// Second-pass state seeded from the reversed buffer.
    InitializedBackward,
    /// Second pass complete.
    BackwardFiltered,
    /// Buffer restored to original time order.
    Reversed2,
    /// Padding stripped.
    Unpadded,
    /// Output ready.
    Done,
}

/// Default edge extension: `3·(2·sections + 1)` samples.
pub fn default_pad_len(sections: usize) -> usize {
    3 * (2 * sections + 1)
}

/// Extends `x` by `pad_len` samples at each end.
///
/// `pad_len` must be less than `x.len()` for the reflecting types.
pub fn extend(x: &[f64], pad_len: usize, pad_type: PadType) -> Vec<f64> {
    if pad_len == 0 || x.is_empty() {
        return x.to_vec();
    }
    let last = x.len() - 1;
    let (first_value, last_value) = (x[0], x[last]);
    let mut out = Vec::with_capacity(x.len() + 2 * pad_len);
    match pad_type {
        PadType::Odd => {
            out.extend((0..pad_len).map(|i| 2.0 * first_value - x[pad_len - i]));
            out.extend_from_slice(x);
            out.extend((0..pad_len).map(|i| 2.0 * last_value - x[last - 1 - i]));
        }
        PadType::Even => {
            out.extend((0..pad_len).map(|i| x[pad_len - i]));
            out.extend_from_slice(x);
            out.extend((0..pad_len).map(|i| x[last - 1 - i]));
        }
        PadType::Constant => {
            out.extend(std::iter::repeat(first_value).take(pad_len));
            out.extend_from_slice(x);
            out.extend(std::iter::repeat(last_value).take(pad_len));
        }
        PadType::None => out.extend_from_slice(x),
    }
    out
}

/// Forward-backward filter over one cascade.
///
/// Unit-input steady states are computed once in [`ZeroPhaseEngine::new`]
/// and reused for every signal; each pass gets freshly seeded runtimes.
#[derive(Debug, Clone)]
pub struct ZeroPhaseEngine<'a> {
    cascade: &'a Cascade,
    seed: SeedMethod,
    unit: Vec<[f64; 2]>,
    options: FiltfiltOptions,
    stage: Stage,
    buffer: Vec<f64>,
    runtimes: Vec<BiquadRuntime>,
    pad_len: usize,
}

impl<'a> ZeroPhaseEngine<'a> {
    /// Prepares an engine, failing early if a section cannot be seeded.
    pub fn new(
        cascade: &'a Cascade,
        seed: SeedMethod,
        options: FiltfiltOptions,
        tol: &Tolerances,
    ) -> DspResult<Self> {
        let unit = unit_states(cascade, seed, tol)?;
        Ok(Self {
            cascade,
            seed,
            unit,
            options,
            stage: Stage::Idle,
            buffer: Vec::new(),
            runtimes: Vec::new(),
            pad_len: 0,
        })
    }

    /// Current pipeline stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Pad length chosen for the loaded signal.
    pub fn pad_len(&self) -> usize {
        self.pad_len
    }

    /// Working buffer in its current state.
    pub fn buffer(&self) -> &[f64] {
        &self.buffer
    }

    fn resolve_pad_len(&self, len: usize) -> DspResult<usize> {
        if self.options.pad_type == PadType::None {
            return Ok(0);
        }
        match self.options.pad_len {
            Some(n) if n >= len => Err(DspError::invalid_param(
                "pad_len",
                format!("pad length {} must be less than signal length {}", n, len),
            )),
            Some(n) => Ok(n),
            None => {
                let n = default_pad_len(self.cascade.len());
                if n >= len {
                    warn!(
                        "signal of {} samples is shorter than the pad length {}; clamping to {}",
                        len,
                        n,
                        len - 1
                    );
                    Ok(len - 1)
                } else {
                    Ok(n)
                }
            }
        }
    }

    /// Loads a signal and resets the pipeline to [`Stage::Idle`].
    pub fn load(&mut self, x: &[f64]) -> DspResult<()> {
        if x.is_empty() {
            return Err(DspError::EmptySignal);
        }
        self.pad_len = self.resolve_pad_len(x.len())?;
        self.buffer = x.to_vec();
        self.runtimes.clear();
        self.stage = Stage::Idle;
        Ok(())
    }

    fn seed_from_front(&mut self) {
        let x0 = self.buffer[0];
        self.runtimes = seeded_runtimes(self.cascade, self.seed, &self.unit, x0);
    }

    /// Advances one stage. Stepping at [`Stage::Done`] is a no-op.
    pub fn step(&mut self) -> DspResult<Stage> {
        if self.buffer.is_empty() {
            return Err(DspError::EmptySignal);
        }
        self.stage = match self.stage {
            Stage::Idle => {
                self.buffer = extend(&self.buffer, self.pad_len, self.options.pad_type);
                Stage::Padded
            }
            Stage::Padded => {
                self.seed_from_front();
                process_cascade(&mut self.runtimes, &mut self.buffer);
                Stage::ForwardFiltered
            }
            Stage::ForwardFiltered => {
                self.buffer.reverse();
                Stage::Reversed1
            }
            Stage::Reversed1 => {
                self.seed_from_front();
                Stage::InitializedBackward
            }
            Stage::InitializedBackward => {
                process_cascade(&mut self.runtimes, &mut self.buffer);
                Stage::BackwardFiltered
            }
            Stage::BackwardFiltered => {
                self.buffer.reverse();
                Stage::Reversed2
            }
            Stage::Reversed2 => {
                let end = self.buffer.len() - self.pad_len;
                self.buffer.truncate(end);
                self.buffer.drain(..self.pad_len);
                Stage::Unpadded
            }
            Stage::Unpadded | Stage::Done => Stage::Done,
        };
        Ok(self.stage)
    }

    /// Loads `x`, runs every stage and returns the filtered signal.
    pub fn run(&mut self, x: &[f64]) -> DspResult<Vec<f64>> {
        self.load(x)?;
        while self.step()? != Stage::Done {}
        Ok(std::mem::take(&mut self.buffer))
    }
}

/// Zero-phase filters `x` through `cascade`.
pub fn filtfilt(
    cascade: &Cascade,
    seed: SeedMethod,
    x: &[f64],
    options: FiltfiltOptions,
    tol: &Tolerances,
) -> DspResult<Vec<f64>> {
    ZeroPhaseEngine::new(cascade, seed, options, tol)?.run(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prototype::AnalogPrototype;
    use crate::transform::FrequencyTransform;
    use filtkit_spec::BesselNorm;
    use pretty_assertions::assert_eq;

    fn lowpass(proto: AnalogPrototype, order: u32) -> Cascade {
        let analog = proto.design(order, &Tolerances::default()).unwrap();
        let digital = FrequencyTransform::LowPass { cutoff: 0.1 }
            .apply(&analog)
            .unwrap();
        Cascade::from_layout(&digital).unwrap()
    }

    fn butter() -> Cascade {
        lowpass(AnalogPrototype::Butterworth, 4)
    }

    fn signal(len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| (i as f64 * 0.05).sin() + 0.3 * (i as f64 * 1.3).cos())
            .collect()
    }

    fn run(cascade: &Cascade, x: &[f64], options: FiltfiltOptions) -> DspResult<Vec<f64>> {
        filtfilt(cascade, SeedMethod::LfilterZi, x, options, &Tolerances::default())
    }

    #[test]
    fn test_default_pad_len() {
        assert_eq!(default_pad_len(1), 9);
        assert_eq!(default_pad_len(2), 15);
    }

    #[test]
    fn test_extend_pad_types() {
        let x = [1.0, 2.0, 4.0, 7.0, 11.0];
        assert_eq!(
            extend(&x, 2, PadType::Odd),
            vec![-2.0, 0.0, 1.0, 2.0, 4.0, 7.0, 11.0, 15.0, 18.0]
        );
        assert_eq!(
            extend(&x, 2, PadType::Even),
            vec![4.0, 2.0, 1.0, 2.0, 4.0, 7.0, 11.0, 7.0, 4.0]
        );
        assert_eq!(
            extend(&x, 2, PadType::Constant),
            vec![1.0, 1.0, 1.0, 2.0, 4.0, 7.0, 11.0, 11.0, 11.0]
        );
        assert_eq!(extend(&x, 2, PadType::None), x.to_vec());
        assert_eq!(extend(&x, 0, PadType::Odd), x.to_vec());
    }

    #[test]
    fn test_stages_in_order() {
        let cascade = butter();
        let mut engine = ZeroPhaseEngine::new(
            &cascade,
            SeedMethod::LfilterZi,
            FiltfiltOptions::default(),
            &Tolerances::default(),
        )
        .unwrap();
        engine.load(&signal(64)).unwrap();
        assert_eq!(engine.stage(), Stage::Idle);

        let mut stages = Vec::new();
        loop {
            let stage = engine.step().unwrap();
            stages.push(stage);
            if stage == Stage::Done {
                break;
            }
        }
        assert_eq!(
            stages,
            vec![
                Stage::Padded,
                Stage::ForwardFiltered,
                Stage::Reversed1,
                Stage::InitializedBackward,
                Stage::BackwardFiltered,
                Stage::Reversed2,
                Stage::Unpadded,
                Stage::Done,
            ]
        );
        assert_eq!(engine.buffer().len(), 64);
        assert_eq!(engine.step().unwrap(), Stage::Done);
    }

    #[test]
    fn test_padded_length() {
        let cascade = butter();
        let mut engine = ZeroPhaseEngine::new(
            &cascade,
            SeedMethod::LfilterZi,
            FiltfiltOptions::default(),
            &Tolerances::default(),
        )
        .unwrap();
        engine.load(&signal(64)).unwrap();
        engine.step().unwrap();
        assert_eq!(engine.pad_len(), 15);
        assert_eq!(engine.buffer().len(), 64 + 30);
    }

    #[test]
    fn test_constant_signal_preserved() {
        let cascade = butter();
        let x = vec![2.5; 100];
        for pad_type in [PadType::Odd, PadType::Even, PadType::Constant, PadType::None] {
            let y = run(&cascade, &x, FiltfiltOptions::new().with_pad_type(pad_type)).unwrap();
            assert_eq!(y.len(), x.len());
            for v in y {
                assert!((v - 2.5).abs() < 1e-9, "{:?}: {}", pad_type, v);
            }
        }
    }

    #[test]
    fn test_identity_section_returns_input() {
        let cascade = Cascade::from_sos(&[[1.0, 0.0, 0.0, 1.0, 0.0, 0.0]]).unwrap();
        let x = signal(40);
        for pad_type in [PadType::Odd, PadType::Even, PadType::Constant, PadType::None] {
            let y = run(&cascade, &x, FiltfiltOptions::new().with_pad_type(pad_type)).unwrap();
            assert_eq!(y, x);
        }
    }

    #[test]
    fn test_single_sample_signal() {
        let y = run(&butter(), &[7.0], FiltfiltOptions::default()).unwrap();
        assert_eq!(y.len(), 1);
        assert!((y[0] - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_short_signal_clamps_pad_len() {
        let cascade = butter();
        let mut engine = ZeroPhaseEngine::new(
            &cascade,
            SeedMethod::LfilterZi,
            FiltfiltOptions::default(),
            &Tolerances::default(),
        )
        .unwrap();
        let y = engine.run(&signal(5)).unwrap();
        assert_eq!(engine.pad_len(), 4);
        assert_eq!(y.len(), 5);
    }

    #[test]
    fn test_explicit_pad_len() {
        let cascade = butter();
        let x = signal(20);
        let y = run(&cascade, &x, FiltfiltOptions::new().with_pad_len(3)).unwrap();
        assert_eq!(y.len(), 20);

        let err = run(&cascade, &x, FiltfiltOptions::new().with_pad_len(20)).unwrap_err();
        assert!(matches!(err, DspError::InvalidParameter { .. }));
    }

    #[test]
    fn test_empty_signal_rejected() {
        let err = run(&butter(), &[], FiltfiltOptions::default()).unwrap_err();
        assert!(matches!(err, DspError::EmptySignal));
    }

    #[test]
    fn test_step_without_signal_fails() {
        let cascade = butter();
        let mut engine = ZeroPhaseEngine::new(
            &cascade,
            SeedMethod::LfilterZi,
            FiltfiltOptions::default(),
            &Tolerances::default(),
        )
        .unwrap();
        assert!(engine.step().is_err());
    }

    #[test]
    fn test_seed_methods_agree() {
        let cascade = lowpass(
            AnalogPrototype::Bessel {
                norm: BesselNorm::Phase,
            },
            5,
        );
        let x = signal(200);
        let tol = Tolerances::default();
        let opts = FiltfiltOptions::default();
        let a = filtfilt(&cascade, SeedMethod::LfilterZi, &x, opts, &tol).unwrap();
        let b = filtfilt(&cascade, SeedMethod::ClosedForm, &x, opts, &tol).unwrap();
        for (u, v) in a.iter().zip(b.iter()) {
            assert!((u - v).abs() < 1e-10, "{} vs {}", u, v);
        }
    }
}
