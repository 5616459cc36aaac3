//! Design facade: spec in, ready-to-run filter out.

use filtkit_spec::{validate_filter_spec, FiltfiltOptions, FilterSpec};
use log::{debug, warn};

use crate::cascade::Cascade;
use crate::error::{DspError, DspResult};
use crate::filter;
use crate::filtfilt::{self, ZeroPhaseEngine};
use crate::layout::Complex;
use crate::prototype::AnalogPrototype;
use crate::steady_state::SeedMethod;
use crate::tolerances::Tolerances;
use crate::transform::FrequencyTransform;

/// A designed IIR filter.
///
/// Immutable after construction; each filtering call allocates its own
/// runtime state, so one filter can serve many signals.
#[derive(Debug, Clone, PartialEq)]
pub struct IirFilter {
    spec: FilterSpec,
    prototype: AnalogPrototype,
    cascade: Cascade,
    tolerances: Tolerances,
}

impl IirFilter {
    /// Designs a filter with default tolerances.
    ///
    /// # Example
    ///
    /// ```
    /// use filtkit_dsp::IirFilter;
    /// use filtkit_spec::{Band, Family, FilterSpec};
    ///
    /// let spec = FilterSpec::new(Family::Butterworth, Band::lowpass(10.0), 4, 100.0);
    /// let filter = IirFilter::design(&spec).unwrap();
    /// assert_eq!(filter.sos().len(), 2);
    ///
    /// let y = filter.filtfilt(&vec![1.0; 64]).unwrap();
    /// assert!(y.iter().all(|v| (v - 1.0).abs() < 1e-9));
    /// ```
    pub fn design(spec: &FilterSpec) -> DspResult<Self> {
        Self::design_with(spec, Tolerances::default())
    }

    /// Designs a filter with explicit tolerances.
    ///
    /// The spec is validated first; every validation error is reported
    /// together as [`DspError::Validation`].
    pub fn design_with(spec: &FilterSpec, tolerances: Tolerances) -> DspResult<Self> {
        let warnings = validate_filter_spec(spec)
            .into_result()
            .map_err(|errors| DspError::Validation { errors })?;
        for warning in &warnings {
            warn!("{}", warning);
        }

        let prototype = AnalogPrototype::from(&spec.family);
        let analog = prototype.design(spec.order, &tolerances)?;
        let transform = FrequencyTransform::from_band(&spec.band, spec.sample_rate)?;
        let digital = transform.apply(&analog)?;
        let cascade = Cascade::from_layout(&digital)?;

        debug!(
            "designed {} {} filter: order {}, {} sections, gain {:e}",
            prototype.name(),
            spec.band.kind(),
            spec.order,
            cascade.len(),
            cascade.gain()
        );

        Ok(Self {
            spec: *spec,
            prototype,
            cascade,
            tolerances,
        })
    }

    /// The design request.
    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    /// The analog prototype family.
    pub fn prototype(&self) -> AnalogPrototype {
        self.prototype
    }

    /// The digital cascade.
    pub fn cascade(&self) -> &Cascade {
        &self.cascade
    }

    /// SOS matrix, one `[b0, b1, b2, a0, a1, a2]` row per section.
    pub fn sos(&self) -> Vec<[f64; 6]> {
        self.cascade.to_sos()
    }

    /// Seeding used by zero-phase filtering.
    pub fn seed_method(&self) -> SeedMethod {
        self.prototype.seed_method()
    }

    /// Tolerances the filter was designed with.
    pub fn tolerances(&self) -> &Tolerances {
        &self.tolerances
    }

    /// Magnitude in dB at `freq` Hz.
    pub fn magnitude_db(&self, freq: f64) -> f64 {
        self.cascade.magnitude_db(freq, self.spec.sample_rate)
    }

    /// Complex response at `freq` Hz.
    pub fn response(&self, freq: f64) -> Complex {
        let w = 2.0 * std::f64::consts::PI * freq / self.spec.sample_rate;
        self.cascade.response(w)
    }

    /// Single causal pass from zero state.
    pub fn lfilter(&self, x: &[f64]) -> Vec<f64> {
        filter::lfilter(&self.cascade, x)
    }

    /// Zero-phase filtering with odd extension and the default pad length.
    pub fn filtfilt(&self, x: &[f64]) -> DspResult<Vec<f64>> {
        self.filtfilt_with(x, FiltfiltOptions::default())
    }

    /// Zero-phase filtering with explicit options.
    pub fn filtfilt_with(&self, x: &[f64], options: FiltfiltOptions) -> DspResult<Vec<f64>> {
        filtfilt::filtfilt(
            &self.cascade,
            self.seed_method(),
            x,
            options,
            &self.tolerances,
        )
    }

    /// A steppable zero-phase engine over this filter's cascade.
    pub fn engine(&self, options: FiltfiltOptions) -> DspResult<ZeroPhaseEngine<'_>> {
        ZeroPhaseEngine::new(&self.cascade, self.seed_method(), options, &self.tolerances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filtkit_spec::{Band, ErrorCode, Family};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_design_butterworth_lowpass() {
        let spec = FilterSpec::new(Family::Butterworth, Band::lowpass(25.0), 2, 100.0);
        let filter = IirFilter::design(&spec).unwrap();
        assert_eq!(filter.sos().len(), 1);
        assert_eq!(filter.seed_method(), SeedMethod::LfilterZi);
        assert!((filter.magnitude_db(25.0) + 10.0 * 2f64.log10()).abs() < 1e-9);
        assert!((filter.response(0.0).re - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_bessel_uses_closed_form_seed() {
        let spec = FilterSpec::new(Family::bessel(), Band::lowpass(5.0), 4, 100.0);
        let filter = IirFilter::design(&spec).unwrap();
        assert_eq!(filter.seed_method(), SeedMethod::ClosedForm);
        assert_eq!(filter.prototype().name(), "bessel");
    }

    #[test]
    fn test_validation_errors_collected() {
        let spec = FilterSpec::new(Family::chebyshev1(-1.0), Band::lowpass(80.0), 0, 100.0);
        let err = IirFilter::design(&spec).unwrap_err();
        match err {
            DspError::Validation { errors } => {
                let codes: Vec<_> = errors.iter().map(|e| e.code).collect();
                assert!(codes.contains(&ErrorCode::InvalidOrder));
                assert!(codes.contains(&ErrorCode::InvalidRipple));
                assert!(codes.contains(&ErrorCode::FrequencyOutOfRange));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_lfilter_and_filtfilt_preserve_length() {
        let spec = FilterSpec::new(Family::elliptic(0.5, 40.0), Band::highpass(10.0), 3, 100.0);
        let filter = IirFilter::design(&spec).unwrap();
        let x: Vec<f64> = (0..50).map(|i| (i as f64 * 0.4).sin()).collect();
        assert_eq!(filter.lfilter(&x).len(), 50);
        assert_eq!(filter.filtfilt(&x).unwrap().len(), 50);
    }

    #[test]
    fn test_engine_reports_pad_len() {
        let spec = FilterSpec::new(Family::Butterworth, Band::bandpass(20.0, 10.0), 2, 100.0);
        let filter = IirFilter::design(&spec).unwrap();
        let mut engine = filter.engine(FiltfiltOptions::default()).unwrap();
        engine.run(&vec![0.0; 100]).unwrap();
        assert_eq!(engine.pad_len(), 15);
    }
}
