//! End-to-end scenarios through the design facade.

use filtkit_dsp::elliptic::ellipk;
use filtkit_dsp::{
    design_sos, sosfilt, Cascade, DspError, IirFilter, SeedMethod, Stage, Tolerances, ZeroPhaseEngine,
};
use filtkit_spec::{
    Band, BesselNorm, CodedError, ErrorCode, Family, FiltfiltOptions, FilterSpec, PadType,
};
use filtkit_tests::signals;
use pretty_assertions::assert_eq;

const FS: f64 = 1000.0;

fn design(family: Family, band: Band, order: u32) -> IirFilter {
    IirFilter::design(&FilterSpec::new(family, band, order, FS)).unwrap()
}

fn half_power_db() -> f64 {
    -10.0 * 2f64.log10()
}

// ============================================================================
// Structure
// ============================================================================

#[test]
fn section_counts_by_band() {
    for order in 1..=8u32 {
        let lowpass = design(Family::Butterworth, Band::lowpass(100.0), order);
        let highpass = design(Family::Butterworth, Band::highpass(100.0), order);
        let bandpass = design(Family::Butterworth, Band::bandpass(100.0, 40.0), order);
        let bandstop = design(Family::Butterworth, Band::bandstop(100.0, 40.0), order);

        let half = order.div_ceil(2) as usize;
        assert_eq!(lowpass.sos().len(), half);
        assert_eq!(highpass.sos().len(), half);
        assert_eq!(bandpass.sos().len(), order as usize);
        assert_eq!(bandstop.sos().len(), order as usize);
        if order % 2 == 0 {
            assert_eq!(bandpass.sos().len(), 2 * lowpass.sos().len());
        }
    }
}

#[test]
fn sections_are_stable() {
    let families = [
        Family::Butterworth,
        Family::chebyshev1(1.0),
        Family::chebyshev2(50.0),
        Family::elliptic(0.5, 60.0),
        Family::bessel(),
    ];
    for family in families {
        for band in [Band::lowpass(50.0), Band::bandstop(200.0, 50.0)] {
            let filter = design(family, band, 6);
            for row in filter.sos() {
                let (a1, a2) = (row[4], row[5]);
                // Stability triangle for a second-order denominator.
                assert!(a2.abs() < 1.0, "{:?}: {:?}", family, row);
                assert!(a1.abs() < 1.0 + a2, "{:?}: {:?}", family, row);
            }
        }
    }
}

// ============================================================================
// Frequency response
// ============================================================================

#[test]
fn gain_at_critical_frequency_per_family() {
    let cases = [
        (Family::Butterworth, half_power_db()),
        (Family::chebyshev1(0.5), -0.5),
        (Family::chebyshev2(40.0), -40.0),
        (Family::elliptic(1.0, 40.0), -1.0),
        (Family::Bessel { norm: BesselNorm::Mag }, half_power_db()),
    ];
    for (family, expected) in cases {
        for order in [3, 4] {
            let filter = design(family, Band::lowpass(120.0), order);
            let got = filter.magnitude_db(120.0);
            assert!(
                (got - expected).abs() < 1e-7,
                "{} order {}: {} dB",
                family.name(),
                order,
                got
            );
        }
    }
}

#[test]
fn bandstop_notch() {
    let filter = design(Family::Butterworth, Band::bandstop_edges(45.0, 55.0), 2);
    assert!((filter.magnitude_db(45.0) - half_power_db()).abs() < 1e-9);
    assert!((filter.magnitude_db(55.0) - half_power_db()).abs() < 1e-9);
    assert!(filter.magnitude_db(10.0) > -0.01);
    assert!(filter.magnitude_db(200.0) > -0.01);

    let deepest = (0..=1000)
        .map(|i| filter.magnitude_db(45.0 + i as f64 * 0.01))
        .fold(f64::INFINITY, f64::min);
    assert!(deepest < -60.0, "notch depth {} dB", deepest);
}

#[test]
fn highpass_blocks_dc() {
    let filter = design(Family::chebyshev1(1.0), Band::highpass(30.0), 5);
    assert!(filter.response(0.0).norm() < 1e-12);
    let y = filter.filtfilt(&signals::constant(3.0, 200)).unwrap();
    assert!(y.iter().all(|v| v.abs() < 1e-9), "{:?}", &y[..4]);
}

// ============================================================================
// Zero-phase filtering
// ============================================================================

#[test]
fn even_order_ripple_families_scale_dc() {
    // Even-order equiripple designs sit at the bottom of the passband ripple
    // at DC, so two passes scale a constant by 10^(-rp/10).
    let rp = 1.0;
    for family in [Family::chebyshev1(rp), Family::elliptic(rp, 40.0)] {
        let filter = design(family, Band::lowpass(80.0), 4);
        let y = filter.filtfilt(&signals::constant(2.0, 300)).unwrap();
        let expected = 2.0 * 10f64.powf(-rp / 10.0);
        for v in y {
            assert!((v - expected).abs() < 1e-9, "{}: {}", family.name(), v);
        }
    }
}

#[test]
fn lowpass_attenuates_high_tone() {
    let filter = design(Family::Butterworth, Band::lowpass(50.0), 6);
    let low = signals::sines(&[(5.0, 1.0)], FS, 2000);
    let mixed = signals::sines(&[(5.0, 1.0), (300.0, 1.0)], FS, 2000);
    let y = filter.filtfilt(&mixed).unwrap();
    // Compare away from the edges.
    let interior = 200..1800;
    let worst = y[interior.clone()]
        .iter()
        .zip(&low[interior])
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max);
    assert!(worst < 0.02, "residual {}", worst);
}

#[test]
fn short_signal_clamps_pad_len() {
    let filter = design(Family::Butterworth, Band::lowpass(100.0), 4);
    let x = signals::white_noise(3, 10);

    let mut engine = filter.engine(FiltfiltOptions::default()).unwrap();
    let clamped = engine.run(&x).unwrap();
    assert_eq!(engine.pad_len(), 9);
    assert_eq!(engine.stage(), Stage::Done);
    assert_eq!(clamped.len(), 10);

    let explicit = filter
        .filtfilt_with(&x, FiltfiltOptions::new().with_pad_len(9))
        .unwrap();
    assert_eq!(clamped, explicit);
}

#[test]
fn explicit_pad_len_too_long_is_config_error() {
    let filter = design(Family::Butterworth, Band::lowpass(100.0), 4);
    let err = filter
        .filtfilt_with(&[1.0, 2.0, 3.0], FiltfiltOptions::new().with_pad_len(3))
        .unwrap_err();
    assert_eq!(err.code(), "DSP_005");
    assert_eq!(err.category(), "config");
}

#[test]
fn empty_signal_rejected() {
    let filter = design(Family::bessel(), Band::lowpass(100.0), 3);
    let err = filter.filtfilt(&[]).unwrap_err();
    assert!(matches!(err, DspError::EmptySignal));
    assert_eq!(err.code(), "DSP_006");
    assert!(filter.lfilter(&[]).is_empty());
}

#[test]
fn pad_types_agree_in_the_interior() {
    let filter = design(Family::Butterworth, Band::lowpass(40.0), 4);
    let x = signals::mixed_tones(FS, 3000);
    let reference = filter.filtfilt(&x).unwrap();
    for pad_type in [PadType::Even, PadType::Constant, PadType::None] {
        let y = filter
            .filtfilt_with(&x, FiltfiltOptions::new().with_pad_type(pad_type))
            .unwrap();
        let interior = 1000..2000;
        let worst = y[interior.clone()]
            .iter()
            .zip(&reference[interior])
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max);
        assert!(worst < 1e-6, "{:?}: {}", pad_type, worst);
    }
}

#[test]
fn bessel_seed_methods_match() {
    let filter = design(
        Family::Bessel {
            norm: BesselNorm::Delay,
        },
        Band::lowpass(60.0),
        6,
    );
    assert_eq!(filter.seed_method(), SeedMethod::ClosedForm);
    let x = signals::white_noise(11, 500);
    let tol = Tolerances::default();
    let opts = FiltfiltOptions::default();
    let closed = ZeroPhaseEngine::new(filter.cascade(), SeedMethod::ClosedForm, opts, &tol)
        .unwrap()
        .run(&x)
        .unwrap();
    let general = ZeroPhaseEngine::new(filter.cascade(), SeedMethod::LfilterZi, opts, &tol)
        .unwrap()
        .run(&x)
        .unwrap();
    for (a, b) in closed.iter().zip(&general) {
        assert!((a - b).abs() < 1e-10);
    }
}

// ============================================================================
// SOS round trip and primitives
// ============================================================================

#[test]
fn sos_export_reimport() {
    let filter = design(Family::chebyshev2(30.0), Band::bandpass(150.0, 60.0), 3);
    let rebuilt = Cascade::from_sos(&filter.sos()).unwrap();
    let x = signals::white_noise(5, 256);
    assert_eq!(sosfilt(&filter.sos(), &x).unwrap(), filter.lfilter(&x));
    assert_eq!(rebuilt.to_sos(), filter.sos());
    assert_eq!(design_sos(filter.spec()).unwrap(), filter.sos());
}

#[test]
fn impulse_response_decays() {
    let filter = design(Family::Butterworth, Band::lowpass(100.0), 4);
    let h = filter.lfilter(&signals::impulse(2000, 0));
    let tail: f64 = h[1500..].iter().map(|v| v.abs()).sum();
    assert!(tail < 1e-12);
    let dc: f64 = h.iter().sum();
    assert!((dc - 1.0).abs() < 1e-9);
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn design_from_json() {
    let json = r#"{
        "family": {"type": "elliptic", "ripple_db": 0.5, "stopband_db": 50.0},
        "band": {"type": "bandstop", "center": 60.0, "width": 10.0},
        "order": 4,
        "sample_rate": 1000.0
    }"#;
    let spec = FilterSpec::from_json(json).unwrap();
    let filter = IirFilter::design(&spec).unwrap();
    assert_eq!(filter.sos().len(), 4);
    assert_eq!(filter.spec(), &spec);
}

#[test]
fn invalid_specs_report_every_error() {
    let spec = FilterSpec::new(
        Family::elliptic(30.0, 20.0),
        Band::bandpass(450.0, 200.0),
        30,
        FS,
    );
    let err = IirFilter::design(&spec).unwrap_err();
    assert_eq!(err.code(), "DSP_008");
    assert_eq!(err.category(), "config");
    let DspError::Validation { errors } = err else {
        panic!("expected validation error");
    };
    let codes: Vec<ErrorCode> = errors.iter().map(|e| e.code).collect();
    assert!(codes.contains(&ErrorCode::InvalidOrder));
    assert!(codes.contains(&ErrorCode::RippleExceedsAttenuation));
    assert!(codes.contains(&ErrorCode::FrequencyOutOfRange));
}

#[test]
fn complete_elliptic_integral_values() {
    let tol = Tolerances::default();
    assert!((ellipk(0.0, &tol) - std::f64::consts::FRAC_PI_2).abs() < 1e-15);
    assert!((ellipk(0.5, &tol) - 1.854_074_677_301_372).abs() < 1e-14);
    assert!((ellipk(0.9, &tol) - 2.578_092_113_348_173).abs() < 1e-13);
    assert!(ellipk(1.0, &tol).is_infinite());
}
