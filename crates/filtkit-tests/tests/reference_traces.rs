//! Designed cascades and zero-phase output compared against stored traces.
//!
//! The traces were produced independently from the full transfer function
//! `(b, a)` rather than from sections, so agreement checks the whole design
//! pipeline and the section-wise steady-state seeding at once.

use filtkit_dsp::IirFilter;
use filtkit_tests::reference::{cascade_to_tf, max_abs_diff, rmse, ReferenceTrace};
use pretty_assertions::assert_eq;

fn check_trace(name: &str) {
    let trace = ReferenceTrace::load(name).unwrap();
    let filter = IirFilter::design(&trace.spec).unwrap();

    let (b, a) = cascade_to_tf(filter.cascade());
    assert_eq!(b.len(), trace.b.len(), "{}: numerator degree", name);
    assert_eq!(a.len(), trace.a.len(), "{}: denominator degree", name);
    let b_scale = trace.b.iter().fold(0.0f64, |m, v| m.max(v.abs()));
    assert!(
        max_abs_diff(&b, &trace.b) < 1e-10 * b_scale,
        "{}: b = {:?}, expected {:?}",
        name,
        b,
        trace.b
    );
    assert!(
        max_abs_diff(&a, &trace.a) < 1e-10,
        "{}: a = {:?}, expected {:?}",
        name,
        a,
        trace.a
    );

    let y = filter.filtfilt(&trace.input).unwrap();
    assert_eq!(y.len(), trace.expected.len());
    let error = rmse(&y, &trace.expected);
    assert!(error < 1e-10, "{} ({}): rmse {}", name, trace.description, error);
    assert!(max_abs_diff(&y, &trace.expected) < 1e-9, "{}", name);
}

#[test]
fn butterworth_lowpass_order4() {
    check_trace("butterworth_lowpass_o4");
}

#[test]
fn elliptic_lowpass_order4() {
    check_trace("elliptic_lowpass_o4");
}

#[test]
fn chebyshev1_highpass_order3() {
    check_trace("chebyshev1_highpass_o3");
}

#[test]
fn chebyshev2_bandpass_order2() {
    check_trace("chebyshev2_bandpass_o2");
}

#[test]
fn bessel_lowpass_order4() {
    check_trace("bessel_lowpass_o4");
}

#[test]
fn every_stored_trace_is_covered() {
    assert_eq!(
        ReferenceTrace::available(),
        vec![
            "bessel_lowpass_o4",
            "butterworth_lowpass_o4",
            "chebyshev1_highpass_o3",
            "chebyshev2_bandpass_o2",
            "elliptic_lowpass_o4",
        ]
    );
}
