use super::for_each_angle;
use crate::layout::{AnalogLayout, Complex, Normalization, INFINITY};

/// `ε = sqrt(10^(dB/10) - 1)`.
pub(super) fn ripple_epsilon(db: f64) -> f64 {
    (10f64.powf(db / 10.0) - 1.0).sqrt()
}

/// Type I: poles on an ellipse, equiripple passband.
///
/// Even orders start the passband at the bottom of the ripple, so the DC
/// gain is `10^(-ripple/20)`.
pub(super) fn design_type1(order: u32, ripple_db: f64) -> AnalogLayout {
    let eps = ripple_epsilon(ripple_db);
    let v0 = (1.0 / eps).asinh() / order as f64;
    let (sinh_v0, cosh_v0) = (v0.sinh(), v0.cosh());

    let gain = if order % 2 == 1 {
        1.0
    } else {
        10f64.powf(-ripple_db / 20.0)
    };
    let mut layout = AnalogLayout::new(Normalization::dc(gain));

    for_each_angle(order, |theta| {
        let pole = Complex::new(-sinh_v0 * theta.sin(), cosh_v0 * theta.cos());
        layout.push_conjugate(pole, INFINITY);
    });
    if order % 2 == 1 {
        layout.push_single(Complex::new(-sinh_v0, 0.0), INFINITY);
    }
    layout
}

/// Type II: reciprocated Type I poles, zeros at `j / cos θ`.
pub(super) fn design_type2(order: u32, stopband_db: f64) -> AnalogLayout {
    let eps = ripple_epsilon(stopband_db);
    let v0 = eps.asinh() / order as f64;
    let (sinh_v0, cosh_v0) = (v0.sinh(), v0.cosh());

    let mut layout = AnalogLayout::new(Normalization::dc(1.0));

    for_each_angle(order, |theta| {
        let pole = Complex::new(-sinh_v0 * theta.sin(), cosh_v0 * theta.cos()).inv();
        let zero = Complex::new(0.0, 1.0 / theta.cos());
        layout.push_conjugate(pole, zero);
    });
    if order % 2 == 1 {
        layout.push_single(Complex::new(-1.0 / sinh_v0, 0.0), INFINITY);
    }
    layout
}
