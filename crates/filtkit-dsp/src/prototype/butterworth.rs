use super::for_each_angle;
use crate::layout::{AnalogLayout, Complex, Normalization, INFINITY};

/// Poles evenly spaced on the left half of the unit circle.
pub(super) fn design(order: u32) -> AnalogLayout {
    let mut layout = AnalogLayout::new(Normalization::dc(1.0));
    for_each_angle(order, |theta| {
        layout.push_conjugate(Complex::new(-theta.sin(), theta.cos()), INFINITY);
    });
    if order % 2 == 1 {
        layout.push_single(Complex::new(-1.0, 0.0), INFINITY);
    }
    layout
}
