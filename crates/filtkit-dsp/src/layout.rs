//! Pole/zero layouts produced by the analog prototypes and frequency
//! transforms.
//!
//! A layout is an ordered list of [`PoleZeroPair`]s, one per eventual
//! second-order (or first-order) section, plus the [`Normalization`] point
//! at which the finished digital filter must reach the designed gain.

use num_complex::Complex64;

/// Complex number type used throughout the design pipeline.
pub type Complex = Complex64;

/// Marker for an absent root ("at infinity").
pub const INFINITY: Complex = Complex::new(f64::INFINITY, 0.0);

/// Returns true if `c` is the [`INFINITY`] marker.
pub fn is_infinite(c: Complex) -> bool {
    c.re.is_infinite()
}

/// Two roots belonging to one section.
///
/// Either a conjugate pair (`second == conj(first)`), two independent real
/// roots, or a single root paired with [`INFINITY`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComplexPair {
    /// First root.
    pub first: Complex,
    /// Second root, or [`INFINITY`] for a first-order section.
    pub second: Complex,
}

impl ComplexPair {
    /// Creates a pair from two roots.
    pub fn new(first: Complex, second: Complex) -> Self {
        Self { first, second }
    }

    /// Creates a pair holding one root and [`INFINITY`].
    pub fn single(root: Complex) -> Self {
        Self {
            first: root,
            second: INFINITY,
        }
    }

    /// Creates a conjugate pair, or a single-plus-infinity pair when `root`
    /// is itself the infinity marker.
    pub fn conjugate(root: Complex) -> Self {
        if is_infinite(root) {
            Self::new(INFINITY, INFINITY)
        } else {
            Self::new(root, root.conj())
        }
    }

    /// Returns true if the second root is absent.
    pub fn is_single(&self) -> bool {
        is_infinite(self.second)
    }

    /// Returns true if both roots are real (or infinite).
    pub fn is_real(&self) -> bool {
        self.first.im == 0.0 && self.second.im == 0.0
    }

    /// Checks the pair invariant: a complex first root is matched by its
    /// conjugate.
    pub fn is_well_formed(&self) -> bool {
        if self.first.im == 0.0 || is_infinite(self.first) {
            return self.second.im == 0.0 || is_infinite(self.second);
        }
        self.second == self.first.conj()
    }
}

/// The poles and zeros of one section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoleZeroPair {
    /// Section poles.
    pub poles: ComplexPair,
    /// Section zeros.
    pub zeros: ComplexPair,
}

impl PoleZeroPair {
    /// Creates a section from explicit pole and zero pairs.
    pub fn new(poles: ComplexPair, zeros: ComplexPair) -> Self {
        Self { poles, zeros }
    }

    /// A first-order section: one pole, one zero (or [`INFINITY`]).
    pub fn single(pole: Complex, zero: Complex) -> Self {
        Self {
            poles: ComplexPair::single(pole),
            zeros: ComplexPair::single(zero),
        }
    }

    /// A second-order section built from a pole and zero and their conjugates.
    pub fn conjugate(pole: Complex, zero: Complex) -> Self {
        Self {
            poles: ComplexPair::conjugate(pole),
            zeros: ComplexPair::conjugate(zero),
        }
    }

    /// Returns true for a first-order section.
    pub fn is_single_pole(&self) -> bool {
        self.poles.is_single()
    }
}

/// Where and how strongly the finished filter's magnitude is pinned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalization {
    /// Digital radian frequency in `[0, π]` (analog layouts use 0).
    pub w: f64,
    /// Required magnitude at `w`.
    pub gain: f64,
}

impl Normalization {
    /// Magnitude `gain` at DC.
    pub fn dc(gain: f64) -> Self {
        Self { w: 0.0, gain }
    }
}

/// Normalized analog prototype: unit cutoff, poles and zeros in the s-plane.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalogLayout {
    pairs: Vec<PoleZeroPair>,
    normal: Normalization,
}

impl AnalogLayout {
    /// Creates an empty layout with the given normalization target.
    pub fn new(normal: Normalization) -> Self {
        Self {
            pairs: Vec::new(),
            normal,
        }
    }

    /// Adds a conjugate section.
    pub fn push_conjugate(&mut self, pole: Complex, zero: Complex) {
        self.pairs.push(PoleZeroPair::conjugate(pole, zero));
    }

    /// Adds a first-order section.
    pub fn push_single(&mut self, pole: Complex, zero: Complex) {
        self.pairs.push(PoleZeroPair::single(pole, zero));
    }

    /// Section pole/zero pairs, in construction order.
    pub fn pairs(&self) -> &[PoleZeroPair] {
        &self.pairs
    }

    /// Normalization target.
    pub fn normal(&self) -> Normalization {
        self.normal
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if the layout has no sections.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of finite poles (the prototype order).
    pub fn num_poles(&self) -> usize {
        self.pairs
            .iter()
            .map(|p| if p.is_single_pole() { 1 } else { 2 })
            .sum()
    }
}

/// A layout after frequency transformation, ready for the bilinear map.
#[derive(Debug, Clone, PartialEq)]
pub struct DigitalLayout {
    pairs: Vec<PoleZeroPair>,
    normal: Normalization,
}

impl DigitalLayout {
    pub(crate) fn new(pairs: Vec<PoleZeroPair>, normal: Normalization) -> Self {
        Self { pairs, normal }
    }

    /// Section pole/zero pairs.
    pub fn pairs(&self) -> &[PoleZeroPair] {
        &self.pairs
    }

    /// Normalization target at a digital radian frequency.
    pub fn normal(&self) -> Normalization {
        self.normal
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if the layout has no sections.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
