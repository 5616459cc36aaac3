//! Numeric tolerances for the design pipeline.
//!
//! The constants here are the defaults; every math routine that needs one
//! takes a [`Tolerances`] (or the single field it uses) as an argument.

/// Machine epsilon used by the Jacobi elliptic function routines.
pub const MACHEP: f64 = 1.110_223_024_625_156_5e-16;

/// Relative imaginary part below which a root is treated as real.
pub const REAL_ROOT_EPS: f64 = 2e-16;

/// Maximum number of AGM steps in the Jacobi descent.
pub const JACOBI_MAX_DESCENT: usize = 8;

/// Maximum number of AGM iterations for K(m).
pub const AGM_MAX_ITER: usize = 64;

/// Maximum number of Landen iterations in the inverse Jacobi functions.
pub const LANDEN_MAX_ITER: usize = 10;

/// Number of series terms in the nome-based degree equation.
pub const DEGREE_SERIES_TERMS: usize = 7;

/// Largest tolerated real part of `arc_jac_sc1`'s intermediate result.
pub const ARC_SC1_REAL_TOL: f64 = 1e-14;

/// Denominators with magnitude below this are treated as singular.
pub const DEGENERACY_THRESHOLD: f64 = 1e-14;

/// Tolerances passed into the elliptic math, prototypes, and seeding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    /// Relative AGM convergence tolerance.
    pub agm: f64,
    /// AGM iteration cap for K(m).
    pub agm_max_iter: usize,
    /// AGM step cap for the Jacobi descent.
    pub jacobi_max_descent: usize,
    /// Landen iteration cap for the inverse Jacobi functions.
    pub landen_max_iter: usize,
    /// Degree-equation series length.
    pub degree_terms: usize,
    /// Relative "is this root real" threshold.
    pub real_root: f64,
    /// `arc_jac_sc1` real-part tolerance.
    pub arc_sc1_real: f64,
    /// Singularity threshold for seeding and linear solves.
    pub degeneracy: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            agm: MACHEP,
            agm_max_iter: AGM_MAX_ITER,
            jacobi_max_descent: JACOBI_MAX_DESCENT,
            landen_max_iter: LANDEN_MAX_ITER,
            degree_terms: DEGREE_SERIES_TERMS,
            real_root: REAL_ROOT_EPS,
            arc_sc1_real: ARC_SC1_REAL_TOL,
            degeneracy: DEGENERACY_THRESHOLD,
        }
    }
}
