//! Filtkit Integration Test Infrastructure
//!
//! This crate holds the cross-crate tests for filter design and filtering:
//!
//! - **Reference traces**: designed cascades and zero-phase output compared
//!   against stored coefficient and output traces in `data/`
//! - **Scenarios**: end-to-end behavior of the design facade
//! - **Properties**: length preservation, DC invariance, and reversal
//!   symmetry over randomized parameters
//! - **Determinism**: bit-identical coefficients and output across runs
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p filtkit-tests
//! ```

pub mod determinism;
pub mod reference;
pub mod signals;

// Re-export commonly used items
pub use determinism::{
    compute_hash, hash_samples, verify_determinism, DeterminismFixture, DeterminismReport,
    DeterminismResult,
};
pub use reference::{max_abs_diff, rmse, ReferenceTrace};
