//! Generic numeric primitives used by the design pipeline.

pub mod linalg;
pub mod poly;

pub use linalg::lu_solve;
pub use poly::roots;
