//! Stored reference traces and comparison helpers.
//!
//! Each trace in `data/` holds a filter spec, the expected transfer-function
//! coefficients `b` and `a` of the whole cascade, an input signal, and the
//! expected zero-phase output.

use std::fs;
use std::path::PathBuf;

use filtkit_dsp::Cascade;
use filtkit_spec::FilterSpec;
use serde::Deserialize;

/// One reference trace.
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceTrace {
    /// What the trace covers.
    pub description: String,
    /// Sample rate in Hz.
    pub sample_rate: f64,
    /// The design request.
    pub spec: FilterSpec,
    /// Numerator of the full transfer function.
    pub b: Vec<f64>,
    /// Denominator of the full transfer function.
    pub a: Vec<f64>,
    /// Input signal.
    pub input: Vec<f64>,
    /// Expected zero-phase output.
    pub expected: Vec<f64>,
}

/// Directory holding the reference traces.
pub fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

impl ReferenceTrace {
    /// Loads `data/<name>.json`.
    pub fn load(name: &str) -> Result<Self, String> {
        let path = data_dir().join(format!("{}.json", name));
        let content = fs::read_to_string(&path)
            .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
        serde_json::from_str(&content)
            .map_err(|e| format!("failed to parse {}: {}", path.display(), e))
    }

    /// Names of every trace in the data directory, sorted.
    pub fn available() -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(data_dir())
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .map(|e| e.path())
                    .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
                    .filter_map(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }
}

/// Multiplies two polynomials in `z⁻¹`.
pub fn poly_mul(a: &[f64], b: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; a.len() + b.len() - 1];
    for (i, x) in a.iter().enumerate() {
        for (j, y) in b.iter().enumerate() {
            out[i + j] += x * y;
        }
    }
    out
}

/// Expands a cascade into `(b, a)` of its full transfer function.
///
/// First-order sections contribute first-degree factors, so the degree
/// matches the filter order.
pub fn cascade_to_tf(cascade: &Cascade) -> (Vec<f64>, Vec<f64>) {
    let mut b = vec![1.0];
    let mut a = vec![1.0];
    for section in cascade.sections() {
        if section.is_first_order() {
            b = poly_mul(&b, &section.b_coefficients()[..2]);
            a = poly_mul(&a, &section.a_coefficients()[..2]);
        } else {
            b = poly_mul(&b, &section.b_coefficients());
            a = poly_mul(&a, &section.a_coefficients());
        }
    }
    (b, a)
}

/// Root-mean-square difference of two equal-length signals.
pub fn rmse(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "rmse requires equal lengths");
    if a.is_empty() {
        return 0.0;
    }
    let sum: f64 = a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum();
    (sum / a.len() as f64).sqrt()
}

/// Largest absolute difference of two equal-length signals.
pub fn max_abs_diff(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "max_abs_diff requires equal lengths");
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}
