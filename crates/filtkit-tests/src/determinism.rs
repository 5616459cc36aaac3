//! Determinism testing for filter design and filtering.
//!
//! Designing the same spec and filtering the same signal must produce
//! bit-identical coefficients and output across runs. Samples are compared
//! through their IEEE-754 bit patterns, so `-0.0` vs `0.0` and differing NaN
//! payloads count as differences.
//!
//! # Example
//!
//! ```
//! use filtkit_spec::{Band, Family, FilterSpec};
//! use filtkit_tests::determinism::{verify_determinism, DeterminismFixture};
//!
//! let result = verify_determinism(|| vec![1.0, 2.0, 3.0], 3);
//! assert!(result.is_deterministic);
//!
//! let report = DeterminismFixture::new()
//!     .add_spec("butter", FilterSpec::new(Family::Butterworth, Band::lowpass(10.0), 4, 100.0))
//!     .runs(3)
//!     .run();
//! assert!(report.all_deterministic());
//! ```

use std::fmt;

use filtkit_dsp::IirFilter;
use filtkit_spec::FilterSpec;

use crate::signals;

/// Result of a determinism verification.
#[derive(Debug, Clone)]
pub struct DeterminismResult {
    /// Whether all runs produced identical output.
    pub is_deterministic: bool,
    /// Number of runs performed.
    pub runs: usize,
    /// Number of samples in the output.
    pub output_len: usize,
    /// BLAKE3 hash of the first run's output.
    pub hash: String,
    /// If non-deterministic, the first differing sample.
    pub diff_info: Option<DiffInfo>,
}

/// The first sample that differs between runs.
#[derive(Debug, Clone)]
pub struct DiffInfo {
    /// Sample index, or the shorter length when lengths differ.
    pub index: usize,
    /// Value from the first run.
    pub expected: Option<f64>,
    /// Value from the differing run.
    pub actual: Option<f64>,
    /// Which run (0-indexed) produced the differing output.
    pub run_index: usize,
}

impl fmt::Display for DiffInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Difference at sample {}: expected {:?}, got {:?} (run {})",
            self.index, self.expected, self.actual, self.run_index
        )
    }
}

impl DeterminismResult {
    /// Panic with a detailed message if not deterministic.
    pub fn assert_deterministic(&self) {
        if let Some(diff) = &self.diff_info {
            panic!(
                "Non-deterministic output detected!\n\
                 Runs: {}\n\
                 Output length: {} samples\n\
                 Hash: {}\n\
                 {}",
                self.runs, self.output_len, self.hash, diff
            );
        }
    }
}

/// Little-endian bytes of every sample.
fn sample_bytes(samples: &[f64]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_le_bytes()).collect()
}

/// Compute BLAKE3 hash of data.
pub fn compute_hash(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// BLAKE3 hash of the samples' little-endian bit patterns.
pub fn hash_samples(samples: &[f64]) -> String {
    compute_hash(&sample_bytes(samples))
}

fn first_difference(expected: &[f64], actual: &[f64], run_index: usize) -> Option<DiffInfo> {
    let mismatch = expected
        .iter()
        .zip(actual)
        .position(|(e, a)| e.to_bits() != a.to_bits());
    match mismatch {
        Some(index) => Some(DiffInfo {
            index,
            expected: Some(expected[index]),
            actual: Some(actual[index]),
            run_index,
        }),
        None if expected.len() != actual.len() => {
            let index = expected.len().min(actual.len());
            Some(DiffInfo {
                index,
                expected: expected.get(index).copied(),
                actual: actual.get(index).copied(),
                run_index,
            })
        }
        None => None,
    }
}

/// Run `generate_fn` `runs` times and verify all outputs are bit-identical.
pub fn verify_determinism<F>(generate_fn: F, runs: usize) -> DeterminismResult
where
    F: Fn() -> Vec<f64>,
{
    assert!(runs >= 2, "Must run at least 2 times to verify determinism");

    let reference = generate_fn();
    let hash = hash_samples(&reference);

    for run_index in 1..runs {
        let output = generate_fn();
        if let Some(diff) = first_difference(&reference, &output, run_index) {
            return DeterminismResult {
                is_deterministic: false,
                runs,
                output_len: reference.len(),
                hash,
                diff_info: Some(diff),
            };
        }
    }

    DeterminismResult {
        is_deterministic: true,
        runs,
        output_len: reference.len(),
        hash,
        diff_info: None,
    }
}

/// Flattened SOS matrix followed by the zero-phase output of `signal`.
fn design_and_filter(spec: &FilterSpec, signal: &[f64]) -> Vec<f64> {
    match IirFilter::design(spec) {
        Ok(filter) => {
            let mut out: Vec<f64> = filter.sos().into_iter().flatten().collect();
            out.extend(filter.filtfilt(signal).unwrap_or_default());
            out
        }
        Err(_) => Vec::new(),
    }
}

/// Determinism check over a set of named filter specs.
///
/// Each spec is designed and run through `filtfilt` on seeded noise; the
/// flattened SOS matrix followed by the output is compared across runs.
#[derive(Debug, Clone)]
pub struct DeterminismFixture {
    /// Named specs to test.
    pub specs: Vec<(String, FilterSpec)>,
    /// Number of runs per spec.
    pub runs: usize,
    /// Length of the noise signal.
    pub signal_len: usize,
    /// Seed of the noise signal.
    pub seed: u32,
}

impl Default for DeterminismFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl DeterminismFixture {
    /// Create a new empty fixture.
    pub fn new() -> Self {
        Self {
            specs: Vec::new(),
            runs: 3,
            signal_len: 1024,
            seed: 42,
        }
    }

    /// Add a named spec.
    pub fn add_spec(mut self, name: impl Into<String>, spec: FilterSpec) -> Self {
        self.specs.push((name.into(), spec));
        self
    }

    /// Set the number of runs per spec.
    pub fn runs(mut self, runs: usize) -> Self {
        assert!(runs >= 2, "Must run at least 2 times");
        self.runs = runs;
        self
    }

    /// Set the noise seed.
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Run every spec.
    pub fn run(&self) -> DeterminismReport {
        let signal = signals::white_noise(self.seed, self.signal_len);
        let entries = self
            .specs
            .iter()
            .map(|(name, spec)| {
                let result = match IirFilter::design(spec) {
                    Ok(_) => Ok(verify_determinism(|| design_and_filter(spec, &signal), self.runs)),
                    Err(e) => Err(e.to_string()),
                };
                DeterminismReportEntry {
                    name: name.clone(),
                    result,
                }
            })
            .collect();
        DeterminismReport { entries }
    }
}

/// Outcome for one named spec.
#[derive(Debug, Clone)]
pub struct DeterminismReportEntry {
    /// Spec name.
    pub name: String,
    /// Verification result, or the design error.
    pub result: Result<DeterminismResult, String>,
}

/// Outcomes for a whole fixture.
#[derive(Debug, Clone, Default)]
pub struct DeterminismReport {
    /// One entry per spec, in fixture order.
    pub entries: Vec<DeterminismReportEntry>,
}

impl DeterminismReport {
    /// True when every spec designed and every run matched.
    pub fn all_deterministic(&self) -> bool {
        self.entries
            .iter()
            .all(|e| matches!(&e.result, Ok(r) if r.is_deterministic))
    }

    /// Entries that failed to design or differed between runs.
    pub fn failures(&self) -> Vec<&DeterminismReportEntry> {
        self.entries
            .iter()
            .filter(|e| !matches!(&e.result, Ok(r) if r.is_deterministic))
            .collect()
    }
}

impl fmt::Display for DeterminismReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Determinism report ({} specs)", self.entries.len())?;
        for entry in &self.entries {
            match &entry.result {
                Ok(r) if r.is_deterministic => {
                    writeln!(f, "  [PASS] {} ({})", entry.name, &r.hash[..16])?
                }
                Ok(r) => match &r.diff_info {
                    Some(diff) => writeln!(f, "  [FAIL] {}: {}", entry.name, diff)?,
                    None => writeln!(f, "  [FAIL] {}", entry.name)?,
                },
                Err(e) => writeln!(f, "  [ERROR] {}: {}", entry.name, e)?,
            }
        }
        Ok(())
    }
}
