//! Small dense linear solves.

use crate::error::{DspError, DspResult};

/// Solves `a · x = b` by LU decomposition with partial pivoting.
///
/// A pivot with magnitude at or below `singular_tol` is reported as a
/// numeric failure rather than producing non-finite output.
pub fn lu_solve<const N: usize>(
    mut a: [[f64; N]; N],
    mut b: [f64; N],
    singular_tol: f64,
) -> DspResult<[f64; N]> {
    for col in 0..N {
        let pivot = (col..N)
            .max_by(|&r, &s| a[r][col].abs().total_cmp(&a[s][col].abs()))
            .unwrap_or(col);
        if a[pivot][col].abs() <= singular_tol || !a[pivot][col].is_finite() {
            return Err(DspError::numeric(format!(
                "singular {}x{} system (pivot {:e} in column {})",
                N, N, a[pivot][col], col
            )));
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in col + 1..N {
            let factor = a[row][col] / a[col][col];
            for k in col..N {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = [0.0; N];
    for row in (0..N).rev() {
        let tail: f64 = (row + 1..N).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }
    Ok(x)
}
