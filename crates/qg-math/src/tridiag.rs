//! Thomas algorithm for tridiagonal systems.
//!
//! Used by the implicit zonal-mean vorticity update, one solve per level
//! per step.

use qg_types::error::{QgError, QgResult};

/// Solve the tridiagonal system Ax = d.
///
/// - `a`: sub-diagonal \[n\] (a\[0\] unused)
/// - `b`: main diagonal \[n\]
/// - `c`: super-diagonal \[n\] (c\[n-1\] unused)
/// - `d`: right-hand side \[n\]
///
/// A vanishing pivot means the system is singular, which for the model's
/// diffusion matrices signals a broken state: fail, never patch.
pub fn thomas_solve(a: &[f64], b: &[f64], c: &[f64], d: &[f64]) -> QgResult<Vec<f64>> {
    let n = d.len();
    assert!(n > 0, "system size must be > 0");
    assert_eq!(a.len(), n);
    assert_eq!(b.len(), n);
    assert_eq!(c.len(), n);

    let mut c_prime = vec![0.0; n];
    let mut d_prime = vec![0.0; n];

    if b[0] == 0.0 {
        return Err(QgError::SingularSystem { row: 0 });
    }
    c_prime[0] = c[0] / b[0];
    d_prime[0] = d[0] / b[0];

    for i in 1..n {
        let den = b[i] - a[i] * c_prime[i - 1];
        if den == 0.0 {
            return Err(QgError::SingularSystem { row: i });
        }
        if i < n - 1 {
            c_prime[i] = c[i] / den;
        }
        d_prime[i] = (d[i] - a[i] * d_prime[i - 1]) / den;
    }

    let mut x = vec![0.0; n];
    x[n - 1] = d_prime[n - 1];
    for i in (0..n - 1).rev() {
        x[i] = d_prime[i] - c_prime[i] * x[i + 1];
    }

    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thomas_identity() {
        let n = 5;
        let a = vec![0.0; n];
        let b = vec![1.0; n];
        let c = vec![0.0; n];
        let d = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let x = thomas_solve(&a, &b, &c, &d).unwrap();
        for i in 0..n {
            assert!((x[i] - d[i]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_thomas_implicit_diffusion_pattern() {
        // The zonal vorticity matrix: -alpha*epsq off-diagonals with the
        // one-sided diagonal at both walls.
        let n = 15;
        let ae = 0.256 * 0.36;
        let mut b = vec![-2.0 * ae - 1.0; n];
        b[0] = -ae - 1.0;
        b[n - 1] = -ae - 1.0;
        let a: Vec<f64> = (0..n).map(|i| if i > 0 { ae } else { 0.0 }).collect();
        let c: Vec<f64> = (0..n).map(|i| if i < n - 1 { ae } else { 0.0 }).collect();
        let d: Vec<f64> = (0..n).map(|i| -((i as f64) * 0.3).sin()).collect();

        let x = thomas_solve(&a, &b, &c, &d).unwrap();

        for i in 0..n {
            let mut ax = b[i] * x[i];
            if i > 0 {
                ax += a[i] * x[i - 1];
            }
            if i < n - 1 {
                ax += c[i] * x[i + 1];
            }
            assert!((ax - d[i]).abs() < 1e-12, "Ax[{i}] = {ax}, d = {}", d[i]);
        }
    }

    #[test]
    fn test_thomas_singular_pivot_is_an_error() {
        let a = vec![0.0, 1.0];
        let b = vec![0.0, 1.0];
        let c = vec![1.0, 0.0];
        let d = vec![1.0, 1.0];
        match thomas_solve(&a, &b, &c, &d) {
            Err(QgError::SingularSystem { row }) => assert_eq!(row, 0),
            other => panic!("expected SingularSystem, got {other:?}"),
        }
    }
}
