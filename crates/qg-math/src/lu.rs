// ─────────────────────────────────────────────────────────────────────
// QG Channel Model — LU
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Dense LU factorization with partial pivoting.
//!
//! Factorize once, then back-substitute against many right-hand sides.
//! The zonal elliptic system has a fixed left-hand side for the whole run,
//! so the O(n^3) work happens exactly once.

use ndarray::{Array1, Array2};
use qg_types::error::{QgError, QgResult};

/// A factorized square system, reusable for repeated solves.
#[derive(Debug, Clone)]
pub struct LuFactorization {
    /// Packed L (unit lower, below the diagonal) and U (on and above).
    lu: Array2<f64>,
    /// Row swapped with row `k` at elimination step `k`.
    piv: Vec<usize>,
}

impl LuFactorization {
    /// Factorize `a` in place. A zero pivot column is fatal: the system
    /// is singular and no retry can help.
    pub fn factorize(mut a: Array2<f64>) -> QgResult<Self> {
        let n = a.nrows();
        assert_eq!(n, a.ncols(), "matrix must be square");
        let mut piv = vec![0usize; n];

        for k in 0..n {
            let mut p = k;
            let mut max = a[[k, k]].abs();
            for i in k + 1..n {
                let v = a[[i, k]].abs();
                if v > max {
                    max = v;
                    p = i;
                }
            }
            if max == 0.0 {
                return Err(QgError::SingularSystem { row: k });
            }
            piv[k] = p;
            if p != k {
                for j in 0..n {
                    let tmp = a[[k, j]];
                    a[[k, j]] = a[[p, j]];
                    a[[p, j]] = tmp;
                }
            }
            let pivot = a[[k, k]];
            for i in k + 1..n {
                let m = a[[i, k]] / pivot;
                a[[i, k]] = m;
                for j in k + 1..n {
                    a[[i, j]] -= m * a[[k, j]];
                }
            }
        }

        Ok(LuFactorization { lu: a, piv })
    }

    pub fn n(&self) -> usize {
        self.lu.nrows()
    }

    /// Solve `Ax = b` using the stored factors.
    pub fn solve(&self, b: &Array1<f64>) -> Array1<f64> {
        let n = self.n();
        let mut x = b.clone();

        // Apply the row interchanges recorded during elimination.
        for k in 0..n {
            let p = self.piv[k];
            if p != k {
                x.swap(k, p);
            }
        }

        // Ly = Pb, L unit lower triangular.
        for i in 1..n {
            let mut sum = x[i];
            for j in 0..i {
                sum -= self.lu[[i, j]] * x[j];
            }
            x[i] = sum;
        }

        // Ux = y.
        for i in (0..n).rev() {
            let mut sum = x[i];
            for j in i + 1..n {
                sum -= self.lu[[i, j]] * x[j];
            }
            x[i] = sum / self.lu[[i, i]];
        }

        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_lu_identity() {
        let a = Array2::eye(4);
        let lu = LuFactorization::factorize(a).unwrap();
        let b = array![1.0, -2.0, 3.0, 0.5];
        let x = lu.solve(&b);
        for i in 0..4 {
            assert!((x[i] - b[i]).abs() < 1e-14);
        }
    }

    #[test]
    fn test_lu_requires_pivoting() {
        // Zero on the leading diagonal; fails without row interchanges.
        let a = array![[0.0, 1.0], [1.0, 0.0]];
        let lu = LuFactorization::factorize(a).unwrap();
        let b = array![3.0, 7.0];
        let x = lu.solve(&b);
        assert!((x[0] - 7.0).abs() < 1e-14);
        assert!((x[1] - 3.0).abs() < 1e-14);
    }

    #[test]
    fn test_lu_general_system() {
        let a = array![[4.0, -2.0, 1.0], [-2.0, 4.0, -2.0], [1.0, -2.0, 4.0]];
        let lu = LuFactorization::factorize(a.clone()).unwrap();
        let b = array![11.0, -16.0, 17.0];
        let x = lu.solve(&b);
        // Verify Ax = b.
        for i in 0..3 {
            let mut ax = 0.0;
            for j in 0..3 {
                ax += a[[i, j]] * x[j];
            }
            assert!((ax - b[i]).abs() < 1e-10, "Ax[{i}] = {ax}, b = {}", b[i]);
        }
    }

    #[test]
    fn test_lu_singular_is_an_error() {
        let a = array![[1.0, 2.0], [2.0, 4.0]];
        match LuFactorization::factorize(a) {
            Err(QgError::SingularSystem { .. }) => {}
            other => panic!("expected SingularSystem, got {other:?}"),
        }
    }
}
