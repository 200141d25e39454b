// ─────────────────────────────────────────────────────────────────────
// QG Channel Model — Zonal
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Zonal-mean solvers.
//!
//! The zonal-mean streamfunction comes from a direct solve of the
//! two-level elliptic system whose left-hand side never changes over a
//! run: the matrix is assembled and LU-factorized once at construction
//! and every call is a pair of triangular solves. The zonal-mean
//! vorticity update is a constant-coefficient tridiagonal solve per
//! level (implicit diffusion, plus drag on level 3).

use ndarray::{Array1, Array2};
use qg_math::lu::LuFactorization;
use qg_math::tridiag::thomas_solve;
use qg_types::error::QgResult;
use qg_types::field::LayeredField;
use qg_types::grid::Grid;

/// Direct solver for the zonal-mean streamfunction.
pub struct ZonalStreamSolver {
    lu: LuFactorization,
    ny: usize,
}

impl ZonalStreamSolver {
    /// Assemble and factorize the elliptic system. The unknown vector
    /// stacks level-1 streamfunction at latitudes 1..ny-1 and level-3 at
    /// 2..ny-1 (level 3 at latitude 1 is pinned to zero and not solved
    /// for), giving 2*ny-3 unknowns. Rows at the walls carry one-sided
    /// stencils. A singular matrix is fatal.
    pub fn new(grid: &Grid, gamma: f64) -> QgResult<Self> {
        let ny = grid.ny;
        let epsq = grid.epsq;
        let nz = 2 * ny - 3;
        let mut a: Array2<f64> = Array2::zeros((nz, nz));

        // 1-based row/column indexing to match the unknown numbering.
        let mut set = |r: usize, c: usize, v: f64| a[[r - 1, c - 1]] = v;

        // Level 1, first interior latitude. No coupling column: the
        // level-3 partner is the pinned latitude.
        set(1, 1, -epsq - gamma);
        set(1, 2, epsq);
        // Level 1, last interior latitude.
        set(ny - 1, ny - 2, epsq);
        set(ny - 1, ny - 1, -epsq - gamma);
        set(ny - 1, nz, gamma);
        // Level 3, first solved latitude (j = 2).
        set(ny, 2, gamma);
        set(ny, ny, -2.0 * epsq - gamma);
        set(ny, ny + 1, epsq);
        // Level 3, last interior latitude.
        set(nz, ny - 1, gamma);
        set(nz, nz - 1, epsq);
        set(nz, nz, -epsq - gamma);

        // Level 1 interior rows.
        for j in 2..ny - 1 {
            set(j, j - 1, epsq);
            set(j, j, -2.0 * epsq - gamma);
            set(j, j + 1, epsq);
            set(j, ny - 2 + j, gamma);
        }
        // Level 3 interior rows (row r holds latitude r - ny + 2).
        for r in ny + 1..nz {
            set(r, r + 2 - ny, gamma);
            set(r, r - 1, epsq);
            set(r, r, -2.0 * epsq - gamma);
            set(r, r + 1, epsq);
        }

        let lu = LuFactorization::factorize(a)?;
        Ok(ZonalStreamSolver { lu, ny })
    }

    /// Solve for the zonal-mean streamfunction from the zonal-mean
    /// vorticity, then apply the wall conditions: zero-gradient
    /// extrapolation for level 1, and the pinned latitudes for level 3.
    pub fn solve(&self, vor: &LayeredField, strm: &mut LayeredField) {
        let ny = self.ny;
        let nz = 2 * ny - 3;

        let mut rhs: Array1<f64> = Array1::zeros(nz);
        for j in 1..ny {
            rhs[j - 1] = vor.zonal1[j];
        }
        for j in 2..ny {
            rhs[ny - 3 + j] = vor.zonal3[j];
        }

        let sol = self.lu.solve(&rhs);

        for j in 1..ny {
            strm.zonal1[j] = sol[j - 1];
        }
        for j in 2..ny {
            strm.zonal3[j] = sol[ny - 3 + j];
        }

        strm.zonal1[0] = strm.zonal1[1];
        strm.zonal1[ny] = strm.zonal1[ny - 1];
        strm.zonal3[0] = 0.0;
        strm.zonal3[1] = 0.0;
        strm.zonal3[ny] = strm.zonal3[ny - 1];
    }

    /// Residual of the assembled system against a candidate solution,
    /// reassembled from the same stencil coefficients.
    pub fn residual(&self, vor: &LayeredField, strm: &LayeredField, grid: &Grid, gamma: f64) -> f64 {
        let ny = self.ny;
        let epsq = grid.epsq;
        let mut max_res: f64 = 0.0;

        // Level 1 rows, j = 1..ny-1. The wall values enter through the
        // one-sided diagonal, so the row reads as the interior stencil
        // with the outside neighbour dropped.
        for j in 1..ny {
            let mut lhs = -gamma * strm.zonal1[j] + gamma * strm.zonal3[j];
            if j > 1 {
                lhs += epsq * (strm.zonal1[j - 1] - strm.zonal1[j]);
            }
            if j < ny - 1 {
                lhs += epsq * (strm.zonal1[j + 1] - strm.zonal1[j]);
            }
            max_res = max_res.max((lhs - vor.zonal1[j]).abs());
        }
        // Level 3 rows, j = 2..ny-1.
        for j in 2..ny {
            let mut lhs = -gamma * strm.zonal3[j] + gamma * strm.zonal1[j];
            if j > 2 {
                lhs += epsq * (strm.zonal3[j - 1] - strm.zonal3[j]);
            } else {
                // Latitude 1 is pinned to zero but still a neighbour.
                lhs += epsq * (0.0 - strm.zonal3[j]);
            }
            if j < ny - 1 {
                lhs += epsq * (strm.zonal3[j + 1] - strm.zonal3[j]);
            }
            max_res = max_res.max((lhs - vor.zonal3[j]).abs());
        }
        max_res
    }
}

/// Advance the zonal-mean vorticity through the implicit diffusion
/// system, forced by the negated zonal-mean tendency.
pub fn solve_zonal_vorticity(
    tend: &LayeredField,
    vor: &mut LayeredField,
    grid: &Grid,
    alpha: f64,
    drag: f64,
    dt: f64,
) -> QgResult<()> {
    let ny = grid.ny;
    let n = ny - 1;
    let ae = alpha * grid.epsq;

    let sub: Vec<f64> = (0..n).map(|i| if i > 0 { ae } else { 0.0 }).collect();
    let sup: Vec<f64> = (0..n).map(|i| if i < n - 1 { ae } else { 0.0 }).collect();
    let mut diag = vec![-2.0 * ae - 1.0; n];
    diag[0] = -ae - 1.0;
    diag[n - 1] = -ae - 1.0;

    let rhs1: Vec<f64> = (1..ny).map(|j| -tend.zonal1[j]).collect();
    let x1 = thomas_solve(&sub, &diag, &sup, &rhs1)?;
    for j in 1..ny {
        vor.zonal1[j] = x1[j - 1];
    }
    vor.zonal1[0] = vor.zonal1[1];
    vor.zonal1[ny] = vor.zonal1[ny - 1];

    // Level 3 sees the surface drag on the whole diagonal.
    for d in diag.iter_mut() {
        *d -= 1.5 * drag * dt;
    }
    let rhs3: Vec<f64> = (1..ny).map(|j| -tend.zonal3[j]).collect();
    let x3 = thomas_solve(&sub, &diag, &sup, &rhs3)?;
    for j in 1..ny {
        vor.zonal3[j] = x3[j - 1];
    }
    vor.zonal3[0] = vor.zonal3[1];
    vor.zonal3[ny] = vor.zonal3[ny - 1];

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const GAMMA: f64 = 1.5e-12 * 3.75e5 * 3.75e5;

    #[test]
    fn test_zonal_stream_solver_factorizes() {
        let grid = Grid::default();
        assert!(ZonalStreamSolver::new(&grid, GAMMA).is_ok());
    }

    #[test]
    fn test_zonal_stream_solve_has_small_residual() {
        let grid = Grid::default();
        let solver = ZonalStreamSolver::new(&grid, GAMMA).unwrap();
        let mut vor = LayeredField::zeros(&grid);
        for j in 1..grid.ny {
            vor.zonal1[j] = 1.0e4 * ((j as f64) * 0.5).sin();
            vor.zonal3[j] = -0.7e4 * ((j as f64) * 0.3).cos();
        }
        let mut strm = LayeredField::zeros(&grid);
        solver.solve(&vor, &mut strm);

        let res = solver.residual(&vor, &strm, &grid, GAMMA);
        let scale = 1.0e4;
        assert!(res < 1e-9 * scale, "residual {res}");
    }

    #[test]
    fn test_zonal_stream_wall_conditions() {
        let grid = Grid::default();
        let ny = grid.ny;
        let solver = ZonalStreamSolver::new(&grid, GAMMA).unwrap();
        let mut vor = LayeredField::zeros(&grid);
        for j in 1..ny {
            vor.zonal1[j] = 5.0e3;
            vor.zonal3[j] = 5.0e3;
        }
        let mut strm = LayeredField::zeros(&grid);
        strm.zonal3[0] = 99.0;
        strm.zonal3[1] = 99.0;
        solver.solve(&vor, &mut strm);

        assert_eq!(strm.zonal1[0], strm.zonal1[1]);
        assert_eq!(strm.zonal1[ny], strm.zonal1[ny - 1]);
        assert_eq!(strm.zonal3[0], 0.0);
        assert_eq!(strm.zonal3[1], 0.0);
        assert_eq!(strm.zonal3[ny], strm.zonal3[ny - 1]);
    }

    #[test]
    fn test_zero_vorticity_gives_zero_streamfunction() {
        let grid = Grid::default();
        let solver = ZonalStreamSolver::new(&grid, GAMMA).unwrap();
        let vor = LayeredField::zeros(&grid);
        let mut strm = LayeredField::zeros(&grid);
        solver.solve(&vor, &mut strm);
        assert!(strm.zonal1.iter().all(|v| *v == 0.0));
        assert!(strm.zonal3.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_zonal_vorticity_solve_inverts_the_tridiagonal() {
        let grid = Grid::default();
        let ny = grid.ny;
        let alpha = 0.00512;
        let drag = 4.0e-6;
        let dt = 7200.0;
        let ae = alpha * grid.epsq;
        let mut tend = LayeredField::zeros(&grid);
        for j in 1..ny {
            tend.zonal1[j] = ((j as f64) * 0.7).sin() * 1.0e-5;
            tend.zonal3[j] = ((j as f64) * 0.4).cos() * 1.0e-5;
        }
        let mut vor = LayeredField::zeros(&grid);
        solve_zonal_vorticity(&tend, &mut vor, &grid, alpha, drag, dt).unwrap();

        // Verify A v = -x row by row, level 1.
        for j in 1..ny {
            let diag = if j == 1 || j == ny - 1 { -ae - 1.0 } else { -2.0 * ae - 1.0 };
            let mut lhs = diag * vor.zonal1[j];
            if j > 1 {
                lhs += ae * vor.zonal1[j - 1];
            }
            if j < ny - 1 {
                lhs += ae * vor.zonal1[j + 1];
            }
            assert!(
                (lhs + tend.zonal1[j]).abs() < 1e-18,
                "level-1 residual at j={j}"
            );
        }
        // Level 3 has the drag-shifted diagonal.
        for j in 1..ny {
            let base = if j == 1 || j == ny - 1 { -ae - 1.0 } else { -2.0 * ae - 1.0 };
            let diag = base - 1.5 * drag * dt;
            let mut lhs = diag * vor.zonal3[j];
            if j > 1 {
                lhs += ae * vor.zonal3[j - 1];
            }
            if j < ny - 1 {
                lhs += ae * vor.zonal3[j + 1];
            }
            assert!(
                (lhs + tend.zonal3[j]).abs() < 1e-18,
                "level-3 residual at j={j}"
            );
        }
        // Zero-gradient extrapolation at the walls.
        assert_eq!(vor.zonal1[0], vor.zonal1[1]);
        assert_eq!(vor.zonal3[ny], vor.zonal3[ny - 1]);
    }

    #[test]
    fn test_forward_difference_consistency_of_the_elliptic_matrix() {
        // The solver must reproduce a manufactured solution: pick a
        // streamfunction, apply the forward stencil to build the
        // vorticity, solve, compare.
        let grid = Grid::default();
        let ny = grid.ny;
        let epsq = grid.epsq;
        let solver = ZonalStreamSolver::new(&grid, GAMMA).unwrap();

        let mut s1 = vec![0.0; ny + 1];
        let mut s3 = vec![0.0; ny + 1];
        for j in 1..ny {
            s1[j] = ((j as f64) * 0.9).sin() * 2.0e6;
            if j >= 2 {
                s3[j] = ((j as f64) * 0.6).cos() * 1.0e6;
            }
        }
        // Walls as the solver enforces them.
        s1[0] = s1[1];
        s1[ny] = s1[ny - 1];
        s3[ny] = s3[ny - 1];

        let mut vor = LayeredField::zeros(&grid);
        for j in 1..ny {
            let mut v = -GAMMA * s1[j] + GAMMA * s3[j];
            if j > 1 {
                v += epsq * (s1[j - 1] - s1[j]);
            }
            if j < ny - 1 {
                v += epsq * (s1[j + 1] - s1[j]);
            }
            vor.zonal1[j] = v;
        }
        for j in 2..ny {
            let mut v = -GAMMA * s3[j] + GAMMA * s1[j];
            v += epsq * (s3[j - 1] - s3[j]);
            if j < ny - 1 {
                v += epsq * (s3[j + 1] - s3[j]);
            }
            vor.zonal3[j] = v;
        }

        let mut strm = LayeredField::zeros(&grid);
        solver.solve(&vor, &mut strm);

        for j in 1..ny {
            assert!(
                (strm.zonal1[j] - s1[j]).abs() < 1e-6,
                "level 1 mismatch at j={j}: {} vs {}",
                strm.zonal1[j],
                s1[j]
            );
        }
        for j in 2..ny {
            assert!(
                (strm.zonal3[j] - s3[j]).abs() < 1e-6,
                "level 3 mismatch at j={j}"
            );
        }
    }
}
