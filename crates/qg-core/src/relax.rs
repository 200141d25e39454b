// ─────────────────────────────────────────────────────────────────────
// QG Channel Model — Relax
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Relaxation solvers for the anomaly fields.
//!
//! Two fixed-point sweeps share the five-point stencil but differ in
//! everything else: the streamfunction solve updates in place in a fixed
//! sweep order (each point sees its already-updated west and south
//! neighbours and the fresh level-1 value feeds the level-3 update at
//! the same point), warm-starts from the previous step, and fails hard
//! on non-convergence. The vorticity solve double-buffers a true Jacobi
//! sweep, restarts from zero, and keeps its last iterate when the sweep
//! cap runs out.

use ndarray::Array2;
use qg_types::error::{QgError, QgResult};
use qg_types::field::{fill_wall_rows, LayeredField};
use qg_types::grid::Grid;

/// Sweep cap shared by both solvers.
const MAX_SWEEPS: usize = 100;

/// Residual bound for the streamfunction sweep (m^2/s). The maximum is
/// tracked per level, so the bound is half the 3.75e4 field scale the
/// criterion was tuned against.
const STREAM_TOL: f64 = 0.5 * 3.75e4;

/// Bound on the summed squared change per level for the vorticity sweep.
const VORTICITY_TOL: f64 = 1.0;

/// Solve the two-level elliptic anomaly system for the streamfunction,
/// given the vorticity anomaly as forcing.
///
/// Iterates on `strm.anom1` / `strm.anom3` in place, seeded with their
/// current values. `accel` scales each residual correction (1.0 =
/// undamped). Divergence signals a broken physical state: fatal, no
/// retry.
pub fn relax_streamfunction(
    vor: &LayeredField,
    strm: &mut LayeredField,
    grid: &Grid,
    gamma: f64,
    accel: f64,
) -> QgResult<()> {
    let nx = grid.nx;
    let ny = grid.ny;
    let epsq = grid.epsq;
    let denom = 2.0 + 2.0 * epsq + gamma;

    let mut change = 0.0;
    let mut maxdiff = 0.0_f64;

    for _sweep in 0..MAX_SWEEPS {
        change = 0.0;
        maxdiff = 0.0;
        for j in 1..ny {
            let jm = j - 1;
            let jp = j + 1;
            for i in 1..=nx {
                let im = if i == 1 { nx } else { i - 1 };
                let ip = if i == nx { 1 } else { i + 1 };

                let resid = (strm.anom1[[ip, j]]
                    + strm.anom1[[im, j]]
                    + epsq * (strm.anom1[[i, jp]] + strm.anom1[[i, jm]])
                    - vor.anom1[[i, j]]
                    + gamma * strm.anom3[[i, j]])
                    - denom * strm.anom1[[i, j]];
                let resid = accel * resid / denom;
                change += resid * resid;
                maxdiff = maxdiff.max(resid.abs());
                strm.anom1[[i, j]] += resid;

                let resid = (strm.anom3[[ip, j]]
                    + strm.anom3[[im, j]]
                    + epsq * (strm.anom3[[i, jp]] + strm.anom3[[i, jm]])
                    - vor.anom3[[i, j]]
                    + gamma * strm.anom1[[i, j]])
                    - denom * strm.anom3[[i, j]];
                let resid = accel * resid / denom;
                change += resid * resid;
                maxdiff = maxdiff.max(resid.abs());
                strm.anom3[[i, j]] += resid;
            }
        }
        if maxdiff < STREAM_TOL {
            return Ok(());
        }
    }

    Err(QgError::RelaxationFailed {
        iterations: MAX_SWEEPS,
        change: change.sqrt(),
        max_residual: maxdiff,
    })
}

/// Advance the vorticity anomaly through the implicit diffusion/drag
/// system, forced by the tendency anomaly.
///
/// Always re-solved from zero. Runs Jacobi sweeps against a separate
/// new-value buffer; after each sweep the interior latitudes are copied
/// back and the wall latitudes rebuilt from their neighbour-row means.
/// Exhausting the sweep cap keeps the last iterate; unlike the
/// streamfunction solve this path reports nothing.
pub fn relax_vorticity(
    tend: &LayeredField,
    vor: &mut LayeredField,
    grid: &Grid,
    alpha: f64,
    drag: f64,
    dt: f64,
) {
    let nx = grid.nx;
    let ny = grid.ny;
    let epsq = grid.epsq;

    let d1 = 2.0 * alpha * (1.0 + epsq) + 1.0;
    let d3 = d1 + 1.5 * drag * dt;

    vor.anom1.fill(0.0);
    vor.anom3.fill(0.0);

    let mut new1: Array2<f64> = Array2::zeros(grid.shape());
    let mut new3: Array2<f64> = Array2::zeros(grid.shape());

    for _sweep in 0..MAX_SWEEPS {
        for j in 1..ny {
            let jm = j - 1;
            let jp = j + 1;
            for i in 1..=nx {
                let im = if i == 1 { nx } else { i - 1 };
                let ip = if i == nx { 1 } else { i + 1 };

                new1[[i, j]] = (alpha
                    * (vor.anom1[[ip, j]]
                        + vor.anom1[[im, j]]
                        + epsq * (vor.anom1[[i, jp]] + vor.anom1[[i, jm]]))
                    + tend.anom1[[i, j]])
                    / d1;
                new3[[i, j]] = (alpha
                    * (vor.anom3[[ip, j]]
                        + vor.anom3[[im, j]]
                        + epsq * (vor.anom3[[i, jp]] + vor.anom3[[i, jm]]))
                    + tend.anom3[[i, j]])
                    / d3;
            }
        }

        // Change norms are taken against the old state before it is
        // overwritten; the wall latitudes participate.
        let mut change1 = 0.0;
        for j in 1..=ny {
            for i in 1..=nx {
                let d = vor.anom1[[i, j]] - new1[[i, j]];
                change1 += d * d;
            }
        }
        for j in 1..ny {
            for i in 0..=nx {
                vor.anom1[[i, j]] = new1[[i, j]];
            }
        }
        fill_wall_rows(&mut vor.anom1);

        let mut change3 = 0.0;
        for j in 1..=ny {
            for i in 1..=nx {
                let d = vor.anom3[[i, j]] - new3[[i, j]];
                change3 += d * d;
            }
        }
        for j in 1..ny {
            for i in 0..=nx {
                vor.anom3[[i, j]] = new3[[i, j]];
            }
        }
        fill_wall_rows(&mut vor.anom3);

        if change1.max(change3) < VORTICITY_TOL {
            break;
        }
    }
}
