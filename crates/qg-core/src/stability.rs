// ─────────────────────────────────────────────────────────────────────
// QG Channel Model — Stability
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Advective stability criterion driving the adaptive time step.

use qg_types::field::LayeredField;
use qg_types::grid::Grid;

/// Normalized bound on the advective displacement per step:
/// `0.5 * dt * max(|dpsi_x| + |dpsi_y|) / (dx * dy)` over both levels.
/// Values approaching 1 mean a parcel crosses a full cell per step and
/// the leapfrog is about to go unstable.
pub fn stability_criterion(strm: &LayeredField, grid: &Grid, dt: f64) -> f64 {
    let nx = grid.nx;
    let ny = grid.ny;
    let mut smax: f64 = 0.0;
    for i in 1..=nx {
        let im = if i == 1 { nx } else { i - 1 };
        let ip = if i == nx { 1 } else { i + 1 };
        for j in 1..ny {
            let jm = j - 1;
            let jp = j + 1;
            let g1 = (strm.total1[[ip, j]] - strm.total1[[im, j]]).abs()
                + (strm.total1[[i, jp]] - strm.total1[[i, jm]]).abs();
            let g3 = (strm.total3[[ip, j]] - strm.total3[[im, j]]).abs()
                + (strm.total3[[i, jp]] - strm.total3[[i, jm]]).abs();
            smax = smax.max(g1).max(g3);
        }
    }
    0.5 * dt * smax / (grid.dx * grid.dy)
}
