// ─────────────────────────────────────────────────────────────────────
// QG Channel Model — Vorticity
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Discrete two-level elliptic operator: vorticity from streamfunction.

use qg_types::field::{fill_wall_rows, LayeredField};
use qg_types::grid::Grid;

/// Apply the forward operator pointwise on the totals:
/// scaled five-point Laplacian per level plus the inter-level coupling,
/// opposite-signed between the levels. Wall latitudes take the mean of
/// their neighbour row.
///
/// This is the exact inverse relation the elliptic solvers invert; the
/// perturbation uses it to turn a noise streamfunction into a vorticity
/// increment.
pub fn vorticity_from_streamfunction(
    strm: &LayeredField,
    vor: &mut LayeredField,
    grid: &Grid,
    gamma: f64,
) {
    let nx = grid.nx;
    let ny = grid.ny;
    let epsq = grid.epsq;

    for j in 1..ny {
        let jm = j - 1;
        let jp = j + 1;
        for i in 1..=nx {
            let im = if i == 1 { nx } else { i - 1 };
            let ip = if i == nx { 1 } else { i + 1 };

            let s1 = &strm.total1;
            let s3 = &strm.total3;
            let shear = gamma * (s1[[i, j]] - s3[[i, j]]);

            vor.total1[[i, j]] = (s1[[ip, j]] + s1[[im, j]] - 2.0 * s1[[i, j]])
                + epsq * (s1[[i, jp]] + s1[[i, jm]] - 2.0 * s1[[i, j]])
                - shear;
            vor.total3[[i, j]] = (s3[[ip, j]] + s3[[im, j]] - 2.0 * s3[[i, j]])
                + epsq * (s3[[i, jp]] + s3[[i, jm]] - 2.0 * s3[[i, j]])
                + shear;
        }
    }

    fill_wall_rows(&mut vor.total1);
    fill_wall_rows(&mut vor.total3);
}
