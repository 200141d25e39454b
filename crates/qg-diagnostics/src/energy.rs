// ─────────────────────────────────────────────────────────────────────
// QG Channel Model — Energy
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Zonal and eddy energy budgets.
//!
//! All energies carry the scaling convention that a wind of 1 m/s
//! everywhere gives a kinetic energy of 10.

use crate::winds::{meridional_wind, zonal_wind};
use qg_types::field::LayeredField;
use qg_types::grid::Grid;

/// The four scalar energies reported at the diagnostic cadence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Energies {
    pub zonal_kinetic: f64,
    pub eddy_kinetic: f64,
    pub zonal_potential: f64,
    pub eddy_potential: f64,
}

/// Zonal-mean summary used during spin-up.
#[derive(Debug, Clone, Copy)]
pub struct ZonalSummary {
    /// Largest 500 hPa temperature (K) implied by the thermal wind.
    pub t2_max: f64,
    /// Largest zonal-mean wind per level (m/s).
    pub u1_max: f64,
    pub u3_max: f64,
    pub zonal_kinetic: f64,
    pub zonal_potential: f64,
}

fn zonal_kinetic(u: &LayeredField, ny: usize) -> f64 {
    let sum: f64 = u
        .zonal1
        .iter()
        .zip(u.zonal3.iter())
        .map(|(&a, &b)| a * a + b * b)
        .sum();
    10.0 * sum / (2.0 * ny as f64)
}

fn zonal_potential(strm: &LayeredField, ny: usize, lambda_sq: f64) -> f64 {
    let mut sum = 0.0;
    for j in 1..ny {
        let d = strm.zonal1[j] - strm.zonal3[j];
        sum += d * d;
    }
    5.0 * lambda_sq * sum / ny as f64
}

/// Full energy budget of the current state.
///
/// The streamfunction must carry a decomposition consistent with its
/// totals; the winds are derived and decomposed here.
pub fn energies(strm: &LayeredField, grid: &Grid, lambda_sq: f64) -> Energies {
    let mut u = zonal_wind(strm, grid);
    let mut v = meridional_wind(strm, grid);
    u.split();
    v.split();

    let nx = grid.nx as f64;
    let ny = grid.ny as f64;

    let eddy_sum: f64 = u
        .anom1
        .iter()
        .zip(u.anom3.iter())
        .zip(v.anom1.iter().zip(v.anom3.iter()))
        .map(|((&u1, &u3), (&v1, &v3))| u1 * u1 + u3 * u3 + v1 * v1 + v3 * v3)
        .sum();
    let eddy_kinetic = 10.0 * eddy_sum / (2.0 * ny * nx);

    let mut eddy_pot_sum = 0.0;
    for j in 1..grid.ny {
        for i in 0..=grid.nx {
            let d = strm.anom1[[i, j]] - strm.anom3[[i, j]];
            eddy_pot_sum += d * d;
        }
    }
    let eddy_potential = 5.0 * lambda_sq * eddy_pot_sum / (nx * ny);

    Energies {
        zonal_kinetic: zonal_kinetic(&u, grid.ny),
        eddy_kinetic,
        zonal_potential: zonal_potential(strm, grid.ny, lambda_sq),
        eddy_potential,
    }
}

/// Spin-up summary: thermal-wind temperature, zonal winds, zonal energies.
pub fn zonal_summary(
    strm: &LayeredField,
    grid: &Grid,
    f0: f64,
    rgas: f64,
    lambda_sq: f64,
) -> ZonalSummary {
    let ny = grid.ny;
    let mut u = LayeredField::zeros(grid);
    for j in 1..=ny {
        u.zonal1[j] = -(strm.zonal1[j] - strm.zonal1[j - 1]) / grid.dy;
        u.zonal3[j] = -(strm.zonal3[j] - strm.zonal3[j - 1]) / grid.dy;
    }

    let mut t2_max = f64::NEG_INFINITY;
    for j in 0..=ny {
        let t = f0 * (strm.zonal1[j] - strm.zonal3[j]) / rgas;
        t2_max = t2_max.max(t);
    }
    let u1_max = u.zonal1.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let u3_max = u.zonal3.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    ZonalSummary {
        t2_max,
        u1_max,
        u3_max,
        zonal_kinetic: zonal_kinetic(&u, ny),
        zonal_potential: zonal_potential(strm, ny, lambda_sq),
    }
}
