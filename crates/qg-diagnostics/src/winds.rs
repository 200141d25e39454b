// ─────────────────────────────────────────────────────────────────────
// QG Channel Model — Winds
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Non-divergent winds diagnosed from the streamfunction.

use ndarray::Array2;
use qg_types::field::LayeredField;
use qg_types::grid::Grid;

/// Zonal wind u = -dpsi/dy, staggered half a cell south: u[.,j] lives
/// between streamfunction latitudes j-1 and j. Latitude 0 is left zero.
pub fn zonal_wind(strm: &LayeredField, grid: &Grid) -> LayeredField {
    let mut u = LayeredField::zeros(grid);
    for j in 1..=grid.ny {
        for i in 0..=grid.nx {
            u.total1[[i, j]] = -(strm.total1[[i, j]] - strm.total1[[i, j - 1]]) / grid.dy;
            u.total3[[i, j]] = -(strm.total3[[i, j]] - strm.total3[[i, j - 1]]) / grid.dy;
        }
    }
    u
}

/// Meridional wind v = dpsi/dx, staggered half a cell west with periodic
/// wrap. The wrap column 0 is left zero.
pub fn meridional_wind(strm: &LayeredField, grid: &Grid) -> LayeredField {
    let mut v = LayeredField::zeros(grid);
    for i in 1..=grid.nx {
        let im = if i == 1 { grid.nx } else { i - 1 };
        for j in 0..=grid.ny {
            v.total1[[i, j]] = (strm.total1[[i, j]] - strm.total1[[im, j]]) / grid.dx;
            v.total3[[i, j]] = (strm.total3[[i, j]] - strm.total3[[im, j]]) / grid.dx;
        }
    }
    v
}

/// 500 hPa temperature from the thermal-wind relation between the levels.
pub fn temperature_500(strm: &LayeredField, f0: f64, rgas: f64) -> Array2<f64> {
    let mut t = strm.total1.clone();
    t -= &strm.total3;
    t.mapv_inplace(|v| f0 * v / rgas);
    t
}

/// Surface pressure (hPa about the reference) extrapolated below level 3.
pub fn surface_pressure(strm: &LayeredField, f0: f64) -> Array2<f64> {
    let shape = strm.total1.raw_dim();
    let mut p = Array2::zeros(shape);
    for ((i, j), out) in p.indexed_iter_mut() {
        *out = 0.01 * (1.5 * strm.total3[[i, j]] - 0.5 * strm.total1[[i, j]]) * f0;
    }
    p
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zonal_wind_of_linear_streamfunction() {
        let grid = Grid::default();
        let mut strm = LayeredField::zeros(&grid);
        // psi = y  =>  u = -1/dy * dy = constant
        for j in 0..=grid.ny {
            for i in 0..=grid.nx {
                strm.total1[[i, j]] = j as f64 * grid.dy;
            }
        }
        let u = zonal_wind(&strm, &grid);
        for j in 1..=grid.ny {
            for i in 0..=grid.nx {
                assert!((u.total1[[i, j]] + 1.0).abs() < 1e-12);
            }
        }
        // Unwritten staggered edge stays zero.
        for i in 0..=grid.nx {
            assert_eq!(u.total1[[i, 0]], 0.0);
        }
    }

    #[test]
    fn test_meridional_wind_wraps_periodically() {
        let grid = Grid::default();
        let mut strm = LayeredField::zeros(&grid);
        for i in 1..=grid.nx {
            for j in 0..=grid.ny {
                strm.total1[[i, j]] = i as f64;
            }
        }
        let v = meridional_wind(&strm, &grid);
        // Interior columns see a unit difference...
        assert!((v.total1[[2, 3]] - 1.0 / grid.dx).abs() < 1e-18);
        // ...while column 1 wraps to column nx.
        let expected = (1.0 - grid.nx as f64) / grid.dx;
        assert!((v.total1[[1, 3]] - expected).abs() < 1e-18);
    }

    #[test]
    fn test_temperature_vanishes_for_barotropic_flow() {
        let grid = Grid::default();
        let mut strm = LayeredField::zeros(&grid);
        for ((i, j), v) in strm.total1.indexed_iter_mut() {
            *v = (i + j) as f64;
        }
        strm.total3.assign(&strm.total1);
        let t = temperature_500(&strm, 1.0e-4, 287.0);
        assert!(t.iter().all(|v| v.abs() < 1e-14));
    }
}
