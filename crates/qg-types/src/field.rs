// ─────────────────────────────────────────────────────────────────────
// QG Channel Model — Field
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Two-level scalar field with total / anomaly / zonal-mean representations.

use crate::grid::Grid;
use ndarray::{Array1, Array2};

/// A scalar quantity (vorticity or streamfunction) on model levels 1 and 3.
///
/// Holds three linked representations per level: the full field, the zonal
/// mean (a function of latitude only) and the anomaly about it. The
/// invariant `total[i,j] = anomaly[i,j] + zonal[j]` is maintained solely by
/// [`LayeredField::split`] and [`LayeredField::compose`]; nothing else may
/// update one representation without going back through them.
#[derive(Debug, Clone)]
pub struct LayeredField {
    pub total1: Array2<f64>,
    pub total3: Array2<f64>,
    pub anom1: Array2<f64>,
    pub anom3: Array2<f64>,
    pub zonal1: Array1<f64>,
    pub zonal3: Array1<f64>,
}

impl LayeredField {
    /// Allocate a field at rest (everything zero).
    pub fn zeros(grid: &Grid) -> Self {
        let shape = grid.shape();
        LayeredField {
            total1: Array2::zeros(shape),
            total3: Array2::zeros(shape),
            anom1: Array2::zeros(shape),
            anom3: Array2::zeros(shape),
            zonal1: Array1::zeros(shape.1),
            zonal3: Array1::zeros(shape.1),
        }
    }

    fn nx(&self) -> usize {
        self.total1.nrows() - 1
    }

    fn ny(&self) -> usize {
        self.total1.ncols() - 1
    }

    /// Recompute the zonal means from the totals.
    ///
    /// The mean runs over the interior longitudes `1..=nx`; the wrap
    /// column 0 does not contribute.
    pub fn calc_zonal_mean(&mut self) {
        let nx = self.nx();
        let ny = self.ny();
        for j in 0..=ny {
            let mut sum1 = 0.0;
            let mut sum3 = 0.0;
            for i in 1..=nx {
                sum1 += self.total1[[i, j]];
                sum3 += self.total3[[i, j]];
            }
            self.zonal1[j] = sum1 / nx as f64;
            self.zonal3[j] = sum3 / nx as f64;
        }
    }

    /// Decompose the totals: zonal mean, then anomaly = total - zonal mean.
    ///
    /// Idempotent while the totals are unchanged.
    pub fn split(&mut self) {
        self.calc_zonal_mean();
        let ny = self.ny();
        for j in 0..=ny {
            let z1 = self.zonal1[j];
            let z3 = self.zonal3[j];
            for i in 0..=self.nx() {
                self.anom1[[i, j]] = self.total1[[i, j]] - z1;
                self.anom3[[i, j]] = self.total3[[i, j]] - z3;
            }
        }
    }

    /// Rebuild the totals from anomaly + zonal mean (inverse of `split`).
    pub fn compose(&mut self) {
        let ny = self.ny();
        for j in 0..=ny {
            let z1 = self.zonal1[j];
            let z3 = self.zonal3[j];
            for i in 0..=self.nx() {
                self.total1[[i, j]] = self.anom1[[i, j]] + z1;
                self.total3[[i, j]] = self.anom3[[i, j]] + z3;
            }
        }
    }

    /// Zero the anomaly on both levels.
    pub fn zero_anomaly(&mut self) {
        self.anom1.fill(0.0);
        self.anom3.fill(0.0);
    }

    /// Copy the other field's totals into this one.
    pub fn copy_total_from(&mut self, other: &LayeredField) {
        self.total1.assign(&other.total1);
        self.total3.assign(&other.total3);
    }

    /// True when every representation on both levels is finite.
    pub fn is_finite(&self) -> bool {
        self.total1.iter().all(|v| v.is_finite())
            && self.total3.iter().all(|v| v.is_finite())
            && self.anom1.iter().all(|v| v.is_finite())
            && self.anom3.iter().all(|v| v.is_finite())
            && self.zonal1.iter().all(|v| v.is_finite())
            && self.zonal3.iter().all(|v| v.is_finite())
    }
}

/// Wall treatment for pointwise-built fields: latitude 0 takes the mean of
/// latitude 1 and latitude ny the mean of latitude ny-1, the mean running
/// over the whole longitude axis (wrap column included).
pub fn fill_wall_rows(a: &mut Array2<f64>) {
    let ny = a.ncols() - 1;
    let n = a.nrows() as f64;
    let south = a.column(1).sum() / n;
    let north = a.column(ny - 1).sum() / n;
    a.column_mut(0).fill(south);
    a.column_mut(ny).fill(north);
}
