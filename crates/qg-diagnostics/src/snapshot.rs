//! Pull-based state snapshot for external writers and viewers.
//!
//! The core owns the integration; persistence and visualization own the
//! coordinate metadata, formats and file lifecycles. They query one of
//! these after a step and take everything they need by value.

use crate::energy::{energies, Energies};
use crate::winds::{meridional_wind, surface_pressure, temperature_500, zonal_wind};
use ndarray::Array2;
use qg_types::field::LayeredField;
use qg_types::grid::Grid;

/// Everything an external consumer can ask of the model at one instant.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Simulated day.
    pub day: f64,
    pub streamfunction1: Array2<f64>,
    pub streamfunction3: Array2<f64>,
    pub vorticity1: Array2<f64>,
    pub vorticity3: Array2<f64>,
    pub zonal_wind1: Array2<f64>,
    pub zonal_wind3: Array2<f64>,
    pub meridional_wind1: Array2<f64>,
    pub meridional_wind3: Array2<f64>,
    /// 500 hPa temperature (K).
    pub t500: Array2<f64>,
    /// Surface pressure (hPa about the reference).
    pub ps: Array2<f64>,
    pub energies: Energies,
}

impl Snapshot {
    /// Capture the current state. The streamfunction must carry a
    /// decomposition consistent with its totals (the stepping loop
    /// guarantees this whenever diagnostics run).
    pub fn capture(
        day: f64,
        vor: &LayeredField,
        strm: &LayeredField,
        grid: &Grid,
        f0: f64,
        rgas: f64,
        lambda_sq: f64,
    ) -> Self {
        let u = zonal_wind(strm, grid);
        let v = meridional_wind(strm, grid);
        Snapshot {
            day,
            streamfunction1: strm.total1.clone(),
            streamfunction3: strm.total3.clone(),
            vorticity1: vor.total1.clone(),
            vorticity3: vor.total3.clone(),
            zonal_wind1: u.total1.clone(),
            zonal_wind3: u.total3.clone(),
            meridional_wind1: v.total1.clone(),
            meridional_wind3: v.total3.clone(),
            t500: temperature_500(strm, f0, rgas),
            ps: surface_pressure(strm, f0),
            energies: energies(strm, grid, lambda_sq),
        }
    }

    /// Surface wind extrapolated below level 3, the combination plotted
    /// by the viewer.
    pub fn surface_zonal_wind(&self) -> Array2<f64> {
        let mut w = self.zonal_wind3.clone();
        w *= 1.5;
        w.scaled_add(-0.5, &self.zonal_wind1);
        w
    }
}
