// ─────────────────────────────────────────────────────────────────────
// QG Channel Model — Tendency
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Explicit leapfrog update: the provisional vorticity before the
//! implicit diffusion/drag correction.
//!
//! Per interior point: advective Jacobian of vorticity and
//! streamfunction, the beta term folded into the Jacobian's x-gradient,
//! explicit Laplacian diffusion of the previous-time vorticity, the
//! latitude-linear heating (opposite-signed between levels), and for
//! level 3 a linear surface-drag correction.

use qg_types::config::PhysicsParams;
use qg_types::constants::{CP, RGAS};
use qg_types::field::LayeredField;
use qg_types::grid::Grid;

pub fn provisional_vorticity(
    vor: &LayeredField,
    vor_prev: &LayeredField,
    strm: &LayeredField,
    tend: &mut LayeredField,
    grid: &Grid,
    physics: &PhysicsParams,
    gamma: f64,
    dt: f64,
) {
    let nx = grid.nx;
    let ny = grid.ny;
    let epsq = grid.epsq;

    let alpha = physics.diffusion * dt / (grid.dx * grid.dx);
    let b = physics.beta * grid.dx * grid.dx * grid.dy;
    let c = dt / (2.0 * grid.dx * grid.dy);
    let h = 4.0 * RGAS * physics.heating * gamma * dt / (physics.f0 * CP);
    let kdt = physics.drag * dt;

    tend.total1.fill(0.0);
    tend.total3.fill(0.0);

    let v1 = &vor.total1;
    let v3 = &vor.total3;
    let m1 = &vor_prev.total1;
    let m3 = &vor_prev.total3;
    let s1 = &strm.total1;
    let s3 = &strm.total3;

    for j in 1..ny {
        let jm = j - 1;
        let jp = j + 1;
        let heat = h * (2.0 * j as f64 - ny as f64) / ny as f64;
        for i in 1..=nx {
            let im = if i == 1 { nx } else { i - 1 };
            let ip = if i == nx { 1 } else { i + 1 };

            tend.total1[[i, j]] = m1[[i, j]]
                + c * ((v1[[ip, j]] - v1[[im, j]]) * (s1[[i, jp]] - s1[[i, jm]])
                    - (2.0 * b + v1[[i, jp]] - v1[[i, jm]]) * (s1[[ip, j]] - s1[[im, j]]))
                + alpha
                    * (m1[[ip, j]] + m1[[im, j]] - 2.0 * m1[[i, j]]
                        + epsq * (m1[[i, jp]] + m1[[i, jm]] - 2.0 * m1[[i, j]]))
                + heat;

            let mut x3 = m3[[i, j]]
                + c * ((v3[[ip, j]] - v3[[im, j]]) * (s3[[i, jp]] - s3[[i, jm]])
                    - (2.0 * b + v3[[i, jp]] - v3[[i, jm]]) * (s3[[ip, j]] - s3[[im, j]]))
                + alpha
                    * (m3[[ip, j]] + m3[[im, j]] - 2.0 * m3[[i, j]]
                        + epsq * (m3[[i, jp]] + m3[[i, jm]] - 2.0 * m3[[i, j]]))
                - heat;
            x3 -= kdt
                * (1.5 * m3[[i, j]]
                    - v1[[i, j]]
                    - 4.0 * gamma * (s1[[i, j]] - s3[[i, j]]));
            tend.total3[[i, j]] = x3;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Grid, PhysicsParams) {
        (Grid::default(), PhysicsParams::default())
    }

    #[test]
    fn test_rest_state_with_zero_heating_has_zero_tendency() {
        let (grid, mut physics) = setup();
        physics.heating = 0.0;
        let vor = LayeredField::zeros(&grid);
        let vor_prev = LayeredField::zeros(&grid);
        let strm = LayeredField::zeros(&grid);
        let mut tend = LayeredField::zeros(&grid);
        provisional_vorticity(&vor, &vor_prev, &strm, &mut tend, &grid, &physics, 0.21, 86400.0);
        assert!(tend.total1.iter().all(|v| *v == 0.0));
        assert!(tend.total3.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_heating_is_linear_in_latitude_and_antisymmetric_in_level() {
        let (grid, physics) = setup();
        let gamma = 0.21;
        let dt = 86400.0;
        let vor = LayeredField::zeros(&grid);
        let vor_prev = LayeredField::zeros(&grid);
        let strm = LayeredField::zeros(&grid);
        let mut tend = LayeredField::zeros(&grid);
        provisional_vorticity(&vor, &vor_prev, &strm, &mut tend, &grid, &physics, gamma, dt);

        let h = 4.0 * RGAS * physics.heating * gamma * dt / (physics.f0 * CP);
        let ny = grid.ny as f64;
        for j in 1..grid.ny {
            let expected = h * (2.0 * j as f64 - ny) / ny;
            for i in 1..=grid.nx {
                assert!((tend.total1[[i, j]] - expected).abs() < 1e-12);
                assert!((tend.total3[[i, j]] + expected).abs() < 1e-12);
            }
        }
        // Wall rows are left to the implicit solvers.
        for i in 0..=grid.nx {
            assert_eq!(tend.total1[[i, 0]], 0.0);
            assert_eq!(tend.total1[[i, grid.ny]], 0.0);
        }
    }

    #[test]
    fn test_explicit_diffusion_uses_previous_time_vorticity() {
        let (grid, mut physics) = setup();
        physics.heating = 0.0;
        physics.drag = 0.0;
        let dt = 7200.0;
        let vor = LayeredField::zeros(&grid);
        let mut vor_prev = LayeredField::zeros(&grid);
        vor_prev.total1[[4, 8]] = 1.0e-5;
        let strm = LayeredField::zeros(&grid);
        let mut tend = LayeredField::zeros(&grid);
        provisional_vorticity(&vor, &vor_prev, &strm, &mut tend, &grid, &physics, 0.21, dt);

        let alpha = physics.diffusion * dt / (grid.dx * grid.dx);
        // At the spike: vm + alpha * (-2 - 2*epsq) * vm.
        let expected = 1.0e-5 * (1.0 - 2.0 * alpha * (1.0 + grid.epsq));
        assert!((tend.total1[[4, 8]] - expected).abs() < 1e-17);
        // At the x-neighbour: alpha * vm.
        assert!((tend.total1[[5, 8]] - alpha * 1.0e-5).abs() < 1e-17);
        // At the y-neighbour: alpha * epsq * vm.
        assert!((tend.total1[[4, 9]] - alpha * grid.epsq * 1.0e-5).abs() < 1e-17);
    }

    #[test]
    fn test_surface_drag_damps_level3_only() {
        let (grid, mut physics) = setup();
        physics.heating = 0.0;
        let dt = 7200.0;
        let vor = LayeredField::zeros(&grid);
        let mut vor_prev = LayeredField::zeros(&grid);
        vor_prev.total3.fill(2.0e-5);
        let strm = LayeredField::zeros(&grid);
        let mut tend = LayeredField::zeros(&grid);
        provisional_vorticity(&vor, &vor_prev, &strm, &mut tend, &grid, &physics, 0.21, dt);

        let expected = 2.0e-5 * (1.0 - 1.5 * physics.drag * dt);
        for j in 1..grid.ny {
            for i in 1..=grid.nx {
                assert!((tend.total3[[i, j]] - expected).abs() < 1e-18);
                assert_eq!(tend.total1[[i, j]], 0.0);
            }
        }
    }
}
