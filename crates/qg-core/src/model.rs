// ─────────────────────────────────────────────────────────────────────
// QG Channel Model — Model
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Time integration of the two-layer channel model.
//!
//! Three-time-level leapfrog on the vorticity with the streamfunction
//! diagnosed every step. A run is: zonal spin-up from rest, one
//! deterministic perturbation, then regular stepping with the adaptive
//! step. All solver failures, energy blow-ups and non-finite values
//! abort the run; a silently wrong trajectory is worse than a crash.

use log::{info, warn};

use qg_diagnostics::energy::{energies, zonal_summary};
use qg_diagnostics::snapshot::Snapshot;
use qg_types::config::ModelConfig;
use qg_types::constants::{EKE_LIMIT, NOISE_SEED, RGAS, SECONDS_PER_DAY};
use qg_types::error::{QgError, QgResult};
use qg_types::field::LayeredField;
use qg_types::grid::Grid;

use crate::noise::MiddleSquare;
use crate::relax::{relax_streamfunction, relax_vorticity};
use crate::stability::stability_criterion;
use crate::tendency::provisional_vorticity;
use crate::vorticity::vorticity_from_streamfunction;
use crate::zonal::{solve_zonal_vorticity, ZonalStreamSolver};

/// Criterion value above which the step is shrunk.
const STABILITY_LIMIT: f64 = 0.9;

/// The model: all prognostic state plus the cached zonal factorization.
pub struct Model {
    pub config: ModelConfig,
    pub grid: Grid,
    /// Inter-level coupling, lambda_sq * dx^2.
    pub gamma: f64,
    /// Vorticity at the current time level.
    pub vor: LayeredField,
    /// Vorticity one step back, for the leapfrog.
    pub vor_prev: LayeredField,
    /// Diagnosed streamfunction.
    pub strm: LayeredField,
    /// Scratch: the provisional (unrelaxed) vorticity update.
    tend: LayeredField,
    zonal_solver: ZonalStreamSolver,
    /// Simulated seconds since the start of the run.
    pub time: f64,
    /// Simulated days, time / 86400.
    pub day: f64,
    /// Active step (s). Shrinks in `min_dt` decrements, never grows.
    pub dt: f64,
}

impl Model {
    /// Build a model at rest. The zonal elliptic matrix is assembled and
    /// factorized here, once for the life of the run.
    pub fn new(config: ModelConfig) -> QgResult<Self> {
        config.validate()?;
        let grid = config.create_grid();
        let gamma = config.physics.lambda_sq * grid.dx * grid.dx;
        let zonal_solver = ZonalStreamSolver::new(&grid, gamma)?;
        let dt = config.run.spinup_dt;
        Ok(Model {
            vor: LayeredField::zeros(&grid),
            vor_prev: LayeredField::zeros(&grid),
            strm: LayeredField::zeros(&grid),
            tend: LayeredField::zeros(&grid),
            zonal_solver,
            gamma,
            grid,
            config,
            time: 0.0,
            day: 0.0,
            dt,
        })
    }

    pub fn from_file(path: &str) -> QgResult<Self> {
        let config = ModelConfig::from_file(path)?;
        Self::new(config)
    }

    fn alpha(&self) -> f64 {
        self.config.physics.diffusion * self.dt / (self.grid.dx * self.grid.dx)
    }

    fn at_diag_time(&self) -> bool {
        self.time % self.config.run.diag_interval == 0.0
    }

    /// Post-operation floating-point guard. The reference semantics trap
    /// overflow/invalid/divide at the instruction; checking each stage's
    /// output converts the same faults into the fatal error path.
    fn guard(&self, field: &LayeredField, stage: &'static str) -> QgResult<()> {
        if field.is_finite() {
            Ok(())
        } else {
            Err(QgError::NonFinite {
                stage,
                day: self.day,
            })
        }
    }

    /// Re-interpolate the previous-time vorticity to a shorter step so
    /// the leapfrog restarts smoothly: vm <- v - (v - vm) * new/old.
    fn interpolate_previous(&mut self, new_dt: f64) {
        let r = new_dt / self.dt;
        let (nx, ny) = self.grid.shape();
        for j in 0..ny {
            for i in 0..nx {
                let v1 = self.vor.total1[[i, j]];
                let v3 = self.vor.total3[[i, j]];
                self.vor_prev.total1[[i, j]] = v1 - (v1 - self.vor_prev.total1[[i, j]]) * r;
                self.vor_prev.total3[[i, j]] = v3 - (v3 - self.vor_prev.total3[[i, j]]) * r;
            }
        }
    }

    /// Very first update from rest: no meaningful previous time level
    /// exists, so take half the tendency as a forward step.
    fn bootstrap_zonal(&mut self) {
        let ny = self.grid.ny;
        for j in 0..=ny {
            self.vor.zonal1[j] = 0.5 * self.tend.zonal1[j];
            self.vor.zonal3[j] = 0.5 * self.tend.zonal3[j];
        }
    }

    fn advance_clock(&mut self) {
        self.time += self.dt;
        self.day = self.time / SECONDS_PER_DAY;
    }

    /// Zonal-mean-only evolution from rest until the configured day
    /// count. The anomaly is forced to zero every step.
    pub fn spinup(&mut self) -> QgResult<()> {
        let physics = self.config.physics.clone();
        while self.day < self.config.run.spinup_days {
            self.vor.split();
            self.zonal_solver.solve(&self.vor, &mut self.strm);
            self.strm.zero_anomaly();
            self.strm.compose();
            self.guard(&self.strm, "zonal streamfunction solve")?;

            if self.at_diag_time() {
                let s = zonal_summary(
                    &self.strm,
                    &self.grid,
                    physics.f0,
                    RGAS,
                    physics.lambda_sq,
                );
                info!(
                    "TZ {:5.1} {:15.7} {:15.7} {:15.7} {:15.7} {:15.7}",
                    self.day, s.t2_max, s.u1_max, s.u3_max, s.zonal_kinetic, s.zonal_potential
                );
            }

            provisional_vorticity(
                &self.vor,
                &self.vor_prev,
                &self.strm,
                &mut self.tend,
                &self.grid,
                &physics,
                self.gamma,
                self.dt,
            );
            self.guard(&self.tend, "explicit tendency")?;
            self.tend.split();

            let alpha = self.alpha();
            solve_zonal_vorticity(
                &self.tend,
                &mut self.vor,
                &self.grid,
                alpha,
                physics.drag,
                self.dt,
            )?;
            if self.time == 0.0 {
                self.bootstrap_zonal();
            } else {
                // The zonal solve only touched the zonal means; the
                // totals still hold the current time level.
                self.vor_prev.copy_total_from(&self.vor);
            }
            self.vor.zero_anomaly();
            self.vor.compose();
            self.guard(&self.vor, "zonal vorticity update")?;

            self.advance_clock();
        }
        Ok(())
    }

    /// Inject the deterministic eddy perturbation and switch to the
    /// regular (shorter) step.
    pub fn perturb(&mut self) {
        let dt_new = self.config.run.initial_dt;
        // The step is about to change: interpolate the previous time
        // level first so the restart is smooth.
        self.interpolate_previous(dt_new);

        let nx = self.grid.nx;
        let ny = self.grid.ny;
        let mut gen = MiddleSquare::new(NOISE_SEED);
        let mut noise = LayeredField::zeros(&self.grid);
        for i in 1..=nx {
            for j in 1..ny {
                let r = gen.next_unit();
                noise.total1[[i, j]] = r;
                noise.total3[[i, j]] = r;
            }
        }
        // Keep only the eddy part, scaled to streamfunction units.
        noise.split();
        let scale = self.config.physics.noise_scale;
        let (snx, sny) = self.grid.shape();
        for j in 0..sny {
            for i in 0..snx {
                noise.total1[[i, j]] = scale * noise.anom1[[i, j]];
                noise.total3[[i, j]] = scale * noise.anom3[[i, j]];
            }
        }

        let mut dvor = LayeredField::zeros(&self.grid);
        vorticity_from_streamfunction(&noise, &mut dvor, &self.grid, self.gamma);

        // Both leapfrog time levels receive the increment.
        for j in 0..sny {
            for i in 0..snx {
                self.vor.total1[[i, j]] += dvor.total1[[i, j]];
                self.vor.total3[[i, j]] += dvor.total3[[i, j]];
                self.vor_prev.total1[[i, j]] += dvor.total1[[i, j]];
                self.vor_prev.total3[[i, j]] += dvor.total3[[i, j]];
            }
        }

        self.dt = dt_new;
    }

    /// One full leapfrog step.
    pub fn step(&mut self) -> QgResult<()> {
        let physics = self.config.physics.clone();

        self.vor.split();
        self.zonal_solver.solve(&self.vor, &mut self.strm);
        relax_streamfunction(
            &self.vor,
            &mut self.strm,
            &self.grid,
            self.gamma,
            self.config.solver.accel,
        )?;
        self.strm.compose();
        self.guard(&self.strm, "streamfunction inversion")?;

        if self.at_diag_time() {
            let e = energies(&self.strm, &self.grid, physics.lambda_sq);
            info!(
                "KE {:6.2} {:9.2} {:9.2} {:9.2} {:9.2}",
                self.day, e.zonal_kinetic, e.eddy_kinetic, e.eddy_potential, e.zonal_potential
            );
            if e.eddy_kinetic > EKE_LIMIT {
                return Err(QgError::EnergyBlowup {
                    eke: e.eddy_kinetic,
                    limit: EKE_LIMIT,
                });
            }
        }

        provisional_vorticity(
            &self.vor,
            &self.vor_prev,
            &self.strm,
            &mut self.tend,
            &self.grid,
            &physics,
            self.gamma,
            self.dt,
        );
        self.guard(&self.tend, "explicit tendency")?;
        self.tend.split();

        let alpha = self.alpha();
        solve_zonal_vorticity(
            &self.tend,
            &mut self.vor,
            &self.grid,
            alpha,
            physics.drag,
            self.dt,
        )?;
        if self.time == 0.0 {
            self.bootstrap_zonal();
        } else {
            self.vor_prev.copy_total_from(&self.vor);
        }

        relax_vorticity(
            &self.tend,
            &mut self.vor,
            &self.grid,
            alpha,
            physics.drag,
            self.dt,
        );
        self.vor.compose();
        self.guard(&self.vor, "vorticity update")?;

        self.advance_clock();

        if self.config.run.variable_step
            && self.time % SECONDS_PER_DAY == 0.0
            && self.dt > self.config.run.min_dt
        {
            let crit = stability_criterion(&self.strm, &self.grid, self.dt);
            if crit > STABILITY_LIMIT {
                let dt_new = self.dt - self.config.run.min_dt;
                warn!(
                    "day {:.2}: stability criterion {:.3}, shrinking step to {} s",
                    self.day, crit, dt_new
                );
                self.interpolate_previous(dt_new);
                self.dt = dt_new;
            }
        }

        Ok(())
    }

    /// Whole reference run: spin-up, perturbation, regular stepping to
    /// the configured end day.
    pub fn run(&mut self) -> QgResult<()> {
        self.spinup()?;
        self.perturb();
        while self.day < self.config.run.run_days {
            self.step()?;
        }
        Ok(())
    }

    /// Current state for external writers and viewers (pull-based).
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(
            self.day,
            &self.vor,
            &self.strm,
            &self.grid,
            self.config.physics.f0,
            RGAS,
            self.config.physics.lambda_sq,
        )
    }
}
