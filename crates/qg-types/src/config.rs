// ─────────────────────────────────────────────────────────────────────
// QG Channel Model — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{QgError, QgResult};
use crate::grid::Grid;

/// Top-level model configuration.
///
/// Every field defaults to the standard 16x16 channel experiment, so an
/// empty JSON object `{}` is a valid config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_experiment_name")]
    pub experiment_name: String,
    /// [nx, ny] grid intervals.
    #[serde(default = "default_grid_resolution")]
    pub grid_resolution: [usize; 2],
    #[serde(default)]
    pub physics: PhysicsParams,
    #[serde(default)]
    pub run: RunParams,
    #[serde(default)]
    pub solver: SolverParams,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsParams {
    /// Radiative heating contrast (W/kg).
    #[serde(default = "default_heating")]
    pub heating: f64,
    /// Static stability parameter (m^-2).
    #[serde(default = "default_lambda_sq")]
    pub lambda_sq: f64,
    /// Meridional planetary vorticity gradient (s^-1 m^-1).
    #[serde(default = "default_beta")]
    pub beta: f64,
    /// Surface drag coefficient (s^-1).
    #[serde(default = "default_drag")]
    pub drag: f64,
    /// Horizontal diffusion coefficient (m^2/s).
    #[serde(default = "default_diffusion")]
    pub diffusion: f64,
    /// Coriolis parameter at the channel centre (s^-1).
    #[serde(default = "default_f0")]
    pub f0: f64,
    /// Amplitude of the initial noise streamfunction (m^2/s).
    #[serde(default = "default_noise_scale")]
    pub noise_scale: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunParams {
    /// Zonal spin-up length (days).
    #[serde(default = "default_spinup_days")]
    pub spinup_days: f64,
    /// Spin-up time step (s).
    #[serde(default = "default_spinup_dt")]
    pub spinup_dt: f64,
    /// Total run length (days).
    #[serde(default = "default_run_days")]
    pub run_days: f64,
    /// Initial time step of the perturbed run (s).
    #[serde(default = "default_initial_dt")]
    pub initial_dt: f64,
    /// Floor and decrement of the adaptive step (s).
    #[serde(default = "default_min_dt")]
    pub min_dt: f64,
    /// Shrink the step when the stability criterion is exceeded.
    #[serde(default = "default_variable_step")]
    pub variable_step: bool,
    /// Diagnostic cadence (simulated seconds).
    #[serde(default = "default_diag_interval")]
    pub diag_interval: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverParams {
    /// Over-relaxation factor of the streamfunction sweep (1.0 = undamped).
    #[serde(default = "default_accel")]
    pub accel: f64,
}

fn default_experiment_name() -> String {
    "phillips-channel".to_string()
}
fn default_grid_resolution() -> [usize; 2] {
    [constants::NX, constants::NY]
}
fn default_heating() -> f64 {
    constants::HEATING
}
fn default_lambda_sq() -> f64 {
    constants::LAMBDA_SQ
}
fn default_beta() -> f64 {
    constants::BETA
}
fn default_drag() -> f64 {
    constants::SURFACE_DRAG
}
fn default_diffusion() -> f64 {
    constants::DIFFUSION
}
fn default_f0() -> f64 {
    constants::F0
}
fn default_noise_scale() -> f64 {
    constants::NOISE_SCALE
}
fn default_spinup_days() -> f64 {
    131.0
}
fn default_spinup_dt() -> f64 {
    86400.0
}
fn default_run_days() -> f64 {
    165.5
}
fn default_initial_dt() -> f64 {
    7200.0
}
fn default_min_dt() -> f64 {
    1800.0
}
fn default_variable_step() -> bool {
    true
}
fn default_diag_interval() -> f64 {
    3600.0
}
fn default_accel() -> f64 {
    1.0
}

impl Default for PhysicsParams {
    fn default() -> Self {
        PhysicsParams {
            heating: default_heating(),
            lambda_sq: default_lambda_sq(),
            beta: default_beta(),
            drag: default_drag(),
            diffusion: default_diffusion(),
            f0: default_f0(),
            noise_scale: default_noise_scale(),
        }
    }
}

impl Default for RunParams {
    fn default() -> Self {
        RunParams {
            spinup_days: default_spinup_days(),
            spinup_dt: default_spinup_dt(),
            run_days: default_run_days(),
            initial_dt: default_initial_dt(),
            min_dt: default_min_dt(),
            variable_step: default_variable_step(),
            diag_interval: default_diag_interval(),
        }
    }
}

impl Default for SolverParams {
    fn default() -> Self {
        SolverParams {
            accel: default_accel(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            experiment_name: default_experiment_name(),
            grid_resolution: default_grid_resolution(),
            physics: PhysicsParams::default(),
            run: RunParams::default(),
            solver: SolverParams::default(),
        }
    }
}

impl ModelConfig {
    /// Load from a JSON file.
    pub fn from_file(path: &str) -> QgResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the integrator cannot run.
    pub fn validate(&self) -> QgResult<()> {
        let [nx, ny] = self.grid_resolution;
        if nx < 4 || ny < 4 {
            return Err(QgError::Config(format!(
                "grid resolution {nx}x{ny} is below the 4x4 minimum"
            )));
        }
        if self.run.initial_dt <= 0.0 || self.run.spinup_dt <= 0.0 {
            return Err(QgError::Config("time steps must be positive".to_string()));
        }
        if self.run.min_dt > self.run.initial_dt {
            return Err(QgError::Config(format!(
                "min_dt {} exceeds the initial step {}",
                self.run.min_dt, self.run.initial_dt
            )));
        }
        if self.solver.accel <= 0.0 || self.solver.accel >= 2.0 {
            return Err(QgError::Config(format!(
                "relaxation factor {} outside (0, 2)",
                self.solver.accel
            )));
        }
        Ok(())
    }

    /// Grid described by this configuration.
    pub fn create_grid(&self) -> Grid {
        Grid::new(
            self.grid_resolution[0],
            self.grid_resolution[1],
            constants::CHANNEL_LENGTH,
            constants::CHANNEL_HALF_WIDTH,
        )
    }
}
