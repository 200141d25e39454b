// ─────────────────────────────────────────────────────────────────────
// QG Channel Model — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Channel length in x (m). The domain is periodic in this direction.
pub const CHANNEL_LENGTH: f64 = 6.0e6;

/// Channel half-width in y (m); y runs from -W to W between the walls.
pub const CHANNEL_HALF_WIDTH: f64 = 5.0e6;

/// Grid intervals in x.
pub const NX: usize = 16;

/// Grid intervals in y.
pub const NY: usize = 16;

/// Dry gas constant (J kg^-1 K^-1).
pub const RGAS: f64 = 287.0;

/// Specific heat at constant pressure (J kg^-1 K^-1).
pub const CP: f64 = 1004.0;

/// Coriolis parameter at the channel centre (s^-1).
pub const F0: f64 = 1.0e-4;

/// Meridional gradient of planetary vorticity (s^-1 m^-1).
pub const BETA: f64 = 1.6e-11;

/// Static stability parameter (m^-2).
pub const LAMBDA_SQ: f64 = 1.5e-12;

/// Net radiative heating contrast (W/kg).
pub const HEATING: f64 = 2.0e-3;

/// Surface (level 4) pressure (Pa).
pub const SURFACE_PRESSURE: f64 = 1.0e5;

/// Surface drag coefficient (s^-1), felt by level 3 only.
pub const SURFACE_DRAG: f64 = 4.0e-6;

/// Horizontal diffusion coefficient (m^2/s).
pub const DIFFUSION: f64 = 1.0e5;

/// Amplitude applied to the middle-square noise streamfunction (m^2/s).
pub const NOISE_SCALE: f64 = 7.509e6;

/// Seed of the middle-square generator used for the perturbation.
pub const NOISE_SEED: u64 = 1_111_111_111;

/// Eddy kinetic energy above this is treated as numerical blow-up.
pub const EKE_LIMIT: f64 = 1.0e5;

pub const SECONDS_PER_DAY: f64 = 86400.0;
