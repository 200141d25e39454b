//! Numerical integration engine for the two-layer quasi-geostrophic
//! channel model.
//!
//! Vorticity is marched with a three-time-level leapfrog; the
//! streamfunction is diagnosed from it at every step by elliptic
//! inversion (a cached direct solve for the zonal mean, relaxation for
//! the anomaly). See [`model::Model`] for the orchestration.

pub mod model;
pub mod noise;
pub mod relax;
pub mod stability;
pub mod tendency;
pub mod vorticity;
pub mod zonal;
