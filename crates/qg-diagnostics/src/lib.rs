//! Diagnostics for the QG channel model.
//!
//! Derived winds, temperature and pressure fields, kinetic/potential
//! energy budgets, and the pull-based snapshot handed to external
//! writers and viewers.

pub mod energy;
pub mod snapshot;
pub mod winds;
