use thiserror::Error;

#[derive(Error, Debug)]
pub enum QgError {
    #[error(
        "Relaxation failed after {iterations} sweeps: change={change:.4e}, max residual={max_residual:.4e}"
    )]
    RelaxationFailed {
        iterations: usize,
        change: f64,
        max_residual: f64,
    },

    #[error("Singular linear system: zero pivot at row {row}")]
    SingularSystem { row: usize },

    #[error("Non-finite value produced by {stage} at day {day:.2}")]
    NonFinite { stage: &'static str, day: f64 },

    #[error("Eddy kinetic energy {eke:.4e} exceeds the blow-up threshold {limit:.1e}")]
    EnergyBlowup { eke: f64, limit: f64 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type QgResult<T> = Result<T, QgError>;
